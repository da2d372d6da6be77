//! Path-scoped publish/subscribe.

use super::document::Document;
use std::collections::BTreeMap;
use std::fmt;

/// Observable locations in a document.
///
/// Document-level paths hold scalars; `elements` paths hold a per-machine
/// entity map or machine property. A change under an `elements` path always
/// marks the document stale.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum DataPath {
    Basename,
    Name,
    IsStale,
    IsInitialized,
    HeadControllerId,
    StateMachinesId,
    MachineName,
    Meta,
    Visual,
    Position,
    States,
    InitialStates,
    FinalStates,
    ChoiceStates,
    Transitions,
    Components,
    Notes,
}

impl DataPath {
    pub const ALL: [DataPath; 17] = [
        DataPath::Basename,
        DataPath::Name,
        DataPath::IsStale,
        DataPath::IsInitialized,
        DataPath::HeadControllerId,
        DataPath::StateMachinesId,
        DataPath::MachineName,
        DataPath::Meta,
        DataPath::Visual,
        DataPath::Position,
        DataPath::States,
        DataPath::InitialStates,
        DataPath::FinalStates,
        DataPath::ChoiceStates,
        DataPath::Transitions,
        DataPath::Components,
        DataPath::Notes,
    ];

    pub fn is_elements(&self) -> bool {
        !matches!(
            self,
            Self::Basename
                | Self::Name
                | Self::IsStale
                | Self::IsInitialized
                | Self::HeadControllerId
        )
    }

    /// Dotted name, e.g. `elements.states`.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Basename => "basename",
            Self::Name => "name",
            Self::IsStale => "isStale",
            Self::IsInitialized => "isInitialized",
            Self::HeadControllerId => "headControllerId",
            Self::StateMachinesId => "elements.stateMachinesId",
            Self::MachineName => "elements.name",
            Self::Meta => "elements.meta",
            Self::Visual => "elements.visual",
            Self::Position => "elements.position",
            Self::States => "elements.states",
            Self::InitialStates => "elements.initialStates",
            Self::FinalStates => "elements.finalStates",
            Self::ChoiceStates => "elements.choiceStates",
            Self::Transitions => "elements.transitions",
            Self::Components => "elements.components",
            Self::Notes => "elements.notes",
        }
    }
}

impl fmt::Display for DataPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What a listener is told: which path changed and, for machine-scoped
/// paths, in which machine.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Change {
    pub path: DataPath,
    pub sm_id: Option<String>,
}

impl Change {
    pub fn document(path: DataPath) -> Self {
        Self { path, sm_id: None }
    }

    pub fn machine(path: DataPath, sm_id: impl Into<String>) -> Self {
        Self {
            path,
            sm_id: Some(sm_id.into()),
        }
    }
}

/// Callback run after a change. It sees the document read-only, so it
/// cannot start another mutation.
pub type Listener = Box<dyn FnMut(&Change, &Document)>;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SubscriptionId(u64);

/// Registry of listeners per path.
#[derive(Default)]
pub struct NotificationHub {
    next_id: u64,
    listeners: BTreeMap<DataPath, Vec<(SubscriptionId, Listener)>>,
}

impl NotificationHub {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe<F>(&mut self, path: DataPath, listener: F) -> SubscriptionId
    where
        F: FnMut(&Change, &Document) + 'static,
    {
        self.next_id += 1;
        let id = SubscriptionId(self.next_id);
        self.listeners
            .entry(path)
            .or_default()
            .push((id, Box::new(listener)));
        id
    }

    /// Remove a listener. Returns `false` if it was already gone.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        for listeners in self.listeners.values_mut() {
            if let Some(pos) = listeners.iter().position(|(sid, _)| *sid == id) {
                listeners.remove(pos);
                return true;
            }
        }
        false
    }

    pub fn listener_count(&self, path: DataPath) -> usize {
        self.listeners.get(&path).map_or(0, Vec::len)
    }

    /// Call every listener of `change.path`, in subscription order.
    pub fn notify(&mut self, change: &Change, document: &Document) {
        if let Some(listeners) = self.listeners.get_mut(&change.path) {
            for (_, listener) in listeners.iter_mut() {
                listener(change, document);
            }
        }
    }
}

impl fmt::Debug for NotificationHub {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let counts: BTreeMap<_, _> = self
            .listeners
            .iter()
            .map(|(path, listeners)| (path.as_str(), listeners.len()))
            .collect();
        f.debug_struct("NotificationHub")
            .field("listeners", &counts)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[test]
    fn notify_reaches_only_matching_path() {
        let mut hub = NotificationHub::new();
        let doc = Document::default();
        let hits = Rc::new(RefCell::new(Vec::new()));

        let sink = Rc::clone(&hits);
        hub.subscribe(DataPath::States, move |change, _| {
            sink.borrow_mut().push(change.clone())
        });

        hub.notify(&Change::machine(DataPath::Notes, "m"), &doc);
        hub.notify(&Change::machine(DataPath::States, "m"), &doc);

        assert_eq!(*hits.borrow(), vec![Change::machine(DataPath::States, "m")]);
    }

    #[test]
    fn unsubscribe_stops_delivery() {
        let mut hub = NotificationHub::new();
        let doc = Document::default();
        let count = Rc::new(RefCell::new(0));

        let c = Rc::clone(&count);
        let id = hub.subscribe(DataPath::IsStale, move |_, _| *c.borrow_mut() += 1);
        hub.notify(&Change::document(DataPath::IsStale), &doc);

        assert!(hub.unsubscribe(id));
        assert!(!hub.unsubscribe(id));
        hub.notify(&Change::document(DataPath::IsStale), &doc);

        assert_eq!(*count.borrow(), 1);
        assert_eq!(hub.listener_count(DataPath::IsStale), 0);
    }

    #[test]
    fn elements_paths_are_classified() {
        let elements: Vec<_> = DataPath::ALL.iter().filter(|p| p.is_elements()).collect();
        assert_eq!(elements.len(), 12);
        assert!(elements.iter().all(|p| p.as_str().starts_with("elements.")));
    }
}
