//! The in-memory document and its read-only snapshot view.

use super::notify::DataPath;
use crate::core::{
    ChoiceState, Component, Elements, EntityMap, FinalState, InitialState, Meta, Note, Point,
    State, StateMachine, Transition,
};
use std::sync::Arc;

/// Id of the document-level machine.
pub const HEAD_SCOPE: &str = "";

/// Everything an editor session knows about the open document.
///
/// Only [`EditorModel`](crate::editor::EditorModel) writes to it; everyone
/// else reads through the accessors or [`Document::snapshot`].
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Document {
    pub(crate) basename: Option<String>,
    pub(crate) name: Option<String>,
    pub(crate) elements: Elements,
    pub(crate) head_controller_id: String,
    pub(crate) is_initialized: bool,
    pub(crate) is_stale: bool,
    pub(crate) machine_ids: Arc<Vec<String>>,
}

impl Document {
    pub(crate) fn fresh(basename: Option<String>, name: String, mut elements: Elements) -> Self {
        elements
            .state_machines
            .insert(HEAD_SCOPE.to_string(), StateMachine::default());
        let mut doc = Self {
            basename,
            name: Some(name),
            elements,
            head_controller_id: HEAD_SCOPE.to_string(),
            is_initialized: true,
            is_stale: false,
            machine_ids: Arc::default(),
        };
        doc.refresh_machine_ids();
        doc
    }

    pub(crate) fn refresh_machine_ids(&mut self) {
        self.machine_ids = Arc::new(self.elements.state_machines.keys().cloned().collect());
    }

    pub(crate) fn machine_mut(&mut self, sm_id: &str) -> Option<&mut StateMachine> {
        self.elements.state_machines.get_mut(sm_id)
    }

    pub fn basename(&self) -> Option<&str> {
        self.basename.as_deref()
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn elements(&self) -> &Elements {
        &self.elements
    }

    pub fn head_controller_id(&self) -> &str {
        &self.head_controller_id
    }

    pub fn is_initialized(&self) -> bool {
        self.is_initialized
    }

    pub fn is_stale(&self) -> bool {
        self.is_stale
    }

    pub fn machine_ids(&self) -> &Arc<Vec<String>> {
        &self.machine_ids
    }

    pub fn machine(&self, sm_id: &str) -> Option<&StateMachine> {
        self.elements.state_machines.get(sm_id)
    }

    pub fn states(&self, sm_id: &str) -> Option<&EntityMap<State>> {
        self.machine(sm_id).map(|sm| &sm.states)
    }

    pub fn initial_states(&self, sm_id: &str) -> Option<&EntityMap<InitialState>> {
        self.machine(sm_id).map(|sm| &sm.initial_states)
    }

    pub fn final_states(&self, sm_id: &str) -> Option<&EntityMap<FinalState>> {
        self.machine(sm_id).map(|sm| &sm.final_states)
    }

    pub fn choice_states(&self, sm_id: &str) -> Option<&EntityMap<ChoiceState>> {
        self.machine(sm_id).map(|sm| &sm.choice_states)
    }

    pub fn transitions(&self, sm_id: &str) -> Option<&EntityMap<Transition>> {
        self.machine(sm_id).map(|sm| &sm.transitions)
    }

    pub fn components(&self, sm_id: &str) -> Option<&EntityMap<Component>> {
        self.machine(sm_id).map(|sm| &sm.components)
    }

    pub fn notes(&self, sm_id: &str) -> Option<&EntityMap<Note>> {
        self.machine(sm_id).map(|sm| &sm.notes)
    }

    /// Read the value published at `path`. Machine-scoped paths look at
    /// `sm_id`; document-level paths ignore it.
    pub fn snapshot(&self, sm_id: &str, path: DataPath) -> Snapshot {
        match path {
            DataPath::Basename => Snapshot::Text(self.basename.clone()),
            DataPath::Name => Snapshot::Text(self.name.clone()),
            DataPath::IsStale => Snapshot::Flag(self.is_stale),
            DataPath::IsInitialized => Snapshot::Flag(self.is_initialized),
            DataPath::HeadControllerId => Snapshot::Text(Some(self.head_controller_id.clone())),
            DataPath::StateMachinesId => Snapshot::MachineIds(Arc::clone(&self.machine_ids)),
            _ => match self.machine(sm_id) {
                Some(sm) => Snapshot::of_machine(sm, path),
                None => Snapshot::Missing,
            },
        }
    }
}

/// Value read at a path.
///
/// Map-valued snapshots share storage with the document; compare them with
/// [`Snapshot::same_as`] to learn whether anything changed.
#[derive(Clone, Debug)]
pub enum Snapshot {
    Text(Option<String>),
    Flag(bool),
    Position(Point),
    MachineIds(Arc<Vec<String>>),
    Meta(Arc<Meta>),
    States(EntityMap<State>),
    InitialStates(EntityMap<InitialState>),
    FinalStates(EntityMap<FinalState>),
    ChoiceStates(EntityMap<ChoiceState>),
    Transitions(EntityMap<Transition>),
    Components(EntityMap<Component>),
    Notes(EntityMap<Note>),
    Missing,
}

impl Snapshot {
    fn of_machine(sm: &StateMachine, path: DataPath) -> Self {
        match path {
            DataPath::MachineName => Self::Text(sm.name.clone()),
            DataPath::Meta => Self::Meta(Arc::clone(&sm.meta)),
            DataPath::Visual => Self::Flag(sm.visual),
            DataPath::Position => Self::Position(sm.position),
            DataPath::States => Self::States(Arc::clone(&sm.states)),
            DataPath::InitialStates => Self::InitialStates(Arc::clone(&sm.initial_states)),
            DataPath::FinalStates => Self::FinalStates(Arc::clone(&sm.final_states)),
            DataPath::ChoiceStates => Self::ChoiceStates(Arc::clone(&sm.choice_states)),
            DataPath::Transitions => Self::Transitions(Arc::clone(&sm.transitions)),
            DataPath::Components => Self::Components(Arc::clone(&sm.components)),
            DataPath::Notes => Self::Notes(Arc::clone(&sm.notes)),
            DataPath::Basename
            | DataPath::Name
            | DataPath::IsStale
            | DataPath::IsInitialized
            | DataPath::HeadControllerId
            | DataPath::StateMachinesId => Self::Missing,
        }
    }

    /// Identity for shared maps, equality for scalars.
    pub fn same_as(&self, other: &Snapshot) -> bool {
        match (self, other) {
            (Self::Text(a), Self::Text(b)) => a == b,
            (Self::Flag(a), Self::Flag(b)) => a == b,
            (Self::Position(a), Self::Position(b)) => a == b,
            (Self::MachineIds(a), Self::MachineIds(b)) => Arc::ptr_eq(a, b),
            (Self::Meta(a), Self::Meta(b)) => Arc::ptr_eq(a, b),
            (Self::States(a), Self::States(b)) => Arc::ptr_eq(a, b),
            (Self::InitialStates(a), Self::InitialStates(b)) => Arc::ptr_eq(a, b),
            (Self::FinalStates(a), Self::FinalStates(b)) => Arc::ptr_eq(a, b),
            (Self::ChoiceStates(a), Self::ChoiceStates(b)) => Arc::ptr_eq(a, b),
            (Self::Transitions(a), Self::Transitions(b)) => Arc::ptr_eq(a, b),
            (Self::Components(a), Self::Components(b)) => Arc::ptr_eq(a, b),
            (Self::Notes(a), Self::Notes(b)) => Arc::ptr_eq(a, b),
            (Self::Missing, Self::Missing) => true,
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fresh_document_has_head_scope() {
        let doc = Document::fresh(None, "Untitled".into(), Elements::default());

        assert!(doc.is_initialized());
        assert!(!doc.is_stale());
        assert!(doc.machine(HEAD_SCOPE).is_some());
        assert_eq!(doc.machine_ids().as_slice(), &[String::new()]);
    }

    #[test]
    fn snapshots_of_unchanged_maps_share_identity() {
        let doc = Document::fresh(None, "x".into(), Elements::default());
        let a = doc.snapshot(HEAD_SCOPE, DataPath::States);
        let b = doc.snapshot(HEAD_SCOPE, DataPath::States);

        assert!(a.same_as(&b));
        assert!(!a.same_as(&doc.snapshot(HEAD_SCOPE, DataPath::Notes)));
    }

    #[test]
    fn missing_machine_reads_as_missing() {
        let doc = Document::default();
        assert!(matches!(doc.snapshot("nope", DataPath::States), Snapshot::Missing));
    }
}
