//! Mutation API over the document store.
//!
//! [`EditorModel`] is the only writer of a [`Document`]. Every operation
//! follows the same shape:
//!
//! - `create_*` returns the id of the new entity, or `None` when the machine
//!   or a referenced entity does not exist
//! - `change_*`, `link_*`, `unlink_*` and `delete_*` return `false` when the
//!   target is missing (nothing mutated, nobody notified) and `true` once the
//!   change is applied and published
//!
//! Publishing replaces the affected map with a new `Arc` whenever an
//! observer still holds the old one, marks the document stale for content
//! changes, and calls the path's listeners.
//!
//! # Example
//!
//! ```rust
//! use chartdoc::core::{Dimensions, Elements, Point, StateMachine, TransitionLabel, Trigger};
//! use chartdoc::editor::{CreateStateParams, CreateTransitionParams, EditorModel};
//!
//! let mut model = EditorModel::default();
//! model.init(None, "demo", Elements::default());
//! model.create_state_machine("M", StateMachine::default());
//!
//! let s1 = model
//!     .create_state(
//!         CreateStateParams::new("M", "S1", Point::new(100.0, 100.0), Dimensions::new(80.0, 40.0))
//!             .with_id("s1"),
//!     )
//!     .unwrap();
//!
//! let t = model.create_transition(CreateTransitionParams::new(
//!     "M",
//!     &s1,
//!     &s1,
//!     Some(TransitionLabel::with_trigger(Trigger::event("C", "go"))),
//! ));
//! assert!(t.is_some());
//! assert!(model.document().is_stale());
//! ```

mod components;
mod config;
mod error;
mod events;
mod machine;
mod notes;
mod pseudostates;
mod states;
mod transitions;

pub use components::CreateComponentParams;
pub use config::EditorConfig;
pub use error::{ChangeTransitionError, CreateComponentError};
pub use events::EventSelection;
pub use notes::CreateNoteParams;
pub use pseudostates::CreatePseudostateParams;
pub use states::{ChangeStateParams, CreateStateParams};
pub use transitions::{ChangeTransitionParams, CreateTransitionParams};

use crate::core::{
    ChoiceState, Component, Elements, EntityMap, FinalState, IdGenerator, InitialState, Note,
    State, StateMachine, Transition,
};
use crate::enforcement::TransitionRules;
use crate::store::{Change, DataPath, Document, NotificationHub, SubscriptionId};
use std::fmt;
use std::sync::Arc;

/// Hook run after [`EditorModel::init`] so platform collaborators can load
/// whatever the new document needs.
pub type PlatformInit = Box<dyn FnMut(&Elements)>;

/// Apply `apply` to entity `id` if it exists and passes `check`.
///
/// The map is only touched (and its identity only changes) when the update
/// goes ahead.
pub(crate) fn update_entity<T: Clone>(
    map: &mut EntityMap<T>,
    id: &str,
    check: impl FnOnce(&T) -> bool,
    apply: impl FnOnce(&mut T),
) -> bool {
    match map.get(id) {
        Some(entity) if check(entity) => {}
        _ => return false,
    }
    if let Some(entity) = Arc::make_mut(map).get_mut(id) {
        apply(entity);
    }
    true
}

pub(crate) fn remove_entity<T: Clone>(map: &mut EntityMap<T>, id: &str) -> bool {
    if !map.contains_key(id) {
        return false;
    }
    Arc::make_mut(map).remove(id);
    true
}

/// An entity type stored in one of a machine's maps, and the path that
/// publishes it.
pub(crate) trait Stored: Clone {
    const PATH: DataPath;

    fn map(sm: &StateMachine) -> &EntityMap<Self>;
    fn map_mut(sm: &mut StateMachine) -> &mut EntityMap<Self>;
}

macro_rules! stored {
    ($ty:ty, $field:ident, $path:expr) => {
        impl Stored for $ty {
            const PATH: DataPath = $path;

            fn map(sm: &StateMachine) -> &EntityMap<Self> {
                &sm.$field
            }

            fn map_mut(sm: &mut StateMachine) -> &mut EntityMap<Self> {
                &mut sm.$field
            }
        }
    };
}

stored!(State, states, DataPath::States);
stored!(InitialState, initial_states, DataPath::InitialStates);
stored!(FinalState, final_states, DataPath::FinalStates);
stored!(ChoiceState, choice_states, DataPath::ChoiceStates);
stored!(Transition, transitions, DataPath::Transitions);
stored!(Component, components, DataPath::Components);
stored!(Note, notes, DataPath::Notes);

/// The document store together with its mutation API and notification hub.
pub struct EditorModel {
    data: Document,
    hub: NotificationHub,
    config: EditorConfig,
    ids: Box<dyn IdGenerator>,
    rules: TransitionRules,
    platform_init: Option<PlatformInit>,
}

impl EditorModel {
    pub fn new(config: EditorConfig) -> Self {
        let ids = config.id_strategy.build();
        Self {
            data: Document::default(),
            hub: NotificationHub::new(),
            config,
            ids,
            rules: TransitionRules::standard(),
            platform_init: None,
        }
    }

    /// Replace the transition legality rules.
    pub fn with_rules(mut self, rules: TransitionRules) -> Self {
        self.rules = rules;
        self
    }

    pub fn with_id_generator(mut self, ids: impl IdGenerator + 'static) -> Self {
        self.ids = Box::new(ids);
        self
    }

    pub fn on_platform_init(mut self, hook: impl FnMut(&Elements) + 'static) -> Self {
        self.platform_init = Some(Box::new(hook));
        self
    }

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    pub fn rules(&self) -> &TransitionRules {
        &self.rules
    }

    /// Read-only view of the current document.
    pub fn document(&self) -> &Document {
        &self.data
    }

    pub fn subscribe<F>(&mut self, path: DataPath, listener: F) -> SubscriptionId
    where
        F: FnMut(&Change, &Document) + 'static,
    {
        self.hub.subscribe(path, listener)
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.hub.unsubscribe(id)
    }

    pub fn hub(&self) -> &NotificationHub {
        &self.hub
    }

    pub(crate) fn entity<T: Stored>(&self, sm_id: &str, id: &str) -> Option<&T> {
        self.data.machine(sm_id).and_then(|sm| T::map(sm).get(id))
    }

    pub(crate) fn contains<T: Stored>(&self, sm_id: &str, id: &str) -> bool {
        self.entity::<T>(sm_id, id).is_some()
    }

    /// Supplied id, or a fresh one unique among the machine's graph nodes.
    pub(crate) fn node_id(&mut self, sm_id: &str, supplied: Option<String>) -> Option<String> {
        let sm = self.data.machine(sm_id)?;
        Some(supplied.unwrap_or_else(|| self.ids.generate(&sm.node_ids())))
    }

    /// Supplied id, or a fresh one unique among the machine's transitions.
    pub(crate) fn transition_id(&mut self, sm_id: &str, supplied: Option<String>) -> Option<String> {
        let sm = self.data.machine(sm_id)?;
        Some(supplied.unwrap_or_else(|| self.ids.generate(&sm.transition_ids())))
    }

    pub(crate) fn insert<T: Stored>(&mut self, sm_id: &str, id: &str, entity: T) -> bool {
        let Some(sm) = self.data.machine_mut(sm_id) else {
            return false;
        };
        Arc::make_mut(T::map_mut(sm)).insert(id.to_string(), entity);
        self.publish(sm_id, T::PATH);
        true
    }

    /// Content update of one entity, gated by `check`.
    pub(crate) fn update_if<T: Stored>(
        &mut self,
        sm_id: &str,
        id: &str,
        check: impl FnOnce(&T) -> bool,
        apply: impl FnOnce(&mut T),
    ) -> bool {
        let Some(sm) = self.data.machine_mut(sm_id) else {
            return false;
        };
        if !update_entity(T::map_mut(sm), id, check, apply) {
            return false;
        }
        self.publish(sm_id, T::PATH);
        true
    }

    pub(crate) fn update<T: Stored>(&mut self, sm_id: &str, id: &str, apply: impl FnOnce(&mut T)) -> bool {
        self.update_if(sm_id, id, |_: &T| true, apply)
    }

    /// Selection update of one entity; does not mark the document stale.
    pub(crate) fn select<T: Stored>(
        &mut self,
        sm_id: &str,
        id: &str,
        check: impl FnOnce(&T) -> bool,
        apply: impl FnOnce(&mut T),
    ) -> bool {
        let Some(sm) = self.data.machine_mut(sm_id) else {
            return false;
        };
        if !update_entity(T::map_mut(sm), id, check, apply) {
            return false;
        }
        self.publish_selection(sm_id, T::PATH);
        true
    }

    pub(crate) fn remove<T: Stored>(&mut self, sm_id: &str, id: &str) -> bool {
        let Some(sm) = self.data.machine_mut(sm_id) else {
            return false;
        };
        if !remove_entity(T::map_mut(sm), id) {
            return false;
        }
        self.publish(sm_id, T::PATH);
        true
    }

    /// Content change under `path` in machine `sm_id`: mark stale, then notify.
    pub(crate) fn publish(&mut self, sm_id: &str, path: DataPath) {
        if path.is_elements() {
            self.data.is_stale = true;
            self.hub
                .notify(&Change::document(DataPath::IsStale), &self.data);
        }
        if path == DataPath::StateMachinesId {
            self.data.refresh_machine_ids();
            self.hub.notify(&Change::document(path), &self.data);
        } else {
            self.hub.notify(&Change::machine(path, sm_id), &self.data);
        }
    }

    /// Selection-only change: replace and notify, without marking stale.
    pub(crate) fn publish_selection(&mut self, sm_id: &str, path: DataPath) {
        self.hub.notify(&Change::machine(path, sm_id), &self.data);
    }

    pub(crate) fn publish_document(&mut self, path: DataPath) {
        self.hub.notify(&Change::document(path), &self.data);
    }
}

impl Default for EditorModel {
    fn default() -> Self {
        Self::new(EditorConfig::default())
    }
}

impl fmt::Debug for EditorModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EditorModel")
            .field("data", &self.data)
            .field("hub", &self.hub)
            .field("config", &self.config)
            .field("rules", &self.rules.len())
            .finish()
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::*;
    use crate::core::{IdStrategy, StateMachine};
    use std::cell::RefCell;
    use std::rc::Rc;

    pub const SM: &str = "M";

    /// Initialized model with one empty machine `M` and sequential ids.
    pub fn model() -> EditorModel {
        let mut model =
            EditorModel::new(EditorConfig::new().id_strategy(IdStrategy::Sequential("n".into())));
        model.init(None, "test", Elements::default());
        model.create_state_machine(SM, StateMachine::default());
        model.trigger_save(None, None);
        model
    }

    /// Record every change delivered on `paths`.
    pub fn record(model: &mut EditorModel, paths: &[DataPath]) -> Rc<RefCell<Vec<Change>>> {
        let log = Rc::new(RefCell::new(Vec::new()));
        for path in paths {
            let sink = Rc::clone(&log);
            model.subscribe(*path, move |change, _| sink.borrow_mut().push(change.clone()));
        }
        log
    }
}
