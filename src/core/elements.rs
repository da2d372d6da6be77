//! Entities of a state-machine diagram and the per-machine maps that own them.

use super::geometry::{Dimensions, Point};
use super::label::{is_false, Event, TransitionLabel};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;

/// Shared, copy-on-write map of entities keyed by id.
///
/// Observers hold clones of the `Arc`; the mutation API replaces it on
/// every content change, so pointer identity tells whether anything moved.
pub type EntityMap<T> = Arc<BTreeMap<String, T>>;

/// Free-form machine metadata.
pub type Meta = BTreeMap<String, String>;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct State {
    pub name: String,
    pub position: Point,
    pub dimensions: Dimensions,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(default, skip_serializing_if = "is_false")]
    pub selection: bool,
    #[serde(default)]
    pub events: Vec<Event>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InitialState {
    pub position: Point,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FinalState {
    pub position: Point,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<String>,
    #[serde(default, skip_serializing_if = "is_false")]
    pub selection: bool,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChoiceState {
    pub position: Point,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<String>,
    #[serde(default, skip_serializing_if = "is_false")]
    pub selection: bool,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transition {
    pub source_id: String,
    pub target_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<TransitionLabel>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(default, skip_serializing_if = "is_false")]
    pub selection: bool,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Component {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub position: Point,
    #[serde(default)]
    pub parameters: BTreeMap<String, String>,
    pub order: i64,
    #[serde(default, skip_serializing_if = "is_false")]
    pub selection: bool,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Note {
    pub text: String,
    pub position: Point,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font_size: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub background_color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text_color: Option<String>,
    #[serde(default, skip_serializing_if = "is_false")]
    pub selection: bool,
}

impl State {
    pub fn new(name: impl Into<String>, position: Point, dimensions: Dimensions) -> Self {
        Self {
            name: name.into(),
            position,
            dimensions,
            parent_id: None,
            color: None,
            selection: false,
            events: Vec::new(),
        }
    }

    pub fn with_parent(mut self, parent_id: impl Into<String>) -> Self {
        self.parent_id = Some(parent_id.into());
        self
    }

    pub fn with_event(mut self, event: Event) -> Self {
        self.events.push(event);
        self
    }
}

impl Component {
    pub fn new(kind: impl Into<String>, position: Point, order: i64) -> Self {
        Self {
            kind: kind.into(),
            name: None,
            position,
            parameters: BTreeMap::new(),
            order,
            selection: false,
        }
    }
}

impl Note {
    pub fn new(text: impl Into<String>, position: Point) -> Self {
        Self {
            text: text.into(),
            position,
            parent_id: None,
            font_size: None,
            background_color: None,
            text_color: None,
            selection: false,
        }
    }
}

/// Which map a graph node id resolves to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum NodeKind {
    State,
    Initial,
    Final,
    Choice,
    Note,
}

/// Which of a machine's entity maps changed during a rename.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RenameOutcome {
    pub states: usize,
    pub transitions: usize,
}

impl RenameOutcome {
    pub fn total(&self) -> usize {
        self.states + self.transitions
    }
}

/// One independently scoped graph of the document.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct StateMachine {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub platform: String,
    pub position: Point,
    pub visual: bool,
    pub meta: Arc<Meta>,
    pub states: EntityMap<State>,
    pub initial_states: EntityMap<InitialState>,
    pub final_states: EntityMap<FinalState>,
    pub choice_states: EntityMap<ChoiceState>,
    pub transitions: EntityMap<Transition>,
    pub components: EntityMap<Component>,
    pub notes: EntityMap<Note>,
}

impl Default for StateMachine {
    fn default() -> Self {
        Self {
            name: None,
            platform: String::new(),
            position: Point::default(),
            visual: true,
            meta: Arc::default(),
            states: Arc::default(),
            initial_states: Arc::default(),
            final_states: Arc::default(),
            choice_states: Arc::default(),
            transitions: Arc::default(),
            components: Arc::default(),
            notes: Arc::default(),
        }
    }
}

impl StateMachine {
    pub fn new(platform: impl Into<String>) -> Self {
        Self {
            platform: platform.into(),
            ..Self::default()
        }
    }

    /// Resolve a graph node id. States win over pseudostates, which win over notes.
    pub fn node_kind(&self, id: &str) -> Option<NodeKind> {
        if self.states.contains_key(id) {
            Some(NodeKind::State)
        } else if self.initial_states.contains_key(id) {
            Some(NodeKind::Initial)
        } else if self.final_states.contains_key(id) {
            Some(NodeKind::Final)
        } else if self.choice_states.contains_key(id) {
            Some(NodeKind::Choice)
        } else if self.notes.contains_key(id) {
            Some(NodeKind::Note)
        } else {
            None
        }
    }

    /// Every id a transition endpoint could name.
    pub fn node_ids(&self) -> BTreeSet<&str> {
        self.states
            .keys()
            .chain(self.initial_states.keys())
            .chain(self.final_states.keys())
            .chain(self.choice_states.keys())
            .chain(self.notes.keys())
            .map(String::as_str)
            .collect()
    }

    pub fn transition_ids(&self) -> BTreeSet<&str> {
        self.transitions.keys().map(String::as_str).collect()
    }

    pub fn max_component_order(&self) -> Option<i64> {
        self.components.values().map(|c| c.order).max()
    }

    /// Rewrite every reference to component `old` in this machine's events
    /// and transition labels. Maps without a matching reference keep their
    /// identity.
    pub fn rename_component_references(&mut self, old: &str, new: &str) -> RenameOutcome {
        let mut outcome = RenameOutcome::default();

        let mut states = (*self.states).clone();
        for state in states.values_mut() {
            for event in &mut state.events {
                outcome.states += event.rename_component(old, new);
            }
        }
        if outcome.states > 0 {
            self.states = Arc::new(states);
        }

        let mut transitions = (*self.transitions).clone();
        for transition in transitions.values_mut() {
            if let Some(label) = transition.label.as_mut() {
                outcome.transitions += label.rename_component(old, new);
            }
        }
        if outcome.transitions > 0 {
            self.transitions = Arc::new(transitions);
        }

        outcome
    }
}

/// Whole-document payload, as handed over by import adapters.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Elements {
    #[serde(default)]
    pub state_machines: BTreeMap<String, StateMachine>,
}

impl Elements {
    pub fn with_machine(mut self, id: impl Into<String>, machine: StateMachine) -> Self {
        self.state_machines.insert(id.into(), machine);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Action, Trigger};

    fn state(name: &str) -> State {
        State::new(name, Point::default(), Dimensions::new(100.0, 50.0))
    }

    #[test]
    fn node_kind_resolves_each_map() {
        let mut sm = StateMachine::default();
        Arc::make_mut(&mut sm.states).insert("s".into(), state("S"));
        Arc::make_mut(&mut sm.initial_states).insert("i".into(), InitialState::default());
        Arc::make_mut(&mut sm.final_states).insert("f".into(), FinalState::default());
        Arc::make_mut(&mut sm.choice_states).insert("c".into(), ChoiceState::default());

        assert_eq!(sm.node_kind("s"), Some(NodeKind::State));
        assert_eq!(sm.node_kind("i"), Some(NodeKind::Initial));
        assert_eq!(sm.node_kind("f"), Some(NodeKind::Final));
        assert_eq!(sm.node_kind("c"), Some(NodeKind::Choice));
        assert_eq!(sm.node_kind("nope"), None);
        assert_eq!(sm.node_ids().len(), 4);
    }

    #[test]
    fn rename_without_matches_keeps_identity() {
        let mut sm = StateMachine::default();
        let mut s = state("S");
        s.events
            .push(Event::new(Trigger::event("timer", "tick")).with_action(Action::new("led", "on")));
        Arc::make_mut(&mut sm.states).insert("s".into(), s);

        let before = Arc::clone(&sm.states);
        let outcome = sm.rename_component_references("button", "key");

        assert_eq!(outcome.total(), 0);
        assert!(Arc::ptr_eq(&before, &sm.states));
    }

    #[test]
    fn default_machine_is_visual() {
        let sm: StateMachine = serde_json::from_str("{}").unwrap();
        assert!(sm.visual);
        assert!(sm.states.is_empty());
    }
}
