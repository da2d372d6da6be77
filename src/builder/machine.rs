//! Builder for assembling a state machine outside the editor.

use crate::builder::error::BuildError;
use crate::builder::transition::TransitionBuilder;
use crate::builder::validate::machine_problems;
use crate::core::{
    ChoiceState, Component, FinalState, InitialState, Note, Point, State, StateMachine, Transition,
};
use std::sync::Arc;

/// Builder for a [`StateMachine`] payload, validated on [`build`](Self::build).
#[derive(Clone, Debug)]
pub struct StateMachineBuilder {
    machine: StateMachine,
}

impl StateMachineBuilder {
    pub fn new(platform: impl Into<String>) -> Self {
        Self {
            machine: StateMachine::new(platform),
        }
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.machine.name = Some(name.into());
        self
    }

    pub fn position(mut self, position: Point) -> Self {
        self.machine.position = position;
        self
    }

    pub fn visual(mut self, visual: bool) -> Self {
        self.machine.visual = visual;
        self
    }

    pub fn meta(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        Arc::make_mut(&mut self.machine.meta).insert(key.into(), value.into());
        self
    }

    pub fn state(mut self, id: impl Into<String>, state: State) -> Self {
        Arc::make_mut(&mut self.machine.states).insert(id.into(), state);
        self
    }

    pub fn initial(mut self, id: impl Into<String>, state: InitialState) -> Self {
        Arc::make_mut(&mut self.machine.initial_states).insert(id.into(), state);
        self
    }

    pub fn final_state(mut self, id: impl Into<String>, state: FinalState) -> Self {
        Arc::make_mut(&mut self.machine.final_states).insert(id.into(), state);
        self
    }

    pub fn choice(mut self, id: impl Into<String>, state: ChoiceState) -> Self {
        Arc::make_mut(&mut self.machine.choice_states).insert(id.into(), state);
        self
    }

    /// Add a transition using a builder.
    /// Returns an error if the builder fails validation.
    pub fn transition(
        self,
        id: impl Into<String>,
        builder: TransitionBuilder,
    ) -> Result<Self, BuildError> {
        let transition = builder.build()?;
        Ok(self.add_transition(id, transition))
    }

    /// Add a pre-built transition.
    pub fn add_transition(mut self, id: impl Into<String>, transition: Transition) -> Self {
        Arc::make_mut(&mut self.machine.transitions).insert(id.into(), transition);
        self
    }

    pub fn component(mut self, id: impl Into<String>, component: Component) -> Self {
        Arc::make_mut(&mut self.machine.components).insert(id.into(), component);
        self
    }

    pub fn note(mut self, id: impl Into<String>, note: Note) -> Self {
        Arc::make_mut(&mut self.machine.notes).insert(id.into(), note);
        self
    }

    /// Build the machine, failing with the first structural problem.
    pub fn build(self) -> Result<StateMachine, BuildError> {
        match machine_problems(&self.machine).into_iter().next() {
            Some(problem) => Err(problem),
            None => Ok(self.machine),
        }
    }
}
