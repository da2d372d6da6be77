//! Builder for document transitions.

use crate::builder::error::BuildError;
use crate::core::{Action, Condition, Transition, TransitionLabel, Trigger};

/// Fluent builder for a [`Transition`] between two node ids.
#[derive(Clone, Debug, Default)]
pub struct TransitionBuilder {
    source_id: Option<String>,
    target_id: Option<String>,
    trigger: Option<Trigger>,
    condition: Option<Condition>,
    actions: Vec<Action>,
    color: Option<String>,
}

impl TransitionBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the source node (required).
    pub fn from(mut self, id: impl Into<String>) -> Self {
        self.source_id = Some(id.into());
        self
    }

    /// Set the target node (required).
    pub fn to(mut self, id: impl Into<String>) -> Self {
        self.target_id = Some(id.into());
        self
    }

    pub fn trigger(mut self, trigger: Trigger) -> Self {
        self.trigger = Some(trigger);
        self
    }

    /// Guard the transition with a condition.
    pub fn when(mut self, condition: Condition) -> Self {
        self.condition = Some(condition);
        self
    }

    pub fn action(mut self, action: Action) -> Self {
        self.actions.push(action);
        self
    }

    pub fn color(mut self, color: impl Into<String>) -> Self {
        self.color = Some(color.into());
        self
    }

    /// Build the transition. A label is attached only when a trigger,
    /// condition or action was given.
    pub fn build(self) -> Result<Transition, BuildError> {
        let source_id = self.source_id.ok_or(BuildError::MissingFromState)?;
        let target_id = self.target_id.ok_or(BuildError::MissingToState)?;

        let label = if self.trigger.is_none() && self.condition.is_none() && self.actions.is_empty() {
            None
        } else {
            Some(TransitionLabel {
                trigger: self.trigger,
                condition: self.condition,
                actions: self.actions,
                position: None,
            })
        };

        Ok(Transition {
            source_id,
            target_id,
            label,
            color: self.color,
            selection: false,
        })
    }
}
