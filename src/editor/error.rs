//! Errors surfaced by the mutation API.

use crate::enforcement::TransitionViolation;
use thiserror::Error;

/// Why a transition edit was not applied.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ChangeTransitionError {
    #[error("State machine '{0}' not found")]
    MachineNotFound(String),

    #[error("Transition '{0}' not found")]
    TransitionNotFound(String),

    #[error("Node '{0}' not found")]
    NodeNotFound(String),

    #[error("Transition rejected: {0}")]
    Rejected(#[from] TransitionViolation),
}

impl ChangeTransitionError {
    /// The violated rule, when the edit failed a legality check.
    pub fn violation(&self) -> Option<TransitionViolation> {
        match self {
            Self::Rejected(violation) => Some(*violation),
            _ => None,
        }
    }
}

/// Why a component was not created.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CreateComponentError {
    #[error("State machine '{0}' not found")]
    MachineNotFound(String),

    #[error("Component '{0}' already exists")]
    DuplicateId(String),
}
