//! Build errors for machine and transition builders.

use thiserror::Error;

/// Structural problems found while assembling or importing a machine.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum BuildError {
    #[error("Transition source not specified. Call .from(id)")]
    MissingFromState,

    #[error("Transition target not specified. Call .to(id)")]
    MissingToState,

    /// The same id names more than one graph node.
    #[error("Node id {0} is used by more than one node")]
    DuplicateNodeId(String),

    #[error("Node {id} has parent {parent}, which is not a state")]
    DanglingParent { id: String, parent: String },

    #[error("State {0} is its own ancestor")]
    ParentCycle(String),

    #[error("Transition {transition} references unknown node {node}")]
    UnknownEndpoint { transition: String, node: String },

    #[error("Component order {0} is used more than once")]
    DuplicateComponentOrder(i64),

    #[error("State machine {sm_id}: {source}")]
    Machine {
        sm_id: String,
        #[source]
        source: Box<BuildError>,
    },
}

impl BuildError {
    pub(crate) fn in_machine(self, sm_id: impl Into<String>) -> Self {
        BuildError::Machine {
            sm_id: sm_id.into(),
            source: Box::new(self),
        }
    }
}
