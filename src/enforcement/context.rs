//! Context provided to transition rule checks.

use crate::core::{NodeKind, StateMachine};

/// What the rules need to know about a proposed transition.
///
/// Endpoint kinds are `None` when the id resolves to nothing in the machine.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TransitionContext {
    pub source: Option<NodeKind>,
    pub target: Option<NodeKind>,
    pub has_trigger: bool,
}

impl TransitionContext {
    /// Resolve both endpoints in `machine` (pure).
    pub fn resolve(machine: &StateMachine, source_id: &str, target_id: &str, has_trigger: bool) -> Self {
        Self {
            source: machine.node_kind(source_id),
            target: machine.node_kind(target_id),
            has_trigger,
        }
    }

    pub fn source_is(&self, kind: NodeKind) -> bool {
        self.source == Some(kind)
    }

    pub fn target_is(&self, kind: NodeKind) -> bool {
        self.target == Some(kind)
    }
}
