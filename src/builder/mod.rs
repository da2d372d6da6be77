//! Builder API for assembling import payloads.
//!
//! Import adapters (and tests) construct machines here instead of through
//! the editor, so nothing is notified and nothing becomes stale. Every
//! payload is checked structurally before it can replace a document:
//! node ids are unique, parents are states without cycles, transition
//! endpoints resolve and component orders do not collide.

pub mod error;
pub mod machine;
pub mod transition;
pub mod validate;

pub use error::BuildError;
pub use machine::StateMachineBuilder;
pub use transition::TransitionBuilder;
pub use validate::{machine_problems, validate_elements, validate_machine};

use crate::core::{Transition, TransitionLabel, Trigger};

/// Create an unlabeled transition.
///
/// # Example
///
/// ```
/// use chartdoc::builder::simple_transition;
///
/// let transition = simple_transition("init", "idle");
/// assert_eq!(transition.source_id, "init");
/// assert!(transition.label.is_none());
/// ```
pub fn simple_transition(from: impl Into<String>, to: impl Into<String>) -> Transition {
    Transition {
        source_id: from.into(),
        target_id: to.into(),
        label: None,
        color: None,
        selection: false,
    }
}

/// Create a transition fired by a component signal.
///
/// # Example
///
/// ```
/// use chartdoc::builder::triggered_transition;
///
/// let transition = triggered_transition("idle", "on", "button", "clicked");
/// assert!(transition.label.unwrap().has_trigger());
/// ```
pub fn triggered_transition(
    from: impl Into<String>,
    to: impl Into<String>,
    component: impl Into<String>,
    method: impl Into<String>,
) -> Transition {
    Transition {
        label: Some(TransitionLabel::with_trigger(Trigger::event(component, method))),
        ..simple_transition(from, to)
    }
}
