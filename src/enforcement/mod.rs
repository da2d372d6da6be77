//! Validation-based legality rules for transitions.
//!
//! Transition edits are checked against an ordered set of structural rules
//! using Stillwater's `Validation` type, which accumulates every violated
//! rule instead of stopping at the first. The first violation in rule order
//! is what the mutation API reports; the full list is there for diagnostics.
//!
//! # Example
//!
//! ```rust
//! use chartdoc::core::NodeKind;
//! use chartdoc::enforcement::{TransitionContext, TransitionRules, TransitionViolation};
//!
//! let rules = TransitionRules::standard();
//! let context = TransitionContext {
//!     source: Some(NodeKind::Choice),
//!     target: Some(NodeKind::State),
//!     has_trigger: true,
//! };
//!
//! assert_eq!(
//!     rules.check(&context),
//!     Err(TransitionViolation::TriggerNotAllowedFromChoice)
//! );
//! ```

pub mod context;
pub mod rules;
pub mod violations;

// Re-export commonly used types
pub use context::TransitionContext;
pub use rules::{TransitionCheck, TransitionRules};
pub use violations::TransitionViolation;
