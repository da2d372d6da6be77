//! Transition legality rules using Validation.

use crate::core::NodeKind;
use crate::enforcement::context::TransitionContext;
use crate::enforcement::violations::TransitionViolation;
use stillwater::validation::Validation;
use stillwater::NonEmptyVec;

/// Type alias for rule check functions
pub type TransitionCheck =
    Box<dyn Fn(&TransitionContext) -> Validation<(), NonEmptyVec<TransitionViolation>> + Send + Sync>;

/// Ordered set of transition rules.
/// Uses Validation to accumulate ALL violations; the first one in rule
/// order is the reason reported to callers.
pub struct TransitionRules {
    checks: Vec<TransitionCheck>,
}

impl TransitionRules {
    /// An empty rule set that accepts everything.
    pub fn new() -> Self {
        Self { checks: Vec::new() }
    }

    /// The built-in diagram rules, in evaluation order.
    pub fn standard() -> Self {
        Self::new()
            .require_pred(
                |ctx| !ctx.target_is(NodeKind::Initial),
                TransitionViolation::TargetIsInitial,
            )
            .require_pred(
                |ctx| {
                    ctx.has_trigger
                        || ctx.source_is(NodeKind::Choice)
                        || ctx.source_is(NodeKind::Initial)
                },
                TransitionViolation::EmptyTriggerNotAllowed,
            )
            .require_pred(
                |ctx| !(ctx.has_trigger && ctx.source_is(NodeKind::Choice)),
                TransitionViolation::TriggerNotAllowedFromChoice,
            )
            .require_pred(
                |ctx| !ctx.target_is(NodeKind::Note) || ctx.source_is(NodeKind::Note),
                TransitionViolation::NoteTargetRequiresNoteSource,
            )
            .require_pred(
                |ctx| !ctx.source_is(NodeKind::Final),
                TransitionViolation::SourceIsFinal,
            )
    }

    /// Add a custom validation check
    pub fn require<F>(mut self, check: F) -> Self
    where
        F: Fn(&TransitionContext) -> Validation<(), NonEmptyVec<TransitionViolation>>
            + Send
            + Sync
            + 'static,
    {
        self.checks.push(Box::new(check));
        self
    }

    /// Add a predicate that must hold, failing with `violation` otherwise
    pub fn require_pred<F>(self, predicate: F, violation: TransitionViolation) -> Self
    where
        F: Fn(&TransitionContext) -> bool + Send + Sync + 'static,
    {
        self.require(move |ctx: &TransitionContext| {
            if predicate(ctx) {
                Validation::success(())
            } else {
                Validation::fail(violation)
            }
        })
    }

    /// Run every rule, accumulating ALL violations.
    pub fn enforce(&self, context: &TransitionContext) -> Validation<(), NonEmptyVec<TransitionViolation>> {
        let checks: Vec<Validation<(), NonEmptyVec<TransitionViolation>>> =
            self.checks.iter().map(|check| check(context)).collect();

        Validation::all_vec(checks).map(|_| ())
    }

    /// All violations in rule order; empty when the transition is legal.
    pub fn violations(&self, context: &TransitionContext) -> Vec<TransitionViolation> {
        match self.enforce(context) {
            Validation::Success(_) => Vec::new(),
            Validation::Failure(errors) => errors.iter().copied().collect(),
        }
    }

    /// First failing rule, if any.
    pub fn check(&self, context: &TransitionContext) -> Result<(), TransitionViolation> {
        match self.violations(context).first() {
            Some(violation) => Err(*violation),
            None => Ok(()),
        }
    }

    pub fn len(&self) -> usize {
        self.checks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.checks.is_empty()
    }
}

impl Default for TransitionRules {
    fn default() -> Self {
        Self::standard()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ctx(source: Option<NodeKind>, target: Option<NodeKind>, has_trigger: bool) -> TransitionContext {
        TransitionContext {
            source,
            target,
            has_trigger,
        }
    }

    #[test]
    fn state_to_state_with_trigger_is_legal() {
        let rules = TransitionRules::standard();
        let context = ctx(Some(NodeKind::State), Some(NodeKind::State), true);

        assert!(rules.enforce(&context).is_success());
        assert_eq!(rules.check(&context), Ok(()));
    }

    #[test]
    fn target_initial_is_reported_first() {
        let rules = TransitionRules::standard();
        let context = ctx(Some(NodeKind::Final), Some(NodeKind::Initial), false);

        assert_eq!(rules.check(&context), Err(TransitionViolation::TargetIsInitial));
        assert_eq!(
            rules.violations(&context),
            vec![
                TransitionViolation::TargetIsInitial,
                TransitionViolation::EmptyTriggerNotAllowed,
                TransitionViolation::SourceIsFinal,
            ]
        );
    }

    #[test]
    fn choice_source_requires_empty_trigger() {
        let rules = TransitionRules::standard();

        let with_trigger = ctx(Some(NodeKind::Choice), Some(NodeKind::State), true);
        assert_eq!(
            rules.check(&with_trigger),
            Err(TransitionViolation::TriggerNotAllowedFromChoice)
        );

        let without = ctx(Some(NodeKind::Choice), Some(NodeKind::State), false);
        assert_eq!(rules.check(&without), Ok(()));
    }

    #[test]
    fn initial_source_may_go_without_trigger() {
        let rules = TransitionRules::standard();
        let context = ctx(Some(NodeKind::Initial), Some(NodeKind::State), false);

        assert_eq!(rules.check(&context), Ok(()));
    }

    #[test]
    fn note_target_needs_note_source() {
        let rules = TransitionRules::standard();

        let from_state = ctx(Some(NodeKind::State), Some(NodeKind::Note), true);
        assert_eq!(
            rules.check(&from_state),
            Err(TransitionViolation::NoteTargetRequiresNoteSource)
        );

        let from_note = ctx(Some(NodeKind::Note), Some(NodeKind::Note), true);
        assert_eq!(rules.check(&from_note), Ok(()));
    }

    #[test]
    fn final_source_is_rejected() {
        let rules = TransitionRules::standard();
        let context = ctx(Some(NodeKind::Final), Some(NodeKind::State), true);

        assert_eq!(rules.check(&context), Err(TransitionViolation::SourceIsFinal));
    }

    #[test]
    fn custom_rules_can_be_appended() {
        let rules = TransitionRules::new().require_pred(
            |ctx| ctx.source != ctx.target,
            TransitionViolation::SourceIsFinal,
        );
        let context = ctx(Some(NodeKind::State), Some(NodeKind::State), true);

        assert_eq!(rules.len(), 1);
        assert!(rules.enforce(&context).is_failure());
    }
}
