//! Transition operations and the legality gate on edits.

use super::{ChangeTransitionError, EditorModel};
use crate::core::{InitialState, LabelUpdate, Point, Transition, TransitionLabel};
use crate::enforcement::TransitionContext;
use tracing::{debug, warn};

/// Arguments of [`EditorModel::create_transition`].
#[derive(Clone, Debug, PartialEq)]
pub struct CreateTransitionParams {
    pub sm_id: String,
    pub id: Option<String>,
    pub source_id: String,
    pub target_id: String,
    pub label: Option<TransitionLabel>,
    pub color: Option<String>,
}

impl CreateTransitionParams {
    pub fn new(
        sm_id: impl Into<String>,
        source_id: impl Into<String>,
        target_id: impl Into<String>,
        label: Option<TransitionLabel>,
    ) -> Self {
        Self {
            sm_id: sm_id.into(),
            id: None,
            source_id: source_id.into(),
            target_id: target_id.into(),
            label,
            color: None,
        }
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = Some(color.into());
        self
    }
}

/// Arguments of [`EditorModel::change_transition`].
///
/// `label: None` removes the label. `Some` is merged over the previous one:
/// trigger, condition and actions the update leaves out are kept, and so is
/// the label position.
#[derive(Clone, Debug, PartialEq)]
pub struct ChangeTransitionParams {
    pub sm_id: String,
    pub id: String,
    pub source_id: String,
    pub target_id: String,
    pub label: Option<LabelUpdate>,
    pub color: Option<String>,
}

impl ChangeTransitionParams {
    pub fn new(
        sm_id: impl Into<String>,
        id: impl Into<String>,
        source_id: impl Into<String>,
        target_id: impl Into<String>,
    ) -> Self {
        Self {
            sm_id: sm_id.into(),
            id: id.into(),
            source_id: source_id.into(),
            target_id: target_id.into(),
            label: None,
            color: None,
        }
    }

    pub fn with_label(mut self, label: LabelUpdate) -> Self {
        self.label = Some(label);
        self
    }

    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = Some(color.into());
        self
    }
}

impl EditorModel {
    /// Create a transition between two existing graph nodes.
    ///
    /// Creation does not run the legality rules; only
    /// [`change_transition`](Self::change_transition) does.
    pub fn create_transition(&mut self, params: CreateTransitionParams) -> Option<String> {
        let sm = self.data.machine(&params.sm_id)?;
        if sm.node_kind(&params.source_id).is_none() || sm.node_kind(&params.target_id).is_none() {
            debug!(
                sm_id = %params.sm_id,
                source = %params.source_id,
                target = %params.target_id,
                "transition endpoints not found"
            );
            return None;
        }
        let id = self.transition_id(&params.sm_id, params.id)?;
        let transition = Transition {
            source_id: params.source_id,
            target_id: params.target_id,
            label: params.label,
            color: params.color,
            selection: false,
        };
        self.insert(&params.sm_id, &id, transition).then_some(id)
    }

    /// Apply a transition edit if it passes every legality rule.
    pub fn change_transition(&mut self, params: ChangeTransitionParams) -> bool {
        self.try_change_transition(params).is_ok()
    }

    /// Like [`change_transition`](Self::change_transition), reporting why an
    /// edit was refused. On error nothing is mutated or published.
    pub fn try_change_transition(&mut self, params: ChangeTransitionParams) -> Result<(), ChangeTransitionError> {
        let ChangeTransitionParams {
            sm_id,
            id,
            source_id,
            target_id,
            label,
            color,
        } = params;

        let sm = self
            .data
            .machine(&sm_id)
            .ok_or_else(|| ChangeTransitionError::MachineNotFound(sm_id.clone()))?;
        if !sm.transitions.contains_key(&id) {
            return Err(ChangeTransitionError::TransitionNotFound(id));
        }
        for endpoint in [&source_id, &target_id] {
            if sm.node_kind(endpoint).is_none() {
                return Err(ChangeTransitionError::NodeNotFound(endpoint.clone()));
            }
        }

        let label = label.map(|update| update.apply_to(sm.transitions[&id].label.as_ref()));
        let has_trigger = label.as_ref().is_some_and(TransitionLabel::has_trigger);
        let context = TransitionContext::resolve(sm, &source_id, &target_id, has_trigger);
        if let Err(violation) = self.rules.check(&context) {
            warn!(
                sm_id = %sm_id,
                transition = %id,
                reason = violation.code(),
                "transition change rejected"
            );
            return Err(violation.into());
        }

        self.update(&sm_id, &id, |transition: &mut Transition| {
            transition.source_id = source_id;
            transition.target_id = target_id;
            transition.label = label;
            transition.color = color;
        });
        Ok(())
    }

    /// Transitions leaving an initial state cannot be selected.
    pub fn change_transition_selection(&mut self, sm_id: &str, id: &str, selection: bool) -> bool {
        let from_initial = match self.entity::<Transition>(sm_id, id) {
            Some(transition) => self.contains::<InitialState>(sm_id, &transition.source_id),
            None => return false,
        };
        if from_initial {
            return false;
        }
        self.select(sm_id, id, |_: &Transition| true, |t| t.selection = selection)
    }

    /// Move the label of a transition. Fails when it has no label.
    pub fn change_transition_position(&mut self, sm_id: &str, id: &str, position: Point) -> bool {
        self.update_if(
            sm_id,
            id,
            |t: &Transition| t.label.is_some(),
            |t| {
                if let Some(label) = t.label.as_mut() {
                    label.position = Some(position);
                }
            },
        )
    }

    pub fn delete_transition(&mut self, sm_id: &str, id: &str) -> bool {
        self.remove::<Transition>(sm_id, id)
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::{model, record, SM};
    use super::*;
    use crate::core::{Action, Condition, Dimensions, Operator, Trigger, Variable};
    use crate::editor::{CreateNoteParams, CreatePseudostateParams, CreateStateParams};
    use crate::enforcement::TransitionViolation;
    use crate::store::DataPath;
    use std::sync::Arc;

    fn state(model: &mut EditorModel, id: &str) -> String {
        model
            .create_state(
                CreateStateParams::new(SM, id.to_uppercase(), Point::default(), Dimensions::square(10.0))
                    .with_id(id),
            )
            .unwrap()
    }

    fn triggered() -> TransitionLabel {
        TransitionLabel::with_trigger(Trigger::event("C", "go"))
    }

    #[test]
    fn self_loop_with_trigger_is_created() {
        let mut model = model();
        let s1 = state(&mut model, "s1");

        let id = model
            .create_transition(CreateTransitionParams::new(SM, &s1, &s1, Some(triggered())))
            .unwrap();

        let t = &model.document().transitions(SM).unwrap()[&id];
        assert_eq!(t.source_id, "s1");
        assert_eq!(t.target_id, "s1");
        assert!(t.label.as_ref().is_some_and(TransitionLabel::has_trigger));
    }

    #[test]
    fn create_requires_existing_endpoints() {
        let mut model = model();
        let s1 = state(&mut model, "s1");

        assert_eq!(
            model.create_transition(CreateTransitionParams::new(SM, &s1, "ghost", None)),
            None
        );
        assert_eq!(
            model.create_transition(CreateTransitionParams::new("nope", &s1, &s1, None)),
            None
        );
        assert!(model.document().transitions(SM).unwrap().is_empty());
    }

    #[test]
    fn change_into_initial_is_rejected_and_keeps_identity() {
        let mut model = model();
        let s1 = state(&mut model, "s1");
        let initial = model
            .create_initial_state(CreatePseudostateParams::new(SM, Point::default()))
            .unwrap();
        let t = model
            .create_transition(CreateTransitionParams::new(SM, &s1, &s1, Some(triggered())))
            .unwrap();
        let before = Arc::clone(model.document().transitions(SM).unwrap());
        let log = record(&mut model, &[DataPath::Transitions, DataPath::IsStale]);

        let result = model.try_change_transition(
            ChangeTransitionParams::new(SM, &t, &s1, &initial)
                .with_label(LabelUpdate::with_trigger(Trigger::event("C", "go"))),
        );

        assert_eq!(result, Err(ChangeTransitionError::Rejected(TransitionViolation::TargetIsInitial)));
        assert!(Arc::ptr_eq(&before, model.document().transitions(SM).unwrap()));
        assert!(log.borrow().is_empty());
    }

    #[test]
    fn choice_source_accepts_only_empty_trigger() {
        let mut model = model();
        let s1 = state(&mut model, "s1");
        let choice = model
            .create_choice_state(CreatePseudostateParams::new(SM, Point::default()))
            .unwrap();

        let t = model
            .create_transition(CreateTransitionParams::new(SM, &choice, &s1, None))
            .unwrap();
        assert!(model.document().transitions(SM).unwrap().contains_key(&t));

        let with_trigger = ChangeTransitionParams::new(SM, &t, &choice, &s1)
            .with_label(LabelUpdate::with_trigger(Trigger::event("C", "go")));
        assert_eq!(
            model.try_change_transition(with_trigger).unwrap_err().violation(),
            Some(TransitionViolation::TriggerNotAllowedFromChoice)
        );

        let guarded = ChangeTransitionParams::new(SM, &t, &choice, &s1).with_label(
            LabelUpdate::default().with_condition(Condition::binary(
                Operator::Greater,
                Condition::variable(Variable::new("sensor", "value")),
                Condition::literal("10"),
            )),
        );
        assert!(model.change_transition(guarded));
    }

    #[test]
    fn empty_trigger_from_state_is_rejected() {
        let mut model = model();
        let a = state(&mut model, "a");
        let b = state(&mut model, "b");
        let t = model
            .create_transition(CreateTransitionParams::new(SM, &a, &b, Some(triggered())))
            .unwrap();

        let err = model
            .try_change_transition(
                ChangeTransitionParams::new(SM, &t, &a, &b)
                    .with_label(LabelUpdate::with_trigger(Trigger::event("", ""))),
            )
            .unwrap_err();
        assert_eq!(err.violation(), Some(TransitionViolation::EmptyTriggerNotAllowed));
    }

    #[test]
    fn note_target_requires_note_source() {
        let mut model = model();
        let a = state(&mut model, "a");
        let note = model
            .create_note(CreateNoteParams::new(SM, "hello", Point::default()))
            .unwrap();
        let other_note = model
            .create_note(CreateNoteParams::new(SM, "world", Point::default()))
            .unwrap();
        let t = model
            .create_transition(CreateTransitionParams::new(SM, &a, &a, Some(triggered())))
            .unwrap();

        let to_note = ChangeTransitionParams::new(SM, &t, &a, &note)
            .with_label(LabelUpdate::with_trigger(Trigger::event("C", "go")));
        assert_eq!(
            model.try_change_transition(to_note).unwrap_err().violation(),
            Some(TransitionViolation::NoteTargetRequiresNoteSource)
        );

        let between_notes = ChangeTransitionParams::new(SM, &t, &other_note, &note)
            .with_label(LabelUpdate::with_trigger(Trigger::Literal("link".into())));
        assert!(model.change_transition(between_notes));
    }

    #[test]
    fn final_source_is_rejected() {
        let mut model = model();
        let a = state(&mut model, "a");
        let fin = model
            .create_final_state(CreatePseudostateParams::new(SM, Point::default()))
            .unwrap();
        let t = model
            .create_transition(CreateTransitionParams::new(SM, &a, &fin, Some(triggered())))
            .unwrap();

        let err = model
            .try_change_transition(
                ChangeTransitionParams::new(SM, &t, &fin, &a)
                    .with_label(LabelUpdate::with_trigger(Trigger::event("C", "go"))),
            )
            .unwrap_err();
        assert_eq!(err.violation(), Some(TransitionViolation::SourceIsFinal));
    }

    #[test]
    fn change_merges_label_and_keeps_position() {
        let mut model = model();
        let a = state(&mut model, "a");
        let b = state(&mut model, "b");
        let t = model
            .create_transition(CreateTransitionParams::new(SM, &a, &b, Some(triggered())))
            .unwrap();
        assert!(model.change_transition_position(SM, &t, Point::new(7.0, 8.0)));

        assert!(model.change_transition(
            ChangeTransitionParams::new(SM, &t, &b, &a)
                .with_label(LabelUpdate::with_trigger(Trigger::event("D", "stop")))
                .with_color("#00ff00"),
        ));

        let transition = &model.document().transitions(SM).unwrap()[&t];
        let label = transition.label.as_ref().unwrap();
        assert_eq!(transition.source_id, "b");
        assert_eq!(transition.target_id, "a");
        assert_eq!(label.trigger, Some(Trigger::event("D", "stop")));
        assert_eq!(label.position, Some(Point::new(7.0, 8.0)));
        assert_eq!(transition.color.as_deref(), Some("#00ff00"));
    }

    #[test]
    fn trigger_only_change_keeps_guard_and_actions() {
        let mut model = model();
        let a = state(&mut model, "a");
        let b = state(&mut model, "b");
        let guard = Condition::binary(
            Operator::Greater,
            Condition::variable(Variable::new("c", "v")),
            Condition::literal("1"),
        );
        let label = TransitionLabel {
            condition: Some(guard.clone()),
            actions: vec![Action::new("led", "on")],
            ..triggered()
        };
        let t = model
            .create_transition(CreateTransitionParams::new(SM, &a, &b, Some(label)))
            .unwrap();

        assert!(model.change_transition(
            ChangeTransitionParams::new(SM, &t, &a, &b)
                .with_label(LabelUpdate::with_trigger(Trigger::event("C", "stop"))),
        ));

        let label = model.document().transitions(SM).unwrap()[&t].label.clone().unwrap();
        assert_eq!(label.trigger, Some(Trigger::event("C", "stop")));
        assert_eq!(label.condition, Some(guard));
        assert_eq!(label.actions, vec![Action::new("led", "on")]);
    }

    #[test]
    fn omitted_trigger_is_kept_for_the_rules() {
        let mut model = model();
        let a = state(&mut model, "a");
        let b = state(&mut model, "b");
        let t = model
            .create_transition(CreateTransitionParams::new(SM, &a, &b, Some(triggered())))
            .unwrap();

        let actions_only = ChangeTransitionParams::new(SM, &t, &a, &b)
            .with_label(LabelUpdate::default().with_actions(vec![Action::new("led", "off")]));
        assert!(model.change_transition(actions_only));

        let label = model.document().transitions(SM).unwrap()[&t].label.clone().unwrap();
        assert!(label.has_trigger());
        assert_eq!(label.actions.len(), 1);
    }

    #[test]
    fn change_reports_missing_pieces() {
        let mut model = model();
        let a = state(&mut model, "a");

        assert_eq!(
            model.try_change_transition(ChangeTransitionParams::new("nope", "t", &a, &a)),
            Err(ChangeTransitionError::MachineNotFound("nope".into()))
        );
        assert_eq!(
            model.try_change_transition(ChangeTransitionParams::new(SM, "t", &a, &a)),
            Err(ChangeTransitionError::TransitionNotFound("t".into()))
        );

        let t = model
            .create_transition(CreateTransitionParams::new(SM, &a, &a, Some(triggered())))
            .unwrap();
        assert_eq!(
            model.try_change_transition(ChangeTransitionParams::new(SM, &t, &a, "ghost")),
            Err(ChangeTransitionError::NodeNotFound("ghost".into()))
        );
    }

    #[test]
    fn selection_skips_transitions_from_initial() {
        let mut model = model();
        let a = state(&mut model, "a");
        let initial = model
            .create_initial_state(CreatePseudostateParams::new(SM, Point::default()))
            .unwrap();
        let from_initial = model
            .create_transition(CreateTransitionParams::new(SM, &initial, &a, None))
            .unwrap();
        let normal = model
            .create_transition(CreateTransitionParams::new(SM, &a, &a, Some(triggered())))
            .unwrap();

        assert!(!model.change_transition_selection(SM, &from_initial, true));
        assert!(model.change_transition_selection(SM, &normal, true));
        assert!(!model.change_transition_selection(SM, "ghost", true));
    }

    #[test]
    fn position_needs_a_label() {
        let mut model = model();
        let a = state(&mut model, "a");
        let t = model
            .create_transition(CreateTransitionParams::new(SM, &a, &a, None))
            .unwrap();

        assert!(!model.change_transition_position(SM, &t, Point::new(1.0, 1.0)));
        assert!(model.delete_transition(SM, &t));
        assert!(!model.delete_transition(SM, &t));
    }
}
