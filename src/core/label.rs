//! Triggers, actions and events: the parameterized references that hang off
//! states and transitions.

use super::condition::{Condition, Variable};
use super::geometry::Point;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

pub(crate) fn is_false(value: &bool) -> bool {
    !*value
}

/// Argument value: a literal or a reference to a component variable.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ArgValue {
    Literal(String),
    Variable(Variable),
}

impl ArgValue {
    pub fn as_variable(&self) -> Option<&Variable> {
        match self {
            Self::Variable(v) => Some(v),
            Self::Literal(_) => None,
        }
    }
}

/// One named argument. `order` fixes its position in the call.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ArgEntry {
    pub value: ArgValue,
    pub order: u32,
}

pub type Args = BTreeMap<String, ArgEntry>;

fn rename_in_args(args: &mut Option<Args>, old: &str, new: &str) -> usize {
    let Some(args) = args else {
        return 0;
    };
    let mut renamed = 0;
    for entry in args.values_mut() {
        if let ArgValue::Variable(variable) = &mut entry.value {
            if variable.rename_component(old, new) {
                renamed += 1;
            }
        }
    }
    renamed
}

fn ordered(args: &Option<Args>) -> Vec<(&str, &ArgEntry)> {
    let mut out: Vec<_> = args
        .iter()
        .flat_map(|args| args.iter())
        .map(|(name, entry)| (name.as_str(), entry))
        .collect();
    out.sort_by_key(|(name, entry)| (entry.order, *name));
    out
}

/// Method invocation on a component.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Action {
    pub component: String,
    pub method: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub args: Option<Args>,
    #[serde(default, skip_serializing_if = "is_false")]
    pub selection: bool,
}

impl Action {
    pub fn new(component: impl Into<String>, method: impl Into<String>) -> Self {
        Self {
            component: component.into(),
            method: method.into(),
            args: None,
            selection: false,
        }
    }

    pub fn with_arg(mut self, name: impl Into<String>, value: ArgValue, order: u32) -> Self {
        self.args
            .get_or_insert_with(Args::new)
            .insert(name.into(), ArgEntry { value, order });
        self
    }

    /// Arguments in call order.
    pub fn ordered_args(&self) -> Vec<(&str, &ArgEntry)> {
        ordered(&self.args)
    }

    /// Rewrite the action's own component and every variable argument
    /// naming `old`. Returns the number of rewritten references.
    pub fn rename_component(&mut self, old: &str, new: &str) -> usize {
        let own = if self.component == old {
            self.component = new.to_string();
            1
        } else {
            0
        };
        own + rename_in_args(&mut self.args, old, new)
    }
}

/// Component signal used as a trigger.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct EventRef {
    pub component: String,
    pub method: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub args: Option<Args>,
}

impl EventRef {
    pub fn new(component: impl Into<String>, method: impl Into<String>) -> Self {
        Self {
            component: component.into(),
            method: method.into(),
            args: None,
        }
    }

    pub fn ordered_args(&self) -> Vec<(&str, &ArgEntry)> {
        ordered(&self.args)
    }
}

/// What fires an event or a transition.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Trigger {
    Literal(String),
    Event(EventRef),
}

impl Trigger {
    pub fn event(component: impl Into<String>, method: impl Into<String>) -> Self {
        Self::Event(EventRef::new(component, method))
    }

    /// A literal is empty when blank; a reference is empty when it names no component.
    pub fn is_empty(&self) -> bool {
        match self {
            Self::Literal(text) => text.is_empty(),
            Self::Event(event) => event.component.is_empty(),
        }
    }

    pub fn rename_component(&mut self, old: &str, new: &str) -> usize {
        match self {
            Self::Literal(_) => 0,
            Self::Event(event) => {
                let own = if event.component == old {
                    event.component = new.to_string();
                    1
                } else {
                    0
                };
                own + rename_in_args(&mut event.args, old, new)
            }
        }
    }
}

fn rename_in_label_parts(
    trigger: Option<&mut Trigger>,
    actions: &mut [Action],
    condition: Option<&mut Condition>,
    old: &str,
    new: &str,
) -> usize {
    let trigger = trigger.map_or(0, |t| t.rename_component(old, new));
    let actions: usize = actions.iter_mut().map(|a| a.rename_component(old, new)).sum();
    let condition = condition.map_or(0, |c| c.rename_component(old, new));
    trigger + actions + condition
}

/// Reaction of a state to a trigger.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Event {
    pub trigger: Trigger,
    #[serde(rename = "do", default)]
    pub actions: Vec<Action>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub condition: Option<Condition>,
    #[serde(default, skip_serializing_if = "is_false")]
    pub selection: bool,
}

impl Event {
    pub fn new(trigger: Trigger) -> Self {
        Self {
            trigger,
            actions: Vec::new(),
            condition: None,
            selection: false,
        }
    }

    pub fn with_action(mut self, action: Action) -> Self {
        self.actions.push(action);
        self
    }

    pub fn with_condition(mut self, condition: Condition) -> Self {
        self.condition = Some(condition);
        self
    }

    pub fn rename_component(&mut self, old: &str, new: &str) -> usize {
        rename_in_label_parts(
            Some(&mut self.trigger),
            &mut self.actions,
            self.condition.as_mut(),
            old,
            new,
        )
    }
}

/// Text block drawn next to a transition arrow.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct TransitionLabel {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trigger: Option<Trigger>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub condition: Option<Condition>,
    #[serde(rename = "do", default, skip_serializing_if = "Vec::is_empty")]
    pub actions: Vec<Action>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<Point>,
}

impl TransitionLabel {
    pub fn with_trigger(trigger: Trigger) -> Self {
        Self {
            trigger: Some(trigger),
            ..Self::default()
        }
    }

    pub fn has_trigger(&self) -> bool {
        self.trigger.as_ref().is_some_and(|t| !t.is_empty())
    }

    pub fn rename_component(&mut self, old: &str, new: &str) -> usize {
        rename_in_label_parts(
            self.trigger.as_mut(),
            &mut self.actions,
            self.condition.as_mut(),
            old,
            new,
        )
    }
}

/// New label content for an existing transition.
///
/// Each field is either given or left out. Left-out fields keep the previous
/// label's value, and so does the position, which an update never carries.
/// `condition: Some(None)` removes a guard.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct LabelUpdate {
    pub trigger: Option<Trigger>,
    pub condition: Option<Option<Condition>>,
    pub actions: Option<Vec<Action>>,
}

impl LabelUpdate {
    pub fn with_trigger(trigger: Trigger) -> Self {
        Self {
            trigger: Some(trigger),
            ..Self::default()
        }
    }

    pub fn with_condition(mut self, condition: Condition) -> Self {
        self.condition = Some(Some(condition));
        self
    }

    pub fn without_condition(mut self) -> Self {
        self.condition = Some(None);
        self
    }

    pub fn with_actions(mut self, actions: Vec<Action>) -> Self {
        self.actions = Some(actions);
        self
    }

    /// Merge over a previous label field by field.
    pub fn apply_to(self, previous: Option<&TransitionLabel>) -> TransitionLabel {
        let previous = previous.cloned().unwrap_or_default();
        TransitionLabel {
            trigger: self.trigger.or(previous.trigger),
            condition: self.condition.unwrap_or(previous.condition),
            actions: self.actions.unwrap_or(previous.actions),
            position: previous.position,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Operator;

    #[test]
    fn trigger_emptiness() {
        assert!(Trigger::Literal(String::new()).is_empty());
        assert!(!Trigger::Literal("tick".into()).is_empty());
        assert!(Trigger::event("", "").is_empty());
        assert!(!Trigger::event("button", "pressed").is_empty());
    }

    #[test]
    fn action_rename_covers_component_and_variable_args() {
        let mut action = Action::new("led", "blink")
            .with_arg("count", ArgValue::Variable(Variable::new("led", "level")), 0)
            .with_arg("label", ArgValue::Literal("led".into()), 1)
            .with_arg("other", ArgValue::Variable(Variable::new("timer", "v")), 2);

        assert_eq!(action.rename_component("led", "lamp"), 2);
        assert_eq!(action.component, "lamp");

        let args = action.args.as_ref().unwrap();
        assert_eq!(args["count"].value, ArgValue::Variable(Variable::new("lamp", "level")));
        assert_eq!(args["label"].value, ArgValue::Literal("led".into()));
        assert_eq!(args["other"].value, ArgValue::Variable(Variable::new("timer", "v")));
    }

    #[test]
    fn ordered_args_follow_order_not_name() {
        let action = Action::new("m", "f")
            .with_arg("a", ArgValue::Literal("1".into()), 2)
            .with_arg("b", ArgValue::Literal("2".into()), 0)
            .with_arg("c", ArgValue::Literal("3".into()), 1);

        let names: Vec<_> = action.ordered_args().into_iter().map(|(n, _)| n).collect();
        assert_eq!(names, vec!["b", "c", "a"]);
    }

    #[test]
    fn event_rename_touches_trigger_actions_and_condition() {
        let mut event = Event::new(Trigger::event("btn", "click"))
            .with_action(Action::new("btn", "reset"))
            .with_condition(Condition::binary(
                Operator::Equals,
                Condition::variable(Variable::new("btn", "state")),
                Condition::literal("btn"),
            ));

        assert_eq!(event.rename_component("btn", "key"), 3);
        assert_eq!(event.trigger, Trigger::event("key", "click"));
        assert_eq!(event.actions[0].component, "key");
        assert!(event.condition.as_ref().unwrap().references_component("key"));
    }

    #[test]
    fn literal_trigger_is_not_renamed() {
        let mut trigger = Trigger::Literal("btn".into());
        assert_eq!(trigger.rename_component("btn", "key"), 0);
        assert_eq!(trigger, Trigger::Literal("btn".into()));
    }

    #[test]
    fn label_update_keeps_previous_position() {
        let previous = TransitionLabel {
            position: Some(Point::new(5.0, 6.0)),
            ..TransitionLabel::with_trigger(Trigger::event("a", "b"))
        };

        let merged = LabelUpdate::with_trigger(Trigger::event("c", "d")).apply_to(Some(&previous));
        assert_eq!(merged.position, Some(Point::new(5.0, 6.0)));
        assert_eq!(merged.trigger, Some(Trigger::event("c", "d")));
    }

    #[test]
    fn label_update_keeps_omitted_fields() {
        let guard = Condition::binary(
            Operator::Greater,
            Condition::variable(Variable::new("c", "v")),
            Condition::literal("1"),
        );
        let previous = TransitionLabel {
            condition: Some(guard.clone()),
            actions: vec![Action::new("led", "on")],
            ..TransitionLabel::with_trigger(Trigger::event("C", "go"))
        };

        let merged = LabelUpdate::with_trigger(Trigger::event("C", "stop")).apply_to(Some(&previous));
        assert_eq!(merged.trigger, Some(Trigger::event("C", "stop")));
        assert_eq!(merged.condition, Some(guard));
        assert_eq!(merged.actions, vec![Action::new("led", "on")]);

        let cleared = LabelUpdate::default()
            .without_condition()
            .with_actions(Vec::new())
            .apply_to(Some(&previous));
        assert_eq!(cleared.trigger, Some(Trigger::event("C", "go")));
        assert!(cleared.condition.is_none());
        assert!(cleared.actions.is_empty());
    }

    #[test]
    fn event_wire_shape_uses_do_key() {
        let event = Event::new(Trigger::event("timer", "tick")).with_action(Action::new("led", "on"));
        let json = serde_json::to_value(&event).unwrap();

        assert_eq!(
            json,
            serde_json::json!({
                "trigger": { "component": "timer", "method": "tick" },
                "do": [ { "component": "led", "method": "on" } ]
            })
        );
    }
}
