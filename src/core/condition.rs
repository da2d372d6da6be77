//! Boolean condition trees guarding events and transitions.
//!
//! A condition is a closed tree: literal leaves, variable leaves that point
//! at a component's variable, and binary comparison nodes carrying exactly
//! two children. Every traversal below is an exhaustive match over the
//! three shapes.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Reference to a component variable, e.g. `{ component: "timer", method: "value" }`.
///
/// The component is a weak reference: it names a component id in the same
/// state machine and is resolved at use time.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Variable {
    pub component: String,
    pub method: String,
}

impl Variable {
    pub fn new(component: impl Into<String>, method: impl Into<String>) -> Self {
        Self {
            component: component.into(),
            method: method.into(),
        }
    }

    /// Rewrite the component reference if it equals `old`.
    pub fn rename_component(&mut self, old: &str, new: &str) -> bool {
        if self.component == old {
            self.component = new.to_string();
            true
        } else {
            false
        }
    }
}

/// Comparison operators allowed in a binary condition node.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Operator {
    Equals,
    NotEquals,
    Greater,
    Less,
    GreaterOrEqual,
    LessOrEqual,
}

impl Operator {
    pub const ALL: [Operator; 6] = [
        Operator::Equals,
        Operator::NotEquals,
        Operator::Greater,
        Operator::Less,
        Operator::GreaterOrEqual,
        Operator::LessOrEqual,
    ];

    /// Wire tag of the operator, as it appears in the `type` field.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Equals => "equals",
            Self::NotEquals => "notEquals",
            Self::Greater => "greater",
            Self::Less => "less",
            Self::GreaterOrEqual => "greaterOrEqual",
            Self::LessOrEqual => "lessOrEqual",
        }
    }

    pub fn from_tag(tag: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|op| op.as_str() == tag)
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A boolean expression tree.
///
/// On the wire a condition is `{ "type": ..., "value": ... }` where `type` is
/// `value`, `component` or one of the operator tags, and the value of an
/// operator node is a two-element array.
///
/// # Example
///
/// ```rust
/// use chartdoc::core::{Condition, Operator, Variable};
///
/// let mut cond = Condition::binary(
///     Operator::Greater,
///     Condition::variable(Variable::new("sensor", "level")),
///     Condition::literal("10"),
/// );
///
/// assert_eq!(cond.rename_component("sensor", "gauge"), 1);
/// assert!(cond.references_component("gauge"));
/// assert_eq!(cond.depth(), 2);
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(into = "RawCondition", from = "RawCondition")]
pub enum Condition {
    /// Literal leaf.
    Value(String),
    /// Variable leaf.
    Component(Variable),
    /// Comparison of two sub-conditions.
    Binary(Operator, Box<Condition>, Box<Condition>),
}

impl Condition {
    pub fn literal(value: impl Into<String>) -> Self {
        Self::Value(value.into())
    }

    pub fn variable(variable: Variable) -> Self {
        Self::Component(variable)
    }

    pub fn binary(op: Operator, left: Condition, right: Condition) -> Self {
        Self::Binary(op, Box::new(left), Box::new(right))
    }

    /// Rewrite every variable leaf naming `old` to name `new`.
    ///
    /// Literal leaves are left alone even when their text equals `old`.
    /// Returns the number of rewritten leaves.
    pub fn rename_component(&mut self, old: &str, new: &str) -> usize {
        match self {
            Self::Value(_) => 0,
            Self::Component(variable) => usize::from(variable.rename_component(old, new)),
            Self::Binary(_, left, right) => {
                left.rename_component(old, new) + right.rename_component(old, new)
            }
        }
    }

    /// Visit every variable leaf, left to right.
    pub fn for_each_variable<'a>(&'a self, f: &mut impl FnMut(&'a Variable)) {
        match self {
            Self::Value(_) => {}
            Self::Component(variable) => f(variable),
            Self::Binary(_, left, right) => {
                left.for_each_variable(f);
                right.for_each_variable(f);
            }
        }
    }

    pub fn variables(&self) -> Vec<&Variable> {
        let mut out = Vec::new();
        self.for_each_variable(&mut |v| out.push(v));
        out
    }

    pub fn references_component(&self, component: &str) -> bool {
        self.variables().iter().any(|v| v.component == component)
    }

    /// Height of the tree; a leaf has depth 1.
    pub fn depth(&self) -> usize {
        match self {
            Self::Value(_) | Self::Component(_) => 1,
            Self::Binary(_, left, right) => 1 + left.depth().max(right.depth()),
        }
    }
}

#[derive(Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "camelCase")]
enum RawCondition {
    Value(String),
    Component(Variable),
    Equals(Box<Condition>, Box<Condition>),
    NotEquals(Box<Condition>, Box<Condition>),
    Greater(Box<Condition>, Box<Condition>),
    Less(Box<Condition>, Box<Condition>),
    GreaterOrEqual(Box<Condition>, Box<Condition>),
    LessOrEqual(Box<Condition>, Box<Condition>),
}

impl From<Condition> for RawCondition {
    fn from(cond: Condition) -> Self {
        match cond {
            Condition::Value(v) => Self::Value(v),
            Condition::Component(v) => Self::Component(v),
            Condition::Binary(op, l, r) => match op {
                Operator::Equals => Self::Equals(l, r),
                Operator::NotEquals => Self::NotEquals(l, r),
                Operator::Greater => Self::Greater(l, r),
                Operator::Less => Self::Less(l, r),
                Operator::GreaterOrEqual => Self::GreaterOrEqual(l, r),
                Operator::LessOrEqual => Self::LessOrEqual(l, r),
            },
        }
    }
}

impl From<RawCondition> for Condition {
    fn from(raw: RawCondition) -> Self {
        match raw {
            RawCondition::Value(v) => Self::Value(v),
            RawCondition::Component(v) => Self::Component(v),
            RawCondition::Equals(l, r) => Self::Binary(Operator::Equals, l, r),
            RawCondition::NotEquals(l, r) => Self::Binary(Operator::NotEquals, l, r),
            RawCondition::Greater(l, r) => Self::Binary(Operator::Greater, l, r),
            RawCondition::Less(l, r) => Self::Binary(Operator::Less, l, r),
            RawCondition::GreaterOrEqual(l, r) => Self::Binary(Operator::GreaterOrEqual, l, r),
            RawCondition::LessOrEqual(l, r) => Self::Binary(Operator::LessOrEqual, l, r),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn var(component: &str, method: &str) -> Condition {
        Condition::variable(Variable::new(component, method))
    }

    #[test]
    fn rename_descends_into_both_children() {
        let mut cond = Condition::binary(
            Operator::Equals,
            Condition::binary(Operator::Less, var("a", "x"), var("b", "y")),
            var("a", "z"),
        );

        assert_eq!(cond.rename_component("a", "c"), 2);
        let components: Vec<_> = cond
            .variables()
            .into_iter()
            .map(|v| v.component.as_str())
            .collect();
        assert_eq!(components, vec!["c", "b", "c"]);
    }

    #[test]
    fn rename_leaves_literals_untouched() {
        let mut cond = Condition::binary(Operator::NotEquals, Condition::literal("a"), var("b", "y"));

        assert_eq!(cond.rename_component("a", "c"), 0);
        assert_eq!(
            cond,
            Condition::binary(Operator::NotEquals, Condition::literal("a"), var("b", "y"))
        );
    }

    #[test]
    fn operator_tags_round_trip() {
        for op in Operator::ALL {
            assert_eq!(Operator::from_tag(op.as_str()), Some(op));
        }
        assert_eq!(Operator::from_tag("and"), None);
    }

    #[test]
    fn condition_uses_type_value_wire_shape() {
        let cond = Condition::binary(Operator::GreaterOrEqual, var("t", "v"), Condition::literal("5"));
        let json = serde_json::to_value(&cond).unwrap();

        assert_eq!(
            json,
            serde_json::json!({
                "type": "greaterOrEqual",
                "value": [
                    { "type": "component", "value": { "component": "t", "method": "v" } },
                    { "type": "value", "value": "5" }
                ]
            })
        );

        let back: Condition = serde_json::from_value(json).unwrap();
        assert_eq!(back, cond);
    }

    #[test]
    fn depth_counts_levels() {
        assert_eq!(Condition::literal("1").depth(), 1);
        let nested = Condition::binary(
            Operator::Equals,
            Condition::binary(Operator::Equals, var("a", "b"), Condition::literal("1")),
            Condition::literal("2"),
        );
        assert_eq!(nested.depth(), 3);
    }
}
