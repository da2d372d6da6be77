//! Lookups over a platform catalog, as seen from one document.

use super::error::PlatformError;
use super::picto::PictoMetrics;
use super::proto::{ArgumentType, ComponentProto, ListEntry, MemberProto, Platform};
use crate::core::{Action, ArgValue, Condition, EventRef, StateMachine, Variable};
use std::collections::BTreeMap;
use std::sync::OnceLock;
use tracing::debug;

/// Name of the built-in component every platform has.
pub const SYSTEM_COMPONENT: &str = "System";

/// Built-in platform-independent events.
pub fn system_component() -> &'static ComponentProto {
    static SYSTEM: OnceLock<ComponentProto> = OnceLock::new();
    SYSTEM.get_or_init(|| ComponentProto {
        name: Some("Common".to_string()),
        description: Some("Built-in platform-independent events and methods".to_string()),
        img: Some("system".to_string()),
        singletone: true,
        ..ComponentProto::default()
    }
    .with_signal(
        "onEnter",
        MemberProto::described("Run when entering this state")
            .with_alias("Enter")
            .with_img("onEnter"),
    )
    .with_signal(
        "onExit",
        MemberProto::described("Run when leaving this state")
            .with_alias("Exit")
            .with_img("onExit"),
    ))
}

/// How a document component is shown: its catalog type plus optional label
/// and color.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct VisualComponent {
    pub component: String,
    pub label: Option<String>,
    pub color: Option<String>,
}

/// Text shown for the first parameter of an action or event.
#[derive(Clone, Debug, PartialEq)]
pub enum ParameterDisplay {
    Text(String),
    /// Drawn as a nested variable pictogram.
    Variable(Variable),
    /// Drawn as a matrix; the raw value is passed through.
    Matrix(String),
}

impl ParameterDisplay {
    pub const MISSING: &'static str = "?!";

    fn missing() -> Self {
        Self::Text(Self::MISSING.to_string())
    }
}

const MAX_PARAMETER_CHARS: usize = 15;
const TRUNCATED_CHARS: usize = 12;

fn truncate(value: &str) -> String {
    if value.chars().count() > MAX_PARAMETER_CHARS {
        let head: String = value.chars().take(TRUNCATED_CHARS).collect();
        format!("{head}...")
    } else {
        value.to_string()
    }
}

/// Catalog lookups for one platform, plus the document's component-name to
/// type projection.
///
/// Names the projection does not know are taken to be type names.
#[derive(Clone, Debug)]
pub struct PlatformManager {
    name: String,
    data: Platform,
    name_to_visual: BTreeMap<String, VisualComponent>,
    picto: Option<PictoMetrics>,
}

impl PlatformManager {
    pub fn new(name: impl Into<String>, data: Platform) -> Self {
        Self {
            name: name.into(),
            data,
            name_to_visual: BTreeMap::new(),
            picto: None,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn platform(&self) -> &Platform {
        &self.data
    }

    pub fn set_picto(&mut self, metrics: PictoMetrics) {
        self.picto = Some(metrics);
    }

    /// Drawing metrics; an error until [`set_picto`](Self::set_picto) was called.
    pub fn picto(&self) -> Result<&PictoMetrics, PlatformError> {
        self.picto.as_ref().ok_or(PlatformError::PictoNotInitialized)
    }

    pub fn set_visual(&mut self, name: impl Into<String>, visual: VisualComponent) {
        self.name_to_visual.insert(name.into(), visual);
    }

    /// Rebuild the name projection from a machine's components.
    pub fn sync_components(&mut self, machine: &StateMachine) {
        self.name_to_visual = machine
            .components
            .iter()
            .map(|(id, component)| {
                (
                    id.clone(),
                    VisualComponent {
                        component: component.kind.clone(),
                        label: component.name.clone(),
                        color: None,
                    },
                )
            })
            .collect();
        debug!(
            platform = %self.name,
            components = self.name_to_visual.len(),
            "component projection rebuilt"
        );
    }

    pub fn resolve_component(&self, name: &str) -> VisualComponent {
        self.name_to_visual.get(name).cloned().unwrap_or_else(|| VisualComponent {
            component: name.to_string(),
            label: None,
            color: None,
        })
    }

    pub fn resolve_component_type<'a>(&'a self, name: &'a str) -> &'a str {
        self.name_to_visual
            .get(name)
            .map_or(name, |visual| visual.component.as_str())
    }

    /// Alias of a component variable, or the variable name itself.
    pub fn resolve_variable<'a>(&self, name: &'a str, component: &'a ComponentProto) -> &'a str {
        component
            .variables
            .get(name)
            .and_then(|v| v.alias.as_deref())
            .unwrap_or(name)
    }

    /// Catalog entry for a component, looked up by document name or, with
    /// `is_type`, directly by type.
    pub fn get_component(&self, name: &str, is_type: bool) -> Option<&ComponentProto> {
        if name == SYSTEM_COMPONENT {
            return Some(system_component());
        }
        let kind = if is_type {
            name
        } else {
            self.resolve_component_type(name)
        };
        self.data.components.get(kind)
    }

    fn entries<'a>(
        &'a self,
        name: &str,
        is_type: bool,
        members: impl Fn(&'a ComponentProto) -> &'a BTreeMap<String, MemberProto>,
    ) -> Vec<ListEntry> {
        self.get_component(name, is_type)
            .map(|component| {
                members(component)
                    .iter()
                    .map(|(name, member)| ListEntry::from_member(name, member))
                    .collect()
            })
            .unwrap_or_default()
    }

    pub fn available_events(&self, name: &str, is_type: bool) -> Vec<ListEntry> {
        self.entries(name, is_type, |c| &c.signals)
    }

    pub fn available_methods(&self, name: &str, is_type: bool) -> Vec<ListEntry> {
        self.entries(name, is_type, |c| &c.methods)
    }

    pub fn available_variables(&self, name: &str, is_type: bool) -> Vec<ListEntry> {
        self.entries(name, is_type, |c| &c.variables)
    }

    /// How the first parameter of an action is shown.
    ///
    /// `None` for `System` actions and for methods or actions without
    /// parameters. A required parameter with no value shows `?!`, an
    /// optional one shows nothing; option values show their alias and long
    /// literals are cut to twelve characters.
    pub fn describe_action(&self, action: &Action) -> Option<ParameterDisplay> {
        if action.component == SYSTEM_COMPONENT {
            return None;
        }
        let kind = self.resolve_component_type(&action.component);
        let parameter = self
            .data
            .components
            .get(kind)?
            .methods
            .get(&action.method)?
            .parameters
            .first()?;
        let args = action.args.as_ref()?;

        let display = match args.get(&parameter.name).map(|entry| &entry.value) {
            None if parameter.optional => ParameterDisplay::Text(String::new()),
            None => ParameterDisplay::missing(),
            Some(ArgValue::Literal(value)) => match (&parameter.kind, &parameter.value_alias) {
                (Some(ArgumentType::Options(options)), Some(aliases)) => options
                    .iter()
                    .position(|option| option == value)
                    .and_then(|idx| aliases.get(idx))
                    .map_or_else(ParameterDisplay::missing, |alias| ParameterDisplay::Text(alias.clone())),
                (Some(kind), _) if kind.is_matrix() => ParameterDisplay::Matrix(value.clone()),
                _ => ParameterDisplay::Text(truncate(value)),
            },
            Some(ArgValue::Variable(variable)) => ParameterDisplay::Variable(variable.clone()),
        };
        Some(display)
    }

    /// How the first parameter of an event trigger is shown.
    pub fn describe_event(&self, event: &EventRef) -> Option<ParameterDisplay> {
        if event.component == SYSTEM_COMPONENT {
            return None;
        }
        let kind = self.resolve_component_type(&event.component);
        let parameter = self
            .data
            .components
            .get(kind)?
            .signals
            .get(&event.method)?
            .parameters
            .first()?;
        let args = event.args.as_ref()?;

        let display = match args.get(&parameter.name).map(|entry| &entry.value) {
            None => ParameterDisplay::missing(),
            Some(ArgValue::Literal(value)) => match &parameter.kind {
                Some(kind) if kind.is_matrix() => ParameterDisplay::Matrix(value.clone()),
                _ => ParameterDisplay::Text(value.clone()),
            },
            Some(ArgValue::Variable(variable)) => ParameterDisplay::Variable(variable.clone()),
        };
        Some(display)
    }

    /// Width of a condition pictogram row.
    pub fn measure_condition(&self, condition: &Condition) -> Result<f64, PlatformError> {
        Ok(self.picto()?.condition_width(condition))
    }

    pub fn measure_full_condition(&self, condition: &Condition) -> Result<f64, PlatformError> {
        Ok(self.picto()?.full_condition_width(condition))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Operator, Point};
    use crate::platform::ArgumentProto;

    fn manager() -> PlatformManager {
        let led = ComponentProto::default()
            .with_method(
                "blink",
                MemberProto::described("Blink").with_parameter(
                    ArgumentProto::new("mode").with_options(&["fast", "slow"], &["Fast", "Slow"]),
                ),
            )
            .with_method("print", MemberProto::default().with_parameter(ArgumentProto::new("text")))
            .with_method(
                "dim",
                MemberProto::default().with_parameter(ArgumentProto::new("level").optional()),
            )
            .with_method("on", MemberProto::described("Turn on"))
            .with_signal(
                "changed",
                MemberProto::default().with_parameter(ArgumentProto::new("value")),
            )
            .with_variable("value", MemberProto::default().with_alias("brightness"));
        PlatformManager::new("ArduinoUno", Platform::default().with_component("LED", led))
    }

    fn literal(value: &str) -> ArgValue {
        ArgValue::Literal(value.to_string())
    }

    #[test]
    fn system_component_is_always_available() {
        let manager = manager();
        let events = manager.available_events(SYSTEM_COMPONENT, false);

        let names: Vec<_> = events.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["onEnter", "onExit"]);
        assert_eq!(events[0].alias.as_deref(), Some("Enter"));
    }

    #[test]
    fn names_resolve_through_document_components() {
        let mut manager = manager();
        let mut machine = StateMachine::default();
        std::sync::Arc::make_mut(&mut machine.components).insert(
            "status".into(),
            crate::core::Component {
                kind: "LED".into(),
                name: Some("Status".into()),
                position: Point::default(),
                parameters: BTreeMap::new(),
                order: 0,
                selection: false,
            },
        );
        manager.sync_components(&machine);

        assert_eq!(manager.resolve_component_type("status"), "LED");
        assert_eq!(manager.resolve_component_type("unknown"), "unknown");
        assert_eq!(manager.resolve_component("status").label.as_deref(), Some("Status"));
        assert_eq!(manager.available_methods("status", false).len(), 4);
        assert!(manager.available_methods("status", true).is_empty());
        assert_eq!(manager.available_variables("LED", true)[0].alias.as_deref(), Some("brightness"));

        let led = manager.get_component("LED", true).unwrap();
        assert_eq!(manager.resolve_variable("value", led), "brightness");
        assert_eq!(manager.resolve_variable("other", led), "other");
    }

    #[test]
    fn action_parameters_are_described() {
        let manager = manager();

        let alias = Action::new("LED", "blink").with_arg("mode", literal("slow"), 0);
        assert_eq!(manager.describe_action(&alias), Some(ParameterDisplay::Text("Slow".into())));

        let unknown_option = Action::new("LED", "blink").with_arg("mode", literal("medium"), 0);
        assert_eq!(
            manager.describe_action(&unknown_option),
            Some(ParameterDisplay::Text("?!".into()))
        );

        let long = Action::new("LED", "print").with_arg("text", literal("abcdefghijklmnopq"), 0);
        assert_eq!(
            manager.describe_action(&long),
            Some(ParameterDisplay::Text("abcdefghijkl...".into()))
        );

        let short = Action::new("LED", "print").with_arg("text", literal("fifteen chars!!"), 0);
        assert_eq!(
            manager.describe_action(&short),
            Some(ParameterDisplay::Text("fifteen chars!!".into()))
        );

        let missing = Action::new("LED", "print").with_arg("other", literal("x"), 0);
        assert_eq!(manager.describe_action(&missing), Some(ParameterDisplay::Text("?!".into())));

        let optional = Action::new("LED", "dim").with_arg("other", literal("x"), 0);
        assert_eq!(manager.describe_action(&optional), Some(ParameterDisplay::Text(String::new())));

        let variable = Action::new("LED", "print")
            .with_arg("text", ArgValue::Variable(Variable::new("LED", "value")), 0);
        assert_eq!(
            manager.describe_action(&variable),
            Some(ParameterDisplay::Variable(Variable::new("LED", "value")))
        );

        assert_eq!(manager.describe_action(&Action::new("LED", "on")), None);
        assert_eq!(manager.describe_action(&Action::new(SYSTEM_COMPONENT, "onEnter")), None);
    }

    #[test]
    fn event_parameters_are_described() {
        let manager = manager();
        let mut event = EventRef::new("LED", "changed");
        assert_eq!(manager.describe_event(&event), None);

        event.args = Some(BTreeMap::new());
        assert_eq!(manager.describe_event(&event), Some(ParameterDisplay::Text("?!".into())));
    }

    #[test]
    fn measuring_needs_picto() {
        let mut manager = manager();
        let condition = Condition::binary(
            Operator::Equals,
            Condition::literal("1"),
            Condition::literal("2"),
        );

        assert_eq!(
            manager.measure_condition(&condition),
            Err(PlatformError::PictoNotInitialized)
        );

        manager.set_picto(PictoMetrics::default());
        assert_eq!(manager.measure_condition(&condition), Ok(25.0 + 25.0 + 40.0 + 10.0));
        assert!(manager.measure_full_condition(&condition).is_ok());
    }
}
