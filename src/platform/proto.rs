//! Read-only catalog data describing what a target platform offers.

use super::error::PlatformError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Declared type of a parameter: a named type or a closed list of options.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ArgumentType {
    Named(String),
    Options(Vec<String>),
}

impl ArgumentType {
    /// Matrix types (`uint8_t[8][8]` and friends) are drawn, not printed.
    pub fn is_matrix(&self) -> bool {
        match self {
            Self::Named(name) => name.matches('[').count() == 2,
            Self::Options(_) => false,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArgumentProto {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<ArgumentType>,
    #[serde(default)]
    pub optional: bool,
    /// Display names for `Options` values, index for index.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value_alias: Option<Vec<String>>,
}

impl ArgumentProto {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: None,
            kind: None,
            optional: false,
            value_alias: None,
        }
    }

    pub fn optional(mut self) -> Self {
        self.optional = true;
        self
    }

    pub fn with_options(mut self, options: &[&str], aliases: &[&str]) -> Self {
        self.kind = Some(ArgumentType::Options(options.iter().map(|s| s.to_string()).collect()));
        self.value_alias = Some(aliases.iter().map(|s| s.to_string()).collect());
        self
    }
}

/// A signal, method or variable of a component.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MemberProto {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub img: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alias: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub parameters: Vec<ArgumentProto>,
}

impl MemberProto {
    pub fn described(description: impl Into<String>) -> Self {
        Self {
            description: Some(description.into()),
            ..Self::default()
        }
    }

    pub fn with_alias(mut self, alias: impl Into<String>) -> Self {
        self.alias = Some(alias.into());
        self
    }

    pub fn with_img(mut self, img: impl Into<String>) -> Self {
        self.img = Some(img.into());
        self
    }

    pub fn with_parameter(mut self, parameter: ArgumentProto) -> Self {
        self.parameters.push(parameter);
        self
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ComponentProto {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub img: Option<String>,
    pub singletone: bool,
    pub signals: BTreeMap<String, MemberProto>,
    pub methods: BTreeMap<String, MemberProto>,
    pub variables: BTreeMap<String, MemberProto>,
    pub constructor_parameters: BTreeMap<String, ArgumentProto>,
}

impl ComponentProto {
    pub fn with_signal(mut self, name: impl Into<String>, signal: MemberProto) -> Self {
        self.signals.insert(name.into(), signal);
        self
    }

    pub fn with_method(mut self, name: impl Into<String>, method: MemberProto) -> Self {
        self.methods.insert(name.into(), method);
        self
    }

    pub fn with_variable(mut self, name: impl Into<String>, variable: MemberProto) -> Self {
        self.variables.insert(name.into(), variable);
        self
    }
}

/// Everything a platform declares.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Platform {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub components: BTreeMap<String, ComponentProto>,
}

impl Platform {
    pub fn from_json(json: &str) -> Result<Self, PlatformError> {
        serde_json::from_str(json).map_err(|e| PlatformError::InvalidCatalog(e.to_string()))
    }

    pub fn with_component(mut self, kind: impl Into<String>, component: ComponentProto) -> Self {
        self.components.insert(kind.into(), component);
        self
    }
}

/// Menu entry for an event, method or variable picker.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ListEntry {
    pub name: String,
    pub description: Option<String>,
    pub img: Option<String>,
    pub alias: Option<String>,
}

impl ListEntry {
    pub(crate) fn from_member(name: &str, member: &MemberProto) -> Self {
        Self {
            name: name.to_string(),
            description: member.description.clone(),
            img: member.img.clone(),
            alias: member.alias.clone(),
        }
    }
}
