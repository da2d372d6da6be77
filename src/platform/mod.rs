//! Platform capability catalog.
//!
//! A [`Platform`] lists the component types a target offers, each with its
//! signals, methods and variables. [`PlatformManager`] answers the lookups an
//! editor needs while showing a document: which events a component emits,
//! how an action's parameter reads, how wide a condition pictogram is.
//!
//! The catalog is reference data. Nothing here validates argument values.
//!
//! # Example
//!
//! ```rust
//! use chartdoc::core::{Action, ArgValue};
//! use chartdoc::platform::{
//!     ArgumentProto, ComponentProto, MemberProto, ParameterDisplay, Platform, PlatformManager,
//! };
//!
//! let led = ComponentProto::default().with_method(
//!     "print",
//!     MemberProto::described("Show text").with_parameter(ArgumentProto::new("text")),
//! );
//! let manager = PlatformManager::new("demo", Platform::default().with_component("LED", led));
//!
//! let action = Action::new("LED", "print")
//!     .with_arg("text", ArgValue::Literal("a rather long message".into()), 0);
//! assert_eq!(
//!     manager.describe_action(&action),
//!     Some(ParameterDisplay::Text("a rather lon...".into()))
//! );
//! ```

mod error;
mod manager;
mod picto;
mod proto;

pub use error::PlatformError;
pub use manager::{
    system_component, ParameterDisplay, PlatformManager, VisualComponent, SYSTEM_COMPONENT,
};
pub use picto::PictoMetrics;
pub use proto::{ArgumentProto, ArgumentType, ComponentProto, ListEntry, MemberProto, Platform};
