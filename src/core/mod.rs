//! Document data model.
//!
//! This module holds the plain data of a diagram document:
//! - Geometry (`Point`, `Dimensions`, `Placement`)
//! - Condition trees and the trigger/action/event references built on them
//! - Entities (`State`, pseudostates, `Transition`, `Component`, `Note`)
//!   and the `StateMachine` that owns them
//! - Identifier generation
//!
//! Nothing here notifies anyone. Mutation with change tracking lives in
//! [`crate::editor`].

mod condition;
mod elements;
mod geometry;
mod id;
mod label;

pub use condition::{Condition, Operator, Variable};
pub use elements::{
    ChoiceState, Component, Elements, EntityMap, FinalState, InitialState, Meta, NodeKind, Note,
    RenameOutcome, State, StateMachine, Transition,
};
pub use geometry::{Dimensions, Placement, Point};
pub use id::{IdGenerator, IdStrategy, RandomIds, SequentialIds};
pub use label::{
    Action, ArgEntry, ArgValue, Args, Event, EventRef, LabelUpdate, Trigger, TransitionLabel,
};
