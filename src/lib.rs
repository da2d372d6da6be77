//! Chartdoc: the document model behind a state-machine diagram editor
//!
//! A document holds any number of independently scoped state machines. Each
//! machine owns its states, pseudostates, transitions, components and notes.
//! Every edit goes through [`EditorModel`], which keeps the document
//! consistent, marks it stale and tells observers exactly which data changed.
//!
//! # Core Concepts
//!
//! - **Elements**: Plain serializable data (`core`)
//! - **Notifications**: Path-addressed change events over a read-only document (`store`)
//! - **Legality**: Validation-based transition rules (`enforcement`)
//! - **Platforms**: Read-only component catalogs and display helpers (`platform`)
//! - **Persistence**: Versioned JSON checkpoints (`checkpoint`)
//!
//! # Example
//!
//! ```rust
//! use chartdoc::core::{Dimensions, Elements, Point, StateMachine, TransitionLabel, Trigger};
//! use chartdoc::editor::{CreateStateParams, CreateTransitionParams, EditorModel};
//! use chartdoc::store::DataPath;
//! use std::cell::Cell;
//! use std::rc::Rc;
//!
//! let mut model = EditorModel::default();
//! model.init(None, "blink", Elements::default());
//! model.create_state_machine("main", StateMachine::new("ArduinoUno"));
//!
//! let seen = Rc::new(Cell::new(0));
//! let counter = Rc::clone(&seen);
//! model.subscribe(DataPath::Transitions, move |_, _| counter.set(counter.get() + 1));
//!
//! let size = Dimensions::new(100.0, 50.0);
//! let off = model
//!     .create_state(CreateStateParams::new("main", "Off", Point::new(0.0, 0.0), size))
//!     .unwrap();
//! let on = model
//!     .create_state(CreateStateParams::new("main", "On", Point::new(200.0, 0.0), size))
//!     .unwrap();
//! let label = TransitionLabel::with_trigger(Trigger::event("button", "clicked"));
//! model.create_transition(CreateTransitionParams::new("main", &off, &on, Some(label)));
//!
//! assert_eq!(seen.get(), 1);
//! assert!(model.document().is_stale());
//! ```

pub mod builder;
pub mod checkpoint;
pub mod core;
pub mod editor;
pub mod enforcement;
pub mod platform;
pub mod store;

// Re-export commonly used types
pub use builder::{BuildError, StateMachineBuilder, TransitionBuilder};
pub use checkpoint::{CheckpointError, DocumentCheckpoint};
pub use core::{Elements, StateMachine};
pub use editor::{EditorConfig, EditorModel};
pub use enforcement::{TransitionRules, TransitionViolation};
pub use platform::{Platform, PlatformManager};
pub use store::{Change, DataPath, Document};
