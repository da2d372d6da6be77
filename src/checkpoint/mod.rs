//! Checkpoint and restore for editor documents.
//!
//! A [`DocumentCheckpoint`] is a versioned JSON snapshot of everything a
//! document persists: its name and location, the head controller and every
//! user machine. The head-scope machine is left out because `init` creates
//! a fresh one. Restoring validates the elements before they replace the
//! live document, then goes through `init` so observers see a normal load.
//!
//! # Example
//!
//! ```rust
//! use chartdoc::editor::{CreateStateParams, EditorModel};
//! use chartdoc::core::{Dimensions, Elements, Point, StateMachine};
//!
//! let mut model = EditorModel::default();
//! model.init(None, "demo", Elements::default());
//! model.create_state_machine("main", StateMachine::new("ArduinoUno"));
//! model.create_state(
//!     CreateStateParams::new("main", "Idle", Point::new(0.0, 0.0), Dimensions::new(100.0, 50.0))
//!         .with_id("idle"),
//! );
//!
//! let json = model.checkpoint().to_json().unwrap();
//!
//! let mut restored = EditorModel::default();
//! restored.restore_json(&json).unwrap();
//! assert!(restored.document().states("main").unwrap().contains_key("idle"));
//! assert!(!restored.document().is_stale());
//! ```

use crate::builder::validate_elements;
use crate::core::Elements;
use crate::editor::EditorModel;
use crate::store::HEAD_SCOPE;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

pub mod error;

pub use error::CheckpointError;

/// Version identifier for checkpoint format
pub const CHECKPOINT_VERSION: u32 = 1;

/// Serializable checkpoint of a document.
/// Does NOT include runtime state (stale flag, subscribers).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentCheckpoint {
    /// Checkpoint format version
    pub version: u32,

    /// Unique checkpoint identifier
    pub id: String,

    /// When checkpoint was created
    pub timestamp: DateTime<Utc>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub basename: Option<String>,

    pub name: String,

    pub head_controller_id: String,

    /// User machines, without the head scope
    pub elements: Elements,
}

impl DocumentCheckpoint {
    pub fn to_json(&self) -> Result<String, CheckpointError> {
        serde_json::to_string(self).map_err(|e| CheckpointError::SerializationFailed(e.to_string()))
    }

    pub fn to_json_pretty(&self) -> Result<String, CheckpointError> {
        serde_json::to_string_pretty(self)
            .map_err(|e| CheckpointError::SerializationFailed(e.to_string()))
    }

    /// Parse a checkpoint, rejecting other format versions.
    pub fn from_json(json: &str) -> Result<Self, CheckpointError> {
        let checkpoint: Self = serde_json::from_str(json)
            .map_err(|e| CheckpointError::DeserializationFailed(e.to_string()))?;
        if checkpoint.version != CHECKPOINT_VERSION {
            return Err(CheckpointError::UnsupportedVersion {
                found: checkpoint.version,
                supported: CHECKPOINT_VERSION,
            });
        }
        Ok(checkpoint)
    }

    /// Structural check of the carried elements.
    pub fn validate(&self) -> Result<(), CheckpointError> {
        validate_elements(&self.elements)?;
        Ok(())
    }
}

impl EditorModel {
    /// Capture the current document.
    pub fn checkpoint(&self) -> DocumentCheckpoint {
        let document = self.document();
        let mut elements = document.elements().clone();
        elements.state_machines.remove(HEAD_SCOPE);

        DocumentCheckpoint {
            version: CHECKPOINT_VERSION,
            id: uuid::Uuid::new_v4().to_string(),
            timestamp: Utc::now(),
            basename: document.basename().map(str::to_string),
            name: document
                .name()
                .map(str::to_string)
                .unwrap_or_else(|| self.config().untitled_name.clone()),
            head_controller_id: document.head_controller_id().to_string(),
            elements,
        }
    }

    /// Replace the document with a checkpoint. The live document is left
    /// untouched when validation fails.
    pub fn restore(&mut self, checkpoint: DocumentCheckpoint) -> Result<(), CheckpointError> {
        checkpoint.validate()?;

        debug!(checkpoint = %checkpoint.id, version = checkpoint.version, "restoring document");
        self.init(
            checkpoint.basename.as_deref(),
            &checkpoint.name,
            checkpoint.elements,
        );
        if checkpoint.head_controller_id != HEAD_SCOPE {
            self.change_head_controller_id(&checkpoint.head_controller_id);
        }
        Ok(())
    }

    pub fn restore_json(&mut self, json: &str) -> Result<(), CheckpointError> {
        self.restore(DocumentCheckpoint::from_json(json)?)
    }
}
