//! Editor configuration.

use crate::core::{Dimensions, IdStrategy};

/// Tunables for an [`EditorModel`](super::EditorModel).
#[derive(Clone, Debug, PartialEq)]
pub struct EditorConfig {
    pub(crate) pseudostate_size: f64,
    pub(crate) component_size: f64,
    pub(crate) note_size: Dimensions,
    pub(crate) untitled_name: String,
    pub(crate) id_strategy: IdStrategy,
}

impl EditorConfig {
    pub fn new() -> Self {
        Self {
            pseudostate_size: 50.0,
            component_size: 50.0,
            note_size: Dimensions::new(200.0, 36.0),
            untitled_name: "Untitled".to_string(),
            id_strategy: IdStrategy::Random,
        }
    }

    /// Side of the square used to center initial, final and choice states
    pub fn pseudostate_size(mut self, side: f64) -> Self {
        self.pseudostate_size = side;
        self
    }

    /// Side of the square used to center components
    pub fn component_size(mut self, side: f64) -> Self {
        self.component_size = side;
        self
    }

    /// Box used to center notes
    pub fn note_size(mut self, size: Dimensions) -> Self {
        self.note_size = size;
        self
    }

    /// Name recorded on save when the caller gives none
    pub fn untitled_name(mut self, name: impl Into<String>) -> Self {
        self.untitled_name = name.into();
        self
    }

    /// How fresh ids are produced
    pub fn id_strategy(mut self, strategy: IdStrategy) -> Self {
        self.id_strategy = strategy;
        self
    }

    pub fn pseudostate_dimensions(&self) -> Dimensions {
        Dimensions::square(self.pseudostate_size)
    }

    pub fn component_dimensions(&self) -> Dimensions {
        Dimensions::square(self.component_size)
    }

    pub fn note_dimensions(&self) -> Dimensions {
        self.note_size
    }
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self::new()
    }
}
