//! Reasons a transition edit is rejected.

use thiserror::Error;

/// A structural rule a transition failed.
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
pub enum TransitionViolation {
    #[error("Cannot transition to an initial state")]
    TargetIsInitial,

    #[error("Cannot have an empty trigger except from choice and initial states")]
    EmptyTriggerNotAllowed,

    #[error("Cannot have a trigger on a transition from a choice state")]
    TriggerNotAllowedFromChoice,

    #[error("Cannot transition to a note unless the source is also a note")]
    NoteTargetRequiresNoteSource,

    #[error("Cannot transition from a final state")]
    SourceIsFinal,
}

impl TransitionViolation {
    /// Stable kebab-case code for diagnostics.
    pub fn code(&self) -> &'static str {
        match self {
            Self::TargetIsInitial => "target-is-initial",
            Self::EmptyTriggerNotAllowed => "empty-trigger-not-allowed",
            Self::TriggerNotAllowedFromChoice => "trigger-not-allowed-from-choice",
            Self::NoteTargetRequiresNoteSource => "note-target-requires-note-source",
            Self::SourceIsFinal => "source-is-final",
        }
    }
}
