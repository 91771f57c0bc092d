//! Error types for the edit engine

use parcour_model::ModelError;
use thiserror::Error;

/// Failure of an edit step's `apply` or `undo`.
///
/// These are fatal to the in-progress interaction: a step either applies
/// completely or leaves the document untouched.
#[derive(Error, Debug)]
pub enum StepError {
    #[error("Target not found: {0}")]
    ObjectNotFound(String),

    #[error("Area not found: {0}")]
    AreaNotFound(String),

    #[error("Invalid step argument: {0}")]
    InvalidArgument(String),

    #[error("Memento does not match the step that produced it")]
    MementoMismatch,

    #[error(transparent)]
    Model(#[from] ModelError),
}

#[derive(Error, Debug)]
pub enum EditorError {
    #[error(transparent)]
    Step(#[from] StepError),

    #[error(transparent)]
    Model(#[from] ModelError),

    #[error("Clipboard is empty")]
    EmptyClipboard,

    #[error("Clipboard payload: {0}")]
    Payload(#[from] serde_json::Error),

    #[error("Nothing selected")]
    EmptySelection,
}
