//! Error types for the document model

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ModelError {
    #[error("Object not found: {0}")]
    ObjectNotFound(String),

    #[error("Duplicate object id: {0}")]
    DuplicateId(String),

    #[error("Object is not an area: {0}")]
    NotAnArea(String),

    #[error("Tile ({x}, {y}) is outside the grid")]
    TileOutOfBounds { x: i32, y: i32 },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
