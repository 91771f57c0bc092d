use parcour_model::Box3;
use serde::Serialize;

/// Stable result codes emitted by the built-in rules
pub mod codes {
    pub const AREA_COLLISION: &str = "area-collision";
    pub const LOCATION_MISPLACED: &str = "location-misplaced";
    pub const DANGLING_AREA_ID: &str = "dangling-area-id";
    pub const DOORWAY_MISPLACED: &str = "doorway-misplaced";
    pub const TILE_GRID_SHAPE: &str = "tile-grid-shape";
}

/// Severity of a validation result. Only `Error` blocks a commit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub enum Severity {
    Information,
    Warning,
    Error,
}

/// One finding produced by a validation rule
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ValidationResult {
    pub level: Severity,
    /// Stable machine-readable code, see [`codes`]
    pub code: &'static str,
    pub message: String,
    /// Objects involved in the finding
    pub object_ids: Vec<String>,
    /// Overlap volume, for collision findings
    pub overlap: Option<Box3>,
}

impl ValidationResult {
    pub fn error(code: &'static str, message: impl Into<String>) -> Self {
        Self::with_level(Severity::Error, code, message)
    }

    pub fn warning(code: &'static str, message: impl Into<String>) -> Self {
        Self::with_level(Severity::Warning, code, message)
    }

    pub fn info(code: &'static str, message: impl Into<String>) -> Self {
        Self::with_level(Severity::Information, code, message)
    }

    fn with_level(level: Severity, code: &'static str, message: impl Into<String>) -> Self {
        Self {
            level,
            code,
            message: message.into(),
            object_ids: Vec::new(),
            overlap: None,
        }
    }

    pub fn with_objects<I, S>(mut self, ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.object_ids = ids.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_overlap(mut self, overlap: Box3) -> Self {
        self.overlap = Some(overlap);
        self
    }
}
