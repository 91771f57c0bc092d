//! # Parcour Validation
//!
//! Structural-integrity checks for candidate parcour documents.
//!
//! The editor applies an edit step, runs [`validate_parcour`] on the
//! resulting document, and rolls the step back if any [`Severity::Error`]
//! result comes back. Results are plain data; validation never fails as an
//! operation.

mod result;
mod rules;
mod validator;

pub use result::{codes, Severity, ValidationResult};
pub use rules::{
    AreaCollisionRule, DanglingAreaIdRule, DoorwayPlacementRule, LocationPlacementRule, Rule,
    RuleRegistry, TileGridRule,
};
pub use validator::{has_errors, validate_parcour, ValidateOptions};
