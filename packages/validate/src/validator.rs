use crate::{RuleRegistry, Severity, ValidationResult};
use parcour_model::Parcour;

/// Options for a validation pass
#[derive(Default)]
pub struct ValidateOptions {
    /// Custom rule registry (uses the default set if None)
    pub registry: Option<RuleRegistry>,
}

/// Run every rule against a candidate document and collect the findings
pub fn validate_parcour(parcour: &Parcour, options: ValidateOptions) -> Vec<ValidationResult> {
    let registry = options.registry.unwrap_or_default();
    let mut results = Vec::new();

    for rule in registry.rules() {
        let findings = rule.check(parcour);
        if !findings.is_empty() {
            tracing::debug!(code = rule.code(), count = findings.len(), "rule findings");
        }
        results.extend(findings);
    }

    results
}

/// The severity gate: true if any finding blocks a commit
pub fn has_errors(results: &[ValidationResult]) -> bool {
    results.iter().any(|r| r.level == Severity::Error)
}
