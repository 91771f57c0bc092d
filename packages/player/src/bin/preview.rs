//! Headless preview: load a parcour file, validate it, build the player
//! model, and print a summary. Useful for checking documents outside the
//! editor.

use anyhow::{bail, Context, Result};
use parcour_model::Parcour;
use parcour_player::PlayerModel;
use parcour_validate::{has_errors, validate_parcour, Severity, ValidateOptions};

fn main() -> Result<()> {
    tracing_subscriber::fmt().init();

    let path = std::env::args()
        .nth(1)
        .context("usage: preview <parcour.json>")?;
    let raw = std::fs::read_to_string(&path).with_context(|| format!("reading {}", path))?;
    let parcour = Parcour::from_json(&raw).with_context(|| format!("parsing {}", path))?;

    tracing::info!(name = %parcour.name, objects = parcour.len(), "loaded parcour");

    let results = validate_parcour(&parcour, ValidateOptions::default());
    for result in &results {
        match result.level {
            Severity::Error => tracing::error!(code = result.code, "{}", result.message),
            Severity::Warning => tracing::warn!(code = result.code, "{}", result.message),
            Severity::Information => tracing::info!(code = result.code, "{}", result.message),
        }
    }
    if has_errors(&results) {
        bail!("document has validation errors");
    }

    let model = PlayerModel::from_parcour(&parcour)?;
    tracing::info!(
        walls = model.walls.len(),
        floor_cells = model.floor.len(),
        bodies = model.bodies.len(),
        start = ?model.start,
        end = ?model.end,
        "player model ready"
    );

    Ok(())
}
