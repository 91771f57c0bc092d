//! Editor configuration
//!
//! Options are plain data loaded from the host page's configuration and
//! passed into the [`crate::Editor`] explicitly; nothing here is global.

use crate::{MoveConstraints, RotateConstraints};
use glam::Vec3;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorOptions {
    /// Movement grid per axis; a zero component disables that axis
    pub grid_step: Vec3,
    /// Rotation snap per axis, in degrees; zero locks the axis
    pub rotate_step_deg: Vec3,
    /// Undo stack depth (0 = unlimited)
    pub undo_levels: usize,
    /// How far a doorway snaps to the nearest wall
    pub snap_distance: f32,
}

impl Default for EditorOptions {
    fn default() -> Self {
        Self {
            grid_step: Vec3::new(0.5, 0.5, 0.5),
            rotate_step_deg: Vec3::new(0.0, 90.0, 0.0),
            undo_levels: 100,
            snap_distance: 1.0,
        }
    }
}

impl EditorOptions {
    pub fn move_constraints(&self) -> MoveConstraints {
        MoveConstraints::new(self.grid_step)
    }

    pub fn rotate_constraints(&self) -> RotateConstraints {
        RotateConstraints::new(Vec3::new(
            self.rotate_step_deg.x.to_radians(),
            self.rotate_step_deg.y.to_radians(),
            self.rotate_step_deg.z.to_radians(),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_config_uses_defaults() {
        let options: EditorOptions = serde_json::from_str(r#"{"undo_levels": 10}"#).unwrap();
        assert_eq!(options.undo_levels, 10);
        assert_eq!(options.grid_step, EditorOptions::default().grid_step);
    }

    #[test]
    fn test_rotate_constraints_convert_to_radians() {
        let options = EditorOptions::default();
        let constraints = options.rotate_constraints();
        assert!((constraints.step.y - std::f32::consts::FRAC_PI_2).abs() < 1e-6);
        assert_eq!(constraints.step.x, 0.0);
    }
}
