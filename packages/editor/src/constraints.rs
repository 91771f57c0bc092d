//! Interactive manipulation constraints
//!
//! Constraints legalize a proposed spatial value before an edit step is
//! built from it, so steps always receive already-snapped input. Movement
//! and rotation constraints quantize in place; placement constraints
//! search the document for the nearest legal position and report failure
//! with a plain boolean, never an error.
//!
//! Placement policies take and return world-space points; the caller
//! converts to the owning area's frame when it builds the step.

use glam::{EulerRot, Quat, Vec3};
use parcour_model::{Doorway, Parcour};

/// Quantize to the nearest multiple of `step`; a zero step disables the
/// axis entirely by forcing the component to zero.
fn quantize(value: f32, step: f32) -> f32 {
    if step == 0.0 {
        0.0
    } else {
        (value / step).round() * step
    }
}

/// Grid snapping for movement vectors
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MoveConstraints {
    pub step: Vec3,
}

impl MoveConstraints {
    pub fn new(step: Vec3) -> Self {
        Self { step }
    }

    pub fn apply(&self, v: &mut Vec3) {
        v.x = quantize(v.x, self.step.x);
        v.y = quantize(v.y, self.step.y);
        v.z = quantize(v.z, self.step.z);
    }

    /// Whether vertical movement is allowed at all
    pub fn y_enabled(&self) -> bool {
        self.step.y != 0.0
    }
}

/// Per-axis angle snapping for rotations
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RotateConstraints {
    /// Radians per axis; zero forces the axis to no rotation
    pub step: Vec3,
}

impl RotateConstraints {
    pub fn new(step: Vec3) -> Self {
        Self { step }
    }

    /// Decompose to Euler angles, quantize each axis, recompose
    pub fn apply(&self, q: &mut Quat) {
        let (yaw, pitch, roll) = q.to_euler(EulerRot::YXZ);
        *q = Quat::from_euler(
            EulerRot::YXZ,
            quantize(yaw, self.step.y),
            quantize(pitch, self.step.x),
            quantize(roll, self.step.z),
        );
    }
}

/// Placement policy for point-like objects.
///
/// `apply` mutates the proposed world location to the nearest legal
/// position and returns true, or leaves it untouched and returns false
/// when no legal placement exists. A false return means "no step to
/// build" for the caller.
pub trait LocationConstraints {
    fn apply(&self, parcour: &Parcour, location: &mut Vec3) -> bool;
}

/// Snaps a doorway onto the nearest room wall.
///
/// The snapped position is clamped along the wall so the opening plus its
/// frame posts stay inside the wall run.
#[derive(Debug, Clone)]
pub struct DoorwayPlacement {
    /// Width of the doorway being placed
    pub width: f32,
    /// Maximum floor-plane distance to a wall for a snap to happen
    pub snap_distance: f32,
}

impl LocationConstraints for DoorwayPlacement {
    fn apply(&self, parcour: &Parcour, location: &mut Vec3) -> bool {
        let margin = self.width * 0.5 + Doorway::FRAME_WIDTH;
        let mut best: Option<(f32, Vec3)> = None;

        for room in parcour.rooms() {
            for wall in room.world_wall_segments() {
                if wall.length() < margin * 2.0 {
                    continue;
                }
                let distance = wall.distance(*location);
                if distance > self.snap_distance {
                    continue;
                }
                let t = wall.project(*location).clamp(margin, wall.length() - margin);
                let candidate = wall.point_at(t);
                if best.map_or(true, |(d, _)| distance < d) {
                    best = Some((distance, candidate));
                }
            }
        }

        match best {
            Some((_, snapped)) => {
                *location = snapped;
                true
            }
            None => false,
        }
    }
}

/// Snaps a start/end marker to the nearest walkable cell of its area
#[derive(Debug, Clone)]
pub struct MarkerPlacement {
    pub area_id: String,
}

impl LocationConstraints for MarkerPlacement {
    fn apply(&self, parcour: &Parcour, location: &mut Vec3) -> bool {
        let Some(room) = parcour.room(&self.area_id) else {
            return false;
        };

        let local = *location - room.location;
        let mut best: Option<(f32, Vec3)> = None;

        for (x, y) in room.tiles.walkable_cells() {
            let center = Vec3::new(x as f32 + 0.5, 0.0, y as f32 + 0.5);
            let distance = Vec3::new(local.x - center.x, 0.0, local.z - center.z).length();
            if best.map_or(true, |(d, _)| distance < d) {
                best = Some((distance, center));
            }
        }

        match best {
            Some((_, center)) => {
                *location = room.location + center;
                true
            }
            None => false,
        }
    }
}
