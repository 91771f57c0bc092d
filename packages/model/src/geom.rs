//! Axis-aligned boxes and wall segments derived from areas

use glam::Vec3;
use serde::{Deserialize, Serialize};

/// Axis-aligned bounding box in world space
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Box3 {
    pub min: Vec3,
    pub max: Vec3,
}

impl Box3 {
    pub fn new(min: Vec3, max: Vec3) -> Self {
        Self { min, max }
    }

    /// Box spanned by an origin corner and positive extents
    pub fn from_origin_size(origin: Vec3, size: Vec3) -> Self {
        Self {
            min: origin.min(origin + size),
            max: origin.max(origin + size),
        }
    }

    pub fn size(&self) -> Vec3 {
        self.max - self.min
    }

    pub fn contains_point(&self, p: Vec3) -> bool {
        p.cmpge(self.min).all() && p.cmple(self.max).all()
    }

    /// True if the boxes share interior volume (touching faces don't count)
    pub fn intersects(&self, other: &Box3) -> bool {
        self.min.cmplt(other.max).all() && other.min.cmplt(self.max).all()
    }

    /// Overlap box, or None when the boxes don't share interior volume
    pub fn intersection(&self, other: &Box3) -> Option<Box3> {
        if !self.intersects(other) {
            return None;
        }
        Some(Box3 {
            min: self.min.max(other.min),
            max: self.max.min(other.max),
        })
    }
}

/// One wall of a room, derived from the room's extents.
///
/// `start` and `end` are at floor height; the wall rises `height` above
/// them. `normal` points into the room.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WallSegment {
    pub start: Vec3,
    pub end: Vec3,
    pub height: f32,
    pub normal: Vec3,
}

impl WallSegment {
    pub fn length(&self) -> f32 {
        self.start.distance(self.end)
    }

    /// Direction along the wall, floor-plane only
    pub fn direction(&self) -> Vec3 {
        (self.end - self.start).normalize_or_zero()
    }

    /// Closest point on the segment to `p`, measured in the floor plane
    pub fn closest_point(&self, p: Vec3) -> Vec3 {
        self.point_at(self.project(p))
    }

    /// Parametric offset (0..length) of the closest point to `p`
    pub fn project(&self, p: Vec3) -> f32 {
        let dir = self.direction();
        let rel = Vec3::new(p.x - self.start.x, 0.0, p.z - self.start.z);
        rel.dot(dir).clamp(0.0, self.length())
    }

    /// Point at parametric offset `t` along the wall, at floor height
    pub fn point_at(&self, t: f32) -> Vec3 {
        self.start + self.direction() * t.clamp(0.0, self.length())
    }

    /// Floor-plane distance from `p` to the segment
    pub fn distance(&self, p: Vec3) -> f32 {
        let closest = self.closest_point(p);
        Vec3::new(p.x - closest.x, 0.0, p.z - closest.z).length()
    }
}
