//! Parcour object variants
//!
//! One closed enum covers every object kind in a document. The enum is
//! internally tagged with `$type` so the serialized form of each object is
//! a flat record carrying its discriminant, which is also the clipboard
//! payload and undo-memento format.

use crate::{Box3, ModelError, TileGrid, WallSegment};
use glam::{Quat, Vec2, Vec3};
use serde::{Deserialize, Serialize};

/// Role of a location marker
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum LocationKind {
    Start,
    End,
}

impl From<LocationKind> for u8 {
    fn from(k: LocationKind) -> u8 {
        match k {
            LocationKind::Start => 0,
            LocationKind::End => 1,
        }
    }
}

impl TryFrom<u8> for LocationKind {
    type Error = String;

    fn try_from(v: u8) -> Result<Self, Self::Error> {
        match v {
            0 => Ok(LocationKind::Start),
            1 => Ok(LocationKind::End),
            other => Err(format!("unknown location kind {}", other)),
        }
    }
}

/// Collision shape of a physical prop
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Shape {
    Box,
    Sphere,
}

/// A room: a walled area with a floor tile grid.
///
/// `location` is the world-space origin corner, `size` the extents. The
/// four wall segments are derived from `size` on demand, never stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoomArea {
    pub id: String,
    #[serde(default)]
    pub name: String,
    pub location: Vec3,
    pub size: Vec3,
    #[serde(default)]
    pub tiles: TileGrid,
}

impl RoomArea {
    pub fn new(id: impl Into<String>, location: Vec3, size: Vec3) -> Self {
        Self {
            id: id.into(),
            name: String::new(),
            location,
            size,
            tiles: TileGrid::new(size.x.max(0.0) as usize, size.z.max(0.0) as usize),
        }
    }

    /// World-space bounding volume
    pub fn bounds(&self) -> Box3 {
        Box3::from_origin_size(self.location, self.size)
    }

    /// The four walls in room-local space, normals pointing inward.
    ///
    /// Order: north (z = 0), east (x = size.x), south (z = size.z),
    /// west (x = 0).
    pub fn wall_segments(&self) -> [WallSegment; 4] {
        let w = self.size.x;
        let d = self.size.z;
        let h = self.size.y;
        [
            WallSegment {
                start: Vec3::ZERO,
                end: Vec3::new(w, 0.0, 0.0),
                height: h,
                normal: Vec3::Z,
            },
            WallSegment {
                start: Vec3::new(w, 0.0, 0.0),
                end: Vec3::new(w, 0.0, d),
                height: h,
                normal: Vec3::NEG_X,
            },
            WallSegment {
                start: Vec3::new(w, 0.0, d),
                end: Vec3::new(0.0, 0.0, d),
                height: h,
                normal: Vec3::NEG_Z,
            },
            WallSegment {
                start: Vec3::new(0.0, 0.0, d),
                end: Vec3::ZERO,
                height: h,
                normal: Vec3::X,
            },
        ]
    }

    /// Wall segments translated to world space
    pub fn world_wall_segments(&self) -> [WallSegment; 4] {
        self.wall_segments().map(|s| WallSegment {
            start: s.start + self.location,
            end: s.end + self.location,
            ..s
        })
    }
}

/// An opening embedded in a room wall
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Doorway {
    pub id: String,
    pub area_id: String,
    #[serde(default)]
    pub name: String,
    /// Area-local position at the foot of the opening
    pub location: Vec3,
    /// Width and height of the opening in the wall plane
    pub size: Vec2,
}

impl Doorway {
    /// Width of the frame posts either side of the opening
    pub const FRAME_WIDTH: f32 = 0.1;
    /// How far the frame protrudes from the wall plane
    pub const OUTSET: f32 = 0.05;
}

/// Start or end marker of a parcour
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub id: String,
    pub area_id: String,
    #[serde(default)]
    pub name: String,
    pub location: Vec3,
    pub kind: LocationKind,
}

/// Immovable physical prop
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StaticObject {
    pub id: String,
    pub area_id: String,
    #[serde(default)]
    pub name: String,
    pub location: Vec3,
    #[serde(default)]
    pub rotation: Quat,
    pub shape: Shape,
    pub size: Vec3,
}

/// Physical prop simulated by the player
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DynamicObject {
    pub id: String,
    pub area_id: String,
    #[serde(default)]
    pub name: String,
    pub location: Vec3,
    #[serde(default)]
    pub rotation: Quat,
    pub shape: Shape,
    pub size: Vec3,
    pub density: f32,
}

impl DynamicObject {
    /// Simulated mass, derived from density and shape volume
    pub fn mass(&self) -> f32 {
        let volume = match self.shape {
            Shape::Box => self.size.x * self.size.y * self.size.z,
            Shape::Sphere => {
                let r = self.size.x * 0.5;
                4.0 / 3.0 * std::f32::consts::PI * r * r * r
            }
        };
        self.density * volume
    }
}

/// Any object that can live in a parcour document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "$type")]
pub enum ParcourObject {
    RoomArea(RoomArea),
    Doorway(Doorway),
    Location(Location),
    StaticObject(StaticObject),
    DynamicObject(DynamicObject),
}

impl ParcourObject {
    pub fn id(&self) -> &str {
        match self {
            ParcourObject::RoomArea(o) => &o.id,
            ParcourObject::Doorway(o) => &o.id,
            ParcourObject::Location(o) => &o.id,
            ParcourObject::StaticObject(o) => &o.id,
            ParcourObject::DynamicObject(o) => &o.id,
        }
    }

    pub fn set_id(&mut self, id: impl Into<String>) {
        let id = id.into();
        match self {
            ParcourObject::RoomArea(o) => o.id = id,
            ParcourObject::Doorway(o) => o.id = id,
            ParcourObject::Location(o) => o.id = id,
            ParcourObject::StaticObject(o) => o.id = id,
            ParcourObject::DynamicObject(o) => o.id = id,
        }
    }

    /// The `$type` discriminant this object serializes with
    pub fn type_name(&self) -> &'static str {
        match self {
            ParcourObject::RoomArea(_) => "RoomArea",
            ParcourObject::Doorway(_) => "Doorway",
            ParcourObject::Location(_) => "Location",
            ParcourObject::StaticObject(_) => "StaticObject",
            ParcourObject::DynamicObject(_) => "DynamicObject",
        }
    }

    pub fn name(&self) -> &str {
        match self {
            ParcourObject::RoomArea(o) => &o.name,
            ParcourObject::Doorway(o) => &o.name,
            ParcourObject::Location(o) => &o.name,
            ParcourObject::StaticObject(o) => &o.name,
            ParcourObject::DynamicObject(o) => &o.name,
        }
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        let name = name.into();
        match self {
            ParcourObject::RoomArea(o) => o.name = name,
            ParcourObject::Doorway(o) => o.name = name,
            ParcourObject::Location(o) => o.name = name,
            ParcourObject::StaticObject(o) => o.name = name,
            ParcourObject::DynamicObject(o) => o.name = name,
        }
    }

    /// Owning area id, for area elements; None for areas themselves.
    ///
    /// This is a lookup key, not a pointer: the referenced area may have
    /// been deleted, which validation reports as a dangling reference.
    pub fn area_id(&self) -> Option<&str> {
        match self {
            ParcourObject::RoomArea(_) => None,
            ParcourObject::Doorway(o) => Some(&o.area_id),
            ParcourObject::Location(o) => Some(&o.area_id),
            ParcourObject::StaticObject(o) => Some(&o.area_id),
            ParcourObject::DynamicObject(o) => Some(&o.area_id),
        }
    }

    pub fn set_area_id(&mut self, area_id: impl Into<String>) {
        let area_id = area_id.into();
        match self {
            ParcourObject::RoomArea(_) => {}
            ParcourObject::Doorway(o) => o.area_id = area_id,
            ParcourObject::Location(o) => o.area_id = area_id,
            ParcourObject::StaticObject(o) => o.area_id = area_id,
            ParcourObject::DynamicObject(o) => o.area_id = area_id,
        }
    }

    /// World origin corner for areas, area-local position for elements
    pub fn location(&self) -> Vec3 {
        match self {
            ParcourObject::RoomArea(o) => o.location,
            ParcourObject::Doorway(o) => o.location,
            ParcourObject::Location(o) => o.location,
            ParcourObject::StaticObject(o) => o.location,
            ParcourObject::DynamicObject(o) => o.location,
        }
    }

    pub fn set_location(&mut self, location: Vec3) {
        match self {
            ParcourObject::RoomArea(o) => o.location = location,
            ParcourObject::Doorway(o) => o.location = location,
            ParcourObject::Location(o) => o.location = location,
            ParcourObject::StaticObject(o) => o.location = location,
            ParcourObject::DynamicObject(o) => o.location = location,
        }
    }

    pub fn is_area(&self) -> bool {
        matches!(self, ParcourObject::RoomArea(_))
    }

    pub fn as_room(&self) -> Option<&RoomArea> {
        match self {
            ParcourObject::RoomArea(o) => Some(o),
            _ => None,
        }
    }

    pub fn as_room_mut(&mut self) -> Option<&mut RoomArea> {
        match self {
            ParcourObject::RoomArea(o) => Some(o),
            _ => None,
        }
    }

    /// Body rotation for props; None for object kinds without one
    pub fn rotation(&self) -> Option<Quat> {
        match self {
            ParcourObject::StaticObject(o) => Some(o.rotation),
            ParcourObject::DynamicObject(o) => Some(o.rotation),
            _ => None,
        }
    }

    pub fn set_rotation(&mut self, rotation: Quat) -> bool {
        match self {
            ParcourObject::StaticObject(o) => o.rotation = rotation,
            ParcourObject::DynamicObject(o) => o.rotation = rotation,
            _ => return false,
        }
        true
    }

    /// Serialize to the flat `$type`-tagged record form
    pub fn to_value(&self) -> Result<serde_json::Value, ModelError> {
        Ok(serde_json::to_value(self)?)
    }

    /// Reconstruct from a `$type`-tagged record
    pub fn from_value(value: serde_json::Value) -> Result<Self, ModelError> {
        Ok(serde_json::from_value(value)?)
    }
}
