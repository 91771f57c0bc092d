//! Runtime model built from a parcour document
//!
//! The editor's object graph is resolved into flat lists the host can
//! hand straight to its renderer and physics engine: wall pieces with
//! doorway openings already cut out, walkable floor cells, and rigid
//! bodies with their masses computed. Element positions are area-local
//! in the document; everything here comes out in world space.

use glam::{Quat, Vec3};
use parcour_model::{
    LocationKind, ModelError, Parcour, ParcourObject, RoomArea, Shape, WallSegment,
};
use thiserror::Error;

/// Floor-plane distance within which a doorway counts as sitting on a wall
const OPENING_TOLERANCE: f32 = 0.05;

/// Wall pieces shorter than this are dropped after cutting
const MIN_PIECE_LENGTH: f32 = 1e-3;

#[derive(Error, Debug)]
pub enum PlayerError {
    #[error("Parcour has no start location")]
    MissingStart,

    #[error(transparent)]
    Model(#[from] ModelError),
}

/// A solid stretch of wall, in world space
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WallPiece {
    pub start: Vec3,
    pub end: Vec3,
    pub height: f32,
}

/// One walkable 1×1 floor cell; `min` is its world-space corner
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FloorCell {
    pub min: Vec3,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BodyKind {
    Static,
    Dynamic { mass: f32 },
}

/// A rigid body for the host physics engine
#[derive(Debug, Clone, PartialEq)]
pub struct Body {
    pub id: String,
    pub location: Vec3,
    pub rotation: Quat,
    pub shape: Shape,
    pub size: Vec3,
    pub kind: BodyKind,
}

/// Everything the player runtime needs, resolved to world space
#[derive(Debug, Clone, PartialEq)]
pub struct PlayerModel {
    pub walls: Vec<WallPiece>,
    pub floor: Vec<FloorCell>,
    pub bodies: Vec<Body>,
    pub start: Vec3,
    pub end: Option<Vec3>,
}

impl PlayerModel {
    pub fn from_parcour(parcour: &Parcour) -> Result<Self, PlayerError> {
        let mut walls = Vec::new();
        let mut floor = Vec::new();
        let mut bodies = Vec::new();
        let mut start = None;
        let mut end = None;

        for object in parcour.objects() {
            match object {
                ParcourObject::RoomArea(room) => {
                    walls.extend(room_walls(room, parcour));
                    floor.extend(room.tiles.walkable_cells().map(|(x, y)| FloorCell {
                        min: room.location + Vec3::new(x as f32, 0.0, y as f32),
                    }));
                }
                // Openings are handled with their owning room
                ParcourObject::Doorway(_) => {}
                ParcourObject::Location(marker) => {
                    let world = area_origin(parcour, &marker.area_id) + marker.location;
                    match marker.kind {
                        LocationKind::Start => start = Some(world),
                        LocationKind::End => end = Some(world),
                    }
                }
                ParcourObject::StaticObject(o) => bodies.push(Body {
                    id: o.id.clone(),
                    location: area_origin(parcour, &o.area_id) + o.location,
                    rotation: o.rotation,
                    shape: o.shape,
                    size: o.size,
                    kind: BodyKind::Static,
                }),
                ParcourObject::DynamicObject(o) => bodies.push(Body {
                    id: o.id.clone(),
                    location: area_origin(parcour, &o.area_id) + o.location,
                    rotation: o.rotation,
                    shape: o.shape,
                    size: o.size,
                    kind: BodyKind::Dynamic { mass: o.mass() },
                }),
            }
        }

        let start = start.ok_or(PlayerError::MissingStart)?;
        tracing::debug!(
            walls = walls.len(),
            floor = floor.len(),
            bodies = bodies.len(),
            "player model built"
        );

        Ok(Self {
            walls,
            floor,
            bodies,
            start,
            end,
        })
    }

    /// Build from a flat object list, as delivered by a `load` message
    pub fn from_objects(objects: Vec<ParcourObject>) -> Result<Self, PlayerError> {
        let mut parcour = Parcour::new("");
        for object in objects {
            parcour.add(object)?;
        }
        Self::from_parcour(&parcour)
    }
}

/// World origin of an element's owning area. Dangling references (which
/// validation reports, but a raw document may still carry) resolve to the
/// world origin.
fn area_origin(parcour: &Parcour, area_id: &str) -> Vec3 {
    parcour
        .room(area_id)
        .map(|room| room.location)
        .unwrap_or(Vec3::ZERO)
}

/// All wall pieces of one room in world space, with its doorway openings
/// cut out
fn room_walls(room: &RoomArea, parcour: &Parcour) -> Vec<WallPiece> {
    let doorways: Vec<_> = parcour
        .objects()
        .iter()
        .filter_map(|o| match o {
            ParcourObject::Doorway(d) if d.area_id == room.id => Some(d),
            _ => None,
        })
        .collect();

    let mut pieces = Vec::new();
    // Cut in the room's local frame, where doorway locations live
    for wall in room.wall_segments() {
        let mut openings: Vec<(f32, f32)> = doorways
            .iter()
            .filter(|d| wall.distance(d.location) <= OPENING_TOLERANCE)
            .map(|d| {
                let t = wall.project(d.location);
                let half = d.size.x * 0.5;
                ((t - half).max(0.0), (t + half).min(wall.length()))
            })
            .collect();
        openings.sort_by(|a, b| a.0.total_cmp(&b.0));

        pieces.extend(cut_wall(&wall, &openings).into_iter().map(|p| WallPiece {
            start: p.start + room.location,
            end: p.end + room.location,
            ..p
        }));
    }
    pieces
}

/// Split one wall into solid pieces around sorted opening intervals
fn cut_wall(wall: &WallSegment, openings: &[(f32, f32)]) -> Vec<WallPiece> {
    let mut pieces = Vec::new();
    let mut cursor = 0.0;

    for &(from, to) in openings {
        if from - cursor > MIN_PIECE_LENGTH {
            pieces.push(WallPiece {
                start: wall.point_at(cursor),
                end: wall.point_at(from),
                height: wall.height,
            });
        }
        cursor = cursor.max(to);
    }

    if wall.length() - cursor > MIN_PIECE_LENGTH {
        pieces.push(WallPiece {
            start: wall.point_at(cursor),
            end: wall.point_at(wall.length()),
            height: wall.height,
        });
    }

    pieces
}
