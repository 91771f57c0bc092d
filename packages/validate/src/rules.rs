//! Built-in validation rules

use crate::{codes, ValidationResult};
use parcour_model::{Parcour, ParcourObject};

/// A structural-integrity check over a candidate document.
///
/// Rules inspect the whole document and report findings; they never mutate
/// and never fail.
pub trait Rule {
    /// The stable code this rule emits
    fn code(&self) -> &'static str;

    fn check(&self, parcour: &Parcour) -> Vec<ValidationResult>;
}

/// Detects overlapping area bounding volumes
pub struct AreaCollisionRule;

impl Rule for AreaCollisionRule {
    fn code(&self) -> &'static str {
        codes::AREA_COLLISION
    }

    fn check(&self, parcour: &Parcour) -> Vec<ValidationResult> {
        let rooms: Vec<_> = parcour.rooms().collect();
        let mut results = Vec::new();

        for (i, a) in rooms.iter().enumerate() {
            for b in &rooms[i + 1..] {
                if let Some(overlap) = a.bounds().intersection(&b.bounds()) {
                    results.push(
                        ValidationResult::error(
                            codes::AREA_COLLISION,
                            format!("Areas '{}' and '{}' overlap", a.id, b.id),
                        )
                        .with_objects([a.id.clone(), b.id.clone()])
                        .with_overlap(overlap),
                    );
                }
            }
        }

        results
    }
}

/// Detects start/end markers outside their area or on non-walkable cells
pub struct LocationPlacementRule;

impl Rule for LocationPlacementRule {
    fn code(&self) -> &'static str {
        codes::LOCATION_MISPLACED
    }

    fn check(&self, parcour: &Parcour) -> Vec<ValidationResult> {
        let mut results = Vec::new();

        for object in parcour.objects() {
            let ParcourObject::Location(marker) = object else {
                continue;
            };
            // Dangling area ids are reported by DanglingAreaIdRule
            let Some(room) = parcour.room(&marker.area_id) else {
                continue;
            };

            // Marker locations are area-local, same frame as the tile grid
            let cell_x = marker.location.x.floor() as i32;
            let cell_y = marker.location.z.floor() as i32;

            if !room.tiles.is_walkable(cell_x, cell_y) {
                results.push(
                    ValidationResult::error(
                        codes::LOCATION_MISPLACED,
                        format!(
                            "Location '{}' is not on a walkable cell of area '{}'",
                            marker.id, room.id
                        ),
                    )
                    .with_objects([marker.id.clone(), room.id.clone()]),
                );
            }
        }

        results
    }
}

/// Detects elements whose `area_id` resolves to no area
pub struct DanglingAreaIdRule;

impl Rule for DanglingAreaIdRule {
    fn code(&self) -> &'static str {
        codes::DANGLING_AREA_ID
    }

    fn check(&self, parcour: &Parcour) -> Vec<ValidationResult> {
        let mut results = Vec::new();

        for object in parcour.objects() {
            let Some(area_id) = object.area_id() else {
                continue;
            };
            if parcour.room(area_id).is_none() {
                results.push(
                    ValidationResult::error(
                        codes::DANGLING_AREA_ID,
                        format!(
                            "{} '{}' references missing area '{}'",
                            object.type_name(),
                            object.id(),
                            area_id
                        ),
                    )
                    .with_objects([object.id().to_string()]),
                );
            }
        }

        results
    }
}

/// Detects doorways that don't sit on one of their area's walls
pub struct DoorwayPlacementRule {
    pub tolerance: f32,
}

impl Default for DoorwayPlacementRule {
    fn default() -> Self {
        Self { tolerance: 0.05 }
    }
}

impl Rule for DoorwayPlacementRule {
    fn code(&self) -> &'static str {
        codes::DOORWAY_MISPLACED
    }

    fn check(&self, parcour: &Parcour) -> Vec<ValidationResult> {
        let mut results = Vec::new();

        for object in parcour.objects() {
            let ParcourObject::Doorway(doorway) = object else {
                continue;
            };
            let Some(room) = parcour.room(&doorway.area_id) else {
                continue;
            };

            let on_wall = room
                .wall_segments()
                .iter()
                .any(|wall| wall.distance(doorway.location) <= self.tolerance);

            if !on_wall {
                results.push(
                    ValidationResult::error(
                        codes::DOORWAY_MISPLACED,
                        format!(
                            "Doorway '{}' does not lie on a wall of area '{}'",
                            doorway.id, room.id
                        ),
                    )
                    .with_objects([doorway.id.clone(), room.id.clone()]),
                );
            }
        }

        results
    }
}

/// Flags tile grids whose extents no longer match their area's size
pub struct TileGridRule;

impl Rule for TileGridRule {
    fn code(&self) -> &'static str {
        codes::TILE_GRID_SHAPE
    }

    fn check(&self, parcour: &Parcour) -> Vec<ValidationResult> {
        let mut results = Vec::new();

        for room in parcour.rooms() {
            let expected_w = room.size.x.max(0.0) as usize;
            let expected_d = room.size.z.max(0.0) as usize;

            if room.tiles.width() != expected_w || room.tiles.depth() != expected_d {
                results.push(
                    ValidationResult::warning(
                        codes::TILE_GRID_SHAPE,
                        format!(
                            "Area '{}' tile grid is {}x{} but its size implies {}x{}",
                            room.id,
                            room.tiles.width(),
                            room.tiles.depth(),
                            expected_w,
                            expected_d
                        ),
                    )
                    .with_objects([room.id.clone()]),
                );
            }
        }

        results
    }
}

/// The set of rules run against a candidate document
pub struct RuleRegistry {
    rules: Vec<Box<dyn Rule>>,
}

impl RuleRegistry {
    pub fn empty() -> Self {
        Self { rules: Vec::new() }
    }

    pub fn add(mut self, rule: impl Rule + 'static) -> Self {
        self.rules.push(Box::new(rule));
        self
    }

    pub fn rules(&self) -> &[Box<dyn Rule>] {
        &self.rules
    }
}

impl Default for RuleRegistry {
    fn default() -> Self {
        Self::empty()
            .add(AreaCollisionRule)
            .add(LocationPlacementRule)
            .add(DanglingAreaIdRule)
            .add(DoorwayPlacementRule::default())
            .add(TileGridRule)
    }
}
