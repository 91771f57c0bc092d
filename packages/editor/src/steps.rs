//! Edit steps
//!
//! A step is a unit of reversible document mutation. `apply` mutates the
//! parcour and returns the dirty object ids plus a memento; `undo` consumes
//! that memento to restore the prior state. Steps are plain data and
//! serialize, so a committed step can be persisted or shipped across a
//! message channel together with its memento.
//!
//! Failure discipline: a step either applies completely or leaves the
//! document untouched. Referential failures (a target id that doesn't
//! resolve) are checked before any mutation happens.

use crate::{Property, StepError};
use glam::{Quat, Vec3};
use parcour_model::{Parcour, ParcourObject, TileType};
use serde::{Deserialize, Serialize};

/// A reversible unit of document mutation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum EditStep {
    /// Construct an object from its record form and append it
    AddObject { object: ParcourObject },

    /// Remove one or more objects by id; all ids must resolve
    Delete { ids: Vec<String> },

    /// Add a delta to each target area's size.
    /// Non-area targets are skipped with an empty memento slot.
    Resize { ids: Vec<String>, delta: Vec3 },

    /// Premultiply each target body's rotation.
    /// Targets without a rotation are skipped with an empty memento slot.
    Rotate { ids: Vec<String>, rotation: Quat },

    /// Assign a typed property on each target.
    /// Targets without the property are skipped with an empty memento slot.
    SetProperty { ids: Vec<String>, value: Property },

    /// Set the tile type at the given cells of one room area
    SetTileType {
        area_id: String,
        cells: Vec<(i32, i32)>,
        tile: TileType,
    },

    /// Run sub-steps in order; the memento collects theirs positionally
    Composed { steps: Vec<EditStep> },
}

/// Memento produced by `apply`, consumed verbatim by `undo`.
///
/// Opaque to callers: the orchestrator stores it next to the step on the
/// undo stack and never inspects it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum StepData {
    AddedObject { id: String },
    RemovedObjects { objects: Vec<ParcourObject> },
    PriorSizes { sizes: Vec<Option<Vec3>> },
    PriorRotations { rotations: Vec<Option<Quat>> },
    PriorProperties { values: Vec<Option<Property>> },
    PriorTiles { tiles: Vec<TileType> },
    Aggregate { parts: Vec<StepData> },
}

/// Outcome of applying a step
#[derive(Debug, Clone, PartialEq)]
pub struct StepResult {
    /// Objects whose visual/derived state must be refreshed
    pub dirty_ids: Vec<String>,
    /// What the matching `undo` needs
    pub data: StepData,
}

impl EditStep {
    /// Apply the mutation, returning dirty ids and the undo memento
    pub fn apply(&self, parcour: &mut Parcour) -> Result<StepResult, StepError> {
        match self {
            EditStep::AddObject { object } => {
                parcour.add(object.clone())?;
                Ok(StepResult {
                    dirty_ids: vec![object.id().to_string()],
                    data: StepData::AddedObject {
                        id: object.id().to_string(),
                    },
                })
            }

            EditStep::Delete { ids } => {
                require_targets(ids)?;
                // All ids must resolve before anything is removed
                for id in ids {
                    if !parcour.contains(id) {
                        return Err(StepError::ObjectNotFound(id.clone()));
                    }
                }

                let mut objects = Vec::with_capacity(ids.len());
                for id in ids {
                    objects.push(parcour.remove(id)?);
                }

                Ok(StepResult {
                    dirty_ids: ids.clone(),
                    data: StepData::RemovedObjects { objects },
                })
            }

            EditStep::Resize { ids, delta } => {
                require_targets(ids)?;
                resolve_all(parcour, ids)?;

                let mut sizes = Vec::with_capacity(ids.len());
                let mut dirty_ids = Vec::new();
                for id in ids {
                    match parcour.room_mut(id) {
                        Some(room) => {
                            sizes.push(Some(room.size));
                            room.size += *delta;
                            dirty_ids.push(id.clone());
                        }
                        None => sizes.push(None),
                    }
                }

                Ok(StepResult {
                    dirty_ids,
                    data: StepData::PriorSizes { sizes },
                })
            }

            EditStep::Rotate { ids, rotation } => {
                require_targets(ids)?;
                resolve_all(parcour, ids)?;

                let mut rotations = Vec::with_capacity(ids.len());
                let mut dirty_ids = Vec::new();
                for id in ids {
                    let object = parcour
                        .object_mut(id)
                        .ok_or_else(|| StepError::ObjectNotFound(id.clone()))?;
                    match object.rotation() {
                        Some(prior) => {
                            object.set_rotation(*rotation * prior);
                            rotations.push(Some(prior));
                            dirty_ids.push(id.clone());
                        }
                        None => rotations.push(None),
                    }
                }

                Ok(StepResult {
                    dirty_ids,
                    data: StepData::PriorRotations { rotations },
                })
            }

            EditStep::SetProperty { ids, value } => {
                require_targets(ids)?;
                resolve_all(parcour, ids)?;

                let mut values = Vec::with_capacity(ids.len());
                let mut dirty_ids = Vec::new();
                for id in ids {
                    let object = parcour
                        .object_mut(id)
                        .ok_or_else(|| StepError::ObjectNotFound(id.clone()))?;
                    match value.read(object) {
                        Some(prior) => {
                            value.write(object);
                            values.push(Some(prior));
                            dirty_ids.push(id.clone());
                        }
                        None => values.push(None),
                    }
                }

                Ok(StepResult {
                    dirty_ids,
                    data: StepData::PriorProperties { values },
                })
            }

            EditStep::SetTileType {
                area_id,
                cells,
                tile,
            } => {
                if cells.is_empty() {
                    return Err(StepError::InvalidArgument("empty cell list".into()));
                }
                let room = parcour
                    .room_mut(area_id)
                    .ok_or_else(|| StepError::AreaNotFound(area_id.clone()))?;
                for (x, y) in cells {
                    if !room.tiles.contains(*x, *y) {
                        return Err(StepError::InvalidArgument(format!(
                            "tile ({}, {}) outside area '{}'",
                            x, y, area_id
                        )));
                    }
                }

                let mut tiles = Vec::with_capacity(cells.len());
                for (x, y) in cells {
                    tiles.push(room.tiles.set_tile(*x, *y, *tile)?);
                }

                Ok(StepResult {
                    dirty_ids: vec![area_id.clone()],
                    data: StepData::PriorTiles { tiles },
                })
            }

            EditStep::Composed { steps } => {
                let mut dirty_ids = Vec::new();
                let mut parts = Vec::with_capacity(steps.len());

                for (i, step) in steps.iter().enumerate() {
                    match step.apply(parcour) {
                        Ok(result) => {
                            dirty_ids.extend(result.dirty_ids);
                            parts.push(result.data);
                        }
                        Err(err) => {
                            // Unwind the sub-steps that already ran so the
                            // document is left untouched
                            for (step, data) in steps[..i].iter().zip(parts).rev() {
                                if let Err(undo_err) = step.undo(parcour, data) {
                                    tracing::error!(
                                        error = %undo_err,
                                        "failed to unwind composed step"
                                    );
                                }
                            }
                            return Err(err);
                        }
                    }
                }

                Ok(StepResult {
                    dirty_ids,
                    data: StepData::Aggregate { parts },
                })
            }
        }
    }

    /// Reverse the mutation using the memento the matching `apply` produced.
    /// Returns the dirty ids of the restore.
    pub fn undo(&self, parcour: &mut Parcour, data: StepData) -> Result<Vec<String>, StepError> {
        match (self, data) {
            (EditStep::AddObject { .. }, StepData::AddedObject { id }) => {
                parcour.remove(&id)?;
                Ok(vec![id])
            }

            (EditStep::Delete { ids }, StepData::RemovedObjects { objects }) => {
                if objects.len() != ids.len() {
                    return Err(StepError::MementoMismatch);
                }
                for object in objects {
                    parcour.add(object)?;
                }
                Ok(ids.clone())
            }

            (EditStep::Resize { ids, .. }, StepData::PriorSizes { sizes }) => {
                if sizes.len() != ids.len() {
                    return Err(StepError::MementoMismatch);
                }
                let mut dirty_ids = Vec::new();
                for (id, prior) in ids.iter().zip(sizes) {
                    let Some(size) = prior else { continue };
                    let room = parcour
                        .room_mut(id)
                        .ok_or_else(|| StepError::ObjectNotFound(id.clone()))?;
                    room.size = size;
                    dirty_ids.push(id.clone());
                }
                Ok(dirty_ids)
            }

            (EditStep::Rotate { ids, .. }, StepData::PriorRotations { rotations }) => {
                if rotations.len() != ids.len() {
                    return Err(StepError::MementoMismatch);
                }
                let mut dirty_ids = Vec::new();
                for (id, prior) in ids.iter().zip(rotations) {
                    let Some(rotation) = prior else { continue };
                    let object = parcour
                        .object_mut(id)
                        .ok_or_else(|| StepError::ObjectNotFound(id.clone()))?;
                    object.set_rotation(rotation);
                    dirty_ids.push(id.clone());
                }
                Ok(dirty_ids)
            }

            (EditStep::SetProperty { ids, .. }, StepData::PriorProperties { values }) => {
                if values.len() != ids.len() {
                    return Err(StepError::MementoMismatch);
                }
                let mut dirty_ids = Vec::new();
                for (id, prior) in ids.iter().zip(values) {
                    let Some(value) = prior else { continue };
                    let object = parcour
                        .object_mut(id)
                        .ok_or_else(|| StepError::ObjectNotFound(id.clone()))?;
                    value.write(object);
                    dirty_ids.push(id.clone());
                }
                Ok(dirty_ids)
            }

            (
                EditStep::SetTileType { area_id, cells, .. },
                StepData::PriorTiles { tiles },
            ) => {
                if tiles.len() != cells.len() {
                    return Err(StepError::MementoMismatch);
                }
                let room = parcour
                    .room_mut(area_id)
                    .ok_or_else(|| StepError::AreaNotFound(area_id.clone()))?;
                for ((x, y), tile) in cells.iter().zip(tiles) {
                    room.tiles.set_tile(*x, *y, tile)?;
                }
                Ok(vec![area_id.clone()])
            }

            (EditStep::Composed { steps }, StepData::Aggregate { parts }) => {
                if parts.len() != steps.len() {
                    return Err(StepError::MementoMismatch);
                }
                // Sub-mementos replay in the same order as the original
                // sub-steps; each undo is paired positionally with its own
                // apply's memento.
                let mut dirty_ids = Vec::new();
                for (step, data) in steps.iter().zip(parts) {
                    dirty_ids.extend(step.undo(parcour, data)?);
                }
                Ok(dirty_ids)
            }

            _ => Err(StepError::MementoMismatch),
        }
    }

    /// Short operation name for logs and undo menu labels
    pub fn name(&self) -> &'static str {
        match self {
            EditStep::AddObject { .. } => "add-object",
            EditStep::Delete { .. } => "delete",
            EditStep::Resize { .. } => "resize",
            EditStep::Rotate { .. } => "rotate",
            EditStep::SetProperty { .. } => "set-property",
            EditStep::SetTileType { .. } => "set-tile-type",
            EditStep::Composed { .. } => "composed",
        }
    }
}

fn require_targets(ids: &[String]) -> Result<(), StepError> {
    if ids.is_empty() {
        return Err(StepError::InvalidArgument("empty target-id list".into()));
    }
    Ok(())
}

fn resolve_all(parcour: &Parcour, ids: &[String]) -> Result<(), StepError> {
    for id in ids {
        if !parcour.contains(id) {
            return Err(StepError::ObjectNotFound(id.clone()));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use parcour_model::{Location, LocationKind, RoomArea, Shape, StaticObject};

    fn room(id: &str, origin: Vec3) -> ParcourObject {
        ParcourObject::RoomArea(RoomArea::new(id, origin, Vec3::new(4.0, 3.0, 4.0)))
    }

    fn marker(id: &str, area_id: &str) -> ParcourObject {
        ParcourObject::Location(Location {
            id: id.into(),
            area_id: area_id.into(),
            name: String::new(),
            location: Vec3::new(1.0, 0.0, 1.0),
            kind: LocationKind::Start,
        })
    }

    fn prop(id: &str, area_id: &str) -> ParcourObject {
        ParcourObject::StaticObject(StaticObject {
            id: id.into(),
            area_id: area_id.into(),
            name: String::new(),
            location: Vec3::new(2.0, 0.0, 2.0),
            rotation: Quat::IDENTITY,
            shape: Shape::Box,
            size: Vec3::ONE,
        })
    }

    fn sample() -> Parcour {
        let mut parcour = Parcour::new("test");
        parcour.add(room("r-1", Vec3::ZERO)).unwrap();
        parcour.add(marker("l-1", "r-1")).unwrap();
        parcour.add(prop("s-1", "r-1")).unwrap();
        parcour
    }

    /// Applies a step, asserts it reports the expected dirty ids, undoes
    /// it, and asserts the document is observably unchanged.
    fn assert_inverse_law(step: EditStep, parcour: &mut Parcour) {
        let before = parcour.clone();
        let result = step.apply(parcour).unwrap();
        step.undo(parcour, result.data).unwrap();
        assert_eq!(*parcour, before);
    }

    #[test]
    fn test_add_object_inverse() {
        let mut parcour = sample();
        assert_inverse_law(
            EditStep::AddObject {
                object: room("r-2", Vec3::new(10.0, 0.0, 0.0)),
            },
            &mut parcour,
        );
        assert!(!parcour.contains("r-2"));
    }

    #[test]
    fn test_add_duplicate_id_fails() {
        let mut parcour = sample();
        let step = EditStep::AddObject {
            object: room("r-1", Vec3::ZERO),
        };
        assert!(step.apply(&mut parcour).is_err());
    }

    #[test]
    fn test_delete_inverse() {
        let mut parcour = sample();
        assert_inverse_law(
            EditStep::Delete {
                ids: vec!["l-1".into(), "s-1".into()],
            },
            &mut parcour,
        );
        assert!(parcour.contains("l-1"));
        assert!(parcour.contains("s-1"));
    }

    #[test]
    fn test_delete_memento_preserves_removal_order() {
        let mut parcour = sample();
        let step = EditStep::Delete {
            ids: vec!["s-1".into(), "l-1".into()],
        };
        let result = step.apply(&mut parcour).unwrap();

        let StepData::RemovedObjects { objects } = &result.data else {
            panic!("wrong memento shape");
        };
        assert_eq!(objects[0].id(), "s-1");
        assert_eq!(objects[1].id(), "l-1");
    }

    #[test]
    fn test_delete_missing_id_is_fatal_and_partial_free() {
        let mut parcour = sample();
        let step = EditStep::Delete {
            ids: vec!["l-1".into(), "ghost".into()],
        };

        let err = step.apply(&mut parcour).unwrap_err();
        assert!(matches!(err, StepError::ObjectNotFound(id) if id == "ghost"));
        // No partial deletion: l-1 survived
        assert!(parcour.contains("l-1"));
    }

    #[test]
    fn test_empty_target_list_is_invalid() {
        let mut parcour = sample();
        let step = EditStep::Delete { ids: vec![] };
        assert!(matches!(
            step.apply(&mut parcour),
            Err(StepError::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_resize_inverse_and_skips_non_areas() {
        let mut parcour = sample();
        let step = EditStep::Resize {
            ids: vec!["r-1".into(), "l-1".into()],
            delta: Vec3::new(2.0, 0.0, 1.0),
        };

        let result = step.apply(&mut parcour).unwrap();
        assert_eq!(parcour.room("r-1").unwrap().size, Vec3::new(6.0, 3.0, 5.0));
        // Only the area is dirty; the marker slot is an empty placeholder
        assert_eq!(result.dirty_ids, vec!["r-1".to_string()]);
        assert_eq!(
            result.data,
            StepData::PriorSizes {
                sizes: vec![Some(Vec3::new(4.0, 3.0, 4.0)), None],
            }
        );

        step.undo(&mut parcour, result.data).unwrap();
        assert_eq!(parcour.room("r-1").unwrap().size, Vec3::new(4.0, 3.0, 4.0));
    }

    #[test]
    fn test_resize_missing_target_is_fatal() {
        let mut parcour = sample();
        let step = EditStep::Resize {
            ids: vec!["r-1".into(), "ghost".into()],
            delta: Vec3::ONE,
        };
        assert!(step.apply(&mut parcour).is_err());
        // Pre-check means r-1 was never touched
        assert_eq!(parcour.room("r-1").unwrap().size, Vec3::new(4.0, 3.0, 4.0));
    }

    #[test]
    fn test_rotate_premultiplies_and_inverts() {
        let mut parcour = sample();
        let step = EditStep::Rotate {
            ids: vec!["s-1".into(), "r-1".into()],
            rotation: Quat::from_rotation_y(std::f32::consts::FRAC_PI_2),
        };

        let result = step.apply(&mut parcour).unwrap();
        let rotated = parcour.object("s-1").unwrap().rotation().unwrap();
        assert!(rotated.angle_between(Quat::IDENTITY) > 1.0);
        // The room has no rotation: skipped
        assert_eq!(result.dirty_ids, vec!["s-1".to_string()]);

        step.undo(&mut parcour, result.data).unwrap();
        let restored = parcour.object("s-1").unwrap().rotation().unwrap();
        assert!(restored.angle_between(Quat::IDENTITY) < 1e-5);
    }

    #[test]
    fn test_set_property_inverse() {
        let mut parcour = sample();
        assert_inverse_law(
            EditStep::SetProperty {
                ids: vec!["r-1".into(), "l-1".into()],
                value: Property::Name("renamed".into()),
            },
            &mut parcour,
        );
        assert_eq!(parcour.object("r-1").unwrap().name(), "");
    }

    #[test]
    fn test_set_property_skips_unsupported_targets() {
        let mut parcour = sample();
        let step = EditStep::SetProperty {
            ids: vec!["l-1".into(), "s-1".into()],
            value: Property::Kind(LocationKind::End),
        };

        let result = step.apply(&mut parcour).unwrap();
        assert_eq!(result.dirty_ids, vec!["l-1".to_string()]);
        let StepData::PriorProperties { values } = &result.data else {
            panic!("wrong memento shape");
        };
        assert!(values[0].is_some());
        assert!(values[1].is_none());
    }

    #[test]
    fn test_set_tile_type_inverse() {
        let mut parcour = sample();
        assert_inverse_law(
            EditStep::SetTileType {
                area_id: "r-1".into(),
                cells: vec![(0, 0), (1, 0), (1, 1)],
                tile: TileType::Hole,
            },
            &mut parcour,
        );
        assert!(parcour.room("r-1").unwrap().tiles.is_walkable(1, 1));
    }

    #[test]
    fn test_set_tile_type_out_of_bounds_is_atomic() {
        let mut parcour = sample();
        let step = EditStep::SetTileType {
            area_id: "r-1".into(),
            cells: vec![(0, 0), (99, 0)],
            tile: TileType::Hole,
        };

        assert!(step.apply(&mut parcour).is_err());
        // The in-bounds cell was not touched
        assert!(parcour.room("r-1").unwrap().tiles.is_walkable(0, 0));
    }

    #[test]
    fn test_composed_collects_mementos_in_order() {
        let mut parcour = sample();
        let step = EditStep::Composed {
            steps: vec![
                EditStep::SetProperty {
                    ids: vec!["r-1".into()],
                    value: Property::Name("a".into()),
                },
                EditStep::Resize {
                    ids: vec!["r-1".into()],
                    delta: Vec3::X,
                },
            ],
        };

        let before = parcour.clone();
        let result = step.apply(&mut parcour).unwrap();

        // Aggregate data is positional: [first step's data, second's]
        let StepData::Aggregate { parts } = &result.data else {
            panic!("wrong memento shape");
        };
        assert!(matches!(parts[0], StepData::PriorProperties { .. }));
        assert!(matches!(parts[1], StepData::PriorSizes { .. }));

        // Dirty ids concatenate, duplicates allowed
        assert_eq!(result.dirty_ids, vec!["r-1".to_string(), "r-1".to_string()]);

        step.undo(&mut parcour, result.data).unwrap();
        assert_eq!(parcour, before);
    }

    #[test]
    fn test_composed_unwinds_on_sub_failure() {
        let mut parcour = sample();
        let step = EditStep::Composed {
            steps: vec![
                EditStep::SetProperty {
                    ids: vec!["r-1".into()],
                    value: Property::Name("partial".into()),
                },
                EditStep::Delete {
                    ids: vec!["ghost".into()],
                },
            ],
        };

        let before = parcour.clone();
        assert!(step.apply(&mut parcour).is_err());
        assert_eq!(parcour, before);
    }

    #[test]
    fn test_undo_with_wrong_memento_shape_fails() {
        let mut parcour = sample();
        let step = EditStep::Delete {
            ids: vec!["l-1".into()],
        };
        let err = step
            .undo(&mut parcour, StepData::AddedObject { id: "l-1".into() })
            .unwrap_err();
        assert!(matches!(err, StepError::MementoMismatch));
    }

    #[test]
    fn test_undo_with_wrong_memento_length_fails() {
        let mut parcour = sample();
        let step = EditStep::Resize {
            ids: vec!["r-1".into()],
            delta: Vec3::X,
        };
        let err = step
            .undo(
                &mut parcour,
                StepData::PriorSizes {
                    sizes: vec![Some(Vec3::ONE), Some(Vec3::ONE)],
                },
            )
            .unwrap_err();
        assert!(matches!(err, StepError::MementoMismatch));
    }

    #[test]
    fn test_steps_serialize() {
        let step = EditStep::SetTileType {
            area_id: "r-1".into(),
            cells: vec![(0, 1)],
            tile: TileType::Hole,
        };
        let json = serde_json::to_string(&step).unwrap();
        let back: EditStep = serde_json::from_str(&json).unwrap();
        assert_eq!(step, back);
    }
}
