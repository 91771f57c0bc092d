//! Interactive drag session
//!
//! The pointer loop that tools drive: `Idle → begin → Dragging →
//! update* → commit → Idle`, emitting exactly one edit step on commit,
//! or `cancel → Idle` emitting none. Constraints run on every update so
//! the accumulated movement is always legal; nothing touches the document
//! until the emitted step is committed by the editor.

use crate::{EditStep, MoveConstraints, Property, StepError};
use glam::Vec3;
use parcour_model::Parcour;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragState {
    Idle,
    Dragging,
}

/// Accumulates a constrained movement of one or more objects
#[derive(Debug)]
pub struct MoveDrag {
    /// Target ids with their locations at drag start
    targets: Vec<(String, Vec3)>,
    constraints: MoveConstraints,
    accumulated: Vec3,
    state: DragState,
}

impl MoveDrag {
    /// Start a drag on pointer-down. Captures the targets' current
    /// locations; every id must resolve.
    pub fn begin(
        parcour: &Parcour,
        ids: &[String],
        constraints: MoveConstraints,
    ) -> Result<Self, StepError> {
        if ids.is_empty() {
            return Err(StepError::InvalidArgument("empty target-id list".into()));
        }

        let mut targets = Vec::with_capacity(ids.len());
        for id in ids {
            let object = parcour
                .object(id)
                .ok_or_else(|| StepError::ObjectNotFound(id.clone()))?;
            targets.push((id.clone(), object.location()));
        }

        Ok(Self {
            targets,
            constraints,
            accumulated: Vec3::ZERO,
            state: DragState::Dragging,
        })
    }

    pub fn state(&self) -> DragState {
        self.state
    }

    /// Accumulate a pointer-move delta; returns the constrained total
    /// movement so callers can preview it.
    pub fn update(&mut self, delta: Vec3) -> Vec3 {
        self.accumulated += delta;
        self.constrained()
    }

    fn constrained(&self) -> Vec3 {
        let mut movement = self.accumulated;
        self.constraints.apply(&mut movement);
        movement
    }

    /// Pointer-up: emit the step for the whole drag, or None when the
    /// constrained movement came out as zero.
    pub fn commit(mut self) -> Option<EditStep> {
        self.state = DragState::Idle;
        let movement = self.constrained();
        if movement == Vec3::ZERO {
            return None;
        }

        let steps = self
            .targets
            .into_iter()
            .map(|(id, start)| EditStep::SetProperty {
                ids: vec![id],
                value: Property::Location(start + movement),
            })
            .collect();

        Some(EditStep::Composed { steps })
    }

    /// Abort the drag; accumulated state is discarded and no step is
    /// emitted.
    pub fn cancel(mut self) {
        self.state = DragState::Idle;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use parcour_model::{ParcourObject, RoomArea};

    fn sample() -> Parcour {
        let mut parcour = Parcour::new("test");
        parcour
            .add(ParcourObject::RoomArea(RoomArea::new(
                "r-1",
                Vec3::ZERO,
                Vec3::new(4.0, 3.0, 4.0),
            )))
            .unwrap();
        parcour
    }

    fn half_grid() -> MoveConstraints {
        MoveConstraints::new(Vec3::new(0.5, 0.0, 0.5))
    }

    #[test]
    fn test_drag_commit_emits_one_step() {
        let mut parcour = sample();
        let mut drag = MoveDrag::begin(&parcour, &["r-1".into()], half_grid()).unwrap();
        assert_eq!(drag.state(), DragState::Dragging);

        drag.update(Vec3::new(0.3, 1.0, 0.0));
        let preview = drag.update(Vec3::new(0.43, 0.0, 0.0));
        assert_eq!(preview, Vec3::new(0.5, 0.0, 0.0));

        let step = drag.commit().unwrap();
        step.apply(&mut parcour).unwrap();
        assert_eq!(
            parcour.object("r-1").unwrap().location(),
            Vec3::new(0.5, 0.0, 0.0)
        );
    }

    #[test]
    fn test_drag_below_grid_threshold_emits_nothing() {
        let parcour = sample();
        let mut drag = MoveDrag::begin(&parcour, &["r-1".into()], half_grid()).unwrap();
        drag.update(Vec3::new(0.1, 0.0, 0.1));
        assert!(drag.commit().is_none());
    }

    #[test]
    fn test_drag_cancel_discards() {
        let parcour = sample();
        let mut drag = MoveDrag::begin(&parcour, &["r-1".into()], half_grid()).unwrap();
        drag.update(Vec3::new(5.0, 0.0, 5.0));
        drag.cancel();
        // Nothing observed the drag; the document was never touched
        assert_eq!(parcour.object("r-1").unwrap().location(), Vec3::ZERO);
    }

    #[test]
    fn test_drag_on_missing_target_fails() {
        let parcour = sample();
        assert!(MoveDrag::begin(&parcour, &["ghost".into()], half_grid()).is_err());
    }
}
