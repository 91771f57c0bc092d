//! # Undo/Redo Stack
//!
//! Tracks committed edit steps together with their mementos.
//!
//! ## Design
//!
//! - Applying a step yields a memento; the stack stores step + memento
//! - Undo hands the memento back to the step's `undo` and moves the entry
//!   to the redo side
//! - Redo re-invokes `apply`, storing the fresh memento
//! - A new committed step clears the redo side
//!
//! The stack never validates: the orchestrator only pushes steps that
//! already survived validation, so undo/redo replays are trusted.

use crate::{EditStep, StepData, StepError};
use parcour_model::Parcour;

/// A committed step with the memento its `apply` produced
#[derive(Debug, Clone)]
pub struct StackEntry {
    pub step: EditStep,
    pub data: StepData,
    /// Optional label for undo/redo menus
    pub description: Option<String>,
}

/// Undo/redo stack for a parcour document
#[derive(Debug)]
pub struct UndoStack {
    undo_stack: Vec<StackEntry>,
    redo_stack: Vec<StackEntry>,
    /// Maximum number of undo levels (0 = unlimited)
    max_levels: usize,
}

impl UndoStack {
    /// New stack with the default depth (100)
    pub fn new() -> Self {
        Self::with_max_levels(100)
    }

    pub fn with_max_levels(max_levels: usize) -> Self {
        Self {
            undo_stack: Vec::new(),
            redo_stack: Vec::new(),
            max_levels,
        }
    }

    /// Record a committed step. Clears the redo side.
    pub fn push(&mut self, entry: StackEntry) {
        self.undo_stack.push(entry);

        if self.max_levels > 0 && self.undo_stack.len() > self.max_levels {
            self.undo_stack.remove(0);
        }

        self.redo_stack.clear();
    }

    /// Undo the most recent step. Returns the dirty ids of the restore,
    /// or None when there is nothing to undo.
    pub fn undo(&mut self, parcour: &mut Parcour) -> Result<Option<Vec<String>>, StepError> {
        let Some(entry) = self.undo_stack.pop() else {
            return Ok(None);
        };

        let dirty_ids = entry.step.undo(parcour, entry.data.clone())?;
        tracing::debug!(step = entry.step.name(), "undo");
        self.redo_stack.push(entry);

        Ok(Some(dirty_ids))
    }

    /// Redo the most recently undone step by re-applying it.
    pub fn redo(&mut self, parcour: &mut Parcour) -> Result<Option<Vec<String>>, StepError> {
        let Some(mut entry) = self.redo_stack.pop() else {
            return Ok(None);
        };

        let result = entry.step.apply(parcour)?;
        tracing::debug!(step = entry.step.name(), "redo");
        entry.data = result.data;
        self.undo_stack.push(entry);

        Ok(Some(result.dirty_ids))
    }

    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    pub fn undo_levels(&self) -> usize {
        self.undo_stack.len()
    }

    pub fn redo_levels(&self) -> usize {
        self.redo_stack.len()
    }

    pub fn clear(&mut self) {
        self.undo_stack.clear();
        self.redo_stack.clear();
    }

    /// Label of the next undo operation
    pub fn undo_description(&self) -> Option<&str> {
        self.undo_stack
            .last()
            .and_then(|entry| entry.description.as_deref())
    }

    /// Label of the next redo operation
    pub fn redo_description(&self) -> Option<&str> {
        self.redo_stack
            .last()
            .and_then(|entry| entry.description.as_deref())
    }
}

impl Default for UndoStack {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Property;
    use glam::Vec3;
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

    fn rename(name: &str) -> EditStep {
        EditStep::SetProperty {
            ids: vec!["r-1".into()],
            value: Property::Name(name.into()),
        }
    }

    fn commit(stack: &mut UndoStack, parcour: &mut Parcour, step: EditStep) {
        let result = step.apply(parcour).unwrap();
        stack.push(StackEntry {
            step,
            data: result.data,
            description: None,
        });
    }

    #[test]
    fn test_empty_stack() {
        let stack = UndoStack::new();
        assert!(!stack.can_undo());
        assert!(!stack.can_redo());
    }

    #[test]
    fn test_undo_redo_cycle() {
        let mut parcour = sample();
        let mut stack = UndoStack::new();

        commit(&mut stack, &mut parcour, rename("alpha"));
        assert_eq!(parcour.object("r-1").unwrap().name(), "alpha");
        assert_eq!(stack.undo_levels(), 1);

        let dirty = stack.undo(&mut parcour).unwrap().unwrap();
        assert_eq!(dirty, vec!["r-1".to_string()]);
        assert_eq!(parcour.object("r-1").unwrap().name(), "");
        assert_eq!(stack.redo_levels(), 1);

        stack.redo(&mut parcour).unwrap().unwrap();
        assert_eq!(parcour.object("r-1").unwrap().name(), "alpha");
        assert_eq!(stack.undo_levels(), 1);
        assert_eq!(stack.redo_levels(), 0);
    }

    #[test]
    fn test_undo_on_empty_stack_is_none() {
        let mut parcour = sample();
        let mut stack = UndoStack::new();
        assert!(stack.undo(&mut parcour).unwrap().is_none());
    }

    #[test]
    fn test_new_step_clears_redo() {
        let mut parcour = sample();
        let mut stack = UndoStack::new();

        commit(&mut stack, &mut parcour, rename("alpha"));
        stack.undo(&mut parcour).unwrap();
        assert_eq!(stack.redo_levels(), 1);

        commit(&mut stack, &mut parcour, rename("beta"));
        assert_eq!(stack.redo_levels(), 0);
    }

    #[test]
    fn test_max_levels_enforced() {
        let mut parcour = sample();
        let mut stack = UndoStack::with_max_levels(2);

        for name in ["a", "b", "c"] {
            commit(&mut stack, &mut parcour, rename(name));
        }
        assert_eq!(stack.undo_levels(), 2);
    }

    #[test]
    fn test_descriptions() {
        let mut parcour = sample();
        let mut stack = UndoStack::new();

        let step = rename("alpha");
        let result = step.apply(&mut parcour).unwrap();
        stack.push(StackEntry {
            step,
            data: result.data,
            description: Some("Rename room".into()),
        });

        assert_eq!(stack.undo_description(), Some("Rename room"));
        stack.undo(&mut parcour).unwrap();
        assert_eq!(stack.redo_description(), Some("Rename room"));
    }
}
