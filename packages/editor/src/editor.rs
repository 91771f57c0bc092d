//! Editor orchestrator
//!
//! Owns the document, the undo/redo stack, and the selection; every
//! mutation funnels through [`Editor::commit`], which applies a step,
//! validates the candidate document, and either keeps the step (pushing
//! it onto the undo stack) or rolls it back via its own memento.
//!
//! The document has exactly one writer: all calls here are synchronous
//! and at most one step is in flight at a time.

use crate::{
    Clipboard, EditStep, EditorError, EditorOptions, StackEntry, UndoStack,
};
use parcour_model::{IdGenerator, Parcour, ParcourObject};
use parcour_validate::{has_errors, validate_parcour, ValidateOptions, ValidationResult};

/// What became of a committed step
#[derive(Debug)]
pub enum CommitOutcome {
    /// The step was applied and pushed onto the undo stack
    Committed {
        dirty_ids: Vec<String>,
        /// Non-blocking findings (warnings, information)
        results: Vec<ValidationResult>,
    },
    /// Validation produced Error findings; the step was rolled back and
    /// the document is unchanged
    Rejected { results: Vec<ValidationResult> },
}

impl CommitOutcome {
    pub fn is_committed(&self) -> bool {
        matches!(self, CommitOutcome::Committed { .. })
    }
}

pub struct Editor {
    parcour: Parcour,
    undo_stack: UndoStack,
    selection: Vec<String>,
    options: EditorOptions,
    ids: IdGenerator,
}

impl Editor {
    pub fn new(parcour: Parcour, options: EditorOptions) -> Self {
        let mut ids = IdGenerator::new(&parcour.name);
        ids.skip_past(parcour.objects().iter().map(|o| o.id()));

        Self {
            undo_stack: UndoStack::with_max_levels(options.undo_levels),
            selection: Vec::new(),
            ids,
            options,
            parcour,
        }
    }

    pub fn parcour(&self) -> &Parcour {
        &self.parcour
    }

    pub fn options(&self) -> &EditorOptions {
        &self.options
    }

    /// Generate a fresh object id for this document
    pub fn new_id(&mut self) -> String {
        self.ids.new_id()
    }

    /// Apply a step, validate the result, and commit or roll back.
    ///
    /// Apply failures (invalid argument, missing target) propagate as
    /// errors and leave the document untouched; validation rejection is a
    /// normal outcome, not an error.
    pub fn commit(&mut self, step: EditStep) -> Result<CommitOutcome, EditorError> {
        self.commit_labeled(step, None)
    }

    pub fn commit_labeled(
        &mut self,
        step: EditStep,
        description: Option<String>,
    ) -> Result<CommitOutcome, EditorError> {
        let result = step.apply(&mut self.parcour)?;

        let findings = validate_parcour(&self.parcour, ValidateOptions::default());
        if has_errors(&findings) {
            tracing::warn!(step = step.name(), findings = findings.len(), "step rejected");
            step.undo(&mut self.parcour, result.data)?;
            return Ok(CommitOutcome::Rejected { results: findings });
        }

        tracing::debug!(step = step.name(), dirty = result.dirty_ids.len(), "step committed");
        self.undo_stack.push(StackEntry {
            step,
            data: result.data,
            description,
        });
        self.selection.retain(|id| self.parcour.contains(id));

        Ok(CommitOutcome::Committed {
            dirty_ids: result.dirty_ids,
            results: findings,
        })
    }

    /// Undo the most recent committed step; returns its dirty ids, or
    /// None when the stack is empty.
    pub fn undo(&mut self) -> Result<Option<Vec<String>>, EditorError> {
        let dirty = self.undo_stack.undo(&mut self.parcour)?;
        self.selection.retain(|id| self.parcour.contains(id));
        Ok(dirty)
    }

    /// Re-apply the most recently undone step
    pub fn redo(&mut self) -> Result<Option<Vec<String>>, EditorError> {
        let dirty = self.undo_stack.redo(&mut self.parcour)?;
        self.selection.retain(|id| self.parcour.contains(id));
        Ok(dirty)
    }

    pub fn can_undo(&self) -> bool {
        self.undo_stack.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.undo_stack.can_redo()
    }

    pub fn undo_stack(&self) -> &UndoStack {
        &self.undo_stack
    }

    // ── Selection ──────────────────────────────────────────────────────

    pub fn selection(&self) -> &[String] {
        &self.selection
    }

    pub fn select(&mut self, ids: Vec<String>) {
        self.selection = ids
            .into_iter()
            .filter(|id| self.parcour.contains(id))
            .collect();
    }

    pub fn toggle_select(&mut self, id: &str) {
        if let Some(pos) = self.selection.iter().position(|s| s == id) {
            self.selection.remove(pos);
        } else if self.parcour.contains(id) {
            self.selection.push(id.to_string());
        }
    }

    pub fn clear_selection(&mut self) {
        self.selection.clear();
    }

    // ── Deletion with cascade ──────────────────────────────────────────

    /// Expand a delete set with the elements of any deleted area, so a
    /// committed delete never strands an element with a dangling
    /// `area_id`.
    pub fn expand_delete_ids(&self, ids: &[String]) -> Vec<String> {
        let mut expanded: Vec<String> = ids.to_vec();
        for id in ids {
            if self.parcour.room(id).is_none() {
                continue;
            }
            for element in self.parcour.elements_of_area(id) {
                let element_id = element.id().to_string();
                if !expanded.contains(&element_id) {
                    expanded.push(element_id);
                }
            }
        }
        expanded
    }

    /// Delete objects by id, cascading to dependent area elements
    pub fn delete_objects(&mut self, ids: &[String]) -> Result<CommitOutcome, EditorError> {
        let expanded = self.expand_delete_ids(ids);
        self.commit_labeled(
            EditStep::Delete { ids: expanded },
            Some("Delete".to_string()),
        )
    }

    /// Delete the current selection, cascading
    pub fn delete_selection(&mut self) -> Result<CommitOutcome, EditorError> {
        if self.selection.is_empty() {
            return Err(EditorError::EmptySelection);
        }
        let ids = self.selection.clone();
        self.delete_objects(&ids)
    }

    // ── Clipboard ──────────────────────────────────────────────────────

    /// Write the selected objects to the clipboard as a JSON array of
    /// their record forms. Returns how many objects were copied.
    pub fn copy_selection(&self, clipboard: &mut dyn Clipboard) -> Result<usize, EditorError> {
        if self.selection.is_empty() {
            return Err(EditorError::EmptySelection);
        }

        let mut records = Vec::with_capacity(self.selection.len());
        for id in &self.selection {
            if let Some(object) = self.parcour.object(id) {
                records.push(object.to_value()?);
            }
        }

        clipboard.set(serde_json::to_string(&records)?);
        Ok(records.len())
    }

    /// Parse the clipboard payload and commit one composed add step.
    ///
    /// Pasted objects get fresh ids; `area_id` references between pasted
    /// objects are remapped, references to areas that were not part of
    /// the payload are kept as-is.
    pub fn paste(&mut self, clipboard: &dyn Clipboard) -> Result<CommitOutcome, EditorError> {
        let payload = clipboard.get().ok_or(EditorError::EmptyClipboard)?;
        let records: Vec<serde_json::Value> = serde_json::from_str(&payload)?;
        if records.is_empty() {
            return Err(EditorError::EmptyClipboard);
        }

        let mut objects = Vec::with_capacity(records.len());
        for record in records {
            objects.push(ParcourObject::from_value(record)?);
        }

        let id_map: Vec<(String, String)> = objects
            .iter()
            .map(|o| (o.id().to_string(), self.ids.new_id()))
            .collect();

        let mut steps = Vec::with_capacity(objects.len());
        for (mut object, (_, new_id)) in objects.into_iter().zip(&id_map) {
            object.set_id(new_id.clone());
            if let Some(area_id) = object.area_id() {
                if let Some((_, mapped)) = id_map.iter().find(|(old, _)| old == area_id) {
                    object.set_area_id(mapped.clone());
                }
            }
            steps.push(EditStep::AddObject { object });
        }

        let outcome = self.commit_labeled(EditStep::Composed { steps }, Some("Paste".into()))?;
        if let CommitOutcome::Committed { .. } = &outcome {
            self.selection = id_map.into_iter().map(|(_, new)| new).collect();
        }
        Ok(outcome)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{MemoryClipboard, Property};
    use glam::Vec3;
    use parcour_model::{Location, LocationKind, RoomArea};

    fn room(id: &str, origin: Vec3) -> ParcourObject {
        ParcourObject::RoomArea(RoomArea::new(id, origin, Vec3::new(4.0, 3.0, 4.0)))
    }

    fn marker(id: &str, area_id: &str) -> ParcourObject {
        ParcourObject::Location(Location {
            id: id.into(),
            area_id: area_id.into(),
            name: String::new(),
            location: Vec3::new(1.5, 0.0, 1.5),
            kind: LocationKind::Start,
        })
    }

    fn editor() -> Editor {
        let mut parcour = Parcour::new("test");
        parcour.add(room("r-1", Vec3::ZERO)).unwrap();
        parcour.add(marker("l-1", "r-1")).unwrap();
        Editor::new(parcour, EditorOptions::default())
    }

    #[test]
    fn test_commit_and_undo() {
        let mut editor = editor();

        let outcome = editor
            .commit(EditStep::SetProperty {
                ids: vec!["r-1".into()],
                value: Property::Name("lobby".into()),
            })
            .unwrap();
        assert!(outcome.is_committed());
        assert_eq!(editor.parcour().object("r-1").unwrap().name(), "lobby");

        editor.undo().unwrap().unwrap();
        assert_eq!(editor.parcour().object("r-1").unwrap().name(), "");

        editor.redo().unwrap().unwrap();
        assert_eq!(editor.parcour().object("r-1").unwrap().name(), "lobby");
    }

    #[test]
    fn test_colliding_add_is_rejected_and_rolled_back() {
        let mut editor = editor();

        let outcome = editor
            .commit(EditStep::AddObject {
                object: room("r-2", Vec3::new(2.0, 0.0, 2.0)),
            })
            .unwrap();

        let CommitOutcome::Rejected { results } = outcome else {
            panic!("overlapping room should be rejected");
        };
        assert!(results.iter().any(|r| r.code == "area-collision"));
        // Rolled back: the document is unchanged and nothing was pushed
        assert!(!editor.parcour().contains("r-2"));
        assert!(!editor.can_undo());
    }

    #[test]
    fn test_selection_pruned_by_delete() {
        let mut editor = editor();
        editor.select(vec!["l-1".into()]);

        editor.delete_objects(&["l-1".into()]).unwrap();
        assert!(editor.selection().is_empty());

        // Undo restores the object but not the stale selection
        editor.undo().unwrap();
        assert!(editor.parcour().contains("l-1"));
        assert!(editor.selection().is_empty());
    }

    #[test]
    fn test_cascading_delete_expands_to_elements() {
        let editor = editor();
        let expanded = editor.expand_delete_ids(&["r-1".into()]);
        assert_eq!(expanded, vec!["r-1".to_string(), "l-1".to_string()]);
    }

    #[test]
    fn test_copy_paste_remaps_ids() {
        let mut editor = editor();
        let mut clipboard = MemoryClipboard::new();

        editor.select(vec!["r-1".into(), "l-1".into()]);
        assert_eq!(editor.copy_selection(&mut clipboard).unwrap(), 2);

        // Move the original room out of the way so the paste doesn't
        // collide; its marker rides along since element locations are
        // area-local
        editor
            .commit(EditStep::SetProperty {
                ids: vec!["r-1".into()],
                value: Property::Location(Vec3::new(20.0, 0.0, 0.0)),
            })
            .unwrap();

        let outcome = editor.paste(&clipboard).unwrap();
        assert!(outcome.is_committed());
        assert_eq!(editor.parcour().len(), 4);

        // The pasted marker references the pasted room, not the original
        let pasted_marker = editor
            .parcour()
            .objects()
            .iter()
            .find(|o| o.id() != "l-1" && !o.is_area() && o.area_id().is_some())
            .unwrap();
        let pasted_area_id = pasted_marker.area_id().unwrap();
        assert_ne!(pasted_area_id, "r-1");
        assert!(editor.parcour().room(pasted_area_id).is_some());

        // Paste selects the new objects
        assert_eq!(editor.selection().len(), 2);
    }

    #[test]
    fn test_paste_empty_clipboard_fails() {
        let mut editor = editor();
        let clipboard = MemoryClipboard::new();
        assert!(matches!(
            editor.paste(&clipboard),
            Err(EditorError::EmptyClipboard)
        ));
    }
}
