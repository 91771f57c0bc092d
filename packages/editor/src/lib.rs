//! # Parcour Editor
//!
//! Edit/undo core for parcour documents.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │ tool / UI (out of scope)                    │
//! │  proposes a spatial change                  │
//! └─────────────────────────────────────────────┘
//!                     ↓
//! ┌─────────────────────────────────────────────┐
//! │ constraints: snap / legalize the proposal   │
//! └─────────────────────────────────────────────┘
//!                     ↓
//! ┌─────────────────────────────────────────────┐
//! │ editor: build EditStep → apply → validate   │
//! │  - Error findings ⇒ roll back via memento   │
//! │  - otherwise push onto the undo stack       │
//! │  - dirty ids drive incremental refresh      │
//! └─────────────────────────────────────────────┘
//! ```
//!
//! Every mutation of the document is an [`EditStep`]. Applying a step
//! yields a [`StepResult`] with the dirty object ids and an opaque
//! [`StepData`] memento; handing the memento back to the step's `undo`
//! restores the document exactly.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use parcour_editor::{Editor, EditorOptions, EditStep};
//!
//! let mut editor = Editor::new(parcour, EditorOptions::default());
//!
//! let outcome = editor.commit(EditStep::AddObject { object })?;
//! editor.undo()?;
//! editor.redo()?;
//! ```

mod clipboard;
mod config;
mod constraints;
mod drag;
mod editor;
mod errors;
mod properties;
mod steps;
mod undo_stack;

pub use clipboard::{Clipboard, MemoryClipboard};
pub use config::EditorOptions;
pub use constraints::{
    DoorwayPlacement, LocationConstraints, MarkerPlacement, MoveConstraints, RotateConstraints,
};
pub use drag::{DragState, MoveDrag};
pub use editor::{CommitOutcome, Editor};
pub use errors::{EditorError, StepError};
pub use properties::Property;
pub use steps::{EditStep, StepData, StepResult};
pub use undo_stack::{StackEntry, UndoStack};

// Re-export the model types editor callers always need
pub use parcour_model::{Parcour, ParcourObject};
