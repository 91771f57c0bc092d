//! # Parcour Model
//!
//! Document model for parcour levels.
//!
//! A parcour is a flat collection of [`ParcourObject`]s: areas (rooms) and
//! the elements placed relative to them (doorways, start/end markers,
//! static and dynamic props). Objects carry stable string ids; elements
//! reference their owning area through a plain `area_id` foreign key that
//! is resolved through the document, never through an owning pointer.
//!
//! Serialization is polymorphic: every object serializes with a `$type`
//! discriminant and round-trips losslessly through JSON. The same payload
//! format is used for saved documents, the clipboard, and the editor's
//! delete/add undo mementos.

mod errors;
mod geom;
mod id_generator;
mod objects;
mod parcour;
mod tiles;

pub use errors::ModelError;
pub use geom::{Box3, WallSegment};
pub use id_generator::{parcour_seed, IdGenerator};
pub use objects::{
    Doorway, DynamicObject, Location, LocationKind, ParcourObject, RoomArea, Shape, StaticObject,
};
pub use parcour::Parcour;
pub use tiles::{TileGrid, TileType};
