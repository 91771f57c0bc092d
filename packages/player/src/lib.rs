//! # Parcour Player
//!
//! Player-side runtime core: turns a parcour document into the flat
//! geometry and body lists a renderer/physics host consumes, plus the
//! editor↔player message protocol. Simulation and rendering internals
//! live in the host; this crate only prepares their inputs.

mod model;
mod protocol;
mod run;

pub use model::{Body, BodyKind, FloorCell, PlayerError, PlayerModel, WallPiece};
pub use protocol::PlayerMessage;
pub use run::Run;
