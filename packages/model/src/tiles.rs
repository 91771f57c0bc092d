//! Room floor tiles
//!
//! Every room owns a 2D grid of tile types, one cell per world unit of
//! floor, addressed by integer (x, y) in the room's local plan. Tiles are
//! mutated only through edit steps so the editor can undo them.

use crate::ModelError;
use serde::{Deserialize, Serialize};

/// Floor tile classification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "i8", into = "i8")]
pub enum TileType {
    Floor,
    Hole,
}

impl From<TileType> for i8 {
    fn from(t: TileType) -> i8 {
        match t {
            TileType::Floor => 0,
            TileType::Hole => -1,
        }
    }
}

impl TryFrom<i8> for TileType {
    type Error = String;

    fn try_from(v: i8) -> Result<Self, Self::Error> {
        match v {
            0 => Ok(TileType::Floor),
            -1 => Ok(TileType::Hole),
            other => Err(format!("unknown tile type {}", other)),
        }
    }
}

/// Grid of tile types owned by a room area
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct TileGrid {
    width: usize,
    depth: usize,
    cells: Vec<TileType>,
}

impl TileGrid {
    /// New grid with every cell set to `Floor`
    pub fn new(width: usize, depth: usize) -> Self {
        Self {
            width,
            depth,
            cells: vec![TileType::Floor; width * depth],
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn depth(&self) -> usize {
        self.depth
    }

    pub fn contains(&self, x: i32, y: i32) -> bool {
        x >= 0 && y >= 0 && (x as usize) < self.width && (y as usize) < self.depth
    }

    pub fn tile(&self, x: i32, y: i32) -> Option<TileType> {
        if !self.contains(x, y) {
            return None;
        }
        Some(self.cells[y as usize * self.width + x as usize])
    }

    /// Set a tile, returning the prior type
    pub fn set_tile(&mut self, x: i32, y: i32, tile: TileType) -> Result<TileType, ModelError> {
        if !self.contains(x, y) {
            return Err(ModelError::TileOutOfBounds { x, y });
        }
        let cell = &mut self.cells[y as usize * self.width + x as usize];
        let prior = *cell;
        *cell = tile;
        Ok(prior)
    }

    pub fn is_walkable(&self, x: i32, y: i32) -> bool {
        self.tile(x, y) == Some(TileType::Floor)
    }

    /// All walkable cell coordinates, row-major
    pub fn walkable_cells(&self) -> impl Iterator<Item = (i32, i32)> + '_ {
        let width = self.width;
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, t)| **t == TileType::Floor)
            .map(move |(i, _)| ((i % width) as i32, (i / width) as i32))
    }
}
