//! Render snapshot handed to the drawing side. The engine itself never draws.

use serde::Serialize;

use crate::core::vec2::Vec2;
use crate::game::grid::{Grid, TokenType};
use crate::game::stage::Stage;

/// One cell as a renderer sees it.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct CellView {
    /// Flat cell index
    pub index: usize,
    /// Token to draw
    pub token: TokenType,
    /// Where to draw it
    pub position: Vec2,
    /// Cell is part of a pending selection
    pub selected: bool,
}

/// Everything needed to draw one frame.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct BoardView {
    /// Tick the snapshot was taken on
    pub tick: u32,
    /// Stage name
    pub stage: &'static str,
    /// All cells in index order
    pub cells: Vec<CellView>,
}

impl BoardView {
    /// Build a snapshot from the grid.
    pub fn capture(grid: &Grid, stage: Stage, tick: u32) -> Self {
        let cells = grid
            .types
            .iter()
            .zip(&grid.positions)
            .enumerate()
            .map(|(index, (token, position))| CellView {
                index,
                token: *token,
                position: *position,
                selected: grid.selection.contains(&index),
            })
            .collect();

        Self {
            tick,
            stage: stage.name(),
            cells,
        }
    }

    /// Serialize to JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}
