// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Orthographic point-cloud projection onto a character grid
//!
//! Each vertex is dropped onto one of three axis planes, scaled uniformly so
//! the larger retained extent spans the grid, and marked as a filled cell.
//! Triangle edges are never drawn.

use super::Mesh;
use crate::error::{Result, StlError};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

pub const FILLED_GLYPH: char = '#';
pub const EMPTY_GLYPH: char = ' ';

/// Largest accepted grid size; the raster holds `(size + 1)^2` cells
pub const MAX_GRID_SIZE: usize = 4096;

/// Fixed viewing direction; each variant keeps two coordinate axes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProjectionAxis {
    Front,
    Side,
    Top,
}

impl ProjectionAxis {
    pub const ALL: [ProjectionAxis; 3] = [Self::Front, Self::Side, Self::Top];

    /// Coordinate indices kept as (row source, column source); 0=X, 1=Y, 2=Z
    pub fn retained_axes(self) -> (usize, usize) {
        match self {
            Self::Front => (2, 0),
            Self::Side => (2, 1),
            Self::Top => (1, 0),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Front => "front",
            Self::Side => "side",
            Self::Top => "top",
        }
    }
}

impl fmt::Display for ProjectionAxis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProjectionAxis {
    type Err = StlError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "front" => Ok(Self::Front),
            "side" => Ok(Self::Side),
            "top" => Ok(Self::Top),
            other => Err(StlError::InvalidArgument(format!(
                "unknown projection axis `{}` (expected front, side or top)",
                other
            ))),
        }
    }
}

/// Square raster of `(size + 1) x (size + 1)` cells, row 0 at the top
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CharacterGrid {
    size: usize,
    cells: Vec<bool>,
}

impl CharacterGrid {
    /// Blank grid; `grid_size` must lie in `1..=MAX_GRID_SIZE`
    pub fn new(grid_size: usize) -> Result<Self> {
        let cells = cell_count(grid_size)?;
        Ok(Self {
            size: grid_size,
            cells: vec![false; cells],
        })
    }

    /// Cells per row (and rows per grid)
    pub fn side(&self) -> usize {
        self.size + 1
    }

    /// Out-of-range coordinates are ignored
    pub fn mark(&mut self, row: usize, column: usize) {
        let side = self.side();
        if row < side && column < side {
            self.cells[row * side + column] = true;
        }
    }

    pub fn is_filled(&self, row: usize, column: usize) -> bool {
        let side = self.side();
        row < side && column < side && self.cells[row * side + column]
    }

    pub fn filled_count(&self) -> usize {
        self.cells.iter().filter(|c| **c).count()
    }

    /// Filled cells as (row, column), ordered
    pub fn filled_cells(&self) -> BTreeSet<(usize, usize)> {
        let side = self.side();
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, filled)| **filled)
            .map(|(index, _)| (index / side, index % side))
            .collect()
    }

    /// Draw the grid, one line per row, each row terminated by `\n`
    pub fn render(&self, filled: char, empty: char) -> String {
        let side = self.side();
        let mut out = String::with_capacity(side * (side + 1));
        for row in self.cells.chunks(side) {
            out.extend(row.iter().map(|c| if *c { filled } else { empty }));
            out.push('\n');
        }
        out
    }
}

impl fmt::Display for CharacterGrid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render(FILLED_GLYPH, EMPTY_GLYPH))
    }
}

/// Project every vertex of `mesh` onto the plane kept by `axis`.
///
/// `grid_size` must lie in `1..=MAX_GRID_SIZE`. Vertices whose scaled
/// coordinates are not finite (zero extent on both retained axes) or fall
/// outside the grid are skipped.
pub fn rasterize(mesh: &Mesh, axis: ProjectionAxis, grid_size: usize) -> Result<CharacterGrid> {
    let mut grid = CharacterGrid::new(grid_size)?;

    let (h, v) = axis.retained_axes();
    let bbox = mesh.bounding_box();
    let dims = bbox.size();
    let (min_h, min_v) = (bbox.min[h], bbox.min[v]);

    let larger = if dims[h] > dims[v] { dims[h] } else { dims[v] };
    let scale = larger / grid_size as f32;

    let mut skipped = 0usize;

    for vertex in mesh.vertices() {
        let adjusted_h = (vertex[h] - min_h) / scale;
        let adjusted_v = (vertex[v] - min_v) / scale;

        match (cell_index(adjusted_h), cell_index(adjusted_v)) {
            (Some(ah), Some(av)) if ah <= grid_size && av <= grid_size => {
                grid.mark(grid_size - ah, av);
            }
            _ => skipped += 1,
        }
    }

    if skipped > 0 {
        tracing::debug!(skipped, %axis, grid_size, "vertices fell outside the projection grid");
    }

    Ok(grid)
}

/// Number of cells for a grid of `grid_size`, rejecting sizes out of range
pub fn cell_count(grid_size: usize) -> Result<usize> {
    if grid_size == 0 {
        return Err(StlError::InvalidArgument(
            "grid size must be at least 1".to_string(),
        ));
    }
    grid_size
        .checked_add(1)
        .and_then(|side| side.checked_mul(side))
        .filter(|_| grid_size <= MAX_GRID_SIZE)
        .ok_or_else(|| {
            StlError::InvalidArgument(format!(
                "grid size {} exceeds the maximum of {}",
                grid_size, MAX_GRID_SIZE
            ))
        })
}

/// Truncate a scaled coordinate toward zero; None when it cannot index a cell
fn cell_index(value: f32) -> Option<usize> {
    if !value.is_finite() || value < 0.0 {
        return None;
    }
    let truncated = value.trunc();
    if truncated > usize::MAX as f32 {
        return None;
    }
    Some(truncated as usize)
}
