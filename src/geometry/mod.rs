// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Geometry module - mesh representation, extents and projection

mod analytics;
mod bbox;
mod mesh;
mod projection;

pub use analytics::{summarize, MeshSummary};
pub use bbox::BoundingBox;
pub use mesh::{Mesh, Triangle};
pub use projection::{
    cell_count, rasterize, CharacterGrid, ProjectionAxis, EMPTY_GLYPH, FILLED_GLYPH,
    MAX_GRID_SIZE,
};
