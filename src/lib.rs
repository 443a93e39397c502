// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! stlview
//!
//! Decodes binary and ASCII STL meshes, reports their extents and draws
//! orthographic ASCII-art projections from the front, side or top.

pub mod cli;
pub mod config;
pub mod error;
pub mod geometry;
pub mod io;

pub use cli::{load_file, LoadStrategy};
pub use config::ViewConfig;
pub use error::{Result, StlError};
pub use geometry::{
    rasterize, summarize, BoundingBox, CharacterGrid, Mesh, MeshSummary, ProjectionAxis, Triangle,
};
pub use io::{decode_ascii, decode_binary};

/// Decode an STL file and draw it from `axis` on a `grid_size` grid
pub fn draw_file(
    path: impl AsRef<std::path::Path>,
    axis: ProjectionAxis,
    grid_size: usize,
) -> anyhow::Result<String> {
    let mesh = load_file(path, LoadStrategy::Stream)?;
    Ok(rasterize(&mesh, axis, grid_size)?.to_string())
}
