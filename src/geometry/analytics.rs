// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Mesh statistics for the info report

use super::Mesh;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Header, triangle count and extents of a decoded mesh
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MeshSummary {
    pub header: String,
    pub triangle_count: usize,
    /// Extent per axis [dx, dy, dz]
    pub dimensions: [f32; 3],
    pub mins: [f32; 3],
    pub maxs: [f32; 3],
}

/// Analyze mesh extents and compute the summary
pub fn summarize(mesh: &Mesh) -> MeshSummary {
    let bbox = mesh.bounding_box();
    let size = bbox.size();

    MeshSummary {
        header: mesh.header.clone(),
        triangle_count: mesh.triangle_count(),
        dimensions: [size.x, size.y, size.z],
        mins: [bbox.min.x, bbox.min.y, bbox.min.z],
        maxs: [bbox.max.x, bbox.max.y, bbox.max.z],
    }
}

fn write_triple(f: &mut fmt::Formatter<'_>, values: &[f32; 3]) -> fmt::Result {
    write!(f, "[{} {} {}]", values[0], values[1], values[2])
}

impl fmt::Display for MeshSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Header: {}", self.header)?;
        writeln!(f, "Triangles: {}", self.triangle_count)?;
        write!(f, "Dimensions: ")?;
        write_triple(f, &self.dimensions)?;
        write!(f, "\nMins: ")?;
        write_triple(f, &self.mins)?;
        write!(f, "\nMaxs: ")?;
        write_triple(f, &self.maxs)?;
        writeln!(f)
    }
}
