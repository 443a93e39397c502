// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Mesh representation decoded from STL

use super::BoundingBox;
use nalgebra::{Point3, Vector3};
use serde::{Deserialize, Serialize};

/// One STL facet: declared normal plus three vertices
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Triangle {
    /// Normal exactly as stored in the file, never renormalized
    pub normal: Vector3<f32>,
    pub vertices: [Point3<f32>; 3],
    /// Trailing attribute bytes declared by the binary encoding (0 for ASCII)
    pub attribute_byte_count: u16,
}

impl Triangle {
    pub fn new(normal: Vector3<f32>, vertices: [Point3<f32>; 3]) -> Self {
        Self {
            normal,
            vertices,
            attribute_byte_count: 0,
        }
    }

    pub fn with_attribute_byte_count(mut self, count: u16) -> Self {
        self.attribute_byte_count = count;
        self
    }
}

/// Triangle soup in file order, as produced by one decode call
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Mesh {
    pub header: String,
    pub triangles: Vec<Triangle>,
}

impl Mesh {
    pub fn new(header: impl Into<String>, triangles: Vec<Triangle>) -> Self {
        Self {
            header: header.into(),
            triangles,
        }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    /// Get triangle count
    pub fn triangle_count(&self) -> usize {
        self.triangles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.triangles.is_empty()
    }

    /// Every vertex of every triangle, in file order
    pub fn vertices(&self) -> impl Iterator<Item = &Point3<f32>> + '_ {
        self.triangles.iter().flat_map(|t| t.vertices.iter())
    }

    /// Compute bounding box
    pub fn bounding_box(&self) -> BoundingBox {
        BoundingBox::from_mesh(self)
    }

    /// Extent along each axis (max - min)
    pub fn dimensions(&self) -> Vector3<f32> {
        self.bounding_box().size()
    }
}
