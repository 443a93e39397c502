// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Binary STL decoder
//!
//! Layout (little-endian): 80-byte header, u32 triangle count, then one
//! 50-byte record per facet followed by `attribute_byte_count` extra bytes.

use crate::error::{Result, StlError};
use crate::geometry::{Mesh, Triangle};
use nalgebra::{Point3, Vector3};
use std::io::{self, Read};

pub const HEADER_LEN: usize = 80;
pub const FACET_RECORD_LEN: usize = 50;

/// Cap on up-front allocation; the declared count is not trusted for memory
const MAX_PREALLOCATED_TRIANGLES: usize = 1 << 16;

/// One facet as laid out on disk: normal, three vertices, attribute count
struct FacetRecord([u8; FACET_RECORD_LEN]);

impl FacetRecord {
    fn f32_at(&self, offset: usize) -> f32 {
        let b = &self.0[offset..offset + 4];
        f32::from_le_bytes([b[0], b[1], b[2], b[3]])
    }

    fn vec3_at(&self, offset: usize) -> [f32; 3] {
        [
            self.f32_at(offset),
            self.f32_at(offset + 4),
            self.f32_at(offset + 8),
        ]
    }

    fn decode(&self) -> Triangle {
        let [nx, ny, nz] = self.vec3_at(0);
        let vertices = [12, 24, 36].map(|offset| {
            let [x, y, z] = self.vec3_at(offset);
            Point3::new(x, y, z)
        });
        let attribute_byte_count = u16::from_le_bytes([self.0[48], self.0[49]]);

        Triangle::new(Vector3::new(nx, ny, nz), vertices)
            .with_attribute_byte_count(attribute_byte_count)
    }
}

/// Decode a binary STL stream.
///
/// The declared triangle count is trusted: a short stream fails with
/// `TruncatedInput`, trailing bytes after the last facet are left unread.
/// Attribute payload bytes are skipped; only their count is kept.
pub fn decode_binary<R: Read>(mut reader: R) -> Result<Mesh> {
    let mut header = [0u8; HEADER_LEN];
    reader
        .read_exact(&mut header)
        .map_err(|e| StlError::from_read(e, "header", None))?;
    let header = String::from_utf8_lossy(&header)
        .trim_end_matches('\0')
        .to_string();

    let mut count = [0u8; 4];
    reader
        .read_exact(&mut count)
        .map_err(|e| StlError::from_read(e, "triangle count", None))?;
    let triangle_count = u32::from_le_bytes(count);

    tracing::debug!(triangle_count, header = %header, "decoding binary STL");

    let mut triangles =
        Vec::with_capacity((triangle_count as usize).min(MAX_PREALLOCATED_TRIANGLES));
    let mut record = FacetRecord([0u8; FACET_RECORD_LEN]);

    for index in 0..triangle_count {
        reader
            .read_exact(&mut record.0)
            .map_err(|e| StlError::from_read(e, "facet", Some(index)))?;
        let triangle = record.decode();

        if triangle.attribute_byte_count != 0 {
            skip_attribute_bytes(&mut reader, triangle.attribute_byte_count, index)?;
        }

        triangles.push(triangle);
    }

    Ok(Mesh::new(header, triangles))
}

fn skip_attribute_bytes<R: Read>(reader: &mut R, count: u16, index: u32) -> Result<()> {
    let skipped = io::copy(&mut reader.by_ref().take(u64::from(count)), &mut io::sink())?;
    if skipped < u64::from(count) {
        return Err(StlError::TruncatedInput {
            field: "attribute bytes",
            triangle: Some(index),
        });
    }
    Ok(())
}
