// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Binary STL writer for unit tests

use super::HEADER_LEN;
use crate::geometry::Triangle;

/// Serialize triangles in the binary layout; `extra` fills each attribute payload
pub(crate) fn encode(header: &[u8], triangles: &[Triangle], extra: u8) -> Vec<u8> {
    let mut out = vec![0u8; HEADER_LEN];
    let len = header.len().min(HEADER_LEN);
    out[..len].copy_from_slice(&header[..len]);
    out.extend_from_slice(&(triangles.len() as u32).to_le_bytes());
    for t in triangles {
        for c in t.normal.iter() {
            out.extend_from_slice(&c.to_le_bytes());
        }
        for v in &t.vertices {
            for c in v.coords.iter() {
                out.extend_from_slice(&c.to_le_bytes());
            }
        }
        out.extend_from_slice(&t.attribute_byte_count.to_le_bytes());
        out.extend(std::iter::repeat(extra).take(t.attribute_byte_count as usize));
    }
    out
}
