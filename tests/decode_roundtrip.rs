// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Decoder round-trip and cross-check tests

use anyhow::Result;
use approx::assert_relative_eq;
use nalgebra::{Point3, Vector3};
use proptest::prelude::*;
use std::io::Cursor;
use stlview::io::{decode_ascii, decode_binary, HEADER_LEN};
use stlview::{Mesh, StlError, Triangle};

/// Binary STL writer used to build fixtures
fn write_binary(header: &[u8], triangles: &[Triangle]) -> Vec<u8> {
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
        out.extend(std::iter::repeat(0x5A).take(t.attribute_byte_count as usize));
    }
    out
}

fn arb_coord() -> impl Strategy<Value = f32> {
    -1.0e6f32..1.0e6
}

fn arb_point() -> impl Strategy<Value = Point3<f32>> {
    (arb_coord(), arb_coord(), arb_coord()).prop_map(|(x, y, z)| Point3::new(x, y, z))
}

fn arb_triangle() -> impl Strategy<Value = Triangle> {
    (
        (-1.0f32..1.0, -1.0f32..1.0, -1.0f32..1.0),
        [arb_point(), arb_point(), arb_point()],
        prop_oneof![Just(0u16), 1u16..16],
    )
        .prop_map(|((nx, ny, nz), vertices, attrs)| {
            Triangle::new(Vector3::new(nx, ny, nz), vertices).with_attribute_byte_count(attrs)
        })
}

proptest! {
    #[test]
    fn binary_round_trip(
        header in "[ -~]{0,100}",
        triangles in prop::collection::vec(arb_triangle(), 0..40),
    ) {
        let bytes = write_binary(header.as_bytes(), &triangles);
        let mesh = decode_binary(bytes.as_slice()).unwrap();

        let expected_header: String = header.chars().take(HEADER_LEN).collect();
        prop_assert_eq!(mesh.header.as_str(), expected_header.trim_end_matches('\0'));
        prop_assert_eq!(mesh.triangle_count(), triangles.len());
        prop_assert_eq!(&mesh.triangles, &triangles);
    }

    #[test]
    fn truncated_binary_never_panics(
        triangles in prop::collection::vec(arb_triangle(), 1..8),
        cut in 0usize..1000,
    ) {
        let bytes = write_binary(b"cut", &triangles);
        let cut = cut % bytes.len();
        match decode_binary(&bytes[..cut]) {
            Err(StlError::TruncatedInput { .. }) => {}
            other => prop_assert!(false, "expected TruncatedInput, got {:?}", other),
        }
    }
}

#[test]
fn test_ascii_minimal_triangle() -> Result<()> {
    let text = "solid test\nfacet normal 0 0 1\nouter loop\nvertex 0 0 0\nvertex 1 0 0\nvertex 0 1 0\nendloop\nendfacet\nendsolid test\n";
    let mesh = decode_ascii(text.as_bytes())?;

    assert_eq!(mesh.triangle_count(), 1);
    let t = &mesh.triangles[0];
    assert_eq!(t.normal, Vector3::new(0.0, 0.0, 1.0));
    assert_eq!(
        t.vertices,
        [
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(0.0, 1.0, 0.0),
        ]
    );
    Ok(())
}

#[test]
fn test_ascii_two_token_vertex_is_malformed() {
    let text = "solid test\nfacet normal 0 0 1\nouter loop\nvertex 0 0 0\nvertex 1 0\nvertex 0 1 0\nendloop\nendfacet\nendsolid test\n";
    assert!(matches!(
        decode_ascii(text.as_bytes()),
        Err(StlError::MalformedLine { line: 5, .. })
    ));
}

#[test]
fn test_ascii_and_binary_agree() -> Result<()> {
    let text = "solid pair\n\
        facet normal 0 0 -1\n outer loop\n  vertex 0.5 -1.25 3\n  vertex 2 0 3\n  vertex 0 2 3\n endloop\nendfacet\n\
        facet normal 1 0 0\n outer loop\n  vertex 1e2 0 0\n  vertex 100 1 0\n  vertex 100 0 1\n endloop\nendfacet\n\
        endsolid pair\n";
    let ascii = decode_ascii(text.as_bytes())?;
    let binary = decode_binary(write_binary(b"pair", &ascii.triangles).as_slice())?;

    assert_eq!(ascii.triangles, binary.triangles);
    assert_eq!(binary.header, "pair");
    assert!(ascii.header.ends_with("pair"));
    Ok(())
}

/// stl_io writes binary STL independently of our writer
#[test]
fn test_decode_stl_io_output() -> Result<()> {
    let faces = vec![
        stl_io::Triangle {
            normal: stl_io::Normal::new([0.0, 0.0, 1.0]),
            vertices: [
                stl_io::Vertex::new([0.0, 0.0, 0.0]),
                stl_io::Vertex::new([10.0, 0.0, 0.0]),
                stl_io::Vertex::new([0.0, 10.0, 0.0]),
            ],
        },
        stl_io::Triangle {
            normal: stl_io::Normal::new([0.0, 0.0, -1.0]),
            vertices: [
                stl_io::Vertex::new([0.0, 0.0, -2.5]),
                stl_io::Vertex::new([0.0, 10.0, -2.5]),
                stl_io::Vertex::new([10.0, 0.0, -2.5]),
            ],
        },
    ];
    let mut bytes = Vec::new();
    stl_io::write_stl(&mut bytes, faces.iter())?;

    let mesh: Mesh = decode_binary(bytes.as_slice())?;
    assert_eq!(mesh.triangle_count(), 2);

    let reference = stl_io::read_stl(&mut Cursor::new(&bytes))?;
    for (ours, face) in mesh.triangles.iter().zip(&reference.faces) {
        for axis in 0..3 {
            assert_relative_eq!(ours.normal[axis], face.normal[axis]);
        }
        for (corner, index) in face.vertices.iter().enumerate() {
            let expected = &reference.vertices[*index];
            for axis in 0..3 {
                assert_relative_eq!(ours.vertices[corner][axis], expected[axis]);
            }
        }
    }

    let dims = mesh.dimensions();
    assert_relative_eq!(dims.x, 10.0);
    assert_relative_eq!(dims.y, 10.0);
    assert_relative_eq!(dims.z, 2.5);
    Ok(())
}
