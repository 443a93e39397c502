// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! File loading with encoding auto-detection
//!
//! Files that begin with `solid` are tried as ASCII first; if that yields no
//! facets or fails to parse, the same bytes are decoded as binary. When both
//! attempts fail the ASCII parse error is returned.

use crate::error::{Result as StlResult, StlError};
use crate::geometry::Mesh;
use crate::io::{decode_ascii, decode_binary};
use anyhow::{Context, Result};
use std::fs::File;
use std::io::{BufReader, Cursor, Read, Seek, SeekFrom};
use std::path::Path;

const ASCII_MAGIC: &[u8] = b"solid";

/// Encoding suggested by the first bytes of a file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StlFormat {
    Ascii,
    Binary,
}

impl StlFormat {
    pub fn sniff(prefix: &[u8]) -> Self {
        if prefix.starts_with(ASCII_MAGIC) {
            StlFormat::Ascii
        } else {
            StlFormat::Binary
        }
    }
}

/// How the file reaches the decoder
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoadStrategy {
    /// Buffered reads straight from the file
    #[default]
    Stream,
    /// Whole file read into memory first
    Preload,
}

/// Decode a seekable source, falling back from ASCII to binary
pub fn decode_auto<R: Read + Seek>(mut reader: R) -> StlResult<Mesh> {
    let start = reader.stream_position()?;

    let mut prefix = Vec::with_capacity(ASCII_MAGIC.len());
    reader
        .by_ref()
        .take(ASCII_MAGIC.len() as u64)
        .read_to_end(&mut prefix)?;
    reader.seek(SeekFrom::Start(start))?;

    if StlFormat::sniff(&prefix) != StlFormat::Ascii {
        return decode_binary(BufReader::new(reader));
    }

    let ascii_error = match decode_ascii(BufReader::new(&mut reader)) {
        Ok(mesh) if !mesh.is_empty() => return Ok(mesh),
        Ok(_) => {
            tracing::debug!("no ASCII facets found, retrying as binary");
            None
        }
        Err(err) if err.is_format_mismatch() => {
            tracing::debug!(error = %err, "ASCII decode failed, retrying as binary");
            Some(err)
        }
        Err(err) => return Err(err),
    };
    reader.seek(SeekFrom::Start(start))?;

    // Both failed: report the ASCII parse error
    decode_binary(BufReader::new(reader)).map_err(|binary_error| match ascii_error {
        Some(err) => {
            tracing::debug!(error = %binary_error, "binary retry failed as well");
            err
        }
        None => binary_error,
    })
}

/// Decode an in-memory STL image
pub fn decode_slice(bytes: &[u8]) -> StlResult<Mesh> {
    decode_auto(Cursor::new(bytes))
}

/// Open and decode an STL file with the given strategy
pub fn load_file(path: impl AsRef<Path>, strategy: LoadStrategy) -> Result<Mesh> {
    let path = path.as_ref();
    tracing::debug!(path = %path.display(), ?strategy, "loading STL");

    let decoded: std::result::Result<Mesh, StlError> = match strategy {
        LoadStrategy::Stream => {
            let file = File::open(path)
                .with_context(|| format!("Failed to open STL file: {}", path.display()))?;
            decode_auto(file)
        }
        LoadStrategy::Preload => {
            let bytes = std::fs::read(path)
                .with_context(|| format!("Failed to read STL file: {}", path.display()))?;
            decode_slice(&bytes)
        }
    };

    decoded.with_context(|| format!("Failed to decode STL file: {}", path.display()))
}
