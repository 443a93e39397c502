// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Error types for STL decoding and projection

use thiserror::Error;

/// Result type for stlview core operations
pub type Result<T> = std::result::Result<T, StlError>;

/// Errors raised by the decoders and the projector
#[derive(Error, Debug)]
pub enum StlError {
    /// The byte source ran dry before a fixed-size binary field was complete
    #[error("Truncated input while reading {field}{}", triangle_suffix(.triangle))]
    TruncatedInput {
        field: &'static str,
        triangle: Option<u32>,
    },

    /// An ASCII line did not match its grammar rule
    #[error("Malformed line {line}: expected `{expected}`, found `{found}`")]
    MalformedLine {
        line: usize,
        expected: &'static str,
        found: String,
    },

    /// A token that must be a float could not be parsed
    #[error("Invalid number `{token}` on line {line}")]
    NumericParseFailure { line: usize, token: String },

    /// A caller passed a value outside the accepted domain
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// IO error other than running out of bytes
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

fn triangle_suffix(triangle: &Option<u32>) -> String {
    match triangle {
        Some(index) => format!(" (triangle {})", index),
        None => String::new(),
    }
}

impl StlError {
    /// Map an IO error from a fixed-size read, turning EOF into `TruncatedInput`
    pub(crate) fn from_read(err: std::io::Error, field: &'static str, triangle: Option<u32>) -> Self {
        if err.kind() == std::io::ErrorKind::UnexpectedEof {
            StlError::TruncatedInput { field, triangle }
        } else {
            StlError::Io(err)
        }
    }

    /// Whether this error came from text that is not valid ASCII STL
    pub fn is_format_mismatch(&self) -> bool {
        matches!(
            self,
            StlError::MalformedLine { .. } | StlError::NumericParseFailure { .. }
        )
    }
}
