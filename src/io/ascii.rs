// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! ASCII STL decoder
//!
//! The grammar is line oriented. Every line is trimmed and matched against a
//! `LineRule`: a literal prefix plus an exact number of whitespace-separated
//! float fields (zero fields means the line must equal the prefix).

use crate::error::{Result, StlError};
use crate::geometry::{Mesh, Triangle};
use nalgebra::{Point3, Vector3};
use std::io::BufRead;

const END_OF_INPUT: &str = "<end of input>";

struct LineRule {
    prefix: &'static str,
    fields: usize,
    expected: &'static str,
}

const FACET_NORMAL: LineRule = LineRule {
    prefix: "facet normal ",
    fields: 3,
    expected: "facet normal <x> <y> <z>",
};
const OUTER_LOOP: LineRule = LineRule {
    prefix: "outer loop",
    fields: 0,
    expected: "outer loop",
};
const VERTEX: LineRule = LineRule {
    prefix: "vertex ",
    fields: 3,
    expected: "vertex <x> <y> <z>",
};
const END_LOOP: LineRule = LineRule {
    prefix: "endloop",
    fields: 0,
    expected: "endloop",
};
const END_FACET: LineRule = LineRule {
    prefix: "endfacet",
    fields: 0,
    expected: "endfacet",
};

impl LineRule {
    /// `Ok(None)` when the line does not fit the rule's shape
    fn apply(&self, line: &str, line_no: usize) -> Result<Option<Vec<f32>>> {
        if self.fields == 0 {
            return Ok((line == self.prefix).then(Vec::new));
        }

        let Some(rest) = line.strip_prefix(self.prefix) else {
            return Ok(None);
        };
        let tokens: Vec<&str> = rest.split_whitespace().collect();
        if tokens.len() != self.fields {
            return Ok(None);
        }

        tokens
            .into_iter()
            .map(|token| {
                token
                    .parse::<f32>()
                    .map_err(|_| StlError::NumericParseFailure {
                        line: line_no,
                        token: token.to_string(),
                    })
            })
            .collect::<Result<Vec<f32>>>()
            .map(Some)
    }
}

/// Trimmed lines with 1-based numbering; non-UTF-8 lines are reported, not fatal IO
struct Lines<R> {
    reader: R,
    buf: Vec<u8>,
    line_no: usize,
}

enum Line<'a> {
    Text(&'a str),
    NotText,
    End,
}

impl<R: BufRead> Lines<R> {
    fn new(reader: R) -> Self {
        Self {
            reader,
            buf: Vec::with_capacity(128),
            line_no: 0,
        }
    }

    fn next_line(&mut self) -> Result<Line<'_>> {
        self.buf.clear();
        if self.reader.read_until(b'\n', &mut self.buf)? == 0 {
            return Ok(Line::End);
        }
        self.line_no += 1;
        Ok(match std::str::from_utf8(&self.buf) {
            Ok(text) => Line::Text(text.trim_matches(|c| matches!(c, ' ' | '\t' | '\r' | '\n'))),
            Err(_) => Line::NotText,
        })
    }

    /// Read one line and apply `rule`; `Ok(None)` on mismatch or end of input
    fn try_rule(&mut self, rule: &LineRule) -> Result<Option<Vec<f32>>> {
        let line_no = self.line_no + 1;
        match self.next_line()? {
            Line::Text(text) => rule.apply(text, line_no),
            Line::NotText | Line::End => Ok(None),
        }
    }

    /// Read one line that must satisfy `rule`
    fn expect_rule(&mut self, rule: &LineRule) -> Result<Vec<f32>> {
        let line_no = self.line_no + 1;
        let found = match self.next_line()? {
            Line::Text(text) => match rule.apply(text, line_no)? {
                Some(values) => return Ok(values),
                None => text.to_string(),
            },
            Line::NotText => "<non-UTF-8 data>".to_string(),
            Line::End => END_OF_INPUT.to_string(),
        };
        Err(StlError::MalformedLine {
            line: line_no,
            expected: rule.expected,
            found,
        })
    }
}

fn solid_name(line: &str) -> Option<&str> {
    let rest = line.strip_prefix("solid")?;
    if rest.is_empty() || rest.starts_with(char::is_whitespace) {
        Some(rest.trim())
    } else {
        None
    }
}

/// Decode an ASCII STL stream.
///
/// Facets are read until a line fails to start a new facet (normally
/// `endsolid`); that ends the mesh without error. Inside a facet every line is
/// mandatory and a mismatch is `MalformedLine`.
pub fn decode_ascii<R: BufRead>(reader: R) -> Result<Mesh> {
    let mut lines = Lines::new(reader);

    let name = match lines.next_line()? {
        Line::Text(text) => match solid_name(text) {
            Some(name) => name.to_string(),
            None => {
                return Err(StlError::MalformedLine {
                    line: 1,
                    expected: "solid <name>",
                    found: text.to_string(),
                })
            }
        },
        Line::NotText => {
            return Err(StlError::MalformedLine {
                line: 1,
                expected: "solid <name>",
                found: "<non-UTF-8 data>".to_string(),
            })
        }
        Line::End => {
            return Err(StlError::MalformedLine {
                line: 1,
                expected: "solid <name>",
                found: END_OF_INPUT.to_string(),
            })
        }
    };
    let header = format!("Imported from ASCII STL by stlview - {}", name);
    tracing::debug!(solid = %name, "decoding ASCII STL");

    let mut triangles = Vec::new();
    while let Some(normal) = lines.try_rule(&FACET_NORMAL)? {
        lines.expect_rule(&OUTER_LOOP)?;
        let mut vertices = [Point3::origin(); 3];
        for vertex in vertices.iter_mut() {
            let v = lines.expect_rule(&VERTEX)?;
            *vertex = Point3::new(v[0], v[1], v[2]);
        }
        lines.expect_rule(&END_LOOP)?;
        lines.expect_rule(&END_FACET)?;

        triangles.push(Triangle::new(
            Vector3::new(normal[0], normal[1], normal[2]),
            vertices,
        ));
    }

    tracing::trace!(facets = triangles.len(), lines = lines.line_no, "ASCII facets read");
    Ok(Mesh::new(header, triangles))
}
