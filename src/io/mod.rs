// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! I/O module - STL decoding

mod ascii;
mod binary;

pub use ascii::decode_ascii;
pub use binary::{decode_binary, FACET_RECORD_LEN, HEADER_LEN};

#[cfg(test)]
pub(crate) mod test_support;
