// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! CLI subsystem: file loading and terminal reporting

pub mod loader;
pub mod reporter;

pub use loader::{decode_auto, decode_slice, load_file, LoadStrategy, StlFormat};
pub use reporter::Reporter;
