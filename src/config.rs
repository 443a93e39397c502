// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Viewer configuration system

use crate::error::StlError;
use crate::geometry::{cell_count, ProjectionAxis, EMPTY_GLYPH, FILLED_GLYPH};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Config file picked up from the working directory when no path is given
pub const DEFAULT_CONFIG_FILE: &str = "stlview.toml";

/// Defaults for the `info` and `draw` commands
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewConfig {
    /// Projection used by `draw` when `--axis` is omitted
    pub default_axis: ProjectionAxis,
    /// Grid size used by `draw` when `--size` is omitted
    pub grid_size: usize,
    /// Glyph for cells hit by a vertex
    pub filled_glyph: char,
    /// Glyph for untouched cells
    pub empty_glyph: char,
    /// Read the whole file into memory before decoding
    pub preload: bool,
    /// Colored terminal output
    pub color: bool,
}

impl Default for ViewConfig {
    fn default() -> Self {
        Self {
            default_axis: ProjectionAxis::Front,
            grid_size: 40,
            filled_glyph: FILLED_GLYPH,
            empty_glyph: EMPTY_GLYPH,
            preload: false,
            color: true,
        }
    }
}

impl ViewConfig {
    /// Load configuration from file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read config file: {:?}", path.as_ref()))?;
        let config: ViewConfig = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {:?}", path.as_ref()))?;
        Ok(config)
    }

    /// Load configuration with environment variable overrides
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        let mut config = match explicit {
            Some(path) => Self::from_file(path)?,
            None if PathBuf::from(DEFAULT_CONFIG_FILE).exists() => {
                Self::from_file(DEFAULT_CONFIG_FILE)?
            }
            None => Self::default(),
        };

        config.apply_env(|key| std::env::var(key).ok())?;
        config.validate()?;
        tracing::debug!(?config, "configuration loaded");
        Ok(config)
    }

    /// Apply `STLVIEW_*` overrides read through `lookup`
    pub fn apply_env(&mut self, lookup: impl Fn(&str) -> Option<String>) -> Result<()> {
        if let Some(axis) = lookup("STLVIEW_AXIS") {
            self.default_axis = axis.parse().context("Invalid STLVIEW_AXIS")?;
        }

        if let Some(size) = lookup("STLVIEW_GRID_SIZE") {
            self.grid_size = size
                .trim()
                .parse()
                .with_context(|| format!("Invalid STLVIEW_GRID_SIZE: {}", size))?;
        }

        if let Some(preload) = lookup("STLVIEW_PRELOAD") {
            self.preload = preload
                .trim()
                .parse()
                .with_context(|| format!("Invalid STLVIEW_PRELOAD: {}", preload))?;
        }

        if let Some(color) = lookup("STLVIEW_COLOR") {
            self.color = color
                .trim()
                .parse()
                .with_context(|| format!("Invalid STLVIEW_COLOR: {}", color))?;
        }

        Ok(())
    }

    /// Grid size must be drawable: `1..=MAX_GRID_SIZE`
    pub fn validate(&self) -> std::result::Result<(), StlError> {
        cell_count(self.grid_size).map(|_| ())
    }

    /// Save configuration to file
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let content = toml::to_string_pretty(self).context("Failed to serialize config")?;
        std::fs::write(path.as_ref(), content)
            .with_context(|| format!("Failed to write config file: {:?}", path.as_ref()))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use tempfile::NamedTempFile;

    #[test]
    fn test_partial_file_keeps_defaults() -> Result<()> {
        let file = NamedTempFile::new()?;
        std::fs::write(file.path(), "default_axis = \"top\"\ngrid_size = 12\n")?;

        let config = ViewConfig::from_file(file.path())?;
        assert_eq!(config.default_axis, ProjectionAxis::Top);
        assert_eq!(config.grid_size, 12);
        assert_eq!(config.filled_glyph, '#');
        assert!(!config.preload);
        Ok(())
    }

    #[test]
    fn test_save_and_reload() -> Result<()> {
        let file = NamedTempFile::new()?;
        let config = ViewConfig {
            default_axis: ProjectionAxis::Side,
            filled_glyph: '*',
            empty_glyph: '.',
            ..ViewConfig::default()
        };
        config.save(file.path())?;
        assert_eq!(ViewConfig::from_file(file.path())?, config);
        Ok(())
    }

    #[test]
    fn test_env_overrides() -> Result<()> {
        let env: HashMap<&str, &str> = [
            ("STLVIEW_AXIS", "side"),
            ("STLVIEW_GRID_SIZE", " 64 "),
            ("STLVIEW_PRELOAD", "true"),
            ("STLVIEW_COLOR", "false"),
        ]
        .into_iter()
        .collect();

        let mut config = ViewConfig::default();
        config.apply_env(|key| env.get(key).map(|v| v.to_string()))?;

        assert_eq!(config.default_axis, ProjectionAxis::Side);
        assert_eq!(config.grid_size, 64);
        assert!(config.preload);
        assert!(!config.color);
        Ok(())
    }

    #[test]
    fn test_invalid_env_axis() {
        let mut config = ViewConfig::default();
        assert!(config
            .apply_env(|key| (key == "STLVIEW_AXIS").then(|| "oblique".to_string()))
            .is_err());
    }

    #[test]
    fn test_invalid_env_flags() {
        for key in ["STLVIEW_PRELOAD", "STLVIEW_COLOR"] {
            for value in ["1", "yes", ""] {
                let mut config = ViewConfig::default();
                let err = config
                    .apply_env(|k| (k == key).then(|| value.to_string()))
                    .unwrap_err();
                assert!(err.to_string().contains(key), "{err}");
            }
        }
    }

    #[test]
    fn test_grid_size_bounds() {
        for grid_size in [0, crate::geometry::MAX_GRID_SIZE + 1, usize::MAX] {
            let config = ViewConfig {
                grid_size,
                ..ViewConfig::default()
            };
            assert!(matches!(config.validate(), Err(StlError::InvalidArgument(_))));
        }
        assert!(ViewConfig::default().validate().is_ok());
    }
}
