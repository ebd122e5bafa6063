use std::{fs, path::Path};

use anyhow::{Context, Result};
use maze_pursuit_core::Palette;
use maze_pursuit_system_tactics::{Config, Tactics};
use serde::Deserialize;

/// Settings read from the optional `--config` TOML file.
#[derive(Clone, Copy, Debug, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub(crate) struct DriverConfig {
    /// Thresholds forwarded to the decision layer.
    pub(crate) tactics: Config,
    /// Category meanings of the snapshot grids.
    pub(crate) palette: Palette,
}

impl DriverConfig {
    /// Reads and parses the configuration file at `path`.
    pub(crate) fn load(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("failed to read configuration at {}", path.display()))?;
        Self::parse(&contents)
            .with_context(|| format!("invalid configuration in {}", path.display()))
    }

    /// Parses configuration from TOML source.
    pub(crate) fn parse(contents: &str) -> Result<Self> {
        toml::from_str(contents).context("failed to parse configuration toml contents")
    }

    /// Builds the controller after applying command-line overrides.
    pub(crate) fn into_tactics(
        self,
        danger_threshold: Option<u32>,
        chase_threshold: Option<u32>,
    ) -> Tactics {
        let mut config = self.tactics;
        if let Some(value) = danger_threshold {
            config = config.with_danger_threshold(value);
        }
        if let Some(value) = chase_threshold {
            config = config.with_chase_threshold(value);
        }
        Tactics::new(self.palette, config)
    }
}
