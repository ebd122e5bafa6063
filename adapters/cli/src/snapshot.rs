use std::{
    fs,
    io::{self, Read},
};

use anyhow::{Context, Result};
use maze_pursuit_core::{AdversaryView, Coord};
use maze_pursuit_grid::{Grid, GridError};
use serde::{Deserialize, Serialize};

use crate::snapshot_transfer;

/// World state for a single decision tick as exchanged with the driver.
///
/// `rows[y][x]` holds the category of cell `(x, y)`; row zero is the bottom
/// of the board since moving up increases `y`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub(crate) struct TickSnapshot {
    /// Whether stepping over an edge wraps to the opposite edge.
    #[serde(default)]
    pub(crate) cyclic: bool,
    /// Cell categories, one inner vector per row.
    pub(crate) rows: Vec<Vec<i32>>,
    /// Cell occupied by the controlled entity.
    pub(crate) position: Coord,
    /// Adversaries on the board this tick.
    #[serde(default)]
    pub(crate) adversaries: Vec<AdversaryView>,
}

impl TickSnapshot {
    /// Loads a snapshot from a transfer string, a JSON file or `-` for stdin.
    pub(crate) fn load(source: &str) -> Result<Self> {
        if snapshot_transfer::is_transfer_string(source) {
            return snapshot_transfer::decode(source).context("failed to decode snapshot string");
        }

        let contents = if source == "-" {
            let mut buffer = String::new();
            let _ = io::stdin()
                .read_to_string(&mut buffer)
                .context("failed to read snapshot from stdin")?;
            buffer
        } else {
            fs::read_to_string(source)
                .with_context(|| format!("failed to read snapshot at {source}"))?
        };

        Self::parse(&contents)
    }

    /// Parses a snapshot from its JSON or transfer string form.
    pub(crate) fn parse(contents: &str) -> Result<Self> {
        if snapshot_transfer::is_transfer_string(contents) {
            return snapshot_transfer::decode(contents).context("failed to decode snapshot string");
        }
        serde_json::from_str(contents).context("failed to parse snapshot json")
    }

    /// Width and height of the board described by `rows`.
    pub(crate) fn dimensions(&self) -> (u32, u32) {
        let columns = self.rows.first().map_or(0, Vec::len);
        (saturate(columns), saturate(self.rows.len()))
    }

    /// Builds the engine grid described by the snapshot.
    pub(crate) fn grid(&self) -> Result<Grid, GridError> {
        Ok(Grid::from_rows(self.rows.clone())?.with_cyclic(self.cyclic))
    }
}

fn saturate(value: usize) -> u32 {
    u32::try_from(value).unwrap_or(u32::MAX)
}
