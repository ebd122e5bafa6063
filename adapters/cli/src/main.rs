#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Command-line driver that feeds tick snapshots to the Maze Pursuit agent.

mod config;
mod snapshot;
mod snapshot_transfer;

use std::{fmt::Write as _, path::PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use maze_pursuit_core::UNREACHED;
use maze_pursuit_system_tactics::{Situation, Tactics};
use tracing::debug;
use tracing_subscriber::{filter::LevelFilter, EnvFilter};

use self::{config::DriverConfig, snapshot::TickSnapshot};

/// Decides moves for a grid pursuit agent from world snapshots.
#[derive(Debug, Parser)]
#[command(name = "maze-pursuit", version, about, long_about = None)]
struct Cli {
    /// TOML file with optional `[tactics]` and `[palette]` tables.
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Distance at or below which a dangerous adversary forces an escape.
    #[arg(long, global = true, value_name = "CELLS")]
    danger_threshold: Option<u32>,

    /// Distance at or below which a vulnerable adversary is chased.
    #[arg(long, global = true, value_name = "CELLS")]
    chase_threshold: Option<u32>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Print the move chosen for a snapshot.
    Decide {
        /// Snapshot JSON path, `-` for stdin, or a `pursuit:v1:` string.
        snapshot: String,
    },
    /// Print the distance field rooted at the controlled entity.
    Distances {
        /// Snapshot JSON path, `-` for stdin, or a `pursuit:v1:` string.
        snapshot: String,
    },
    /// Print the single-line transfer form of a snapshot.
    Encode {
        /// Snapshot JSON path, `-` for stdin, or a `pursuit:v1:` string.
        snapshot: String,
    },
}

impl Cli {
    fn tactics(&self) -> Result<Tactics> {
        let driver = match &self.config {
            Some(path) => {
                let driver = DriverConfig::load(path)?;
                debug!(path = %path.display(), ?driver, "loaded configuration");
                driver
            }
            None => DriverConfig::default(),
        };
        Ok(driver.into_tactics(self.danger_threshold, self.chase_threshold))
    }
}

/// Entry point for the Maze Pursuit command-line interface.
fn main() -> Result<()> {
    let directives = std::env::var(EnvFilter::DEFAULT_ENV).unwrap_or_default();
    tracing_subscriber::fmt()
        .with_env_filter(log_filter(&directives))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let tactics = cli.tactics()?;
    let output = run(&cli.command, &tactics)?;
    println!("{output}");
    Ok(())
}

/// Filter built from `RUST_LOG` style directives, `info` when none are given.
fn log_filter(directives: &str) -> EnvFilter {
    EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .parse_lossy(directives)
}

fn run(command: &Command, tactics: &Tactics) -> Result<String> {
    match command {
        Command::Decide { snapshot } => decide_report(&TickSnapshot::load(snapshot)?, tactics),
        Command::Distances { snapshot } => {
            distances_report(&TickSnapshot::load(snapshot)?, tactics)
        }
        Command::Encode { snapshot } => snapshot_transfer::encode(&TickSnapshot::load(snapshot)?)
            .context("failed to encode snapshot"),
    }
}

/// Formats the decision as `<DIRECTION> <state> [x,y] code=<n>`.
fn decide_report(snapshot: &TickSnapshot, tactics: &Tactics) -> Result<String> {
    let grid = snapshot.grid().context("snapshot does not describe a grid")?;
    let decision = tactics.decide(&Situation::new(
        &grid,
        snapshot.position,
        &snapshot.adversaries,
    ));

    let mut report = format!("{} {}", decision.direction, decision.state);
    if let Some(target) = decision.target {
        write!(report, " {target}").context("failed to format target")?;
    }
    write!(report, " code={}", decision.direction.code()).context("failed to format code")?;
    Ok(report)
}

/// Renders the distance field top row first, `#` marking unreached cells.
fn distances_report(snapshot: &TickSnapshot, tactics: &Tactics) -> Result<String> {
    let grid = snapshot.grid().context("snapshot does not describe a grid")?;
    let field = grid.all_distances(snapshot.position, tactics.palette().obstacle);
    let distances = field.into_grid().rows();

    let width = distances
        .iter()
        .flatten()
        .filter(|&&distance| distance != UNREACHED)
        .map(|distance| distance.to_string().len())
        .max()
        .unwrap_or(1);

    let lines: Vec<String> = distances
        .iter()
        .rev()
        .map(|row| {
            row.iter()
                .map(|&distance| {
                    if distance == UNREACHED {
                        format!("{:>width$}", "#")
                    } else {
                        format!("{distance:>width$}")
                    }
                })
                .collect::<Vec<_>>()
                .join(" ")
        })
        .collect();
    Ok(lines.join("\n"))
}
