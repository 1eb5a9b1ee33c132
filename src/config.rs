use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use clap::Parser;
use tracing::Level;

use crate::constants::{DEFAULT_CELL_HEIGHT, DEFAULT_CELL_WIDTH};
use crate::desktop::Placement;
use crate::error::DeskError;
use crate::geometry::CellMetrics;

#[derive(Parser, Debug)]
#[command(
    name = "retro-desk",
    version = env!("CARGO_PKG_VERSION"),
    about = "A retro desktop with floating windows, in your terminal"
)]
pub struct Cli {
    /// Width of one terminal cell in desktop pixels.
    #[arg(long, value_name = "PX", default_value_t = DEFAULT_CELL_WIDTH)]
    pub cell_width: u16,

    /// Height of one terminal cell in desktop pixels.
    #[arg(long, value_name = "PX", default_value_t = DEFAULT_CELL_HEIGHT)]
    pub cell_height: u16,

    /// Event poll and redraw interval.
    #[arg(long, value_name = "MS", default_value_t = 16)]
    pub tick_ms: u64,

    /// Seed for new-window placement, for repeatable layouts.
    #[arg(long, value_name = "N")]
    pub seed: Option<u64>,

    /// Write logs to this file. Without it logs are discarded.
    #[arg(long, value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    #[arg(long, value_name = "LEVEL", default_value = "info")]
    pub log_level: String,
}

/// Validated runtime settings.
#[derive(Debug, Clone)]
pub struct DeskConfig {
    pub metrics: CellMetrics,
    pub tick: Duration,
    pub seed: Option<u64>,
    pub log_file: Option<PathBuf>,
    pub log_level: Level,
}

impl DeskConfig {
    pub fn placement(&self) -> Placement {
        match self.seed {
            Some(seed) => Placement::seeded(seed),
            None => Placement::from_entropy(),
        }
    }
}

impl TryFrom<Cli> for DeskConfig {
    type Error = DeskError;

    fn try_from(cli: Cli) -> Result<Self, Self::Error> {
        if !(1..=64).contains(&cli.cell_width) {
            return Err(DeskError::Config(
                "cell width must be between 1 and 64 pixels".to_string(),
            ));
        }
        if !(1..=64).contains(&cli.cell_height) {
            return Err(DeskError::Config(
                "cell height must be between 1 and 64 pixels".to_string(),
            ));
        }
        if !(1..=1000).contains(&cli.tick_ms) {
            return Err(DeskError::Config(
                "tick must be between 1 and 1000 ms".to_string(),
            ));
        }
        let log_level = Level::from_str(&cli.log_level)
            .map_err(|_| DeskError::Config(format!("unknown log level '{}'", cli.log_level)))?;
        Ok(Self {
            metrics: CellMetrics::new(cli.cell_width, cli.cell_height),
            tick: Duration::from_millis(cli.tick_ms),
            seed: cli.seed,
            log_file: cli.log_file,
            log_level,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Result<DeskConfig, DeskError> {
        let cli = Cli::try_parse_from(std::iter::once("retro-desk").chain(args.iter().copied()))
            .expect("arguments parse");
        DeskConfig::try_from(cli)
    }

    #[test]
    fn defaults() {
        let config = parse(&[]).unwrap();
        assert_eq!(config.metrics, CellMetrics::default());
        assert_eq!(config.tick, Duration::from_millis(16));
        assert_eq!(config.log_level, Level::INFO);
        assert!(config.seed.is_none());
        assert!(config.log_file.is_none());
    }

    #[test]
    fn explicit_values() {
        let config = parse(&[
            "--cell-width",
            "10",
            "--cell-height",
            "20",
            "--tick-ms",
            "50",
            "--seed",
            "3",
            "--log-level",
            "debug",
        ])
        .unwrap();
        assert_eq!(config.metrics, CellMetrics::new(10, 20));
        assert_eq!(config.tick, Duration::from_millis(50));
        assert_eq!(config.seed, Some(3));
        assert_eq!(config.log_level, Level::DEBUG);
    }

    #[test]
    fn out_of_range_values_are_rejected() {
        assert!(matches!(parse(&["--cell-width", "0"]), Err(DeskError::Config(_))));
        assert!(matches!(parse(&["--cell-height", "65"]), Err(DeskError::Config(_))));
        assert!(matches!(parse(&["--tick-ms", "0"]), Err(DeskError::Config(_))));
        assert!(matches!(parse(&["--log-level", "loud"]), Err(DeskError::Config(_))));
    }
}
