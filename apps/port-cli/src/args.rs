//! Command-line flags and how they combine with a JSON config file.

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use port_core::{DispatchPolicy, PortConfig, SimTime};

/// Discrete-event simulation of an oil port: tankers, tugs and wharves.
#[derive(Parser, Debug)]
#[command(name = "port")]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Days to simulate (summed with --hours and --mins; one week if none given).
    #[arg(short, long)]
    pub days: Option<u64>,

    /// Hours to simulate.
    #[arg(short = 'H', long)]
    pub hours: Option<u64>,

    /// Minutes to simulate.
    #[arg(short, long)]
    pub mins: Option<u64>,

    /// Number of tugs [default: 10].
    #[arg(short, long)]
    pub tugs: Option<usize>,

    /// Number of wharves [default: 20].
    #[arg(short, long)]
    pub wharves: Option<usize>,

    /// Send freed tugs to finished tankers before waiting ones.
    #[arg(long)]
    pub safe: bool,

    /// RNG seed; OS entropy when unset.
    #[arg(long)]
    pub seed: Option<u64>,

    /// JSON file with a full or partial configuration; flags override it.
    #[arg(long, value_name = "JSON")]
    pub config: Option<PathBuf>,

    /// Write port_trace.csv and departures.csv into this directory.
    #[arg(long, value_name = "DIR")]
    pub trace_dir: Option<PathBuf>,

    /// Check every invariant after each event.
    #[arg(long)]
    pub audit: bool,

    /// More log output (-v debug, -vv trace).  RUST_LOG takes precedence.
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

impl Args {
    /// Default log level for the verbosity count.
    pub fn log_level(&self) -> &'static str {
        match self.verbose {
            0 => "info",
            1 => "debug",
            _ => "trace",
        }
    }

    /// The horizon given on the command line, if any part of it was.
    pub fn horizon(&self) -> Option<SimTime> {
        if self.days.is_none() && self.hours.is_none() && self.mins.is_none() {
            return None;
        }
        Some(SimTime::from_dhm(
            self.days.unwrap_or(0),
            self.hours.unwrap_or(0),
            self.mins.unwrap_or(0),
        ))
    }

    /// Load `--config` (or the defaults) and apply the flags on top.
    pub fn resolve_config(&self) -> Result<PortConfig> {
        let mut config = match &self.config {
            Some(path) => {
                let text = fs::read_to_string(path)
                    .with_context(|| format!("reading config {}", path.display()))?;
                serde_json::from_str(&text)
                    .with_context(|| format!("parsing config {}", path.display()))?
            }
            None => PortConfig::default(),
        };
        self.apply(&mut config);
        Ok(config)
    }

    fn apply(&self, config: &mut PortConfig) {
        if let Some(horizon) = self.horizon() {
            config.horizon = horizon;
        }
        if let Some(tugs) = self.tugs {
            config.max_tugs = tugs;
        }
        if let Some(wharves) = self.wharves {
            config.max_wharves = wharves;
        }
        if self.safe {
            config.policy = DispatchPolicy::WharfFirst;
        }
        if self.seed.is_some() {
            config.seed = self.seed;
        }
    }
}
