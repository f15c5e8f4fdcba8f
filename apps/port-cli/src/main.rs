//! port — run the oil port simulation and print its results.
//!
//! ```bash
//! # One week, 10 tugs, 20 wharves
//! port
//!
//! # Three days with the safe dispatch policy and a CSV trace
//! port --days 3 --safe --seed 7 --trace-dir ./trace
//! ```

mod args;


use std::time::Instant;

use anyhow::Result;
use clap::Parser;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use port_output::{CsvTraceWriter, OutputObserver, Summary};
use port_sim::{NoopObserver, PortSimBuilder};

use args::Args;

fn main() -> Result<()> {
    let args = Args::parse();

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(args.log_level()));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let config = args.resolve_config()?;
    println!(
        "Port: {} wharves, {} tugs  |  Horizon: {}  |  Policy: {}",
        config.max_wharves, config.max_tugs, config.horizon, config.policy
    );

    let mut sim = PortSimBuilder::stochastic(config)?.audit(args.audit).build()?;

    let t0 = Instant::now();
    match &args.trace_dir {
        Some(dir) => {
            let mut obs = OutputObserver::new(CsvTraceWriter::new(dir)?);
            sim.run(&mut obs)?;
            if let Some(e) = obs.take_error() {
                error!(error = %e, "trace output incomplete");
            } else {
                info!(dir = %dir.display(), "trace written");
            }
        }
        None => sim.run(&mut NoopObserver)?,
    }
    let elapsed = t0.elapsed();

    println!("Simulation complete in {:.3} s", elapsed.as_secs_f64());
    println!("{}", Summary::from_view(&sim.view()));
    Ok(())
}
