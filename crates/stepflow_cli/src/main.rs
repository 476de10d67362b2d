//! `stepflow [CONFIG.yaml]`
//!
//! Integrates the Lorenz system and prints the trajectory to stdout. Without a
//! config file the Euler stepper runs from (1, 0, 0) over [0, 1) with dt = 0.01.
//! Set `RUST_LOG=debug` for run diagnostics on stderr.

mod config;
mod output;
mod run;

use anyhow::Result;
use config::RunConfig;
use log::info;
use std::env;
use std::io::{self, BufWriter};
use std::path::PathBuf;

fn main() -> Result<()> {
    env_logger::init();

    let config = match env::args_os().nth(1) {
        Some(path) => {
            let path = PathBuf::from(path);
            info!("loading run configuration from {}", path.display());
            config::load_config(&path)?
        }
        None => RunConfig::default(),
    };

    let stdout = io::stdout();
    let steps = run::run(&config, BufWriter::new(stdout.lock()))?;
    info!("wrote {} observations", steps);
    Ok(())
}
