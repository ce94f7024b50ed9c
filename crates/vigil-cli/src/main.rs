//! Vigil CLI - process bootstrap for the Vigil recorder
//!
//! Establishes the process environment in a fixed order, validates the
//! configuration, and hands control to the application exactly once. Each
//! step must complete before the next begins; the only recoverable-enough
//! failure is an invalid config, which is reported and terminates the
//! process.

use clap::Parser;
use vigil_core::{diagnostics, log, spawn, App, ConfigError, SpawnPolicy, VigilConfig};

mod output;

/// Exit codes for the CLI
#[derive(Debug, Clone, Copy)]
#[repr(i32)]
pub enum ExitCode {
    Success = 0,
    ConfigInvalid = 1,
}

impl From<ExitCode> for i32 {
    fn from(code: ExitCode) -> Self {
        code as i32
    }
}

/// Vigil - record and watch IP cameras with realtime local detection
#[derive(Parser)]
#[command(name = "vigil", version, about, long_about = None)]
struct Cli {
    /// Validate the config file and exit without starting the recorder
    #[arg(long)]
    validate_config: bool,
}

fn main() {
    // Crash diagnostics first, so even a failure in bootstrap leaves a trace.
    diagnostics::install_panic_hook();

    // The spawn policy must be pinned before any subsystem can create a
    // child process, the logging channel included.
    spawn::install(SpawnPolicy::broker(spawn::WORKER_PRELOAD));

    log::setup();

    // Attribute diagnostics from the main control thread to "vigil".
    let span = tracing::info_span!("vigil");
    let _main = span.enter();

    // Exit cleanly on a termination signal, including one delivered while
    // the config load below is still blocking.
    ctrlc::set_handler(|| std::process::exit(ExitCode::Success.into()))
        .expect("failed to install termination handler");

    let cli = Cli::parse();

    let config = match VigilConfig::load(true) {
        Ok(config) => config,
        Err(ConfigError::Invalid(issues)) => {
            print!("{}", output::invalid_banner(&issues));
            std::process::exit(ExitCode::ConfigInvalid.into());
        }
        Err(e) => {
            eprintln!("vigil: {e}");
            std::process::exit(ExitCode::ConfigInvalid.into());
        }
    };

    if cli.validate_config {
        print!("{}", output::valid_banner());
        std::process::exit(ExitCode::Success.into());
    }

    App::new(config).start();
}
