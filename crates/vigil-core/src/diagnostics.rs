//! Crash diagnostics
//!
//! Installed first during bootstrap, before logging exists, so output goes
//! straight to stderr.

use std::backtrace::Backtrace;
use std::panic;

/// Install a process-wide panic hook that prints the panic payload and a
/// captured backtrace to stderr.
///
/// Unlike the default hook this captures the trace unconditionally, so a
/// crash in production still leaves something to work with even when
/// `RUST_BACKTRACE` is unset.
pub fn install_panic_hook() {
    panic::set_hook(Box::new(|info| {
        let backtrace = Backtrace::force_capture();
        eprintln!("fatal: {info}");
        eprintln!("{backtrace}");
    }));
}
