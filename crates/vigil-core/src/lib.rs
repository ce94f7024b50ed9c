//! Vigil Core Library
//!
//! This crate provides the core pieces the Vigil bootstrap depends on:
//! configuration loading and validation, the asynchronous logging channel,
//! the process-wide worker spawn policy, crash diagnostics, and the
//! application lifecycle object.
//!
//! # Example
//!
//! ```no_run
//! use vigil_core::{diagnostics, log, spawn, App, SpawnPolicy, VigilConfig};
//!
//! // Establish the process environment, in order.
//! diagnostics::install_panic_hook();
//! spawn::install(SpawnPolicy::broker(spawn::WORKER_PRELOAD));
//! log::setup();
//!
//! // Load the config, installing a default file if none exists.
//! let config = VigilConfig::load(true).unwrap();
//!
//! // Hand off to the application.
//! App::new(config).start();
//! ```

pub mod app;
pub mod config;
pub mod diagnostics;
pub mod error;
pub mod log;
pub mod spawn;

// Re-export commonly used types
pub use app::App;
pub use config::{
    validate_camera_name, CameraConfig, DetectConfig, InputConfig, InputRole, LogLevel,
    LoggerConfig, RetainConfig, RetainMode, VigilConfig,
};
pub use error::{ConfigError, Result, ValidationIssue};
pub use spawn::{SpawnPolicy, SpawnStrategy};
