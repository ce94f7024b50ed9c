//! Error types for Vigil

use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// A single configuration validation finding.
///
/// Carries the location of the offending value as a sequence of path
/// segments, joined with `.` for display, plus a human-readable message.
/// The loader reports these in a stable order so repeated validation runs
/// of the same file produce identical output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationIssue {
    /// Path segments locating the invalid value, e.g. `["cameras", "front", "inputs"]`
    pub location: Vec<String>,
    /// What is wrong with the value at that location
    pub message: String,
}

impl ValidationIssue {
    /// Create an issue from any iterable of path segments.
    pub fn new<L, S>(location: L, message: impl Into<String>) -> Self
    where
        L: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            location: location.into_iter().map(Into::into).collect(),
            message: message.into(),
        }
    }

    /// The location joined with `.`, e.g. `cameras.front.inputs`.
    pub fn dotted_location(&self) -> String {
        self.location.join(".")
    }
}

impl fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.dotted_location(), self.message)
    }
}

/// Configuration-related errors
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to determine the platform config directory
    #[error("Could not determine config directory")]
    NoConfigDirectory,

    /// Config file does not exist and installing a default was not requested
    #[error("Config file not found: {0}")]
    NotFound(PathBuf),

    /// The config file parsed or validated with errors.
    ///
    /// Covers both structural failures (malformed JSON, unknown fields) and
    /// semantic ones; either way the caller gets the full ordered issue list.
    #[error("Config validation failed with {} error(s)", .0.len())]
    Invalid(Vec<ValidationIssue>),

    /// IO error during config operations
    #[error("Config IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for vigil-core operations
pub type Result<T> = std::result::Result<T, ConfigError>;
