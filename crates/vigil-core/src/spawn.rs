//! Process-wide worker spawn policy
//!
//! Camera pipelines and detectors run in worker child processes. The policy
//! for how those children come to exist is process-global and must be pinned
//! during bootstrap, before any subsystem (including the logging channel)
//! gets a chance to spawn one. After bootstrap the rest of the system only
//! reads the policy via [`current`]; nothing else writes it.

use std::sync::RwLock;

/// Worker images warmed in the broker so children start faster
pub const WORKER_PRELOAD: &[&str] = &["vigil"];

/// How worker child processes are created
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpawnStrategy {
    /// Duplicate the parent process image. Unsafe once threads are running;
    /// kept only as the legacy default that bootstrap must override.
    Fork,
    /// Request a fresh, clean child from an intermediary broker process.
    Broker,
}

impl std::fmt::Display for SpawnStrategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SpawnStrategy::Fork => write!(f, "fork"),
            SpawnStrategy::Broker => write!(f, "broker"),
        }
    }
}

/// The process-global spawn policy: a strategy plus the worker images the
/// broker pre-warms.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpawnPolicy {
    pub strategy: SpawnStrategy,
    pub preload: Vec<String>,
}

impl SpawnPolicy {
    /// Broker strategy with the given preload list.
    pub fn broker(preload: &[&str]) -> Self {
        Self {
            strategy: SpawnStrategy::Broker,
            preload: preload.iter().map(|s| s.to_string()).collect(),
        }
    }
}

impl Default for SpawnPolicy {
    fn default() -> Self {
        Self {
            strategy: SpawnStrategy::Fork,
            preload: Vec::new(),
        }
    }
}

static POLICY: RwLock<Option<SpawnPolicy>> = RwLock::new(None);

/// Pin the process-global spawn policy.
///
/// Always overwrites whatever was set before; bootstrap correctness depends
/// on this call winning over any earlier configuration.
pub fn install(policy: SpawnPolicy) {
    let mut guard = match POLICY.write() {
        Ok(guard) => guard,
        Err(poisoned) => poisoned.into_inner(),
    };
    *guard = Some(policy);
}

/// Read the established spawn policy.
///
/// Before [`install`] runs this reports the legacy [`SpawnStrategy::Fork`]
/// default.
pub fn current() -> SpawnPolicy {
    let guard = match POLICY.read() {
        Ok(guard) => guard,
        Err(poisoned) => poisoned.into_inner(),
    };
    guard.clone().unwrap_or_default()
}
