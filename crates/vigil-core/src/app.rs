//! Application lifecycle object
//!
//! The bootstrap coordinator constructs an [`App`] from a validated config
//! and calls [`App::start`] exactly once. Everything after that point is the
//! application's concern; the coordinator never observes it again.

use crate::config::VigilConfig;
use crate::spawn;
use std::thread;

/// The Vigil application.
pub struct App {
    config: VigilConfig,
}

impl App {
    /// Build the application around a validated configuration.
    pub fn new(config: VigilConfig) -> Self {
        Self { config }
    }

    /// Start the application and run until the process is told to exit.
    ///
    /// Termination arrives as a signal handled during bootstrap; there is no
    /// return path out of the run loop.
    pub fn start(self) {
        let policy = spawn::current();

        tracing::info!(
            cameras = self.config.cameras.len(),
            spawn_strategy = %policy.strategy,
            "vigil started"
        );

        for (name, camera) in &self.config.cameras {
            if camera.enabled {
                tracing::debug!(camera = %name, detect_fps = camera.detect.fps, "camera configured");
            } else {
                tracing::debug!(camera = %name, "camera disabled");
            }
        }

        // TODO: spawn the camera pipeline workers here once the capture and
        // detection crates land; until then the control thread just waits
        // for the termination signal.
        loop {
            thread::park();
        }
    }

    /// The configuration the application was started with.
    pub fn config(&self) -> &VigilConfig {
        &self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_app_holds_config_unchanged() {
        let config = VigilConfig::default();
        let app = App::new(config.clone());
        assert_eq!(app.config(), &config);
    }
}
