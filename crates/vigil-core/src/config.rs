//! Configuration loading and validation for Vigil
//!
//! The loader resolves the config file location, optionally installs a
//! commented default when the file is missing, parses it, and runs semantic
//! validation. Every failure surfaces as [`ConfigError::Invalid`] carrying an
//! ordered list of [`ValidationIssue`]s, so callers can report all problems
//! at once instead of fixing them one by one.

use crate::error::{ConfigError, Result, ValidationIssue};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

/// Configuration file name
const CONFIG_FILE_NAME: &str = "config.json";

/// Detect framerates outside this range are rejected.
const DETECT_FPS_RANGE: std::ops::RangeInclusive<u32> = 1..=60;

/// Top-level Vigil configuration.
///
/// Cameras live in a `BTreeMap` so validation issues come out in a stable
/// order regardless of how the file lists them.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct VigilConfig {
    /// Logging levels
    #[serde(default)]
    pub logger: LoggerConfig,
    /// Recording database settings
    #[serde(default)]
    pub database: DatabaseConfig,
    /// Cameras keyed by name
    #[serde(default)]
    pub cameras: BTreeMap<String, CameraConfig>,
}

/// Logging configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct LoggerConfig {
    /// Default level for all targets
    #[serde(default)]
    pub default: LogLevel,
}

/// Log level names accepted in the config file
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Debug,
    #[default]
    Info,
    Warning,
    Error,
}

/// Recording database configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct DatabaseConfig {
    /// Path to the sqlite database file
    #[serde(default = "default_database_path")]
    pub path: PathBuf,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: default_database_path(),
        }
    }
}

fn default_database_path() -> PathBuf {
    PathBuf::from("vigil.db")
}

/// Per-camera configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct CameraConfig {
    /// Whether the camera participates in recording and detection
    #[serde(default = "default_true")]
    pub enabled: bool,
    /// Video sources for this camera
    #[serde(default)]
    pub inputs: Vec<InputConfig>,
    /// Object detection settings
    #[serde(default)]
    pub detect: DetectConfig,
    /// Recording retention settings
    #[serde(default)]
    pub retain: RetainConfig,
}

/// A single video source
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct InputConfig {
    /// Stream URL or device path
    pub path: String,
    /// What this stream feeds
    #[serde(default)]
    pub roles: Vec<InputRole>,
}

/// The consumer of an input stream
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum InputRole {
    /// Feeds the object detection pipeline
    Detect,
    /// Feeds the recorder
    Record,
}

/// Object detection settings for a camera
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct DetectConfig {
    /// Whether detection runs for this camera
    #[serde(default = "default_true")]
    pub enabled: bool,
    /// Frames per second fed to the detector
    #[serde(default = "default_detect_fps")]
    pub fps: u32,
    /// Detection frame width
    #[serde(default = "default_detect_width")]
    pub width: u32,
    /// Detection frame height
    #[serde(default = "default_detect_height")]
    pub height: u32,
}

impl Default for DetectConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            fps: default_detect_fps(),
            width: default_detect_width(),
            height: default_detect_height(),
        }
    }
}

/// Recording retention settings for a camera
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct RetainConfig {
    /// How many days of footage to keep
    #[serde(default = "default_retain_days")]
    pub days: u32,
    /// Which footage to keep
    #[serde(default)]
    pub mode: RetainMode,
}

impl Default for RetainConfig {
    fn default() -> Self {
        Self {
            days: default_retain_days(),
            mode: RetainMode::default(),
        }
    }
}

/// Retention policy for recorded footage
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum RetainMode {
    /// Keep everything
    All,
    /// Keep segments with motion (default)
    #[default]
    Motion,
    /// Keep segments with tracked objects
    ActiveObjects,
}

fn default_true() -> bool {
    true
}

fn default_detect_fps() -> u32 {
    5
}

fn default_detect_width() -> u32 {
    1280
}

fn default_detect_height() -> u32 {
    720
}

fn default_retain_days() -> u32 {
    10
}

impl VigilConfig {
    /// Load the configuration from the default location.
    ///
    /// The location is `$VIGIL_CONFIG_HOME/config.json` when the override
    /// variable is set (useful for CLI testing), otherwise the platform
    /// config directory:
    ///
    /// - macOS: ~/Library/Application Support/vigil/
    /// - Linux: $XDG_CONFIG_HOME/vigil/
    /// - Windows: %APPDATA%\vigil\
    ///
    /// With `install` set, a default config file is written first if none
    /// exists, so a fresh install boots without manual setup.
    pub fn load(install: bool) -> Result<Self> {
        let path = Self::default_path()?;
        Self::load_from(&path, install)
    }

    /// Load the configuration from an explicit path.
    ///
    /// This is the primary loader, supporting dependency injection for
    /// testing without environment variable manipulation.
    pub fn load_from(path: &Path, install: bool) -> Result<Self> {
        if !path.exists() {
            if !install {
                return Err(ConfigError::NotFound(path.to_path_buf()));
            }
            Self::install_default(path)?;
        }

        let contents = fs::read_to_string(path)?;
        let config: VigilConfig = serde_json::from_str(&contents).map_err(|e| {
            ConfigError::Invalid(vec![ValidationIssue::new(["config"], e.to_string())])
        })?;

        config.validate()?;

        Ok(config)
    }

    /// Resolve the default config file path.
    pub fn default_path() -> Result<PathBuf> {
        if let Ok(override_path) = std::env::var("VIGIL_CONFIG_HOME") {
            return Ok(PathBuf::from(override_path).join(CONFIG_FILE_NAME));
        }

        let project_dirs =
            ProjectDirs::from("", "", "vigil").ok_or(ConfigError::NoConfigDirectory)?;

        Ok(project_dirs.config_dir().join(CONFIG_FILE_NAME))
    }

    /// Write a default config file at `path`, creating parent directories.
    fn install_default(path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let contents = serde_json::to_string_pretty(&VigilConfig::default())
            .map_err(|e| ConfigError::Io(e.into()))?;
        fs::write(path, contents)?;

        tracing::info!(path = %path.display(), "installed default config");

        Ok(())
    }

    /// Run semantic validation, returning all findings at once.
    pub fn validate(&self) -> Result<()> {
        let issues = self.collect_issues();
        if issues.is_empty() {
            Ok(())
        } else {
            Err(ConfigError::Invalid(issues))
        }
    }

    fn collect_issues(&self) -> Vec<ValidationIssue> {
        let mut issues = Vec::new();

        if self.database.path.as_os_str().is_empty() {
            issues.push(ValidationIssue::new(
                ["database", "path"],
                "database path cannot be empty",
            ));
        }

        for (name, camera) in &self.cameras {
            camera_issues(name, camera, &mut issues);
        }

        issues
    }
}

/// Maximum length for camera names
pub const MAX_CAMERA_NAME_LENGTH: usize = 64;

/// Check a camera name for use in file paths and thread names.
///
/// Names must be 1-64 characters of alphanumerics, underscores, and hyphens.
pub fn validate_camera_name(name: &str) -> std::result::Result<(), String> {
    if name.is_empty() || name.len() > MAX_CAMERA_NAME_LENGTH {
        return Err(format!(
            "camera name must be 1-{} characters, got {}",
            MAX_CAMERA_NAME_LENGTH,
            name.len()
        ));
    }

    if !name
        .chars()
        .all(|c| c.is_alphanumeric() || c == '_' || c == '-')
    {
        return Err(
            "camera name can only contain alphanumeric characters, underscores, and hyphens"
                .to_string(),
        );
    }

    Ok(())
}

fn camera_issues(name: &str, camera: &CameraConfig, issues: &mut Vec<ValidationIssue>) {
    if let Err(message) = validate_camera_name(name) {
        issues.push(ValidationIssue::new(["cameras", name], message));
    }

    if camera.inputs.is_empty() {
        issues.push(ValidationIssue::new(
            ["cameras", name, "inputs"],
            "at least one input is required",
        ));
    }

    for (index, input) in camera.inputs.iter().enumerate() {
        if input.path.trim().is_empty() {
            let index = index.to_string();
            issues.push(ValidationIssue::new(
                ["cameras", name, "inputs", index.as_str()],
                "input path cannot be empty",
            ));
        }
    }

    let detect_inputs = camera
        .inputs
        .iter()
        .filter(|input| input.roles.contains(&InputRole::Detect))
        .count();

    if camera.detect.enabled && !camera.inputs.is_empty() && detect_inputs == 0 {
        issues.push(ValidationIssue::new(
            ["cameras", name, "detect"],
            "detect is enabled but no input has the detect role",
        ));
    }

    if detect_inputs > 1 {
        issues.push(ValidationIssue::new(
            ["cameras", name, "inputs"],
            "the detect role is assigned to more than one input",
        ));
    }

    if !DETECT_FPS_RANGE.contains(&camera.detect.fps) {
        issues.push(ValidationIssue::new(
            ["cameras", name, "detect", "fps"],
            format!(
                "detect fps must be between {} and {}",
                DETECT_FPS_RANGE.start(),
                DETECT_FPS_RANGE.end()
            ),
        ));
    }

    if camera.detect.width == 0 || camera.detect.height == 0 {
        issues.push(ValidationIssue::new(
            ["cameras", name, "detect"],
            "detect resolution must be non-zero",
        ));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn config_path(temp: &TempDir) -> PathBuf {
        temp.path().join(CONFIG_FILE_NAME)
    }

    fn write_config(temp: &TempDir, contents: &str) -> PathBuf {
        let path = config_path(temp);
        fs::write(&path, contents).unwrap();
        path
    }

    fn camera_with_input(path: &str, roles: Vec<InputRole>) -> CameraConfig {
        CameraConfig {
            enabled: true,
            inputs: vec![InputConfig {
                path: path.to_string(),
                roles,
            }],
            detect: DetectConfig::default(),
            retain: RetainConfig::default(),
        }
    }

    #[test]
    fn test_default_config_is_valid() {
        let config = VigilConfig::default();
        assert!(config.validate().is_ok());
        assert!(config.cameras.is_empty());
    }

    #[test]
    fn test_load_missing_without_install_fails() {
        let temp = TempDir::new().unwrap();
        let err = VigilConfig::load_from(&config_path(&temp), false).unwrap_err();
        assert!(matches!(err, ConfigError::NotFound(_)));
    }

    #[test]
    fn test_load_missing_with_install_writes_default() {
        let temp = TempDir::new().unwrap();
        let path = config_path(&temp);

        let config = VigilConfig::load_from(&path, true).unwrap();

        assert!(path.exists());
        assert_eq!(config, VigilConfig::default());
    }

    #[test]
    fn test_load_valid_config() {
        let temp = TempDir::new().unwrap();
        let path = write_config(
            &temp,
            r#"{
                "cameras": {
                    "front": {
                        "inputs": [
                            { "path": "rtsp://10.0.0.2/main", "roles": ["detect", "record"] }
                        ]
                    }
                }
            }"#,
        );

        let config = VigilConfig::load_from(&path, false).unwrap();

        assert_eq!(config.cameras.len(), 1);
        let front = &config.cameras["front"];
        assert!(front.enabled);
        assert_eq!(front.detect.fps, 5);
        assert_eq!(front.retain.days, 10);
        assert_eq!(front.retain.mode, RetainMode::Motion);
    }

    #[test]
    fn test_malformed_json_reports_structured_issue() {
        let temp = TempDir::new().unwrap();
        let path = write_config(&temp, "{ not json");

        let err = VigilConfig::load_from(&path, false).unwrap_err();

        match err {
            ConfigError::Invalid(issues) => {
                assert_eq!(issues.len(), 1);
                assert_eq!(issues[0].dotted_location(), "config");
            }
            other => panic!("expected Invalid, got {other:?}"),
        }
    }

    #[test]
    fn test_unknown_field_reports_structured_issue() {
        let temp = TempDir::new().unwrap();
        let path = write_config(&temp, r#"{ "camera": {} }"#);

        let err = VigilConfig::load_from(&path, false).unwrap_err();

        match err {
            ConfigError::Invalid(issues) => {
                assert!(issues[0].message.contains("unknown field"));
            }
            other => panic!("expected Invalid, got {other:?}"),
        }
    }

    #[test]
    fn test_camera_without_inputs_is_invalid() {
        let mut config = VigilConfig::default();
        config.cameras.insert(
            "front".to_string(),
            CameraConfig {
                enabled: true,
                inputs: Vec::new(),
                detect: DetectConfig::default(),
                retain: RetainConfig::default(),
            },
        );

        let err = config.validate().unwrap_err();
        match err {
            ConfigError::Invalid(issues) => {
                assert_eq!(issues.len(), 1);
                assert_eq!(
                    issues[0].to_string(),
                    "cameras.front.inputs: at least one input is required"
                );
            }
            other => panic!("expected Invalid, got {other:?}"),
        }
    }

    #[test]
    fn test_detect_enabled_requires_detect_role() {
        let mut config = VigilConfig::default();
        config.cameras.insert(
            "front".to_string(),
            camera_with_input("rtsp://10.0.0.2/main", vec![InputRole::Record]),
        );

        let err = config.validate().unwrap_err();
        match err {
            ConfigError::Invalid(issues) => {
                assert_eq!(issues[0].dotted_location(), "cameras.front.detect");
            }
            other => panic!("expected Invalid, got {other:?}"),
        }
    }

    #[test]
    fn test_detect_role_assigned_once() {
        let mut config = VigilConfig::default();
        let mut camera = camera_with_input("rtsp://10.0.0.2/main", vec![InputRole::Detect]);
        camera.inputs.push(InputConfig {
            path: "rtsp://10.0.0.2/sub".to_string(),
            roles: vec![InputRole::Detect],
        });
        config.cameras.insert("front".to_string(), camera);

        let err = config.validate().unwrap_err();
        match err {
            ConfigError::Invalid(issues) => {
                assert!(issues
                    .iter()
                    .any(|i| i.message.contains("more than one input")));
            }
            other => panic!("expected Invalid, got {other:?}"),
        }
    }

    #[test]
    fn test_detect_fps_bounds() {
        let mut config = VigilConfig::default();
        let mut camera = camera_with_input("rtsp://10.0.0.2/main", vec![InputRole::Detect]);
        camera.detect.fps = 0;
        config.cameras.insert("front".to_string(), camera);

        let err = config.validate().unwrap_err();
        match err {
            ConfigError::Invalid(issues) => {
                assert_eq!(issues[0].dotted_location(), "cameras.front.detect.fps");
                assert_eq!(issues[0].message, "detect fps must be between 1 and 60");
            }
            other => panic!("expected Invalid, got {other:?}"),
        }
    }

    #[test]
    fn test_bad_camera_name_is_reported() {
        let mut config = VigilConfig::default();
        config.cameras.insert(
            "front door!".to_string(),
            camera_with_input("rtsp://10.0.0.2/main", vec![InputRole::Detect]),
        );

        let err = config.validate().unwrap_err();
        match err {
            ConfigError::Invalid(issues) => {
                assert_eq!(issues[0].dotted_location(), "cameras.front door!");
                assert!(issues[0].message.contains("alphanumeric"));
            }
            other => panic!("expected Invalid, got {other:?}"),
        }
    }

    #[test]
    fn test_issues_ordered_by_camera_name() {
        let mut config = VigilConfig::default();
        for name in ["zebra", "alpha", "mid"] {
            config.cameras.insert(
                name.to_string(),
                CameraConfig {
                    enabled: true,
                    inputs: Vec::new(),
                    detect: DetectConfig::default(),
                    retain: RetainConfig::default(),
                },
            );
        }

        let err = config.validate().unwrap_err();
        match err {
            ConfigError::Invalid(issues) => {
                let locations: Vec<String> =
                    issues.iter().map(|i| i.dotted_location()).collect();
                assert_eq!(
                    locations,
                    vec![
                        "cameras.alpha.inputs",
                        "cameras.mid.inputs",
                        "cameras.zebra.inputs"
                    ]
                );
            }
            other => panic!("expected Invalid, got {other:?}"),
        }
    }

    #[test]
    fn test_validation_is_idempotent() {
        let temp = TempDir::new().unwrap();
        let path = write_config(
            &temp,
            r#"{ "cameras": { "front": {}, "back": {} } }"#,
        );

        let first = VigilConfig::load_from(&path, false).unwrap_err();
        let second = VigilConfig::load_from(&path, false).unwrap_err();

        match (first, second) {
            (ConfigError::Invalid(a), ConfigError::Invalid(b)) => assert_eq!(a, b),
            other => panic!("expected Invalid twice, got {other:?}"),
        }
    }

    #[test]
    fn test_validate_camera_name() {
        assert!(validate_camera_name("front-door").is_ok());
        assert!(validate_camera_name("cam_02").is_ok());
        assert!(validate_camera_name("").is_err());
        assert!(validate_camera_name("front door").is_err());
        assert!(validate_camera_name(&"x".repeat(65)).is_err());
    }
}
