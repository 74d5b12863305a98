//! # Configuration
//!
//! Centralizes all tunables with a clear override hierarchy:
//! defaults → config file → env vars → CLI flags.
//!
//! Config lives at `~/.ecosegrega/config.toml`. If missing on first run, a
//! commented-out default is generated so users can discover all options.

use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::PathBuf;
use std::time::Duration;

use crate::CameraAccess;
use crate::camera::StreamConstraints;

// ============================================================================
// Config Structs (all fields Option<T> for sparse TOML)
// ============================================================================

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct EcoConfig {
    #[serde(default)]
    pub camera: CameraConfig,
    #[serde(default)]
    pub scanner: ScannerConfig,
    #[serde(default)]
    pub assistant: AssistantConfig,
    #[serde(default)]
    pub dashboard: DashboardConfig,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct CameraConfig {
    /// "auto" or "denied"
    pub access: Option<String>,
    pub width: Option<u32>,
    pub height: Option<u32>,
    pub prompt_ms: Option<u64>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct ScannerConfig {
    pub tick_ms: Option<u64>,
    pub model_load_ms: Option<u64>,
    pub detect_probability: Option<f64>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct AssistantConfig {
    pub thinking_ms: Option<u64>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct DashboardConfig {
    pub animation_ms: Option<u64>,
}

// ============================================================================
// Defaults
// ============================================================================

pub const DEFAULT_CAMERA_PROMPT_MS: u64 = 400;
pub const DEFAULT_SCAN_TICK_MS: u64 = 1000;
pub const DEFAULT_MODEL_LOAD_MS: u64 = 2000;
pub const DEFAULT_DETECT_PROBABILITY: f64 = 0.3;
pub const DEFAULT_THINKING_MS: u64 = 1500;
pub const DEFAULT_ANIMATION_MS: u64 = 1000;

// ============================================================================
// Resolved Config (concrete values, no Options)
// ============================================================================

#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    pub camera_access: CameraAccess,
    pub constraints: StreamConstraints,
    pub camera_prompt_delay: Duration,
    pub scan_tick: Duration,
    pub model_load_delay: Duration,
    pub detect_probability: f64,
    pub thinking_delay: Duration,
    pub animation_duration: Duration,
}

impl Default for ResolvedConfig {
    fn default() -> Self {
        resolve(&EcoConfig::default(), None)
    }
}

// ============================================================================
// Error Type
// ============================================================================

#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(toml::de::Error),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "config I/O error: {e}"),
            ConfigError::Parse(e) => write!(f, "config parse error: {e}"),
        }
    }
}

impl std::error::Error for ConfigError {}

// ============================================================================
// Loading
// ============================================================================

/// Returns the path to `~/.ecosegrega/config.toml`.
pub fn config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|h| h.join(".ecosegrega").join("config.toml"))
}

/// Load config from `~/.ecosegrega/config.toml`.
///
/// If the file doesn't exist, generates a commented-out default and
/// returns `EcoConfig::default()`. If it exists but is malformed,
/// returns `ConfigError::Parse`.
pub fn load_config() -> Result<EcoConfig, ConfigError> {
    let path = match config_path() {
        Some(p) => p,
        None => {
            warn!("Could not determine home directory, using default config");
            return Ok(EcoConfig::default());
        }
    };

    if !path.exists() {
        info!("No config file found, generating default at {}", path.display());
        generate_default_config(&path);
        return Ok(EcoConfig::default());
    }

    let contents = fs::read_to_string(&path).map_err(ConfigError::Io)?;
    let config: EcoConfig = toml::from_str(&contents).map_err(ConfigError::Parse)?;
    info!("Loaded config from {}", path.display());
    debug!("Config: {:?}", config);
    Ok(config)
}

/// Generates a commented-out default config file at the given path.
fn generate_default_config(path: &PathBuf) {
    let default_content = r#"# EcoSegrega Configuration
# All settings are optional — defaults are used for anything not specified.
# Override hierarchy: defaults → this file → env vars → CLI flags.

# [camera]
# access = "auto"          # "auto" or "denied" (ECOSEGREGA_CAMERA env var, --camera flag)
# width = 640
# height = 480
# prompt_ms = 400          # Simulated permission-prompt delay

# [scanner]
# tick_ms = 1000           # Prediction loop period
# model_load_ms = 2000     # Simulated model-load delay after camera grant
# detect_probability = 0.3 # Chance per tick that an item counts as scanned

# [assistant]
# thinking_ms = 1500       # Simulated thinking delay before a reply

# [dashboard]
# animation_ms = 1000      # Counter animation duration
"#;

    if let Some(parent) = path.parent() {
        if let Err(e) = fs::create_dir_all(parent) {
            warn!("Failed to create config directory: {}", e);
            return;
        }
    }
    if let Err(e) = fs::write(path, default_content) {
        warn!("Failed to write default config: {}", e);
    }
}

// ============================================================================
// Resolution
// ============================================================================

/// Resolve the final config by collapsing: defaults → config file → env vars → CLI.
///
/// `cli_camera` is from the `--camera` flag (None = not specified).
pub fn resolve(config: &EcoConfig, cli_camera: Option<CameraAccess>) -> ResolvedConfig {
    // Camera access: CLI → env → config → default
    let camera_access = cli_camera
        .or_else(|| {
            std::env::var("ECOSEGREGA_CAMERA")
                .ok()
                .as_deref()
                .and_then(parse_camera_access)
        })
        .or_else(|| config.camera.access.as_deref().and_then(parse_camera_access))
        .unwrap_or_default();

    let defaults = StreamConstraints::default();
    let constraints = StreamConstraints {
        width: config.camera.width.unwrap_or(defaults.width),
        height: config.camera.height.unwrap_or(defaults.height),
    };

    ResolvedConfig {
        camera_access,
        constraints,
        camera_prompt_delay: Duration::from_millis(
            config.camera.prompt_ms.unwrap_or(DEFAULT_CAMERA_PROMPT_MS),
        ),
        scan_tick: Duration::from_millis(config.scanner.tick_ms.unwrap_or(DEFAULT_SCAN_TICK_MS)),
        model_load_delay: Duration::from_millis(
            config.scanner.model_load_ms.unwrap_or(DEFAULT_MODEL_LOAD_MS),
        ),
        detect_probability: config
            .scanner
            .detect_probability
            .unwrap_or(DEFAULT_DETECT_PROBABILITY)
            .clamp(0.0, 1.0),
        thinking_delay: Duration::from_millis(
            config.assistant.thinking_ms.unwrap_or(DEFAULT_THINKING_MS),
        ),
        animation_duration: Duration::from_millis(
            config.dashboard.animation_ms.unwrap_or(DEFAULT_ANIMATION_MS),
        ),
    }
}

fn parse_camera_access(value: &str) -> Option<CameraAccess> {
    match value.to_ascii_lowercase().as_str() {
        "auto" => Some(CameraAccess::Auto),
        "denied" => Some(CameraAccess::Denied),
        other => {
            warn!("Unknown camera access value {:?}, ignoring", other);
            None
        }
    }
}
