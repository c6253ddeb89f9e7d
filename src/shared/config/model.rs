use serde::Deserialize;
use std::env;
use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("Failed to load configuration: {0}")]
    Load(#[from] config::ConfigError),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

#[derive(Debug, Default, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub monitor: MonitorConfig,
    #[serde(default)]
    pub capture: CaptureConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Deserialize)]
pub struct MonitorConfig {
    /// How often the poller samples host memory, in milliseconds
    #[serde(default = "default_poll_interval_ms")]
    pub poll_interval_ms: u64,
    /// Active/total ratio above which a snapshot is requested
    #[serde(default = "default_danger_threshold")]
    pub danger_threshold: f64,
}

#[derive(Debug, Deserialize)]
pub struct CaptureConfig {
    #[serde(default = "default_output_dir")]
    pub output_dir: String,
    #[serde(default = "default_file_prefix")]
    pub file_prefix: String,
    /// Minimum quiet period after a capture finishes (0 = back-to-back allowed)
    #[serde(default)]
    pub cooldown_secs: u64,
    /// Force-reset a stuck capture after this many seconds (0 = never)
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

#[derive(Debug, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_dir")]
    pub log_dir: String,
    #[serde(default = "default_stdout_level")]
    pub stdout_level: String,
    #[serde(default = "default_file_level")]
    pub file_level: String,
}

fn default_poll_interval_ms() -> u64 {
    5_000
}

fn default_danger_threshold() -> f64 {
    0.5
}

fn default_output_dir() -> String {
    "data/heapdumps".to_string()
}

fn default_file_prefix() -> String {
    "heap".to_string()
}

fn default_timeout_secs() -> u64 {
    120
}

fn default_log_dir() -> String {
    "logs".to_string()
}

fn default_stdout_level() -> String {
    "info".to_string()
}

fn default_file_level() -> String {
    "debug".to_string()
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self {
            poll_interval_ms: default_poll_interval_ms(),
            danger_threshold: default_danger_threshold(),
        }
    }
}

impl Default for CaptureConfig {
    fn default() -> Self {
        Self {
            output_dir: default_output_dir(),
            file_prefix: default_file_prefix(),
            cooldown_secs: 0,
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            log_dir: default_log_dir(),
            stdout_level: default_stdout_level(),
            file_level: default_file_level(),
        }
    }
}

impl MonitorConfig {
    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }
}

impl CaptureConfig {
    pub fn cooldown(&self) -> Duration {
        Duration::from_secs(self.cooldown_secs)
    }

    pub fn timeout(&self) -> Option<Duration> {
        (self.timeout_secs > 0).then(|| Duration::from_secs(self.timeout_secs))
    }
}

impl Settings {
    /// Loads settings from `path` (extension optional, file optional),
    /// then applies `HEAP_SENTRY_<SECTION>__<KEY>` environment overrides.
    pub fn load_from(path: &str) -> Result<Settings, SettingsError> {
        let settings: Settings = config::Config::builder()
            .add_source(config::File::with_name(path).required(false))
            .add_source(config::Environment::with_prefix("HEAP_SENTRY").separator("__"))
            .build()?
            .try_deserialize()?;

        settings.validate()?;
        Ok(settings)
    }

    pub fn validate(&self) -> Result<(), SettingsError> {
        let threshold = self.monitor.danger_threshold;
        if !threshold.is_finite() || !(0.0..=1.0).contains(&threshold) {
            return Err(SettingsError::Invalid(format!(
                "monitor.danger_threshold must be within [0, 1], got {}",
                threshold
            )));
        }
        if self.monitor.poll_interval_ms == 0 {
            return Err(SettingsError::Invalid(
                "monitor.poll_interval_ms must be greater than zero".to_string(),
            ));
        }
        if self.capture.output_dir.trim().is_empty() {
            return Err(SettingsError::Invalid(
                "capture.output_dir must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}

pub fn load_settings() -> Result<Settings, SettingsError> {
    let config_path = env::var("HEAP_SENTRY_CONFIG").unwrap_or_else(|_| "config".to_string());
    Settings::load_from(&config_path)
}
