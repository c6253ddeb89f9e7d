mod model;

pub use model::{
    CaptureConfig, LoggingConfig, MonitorConfig, Settings, SettingsError, load_settings,
};
