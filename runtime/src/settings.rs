use std::cell::RefCell;

use serde::Serialize;
use thiserror::Error;

pub const LOG_FILTER_VAR: &str = "GRAPHRT_LOG";
pub const TRACE_FAULTS_VAR: &str = "GRAPHRT_TRACE_FAULTS";

/// Runtime settings, read from `GRAPHRT_*` environment variables.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Settings {
    /// `tracing_subscriber::EnvFilter` directive used by `init_logging`.
    pub log_filter: String,
    /// Emit a `debug` event each time an entry point records a fault.
    pub trace_faults: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            log_filter: "warn".to_string(),
            trace_faults: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SettingsError {
    #[error("{var}: expected true/false/1/0/on/off, got '{value}'")]
    InvalidBool { var: &'static str, value: String },
}

impl Settings {
    pub fn from_env() -> Result<Self, SettingsError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Build settings from an arbitrary variable source. Unset or empty
    /// variables keep their defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, SettingsError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |var: &str| lookup(var).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());
        let mut settings = Settings::default();

        if let Some(filter) = get(LOG_FILTER_VAR) {
            settings.log_filter = filter;
        }
        if let Some(raw) = get(TRACE_FAULTS_VAR) {
            settings.trace_faults = parse_bool(TRACE_FAULTS_VAR, &raw)?;
        }

        Ok(settings)
    }
}

fn parse_bool(var: &'static str, raw: &str) -> Result<bool, SettingsError> {
    match raw.to_lowercase().as_str() {
        "true" | "1" | "on" => Ok(true),
        "false" | "0" | "off" => Ok(false),
        _ => Err(SettingsError::InvalidBool {
            var,
            value: raw.to_string(),
        }),
    }
}

thread_local! {
    static CURRENT: RefCell<Settings> = RefCell::new(Settings::default());
}

/// Replace this thread's settings.
pub fn install(settings: Settings) {
    CURRENT.with(|cell| *cell.borrow_mut() = settings);
}

pub fn current() -> Settings {
    CURRENT.with(|cell| cell.borrow().clone())
}

pub(crate) fn trace_faults() -> bool {
    CURRENT.with(|cell| cell.borrow().trace_faults)
}
