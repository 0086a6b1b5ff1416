//! Host settings and preferences
//!
//! Persisted separately from gameplay tuning in LocalStorage.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Default event logging endpoint
pub const DEFAULT_EVENT_ENDPOINT: &str = "https://script.google.com/macros/s/AKfycbymx_A3cHLVa6JkDxGnDFG0vA3bwEOW092dTrv-wxntvhs0IkWLTt8GALaS7dEV-2mzhg/exec";

/// Host settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// URL gameplay events are POSTed to
    pub event_endpoint: String,
    /// Send gameplay events at all (events are still logged to the console)
    pub send_events: bool,
    /// Console log level: "error", "warn", "info", "debug" or "trace"
    pub log_level: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            event_endpoint: DEFAULT_EVENT_ENDPOINT.to_string(),
            send_events: true,
            log_level: "info".to_string(),
        }
    }
}

impl Settings {
    /// LocalStorage key (used only in wasm32)
    #[allow(dead_code)]
    const STORAGE_KEY: &'static str = "hop_runner_settings";

    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Parsed log level, falling back to `Info` for unknown names
    pub fn level_filter(&self) -> log::LevelFilter {
        self.log_level.parse().unwrap_or(log::LevelFilter::Info)
    }

    /// Load settings from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
                match Self::from_json(&json) {
                    Ok(settings) => {
                        log::info!("Loaded settings from LocalStorage");
                        return settings;
                    }
                    Err(e) => log::warn!("Ignoring stored settings: {}", e),
                }
            }
        }

        log::info!("Using default settings");
        Self::default()
    }

    /// Native stub
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        Self::default()
    }
}
