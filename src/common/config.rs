//! # Configuration Utilities
//!
//! Client configuration parsed from TOML. Every section is optional; a missing
//! file section falls back to the values the web front end uses.

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::time::Duration;

/// Load a TOML configuration file and deserialize it into the specified type.
///
/// # Arguments
/// - `path`: Path to the TOML configuration file
///
/// # Returns
/// - `Ok(T)`: Successfully loaded and parsed configuration
/// - `Err`: File I/O or parsing error
///
/// # Example
/// ```ignore
/// let config: ClientConfig = load_config("config/client.toml")?;
/// ```
pub fn load_config<T>(path: impl AsRef<Path>) -> Result<T>
where
    T: for<'de> Deserialize<'de>,
{
    let content = fs::read_to_string(path)?;
    let config: T = toml::from_str(&content)?;
    Ok(config)
}

/// Complete client configuration.
///
/// # Example TOML
///
/// ```toml
/// [api]
/// base_url = "http://127.0.0.1:82"
/// show_lookup_errors = false
///
/// [navigation]
/// listing_path = "/listar"
/// view_path = "/visualizar"
/// redirect_delay_ms = 1000
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ClientConfig {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub navigation: NavigationConfig,
}

impl ClientConfig {
    /// Loads client configuration from a TOML file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        load_config(path)
    }
}

/// Where the patient API lives and how lookups report failures.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Scheme, host and port of the API (e.g., "http://127.0.0.1:82")
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Per-request timeout; unset means wait until the transport gives up
    #[serde(default)]
    pub timeout_secs: Option<u64>,
    /// Show the server's error string when a lookup fails instead of the
    /// generic "not found" message
    #[serde(default)]
    pub show_lookup_errors: bool,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: None,
            show_lookup_errors: false,
        }
    }
}

impl ApiConfig {
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }
}

/// Page locations used after an operation finishes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NavigationConfig {
    /// Listing page shown after a successful create, update or delete
    #[serde(default = "default_listing_path")]
    pub listing_path: String,
    /// Detail page, opened with `?id=<patient id>`
    #[serde(default = "default_view_path")]
    pub view_path: String,
    /// Pause between the success notification and the redirect (milliseconds)
    #[serde(default = "default_redirect_delay_ms")]
    pub redirect_delay_ms: u64,
}

impl Default for NavigationConfig {
    fn default() -> Self {
        Self {
            listing_path: default_listing_path(),
            view_path: default_view_path(),
            redirect_delay_ms: default_redirect_delay_ms(),
        }
    }
}

impl NavigationConfig {
    pub fn redirect_delay(&self) -> Duration {
        Duration::from_millis(self.redirect_delay_ms)
    }

    /// Detail page location for one patient.
    pub fn view_location(&self, patient_id: &str) -> String {
        format!("{}?id={}", self.view_path, patient_id)
    }
}

fn default_base_url() -> String {
    "http://127.0.0.1:82".to_string()
}

fn default_listing_path() -> String {
    "/listar".to_string()
}

fn default_view_path() -> String {
    "/visualizar".to_string()
}

fn default_redirect_delay_ms() -> u64 {
    1000
}
