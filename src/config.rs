//! Configuration management for the chart playlist CLI.
//!
//! Configuration is read from environment variables, which may be seeded
//! from `.env` files. The values are collected once at startup into a
//! [`Config`] that is passed to every component needing credentials or
//! endpoints, so a missing variable is reported before any network call.
//!
//! Lookup order:
//! 1. Environment variables (highest priority)
//! 2. `.env` file in the local data directory
//! 3. `.env` file in the working directory
//! 4. Application defaults (where applicable)

use std::{env, path::PathBuf};

use regex::Regex;
use thiserror::Error;

pub const ENV_CLIENT_ID: &str = "SPOTIFY_API_AUTH_CLIENT_ID";
pub const ENV_CLIENT_SECRET: &str = "SPOTIFY_API_AUTH_CLIENT_SECRET";
pub const ENV_REDIRECT_URI: &str = "SPOTIFY_API_REDIRECT_URI";
pub const ENV_USER_ID: &str = "SPOTIFY_USER_ID";
pub const ENV_SCOPE: &str = "SPOTIFY_API_AUTH_SCOPE";
pub const ENV_AUTH_URL: &str = "SPOTIFY_API_AUTH_URL";
pub const ENV_TOKEN_URL: &str = "SPOTIFY_API_TOKEN_URL";
pub const ENV_API_URL: &str = "SPOTIFY_API_URL";
pub const ENV_SERVER_ADDRESS: &str = "SERVER_ADDRESS";
pub const ENV_CHART_BASE_URL: &str = "CHART_BASE_URL";

pub const DEFAULT_SCOPE: &str = "playlist-modify-private";
pub const DEFAULT_AUTH_URL: &str = "https://accounts.spotify.com/authorize";
pub const DEFAULT_TOKEN_URL: &str = "https://accounts.spotify.com/api/token";
pub const DEFAULT_API_URL: &str = "https://api.spotify.com/v1";
pub const DEFAULT_SERVER_ADDRESS: &str = "127.0.0.1:8888";

pub const CHART_BASE_URL: &str = "https://www.billboard.com/charts/hot-100/";
pub const DATE_PATTERN: &str = r"^[0-9]{4}-[0-9]{2}-[0-9]{2}$";
pub const DATE_FORMAT: &str = "%Y-%m-%d";
pub const EXPECTED_TITLES: usize = 100;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("missing required environment variables: {}", .0.join(", "))]
    Missing(Vec<&'static str>),
}

/// Loads environment variables from `.env` files.
///
/// Reads `<data_local_dir>/chartcli/.env` first and then a `.env` in the
/// working directory. Neither file has to exist; variables that are
/// already set in the process environment are never overwritten.
///
/// # Directory Structure
///
/// - Linux: `~/.local/share/chartcli/.env`
/// - macOS: `~/Library/Application Support/chartcli/.env`
/// - Windows: `%LOCALAPPDATA%/chartcli/.env`
///
/// # Errors
///
/// Returns an error if the data directory cannot be created or if an
/// existing `.env` file cannot be parsed.
pub async fn load_env() -> Result<(), String> {
    let path = env_path();
    if let Some(parent) = path.parent() {
        async_fs::create_dir_all(parent)
            .await
            .map_err(|e| e.to_string())?;
    }

    if path.is_file() {
        dotenv::from_path(&path).map_err(|e| e.to_string())?;
    }

    match dotenv::dotenv() {
        Ok(_) => Ok(()),
        Err(e) if e.not_found() => Ok(()),
        Err(e) => Err(e.to_string()),
    }
}

fn env_path() -> PathBuf {
    let mut path = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
    path.push("chartcli/.env");
    path
}

/// Credentials and endpoints for the Spotify side of a run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub client_id: String,
    pub client_secret: Option<String>,
    pub redirect_uri: String,
    pub user_id: String,
    pub scope: String,
    pub auth_url: String,
    pub token_url: String,
    pub api_url: String,
    pub server_addr: String,
}

impl Config {
    /// Builds the configuration from the process environment.
    ///
    /// Every required variable is checked up front and all of the missing
    /// ones are reported together. Empty values count as missing.
    ///
    /// # Example
    ///
    /// ```
    /// let config = Config::from_env()?;
    /// println!("creating playlists for {}", config.user_id);
    /// ```
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Builds the configuration from an arbitrary variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        let mut missing = Vec::new();
        let mut required = |name: &'static str| {
            get(name).unwrap_or_else(|| {
                missing.push(name);
                String::new()
            })
        };

        let client_id = required(ENV_CLIENT_ID);
        let redirect_uri = required(ENV_REDIRECT_URI);
        let user_id = required(ENV_USER_ID);

        if !missing.is_empty() {
            return Err(ConfigError::Missing(missing));
        }

        Ok(Config {
            client_id,
            client_secret: get(ENV_CLIENT_SECRET),
            redirect_uri,
            user_id,
            scope: get(ENV_SCOPE).unwrap_or_else(|| DEFAULT_SCOPE.to_string()),
            auth_url: get(ENV_AUTH_URL).unwrap_or_else(|| DEFAULT_AUTH_URL.to_string()),
            token_url: get(ENV_TOKEN_URL).unwrap_or_else(|| DEFAULT_TOKEN_URL.to_string()),
            api_url: get(ENV_API_URL)
                .map(|u| u.trim_end_matches('/').to_string())
                .unwrap_or_else(|| DEFAULT_API_URL.to_string()),
            server_addr: get(ENV_SERVER_ADDRESS)
                .unwrap_or_else(|| DEFAULT_SERVER_ADDRESS.to_string()),
        })
    }
}

/// Whether the extractor insists on a full chart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExtractMode {
    /// Accept any number of titles, warn when far off the expected count.
    #[default]
    Lenient,
    /// Fail unless exactly the expected number of titles was found.
    Strict,
}

/// Immutable settings of the chart side of a run.
#[derive(Debug, Clone)]
pub struct ChartConfig {
    pub base_url: String,
    pub date_pattern: Regex,
    pub expected_titles: usize,
    pub mode: ExtractMode,
}

impl Default for ChartConfig {
    fn default() -> Self {
        ChartConfig {
            base_url: CHART_BASE_URL.to_string(),
            date_pattern: Regex::new(DATE_PATTERN).expect("date pattern is a valid regex"),
            expected_titles: EXPECTED_TITLES,
            mode: ExtractMode::Lenient,
        }
    }
}

impl ChartConfig {
    /// Default chart settings with `CHART_BASE_URL` applied when set.
    pub fn from_env() -> Self {
        let config = ChartConfig::default();
        match env::var(ENV_CHART_BASE_URL) {
            Ok(url) if !url.trim().is_empty() => config.with_base_url(url),
            _ => config,
        }
    }

    /// Replaces the base URL, making sure it ends with a slash.
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        let mut url = url.into();
        if !url.ends_with('/') {
            url.push('/');
        }
        self.base_url = url;
        self
    }

    pub fn with_mode(mut self, mode: ExtractMode) -> Self {
        self.mode = mode;
        self
    }
}
