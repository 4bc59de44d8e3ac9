//! Client configuration parsed from environment variables.

use std::path::PathBuf;
use std::time::Duration;

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

pub const DEFAULT_TABLE: &str = "registrations";
pub const DEFAULT_POLL_INTERVAL_MS: u64 = 5000;
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 15;
pub const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 5;
pub const DEFAULT_EVENT_TITLE: &str = "HokejPWG";
pub const DEFAULT_EVENT_SUBTITLE: &str = "PWG Arena • Sunday 10:45 • Max 12";
pub const IDENTITY_DIR_NAME: &str = "hokejpwg";
pub const IDENTITY_FILE_NAME: &str = "hokejpwg_player.json";

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("missing required env var {var}")]
    MissingVar { var: &'static str },
    #[error("invalid value for {var}: {value:?}")]
    InvalidValue { var: &'static str, value: String },
    #[error("cannot locate identity file; set HOKEJ_IDENTITY_PATH or HOME")]
    NoIdentityPath,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StoreTimeouts {
    pub request_secs: u64,
    pub connect_secs: u64,
}

/// Connection settings for the hosted registrations table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    /// Project URL without trailing slash, e.g. `https://abc.supabase.co`.
    pub base_url: String,
    pub api_key: String,
    pub table: String,
    pub timeouts: StoreTimeouts,
}

/// Header text shown above the roster.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventInfo {
    pub title: String,
    pub subtitle: String,
}

impl Default for EventInfo {
    fn default() -> Self {
        Self { title: DEFAULT_EVENT_TITLE.to_owned(), subtitle: DEFAULT_EVENT_SUBTITLE.to_owned() }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub store: StoreConfig,
    pub poll_interval: Duration,
    pub identity_path: PathBuf,
    pub event: EventInfo,
}

impl AppConfig {
    /// Build typed config from the process environment.
    ///
    /// Required:
    /// - `SUPABASE_URL`
    /// - `SUPABASE_ANON_KEY`
    ///
    /// Optional:
    /// - `HOKEJ_TABLE`: default `registrations`
    /// - `HOKEJ_POLL_INTERVAL_MS`: default 5000, must be positive
    /// - `HOKEJ_REQUEST_TIMEOUT_SECS`: default 15
    /// - `HOKEJ_CONNECT_TIMEOUT_SECS`: default 5
    /// - `HOKEJ_IDENTITY_PATH`: default under `$XDG_CONFIG_HOME` or `$HOME/.config`
    /// - `HOKEJ_EVENT_TITLE`, `HOKEJ_EVENT_SUBTITLE`
    ///
    /// # Errors
    ///
    /// Returns an error if a required variable is missing or a numeric value
    /// does not parse.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(env_var)
    }

    /// Build config from an arbitrary key lookup. `from_env` passes the
    /// process environment; the CLI layers flag overrides on top of it.
    ///
    /// # Errors
    ///
    /// Same as [`AppConfig::from_env`].
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let base_url = required(&lookup, "SUPABASE_URL")?.trim_end_matches('/').to_owned();
        let api_key = required(&lookup, "SUPABASE_ANON_KEY")?;
        let table = non_blank(lookup("HOKEJ_TABLE")).unwrap_or_else(|| DEFAULT_TABLE.to_owned());

        let poll_ms = parse_u64(&lookup, "HOKEJ_POLL_INTERVAL_MS", DEFAULT_POLL_INTERVAL_MS)?;
        if poll_ms == 0 {
            return Err(ConfigError::InvalidValue { var: "HOKEJ_POLL_INTERVAL_MS", value: "0".to_owned() });
        }
        let timeouts = StoreTimeouts {
            request_secs: parse_u64(&lookup, "HOKEJ_REQUEST_TIMEOUT_SECS", DEFAULT_REQUEST_TIMEOUT_SECS)?,
            connect_secs: parse_u64(&lookup, "HOKEJ_CONNECT_TIMEOUT_SECS", DEFAULT_CONNECT_TIMEOUT_SECS)?,
        };

        let identity_path = identity_path(&lookup)?;
        let defaults = EventInfo::default();
        let event = EventInfo {
            title: non_blank(lookup("HOKEJ_EVENT_TITLE")).unwrap_or(defaults.title),
            subtitle: non_blank(lookup("HOKEJ_EVENT_SUBTITLE")).unwrap_or(defaults.subtitle),
        };

        Ok(Self {
            store: StoreConfig { base_url, api_key, table, timeouts },
            poll_interval: Duration::from_millis(poll_ms),
            identity_path,
            event,
        })
    }
}

/// Process environment lookup used by [`AppConfig::from_env`].
#[must_use]
pub fn env_var(key: &str) -> Option<String> {
    std::env::var(key).ok()
}

fn non_blank(raw: Option<String>) -> Option<String> {
    raw.filter(|v| !v.trim().is_empty())
}

fn required(lookup: &impl Fn(&str) -> Option<String>, var: &'static str) -> Result<String, ConfigError> {
    non_blank(lookup(var)).ok_or(ConfigError::MissingVar { var })
}

fn parse_u64(lookup: &impl Fn(&str) -> Option<String>, var: &'static str, default: u64) -> Result<u64, ConfigError> {
    let Some(raw) = non_blank(lookup(var)) else {
        return Ok(default);
    };
    raw.trim()
        .parse::<u64>()
        .map_err(|_| ConfigError::InvalidValue { var, value: raw })
}

/// Identity file location alone, without the store settings. Lets the
/// local-only commands run when no store credentials are configured.
///
/// # Errors
///
/// [`ConfigError::NoIdentityPath`] when neither an override nor a home
/// directory is set.
pub fn identity_path_from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<PathBuf, ConfigError> {
    identity_path(&lookup)
}

fn identity_path(lookup: &impl Fn(&str) -> Option<String>) -> Result<PathBuf, ConfigError> {
    if let Some(path) = non_blank(lookup("HOKEJ_IDENTITY_PATH")) {
        return Ok(PathBuf::from(path));
    }
    let config_dir = match non_blank(lookup("XDG_CONFIG_HOME")) {
        Some(dir) => PathBuf::from(dir),
        None => {
            let home = non_blank(lookup("HOME")).ok_or(ConfigError::NoIdentityPath)?;
            PathBuf::from(home).join(".config")
        }
    };
    Ok(config_dir.join(IDENTITY_DIR_NAME).join(IDENTITY_FILE_NAME))
}
