//! Configuration file parser for ~/.config/roost/config.toml.
//!
//! The config file is optional — a missing file yields `Config::default()`.
//! Unknown keys are accepted by serde, though we log a warning when the file
//! contains potential typos.
use secrecy::SecretString;
use serde::Deserialize;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

/// Env var holding the identity service publishable key.
pub const PUBLISHABLE_KEY_ENV: &str = "ROOST_PUBLISHABLE_KEY";
/// Env var holding the identity service base URL.
pub const IDENTITY_ENDPOINT_ENV: &str = "ROOST_IDENTITY_ENDPOINT";

// ============================================================================
// Error Types
// ============================================================================

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid TOML in config file: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Config file too large: {0}")]
    TooLarge(String),
}

// ============================================================================
// Configuration Structs
// ============================================================================

/// Top-level application configuration.
///
/// All fields use `#[serde(default)]` so any subset of keys can be specified.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Theme variant name ("dark" or "light").
    pub theme: String,

    /// Milliseconds between a category switch and its results appearing.
    pub settle_delay_ms: u64,

    /// Listings fixture to load instead of the bundled one.
    pub listings_path: Option<PathBuf>,

    /// Custom keybinding overrides. Keys are action names, values are key strings.
    pub keybindings: HashMap<String, String>,

    /// Identity service settings.
    pub identity: IdentityConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            theme: "dark".to_string(),
            settle_delay_ms: 200,
            listings_path: None,
            keybindings: HashMap::new(),
            identity: IdentityConfig::default(),
        }
    }
}

/// `[identity]` table.
///
/// Custom Debug impl masks `publishable_key`.
#[derive(Clone, Default, Deserialize)]
#[serde(default)]
pub struct IdentityConfig {
    /// Base URL of the identity service.
    pub endpoint: Option<String>,
    /// Publishable key (alternative to the ROOST_PUBLISHABLE_KEY env var).
    /// Env var takes precedence over config file.
    pub publishable_key: Option<String>,
}

impl std::fmt::Debug for IdentityConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("IdentityConfig")
            .field("endpoint", &self.endpoint)
            .field(
                "publishable_key",
                &self.publishable_key.as_ref().map(|_| "[REDACTED]"),
            )
            .finish()
    }
}

/// Identity settings after env overrides, ready to build a provider.
pub struct ResolvedIdentity {
    pub endpoint: String,
    pub publishable_key: SecretString,
}

impl IdentityConfig {
    /// Apply env overrides from the process environment.
    pub fn resolve(&self) -> Option<ResolvedIdentity> {
        self.resolve_with(
            std::env::var(IDENTITY_ENDPOINT_ENV).ok(),
            std::env::var(PUBLISHABLE_KEY_ENV).ok(),
        )
    }

    /// Apply explicit overrides. Blank values count as unset.
    pub fn resolve_with(
        &self,
        env_endpoint: Option<String>,
        env_key: Option<String>,
    ) -> Option<ResolvedIdentity> {
        let non_blank = |s: &String| !s.trim().is_empty();
        let endpoint = env_endpoint
            .filter(non_blank)
            .or_else(|| self.endpoint.clone().filter(non_blank))?;
        let key = env_key
            .filter(non_blank)
            .or_else(|| self.publishable_key.clone().filter(non_blank))?;

        Some(ResolvedIdentity {
            endpoint,
            publishable_key: SecretString::from(key),
        })
    }
}

impl Config {
    /// Maximum config file size (1 MB).
    const MAX_FILE_SIZE: u64 = 1_048_576;

    /// Longest accepted settle delay; anything above is clamped.
    const MAX_SETTLE_DELAY_MS: u64 = 5_000;

    /// Load configuration from a TOML file.
    ///
    /// - Missing file → `Ok(Config::default())`
    /// - Empty file → `Ok(Config::default())`
    /// - Invalid TOML → `Err(ConfigError::Parse)` with line number info
    /// - Unknown keys → accepted, logged as warning
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        match std::fs::metadata(path) {
            Ok(meta) if meta.len() > Self::MAX_FILE_SIZE => {
                return Err(ConfigError::TooLarge(format!(
                    "Config file is {} bytes (max {} bytes)",
                    meta.len(),
                    Self::MAX_FILE_SIZE
                )));
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!(path = %path.display(), "No config file found, using defaults");
                return Ok(Self::default());
            }
            Err(e) => return Err(ConfigError::Io(e)),
            Ok(_) => {}
        }

        let content = match std::fs::read_to_string(path) {
            Ok(c) => c,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!(path = %path.display(), "Config file disappeared, using defaults");
                return Ok(Self::default());
            }
            Err(e) => return Err(ConfigError::Io(e)),
        };

        if content.trim().is_empty() {
            tracing::debug!(path = %path.display(), "Config file is empty, using defaults");
            return Ok(Self::default());
        }

        if let Ok(raw) = content.parse::<toml::Table>() {
            let known_keys = [
                "theme",
                "settle_delay_ms",
                "listings_path",
                "keybindings",
                "identity",
            ];
            for key in raw.keys() {
                if !known_keys.contains(&key.as_str()) {
                    tracing::warn!(key = %key, "Unknown key in config file, ignoring");
                }
            }
        }

        let config: Config = toml::from_str(&content)?;
        tracing::info!(path = %path.display(), theme = %config.theme, "Loaded configuration");
        Ok(config)
    }

    /// Settle delay as a `Duration`, clamped to a sane maximum.
    pub fn settle_delay(&self) -> Duration {
        if self.settle_delay_ms > Self::MAX_SETTLE_DELAY_MS {
            tracing::warn!(
                requested = self.settle_delay_ms,
                max = Self::MAX_SETTLE_DELAY_MS,
                "settle_delay_ms too large, clamping"
            );
        }
        Duration::from_millis(self.settle_delay_ms.min(Self::MAX_SETTLE_DELAY_MS))
    }
}

// ============================================================================
// Tests
// ============================================================================
