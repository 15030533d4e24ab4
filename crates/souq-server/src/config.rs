// crates/souq-server/src/config.rs
// ============================================================================
// Module: Souq Configuration
// Description: Configuration loading and validation for the storefront.
// Purpose: Provide strict, fail-closed config parsing with hard limits.
// Dependencies: souq-core, serde, toml
// ============================================================================

//! ## Overview
//! Configuration is loaded from a TOML file with a strict size limit.
//! Missing fields take storefront defaults so a zero-config local run works;
//! invalid values fail closed at load time rather than surfacing mid-request.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::env;
use std::fs;
use std::net::SocketAddr;
use std::path::Path;
use std::path::PathBuf;

use serde::Deserialize;
use souq_core::Locale;
use thiserror::Error;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Default configuration filename when no path is specified.
const DEFAULT_CONFIG_NAME: &str = "souq.toml";
/// Environment variable used to override the config path.
pub const CONFIG_ENV_VAR: &str = "SOUQ_CONFIG";
/// Maximum configuration file size in bytes.
pub(crate) const MAX_CONFIG_FILE_SIZE: usize = 1024 * 1024;
/// Default server bind address.
const DEFAULT_BIND: &str = "127.0.0.1:8360";
/// Default bundle directory relative to the working directory.
const DEFAULT_BUNDLE_DIR: &str = "locales";
/// Default maximum bundle resource size in bytes.
const DEFAULT_MAX_BUNDLE_BYTES: usize = 1024 * 1024;
/// Maximum allowed bundle resource size in bytes.
const MAX_MAX_BUNDLE_BYTES: usize = 16 * 1024 * 1024;

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Configuration loading and validation errors.
///
/// # Invariants
/// - Variants are stable for programmatic handling.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The config file could not be read.
    #[error("failed to read config at {path}: {detail}")]
    Read {
        /// Path that failed to read.
        path: PathBuf,
        /// Underlying read failure detail.
        detail: String,
    },
    /// The config file exceeds the size limit.
    #[error("config file at {path} exceeds size limit ({actual_bytes} > {max_bytes})")]
    TooLarge {
        /// Path of the oversized file.
        path: PathBuf,
        /// Maximum allowed bytes.
        max_bytes: usize,
        /// Actual file size in bytes.
        actual_bytes: usize,
    },
    /// The config file is not valid TOML.
    #[error("failed to parse config: {detail}")]
    Parse {
        /// Underlying parse failure detail.
        detail: String,
    },
    /// The fallback locale code is not a registered locale.
    #[error("locales.fallback is not a supported locale: {code}")]
    UnknownFallback {
        /// The rejected locale code.
        code: String,
    },
    /// The bundle directory is empty or unset.
    #[error("locales.bundle_dir must not be empty")]
    EmptyBundleDir,
    /// The bind address does not parse as a socket address.
    #[error("invalid server.bind address: {value}")]
    InvalidBind {
        /// The rejected bind value.
        value: String,
    },
    /// The bundle size cap is out of bounds.
    #[error("locales.max_bundle_bytes out of range: {value} (1..={max})")]
    BundleSizeCap {
        /// The rejected cap value.
        value: usize,
        /// Maximum allowed cap.
        max: usize,
    },
}

// ============================================================================
// SECTION: Configuration Types
// ============================================================================

/// Souq storefront configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct SouqConfig {
    /// HTTP server configuration.
    #[serde(default)]
    pub server: ServerConfig,
    /// Locale pipeline configuration.
    #[serde(default)]
    pub locales: LocalesConfig,
}

impl Default for SouqConfig {
    fn default() -> Self {
        Self {
            server: ServerConfig::default(),
            locales: LocalesConfig::default(),
        }
    }
}

/// HTTP server configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Bind address for the HTTP listener.
    #[serde(default = "default_bind")]
    pub bind: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: default_bind(),
        }
    }
}

/// Locale pipeline configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct LocalesConfig {
    /// Fallback locale code (tolerant form accepted, e.g. `en-US`).
    #[serde(default = "default_fallback")]
    pub fallback: String,
    /// Directory holding one `<code>.json` resource per locale.
    #[serde(default = "default_bundle_dir")]
    pub bundle_dir: PathBuf,
    /// Maximum accepted bundle resource size in bytes.
    #[serde(default = "default_max_bundle_bytes")]
    pub max_bundle_bytes: usize,
}

impl Default for LocalesConfig {
    fn default() -> Self {
        Self {
            fallback: default_fallback(),
            bundle_dir: default_bundle_dir(),
            max_bundle_bytes: default_max_bundle_bytes(),
        }
    }
}

/// Default bind address.
fn default_bind() -> String {
    DEFAULT_BIND.to_string()
}

/// Default fallback locale code.
fn default_fallback() -> String {
    Locale::En.as_str().to_string()
}

/// Default bundle directory.
fn default_bundle_dir() -> PathBuf {
    PathBuf::from(DEFAULT_BUNDLE_DIR)
}

/// Default bundle size cap.
const fn default_max_bundle_bytes() -> usize {
    DEFAULT_MAX_BUNDLE_BYTES
}

// ============================================================================
// SECTION: Loading and Validation
// ============================================================================

impl SouqConfig {
    /// Loads configuration from an explicit path, the `SOUQ_CONFIG`
    /// environment variable, or `souq.toml` in the working directory. A
    /// missing default file yields the built-in defaults.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when the file is unreadable, oversized,
    /// malformed, or fails validation.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let explicit = path.map(Path::to_path_buf).or_else(|| {
            env::var(CONFIG_ENV_VAR).ok().filter(|value| !value.is_empty()).map(PathBuf::from)
        });
        let (resolved, required) = explicit
            .map_or_else(|| (PathBuf::from(DEFAULT_CONFIG_NAME), false), |path| (path, true));
        if !required && !resolved.exists() {
            let config = Self::default();
            config.validate()?;
            return Ok(config);
        }
        Self::load_from_path(&resolved)
    }

    /// Loads and validates configuration from the given file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when the file is unreadable, oversized,
    /// malformed, or fails validation.
    pub fn load_from_path(path: &Path) -> Result<Self, ConfigError> {
        let metadata = fs::metadata(path).map_err(|err| ConfigError::Read {
            path: path.to_path_buf(),
            detail: err.to_string(),
        })?;
        let actual_bytes = usize::try_from(metadata.len()).unwrap_or(usize::MAX);
        if actual_bytes > MAX_CONFIG_FILE_SIZE {
            return Err(ConfigError::TooLarge {
                path: path.to_path_buf(),
                max_bytes: MAX_CONFIG_FILE_SIZE,
                actual_bytes,
            });
        }
        let raw = fs::read_to_string(path).map_err(|err| ConfigError::Read {
            path: path.to_path_buf(),
            detail: err.to_string(),
        })?;
        let config: Self = toml::from_str(&raw).map_err(|err| ConfigError::Parse {
            detail: err.to_string(),
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Validates cross-field constraints.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] on the first violated constraint.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.fallback_locale()?;
        if self.locales.bundle_dir.as_os_str().is_empty() {
            return Err(ConfigError::EmptyBundleDir);
        }
        if self.server.bind.parse::<SocketAddr>().is_err() {
            return Err(ConfigError::InvalidBind {
                value: self.server.bind.clone(),
            });
        }
        if self.locales.max_bundle_bytes == 0
            || self.locales.max_bundle_bytes > MAX_MAX_BUNDLE_BYTES
        {
            return Err(ConfigError::BundleSizeCap {
                value: self.locales.max_bundle_bytes,
                max: MAX_MAX_BUNDLE_BYTES,
            });
        }
        Ok(())
    }

    /// Returns the configured fallback locale.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::UnknownFallback`] when the code is not a
    /// registered locale.
    pub fn fallback_locale(&self) -> Result<Locale, ConfigError> {
        Locale::parse(&self.locales.fallback).ok_or_else(|| ConfigError::UnknownFallback {
            code: self.locales.fallback.clone(),
        })
    }
}

// ============================================================================
// SECTION: Tests
// ============================================================================

#[cfg(test)]
mod tests {
    #![allow(
        clippy::panic,
        clippy::unwrap_used,
        clippy::expect_used,
        reason = "Test-only assertions."
    )]

    use souq_core::Locale;

    use super::ConfigError;
    use super::SouqConfig;

    #[test]
    fn defaults_validate_and_fall_back_to_english() {
        let config = SouqConfig::default();
        config.validate().expect("defaults are valid");
        assert_eq!(config.fallback_locale().expect("fallback"), Locale::En);
        assert_eq!(config.server.bind, "127.0.0.1:8360");
    }

    #[test]
    fn toml_round_trip_with_overrides() {
        let config: SouqConfig = toml::from_str(
            r#"
            [server]
            bind = "0.0.0.0:9000"

            [locales]
            fallback = "ar"
            bundle_dir = "i18n"
            "#,
        )
        .expect("config parses");
        config.validate().expect("config validates");
        assert_eq!(config.fallback_locale().expect("fallback"), Locale::Ar);
        assert_eq!(config.locales.bundle_dir.to_string_lossy(), "i18n");
    }

    #[test]
    fn tolerant_fallback_codes_are_accepted() {
        let mut config = SouqConfig::default();
        config.locales.fallback = "en-US".to_string();
        assert_eq!(config.fallback_locale().expect("fallback"), Locale::En);
    }

    #[test]
    fn unknown_fallback_is_rejected() {
        let mut config = SouqConfig::default();
        config.locales.fallback = "fr".to_string();
        assert!(matches!(config.validate(), Err(ConfigError::UnknownFallback { .. })));
    }

    #[test]
    fn empty_bundle_dir_is_rejected() {
        let mut config = SouqConfig::default();
        config.locales.bundle_dir = std::path::PathBuf::new();
        assert!(matches!(config.validate(), Err(ConfigError::EmptyBundleDir)));
    }

    #[test]
    fn malformed_bind_is_rejected() {
        let mut config = SouqConfig::default();
        config.server.bind = "not-an-address".to_string();
        assert!(matches!(config.validate(), Err(ConfigError::InvalidBind { .. })));
    }

    #[test]
    fn zero_bundle_cap_is_rejected() {
        let mut config = SouqConfig::default();
        config.locales.max_bundle_bytes = 0;
        assert!(matches!(config.validate(), Err(ConfigError::BundleSizeCap { .. })));
    }
}
