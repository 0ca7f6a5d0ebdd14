#![doc = include_str!("../README.md")]

use serde::{Deserialize, Serialize};
use std::env;
use std::path::{Path, PathBuf};
use thiserror::Error;
use unic_langid::{LanguageIdentifier, LanguageIdentifierError};

/// Name of the configuration file looked up in a manifest directory.
pub const CONFIG_FILE_NAME: &str = "i18n.toml";

#[derive(Debug, Error)]
pub enum I18nConfigError {
    /// Configuration file not found.
    #[error("i18n.toml configuration file not found")]
    NotFound,
    /// Failed to read configuration file.
    #[error("Failed to read configuration file: {0}")]
    ReadError(#[from] std::io::Error),
    /// Failed to parse configuration file.
    #[error("Failed to parse configuration file: {0}")]
    ParseError(#[from] toml::de::Error),
    /// Encountered an invalid fallback language identifier.
    #[error("Invalid fallback language identifier '{name}'")]
    InvalidFallbackLanguageIdentifier {
        /// The invalid identifier.
        name: String,
        /// The parsing error produced by `unic-langid`.
        #[source]
        source: LanguageIdentifierError,
    },
    /// Encountered a language identifier that uses an unsupported subtag combination.
    #[error("Language identifier '{name}' is not supported: {reason}")]
    UnsupportedLanguageIdentifier {
        /// The invalid identifier.
        name: String,
        /// Explanation of why it is not supported.
        reason: String,
    },
    /// The key separator is present but empty.
    #[error("key_separator must not be empty")]
    EmptyKeySeparator,
}

/// The configuration for `es-translate`.
#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
#[serde(deny_unknown_fields)]
pub struct I18nConfig {
    /// The language consulted when a key is missing from the requested one (e.g., "en").
    #[serde(default)]
    pub fallback_language: Option<String>,
    /// Delimiter enabling nested key addressing (e.g., "." for `nav.home`).
    /// Keys are looked up verbatim when absent.
    #[serde(default)]
    pub key_separator: Option<String>,
}

impl I18nConfig {
    /// Parses the configuration from TOML source.
    pub fn from_toml_str(content: &str) -> Result<Self, I18nConfigError> {
        Ok(toml::from_str(content)?)
    }

    /// Reads the configuration from a path.
    pub fn read_from_path<P: AsRef<Path>>(path: P) -> Result<Self, I18nConfigError> {
        let path = path.as_ref();

        if !path.exists() {
            return Err(I18nConfigError::NotFound);
        }

        let content = fs_err::read_to_string(path)?;

        Self::from_toml_str(&content)
    }

    /// Reads the configuration from the manifest directory.
    pub fn read_from_manifest_dir() -> Result<Self, I18nConfigError> {
        let manifest_dir = env::var("CARGO_MANIFEST_DIR").map_err(|_| I18nConfigError::NotFound)?;

        Self::from_manifest_dir(Path::new(&manifest_dir))
    }

    /// Read configuration from a given manifest directory.
    pub fn from_manifest_dir(manifest_dir: &Path) -> Result<Self, I18nConfigError> {
        Self::read_from_path(Self::config_path(manifest_dir))
    }

    /// Path of the configuration file inside `manifest_dir`.
    pub fn config_path(manifest_dir: &Path) -> PathBuf {
        manifest_dir.join(CONFIG_FILE_NAME)
    }

    /// Returns the configured fallback language as a `LanguageIdentifier`.
    pub fn fallback_language_identifier(
        &self,
    ) -> Result<Option<LanguageIdentifier>, I18nConfigError> {
        let Some(name) = &self.fallback_language else {
            return Ok(None);
        };

        let lang = name.parse::<LanguageIdentifier>().map_err(|source| {
            I18nConfigError::InvalidFallbackLanguageIdentifier {
                name: name.clone(),
                source,
            }
        })?;

        ensure_supported_language_identifier(&lang, name)?;

        Ok(Some(lang))
    }

    /// Returns the configured key separator, rejecting an empty one.
    pub fn key_separator(&self) -> Result<Option<&str>, I18nConfigError> {
        match self.key_separator.as_deref() {
            Some("") => Err(I18nConfigError::EmptyKeySeparator),
            separator => Ok(separator),
        }
    }
}

fn ensure_supported_language_identifier(
    lang: &LanguageIdentifier,
    original: &str,
) -> Result<(), I18nConfigError> {
    if lang.variants().next().is_some() {
        return Err(I18nConfigError::UnsupportedLanguageIdentifier {
            name: original.to_string(),
            reason: "variants are not supported".to_string(),
        });
    }

    Ok(())
}
