use crate::tree::PluralCategory;
use es_translate_toml::I18nConfigError;
use serde_json::Value;
use std::fmt;
use thiserror::Error;
use unic_langid::LanguageIdentifier;

#[derive(Debug, Error)]
pub enum TranslateError {
    /// The translator was built from unusable options.
    #[error("invalid configuration: {0}")]
    Configuration(String),

    /// The `i18n.toml` layer rejected its input.
    #[error(transparent)]
    Config(#[from] I18nConfigError),

    /// Registering translations would overwrite existing top-level keys.
    #[error("colliding keys for language '{language}': {}", .keys.join(", "))]
    Collision {
        language: LanguageIdentifier,
        keys: Vec<String>,
    },

    /// The key is absent from both the requested and the fallback language.
    #[error("translation for \"{key}\" not found")]
    KeyNotFound { key: String },

    /// A plural group holds keys that are not CLDR plural categories.
    #[error("invalid plural keys for \"{key}\": {}", .invalid_keys.join(", "))]
    InvalidPluralShape {
        key: String,
        invalid_keys: Vec<String>,
    },

    /// Neither or both of `cardinal` and `ordinal` were supplied.
    #[error("{problem} for \"{key}\"")]
    PluralParameter {
        key: String,
        problem: PluralParameterProblem,
    },

    /// The plural group has no message for the selected category.
    #[error("message for plural rule \"{category}\" not found for \"{key}\"")]
    PluralCategoryNotFound {
        key: String,
        category: PluralCategory,
    },

    /// A placeholder names a parameter that was not supplied.
    #[error("value for parameter \"{path}\" not found")]
    ParameterNotFound { path: String },

    /// A placeholder names a parameter that is neither a string nor a number.
    #[error("invalid value for parameter \"{path}\": {value}")]
    InvalidParameterValue { path: String, value: Value },

    /// Some supplied parameters were never consumed by the message.
    #[error("too many parameters passed {params}, unused: {unused}")]
    UnusedParameters { params: Value, unused: Value },

    /// The parameter object is not a mapping.
    #[error("parameters must be an object, found {found}")]
    ParametersNotAnObject { found: &'static str },

    /// A translation value is neither a string nor a mapping.
    #[error("invalid translation at \"{key}\": expected a string or a mapping, found {found}")]
    InvalidTranslation { key: String, found: &'static str },

    /// ICU could not provide plural rules for the language.
    #[error("plural rules unavailable for '{language}': {reason}")]
    PluralRules {
        language: LanguageIdentifier,
        reason: String,
    },
}

/// What is wrong with the plural selector parameters.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum PluralParameterProblem {
    Missing,
    Conflicting,
}

impl fmt::Display for PluralParameterProblem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PluralParameterProblem::Missing => f.write_str("cardinal or ordinal parameter not found"),
            PluralParameterProblem::Conflicting => {
                f.write_str("cannot use both cardinal and ordinal parameters")
            },
        }
    }
}

pub type TranslateResult<T> = Result<T, TranslateError>;

/// Name of a JSON value's type, for error messages.
pub(crate) fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
