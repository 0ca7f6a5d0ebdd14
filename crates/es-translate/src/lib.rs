#![doc = include_str!("../README.md")]

pub mod error;
pub mod interpolate;
pub mod path;
pub mod plural;
pub mod registry;
pub mod translator;
pub mod tree;

// Re-export the key types for top-level access.
pub use error::{PluralParameterProblem, TranslateError, TranslateResult};
pub use plural::PluralKind;
pub use registry::TranslationRegistry;
pub use translator::{LocalizedTranslator, Translator, TranslatorOptions, create_translate_fn};
pub use tree::{PluralCategory, PluralGroup, TranslationNode, TranslationTree};

pub use es_translate_shared as shared;
pub use es_translate_toml::{I18nConfig, I18nConfigError};
pub use serde_json::{Value, json};
pub use unic_langid::{self, LanguageIdentifier, langid};
