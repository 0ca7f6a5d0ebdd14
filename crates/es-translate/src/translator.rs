//! The translator: options, construction and key resolution.

use crate::error::{PluralParameterProblem, TranslateError, TranslateResult, value_kind};
use crate::interpolate::{UsedParameters, interpolate};
use crate::path::walk;
use crate::plural::{PluralKind, plural_category};
use crate::registry::TranslationRegistry;
use crate::tree::{PluralCategory, PluralGroup, TranslationNode, TranslationTree};
use bon::Builder;
use es_translate_shared::equality::{Comparison, compare, deep_equal};
use es_translate_shared::properties::{Selector, reject};
use es_translate_toml::I18nConfig;
use indexmap::IndexMap;
use serde_json::{Map, Value};
use unic_langid::LanguageIdentifier;

/// Settings captured once when a [`Translator`] is built.
#[derive(Builder, Clone, Debug, Default)]
pub struct TranslatorOptions {
    /// Delimiter splitting keys into nested segments (e.g. `"."`).
    /// Keys are looked up verbatim when unset.
    #[builder(into)]
    key_separator: Option<String>,
    /// Language consulted when a key is missing from the requested one.
    fallback_language: Option<LanguageIdentifier>,
    /// Initial translations, registered in order.
    #[builder(default)]
    translations: IndexMap<LanguageIdentifier, TranslationTree>,
}

impl TranslatorOptions {
    /// Options from an `i18n.toml` configuration plus in-memory translations.
    pub fn from_config(
        config: &I18nConfig,
        translations: IndexMap<LanguageIdentifier, TranslationTree>,
    ) -> TranslateResult<Self> {
        Ok(Self {
            key_separator: config.key_separator()?.map(str::to_string),
            fallback_language: config.fallback_language_identifier()?,
            translations,
        })
    }

    pub fn key_separator(&self) -> Option<&str> {
        self.key_separator.as_deref()
    }

    pub fn fallback_language(&self) -> Option<&LanguageIdentifier> {
        self.fallback_language.as_ref()
    }

    pub fn translations(&self) -> &IndexMap<LanguageIdentifier, TranslationTree> {
        &self.translations
    }
}

/// Resolves keys to localized strings.
///
/// Translations are registered through `&mut self` and resolution only
/// needs `&self`, so a built translator can be shared between threads.
#[derive(Debug)]
pub struct Translator {
    key_separator: Option<String>,
    fallback_language: Option<LanguageIdentifier>,
    registry: TranslationRegistry,
}

impl Translator {
    /// Builds a translator and registers the initial translations.
    ///
    /// Fails when no translations are given, when the key separator is
    /// empty, or when the initial translations collide.
    pub fn new(options: TranslatorOptions) -> TranslateResult<Self> {
        let TranslatorOptions {
            key_separator,
            fallback_language,
            translations,
        } = options;

        if translations.is_empty() {
            return Err(TranslateError::Configuration(
                "no translations provided".to_string(),
            ));
        }

        if key_separator.as_deref() == Some("") {
            return Err(TranslateError::Configuration(
                "key separator must not be empty".to_string(),
            ));
        }

        let mut translator = Self {
            key_separator,
            fallback_language,
            registry: TranslationRegistry::new(),
        };

        for (language, tree) in translations {
            translator.add_translations(language, tree)?;
        }

        Ok(translator)
    }

    /// Builds a translator from an `i18n.toml` configuration.
    pub fn from_config(
        config: &I18nConfig,
        translations: IndexMap<LanguageIdentifier, TranslationTree>,
    ) -> TranslateResult<Self> {
        Self::new(TranslatorOptions::from_config(config, translations)?)
    }

    /// Merges more translations for `language`; see
    /// [`TranslationRegistry::add_translations`].
    pub fn add_translations(
        &mut self,
        language: LanguageIdentifier,
        translations: TranslationTree,
    ) -> TranslateResult<()> {
        self.registry.add_translations(language, translations)
    }

    pub fn supported_language_tags(&self) -> Vec<LanguageIdentifier> {
        self.registry.supported_language_tags()
    }

    pub fn registry(&self) -> &TranslationRegistry {
        &self.registry
    }

    pub fn key_separator(&self) -> Option<&str> {
        self.key_separator.as_deref()
    }

    pub fn fallback_language(&self) -> Option<&LanguageIdentifier> {
        self.fallback_language.as_ref()
    }

    /// A translator bound to a current language.
    pub fn localized(&self, language: LanguageIdentifier) -> LocalizedTranslator<'_> {
        LocalizedTranslator {
            translator: self,
            language,
        }
    }

    /// Resolves `key` in `language` and fills in `params`.
    ///
    /// `params` must be an object (or `null` for none). Every parameter has
    /// to be consumed by the message, either by a placeholder or as the
    /// `cardinal`/`ordinal` selector of a plural message.
    pub fn translate(
        &self,
        key: &str,
        params: &Value,
        language: &LanguageIdentifier,
    ) -> TranslateResult<String> {
        let empty = Value::Object(Map::new());
        let params = match params {
            Value::Object(_) => params,
            Value::Null => &empty,
            other => {
                return Err(TranslateError::ParametersNotAnObject {
                    found: value_kind(other),
                });
            },
        };

        let node = self.lookup(key, language)?;
        let mut used = UsedParameters::new();

        let derived_group;
        let template = match node {
            TranslationNode::Leaf(template) => template.as_str(),
            TranslationNode::Plural(group) => select_plural(key, group, params, language, &mut used)?,
            TranslationNode::Tree(tree) => {
                derived_group = plural_group_from_tree(key, tree)?;
                select_plural(key, &derived_group, params, language, &mut used)?
            },
        };

        let output = interpolate(template, params, &mut used)?;
        ensure_all_used(params, &used)?;

        Ok(output)
    }

    fn lookup(&self, key: &str, language: &LanguageIdentifier) -> TranslateResult<&TranslationNode> {
        let active = self.registry.tree(language);
        let fallback = match &self.fallback_language {
            Some(fallback) => self.registry.tree(fallback),
            None => TranslationTree::empty(),
        };

        let Some(separator) = self.key_separator.as_deref() else {
            return lookup_top_level(key, active, fallback, language).ok_or_else(|| {
                TranslateError::KeyNotFound {
                    key: key.to_string(),
                }
            });
        };

        let mut segments = key.split(separator);
        let first = segments.next().unwrap_or_default();
        let root = lookup_top_level(first, active, fallback, language).ok_or_else(|| {
            TranslateError::KeyNotFound {
                key: first.to_string(),
            }
        })?;

        walk(root, segments).map_err(|_| TranslateError::KeyNotFound {
            key: key.to_string(),
        })
    }
}

fn lookup_top_level<'a>(
    key: &str,
    active: &'a TranslationTree,
    fallback: &'a TranslationTree,
    language: &LanguageIdentifier,
) -> Option<&'a TranslationNode> {
    if let Some(node) = active.get(key) {
        return Some(node);
    }

    let node = fallback.get(key)?;
    tracing::debug!(
        "Translation for '{}' not found in '{}', using the fallback language",
        key,
        language
    );
    Some(node)
}

/// Reads a nested tree reached by a key as a plural group.
fn plural_group_from_tree(key: &str, tree: &TranslationTree) -> TranslateResult<PluralGroup> {
    let foreign = reject(tree.entries(), &Selector::keys(&PluralCategory::NAMES));
    if !foreign.is_empty() {
        return Err(TranslateError::InvalidPluralShape {
            key: key.to_string(),
            invalid_keys: foreign.into_keys().collect(),
        });
    }

    let mut group = PluralGroup::new();
    let mut invalid_keys = Vec::new();
    for (name, node) in tree.iter() {
        match (name.parse::<PluralCategory>(), node) {
            (Ok(category), TranslationNode::Leaf(template)) => group.insert(category, template),
            _ => invalid_keys.push(name.to_string()),
        }
    }

    if !invalid_keys.is_empty() {
        return Err(TranslateError::InvalidPluralShape {
            key: key.to_string(),
            invalid_keys,
        });
    }

    Ok(group)
}

fn select_plural<'g>(
    key: &str,
    group: &'g PluralGroup,
    params: &Value,
    language: &LanguageIdentifier,
    used: &mut UsedParameters,
) -> TranslateResult<&'g str> {
    let selectors: Vec<(PluralKind, &Value)> = PluralKind::ALL
        .into_iter()
        .filter_map(|kind| {
            params
                .get(kind.parameter())
                .filter(|value| !value.is_null())
                .map(|value| (kind, value))
        })
        .collect();

    let (kind, count) = match selectors.as_slice() {
        [selector] => *selector,
        [] => {
            return Err(TranslateError::PluralParameter {
                key: key.to_string(),
                problem: PluralParameterProblem::Missing,
            });
        },
        _ => {
            return Err(TranslateError::PluralParameter {
                key: key.to_string(),
                problem: PluralParameterProblem::Conflicting,
            });
        },
    };

    let category = plural_category(language, kind, count)?;
    let template = group
        .get(category)
        .ok_or_else(|| TranslateError::PluralCategoryNotFound {
            key: key.to_string(),
            category,
        })?;

    for kind in PluralKind::ALL {
        if let Some(value) = params.get(kind.parameter()) {
            used.record_value(kind.parameter(), value);
        }
    }

    Ok(template)
}

fn ensure_all_used(params: &Value, used: &UsedParameters) -> TranslateResult<()> {
    let used = used.as_map();
    let Comparison::Mismatch(mismatch) = compare(params, &Value::Object(used.clone())) else {
        return Ok(());
    };

    let unused = match params {
        Value::Object(supplied) => {
            let consumed = |key: &str, value: &Value| {
                used.get(key)
                    .is_some_and(|recorded| deep_equal(value, recorded))
            };
            reject(supplied, &Selector::predicate(&consumed))
        },
        _ => IndexMap::new(),
    };

    tracing::debug!("Unused translation parameters: {}", mismatch);

    Err(TranslateError::UnusedParameters {
        params: params.clone(),
        unused: Value::Object(unused.into_iter().collect()),
    })
}

/// A [`Translator`] bound to a current language, as a page or request
/// context would hold it.
#[derive(Clone, Debug)]
pub struct LocalizedTranslator<'a> {
    translator: &'a Translator,
    language: LanguageIdentifier,
}

impl LocalizedTranslator<'_> {
    pub fn language(&self) -> &LanguageIdentifier {
        &self.language
    }

    /// Resolves `key` in the bound language.
    pub fn translate(&self, key: &str, params: &Value) -> TranslateResult<String> {
        self.translator.translate(key, params, &self.language)
    }

    /// Resolves `key` in `language` when given, else in the bound language.
    pub fn translate_in(
        &self,
        key: &str,
        params: &Value,
        language: Option<&LanguageIdentifier>,
    ) -> TranslateResult<String> {
        self.translator
            .translate(key, params, language.unwrap_or(&self.language))
    }
}

/// Builds a translator and returns it as a resolver closure.
pub fn create_translate_fn(
    options: TranslatorOptions,
) -> TranslateResult<impl Fn(&str, &Value, &LanguageIdentifier) -> TranslateResult<String> + Send + Sync>
{
    let translator = Translator::new(options)?;
    Ok(move |key: &str, params: &Value, language: &LanguageIdentifier| {
        translator.translate(key, params, language)
    })
}
