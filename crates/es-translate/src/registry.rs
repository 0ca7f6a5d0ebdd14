//! Storage of translation trees per language.

use crate::error::{TranslateError, TranslateResult};
use crate::tree::TranslationTree;
use std::collections::HashMap;
use unic_langid::LanguageIdentifier;

/// Translation trees keyed by language.
///
/// Trees only grow: [`TranslationRegistry::add_translations`] refuses to
/// replace an existing top-level key.
#[derive(Clone, Debug, Default)]
pub struct TranslationRegistry {
    trees: HashMap<LanguageIdentifier, TranslationTree>,
}

impl TranslationRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Merges `translations` into the tree registered for `language`.
    ///
    /// Fails with [`TranslateError::Collision`] when any top-level key is
    /// already present; the registry is left unchanged in that case.
    pub fn add_translations(
        &mut self,
        language: LanguageIdentifier,
        translations: TranslationTree,
    ) -> TranslateResult<()> {
        let colliding: Vec<String> = self
            .trees
            .get(&language)
            .map(|existing| {
                existing
                    .keys()
                    .filter(|key| translations.contains_key(key))
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_default();

        if !colliding.is_empty() {
            tracing::warn!(
                "Rejected translations for '{}': colliding keys {:?}",
                language,
                colliding
            );
            return Err(TranslateError::Collision {
                language,
                keys: colliding,
            });
        }

        let added = translations.len();
        self.trees
            .entry(language.clone())
            .or_default()
            .extend(translations);

        tracing::debug!("Registered {} translation keys for '{}'", added, language);
        Ok(())
    }

    /// The languages currently registered, in no particular order.
    pub fn supported_language_tags(&self) -> Vec<LanguageIdentifier> {
        self.trees.keys().cloned().collect()
    }

    /// The tree for `language`, empty when the language is unknown.
    pub fn tree(&self, language: &LanguageIdentifier) -> &TranslationTree {
        match self.get(language) {
            Some(tree) => tree,
            None => TranslationTree::empty(),
        }
    }

    pub fn get(&self, language: &LanguageIdentifier) -> Option<&TranslationTree> {
        self.trees.get(language)
    }

    pub fn contains_language(&self, language: &LanguageIdentifier) -> bool {
        self.trees.contains_key(language)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&LanguageIdentifier, &TranslationTree)> {
        self.trees.iter()
    }

    pub fn len(&self) -> usize {
        self.trees.len()
    }

    pub fn is_empty(&self) -> bool {
        self.trees.is_empty()
    }
}
