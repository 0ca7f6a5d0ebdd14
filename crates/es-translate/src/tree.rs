//! Per-language translation trees.
//!
//! A tree maps keys to [`TranslationNode`]s. Whether a mapping is a plural
//! group or a nested subtree is decided once, when the data enters the tree:
//! a non-empty mapping whose keys are all CLDR category names and whose
//! values are all strings is a [`PluralGroup`], every other mapping is a
//! nested [`TranslationTree`].

use crate::error::{TranslateError, TranslateResult, value_kind};
use indexmap::IndexMap;
use serde::Deserialize;
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::sync::LazyLock;

/// CLDR plural category.
#[derive(
    Clone,
    Copy,
    Debug,
    Eq,
    Hash,
    Ord,
    PartialEq,
    PartialOrd,
    strum::Display,
    strum::EnumString,
    strum::IntoStaticStr,
)]
#[strum(serialize_all = "lowercase")]
pub enum PluralCategory {
    Zero,
    One,
    Two,
    Few,
    Many,
    Other,
}

impl PluralCategory {
    /// The six category names, the only keys a plural group may hold.
    pub const NAMES: [&'static str; 6] = ["zero", "one", "two", "few", "many", "other"];

    pub fn as_str(self) -> &'static str {
        self.into()
    }
}

/// Message variants keyed by plural category.
///
/// Variants are held as leaf nodes so a key path can end inside a group.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct PluralGroup {
    templates: BTreeMap<PluralCategory, TranslationNode>,
}

impl PluralGroup {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, category: PluralCategory, template: impl Into<String>) -> Self {
        self.insert(category, template);
        self
    }

    pub fn insert(&mut self, category: PluralCategory, template: impl Into<String>) {
        self.templates
            .insert(category, TranslationNode::Leaf(template.into()));
    }

    pub fn get(&self, category: PluralCategory) -> Option<&str> {
        self.templates.get(&category).and_then(TranslationNode::as_leaf)
    }

    /// The variant for `category` as a leaf node.
    pub fn node(&self, category: PluralCategory) -> Option<&TranslationNode> {
        self.templates.get(&category)
    }

    pub fn categories(&self) -> impl Iterator<Item = PluralCategory> + '_ {
        self.templates.keys().copied()
    }

    pub fn len(&self) -> usize {
        self.templates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }

    /// Reads a JSON mapping as a plural group, if it has the shape of one.
    fn from_object(object: &Map<String, Value>) -> Option<Self> {
        if object.is_empty() {
            return None;
        }

        let mut group = Self::new();
        for (key, value) in object {
            let category = key.parse::<PluralCategory>().ok()?;
            group.insert(category, value.as_str()?);
        }
        Some(group)
    }
}

/// A single entry of a translation tree.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq)]
#[serde(try_from = "Value")]
pub enum TranslationNode {
    /// A message template.
    Leaf(String),
    /// Message templates keyed by plural category.
    Plural(PluralGroup),
    /// Nested keys.
    Tree(TranslationTree),
}

impl TranslationNode {
    pub fn as_leaf(&self) -> Option<&str> {
        match self {
            TranslationNode::Leaf(template) => Some(template),
            _ => None,
        }
    }

    pub fn as_tree(&self) -> Option<&TranslationTree> {
        match self {
            TranslationNode::Tree(tree) => Some(tree),
            _ => None,
        }
    }

    fn from_value(key: &str, value: Value) -> TranslateResult<Self> {
        match value {
            Value::String(template) => Ok(TranslationNode::Leaf(template)),
            Value::Object(object) => match PluralGroup::from_object(&object) {
                Some(group) => Ok(TranslationNode::Plural(group)),
                None => Ok(TranslationNode::Tree(TranslationTree::from_object(
                    Some(key),
                    object,
                )?)),
            },
            other => Err(TranslateError::InvalidTranslation {
                key: key.to_string(),
                found: value_kind(&other),
            }),
        }
    }
}

impl From<&str> for TranslationNode {
    fn from(template: &str) -> Self {
        TranslationNode::Leaf(template.to_string())
    }
}

impl From<String> for TranslationNode {
    fn from(template: String) -> Self {
        TranslationNode::Leaf(template)
    }
}

impl From<PluralGroup> for TranslationNode {
    fn from(group: PluralGroup) -> Self {
        TranslationNode::Plural(group)
    }
}

impl From<TranslationTree> for TranslationNode {
    fn from(tree: TranslationTree) -> Self {
        TranslationNode::Tree(tree)
    }
}

impl TryFrom<Value> for TranslationNode {
    type Error = TranslateError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        Self::from_value("", value)
    }
}

/// Keys mapped to translation nodes, in insertion order.
#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq)]
#[serde(try_from = "Value")]
pub struct TranslationTree {
    entries: IndexMap<String, TranslationNode>,
}

static EMPTY_TREE: LazyLock<TranslationTree> = LazyLock::new(TranslationTree::default);

impl TranslationTree {
    pub fn new() -> Self {
        Self::default()
    }

    /// A shared tree without entries.
    pub fn empty() -> &'static TranslationTree {
        &EMPTY_TREE
    }

    pub fn with(mut self, key: impl Into<String>, node: impl Into<TranslationNode>) -> Self {
        self.insert(key, node);
        self
    }

    /// Inserts or replaces an entry, returning the previous node.
    pub fn insert(
        &mut self,
        key: impl Into<String>,
        node: impl Into<TranslationNode>,
    ) -> Option<TranslationNode> {
        self.entries.insert(key.into(), node.into())
    }

    pub fn get(&self, key: &str) -> Option<&TranslationNode> {
        self.entries.get(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &TranslationNode)> {
        self.entries.iter().map(|(key, node)| (key.as_str(), node))
    }

    pub fn entries(&self) -> &IndexMap<String, TranslationNode> {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn from_object(prefix: Option<&str>, object: Map<String, Value>) -> TranslateResult<Self> {
        let mut tree = Self::new();
        for (key, value) in object {
            let path = match prefix {
                Some(prefix) if !prefix.is_empty() => format!("{}.{}", prefix, key),
                _ => key.clone(),
            };
            let node = TranslationNode::from_value(&path, value)?;
            tree.entries.insert(key, node);
        }
        Ok(tree)
    }
}

impl TryFrom<Value> for TranslationTree {
    type Error = TranslateError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        match value {
            Value::Object(object) => Self::from_object(None, object),
            other => Err(TranslateError::InvalidTranslation {
                key: String::new(),
                found: value_kind(&other),
            }),
        }
    }
}

impl Extend<(String, TranslationNode)> for TranslationTree {
    fn extend<I: IntoIterator<Item = (String, TranslationNode)>>(&mut self, iter: I) {
        self.entries.extend(iter);
    }
}

impl FromIterator<(String, TranslationNode)> for TranslationTree {
    fn from_iter<I: IntoIterator<Item = (String, TranslationNode)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

impl IntoIterator for TranslationTree {
    type Item = (String, TranslationNode);
    type IntoIter = indexmap::map::IntoIter<String, TranslationNode>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}
