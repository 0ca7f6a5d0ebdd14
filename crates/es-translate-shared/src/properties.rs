//! Partitioning of string-keyed maps by an allow-list or a predicate.

use indexmap::IndexMap;
use serde_json::Value;
use std::collections::{BTreeMap, HashMap};
use std::hash::BuildHasher;

/// Read access to the entries of a string-keyed map.
pub trait Properties {
    type Value;

    fn entries(&self) -> impl Iterator<Item = (&str, &Self::Value)>;

    fn get_property(&self, key: &str) -> Option<&Self::Value>;
}

impl<V> Properties for IndexMap<String, V> {
    type Value = V;

    fn entries(&self) -> impl Iterator<Item = (&str, &V)> {
        self.iter().map(|(key, value)| (key.as_str(), value))
    }

    fn get_property(&self, key: &str) -> Option<&V> {
        self.get(key)
    }
}

impl<V> Properties for BTreeMap<String, V> {
    type Value = V;

    fn entries(&self) -> impl Iterator<Item = (&str, &V)> {
        self.iter().map(|(key, value)| (key.as_str(), value))
    }

    fn get_property(&self, key: &str) -> Option<&V> {
        self.get(key)
    }
}

impl<V, S: BuildHasher> Properties for HashMap<String, V, S> {
    type Value = V;

    fn entries(&self) -> impl Iterator<Item = (&str, &V)> {
        self.iter().map(|(key, value)| (key.as_str(), value))
    }

    fn get_property(&self, key: &str) -> Option<&V> {
        self.get(key)
    }
}

impl Properties for serde_json::Map<String, Value> {
    type Value = Value;

    fn entries(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.iter().map(|(key, value)| (key.as_str(), value))
    }

    fn get_property(&self, key: &str) -> Option<&Value> {
        self.get(key)
    }
}

/// Chooses which entries of a map are selected.
pub enum Selector<'a, V> {
    /// Entries whose key appears in the list.
    Keys(&'a [&'a str]),
    /// Entries for which the predicate holds.
    Predicate(&'a dyn Fn(&str, &V) -> bool),
}

impl<'a, V> Selector<'a, V> {
    pub fn keys(keys: &'a [&'a str]) -> Self {
        Selector::Keys(keys)
    }

    pub fn predicate(predicate: &'a dyn Fn(&str, &V) -> bool) -> Self {
        Selector::Predicate(predicate)
    }

    fn selects(&self, key: &str, value: &V) -> bool {
        match self {
            Selector::Keys(keys) => keys.iter().any(|candidate| *candidate == key),
            Selector::Predicate(predicate) => predicate(key, value),
        }
    }
}

/// Both partitions of a map produced by [`take`].
#[derive(Clone, Debug, PartialEq)]
pub struct Taken<V> {
    pub filtered: IndexMap<String, V>,
    pub rejected: IndexMap<String, V>,
    /// Allow-listed keys that the map does not contain.
    pub missing: Vec<String>,
}

/// Keeps the selected entries.
///
/// With an allow-list the result follows the order of the list, otherwise
/// the order of the map.
pub fn filter<P>(properties: &P, selector: &Selector<'_, P::Value>) -> IndexMap<String, P::Value>
where
    P: Properties + ?Sized,
    P::Value: Clone,
{
    match selector {
        Selector::Keys(keys) => keys
            .iter()
            .filter_map(|key| {
                properties
                    .get_property(key)
                    .map(|value| ((*key).to_string(), value.clone()))
            })
            .collect(),
        Selector::Predicate(_) => properties
            .entries()
            .filter(|(key, value)| selector.selects(key, value))
            .map(|(key, value)| (key.to_string(), value.clone()))
            .collect(),
    }
}

/// Drops the selected entries, keeping the rest in map order.
pub fn reject<P>(properties: &P, selector: &Selector<'_, P::Value>) -> IndexMap<String, P::Value>
where
    P: Properties + ?Sized,
    P::Value: Clone,
{
    properties
        .entries()
        .filter(|(key, value)| !selector.selects(key, value))
        .map(|(key, value)| (key.to_string(), value.clone()))
        .collect()
}

/// Splits a map into selected and rejected entries.
pub fn take<P>(properties: &P, selector: &Selector<'_, P::Value>) -> Taken<P::Value>
where
    P: Properties + ?Sized,
    P::Value: Clone,
{
    let mut filtered = IndexMap::new();
    let mut rejected = IndexMap::new();

    for (key, value) in properties.entries() {
        if selector.selects(key, value) {
            filtered.insert(key.to_string(), value.clone());
        } else {
            rejected.insert(key.to_string(), value.clone());
        }
    }

    let missing = match selector {
        Selector::Keys(keys) => difference(keys, properties),
        Selector::Predicate(_) => Vec::new(),
    };

    Taken {
        filtered,
        rejected,
        missing,
    }
}

/// The keys from `keys` that `properties` does not contain, in list order.
pub fn difference<P>(keys: &[&str], properties: &P) -> Vec<String>
where
    P: Properties + ?Sized,
{
    keys.iter()
        .filter(|key| properties.get_property(key).is_none())
        .map(|key| (*key).to_string())
        .collect()
}

/// Copies the entries sorted by key.
pub fn sort_properties<P>(properties: &P) -> IndexMap<String, P::Value>
where
    P: Properties + ?Sized,
    P::Value: Clone,
{
    let mut sorted: IndexMap<String, P::Value> = properties
        .entries()
        .map(|(key, value)| (key.to_string(), value.clone()))
        .collect();
    sorted.sort_keys();
    sorted
}
