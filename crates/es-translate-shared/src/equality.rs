//! Deep structural equality and subset tests over JSON-like values.
//!
//! Mappings are equal when they hold the same keys with pairwise equal values.
//! Sequences are compared as multisets: every element of the left sequence
//! must match a distinct, not yet matched element of the right one, so order
//! is irrelevant while duplicates still count.
//!
//! Numbers compare numerically (`1` equals `1.0`). JSON has no opaque object
//! kind, so two values are only ever equal when they are structurally equal;
//! a [`Comparator`] can override any sub-comparison when a caller needs
//! different semantics.

use serde_json::{Map, Number, Value};
use std::fmt;

/// One step of the location of a [`Mismatch`].
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum PathSegment {
    Key(String),
    Index(usize),
}

/// Why two values were found to differ.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum MismatchKind {
    /// The values are of different JSON types.
    TypeMismatch,
    /// Same type, different scalar value.
    ValueMismatch,
    /// A key of the left mapping is missing from the right one.
    MissingKey(String),
    /// A key of the right mapping is missing from the left one.
    ExtraKey(String),
    /// The sequences have different lengths.
    LengthMismatch { left: usize, right: usize },
    /// The element at this index of the left sequence matched nothing on the right.
    UnmatchedElement(usize),
}

/// The first difference found while comparing two values.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Mismatch {
    /// Location of the differing values, from the root.
    pub path: Vec<PathSegment>,
    pub kind: MismatchKind,
}

impl Mismatch {
    fn new(path: &[PathSegment], kind: MismatchKind) -> Self {
        Self {
            path: path.to_vec(),
            kind,
        }
    }

    /// Renders the location as a dotted path (`a.b[2]`), `$` for the root.
    pub fn path_string(&self) -> String {
        if self.path.is_empty() {
            return "$".to_string();
        }

        let mut rendered = String::new();
        for segment in &self.path {
            match segment {
                PathSegment::Key(key) => {
                    if !rendered.is_empty() {
                        rendered.push('.');
                    }
                    rendered.push_str(key);
                },
                PathSegment::Index(index) => {
                    rendered.push_str(&format!("[{}]", index));
                },
            }
        }
        rendered
    }
}

impl fmt::Display for Mismatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let at = self.path_string();
        match &self.kind {
            MismatchKind::TypeMismatch => write!(f, "type mismatch at `{}`", at),
            MismatchKind::ValueMismatch => write!(f, "value mismatch at `{}`", at),
            MismatchKind::MissingKey(key) => {
                write!(f, "key `{}` at `{}` is missing on the right", key, at)
            },
            MismatchKind::ExtraKey(key) => {
                write!(f, "key `{}` at `{}` is missing on the left", key, at)
            },
            MismatchKind::LengthMismatch { left, right } => {
                write!(f, "length mismatch at `{}`: {} != {}", at, left, right)
            },
            MismatchKind::UnmatchedElement(index) => {
                write!(f, "element {} at `{}` has no counterpart", index, at)
            },
        }
    }
}

/// Outcome of [`compare`].
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Comparison {
    Equal,
    Mismatch(Mismatch),
}

impl Comparison {
    pub fn is_equal(&self) -> bool {
        matches!(self, Comparison::Equal)
    }

    pub fn mismatch(&self) -> Option<&Mismatch> {
        match self {
            Comparison::Equal => None,
            Comparison::Mismatch(mismatch) => Some(mismatch),
        }
    }
}

impl From<Result<(), Mismatch>> for Comparison {
    fn from(result: Result<(), Mismatch>) -> Self {
        match result {
            Ok(()) => Comparison::Equal,
            Err(mismatch) => Comparison::Mismatch(mismatch),
        }
    }
}

/// Verdict of a [`Comparator`] on a pair of values.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ComparisonResult {
    Equal,
    NotEqual,
    /// Fall through to the structural comparison.
    Default,
}

/// Hook consulted before every structural comparison, at every depth.
pub trait Comparator {
    fn compare(&self, a: &Value, b: &Value) -> ComparisonResult;
}

impl<F> Comparator for F
where
    F: Fn(&Value, &Value) -> ComparisonResult,
{
    fn compare(&self, a: &Value, b: &Value) -> ComparisonResult {
        self(a, b)
    }
}

/// Comparator that always defers to the structural rules.
#[derive(Clone, Copy, Debug, Default)]
pub struct StructuralComparator;

impl Comparator for StructuralComparator {
    fn compare(&self, _a: &Value, _b: &Value) -> ComparisonResult {
        ComparisonResult::Default
    }
}

/// Compares two values, reporting the first difference.
pub fn compare(a: &Value, b: &Value) -> Comparison {
    compare_with(a, b, &StructuralComparator)
}

/// Compares two values, consulting `comparator` at every level first.
pub fn compare_with<C: Comparator + ?Sized>(a: &Value, b: &Value, comparator: &C) -> Comparison {
    let mut path = Vec::new();
    compare_values(a, b, comparator, &mut path).into()
}

/// Returns `true` if both values are structurally equal.
pub fn deep_equal(a: &Value, b: &Value) -> bool {
    compare(a, b).is_equal()
}

/// Returns `true` if both mappings hold the same keys with deep-equal values.
pub fn objects_equal(a: &Map<String, Value>, b: &Map<String, Value>) -> bool {
    let mut path = Vec::new();
    compare_objects(a, b, &StructuralComparator, &mut path).is_ok()
}

/// Returns `true` if both sequences are equal as multisets.
pub fn arrays_equal(a: &[Value], b: &[Value]) -> bool {
    let mut path = Vec::new();
    compare_arrays(a, b, &StructuralComparator, &mut path).is_ok()
}

fn compare_values<C: Comparator + ?Sized>(
    a: &Value,
    b: &Value,
    comparator: &C,
    path: &mut Vec<PathSegment>,
) -> Result<(), Mismatch> {
    match comparator.compare(a, b) {
        ComparisonResult::Equal => return Ok(()),
        ComparisonResult::NotEqual => {
            return Err(Mismatch::new(path, MismatchKind::ValueMismatch));
        },
        ComparisonResult::Default => {},
    }

    let same = match (a, b) {
        (Value::Null, Value::Null) => true,
        (Value::Bool(x), Value::Bool(y)) => x == y,
        (Value::Number(x), Value::Number(y)) => numbers_equal(x, y),
        (Value::String(x), Value::String(y)) => x == y,
        (Value::Array(x), Value::Array(y)) => return compare_arrays(x, y, comparator, path),
        (Value::Object(x), Value::Object(y)) => return compare_objects(x, y, comparator, path),
        _ => return Err(Mismatch::new(path, MismatchKind::TypeMismatch)),
    };

    if same {
        Ok(())
    } else {
        Err(Mismatch::new(path, MismatchKind::ValueMismatch))
    }
}

fn compare_objects<C: Comparator + ?Sized>(
    a: &Map<String, Value>,
    b: &Map<String, Value>,
    comparator: &C,
    path: &mut Vec<PathSegment>,
) -> Result<(), Mismatch> {
    for (key, left) in a {
        let Some(right) = b.get(key) else {
            return Err(Mismatch::new(path, MismatchKind::MissingKey(key.clone())));
        };

        path.push(PathSegment::Key(key.clone()));
        let result = compare_values(left, right, comparator, path);
        path.pop();
        result?;
    }

    if let Some(extra) = b.keys().find(|key| !a.contains_key(*key)) {
        return Err(Mismatch::new(path, MismatchKind::ExtraKey(extra.clone())));
    }

    Ok(())
}

fn compare_arrays<C: Comparator + ?Sized>(
    a: &[Value],
    b: &[Value],
    comparator: &C,
    path: &mut Vec<PathSegment>,
) -> Result<(), Mismatch> {
    if a.len() != b.len() {
        return Err(Mismatch::new(
            path,
            MismatchKind::LengthMismatch {
                left: a.len(),
                right: b.len(),
            },
        ));
    }

    let mut remaining: Vec<&Value> = b.iter().collect();
    let mut scratch = Vec::new();

    for (index, left) in a.iter().enumerate() {
        let position = remaining.iter().position(|right| {
            scratch.clear();
            compare_values(left, right, comparator, &mut scratch).is_ok()
        });

        match position {
            Some(position) => {
                remaining.swap_remove(position);
            },
            None => {
                return Err(Mismatch::new(path, MismatchKind::UnmatchedElement(index)));
            },
        }
    }

    Ok(())
}

fn numbers_equal(a: &Number, b: &Number) -> bool {
    if let (Some(x), Some(y)) = (a.as_i64(), b.as_i64()) {
        return x == y;
    }
    if let (Some(x), Some(y)) = (a.as_u64(), b.as_u64()) {
        return x == y;
    }
    a.as_f64() == b.as_f64()
}

/// Returns `true` if every key or element of `sub` is matched within `sup`.
///
/// Nested mappings and sequences are matched as subsets too; scalars must be
/// equal. Extra keys or elements of `sup` are ignored.
pub fn is_subset(sup: &Value, sub: &Value) -> bool {
    match (sup, sub) {
        (Value::Object(sup), Value::Object(sub)) => object_subset(sup, sub),
        (Value::Array(sup), Value::Array(sub)) => array_subset(sup, sub),
        _ => deep_equal(sup, sub),
    }
}

pub fn object_subset(sup: &Map<String, Value>, sub: &Map<String, Value>) -> bool {
    if sup.len() < sub.len() {
        return false;
    }

    sub.iter().all(|(key, value)| {
        sup.get(key)
            .is_some_and(|candidate| is_subset(candidate, value))
    })
}

/// Returns `true` if every element of `sub` is matched by a distinct element
/// of `sup`.
///
/// Elements that could match several candidates are retried against each of
/// them, so the result does not depend on element order.
pub fn array_subset(sup: &[Value], sub: &[Value]) -> bool {
    if sup.len() < sub.len() {
        return false;
    }

    let mut taken = vec![false; sup.len()];
    match_elements(sup, sub, &mut taken)
}

fn match_elements(sup: &[Value], sub: &[Value], taken: &mut [bool]) -> bool {
    let Some((value, rest)) = sub.split_first() else {
        return true;
    };

    for (index, candidate) in sup.iter().enumerate() {
        if taken[index] || !is_subset(candidate, value) {
            continue;
        }

        taken[index] = true;
        if match_elements(sup, rest, taken) {
            return true;
        }
        taken[index] = false;
    }

    false
}

pub fn has_property(object: &Map<String, Value>, key: &str) -> bool {
    object.contains_key(key)
}

pub fn has_properties(object: &Map<String, Value>, keys: &[&str]) -> bool {
    keys.iter().all(|key| has_property(object, key))
}
