//! Segment-by-segment walks through nested values.
//!
//! Key lookup walks translation nodes and interpolation walks parameter
//! objects; both go through [`walk`], which reports the first segment that
//! could not be followed.

use crate::tree::TranslationNode;
use serde_json::Value;

/// A value that may hold named children.
pub trait PathNode {
    fn child(&self, segment: &str) -> Option<&Self>;
}

/// Subtrees are entered by key and plural groups by category name.
impl PathNode for TranslationNode {
    fn child(&self, segment: &str) -> Option<&Self> {
        match self {
            TranslationNode::Tree(tree) => tree.get(segment),
            TranslationNode::Plural(group) => group.node(segment.parse().ok()?),
            TranslationNode::Leaf(_) => None,
        }
    }
}

/// `null` counts as absent.
impl PathNode for Value {
    fn child(&self, segment: &str) -> Option<&Self> {
        self.as_object()?
            .get(segment)
            .filter(|value| !value.is_null())
    }
}

/// The segment a walk stopped at.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct WalkError {
    /// Zero-based position of the segment.
    pub depth: usize,
    pub segment: String,
}

/// Follows `segments` from `root`, one child at a time.
pub fn walk<'a, 's, N, I>(root: &'a N, segments: I) -> Result<&'a N, WalkError>
where
    N: PathNode,
    I: IntoIterator<Item = &'s str>,
{
    let mut node = root;
    for (depth, segment) in segments.into_iter().enumerate() {
        node = node.child(segment).ok_or_else(|| WalkError {
            depth,
            segment: segment.to_string(),
        })?;
    }
    Ok(node)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tree::{PluralCategory, PluralGroup, TranslationTree};
    use serde_json::json;

    #[test]
    fn walks_nested_parameters() {
        let params = json!({"user": {"name": {"first": "Ada"}}});

        let found = walk(&params, "user.name.first".split('.')).unwrap();

        assert_eq!(found, &json!("Ada"));
    }

    #[test]
    fn reports_the_failing_segment() {
        let params = json!({"user": {"name": null}});

        let error = walk(&params, ["user", "name", "first"]).unwrap_err();

        assert_eq!(
            error,
            WalkError {
                depth: 1,
                segment: "name".to_string(),
            }
        );
    }

    #[test]
    fn walks_into_plural_groups_by_category() {
        let tree = TranslationTree::new().with(
            "items",
            PluralGroup::new()
                .with(PluralCategory::One, "1 item")
                .with(PluralCategory::Other, "{{cardinal}} items"),
        );
        let root = TranslationNode::Tree(tree);

        let one = walk(&root, ["items", "one"]).unwrap();
        assert_eq!(one.as_leaf(), Some("1 item"));

        let error = walk(&root, ["items", "few"]).unwrap_err();
        assert_eq!(error.depth, 1);
        assert!(walk(&root, ["items", "plenty"]).is_err());
    }

    #[test]
    fn walks_translation_subtrees_only() {
        let tree = TranslationTree::new().with(
            "nav",
            TranslationTree::new().with("home", "Home"),
        );
        let root = TranslationNode::Tree(tree);

        let home = walk(&root, ["nav", "home"]).unwrap();
        assert_eq!(home.as_leaf(), Some("Home"));

        let error = walk(&root, ["nav", "home", "deeper"]).unwrap_err();
        assert_eq!(error.depth, 2);
    }
}
