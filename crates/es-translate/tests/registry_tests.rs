use es_translate::{
    TranslateError, TranslationNode, TranslationRegistry, TranslationTree, Translator,
    TranslatorOptions, json, langid,
};
use indexmap::IndexMap;

fn tree(value: serde_json::Value) -> TranslationTree {
    TranslationTree::try_from(value).unwrap()
}

#[test]
fn collision_leaves_the_registry_unchanged() {
    let mut registry = TranslationRegistry::new();
    registry
        .add_translations(langid!("en"), tree(json!({"a": "1"})))
        .unwrap();

    let error = registry
        .add_translations(langid!("en"), tree(json!({"b": "new", "a": "2"})))
        .unwrap_err();

    match error {
        TranslateError::Collision { language, keys } => {
            assert_eq!(language, langid!("en"));
            assert_eq!(keys, vec!["a".to_string()]);
        },
        other => panic!("unexpected error: {other}"),
    }

    let en = registry.tree(&langid!("en"));
    assert_eq!(en.len(), 1);
    assert_eq!(en.get("a").and_then(TranslationNode::as_leaf), Some("1"));
    assert!(!en.contains_key("b"));
}

#[test]
fn same_keys_in_other_languages_do_not_collide() {
    let mut registry = TranslationRegistry::new();
    registry
        .add_translations(langid!("en"), tree(json!({"a": "A"})))
        .unwrap();
    registry
        .add_translations(langid!("de"), tree(json!({"a": "A"})))
        .unwrap();

    let mut tags: Vec<String> = registry
        .supported_language_tags()
        .iter()
        .map(ToString::to_string)
        .collect();
    tags.sort();

    assert_eq!(tags, vec!["de", "en"]);
    assert_eq!(registry.len(), 2);
}

#[test]
fn nested_keys_only_collide_at_the_top_level() {
    let mut registry = TranslationRegistry::new();
    registry
        .add_translations(langid!("en"), tree(json!({"nav": {"home": "Home"}})))
        .unwrap();

    let error = registry
        .add_translations(langid!("en"), tree(json!({"nav": {"about": "About"}})))
        .unwrap_err();

    assert!(matches!(error, TranslateError::Collision { ref keys, .. } if keys == &["nav"]));
}

#[test]
fn translator_rejects_colliding_additions() {
    let mut translator = Translator::new(
        TranslatorOptions::builder()
            .translations(IndexMap::from([(langid!("en"), tree(json!({"a": "A"})))]))
            .build(),
    )
    .unwrap();

    translator
        .add_translations(langid!("fr"), tree(json!({"a": "A (fr)"})))
        .unwrap();
    let error = translator
        .add_translations(langid!("en"), tree(json!({"a": "again"})))
        .unwrap_err();

    assert!(matches!(error, TranslateError::Collision { .. }));
    assert_eq!(translator.supported_language_tags().len(), 2);
    assert_eq!(
        translator
            .translate("a", &json!({}), &langid!("fr"))
            .unwrap(),
        "A (fr)"
    );
}

#[test]
fn trees_deserialize_into_tagged_nodes() {
    let tree: TranslationTree = serde_json::from_str(
        r#"{
            "title": "Title",
            "items": {"one": "1 item", "other": "{{cardinal}} items"},
            "nav": {"home": "Home"},
            "mixed": {"one": "1", "label": "Label"}
        }"#,
    )
    .unwrap();

    assert!(matches!(tree.get("title"), Some(TranslationNode::Leaf(_))));
    assert!(matches!(tree.get("items"), Some(TranslationNode::Plural(_))));
    assert!(matches!(tree.get("nav"), Some(TranslationNode::Tree(_))));
    assert!(matches!(tree.get("mixed"), Some(TranslationNode::Tree(_))));
}

#[test]
fn non_string_leaves_are_rejected() {
    let error = serde_json::from_str::<TranslationTree>(r#"{"nav": {"home": 1}}"#).unwrap_err();

    assert!(error.to_string().contains("\"nav.home\""));
}
