//! Tests for message catalogues and dotted-key resolution.

use super::*;
use crate::IntlErrorCode;
use rstest::{fixture, rstest};

#[fixture]
fn catalogue() -> MessageTree {
    MessageTree::new()
        .with("title", "Welcome")
        .with(
            "nav",
            MessageTree::new()
                .with("home", "Home")
                .with("deep", MessageTree::new().with("leaf", "Leaf")),
        )
        .with("steps", vec![MessageNode::from("one"), MessageNode::from("two")])
        .with("flat.key", "Flattened")
}

#[rstest]
#[case("title", "Welcome")]
#[case("nav.home", "Home")]
#[case("nav.deep.leaf", "Leaf")]
#[case("flat.key", "Flattened")]
fn resolves_text_leaves(catalogue: MessageTree, #[case] key: &str, #[case] expected: &str) {
    assert_eq!(resolve(Some(&catalogue), key), Ok(Resolved::Text(expected)));
}

#[rstest]
fn classifies_subtrees(catalogue: MessageTree) {
    let resolved = resolve(Some(&catalogue), "nav").expect("nav exists");
    assert!(matches!(resolved, Resolved::Subtree(tree) if tree.len() == 2));
}

#[rstest]
fn classifies_arrays(catalogue: MessageTree) {
    let resolved = resolve(Some(&catalogue), "steps").expect("steps exists");
    assert!(matches!(resolved, Resolved::UnsupportedArray(items) if items.len() == 2));
}

#[rstest]
#[case("missing")]
#[case("nav.missing")]
#[case("title.extra")]
#[case("nav.deep.leaf.extra")]
#[case("")]
fn reports_missing_keys(catalogue: MessageTree, #[case] key: &str) {
    let err = resolve(Some(&catalogue), key).expect_err("key should be missing");
    assert_eq!(err.code(), IntlErrorCode::MissingMessage);
    assert!(err.message().is_some_and(|text| text.contains(key)));
}

#[rstest]
fn absent_tree_is_missing() {
    let err = resolve(None, "title").expect_err("no tree");
    assert_eq!(err.code(), IntlErrorCode::MissingMessage);
}

#[rstest]
fn deserialises_nested_json() {
    let tree = MessageTree::from_json_str(r#"{"a": {"b": "x"}, "list": ["p", "q"]}"#)
        .expect("valid catalogue");
    assert_eq!(resolve(Some(&tree), "a.b"), Ok(Resolved::Text("x")));
    assert!(matches!(
        resolve(Some(&tree), "list"),
        Ok(Resolved::UnsupportedArray(_))
    ));
}

#[rstest]
fn rejects_numeric_leaves_in_json() {
    assert!(MessageTree::from_json_str(r#"{"a": 1}"#).is_err());
}

#[rstest]
fn deserialises_toml_tables() {
    let tree = MessageTree::from_toml_str("[auth]\nlogin = \"Sign in\"\n").expect("valid toml");
    assert_eq!(resolve(Some(&tree), "auth.login"), Ok(Resolved::Text("Sign in")));
}

fn level_size(tree: &MessageTree) -> (usize, bool) {
    (tree.len(), tree.is_empty())
}

#[rstest]
fn level_size_is_const(catalogue: MessageTree) {
    assert_eq!(level_size(&MessageTree::new()), (0, true));
    assert_eq!(level_size(&catalogue), (4, false));
}
