//! Conversion into termtree values.

use treeglyph::domain::{Node, RingArena, TreeArena};
use treeglyph::{RenderError, TermTreeConvert};

#[test]
fn given_tree_when_converting_then_leaves_follow_child_order() {
    let tree: TreeArena<&str> = Node::new("a")
        .with_children([
            Node::leaf("b"),
            Node::new("c").with_children([Node::leaf("e"), Node::leaf("f")]),
            Node::leaf("d"),
        ])
        .into();

    let converted = tree.to_termtree().unwrap();
    let top: Vec<&str> = converted.leaves.iter().map(|t| t.root.as_str()).collect();
    let nested: Vec<&str> = converted.leaves[1]
        .leaves
        .iter()
        .map(|t| t.root.as_str())
        .collect();

    assert_eq!(converted.root, "a");
    assert_eq!(top, vec!["b", "c", "d"]);
    assert_eq!(nested, vec!["e", "f"]);
}

#[test]
fn given_empty_tree_when_converting_then_invalid_argument() {
    let tree: TreeArena<&str> = TreeArena::new();
    assert!(matches!(
        tree.to_termtree(),
        Err(RenderError::InvalidArgument(_))
    ));
}

#[test]
fn given_ring_view_with_root_when_converting_then_root_labels_tree() {
    let mut ring = RingArena::new();
    let holder = ring.insert("heap");
    let a = ring.push_child(holder, "a").unwrap();
    ring.push_child(a, "b").unwrap();
    ring.push_child(holder, "c").unwrap();

    let converted = ring.view(Some(holder)).to_termtree().unwrap();

    assert_eq!(converted.root, "heap");
    assert_eq!(converted.leaves.len(), 2);
    assert_eq!(converted.leaves[0].leaves[0].root, "b");
    assert!(converted.leaves[1].leaves.is_empty());
}
