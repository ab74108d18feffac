use std::fmt;

use generational_arena::Index;
use tracing::{debug, instrument};

use crate::config::RenderSettings;
use crate::domain::TreeArena;
use crate::errors::{RenderError, RenderResult};
use crate::render::write_payload;
use crate::shape::Shape;
use crate::walk::{Event, Walk};

/// Renders a tree as `(payload child child ...)`, leaves as bare payload text.
#[derive(Debug, Clone, Default)]
pub struct TreeRenderer {
    settings: RenderSettings,
}

impl TreeRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_settings(settings: RenderSettings) -> Self {
        Self { settings }
    }

    /// Renders the whole tree. An empty arena has no root and is rejected.
    #[instrument(level = "debug", skip(self, tree), fields(nodes = tree.len()))]
    pub fn render<T: fmt::Display>(&self, tree: &TreeArena<T>) -> RenderResult<String> {
        self.render_from(tree, tree.root())
    }

    /// Renders the subtree below `root`.
    #[instrument(level = "debug", skip(self, tree))]
    pub fn render_from<T: fmt::Display>(
        &self,
        tree: &TreeArena<T>,
        root: Option<Index>,
    ) -> RenderResult<String> {
        let root = root.ok_or_else(|| RenderError::invalid_argument("no root to render"))?;
        if tree.get_node(root).is_none() {
            return Err(RenderError::invalid_argument(format!(
                "root {root:?} is not in the tree"
            )));
        }
        self.render_shape(&tree.view(), root)
    }

    pub fn render_shape<S: Shape>(&self, shape: &S, root: S::Node) -> RenderResult<String> {
        let mut out = String::new();

        for event in Walk::new(shape, vec![root], self.settings.max_steps) {
            match event? {
                Event::Enter {
                    payload,
                    depth,
                    leaf,
                    ..
                } => {
                    if depth > 0 {
                        out.push(' ');
                    }
                    if !leaf {
                        out.push('(');
                    }
                    write_payload(&mut out, payload)?;
                }
                Event::Leave { .. } => out.push(')'),
            }
        }

        debug!(chars = out.len(), "tree rendered");
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Node;

    #[test]
    fn test_leaf_renders_bare() {
        let tree: TreeArena<i32> = Node::leaf(42).into();
        assert_eq!(TreeRenderer::new().render(&tree).unwrap(), "42");
    }

    #[test]
    fn test_nested() {
        let tree: TreeArena<&str> = Node::new("a")
            .with_children([
                Node::leaf("b"),
                Node::new("c").with_children([Node::leaf("e"), Node::leaf("f")]),
                Node::leaf("d"),
            ])
            .into();
        assert_eq!(
            TreeRenderer::new().render(&tree).unwrap(),
            "(a b (c e f) d)"
        );
    }

    #[test]
    fn test_empty_tree_is_invalid_argument() {
        let tree: TreeArena<&str> = TreeArena::new();
        let err = TreeRenderer::new().render(&tree).unwrap_err();
        assert!(matches!(err, RenderError::InvalidArgument(_)));
    }

    #[test]
    fn test_render_from_subtree() {
        let mut tree = TreeArena::new();
        let a = tree.insert_node("a", None);
        let b = tree.insert_node("b", Some(a));
        tree.insert_node("c", Some(b));
        assert_eq!(
            TreeRenderer::new().render_from(&tree, Some(b)).unwrap(),
            "(b c)"
        );
    }
}
