use std::fmt;

use generational_arena::Index;
use tracing::{debug, instrument};

use crate::config::RenderSettings;
use crate::domain::{RingArena, TreeArena};
use crate::errors::{RenderError, RenderResult};
use crate::render::write_payload;
use crate::shape::Shape;
use crate::walk::{Event, Walk};

const BRANCH: &str = "├ ";
const LAST: &str = "└ ";
const BAR: &str = "│ ";
const SPACE: &str = "  ";

/// Renders nested sibling rings (or any [`Shape`]) as an indented
/// box-drawing listing:
///
/// ```text
/// └ a
///   ├ b
///   ├ c
///   │ ├ e
///   │ └ f
///   └ d
/// ```
///
/// The last sibling at each level gets `└`, the others `├`. Below a last
/// sibling the continuation column is blank, otherwise it carries `│`.
#[derive(Debug, Clone, Default)]
pub struct ForestRenderer {
    settings: RenderSettings,
}

impl ForestRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_settings(settings: RenderSettings) -> Self {
        Self { settings }
    }

    /// Renders the children of `root`, level by level. `root` itself is not
    /// printed; an absent root or one without children renders as "".
    #[instrument(level = "debug", skip(self, ring), fields(nodes = ring.len()))]
    pub fn render<T: fmt::Display>(
        &self,
        ring: &RingArena<T>,
        root: Option<Index>,
    ) -> RenderResult<String> {
        let Some(root) = root else {
            return Ok(String::new());
        };
        if ring.get(root).is_none() {
            return Err(RenderError::invalid_argument(format!(
                "root {root:?} is not in the arena"
            )));
        }
        let view = ring.view(Some(root));
        let starts = view.roots()?;
        self.emit(&view, starts)
    }

    /// Renders the ring entered at `entry`, such as the root list of a
    /// heap-ordered forest entered at its minimum. The entry is treated as the
    /// ring's start, so the member just before it is printed last.
    #[instrument(level = "debug", skip(self, ring), fields(nodes = ring.len()))]
    pub fn render_ring<T: fmt::Display>(
        &self,
        ring: &RingArena<T>,
        entry: Option<Index>,
    ) -> RenderResult<String> {
        if let Some(entry) = entry {
            if ring.get(entry).is_none() {
                return Err(RenderError::invalid_argument(format!(
                    "entry {entry:?} is not in the arena"
                )));
            }
        }
        let view = ring.ring_view(entry);
        let starts = view.roots()?;
        self.emit(&view, starts)
    }

    /// Renders an ordered tree, its root as the single top-level entry.
    #[instrument(level = "debug", skip(self, tree), fields(nodes = tree.len()))]
    pub fn render_tree<T: fmt::Display>(&self, tree: &TreeArena<T>) -> RenderResult<String> {
        let view = tree.view();
        let starts = view.root().into_iter().collect();
        self.emit(&view, starts)
    }

    /// Renders the children of `root` in any shape.
    pub fn render_shape<S: Shape>(&self, shape: &S, root: S::Node) -> RenderResult<String> {
        let starts = shape.children_of(root)?;
        self.emit(shape, starts)
    }

    fn emit<S: Shape>(&self, shape: &S, starts: Vec<S::Node>) -> RenderResult<String> {
        let mut out = String::new();
        // Whether each open ancestor level was the last of its ring
        let mut trail: Vec<bool> = Vec::new();
        let mut lines = 0usize;

        for event in Walk::new(shape, starts, self.settings.max_steps) {
            let Event::Enter {
                payload,
                depth,
                last,
                ..
            } = event?
            else {
                continue;
            };

            trail.truncate(depth);
            for &ancestor_last in &trail {
                out.push_str(if ancestor_last { SPACE } else { BAR });
            }
            out.push_str(if last { LAST } else { BRANCH });
            write_payload(&mut out, payload)?;
            out.push('\n');
            trail.push(last);
            lines += 1;
        }

        debug!(lines, "forest rendered");
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_absent_root_is_empty() {
        let ring: RingArena<u32> = RingArena::new();
        assert_eq!(ForestRenderer::new().render(&ring, None).unwrap(), "");
        assert_eq!(ForestRenderer::new().render_ring(&ring, None).unwrap(), "");
    }

    #[test]
    fn test_childless_root_is_empty() {
        let mut ring = RingArena::new();
        let root = ring.insert(1);
        assert_eq!(ForestRenderer::new().render(&ring, Some(root)).unwrap(), "");
    }

    #[test]
    fn test_single_child_is_last() {
        let mut ring = RingArena::new();
        let root = ring.insert("root");
        ring.push_child(root, "only");
        assert_eq!(
            ForestRenderer::new().render(&ring, Some(root)).unwrap(),
            "└ only\n"
        );
    }

    #[test]
    fn test_bar_continues_below_non_last_sibling() {
        let mut ring = RingArena::new();
        let root = ring.insert("root");
        let x = ring.push_child(root, "x").unwrap();
        ring.push_child(x, "x1");
        ring.push_child(root, "y");
        assert_eq!(
            ForestRenderer::new().render(&ring, Some(root)).unwrap(),
            "├ x\n│ └ x1\n└ y\n"
        );
    }
}
