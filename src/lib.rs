//! Text renderers for hierarchical structures.
//!
//! Two output forms are supported:
//!
//! - a parenthesized serialization of an ordered tree, `(a b (c e f) d)`
//! - an indented box-drawing listing of nested sibling rings, as found in the
//!   root and child lists of heap-ordered forests
//!
//! Both go through one iterative traversal ([`walk::Walk`]) parameterized by
//! a [`shape::Shape`] adapter.
//!
//! ```
//! use treeglyph::domain::{Node, TreeArena};
//! use treeglyph::render::{ForestRenderer, TreeRenderer};
//!
//! let tree: TreeArena<&str> = Node::new("a")
//!     .with_children([
//!         Node::leaf("b"),
//!         Node::new("c").with_children([Node::leaf("e"), Node::leaf("f")]),
//!         Node::leaf("d"),
//!     ])
//!     .into();
//!
//! assert_eq!(TreeRenderer::new().render(&tree)?, "(a b (c e f) d)");
//! assert_eq!(
//!     ForestRenderer::new().render_tree(&tree)?,
//!     "└ a\n  ├ b\n  ├ c\n  │ ├ e\n  │ └ f\n  └ d\n"
//! );
//! # Ok::<_, treeglyph::errors::RenderError>(())
//! ```
//!
//! Rendering borrows the structure for the duration of one call. The walk uses
//! an explicit stack, so tree height is limited by available memory, not by
//! the call stack.

pub mod config;
pub mod domain;
pub mod errors;
pub mod render;
pub mod shape;
pub mod util;
pub mod walk;

pub use config::RenderSettings;
pub use errors::{RenderError, RenderResult};
pub use render::{ForestRenderer, TermTreeConvert, TreeRenderer};
