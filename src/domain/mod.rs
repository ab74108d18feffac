//! Domain layer: the arena-backed structures the renderers read.
//!
//! Neither structure owns its nodes through pointers; parent, child and
//! sibling links are generational arena indices.

pub mod arena;
pub mod ring;

pub use arena::{Node, TreeArena, TreeIterator, TreeNode};
pub use ring::{RingArena, RingNode};
