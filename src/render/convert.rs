//! Conversion into `termtree::Tree<String>`, for callers that prefer
//! termtree's own layout or want to combine our structures with other
//! termtree output.

use std::fmt;

use termtree::Tree;
use tracing::instrument;

use crate::domain::TreeArena;
use crate::errors::{RenderError, RenderResult};
use crate::render::payload_text;
use crate::shape::{RingView, Shape};
use crate::walk::{Event, Walk};

/// Label used for a ring view that has no conceptual root node.
pub const FOREST_LABEL: &str = ".";

pub trait TermTreeConvert {
    fn to_termtree(&self) -> RenderResult<Tree<String>>;
}

impl<T: fmt::Display> TermTreeConvert for TreeArena<T> {
    #[instrument(level = "debug", skip(self))]
    fn to_termtree(&self) -> RenderResult<Tree<String>> {
        let root = self
            .root()
            .ok_or_else(|| RenderError::invalid_argument("no root to convert"))?;
        build(&self.view(), vec![root])?
            .pop()
            .ok_or_else(|| RenderError::malformed("root produced no tree"))
    }
}

impl<T: fmt::Display> TermTreeConvert for RingView<'_, T> {
    #[instrument(level = "debug", skip(self))]
    fn to_termtree(&self) -> RenderResult<Tree<String>> {
        let label = match self.root().and_then(|r| self.payload(r)) {
            Some(payload) => payload_text(payload)?,
            None => FOREST_LABEL.to_string(),
        };
        let leaves = build(self, self.roots()?)?;
        Ok(Tree::new(label).with_leaves(leaves))
    }
}

/// Builds one `Tree` per start node from the walk's enter/leave events.
fn build<S: Shape>(shape: &S, starts: Vec<S::Node>) -> RenderResult<Vec<Tree<String>>> {
    let mut finished = Vec::new();
    let mut open: Vec<Tree<String>> = Vec::new();

    for event in Walk::new(shape, starts, None) {
        match event? {
            Event::Enter { payload, leaf, .. } => {
                let tree = Tree::new(payload_text(payload)?);
                if leaf {
                    attach(&mut open, &mut finished, tree);
                } else {
                    open.push(tree);
                }
            }
            Event::Leave { .. } => {
                if let Some(done) = open.pop() {
                    attach(&mut open, &mut finished, done);
                }
            }
        }
    }
    Ok(finished)
}

fn attach(open: &mut [Tree<String>], finished: &mut Vec<Tree<String>>, tree: Tree<String>) {
    match open.last_mut() {
        Some(parent) => {
            parent.push(tree);
        }
        None => finished.push(tree),
    }
}
