//! Text renderers built on the shared walk.
//!
//! - [`TreeRenderer`]: parenthesized form, `(a b (c e f) d)`
//! - [`ForestRenderer`]: box-drawing form, one line per node
//! - [`TermTreeConvert`]: conversion into a `termtree::Tree`
//!
//! Payload text is written as-is. Parentheses or spaces inside a payload are
//! not escaped, so the parenthesized form only round-trips for payloads free
//! of them.

use std::fmt::{self, Write};

use crate::errors::{RenderError, RenderResult};

pub mod convert;
pub mod forest;
pub mod tree;

pub use convert::TermTreeConvert;
pub use forest::ForestRenderer;
pub use tree::TreeRenderer;

pub(crate) fn write_payload(out: &mut String, payload: &impl fmt::Display) -> RenderResult<()> {
    write!(out, "{payload}")
        .map_err(|_| RenderError::invalid_argument("payload Display implementation failed"))
}

pub(crate) fn payload_text(payload: &impl fmt::Display) -> RenderResult<String> {
    let mut out = String::new();
    write_payload(&mut out, payload)?;
    Ok(out)
}
