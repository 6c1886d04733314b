#![forbid(unsafe_code)]

//! Editing behavior extensions for the easel document core.
//!
//! Four small packages of behavior, each registered into a session
//! through the [`easel_doc::HostRegistry`] capability interface:
//!
//! - [`RestrictedDoc`] - the document root accepts exactly one `table`
//!   node and nothing else
//! - [`Title`] - a titled paragraph node with set/toggle commands and
//!   a high-priority markup import rule
//! - [`EnterAsBreak`] - Enter inside a title or heading inserts a hard
//!   line break instead of splitting the block
//! - [`ListKeys`] - Enter splits a list item without dropping active
//!   marks; Tab and Shift-Tab nest and unnest the item
//!
//! All of it is glue over the host's transaction API; no extension
//! owns mutable state of its own.
//!
//! # Example
//! ```
//! use easel_commands::default_extensions;
//! use easel_doc::{Inline, Node, Session};
//!
//! let table = Node::with_children(
//!     "table",
//!     vec![Node::textblock("title", [Inline::plain("Q3 revenue")])],
//! );
//! let doc = Node::with_children("doc", vec![table]);
//! let session = Session::new(doc, &default_extensions()).unwrap();
//! assert!(session.schema().spec("title").is_some());
//! ```

pub mod enter_break;
pub mod lists;
pub mod restricted_doc;
pub mod title;

pub use enter_break::EnterAsBreak;
pub use lists::ListKeys;
pub use restricted_doc::RestrictedDoc;
pub use title::{TITLE_PARSE_PRIORITY, Title};

use easel_doc::Extension;

/// The full extension set, in the order the editor registers them.
///
/// Order matters for keys bound more than once: title/heading Enter
/// handling is consulted before list Enter handling.
#[must_use]
pub fn default_extensions() -> [&'static dyn Extension; 4] {
    [&RestrictedDoc, &Title, &EnterAsBreak, &ListKeys]
}
