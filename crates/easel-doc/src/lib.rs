#![forbid(unsafe_code)]

//! Document model and editing-session host for easel.
//!
//! This crate is the host side of the design editor's rich-text core:
//! - [`Node`] / [`Inline`] - the typed document tree
//! - [`MarkSet`] - inline formatting marks as a bitset
//! - [`Schema`] / [`NodeSpec`] - node type registry with content
//!   constraints and markup parse rules
//! - [`EditorState`] / [`Cursor`] - selection and pending marks
//! - [`Transaction`] - atomic all-or-nothing edits
//! - [`Session`] - the editing session, implementing the
//!   [`HostRegistry`] capability interface extensions register through
//!
//! The extension layer (restricted root, titled paragraphs, list
//! behavior) lives in `easel-commands`; this crate knows nothing about
//! any particular extension.
//!
//! # Example
//! ```
//! use easel_doc::{ContentExpr, Inline, Node, NodeSpec, Schema};
//!
//! let mut schema = Schema::base();
//! schema
//!     .register(NodeSpec::block("doc").content(ContentExpr::parse("block+").unwrap()))
//!     .unwrap();
//!
//! let doc = Node::with_children(
//!     "doc",
//!     vec![Node::textblock("paragraph", [Inline::plain("hi")])],
//! );
//! assert!(schema.validate(&doc));
//! ```

pub mod key;
pub mod mark;
pub mod node;
pub mod schema;
pub mod session;
pub mod state;
pub mod transform;

pub use key::{KeyCode, KeyPress, Modifiers};
pub use mark::MarkSet;
pub use node::{Attrs, Inline, InlineSeq, Node};
pub use schema::{
    ContentExpr, DEFAULT_PARSE_PRIORITY, NodeSpec, ParseRule, RenderRule, Schema, SchemaError,
};
pub use session::{CommandFn, Extension, HostRegistry, Session};
pub use state::{Cursor, EditorState};
pub use transform::Transaction;
