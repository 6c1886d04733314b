//! Editing state: document, cursor, and stored marks.

use crate::mark::MarkSet;
use crate::node::Node;

/// A collapsed selection: a path to a textblock plus a character
/// offset inside its inline content.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Cursor {
    /// Child indices from the document root to the textblock.
    pub path: Vec<usize>,
    /// Character offset within the block.
    pub offset: usize,
}

impl Cursor {
    /// Cursor at `offset` in the block at `path`.
    #[must_use]
    pub fn new(path: Vec<usize>, offset: usize) -> Self {
        Self { path, offset }
    }
}

/// The full mutable state of an editing session.
///
/// Owned by the session; commands only ever see a working copy inside
/// a transaction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditorState {
    /// The document tree.
    pub doc: Node,
    /// Current selection.
    pub cursor: Cursor,
    /// Marks queued to apply to the next insertion, when set.
    pub stored_marks: Option<MarkSet>,
}

impl EditorState {
    /// State over `doc` with the cursor at the root.
    #[must_use]
    pub fn new(doc: Node) -> Self {
        Self {
            doc,
            cursor: Cursor::default(),
            stored_marks: None,
        }
    }

    /// The textblock the cursor sits in, if the path resolves.
    #[must_use]
    pub fn cursor_block(&self) -> Option<&Node> {
        self.doc.node_at(&self.cursor.path)
    }

    /// Mutable cursor block.
    pub fn cursor_block_mut(&mut self) -> Option<&mut Node> {
        self.doc.node_at_mut(&self.cursor.path)
    }

    /// The marks a new insertion at the cursor would carry.
    ///
    /// Stored marks win when present (the user queued formatting with
    /// no selection); otherwise the marks just before the cursor. At
    /// the very start of a block with nothing stored, the set is
    /// empty.
    #[must_use]
    pub fn active_marks_at_cursor(&self) -> MarkSet {
        if let Some(marks) = self.stored_marks {
            return marks;
        }
        self.cursor_block()
            .map_or(MarkSet::empty(), |block| block.marks_before(self.cursor.offset))
    }
}
