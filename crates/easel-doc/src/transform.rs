//! Transactions: atomic, all-or-nothing edits.
//!
//! A [`Transaction`] wraps a working copy of the editor state. Command
//! implementations mutate the copy through the operations here and
//! report success with `true`; the session commits the copy only when
//! the command succeeded *and* the resulting tree still validates
//! against the schema. A `false` anywhere discards the copy, so every
//! command is a strict no-op on failure.
//!
//! Operations never panic and never return errors; `bool` is the whole
//! contract, matching how command chains short-circuit.

use crate::mark::MarkSet;
use crate::node::Node;
use crate::schema::Schema;
use crate::state::{Cursor, EditorState};

/// Working copy of the state for one command invocation.
#[derive(Debug)]
pub struct Transaction<'a> {
    schema: &'a Schema,
    state: EditorState,
}

impl<'a> Transaction<'a> {
    pub(crate) fn new(schema: &'a Schema, state: EditorState) -> Self {
        Self { schema, state }
    }

    pub(crate) fn into_state(self) -> EditorState {
        self.state
    }

    /// The session schema.
    #[must_use]
    pub fn schema(&self) -> &Schema {
        self.schema
    }

    /// The working state.
    #[must_use]
    pub fn state(&self) -> &EditorState {
        &self.state
    }

    /// Mutable working state, for bespoke commands.
    pub fn state_mut(&mut self) -> &mut EditorState {
        &mut self.state
    }

    /// Type name of the cursor block, if the cursor resolves.
    #[must_use]
    pub fn cursor_block_name(&self) -> Option<&str> {
        self.state.cursor_block().map(|n| n.type_name.as_str())
    }

    /// Whether the cursor block's direct parent is a list item.
    #[must_use]
    pub fn in_list_item(&self) -> bool {
        let path = &self.state.cursor.path;
        path.len() >= 2 && self.node_is(&path[..path.len() - 1], "list_item")
    }

    fn node_is(&self, path: &[usize], type_name: &str) -> bool {
        self.state
            .doc
            .node_at(path)
            .is_some_and(|n| n.type_name == type_name)
    }

    /// Queue marks to apply to the next insertion.
    pub fn set_stored_marks(&mut self, marks: MarkSet) {
        self.state.stored_marks = Some(marks);
    }

    /// Convert the cursor block to another textblock type.
    ///
    /// Both the current and the target type must be textblocks; attrs
    /// and inline content ride along unchanged, which is what makes a
    /// double toggle restore the original node.
    pub fn set_block_type(&mut self, name: &str) -> bool {
        if !self.schema.is_textblock(name) {
            return false;
        }
        let Some(block) = self.state.cursor_block_mut() else {
            return false;
        };
        if !self.schema.is_textblock(&block.type_name) {
            return false;
        }
        block.type_name = name.to_owned();
        true
    }

    /// Insert a hard line break at the cursor.
    pub fn insert_hard_break(&mut self) -> bool {
        let offset = self.state.cursor.offset;
        let Some(block) = self.state.cursor_block_mut() else {
            return false;
        };
        if !self.schema.is_textblock(&block.type_name) || offset > block.inline_len() {
            return false;
        }
        block.insert_break(offset);
        self.state.cursor.offset = offset + 1;
        true
    }

    /// Insert text at the cursor, carrying the active marks.
    ///
    /// Stored marks are consumed by the insertion.
    pub fn insert_text(&mut self, text: &str) -> bool {
        let marks = self.state.active_marks_at_cursor();
        let offset = self.state.cursor.offset;
        let Some(block) = self.state.cursor_block_mut() else {
            return false;
        };
        if !self.schema.is_textblock(&block.type_name) || offset > block.inline_len() {
            return false;
        }
        block.insert_text_at(offset, text, marks);
        self.state.cursor.offset = offset + text.chars().count();
        self.state.stored_marks = None;
        true
    }

    /// Default Enter: split the cursor block into two siblings of the
    /// same type. Pending marks are dropped, as hosts conventionally
    /// do on a plain split.
    pub fn split_block(&mut self) -> bool {
        let path = self.state.cursor.path.clone();
        let Some((&block_idx, parent_path)) = path.split_last() else {
            return false;
        };
        let offset = self.state.cursor.offset;
        let Some(block) = self.state.doc.node_at(&path) else {
            return false;
        };
        if !self.schema.is_textblock(&block.type_name) || offset > block.inline_len() {
            return false;
        }
        let type_name = block.type_name.clone();
        let attrs = block.attrs.clone();
        let (left, right) = block.split_inline(offset);
        let Some(block) = self.state.doc.node_at_mut(&path) else {
            return false;
        };
        block.inline = left;
        let Some(parent) = self.state.doc.node_at_mut(parent_path) else {
            return false;
        };
        parent.children.insert(
            block_idx + 1,
            Node {
                type_name,
                attrs,
                children: Vec::new(),
                inline: right,
            },
        );
        let mut new_path = parent_path.to_vec();
        new_path.push(block_idx + 1);
        self.state.cursor = Cursor::new(new_path, 0);
        self.state.stored_marks = None;
        true
    }

    /// Standard list-item split: the cursor item becomes two items,
    /// the right half of the block and any trailing item children
    /// moving into the new one. Pending marks are dropped; callers
    /// that want them carried re-apply after the split.
    pub fn split_list_item(&mut self) -> bool {
        let path = self.state.cursor.path.clone();
        if path.len() < 2 {
            return false;
        }
        let block_idx = path[path.len() - 1];
        let item_idx = path[path.len() - 2];
        let item_path = &path[..path.len() - 1];
        let list_path = &path[..path.len() - 2];
        if !self.node_is(item_path, "list_item") || !self.node_is(list_path, "bullet_list") {
            return false;
        }
        let offset = self.state.cursor.offset;
        let Some(block) = self.state.doc.node_at(&path) else {
            return false;
        };
        if !self.schema.is_textblock(&block.type_name) || offset > block.inline_len() {
            return false;
        }
        let type_name = block.type_name.clone();
        let attrs = block.attrs.clone();
        let (left, right) = block.split_inline(offset);
        let split_off: Vec<Node>;
        {
            let Some(block) = self.state.doc.node_at_mut(&path) else {
                return false;
            };
            block.inline = left;
        }
        {
            let Some(item) = self.state.doc.node_at_mut(item_path) else {
                return false;
            };
            split_off = item.children.drain(block_idx + 1..).collect();
        }
        let mut new_children = vec![Node {
            type_name,
            attrs,
            children: Vec::new(),
            inline: right,
        }];
        new_children.extend(split_off);
        let new_item = Node::with_children("list_item", new_children);
        let Some(list) = self.state.doc.node_at_mut(list_path) else {
            return false;
        };
        list.children.insert(item_idx + 1, new_item);
        let mut new_path = list_path.to_vec();
        new_path.push(item_idx + 1);
        new_path.push(0);
        self.state.cursor = Cursor::new(new_path, 0);
        self.state.stored_marks = None;
        true
    }

    /// Indent the cursor item one level: it becomes part of a nested
    /// list under its previous sibling. No-op for the first item of a
    /// list, which has nothing to nest under.
    pub fn sink_list_item(&mut self) -> bool {
        let path = self.state.cursor.path.clone();
        if path.len() < 2 {
            return false;
        }
        let block_idx = path[path.len() - 1];
        let item_idx = path[path.len() - 2];
        let item_path = &path[..path.len() - 1];
        let list_path = &path[..path.len() - 2];
        if !self.node_is(item_path, "list_item") || !self.node_is(list_path, "bullet_list") {
            return false;
        }
        if item_idx == 0 {
            return false;
        }
        let Some(list) = self.state.doc.node_at_mut(list_path) else {
            return false;
        };
        let item = list.children.remove(item_idx);
        let prev = &mut list.children[item_idx - 1];
        let nested = prev
            .children
            .last()
            .is_some_and(|c| c.type_name == "bullet_list");
        let inner_item_idx;
        if nested {
            let Some(inner) = prev.children.last_mut() else {
                return false;
            };
            inner.children.push(item);
            inner_item_idx = inner.children.len() - 1;
        } else {
            prev.children
                .push(Node::with_children("bullet_list", vec![item]));
            inner_item_idx = 0;
        }
        let inner_list_idx = prev.children.len() - 1;
        let mut new_path = list_path.to_vec();
        new_path.extend([item_idx - 1, inner_list_idx, inner_item_idx, block_idx]);
        self.state.cursor.path = new_path;
        true
    }

    /// Outdent the cursor item one level: it moves out of its nested
    /// list to sit after the item that hosted the nesting. No-op at
    /// the outermost level.
    pub fn lift_list_item(&mut self) -> bool {
        let path = self.state.cursor.path.clone();
        let n = path.len();
        if n < 4 {
            return false;
        }
        let block_idx = path[n - 1];
        let item_idx = path[n - 2];
        let inner_list_idx = path[n - 3];
        let host_item_idx = path[n - 4];
        let item_path = &path[..n - 1];
        let inner_list_path = &path[..n - 2];
        let host_item_path = &path[..n - 3];
        let outer_list_path = &path[..n - 4];
        if !self.node_is(item_path, "list_item")
            || !self.node_is(inner_list_path, "bullet_list")
            || !self.node_is(host_item_path, "list_item")
            || !self.node_is(outer_list_path, "bullet_list")
        {
            return false;
        }
        let (item, inner_emptied) = {
            let Some(inner) = self.state.doc.node_at_mut(inner_list_path) else {
                return false;
            };
            let item = inner.children.remove(item_idx);
            let emptied = inner.children.is_empty();
            (item, emptied)
        };
        if inner_emptied {
            let Some(host) = self.state.doc.node_at_mut(host_item_path) else {
                return false;
            };
            host.children.remove(inner_list_idx);
        }
        let Some(outer) = self.state.doc.node_at_mut(outer_list_path) else {
            return false;
        };
        outer.children.insert(host_item_idx + 1, item);
        let mut new_path = outer_list_path.to_vec();
        new_path.extend([host_item_idx + 1, block_idx]);
        self.state.cursor.path = new_path;
        true
    }
}
