//! The document tree.
//!
//! A [`Node`] is either a structural node (block children, e.g. a list
//! or a table) or a textblock (a flat sequence of [`Inline`] runs, e.g.
//! a paragraph or a title). Which one a given type name is comes from
//! the schema; the tree itself just stores both shapes.
//!
//! Inline positions are counted in characters, with a hard break
//! occupying one position.

use rustc_hash::FxHashMap;
use smallvec::SmallVec;

use crate::mark::MarkSet;

/// Node attributes, e.g. a heading level or a `data-title` flag.
pub type Attrs = FxHashMap<String, String>;

/// Inline content of a textblock.
pub type InlineSeq = SmallVec<[Inline; 4]>;

/// One inline run inside a textblock.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Inline {
    /// A text run with a uniform mark set.
    Text {
        /// The run's text.
        text: String,
        /// Marks applied to every character of the run.
        marks: MarkSet,
    },
    /// A hard line break inside the block.
    HardBreak,
}

impl Inline {
    /// Text run with marks.
    pub fn text(text: impl Into<String>, marks: MarkSet) -> Self {
        Self::Text {
            text: text.into(),
            marks,
        }
    }

    /// Unmarked text run.
    pub fn plain(text: impl Into<String>) -> Self {
        Self::text(text, MarkSet::empty())
    }

    /// Length in cursor positions. Hard breaks count as one.
    #[must_use]
    pub fn len_chars(&self) -> usize {
        match self {
            Self::Text { text, .. } => text.chars().count(),
            Self::HardBreak => 1,
        }
    }
}

/// A typed node in the document tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node {
    /// Schema type name (`paragraph`, `title`, `bullet_list`, ...).
    pub type_name: String,
    /// Node attributes.
    pub attrs: Attrs,
    /// Block children (structural nodes).
    pub children: Vec<Node>,
    /// Inline runs (textblocks).
    pub inline: InlineSeq,
}

impl Node {
    /// Empty node of the given type.
    pub fn new(type_name: impl Into<String>) -> Self {
        Self {
            type_name: type_name.into(),
            attrs: Attrs::default(),
            children: Vec::new(),
            inline: InlineSeq::new(),
        }
    }

    /// Structural node with block children.
    pub fn with_children(type_name: impl Into<String>, children: Vec<Node>) -> Self {
        let mut node = Self::new(type_name);
        node.children = children;
        node
    }

    /// Textblock with inline runs.
    pub fn textblock(
        type_name: impl Into<String>,
        inline: impl IntoIterator<Item = Inline>,
    ) -> Self {
        let mut node = Self::new(type_name);
        node.inline = inline.into_iter().collect();
        node
    }

    /// Node at `path` (child indices from this node), if it exists.
    #[must_use]
    pub fn node_at(&self, path: &[usize]) -> Option<&Node> {
        let mut node = self;
        for &idx in path {
            node = node.children.get(idx)?;
        }
        Some(node)
    }

    /// Mutable node at `path`.
    pub fn node_at_mut(&mut self, path: &[usize]) -> Option<&mut Node> {
        let mut node = self;
        for &idx in path {
            node = node.children.get_mut(idx)?;
        }
        Some(node)
    }

    /// Total inline length in cursor positions.
    #[must_use]
    pub fn inline_len(&self) -> usize {
        self.inline.iter().map(Inline::len_chars).sum()
    }

    /// Concatenated text with hard breaks as `\n`. Test convenience.
    #[must_use]
    pub fn inline_text(&self) -> String {
        let mut out = String::new();
        for run in &self.inline {
            match run {
                Inline::Text { text, .. } => out.push_str(text),
                Inline::HardBreak => out.push('\n'),
            }
        }
        out
    }

    /// Marks of the position immediately before `offset`.
    ///
    /// Empty at offset 0 and just after a hard break; otherwise the
    /// marks of the run the preceding character belongs to. This is
    /// the "marks at the selection start" half of the mark-carrying
    /// fallback.
    #[must_use]
    pub fn marks_before(&self, offset: usize) -> MarkSet {
        if offset == 0 {
            return MarkSet::empty();
        }
        let mut seen = 0;
        for run in &self.inline {
            let len = run.len_chars();
            if offset <= seen + len {
                return match run {
                    Inline::Text { marks, .. } => *marks,
                    Inline::HardBreak => MarkSet::empty(),
                };
            }
            seen += len;
        }
        MarkSet::empty()
    }

    /// Split the inline runs at `offset` into left and right halves.
    ///
    /// A text run straddling the offset is split in two; both halves
    /// keep its marks. Offsets past the end put everything left.
    #[must_use]
    pub fn split_inline(&self, offset: usize) -> (InlineSeq, InlineSeq) {
        let mut left = InlineSeq::new();
        let mut right = InlineSeq::new();
        let mut remaining = offset;
        let mut splitting = true;
        for run in &self.inline {
            if !splitting {
                right.push(run.clone());
                continue;
            }
            let len = run.len_chars();
            if remaining >= len {
                left.push(run.clone());
                remaining -= len;
            } else if remaining == 0 {
                splitting = false;
                right.push(run.clone());
            } else if let Inline::Text { text, marks } = run {
                let byte = text
                    .char_indices()
                    .nth(remaining)
                    .map_or(text.len(), |(i, _)| i);
                left.push(Inline::Text {
                    text: text[..byte].to_owned(),
                    marks: *marks,
                });
                right.push(Inline::Text {
                    text: text[byte..].to_owned(),
                    marks: *marks,
                });
                splitting = false;
            }
        }
        (left, right)
    }

    /// Insert a hard break at `offset`.
    pub fn insert_break(&mut self, offset: usize) {
        let (mut left, right) = self.split_inline(offset);
        left.push(Inline::HardBreak);
        left.extend(right);
        self.inline = left;
        self.normalize_inline();
    }

    /// Insert `text` with `marks` at `offset`.
    pub fn insert_text_at(&mut self, offset: usize, text: &str, marks: MarkSet) {
        if text.is_empty() {
            return;
        }
        let (mut left, right) = self.split_inline(offset);
        left.push(Inline::text(text, marks));
        left.extend(right);
        self.inline = left;
        self.normalize_inline();
    }

    /// Merge adjacent text runs with equal marks and drop empty runs.
    pub fn normalize_inline(&mut self) {
        let runs = std::mem::take(&mut self.inline);
        let mut out = InlineSeq::new();
        for run in runs {
            if let Inline::Text { text, marks } = &run {
                if text.is_empty() {
                    continue;
                }
                if let Some(Inline::Text {
                    text: prev,
                    marks: prev_marks,
                }) = out.last_mut()
                {
                    if *prev_marks == *marks {
                        prev.push_str(text);
                        continue;
                    }
                }
            }
            out.push(run);
        }
        self.inline = out;
    }
}
