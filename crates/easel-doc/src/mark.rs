//! Inline formatting marks.

use bitflags::bitflags;

bitflags! {
    /// Set of formatting marks on a text run.
    ///
    /// Marks are orthogonal toggles, so a compact bitset covers the
    /// whole inline-formatting state of a run or a cursor.
    #[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct MarkSet: u8 {
        /// Bold text.
        const BOLD      = 0b0000_0001;
        /// Italic text.
        const ITALIC    = 0b0000_0010;
        /// Underlined text.
        const UNDERLINE = 0b0000_0100;
        /// Struck-through text.
        const STRIKE    = 0b0000_1000;
        /// Inline code.
        const CODE      = 0b0001_0000;
    }
}
