//! Property-based invariants for inline splitting and normalization.
//!
//! For any run sequence and any in-range offset:
//!
//! 1. The left half of a split is exactly `offset` positions long.
//! 2. Split halves partition the block's total length.
//! 3. Rejoining the halves restores the block's text.
//! 4. Normalization is idempotent.

use easel_doc::{Inline, MarkSet, Node};
use proptest::prelude::*;

fn runs_strategy() -> impl Strategy<Value = Vec<Inline>> {
    prop::collection::vec(
        prop_oneof![
            ("[a-z]{1,5}", any::<u8>()).prop_map(|(text, bits)| {
                Inline::text(text, MarkSet::from_bits_truncate(bits))
            }),
            Just(Inline::HardBreak),
        ],
        0..8,
    )
}

proptest! {
    #[test]
    fn split_partitions_the_block(
        runs in runs_strategy(),
        split in any::<prop::sample::Index>(),
    ) {
        let block = Node::textblock("paragraph", runs);
        let total = block.inline_len();
        let offset = split.index(total + 1);
        let (left, right) = block.split_inline(offset);
        let left_len: usize = left.iter().map(Inline::len_chars).sum();
        let right_len: usize = right.iter().map(Inline::len_chars).sum();
        prop_assert_eq!(left_len, offset);
        prop_assert_eq!(left_len + right_len, total);

        let rejoined = Node::textblock("paragraph", left.into_iter().chain(right));
        prop_assert_eq!(rejoined.inline_text(), block.inline_text());
    }

    #[test]
    fn normalize_is_idempotent(runs in runs_strategy()) {
        let mut block = Node::textblock("paragraph", runs);
        block.normalize_inline();
        let once = block.clone();
        block.normalize_inline();
        prop_assert_eq!(block, once);
    }
}
