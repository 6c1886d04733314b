//! Property-based invariant tests for the id factory.
//!
//! These hold for every seed and every well-formed input:
//!
//! 1. Every id kind has its contract length.
//! 2. Every generated character is in the 62-character alphabet.
//! 3. Re-tagging preserves the first three characters.
//! 4. Re-tagging never reproduces the source suffix.
//! 5. Inputs shorter than three characters always fail re-tagging.
//! 6. Shuffle is a permutation of its input.

use easel_id::{ALPHABET, DOCUMENT_ID_LEN, IdError, IdFactory, SplitMix64, shuffle};
use proptest::prelude::*;

fn in_alphabet(id: &str) -> bool {
    id.bytes().all(|b| ALPHABET.contains(&b))
}

proptest! {
    #[test]
    fn plain_ids_have_contract_length_and_alphabet(seed in any::<u64>()) {
        let mut ids = IdFactory::seeded(seed);
        for id in [ids.document_id(), ids.page_id(), ids.template_id()] {
            prop_assert_eq!(id.len(), DOCUMENT_ID_LEN);
            prop_assert!(in_alphabet(&id));
        }
    }

    #[test]
    fn widget_ids_split_3_1_24(seed in any::<u64>(), tag in "[a-z]{3}") {
        let mut ids = IdFactory::seeded(seed);
        let id = ids.widget_id(&tag);
        prop_assert_eq!(id.len(), DOCUMENT_ID_LEN);
        prop_assert_eq!(&id[..3], tag.as_str());
        prop_assert_eq!(id.as_bytes()[3], b'.');
        prop_assert!(in_alphabet(&id[4..]));
    }

    #[test]
    fn retag_preserves_tag(seed in any::<u64>(), tag in "[a-z]{3}") {
        let mut ids = IdFactory::seeded(seed);
        let original = ids.widget_id(&tag);
        let fresh = ids.retag_widget_id(&original).unwrap();
        prop_assert_eq!(&fresh[..3], &original[..3]);
    }

    #[test]
    fn retag_replaces_the_suffix(seed in any::<u64>()) {
        let mut ids = IdFactory::seeded(seed);
        let original = ids.widget_id("chr");
        let fresh = ids.retag_widget_id(&original).unwrap();
        prop_assert_ne!(&fresh[4..], &original[4..]);
    }

    #[test]
    fn retag_rejects_short_input(seed in any::<u64>(), short in "[0-9A-Za-z]{0,2}") {
        let mut ids = IdFactory::seeded(seed);
        let err = ids.retag_widget_id(&short).unwrap_err();
        prop_assert!(
            matches!(err, IdError::InvalidFormat { .. }),
            "expected IdError::InvalidFormat, got {:?}",
            err
        );
    }

    #[test]
    fn shuffle_permutes_in_place(seed in any::<u64>(), mut items in prop::collection::vec(any::<u32>(), 0..64)) {
        let mut rng = SplitMix64::new(seed);
        let mut expected = items.clone();
        shuffle(&mut items, &mut rng);
        expected.sort_unstable();
        items.sort_unstable();
        prop_assert_eq!(items, expected);
    }
}
