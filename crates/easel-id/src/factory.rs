//! Fixed-length random identifiers for documents, pages, widgets, and
//! templates.
//!
//! All id kinds share one 28-character footprint so downstream storage
//! can assume fixed-width keys. Widget ids spend the first four
//! characters on a `tag.` prefix and the remaining 24 on randomness;
//! the other kinds are 28 random characters end to end.

use std::error::Error;
use std::fmt;

use crate::rng::{IdRng, SplitMix64};

/// The 62-character id alphabet: digits, then upper, then lower Latin.
pub const ALPHABET: &[u8; 62] =
    b"0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz";

/// Total length of a document, page, template, or widget id.
pub const DOCUMENT_ID_LEN: usize = 28;

/// Length of the widget-kind tag prefix.
pub const WIDGET_TAG_LEN: usize = 3;

/// Random characters following the `tag.` prefix of a widget id.
pub const WIDGET_SUFFIX_LEN: usize = 24;

/// Known widget-kind tags.
///
/// Convenience constants only. The factory never checks a supplied tag
/// against this list; kind validation belongs to the widget registry
/// layer above.
pub mod tags {
    /// Chart widgets.
    pub const CHART: &str = "chr";
    /// Text widgets.
    pub const TEXT: &str = "txt";
    /// Icon widgets.
    pub const ICON: &str = "icn";
    /// Image widgets.
    pub const IMAGE: &str = "img";
    /// Map widgets.
    pub const MAP: &str = "map";
}

/// Error raised when an id does not have the shape an operation needs.
///
/// This is a programming-error-class failure: a malformed id reaching
/// [`IdFactory::retag_widget_id`] means an upstream caller fabricated
/// or truncated an id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IdError {
    /// The id is too short to carry a 3-character widget tag.
    InvalidFormat {
        /// The offending id.
        id: String,
    },
}

impl fmt::Display for IdError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidFormat { id } => {
                write!(f, "id {id:?} is not a well-formed widget id")
            }
        }
    }
}

impl Error for IdError {}

/// Whether `id` has the widget-id shape: at least four bytes with a
/// literal `.` separator at index 3.
#[must_use]
pub fn is_well_formed_widget_id(id: &str) -> bool {
    id.len() >= WIDGET_TAG_LEN + 1 && id.as_bytes()[WIDGET_TAG_LEN] == b'.'
}

/// Generator for every id kind, over an injected random source.
///
/// Each call is independent; the only state is the random source
/// itself. Collision probability across 62^24+ keyspaces is treated as
/// negligible and no uniqueness bookkeeping is done.
#[derive(Debug, Clone)]
pub struct IdFactory<R: IdRng = SplitMix64> {
    rng: R,
}

impl IdFactory<SplitMix64> {
    /// Factory with a deterministic seed, for tests.
    #[must_use]
    pub const fn seeded(seed: u64) -> Self {
        Self::new(SplitMix64::new(seed))
    }

    /// Factory seeded from process entropy.
    #[must_use]
    pub fn from_entropy() -> Self {
        Self::new(SplitMix64::from_entropy())
    }
}

impl Default for IdFactory<SplitMix64> {
    fn default() -> Self {
        Self::from_entropy()
    }
}

impl<R: IdRng> IdFactory<R> {
    /// Factory over an explicit random source.
    pub const fn new(rng: R) -> Self {
        Self { rng }
    }

    fn random_chars(&mut self, len: usize) -> String {
        let mut out = String::with_capacity(len);
        for _ in 0..len {
            let idx = (self.rng.next_u64() % ALPHABET.len() as u64) as usize;
            out.push(ALPHABET[idx] as char);
        }
        out
    }

    /// New 28-character document id.
    pub fn document_id(&mut self) -> String {
        self.random_chars(DOCUMENT_ID_LEN)
    }

    /// New 28-character page id.
    pub fn page_id(&mut self) -> String {
        self.random_chars(DOCUMENT_ID_LEN)
    }

    /// New 28-character template id.
    pub fn template_id(&mut self) -> String {
        self.random_chars(DOCUMENT_ID_LEN)
    }

    /// New widget id: `{tag}.{24 random chars}`.
    ///
    /// The caller supplies the kind tag; membership in the known-kind
    /// set is deliberately not checked here.
    pub fn widget_id(&mut self, tag: &str) -> String {
        let mut id = String::with_capacity(tag.len() + 1 + WIDGET_SUFFIX_LEN);
        id.push_str(tag);
        id.push('.');
        id.push_str(&self.random_chars(WIDGET_SUFFIX_LEN));
        id
    }

    /// New widget id carrying the same kind tag as `existing`.
    ///
    /// The first three characters of `existing` become the tag of a
    /// brand-new id with a fresh random suffix. The old suffix is
    /// never reused.
    ///
    /// # Errors
    /// [`IdError::InvalidFormat`] when `existing` has fewer than three
    /// characters.
    pub fn retag_widget_id(&mut self, existing: &str) -> Result<String, IdError> {
        let tag: String = existing.chars().take(WIDGET_TAG_LEN).collect();
        if tag.chars().count() != WIDGET_TAG_LEN {
            return Err(IdError::InvalidFormat {
                id: existing.to_owned(),
            });
        }
        Ok(self.widget_id(&tag))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn factory() -> IdFactory {
        IdFactory::seeded(0xEA5E)
    }

    #[test]
    fn document_id_is_28_alphabet_chars() {
        let mut ids = factory();
        let id = ids.document_id();
        assert_eq!(id.len(), DOCUMENT_ID_LEN);
        assert!(id.bytes().all(|b| ALPHABET.contains(&b)));
    }

    #[test]
    fn page_and_template_ids_share_the_footprint() {
        let mut ids = factory();
        assert_eq!(ids.page_id().len(), DOCUMENT_ID_LEN);
        assert_eq!(ids.template_id().len(), DOCUMENT_ID_LEN);
    }

    #[test]
    fn widget_id_has_tag_dot_suffix_shape() {
        let mut ids = factory();
        let id = ids.widget_id(tags::CHART);
        assert_eq!(id.len(), DOCUMENT_ID_LEN);
        assert!(id.starts_with("chr."));
        assert!(is_well_formed_widget_id(&id));
        assert!(
            id[WIDGET_TAG_LEN + 1..]
                .bytes()
                .all(|b| ALPHABET.contains(&b))
        );
    }

    #[test]
    fn widget_ids_differ_after_the_prefix() {
        let mut ids = factory();
        let a = ids.widget_id(tags::CHART);
        let b = ids.widget_id(tags::CHART);
        assert_eq!(&a[..4], &b[..4]);
        assert_ne!(a[4..], b[4..]);
    }

    #[test]
    fn retag_preserves_tag_and_replaces_suffix() {
        let mut ids = factory();
        let original = ids.widget_id(tags::ICON);
        let fresh = ids.retag_widget_id(&original).unwrap();
        assert_eq!(&fresh[..WIDGET_TAG_LEN], &original[..WIDGET_TAG_LEN]);
        assert_eq!(fresh.len(), DOCUMENT_ID_LEN);
        assert_ne!(fresh[4..], original[4..]);
    }

    #[test]
    fn retag_does_not_validate_tag_membership() {
        let mut ids = factory();
        let fresh = ids.retag_widget_id("zzz.000000000000000000000000").unwrap();
        assert!(fresh.starts_with("zzz."));
    }

    #[test]
    fn retag_rejects_short_ids() {
        let mut ids = factory();
        for short in ["", "c", "ch"] {
            let err = ids.retag_widget_id(short).unwrap_err();
            assert!(matches!(err, IdError::InvalidFormat { .. }));
        }
    }

    #[test]
    fn retag_accepts_exactly_three_chars() {
        // A bare tag with no suffix still carries a full tag.
        let mut ids = factory();
        let fresh = ids.retag_widget_id("txt").unwrap();
        assert!(fresh.starts_with("txt."));
    }

    #[test]
    fn malformed_widget_ids_are_detected() {
        assert!(!is_well_formed_widget_id(""));
        assert!(!is_well_formed_widget_id("chr"));
        assert!(!is_well_formed_widget_id("chrx0000"));
        assert!(is_well_formed_widget_id("chr.0000"));
    }

    #[test]
    fn invalid_format_error_displays_the_id() {
        let err = IdError::InvalidFormat { id: "ab".into() };
        assert!(err.to_string().contains("ab"));
    }
}
