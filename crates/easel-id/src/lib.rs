#![forbid(unsafe_code)]

//! Identifier generation for the easel document model.
//!
//! Every document, page, widget, and template is keyed by an opaque
//! fixed-length random string drawn from a 62-character alphabet
//! (digits plus upper/lower Latin letters). Widget ids additionally
//! carry a 3-character type tag prefix separated by a literal `.`,
//! so code can branch on widget kind from the id alone.
//!
//! Randomness is injected through the [`IdRng`] trait so tests can run
//! against a fixed seed; [`SplitMix64`] is the default source.
//!
//! # Example
//! ```
//! use easel_id::IdFactory;
//!
//! let mut ids = IdFactory::seeded(42);
//! let doc = ids.document_id();
//! assert_eq!(doc.len(), 28);
//!
//! let widget = ids.widget_id("chr");
//! assert_eq!(widget.len(), 28);
//! assert!(widget.starts_with("chr."));
//!
//! // Re-tagging keeps the tag but never the random suffix.
//! let fresh = ids.retag_widget_id(&widget).unwrap();
//! assert!(fresh.starts_with("chr."));
//! assert_ne!(fresh, widget);
//! ```

pub mod factory;
pub mod rng;
pub mod shuffle;

pub use factory::{
    ALPHABET, DOCUMENT_ID_LEN, IdError, IdFactory, WIDGET_SUFFIX_LEN, WIDGET_TAG_LEN,
    is_well_formed_widget_id, tags,
};
pub use rng::{IdRng, SplitMix64};
pub use shuffle::shuffle;
