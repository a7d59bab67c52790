//! # DedupX Core
//!
//! Core library for the DedupX entity-resolution toolkit.
//!
//! This crate provides the blocking vocabulary shared by every field type:
//!
//! - [`PredicateFamily`] - Base blocking rules and their key functions
//! - [`IndexPredicateKind`] - Canopy/search predicate classes (Levenshtein, TF-IDF)
//! - [`PredicateDescriptor`] - An immutable blocking rule bound to a field
//! - [`index_predicates`] - Expands predicate classes x parameters into descriptors
//! - [`phonetic`] - Double Metaphone encoding used by the phonetic families
//!
//! ## Example
//!
//! ```rust
//! use dedupx_core::{index_predicates, levenshtein_params, IndexPredicateKind, PredicateFamily};
//!
//! let keys = PredicateFamily::SortedAcronym.keys("World Health Organization");
//! assert!(keys.contains("HOW"));
//!
//! let descriptors = index_predicates(
//!     &IndexPredicateKind::LEVENSHTEIN,
//!     &levenshtein_params(),
//!     "name",
//!     true,
//! ).unwrap();
//! assert_eq!(descriptors.len(), 8);
//! ```

pub mod error;
pub mod index;
pub mod keys;
pub mod phonetic;
pub mod predicate;

pub use error::{Error, Result};
pub use index::{
    index_predicates, levenshtein_params, tfidf_params, threshold_params, LEVENSHTEIN_DISTANCES,
    TFIDF_THRESHOLDS,
};
pub use predicate::{IndexParam, IndexPredicateKind, ParamAxis, PredicateDescriptor, PredicateFamily};
