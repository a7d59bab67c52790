//! # DedupX Similarity
//!
//! Pairwise comparators for string fields.
//!
//! ## Comparators
//!
//! - **Affine gap**: normalized affine-gap edit distance, the default for short strings
//! - **CRF edit distance**: learned edit distance, more accurate and more expensive
//! - **Cosine**: TF-IDF cosine similarity over a corpus, for free text
//!
//! ## Example
//!
//! ```rust
//! use dedupx_similarity::{Comparators, ComparatorKind};
//!
//! // Build once, share across every field
//! let comparators = Comparators::new();
//!
//! let crf = comparators.crf();
//! assert_eq!(crf.kind(), ComparatorKind::Crf);
//! assert!(crf.same_instance(&comparators.crf()));
//!
//! let affine = comparators.affine_gap();
//! assert!(affine.compare("Acme Corp", "Acme Corp.") < affine.compare("Acme Corp", "Globex"));
//!
//! let cosine = comparators.cosine(["acme corporation", "globex corporation"]);
//! assert!(cosine.compare("acme corporation", "acme corp") > 0.0);
//! ```

pub mod comparator;
pub mod cosine;
pub mod distance;

pub use comparator::{Comparator, ComparatorKind, Comparators};
pub use cosine::CosineTextSimilarity;
pub use distance::{AffineGap, AlignmentWeights, CrfEditDistance};
