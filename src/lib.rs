//! # DedupX
//!
//! Field types for entity resolution.
//!
//! DedupX declares the string fields of a record and, for each one, works out
//! the blocking predicates a learner may pick from and the comparator that
//! scores a pair of values.
//!
//! ## Quick Start
//!
//! ### From the command line
//!
//! ```bash
//! dedupx describe fields.json
//! dedupx compare fields.json name "Jonathan Smith" "Johnathan Smyth"
//! ```
//!
//! ### As a Library
//!
//! ```rust
//! use dedupx::prelude::*;
//!
//! let comparators = Comparators::new();
//! let model = DataModel::from_json(
//!     r#"[{"field": "name", "type": "ShortString", "crf": true},
//!         {"field": "address", "type": "String"}]"#,
//!     &comparators,
//! )?;
//!
//! assert_eq!(model.predicate_count(), 40 + 48);
//! let score = model.compare("name", "Jonathan", "Johnathan")?;
//! assert!(score < 0.5);
//! # Ok::<(), dedupx::Error>(())
//! ```
//!
//! ## Crate Structure
//!
//! - [`dedupx-core`](https://docs.rs/dedupx-core) - Predicate families, descriptors and blocking keys
//! - [`dedupx-similarity`](https://docs.rs/dedupx-similarity) - Affine gap, CRF edit distance and cosine comparators
//! - [`dedupx-schema`](https://docs.rs/dedupx-schema) - Field types, field declaration and data models

// Re-export core types
pub use dedupx_core::{
    index_predicates, IndexParam, IndexPredicateKind, PredicateDescriptor, PredicateFamily,
    Error, Result,
};

// Re-export comparators
pub use dedupx_similarity::{
    AffineGap, Comparator, ComparatorKind, Comparators, CosineTextSimilarity, CrfEditDistance,
};

// Re-export schema
pub use dedupx_schema::{
    declare_field, DataModel, FieldDefinition, FieldOptions, FieldSummary, FieldType,
    FieldTypeVariant, VariantSpec,
};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::{
        declare_field, Comparator, ComparatorKind, Comparators, DataModel, Error,
        FieldDefinition, FieldOptions, FieldType, FieldTypeVariant, PredicateDescriptor,
        PredicateFamily, Result,
    };
}
