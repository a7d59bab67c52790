//! # DedupX Schema
//!
//! Field declarations for entity resolution.
//!
//! A declared field pairs a comparator with the blocking predicates that can
//! be learned on it. Three string types are supported:
//!
//! - **ShortString**: codes, names, phone numbers. Edit-distance comparator,
//!   every base predicate family, Levenshtein and TF-IDF n-gram index
//!   predicates.
//! - **String**: everything ShortString has, plus TF-IDF text index
//!   predicates.
//! - **Text**: free text. Cosine similarity over a corpus, the universal base
//!   families, Levenshtein and TF-IDF text index predicates.
//!
//! ## Declaring fields
//!
//! ```rust
//! use dedupx_schema::{declare_field, FieldOptions};
//! use dedupx_similarity::{ComparatorKind, Comparators};
//!
//! let comparators = Comparators::new();
//! let name = declare_field("name", "ShortString", &FieldOptions::default(), &comparators)?;
//! assert_eq!(name.predicates().len(), 40);
//!
//! let company = declare_field(
//!     "company",
//!     "String",
//!     &FieldOptions::default().with_crf(true),
//!     &comparators,
//! )?;
//! assert_eq!(company.comparator().kind(), ComparatorKind::Crf);
//! # Ok::<(), dedupx_core::Error>(())
//! ```
//!
//! ## Data models
//!
//! ```rust
//! use dedupx_schema::DataModel;
//! use dedupx_similarity::Comparators;
//!
//! let model = DataModel::from_json(
//!     r#"[{"field": "name", "type": "ShortString"},
//!         {"field": "bio", "type": "Text", "corpus": ["a short bio"]}]"#,
//!     &Comparators::new(),
//! )?;
//! assert_eq!(model.predicate_count(), 40 + 34);
//! # Ok::<(), dedupx_core::Error>(())
//! ```

mod model;
mod schema;
mod variant;

pub use model::DataModel;
pub use schema::{
    FieldDefinition, FieldOptions, FieldType, ResolvedOptions, StringOptions, TextOptions,
    VariantOptions,
};
pub use variant::{
    declare_field, ComparatorPolicy, FieldSummary, FieldTypeVariant, VariantSpec, SHORT_STRING,
    STRING, TEXT,
};
