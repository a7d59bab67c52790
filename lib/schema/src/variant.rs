//! Field type variants
//!
//! Each declared field becomes a [`FieldTypeVariant`]: a comparator plus the
//! ordered list of blocking predicates usable on that field. What a type
//! contributes is spelled out in one [`VariantSpec`] per type, and every
//! variant is assembled by the same [`VariantSpec::predicates`] builder:
//!
//! 1. the type's base predicate families, in declaration order
//! 2. Levenshtein canopy/search over [`LEVENSHTEIN_DISTANCES`]
//! 3. the type's TF-IDF canopy/search classes over its thresholds
//!
//! | type        | base | Levenshtein | TF-IDF            | comparator        |
//! |-------------|------|-------------|-------------------|-------------------|
//! | ShortString | 24   | 8           | n-gram (8)        | affine gap or CRF |
//! | String      | 24   | 8           | n-gram + text (16)| affine gap or CRF |
//! | Text        | 18   | 8           | text (8)          | cosine            |

use dedupx_core::{
    index_predicates, levenshtein_params, threshold_params, Error, IndexPredicateKind,
    PredicateDescriptor, PredicateFamily, Result, LEVENSHTEIN_DISTANCES, TFIDF_THRESHOLDS,
};
use dedupx_similarity::{Comparator, ComparatorKind, Comparators};
use serde::Serialize;
use tracing::debug;

use crate::schema::{FieldOptions, FieldType, ResolvedOptions, VariantOptions};

/// How a variant picks its comparator
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ComparatorPolicy {
    /// Affine gap, or the shared CRF edit distance when `crf` is set
    EditDistance,
    /// TF-IDF cosine over the field's corpus
    Cosine,
}

/// Everything a field type contributes to its configuration
#[derive(Debug, Clone, Copy)]
pub struct VariantSpec {
    pub field_type: FieldType,
    /// Base predicate families, applied in order
    pub base_predicates: &'static [&'static [PredicateFamily]],
    /// TF-IDF index predicate classes, on top of the Levenshtein pair
    pub index_predicates: &'static [IndexPredicateKind],
    pub index_thresholds: &'static [f64],
    pub comparator: ComparatorPolicy,
}

pub const SHORT_STRING: VariantSpec = VariantSpec {
    field_type: FieldType::ShortString,
    base_predicates: &[&PredicateFamily::UNIVERSAL, &PredicateFamily::SHORT_STRING],
    index_predicates: &IndexPredicateKind::TFIDF_NGRAM,
    index_thresholds: &TFIDF_THRESHOLDS,
    comparator: ComparatorPolicy::EditDistance,
};

pub const STRING: VariantSpec = VariantSpec {
    field_type: FieldType::String,
    base_predicates: &[&PredicateFamily::UNIVERSAL, &PredicateFamily::SHORT_STRING],
    index_predicates: &[
        IndexPredicateKind::TfidfNGramCanopy,
        IndexPredicateKind::TfidfNGramSearch,
        IndexPredicateKind::TfidfTextCanopy,
        IndexPredicateKind::TfidfTextSearch,
    ],
    index_thresholds: &TFIDF_THRESHOLDS,
    comparator: ComparatorPolicy::EditDistance,
};

pub const TEXT: VariantSpec = VariantSpec {
    field_type: FieldType::Text,
    base_predicates: &[&PredicateFamily::UNIVERSAL],
    index_predicates: &IndexPredicateKind::TFIDF_TEXT,
    index_thresholds: &TFIDF_THRESHOLDS,
    comparator: ComparatorPolicy::Cosine,
};

impl VariantSpec {
    pub fn for_type(field_type: FieldType) -> &'static VariantSpec {
        match field_type {
            FieldType::ShortString => &SHORT_STRING,
            FieldType::String => &STRING,
            FieldType::Text => &TEXT,
        }
    }

    /// Base predicate families, flattened
    pub fn base_families(&self) -> impl Iterator<Item = PredicateFamily> + '_ {
        self.base_predicates.iter().flat_map(|group| group.iter().copied())
    }

    /// Number of descriptors [`predicates`](Self::predicates) produces
    pub fn predicate_count(&self) -> usize {
        self.base_families().count()
            + IndexPredicateKind::LEVENSHTEIN.len() * LEVENSHTEIN_DISTANCES.len()
            + self.index_predicates.len() * self.index_thresholds.len()
    }

    /// Assemble the ordered predicate descriptors of a field of this type
    pub fn predicates(&self, field: &str, use_stop_words: bool) -> Result<Vec<PredicateDescriptor>> {
        let mut predicates: Vec<PredicateDescriptor> = self
            .base_families()
            .map(|family| PredicateDescriptor::base(family, field))
            .collect();

        predicates.extend(index_predicates(
            &IndexPredicateKind::LEVENSHTEIN,
            &levenshtein_params(),
            field,
            use_stop_words,
        )?);

        predicates.extend(index_predicates(
            self.index_predicates,
            &threshold_params(self.index_thresholds),
            field,
            use_stop_words,
        )?);

        Ok(predicates)
    }
}

/// Blocking and scoring configuration of one declared field
///
/// Immutable once built. Cloning is cheap: comparators that carry a model
/// or corpus statistics are shared.
#[derive(Debug, Clone)]
pub struct FieldTypeVariant {
    field: String,
    name: String,
    field_type: FieldType,
    comparator: Comparator,
    predicates: Vec<PredicateDescriptor>,
    use_stop_words: bool,
    has_missing: bool,
}

impl FieldTypeVariant {
    /// Build a field from already resolved options
    pub fn build(
        field: &str,
        field_type: FieldType,
        options: ResolvedOptions,
        comparators: &Comparators,
    ) -> Result<Self> {
        let spec = VariantSpec::for_type(field_type);
        let use_stop_words = options.variant.use_stop_words();
        let predicates = spec.predicates(field, use_stop_words)?;

        let comparator = match (spec.comparator, &options.variant) {
            (ComparatorPolicy::EditDistance, VariantOptions::Edit(o)) if o.crf => comparators.crf(),
            (ComparatorPolicy::EditDistance, VariantOptions::Edit(_)) => comparators.affine_gap(),
            (ComparatorPolicy::Cosine, VariantOptions::Text(o)) => {
                if o.corpus.is_empty() {
                    debug!("Text field '{}' has no corpus, term weights are uniform", field);
                }
                comparators.cosine(o.corpus.iter())
            }
            (policy, _) => {
                return Err(Error::InvalidConfig(format!(
                    "options of {} field '{}' do not fit its {:?} comparator policy",
                    field_type, field, policy
                )));
            }
        };

        debug!(
            "Declared {} field '{}' as '{}': {} predicates, {} comparator",
            field_type,
            field,
            options.name,
            predicates.len(),
            comparator.kind()
        );

        Ok(Self {
            field: field.to_string(),
            name: options.name,
            field_type,
            comparator,
            predicates,
            use_stop_words,
            has_missing: options.has_missing,
        })
    }

    /// Record field the values are read from
    pub fn field(&self) -> &str {
        &self.field
    }

    /// Display alias, the field name unless one was given
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn field_type(&self) -> FieldType {
        self.field_type
    }

    pub fn comparator(&self) -> &Comparator {
        &self.comparator
    }

    /// Every predicate, base predicates first
    pub fn predicates(&self) -> &[PredicateDescriptor] {
        &self.predicates
    }

    pub fn base_predicates(&self) -> impl Iterator<Item = &PredicateDescriptor> {
        self.predicates.iter().filter(|p| !p.is_index())
    }

    pub fn index_predicates(&self) -> impl Iterator<Item = &PredicateDescriptor> {
        self.predicates.iter().filter(|p| p.is_index())
    }

    pub fn use_stop_words(&self) -> bool {
        self.use_stop_words
    }

    pub fn has_missing(&self) -> bool {
        self.has_missing
    }

    /// Score two values of this field
    pub fn compare(&self, a: &str, b: &str) -> f64 {
        self.comparator.compare(a, b)
    }

    pub fn summary(&self) -> FieldSummary {
        FieldSummary {
            field: self.field.clone(),
            name: self.name.clone(),
            field_type: self.field_type,
            comparator: self.comparator.kind(),
            use_stop_words: self.use_stop_words,
            has_missing: self.has_missing,
            predicate_count: self.predicates.len(),
            predicates: self.predicates.iter().map(ToString::to_string).collect(),
        }
    }
}

/// Serializable overview of a declared field
#[derive(Debug, Clone, Serialize)]
pub struct FieldSummary {
    pub field: String,
    pub name: String,
    #[serde(rename = "type")]
    pub field_type: FieldType,
    pub comparator: ComparatorKind,
    pub use_stop_words: bool,
    pub has_missing: bool,
    pub predicate_count: usize,
    pub predicates: Vec<String>,
}

/// Declare a field of the named type.
///
/// Fails with a configuration error when the type name is unknown or an
/// option is not valid for the type; nothing is built in that case.
pub fn declare_field(
    field: &str,
    type_name: &str,
    options: &FieldOptions,
    comparators: &Comparators,
) -> Result<FieldTypeVariant> {
    let field_type: FieldType = type_name.parse()?;
    let resolved = options.resolve(field, field_type)?;
    FieldTypeVariant::build(field, field_type, resolved, comparators)
}
