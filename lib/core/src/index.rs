//! Index predicate builder
//!
//! Expands predicate classes x parameters into concrete descriptors for a
//! field. Output order is class-major: every parameter of the first class,
//! then every parameter of the second, and so on.

use crate::predicate::{IndexParam, IndexPredicateKind, PredicateDescriptor};
use crate::{Error, Result};

/// Edit distances swept by the Levenshtein canopy/search predicates
pub const LEVENSHTEIN_DISTANCES: [u8; 4] = [1, 2, 3, 4];

/// Similarity thresholds swept by the TF-IDF canopy/search predicates
pub const TFIDF_THRESHOLDS: [f64; 4] = [0.2, 0.4, 0.6, 0.8];

/// Levenshtein parameters as [`IndexParam`]s
pub fn levenshtein_params() -> Vec<IndexParam> {
    LEVENSHTEIN_DISTANCES
        .iter()
        .map(|&d| IndexParam::Distance(d))
        .collect()
}

/// Similarity thresholds as [`IndexParam`]s
pub fn threshold_params(thresholds: &[f64]) -> Vec<IndexParam> {
    thresholds.iter().map(|&t| IndexParam::threshold(t)).collect()
}

/// TF-IDF thresholds as [`IndexParam`]s
pub fn tfidf_params() -> Vec<IndexParam> {
    threshold_params(&TFIDF_THRESHOLDS)
}

/// Build one descriptor per (class, parameter) pair.
///
/// Every parameter must be on the axis of every class it is paired with;
/// a Levenshtein class takes edit distances, a TF-IDF class takes
/// thresholds in `(0, 1]`.
pub fn index_predicates(
    classes: &[IndexPredicateKind],
    params: &[IndexParam],
    field: &str,
    use_stop_words: bool,
) -> Result<Vec<PredicateDescriptor>> {
    let mut descriptors = Vec::with_capacity(classes.len() * params.len());

    for &class in classes {
        for &param in params {
            validate_param(class, param)?;
            descriptors.push(PredicateDescriptor::index(class, param, field, use_stop_words));
        }
    }

    Ok(descriptors)
}

fn validate_param(class: IndexPredicateKind, param: IndexParam) -> Result<()> {
    if class.axis() != param.axis() {
        return Err(Error::InvalidConfig(format!(
            "{} does not take parameter {}",
            class, param
        )));
    }

    match param {
        IndexParam::Distance(0) => Err(Error::InvalidConfig(format!(
            "{} needs an edit distance of at least 1",
            class
        ))),
        IndexParam::Threshold(t) if !(t.0 > 0.0 && t.0 <= 1.0) => Err(Error::InvalidConfig(
            format!("{} threshold {} is outside (0, 1]", class, t.0),
        )),
        _ => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_one_descriptor_per_pair() {
        let descriptors = index_predicates(
            &IndexPredicateKind::LEVENSHTEIN,
            &levenshtein_params(),
            "name",
            true,
        )
        .unwrap();
        assert_eq!(descriptors.len(), 8);
        assert!(descriptors.iter().all(|d| d.field() == "name"));
    }

    #[test]
    fn test_class_major_order() {
        let descriptors = index_predicates(
            &IndexPredicateKind::TFIDF_TEXT,
            &tfidf_params(),
            "bio",
            true,
        )
        .unwrap();

        let expected_first = PredicateDescriptor::index(
            IndexPredicateKind::TfidfTextCanopy,
            IndexParam::threshold(0.2),
            "bio",
            true,
        );
        let expected_fifth = PredicateDescriptor::index(
            IndexPredicateKind::TfidfTextSearch,
            IndexParam::threshold(0.2),
            "bio",
            true,
        );
        assert_eq!(descriptors[0], expected_first);
        assert_eq!(descriptors[4], expected_fifth);
    }

    #[test]
    fn test_stop_word_flag_propagates() {
        let descriptors = index_predicates(
            &IndexPredicateKind::TFIDF_NGRAM,
            &tfidf_params(),
            "name",
            false,
        )
        .unwrap();
        assert!(descriptors.iter().all(|d| d.use_stop_words() == Some(false)));
    }

    #[test]
    fn test_deterministic() {
        let a = index_predicates(&IndexPredicateKind::LEVENSHTEIN, &levenshtein_params(), "x", true)
            .unwrap();
        let b = index_predicates(&IndexPredicateKind::LEVENSHTEIN, &levenshtein_params(), "x", true)
            .unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_mismatched_axis_rejected() {
        let result = index_predicates(
            &IndexPredicateKind::LEVENSHTEIN,
            &tfidf_params(),
            "name",
            true,
        );
        assert!(matches!(result, Err(Error::InvalidConfig(_))));
    }

    #[test]
    fn test_out_of_range_params_rejected() {
        let zero = index_predicates(
            &[IndexPredicateKind::LevenshteinCanopy],
            &[IndexParam::Distance(0)],
            "name",
            true,
        );
        assert!(zero.is_err());

        let too_high = index_predicates(
            &[IndexPredicateKind::TfidfTextSearch],
            &[IndexParam::threshold(1.5)],
            "name",
            true,
        );
        assert!(too_high.is_err());
    }

    #[test]
    fn test_threshold_params() {
        assert_eq!(threshold_params(&TFIDF_THRESHOLDS), tfidf_params());
        assert_eq!(
            threshold_params(&[0.5]),
            vec![IndexParam::Threshold(ordered_float::OrderedFloat(0.5))]
        );
        assert!(threshold_params(&[]).is_empty());
    }

    #[test]
    fn test_empty_inputs() {
        assert!(index_predicates(&[], &tfidf_params(), "name", true)
            .unwrap()
            .is_empty());
        assert!(index_predicates(&IndexPredicateKind::TFIDF_TEXT, &[], "name", true)
            .unwrap()
            .is_empty());
    }
}
