//! Field comparators and the shared comparator context

use crate::cosine::CosineTextSimilarity;
use crate::distance::{AffineGap, CrfEditDistance};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

/// Which algorithm a comparator runs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ComparatorKind {
    AffineGap,
    Crf,
    Cosine,
}

impl ComparatorKind {
    pub fn name(&self) -> &'static str {
        match self {
            ComparatorKind::AffineGap => "affine_gap",
            ComparatorKind::Crf => "crf",
            ComparatorKind::Cosine => "cosine",
        }
    }
}

impl fmt::Display for ComparatorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Pairwise scoring function for two field values
///
/// Affine gap and CRF return distances (lower is closer); cosine returns a
/// similarity (higher is closer). Each is `Send + Sync` and never mutated
/// after construction.
#[derive(Debug, Clone)]
pub enum Comparator {
    AffineGap(AffineGap),
    Crf(Arc<CrfEditDistance>),
    Cosine(Arc<CosineTextSimilarity>),
}

impl Comparator {
    pub fn kind(&self) -> ComparatorKind {
        match self {
            Comparator::AffineGap(_) => ComparatorKind::AffineGap,
            Comparator::Crf(_) => ComparatorKind::Crf,
            Comparator::Cosine(_) => ComparatorKind::Cosine,
        }
    }

    /// Score two field values
    pub fn compare(&self, a: &str, b: &str) -> f64 {
        match self {
            Comparator::AffineGap(affine) => affine.normalized_distance(a, b),
            Comparator::Crf(crf) => crf.distance(a, b),
            Comparator::Cosine(cosine) => cosine.similarity(a, b),
        }
    }

    /// True when both comparators share the same underlying model.
    ///
    /// Affine gap is a plain value type and compares by its weights.
    pub fn same_instance(&self, other: &Comparator) -> bool {
        match (self, other) {
            (Comparator::AffineGap(a), Comparator::AffineGap(b)) => a == b,
            (Comparator::Crf(a), Comparator::Crf(b)) => Arc::ptr_eq(a, b),
            (Comparator::Cosine(a), Comparator::Cosine(b)) => Arc::ptr_eq(a, b),
            _ => false,
        }
    }

    /// Corpus statistics of a cosine comparator
    pub fn as_cosine(&self) -> Option<&CosineTextSimilarity> {
        match self {
            Comparator::Cosine(cosine) => Some(cosine),
            _ => None,
        }
    }
}

/// Comparators shared across every field of a data model
///
/// Built once at start-up. Fields that opt into the CRF edit distance all
/// receive a handle to the same model.
#[derive(Debug, Clone)]
pub struct Comparators {
    affine_gap: AffineGap,
    crf: Arc<CrfEditDistance>,
}

impl Default for Comparators {
    fn default() -> Self {
        Self::new()
    }
}

impl Comparators {
    /// Default affine-gap weights and the built-in CRF model
    pub fn new() -> Self {
        Self::with_crf(CrfEditDistance::default())
    }

    pub fn with_crf(crf: CrfEditDistance) -> Self {
        Self {
            affine_gap: AffineGap::default(),
            crf: Arc::new(crf),
        }
    }

    pub fn with_affine_gap(mut self, affine_gap: AffineGap) -> Self {
        self.affine_gap = affine_gap;
        self
    }

    pub fn affine_gap(&self) -> Comparator {
        Comparator::AffineGap(self.affine_gap)
    }

    /// Handle to the shared CRF model
    pub fn crf(&self) -> Comparator {
        Comparator::Crf(Arc::clone(&self.crf))
    }

    /// A new cosine comparator over `corpus`; every call builds its own statistics
    pub fn cosine<I, S>(&self, corpus: I) -> Comparator
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Comparator::Cosine(Arc::new(CosineTextSimilarity::new(corpus)))
    }
}
