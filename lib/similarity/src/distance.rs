//! String distance functions for short and general string fields
//!
//! Both comparators return a distance, so lower means more similar.
//! Undefined comparisons (nothing to compare) return `NaN`, which the
//! scoring stage treats like a missing value.

use dedupx_core::{Error, Result};
use serde::{Deserialize, Serialize};

/// Normalized affine-gap edit distance
///
/// Opening a gap is expensive, extending it is cheap, and the tail of the
/// longer string past the end of the shorter one is charged at a reduced
/// rate so abbreviations ("Intl" vs "International") stay close.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AffineGap {
    pub match_weight: f64,
    pub mismatch_weight: f64,
    pub gap_weight: f64,
    pub space_weight: f64,
    pub abbreviation_scale: f64,
}

impl Default for AffineGap {
    fn default() -> Self {
        Self {
            match_weight: 1.0,
            mismatch_weight: 11.0,
            gap_weight: 10.0,
            space_weight: 7.0,
            abbreviation_scale: 0.125,
        }
    }
}

impl AffineGap {
    /// Raw affine-gap distance
    pub fn distance(&self, a: &str, b: &str) -> f64 {
        let a: Vec<char> = a.chars().collect();
        let b: Vec<char> = b.chars().collect();

        let cheapest = self
            .match_weight
            .min(self.mismatch_weight)
            .min(self.gap_weight);
        if a == b && self.match_weight == cheapest {
            return self.match_weight * a.len() as f64;
        }

        // `long` is walked along the columns, `short` along the rows
        let (long, short) = if a.len() < b.len() { (b, a) } else { (a, b) };
        let (len1, len2) = (long.len(), short.len());

        let mut deletion = vec![f64::INFINITY; len1 + 1];
        let mut current = vec![0.0f64; len1 + 1];
        let mut previous = vec![0.0f64; len1 + 1];

        for j in 1..=len1 {
            current[j] = self.gap_weight + self.space_weight * j as f64;
        }

        for i in 1..=len2 {
            let char2 = short[i - 1];
            previous.copy_from_slice(&current);

            current[0] = self.gap_weight + self.space_weight * i as f64;
            let mut insertion = f64::INFINITY;

            for j in 1..=len1 {
                let char1 = long[j - 1];

                insertion = if j <= len2 {
                    insertion.min(current[j - 1] + self.gap_weight) + self.space_weight
                } else {
                    insertion.min(current[j - 1] + self.gap_weight * self.abbreviation_scale)
                        + self.space_weight * self.abbreviation_scale
                };

                deletion[j] = deletion[j].min(previous[j] + self.gap_weight) + self.space_weight;

                let substitution = if char1 == char2 {
                    previous[j - 1] + self.match_weight
                } else {
                    previous[j - 1] + self.mismatch_weight
                };

                current[j] = insertion.min(deletion[j]).min(substitution);
            }
        }

        current[len1]
    }

    /// Distance divided by the combined length of both strings.
    ///
    /// Two empty strings have no defined distance and return `NaN`.
    pub fn normalized_distance(&self, a: &str, b: &str) -> f64 {
        let normalizer = (a.chars().count() + b.chars().count()) as f64;
        if normalizer == 0.0 {
            return f64::NAN;
        }
        self.distance(a, b) / normalizer
    }
}

/// Per-class weights of the alignment model
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AlignmentWeights {
    /// Aligning two equal characters
    pub same_char: f64,
    /// Aligning two different characters
    pub different_char: f64,
    /// Entering an insertion or deletion run
    pub gap_open: f64,
    /// Continuing an insertion or deletion run
    pub gap_extend: f64,
}

impl AlignmentWeights {
    fn is_finite(&self) -> bool {
        [self.same_char, self.different_char, self.gap_open, self.gap_extend]
            .iter()
            .all(|w| w.is_finite())
    }
}

/// Learned edit distance from a conditional random field over alignments
///
/// Two log-linear alignment models, one for pairs that refer to the same
/// entity and one for pairs that do not, each sum over every monotone
/// alignment of the two strings (match, insert and delete states). The
/// distance is the posterior probability of the "distinct" class, in
/// `[0, 1]`. Characters are compared case-insensitively.
///
/// Building one is cheap but it is meant to be constructed once and shared
/// across every field that asks for it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CrfEditDistance {
    matching: AlignmentWeights,
    distinct: AlignmentWeights,
    /// Log prior odds of the distinct class
    bias: f64,
}

impl Default for CrfEditDistance {
    fn default() -> Self {
        Self {
            matching: AlignmentWeights {
                same_char: 2.0,
                different_char: -1.5,
                gap_open: -2.5,
                gap_extend: -1.0,
            },
            distinct: AlignmentWeights {
                same_char: 0.0,
                different_char: 0.0,
                gap_open: -1.0,
                gap_extend: -0.5,
            },
            bias: 0.0,
        }
    }
}

impl CrfEditDistance {
    /// Build a model from explicit weights; every weight must be finite
    pub fn new(matching: AlignmentWeights, distinct: AlignmentWeights, bias: f64) -> Result<Self> {
        if !matching.is_finite() || !distinct.is_finite() || !bias.is_finite() {
            return Err(Error::Comparator(
                "CRF edit distance weights must be finite".to_string(),
            ));
        }
        Ok(Self {
            matching,
            distinct,
            bias,
        })
    }

    /// Load model weights from a JSON document
    pub fn from_json(json: &str) -> Result<Self> {
        let model: CrfEditDistance = serde_json::from_str(json)?;
        Self::new(model.matching, model.distinct, model.bias)
    }

    pub fn matching_weights(&self) -> &AlignmentWeights {
        &self.matching
    }

    pub fn distinct_weights(&self) -> &AlignmentWeights {
        &self.distinct
    }

    pub fn distance(&self, a: &str, b: &str) -> f64 {
        let a: Vec<char> = a.to_lowercase().chars().collect();
        let b: Vec<char> = b.to_lowercase().chars().collect();

        let matching = forward_score(&a, &b, &self.matching);
        let distinct = forward_score(&a, &b, &self.distinct) + self.bias;

        1.0 / (1.0 + (matching - distinct).exp())
    }
}

fn log_sum_exp(values: [f64; 3]) -> f64 {
    let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    if max == f64::NEG_INFINITY {
        return max;
    }
    max + values.iter().map(|v| (v - max).exp()).sum::<f64>().ln()
}

/// Log of the summed weight of every alignment of `a` and `b`
fn forward_score(a: &[char], b: &[char], w: &AlignmentWeights) -> f64 {
    let cols = b.len() + 1;
    let cells = (a.len() + 1) * cols;
    // aligned, gap in `b` (consumes `a`), gap in `a` (consumes `b`)
    let mut aligned = vec![f64::NEG_INFINITY; cells];
    let mut skip_a = vec![f64::NEG_INFINITY; cells];
    let mut skip_b = vec![f64::NEG_INFINITY; cells];
    aligned[0] = 0.0;

    for i in 0..=a.len() {
        for j in 0..=b.len() {
            let idx = i * cols + j;

            if i > 0 && j > 0 {
                let prev = (i - 1) * cols + (j - 1);
                let emit = if a[i - 1] == b[j - 1] {
                    w.same_char
                } else {
                    w.different_char
                };
                aligned[idx] = emit + log_sum_exp([aligned[prev], skip_a[prev], skip_b[prev]]);
            }

            if i > 0 {
                let prev = (i - 1) * cols + j;
                skip_a[idx] = log_sum_exp([
                    aligned[prev] + w.gap_open,
                    skip_a[prev] + w.gap_extend,
                    skip_b[prev] + w.gap_open,
                ]);
            }

            if j > 0 {
                let prev = i * cols + (j - 1);
                skip_b[idx] = log_sum_exp([
                    aligned[prev] + w.gap_open,
                    skip_b[prev] + w.gap_extend,
                    skip_a[prev] + w.gap_open,
                ]);
            }
        }
    }

    let last = cells - 1;
    log_sum_exp([aligned[last], skip_a[last], skip_b[last]])
}
