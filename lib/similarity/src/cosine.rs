//! TF-IDF cosine similarity for free-text fields
//!
//! Document frequencies come from a corpus supplied when the comparator is
//! built and are read-only afterwards.

use ahash::AHashMap;

/// Cosine similarity of TF-IDF weighted term vectors
#[derive(Debug, Clone, Default)]
pub struct CosineTextSimilarity {
    // term -> number of corpus documents containing it
    doc_freqs: AHashMap<String, u32>,
    total_docs: u64,
}

impl CosineTextSimilarity {
    /// Build document frequencies from a corpus.
    ///
    /// An empty corpus is valid: every term then gets the same weight and the
    /// comparator degrades to plain term-frequency cosine.
    pub fn new<I, S>(corpus: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut doc_freqs: AHashMap<String, u32> = AHashMap::new();
        let mut total_docs = 0u64;

        for document in corpus {
            let mut terms = Self::tokenize(document.as_ref());
            terms.sort_unstable();
            terms.dedup();
            for term in terms {
                *doc_freqs.entry(term).or_insert(0) += 1;
            }
            total_docs += 1;
        }

        Self {
            doc_freqs,
            total_docs,
        }
    }

    /// Lowercase word tokens, punctuation other than apostrophes removed
    #[inline]
    pub fn tokenize(text: &str) -> Vec<String> {
        text.to_lowercase()
            .split(|c: char| !(c.is_alphanumeric() || c == '\''))
            .map(|s| s.trim_matches('\''))
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .collect()
    }

    #[inline]
    #[must_use]
    pub fn document_count(&self) -> u64 {
        self.total_docs
    }

    #[inline]
    #[must_use]
    pub fn document_frequency(&self, term: &str) -> u32 {
        self.doc_freqs.get(term).copied().unwrap_or(0)
    }

    /// Smoothed inverse document frequency: `ln((N + 1) / (df + 1)) + 1`.
    ///
    /// Terms never seen in the corpus get the largest weight.
    pub fn idf(&self, term: &str) -> f64 {
        let n = self.total_docs as f64;
        let df = self.document_frequency(term) as f64;
        ((n + 1.0) / (df + 1.0)).ln() + 1.0
    }

    fn weigh(&self, text: &str) -> AHashMap<String, f64> {
        let mut term_freqs: AHashMap<String, f64> = AHashMap::new();
        for token in Self::tokenize(text) {
            *term_freqs.entry(token).or_insert(0.0) += 1.0;
        }
        for (term, weight) in term_freqs.iter_mut() {
            *weight *= self.idf(term);
        }
        term_freqs
    }

    /// Cosine of the two weighted term vectors, in `[0, 1]`.
    ///
    /// Returns `NaN` when either side has no tokens.
    pub fn similarity(&self, a: &str, b: &str) -> f64 {
        let va = self.weigh(a);
        let vb = self.weigh(b);
        if va.is_empty() || vb.is_empty() {
            return f64::NAN;
        }

        let (small, large) = if va.len() <= vb.len() { (&va, &vb) } else { (&vb, &va) };
        let dot: f64 = small
            .iter()
            .filter_map(|(term, wa)| large.get(term).map(|wb| wa * wb))
            .sum();

        let norm_a = va.values().map(|w| w * w).sum::<f64>().sqrt();
        let norm_b = vb.values().map(|w| w * w).sum::<f64>().sqrt();

        (dot / (norm_a * norm_b)).clamp(0.0, 1.0)
    }
}
