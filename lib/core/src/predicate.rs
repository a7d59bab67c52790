//! Blocking predicate families and descriptors
//!
//! A predicate family is a named blocking rule. Base families map a field
//! value straight to a set of keys; index families (canopy and search) need
//! an index over the whole data set and are carried around as descriptors
//! until a blocker builds that index.

use ordered_float::OrderedFloat;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

use crate::keys;

/// Base blocking predicate families
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PredicateFamily {
    WholeField,
    FirstToken,
    FirstTwoTokens,
    CommonInteger,
    NearIntegers,
    FirstInteger,
    HundredInteger,
    HundredIntegersOdd,
    AlphaNumeric,
    SameThreeCharStart,
    SameFiveCharStart,
    SameSevenCharStart,
    CommonTwoTokens,
    CommonThreeTokens,
    Fingerprint,
    OneGramFingerprint,
    TwoGramFingerprint,
    SortedAcronym,
    CommonFourGram,
    CommonSixGram,
    TokenField,
    SuffixArray,
    DoubleMetaphone,
    MetaphoneToken,
}

impl PredicateFamily {
    /// Families that apply to every string-like field
    pub const UNIVERSAL: [PredicateFamily; 18] = [
        PredicateFamily::WholeField,
        PredicateFamily::FirstToken,
        PredicateFamily::FirstTwoTokens,
        PredicateFamily::CommonInteger,
        PredicateFamily::NearIntegers,
        PredicateFamily::FirstInteger,
        PredicateFamily::HundredInteger,
        PredicateFamily::HundredIntegersOdd,
        PredicateFamily::AlphaNumeric,
        PredicateFamily::SameThreeCharStart,
        PredicateFamily::SameFiveCharStart,
        PredicateFamily::SameSevenCharStart,
        PredicateFamily::CommonTwoTokens,
        PredicateFamily::CommonThreeTokens,
        PredicateFamily::Fingerprint,
        PredicateFamily::OneGramFingerprint,
        PredicateFamily::TwoGramFingerprint,
        PredicateFamily::SortedAcronym,
    ];

    /// Character n-gram, suffix and phonetic families.
    ///
    /// These only make sense on short values; on documents they produce
    /// enormous, useless blocks.
    pub const SHORT_STRING: [PredicateFamily; 6] = [
        PredicateFamily::CommonFourGram,
        PredicateFamily::CommonSixGram,
        PredicateFamily::TokenField,
        PredicateFamily::SuffixArray,
        PredicateFamily::DoubleMetaphone,
        PredicateFamily::MetaphoneToken,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            PredicateFamily::WholeField => "whole_field",
            PredicateFamily::FirstToken => "first_token",
            PredicateFamily::FirstTwoTokens => "first_two_tokens",
            PredicateFamily::CommonInteger => "common_integer",
            PredicateFamily::NearIntegers => "near_integers",
            PredicateFamily::FirstInteger => "first_integer",
            PredicateFamily::HundredInteger => "hundred_integer",
            PredicateFamily::HundredIntegersOdd => "hundred_integers_odd",
            PredicateFamily::AlphaNumeric => "alpha_numeric",
            PredicateFamily::SameThreeCharStart => "same_three_char_start",
            PredicateFamily::SameFiveCharStart => "same_five_char_start",
            PredicateFamily::SameSevenCharStart => "same_seven_char_start",
            PredicateFamily::CommonTwoTokens => "common_two_tokens",
            PredicateFamily::CommonThreeTokens => "common_three_tokens",
            PredicateFamily::Fingerprint => "fingerprint",
            PredicateFamily::OneGramFingerprint => "one_gram_fingerprint",
            PredicateFamily::TwoGramFingerprint => "two_gram_fingerprint",
            PredicateFamily::SortedAcronym => "sorted_acronym",
            PredicateFamily::CommonFourGram => "common_four_gram",
            PredicateFamily::CommonSixGram => "common_six_gram",
            PredicateFamily::TokenField => "token_field",
            PredicateFamily::SuffixArray => "suffix_array",
            PredicateFamily::DoubleMetaphone => "double_metaphone",
            PredicateFamily::MetaphoneToken => "metaphone_token",
        }
    }

    /// True for the character n-gram, suffix and phonetic families
    pub fn is_short_string_only(&self) -> bool {
        Self::SHORT_STRING.contains(self)
    }

    /// Compute the blocking keys of a field value.
    ///
    /// Keys are returned in sorted order and never contain the empty string.
    pub fn keys(&self, value: &str) -> BTreeSet<String> {
        let mut keys = match self {
            PredicateFamily::WholeField => keys::whole_field(value),
            PredicateFamily::FirstToken => keys::first_token(value),
            PredicateFamily::FirstTwoTokens => keys::first_two_tokens(value),
            PredicateFamily::CommonInteger => keys::common_integer(value),
            PredicateFamily::NearIntegers => keys::near_integers(value),
            PredicateFamily::FirstInteger => keys::first_integer(value),
            PredicateFamily::HundredInteger => keys::hundred_integer(value),
            PredicateFamily::HundredIntegersOdd => keys::hundred_integers_odd(value),
            PredicateFamily::AlphaNumeric => keys::alpha_numeric(value),
            PredicateFamily::SameThreeCharStart => keys::char_start(value, 3),
            PredicateFamily::SameFiveCharStart => keys::char_start(value, 5),
            PredicateFamily::SameSevenCharStart => keys::char_start(value, 7),
            PredicateFamily::CommonTwoTokens => keys::common_tokens(value, 2),
            PredicateFamily::CommonThreeTokens => keys::common_tokens(value, 3),
            PredicateFamily::Fingerprint => keys::fingerprint(value),
            PredicateFamily::OneGramFingerprint => keys::one_gram_fingerprint(value),
            PredicateFamily::TwoGramFingerprint => keys::two_gram_fingerprint(value),
            PredicateFamily::SortedAcronym => keys::sorted_acronym(value),
            PredicateFamily::CommonFourGram => keys::common_ngrams(value, 4),
            PredicateFamily::CommonSixGram => keys::common_ngrams(value, 6),
            PredicateFamily::TokenField => keys::token_field(value),
            PredicateFamily::SuffixArray => keys::suffix_array(value),
            PredicateFamily::DoubleMetaphone => keys::double_metaphone(value),
            PredicateFamily::MetaphoneToken => keys::metaphone_token(value),
        };
        keys.remove("");
        keys
    }
}

impl fmt::Display for PredicateFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Index predicate classes: canopy and search flavours of Levenshtein and
/// TF-IDF similarity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IndexPredicateKind {
    LevenshteinCanopy,
    LevenshteinSearch,
    TfidfNGramCanopy,
    TfidfNGramSearch,
    TfidfTextCanopy,
    TfidfTextSearch,
}

/// Which parameter axis an index predicate class is swept over
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamAxis {
    /// Maximum edit distance
    EditDistance,
    /// Minimum cosine similarity
    Threshold,
}

impl IndexPredicateKind {
    pub const LEVENSHTEIN: [IndexPredicateKind; 2] = [
        IndexPredicateKind::LevenshteinCanopy,
        IndexPredicateKind::LevenshteinSearch,
    ];

    pub const TFIDF_NGRAM: [IndexPredicateKind; 2] = [
        IndexPredicateKind::TfidfNGramCanopy,
        IndexPredicateKind::TfidfNGramSearch,
    ];

    pub const TFIDF_TEXT: [IndexPredicateKind; 2] = [
        IndexPredicateKind::TfidfTextCanopy,
        IndexPredicateKind::TfidfTextSearch,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            IndexPredicateKind::LevenshteinCanopy => "levenshtein_canopy",
            IndexPredicateKind::LevenshteinSearch => "levenshtein_search",
            IndexPredicateKind::TfidfNGramCanopy => "tfidf_ngram_canopy",
            IndexPredicateKind::TfidfNGramSearch => "tfidf_ngram_search",
            IndexPredicateKind::TfidfTextCanopy => "tfidf_text_canopy",
            IndexPredicateKind::TfidfTextSearch => "tfidf_text_search",
        }
    }

    pub fn axis(&self) -> ParamAxis {
        match self {
            IndexPredicateKind::LevenshteinCanopy | IndexPredicateKind::LevenshteinSearch => {
                ParamAxis::EditDistance
            }
            _ => ParamAxis::Threshold,
        }
    }

    /// Canopy predicates cluster the whole data set; search predicates query
    /// an index record by record
    pub fn is_canopy(&self) -> bool {
        matches!(
            self,
            IndexPredicateKind::LevenshteinCanopy
                | IndexPredicateKind::TfidfNGramCanopy
                | IndexPredicateKind::TfidfTextCanopy
        )
    }

    pub fn is_tfidf(&self) -> bool {
        self.axis() == ParamAxis::Threshold
    }
}

impl fmt::Display for IndexPredicateKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Parameter of an index predicate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IndexParam {
    /// Maximum edit distance for Levenshtein predicates
    Distance(u8),
    /// Minimum similarity for TF-IDF predicates
    Threshold(OrderedFloat<f64>),
}

impl IndexParam {
    pub fn threshold(value: f64) -> Self {
        IndexParam::Threshold(OrderedFloat(value))
    }

    pub fn axis(&self) -> ParamAxis {
        match self {
            IndexParam::Distance(_) => ParamAxis::EditDistance,
            IndexParam::Threshold(_) => ParamAxis::Threshold,
        }
    }
}

impl fmt::Display for IndexParam {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IndexParam::Distance(d) => write!(f, "{}", d),
            IndexParam::Threshold(t) => write!(f, "{}", t.0),
        }
    }
}

/// An immutable blocking rule bound to a field
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PredicateDescriptor {
    Base {
        family: PredicateFamily,
        field: String,
    },
    Index {
        family: IndexPredicateKind,
        param: IndexParam,
        field: String,
        use_stop_words: bool,
    },
}

impl PredicateDescriptor {
    pub fn base(family: PredicateFamily, field: impl Into<String>) -> Self {
        PredicateDescriptor::Base {
            family,
            field: field.into(),
        }
    }

    /// Build an index predicate descriptor.
    ///
    /// The parameter is not checked against the class here; use
    /// [`crate::index_predicates`] for validated construction.
    pub fn index(
        family: IndexPredicateKind,
        param: IndexParam,
        field: impl Into<String>,
        use_stop_words: bool,
    ) -> Self {
        PredicateDescriptor::Index {
            family,
            param,
            field: field.into(),
            use_stop_words,
        }
    }

    pub fn field(&self) -> &str {
        match self {
            PredicateDescriptor::Base { field, .. } | PredicateDescriptor::Index { field, .. } => {
                field
            }
        }
    }

    pub fn family_name(&self) -> &'static str {
        match self {
            PredicateDescriptor::Base { family, .. } => family.name(),
            PredicateDescriptor::Index { family, .. } => family.name(),
        }
    }

    pub fn base_family(&self) -> Option<PredicateFamily> {
        match self {
            PredicateDescriptor::Base { family, .. } => Some(*family),
            PredicateDescriptor::Index { .. } => None,
        }
    }

    pub fn index_family(&self) -> Option<IndexPredicateKind> {
        match self {
            PredicateDescriptor::Base { .. } => None,
            PredicateDescriptor::Index { family, .. } => Some(*family),
        }
    }

    pub fn is_index(&self) -> bool {
        matches!(self, PredicateDescriptor::Index { .. })
    }

    /// Stop-word flag of an index predicate, `None` for base predicates
    pub fn use_stop_words(&self) -> Option<bool> {
        match self {
            PredicateDescriptor::Base { .. } => None,
            PredicateDescriptor::Index { use_stop_words, .. } => Some(*use_stop_words),
        }
    }

    /// Blocking keys for a base predicate; index predicates have no key
    /// function of their own and return `None`.
    pub fn keys(&self, value: &str) -> Option<BTreeSet<String>> {
        self.base_family().map(|family| family.keys(value))
    }
}

impl fmt::Display for PredicateDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PredicateDescriptor::Base { family, field } => write!(f, "{}({})", family, field),
            PredicateDescriptor::Index {
                family,
                param,
                field,
                use_stop_words,
            } => {
                if *use_stop_words {
                    write!(f, "{}({}, {})", family, param, field)
                } else {
                    write!(f, "{}({}, {}, no_stop_words)", family, param, field)
                }
            }
        }
    }
}
