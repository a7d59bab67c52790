//! Blocking key functions
//!
//! One pure function per base predicate family, mapping a field value to the
//! set of keys it blocks on. Records sharing a key become candidate pairs.

use regex::Regex;
use std::collections::BTreeSet;
use std::sync::LazyLock;

use crate::phonetic;

static WORDS: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[\w']+").unwrap());
static INTEGERS: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[0-9]+").unwrap());
static START_WORD: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^([\w']+)").unwrap());
static TWO_START_WORDS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([\w']+\W+[\w']+)").unwrap());
static START_INTEGER: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^([0-9]+)\b").unwrap());
static ALPHA_NUMERIC: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[a-zA-Z0-9]+").unwrap());

fn single(key: impl Into<String>) -> BTreeSet<String> {
    let mut keys = BTreeSet::new();
    keys.insert(key.into());
    keys
}

/// Word tokens of a value, apostrophes included
pub fn words(value: &str) -> impl Iterator<Item = &str> {
    WORDS.find_iter(value).map(|m| m.as_str())
}

/// Digit run with leading zeros stripped, so "007" and "7" share a key
fn normalize_integer(digits: &str) -> &str {
    let trimmed = digits.trim_start_matches('0');
    if trimmed.is_empty() {
        "0"
    } else {
        trimmed
    }
}

fn integers(value: &str) -> impl Iterator<Item = &str> {
    INTEGERS.find_iter(value).map(|m| normalize_integer(m.as_str()))
}

/// Distinct character n-grams
fn unique_ngrams(value: &str, n: usize) -> BTreeSet<String> {
    let chars: Vec<char> = value.chars().collect();
    if n == 0 || chars.len() < n {
        return BTreeSet::new();
    }
    chars.windows(n).map(|w| w.iter().collect()).collect()
}

fn without_spaces(value: &str) -> String {
    value.chars().filter(|c| *c != ' ').collect()
}

pub fn whole_field(value: &str) -> BTreeSet<String> {
    single(value)
}

pub fn first_token(value: &str) -> BTreeSet<String> {
    START_WORD
        .captures(value)
        .map(|c| single(&c[1]))
        .unwrap_or_default()
}

pub fn first_two_tokens(value: &str) -> BTreeSet<String> {
    TWO_START_WORDS
        .captures(value)
        .map(|c| single(&c[1]))
        .unwrap_or_default()
}

pub fn common_integer(value: &str) -> BTreeSet<String> {
    integers(value).map(str::to_string).collect()
}

/// Every integer together with its neighbours.
///
/// Integers too large for an `i128` are skipped, and so is a neighbour that
/// would overflow.
pub fn near_integers(value: &str) -> BTreeSet<String> {
    let mut keys = BTreeSet::new();
    for digits in integers(value) {
        if let Ok(n) = digits.parse::<i128>() {
            let near = [n.checked_sub(1), Some(n), n.checked_add(1)];
            keys.extend(near.into_iter().flatten().map(|k| k.to_string()));
        }
    }
    keys
}

pub fn first_integer(value: &str) -> BTreeSet<String> {
    START_INTEGER
        .captures(value)
        .map(|c| single(normalize_integer(&c[1])))
        .unwrap_or_default()
}

/// Digits above the hundreds place, as a string.
///
/// `digits` is an ASCII digit run, so byte offsets are char boundaries.
fn hundreds_prefix(digits: &str) -> &str {
    let cut = digits.len().saturating_sub(2);
    &digits[..cut]
}

pub fn hundred_integer(value: &str) -> BTreeSet<String> {
    integers(value)
        .map(|digits| format!("{}00", hundreds_prefix(digits)))
        .collect()
}

pub fn hundred_integers_odd(value: &str) -> BTreeSet<String> {
    integers(value)
        .map(|digits| {
            let odd = digits
                .chars()
                .last()
                .and_then(|c| c.to_digit(10))
                .map(|d| d % 2)
                .unwrap_or(0);
            format!("{}0{}", hundreds_prefix(digits), odd)
        })
        .collect()
}

/// Alphanumeric runs containing at least one digit
pub fn alpha_numeric(value: &str) -> BTreeSet<String> {
    ALPHA_NUMERIC
        .find_iter(value)
        .map(|m| m.as_str())
        .filter(|run| run.chars().any(|c| c.is_ascii_digit()))
        .map(str::to_string)
        .collect()
}

/// First `n` characters, spaces removed, when the value is long enough
pub fn char_start(value: &str, n: usize) -> BTreeSet<String> {
    let compact = without_spaces(value);
    if compact.chars().count() < n {
        return BTreeSet::new();
    }
    single(compact.chars().take(n).collect::<String>())
}

/// Contiguous runs of `n` whitespace-separated tokens
pub fn common_tokens(value: &str, n: usize) -> BTreeSet<String> {
    let tokens: Vec<&str> = value.split_whitespace().collect();
    if n == 0 || tokens.len() < n {
        return BTreeSet::new();
    }
    tokens.windows(n).map(|w| w.join(" ")).collect()
}

pub fn fingerprint(value: &str) -> BTreeSet<String> {
    let mut tokens: Vec<&str> = value.split_whitespace().collect();
    tokens.sort_unstable();
    single(tokens.concat())
}

pub fn one_gram_fingerprint(value: &str) -> BTreeSet<String> {
    let grams = unique_ngrams(&without_spaces(value), 1);
    single(grams.into_iter().collect::<String>())
}

pub fn two_gram_fingerprint(value: &str) -> BTreeSet<String> {
    if value.chars().count() <= 1 {
        return BTreeSet::new();
    }
    let grams = unique_ngrams(&without_spaces(value), 2);
    single(grams.into_iter().collect::<String>())
}

pub fn sorted_acronym(value: &str) -> BTreeSet<String> {
    let mut initials: Vec<char> = value
        .split_whitespace()
        .filter_map(|token| token.chars().next())
        .collect();
    initials.sort_unstable();
    single(initials.into_iter().collect::<String>())
}

/// Character n-grams with spaces removed
pub fn common_ngrams(value: &str, n: usize) -> BTreeSet<String> {
    unique_ngrams(&without_spaces(value), n)
}

pub fn token_field(value: &str) -> BTreeSet<String> {
    words(value).map(str::to_string).collect()
}

/// Suffixes at least five characters long
pub fn suffix_array(value: &str) -> BTreeSet<String> {
    let chars: Vec<char> = value.chars().collect();
    let n = chars.len().saturating_sub(4);
    (0..n).map(|i| chars[i..].iter().collect()).collect()
}

pub fn double_metaphone(value: &str) -> BTreeSet<String> {
    phonetic::double_metaphone(value).codes().collect()
}

/// Double metaphone codes of every distinct whitespace token
pub fn metaphone_token(value: &str) -> BTreeSet<String> {
    let tokens: BTreeSet<&str> = value.split_whitespace().collect();
    tokens
        .into_iter()
        .flat_map(|token| phonetic::double_metaphone(token).codes())
        .collect()
}
