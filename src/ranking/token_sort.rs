use rapidfuzz::distance::indel;

use crate::ranking::Scorer;

/// Token-sort ratio scorer.
///
/// Both strings are split into tokens, the tokens are sorted and rejoined,
/// and the rejoined strings are compared with a normalized Indel
/// similarity. Word order therefore does not matter:
/// "Code Visual Studio" and "Visual Studio Code" score 100.
pub struct TokenSortScorer {
    preprocess: bool,
}

impl TokenSortScorer {
    /// Scorer that lowercases and treats punctuation and path separators
    /// as token boundaries before sorting
    pub fn new() -> Self {
        Self { preprocess: true }
    }

    /// Scorer that only splits on whitespace and keeps case
    pub fn raw() -> Self {
        Self { preprocess: false }
    }
}

impl Default for TokenSortScorer {
    fn default() -> Self {
        Self::new()
    }
}

impl Scorer for TokenSortScorer {
    fn score(&self, a: &str, b: &str) -> f64 {
        if self.preprocess {
            token_sort_ratio(&default_process(a), &default_process(b))
        } else {
            token_sort_ratio(a, b)
        }
    }

    fn name(&self) -> &str {
        if self.preprocess {
            "token_sort"
        } else {
            "token_sort_raw"
        }
    }
}

/// Lowercase and replace every non-alphanumeric character with a space
pub fn default_process(s: &str) -> String {
    s.chars()
        .flat_map(|c| {
            let keep = c.is_alphanumeric();
            c.to_lowercase().map(move |l| if keep { l } else { ' ' })
        })
        .collect()
}

/// Sort whitespace-separated tokens and rejoin them with single spaces
pub fn sort_tokens(s: &str) -> String {
    let mut tokens: Vec<&str> = s.split_whitespace().collect();
    tokens.sort_unstable();
    tokens.join(" ")
}

/// Token-sort ratio in `[0, 100]` without any preprocessing
pub fn token_sort_ratio(a: &str, b: &str) -> f64 {
    let sorted_a = sort_tokens(a);
    let sorted_b = sort_tokens(b);

    if sorted_a == sorted_b {
        return 100.0;
    }

    let similarity = indel::normalized_similarity(sorted_a.chars(), sorted_b.chars());
    let score = similarity * 100.0;
    if score.is_nan() {
        0.0
    } else {
        score.clamp(0.0, 100.0)
    }
}
