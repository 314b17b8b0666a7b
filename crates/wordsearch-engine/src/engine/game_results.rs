use std::{collections::BTreeSet, fmt};

use serde::{Deserialize, Serialize};

/// Snapshot of a round taken when it ends.
///
/// # Example
///
/// ```
/// use std::collections::BTreeSet;
///
/// use wordsearch_engine::GameResults;
///
/// let words = BTreeSet::from(["CAT".to_owned(), "DOG".to_owned()]);
/// let found = BTreeSet::from(["DOG".to_owned()]);
/// let results = GameResults::new(words, found);
///
/// assert_eq!(results.percentage(), 50.0);
/// assert_eq!(results.score_line(), "50.00%");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameResults {
    words: BTreeSet<String>,
    words_found: BTreeSet<String>,
}

impl GameResults {
    #[must_use]
    pub fn new(words: BTreeSet<String>, words_found: BTreeSet<String>) -> Self {
        Self { words, words_found }
    }

    /// Words that were in play.
    #[must_use]
    pub fn words(&self) -> &BTreeSet<String> {
        &self.words
    }

    #[must_use]
    pub fn words_found(&self) -> &BTreeSet<String> {
        &self.words_found
    }

    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.words == self.words_found
    }

    /// Share of words found, from 0 to 100. A round without words scores 0.
    #[must_use]
    #[expect(clippy::cast_precision_loss)]
    pub fn percentage(&self) -> f64 {
        if self.words.is_empty() {
            return 0.0;
        }
        100.0 * self.words_found.len() as f64 / self.words.len() as f64
    }

    /// The line written to the scores record.
    #[must_use]
    pub fn score_line(&self) -> String {
        format!("{:.2}%", self.percentage())
    }
}

impl fmt::Display for GameResults {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "words found:\t{}", self.words_found.len())?;
        writeln!(f, "total of words:\t{}", self.words.len())?;
        write!(f, "percentage of words found:\t{}", self.score_line())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set(words: &[&str]) -> BTreeSet<String> {
        words.iter().map(|w| (*w).to_owned()).collect()
    }

    #[test]
    fn test_percentage() {
        let results = GameResults::new(set(&["A", "B", "C"]), set(&["A"]));
        assert_eq!(results.score_line(), "33.33%");
        assert!(!results.is_complete());

        let results = GameResults::new(set(&["A", "B"]), set(&["A", "B"]));
        assert_eq!(results.score_line(), "100.00%");
        assert!(results.is_complete());
    }

    #[test]
    fn test_empty_round_scores_zero() {
        let results = GameResults::new(BTreeSet::new(), BTreeSet::new());
        assert_eq!(results.score_line(), "0.00%");
    }

    #[test]
    fn test_summary() {
        let results = GameResults::new(set(&["CAT", "DOG"]), set(&["CAT"]));
        assert_eq!(
            results.to_string(),
            "words found:\t1\ntotal of words:\t2\npercentage of words found:\t50.00%"
        );
    }

    #[test]
    fn test_json_shape() {
        let results = GameResults::new(set(&["CAT", "DOG"]), set(&["DOG"]));
        let json = serde_json::to_value(&results).unwrap();
        assert_eq!(
            json,
            serde_json::json!({ "words": ["CAT", "DOG"], "words_found": ["DOG"] })
        );
    }
}
