//! Stop-word counting.
//!
//! The share of common function words in a fragment is a cheap proxy for
//! "real prose": navigation, captions and link lists carry few of them.

use std::collections::HashSet;

use crate::patterns::PUNCTUATION;

/// Counts produced for one text fragment.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WordStats {
    /// Number of words that are stop words.
    pub stop_word_count: usize,
    /// Number of words in the fragment after punctuation removal.
    pub word_count: usize,
    /// The distinct stop words found, lowercased.
    pub stop_words: HashSet<String>,
}

/// A language's stop-word list.
#[derive(Debug, Clone)]
pub struct StopWords {
    language: String,
    words: HashSet<String>,
}

impl StopWords {
    /// Build a list for `language` from arbitrary words (lowercased on insert).
    pub fn new<I, S>(language: &str, words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            language: language.to_string(),
            words: words
                .into_iter()
                .map(|w| w.as_ref().trim().to_lowercase())
                .filter(|w| !w.is_empty())
                .collect(),
        }
    }

    /// The built-in English list.
    #[must_use]
    pub fn english() -> Self {
        Self::new("en", ENGLISH_STOP_WORDS.iter())
    }

    #[must_use]
    pub fn language(&self) -> &str {
        &self.language
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.words.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// Whether `word` (any case) is a stop word.
    #[must_use]
    pub fn contains(&self, word: &str) -> bool {
        self.words.contains(&word.to_lowercase())
    }

    /// Strip punctuation, split on whitespace and count stop words.
    #[must_use]
    pub fn word_stats(&self, text: &str) -> WordStats {
        if text.is_empty() {
            return WordStats::default();
        }
        let stripped = PUNCTUATION.replace_all(text, "");
        let mut stats = WordStats::default();
        for word in stripped.split_whitespace() {
            stats.word_count += 1;
            let lower = word.to_lowercase();
            if self.words.contains(&lower) {
                stats.stop_word_count += 1;
                stats.stop_words.insert(lower);
            }
        }
        stats
    }

    /// Shorthand for `word_stats(text).stop_word_count`.
    #[must_use]
    pub fn stop_word_count(&self, text: &str) -> usize {
        self.word_stats(text).stop_word_count
    }
}

impl Default for StopWords {
    fn default() -> Self {
        Self::english()
    }
}

/// English stop words.
pub const ENGLISH_STOP_WORDS: &[&str] = &[
    "a", "about", "above", "according", "across", "after", "afterwards", "again",
    "against", "all", "almost", "alone", "along", "already", "also", "although",
    "always", "am", "among", "amongst", "an", "and", "another", "any", "anyhow",
    "anyone", "anything", "anyway", "anywhere", "are", "around", "as", "at", "back",
    "be", "became", "because", "become", "becomes", "becoming", "been", "before",
    "beforehand", "behind", "being", "below", "beside", "besides", "between",
    "beyond", "both", "but", "by", "can", "cannot", "could", "did", "do", "does",
    "doing", "done", "down", "during", "each", "either", "else", "elsewhere",
    "enough", "even", "ever", "every", "everyone", "everything", "everywhere",
    "except", "few", "first", "for", "former", "formerly", "from", "further",
    "had", "has", "have", "having", "he", "hence", "her", "here", "hereafter",
    "hereby", "herein", "hereupon", "hers", "herself", "him", "himself", "his",
    "how", "however", "i", "if", "in", "indeed", "into", "is", "it", "its",
    "itself", "just", "last", "latter", "latterly", "least", "less", "like",
    "made", "make", "many", "may", "me", "meanwhile", "might", "more", "moreover",
    "most", "mostly", "much", "must", "my", "myself", "namely", "neither", "never",
    "nevertheless", "next", "no", "nobody", "none", "nor", "not", "nothing", "now",
    "nowhere", "of", "off", "often", "on", "once", "one", "only", "onto", "or",
    "other", "others", "otherwise", "our", "ours", "ourselves", "out", "over",
    "own", "per", "perhaps", "rather", "really", "said", "same", "say", "says",
    "seem", "seemed", "seeming", "seems", "several", "she", "should", "since",
    "so", "some", "somehow", "someone", "something", "sometime", "sometimes",
    "somewhere", "still", "such", "than", "that", "the", "their", "theirs", "them",
    "themselves", "then", "thence", "there", "thereafter", "thereby", "therefore",
    "therein", "thereupon", "these", "they", "this", "those", "though", "through",
    "throughout", "thru", "thus", "to", "together", "too", "toward", "towards",
    "under", "until", "up", "upon", "us", "very", "via", "was", "we", "well",
    "were", "what", "whatever", "when", "whence", "whenever", "where",
    "whereafter", "whereas", "whereby", "wherein", "whereupon", "wherever",
    "whether", "which", "while", "whither", "who", "whoever", "whole", "whom",
    "whose", "why", "will", "with", "within", "without", "would", "yet", "you",
    "your", "yours", "yourself", "yourselves",
];
