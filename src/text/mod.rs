//! Text helpers: stop-word statistics, ordered regex replacement and entity handling.

mod stopwords;

pub use stopwords::{StopWords, WordStats, ENGLISH_STOP_WORDS};

use regex::{Captures, Regex};

use crate::error::{Error, Result};
use crate::patterns::HTML_ENTITY;

/// A compiled pattern and the text that replaces every match of it.
#[derive(Debug, Clone)]
pub struct StringReplacement {
    pattern: Regex,
    replace_with: String,
}

impl StringReplacement {
    /// Compile a replacement. Empty patterns are rejected.
    pub fn compile(pattern: &str, replace_with: &str) -> Result<Self> {
        if pattern.is_empty() {
            return Err(Error::Parse("replacement pattern must not be empty".to_string()));
        }
        let pattern = Regex::new(pattern).map_err(|e| Error::Parse(e.to_string()))?;
        Ok(Self {
            pattern,
            replace_with: replace_with.to_string(),
        })
    }

    /// Replace every match in `input`.
    #[must_use]
    pub fn replace_all(&self, input: &str) -> String {
        self.pattern
            .replace_all(input, regex::NoExpand(&self.replace_with))
            .into_owned()
    }
}

/// Replacements applied one after another, each to the output of the previous one.
///
/// ```
/// use rs_goose::text::ReplaceSequence;
///
/// let seq = ReplaceSequence::create("&raquo;", "")?.append("»", "")?;
/// assert_eq!(seq.replace_all("News &raquo; World »"), "News  World ");
/// # Ok::<(), rs_goose::Error>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct ReplaceSequence {
    replacements: Vec<StringReplacement>,
}

impl ReplaceSequence {
    /// Start a sequence with its first replacement.
    pub fn create(first_pattern: &str, replace_with: &str) -> Result<Self> {
        Self::default().append(first_pattern, replace_with)
    }

    /// Add another replacement to the end of the sequence.
    pub fn append(mut self, pattern: &str, replace_with: &str) -> Result<Self> {
        self.replacements
            .push(StringReplacement::compile(pattern, replace_with)?);
        Ok(self)
    }

    /// Apply every replacement in order.
    #[must_use]
    pub fn replace_all(&self, input: &str) -> String {
        self.replacements
            .iter()
            .fold(input.to_string(), |acc, rp| rp.replace_all(&acc))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.replacements.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.replacements.is_empty()
    }
}

/// Splits strings on a regex delimiter.
#[derive(Debug, Clone)]
pub struct StringSplitter {
    pattern: Regex,
}

impl StringSplitter {
    pub fn new(pattern: &str) -> Result<Self> {
        let pattern = Regex::new(pattern).map_err(|e| Error::Parse(e.to_string()))?;
        Ok(Self { pattern })
    }

    /// Split `input`; an empty input yields no pieces.
    #[must_use]
    pub fn split<'a>(&self, input: &'a str) -> Vec<&'a str> {
        if input.is_empty() {
            return Vec::new();
        }
        self.pattern.split(input).collect()
    }
}

/// Decode HTML entities one reference at a time.
///
/// Bare `&` and unknown references are kept as written.
#[must_use]
pub fn unescape_html(text: &str) -> String {
    HTML_ENTITY
        .replace_all(text, |caps: &Captures| {
            htmlescape::decode_html(&caps[0]).unwrap_or_else(|_| caps[0].to_string())
        })
        .into_owned()
}

/// Escape `&`, `<`, `>`, `"` and `'` as entities.
#[must_use]
pub fn escape_html(text: &str) -> String {
    htmlescape::encode_minimal(text)
}
