//! Lexical scanning for quoted string literals.
//!
//! The scan is a deliberate heuristic: it matches any run of characters
//! between a pair of double or single quotes, with no escape handling and no
//! notion of markup versus code. Import paths, class names and object keys are
//! all picked up. Stricter policies are layered on top with [`LiteralFilter`].

use std::{collections::HashSet, sync::LazyLock};

use regex::Regex;

// Group 1: double-quoted body, group 2: single-quoted body
static LITERAL_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#""([^"]+)"|'([^']+)'"#).unwrap());

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum QuoteStyle {
    Double,
    Single,
}

impl QuoteStyle {
    pub const ALL: [QuoteStyle; 2] = [QuoteStyle::Double, QuoteStyle::Single];

    pub fn delimiter(self) -> char {
        match self {
            QuoteStyle::Double => '"',
            QuoteStyle::Single => '\'',
        }
    }

    /// Wrap `text` in this quote style, e.g. `'hello'`.
    pub fn quote(self, text: &str) -> String {
        let delimiter = self.delimiter();
        format!("{delimiter}{text}{delimiter}")
    }
}

/// A quoted literal found in source text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Literal {
    pub text: String,
    pub quote: QuoteStyle,
    /// Byte offset of the opening quote.
    pub offset: usize,
}

/// Find every quoted literal in `source`, left to right, non-overlapping.
pub fn scan_literals(source: &str) -> Vec<Literal> {
    LITERAL_REGEX
        .captures_iter(source)
        .filter_map(|caps| {
            let (body, quote) = match (caps.get(1), caps.get(2)) {
                (Some(body), _) => (body, QuoteStyle::Double),
                (None, Some(body)) => (body, QuoteStyle::Single),
                (None, None) => return None,
            };
            Some(Literal {
                text: body.as_str().to_string(),
                quote,
                offset: body.start() - 1,
            })
        })
        .collect()
}

/// Decides whether a scanned literal should be extracted.
///
/// Any `Fn(&str) -> bool` is a filter:
///
/// ```ignore
/// let extractor = Extractor::new(config)?.with_filter(|text: &str| !text.starts_with("./"));
/// ```
pub trait LiteralFilter {
    fn accept(&self, text: &str) -> bool;
}

impl<F> LiteralFilter for F
where
    F: Fn(&str) -> bool,
{
    fn accept(&self, text: &str) -> bool {
        self(text)
    }
}

/// Rejects an exact set of literals (the `ignoreTexts` setting).
#[derive(Debug, Default)]
pub struct IgnoreTexts {
    texts: HashSet<String>,
}

impl IgnoreTexts {
    pub fn new<I, S>(texts: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            texts: texts.into_iter().map(Into::into).collect(),
        }
    }
}

impl LiteralFilter for IgnoreTexts {
    fn accept(&self, text: &str) -> bool {
        !self.texts.contains(text)
    }
}
