use std::{collections::HashSet, sync::LazyLock};

use regex::Regex;

/// Message printed by the front-end when a lookup misses.
// `.` does not cross newlines, so each match stays within one line.
static MISSING_KEY_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"Translation key not found: (.+?) in language: (\w+)").unwrap()
});

/// A missing key reported in a runtime log.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogMiss {
    pub key: String,
    pub locale: String,
}

impl LogMiss {
    pub fn new(key: impl Into<String>, locale: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            locale: locale.into(),
        }
    }
}

/// Extract every `Translation key not found: <key> in language: <lang>` message.
///
/// Surrounding text on the same or adjacent lines is ignored. Matches are
/// returned in order of appearance, duplicates included.
pub fn parse_log(text: &str) -> Vec<LogMiss> {
    MISSING_KEY_REGEX
        .captures_iter(text)
        .map(|caps| LogMiss::new(&caps[1], &caps[2]))
        .collect()
}

/// Distinct keys in order of first appearance.
pub fn unique_keys(misses: &[LogMiss]) -> Vec<String> {
    let mut seen = HashSet::new();
    misses
        .iter()
        .filter(|miss| seen.insert(miss.key.as_str()))
        .map(|miss| miss.key.clone())
        .collect()
}
