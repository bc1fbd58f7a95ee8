//! Keyword extraction for ATS-style suggestions.
//!
//! Best-effort and English-only: splits the suggestion text into short
//! segments and keeps the ones that look like skill names.

use std::sync::LazyLock;

use regex::Regex;

use crate::models::Suggestion;

const MAX_KEYWORDS: usize = 6;
const MAX_KEYWORD_CHARS: usize = 40;
const MAX_KEYWORD_WORDS: usize = 4;

static SEGMENT_SPLIT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)[,;\n]|\s+and\s+").expect("split regex is valid"));

/// Extracts up to six candidate keywords from a suggestion's detail and example.
///
/// A segment is kept when it is non-empty, at most 40 characters, and either
/// contains a digit or has at most four words. A lead-in ending in ": " is
/// dropped from a segment ("Include ATS keywords: Kubernetes" -> "Kubernetes").
pub fn extract_keywords(suggestion: &Suggestion) -> Vec<String> {
    let payload = [Some(suggestion.detail.as_str()), suggestion.example.as_deref()]
        .into_iter()
        .flatten()
        .filter(|s| !s.trim().is_empty())
        .collect::<Vec<_>>()
        .join(" ")
        .replace(['[', ']'], " ");

    let mut keywords: Vec<String> = Vec::new();
    for segment in SEGMENT_SPLIT.split(&payload) {
        let Some(keyword) = clean_segment(segment) else {
            continue;
        };
        if !keywords.contains(&keyword) {
            keywords.push(keyword);
        }
        if keywords.len() == MAX_KEYWORDS {
            break;
        }
    }
    keywords
}

fn clean_segment(segment: &str) -> Option<String> {
    let unquoted = segment.replace(['"', '\''], "");
    let tail = unquoted
        .rsplit_once(": ")
        .map_or(unquoted.as_str(), |(_, t)| t)
        .trim();

    if tail.is_empty() || tail.chars().count() > MAX_KEYWORD_CHARS {
        return None;
    }
    let has_digit = tail.chars().any(|c| c.is_ascii_digit());
    if has_digit || tail.split_whitespace().count() <= MAX_KEYWORD_WORDS {
        Some(tail.to_string())
    } else {
        None
    }
}
