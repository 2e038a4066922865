use regex::Regex;
use std::collections::BTreeSet;
use std::sync::OnceLock;

pub const MAX_TITLE_CHARS: usize = 60;
pub const MIN_TITLE_SUBJECT_CHARS: usize = 10;
pub const TITLE_SEPARATOR: &str = " – ";

pub const MIN_CAPTION_CHARS: usize = 200;
pub const MAX_CAPTION_CHARS: usize = 1200;

pub const MIN_KEYWORDS: usize = 5;
pub const MAX_KEYWORDS: usize = 15;
pub const MAX_KEYWORD_CHARS: usize = 24;
pub const MAX_KEYWORD_WORDS: usize = 3;

/// Terms that read as sales copy rather than descriptive keywords. Matched
/// case-insensitively, exact or substring, after normalization.
pub const SPAM_TERMS: &[&str] = &[
    "click here",
    "buy now",
    "act now",
    "best ever",
    "cheap",
    "discount",
    "free shipping",
    "guaranteed",
    "limited time",
    "lowest price",
    "sale",
    "top rated",
    "#1",
];

const LEADING_ARTICLES: &[&str] = &["a", "an", "the"];

const LINKING_VERBS: &[&str] = &["am", "is", "are", "was", "were", "be", "been", "being"];

fn sentence_punct_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"[.!?;:]").unwrap())
}

pub fn contains_sentence_punctuation(s: &str) -> bool {
    sentence_punct_re().is_match(s)
}

pub fn is_spam_term(s: &str) -> bool {
    let lowered = s.to_lowercase();
    SPAM_TERMS.iter().any(|term| lowered.contains(term))
}

/// A keyword reads as a sentence fragment when it carries sentence
/// punctuation or more words than an atomic keyword should.
pub fn is_sentence_like(s: &str) -> bool {
    contains_sentence_punctuation(s) || s.split_whitespace().count() > MAX_KEYWORD_WORDS
}

// Drop linking verbs first, then strip leading articles until none remain.
// Doing it in the other order is not idempotent ("is the sunset" would
// normalize to "the sunset" on the first pass and "sunset" on the second).
fn normalize_keyword(s: &str) -> String {
    let mut tokens: Vec<&str> = s
        .split_whitespace()
        .filter(|t| !LINKING_VERBS.contains(&t.to_lowercase().as_str()))
        .collect();
    while let Some(first) = tokens.first() {
        if LEADING_ARTICLES.contains(&first.to_lowercase().as_str()) {
            tokens.remove(0);
        } else {
            break;
        }
    }
    tokens.join(" ")
}

/// Reduce a raw keyword list to an embed-ready ordered set. Idempotent:
/// re-applying to its own output yields the same output.
///
/// Pipeline per item: trim; reject over-long, punctuated, or sentence-length
/// items; normalize (drop linking verbs, strip leading articles, collapse
/// whitespace); reject spam terms post-normalization; dedupe
/// case-insensitively with first occurrence winning; cap at [`MAX_KEYWORDS`].
pub fn sanitize_keywords(raw: &[String]) -> Vec<String> {
    let mut out: Vec<String> = Vec::new();
    let mut seen: BTreeSet<String> = BTreeSet::new();
    for item in raw {
        let trimmed = item.trim();
        if trimmed.is_empty() {
            continue;
        }
        if trimmed.chars().count() > MAX_KEYWORD_CHARS {
            continue;
        }
        if contains_sentence_punctuation(trimmed) {
            continue;
        }
        if trimmed.split_whitespace().count() > MAX_KEYWORD_WORDS {
            continue;
        }
        let normalized = normalize_keyword(trimmed);
        if normalized.is_empty() || is_spam_term(&normalized) {
            continue;
        }
        if !seen.insert(normalized.to_lowercase()) {
            continue;
        }
        out.push(normalized);
        if out.len() == MAX_KEYWORDS {
            break;
        }
    }
    out
}

/// Builds `"{brand} – {session_type} – {subject}"`, truncating the subject
/// (never below [`MIN_TITLE_SUBJECT_CHARS`]) when the result would exceed
/// [`MAX_TITLE_CHARS`]. The brand and session segments are kept verbatim
/// where possible; the output never exceeds [`MAX_TITLE_CHARS`] characters.
pub fn format_title(brand: &str, session_type: &str, subject: &str) -> String {
    let brand = brand.trim();
    let session_type = session_type.trim();
    let subject = subject.trim();

    let full = format!("{brand}{TITLE_SEPARATOR}{session_type}{TITLE_SEPARATOR}{subject}");
    if full.chars().count() <= MAX_TITLE_CHARS {
        return full;
    }

    let fixed = brand.chars().count()
        + session_type.chars().count()
        + 2 * TITLE_SEPARATOR.chars().count();
    let budget = MAX_TITLE_CHARS
        .saturating_sub(fixed)
        .max(MIN_TITLE_SUBJECT_CHARS);
    let cut: String = subject.chars().take(budget).collect();
    let cut = cut.trim_end();

    let out = format!("{brand}{TITLE_SEPARATOR}{session_type}{TITLE_SEPARATOR}{cut}");
    if out.chars().count() > MAX_TITLE_CHARS {
        // Oversized brand/session segments; hard-clamp the whole title.
        out.chars().take(MAX_TITLE_CHARS).collect()
    } else {
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn v(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn articles_and_linking_verbs_are_collapsed() {
        let out = sanitize_keywords(&v(&["the golden   hour", "sky is moody"]));
        assert_eq!(out, vec!["golden hour", "sky moody"]);
    }

    #[test]
    fn leading_article_behind_linking_verb_still_strips() {
        let once = sanitize_keywords(&v(&["is the sunset"]));
        let twice = sanitize_keywords(&once);
        assert_eq!(once, vec!["sunset"]);
        assert_eq!(once, twice);
    }

    #[test]
    fn title_separator_segments_survive_when_short() {
        assert_eq!(
            format_title("Lumen Studio", "Wedding", "Golden Hour"),
            "Lumen Studio – Wedding – Golden Hour"
        );
    }
}
