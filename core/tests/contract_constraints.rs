use provseal_core::contract::constraints::{
    format_title, sanitize_keywords, MAX_KEYWORDS, MAX_KEYWORD_CHARS, MAX_TITLE_CHARS, SPAM_TERMS,
};

fn v(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

#[test]
fn sanitize_is_idempotent() {
    let raw = v(&[
        "  the golden hour  ",
        "bride",
        "bride",
        "BRIDE",
        "a sunset glow",
        "is the sunset",
        "this is a full sentence about light.",
        "limited time offer",
        "veil",
        "first dance",
    ]);
    let once = sanitize_keywords(&raw);
    let twice = sanitize_keywords(&once);
    assert_eq!(once, twice);
}

#[test]
fn sanitize_never_exceeds_max_keywords() {
    let raw: Vec<String> = (0..40).map(|i| format!("keyword{}", i)).collect();
    let out = sanitize_keywords(&raw);
    assert_eq!(out.len(), MAX_KEYWORDS);
}

#[test]
fn sanitize_drops_overlong_items() {
    let raw = v(&["averyveryverylongkeywordindeed", "short"]);
    let out = sanitize_keywords(&raw);
    assert_eq!(out, vec!["short"]);
    for kw in &out {
        assert!(kw.chars().count() <= MAX_KEYWORD_CHARS);
    }
}

#[test]
fn sanitize_drops_sentence_fragments() {
    let raw = v(&[
        "contains punctuation.",
        "four words is too many",
        "exclaim!",
        "fine keyword",
    ]);
    assert_eq!(sanitize_keywords(&raw), vec!["fine keyword"]);
}

#[test]
fn sanitize_never_emits_spam_terms() {
    let raw = v(&["cheap", "big discount", "SALE today", "sunset", "guaranteed"]);
    let out = sanitize_keywords(&raw);
    assert_eq!(out, vec!["sunset"]);
    for kw in &out {
        let lowered = kw.to_lowercase();
        for term in SPAM_TERMS {
            assert!(!lowered.contains(term), "{} contains {}", kw, term);
        }
    }
}

#[test]
fn sanitize_dedupes_case_insensitively_first_wins() {
    let raw = v(&["Bride", "bride", "BRIDE", "groom"]);
    assert_eq!(sanitize_keywords(&raw), vec!["Bride", "groom"]);
}

#[test]
fn sanitize_strips_stacked_leading_articles() {
    let once = sanitize_keywords(&v(&["the an heirloom"]));
    assert_eq!(once, vec!["heirloom"]);
    assert_eq!(sanitize_keywords(&once), once);
}

#[test]
fn title_fits_without_truncation() {
    let title = format_title("Lumen", "Wedding", "Golden Hour");
    assert_eq!(title, "Lumen – Wedding – Golden Hour");
}

#[test]
fn title_truncates_subject_to_fit() {
    let title = format_title(
        "Lumen Studio",
        "Wedding",
        "an extremely long descriptive subject line about the couple",
    );
    assert!(title.chars().count() <= MAX_TITLE_CHARS);
    assert!(title.starts_with("Lumen Studio – Wedding – "));
}

#[test]
fn title_never_exceeds_sixty_chars_even_with_huge_segments() {
    let title = format_title(
        "An Unreasonably Long Studio Brand Name For Testing Purposes",
        "Commercial Product Photography Session",
        "subject",
    );
    assert!(title.chars().count() <= MAX_TITLE_CHARS);
}

#[test]
fn title_counts_chars_not_bytes() {
    // The separator is multi-byte; a byte-based cut would overshoot.
    let title = format_title("Café Années Folles", "Mariage", &"é".repeat(80));
    assert!(title.chars().count() <= MAX_TITLE_CHARS);
}
