//! Screen input validators shared by view models.
//!
//! Validators are pure; callers turn a rejection into a `UiSignal`.

use once_cell::sync::Lazy;
use regex::Regex;

pub const GOAL_MAX_CHARS: usize = 30;
pub const CHALLENGE_NAME_MAX_CHARS: usize = 30;
pub const MAX_HASHTAGS: usize = 5;
pub const MAX_RULES: usize = 10;

static EMAIL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}$").expect("valid email regex")
});
static CODE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[0-9]{4}$").expect("valid code regex"));
static NICKNAME_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[\p{L}\p{N}_]{2,12}$").expect("valid nickname regex"));
static HASHTAG_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^#?([\p{L}\p{N}_]{1,20})$").expect("valid hashtag regex"));

pub fn is_valid_email(value: &str) -> bool {
    EMAIL_RE.is_match(value.trim())
}

/// Four ASCII digits, nothing else.
pub fn is_valid_code(value: &str) -> bool {
    CODE_RE.is_match(value.trim())
}

pub fn is_valid_nickname(value: &str) -> bool {
    NICKNAME_RE.is_match(value.trim())
}

/// Non-blank text of at most `max_chars` characters, trimmed.
pub fn bounded_text(value: &str, max_chars: usize) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() || trimmed.chars().count() > max_chars {
        return None;
    }
    Some(trimmed.to_string())
}

/// Strips a leading `#` and rejects anything that is not one word.
pub fn normalize_hashtag(value: &str) -> Option<String> {
    HASHTAG_RE
        .captures(value.trim())
        .map(|captures| captures[1].to_string())
}

/// Normalizes every tag, dropping duplicates while keeping first-seen order.
///
/// Returns `None` when any tag is invalid or the list is too long.
pub fn normalize_hashtags(values: &[String]) -> Option<Vec<String>> {
    let mut tags: Vec<String> = Vec::with_capacity(values.len());
    for value in values {
        let tag = normalize_hashtag(value)?;
        if !tags.contains(&tag) {
            tags.push(tag);
        }
    }
    (tags.len() <= MAX_HASHTAGS).then_some(tags)
}
