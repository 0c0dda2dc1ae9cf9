use regex::Regex;
use std::sync::LazyLock;

use crate::config::Decision;

const FOR_TOKENS: [&str; 5] = ["y", "yes", "aye", "yea", "for"];
const AGAINST_TOKENS: [&str; 4] = ["n", "no", "nay", "against"];

static ABSENCE_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)did\s*n[o'’]?t\s*vote|didnt\s*vote|not[\s_-]*voting|no[\s_-]*vote|\bnv\b|excused|absent|present|abstain",
    )
    .unwrap()
});

/// Classifies the text of one vote cell.
///
/// Returns `None` when the cell is empty or not understood. Callers decide
/// what to do in that case (usually: did not vote, keeping the raw text).
///
/// The checks run in order: support, opposition, absence. The first one
/// that matches wins.
pub fn normalize_vote(raw: Option<&str>) -> Option<Decision> {
    let text = raw?.trim().to_lowercase();
    if text.is_empty() {
        return None;
    }
    let words = words(&text);

    if is_for(&text, &words) {
        Some(Decision::For)
    } else if is_against(&text, &words) {
        Some(Decision::Against)
    } else if ABSENCE_REGEX.is_match(&text) {
        Some(Decision::DidntVote)
    } else {
        None
    }
}

fn words(text: &str) -> Vec<&str> {
    text.split(|c: char| !c.is_alphanumeric())
        .filter(|w| !w.is_empty())
        .collect()
}

fn is_for(text: &str, words: &[&str]) -> bool {
    words.iter().any(|w| FOR_TOKENS.contains(w))
        || text.contains("support")
        || text.contains("in favor")
        || text.contains("in favour")
        || text.starts_with("pro-")
        || text.starts_with("pro ")
}

fn is_against(text: &str, words: &[&str]) -> bool {
    // "no" directly followed by "vote" is an absence, not a nay.
    let has_token = words.iter().enumerate().any(|(idx, w)| {
        AGAINST_TOKENS.contains(w)
            && !(*w == "no"
                && words
                    .get(idx + 1)
                    .map(|next| next.starts_with("vot"))
                    .unwrap_or(false))
    });
    has_token
        || text.contains("oppose")
        || text.starts_with("anti-")
        || text.starts_with("anti ")
}
