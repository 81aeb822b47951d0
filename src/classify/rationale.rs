// Rationale span extraction — keyword-driven, not model-attributed.
//
// The extractor scans the input for a fixed list of known toxic terms and
// reports where they occur. This is a heuristic: it explains what a human
// would point at, not what the model actually weighted. The term list order
// is the priority order — when the scan budget (top_k) runs out, earlier
// terms win. Offsets are character offsets into the original text.

use super::types::RationaleSpan;

/// Known toxic terms, in priority order. The declaration order is part of the
/// observable API contract: it decides which spans are reported when more
/// terms occur than `top_k` allows.
const TOXIC_TERMS: [&str; 25] = [
    "idiot",
    "stupid",
    "loser",
    "hate",
    "worthless",
    "dick",
    "fuck",
    "asshole",
    "bastard",
    "bitch",
    "damn",
    "hell",
    "crap",
    "shit",
    "dickhead",
    "moron",
    "retard",
    "fool",
    "jerk",
    "scum",
    "ass",
    "fucking",
    "damned",
    "hated",
    "idiotic",
];

/// Find up to `top_k` rationale spans in `text`.
///
/// For each term in priority order, records the first case-insensitive
/// occurrence as a span (original casing, weight 1.0), skipping any candidate
/// that would overlap a span already collected. Returns `None` when no term
/// matches, so callers can tell "found nothing" apart from "never ran".
/// Returned spans are non-overlapping and sorted by `start` ascending.
pub fn extract_spans(text: &str, top_k: usize) -> Option<Vec<RationaleSpan>> {
    if top_k == 0 {
        return None;
    }

    let chars: Vec<char> = text.chars().collect();
    let mut spans: Vec<RationaleSpan> = Vec::new();

    for term in TOXIC_TERMS {
        if spans.len() >= top_k {
            break;
        }
        let Some(start) = find_ignore_case(&chars, term) else {
            continue;
        };
        let end = start + term.chars().count();
        if spans.iter().any(|s| start < s.end && s.start < end) {
            // First occurrence collides with an already-collected span.
            continue;
        }
        spans.push(RationaleSpan {
            text: chars[start..end].iter().collect(),
            start,
            end,
            weight: 1.0,
        });
    }

    if spans.is_empty() {
        return None;
    }
    spans.sort_by_key(|s| s.start);
    Some(spans)
}

/// First occurrence of `term` in `chars`, ignoring ASCII case.
///
/// Character-wise comparison keeps the returned offset a character offset,
/// which is what the redactor and the wire format expect. The term list is
/// ASCII, so ASCII case folding is exact.
fn find_ignore_case(chars: &[char], term: &str) -> Option<usize> {
    let term_chars: Vec<char> = term.chars().collect();
    if term_chars.is_empty() || term_chars.len() > chars.len() {
        return None;
    }
    (0..=chars.len() - term_chars.len()).find(|&start| {
        term_chars
            .iter()
            .enumerate()
            .all(|(j, tc)| chars[start + j].eq_ignore_ascii_case(tc))
    })
}
