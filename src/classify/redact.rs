// Span-based redaction over character offsets.
//
// Replacement length may differ from span length (token mode), so spans are
// processed in descending start order — earlier replacements then never shift
// the offsets of spans still waiting. All splicing happens on a Vec<char>
// because span offsets are character offsets, not byte offsets.

use anyhow::Result;

use super::types::{RationaleSpan, RedactionMode};

/// Literal replacement used in token mode.
const REDACTED_TOKEN: &str = "[REDACTED]";

/// Produce a redacted copy of `text` with each span replaced per `mode`.
///
/// Returns `Ok(None)` when `spans` is absent or empty. Spans must be
/// non-overlapping and fully inside the text; the extractor guarantees this
/// by construction, and a violated span set fails loudly rather than
/// silently corrupting the output.
pub fn redact(
    text: &str,
    spans: Option<&[RationaleSpan]>,
    mode: RedactionMode,
) -> Result<Option<String>> {
    let spans = match spans {
        Some(s) if !s.is_empty() => s,
        _ => return Ok(None),
    };

    let mut chars: Vec<char> = text.chars().collect();
    validate_spans(spans, chars.len())?;

    let mut ordered: Vec<&RationaleSpan> = spans.iter().collect();
    ordered.sort_by(|a, b| b.start.cmp(&a.start));

    for span in ordered {
        let replacement: Vec<char> = match mode {
            RedactionMode::Token => REDACTED_TOKEN.chars().collect(),
            RedactionMode::Mask => chars[span.start..span.end]
                .iter()
                .map(|&c| if c.is_alphanumeric() { '*' } else { c })
                .collect(),
        };
        let _ = chars.splice(span.start..span.end, replacement);
    }

    Ok(Some(chars.into_iter().collect()))
}

/// Reject span sets the redactor cannot process: out-of-range offsets,
/// inverted spans, or overlaps.
fn validate_spans(spans: &[RationaleSpan], text_len: usize) -> Result<()> {
    let mut sorted: Vec<&RationaleSpan> = spans.iter().collect();
    sorted.sort_by_key(|s| s.start);

    for span in &sorted {
        if span.start >= span.end || span.end > text_len {
            anyhow::bail!(
                "invalid span set: span {}..{} out of range for text of {} characters",
                span.start,
                span.end,
                text_len
            );
        }
    }
    for pair in sorted.windows(2) {
        if pair[1].start < pair[0].end {
            anyhow::bail!(
                "invalid span set: spans {}..{} and {}..{} overlap",
                pair[0].start,
                pair[0].end,
                pair[1].start,
                pair[1].end
            );
        }
    }
    Ok(())
}
