// Output formatting — colored terminal display for one-shot predictions.

use colored::Colorize;

use crate::classify::{Label, PredictionResult};

/// Truncate a string to at most `max_chars` characters, appending "..." if truncated.
///
/// Unlike byte slicing (`&text[..50]`), this respects UTF-8 character boundaries
/// and will never panic on multi-byte characters like emoji or accented letters.
pub fn truncate_chars(text: &str, max_chars: usize) -> String {
    let char_count = text.chars().count();
    if char_count <= max_chars {
        text.to_string()
    } else {
        let truncated: String = text.chars().take(max_chars).collect();
        format!("{truncated}...")
    }
}

/// Display a prediction result in the terminal.
pub fn display_prediction(text: &str, result: &PredictionResult) {
    let label = match result.label {
        Label::Toxic => result.label.as_str().red().bold(),
        Label::NonToxic => result.label.as_str().green().bold(),
    };

    println!("\n  {}", truncate_chars(text, 120).italic());
    println!(
        "  {label}  confidence {:.2}  (toxic {:.2} / non_toxic {:.2})",
        result.confidence, result.scores.toxic, result.scores.non_toxic
    );

    match &result.rationale {
        Some(spans) => {
            for span in spans {
                println!(
                    "  {} {:?} at {}..{} (weight {:.1})",
                    "span".dimmed(),
                    span.text,
                    span.start,
                    span.end,
                    span.weight
                );
            }
        }
        None => println!("  {}", "no rationale spans".dimmed()),
    }

    if let Some(redacted) = &result.redacted_text {
        println!("  {} {}", "redacted".dimmed(), redacted);
    }

    println!(
        "  {}",
        format!(
            "latency {:.2}ms, threshold {}",
            result.meta.latency_ms, result.meta.threshold_used
        )
        .dimmed()
    );
    println!();
}
