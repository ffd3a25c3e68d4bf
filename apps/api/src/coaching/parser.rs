//! Response parser: pulls feedback, score and category out of free-text model output.
//!
//! The model only loosely follows the `Feedback / Suggestion / Category / Score` layout
//! requested by the prompt, so extraction is best-effort and total: every path has a
//! fallback (`"N/A"` or the whole text) and nothing here returns an error.
//!
//! `AppState` holds an `Arc<dyn ResponseParser>`; `MarkerParser` is the default.

use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

use crate::models::record::{Category, NOT_AVAILABLE};

static SCORE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)Score\s*[:=]\s*(\d+/10|\d+)").unwrap());

static CATEGORY_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)Category\s*[:=]\s*(Technical|Communication|Both)").unwrap()
});

/// The feedback/score split point. Matches even when no digits follow.
static SCORE_MARKER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)Score\s*[:=]").unwrap());

/// Structured fields extracted from one model response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ParsedFeedback {
    pub feedback: String,
    pub score: String,
    pub category: Category,
}

/// Extraction strategy. Implement this to swap in a structured-output backend
/// without touching the pipeline or the handlers.
pub trait ResponseParser: Send + Sync {
    fn parse(&self, raw: &str) -> ParsedFeedback;
}

/// Regex-based parser keyed on the `Category:` / `Score:` markers.
pub struct MarkerParser;

impl ResponseParser for MarkerParser {
    fn parse(&self, raw: &str) -> ParsedFeedback {
        ParsedFeedback {
            feedback: extract_feedback(raw),
            score: extract_score(raw),
            category: extract_category(raw),
        }
    }
}

/// First `Score: <n>/10` or `Score: <n>`; `"N/A"` when absent.
pub fn extract_score(raw: &str) -> String {
    SCORE_RE
        .captures(raw)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
        .unwrap_or_else(|| NOT_AVAILABLE.to_string())
}

/// First `Category: <word>`, normalized; `N/A` when absent.
pub fn extract_category(raw: &str) -> Category {
    CATEGORY_RE
        .captures(raw)
        .and_then(|caps| caps.get(1))
        .and_then(|m| Category::from_word(m.as_str()))
        .unwrap_or(Category::NotAvailable)
}

/// Everything before the first score marker, trimmed, minus the first recognized
/// category label (it is reported as its own field). Only the label itself is
/// removed; its line goes too when nothing else is left on it.
/// Whole trimmed text when there is no marker.
pub fn extract_feedback(raw: &str) -> String {
    let Some(marker) = SCORE_MARKER_RE.find(raw) else {
        return raw.trim().to_string();
    };
    let head = &raw[..marker.start()];
    let Some(label) = CATEGORY_RE.find(head) else {
        return head.trim().to_string();
    };

    let line_start = head[..label.start()].rfind('\n').map_or(0, |i| i + 1);
    let line_end = head[label.end()..]
        .find('\n')
        .map_or(head.len(), |i| label.end() + i);
    let label_only_line = head[line_start..label.start()].trim().is_empty()
        && head[label.end()..line_end].trim().is_empty();

    let mut feedback = String::with_capacity(head.len());
    if label_only_line {
        feedback.push_str(&head[..line_start]);
        feedback.push_str(head.get(line_end + 1..).unwrap_or(""));
    } else {
        feedback.push_str(&head[..label.start()]);
        feedback.push_str(&head[label.end()..]);
    }
    feedback.trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    const WELL_FORMED: &str =
        "Feedback: Good structure.\nSuggestion: Add metrics.\nCategory: Technical\nScore: 8/10";

    #[test]
    fn test_well_formed_response() {
        let parsed = MarkerParser.parse(WELL_FORMED);
        assert_eq!(parsed.feedback, "Feedback: Good structure.\nSuggestion: Add metrics.");
        assert_eq!(parsed.score, "8/10");
        assert_eq!(parsed.category, Category::Technical);
    }

    #[test]
    fn test_unstructured_response_falls_back() {
        let parsed = MarkerParser.parse("no structured fields here");
        assert_eq!(
            parsed,
            ParsedFeedback {
                feedback: "no structured fields here".to_string(),
                score: "N/A".to_string(),
                category: Category::NotAvailable,
            }
        );
    }

    #[test]
    fn test_score_with_denominator_and_suffix() {
        assert_eq!(extract_score("Score: 7/10 — decent answer"), "7/10");
        assert_eq!(extract_score("prefix text. Score: 7/10"), "7/10");
    }

    #[test]
    fn test_score_without_denominator_is_not_normalized() {
        assert_eq!(extract_score("Score=9"), "9");
        assert_eq!(extract_score("Score: 7"), "7");
    }

    #[test]
    fn test_score_is_case_insensitive_with_loose_spacing() {
        assert_eq!(extract_score("SCORE  =  6/10"), "6/10");
        assert_eq!(extract_score("final score:\n5"), "5");
    }

    #[test]
    fn test_score_missing_is_sentinel() {
        assert_eq!(extract_score(""), "N/A");
        assert_eq!(extract_score("Great answer overall."), "N/A");
        assert_eq!(extract_score("Score: excellent"), "N/A");
    }

    #[test]
    fn test_score_first_occurrence_wins() {
        assert_eq!(extract_score("Score: 4/10\nRevised Score: 9/10"), "4/10");
    }

    #[test]
    fn test_score_out_of_range_is_kept() {
        assert_eq!(extract_score("Score: 42"), "42");
        // Leftmost-first alternation takes the `/10` prefix.
        assert_eq!(extract_score("Score: 7/100"), "7/10");
    }

    #[test]
    fn test_category_normalization() {
        assert_eq!(extract_category("category=BOTH."), Category::Both);
        assert_eq!(extract_category("Category: communication"), Category::Communication);
        assert_eq!(extract_category("CATEGORY :TeChNiCaL"), Category::Technical);
    }

    #[test]
    fn test_category_unknown_word_is_sentinel() {
        assert_eq!(extract_category("Category: Leadership"), Category::NotAvailable);
        assert_eq!(extract_category("Technical and Communication"), Category::NotAvailable);
    }

    #[test]
    fn test_category_first_occurrence_wins() {
        assert_eq!(
            extract_category("Category: Both\nCategory: Technical"),
            Category::Both
        );
    }

    #[test]
    fn test_feedback_stops_at_first_score_marker() {
        let raw = "Nice answer.\nScore: 6/10\nMore notes.\nScore: 9/10";
        let feedback = extract_feedback(raw);
        assert_eq!(feedback, "Nice answer.");
        assert!(!feedback.to_lowercase().contains("score:"));
    }

    #[test]
    fn test_feedback_split_ignores_digits() {
        // The split marker matches even when the score itself is unreadable.
        assert_eq!(extract_feedback("Clear and concise. score = ten"), "Clear and concise.");
    }

    #[test]
    fn test_feedback_empty_when_marker_leads() {
        let parsed = MarkerParser.parse("Score: 3/10\nFeedback: too short");
        assert_eq!(parsed.feedback, "");
        assert_eq!(parsed.score, "3/10");
    }

    #[test]
    fn test_feedback_drops_only_the_category_label() {
        let raw = "Solid answer.\nCategory = BOTH (leaning technical)\nWrap-up.\nScore: 7";
        assert_eq!(
            extract_feedback(raw),
            "Solid answer.\n (leaning technical)\nWrap-up."
        );
    }

    #[test]
    fn test_feedback_keeps_text_around_inline_category_label() {
        let raw = "Feedback: Good answer. Category: Technical. Suggestion: Add metrics. Score: 8/10";
        let feedback = extract_feedback(raw);
        assert_eq!(feedback, "Feedback: Good answer. . Suggestion: Add metrics.");
        assert!(feedback.contains("Suggestion: Add metrics."));
    }

    #[test]
    fn test_feedback_drops_label_only_line_without_blank_gap() {
        let raw = "Solid answer.\nCategory: Both\nWrap-up.\nScore: 7";
        assert_eq!(extract_feedback(raw), "Solid answer.\nWrap-up.");

        let crlf = "Solid answer.\r\nCategory: Both\r\nWrap-up.\r\nScore: 7";
        assert_eq!(extract_feedback(crlf), "Solid answer.\r\nWrap-up.");
    }

    #[test]
    fn test_feedback_keeps_unrecognized_category_text() {
        let raw = "Category: Leadership\nGood.\nScore: 6/10";
        assert_eq!(extract_feedback(raw), "Category: Leadership\nGood.");
    }

    #[test]
    fn test_feedback_without_marker_is_trimmed_text() {
        assert_eq!(extract_feedback("\n  Keep it up.  \n"), "Keep it up.");
        assert_eq!(extract_feedback(""), "");
    }

    #[test]
    fn test_score_word_without_separator_is_not_a_marker() {
        let raw = "Scores vary by team. Category: Both";
        let parsed = MarkerParser.parse(raw);
        assert_eq!(parsed.score, "N/A");
        assert_eq!(parsed.feedback, raw);
        assert_eq!(parsed.category, Category::Both);
    }

    #[test]
    fn test_fields_default_independently() {
        let parsed = MarkerParser.parse("Category: Technical only");
        assert_eq!(parsed.category, Category::Technical);
        assert_eq!(parsed.score, "N/A");
        assert_eq!(parsed.feedback, "Category: Technical only");
    }
}
