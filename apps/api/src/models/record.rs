use std::fmt;

use chrono::Local;
use serde::{Deserialize, Serialize};

/// Sentinel for a field the parser could not extract.
pub const NOT_AVAILABLE: &str = "N/A";

/// Role recorded for questions typed in by the user.
pub const CUSTOM_ROLE: &str = "custom";

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Which skill area the model judged the answer to exercise.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Category {
    Technical,
    Communication,
    Both,
    #[default]
    #[serde(rename = "N/A")]
    NotAvailable,
}

impl Category {
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Technical => "Technical",
            Category::Communication => "Communication",
            Category::Both => "Both",
            Category::NotAvailable => NOT_AVAILABLE,
        }
    }

    /// Case-insensitive lookup of one of the three category words.
    pub fn from_word(word: &str) -> Option<Self> {
        match word.to_ascii_lowercase().as_str() {
            "technical" => Some(Category::Technical),
            "communication" => Some(Category::Communication),
            "both" => Some(Category::Both),
            _ => None,
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One logged interview interaction. Field order is the on-disk column order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InterviewRecord {
    pub timestamp: String,
    pub role: String,
    pub question: String,
    pub answer: String,
    pub feedback: String,
    pub score: String,
    pub category: Category,
}

impl InterviewRecord {
    /// Builds a record stamped with the current local time.
    pub fn new(
        role: impl Into<String>,
        question: impl Into<String>,
        answer: impl Into<String>,
        feedback: impl Into<String>,
        score: impl Into<String>,
        category: Category,
    ) -> Self {
        Self {
            timestamp: Local::now().format(TIMESTAMP_FORMAT).to_string(),
            role: role.into(),
            question: question.into(),
            answer: answer.into(),
            feedback: feedback.into(),
            score: score.into(),
            category,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_serde_uses_display_strings() {
        assert_eq!(serde_json::to_string(&Category::Both).unwrap(), r#""Both""#);
        assert_eq!(
            serde_json::to_string(&Category::NotAvailable).unwrap(),
            r#""N/A""#
        );
        let parsed: Category = serde_json::from_str(r#""N/A""#).unwrap();
        assert_eq!(parsed, Category::NotAvailable);
    }

    #[test]
    fn test_category_from_word_is_case_insensitive() {
        assert_eq!(Category::from_word("BOTH"), Some(Category::Both));
        assert_eq!(Category::from_word("technical"), Some(Category::Technical));
        assert_eq!(Category::from_word("Leadership"), None);
    }

    #[test]
    fn test_category_default_is_sentinel() {
        assert_eq!(Category::default().to_string(), NOT_AVAILABLE);
    }

    #[test]
    fn test_new_record_timestamp_format() {
        let record = InterviewRecord::new("custom", "Q", "A", "F", "7/10", Category::Technical);
        assert!(
            chrono::NaiveDateTime::parse_from_str(&record.timestamp, TIMESTAMP_FORMAT).is_ok(),
            "bad timestamp {}",
            record.timestamp
        );
    }
}
