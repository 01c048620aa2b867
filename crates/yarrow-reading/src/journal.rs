//! The session reading log.
//!
//! An append-only record of casts and notes for one journaling session,
//! exportable as markdown or plain text. Durable storage of individual
//! readings belongs to the caller; the log is the in-session view.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::reading::Reading;

/// A single entry in the reading log.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum LogEntry {
    /// A cast reading, summarized.
    Cast {
        /// The question asked.
        question: String,
        /// Primary hexagram number.
        primary_number: u32,
        /// Primary hexagram name.
        primary_name: String,
        /// Transformed hexagram number, if any line changed.
        transformed_number: Option<u32>,
        /// Transformed hexagram name, if any line changed.
        transformed_name: Option<String>,
        /// Positions of the changing lines.
        changing_positions: Vec<u32>,
        /// Name of the book that supplied the content.
        book_name: String,
        /// When the reading was cast.
        timestamp: DateTime<Utc>,
    },
    /// A free-form reflection.
    Note {
        /// The note text.
        text: String,
        /// When recorded.
        timestamp: DateTime<Utc>,
    },
}

/// A chronological log of session readings and notes.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReadingLog {
    entries: Vec<LogEntry>,
}

impl ReadingLog {
    /// Create an empty log.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a cast reading.
    pub fn append_reading(&mut self, reading: &Reading) {
        self.entries.push(LogEntry::Cast {
            question: reading.question.clone(),
            primary_number: reading.primary.number,
            primary_name: reading.primary.content.english.clone(),
            transformed_number: reading.transformed.as_ref().map(|t| t.number),
            transformed_name: reading
                .transformed
                .as_ref()
                .map(|t| t.content.english.clone()),
            changing_positions: reading.changing_positions.clone(),
            book_name: reading.attribution.book_name.clone(),
            timestamp: reading.cast_at,
        });
    }

    /// Record a free-form note.
    pub fn note(&mut self, text: impl Into<String>) {
        self.entries.push(LogEntry::Note {
            text: text.into(),
            timestamp: Utc::now(),
        });
    }

    /// All entries, oldest first.
    pub fn entries(&self) -> &[LogEntry] {
        &self.entries
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the log is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Export the log as markdown.
    pub fn export_markdown(&self) -> String {
        let mut out = String::from("# Reading Journal\n\n");
        for entry in &self.entries {
            match entry {
                LogEntry::Cast {
                    question,
                    primary_number,
                    primary_name,
                    transformed_number,
                    transformed_name,
                    changing_positions,
                    book_name,
                    ..
                } => {
                    out.push_str(&format!("## {primary_number}. {primary_name}\n\n"));
                    out.push_str(&format!("**Question**: {question}\n"));
                    if let (Some(number), Some(name)) = (transformed_number, transformed_name) {
                        let positions: Vec<String> =
                            changing_positions.iter().map(|p| p.to_string()).collect();
                        out.push_str(&format!(
                            "**Changing to**: {number}. {name} (lines {})\n",
                            positions.join(", ")
                        ));
                    }
                    out.push_str(&format!("**Book**: {book_name}\n\n"));
                }
                LogEntry::Note { text, .. } => {
                    out.push_str(&format!("> {text}\n\n"));
                }
            }
        }
        out
    }

    /// Export the log as plain text.
    pub fn export_text(&self) -> String {
        let mut out = String::from("Reading Journal\n===============\n\n");
        for entry in &self.entries {
            match entry {
                LogEntry::Cast {
                    question,
                    primary_number,
                    primary_name,
                    transformed_number,
                    transformed_name,
                    changing_positions,
                    book_name,
                    ..
                } => {
                    out.push_str(&format!("Reading: {primary_number}. {primary_name}\n"));
                    out.push_str(&format!("  Question: {question}\n"));
                    if let (Some(number), Some(name)) = (transformed_number, transformed_name) {
                        let positions: Vec<String> =
                            changing_positions.iter().map(|p| p.to_string()).collect();
                        out.push_str(&format!(
                            "  Changing to: {number}. {name} (lines {})\n",
                            positions.join(", ")
                        ));
                    }
                    out.push_str(&format!("  Book: {book_name}\n\n"));
                }
                LogEntry::Note { text, .. } => {
                    out.push_str(&format!("Note: {text}\n\n"));
                }
            }
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reading::CastHexagram;
    use uuid::Uuid;
    use yarrow_books::{Attribution, BookSource, classical_content};

    fn sample_reading(transformed: bool) -> Reading {
        let lines: [yarrow_cast::Line; 6] =
            std::array::from_fn(|i| yarrow_cast::Line::from_raw(i as u32 + 1, 7).unwrap());
        Reading {
            id: Uuid::new_v4(),
            question: "What needs attention?".to_string(),
            lines,
            primary: CastHexagram {
                number: 1,
                pattern: "111111".to_string(),
                content: classical_content(1).unwrap().clone(),
            },
            changing_positions: if transformed { vec![3] } else { Vec::new() },
            transformed: transformed.then(|| CastHexagram {
                number: 10,
                pattern: "110111".to_string(),
                content: classical_content(10).unwrap().clone(),
            }),
            cast_at: Utc::now(),
            attribution: Attribution {
                book_id: "classical".to_string(),
                book_name: "The Classical Text".to_string(),
                source: BookSource::Fallback,
            },
        }
    }

    #[test]
    fn empty_log() {
        let log = ReadingLog::new();
        assert!(log.is_empty());
        assert_eq!(log.len(), 0);
    }

    #[test]
    fn append_and_export_markdown() {
        let mut log = ReadingLog::new();
        log.append_reading(&sample_reading(false));
        log.note("Felt right.");
        let md = log.export_markdown();
        assert!(md.contains("# Reading Journal"));
        assert!(md.contains("## 1. The Creative"));
        assert!(md.contains("**Question**: What needs attention?"));
        assert!(md.contains("> Felt right."));
        assert!(!md.contains("Changing to"));
    }

    #[test]
    fn markdown_includes_transformation() {
        let mut log = ReadingLog::new();
        log.append_reading(&sample_reading(true));
        let md = log.export_markdown();
        assert!(md.contains("**Changing to**: 10. Treading (lines 3)"));
    }

    #[test]
    fn export_text_shapes() {
        let mut log = ReadingLog::new();
        log.append_reading(&sample_reading(true));
        log.note("A second thought.");
        let txt = log.export_text();
        assert!(txt.contains("Reading: 1. The Creative"));
        assert!(txt.contains("  Changing to: 10. Treading (lines 3)"));
        assert!(txt.contains("Note: A second thought."));
    }

    #[test]
    fn serde_roundtrip() {
        let mut log = ReadingLog::new();
        log.append_reading(&sample_reading(false));
        log.note("test");
        let json = serde_json::to_string(&log).unwrap();
        let back: ReadingLog = serde_json::from_str(&json).unwrap();
        assert_eq!(back.len(), 2);
    }
}
