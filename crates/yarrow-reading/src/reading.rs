//! The reading produced by a cast and its persisted form.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use yarrow_books::{Attribution, HexagramContent};
use yarrow_cast::Line;

/// One hexagram of a reading: its structural identity plus the content the
/// active book supplied for it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CastHexagram {
    /// King Wen number, 1-64.
    pub number: u32,
    /// The line pattern as a bit string, bottom line first.
    pub pattern: String,
    /// Interpretive content from the attributed book.
    pub content: HexagramContent,
}

/// A complete reading for one question.
///
/// Immutable once assembled; JSON-serializable with no circular references,
/// so it can be stored as a document and later rebuilt through
/// [`crate::ReadingSession::reconstruct`] from [`Reading::to_stored`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reading {
    /// Id of this materialization of the reading.
    ///
    /// Assigned fresh each time the reading is assembled; the stored record
    /// carries no id of its own — persistence keys belong to the caller.
    pub id: Uuid,
    /// The question asked.
    pub question: String,
    /// The six cast lines, bottom to top.
    pub lines: [Line; 6],
    /// The hexagram as cast.
    pub primary: CastHexagram,
    /// Positions (1-6) of the changing lines.
    pub changing_positions: Vec<u32>,
    /// The hexagram after changing lines flip; `None` for a stable reading.
    pub transformed: Option<CastHexagram>,
    /// When the reading was cast.
    pub cast_at: DateTime<Utc>,
    /// Which book supplied the primary content.
    pub attribution: Attribution,
}

impl Reading {
    /// The persisted form of this reading: raw values only, no content.
    pub fn to_stored(&self) -> StoredReading {
        StoredReading {
            question: self.question.clone(),
            lines: self.lines.iter().map(StoredLine::from_line).collect(),
            primary_number: self.primary.number,
            transformed_number: self.transformed.as_ref().map(|t| t.number),
            changing_positions: self.changing_positions.clone(),
            cast_at: self.cast_at,
        }
    }

    /// Whether any line is changing.
    pub fn has_changes(&self) -> bool {
        !self.changing_positions.is_empty()
    }
}

/// One line as persisted.
///
/// Polarity and the changing flag are stored for the rendering layer's
/// convenience, but reconstruction re-derives both from the sum so the
/// structural invariants cannot drift from what is displayed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredLine {
    /// Position 1-6, bottom to top.
    pub position: u32,
    /// The toss sum, 6-9.
    pub sum: u32,
    /// Polarity as originally resolved.
    pub kind: yarrow_cast::LineKind,
    /// Changing flag as originally resolved.
    pub changing: bool,
}

impl StoredLine {
    fn from_line(line: &Line) -> Self {
        Self {
            position: line.position,
            sum: line.sum,
            kind: line.kind,
            changing: line.changing,
        }
    }
}

/// The raw values a persisted reading is rebuilt from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredReading {
    /// The question asked.
    pub question: String,
    /// The six raw line records.
    pub lines: Vec<StoredLine>,
    /// Primary hexagram number.
    pub primary_number: u32,
    /// Transformed hexagram number, if any line changed.
    pub transformed_number: Option<u32>,
    /// Positions of the changing lines.
    pub changing_positions: Vec<u32>,
    /// Original cast timestamp.
    pub cast_at: DateTime<Utc>,
}
