//! Casting sessions.
//!
//! A `ReadingSession` carries everything a cast needs — the resolver, the
//! coin source, the requesting user, and the active book selection — as an
//! explicit value, so several sessions can coexist in one process without
//! shared ambient state.

use std::sync::Arc;

use chrono::Utc;
use tracing::warn;
use uuid::Uuid;

use yarrow_books::{BookResolver, BookSummary};
use yarrow_cast::{
    CoinSource, EntropyCoins, Line, LinePattern, king_wen_number, pattern_of, toss_three_coins,
    transformed_pattern,
};

use crate::error::{ReadingError, ReadingResult};
use crate::reading::{CastHexagram, Reading, StoredReading};

/// Configuration for a reading session.
#[derive(Debug, Clone, Default)]
pub struct SessionConfig {
    /// The requesting user, if signed in.
    pub user_id: Option<String>,
    /// A previously selected book to restore, if any.
    pub book_id: Option<String>,
}

impl SessionConfig {
    /// Set the requesting user.
    pub fn with_user(mut self, user_id: impl Into<String>) -> Self {
        self.user_id = Some(user_id.into());
        self
    }

    /// Restore a previous book selection.
    pub fn with_book(mut self, book_id: impl Into<String>) -> Self {
        self.book_id = Some(book_id.into());
        self
    }
}

/// An interactive casting session for one user.
pub struct ReadingSession {
    resolver: Arc<BookResolver>,
    coins: Box<dyn CoinSource + Send>,
    user_id: Option<String>,
    active_book: Option<String>,
}

impl ReadingSession {
    /// Open a session, selecting the active book by the default policy:
    /// the restored selection if it still exists, else the user's own
    /// newest book, else the first community book, else whatever is listed.
    pub async fn open(resolver: Arc<BookResolver>, config: SessionConfig) -> Self {
        let books = resolver.list_books(config.user_id.as_deref()).await;
        let active_book = BookResolver::choose_default(&books, config.book_id.as_deref());
        Self {
            resolver,
            coins: Box::new(EntropyCoins::new()),
            user_id: config.user_id,
            active_book,
        }
    }

    /// Replace the coin source; tests script exact casts through this.
    pub fn with_coins(mut self, coins: Box<dyn CoinSource + Send>) -> Self {
        self.coins = coins;
        self
    }

    /// The currently selected book, if any.
    pub fn active_book(&self) -> Option<&str> {
        self.active_book.as_deref()
    }

    /// Select a book for subsequent casts and reconstructions.
    pub fn select_book(&mut self, book_id: impl Into<String>) {
        self.active_book = Some(book_id.into());
    }

    /// Re-list the available books and repair a stale selection.
    ///
    /// A selection that no longer appears in the listing falls back to the
    /// default policy; that is a recoverable inconsistency, not an error.
    pub async fn refresh_books(&mut self) -> Vec<BookSummary> {
        let books = self.resolver.list_books(self.user_id.as_deref()).await;
        if let Some(current) = &self.active_book
            && !books.iter().any(|b| &b.id == current)
        {
            let fallback = BookResolver::choose_default(&books, None);
            warn!(
                stale = %current,
                fallback = fallback.as_deref().unwrap_or("none"),
                "selected book vanished from listing, falling back"
            );
            self.active_book = fallback;
        }
        books
    }

    /// Cast a reading for a question.
    ///
    /// Six independent three-coin tosses resolve the lines; the pattern
    /// resolves the primary hexagram; changing lines, if any, resolve the
    /// transformed hexagram. Content comes from the active book through the
    /// resolver's fallback chain, so the only failure mode is an empty
    /// question — a cast never half-completes.
    pub async fn cast(&mut self, question: &str) -> ReadingResult<Reading> {
        let question = question.trim();
        if question.is_empty() {
            return Err(ReadingError::EmptyQuestion);
        }

        let lines: [Line; 6] = std::array::from_fn(|i| {
            let toss = toss_three_coins(self.coins.as_mut());
            Line::from_toss(i as u32 + 1, &toss)
        });

        self.assemble(question.to_string(), lines, Utc::now()).await
    }

    /// Rebuild a previously persisted reading.
    ///
    /// Line polarity and changing flags are re-derived from the stored sums;
    /// the hexagram numbers are taken from the record as-is (structural
    /// facts do not change). Content and attribution are resolved against
    /// the *currently* active book, so redisplay picks up content revisions
    /// while the structure stays byte-for-byte stable.
    pub async fn reconstruct(&self, stored: &StoredReading) -> ReadingResult<Reading> {
        if stored.lines.len() != 6 {
            return Err(ReadingError::WrongLineCount(stored.lines.len()));
        }
        let mut slots: [Option<Line>; 6] = [None; 6];
        for record in &stored.lines {
            let line = Line::from_raw(record.position, record.sum)?;
            let slot = (line.position - 1) as usize;
            if slots[slot].is_some() {
                return Err(ReadingError::BadPositions);
            }
            slots[slot] = Some(line);
        }
        // Six records with distinct valid positions fill every slot.
        let lines = slots.map(|slot| match slot {
            Some(line) => line,
            None => unreachable!("six distinct positions fill all slots"),
        });

        let primary_number = stored.primary_number;
        let primary_pattern = pattern_of(primary_number)?;
        let transformed = match stored.transformed_number {
            Some(number) => Some((number, pattern_of(number)?)),
            None => None,
        };

        let primary_resolved = self
            .resolver
            .content_for(self.active_book.as_deref(), primary_number)
            .await;
        let mut reading = Reading {
            id: Uuid::new_v4(),
            question: stored.question.clone(),
            lines,
            primary: CastHexagram {
                number: primary_number,
                pattern: primary_pattern.as_bits(),
                content: primary_resolved.content,
            },
            changing_positions: stored.changing_positions.clone(),
            transformed: None,
            cast_at: stored.cast_at,
            attribution: primary_resolved.attribution,
        };
        if let Some((number, pattern)) = transformed {
            let resolved = self
                .resolver
                .content_for(self.active_book.as_deref(), number)
                .await;
            reading.transformed = Some(CastHexagram {
                number,
                pattern: pattern.as_bits(),
                content: resolved.content,
            });
        }
        Ok(reading)
    }

    async fn assemble(
        &self,
        question: String,
        lines: [Line; 6],
        cast_at: chrono::DateTime<Utc>,
    ) -> ReadingResult<Reading> {
        let primary_pattern = LinePattern::from_lines(&lines);
        let primary_number = king_wen_number(&primary_pattern);
        let changing_positions: Vec<u32> = lines
            .iter()
            .filter(|l| l.changing)
            .map(|l| l.position)
            .collect();

        let primary_resolved = self
            .resolver
            .content_for(self.active_book.as_deref(), primary_number)
            .await;

        let transformed = match transformed_pattern(&lines) {
            Some(pattern) => {
                let number = king_wen_number(&pattern);
                let resolved = self
                    .resolver
                    .content_for(self.active_book.as_deref(), number)
                    .await;
                Some(CastHexagram {
                    number,
                    pattern: pattern.as_bits(),
                    content: resolved.content,
                })
            }
            None => None,
        };

        Ok(Reading {
            id: Uuid::new_v4(),
            question,
            lines,
            primary: CastHexagram {
                number: primary_number,
                pattern: primary_pattern.as_bits(),
                content: primary_resolved.content,
            },
            changing_positions,
            transformed,
            cast_at,
            attribution: primary_resolved.attribution,
        })
    }
}
