//! Books: named collections of hexagram interpretations.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::content::HexagramContent;

/// Where a book comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BookSource {
    /// Authored by the requesting user, not yet published.
    User,
    /// Published to the community catalog.
    Community,
    /// The built-in classical text.
    Fallback,
}

impl std::fmt::Display for BookSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::User => write!(f, "user"),
            Self::Community => write!(f, "community"),
            Self::Fallback => write!(f, "fallback"),
        }
    }
}

/// A book as it appears in a listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookSummary {
    /// Stable book id.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Which shelf this book sits on.
    pub source: BookSource,
    /// Author attribution.
    pub creator: String,
    /// How many of the 64 hexagrams this book covers.
    pub hexagram_count: u32,
    /// When the book was created.
    pub created_at: DateTime<Utc>,
    /// Optional cover image.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cover_url: Option<String>,
}

/// A book with its full content set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Book {
    /// Stable book id.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Author attribution.
    pub creator: String,
    /// Which shelf this book sits on.
    pub source: BookSource,
    /// Interpretations keyed by King Wen number. Up to 64 entries; sparse
    /// books are valid and fall through to the classical text per entry.
    pub hexagrams: BTreeMap<u32, HexagramContent>,
}

impl Book {
    /// Content for a hexagram number, if this book covers it.
    pub fn content(&self, number: u32) -> Option<&HexagramContent> {
        self.hexagrams.get(&number)
    }

    /// Listing summary for this book.
    pub fn summary(&self, created_at: DateTime<Utc>) -> BookSummary {
        BookSummary {
            id: self.id.clone(),
            name: self.name.clone(),
            source: self.source,
            creator: self.creator.clone(),
            hexagram_count: self.hexagrams.len() as u32,
            created_at,
            cover_url: None,
        }
    }
}
