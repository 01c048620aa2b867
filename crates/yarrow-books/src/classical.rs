//! The built-in classical text.
//!
//! A complete 64-entry dataset embedded in the binary, parsed once per
//! process. It is the terminal content source: whatever happens to the
//! book stores, a reading can always fall back to this text — or, if an
//! entry is somehow absent, to a synthetic placeholder.

use std::collections::BTreeMap;
use std::sync::OnceLock;

use crate::book::{Book, BookSource, BookSummary};
use crate::content::{HexagramContent, Trigram, TrigramPair};

/// Fixed id of the classical fallback book.
pub const CLASSICAL_BOOK_ID: &str = "classical";

const CLASSICAL_JSON: &str = include_str!("../assets/classical.json");

/// The classical text as a [`Book`], parsed on first use.
pub fn classical_book() -> &'static Book {
    static BOOK: OnceLock<Book> = OnceLock::new();
    BOOK.get_or_init(|| {
        let entries: Vec<HexagramContent> =
            serde_json::from_str(CLASSICAL_JSON).unwrap_or_default();
        let mut hexagrams = BTreeMap::new();
        for entry in entries {
            hexagrams.insert(entry.number, entry);
        }
        Book {
            id: CLASSICAL_BOOK_ID.to_string(),
            name: "The Classical Text".to_string(),
            creator: "tradition".to_string(),
            source: BookSource::Fallback,
            hexagrams,
        }
    })
}

/// Classical content for a hexagram number, if present in the dataset.
pub fn classical_content(number: u32) -> Option<&'static HexagramContent> {
    classical_book().content(number)
}

/// The synthetic listing entry surfaced when no real book is available.
pub fn classical_summary() -> BookSummary {
    BookSummary {
        id: CLASSICAL_BOOK_ID.to_string(),
        name: classical_book().name.clone(),
        source: BookSource::Fallback,
        creator: classical_book().creator.clone(),
        hexagram_count: classical_book().hexagrams.len() as u32,
        created_at: chrono::DateTime::UNIX_EPOCH,
        cover_url: None,
    }
}

/// Synthetic "content pending" entry; the last link of the fallback chain.
pub fn placeholder_content(number: u32) -> HexagramContent {
    HexagramContent {
        number,
        chinese: String::new(),
        pinyin: String::new(),
        english: format!("Hexagram {number}"),
        judgment: "Content pending.".to_string(),
        image: String::new(),
        lines: std::array::from_fn(|_| "?".to_string()),
        meaning: "The text for this hexagram is not available yet.".to_string(),
        trigrams: TrigramPair {
            lower: Trigram {
                name: "?".to_string(),
                chinese: String::new(),
            },
            upper: Trigram {
                name: "?".to_string(),
                chinese: String::new(),
            },
        },
    }
}
