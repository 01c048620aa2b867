//! Backing stores for book data.
//!
//! Two stores exist: the external read API serving community-published
//! books and the per-user record store holding authored-but-unpublished
//! drafts. Both return *raw* book shapes; normalization happens in the
//! resolver. [`MemoryBookStore`] implements both traits for tests and
//! local use.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::book::{Book, BookSummary};
use crate::error::StoreError;
use crate::normalize::RawBook;

/// The external read API for community-published books.
#[async_trait]
pub trait PublishedBookStore: Send + Sync {
    /// List all published books.
    async fn list_published(&self) -> Result<Vec<BookSummary>, StoreError>;

    /// Fetch a published book's full content.
    async fn fetch_book(&self, book_id: &str) -> Result<RawBook, StoreError>;
}

/// The per-user record store for unpublished drafts.
#[async_trait]
pub trait DraftBookStore: Send + Sync {
    /// List books authored by a user.
    async fn list_for_user(&self, user_id: &str) -> Result<Vec<BookSummary>, StoreError>;

    /// Fetch a draft book's full content.
    async fn fetch_book(&self, book_id: &str) -> Result<RawBook, StoreError>;
}

struct StoredBook {
    summary: BookSummary,
    raw: serde_json::Value,
    owner: Option<String>,
}

/// An in-memory store implementing both backing traits.
///
/// Books are held as raw JSON so tests can exercise every historical
/// content shape; [`MemoryBookStore::insert_book`] covers the common case
/// of a canonical book. The store can be switched into an outage state to
/// test the fallback chain.
#[derive(Default)]
pub struct MemoryBookStore {
    books: Mutex<HashMap<String, StoredBook>>,
    offline: Mutex<bool>,
}

impl MemoryBookStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a canonical book. `owner` is `None` for published books.
    pub fn insert_book(&self, book: &Book, owner: Option<&str>, created_at: DateTime<Utc>) {
        let raw = serde_json::json!({
            "id": book.id,
            "name": book.name,
            "creator": book.creator,
            "hexagrams": book.hexagrams.values().collect::<Vec<_>>(),
        });
        self.insert_raw(book.summary(created_at), raw, owner);
    }

    /// Add a book in an arbitrary stored shape.
    pub fn insert_raw(&self, summary: BookSummary, raw: serde_json::Value, owner: Option<&str>) {
        let mut books = self.books.lock().unwrap_or_else(|e| e.into_inner());
        books.insert(
            summary.id.clone(),
            StoredBook {
                summary,
                raw,
                owner: owner.map(str::to_string),
            },
        );
    }

    /// Simulate a backend outage: every call fails until restored.
    pub fn set_offline(&self, offline: bool) {
        *self.offline.lock().unwrap_or_else(|e| e.into_inner()) = offline;
    }

    fn check_online(&self) -> Result<(), StoreError> {
        if *self.offline.lock().unwrap_or_else(|e| e.into_inner()) {
            Err(StoreError::Unavailable("store offline".to_string()))
        } else {
            Ok(())
        }
    }

    fn fetch(&self, book_id: &str, want_owner: bool) -> Result<RawBook, StoreError> {
        self.check_online()?;
        let books = self.books.lock().unwrap_or_else(|e| e.into_inner());
        let stored = books
            .get(book_id)
            .filter(|b| b.owner.is_some() == want_owner)
            .ok_or_else(|| StoreError::NotFound(book_id.to_string()))?;
        serde_json::from_value(stored.raw.clone())
            .map_err(|e| StoreError::Unavailable(e.to_string()))
    }
}

#[async_trait]
impl PublishedBookStore for MemoryBookStore {
    async fn list_published(&self) -> Result<Vec<BookSummary>, StoreError> {
        self.check_online()?;
        let books = self.books.lock().unwrap_or_else(|e| e.into_inner());
        Ok(books
            .values()
            .filter(|b| b.owner.is_none())
            .map(|b| b.summary.clone())
            .collect())
    }

    async fn fetch_book(&self, book_id: &str) -> Result<RawBook, StoreError> {
        self.fetch(book_id, false)
    }
}

#[async_trait]
impl DraftBookStore for MemoryBookStore {
    async fn list_for_user(&self, user_id: &str) -> Result<Vec<BookSummary>, StoreError> {
        self.check_online()?;
        let books = self.books.lock().unwrap_or_else(|e| e.into_inner());
        Ok(books
            .values()
            .filter(|b| b.owner.as_deref() == Some(user_id))
            .map(|b| b.summary.clone())
            .collect())
    }

    async fn fetch_book(&self, book_id: &str) -> Result<RawBook, StoreError> {
        self.fetch(book_id, true)
    }
}
