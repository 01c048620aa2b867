//! Book listing, fetching, and content resolution.
//!
//! The resolver sits between the casting engine and the backing stores.
//! Its one guarantee: a caller always gets *something* renderable. Store
//! failures degrade through the chain cache → published store → draft
//! store → classical text → placeholder; they never propagate.

use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, warn};

use crate::book::{Book, BookSource, BookSummary};
use crate::cache::{Clock, SystemClock, TtlCache};
use crate::classical::{
    CLASSICAL_BOOK_ID, classical_book, classical_content, classical_summary, placeholder_content,
};
use crate::content::HexagramContent;
use crate::store::{DraftBookStore, PublishedBookStore};

/// Cache lifetimes for the resolver.
#[derive(Debug, Clone)]
pub struct ResolverConfig {
    /// TTL for per-user book listings.
    pub list_ttl: Duration,
    /// TTL for single-book content.
    pub content_ttl: Duration,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            list_ttl: Duration::from_secs(60),
            content_ttl: Duration::from_secs(300),
        }
    }
}

/// Which book supplied a piece of resolved content.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Attribution {
    /// Id of the supplying book.
    pub book_id: String,
    /// Name of the supplying book.
    pub book_name: String,
    /// The book's shelf.
    pub source: BookSource,
}

/// Content plus the attribution of the book that supplied it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedContent {
    /// The interpretive content.
    pub content: HexagramContent,
    /// Who supplied it.
    pub attribution: Attribution,
}

/// Resolves books and hexagram content from the layered sources.
pub struct BookResolver {
    published: Arc<dyn PublishedBookStore>,
    drafts: Arc<dyn DraftBookStore>,
    list_cache: TtlCache<String, Vec<BookSummary>>,
    book_cache: TtlCache<String, Arc<Book>>,
}

impl BookResolver {
    /// Create a resolver over the two backing stores.
    pub fn new(
        published: Arc<dyn PublishedBookStore>,
        drafts: Arc<dyn DraftBookStore>,
        config: ResolverConfig,
    ) -> Self {
        Self::with_clock(published, drafts, config, Arc::new(SystemClock))
    }

    /// Create a resolver with an explicit cache clock; for tests.
    pub fn with_clock(
        published: Arc<dyn PublishedBookStore>,
        drafts: Arc<dyn DraftBookStore>,
        config: ResolverConfig,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            published,
            drafts,
            list_cache: TtlCache::with_clock(config.list_ttl, clock.clone()),
            book_cache: TtlCache::with_clock(config.content_ttl, clock),
        }
    }

    /// List the books available to a user, most relevant first.
    ///
    /// User-authored books come first, newest first; community books
    /// follow, oldest first, so the long-standing canonical community text
    /// surfaces ahead of newer forks. The synthetic classical entry appears
    /// only when the merge would otherwise be empty. Results are cached per
    /// requesting user; a hit skips both store calls.
    pub async fn list_books(&self, user_id: Option<&str>) -> Vec<BookSummary> {
        let key = user_id.unwrap_or_default().to_string();
        if let Some(list) = self.list_cache.get(&key).await {
            debug!(user = %key, "book listing served from cache");
            return list;
        }

        let (mut user_books, mut community) = tokio::join!(
            self.fetch_user_summaries(user_id),
            self.fetch_community_summaries()
        );
        user_books.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        community.sort_by(|a, b| a.created_at.cmp(&b.created_at));

        let mut merged = user_books;
        merged.append(&mut community);
        if merged.is_empty() {
            merged.push(classical_summary());
        }

        self.list_cache.insert(key, merged.clone()).await;
        merged
    }

    async fn fetch_user_summaries(&self, user_id: Option<&str>) -> Vec<BookSummary> {
        let Some(user_id) = user_id else {
            return Vec::new();
        };
        match self.drafts.list_for_user(user_id).await {
            Ok(mut books) => {
                for book in &mut books {
                    book.source = BookSource::User;
                }
                books
            }
            Err(error) => {
                warn!(%error, user = %user_id, "draft listing failed, treating as empty");
                Vec::new()
            }
        }
    }

    async fn fetch_community_summaries(&self) -> Vec<BookSummary> {
        match self.published.list_published().await {
            Ok(mut books) => {
                for book in &mut books {
                    book.source = BookSource::Community;
                }
                books
            }
            Err(error) => {
                warn!(%error, "community listing failed, treating as empty");
                Vec::new()
            }
        }
    }

    /// Fetch a book's full content, never failing.
    ///
    /// Chain: cache → published store → draft store → classical text →
    /// synthetic placeholder book. Only real fetches populate the cache, so
    /// a placeholder served during an outage is retried next call.
    pub async fn fetch_book(&self, book_id: &str) -> Arc<Book> {
        let key = book_id.to_string();
        if let Some(book) = self.book_cache.get(&key).await {
            debug!(book_id, "book served from cache");
            return book;
        }

        match self.published.fetch_book(book_id).await {
            Ok(raw) => {
                let book = Arc::new(raw.normalize(BookSource::Community));
                self.book_cache.insert(key, book.clone()).await;
                return book;
            }
            Err(error) => debug!(%error, book_id, "not in published store"),
        }

        match self.drafts.fetch_book(book_id).await {
            Ok(raw) => {
                let book = Arc::new(raw.normalize(BookSource::User));
                self.book_cache.insert(key, book.clone()).await;
                return book;
            }
            Err(error) => debug!(%error, book_id, "not in draft store"),
        }

        if book_id == CLASSICAL_BOOK_ID {
            let book = Arc::new(classical_book().clone());
            self.book_cache.insert(key, book.clone()).await;
            return book;
        }

        warn!(book_id, "book unavailable from every source, serving placeholder");
        Arc::new(Book {
            id: book_id.to_string(),
            name: "Unavailable book".to_string(),
            creator: String::new(),
            source: BookSource::Fallback,
            hexagrams: Default::default(),
        })
    }

    /// Resolve content for one hexagram from the selected book.
    ///
    /// With no selection the classical text answers directly. A selected
    /// book that lacks the entry falls through to the classical text, then
    /// to the placeholder; the attribution always names the book that
    /// actually supplied the text.
    pub async fn content_for(&self, book_id: Option<&str>, number: u32) -> ResolvedContent {
        let Some(book_id) = book_id else {
            return Self::classical_resolved(number);
        };

        let book = self.fetch_book(book_id).await;
        if let Some(content) = book.content(number) {
            return ResolvedContent {
                content: content.clone(),
                attribution: Attribution {
                    book_id: book.id.clone(),
                    book_name: book.name.clone(),
                    source: book.source,
                },
            };
        }

        debug!(book_id, number, "entry missing from selected book, using classical text");
        Self::classical_resolved(number)
    }

    fn classical_resolved(number: u32) -> ResolvedContent {
        let classical = classical_book();
        let content = classical_content(number)
            .cloned()
            .unwrap_or_else(|| placeholder_content(number));
        ResolvedContent {
            content,
            attribution: Attribution {
                book_id: classical.id.clone(),
                book_name: classical.name.clone(),
                source: BookSource::Fallback,
            },
        }
    }

    /// Default book selection policy.
    ///
    /// The prior selection wins while it still exists; otherwise the user's
    /// own newest book, then the first community book, then the first book
    /// of any kind, then nothing. On a canonically-ordered listing this is
    /// the head of the list, so the long-standing community text is the
    /// default exactly when the user has authored nothing.
    pub fn choose_default(books: &[BookSummary], prior: Option<&str>) -> Option<String> {
        if let Some(prior) = prior
            && books.iter().any(|b| b.id == prior)
        {
            return Some(prior.to_string());
        }
        books
            .iter()
            .find(|b| b.source == BookSource::User)
            .or_else(|| books.iter().find(|b| b.source == BookSource::Community))
            .or_else(|| books.first())
            .map(|b| b.id.clone())
    }

    /// Drop a cached book after a publish or fork.
    pub async fn invalidate_book(&self, book_id: &str) {
        self.book_cache.invalidate(&book_id.to_string()).await;
    }

    /// Drop a cached listing after a publish or fork.
    pub async fn invalidate_list(&self, user_id: Option<&str>) {
        self.list_cache
            .invalidate(&user_id.unwrap_or_default().to_string())
            .await;
    }
}
