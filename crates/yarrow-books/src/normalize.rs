//! Normalization of heterogeneous stored content shapes.
//!
//! Book content has been produced by several generations of authoring
//! tools, so line texts and trigrams arrive in a small closed set of
//! shapes. Each variant has one normalizer; [`RawHexagram::normalize`]
//! dispatches. Unknown or missing pieces fall back to `"?"` (line text)
//! or the empty string (trigram chinese) — never an error.

use std::collections::BTreeMap;

use serde::Deserialize;

use crate::book::{Book, BookSource};
use crate::content::{HexagramContent, Trigram, TrigramPair};

/// Placeholder for a line text no shape could recover.
pub const LINE_PLACEHOLDER: &str = "?";

/// Per-line text in any of its historical shapes.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum RawLineEntry {
    /// A bare string.
    Text(String),
    /// A nested object with one of several text field names.
    Nested(RawLineObject),
}

/// The nested line-object shape; field names vary by authoring-tool era.
#[derive(Debug, Clone, Deserialize)]
pub struct RawLineObject {
    /// Current field name.
    #[serde(default)]
    pub text: Option<String>,
    /// Older field name.
    #[serde(default)]
    pub meaning: Option<String>,
    /// Oldest field name.
    #[serde(default)]
    pub commentary: Option<String>,
}

impl RawLineEntry {
    fn into_text(self) -> String {
        match self {
            Self::Text(s) => s,
            Self::Nested(obj) => obj
                .text
                .or(obj.meaning)
                .or(obj.commentary)
                .unwrap_or_else(|| LINE_PLACEHOLDER.to_string()),
        }
    }
}

/// The line collection in any of its historical shapes.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum RawLines {
    /// An ordered array, bottom line first.
    List(Vec<RawLineEntry>),
    /// An object keyed by line number: `"1"`-`"6"` or `"line1"`-`"line6"`.
    Keyed(BTreeMap<String, RawLineEntry>),
}

/// Recover the six line texts from a list shape.
fn normalize_line_list(entries: Vec<RawLineEntry>) -> [String; 6] {
    let mut texts = entries.into_iter().map(RawLineEntry::into_text);
    std::array::from_fn(|_| texts.next().unwrap_or_else(|| LINE_PLACEHOLDER.to_string()))
}

/// Recover the six line texts from a keyed shape.
fn normalize_line_map(mut entries: BTreeMap<String, RawLineEntry>) -> [String; 6] {
    std::array::from_fn(|i| {
        let position = i + 1;
        let bare = position.to_string();
        let prefixed = format!("line{position}");
        entries
            .remove(&bare)
            .or_else(|| entries.remove(&prefixed))
            .map(RawLineEntry::into_text)
            .unwrap_or_else(|| LINE_PLACEHOLDER.to_string())
    })
}

/// Dispatch over the line-collection variants.
fn normalize_lines(raw: Option<RawLines>) -> [String; 6] {
    match raw {
        Some(RawLines::List(entries)) => normalize_line_list(entries),
        Some(RawLines::Keyed(entries)) => normalize_line_map(entries),
        None => std::array::from_fn(|_| LINE_PLACEHOLDER.to_string()),
    }
}

/// A trigram in either of its historical shapes.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum RawTrigram {
    /// A bare name string.
    Name(String),
    /// A `{name, chinese}` object.
    Detailed {
        /// English name.
        name: String,
        /// Chinese name.
        #[serde(default)]
        chinese: String,
    },
}

impl RawTrigram {
    fn into_trigram(self) -> Trigram {
        match self {
            Self::Name(name) => Trigram {
                name,
                chinese: String::new(),
            },
            Self::Detailed { name, chinese } => Trigram { name, chinese },
        }
    }
}

/// The trigram pair in either of its historical shapes.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum RawTrigramPair {
    /// A `{lower, upper}` object.
    Pair {
        /// Lower trigram.
        lower: RawTrigram,
        /// Upper trigram.
        upper: RawTrigram,
    },
    /// A two-element array, lower first.
    List(Vec<RawTrigram>),
}

fn placeholder_trigram() -> Trigram {
    Trigram {
        name: LINE_PLACEHOLDER.to_string(),
        chinese: String::new(),
    }
}

/// Dispatch over the trigram-pair variants.
fn normalize_trigrams(raw: Option<RawTrigramPair>) -> TrigramPair {
    match raw {
        Some(RawTrigramPair::Pair { lower, upper }) => TrigramPair {
            lower: lower.into_trigram(),
            upper: upper.into_trigram(),
        },
        Some(RawTrigramPair::List(mut items)) => {
            let lower = if items.is_empty() {
                placeholder_trigram()
            } else {
                items.remove(0).into_trigram()
            };
            let upper = if items.is_empty() {
                placeholder_trigram()
            } else {
                items.remove(0).into_trigram()
            };
            TrigramPair { lower, upper }
        }
        None => TrigramPair {
            lower: placeholder_trigram(),
            upper: placeholder_trigram(),
        },
    }
}

/// One hexagram entry as stored, before normalization.
#[derive(Debug, Clone, Deserialize)]
pub struct RawHexagram {
    /// King Wen number; some shapes key entries externally and omit it.
    #[serde(default, alias = "id")]
    pub number: Option<u32>,
    /// Chinese name.
    #[serde(default)]
    pub chinese: String,
    /// Pinyin romanization.
    #[serde(default)]
    pub pinyin: String,
    /// English name; older shapes called this `name`.
    #[serde(default, alias = "name")]
    pub english: String,
    /// Judgment text; the British spelling appears in older data.
    #[serde(default, alias = "judgement")]
    pub judgment: String,
    /// Image text.
    #[serde(default)]
    pub image: String,
    /// Line texts in any known shape.
    #[serde(default)]
    pub lines: Option<RawLines>,
    /// Summary meaning.
    #[serde(default)]
    pub meaning: String,
    /// Trigram pair in any known shape.
    #[serde(default)]
    pub trigrams: Option<RawTrigramPair>,
}

impl RawHexagram {
    /// Normalize into the canonical shape.
    ///
    /// `fallback_number` is used when the stored entry carries no number of
    /// its own (externally-keyed shapes).
    pub fn normalize(self, fallback_number: u32) -> HexagramContent {
        HexagramContent {
            number: self.number.unwrap_or(fallback_number),
            chinese: self.chinese,
            pinyin: self.pinyin,
            english: self.english,
            judgment: self.judgment,
            image: self.image,
            lines: normalize_lines(self.lines),
            meaning: self.meaning,
            trigrams: normalize_trigrams(self.trigrams),
        }
    }
}

/// A full book as stored.
#[derive(Debug, Clone, Deserialize)]
pub struct RawBook {
    /// Stable book id.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Author attribution.
    #[serde(default)]
    pub creator: String,
    /// Stored hexagram entries in positional order.
    #[serde(default)]
    pub hexagrams: Vec<RawHexagram>,
}

impl RawBook {
    /// Normalize every entry into a canonical [`Book`].
    ///
    /// Entries resolving to a number outside 1-64 are dropped; a book that
    /// stored garbage for one hexagram still serves the other 63.
    pub fn normalize(self, source: BookSource) -> Book {
        let mut hexagrams = BTreeMap::new();
        for (i, raw) in self.hexagrams.into_iter().enumerate() {
            let content = raw.normalize(i as u32 + 1);
            if (1..=64).contains(&content.number) {
                hexagrams.insert(content.number, content);
            }
        }
        Book {
            id: self.id,
            name: self.name,
            creator: self.creator,
            source,
            hexagrams,
        }
    }
}
