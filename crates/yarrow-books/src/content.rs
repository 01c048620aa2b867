//! Canonical interpretive content for one hexagram.

use serde::{Deserialize, Serialize};

/// One of the eight trigrams, as named by a book.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Trigram {
    /// English name, e.g. "Thunder".
    pub name: String,
    /// Chinese name; empty when the source shape did not carry one.
    #[serde(default)]
    pub chinese: String,
}

/// The lower/upper trigram pair of a hexagram.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrigramPair {
    /// The lower (inner) trigram, lines 1-3.
    pub lower: Trigram,
    /// The upper (outer) trigram, lines 4-6.
    pub upper: Trigram,
}

/// A book's interpretation of one hexagram.
///
/// This is the canonical shape every stored variant normalizes into. The
/// same hexagram number carries different content in different books.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HexagramContent {
    /// King Wen number, 1-64.
    pub number: u32,
    /// Chinese name.
    pub chinese: String,
    /// Pinyin romanization.
    pub pinyin: String,
    /// English name.
    pub english: String,
    /// The judgment text.
    pub judgment: String,
    /// The image text.
    pub image: String,
    /// Per-line texts, bottom to top.
    pub lines: [String; 6],
    /// Summary meaning.
    pub meaning: String,
    /// The trigram pair.
    pub trigrams: TrigramPair,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serde_roundtrip() {
        let content = HexagramContent {
            number: 51,
            chinese: "震".to_string(),
            pinyin: "zhèn".to_string(),
            english: "The Arousing".to_string(),
            judgment: "Shock brings success.".to_string(),
            image: "Thunder repeated.".to_string(),
            lines: std::array::from_fn(|i| format!("line {}", i + 1)),
            meaning: "A sudden jolt.".to_string(),
            trigrams: TrigramPair {
                lower: Trigram {
                    name: "Thunder".to_string(),
                    chinese: "震".to_string(),
                },
                upper: Trigram {
                    name: "Thunder".to_string(),
                    chinese: "震".to_string(),
                },
            },
        };
        let json = serde_json::to_string(&content).unwrap();
        let back: HexagramContent = serde_json::from_str(&json).unwrap();
        assert_eq!(content, back);
    }

    #[test]
    fn trigram_chinese_defaults_empty() {
        let trigram: Trigram = serde_json::from_str(r#"{"name": "Lake"}"#).unwrap();
        assert_eq!(trigram.name, "Lake");
        assert_eq!(trigram.chinese, "");
    }
}
