//! The six-line pattern of a hexagram.
//!
//! A pattern is serialized as a six-character binary string read bottom line
//! first: index 0 is line 1, `1` is yang, `0` is yin. Exactly 64 patterns
//! exist and each maps to one King Wen number.

use serde::{Deserialize, Serialize};

use crate::error::{CastError, CastResult};
use crate::line::{Line, LineKind};

/// An ordered 6-tuple of line polarities, bottom to top.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LinePattern([LineKind; 6]);

impl LinePattern {
    /// Build a pattern from six resolved lines.
    ///
    /// Lines are taken in slice order; their `position` fields are assumed
    /// to already run 1-6 bottom to top.
    pub fn from_lines(lines: &[Line; 6]) -> Self {
        Self([
            lines[0].kind,
            lines[1].kind,
            lines[2].kind,
            lines[3].kind,
            lines[4].kind,
            lines[5].kind,
        ])
    }

    /// Build a pattern directly from six polarities, bottom to top.
    pub fn from_kinds(kinds: [LineKind; 6]) -> Self {
        Self(kinds)
    }

    /// Parse a pattern from its binary-string form, e.g. `"100010"`.
    pub fn parse(s: &str) -> CastResult<Self> {
        let mut kinds = [LineKind::Yin; 6];
        if s.len() != 6 {
            return Err(CastError::InvalidPattern(s.to_string()));
        }
        for (i, c) in s.chars().enumerate() {
            kinds[i] = match c {
                '0' => LineKind::Yin,
                '1' => LineKind::Yang,
                _ => return Err(CastError::InvalidPattern(s.to_string())),
            };
        }
        Ok(Self(kinds))
    }

    /// The binary-string form, bottom line first, yang = `1`.
    pub fn as_bits(&self) -> String {
        self.0
            .iter()
            .map(|k| match k {
                LineKind::Yin => '0',
                LineKind::Yang => '1',
            })
            .collect()
    }

    /// Polarity at a 1-based position (1 = bottom).
    ///
    /// # Panics
    ///
    /// Panics if `position` is outside 1-6; the caller is expected to hold
    /// the positional invariant.
    pub fn kind_at(&self, position: u32) -> LineKind {
        self.0[(position - 1) as usize]
    }

    /// The six polarities, bottom to top.
    pub fn kinds(&self) -> &[LineKind; 6] {
        &self.0
    }
}

impl std::fmt::Display for LinePattern {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_bits())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_roundtrip() {
        for bits in ["000000", "111111", "100010", "010101"] {
            let p = LinePattern::parse(bits).unwrap();
            assert_eq!(p.as_bits(), bits);
        }
    }

    #[test]
    fn parse_rejects_wrong_length() {
        assert!(LinePattern::parse("10101").is_err());
        assert!(LinePattern::parse("1010101").is_err());
        assert!(LinePattern::parse("").is_err());
    }

    #[test]
    fn parse_rejects_non_binary() {
        assert!(LinePattern::parse("10101x").is_err());
        assert!(LinePattern::parse("2:0101").is_err());
    }

    #[test]
    fn from_lines_reads_bottom_first() {
        let lines = [
            Line::from_raw(1, 9).unwrap(), // yang
            Line::from_raw(2, 8).unwrap(), // yin
            Line::from_raw(3, 8).unwrap(),
            Line::from_raw(4, 8).unwrap(),
            Line::from_raw(5, 7).unwrap(), // yang
            Line::from_raw(6, 6).unwrap(), // yin
        ];
        assert_eq!(LinePattern::from_lines(&lines).as_bits(), "100010");
    }

    #[test]
    fn kind_at_positions() {
        let p = LinePattern::parse("100010").unwrap();
        assert_eq!(p.kind_at(1), LineKind::Yang);
        assert_eq!(p.kind_at(2), LineKind::Yin);
        assert_eq!(p.kind_at(5), LineKind::Yang);
        assert_eq!(p.kind_at(6), LineKind::Yin);
    }

    #[test]
    fn display_is_bits() {
        let p = LinePattern::parse("011011").unwrap();
        assert_eq!(p.to_string(), "011011");
    }
}
