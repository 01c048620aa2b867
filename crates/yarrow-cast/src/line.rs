//! Line resolution from toss sums.
//!
//! A toss sum of 6 or 9 produces a changing line; 7 and 9 are yang, 6 and 8
//! are yin. No other sums are reachable from three coins of weight 2 or 3.

use serde::{Deserialize, Serialize};

use crate::coin::CoinToss;
use crate::error::{CastError, CastResult};

/// The polarity of a hexagram line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LineKind {
    /// A broken line.
    Yin,
    /// A solid line.
    Yang,
}

impl LineKind {
    /// The opposite polarity.
    pub fn flipped(self) -> Self {
        match self {
            Self::Yin => Self::Yang,
            Self::Yang => Self::Yin,
        }
    }
}

impl std::fmt::Display for LineKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Yin => write!(f, "yin"),
            Self::Yang => write!(f, "yang"),
        }
    }
}

/// One resolved line of a cast hexagram.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Line {
    /// Position 1-6, bottom to top.
    pub position: u32,
    /// The toss sum that produced this line (6-9).
    pub sum: u32,
    /// Resolved polarity.
    pub kind: LineKind,
    /// Whether this line transforms in the second hexagram.
    pub changing: bool,
}

impl Line {
    /// Resolve a line from a coin toss.
    ///
    /// Infallible: a [`CoinToss`] total is 6-9 by construction.
    pub fn from_toss(position: u32, toss: &CoinToss) -> Self {
        let sum = toss.total();
        let (kind, changing) = match resolve_sum(sum) {
            Some(r) => r,
            None => unreachable!("coin toss total out of range: {sum}"),
        };
        Self {
            position,
            sum,
            kind,
            changing,
        }
    }

    /// Resolve a line from stored raw values.
    ///
    /// Used when rebuilding a persisted reading; rejects sums and positions
    /// that no real toss could have produced.
    pub fn from_raw(position: u32, sum: u32) -> CastResult<Self> {
        if !(1..=6).contains(&position) {
            return Err(CastError::InvalidPosition(position));
        }
        let (kind, changing) = resolve_sum(sum).ok_or(CastError::InvalidSum(sum))?;
        Ok(Self {
            position,
            sum,
            kind,
            changing,
        })
    }

    /// Display symbol for this line, with a marker when changing.
    pub fn symbol(&self) -> &'static str {
        match (self.kind, self.changing) {
            (LineKind::Yang, false) => "———",
            (LineKind::Yang, true) => "—○—",
            (LineKind::Yin, false) => "— —",
            (LineKind::Yin, true) => "—×—",
        }
    }
}

/// Exhaustive sum table: 6 and 8 are yin, 7 and 9 are yang, 6 and 9 change.
fn resolve_sum(sum: u32) -> Option<(LineKind, bool)> {
    match sum {
        6 => Some((LineKind::Yin, true)),
        7 => Some((LineKind::Yang, false)),
        8 => Some((LineKind::Yin, false)),
        9 => Some((LineKind::Yang, true)),
        _ => None,
    }
}
