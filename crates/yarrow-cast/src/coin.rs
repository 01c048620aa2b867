//! Three-coin tossing.
//!
//! Each coin lands heads (weight 3) or tails (weight 2); a toss is three
//! coins, so its total is always 6-9. The coin supply is abstracted behind
//! [`CoinSource`] so production casts draw from entropy while tests and
//! replays script exact outcomes.

use std::collections::VecDeque;

use rand::Rng;
use rand::SeedableRng;
use rand::rngs::StdRng;
use serde::{Deserialize, Serialize};

/// One face of a cast coin.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CoinFace {
    /// Heads, weight 3.
    Heads,
    /// Tails, weight 2.
    Tails,
}

impl CoinFace {
    /// Numeric weight of this face.
    pub fn weight(self) -> u32 {
        match self {
            Self::Heads => 3,
            Self::Tails => 2,
        }
    }
}

/// The result of tossing three coins together.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CoinToss {
    /// The three coin faces, in toss order.
    pub coins: [CoinFace; 3],
}

impl CoinToss {
    /// Sum of the three coin weights. Always in 6-9.
    pub fn total(&self) -> u32 {
        self.coins.iter().map(|c| c.weight()).sum()
    }
}

impl std::fmt::Display for CoinToss {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let faces: Vec<&str> = self
            .coins
            .iter()
            .map(|c| match c {
                CoinFace::Heads => "H",
                CoinFace::Tails => "T",
            })
            .collect();
        write!(f, "{} = {}", faces.join(""), self.total())
    }
}

/// A supply of coin flips.
///
/// Implemented by [`EntropyCoins`] for real casts and [`ScriptedCoins`] for
/// deterministic tests.
pub trait CoinSource {
    /// Flip one coin.
    fn flip(&mut self) -> CoinFace;
}

/// Coin flips drawn from a seedable RNG.
#[derive(Debug)]
pub struct EntropyCoins {
    rng: StdRng,
}

impl EntropyCoins {
    /// Create a source seeded from OS entropy.
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_os_rng(),
        }
    }

    /// Create a source with a fixed seed for reproducible casts.
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Default for EntropyCoins {
    fn default() -> Self {
        Self::new()
    }
}

impl CoinSource for EntropyCoins {
    fn flip(&mut self) -> CoinFace {
        if self.rng.random_bool(0.5) {
            CoinFace::Heads
        } else {
            CoinFace::Tails
        }
    }
}

/// A fixed sequence of coin faces.
///
/// Used to script exact casts in tests. Once the sequence runs out, further
/// flips return tails.
#[derive(Debug, Clone, Default)]
pub struct ScriptedCoins {
    queue: VecDeque<CoinFace>,
}

impl ScriptedCoins {
    /// Create a source that yields the given faces in order.
    pub fn new(faces: impl IntoIterator<Item = CoinFace>) -> Self {
        Self {
            queue: faces.into_iter().collect(),
        }
    }

    /// Script one toss per sum: 6 = TTT, 7 = HTT, 8 = HHT, 9 = HHH.
    ///
    /// Sums outside 6-9 are skipped; callers validating sums do so through
    /// [`crate::Line::from_raw`], not here.
    pub fn from_sums(sums: &[u32]) -> Self {
        let mut queue = VecDeque::new();
        for sum in sums {
            let faces: &[CoinFace] = match sum {
                6 => &[CoinFace::Tails, CoinFace::Tails, CoinFace::Tails],
                7 => &[CoinFace::Heads, CoinFace::Tails, CoinFace::Tails],
                8 => &[CoinFace::Heads, CoinFace::Heads, CoinFace::Tails],
                9 => &[CoinFace::Heads, CoinFace::Heads, CoinFace::Heads],
                _ => &[],
            };
            queue.extend(faces.iter().copied());
        }
        Self { queue }
    }

    /// Number of scripted flips remaining.
    pub fn remaining(&self) -> usize {
        self.queue.len()
    }
}

impl CoinSource for ScriptedCoins {
    fn flip(&mut self) -> CoinFace {
        self.queue.pop_front().unwrap_or(CoinFace::Tails)
    }
}

/// Toss three coins from the given source.
///
/// Cannot fail; every combination of faces is a valid toss.
pub fn toss_three_coins(source: &mut dyn CoinSource) -> CoinToss {
    CoinToss {
        coins: [source.flip(), source.flip(), source.flip()],
    }
}
