//! I Ching casting engine.
//!
//! Provides the structural half of a hexagram reading: three-coin tosses,
//! line resolution, the 64-entry King Wen lookup table, and the
//! changing-line transformation. Everything here is pure computation over
//! in-memory data; interpretive text lives in `yarrow-books`.

pub mod coin;
pub mod error;
pub mod hexagram;
pub mod line;
pub mod pattern;
pub mod tarot;
pub mod transform;

pub use coin::{CoinFace, CoinSource, CoinToss, EntropyCoins, ScriptedCoins, toss_three_coins};
pub use error::{CastError, CastResult};
pub use hexagram::{king_wen_number, pattern_of};
pub use line::{Line, LineKind};
pub use pattern::LinePattern;
pub use transform::transformed_pattern;
