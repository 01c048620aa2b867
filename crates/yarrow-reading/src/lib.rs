//! Reading assembly for the journaling product.
//!
//! Orchestrates the casting engine and the content layer into complete
//! readings: `cast` turns a question into a [`Reading`]; `reconstruct`
//! rebuilds one from its persisted raw values without consuming any new
//! randomness. Persistence and rendering belong to the caller.

pub mod error;
pub mod journal;
pub mod reading;
pub mod session;

pub use error::{ReadingError, ReadingResult};
pub use journal::{LogEntry, ReadingLog};
pub use reading::{CastHexagram, Reading, StoredLine, StoredReading};
pub use session::{ReadingSession, SessionConfig};
