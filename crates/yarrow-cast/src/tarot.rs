//! Three-card tarot draw.
//!
//! The structurally simpler sibling of the hexagram cast: three cards
//! sampled without replacement from a fixed 78-card deck, each with an
//! independent reversal flag.

use rand::Rng;
use rand::rngs::StdRng;
use serde::{Deserialize, Serialize};

/// The 22 major arcana, in order.
pub const MAJOR_ARCANA: [&str; 22] = [
    "The Fool",
    "The Magician",
    "The High Priestess",
    "The Empress",
    "The Emperor",
    "The Hierophant",
    "The Lovers",
    "The Chariot",
    "Strength",
    "The Hermit",
    "Wheel of Fortune",
    "Justice",
    "The Hanged Man",
    "Death",
    "Temperance",
    "The Devil",
    "The Tower",
    "The Star",
    "The Moon",
    "The Sun",
    "Judgement",
    "The World",
];

const SUITS: [&str; 4] = ["Wands", "Cups", "Swords", "Pentacles"];

const RANKS: [&str; 14] = [
    "Ace", "Two", "Three", "Four", "Five", "Six", "Seven", "Eight", "Nine", "Ten", "Page",
    "Knight", "Queen", "King",
];

/// Number of cards in the deck.
pub const DECK_SIZE: usize = 78;

/// Name of the card at a deck index (0-77): majors first, then each suit
/// ace through king.
pub fn card_name(index: usize) -> String {
    if index < MAJOR_ARCANA.len() {
        return MAJOR_ARCANA[index].to_string();
    }
    let minor = index - MAJOR_ARCANA.len();
    let suit = SUITS[minor / RANKS.len()];
    let rank = RANKS[minor % RANKS.len()];
    format!("{rank} of {suit}")
}

/// The slot a drawn card speaks to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DrawSlot {
    /// What led here.
    Past,
    /// Where things stand.
    Present,
    /// Where things are heading.
    Future,
}

impl std::fmt::Display for DrawSlot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Past => write!(f, "Past"),
            Self::Present => write!(f, "Present"),
            Self::Future => write!(f, "Future"),
        }
    }
}

/// One card of a three-card draw.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DrawnCard {
    /// Deck index (0-77).
    pub index: usize,
    /// Card name.
    pub name: String,
    /// Whether the card landed reversed.
    pub reversed: bool,
    /// The slot this card fills.
    pub slot: DrawSlot,
}

/// A complete past/present/future draw.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThreeCardDraw {
    /// The three drawn cards, in slot order.
    pub cards: [DrawnCard; 3],
}

/// Draw three distinct cards with independent reversal flags.
pub fn draw_three(rng: &mut StdRng) -> ThreeCardDraw {
    let mut picked: Vec<usize> = Vec::with_capacity(3);
    while picked.len() < 3 {
        let index = rng.random_range(0..DECK_SIZE);
        if !picked.contains(&index) {
            picked.push(index);
        }
    }
    let slots = [DrawSlot::Past, DrawSlot::Present, DrawSlot::Future];
    let cards = std::array::from_fn(|i| DrawnCard {
        index: picked[i],
        name: card_name(picked[i]),
        reversed: rng.random_bool(0.5),
        slot: slots[i],
    });
    ThreeCardDraw { cards }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    #[test]
    fn deck_has_78_unique_names() {
        let names: std::collections::HashSet<String> = (0..DECK_SIZE).map(card_name).collect();
        assert_eq!(names.len(), 78);
    }

    #[test]
    fn card_name_boundaries() {
        assert_eq!(card_name(0), "The Fool");
        assert_eq!(card_name(21), "The World");
        assert_eq!(card_name(22), "Ace of Wands");
        assert_eq!(card_name(77), "King of Pentacles");
    }

    #[test]
    fn draw_yields_distinct_cards() {
        let mut rng = StdRng::seed_from_u64(42);
        for _ in 0..200 {
            let draw = draw_three(&mut rng);
            let mut indices: Vec<usize> = draw.cards.iter().map(|c| c.index).collect();
            indices.sort_unstable();
            indices.dedup();
            assert_eq!(indices.len(), 3);
        }
    }

    #[test]
    fn draw_fills_slots_in_order() {
        let mut rng = StdRng::seed_from_u64(7);
        let draw = draw_three(&mut rng);
        assert_eq!(draw.cards[0].slot, DrawSlot::Past);
        assert_eq!(draw.cards[1].slot, DrawSlot::Present);
        assert_eq!(draw.cards[2].slot, DrawSlot::Future);
    }

    #[test]
    fn draw_deterministic_with_seed() {
        let mut a = StdRng::seed_from_u64(99);
        let mut b = StdRng::seed_from_u64(99);
        assert_eq!(draw_three(&mut a), draw_three(&mut b));
    }
}
