/*
 * Card and deck model
 *
 * Cards are stored as a single 8bit index
 * the value of the index is 4 * rank + suit
 */

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use crate::constants::*;

/// A single playing card
///
/// Plain value type: equality and hashing are by (rank, suit) value,
/// encoded as `4 * rank + suit` with rank 0 = deuce and rank 12 = ace.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Card(u8);

impl Card {
    /// Create a card from a rank (0 -> 12) and suit (0 -> 3)
    pub fn new(rank: u8, suit: u8) -> Card {
        debug_assert!(rank < RANK_COUNT && suit < SUIT_COUNT);
        Card(4 * rank + suit)
    }

    /// Create a card from its 0 -> 51 deck index
    pub fn from_index(index: u8) -> Card {
        debug_assert!(index < CARD_COUNT);
        Card(index)
    }

    /// Index of the card in the deck (0 -> 51)
    pub const fn index(self) -> u8 {
        self.0
    }

    /// Rank of the card, 0 (deuce) -> 12 (ace)
    pub const fn rank(self) -> u8 {
        self.0 >> 2
    }

    /// Suit of the card, 0 (clubs) -> 3 (spades)
    pub const fn suit(self) -> u8 {
        self.0 & 3
    }
}

impl fmt::Display for Card {
    /// Writes the card as e.g. 'Ah'
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}{}",
            RANK_TO_CHAR[usize::from(self.rank())],
            SUIT_TO_CHAR[usize::from(self.suit())]
        )
    }
}

impl FromStr for Card {
    type Err = String;

    /// Parses a card from a two char string like 'Ah' or 'Tc'
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.chars();
        let rank_char = chars.next().ok_or_else(|| format!("invalid card '{}'", s))?;
        let suit_char = chars.next().ok_or_else(|| format!("invalid card '{}'", s))?;
        if chars.next().is_some() {
            return Err(format!("invalid card '{}'", s));
        }
        let rank = RANK_TO_CHAR
            .iter()
            .position(|&c| c == rank_char.to_ascii_uppercase())
            .ok_or_else(|| format!("invalid rank '{}'", rank_char))?;
        let suit = SUIT_TO_CHAR
            .iter()
            .position(|&c| c == suit_char.to_ascii_lowercase())
            .ok_or_else(|| format!("invalid suit '{}'", suit_char))?;
        Ok(Card::new(rank as u8, suit as u8))
    }
}

lazy_static! {
    /// The full 52 card deck in index order
    pub static ref DECK: [Card; 52] = init_deck();
}

fn init_deck() -> [Card; 52] {
    let mut deck = [Card(0); 52];
    for i in 0..CARD_COUNT {
        deck[usize::from(i)] = Card(i);
    }
    deck
}

/// Returns the deck minus the dead cards
///
/// Duplicate free whenever `deck` is, and preserves `deck`'s order
pub fn live_deck(deck: &[Card], dead: &[Card]) -> Vec<Card> {
    let mut dead_mask = 0u64;
    for c in dead {
        dead_mask |= 1u64 << c.index();
    }
    deck.iter()
        .copied()
        .filter(|c| (dead_mask & (1u64 << c.index())) == 0)
        .collect()
}

/// Canonical card ordering: descending rank, ties broken by ascending suit
fn canonical_cmp(a: &Card, b: &Card) -> Ordering {
    b.rank().cmp(&a.rank()).then(a.suit().cmp(&b.suit()))
}

/// Sorts cards into canonical order in place
///
/// Idempotent: sorting an already canonical sequence leaves it unchanged
pub fn canonicalize(cards: &mut [Card]) {
    cards.sort_unstable_by(canonical_cmp);
}

/// Returns a hero hand and board both reordered into canonical form
///
/// Situations that differ only by card order within the hand or within
/// the board map to the same canonical pair.
pub fn canonical(hero: &[Card], board: &[Card]) -> (Vec<Card>, Vec<Card>) {
    let mut hero = hero.to_vec();
    let mut board = board.to_vec();
    canonicalize(&mut hero);
    canonicalize(&mut board);
    (hero, board)
}
