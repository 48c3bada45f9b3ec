/// Number of cards in standard deck
pub const CARD_COUNT: u8 = 52;

/// Number of ranks in a standard deck
/// (2 -> A)
pub const RANK_COUNT: u8 = 13;

/// Number of suits in a standard deck
pub const SUIT_COUNT: u8 = 4;

/// Number of community cards on a complete board
pub const BOARD_CARDS: usize = 5;

/// Number of private cards in a holdem hand
pub const HAND_CARDS: usize = 2;

/// u8 rank to char table
pub const RANK_TO_CHAR: &[char; 13] = &[
    '2', '3', '4', '5', '6', '7', '8', '9', 'T', 'J', 'Q', 'K', 'A',
];

/// u8 suit to char table
///
/// Suit order doubles as the canonical tiebreak order:
/// clubs < diamonds < hearts < spades
pub static SUIT_TO_CHAR: &[char; 4] = &['c', 'd', 'h', 's'];
