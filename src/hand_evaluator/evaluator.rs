use crate::card::Card;
use crate::constants::*;

/// Hand strength score
///
/// Scores form a total order: a greater score always wins the showdown
/// and equal scores are a genuine tie (e.g. the board plays).
pub type Score = u32;

// divide value by 2^20 to obtain the hand category
const HAND_CATEGORY_SHIFT: u8 = 20;
const HAND_CATEGORY_OFFSET: u32 = 1 << HAND_CATEGORY_SHIFT;

// Hand Categories
const HIGH_CARD: u32 = HAND_CATEGORY_OFFSET;
const PAIR: u32 = 2 * HAND_CATEGORY_OFFSET;
const TWO_PAIR: u32 = 3 * HAND_CATEGORY_OFFSET;
const THREE_OF_A_KIND: u32 = 4 * HAND_CATEGORY_OFFSET;
const STRAIGHT: u32 = 5 * HAND_CATEGORY_OFFSET;
const FLUSH: u32 = 6 * HAND_CATEGORY_OFFSET;
const FULL_HOUSE: u32 = 7 * HAND_CATEGORY_OFFSET;
const FOUR_OF_A_KIND: u32 = 8 * HAND_CATEGORY_OFFSET;
const STRAIGHT_FLUSH: u32 = 9 * HAND_CATEGORY_OFFSET;

/// Evaluates the best 5 card poker hand from 5 to 7 cards
///
/// Single pass builds per-suit rank masks and rank counts, then takes
/// either the flush path or the rank-count path. With at most 7 cards a
/// flush rules out quads and full houses, so the two paths never need
/// to be compared against each other.
pub fn evaluate(cards: &[Card]) -> Score {
    debug_assert!(cards.len() >= 5 && cards.len() <= 7);

    let mut suit_masks = [0u16; 4];
    let mut rank_counts = [0u8; 13];
    for c in cards {
        suit_masks[usize::from(c.suit())] |= 1u16 << c.rank();
        rank_counts[usize::from(c.rank())] += 1;
    }

    for &mask in &suit_masks {
        if mask.count_ones() >= 5 {
            if let Some(high) = straight_high(mask) {
                return pack(STRAIGHT_FLUSH, &[high]);
            }
            return pack(FLUSH, &top_ranks(mask, 5));
        }
    }

    evaluate_ranks(&rank_counts)
}

fn evaluate_ranks(rank_counts: &[u8; 13]) -> Score {
    let mut occupied = 0u16;
    // highest first within each count class
    let mut quads = None;
    let mut trips: Vec<u8> = Vec::new();
    let mut pairs: Vec<u8> = Vec::new();
    for r in (0..RANK_COUNT).rev() {
        match rank_counts[usize::from(r)] {
            0 => continue,
            4 => quads = quads.or(Some(r)),
            3 => trips.push(r),
            2 => pairs.push(r),
            _ => {}
        }
        occupied |= 1u16 << r;
    }

    if let Some(q) = quads {
        let kicker = top_ranks_except(rank_counts, &[q], 1);
        return pack(FOUR_OF_A_KIND, &[q, kicker[0]]);
    }
    if !trips.is_empty() && (trips.len() > 1 || !pairs.is_empty()) {
        // second set of trips fills in as the pair of a full house
        let pair = if pairs.is_empty() || (trips.len() > 1 && trips[1] > pairs[0]) {
            trips[1]
        } else {
            pairs[0]
        };
        return pack(FULL_HOUSE, &[trips[0], pair]);
    }
    if let Some(high) = straight_high(occupied) {
        return pack(STRAIGHT, &[high]);
    }
    if let Some(&t) = trips.first() {
        let kickers = top_ranks_except(rank_counts, &[t], 2);
        return pack(THREE_OF_A_KIND, &[t, kickers[0], kickers[1]]);
    }
    if pairs.len() >= 2 {
        let kicker = top_ranks_except(rank_counts, &pairs[0..2], 1);
        return pack(TWO_PAIR, &[pairs[0], pairs[1], kicker[0]]);
    }
    if let Some(&p) = pairs.first() {
        let kickers = top_ranks_except(rank_counts, &[p], 3);
        return pack(PAIR, &[p, kickers[0], kickers[1], kickers[2]]);
    }
    pack(HIGH_CARD, &top_ranks(occupied, 5))
}

/// Packs up to 5 tiebreak ranks below the category, 4 bits each,
/// most significant first
fn pack(category: u32, ranks: &[u8]) -> Score {
    let mut score = category;
    let mut shift = HAND_CATEGORY_SHIFT;
    for &r in ranks {
        shift -= 4;
        score |= u32::from(r) << shift;
    }
    score
}

/// Highest top rank of any straight in a 13 bit rank mask,
/// including the wheel (A -> 5)
fn straight_high(mask: u16) -> Option<u8> {
    for high in (4..RANK_COUNT).rev() {
        let run = 0b11111u16 << (high - 4);
        if mask & run == run {
            return Some(high);
        }
    }
    const WHEEL: u16 = (1 << 12) | 0b1111;
    if mask & WHEEL == WHEEL {
        return Some(3);
    }
    None
}

/// Top `n` ranks set in a rank mask, highest first
fn top_ranks(mask: u16, n: usize) -> Vec<u8> {
    (0..RANK_COUNT)
        .rev()
        .filter(|&r| mask & (1u16 << r) != 0)
        .take(n)
        .collect()
}

/// Top `n` kicker ranks, skipping the ranks already spent on the made hand
fn top_ranks_except(rank_counts: &[u8; 13], used: &[u8], n: usize) -> Vec<u8> {
    (0..RANK_COUNT)
        .rev()
        .filter(|&r| rank_counts[usize::from(r)] > 0 && !used.contains(&r))
        .take(n)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn score(s: &[&str]) -> Score {
        let cards: Vec<Card> = s.iter().map(|c| c.parse().unwrap()).collect();
        evaluate(&cards)
    }

    fn category(s: Score) -> u32 {
        s >> HAND_CATEGORY_SHIFT
    }

    #[test]
    fn test_categories() {
        assert_eq!(category(score(&["Ah", "Kh", "Qh", "Jh", "Th"])), 9);
        assert_eq!(category(score(&["9c", "9d", "9h", "9s", "Ac"])), 8);
        assert_eq!(category(score(&["9c", "9d", "9h", "As", "Ac"])), 7);
        assert_eq!(category(score(&["Ah", "Kh", "9h", "5h", "2h"])), 6);
        assert_eq!(category(score(&["9c", "8d", "7h", "6s", "5c"])), 5);
        assert_eq!(category(score(&["9c", "9d", "9h", "As", "Kc"])), 4);
        assert_eq!(category(score(&["9c", "9d", "Ah", "As", "Kc"])), 3);
        assert_eq!(category(score(&["9c", "9d", "Ah", "Qs", "Kc"])), 2);
        assert_eq!(category(score(&["9c", "7d", "Ah", "Qs", "Kc"])), 1);
    }

    #[test]
    fn test_quads_beat_full_house() {
        let quads = score(&["9c", "9d", "9h", "9s", "Ac", "Ah", "5c"]);
        let boat = score(&["Ac", "Ad", "Ah", "Ks", "Kc", "5d", "2h"]);
        assert!(quads > boat);
    }

    #[test]
    fn test_wheel_straight() {
        let wheel = score(&["Ac", "2d", "3h", "4s", "5c"]);
        let six_high = score(&["2d", "3h", "4s", "5c", "6d"]);
        assert_eq!(category(wheel), 5);
        assert!(six_high > wheel);
    }

    #[test]
    fn test_seven_card_picks_best_five() {
        // straight on the board plus a flush in hearts
        let s = score(&["Ah", "Kh", "9h", "5h", "2h", "9c", "9d"]);
        assert_eq!(category(s), 6);
    }

    #[test]
    fn test_kickers_break_ties() {
        let ace_kicker = score(&["9c", "9d", "Ah", "Qs", "Kc", "4d", "3s"]);
        let jack_kicker = score(&["9h", "9s", "Jh", "Qd", "Kd", "4c", "3h"]);
        assert!(ace_kicker > jack_kicker);
    }

    #[test]
    fn test_board_plays_is_a_tie() {
        let board = ["Ac", "Kd", "Qh", "Js", "Tc"];
        let mut h1 = vec!["2c", "3d"];
        let mut h2 = vec!["4h", "5s"];
        h1.extend_from_slice(&board);
        h2.extend_from_slice(&board);
        assert_eq!(score(&h1), score(&h2));
    }

    #[test]
    fn test_two_pair_from_three_pairs() {
        // pairs of aces, kings, and deuces: the queen outkicks the third pair
        let s = score(&["Ac", "Ad", "Kh", "Ks", "2c", "2d", "Qh"]);
        assert_eq!(category(s), 3);
        let expected = pack(TWO_PAIR, &[12, 11, 10]);
        assert_eq!(s, expected);
    }

    #[test]
    fn test_trips_twice_is_full_house() {
        let s = score(&["Ac", "Ad", "Ah", "Ks", "Kc", "Kd", "Qh"]);
        assert_eq!(s, pack(FULL_HOUSE, &[12, 11]));
    }
}
