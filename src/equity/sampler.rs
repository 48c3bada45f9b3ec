use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::card::{canonical, live_deck, Card};
use crate::constants::*;
use super::rollout::rollout;
use super::EquityError;

/// Monte carlo estimate of hero's equity against a random opponent
///
/// `mean` averages the per-trial equities, `mean_of_square` averages
/// their squares, so `mean_of_square - mean^2` estimates the variance
/// of equity across opponent hands.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EquityEstimate {
    pub mean: f64,
    pub mean_of_square: f64,
}

impl EquityEstimate {
    /// Variance proxy used as the second clustering feature
    pub fn variance(&self) -> f64 {
        (self.mean_of_square - self.mean * self.mean).max(0.0)
    }
}

/// Estimates hero's equity against a uniformly random opponent hand
///
/// Each trial shuffles the live deck (deck minus hero and board), deals
/// the top two cards to the opponent and hands the rest to the rollout
/// sampler as the completion pool. Randomness comes only from the
/// caller's generator, so a seeded generator reproduces the estimate
/// exactly.
///
/// # Arguments
///
/// * `hero` - hero hole cards, exactly 2
/// * `board` - revealed community cards, at most 5
/// * `deck` - card pool to sample opponents and runouts from, normally the full deck
/// * `trials` - number of opponent hands to sample
/// * `rng` - seedable generator owned by the caller
pub fn equity_vs_random<R: Rng>(
    hero: &[Card],
    board: &[Card],
    deck: &[Card],
    trials: usize,
    rng: &mut R,
) -> Result<EquityEstimate, EquityError> {
    if hero.len() != HAND_CARDS {
        return Err(EquityError::InvalidHandSize);
    }
    if board.len() > BOARD_CARDS {
        return Err(EquityError::InvalidBoardLength);
    }

    let (hero, board) = canonical(hero, board);
    let mut dead = hero.clone();
    dead.extend_from_slice(&board);
    let mut live = live_deck(deck, &dead);
    if live.len() < HAND_CARDS {
        return Err(EquityError::InsufficientDeck);
    }

    let mut total = 0.0;
    let mut total_sq = 0.0;
    for _ in 0..trials {
        live.shuffle(rng);
        let (opp, remaining) = live.split_at(HAND_CARDS);
        let eq = rollout(&hero, opp, &board, remaining)?;
        total += eq;
        total_sq += eq * eq;
    }
    Ok(EquityEstimate {
        mean: total / trials as f64,
        mean_of_square: total_sq / trials as f64,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::card::DECK;
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    fn cards(s: &[&str]) -> Vec<Card> {
        s.iter().map(|c| c.parse().unwrap()).collect()
    }

    #[test]
    fn test_reproducible_with_seed() {
        let hero = cards(&["As", "Ks"]);
        let board = cards(&["Qd", "7h", "2c"]);
        let mut rng_a = SmallRng::seed_from_u64(42);
        let mut rng_b = SmallRng::seed_from_u64(42);
        let a = equity_vs_random(&hero, &board, &DECK[..], 200, &mut rng_a).unwrap();
        let b = equity_vs_random(&hero, &board, &DECK[..], 200, &mut rng_b).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_aces_preflop_equity() {
        let hero = cards(&["As", "Ah"]);
        let mut rng = SmallRng::seed_from_u64(7);
        let est = equity_vs_random(&hero, &[], &DECK[..], 2000, &mut rng).unwrap();
        // AA vs a random hand runs about 85%
        assert!(est.mean > 0.80 && est.mean < 0.90, "mean={}", est.mean);
        assert!(est.variance() >= 0.0);
        assert!(est.mean_of_square >= est.mean * est.mean - 1e-12);
    }

    #[test]
    fn test_nut_hand_on_river_is_certain() {
        // made royal flush on a complete board: every opponent sample and
        // every seed must come back exactly 1.0; any dead card leaking
        // into the opponent hand would break this
        let hero = cards(&["Ah", "Kh"]);
        let board = cards(&["Qh", "Jh", "Th", "2s", "7c"]);
        for seed in 0..5 {
            let mut rng = SmallRng::seed_from_u64(seed);
            let est = equity_vs_random(&hero, &board, &DECK[..], 50, &mut rng).unwrap();
            assert_eq!(est.mean, 1.0);
            assert_eq!(est.mean_of_square, 1.0);
            assert_eq!(est.variance(), 0.0);
        }
    }

    #[test]
    fn test_order_independent_input() {
        let board = cards(&["Qd", "7h", "2c"]);
        let board_shuffled = cards(&["2c", "Qd", "7h"]);
        let mut rng_a = SmallRng::seed_from_u64(9);
        let mut rng_b = SmallRng::seed_from_u64(9);
        let a = equity_vs_random(&cards(&["As", "Ks"]), &board, &DECK[..], 100, &mut rng_a).unwrap();
        let b = equity_vs_random(&cards(&["Ks", "As"]), &board_shuffled, &DECK[..], 100, &mut rng_b)
            .unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_insufficient_deck() {
        let hero = cards(&["As", "Ah"]);
        let board = cards(&["Qd", "7h", "2c"]);
        // deck only holds the dead cards plus one spare
        let mut deck = hero.clone();
        deck.extend_from_slice(&board);
        deck.push("3c".parse().unwrap());
        let mut rng = SmallRng::seed_from_u64(1);
        assert_eq!(
            equity_vs_random(&hero, &board, &deck, 10, &mut rng).unwrap_err(),
            EquityError::InsufficientDeck
        );
    }

    #[test]
    fn test_rollout_failure_propagates() {
        let hero = cards(&["As", "Ah"]);
        let board = cards(&["Qd", "7h", "2c"]);
        // two live cards go to the opponent, leaving an empty pool for a
        // board that still needs two cards
        let mut deck = hero.clone();
        deck.extend_from_slice(&board);
        deck.extend_from_slice(&cards(&["3c", "4d"]));
        let mut rng = SmallRng::seed_from_u64(1);
        assert_eq!(
            equity_vs_random(&hero, &board, &deck, 10, &mut rng).unwrap_err(),
            EquityError::InsufficientSamples
        );
    }

    #[test]
    fn test_invalid_hand_rejected_before_sampling() {
        let hero = cards(&["As"]);
        let mut rng = SmallRng::seed_from_u64(1);
        assert_eq!(
            equity_vs_random(&hero, &[], &DECK[..], 10, &mut rng).unwrap_err(),
            EquityError::InvalidHandSize
        );
    }
}
