use crate::card::Card;
use crate::constants::*;
use crate::hand_evaluator::evaluate;

use super::EquityError;

/// Evaluates one completed showdown
///
/// Returns 1.0 if hero wins, 0.5 on a tie, 0.0 otherwise
fn showdown(hero: &[Card], opp: &[Card], board: &[Card; BOARD_CARDS]) -> f64 {
    let mut hero_cards = [board[0]; BOARD_CARDS + HAND_CARDS];
    let mut opp_cards = [board[0]; BOARD_CARDS + HAND_CARDS];
    hero_cards[..BOARD_CARDS].copy_from_slice(board);
    opp_cards[..BOARD_CARDS].copy_from_slice(board);
    hero_cards[BOARD_CARDS..].copy_from_slice(hero);
    opp_cards[BOARD_CARDS..].copy_from_slice(opp);
    let hero_score = evaluate(&hero_cards);
    let opp_score = evaluate(&opp_cards);
    if hero_score > opp_score {
        1.0
    } else if hero_score == opp_score {
        0.5
    } else {
        0.0
    }
}

/// Averages hero's showdown result against one opponent over board completions
///
/// With a complete board this is a single exact evaluation and touches no
/// randomness. With an incomplete board the caller-supplied `remaining`
/// pool (already shuffled) is split into consecutive disjoint chunks of
/// the missing board length; each chunk completes the board for one
/// rollout. Chunking keeps every rollout on previously unseen cards and
/// bounds evaluator calls by the pool size.
///
/// # Arguments
///
/// * `hero` - hero hole cards, exactly 2
/// * `opp` - opponent hole cards, exactly 2
/// * `board` - revealed community cards, at most 5
/// * `remaining` - shuffled pool of cards not held by either player or the board
pub fn rollout(
    hero: &[Card],
    opp: &[Card],
    board: &[Card],
    remaining: &[Card],
) -> Result<f64, EquityError> {
    if hero.len() != HAND_CARDS || opp.len() != HAND_CARDS {
        return Err(EquityError::InvalidHandSize);
    }
    if board.len() > BOARD_CARDS {
        return Err(EquityError::InvalidBoardLength);
    }

    let need = BOARD_CARDS - board.len();
    let mut full_board = [Card::from_index(0); BOARD_CARDS];
    full_board[..board.len()].copy_from_slice(board);

    if need == 0 {
        return Ok(showdown(hero, opp, &full_board));
    }

    let rollouts = remaining.len() / need;
    if rollouts == 0 {
        return Err(EquityError::InsufficientSamples);
    }

    let mut total = 0.0;
    for chunk in remaining.chunks_exact(need) {
        full_board[board.len()..].copy_from_slice(chunk);
        total += showdown(hero, opp, &full_board);
    }
    Ok(total / rollouts as f64)
}
