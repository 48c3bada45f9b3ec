mod rollout;
mod sampler;

use thiserror::Error;

pub use rollout::rollout;
pub use sampler::{equity_vs_random, EquityEstimate};

/// Input validation failures of the equity pipeline
///
/// All variants indicate a malformed situation supplied by the caller,
/// detected synchronously before any evaluation; none are retried.
#[derive(Debug, Error, PartialEq)]
pub enum EquityError {
    #[error("hero and opponent must each hold exactly 2 cards")]
    InvalidHandSize,
    #[error("board cannot hold more than 5 cards")]
    InvalidBoardLength,
    #[error("remaining pool too small to complete a single board")]
    InsufficientSamples,
    #[error("live deck has fewer than 2 cards to sample an opponent from")]
    InsufficientDeck,
}
