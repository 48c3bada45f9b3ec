/// # Postflop Buckets
/// A texas holdem equity abstraction library
///
/// Estimates hand equity against a random opponent via monte carlo
/// rollouts and clusters many such estimates per street into a small
/// set of representative buckets.
///
/// ## Equity Estimation
///
/// ```
/// use postflop_buckets::card::{Card, DECK};
/// use postflop_buckets::equity::equity_vs_random;
/// use rand::rngs::SmallRng;
/// use rand::SeedableRng;
///
/// let hero: Vec<Card> = vec!["As".parse().unwrap(), "Ah".parse().unwrap()];
/// let mut rng = SmallRng::seed_from_u64(1);
/// let est = equity_vs_random(&hero, &[], &DECK[..], 500, &mut rng).unwrap();
/// assert!(est.mean > 0.5);
/// ```
///
/// ## Bucket Construction
///
/// ```no_run
/// use postflop_buckets::bucketing::{build_buckets, Street};
///
/// let centers = build_buckets(Street::Flop, 25000, 800, 400, 4, 1337).unwrap();
/// assert!(centers.len() <= 400);
/// ```

#[macro_use]
extern crate lazy_static;
extern crate crossbeam;
extern crate rand;
extern crate serde;
extern crate serde_json;

pub mod bucketing;
pub mod card;
pub mod constants;
pub mod equity;
pub mod hand_evaluator;
