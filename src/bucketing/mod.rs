/*
 * Per-street bucket construction
 *
 * Samples random (hero, board) situations for a street, estimates an
 * equity feature for each against a random opponent, and clusters the
 * features into a small number of representative bucket centers.
 */

mod kmeans;

use std::collections::BTreeMap;
use std::fmt;
use std::fs::File;
use std::io;
use std::path::Path;

use log::info;
use rand::rngs::SmallRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use crate::card::{Card, DECK};
use crate::constants::*;
use crate::equity::{equity_vs_random, EquityError};

/// A postflop betting round, defined by how many community cards are out
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Street {
    Flop,
    Turn,
    River,
}

impl Street {
    /// Number of community cards revealed on this street
    pub fn board_len(self) -> usize {
        match self {
            Street::Flop => 3,
            Street::Turn => 4,
            Street::River => 5,
        }
    }

    /// Street name used as the key of the persisted table
    pub fn name(self) -> &'static str {
        match self {
            Street::Flop => "flop",
            Street::Turn => "turn",
            Street::River => "river",
        }
    }

    fn index(self) -> u64 {
        match self {
            Street::Flop => 0,
            Street::Turn => 1,
            Street::River => 2,
        }
    }
}

impl fmt::Display for Street {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Representative center of one equity cluster
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BucketCenter {
    pub mean: f64,
    pub variance: f64,
}

/// Street name -> ordered bucket centers, the run's output artifact
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BucketTable {
    streets: BTreeMap<String, Vec<BucketCenter>>,
}

impl BucketTable {
    pub fn new() -> Self {
        BucketTable::default()
    }

    pub fn insert(&mut self, street: Street, centers: Vec<BucketCenter>) {
        self.streets.insert(street.name().to_string(), centers);
    }

    pub fn get(&self, street: Street) -> Option<&[BucketCenter]> {
        self.streets.get(street.name()).map(Vec::as_slice)
    }

    /// Writes the table as json
    pub fn save<P: AsRef<Path>>(&self, path: P) -> io::Result<()> {
        let file = File::create(path)?;
        serde_json::to_writer(file, self).map_err(io::Error::from)
    }

    /// Reads a table written by `save`
    pub fn load<P: AsRef<Path>>(path: P) -> io::Result<Self> {
        let file = File::open(path)?;
        serde_json::from_reader(file).map_err(io::Error::from)
    }
}

/// splitmix64 mix, used to derive independent seed streams
fn splitmix64(mut x: u64) -> u64 {
    x = x.wrapping_add(0x9e37_79b9_7f4a_7c15);
    x = (x ^ (x >> 30)).wrapping_mul(0xbf58_476d_1ce4_e5b9);
    x = (x ^ (x >> 27)).wrapping_mul(0x94d0_49bb_1331_11eb);
    x ^ (x >> 31)
}

/// Derives the seed of one work unit from a parent seed and stream id
///
/// Every situation owns its own generator seeded this way, so results do
/// not depend on how situations are split across worker threads.
fn derive_seed(seed: u64, stream: u64) -> u64 {
    splitmix64(seed ^ splitmix64(stream))
}

// stream id reserved for clustering initialization
const CLUSTER_STREAM: u64 = u64::MAX;

/// upper bound on Lloyd iterations before clustering stops
const KMEANS_MAX_ITERS: usize = 100;

/// Samples a random hero hand and board for a street from a full deck
fn sample_situation<R: Rng>(street: Street, rng: &mut R) -> (Vec<Card>, Vec<Card>) {
    let mut deck = DECK.to_vec();
    deck.shuffle(rng);
    let hero = deck[..HAND_CARDS].to_vec();
    let board = deck[HAND_CARDS..HAND_CARDS + street.board_len()].to_vec();
    (hero, board)
}

/// Builds the bucket centers for one street
///
/// Draws `num_situations` random situations, estimates each with
/// `equity_iters` opponent samples, and clusters the (mean, variance)
/// features into at most `k` centers. Situations are spread over
/// `n_threads` scoped workers; each situation derives its own generator
/// from `seed`, the street, and its index, so the output is identical
/// for any thread count.
///
/// Returned centers are sorted by (mean, variance).
pub fn build_buckets(
    street: Street,
    num_situations: usize,
    equity_iters: usize,
    k: usize,
    n_threads: usize,
    seed: u64,
) -> Result<Vec<BucketCenter>, EquityError> {
    info!(
        "building {} buckets for {}: {} situations x {} equity trials",
        k, street, num_situations, equity_iters
    );
    let street_seed = derive_seed(seed, street.index());
    let n_threads = n_threads.max(1);

    let mut features = vec![[0.0f64; 2]; num_situations];
    let chunk_size = (num_situations + n_threads - 1) / n_threads;
    if num_situations > 0 {
        crossbeam::scope(|scope| {
            let mut handles = Vec::with_capacity(n_threads);
            for (chunk_idx, chunk) in features.chunks_mut(chunk_size).enumerate() {
                handles.push(scope.spawn(move |_| -> Result<(), EquityError> {
                    for (offset, feature) in chunk.iter_mut().enumerate() {
                        let idx = chunk_idx * chunk_size + offset;
                        let mut rng =
                            SmallRng::seed_from_u64(derive_seed(street_seed, idx as u64));
                        let (hero, board) = sample_situation(street, &mut rng);
                        let est =
                            equity_vs_random(&hero, &board, &DECK[..], equity_iters, &mut rng)?;
                        *feature = [est.mean, est.variance()];
                    }
                    Ok(())
                }));
            }
            handles
                .into_iter()
                .map(|h| h.join().unwrap())
                .collect::<Result<(), EquityError>>()
        })
        .unwrap()?;
    }

    let mut cluster_rng = SmallRng::seed_from_u64(derive_seed(street_seed, CLUSTER_STREAM));
    let mut centers: Vec<BucketCenter> =
        kmeans::cluster(&features, k, KMEANS_MAX_ITERS, &mut cluster_rng)
            .into_iter()
            .map(|c| BucketCenter {
                mean: c[0],
                variance: c[1],
            })
            .collect();
    centers.sort_by(|a, b| {
        (a.mean, a.variance)
            .partial_cmp(&(b.mean, b.variance))
            .expect("bucket centers are finite")
    });
    info!("{}: {} centers", street, centers.len());
    Ok(centers)
}
