use std::process;

use log::{error, info};

use postflop_buckets::bucketing::{build_buckets, BucketTable, Street};

const OUTPUT_PATH: &str = "postflop_bucket_centers.json";

// per street bucket counts (typical: more for flop than river)
const CONFIGS: [(Street, usize); 3] = [
    (Street::Flop, 400),
    (Street::Turn, 300),
    (Street::River, 200),
];

const NUM_SITUATIONS: usize = 25000;
const EQUITY_ITERS: usize = 800;
const SEED: u64 = 1337;

fn run() -> Result<(), String> {
    let n_threads = std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1);

    let mut table = BucketTable::new();
    for &(street, k) in CONFIGS.iter() {
        let centers = build_buckets(street, NUM_SITUATIONS, EQUITY_ITERS, k, n_threads, SEED)
            .map_err(|e| format!("{}: {}", street, e))?;
        table.insert(street, centers);
    }

    table
        .save(OUTPUT_PATH)
        .map_err(|e| format!("writing {}: {}", OUTPUT_PATH, e))?;
    info!("wrote {}", OUTPUT_PATH);
    Ok(())
}

fn main() {
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    if let Err(e) = run() {
        error!("{}", e);
        process::exit(1);
    }
}
