//! Hit-rate simulator for every eviction policy.
//!
//! Run with: cargo run --bin hit_rate --release --features simulator
//!
//! Each policy sees the same uniform stream of keys drawn from `[0, keys]`.
//! A miss is followed by `write(key, key)`, as a read-through cache would.
//!
//! Options (all optional):
//!   --accesses <m>   number of reads       (default 1000000)
//!   --keys <n>       largest key           (default 10000)
//!   --capacity <k>   cache capacity        (default 1000)
//!   --seed <s>       RNG seed              (default 42)

use std::env;
use std::process::ExitCode;

use evictkit::builder::{CacheBuilder, CachePolicy};
use evictkit::error::ConfigError;
use evictkit::traits::CoreCache;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

#[derive(Debug, Clone, Copy)]
struct Workload {
    accesses: u64,
    keys: u64,
    capacity: usize,
    seed: u64,
}

impl Default for Workload {
    fn default() -> Self {
        Self {
            accesses: 1_000_000,
            keys: 10_000,
            capacity: 1_000,
            seed: 42,
        }
    }
}

#[derive(Debug, Clone, Copy, Default)]
struct Outcome {
    hits: u64,
    misses: u64,
}

impl Outcome {
    fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }
}

fn parse_args() -> Result<Workload, String> {
    let mut workload = Workload::default();
    let mut args = env::args().skip(1);
    while let Some(flag) = args.next() {
        let value = args
            .next()
            .ok_or_else(|| format!("missing value for {flag}"))?;
        let bad = |_| format!("invalid value for {flag}: {value:?}");
        match flag.as_str() {
            "--accesses" => workload.accesses = value.parse().map_err(bad)?,
            "--keys" => workload.keys = value.parse().map_err(bad)?,
            "--capacity" => workload.capacity = value.parse().map_err(bad)?,
            "--seed" => workload.seed = value.parse().map_err(bad)?,
            _ => return Err(format!("unknown option {flag}")),
        }
    }
    Ok(workload)
}

fn simulate(policy: CachePolicy, workload: Workload) -> Result<Outcome, ConfigError> {
    let mut cache = CacheBuilder::new(workload.capacity).try_build::<u64, u64>(policy)?;
    let mut rng = SmallRng::seed_from_u64(workload.seed);
    let mut outcome = Outcome::default();

    for _ in 0..workload.accesses {
        let key = rng.random_range(0..=workload.keys);
        if cache.read(&key).is_some() {
            outcome.hits += 1;
        } else {
            outcome.misses += 1;
            cache.write(key, key);
        }
    }
    Ok(outcome)
}

fn main() -> ExitCode {
    let workload = match parse_args() {
        Ok(workload) => workload,
        Err(msg) => {
            eprintln!("hit_rate: {msg}");
            return ExitCode::FAILURE;
        },
    };

    println!("evictkit hit-rate simulation");
    println!(
        "accesses={} keys=[0, {}] capacity={} seed={}\n",
        workload.accesses, workload.keys, workload.capacity, workload.seed
    );
    println!("{:<12} {:>10} {:>10}", "Cache type", "Hit rate", "Miss rate");
    println!("{}", "-".repeat(34));

    for policy in CachePolicy::ALL {
        match simulate(policy, workload) {
            Ok(outcome) => {
                let hit_rate = outcome.hit_rate();
                println!(
                    "{:<12} {:>9.4}% {:>9.4}%",
                    format!("cache-{}", policy.name()),
                    hit_rate * 100.0,
                    (1.0 - hit_rate) * 100.0
                );
            },
            Err(err) => {
                eprintln!("hit_rate: {policy}: {err}");
                return ExitCode::FAILURE;
            },
        }
    }
    ExitCode::SUCCESS
}
