// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Parallel batch generation.
//!
//! Each exercise gets its own [`SequenceGenerator`], so nothing is shared
//! between rayon workers apart from the read-only [`RuleConfig`]. With a
//! seed, exercise `i` is driven by `seed + i`, which makes a batch
//! reproducible regardless of thread count or scheduling.

use crate::config::RuleConfig;
use crate::engine::SequenceGenerator;
use crate::sequence::Example;
use crate::state::Statistics;
use rand::rngs::StdRng;
use rand::SeedableRng;
use rayon::prelude::*;
use tracing::info;

/// Generate `count` independent exercises.
pub fn generate_batch(config: &RuleConfig, count: usize) -> Vec<Example> {
    generate_batch_with_statistics(config, count).0
}

/// Like [`generate_batch`], also returning the merged statistics.
pub fn generate_batch_with_statistics(
    config: &RuleConfig,
    count: usize,
) -> (Vec<Example>, Statistics) {
    let results: Vec<(Example, Statistics)> = (0..count)
        .into_par_iter()
        .map(|index| {
            let rng = match config.seed() {
                Some(seed) => StdRng::seed_from_u64(seed.wrapping_add(index as u64)),
                None => StdRng::from_entropy(),
            };
            let mut generator = SequenceGenerator::with_rng(config.clone(), rng);
            let example = generator.generate();
            (example, generator.into_statistics())
        })
        .collect();

    let mut statistics = Statistics::new();
    let examples = results
        .into_iter()
        .map(|(example, stats)| {
            statistics.merge(&stats);
            example
        })
        .collect();

    info!(count, family = %config.family(), "batch generated");
    (examples, statistics)
}
