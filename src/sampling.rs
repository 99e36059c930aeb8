use rand::{seq::IteratorRandom, SeedableRng};
use rand_chacha::ChaCha8Rng;
use rayon::prelude::*;

use crate::{
    config::ScoreCap, error::LitScoreError, progress::CancelToken, score::gene_contribution,
    universe::UniverseCache,
};

/// Trials per cancellation check in the parallel resampling loop.
const BATCH_SIZE: usize = 1024;

/// Draws `nsim` random panels of `k` distinct genes from the cache pool and
/// scores each against the cached counts.
///
/// Runs entirely against the frozen cache, parallel over trial batches.
/// Each trial seeds its own `ChaCha8Rng` from `seed` and the trial index, so
/// a fixed seed gives identical output regardless of thread count. Scores
/// are returned in trial order.
pub fn sample_null_scores(
    cache: &UniverseCache,
    k: usize,
    nsim: usize,
    cap: ScoreCap,
    seed: u64,
    cancel: &CancelToken,
) -> Result<Vec<f64>, LitScoreError> {
    if nsim == 0 {
        return Err(LitScoreError::InvalidSimulationCount(nsim));
    }
    let pool = cache.pool();
    if pool.len() < k {
        return Err(LitScoreError::InsufficientUniverse {
            universe: pool.len(),
            required: k,
        });
    }

    let terms = cache.key().terms.as_slice();
    // One capped sum per pool gene, so a draw's score reduces to summing the
    // drawn entries.
    let contributions: Vec<f64> = pool
        .iter()
        .map(|gene| gene_contribution(cache.table(), gene, terms, cap))
        .collect();
    let denominator = (k * terms.len()) as f64;

    let n_batches = nsim.div_ceil(BATCH_SIZE);
    let batches = (0..n_batches)
        .into_par_iter()
        .map(|batch| {
            if cancel.is_cancelled() {
                return Err(LitScoreError::Cancelled);
            }
            let start = batch * BATCH_SIZE;
            let end = nsim.min(start + BATCH_SIZE);
            let scores = (start..end)
                .map(|trial| {
                    let mut rng = ChaCha8Rng::seed_from_u64(seed.wrapping_add(trial as u64));
                    let drawn = (0..pool.len()).choose_multiple(&mut rng, k);
                    let total: f64 = drawn.iter().map(|i| contributions[*i]).sum();
                    total / denominator
                })
                .collect::<Vec<_>>();
            Ok(scores)
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(batches.into_iter().flatten().collect())
}
