use std::{thread, time::Duration};

use tracing::{debug, warn};

use crate::{
    ambiguous::AmbiguousGeneFilter,
    counts::{CountsTable, LookupFailure},
    progress::{CancelToken, ProgressObserver},
    provider::LiteratureCountProvider,
};

/// Identity of a universe cache. A cache is reused only while every
/// component of its key is unchanged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UniverseKey {
    pub universe: Vec<String>,
    pub terms: Vec<String>,
    pub remove_ambiguous: bool,
}

/// Population-wide counts over a reference gene universe, frozen after the
/// build so the resampling loop can read it without locking.
#[derive(Debug, Clone)]
pub struct UniverseCache {
    key: UniverseKey,
    table: CountsTable,
    pool: Vec<String>,
    failures: Vec<LookupFailure>,
    complete: bool,
}

impl UniverseCache {
    pub fn key(&self) -> &UniverseKey {
        &self.key
    }

    pub fn table(&self) -> &CountsTable {
        &self.table
    }

    /// Genes eligible for null sampling: ambiguity-filtered and successfully
    /// looked up.
    pub fn pool(&self) -> &[String] {
        &self.pool
    }

    pub fn failures(&self) -> &[LookupFailure] {
        &self.failures
    }

    /// False when the build was cancelled early. Partial contents are kept
    /// for inspection but never reused for a later test.
    pub fn is_complete(&self) -> bool {
        self.complete
    }
}

/// Builds universe caches by querying the provider once per universe gene.
///
/// This phase dominates wall-clock cost: every call is followed by a
/// mandatory pause to respect the external service's rate limit.
pub struct UniverseCacheBuilder<'a, P: LiteratureCountProvider> {
    provider: &'a P,
    pacing: Duration,
}

impl<'a, P: LiteratureCountProvider> UniverseCacheBuilder<'a, P> {
    pub fn new(provider: &'a P, pacing: Duration) -> Self {
        Self { provider, pacing }
    }

    /// One provider call per universe gene. A failed call is recorded and the
    /// gene dropped from the pool; a single failure never aborts the build.
    /// Cancellation is honored between calls and keeps the partial table.
    pub fn build(
        &self,
        universe: &[String],
        terms: &[String],
        filter: AmbiguousGeneFilter,
        progress: &dyn ProgressObserver,
        cancel: &CancelToken,
    ) -> UniverseCache {
        let key = UniverseKey {
            universe: universe.to_vec(),
            terms: terms.to_vec(),
            remove_ambiguous: filter.is_enabled(),
        };
        let eligible = filter.filter(universe);
        let total = eligible.len();

        let mut table = CountsTable::new();
        let mut pool = Vec::with_capacity(total);
        let mut failures = Vec::new();
        let mut complete = true;

        for (i, gene) in eligible.iter().enumerate() {
            if cancel.is_cancelled() {
                debug!(completed = i, total, "universe build cancelled, keeping partial cache");
                complete = false;
                break;
            }
            if i > 0 && !self.pacing.is_zero() {
                thread::sleep(self.pacing);
            }
            match self.provider.lookup(gene, terms) {
                Ok(counts) => {
                    for (term, count) in terms.iter().zip(counts) {
                        table.insert(gene, term, count);
                    }
                    pool.push(gene.clone());
                }
                Err(err) => {
                    warn!(%gene, error = %err, "literature lookup failed, dropping gene from pool");
                    failures.push(LookupFailure::new(gene.clone(), err.to_string()));
                }
            }
            progress.lookup_done(i + 1, total);
        }

        UniverseCache {
            key,
            table,
            pool,
            failures,
            complete,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{progress::NoProgress, provider::TableProvider};

    struct FlakyProvider {
        inner: TableProvider,
        failing_gene: String,
    }

    impl LiteratureCountProvider for FlakyProvider {
        fn lookup(&self, gene: &str, terms: &[String]) -> anyhow::Result<Vec<u64>> {
            if gene == self.failing_gene {
                anyhow::bail!("service unavailable");
            }
            self.inner.lookup(gene, terms)
        }
    }

    fn genes(symbols: &[&str]) -> Vec<String> {
        symbols.iter().map(|s| s.to_string()).collect()
    }

    fn terms() -> Vec<String> {
        vec!["apoptosis".to_string()]
    }

    #[test]
    fn test_build_caches_every_universe_gene() {
        let provider = TableProvider::new()
            .with("G1", "apoptosis", 1)
            .with("G2", "apoptosis", 2)
            .with("G3", "apoptosis", 3);
        let builder = UniverseCacheBuilder::new(&provider, Duration::ZERO);
        let cache = builder.build(
            &genes(&["G1", "G2", "G3"]),
            &terms(),
            AmbiguousGeneFilter::new(true),
            &NoProgress,
            &CancelToken::new(),
        );
        assert!(cache.is_complete());
        assert_eq!(cache.pool(), genes(&["G1", "G2", "G3"]).as_slice());
        assert_eq!(cache.table().get("G2", "apoptosis"), Some(2));
        assert!(cache.failures().is_empty());
    }

    #[test]
    fn test_ambiguous_genes_never_enter_the_pool() {
        let provider = TableProvider::new()
            .with("CAT", "apoptosis", 100)
            .with("TP53", "apoptosis", 5);
        let builder = UniverseCacheBuilder::new(&provider, Duration::ZERO);
        let cache = builder.build(
            &genes(&["CAT", "TP53", "SET"]),
            &terms(),
            AmbiguousGeneFilter::new(true),
            &NoProgress,
            &CancelToken::new(),
        );
        assert_eq!(cache.pool(), genes(&["TP53"]).as_slice());
        assert_eq!(cache.table().get("CAT", "apoptosis"), None);
        assert!(cache.key().remove_ambiguous);
    }

    #[test]
    fn test_single_failure_is_recorded_not_fatal() {
        let provider = FlakyProvider {
            inner: TableProvider::new()
                .with("G1", "apoptosis", 1)
                .with("G3", "apoptosis", 3),
            failing_gene: "G2".to_string(),
        };
        let builder = UniverseCacheBuilder::new(&provider, Duration::ZERO);
        let cache = builder.build(
            &genes(&["G1", "G2", "G3"]),
            &terms(),
            AmbiguousGeneFilter::new(true),
            &NoProgress,
            &CancelToken::new(),
        );
        assert!(cache.is_complete());
        assert_eq!(cache.pool(), genes(&["G1", "G3"]).as_slice());
        assert_eq!(cache.failures().len(), 1);
        assert_eq!(cache.failures()[0].gene, "G2");
        assert_eq!(cache.table().get("G2", "apoptosis"), None);
    }

    #[test]
    fn test_cancellation_keeps_partial_cache() {
        let provider = TableProvider::new().with("G1", "apoptosis", 1);
        let cancel = CancelToken::new();
        cancel.cancel();
        let builder = UniverseCacheBuilder::new(&provider, Duration::ZERO);
        let cache = builder.build(
            &genes(&["G1", "G2"]),
            &terms(),
            AmbiguousGeneFilter::new(true),
            &NoProgress,
            &cancel,
        );
        assert!(!cache.is_complete());
        assert!(cache.pool().is_empty());
    }

    #[test]
    fn test_progress_is_reported_per_gene() {
        use std::sync::atomic::{AtomicUsize, Ordering};

        struct CountingObserver(AtomicUsize);
        impl ProgressObserver for CountingObserver {
            fn lookup_done(&self, _completed: usize, _total: usize) {
                self.0.fetch_add(1, Ordering::Relaxed);
            }
        }

        let provider = TableProvider::new();
        let observer = CountingObserver(AtomicUsize::new(0));
        let builder = UniverseCacheBuilder::new(&provider, Duration::ZERO);
        builder.build(
            &genes(&["G1", "G2", "G3"]),
            &terms(),
            AmbiguousGeneFilter::new(false),
            &observer,
            &CancelToken::new(),
        );
        assert_eq!(observer.0.load(Ordering::Relaxed), 3);
    }
}
