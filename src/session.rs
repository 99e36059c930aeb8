use std::{thread, time::Duration};

use chrono::{DateTime, Utc};
use itertools::Itertools;
use tracing::{info, warn};

use crate::{
    ambiguous::AmbiguousGeneFilter,
    config::{ScoreCap, SignificanceConfig},
    counts::{CountsTable, LookupFailure},
    error::LitScoreError,
    progress::{CancelToken, ProgressObserver},
    provider::LiteratureCountProvider,
    sampling::sample_null_scores,
    score::enrichment_score,
    significance::empirical_pvalue,
    universe::{UniverseCache, UniverseCacheBuilder, UniverseKey},
};

/// Aggregate owning one scored gene panel and its significance state.
///
/// Construction performs the observed lookups and scoring immediately. The
/// only later mutations are the cached universe table and the p-value filled
/// in by [`significance_test`](Self::significance_test).
pub struct ScoreSession {
    genes: Vec<String>,
    terms: Vec<String>,
    counts: CountsTable,
    literature_score: f64,
    cap: ScoreCap,
    created_at: DateTime<Utc>,
    lookup_failures: Vec<LookupFailure>,
    universe_cache: Option<UniverseCache>,
    p_value: Option<f64>,
}

impl ScoreSession {
    /// Scores `genes` against `terms`: one paced provider call per gene,
    /// failures recorded and skipped. Duplicate symbols are collapsed,
    /// keeping first-seen order for reproducible sampling later.
    pub fn create<P: LiteratureCountProvider>(
        genes: &[String],
        terms: &[String],
        provider: &P,
        cap: ScoreCap,
        pacing: Duration,
    ) -> Result<Self, LitScoreError> {
        let genes: Vec<String> = genes.iter().unique().cloned().collect();
        let terms: Vec<String> = terms.iter().unique().cloned().collect();
        if genes.is_empty() || terms.is_empty() {
            return Err(LitScoreError::EmptyInput);
        }

        let mut counts = CountsTable::new();
        let mut lookup_failures = Vec::new();
        for (i, gene) in genes.iter().enumerate() {
            if i > 0 && !pacing.is_zero() {
                thread::sleep(pacing);
            }
            match provider.lookup(gene, &terms) {
                Ok(row) => {
                    for (term, count) in terms.iter().zip(row) {
                        counts.insert(gene, term, count);
                    }
                }
                Err(err) => {
                    warn!(%gene, error = %err, "literature lookup failed for scored gene");
                    lookup_failures.push(LookupFailure::new(gene.clone(), err.to_string()));
                }
            }
        }

        let literature_score = enrichment_score(&counts, genes.len(), terms.len(), cap)?;
        Ok(Self {
            genes,
            terms,
            counts,
            literature_score,
            cap,
            created_at: Utc::now(),
            lookup_failures,
            universe_cache: None,
            p_value: None,
        })
    }

    /// Empirical significance of the observed score against random same-size
    /// panels drawn from `total_genes`.
    ///
    /// The universe cache is built lazily and reused only while its key
    /// (universe, terms, ambiguous flag) is unchanged; any key change or an
    /// incomplete earlier build triggers a rebuild. The p-value is stored
    /// only after the full `nsim`-length simulation completes.
    pub fn significance_test<P: LiteratureCountProvider>(
        &mut self,
        provider: &P,
        total_genes: &[String],
        config: SignificanceConfig,
        pacing: Duration,
        progress: &dyn ProgressObserver,
        cancel: &CancelToken,
    ) -> Result<f64, LitScoreError> {
        if config.nsim == 0 {
            return Err(LitScoreError::InvalidSimulationCount(0));
        }

        let filter = AmbiguousGeneFilter::new(config.remove_ambiguous);
        // Panel size is filtered; the observed score itself stays as
        // computed at construction (see DESIGN.md on this asymmetry).
        let k = filter.filter(&self.genes).len();
        if k == 0 {
            return Err(LitScoreError::EmptyInput);
        }

        let universe: Vec<String> = total_genes.iter().unique().cloned().collect();
        // Fail fast before paying for a cache build: even a fully successful
        // build cannot yield a pool larger than the filtered universe.
        let eligible = filter.filter(&universe).len();
        if eligible < k {
            return Err(LitScoreError::InsufficientUniverse {
                universe: eligible,
                required: k,
            });
        }

        let key = UniverseKey {
            universe,
            terms: self.terms.clone(),
            remove_ambiguous: config.remove_ambiguous,
        };
        let reusable = matches!(
            &self.universe_cache,
            Some(cache) if *cache.key() == key && cache.is_complete()
        );
        if !reusable {
            info!(
                universe = key.universe.len(),
                terms = key.terms.len(),
                "building universe count cache"
            );
            let built = UniverseCacheBuilder::new(provider, pacing).build(
                &key.universe,
                &key.terms,
                filter,
                progress,
                cancel,
            );
            let cancelled = !built.is_complete();
            // Partial contents are kept for inspection but never reused.
            self.universe_cache = Some(built);
            if cancelled {
                return Err(LitScoreError::Cancelled);
            }
        }
        let cache = self
            .universe_cache
            .as_ref()
            .expect("universe cache is set after build");

        let null_scores = sample_null_scores(
            cache,
            k,
            config.nsim,
            config.max_score,
            config.seed,
            cancel,
        )?;
        let p_value = empirical_pvalue(self.literature_score, &null_scores)?;
        self.p_value = Some(p_value);
        Ok(p_value)
    }

    pub fn genes(&self) -> &[String] {
        &self.genes
    }

    pub fn terms(&self) -> &[String] {
        &self.terms
    }

    /// Observed (gene, term) counts gathered at construction.
    pub fn counts(&self) -> &CountsTable {
        &self.counts
    }

    pub fn literature_score(&self) -> f64 {
        self.literature_score
    }

    pub fn cap(&self) -> ScoreCap {
        self.cap
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Observed-phase lookups that failed and were skipped.
    pub fn lookup_failures(&self) -> &[LookupFailure] {
        &self.lookup_failures
    }

    /// Universe-wide counts from the most recent significance test, if any.
    pub fn all_counts(&self) -> Option<&CountsTable> {
        self.universe_cache.as_ref().map(UniverseCache::table)
    }

    /// Identity of the universe the cached counts were built for.
    pub fn total_genes(&self) -> Option<&[String]> {
        self.universe_cache
            .as_ref()
            .map(|cache| cache.key().universe.as_slice())
    }

    /// Undefined until a significance test has completed.
    pub fn p_value(&self) -> Option<f64> {
        self.p_value
    }
}
