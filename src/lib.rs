//! litscore: literature enrichment scoring with empirical significance
//!
//! This library scores a gene panel against a set of topical terms using
//! literature co-occurrence counts, then judges whether the score is higher
//! than expected by chance: it draws random same-size panels from a reference
//! gene universe, scores each against a cached population-wide count table,
//! and reports the right-tail empirical p-value.
//!
//! The main components of this library are:
//! - `ScoreSession`: aggregate owning the scored panel, cache, and p-value
//! - `LiteratureCountProvider`: seam to the external count lookup service
//! - `SignificanceConfig` / `ScoreCap`: test parameters
//! - `sample_null_scores` / `empirical_pvalue`: the permutation machinery

mod ambiguous;
mod config;
mod counts;
mod error;
mod progress;
mod provider;
mod sampling;
mod score;
mod session;
mod significance;
mod universe;

pub use ambiguous::AmbiguousGeneFilter;
pub use config::{ScoreCap, SignificanceConfig};
pub use counts::{CountsTable, LookupFailure};
pub use error::LitScoreError;
pub use progress::{CancelToken, NoProgress, ProgressObserver};
pub use provider::{LiteratureCountProvider, TableProvider};
pub use sampling::sample_null_scores;
pub use score::enrichment_score;
pub use session::ScoreSession;
pub use significance::empirical_pvalue;
pub use universe::{UniverseCache, UniverseCacheBuilder, UniverseKey};
