use thiserror::Error;

/// Errors surfaced by the scoring and significance machinery.
///
/// Per-gene lookup failures are deliberately absent from this taxonomy: they
/// are absorbed into [`LookupFailure`](crate::counts::LookupFailure) records
/// and never abort a batch.
#[derive(Debug, Error)]
pub enum LitScoreError {
    #[error("gene set and term set must be non-empty")]
    EmptyInput,

    #[error("no literature counts could be retrieved, score is undefined")]
    EmptyCounts,

    #[error("universe holds {universe} usable genes but {required} are needed to sample without replacement")]
    InsufficientUniverse { universe: usize, required: usize },

    #[error("simulation count must be positive, got {0}")]
    InvalidSimulationCount(usize),

    #[error("operation cancelled before completion")]
    Cancelled,
}
