use bon::Builder;

/// Per-pair cap applied to co-occurrence counts before summing.
///
/// Keeps a single heavily published gene from dominating the panel score.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ScoreCap {
    Unbounded,
    Finite(f64),
}

impl ScoreCap {
    /// Clamp a raw count to the cap.
    pub fn clamp(&self, count: u64) -> f64 {
        match self {
            ScoreCap::Unbounded => count as f64,
            ScoreCap::Finite(cap) => (count as f64).min(*cap),
        }
    }
}

/// Parameters of one empirical significance test.
#[derive(Debug, Clone, Copy, Builder)]
pub struct SignificanceConfig {
    /// Number of random panels drawn for the null distribution.
    #[builder(default = 100_000)]
    pub nsim: usize,
    /// Cap applied to each (gene, term) count when scoring null panels.
    #[builder(default = ScoreCap::Unbounded)]
    pub max_score: ScoreCap,
    /// Drop gene symbols that collide with common words from the pool and
    /// the panel size.
    #[builder(default = true)]
    pub remove_ambiguous: bool,
    /// Seed for reproducible sampling.
    #[builder(default = 0)]
    pub seed: u64,
}

impl Default for SignificanceConfig {
    fn default() -> Self {
        Self::builder().build()
    }
}
