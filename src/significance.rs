use crate::error::LitScoreError;

/// One-sided right-tail empirical p-value.
///
/// Fraction of null scores at least as large as the observed score. Ties
/// count toward the numerator, so the test never understates significance.
pub fn empirical_pvalue(observed: f64, null_scores: &[f64]) -> Result<f64, LitScoreError> {
    if null_scores.is_empty() {
        return Err(LitScoreError::InvalidSimulationCount(0));
    }
    let extreme = null_scores.iter().filter(|score| **score >= observed).count();
    Ok(extreme as f64 / null_scores.len() as f64)
}
