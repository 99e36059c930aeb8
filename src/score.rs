use crate::{config::ScoreCap, counts::CountsTable, error::LitScoreError};

/// Normalized literature enrichment score.
///
/// Sums the cap-clamped counts present in `table` and divides by
/// `n_genes * n_terms`. Pairs whose lookup failed are absent from the table:
/// they contribute nothing to the numerator while still widening the
/// denominator. A table with zero present entries has no defined score and
/// is reported as [`LitScoreError::EmptyCounts`], never as 0.
pub fn enrichment_score(
    table: &CountsTable,
    n_genes: usize,
    n_terms: usize,
    cap: ScoreCap,
) -> Result<f64, LitScoreError> {
    if table.n_entries() == 0 {
        return Err(LitScoreError::EmptyCounts);
    }
    let total: f64 = table.counts().map(|count| cap.clamp(count)).sum();
    Ok(total / (n_genes as f64 * n_terms as f64))
}

/// Cap-clamped contribution of a single gene across `terms`.
///
/// Missing (gene, term) entries are skipped.
pub fn gene_contribution(
    table: &CountsTable,
    gene: &str,
    terms: &[String],
    cap: ScoreCap,
) -> f64 {
    terms
        .iter()
        .filter_map(|term| table.get(gene, term))
        .map(|count| cap.clamp(count))
        .sum()
}
