use crate::domain::model::{AggregateStats, Record};

/// Recompute aggregate statistics over a full record batch.
///
/// Always computed once per batch, never incrementally during collection, so
/// a partially-aggregated state is never observable.
pub fn compute_stats(records: &[Record]) -> AggregateStats {
    let total_count = records.len();
    let verified_count = records.iter().filter(|r| r.verified).count();
    let average_public_score = if total_count > 0 {
        records.iter().map(|r| r.public_score as f64).sum::<f64>() / total_count as f64
    } else {
        0.0
    };
    AggregateStats { total_count, verified_count, average_public_score }
}
