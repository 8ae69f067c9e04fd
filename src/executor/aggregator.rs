use super::types::LocalStatistic;

/// Arithmetic mean of a segment. An empty segment has mean `0.0`.
pub fn mean(segment: &[f64]) -> f64 {
    if segment.is_empty() {
        return 0.0;
    }
    segment.iter().sum::<f64>() / segment.len() as f64
}

pub fn local_statistic(segment: &[f64]) -> LocalStatistic {
    LocalStatistic {
        nuts: segment.len(),
        mean: mean(segment),
    }
}
