//! Basic aggregation over numeric values.

use crate::domain::Record;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Summary {
    pub count: usize,
    pub mean: f64,
    pub min: f64,
    pub max: f64,
}

impl Summary {
    /// `None` for an empty input.
    pub fn from_values<I: IntoIterator<Item = f64>>(values: I) -> Option<Self> {
        let mut count = 0usize;
        let mut sum = 0.0;
        let mut min = f64::INFINITY;
        let mut max = f64::NEG_INFINITY;
        for v in values {
            count += 1;
            sum += v;
            min = min.min(v);
            max = max.max(v);
        }
        (count > 0).then(|| Self {
            count,
            mean: sum / count as f64,
            min,
            max,
        })
    }

    /// Summary of the present `numeric_attribute` values; absent values are skipped.
    pub fn of_records(records: &[Record]) -> Option<Self> {
        Self::from_values(
            records
                .iter()
                .filter_map(|r| r.numeric_attribute)
                .map(|n| n as f64),
        )
    }
}

impl fmt::Display for Summary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "n={} mean={:.2} min={:.2} max={:.2}",
            self.count, self.mean, self.min, self.max
        )
    }
}
