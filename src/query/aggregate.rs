// src/query/aggregate.rs

use std::collections::BTreeMap;

/// Groups rows by key. Keys come back in ascending order and rows keep their
/// input order within a group, so every downstream pass is deterministic.
pub fn group_by<K, T, I, F>(rows: I, key: F) -> BTreeMap<K, Vec<T>>
where
    K: Ord,
    I: IntoIterator<Item = T>,
    F: Fn(&T) -> K,
{
    let mut groups: BTreeMap<K, Vec<T>> = BTreeMap::new();
    for row in rows {
        groups.entry(key(&row)).or_default().push(row);
    }
    groups
}

/// Single-pass accumulator for count, sum, mean, sample deviation and range
/// (Welford's update).
#[derive(Debug, Clone, Default)]
pub struct RunningStats {
    count: usize,
    sum: f64,
    mean: f64,
    m2: f64,
    min: Option<f64>,
    max: Option<f64>,
}

impl RunningStats {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, value: f64) {
        self.count += 1;
        self.sum += value;
        let delta = value - self.mean;
        self.mean += delta / self.count as f64;
        self.m2 += delta * (value - self.mean);
        self.min = Some(self.min.map_or(value, |m| m.min(value)));
        self.max = Some(self.max.map_or(value, |m| m.max(value)));
    }

    pub fn count(&self) -> usize {
        self.count
    }

    pub fn sum(&self) -> f64 {
        self.sum
    }

    pub fn mean(&self) -> Option<f64> {
        (self.count > 0).then_some(self.mean)
    }

    /// Sample standard deviation (n - 1 denominator). Undefined below two
    /// observations.
    pub fn std_dev(&self) -> Option<f64> {
        (self.count > 1).then(|| (self.m2 / (self.count - 1) as f64).sqrt())
    }

    pub fn min(&self) -> Option<f64> {
        self.min
    }

    pub fn max(&self) -> Option<f64> {
        self.max
    }
}

impl FromIterator<f64> for RunningStats {
    fn from_iter<I: IntoIterator<Item = f64>>(iter: I) -> Self {
        let mut stats = Self::new();
        for value in iter {
            stats.push(value);
        }
        stats
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sample_std_dev_matches_textbook_value() {
        let stats: RunningStats = [2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0].into_iter().collect();
        assert_eq!(stats.count(), 8);
        assert!((stats.mean().unwrap() - 5.0).abs() < 1e-12);
        // Population sd is 2.0; sample sd is sqrt(32/7).
        assert!((stats.std_dev().unwrap() - (32.0f64 / 7.0).sqrt()).abs() < 1e-12);
        assert_eq!(stats.min(), Some(2.0));
        assert_eq!(stats.max(), Some(9.0));
    }

    #[test]
    fn single_observation_has_no_std_dev() {
        let stats: RunningStats = [3.0].into_iter().collect();
        assert_eq!(stats.mean(), Some(3.0));
        assert_eq!(stats.std_dev(), None);
        assert_eq!(RunningStats::new().mean(), None);
    }

    #[test]
    fn group_by_orders_keys_and_keeps_row_order() {
        let groups = group_by(vec![(2, 'a'), (1, 'b'), (2, 'c')], |r| r.0);
        let keys: Vec<_> = groups.keys().copied().collect();
        assert_eq!(keys, vec![1, 2]);
        assert_eq!(groups[&2], vec![(2, 'a'), (2, 'c')]);
    }
}
