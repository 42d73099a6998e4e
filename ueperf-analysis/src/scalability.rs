//! Scale bucketing of configurations by simulated node count

use crate::stats;
use crate::store::{Dataset, DatasetStore};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Node count assumed for labels without a scale hint.
pub const DEFAULT_NODE_COUNT: u32 = 1000;

/// Label hints in match order. Matching is case-sensitive.
pub const SCALE_RULES: &[(&str, u32)] = &[("1K", 1024), ("10K", 10000)];

/// Node count inferred from a configuration label.
pub fn scale_bucket(label: &str) -> u32 {
    SCALE_RULES
        .iter()
        .find(|(hint, _)| label.contains(hint))
        .map(|&(_, nodes)| nodes)
        .unwrap_or(DEFAULT_NODE_COUNT)
}

/// Labels of every configuration, grouped by bucket.
pub fn bucket_members(store: &DatasetStore) -> BTreeMap<u32, Vec<String>> {
    let mut buckets: BTreeMap<u32, Vec<String>> = BTreeMap::new();
    for label in store.labels() {
        buckets.entry(scale_bucket(label)).or_default().push(label.to_string());
    }
    buckets
}

/// Per-key arithmetic mean over `datasets`.
///
/// A key only averages over the datasets that contain it; absent keys do not
/// count as zero.
pub fn merge_mean<'a, I>(datasets: I) -> Dataset
where
    I: IntoIterator<Item = &'a Dataset>,
{
    let mut samples: IndexMap<&str, Vec<f64>> = IndexMap::new();
    for data in datasets {
        for (key, &value) in data {
            samples.entry(key.as_str()).or_default().push(value);
        }
    }

    samples
        .into_iter()
        .map(|(key, values)| (key.to_string(), stats::mean(&values)))
        .collect()
}

/// Merged dataset per node-count bucket.
pub fn group_by_scale(store: &DatasetStore) -> BTreeMap<u32, Dataset> {
    let mut members: BTreeMap<u32, Vec<&Dataset>> = BTreeMap::new();
    for (label, data) in store.iter() {
        members.entry(scale_bucket(label)).or_default().push(data);
    }

    members
        .into_iter()
        .map(|(nodes, datasets)| (nodes, merge_mean(datasets)))
        .collect()
}

/// Representative throughput of one bucket, for trend plotting.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScalePoint {
    pub nodes: u32,
    pub throughput: f64,
}

/// One point per bucket: the first throughput key of the merged dataset, or
/// 0 if the bucket has none. Not a true scalability statistic, only a trend.
pub fn scale_trend(buckets: &BTreeMap<u32, Dataset>) -> Vec<ScalePoint> {
    buckets
        .iter()
        .map(|(&nodes, data)| ScalePoint {
            nodes,
            throughput: data
                .iter()
                .find(|(key, _)| key.to_lowercase().contains("throughput"))
                .map(|(_, &value)| value)
                .unwrap_or(0.0),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dataset(entries: &[(&str, f64)]) -> Dataset {
        entries.iter().map(|(k, v)| (k.to_string(), *v)).collect()
    }

    fn store(entries: Vec<(&str, Dataset)>) -> DatasetStore {
        entries.into_iter().map(|(l, d)| (l.to_string(), d)).collect()
    }

    #[test]
    fn test_scale_bucket_rules() {
        assert_eq!(scale_bucket("cfg_1K"), 1024);
        assert_eq!(scale_bucket("cfg_10K"), 10000);
        assert_eq!(scale_bucket("fat_tree_1K_incast"), 1024);
        assert_eq!(scale_bucket("baseline"), DEFAULT_NODE_COUNT);
        assert_eq!(scale_bucket("cfg_1k"), DEFAULT_NODE_COUNT);
    }

    #[test]
    fn test_merge_mean_excludes_missing_keys() {
        let d1 = dataset(&[("k", 2.0)]);
        let d2 = dataset(&[("k", 4.0)]);
        let d3 = dataset(&[("other", 7.0)]);

        assert_eq!(merge_mean([&d1, &d2])["k"], 3.0);

        let merged = merge_mean([&d1, &d2, &d3]);
        assert_eq!(merged["k"], 3.0);
        assert_eq!(merged["other"], 7.0);
    }

    #[test]
    fn test_merge_mean_of_huge_values_is_finite() {
        let d1 = dataset(&[("app.throughput", 1e308)]);
        let d2 = dataset(&[("app.throughput", 1e308)]);

        assert_eq!(merge_mean([&d1, &d2])["app.throughput"], 1e308);
    }

    #[test]
    fn test_group_by_scale() {
        let store = store(vec![
            ("a_1K", dataset(&[("app.throughput", 10.0)])),
            ("b_1K", dataset(&[("app.throughput", 20.0)])),
            ("c_10K", dataset(&[("app.throughput", 5.0)])),
            ("plain", dataset(&[("app.throughput", 1.0)])),
        ]);

        let buckets = group_by_scale(&store);
        assert_eq!(buckets.keys().copied().collect::<Vec<_>>(), vec![1000, 1024, 10000]);
        assert_eq!(buckets[&1024]["app.throughput"], 15.0);
        assert_eq!(buckets[&10000]["app.throughput"], 5.0);
    }

    #[test]
    fn test_bucket_membership_is_total_and_idempotent() {
        let store = store(vec![
            ("x_1K", Dataset::new()),
            ("y_10K", Dataset::new()),
            ("z", Dataset::new()),
        ]);

        let first = bucket_members(&store);
        assert_eq!(first, bucket_members(&store));

        let total: usize = first.values().map(Vec::len).sum();
        assert_eq!(total, store.len());
        assert_eq!(first[&1024], vec!["x_1K".to_string()]);
    }

    #[test]
    fn test_scale_trend_uses_first_throughput_key() {
        let mut buckets = BTreeMap::new();
        buckets.insert(
            1024,
            dataset(&[("link.utilization", 0.5), ("app.Throughput", 8.0), ("net.throughput", 9.0)]),
        );
        buckets.insert(10000, dataset(&[("link.utilization", 0.7)]));

        let trend = scale_trend(&buckets);
        assert_eq!(
            trend,
            vec![
                ScalePoint { nodes: 1024, throughput: 8.0 },
                ScalePoint { nodes: 10000, throughput: 0.0 },
            ]
        );
    }

    #[test]
    fn test_empty_store_has_no_buckets() {
        assert!(group_by_scale(&DatasetStore::new()).is_empty());
        assert!(scale_trend(&BTreeMap::new()).is_empty());
    }
}
