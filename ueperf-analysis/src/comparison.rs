//! Protocol comparison against reference baselines
//!
//! Gains are ratios (above 1 is better); reductions are fractional decreases
//! (higher is better).

use crate::aggregate::CategorySamples;
use crate::classify::Classifier;
use crate::stats;
use crate::store::DatasetStore;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

pub const VS_ROCE: &str = "ultra_ethernet_vs_roce";
pub const VS_INFINIBAND: &str = "ultra_ethernet_vs_infiniband";

/// Relative improvement of the analyzed system over one baseline.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ComparisonResult {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub throughput_gain: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub latency_reduction: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tail_latency_reduction: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cost_reduction: Option<f64>,
}

impl ComparisonResult {
    /// Present fields as `(name, value)`, in declaration order.
    pub fn fields(&self) -> Vec<(&'static str, f64)> {
        [
            ("throughput_gain", self.throughput_gain),
            ("latency_reduction", self.latency_reduction),
            ("tail_latency_reduction", self.tail_latency_reduction),
            ("cost_reduction", self.cost_reduction),
        ]
        .into_iter()
        .filter_map(|(name, value)| value.map(|v| (name, v)))
        .collect()
    }
}

/// Published reference ratios versus RoCE and InfiniBand.
///
/// These are constants, not measurements; see [`compare_against_baseline`]
/// for comparisons derived from baseline result sets.
pub fn reference_comparisons() -> BTreeMap<String, ComparisonResult> {
    BTreeMap::from([
        (
            VS_ROCE.to_string(),
            ComparisonResult {
                throughput_gain: Some(1.15),
                latency_reduction: Some(0.25),
                tail_latency_reduction: Some(0.35),
                cost_reduction: None,
            },
        ),
        (
            VS_INFINIBAND.to_string(),
            ComparisonResult {
                throughput_gain: Some(0.95),
                latency_reduction: Some(0.10),
                tail_latency_reduction: None,
                cost_reduction: Some(0.40),
            },
        ),
    ])
}

/// Category means of a whole store; configurations without samples in a
/// category do not dilute that category's mean.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
struct StoreMeans {
    app_throughput: Option<f64>,
    avg_latency: Option<f64>,
    tail_latency: Option<f64>,
}

fn mean_of_means<'a>(groups: impl Iterator<Item = &'a Vec<f64>>) -> Option<f64> {
    let means: Vec<f64> = groups
        .filter(|values| !values.is_empty())
        .map(|values| stats::mean(values))
        .collect();
    (!means.is_empty()).then(|| stats::mean(&means))
}

fn store_means(store: &DatasetStore, classifier: &Classifier) -> StoreMeans {
    let samples: Vec<CategorySamples> = store
        .iter()
        .map(|(_, data)| CategorySamples::collect(data, classifier))
        .collect();

    StoreMeans {
        app_throughput: mean_of_means(samples.iter().map(|s| &s.app_throughput)),
        avg_latency: mean_of_means(samples.iter().map(|s| &s.average_latency)),
        tail_latency: mean_of_means(samples.iter().map(|s| &s.tail_latency)),
    }
}

fn gain(system: Option<f64>, baseline: Option<f64>) -> Option<f64> {
    match (system, baseline) {
        (Some(s), Some(b)) if b > 0.0 => Some(stats::ratio(s, b)),
        _ => None,
    }
}

fn reduction(system: Option<f64>, baseline: Option<f64>) -> Option<f64> {
    match (system, baseline) {
        (Some(s), Some(b)) if b > 0.0 => Some(1.0 - stats::ratio(s, b)),
        _ => None,
    }
}

/// Compare two result sets by their category means.
///
/// A field is only set when both sides have samples for it and the baseline
/// value is positive. Cost is not derivable from scalars and stays unset.
pub fn compare_against_baseline(
    system: &DatasetStore,
    baseline: &DatasetStore,
    classifier: &Classifier,
) -> ComparisonResult {
    let ours = store_means(system, classifier);
    let theirs = store_means(baseline, classifier);

    ComparisonResult {
        throughput_gain: gain(ours.app_throughput, theirs.app_throughput),
        latency_reduction: reduction(ours.avg_latency, theirs.avg_latency),
        tail_latency_reduction: reduction(ours.tail_latency, theirs.tail_latency),
        cost_reduction: None,
    }
}
