//! Category summaries per configuration
//!
//! Every summary is total: missing samples and zero denominators resolve to
//! 0, so a report can always be produced from sparse or partial results.

use crate::classify::{Category, Classifier, Secondary};
use crate::stats;
use crate::store::{Dataset, DatasetStore};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Throughput of one configuration
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ThroughputSummary {
    /// Mean of application-side throughput samples
    pub app_throughput_avg: f64,
    /// Mean of network-side throughput samples
    pub net_throughput_avg: f64,
    /// Application over network mean, 0 when either side has no samples
    pub efficiency: f64,
    /// Throughput samples flagged as neither application nor network.
    /// They do not enter either mean.
    pub unflagged_samples: usize,
}

/// Latency of one configuration
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct LatencySummary {
    pub avg_latency: f64,
    pub tail_latency: f64,
    /// Population standard deviation of the average-latency samples
    pub jitter: f64,
}

/// Link or buffer utilization of one configuration
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct UtilizationSummary {
    pub avg_utilization: f64,
    pub max_utilization: f64,
    pub min_utilization: f64,
    /// `1 - stddev/mean`; 0 when the mean is not positive. Not clamped,
    /// so heavily skewed loads go negative.
    pub load_balance: f64,
}

/// Classified samples of one dataset, grouped by sub-flag.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CategorySamples {
    pub app_throughput: Vec<f64>,
    pub net_throughput: Vec<f64>,
    pub unflagged_throughput: Vec<f64>,
    pub average_latency: Vec<f64>,
    pub tail_latency: Vec<f64>,
    pub utilization: Vec<f64>,
}

impl CategorySamples {
    pub fn collect(data: &Dataset, classifier: &Classifier) -> Self {
        let mut samples = Self::default();

        for (key, &value) in data {
            let class = classifier.classify(key);
            let bucket = match (class.category, class.secondary) {
                (Category::Throughput, Some(Secondary::Application)) => &mut samples.app_throughput,
                (Category::Throughput, Some(Secondary::Network)) => &mut samples.net_throughput,
                (Category::Throughput, _) => &mut samples.unflagged_throughput,
                (Category::Latency, Some(Secondary::Tail)) => &mut samples.tail_latency,
                (Category::Latency, _) => &mut samples.average_latency,
                (Category::Utilization, _) => &mut samples.utilization,
                (Category::Unclassified, _) => continue,
            };
            bucket.push(value);
        }

        samples
    }
}

pub fn summarize_throughput(samples: &CategorySamples) -> ThroughputSummary {
    let app = stats::mean(&samples.app_throughput);
    let net = stats::mean(&samples.net_throughput);

    let efficiency = if samples.app_throughput.is_empty() || samples.net_throughput.is_empty() {
        0.0
    } else {
        stats::ratio(app, net)
    };

    ThroughputSummary {
        app_throughput_avg: app,
        net_throughput_avg: net,
        efficiency,
        unflagged_samples: samples.unflagged_throughput.len(),
    }
}

pub fn summarize_latency(samples: &CategorySamples) -> LatencySummary {
    LatencySummary {
        avg_latency: stats::mean(&samples.average_latency),
        tail_latency: stats::mean(&samples.tail_latency),
        jitter: stats::std_dev(&samples.average_latency),
    }
}

pub fn summarize_utilization(samples: &CategorySamples) -> UtilizationSummary {
    let values = &samples.utilization;
    let mean = stats::mean(values);

    let load_balance = if mean > 0.0 {
        1.0 - stats::ratio(stats::std_dev(values), mean)
    } else {
        0.0
    };

    UtilizationSummary {
        avg_utilization: mean,
        max_utilization: stats::max(values),
        min_utilization: stats::min(values),
        load_balance,
    }
}

/// All three category summaries of one configuration.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ConfigSummary {
    pub throughput: ThroughputSummary,
    pub latency: LatencySummary,
    pub utilization: UtilizationSummary,
}

pub fn summarize(data: &Dataset, classifier: &Classifier) -> ConfigSummary {
    let samples = CategorySamples::collect(data, classifier);
    ConfigSummary {
        throughput: summarize_throughput(&samples),
        latency: summarize_latency(&samples),
        utilization: summarize_utilization(&samples),
    }
}

/// Summaries of every configuration in the store, keyed by label.
pub fn summarize_store(store: &DatasetStore, classifier: &Classifier) -> BTreeMap<String, ConfigSummary> {
    store
        .iter()
        .map(|(label, data)| (label.to_string(), summarize(data, classifier)))
        .collect()
}
