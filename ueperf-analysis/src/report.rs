//! Report assembly
//!
//! The report is the single product of the analysis stages and the only
//! input to rendering. It is built once from a frozen [`DatasetStore`] and
//! never modified afterwards; renderers only ever borrow it.

use crate::aggregate::{summarize_store, LatencySummary, ThroughputSummary, UtilizationSummary};
use crate::classify::Classifier;
use crate::comparison::{reference_comparisons, ComparisonResult};
use crate::scalability::{bucket_members, group_by_scale, scale_trend};
use crate::store::{Dataset, DatasetStore};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::BTreeMap;
use std::path::PathBuf;
use tracing::debug;

pub use crate::scalability::ScalePoint;

/// Provenance of a report
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReportMetadata {
    pub title: String,
    pub generated_at: DateTime<Utc>,
    pub source_dir: Option<PathBuf>,
    pub configurations: usize,
    pub scalars: usize,
}

/// Assembled performance report
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Report {
    pub metadata: ReportMetadata,
    pub throughput: BTreeMap<String, ThroughputSummary>,
    pub latency: BTreeMap<String, LatencySummary>,
    pub utilization: BTreeMap<String, UtilizationSummary>,
    /// Merged dataset per node-count bucket
    pub scalability: BTreeMap<u32, Dataset>,
    /// Configuration labels per node-count bucket
    pub scale_members: BTreeMap<u32, Vec<String>>,
    /// One representative throughput per bucket, for trend plots
    pub scale_trend: Vec<ScalePoint>,
    pub comparison: BTreeMap<String, ComparisonResult>,
}

impl Report {
    /// Configuration labels present in the per-configuration sections.
    pub fn configurations(&self) -> impl Iterator<Item = &str> {
        self.throughput.keys().map(String::as_str)
    }
}

/// Composes the analysis stages into a [`Report`].
#[derive(Debug, Clone)]
pub struct ReportAssembler {
    title: String,
    source_dir: Option<PathBuf>,
    classifier: Classifier,
    comparisons: Option<BTreeMap<String, ComparisonResult>>,
}

impl ReportAssembler {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            source_dir: None,
            classifier: Classifier::default(),
            comparisons: None,
        }
    }

    pub fn source_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.source_dir = Some(dir.into());
        self
    }

    pub fn classifier(mut self, classifier: Classifier) -> Self {
        self.classifier = classifier;
        self
    }

    /// Use these comparisons instead of the reference constants.
    pub fn comparisons(mut self, comparisons: BTreeMap<String, ComparisonResult>) -> Self {
        self.comparisons = Some(comparisons);
        self
    }

    pub fn assemble(&self, store: &DatasetStore) -> Report {
        let summaries = summarize_store(store, &self.classifier);

        let mut throughput = BTreeMap::new();
        let mut latency = BTreeMap::new();
        let mut utilization = BTreeMap::new();
        for (label, summary) in summaries {
            throughput.insert(label.clone(), summary.throughput);
            latency.insert(label.clone(), summary.latency);
            utilization.insert(label, summary.utilization);
        }

        let scalability = group_by_scale(store);
        let trend = scale_trend(&scalability);
        debug!(
            "Assembled report: {} configurations, {} scale buckets",
            store.len(),
            scalability.len()
        );

        Report {
            metadata: ReportMetadata {
                title: self.title.clone(),
                generated_at: Utc::now(),
                source_dir: self.source_dir.clone(),
                configurations: store.len(),
                scalars: store.scalar_count(),
            },
            throughput,
            latency,
            utilization,
            scale_members: bucket_members(store),
            scale_trend: trend,
            scalability,
            comparison: self
                .comparisons
                .clone()
                .unwrap_or_else(reference_comparisons),
        }
    }
}

impl Default for ReportAssembler {
    fn default() -> Self {
        Self::new(crate::config::AnalyzerConfig::default().title)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dataset(entries: &[(&str, f64)]) -> Dataset {
        entries.iter().map(|(k, v)| (k.to_string(), *v)).collect()
    }

    #[test]
    fn test_empty_store_gives_empty_sections() {
        let report = ReportAssembler::default().assemble(&DatasetStore::new());

        assert!(report.throughput.is_empty());
        assert!(report.latency.is_empty());
        assert!(report.utilization.is_empty());
        assert!(report.scalability.is_empty());
        assert!(report.scale_trend.is_empty());
        assert_eq!(report.comparison.len(), 2);
        assert_eq!(report.metadata.configurations, 0);
    }

    #[test]
    fn test_sections_only_hold_known_labels() {
        let store: DatasetStore = [
            ("ue_1K".to_string(), dataset(&[("app.throughput", 4.0), ("link.utilization", 0.3)])),
            ("ue_10K".to_string(), dataset(&[("app.latency", 2.0)])),
        ]
        .into_iter()
        .collect();

        let report = ReportAssembler::new("t").source_dir("/tmp/r").assemble(&store);

        for label in report
            .throughput
            .keys()
            .chain(report.latency.keys())
            .chain(report.utilization.keys())
            .chain(report.scale_members.values().flatten())
        {
            assert!(store.contains(label), "unknown label {}", label);
        }
        assert_eq!(report.metadata.scalars, 3);
        assert_eq!(report.metadata.source_dir, Some(PathBuf::from("/tmp/r")));
        assert_eq!(report.configurations().count(), 2);
    }

    #[test]
    fn test_custom_comparisons_replace_reference() {
        let mut comparisons = BTreeMap::new();
        comparisons.insert(
            "ue_vs_lab".to_string(),
            ComparisonResult {
                throughput_gain: Some(1.3),
                ..ComparisonResult::default()
            },
        );

        let report = ReportAssembler::default()
            .comparisons(comparisons)
            .assemble(&DatasetStore::new());
        assert_eq!(report.comparison.keys().collect::<Vec<_>>(), vec!["ue_vs_lab"]);
    }

    #[test]
    fn test_report_serializes() {
        let store: DatasetStore = [("cfg_1K".to_string(), dataset(&[("app.throughput", 1.0)]))]
            .into_iter()
            .collect();
        let report = ReportAssembler::default().assemble(&store);

        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["throughput"]["cfg_1K"]["app_throughput_avg"], 1.0);
        assert_eq!(json["scalability"]["1024"]["app.throughput"], 1.0);
    }
}
