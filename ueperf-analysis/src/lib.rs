//! Ultra Ethernet simulation result analysis
//!
//! This crate turns OMNeT++ scalar result files into a performance report.
//! It provides:
//! - Scalar record parsing and per-configuration dataset loading
//! - Keyword classification of metric names into throughput, latency and utilization
//! - Category summaries, scale bucketing and protocol comparisons
//! - Text, SVG chart, HTML and JSON rendering of the assembled report

pub mod aggregate;
pub mod classify;
pub mod comparison;
pub mod config;
pub mod error;
pub mod parser;
pub mod render;
pub mod report;
pub mod scalability;
pub mod stats;
pub mod store;

pub use aggregate::{LatencySummary, ThroughputSummary, UtilizationSummary};
pub use classify::{classify, Category, Classification, Secondary};
pub use comparison::ComparisonResult;
pub use config::{AnalyzerConfig, OutputFormat, ParseErrorPolicy};
pub use error::{AnalysisError, AnalysisResult, ParseError};
pub use parser::{parse_scalar_file, parse_scalars};
pub use report::{Report, ReportAssembler, ScalePoint};
pub use store::{load_results_dir, Dataset, DatasetStore, LoadSummary};
