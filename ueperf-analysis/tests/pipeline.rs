//! End-to-end tests: result directory in, report documents out.

use std::fs;
use std::path::Path;
use ueperf_analysis::render::{write_report, Renderer, TextRenderer};
use ueperf_analysis::scalability::group_by_scale;
use ueperf_analysis::{
    load_results_dir, AnalysisError, AnalyzerConfig, OutputFormat, ParseErrorPolicy, ReportAssembler,
};

fn write(dir: &Path, name: &str, content: &str) {
    fs::write(dir.join(name), content).unwrap();
}

fn sweep_dir() -> tempfile::TempDir {
    let dir = tempfile::tempdir().unwrap();
    write(
        dir.path(),
        "cfg_1K.sca",
        "version 2\nrun cfg_1K-0\nattr configname cfg_1K\n\
         scalar app.throughput val 10\nscalar net.throughput val 20\n",
    );
    write(
        dir.path(),
        "cfg_10K.sca",
        "scalar app.throughput val 5\nscalar net.throughput val 25\n",
    );
    write(dir.path(), "cfg_1K.vec", "vector 0 app throughput\n0 0.0 1.0\n");
    dir
}

fn config_for(dir: &Path) -> AnalyzerConfig {
    AnalyzerConfig {
        results_dir: dir.to_path_buf(),
        ..AnalyzerConfig::default()
    }
}

#[tokio::test]
async fn test_sweep_efficiency_and_buckets() {
    let dir = sweep_dir();
    let config = config_for(dir.path());

    let summary = load_results_dir(dir.path(), &config).await.unwrap();
    assert_eq!(summary.store.len(), 2);
    assert_eq!(summary.vector_files.len(), 1);
    assert!(summary.rejected.is_empty());

    let report = ReportAssembler::default().assemble(&summary.store);

    assert!((report.throughput["cfg_1K"].efficiency - 0.5).abs() < 1e-9);
    assert!((report.throughput["cfg_10K"].efficiency - 0.2).abs() < 1e-9);
    assert_eq!(report.scale_members[&1024], vec!["cfg_1K".to_string()]);
    assert_eq!(report.scale_members[&10000], vec!["cfg_10K".to_string()]);
    assert_eq!(report.scale_trend.len(), 2);

    // Bucketing a store twice gives the same buckets
    assert_eq!(group_by_scale(&summary.store), group_by_scale(&summary.store));
}

#[tokio::test]
async fn test_malformed_file_fails_load() {
    let dir = sweep_dir();
    write(dir.path(), "broken_1K.sca", "scalar app.throughput val 1\nscalar app.throughput\n");

    let err = load_results_dir(dir.path(), &config_for(dir.path()))
        .await
        .unwrap_err();
    match err {
        AnalysisError::Parse { path, source } => {
            assert!(path.ends_with("broken_1K.sca"));
            assert_eq!(source.line(), 2);
        }
        other => panic!("unexpected error: {}", other),
    }
}

#[tokio::test]
async fn test_malformed_file_skipped_on_request() {
    let dir = sweep_dir();
    write(dir.path(), "broken.sca", "scalar app.throughput\n");

    let config = AnalyzerConfig {
        on_parse_error: ParseErrorPolicy::SkipFile,
        ..config_for(dir.path())
    };
    let summary = load_results_dir(dir.path(), &config).await.unwrap();

    assert_eq!(summary.store.len(), 2);
    assert!(!summary.store.contains("broken"));
    assert_eq!(summary.rejected.len(), 1);
    assert_eq!(summary.rejected[0].0, "broken");
}

#[tokio::test]
async fn test_text_report_lists_every_configuration() {
    let dir = sweep_dir();
    let summary = load_results_dir(dir.path(), &config_for(dir.path())).await.unwrap();
    let report = ReportAssembler::new("Sweep").assemble(&summary.store);

    let text = TextRenderer.render(&report).unwrap();
    for label in summary.store.labels() {
        assert!(text.contains(label), "missing {}", label);
    }
}

#[tokio::test]
async fn test_write_every_format() {
    let dir = sweep_dir();
    let out = tempfile::tempdir().unwrap();
    let summary = load_results_dir(dir.path(), &config_for(dir.path())).await.unwrap();
    let report = ReportAssembler::default()
        .source_dir(dir.path())
        .assemble(&summary.store);

    let mut config = AnalyzerConfig {
        output_dir: Some(out.path().to_path_buf()),
        ..config_for(dir.path())
    };

    let written = write_report(&report, &config).await.unwrap();
    assert_eq!(written.len(), 2);
    let svg = fs::read_to_string(out.path().join("performance_plots.svg")).unwrap();
    assert!(svg.starts_with("<svg") && svg.trim_end().ends_with("</svg>"));

    config.output_format = OutputFormat::Html;
    write_report(&report, &config).await.unwrap();
    let html = fs::read_to_string(out.path().join("performance_report.html")).unwrap();
    assert!(html.contains("cfg_10K"));

    config.output_format = OutputFormat::Json;
    write_report(&report, &config).await.unwrap();
    let json: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(out.path().join("performance_report.json")).unwrap())
            .unwrap();
    assert_eq!(json["throughput"]["cfg_1K"]["efficiency"], 0.5);
    assert_eq!(json["metadata"]["configurations"], 2);
}
