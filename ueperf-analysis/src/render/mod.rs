//! Report rendering back ends
//!
//! Renderers borrow an assembled [`Report`] and produce a document as a
//! string; [`write_report`] decides which documents a format needs and writes
//! them to the output directory.

mod chart;
mod html;
mod text;

pub use chart::ChartRenderer;
pub use html::HtmlRenderer;
pub use text::TextRenderer;

use crate::config::{AnalyzerConfig, OutputFormat};
use crate::error::{AnalysisError, AnalysisResult};
use crate::report::Report;
use std::path::PathBuf;
use tracing::info;

/// Turns a report into one output document.
pub trait Renderer {
    /// Short name used in logs
    fn name(&self) -> &str;

    fn render(&self, report: &Report) -> AnalysisResult<String>;
}

/// Pretty-printed JSON dump of the whole report.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonRenderer;

impl Renderer for JsonRenderer {
    fn name(&self) -> &str {
        "json"
    }

    fn render(&self, report: &Report) -> AnalysisResult<String> {
        Ok(serde_json::to_string_pretty(report)?)
    }
}

/// Display name for a comparison key such as `ultra_ethernet_vs_roce`.
pub(crate) fn comparison_title(key: &str) -> String {
    match key {
        crate::comparison::VS_ROCE => "Ultra Ethernet vs RoCE".to_string(),
        crate::comparison::VS_INFINIBAND => "Ultra Ethernet vs InfiniBand".to_string(),
        other => title_case(other),
    }
}

/// `tail_latency_reduction` -> `Tail Latency Reduction`
pub(crate) fn title_case(key: &str) -> String {
    key.split('_')
        .filter(|word| !word.is_empty())
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Render the documents of `config.output_format` and write them into the
/// configured output directory. Returns the written paths.
pub async fn write_report(report: &Report, config: &AnalyzerConfig) -> AnalysisResult<Vec<PathBuf>> {
    let output_dir = config.output_dir();
    tokio::fs::create_dir_all(output_dir)
        .await
        .map_err(|e| AnalysisError::io(output_dir, e))?;

    let chart = ChartRenderer::new(config.chart_width, config.chart_height);
    let mut documents: Vec<(&str, Box<dyn Renderer>)> = Vec::new();
    match config.output_format {
        OutputFormat::Txt => {
            documents.push((config.report_file.as_str(), Box::new(TextRenderer)));
            documents.push((config.plot_file.as_str(), Box::new(chart)));
        }
        OutputFormat::Html => {
            documents.push((config.html_file.as_str(), Box::new(HtmlRenderer::new(chart))));
        }
        OutputFormat::Json => {
            documents.push((config.json_file.as_str(), Box::new(JsonRenderer)));
        }
    }

    let mut written = Vec::with_capacity(documents.len());
    for (file_name, renderer) in documents {
        let content = renderer.render(report)?;
        let path = output_dir.join(file_name);
        tokio::fs::write(&path, content)
            .await
            .map_err(|e| AnalysisError::io(&path, e))?;
        info!("Wrote {} output to {}", renderer.name(), path.display());
        written.push(path);
    }

    Ok(written)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::ReportAssembler;
    use crate::store::DatasetStore;

    #[test]
    fn test_title_case() {
        assert_eq!(title_case("tail_latency_reduction"), "Tail Latency Reduction");
        assert_eq!(comparison_title("ultra_ethernet_vs_roce"), "Ultra Ethernet vs RoCE");
        assert_eq!(comparison_title("ue_vs_lab"), "Ue Vs Lab");
    }

    #[test]
    fn test_json_renderer() {
        let report = ReportAssembler::new("Json").assemble(&DatasetStore::new());
        let json = JsonRenderer.render(&report).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["metadata"]["title"], "Json");
    }

    #[tokio::test]
    async fn test_write_report_per_format() {
        let dir = tempfile::tempdir().unwrap();
        let report = ReportAssembler::default().assemble(&DatasetStore::new());

        let mut config = AnalyzerConfig {
            results_dir: dir.path().to_path_buf(),
            ..AnalyzerConfig::default()
        };
        let written = write_report(&report, &config).await.unwrap();
        assert_eq!(
            written,
            vec![
                dir.path().join("performance_report.txt"),
                dir.path().join("performance_plots.svg"),
            ]
        );

        config.output_format = OutputFormat::Html;
        config.output_dir = Some(dir.path().join("html"));
        let written = write_report(&report, &config).await.unwrap();
        assert_eq!(written, vec![dir.path().join("html/performance_report.html")]);
        assert!(written[0].exists());
    }
}
