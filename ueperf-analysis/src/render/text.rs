use super::{comparison_title, title_case, Renderer};
use crate::error::AnalysisResult;
use crate::report::Report;

/// Plain text report.
#[derive(Debug, Clone, Copy, Default)]
pub struct TextRenderer;

impl Renderer for TextRenderer {
    fn name(&self) -> &str {
        "text report"
    }

    fn render(&self, report: &Report) -> AnalysisResult<String> {
        Ok(render_text(report))
    }
}

fn percent(value: f64, precision: usize) -> String {
    format!("{:.*}%", precision, value * 100.0)
}

fn render_text(report: &Report) -> String {
    let mut out = String::new();

    out.push_str(&format!("{}\n", report.metadata.title));
    out.push_str(&format!("{}\n\n", "=".repeat(50)));
    out.push_str(&format!(
        "Generated: {}\n",
        report.metadata.generated_at.format("%Y-%m-%d %H:%M:%S UTC")
    ));
    if let Some(dir) = &report.metadata.source_dir {
        out.push_str(&format!("Results: {}\n", dir.display()));
    }
    out.push_str(&format!(
        "Configurations: {}  Scalars: {}\n\n",
        report.metadata.configurations, report.metadata.scalars
    ));

    out.push_str("THROUGHPUT ANALYSIS:\n");
    for (config, data) in &report.throughput {
        out.push_str(&format!("  {}:\n", config));
        out.push_str(&format!("    Application Throughput: {:.2} Gbps\n", data.app_throughput_avg));
        out.push_str(&format!("    Network Throughput: {:.2} Gbps\n", data.net_throughput_avg));
        out.push_str(&format!("    Efficiency: {}\n", percent(data.efficiency, 2)));
        if data.unflagged_samples > 0 {
            out.push_str(&format!(
                "    Unattributed throughput metrics: {}\n",
                data.unflagged_samples
            ));
        }
        out.push('\n');
    }

    out.push_str("LATENCY ANALYSIS:\n");
    for (config, data) in &report.latency {
        out.push_str(&format!("  {}:\n", config));
        out.push_str(&format!("    Average Latency: {:.2} µs\n", data.avg_latency));
        out.push_str(&format!("    Tail Latency: {:.2} µs\n", data.tail_latency));
        out.push_str(&format!("    Jitter: {:.2} µs\n\n", data.jitter));
    }

    out.push_str("UTILIZATION ANALYSIS:\n");
    for (config, data) in &report.utilization {
        out.push_str(&format!("  {}:\n", config));
        out.push_str(&format!("    Average Utilization: {}\n", percent(data.avg_utilization, 2)));
        out.push_str(&format!("    Peak Utilization: {}\n", percent(data.max_utilization, 2)));
        out.push_str(&format!("    Minimum Utilization: {}\n", percent(data.min_utilization, 2)));
        out.push_str(&format!("    Load Balance Index: {:.3}\n\n", data.load_balance));
    }

    out.push_str("SCALABILITY ANALYSIS:\n");
    for point in &report.scale_trend {
        let members = report
            .scale_members
            .get(&point.nodes)
            .map(|labels| labels.join(", "))
            .unwrap_or_default();
        let metrics = report.scalability.get(&point.nodes).map_or(0, |d| d.len());
        out.push_str(&format!("  {} nodes:\n", point.nodes));
        out.push_str(&format!("    Configurations: {}\n", members));
        out.push_str(&format!("    Merged Metrics: {}\n", metrics));
        out.push_str(&format!("    Representative Throughput: {:.2} Gbps\n\n", point.throughput));
    }

    out.push_str("PROTOCOL COMPARISON:\n");
    for (name, comparison) in &report.comparison {
        out.push_str(&format!("  {}:\n", comparison_title(name)));
        for (field, value) in comparison.fields() {
            out.push_str(&format!("    {}: {}\n", title_case(field), percent(value, 1)));
        }
        out.push('\n');
    }

    out
}
