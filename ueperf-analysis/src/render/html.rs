use super::chart::{escape, ChartRenderer};
use super::{comparison_title, title_case, Renderer};
use crate::error::AnalysisResult;
use crate::report::Report;

/// Self-contained HTML page: summary tables with the chart sheet inlined.
#[derive(Debug, Clone, Copy, Default)]
pub struct HtmlRenderer {
    chart: ChartRenderer,
}

impl HtmlRenderer {
    pub fn new(chart: ChartRenderer) -> Self {
        Self { chart }
    }
}

impl Renderer for HtmlRenderer {
    fn name(&self) -> &str {
        "html report"
    }

    fn render(&self, report: &Report) -> AnalysisResult<String> {
        Ok(self.build_html(report))
    }
}

fn efficiency_class(efficiency: f64) -> &'static str {
    if efficiency >= 0.8 {
        "metric-good"
    } else if efficiency >= 0.5 {
        "metric-neutral"
    } else {
        "metric-bad"
    }
}

impl HtmlRenderer {
    fn build_html(&self, report: &Report) -> String {
        let mut html = String::new();
        let title = escape(&report.metadata.title);

        html.push_str(&format!(
            r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>{}</title>
    <style>
        body {{ font-family: Arial, sans-serif; margin: 40px; background: #f5f5f5; }}
        .container {{ max-width: 1200px; margin: 0 auto; background: white; padding: 30px; border-radius: 8px; box-shadow: 0 2px 10px rgba(0,0,0,0.1); }}
        h1 {{ color: #2c3e50; text-align: center; margin-bottom: 30px; }}
        h2 {{ color: #34495e; border-bottom: 2px solid #3498db; padding-bottom: 10px; }}
        .summary {{ background: #ecf0f1; padding: 20px; border-radius: 6px; margin: 20px 0; }}
        .chart {{ text-align: center; margin: 30px 0; overflow-x: auto; }}
        table {{ width: 100%; border-collapse: collapse; margin: 20px 0; }}
        th, td {{ padding: 12px; text-align: left; border-bottom: 1px solid #ddd; }}
        th {{ background-color: #3498db; color: white; }}
        tr:nth-child(even) {{ background-color: #f2f2f2; }}
        .metric-good {{ color: #27ae60; font-weight: bold; }}
        .metric-bad {{ color: #e74c3c; font-weight: bold; }}
        .metric-neutral {{ color: #7f8c8d; }}
        .note {{ background: #e8f4f8; padding: 10px; margin: 5px 0; border-left: 4px solid #3498db; }}
    </style>
</head>
<body>
    <div class="container">
        <h1>{}</h1>
        <div class="summary">
            <p><strong>Generated:</strong> {}</p>
            <p><strong>Configurations:</strong> {}</p>
            <p><strong>Scalars:</strong> {}</p>
"#,
            title,
            title,
            report.metadata.generated_at.format("%Y-%m-%d %H:%M:%S UTC"),
            report.metadata.configurations,
            report.metadata.scalars
        ));
        if let Some(dir) = &report.metadata.source_dir {
            html.push_str(&format!(
                "            <p><strong>Results:</strong> {}</p>\n",
                escape(&dir.display().to_string())
            ));
        }
        html.push_str("        </div>\n");

        html.push_str("<h2>Performance Charts</h2>");
        html.push_str(&format!("<div class=\"chart\">{}</div>", self.chart.render_svg(report)));

        html.push_str("<h2>Throughput Analysis</h2>");
        html.push_str("<table>");
        html.push_str("<tr><th>Configuration</th><th>Application (Gbps)</th><th>Network (Gbps)</th><th>Efficiency</th></tr>");
        for (config, data) in &report.throughput {
            html.push_str(&format!(
                "<tr><td>{}</td><td>{:.2}</td><td>{:.2}</td><td class=\"{}\">{:.2}%</td></tr>",
                escape(config),
                data.app_throughput_avg,
                data.net_throughput_avg,
                efficiency_class(data.efficiency),
                data.efficiency * 100.0
            ));
        }
        html.push_str("</table>");
        for (config, data) in &report.throughput {
            if data.unflagged_samples > 0 {
                html.push_str(&format!(
                    "<div class=\"note\">{}: {} throughput metrics are neither application nor network level</div>",
                    escape(config),
                    data.unflagged_samples
                ));
            }
        }

        html.push_str("<h2>Latency Analysis</h2>");
        html.push_str("<table>");
        html.push_str("<tr><th>Configuration</th><th>Average (µs)</th><th>Tail (µs)</th><th>Jitter (µs)</th></tr>");
        for (config, data) in &report.latency {
            html.push_str(&format!(
                "<tr><td>{}</td><td>{:.2}</td><td>{:.2}</td><td>{:.2}</td></tr>",
                escape(config),
                data.avg_latency,
                data.tail_latency,
                data.jitter
            ));
        }
        html.push_str("</table>");

        html.push_str("<h2>Utilization Analysis</h2>");
        html.push_str("<table>");
        html.push_str("<tr><th>Configuration</th><th>Average</th><th>Peak</th><th>Minimum</th><th>Load Balance</th></tr>");
        for (config, data) in &report.utilization {
            html.push_str(&format!(
                "<tr><td>{}</td><td>{:.2}%</td><td>{:.2}%</td><td>{:.2}%</td><td>{:.3}</td></tr>",
                escape(config),
                data.avg_utilization * 100.0,
                data.max_utilization * 100.0,
                data.min_utilization * 100.0,
                data.load_balance
            ));
        }
        html.push_str("</table>");

        html.push_str("<h2>Scalability Analysis</h2>");
        html.push_str("<table>");
        html.push_str("<tr><th>Nodes</th><th>Configurations</th><th>Merged Metrics</th><th>Throughput (Gbps)</th></tr>");
        for point in &report.scale_trend {
            let members = report
                .scale_members
                .get(&point.nodes)
                .map(|labels| labels.join(", "))
                .unwrap_or_default();
            html.push_str(&format!(
                "<tr><td>{}</td><td>{}</td><td>{}</td><td>{:.2}</td></tr>",
                point.nodes,
                escape(&members),
                report.scalability.get(&point.nodes).map_or(0, |d| d.len()),
                point.throughput
            ));
        }
        html.push_str("</table>");

        html.push_str("<h2>Protocol Comparison</h2>");
        for (name, comparison) in &report.comparison {
            html.push_str(&format!("<h3>{}</h3>", escape(&comparison_title(name))));
            html.push_str("<table>");
            html.push_str("<tr><th>Metric</th><th>Value</th></tr>");
            for (field, value) in comparison.fields() {
                html.push_str(&format!(
                    "<tr><td>{}</td><td>{:.1}%</td></tr>",
                    title_case(field),
                    value * 100.0
                ));
            }
            html.push_str("</table>");
        }

        html.push_str(
            r#"
    </div>
</body>
</html>"#,
        );

        html
    }
}
