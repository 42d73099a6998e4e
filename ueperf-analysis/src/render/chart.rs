//! SVG chart sheet: four panels in a 2x2 grid.

use super::Renderer;
use crate::error::AnalysisResult;
use crate::report::Report;

const MARGIN_LEFT: f64 = 64.0;
const MARGIN_RIGHT: f64 = 24.0;
const MARGIN_TOP: f64 = 40.0;
const MARGIN_BOTTOM: f64 = 80.0;
const Y_TICKS: usize = 5;

const BLUE: &str = "#3498db";
const ORANGE: &str = "#e67e22";
const GREEN: &str = "#27ae60";
const PURPLE: &str = "#8e44ad";

#[derive(Debug, Clone, Copy)]
pub struct ChartRenderer {
    width: u32,
    height: u32,
}

impl ChartRenderer {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width: width.max(400),
            height: height.max(300),
        }
    }

    pub fn render_svg(&self, report: &Report) -> String {
        let (w, h) = (self.width as f64, self.height as f64);
        let half_w = w / 2.0;
        let half_h = h / 2.0;
        let panels = [
            Panel::new(0.0, 0.0, half_w, half_h),
            Panel::new(half_w, 0.0, half_w, half_h),
            Panel::new(0.0, half_h, half_w, half_h),
            Panel::new(half_w, half_h, half_w, half_h),
        ];

        let configs: Vec<&str> = report.configurations().collect();

        let mut svg = format!(
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}" font-family="Arial, sans-serif" font-size="11">
<rect width="{w}" height="{h}" fill="white"/>
"#,
            w = self.width,
            h = self.height
        );

        bar_panel(
            &mut svg,
            &panels[0],
            "Application Throughput by Configuration",
            "Throughput (Gbps)",
            &configs,
            &[Series {
                name: "Application",
                values: report.throughput.values().map(|t| t.app_throughput_avg).collect(),
                color: BLUE,
            }],
        );

        bar_panel(
            &mut svg,
            &panels[1],
            "Latency Comparison",
            "Latency (µs)",
            &configs,
            &[
                Series {
                    name: "Average Latency",
                    values: report.latency.values().map(|l| l.avg_latency).collect(),
                    color: BLUE,
                },
                Series {
                    name: "Tail Latency",
                    values: report.latency.values().map(|l| l.tail_latency).collect(),
                    color: ORANGE,
                },
            ],
        );

        bar_panel(
            &mut svg,
            &panels[2],
            "Network Utilization",
            "Utilization (%)",
            &configs,
            &[Series {
                name: "Utilization",
                values: report
                    .utilization
                    .values()
                    .map(|u| u.avg_utilization * 100.0)
                    .collect(),
                color: GREEN,
            }],
        );

        let points: Vec<(f64, f64)> = report
            .scale_trend
            .iter()
            .map(|p| (p.nodes as f64, p.throughput))
            .collect();
        line_panel(
            &mut svg,
            &panels[3],
            "Scalability Analysis",
            "Number of Nodes",
            "Throughput (Gbps)",
            &points,
        );

        svg.push_str("</svg>\n");
        svg
    }
}

impl Default for ChartRenderer {
    fn default() -> Self {
        Self::new(1200, 800)
    }
}

impl Renderer for ChartRenderer {
    fn name(&self) -> &str {
        "chart"
    }

    fn render(&self, report: &Report) -> AnalysisResult<String> {
        Ok(self.render_svg(report))
    }
}

struct Panel {
    x: f64,
    y: f64,
    width: f64,
    height: f64,
}

impl Panel {
    fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self { x, y, width, height }
    }

    fn plot_x(&self) -> f64 {
        self.x + MARGIN_LEFT
    }

    fn plot_y(&self) -> f64 {
        self.y + MARGIN_TOP
    }

    fn plot_width(&self) -> f64 {
        (self.width - MARGIN_LEFT - MARGIN_RIGHT).max(1.0)
    }

    fn plot_height(&self) -> f64 {
        (self.height - MARGIN_TOP - MARGIN_BOTTOM).max(1.0)
    }

    fn bottom(&self) -> f64 {
        self.plot_y() + self.plot_height()
    }
}

struct Series<'a> {
    name: &'a str,
    values: Vec<f64>,
    color: &'static str,
}

pub(crate) fn escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

fn axis_max(values: impl Iterator<Item = f64>) -> f64 {
    let max = values.filter(|v| v.is_finite()).fold(0.0, f64::max);
    if max > 0.0 {
        (max * 1.1).min(f64::MAX)
    } else {
        1.0
    }
}

fn format_tick(value: f64) -> String {
    if value.abs() >= 100.0 {
        format!("{:.0}", value)
    } else if value.abs() >= 1.0 {
        format!("{:.1}", value)
    } else {
        format!("{:.2}", value)
    }
}

fn frame(svg: &mut String, panel: &Panel, title: &str, y_label: &str, y_max: f64) {
    let (px, py, pw, ph) = (panel.plot_x(), panel.plot_y(), panel.plot_width(), panel.plot_height());

    svg.push_str(&format!(
        "<text x=\"{:.1}\" y=\"{:.1}\" text-anchor=\"middle\" font-size=\"14\" font-weight=\"bold\">{}</text>\n",
        px + pw / 2.0,
        panel.y + 24.0,
        escape(title)
    ));
    svg.push_str(&format!(
        "<text transform=\"translate({:.1},{:.1}) rotate(-90)\" text-anchor=\"middle\">{}</text>\n",
        panel.x + 14.0,
        py + ph / 2.0,
        escape(y_label)
    ));

    for i in 0..=Y_TICKS {
        let value = y_max * i as f64 / Y_TICKS as f64;
        let y = panel.bottom() - ph * i as f64 / Y_TICKS as f64;
        svg.push_str(&format!(
            "<line x1=\"{:.1}\" y1=\"{:.1}\" x2=\"{:.1}\" y2=\"{:.1}\" stroke=\"#e0e0e0\"/>\n",
            px,
            y,
            px + pw,
            y
        ));
        svg.push_str(&format!(
            "<text x=\"{:.1}\" y=\"{:.1}\" text-anchor=\"end\">{}</text>\n",
            px - 6.0,
            y + 4.0,
            format_tick(value)
        ));
    }

    svg.push_str(&format!(
        "<polyline points=\"{:.1},{:.1} {:.1},{:.1} {:.1},{:.1}\" fill=\"none\" stroke=\"#333\"/>\n",
        px,
        py,
        px,
        panel.bottom(),
        px + pw,
        panel.bottom()
    ));
}

fn placeholder(svg: &mut String, panel: &Panel, message: &str) {
    svg.push_str(&format!(
        "<text x=\"{:.1}\" y=\"{:.1}\" text-anchor=\"middle\" fill=\"#7f8c8d\">{}</text>\n",
        panel.plot_x() + panel.plot_width() / 2.0,
        panel.plot_y() + panel.plot_height() / 2.0,
        escape(message)
    ));
}

fn bar_panel(svg: &mut String, panel: &Panel, title: &str, y_label: &str, labels: &[&str], series: &[Series<'_>]) {
    let y_max = axis_max(series.iter().flat_map(|s| s.values.iter().copied()));
    frame(svg, panel, title, y_label, y_max);

    if labels.is_empty() || series.is_empty() {
        placeholder(svg, panel, "No data");
        return;
    }

    let group_width = panel.plot_width() / labels.len() as f64;
    let bar_width = group_width * 0.7 / series.len() as f64;

    for (i, label) in labels.iter().enumerate() {
        let group_x = panel.plot_x() + i as f64 * group_width;

        for (s, serie) in series.iter().enumerate() {
            let value = serie.values.get(i).copied().unwrap_or(0.0).max(0.0);
            let height = value / y_max * panel.plot_height();
            svg.push_str(&format!(
                "<rect x=\"{:.1}\" y=\"{:.1}\" width=\"{:.1}\" height=\"{:.1}\" fill=\"{}\"><title>{}: {:.2}</title></rect>\n",
                group_x + group_width * 0.15 + s as f64 * bar_width,
                panel.bottom() - height,
                bar_width,
                height,
                serie.color,
                escape(serie.name),
                value
            ));
        }

        let label_x = group_x + group_width / 2.0;
        let label_y = panel.bottom() + 14.0;
        svg.push_str(&format!(
            "<text x=\"{:.1}\" y=\"{:.1}\" text-anchor=\"end\" transform=\"rotate(-45 {:.1} {:.1})\">{}</text>\n",
            label_x,
            label_y,
            label_x,
            label_y,
            escape(label)
        ));
    }

    if series.len() > 1 {
        for (s, serie) in series.iter().enumerate() {
            let x = panel.plot_x() + panel.plot_width() - 130.0;
            let y = panel.plot_y() + 8.0 + s as f64 * 16.0;
            svg.push_str(&format!(
                "<rect x=\"{:.1}\" y=\"{:.1}\" width=\"10\" height=\"10\" fill=\"{}\"/><text x=\"{:.1}\" y=\"{:.1}\">{}</text>\n",
                x,
                y,
                serie.color,
                x + 14.0,
                y + 9.0,
                escape(serie.name)
            ));
        }
    }
}

fn line_panel(svg: &mut String, panel: &Panel, title: &str, x_label: &str, y_label: &str, points: &[(f64, f64)]) {
    let y_max = axis_max(points.iter().map(|&(_, y)| y));
    frame(svg, panel, title, y_label, y_max);

    svg.push_str(&format!(
        "<text x=\"{:.1}\" y=\"{:.1}\" text-anchor=\"middle\">{}</text>\n",
        panel.plot_x() + panel.plot_width() / 2.0,
        panel.bottom() + 40.0,
        escape(x_label)
    ));

    // A trend needs at least two buckets
    if points.len() < 2 {
        placeholder(svg, panel, "Not enough scale buckets");
        return;
    }

    let x_min = points.iter().map(|&(x, _)| x).fold(f64::INFINITY, f64::min);
    let x_max = points.iter().map(|&(x, _)| x).fold(f64::NEG_INFINITY, f64::max);
    let x_span = if x_max > x_min { x_max - x_min } else { 1.0 };

    let to_screen = |(x, y): (f64, f64)| {
        (
            panel.plot_x() + (x - x_min) / x_span * panel.plot_width(),
            panel.bottom() - y.max(0.0) / y_max * panel.plot_height(),
        )
    };

    let path: Vec<String> = points
        .iter()
        .map(|&p| {
            let (sx, sy) = to_screen(p);
            format!("{:.1},{:.1}", sx, sy)
        })
        .collect();
    svg.push_str(&format!(
        "<polyline points=\"{}\" fill=\"none\" stroke=\"{}\" stroke-width=\"2\"/>\n",
        path.join(" "),
        PURPLE
    ));

    for &(x, y) in points {
        let (sx, sy) = to_screen((x, y));
        svg.push_str(&format!(
            "<circle cx=\"{:.1}\" cy=\"{:.1}\" r=\"4\" fill=\"{}\"><title>{} nodes: {:.2}</title></circle>\n",
            sx, sy, PURPLE, x, y
        ));
        svg.push_str(&format!(
            "<text x=\"{:.1}\" y=\"{:.1}\" text-anchor=\"middle\">{}</text>\n",
            sx,
            panel.bottom() + 16.0,
            x
        ));
    }
}
