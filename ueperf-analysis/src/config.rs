//! Configuration management for the analyzer

use crate::error::{AnalysisError, AnalysisResult};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// What to do with a scalar file that contains a malformed record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ParseErrorPolicy {
    /// Abort the whole load with the parse error.
    #[default]
    Fail,
    /// Drop the file, log it and continue with the remaining files.
    SkipFile,
}

/// Report output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Text report plus SVG chart sheet
    #[default]
    Txt,
    /// Single HTML page with the chart embedded
    Html,
    /// Pretty-printed JSON dump of the report
    Json,
}

impl FromStr for OutputFormat {
    type Err = AnalysisError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "txt" | "text" => Ok(OutputFormat::Txt),
            "html" => Ok(OutputFormat::Html),
            "json" => Ok(OutputFormat::Json),
            other => Err(AnalysisError::InvalidArgument(format!(
                "unknown output format: {}",
                other
            ))),
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            OutputFormat::Txt => "txt",
            OutputFormat::Html => "html",
            OutputFormat::Json => "json",
        };
        f.write_str(name)
    }
}

/// Analyzer configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalyzerConfig {
    /// Directory containing simulation results
    pub results_dir: PathBuf,
    /// Where reports are written; defaults to `results_dir`
    pub output_dir: Option<PathBuf>,
    /// Output report format
    pub output_format: OutputFormat,
    /// Report title
    pub title: String,
    /// Extension of scalar result files
    pub scalar_extension: String,
    /// Extension of vector result files
    pub vector_extension: String,
    /// Handling of malformed scalar files
    pub on_parse_error: ParseErrorPolicy,
    pub report_file: String,
    pub plot_file: String,
    pub html_file: String,
    pub json_file: String,
    /// Chart sheet width in pixels
    pub chart_width: u32,
    /// Chart sheet height in pixels
    pub chart_height: u32,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            results_dir: PathBuf::from("results"),
            output_dir: None,
            output_format: OutputFormat::Txt,
            title: "Ultra Ethernet Simulation Performance Report".to_string(),
            scalar_extension: "sca".to_string(),
            vector_extension: "vec".to_string(),
            on_parse_error: ParseErrorPolicy::Fail,
            report_file: "performance_report.txt".to_string(),
            plot_file: "performance_plots.svg".to_string(),
            html_file: "performance_report.html".to_string(),
            json_file: "performance_report.json".to_string(),
            chart_width: 1200,
            chart_height: 800,
        }
    }
}

impl AnalyzerConfig {
    /// Load configuration from a TOML file
    pub fn from_file(path: &Path) -> AnalysisResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| AnalysisError::io(path, e))?;
        Self::from_toml(&content)
    }

    pub fn from_toml(content: &str) -> AnalysisResult<Self> {
        toml::from_str(content).map_err(|e| AnalysisError::Config(e.to_string()))
    }

    /// Save configuration to a TOML file
    pub fn to_file(&self, path: &Path) -> AnalysisResult<()> {
        let content =
            toml::to_string_pretty(self).map_err(|e| AnalysisError::Config(e.to_string()))?;
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| AnalysisError::io(parent, e))?;
        }
        std::fs::write(path, content).map_err(|e| AnalysisError::io(path, e))
    }

    /// Apply `UEPERF_*` overrides using `lookup` as the variable source.
    pub fn apply_env_with<F>(&mut self, lookup: F) -> AnalysisResult<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(dir) = lookup("UEPERF_RESULTS_DIR") {
            self.results_dir = PathBuf::from(dir);
        }
        if let Some(dir) = lookup("UEPERF_OUTPUT_DIR") {
            self.output_dir = Some(PathBuf::from(dir));
        }
        if let Some(format) = lookup("UEPERF_OUTPUT_FORMAT") {
            self.output_format = format.parse()?;
        }
        if let Some(title) = lookup("UEPERF_TITLE") {
            self.title = title;
        }
        if let Some(policy) = lookup("UEPERF_ON_PARSE_ERROR") {
            self.on_parse_error = match policy.as_str() {
                "fail" => ParseErrorPolicy::Fail,
                "skip" | "skip_file" => ParseErrorPolicy::SkipFile,
                other => {
                    return Err(AnalysisError::Config(format!(
                        "UEPERF_ON_PARSE_ERROR: unknown policy {}",
                        other
                    )))
                }
            };
        }
        Ok(())
    }

    /// Apply overrides from the process environment.
    pub fn apply_env(&mut self) -> AnalysisResult<()> {
        self.apply_env_with(|name| std::env::var(name).ok())
    }

    /// Directory reports are written into.
    pub fn output_dir(&self) -> &Path {
        self.output_dir.as_deref().unwrap_or(&self.results_dir)
    }
}

/// Configuration source for loading analyzer settings
pub enum ConfigSource {
    File(PathBuf),
    Default,
    Environment,
}

/// Load analyzer configuration from various sources.
///
/// Environment variables are applied on top of a file as well, so a
/// deployment can keep one file and tweak single values per run.
pub fn load_config(source: ConfigSource) -> AnalysisResult<AnalyzerConfig> {
    match source {
        ConfigSource::File(path) => {
            let mut config = AnalyzerConfig::from_file(&path)?;
            config.apply_env()?;
            Ok(config)
        }
        ConfigSource::Default => Ok(AnalyzerConfig::default()),
        ConfigSource::Environment => {
            let mut config = AnalyzerConfig::default();
            config.apply_env()?;
            Ok(config)
        }
    }
}
