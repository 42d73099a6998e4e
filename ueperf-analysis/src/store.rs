//! Per-configuration dataset storage and result directory loading

use crate::config::{AnalyzerConfig, ParseErrorPolicy};
use crate::error::{AnalysisError, AnalysisResult};
use crate::parser::parse_scalars;
use indexmap::IndexMap;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tokio::task::JoinSet;
use tracing::{debug, info, warn};

/// Metric key to scalar value, in first-seen order.
pub type Dataset = IndexMap<String, f64>;

/// Parsed datasets keyed by configuration label.
///
/// Built once per run and read-only afterwards; every later stage borrows it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DatasetStore {
    datasets: BTreeMap<String, Dataset>,
}

impl DatasetStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert the dataset of one configuration, replacing any earlier one.
    pub fn insert(&mut self, label: impl Into<String>, data: Dataset) -> Option<Dataset> {
        self.datasets.insert(label.into(), data)
    }

    pub fn get(&self, label: &str) -> Option<&Dataset> {
        self.datasets.get(label)
    }

    pub fn contains(&self, label: &str) -> bool {
        self.datasets.contains_key(label)
    }

    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.datasets.keys().map(String::as_str)
    }

    /// Iterate configurations in label order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Dataset)> {
        self.datasets.iter().map(|(label, data)| (label.as_str(), data))
    }

    pub fn len(&self) -> usize {
        self.datasets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.datasets.is_empty()
    }

    /// Total number of scalars across all configurations.
    pub fn scalar_count(&self) -> usize {
        self.datasets.values().map(IndexMap::len).sum()
    }
}

impl FromIterator<(String, Dataset)> for DatasetStore {
    fn from_iter<I: IntoIterator<Item = (String, Dataset)>>(iter: I) -> Self {
        Self {
            datasets: iter.into_iter().collect(),
        }
    }
}

/// Configuration label of a result file: its base name without extension.
pub fn config_label(path: &Path) -> Option<String> {
    path.file_stem()
        .and_then(|stem| stem.to_str())
        .map(str::to_string)
}

/// Outcome of loading a results directory.
#[derive(Debug, Default)]
pub struct LoadSummary {
    pub store: DatasetStore,
    /// Vector result files found next to the scalars. Their content is not parsed.
    pub vector_files: Vec<PathBuf>,
    /// Files dropped under [`ParseErrorPolicy::SkipFile`], with the reason.
    pub rejected: Vec<(String, AnalysisError)>,
}

fn discover(dir: &Path, extension: &str) -> AnalysisResult<Vec<PathBuf>> {
    let escaped = glob::Pattern::escape(&dir.to_string_lossy());
    let pattern = format!("{}/*.{}", escaped, extension);

    let mut files = Vec::new();
    for entry in glob::glob(&pattern)? {
        match entry {
            Ok(path) if path.is_file() => files.push(path),
            Ok(_) => {}
            Err(e) => {
                let path = e.path().to_path_buf();
                return Err(AnalysisError::io(path, e.into()));
            }
        }
    }
    files.sort();
    Ok(files)
}

/// Load every scalar file of `dir` into a [`DatasetStore`].
///
/// Files are read and parsed concurrently; the store is filled by this task
/// alone once each parse completes.
pub async fn load_results_dir(dir: &Path, config: &AnalyzerConfig) -> AnalysisResult<LoadSummary> {
    let metadata = tokio::fs::metadata(dir)
        .await
        .map_err(|e| AnalysisError::io(dir, e))?;
    if !metadata.is_dir() {
        return Err(AnalysisError::InvalidArgument(format!(
            "{} is not a directory",
            dir.display()
        )));
    }

    let scalar_files = discover(dir, &config.scalar_extension)?;
    let vector_files = discover(dir, &config.vector_extension)?;
    info!(
        "Found {} scalar and {} vector files in {}",
        scalar_files.len(),
        vector_files.len(),
        dir.display()
    );
    if !vector_files.is_empty() {
        debug!("Vector results are not analysed; ignoring {} files", vector_files.len());
    }

    let mut tasks = JoinSet::new();
    for path in scalar_files {
        let Some(label) = config_label(&path) else {
            warn!("Skipping {}: file name is not valid UTF-8", path.display());
            continue;
        };
        tasks.spawn(async move {
            let content = tokio::fs::read_to_string(&path)
                .await
                .map_err(|e| AnalysisError::io(&path, e))?;
            let parsed = tokio::task::spawn_blocking(move || parse_scalars(&content)).await?;
            let data = parsed.map_err(|source| AnalysisError::Parse {
                path: path.clone(),
                source,
            })?;
            Ok::<_, AnalysisError>((label, data))
        });
    }

    let mut summary = LoadSummary {
        vector_files,
        ..LoadSummary::default()
    };
    while let Some(joined) = tasks.join_next().await {
        match joined? {
            Ok((label, data)) => {
                debug!("Loaded configuration {} ({} scalars)", label, data.len());
                summary.store.insert(label, data);
            }
            Err(err @ AnalysisError::Parse { .. }) if config.on_parse_error == ParseErrorPolicy::SkipFile => {
                let label = match &err {
                    AnalysisError::Parse { path, .. } => config_label(path).unwrap_or_default(),
                    _ => String::new(),
                };
                warn!("Skipping configuration {}: {}", label, err);
                summary.rejected.push((label, err));
            }
            Err(err) => {
                tasks.abort_all();
                return Err(err);
            }
        }
    }

    summary.rejected.sort_by(|a, b| a.0.cmp(&b.0));
    Ok(summary)
}
