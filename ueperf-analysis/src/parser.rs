//! OMNeT++ scalar record parsing
//!
//! A result file mixes several record kinds (`version`, `run`, `attr`,
//! `param`, `statistic`, `field`, ...). Only `scalar` records carry the
//! metrics analysed here; everything else is skipped without complaint.

use crate::error::{AnalysisError, AnalysisResult, ParseError};
use crate::store::Dataset;
use std::path::Path;
use tracing::debug;

/// Leading token of a scalar record.
pub const SCALAR_MARKER: &str = "scalar";

/// Parse the scalar records of one result file into a dataset.
///
/// Each record `scalar <module> <metric> <value>` becomes the entry
/// `"<module>.<metric>" -> value`. A repeated key keeps its first position
/// but takes the last value seen.
pub fn parse_scalars(content: &str) -> Result<Dataset, ParseError> {
    let mut data = Dataset::new();

    for (index, line) in content.lines().enumerate() {
        if !line.starts_with(SCALAR_MARKER) {
            continue;
        }

        let fields: Vec<&str> = line.split_whitespace().collect();
        if fields.first() != Some(&SCALAR_MARKER) {
            // e.g. "scalars" or "scalar:" - a different token
            continue;
        }

        let line_no = index + 1;
        if fields.len() < 4 {
            return Err(ParseError::MissingFields {
                line: line_no,
                found: fields.len(),
            });
        }

        let value = parse_value(fields[3]).ok_or_else(|| ParseError::InvalidValue {
            line: line_no,
            value: fields[3].to_string(),
        })?;

        data.insert(format!("{}.{}", fields[1], fields[2]), value);
    }

    Ok(data)
}

fn parse_value(raw: &str) -> Option<f64> {
    raw.parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Read and parse a scalar result file.
pub fn parse_scalar_file(path: &Path) -> AnalysisResult<Dataset> {
    let content = std::fs::read_to_string(path).map_err(|e| AnalysisError::io(path, e))?;
    let data = parse_scalars(&content).map_err(|source| AnalysisError::Parse {
        path: path.to_path_buf(),
        source,
    })?;
    debug!("Parsed {} scalars from {}", data.len(), path.display());
    Ok(data)
}
