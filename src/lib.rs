//! Ultra Ethernet simulation performance reporting
//!
//! The root crate ships the `ueperf-report` binary and re-exports the
//! analysis library for embedding.

pub use ueperf_analysis as analysis;

/// Re-export common types and utilities
pub mod prelude {
    pub use crate::analysis::*;
    pub use crate::analysis::render::{write_report, Renderer};
}
