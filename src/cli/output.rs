//! Stdout rendering of a snapshot
//!
//! The human format is the report itself; JSON and YAML expose the extracted
//! structures with absent values as `null` instead of display sentinels.

use anyhow::{Context, Result};

use crate::snapshot::Snapshot;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// The same text that is written to the snapshot file
    Human,
    /// JSON format (machine-readable)
    Json,
    /// YAML format
    Yaml,
}

pub struct OutputFormatter {
    format: OutputFormat,
}

impl OutputFormatter {
    pub fn new(format: OutputFormat) -> Self {
        Self { format }
    }

    pub fn format(&self, snapshot: &Snapshot) -> Result<String> {
        match self.format {
            OutputFormat::Human => Ok(snapshot.report_text()),
            OutputFormat::Json => serde_json::to_string_pretty(snapshot)
                .context("Failed to serialize snapshot to JSON"),
            OutputFormat::Yaml => {
                serde_yaml::to_string(snapshot).context("Failed to serialize snapshot to YAML")
            }
        }
    }
}
