//! trainsnap - static snapshot of a training run's effective configuration
//!
//! Reads a training script and the model config document it points at,
//! without executing either, and reports what the run would actually use:
//! training stage, resume checkpoint, context injection settings, the
//! calligraphy switch and the dataset manifests.
//!
//! # Example Usage
//!
//! ```no_run
//! use trainsnap::{RealFileSystem, SnapshotConfig, SnapshotRunner};
//!
//! let fs = RealFileSystem::new();
//! let config = SnapshotConfig::default();
//! let snapshot = SnapshotRunner::new(&fs, &config).run(chrono::Local::now())?;
//! println!("{}", snapshot.report_text());
//! # Ok::<(), trainsnap::SnapshotError>(())
//! ```
//!
//! # Project Structure
//!
//! - [`extractors`]: pattern, branch, syntax-tree and YAML lookups
//! - [`report`]: report composition and the snapshot file writer
//! - [`snapshot`]: sequencing of one run
//! - [`fs`]: file system seam with a mock for tests

pub mod cli;
pub mod config;
pub mod error;
pub mod extractors;
pub mod fs;
pub mod report;
pub mod snapshot;
pub mod util;

pub use config::{ConfigError, SnapshotConfig};
pub use error::SnapshotError;
pub use extractors::{ExtractedTrainingInfo, Injection, ResumeSource, YamlConfigInfo};
pub use fs::{FileSystem, MockFileSystem, RealFileSystem};
pub use snapshot::{Snapshot, SnapshotRunner};
pub use util::{init_logging, LoggingConfig};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");
