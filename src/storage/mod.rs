//! Storage module for persisting run output
//!
//! This module owns the on-disk layout of a run:
//! - a base directory
//! - a flat subdirectory holding one file per downloaded document
//! - a single JSON statistics report, overwritten on every run
//!
//! Concurrent runs against the same base directory are not supported.

mod error;
mod layout;

pub use error::{StorageError, StorageResult};
pub use layout::{DocumentWriter, StorageLayout};

use crate::config::OutputConfig;
use std::path::Path;

/// Creates (if needed) the directory layout described by the output configuration
///
/// # Returns
///
/// * `Ok(StorageLayout)` - Directories exist and are ready for writes
/// * `Err(StorageError)` - A directory could not be created
pub fn open_storage(config: &OutputConfig) -> StorageResult<StorageLayout> {
    StorageLayout::prepare(
        Path::new(&config.base_dir),
        &config.pdfs_subdir,
        &config.stats_file,
    )
}
