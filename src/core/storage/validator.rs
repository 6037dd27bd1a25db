//! Collection validation and consistency checking.
//!
//! Verifies that a persisted collection's metadata agrees with the
//! entries actually stored on disk before it is served.

use std::path::Path;

use serde::{Deserialize, Serialize};
use walkdir::WalkDir;

use crate::core::storage::collection::{CollectionMetadata, IndexEntry, SCHEMA_VERSION};

/// Collection validation report
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidationReport {
    /// Collection name validated
    pub collection: String,

    /// Metadata values
    pub metadata_chunks: usize,
    pub metadata_dimensions: usize,
    pub schema_version: u32,

    /// Actual measured values
    pub actual_entries: usize,
    pub size_bytes: u64,

    /// Problems found, empty when consistent
    pub issues: Vec<String>,
    pub is_consistent: bool,

    /// Validation timestamp
    pub validated_at: String,
}

/// Checks a loaded collection before it is served
pub struct CollectionValidator<'a> {
    metadata: &'a CollectionMetadata,
    entries: &'a [IndexEntry],
}

impl<'a> CollectionValidator<'a> {
    pub fn new(metadata: &'a CollectionMetadata, entries: &'a [IndexEntry]) -> Self {
        Self { metadata, entries }
    }

    /// Validate metadata against entries
    ///
    /// Checks:
    /// - Schema version is the current one
    /// - Entry count matches the recorded chunk count
    /// - Every vector has the recorded dimensions
    /// - Every vector component is finite
    /// - Chunk indices are sequential from 0
    pub fn validate(&self, collection_dir: &Path) -> ValidationReport {
        let mut issues = Vec::new();
        let meta = self.metadata;

        if meta.schema_version != SCHEMA_VERSION {
            issues.push(format!(
                "schema version {} (current: v{})",
                meta.schema_version, SCHEMA_VERSION
            ));
        }

        if meta.chunk_count != self.entries.len() {
            issues.push(format!(
                "metadata records {} chunks, found {} entries",
                meta.chunk_count,
                self.entries.len()
            ));
        }

        if !self.entries.is_empty() && meta.dimensions == 0 {
            issues.push("non-empty collection with zero dimensions".to_string());
        }

        for (position, entry) in self.entries.iter().enumerate() {
            if entry.vector.len() != meta.dimensions {
                issues.push(format!(
                    "entry {} has {} dimensions, expected {}",
                    position,
                    entry.vector.len(),
                    meta.dimensions
                ));
                break;
            }
            if entry.vector.iter().any(|v| !v.is_finite()) {
                issues.push(format!("entry {position} has non-finite values"));
                break;
            }
            if entry.chunk.chunk_index != position {
                issues.push(format!(
                    "entry {} has chunk_index {}",
                    position, entry.chunk.chunk_index
                ));
                break;
            }
        }

        ValidationReport {
            collection: meta.name.clone(),
            metadata_chunks: meta.chunk_count,
            metadata_dimensions: meta.dimensions,
            schema_version: meta.schema_version,
            actual_entries: self.entries.len(),
            size_bytes: calculate_directory_size(collection_dir),
            is_consistent: issues.is_empty(),
            issues,
            validated_at: chrono::Utc::now().to_rfc3339(),
        }
    }
}

/// Calculate total size of a directory recursively
pub fn calculate_directory_size(dir_path: &Path) -> u64 {
    let mut total_size = 0u64;

    if !dir_path.exists() {
        return 0;
    }

    for entry in WalkDir::new(dir_path).into_iter().filter_map(|e| e.ok()) {
        if entry.file_type().is_file() {
            if let Ok(metadata) = entry.metadata() {
                total_size += metadata.len();
            }
        }
    }

    total_size
}
