//! Read-merge-write of the CSV store.

use crate::error::{Result, StoreError};
use harvester_core::{DetailRecord, StoreRow};
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use tracing::{debug, info, warn};

/// Counts describing one completed merge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MergeReport {
    /// Rows present before the merge
    pub existing: usize,
    /// Rows that were not already stored
    pub added: usize,
    /// Rows in the store after the merge
    pub total: usize,
}

/// The durable store file.
#[derive(Debug, Clone)]
pub struct DirectoryStore {
    path: PathBuf,
}

impl DirectoryStore {
    /// Create a handle for the store at `path`. The file is created on first merge.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Path of the store file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read all persisted rows, or none if the store does not exist yet.
    pub fn load(&self) -> Result<Vec<StoreRow>> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }

        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .from_path(&self.path)?;

        let headers = reader.headers()?.clone();
        if headers.is_empty() {
            // Empty file, nothing persisted yet
            return Ok(Vec::new());
        }
        if !headers.iter().eq(StoreRow::HEADER.iter().copied()) {
            return Err(StoreError::SchemaMismatch {
                path: self.path.display().to_string(),
                found: headers.iter().map(ToString::to_string).collect(),
            });
        }

        let rows = reader
            .deserialize()
            .collect::<std::result::Result<Vec<StoreRow>, _>>()?;
        Ok(rows)
    }

    /// Merge `records` into the store.
    ///
    /// Existing rows and the new records are concatenated, exact duplicates
    /// across all four columns are dropped (first occurrence wins), and the
    /// result is ordered by ordinal. Persisted rows no longer carry an ordinal
    /// and sort after the incoming batch, keeping their stored order. The
    /// ordinal itself is not written.
    ///
    /// Returns `None` without touching the file when `records` is empty.
    pub fn merge(&self, records: Vec<DetailRecord>) -> Result<Option<MergeReport>> {
        if records.is_empty() {
            warn!("No data to save");
            return Ok(None);
        }

        match self.merge_inner(records) {
            Ok(report) => Ok(Some(report)),
            Err(e) => {
                tracing::error!("Error saving data to {}: {}", self.path.display(), e);
                Err(e)
            }
        }
    }

    fn merge_inner(&self, records: Vec<DetailRecord>) -> Result<MergeReport> {
        let existing = self.load()?;
        let existing_count = existing.len();
        if self.path.exists() {
            info!("Merged with existing data in {}", self.path.display());
        } else {
            info!("Creating new store: {}", self.path.display());
        }

        let combined = existing.into_iter().map(|row| (None, row)).chain(
            records
                .into_iter()
                .map(|record| (Some(record.ordinal), StoreRow::from(record))),
        );
        let rows = merge_rows(combined);

        self.write(&rows)?;

        let report = MergeReport {
            existing: existing_count,
            added: rows.len().saturating_sub(existing_count),
            total: rows.len(),
        };
        info!(
            "Data saved to {}. Total records: {}",
            self.path.display(),
            report.total
        );
        Ok(report)
    }

    /// Replace the store with `rows` via a temp file in the same directory.
    fn write(&self, rows: &[StoreRow]) -> Result<()> {
        let dir = self
            .path
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .unwrap_or_else(|| Path::new("."));
        std::fs::create_dir_all(dir)?;

        let temp = NamedTempFile::new_in(dir)?;
        let mut writer = csv::WriterBuilder::new()
            .has_headers(false)
            .from_writer(temp);
        writer.write_record(StoreRow::HEADER)?;
        for row in rows {
            writer.serialize(row)?;
        }
        let temp = writer.into_inner().map_err(|e| e.into_error())?;
        temp.persist(&self.path)?;

        debug!("Wrote {} rows to {}", rows.len(), self.path.display());
        Ok(())
    }
}

/// Drop exact duplicates (first occurrence wins) and sort by ordinal,
/// rows without an ordinal last. The sort is stable.
fn merge_rows(rows: impl IntoIterator<Item = (Option<usize>, StoreRow)>) -> Vec<StoreRow> {
    let mut seen = HashSet::new();
    let mut unique: Vec<(Option<usize>, StoreRow)> = rows
        .into_iter()
        .filter(|(_, row)| seen.insert(row.clone()))
        .collect();

    unique.sort_by_key(|(ordinal, _)| ordinal.map_or((1, 0), |o| (0, o)));
    unique.into_iter().map(|(_, row)| row).collect()
}
