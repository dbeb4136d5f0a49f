//! JSON-file backed question store.
//!
//! Every stored question is tagged with its [`RecordId`]; adding a question
//! whose id already exists is reported as a duplicate instead of stored.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info, warn};

use super::fingerprint::RecordId;
use crate::models::{QuestionRecord, RecordError};
use crate::parser::{ParseError, parse_block};

/// File name used when no store path is configured.
pub const DEFAULT_STORE_FILE: &str = "simulado_questions_v1.json";

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("failed to access {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to serialize questions: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error("invalid question: {0}")]
    InvalidRecord(#[from] RecordError),

    #[error("another question already has id {0}")]
    Duplicate(RecordId),
}

/// A question as persisted: its id followed by the record fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredRecord {
    pub id: RecordId,
    #[serde(flatten)]
    pub record: QuestionRecord,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AddOutcome {
    Added { id: RecordId, total: usize },
    Duplicate { id: RecordId },
}

/// Tally of a block import.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ImportSummary {
    pub added: usize,
    pub duplicates: usize,
}

pub struct RecordStore {
    path: PathBuf,
    records: Vec<StoredRecord>,
}

impl RecordStore {
    /// Open the store at `path`.
    ///
    /// A missing file is an empty store. An unreadable or corrupt file is
    /// logged and also treated as empty; it is overwritten on the next change.
    pub fn open<P: AsRef<Path>>(path: P) -> Self {
        let path = path.as_ref().to_path_buf();
        let records = load_records(&path);
        debug!(path = %path.display(), count = records.len(), "opened question store");
        Self { path, records }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn list(&self) -> &[StoredRecord] {
        &self.records
    }

    /// The bare records, in stored order.
    pub fn questions(&self) -> Vec<QuestionRecord> {
        self.records.iter().map(|stored| stored.record.clone()).collect()
    }

    pub fn get(&self, id: &RecordId) -> Option<&StoredRecord> {
        self.records.iter().find(|stored| &stored.id == id)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn add(&mut self, record: QuestionRecord) -> Result<AddOutcome, StoreError> {
        let outcome = self.insert(record)?;
        if matches!(outcome, AddOutcome::Added { .. }) {
            self.save()?;
        }
        Ok(outcome)
    }

    /// Parse `text` and add every question in it.
    ///
    /// A parse error leaves the store untouched.
    pub fn import_block(&mut self, text: &str) -> Result<ImportSummary, StoreError> {
        let records = parse_block(text)?;
        let mut summary = ImportSummary::default();

        for record in records {
            match self.insert(record)? {
                AddOutcome::Added { .. } => summary.added += 1,
                AddOutcome::Duplicate { .. } => summary.duplicates += 1,
            }
        }

        if summary.added > 0 {
            self.save()?;
        }

        info!(
            added = summary.added,
            duplicates = summary.duplicates,
            "imported question block"
        );
        Ok(summary)
    }

    pub fn remove(&mut self, id: &RecordId) -> Result<bool, StoreError> {
        let before = self.records.len();
        self.records.retain(|stored| &stored.id != id);

        if self.records.len() == before {
            return Ok(false);
        }

        self.save()?;
        info!(%id, "removed question");
        Ok(true)
    }

    /// Replace the question stored under `id`.
    ///
    /// The id is recomputed from the new content, so the returned id may
    /// differ from `id`. Returns `None` when nothing is stored under `id`.
    pub fn update(
        &mut self,
        id: &RecordId,
        record: QuestionRecord,
    ) -> Result<Option<RecordId>, StoreError> {
        record.validate()?;

        let Some(index) = self.records.iter().position(|stored| &stored.id == id) else {
            return Ok(None);
        };

        let new_id = RecordId::for_record(&record);
        if self
            .records
            .iter()
            .enumerate()
            .any(|(i, stored)| i != index && stored.id == new_id)
        {
            return Err(StoreError::Duplicate(new_id));
        }

        self.records[index] = StoredRecord {
            id: new_id.clone(),
            record,
        };
        self.save()?;

        info!(old = %id, new = %new_id, "updated question");
        Ok(Some(new_id))
    }

    pub fn clear(&mut self) -> Result<(), StoreError> {
        self.records.clear();

        match fs::remove_file(&self.path) {
            Ok(()) => {}
            Err(err) if err.kind() == io::ErrorKind::NotFound => {}
            Err(source) => {
                return Err(StoreError::Io {
                    path: self.path.clone(),
                    source,
                });
            }
        }

        info!(path = %self.path.display(), "cleared question store");
        Ok(())
    }

    /// Pretty-printed JSON array of every stored question.
    pub fn export_json(&self) -> Result<String, StoreError> {
        Ok(serde_json::to_string_pretty(&self.records)?)
    }

    fn insert(&mut self, record: QuestionRecord) -> Result<AddOutcome, StoreError> {
        record.validate()?;

        let id = RecordId::for_record(&record);
        if self.get(&id).is_some() {
            debug!(%id, "skipping duplicate question");
            return Ok(AddOutcome::Duplicate { id });
        }

        self.records.push(StoredRecord {
            id: id.clone(),
            record,
        });

        Ok(AddOutcome::Added {
            id,
            total: self.records.len(),
        })
    }

    fn save(&self) -> Result<(), StoreError> {
        let json = serde_json::to_string_pretty(&self.records)?;

        let io_error = |source: io::Error| StoreError::Io {
            path: self.path.clone(),
            source,
        };

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(io_error)?;
        }
        fs::write(&self.path, json).map_err(io_error)?;

        debug!(path = %self.path.display(), count = self.records.len(), "saved question store");
        Ok(())
    }
}

fn load_records(path: &Path) -> Vec<StoredRecord> {
    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(err) if err.kind() == io::ErrorKind::NotFound => return Vec::new(),
        Err(err) => {
            warn!(path = %path.display(), error = %err, "failed to read question store");
            return Vec::new();
        }
    };

    if content.trim().is_empty() {
        return Vec::new();
    }

    serde_json::from_str(&content).unwrap_or_else(|err| {
        warn!(path = %path.display(), error = %err, "question store is corrupt; starting empty");
        Vec::new()
    })
}
