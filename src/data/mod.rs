mod fingerprint;
mod store;

pub use fingerprint::RecordId;
pub use store::{
    AddOutcome, DEFAULT_STORE_FILE, ImportSummary, RecordStore, StoreError, StoredRecord,
};
