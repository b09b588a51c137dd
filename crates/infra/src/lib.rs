//! Infrastructure layer: blob persistence, entity stores, seed data, CSV export.

pub mod blob_store;
pub mod export;
pub mod seed;
pub mod snapshot;
pub mod state;
pub mod store;

pub use blob_store::{BlobStore, FileBlobStore, InMemoryBlobStore, StorageError};
pub use export::{CsvRecord, encode_csv, escape_field};
pub use state::{Dashboard, ErpStore};
pub use store::{EntityStore, storage_key};
