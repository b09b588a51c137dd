//! Write-through, in-memory entity collections.
//!
//! An `EntityStore` owns the canonical records of one entity kind. Every
//! successful mutation is applied in memory first and then the whole
//! collection is written to the blob store. Storage failures are logged and
//! never undo the in-memory change.

use tracing::{debug, error, info, warn};

use zeroerp_core::{
    DomainError, DomainResult, Entity, IdGenerator, Lifecycle, ValidationContext,
};

use crate::blob_store::{BlobStore, StorageError};
use crate::snapshot;

pub struct EntityStore<T: Entity, S: BlobStore> {
    records: Vec<T>,
    blob: S,
    key: String,
    ids: IdGenerator,
}

impl<T, S> core::fmt::Debug for EntityStore<T, S>
where
    T: Entity,
    S: BlobStore,
{
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("EntityStore")
            .field("key", &self.key)
            .field("records", &self.records.len())
            .finish()
    }
}

/// Blob key for a collection: `<namespace>_<kind>`.
pub fn storage_key<T: Entity>(namespace: &str) -> String {
    format!("{namespace}_{}", T::KIND.storage_key())
}

impl<T, S> EntityStore<T, S>
where
    T: Entity,
    S: BlobStore,
{
    /// Load the persisted collection, falling back to `seed` when nothing
    /// usable is stored. Never fails.
    pub fn load(blob: S, namespace: &str, seed: Vec<T>) -> Self {
        let key = storage_key::<T>(namespace);
        let records = match read_records::<T, S>(&blob, &key) {
            Ok(Some(records)) => {
                info!(key = %key, count = records.len(), "loaded persisted collection");
                records
            }
            Ok(None) => {
                debug!(key = %key, "no persisted collection, using seed data");
                seed
            }
            Err(e) => {
                warn!(key = %key, error = %e, "failed to read persisted collection, using seed data");
                seed
            }
        };

        Self {
            records,
            blob,
            key,
            ids: IdGenerator::new(),
        }
    }

    /// Start from `records` without reading the blob store.
    pub fn with_records(blob: S, namespace: &str, records: Vec<T>) -> Self {
        Self {
            records,
            blob,
            key: storage_key::<T>(namespace),
            ids: IdGenerator::new(),
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn list(&self) -> &[T] {
        &self.records
    }

    pub fn get(&self, id: &T::Id) -> Option<&T> {
        self.records.iter().find(|r| r.id() == id)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Validate and append a new record with a fresh identifier.
    pub fn add(&mut self, draft: T::Draft) -> DomainResult<T> {
        self.add_with(draft, &ValidationContext::today())
    }

    pub fn add_with(&mut self, draft: T::Draft, ctx: &ValidationContext) -> DomainResult<T> {
        T::validate(&draft, ctx).into_result()?;

        let id = self.fresh_id();
        let record = T::create(id, draft, ctx);
        info!(kind = %T::KIND, id = %record.id(), "record added");
        self.records.push(record.clone());
        self.persist();
        Ok(record)
    }

    /// Validate and apply an edit. Identity and creation-only fields stay.
    pub fn update(&mut self, id: &T::Id, draft: T::Draft) -> DomainResult<T> {
        self.update_with(id, draft, &ValidationContext::today())
    }

    pub fn update_with(
        &mut self,
        id: &T::Id,
        draft: T::Draft,
        ctx: &ValidationContext,
    ) -> DomainResult<T> {
        T::validate(&draft, ctx).into_result()?;

        let record = self
            .records
            .iter_mut()
            .find(|r| r.id() == id)
            .ok_or_else(|| DomainError::not_found(T::KIND, id.to_string()))?;
        record.apply_update(draft);
        let updated = record.clone();

        info!(kind = %T::KIND, id = %id, "record updated");
        self.persist();
        Ok(updated)
    }

    pub fn remove(&mut self, id: &T::Id) -> DomainResult<T> {
        let pos = self
            .records
            .iter()
            .position(|r| r.id() == id)
            .ok_or_else(|| DomainError::not_found(T::KIND, id.to_string()))?;
        let removed = self.records.remove(pos);

        info!(kind = %T::KIND, id = %id, "record removed");
        self.persist();
        Ok(removed)
    }

    /// Write the collection, logging any failure.
    pub fn persist(&self) {
        match self.try_persist() {
            Ok(()) => debug!(key = %self.key, count = self.records.len(), "collection persisted"),
            Err(e) => error!(key = %self.key, error = %e, "failed to persist collection"),
        }
    }

    pub fn try_persist(&self) -> Result<(), StorageError> {
        let text = snapshot::encode(&self.key, &self.records)?;
        self.blob.set(&self.key, &text)
    }

    fn fresh_id(&mut self) -> T::Id {
        loop {
            let id: T::Id = self.ids.next_id();
            if self.get(&id).is_none() {
                return id;
            }
            warn!(kind = %T::KIND, id = %id, "generated identifier collided, drawing again");
        }
    }
}

impl<T, S> EntityStore<T, S>
where
    T: Lifecycle,
    S: BlobStore,
{
    /// Move a record along one allowed lifecycle edge.
    pub fn transition(&mut self, id: &T::Id, target: T::Status) -> DomainResult<T> {
        let record = self
            .records
            .iter_mut()
            .find(|r| r.id() == id)
            .ok_or_else(|| DomainError::not_found(T::KIND, id.to_string()))?;

        let current = record.status();
        if !T::can_transition(current, target) {
            return Err(DomainError::invalid_transition(id.to_string(), current, target));
        }
        record.set_status(target);
        let updated = record.clone();

        info!(kind = %T::KIND, id = %id, from = %current, to = %target, "status changed");
        self.persist();
        Ok(updated)
    }
}

fn read_records<T, S>(blob: &S, key: &str) -> Result<Option<Vec<T>>, StorageError>
where
    T: Entity,
    S: BlobStore,
{
    match blob.get(key)? {
        Some(text) => snapshot::decode(key, &text).map(Some),
        None => Ok(None),
    }
}
