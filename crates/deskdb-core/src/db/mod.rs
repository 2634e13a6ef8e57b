mod load;
mod record;
mod relation;
mod search;
mod source;
mod store;


use crate::{
    model::EntityTag,
    obs::sink::{self, MetricsEvent},
    value::Value,
};
use std::sync::Arc;
use tracing::{info, warn};

// re-exports
pub use load::LoadError;
pub use record::{RawRecord, Record, RecordKey};
pub use relation::{RelationIndexes, ReverseIndex, ReverseIndexId};
pub use search::{
    ADDITIONAL_DATA_LABEL, ADDITIONAL_DATA_NOTE, QueryError, ResultRow, SearchResult, SearchResults,
};
pub use source::{JsonDirSource, MemorySource, RecordSource, SourceLayout};
pub use store::DataStore;

///
/// Snapshot
///
/// One complete, immutable generation of loaded data: a store per variant
/// plus every reverse index derived from them. Queries only ever read a
/// snapshot; reload builds a new one beside it.
///

#[derive(Debug)]
pub struct Snapshot {
    stores: [DataStore; 3],
    relations: RelationIndexes,
    generation: u64,
}

impl Snapshot {
    pub(crate) const fn from_parts(
        stores: [DataStore; 3],
        relations: RelationIndexes,
        generation: u64,
    ) -> Self {
        Self {
            stores,
            relations,
            generation,
        }
    }

    /// Load counter: 1 for the first load, bumped by every successful reload.
    #[must_use]
    pub const fn generation(&self) -> u64 {
        self.generation
    }

    #[must_use]
    pub const fn store(&self, tag: EntityTag) -> &DataStore {
        &self.stores[tag.slot()]
    }

    #[must_use]
    pub const fn relations(&self) -> &RelationIndexes {
        &self.relations
    }

    /// Exact unique-identifier lookup.
    #[must_use]
    pub fn get_by_id(&self, id: &Value, tag: EntityTag) -> Option<&Record> {
        self.store(tag).get_by_value(id)
    }

    #[must_use]
    pub fn get(&self, key: &RecordKey, tag: EntityTag) -> Option<&Record> {
        self.store(tag).get(key)
    }

    /// Every record of a variant, in load order.
    pub fn scan_all(&self, tag: EntityTag) -> std::slice::Iter<'_, Record> {
        self.store(tag).iter()
    }

    /// Total number of records across every variant.
    #[must_use]
    pub fn len(&self) -> usize {
        self.stores.iter().map(DataStore::len).sum()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.stores.iter().all(DataStore::is_empty)
    }
}

///
/// Db
///
/// Handle to the currently published snapshot.
///
/// Readers take an `Arc<Snapshot>` and keep a consistent generation for as
/// long as they hold it; `reload` swaps the handle only after a full,
/// successful rebuild.
///

#[derive(Clone, Debug)]
pub struct Db {
    snapshot: Arc<Snapshot>,
}

impl Db {
    /// Load every variant from `source` and publish the first snapshot.
    pub fn open<S>(source: &S) -> Result<Self, LoadError>
    where
        S: RecordSource + ?Sized,
    {
        let snapshot = Snapshot::load(source, 1)?;

        Ok(Self {
            snapshot: Arc::new(snapshot),
        })
    }

    /// Rebuild everything from `source` and publish it.
    ///
    /// On failure the previous snapshot stays published and the error is
    /// returned unchanged.
    pub fn reload<S>(&mut self, source: &S) -> Result<(), LoadError>
    where
        S: RecordSource + ?Sized,
    {
        let next = self.snapshot.generation().saturating_add(1);

        match Snapshot::load(source, next) {
            Ok(snapshot) => {
                self.snapshot = Arc::new(snapshot);
                sink::record(MetricsEvent::Reload { ok: true });
                info!(generation = next, "reload published");

                Ok(())
            }
            Err(err) => {
                sink::record(MetricsEvent::Reload { ok: false });
                warn!(
                    error = %err,
                    generation = self.snapshot.generation(),
                    "reload failed; keeping previous snapshot"
                );

                Err(err)
            }
        }
    }

    /// Shared handle to the published snapshot.
    #[must_use]
    pub fn snapshot(&self) -> Arc<Snapshot> {
        Arc::clone(&self.snapshot)
    }

    /// Search the published snapshot.
    pub fn search(
        &self,
        field: &str,
        value: &Value,
        tag: EntityTag,
    ) -> Result<Option<SearchResults>, QueryError> {
        self.snapshot.search(field, value, tag)
    }
}
