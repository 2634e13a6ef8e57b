use crate::{
    db::{DataStore, RecordKey},
    model::EntityTag,
    value::Value,
};
use std::collections::{BTreeMap, HashMap};

///
/// ReverseIndexId
/// Identity of one reverse index: the `(source entity, foreign-key field)` pair.
///

#[derive(Clone, Copy, Debug, Eq, Ord, PartialEq, PartialOrd)]
pub struct ReverseIndexId {
    pub source: EntityTag,
    pub field: &'static str,
}

impl ReverseIndexId {
    #[must_use]
    pub const fn new(source: EntityTag, field: &'static str) -> Self {
        Self { source, field }
    }
}

///
/// ReverseIndex
///
/// Parent id → dependent ids, appended in load order.
/// Parent ids are not checked against the parent store; a parent absent
/// from the index simply has no dependents.
///

#[derive(Debug, Default)]
pub struct ReverseIndex(HashMap<RecordKey, Vec<RecordKey>>);

impl ReverseIndex {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `child` under `parent`. A null (or non-key) parent is a no-op.
    pub fn link(&mut self, parent: &Value, child: RecordKey) -> bool {
        let Some(parent) = RecordKey::from_value(parent) else {
            return false;
        };
        self.0.entry(parent).or_default().push(child);

        true
    }

    /// Dependents of `parent` in link order; empty when absent.
    #[must_use]
    pub fn lookup(&self, parent: &RecordKey) -> &[RecordKey] {
        self.0.get(parent).map(Vec::as_slice).unwrap_or_default()
    }

    /// Number of parents with at least one dependent.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

///
/// RelationIndexes
///
/// Every reverse index, derived from the stores and the models' foreign
/// keys. Never a source of truth: rebuilt from scratch on each load.
///

#[derive(Debug, Default)]
pub struct RelationIndexes {
    indexes: BTreeMap<ReverseIndexId, ReverseIndex>,
}

impl RelationIndexes {
    /// Build one reverse index per foreign-key field of every variant.
    ///
    /// Must run after every store is populated.
    #[must_use]
    pub fn build<'a>(stores: impl IntoIterator<Item = &'a DataStore>) -> Self {
        let mut indexes: BTreeMap<ReverseIndexId, ReverseIndex> = BTreeMap::new();

        for store in stores {
            let model = store.tag().model();

            for (field, _target) in model.relations() {
                let index = indexes
                    .entry(ReverseIndexId::new(store.tag(), field))
                    .or_default();

                for record in store {
                    // Records in a store always carry a key.
                    let (Some(child), Some(parent)) = (record.key(), record.get(field)) else {
                        continue;
                    };
                    index.link(parent, child);
                }
            }
        }

        Self { indexes }
    }

    #[must_use]
    pub fn get(&self, id: ReverseIndexId) -> Option<&ReverseIndex> {
        self.indexes.get(&id)
    }

    /// Dependents of `parent` through the `(source, field)` index.
    #[must_use]
    pub fn lookup(&self, id: ReverseIndexId, parent: &RecordKey) -> &[RecordKey] {
        self.get(id)
            .map(|index| index.lookup(parent))
            .unwrap_or_default()
    }

    pub fn iter(&self) -> impl Iterator<Item = (ReverseIndexId, &ReverseIndex)> {
        self.indexes.iter().map(|(id, index)| (*id, index))
    }
}
