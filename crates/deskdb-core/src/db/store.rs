use crate::{
    db::{LoadError, RawRecord, Record, RecordKey},
    model::EntityTag,
    value::Value,
};
use std::collections::HashMap;

///
/// DataStore
///
/// Per-variant record store: records in load order plus a unique-id map.
/// Built once by `load`; read-only afterwards.
///

#[derive(Debug)]
pub struct DataStore {
    tag: EntityTag,
    rows: Vec<Record>,
    keys: HashMap<RecordKey, usize>,
}

impl DataStore {
    #[must_use]
    pub fn new(tag: EntityTag) -> Self {
        Self {
            tag,
            rows: Vec::new(),
            keys: HashMap::new(),
        }
    }

    /// Construct and insert every raw record, in order.
    ///
    /// Fails on the first record whose identifier is unusable or already present.
    pub fn load<I>(tag: EntityTag, raw: I) -> Result<Self, LoadError>
    where
        I: IntoIterator<Item = RawRecord>,
    {
        let mut store = Self::new(tag);
        for (position, raw) in raw.into_iter().enumerate() {
            store.insert_at(position, Record::from_raw(tag, &raw))?;
        }

        Ok(store)
    }

    /// Insert one record by its unique identifier.
    pub fn insert(&mut self, record: Record) -> Result<(), LoadError> {
        self.insert_at(self.rows.len(), record)
    }

    fn insert_at(&mut self, position: usize, record: Record) -> Result<(), LoadError> {
        debug_assert_eq!(record.tag(), self.tag);

        let entity = self.tag.model().entity_name;
        let key = record
            .key()
            .ok_or(LoadError::InvalidIdentifier { entity, position })?;

        if self.keys.contains_key(&key) {
            return Err(LoadError::DuplicateIdentifier {
                entity,
                id: key.to_string(),
            });
        }

        self.keys.insert(key, self.rows.len());
        self.rows.push(record);

        Ok(())
    }

    #[must_use]
    pub const fn tag(&self) -> EntityTag {
        self.tag
    }

    #[must_use]
    pub fn get(&self, key: &RecordKey) -> Option<&Record> {
        self.keys.get(key).map(|&slot| &self.rows[slot])
    }

    /// Exact lookup by identifier value; non-key values never resolve.
    #[must_use]
    pub fn get_by_value(&self, id: &Value) -> Option<&Record> {
        RecordKey::from_value(id).and_then(|key| self.get(&key))
    }

    /// Every record in load order.
    pub fn iter(&self) -> std::slice::Iter<'_, Record> {
        self.rows.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

impl<'a> IntoIterator for &'a DataStore {
    type Item = &'a Record;
    type IntoIter = std::slice::Iter<'a, Record>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
