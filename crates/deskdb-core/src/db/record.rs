use crate::{
    model::{EntityFieldKind, EntityModel, EntityTag},
    value::Value,
};
use derive_more::Display;
use serde_json::{Map, Value as JsonValue};

///
/// RawRecord
/// One decoded source record, as handed over by a `RecordSource`.
///

pub type RawRecord = Map<String, JsonValue>;

///
/// RecordKey
///
/// Hashable form of a unique identifier. Only integer and text values can
/// identify a record; every other value kind has no key.
///

#[derive(Clone, Debug, Display, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub enum RecordKey {
    #[display("{_0}")]
    Int(i64),
    #[display("{_0}")]
    Text(String),
}

impl RecordKey {
    #[must_use]
    pub fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Int(n) => Some(Self::Int(*n)),
            Value::Text(s) => Some(Self::Text(s.clone())),
            _ => None,
        }
    }
}

impl From<i64> for RecordKey {
    fn from(n: i64) -> Self {
        Self::Int(n)
    }
}

impl From<&str> for RecordKey {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

///
/// Record
///
/// One entity instance: a variant tag plus one value per declared field,
/// stored in declaration order. Records are immutable once constructed.
///

#[derive(Clone, Debug, PartialEq)]
pub struct Record {
    tag: EntityTag,
    values: Box<[Value]>,
}

impl Record {
    /// Project a raw record onto the variant's declared fields.
    ///
    /// Undeclared keys are dropped; declared fields missing from `raw` stay null.
    #[must_use]
    pub fn from_raw(tag: EntityTag, raw: &RawRecord) -> Self {
        let model = tag.model();
        let values = model
            .fields
            .iter()
            .map(|field| {
                let value = raw.get(field.name).map_or(Value::Null, Value::from_json);
                normalize(field.kind, value)
            })
            .collect();

        Self { tag, values }
    }

    /// Build a record from `(field, value)` pairs with the same projection rules.
    pub fn from_fields<I, K>(tag: EntityTag, fields: I) -> Self
    where
        I: IntoIterator<Item = (K, Value)>,
        K: AsRef<str>,
    {
        let model = tag.model();
        let mut values = vec![Value::Null; model.fields.len()];
        for (name, value) in fields {
            if let Some(slot) = model.field_slot(name.as_ref()) {
                values[slot] = normalize(model.fields[slot].kind, value);
            }
        }

        Self {
            tag,
            values: values.into_boxed_slice(),
        }
    }

    #[must_use]
    pub const fn tag(&self) -> EntityTag {
        self.tag
    }

    #[must_use]
    pub fn model(&self) -> &'static EntityModel {
        self.tag.model()
    }

    /// Value of a declared field, or `None` if the variant does not declare it.
    #[must_use]
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.model()
            .field_slot(field)
            .and_then(|slot| self.values.get(slot))
    }

    /// Value of the variant's unique-identifier field.
    #[must_use]
    pub fn unique_identifier(&self) -> &Value {
        self.get(self.model().primary_key).unwrap_or(&Value::Null)
    }

    /// Hashable unique identifier, when the identifier is an integer or text.
    #[must_use]
    pub fn key(&self) -> Option<RecordKey> {
        RecordKey::from_value(self.unique_identifier())
    }

    /// Foreign-key fields of this variant and their target variants.
    pub fn foreign_key_links(&self) -> impl Iterator<Item = (&'static str, EntityTag)> + use<> {
        self.model().relations()
    }

    /// Short display string used when this record appears as a joined reference.
    #[must_use]
    pub fn external_repr(&self) -> String {
        self.model()
            .summary
            .iter()
            .map(|part| {
                let value = self.get(part.field).unwrap_or(&Value::Null);
                format!("{}: {value}", part.label)
            })
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// `(name, value)` pairs in declaration order.
    pub fn fields(&self) -> impl Iterator<Item = (&'static str, &Value)> {
        let model = self.model();
        model
            .fields
            .iter()
            .map(|field| field.name)
            .zip(self.values.iter())
    }
}

// Apply declared-kind normalization to one decoded value.
fn normalize(kind: EntityFieldKind, value: Value) -> Value {
    match (kind, value) {
        (EntityFieldKind::TextSet, Value::List(items)) => Value::set_from(items),
        (_, value) => value,
    }
}
