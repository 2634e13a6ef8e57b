use crate::{
    db::{Record, ReverseIndexId, Snapshot},
    model::{EntityModel, EntityTag},
    obs::sink::{self, MetricsEvent, PlanKind},
    value::Value,
};
use derive_more::{Deref, IntoIterator};
use serde::Serialize;
use thiserror::Error as ThisError;
use tracing::debug;

///
/// CONSTANTS
///

/// Label of the header row that opens the additional-data block.
pub const ADDITIONAL_DATA_LABEL: &str = "Additional Data";

/// Value of the header row that opens the additional-data block.
pub const ADDITIONAL_DATA_NOTE: &str = "Below is additional data from linked data sets";

///
/// QueryError
/// Recoverable query-time failure; the caller may correct its input.
///

#[derive(Debug, ThisError)]
pub enum QueryError {
    #[error("{entity} has no field named '{field}'")]
    UnknownField { entity: &'static str, field: String },

    #[error("unknown entity selector '{selector}'")]
    UnknownEntity { selector: String },
}

///
/// ResultRow
/// One printable `[label, value]` pair.
///

#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct ResultRow {
    pub label: String,
    pub value: String,
}

impl ResultRow {
    pub fn new(label: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            value: value.into(),
        }
    }

    /// Separator row with an empty label and value.
    #[must_use]
    pub fn blank() -> Self {
        Self::new("", "")
    }
}

///
/// SearchResult
///
/// Rendered output for one matched record: its fields in declaration order,
/// then, when any dependents exist, the additional-data block.
///

#[derive(Clone, Debug)]
pub struct SearchResult {
    pub tag: EntityTag,
    pub rows: Vec<ResultRow>,
}

impl SearchResult {
    /// Value of the first row with `label`.
    #[must_use]
    pub fn get(&self, label: &str) -> Option<&str> {
        self.rows
            .iter()
            .find(|row| row.label == label)
            .map(|row| row.value.as_str())
    }

    /// Labels in row order.
    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.rows.iter().map(|row| row.label.as_str())
    }
}

///
/// SearchResults
/// Non-empty result sets, in lookup or scan order.
///

#[derive(Clone, Debug, Deref, IntoIterator)]
#[into_iterator(owned, ref)]
pub struct SearchResults(Vec<SearchResult>);

impl SearchResults {
    #[must_use]
    pub fn into_vec(self) -> Vec<SearchResult> {
        self.0
    }
}

impl Snapshot {
    /// Find every record of `tag` whose `field` matches `value`.
    ///
    /// Searching the unique-identifier field is an exact lookup; any other
    /// field is a full scan through the value matcher. `Ok(None)` is the
    /// empty result and is not an error.
    pub fn search(
        &self,
        field: &str,
        value: &Value,
        tag: EntityTag,
    ) -> Result<Option<SearchResults>, QueryError> {
        let model = tag.model();
        if model.field(field).is_none() {
            return Err(QueryError::UnknownField {
                entity: model.entity_name,
                field: field.to_string(),
            });
        }

        let matched: Vec<&Record> = if field == model.primary_key {
            sink::record(MetricsEvent::Search {
                entity: model.entity_name,
                plan: PlanKind::ById,
            });

            self.get_by_id(value, tag).into_iter().collect()
        } else {
            let store = self.store(tag);
            sink::record(MetricsEvent::Search {
                entity: model.entity_name,
                plan: PlanKind::FullScan,
            });
            sink::record(MetricsEvent::RowsScanned {
                entity: model.entity_name,
                rows: store.len() as u64,
            });

            store
                .iter()
                .filter(|record| record.get(field).is_some_and(|current| current.matches(value)))
                .collect()
        };

        debug!(entity = %tag, field, search = %value, matched = matched.len(), "search");

        if matched.is_empty() {
            return Ok(None);
        }

        let results = matched
            .into_iter()
            .map(|record| self.render(record))
            .collect();

        Ok(Some(SearchResults(results)))
    }

    /// Search with a prompt selector (`"1"`, `"ticket"`, ...) instead of a tag.
    pub fn search_selector(
        &self,
        selector: &str,
        field: &str,
        value: &Value,
    ) -> Result<Option<SearchResults>, QueryError> {
        let tag = selector.parse::<EntityTag>()?;

        self.search(field, value, tag)
    }

    // Fields in declaration order with foreign keys enriched, then the
    // additional-data block.
    fn render(&self, record: &Record) -> SearchResult {
        let model = record.model();
        let mut rows: Vec<ResultRow> = record
            .fields()
            .map(|(name, value)| ResultRow::new(name, self.render_field(model, name, value)))
            .collect();

        let additional = self.additional_rows(record);
        if !additional.is_empty() {
            rows.push(ResultRow::blank());
            rows.push(ResultRow::new(ADDITIONAL_DATA_LABEL, ADDITIONAL_DATA_NOTE));
            rows.push(ResultRow::blank());
            rows.extend(additional);
        }

        SearchResult {
            tag: record.tag(),
            rows,
        }
    }

    fn render_field(&self, model: &EntityModel, name: &str, value: &Value) -> String {
        let display = value.to_string();
        let Some(target) = model.relation_target(name) else {
            return display;
        };
        if value.is_null() {
            return display;
        }

        match self.get_by_id(value, target) {
            Some(linked) => format!("{display}, {}", linked.external_repr()),
            None => {
                sink::record(MetricsEvent::DanglingReference {
                    entity: model.entity_name,
                });
                debug!(entity = model.entity_name, field = name, id = %value, "dangling reference");

                display
            }
        }
    }

    // Dependents per reverse section, numbered from 1 within each section.
    fn additional_rows(&self, record: &Record) -> Vec<ResultRow> {
        let Some(key) = record.key() else {
            return Vec::new();
        };

        let mut rows = Vec::new();
        for section in record.model().reverse {
            let id = ReverseIndexId::new(section.source, section.field);
            let dependents = self
                .relations()
                .lookup(id, &key)
                .iter()
                .filter_map(|child| self.get(child, section.source));

            for (i, dependent) in dependents.enumerate() {
                rows.push(ResultRow::new(section.label(i + 1), dependent.external_repr()));
            }
        }

        rows
    }
}
