use crate::{
    db::{Db, MemorySource, RawRecord},
    model::EntityTag,
};
use serde_json::{Value as JsonValue, json};

/// Convert a `json!` object into a raw record.
pub(crate) fn raw(value: JsonValue) -> RawRecord {
    match value {
        JsonValue::Object(map) => map,
        other => panic!("fixture record must be an object, got {other}"),
    }
}

pub(crate) fn raws(values: impl IntoIterator<Item = JsonValue>) -> Vec<RawRecord> {
    values.into_iter().map(raw).collect()
}

/// One organization, three accounts, three cases.
///
/// `c-2` points at a missing organization and `c-3` at a missing submitter.
pub(crate) fn small_source() -> MemorySource {
    MemorySource::new()
        .with(
            EntityTag::Organization,
            raws([json!({
                "_id": 1,
                "url": "http://desk.example/organizations/1.json",
                "name": "Acme",
                "domain_names": ["acme.test", "acme.example", "acme.test"],
                "tags": ["Red", "Blue"],
                "shared_tickets": false,
            })]),
        )
        .with(
            EntityTag::Account,
            raws([
                json!({ "_id": 10, "name": "Ann Archer", "role": "admin", "organization_id": 1, "shared": true }),
                json!({ "_id": 11, "name": "Bob Baker", "role": "agent", "organization_id": 1, "shared": false }),
                json!({ "_id": 12, "name": "Cat Cole", "role": "end-user", "alias": "Miss Cole" }),
            ]),
        )
        .with(
            EntityTag::Case,
            raws([
                json!({
                    "_id": "c-1",
                    "subject": "Broken Thing",
                    "priority": "high",
                    "submitter_id": 10,
                    "assignee_id": 11,
                    "organization_id": 1,
                    "tags": ["Ohio", "Texas"],
                }),
                json!({
                    "_id": "c-2",
                    "subject": "Lost Widget",
                    "priority": "low",
                    "submitter_id": 11,
                    "assignee_id": 10,
                    "organization_id": 2,
                }),
                json!({
                    "_id": "c-3",
                    "subject": "Strange Noise",
                    "priority": "normal",
                    "submitter_id": 99,
                }),
            ]),
        )
}

pub(crate) fn small_db() -> Db {
    Db::open(&small_source()).expect("small fixture loads")
}
