use crate::{
    DEFAULT_PRIMARY_KEY,
    model::{
        EntityFieldKind as Kind, EntityFieldModel as Field, EntityModel, EntityTag, SummaryPart,
    },
};

static FIELDS: [Field; 16] = [
    Field::new("type", Kind::Text),
    Field::new("status", Kind::Text),
    Field::new("description", Kind::Text),
    Field::new("via", Kind::Text),
    Field::new("submitter_id", Kind::Relation(EntityTag::Account)),
    Field::new("assignee_id", Kind::Relation(EntityTag::Account)),
    Field::new("tags", Kind::TextList),
    Field::new("url", Kind::Text),
    Field::new("subject", Kind::Text),
    Field::new("organization_id", Kind::Relation(EntityTag::Organization)),
    Field::new("created_at", Kind::Timestamp),
    Field::new("has_incidents", Kind::Bool),
    Field::new("priority", Kind::Text),
    Field::new("due_at", Kind::Timestamp),
    Field::new(DEFAULT_PRIMARY_KEY, Kind::Text),
    Field::new("external_id", Kind::Text),
];

static SUMMARY: [SummaryPart; 2] = [
    SummaryPart::new("subject", "subject"),
    SummaryPart::new("priority", "priority"),
];

pub(crate) static CASE: EntityModel = EntityModel {
    tag: EntityTag::Case,
    entity_name: "Case",
    display_name: "Ticket",
    primary_key: DEFAULT_PRIMARY_KEY,
    fields: &FIELDS,
    summary: &SUMMARY,
    reverse: &[],
};
