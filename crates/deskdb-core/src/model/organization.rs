use crate::{
    DEFAULT_PRIMARY_KEY,
    model::{
        EntityFieldKind as Kind, EntityFieldModel as Field, EntityModel, EntityTag,
        ReverseRelationModel, SummaryPart,
    },
};

static FIELDS: [Field; 9] = [
    Field::new("domain_names", Kind::TextSet),
    Field::new("created_at", Kind::Timestamp),
    Field::new("shared_tickets", Kind::Bool),
    Field::new("tags", Kind::TextList),
    Field::new("name", Kind::Text),
    Field::new("details", Kind::Text),
    Field::new("url", Kind::Text),
    Field::new(DEFAULT_PRIMARY_KEY, Kind::Int),
    Field::new("external_id", Kind::Text),
];

static SUMMARY: [SummaryPart; 2] = [
    SummaryPart::new("name", "name"),
    SummaryPart::new("website", "url"),
];

// Employees first, then the organization's cases.
static REVERSE: [ReverseRelationModel; 2] = [
    ReverseRelationModel::new(EntityTag::Account, "organization_id", "employee", ""),
    ReverseRelationModel::new(EntityTag::Case, "organization_id", "ticket", ""),
];

pub(crate) static ORGANIZATION: EntityModel = EntityModel {
    tag: EntityTag::Organization,
    entity_name: "Organization",
    display_name: "Organization",
    primary_key: DEFAULT_PRIMARY_KEY,
    fields: &FIELDS,
    summary: &SUMMARY,
    reverse: &REVERSE,
};
