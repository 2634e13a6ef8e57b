use crate::{
    DEFAULT_PRIMARY_KEY,
    model::{
        EntityFieldKind as Kind, EntityFieldModel as Field, EntityModel, EntityTag,
        ReverseRelationModel, SummaryPart,
    },
};

static FIELDS: [Field; 19] = [
    Field::new("url", Kind::Text),
    Field::new("name", Kind::Text),
    Field::new("alias", Kind::Text),
    Field::new("created_at", Kind::Timestamp),
    Field::new("active", Kind::Bool),
    Field::new("verified", Kind::Bool),
    Field::new("shared", Kind::Bool),
    Field::new("locale", Kind::Text),
    Field::new("timezone", Kind::Text),
    Field::new("last_login_at", Kind::Timestamp),
    Field::new("email", Kind::Text),
    Field::new("phone", Kind::Text),
    Field::new("signature", Kind::Text),
    Field::new("organization_id", Kind::Relation(EntityTag::Organization)),
    Field::new("tags", Kind::TextList),
    Field::new("suspended", Kind::Bool),
    Field::new("role", Kind::Text),
    Field::new(DEFAULT_PRIMARY_KEY, Kind::Int),
    Field::new("external_id", Kind::Text),
];

static SUMMARY: [SummaryPart; 2] = [
    SummaryPart::new("name", "name"),
    SummaryPart::new("role", "role"),
];

// Cases the account submitted come before cases assigned to it.
static REVERSE: [ReverseRelationModel; 2] = [
    ReverseRelationModel::new(EntityTag::Case, "submitter_id", "ticket", "_as_submitter"),
    ReverseRelationModel::new(EntityTag::Case, "assignee_id", "ticket", "_as_assignee"),
];

pub(crate) static ACCOUNT: EntityModel = EntityModel {
    tag: EntityTag::Account,
    entity_name: "Account",
    display_name: "User",
    primary_key: DEFAULT_PRIMARY_KEY,
    fields: &FIELDS,
    summary: &SUMMARY,
    reverse: &REVERSE,
};
