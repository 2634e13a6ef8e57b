//! Static entity models.
//!
//! Every piece of per-variant metadata (field order, declared kinds,
//! foreign keys, external representation, additional-data sections) is a
//! `static` built at compile time; nothing here is computed lazily.

mod account;
mod case;
mod entity;
mod field;
mod organization;


pub use entity::{
    EntityModel, EntityTag, FIELD_LISTING_DELIMITER, ReverseRelationModel, SummaryPart,
};
pub use field::{EntityFieldKind, EntityFieldModel};

/// Searchable-field listing blocks for every variant, in prompt order.
#[must_use]
pub fn searchable_fields_listings() -> Vec<String> {
    EntityTag::PROMPT_ORDER
        .iter()
        .map(|tag| tag.model().searchable_fields_listing())
        .collect()
}
