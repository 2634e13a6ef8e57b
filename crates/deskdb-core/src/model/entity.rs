use crate::{
    db::QueryError,
    model::{EntityFieldModel, account::ACCOUNT, case::CASE, organization::ORGANIZATION},
};
use std::{fmt, str::FromStr};

///
/// CONSTANTS
///

/// Delimiter printed after each block of the searchable-field listing.
pub const FIELD_LISTING_DELIMITER: &str = "----------------------------------------------------";

///
/// EntityTag
///
/// Closed selector over the three entity variants.
/// Declaration order is load order: organizations first, then the
/// entities that reference them.
///

#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub enum EntityTag {
    Organization,
    Account,
    Case,
}

impl EntityTag {
    /// Every variant in load order.
    pub const ALL: [Self; 3] = [Self::Organization, Self::Account, Self::Case];

    /// Variants in prompt order (selector numbers 1, 2, 3).
    pub const PROMPT_ORDER: [Self; 3] = [Self::Account, Self::Case, Self::Organization];

    /// Static model for this variant.
    #[must_use]
    pub fn model(self) -> &'static EntityModel {
        match self {
            Self::Account => &ACCOUNT,
            Self::Case => &CASE,
            Self::Organization => &ORGANIZATION,
        }
    }

    /// Dense slot used by per-variant arrays.
    #[must_use]
    pub const fn slot(self) -> usize {
        match self {
            Self::Organization => 0,
            Self::Account => 1,
            Self::Case => 2,
        }
    }

    /// Stable prompt selector number.
    #[must_use]
    pub const fn selector(self) -> u8 {
        match self {
            Self::Account => 1,
            Self::Case => 2,
            Self::Organization => 3,
        }
    }

    #[must_use]
    pub const fn from_selector(selector: u8) -> Option<Self> {
        match selector {
            1 => Some(Self::Account),
            2 => Some(Self::Case),
            3 => Some(Self::Organization),
            _ => None,
        }
    }
}

impl fmt::Display for EntityTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.model().entity_name)
    }
}

impl FromStr for EntityTag {
    type Err = QueryError;

    /// Parse a selector number or a variant name (either vocabulary).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if let Ok(n) = trimmed.parse::<u8>() {
            return Self::from_selector(n).ok_or_else(|| QueryError::UnknownEntity {
                selector: trimmed.to_string(),
            });
        }

        match trimmed.to_ascii_lowercase().as_str() {
            "account" | "user" => Ok(Self::Account),
            "case" | "ticket" => Ok(Self::Case),
            "organization" | "org" => Ok(Self::Organization),
            _ => Err(QueryError::UnknownEntity {
                selector: trimmed.to_string(),
            }),
        }
    }
}

///
/// SummaryPart
/// One `label: field` segment of an entity's external representation.
///

#[derive(Clone, Copy, Debug)]
pub struct SummaryPart {
    pub label: &'static str,
    pub field: &'static str,
}

impl SummaryPart {
    #[must_use]
    pub const fn new(label: &'static str, field: &'static str) -> Self {
        Self { label, field }
    }
}

///
/// ReverseRelationModel
///
/// One additional-data section: the records of `source` whose `field`
/// points at the searched record, labelled `<prefix>_<n><suffix>`.
///

#[derive(Clone, Copy, Debug)]
pub struct ReverseRelationModel {
    pub source: EntityTag,
    pub field: &'static str,
    pub label_prefix: &'static str,
    pub label_suffix: &'static str,
}

impl ReverseRelationModel {
    #[must_use]
    pub const fn new(
        source: EntityTag,
        field: &'static str,
        label_prefix: &'static str,
        label_suffix: &'static str,
    ) -> Self {
        Self {
            source,
            field,
            label_prefix,
            label_suffix,
        }
    }

    /// Row label for the `ordinal`-th (1-based) dependent.
    #[must_use]
    pub fn label(&self, ordinal: usize) -> String {
        format!("{}_{ordinal}{}", self.label_prefix, self.label_suffix)
    }
}

///
/// EntityModel
/// Static runtime model for one entity variant.
///

#[derive(Debug)]
pub struct EntityModel {
    pub tag: EntityTag,
    /// Name used in errors and diagnostics.
    pub entity_name: &'static str,
    /// Name shown at the prompt.
    pub display_name: &'static str,
    /// Unique identifier field (must appear in `fields`).
    pub primary_key: &'static str,
    /// Ordered field list; this order is the output order.
    pub fields: &'static [EntityFieldModel],
    /// External representation used when shown as a joined reference.
    pub summary: &'static [SummaryPart],
    /// Additional-data sections appended to search results, in order.
    pub reverse: &'static [ReverseRelationModel],
}

impl EntityModel {
    /// Look up a declared field.
    #[must_use]
    pub fn field(&self, name: &str) -> Option<&'static EntityFieldModel> {
        self.fields.iter().find(|field| field.name == name)
    }

    /// Position of a declared field in `fields`.
    #[must_use]
    pub fn field_slot(&self, name: &str) -> Option<usize> {
        self.fields.iter().position(|field| field.name == name)
    }

    /// Foreign-key fields and their target variants, in declaration order.
    pub fn relations(&self) -> impl Iterator<Item = (&'static str, EntityTag)> + use<> {
        let fields: &'static [EntityFieldModel] = self.fields;
        fields
            .iter()
            .filter_map(|field| field.relation_target().map(|target| (field.name, target)))
    }

    /// Target variant when `name` is a foreign-key field.
    #[must_use]
    pub fn relation_target(&self, name: &str) -> Option<EntityTag> {
        self.field(name).and_then(EntityFieldModel::relation_target)
    }

    /// Field names accepted by search, in output order.
    pub fn searchable_fields(&self) -> impl Iterator<Item = &'static str> + use<> {
        let fields: &'static [EntityFieldModel] = self.fields;
        fields.iter().map(|field| field.name)
    }

    /// Printable listing block: header, one field per line, delimiter.
    #[must_use]
    pub fn searchable_fields_listing(&self) -> String {
        let mut lines = Vec::with_capacity(self.fields.len() + 3);
        lines.push(format!("Search {} with", self.display_name));
        lines.extend(self.searchable_fields().map(str::to_string));
        lines.push(String::new());
        lines.push(FIELD_LISTING_DELIMITER.to_string());

        lines.join("\n")
    }
}
