use crate::model::EntityTag;

///
/// EntityFieldModel
/// Runtime field metadata used by construction, search and rendering.
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct EntityFieldModel {
    /// Field name as used in queries and source records.
    pub name: &'static str,
    /// Declared semantic type.
    pub kind: EntityFieldKind,
}

impl EntityFieldModel {
    #[must_use]
    pub const fn new(name: &'static str, kind: EntityFieldKind) -> Self {
        Self { name, kind }
    }

    /// Target entity when this field is a foreign key.
    #[must_use]
    pub const fn relation_target(&self) -> Option<EntityTag> {
        if let EntityFieldKind::Relation(target) = self.kind {
            Some(target)
        } else {
            None
        }
    }
}

///
/// EntityFieldKind
///
/// Declared semantic type of a field. Stored values are not coerced to the
/// declared kind (source data is taken as decoded); the kind drives set
/// normalization, relation discovery and the searchable-field listing.
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum EntityFieldKind {
    Bool,
    Float,
    Int,
    Text,
    /// Timestamp carried as its source text.
    Timestamp,
    TextList,
    /// Text members with set semantics; repeated members are dropped at load.
    TextSet,
    /// Foreign key holding the unique identifier of another entity.
    Relation(EntityTag),
}

impl EntityFieldKind {
    /// Short type label for field listings.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Bool => "boolean",
            Self::Float => "float",
            Self::Int => "integer",
            Self::Text => "text",
            Self::Timestamp => "timestamp",
            Self::TextList => "list of text",
            Self::TextSet => "set of text",
            Self::Relation(_) => "reference",
        }
    }
}
