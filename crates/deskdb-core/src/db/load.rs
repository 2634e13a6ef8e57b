use crate::{
    db::{DataStore, RecordSource, RelationIndexes, Snapshot},
    error::{ErrorClass, ErrorOrigin},
    model::EntityTag,
    obs::sink::{self, MetricsEvent},
};
use std::{io, path::PathBuf};
use thiserror::Error as ThisError;
use tracing::{debug, info};

///
/// LoadError
///
/// Fatal load-time failure. Integrity variants mean the data set itself is
/// unusable; source variants mean it could not be read.
///

#[derive(Debug, ThisError)]
pub enum LoadError {
    #[error("duplicate {entity} identifier: {id}")]
    DuplicateIdentifier { entity: &'static str, id: String },

    #[error("{entity} record {position} has a missing or unusable identifier")]
    InvalidIdentifier {
        entity: &'static str,
        position: usize,
    },

    #[error("no source files matching '{pattern}' in {}", dir.display())]
    NoSourceFiles { pattern: String, dir: PathBuf },

    #[error("invalid source pattern '{pattern}': {source}")]
    Pattern {
        pattern: String,
        source: globset::Error,
    },

    #[error("failed to read {}: {source}", path.display())]
    Io { path: PathBuf, source: io::Error },

    #[error("failed to decode {}: {source}", path.display())]
    Decode {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("unexpected shape in {}: {detail}", path.display())]
    UnexpectedShape { path: PathBuf, detail: String },
}

impl LoadError {
    #[must_use]
    pub const fn class(&self) -> ErrorClass {
        match self {
            Self::DuplicateIdentifier { .. } | Self::InvalidIdentifier { .. } => {
                ErrorClass::Integrity
            }
            Self::NoSourceFiles { .. }
            | Self::Pattern { .. }
            | Self::Io { .. }
            | Self::Decode { .. }
            | Self::UnexpectedShape { .. } => ErrorClass::Io,
        }
    }

    #[must_use]
    pub const fn origin(&self) -> ErrorOrigin {
        match self.class() {
            ErrorClass::Integrity => ErrorOrigin::Load,
            _ => ErrorOrigin::Source,
        }
    }
}

impl Snapshot {
    /// Build a complete snapshot: every store in load order, then every
    /// reverse index. Nothing is published unless all of it succeeds.
    pub fn load<S>(source: &S, generation: u64) -> Result<Self, LoadError>
    where
        S: RecordSource + ?Sized,
    {
        let organizations = load_store(source, EntityTag::Organization)?;
        let accounts = load_store(source, EntityTag::Account)?;
        let cases = load_store(source, EntityTag::Case)?;

        let stores = [organizations, accounts, cases];
        debug_assert!(
            EntityTag::ALL
                .iter()
                .zip(&stores)
                .all(|(tag, store)| store.tag() == *tag)
        );

        let relations = RelationIndexes::build(&stores);
        for (id, index) in relations.iter() {
            debug!(source = %id.source, field = id.field, parents = index.len(), "built reverse index");
        }

        info!(
            generation,
            organizations = stores[0].len(),
            accounts = stores[1].len(),
            cases = stores[2].len(),
            "snapshot loaded"
        );

        Ok(Self::from_parts(stores, relations, generation))
    }
}

// Decode and insert one variant's records.
fn load_store<S>(source: &S, tag: EntityTag) -> Result<DataStore, LoadError>
where
    S: RecordSource + ?Sized,
{
    let raw = source.records(tag)?;
    let store = DataStore::load(tag, raw)?;

    sink::record(MetricsEvent::LoadFinish {
        entity: tag.model().entity_name,
        rows: store.len() as u64,
    });
    debug!(entity = %tag, rows = store.len(), "store loaded");

    Ok(store)
}
