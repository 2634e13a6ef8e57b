//! Core runtime for DeskDB: the value model and matcher, static entity
//! models, the in-memory record stores with their reverse relation indexes,
//! and the search orchestrator that joins everything into printable rows.
#![warn(unreachable_pub)]

// public exports are one module level down
pub mod db;
pub mod error;
pub mod model;
pub mod obs;
pub mod value;

// test
#[cfg(test)]
pub(crate) mod test_fixtures;

///
/// CONSTANTS
///

/// Default unique-identifier field name shared by every entity model.
pub const DEFAULT_PRIMARY_KEY: &str = "_id";

///
/// Prelude
///
/// Prelude contains only domain vocabulary.
/// No errors, sources, or helpers are re-exported here.
///

pub mod prelude {
    pub use crate::{
        db::{Db, Record, RecordKey, Snapshot},
        model::{EntityModel, EntityTag},
        value::Value,
    };
}
