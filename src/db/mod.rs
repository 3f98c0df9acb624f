//! Database and collection handles scoped to a fixed configuration.

pub mod collection;
pub mod cursor;
pub mod database;
pub mod options;

use crate::error::{Error, Result};
use std::fmt;

/// A fully-qualified collection scope: a database name and a collection
/// name, rendered as `database.collection`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Namespace {
    /// The database part.
    pub database: String,

    /// The collection part.
    pub collection: String,
}

impl Namespace {
    /// Creates a namespace from its two parts.
    pub fn new(database: &str, collection: &str) -> Result<Self> {
        if database.is_empty() || database.contains('\0') {
            return Err(Error::invalid_argument(
                "database name must be a non-empty string without null bytes",
            ));
        }
        if collection.is_empty() || collection.contains('\0') {
            return Err(Error::invalid_argument(
                "collection name must be a non-empty string without null bytes",
            ));
        }
        Ok(Namespace {
            database: database.to_string(),
            collection: collection.to_string(),
        })
    }

    /// The full `database.collection` form.
    pub fn full_name(&self) -> String {
        format!("{}.{}", self.database, self.collection)
    }
}

impl fmt::Display for Namespace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.database, self.collection)
    }
}
