pub mod codec;
pub mod db;
pub mod error;
pub mod operation;
pub mod settings;
pub mod types;

pub use crate::codec::CodecRegistry;
pub use crate::db::collection::Collection;
pub use crate::db::database::Database;
pub use crate::db::options::CreateCollectionOptions;
pub use crate::db::Namespace;
pub use crate::error::{Error, Result};
pub use crate::settings::{Collation, ReadConcern, ReadPreference, WriteConcern};
pub use crate::types::{Code, CodeWithScope};

#[cfg(test)]
mod tests {}
