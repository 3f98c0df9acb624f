//! Operation descriptors and the execution-engine boundary.
//!
//! The driver core never performs I/O itself. Every command is packaged
//! into a descriptor and handed to an [OperationExecutor], which performs
//! the work asynchronously and resolves each submission exactly once,
//! with either a reply or a failure.

use crate::db::options::{ValidationAction, ValidationLevel};
use crate::error::Result;
use crate::settings::{Collation, ReadPreference, WriteConcern};
use async_trait::async_trait;
use bson::Document;

/// A server command run against one database, read-style.
#[derive(Debug, Clone, PartialEq)]
pub struct CommandReadOperation {
    /// The database the command runs against.
    pub database_name: String,

    /// The command document, already normalized.
    pub command: Document,
}

impl CommandReadOperation {
    /// Creates a command read operation.
    pub fn new(database_name: &str, command: Document) -> Self {
        CommandReadOperation {
            database_name: database_name.to_string(),
            command,
        }
    }
}

/// Drops one database and everything in it.
#[derive(Debug, Clone, PartialEq)]
pub struct DropDatabaseOperation {
    /// The database to drop.
    pub database_name: String,

    /// The write concern the drop is acknowledged under.
    pub write_concern: WriteConcern,
}

impl DropDatabaseOperation {
    /// Creates a drop-database operation.
    pub fn new(database_name: &str, write_concern: WriteConcern) -> Self {
        DropDatabaseOperation {
            database_name: database_name.to_string(),
            write_concern,
        }
    }
}

/// Lists the collections of one database, one page of descriptions.
#[derive(Debug, Clone, PartialEq)]
pub struct ListCollectionsOperation {
    /// The database whose collections are listed.
    pub database_name: String,
}

impl ListCollectionsOperation {
    /// Creates a list-collections operation.
    pub fn new(database_name: &str) -> Self {
        ListCollectionsOperation {
            database_name: database_name.to_string(),
        }
    }
}

/// Creates one collection with an explicit set of creation parameters.
///
/// The optional fields distinguish "not specified" from "specified as
/// empty": a `None` never reaches the wire.
#[derive(Debug, Clone, PartialEq)]
pub struct CreateCollectionOperation {
    /// The database the collection is created in.
    pub database_name: String,

    /// The name of the new collection.
    pub collection_name: String,

    /// The write concern the creation is acknowledged under.
    pub write_concern: WriteConcern,

    /// Whether the collection is capped at a fixed size.
    pub capped: bool,

    /// The maximum size in bytes of a capped collection.
    pub size_in_bytes: Option<i64>,

    /// Whether an index on `_id` is created automatically.
    pub auto_index: bool,

    /// The maximum number of documents in a capped collection.
    pub max_documents: Option<i64>,

    /// Whether record allocations are rounded up to powers of two.
    pub use_power_of_2_sizes: bool,

    /// Storage-engine specific creation options.
    pub storage_engine_options: Option<Document>,

    /// Default storage-engine options applied to the collection's indexes.
    pub index_option_defaults: Option<Document>,

    /// The document-validation filter applied to writes.
    pub validator: Option<Document>,

    /// How strictly the validator is applied.
    pub validation_level: Option<ValidationLevel>,

    /// What happens to writes that fail validation.
    pub validation_action: Option<ValidationAction>,

    /// The default collation for the collection.
    pub collation: Option<Collation>,
}

/// The read-style operations an engine accepts.
#[derive(Debug, Clone, PartialEq)]
pub enum ReadOperation {
    /// A single-document server command.
    Command(CommandReadOperation),

    /// A one-page collection listing.
    ListCollections(ListCollectionsOperation),
}

/// The write-style operations an engine accepts.
#[derive(Debug, Clone, PartialEq)]
pub enum WriteOperation {
    /// Drop a database.
    DropDatabase(DropDatabaseOperation),

    /// Create a collection.
    CreateCollection(CreateCollectionOperation),
}

/// A successful reply from the engine.
#[derive(Debug, Clone, PartialEq)]
pub enum OperationReply {
    /// A single reply document.
    Document(Document),

    /// One page of result documents.
    Batch(Vec<Document>),
}

/// The asynchronous execution engine behind a database handle.
///
/// An engine owns connection management, server selection, and any
/// timeout or retry policy. The contract this crate relies on is narrow:
/// each submitted operation resolves exactly once, with either a reply
/// or a failure, and independently-submitted operations are unordered.
#[async_trait]
pub trait OperationExecutor: Send + Sync {
    /// Submits a read operation routed by the given read preference.
    async fn execute_read(
        &self,
        operation: ReadOperation,
        read_preference: ReadPreference,
    ) -> Result<OperationReply>;

    /// Submits a write operation.
    async fn execute_write(&self, operation: WriteOperation) -> Result<()>;
}


#[cfg(test)]
mod test {
    use super::testing::StubExecutor;
    use super::*;
    use anyhow::Result;
    use bson::doc;

    #[tokio::test]
    async fn stub_records_read_submissions() -> Result<()> {
        let executor = StubExecutor::new();
        let operation = CommandReadOperation::new("stockyard", doc! { "ping": 1 });

        let reply = executor
            .execute_read(
                ReadOperation::Command(operation.clone()),
                ReadPreference::Nearest,
            )
            .await?;

        assert_eq!(reply, OperationReply::Document(doc! { "ok": 1 }));
        let calls = executor.read_calls.lock().unwrap();
        assert_eq!(calls.len(), 1, "Expected exactly one recorded read");
        assert_eq!(calls[0].0, ReadOperation::Command(operation));
        assert_eq!(calls[0].1, ReadPreference::Nearest);
        Ok(())
    }

    #[tokio::test]
    async fn stub_surfaces_queued_failures() {
        let executor = StubExecutor::new();
        executor.push_failure("socket closed");

        let result = executor
            .execute_write(WriteOperation::DropDatabase(DropDatabaseOperation::new(
                "stockyard",
                WriteConcern::default(),
            )))
            .await;

        assert!(result.is_err(), "Expected the queued failure to surface");
        assert_eq!(
            executor.write_call_count(),
            1,
            "Expected the submission to be recorded even when it fails",
        );
    }
}
