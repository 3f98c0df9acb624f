use crate::codec::CodecRegistry;
use crate::db::collection::Collection;
use crate::db::cursor::{CollectionNames, ListCollections};
use crate::db::options::{build_create_collection_operation, CreateCollectionOptions};
use crate::db::Namespace;
use crate::error::{Error, Result};
use crate::operation::{
    CommandReadOperation, DropDatabaseOperation, ListCollectionsOperation, OperationExecutor,
    OperationReply, ReadOperation, WriteOperation,
};
use crate::settings::{Collation, ReadConcern, ReadPreference, WriteConcern};
use bson::Document;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fmt;
use std::sync::Arc;
use tracing::debug;
use uuid::Uuid;

/// A handle to one logical database, scoped to a fixed configuration.
///
/// A handle is immutable: the `with_*` methods derive a reconfigured
/// copy and leave the original untouched, so handles (and anything
/// derived from them) can be shared freely across tasks. The codec
/// registry and the executor are shared by reference across all derived
/// copies; the scalar settings are copied per handle.
///
/// Handles are obtained from a client and perform no I/O until one of
/// the command methods is invoked; those submit a single operation to
/// the execution engine and resolve exactly once.
#[derive(Clone)]
pub struct Database {
    name: String,
    codec_registry: Arc<CodecRegistry>,
    read_preference: ReadPreference,
    write_concern: WriteConcern,
    read_concern: ReadConcern,
    collation: Option<Collation>,
    executor: Arc<dyn OperationExecutor>,
}

impl Database {
    /// Creates a handle scoped to the given database name and settings.
    ///
    /// Fails with an invalid-argument error if the name is empty or
    /// contains a null byte. The collation is the only optional setting.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        name: &str,
        codec_registry: Arc<CodecRegistry>,
        read_preference: ReadPreference,
        write_concern: WriteConcern,
        read_concern: ReadConcern,
        collation: Option<Collation>,
        executor: Arc<dyn OperationExecutor>,
    ) -> Result<Self> {
        if name.is_empty() || name.contains('\0') {
            return Err(Error::invalid_argument(
                "database name must be a non-empty string without null bytes",
            ));
        }
        Ok(Database {
            name: name.to_string(),
            codec_registry,
            read_preference,
            write_concern,
            read_concern,
            collation,
            executor,
        })
    }

    /// The database name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The codec registry this handle encodes and decodes with.
    pub fn codec_registry(&self) -> &Arc<CodecRegistry> {
        &self.codec_registry
    }

    /// The read preference this handle routes reads by.
    pub fn read_preference(&self) -> &ReadPreference {
        &self.read_preference
    }

    /// The write concern this handle's writes are acknowledged under.
    pub fn write_concern(&self) -> &WriteConcern {
        &self.write_concern
    }

    /// The read concern this handle reads under.
    pub fn read_concern(&self) -> &ReadConcern {
        &self.read_concern
    }

    /// The collation this handle applies, if one was set.
    pub fn collation(&self) -> Option<&Collation> {
        self.collation.as_ref()
    }

    pub(crate) fn executor(&self) -> &Arc<dyn OperationExecutor> {
        &self.executor
    }

    /// Derives a copy of this handle using the given codec registry.
    pub fn with_codec_registry(&self, codec_registry: Arc<CodecRegistry>) -> Database {
        Database {
            codec_registry,
            ..self.clone()
        }
    }

    /// Derives a copy of this handle using the given read preference.
    pub fn with_read_preference(&self, read_preference: ReadPreference) -> Database {
        Database {
            read_preference,
            ..self.clone()
        }
    }

    /// Derives a copy of this handle using the given write concern.
    pub fn with_write_concern(&self, write_concern: WriteConcern) -> Database {
        Database {
            write_concern,
            ..self.clone()
        }
    }

    /// Derives a copy of this handle using the given read concern.
    pub fn with_read_concern(&self, read_concern: ReadConcern) -> Database {
        Database {
            read_concern,
            ..self.clone()
        }
    }

    /// Derives a copy of this handle using the given collation.
    pub fn with_collation(&self, collation: impl Into<Option<Collation>>) -> Database {
        Database {
            collation: collation.into(),
            ..self.clone()
        }
    }

    /// Returns a handle to the named collection, scoped to this
    /// handle's settings. Performs no I/O.
    pub fn collection(&self, collection_name: &str) -> Result<Collection> {
        self.collection_with_type::<Document>(collection_name)
    }

    /// Returns a typed handle to the named collection, scoped to this
    /// handle's settings. Performs no I/O.
    pub fn collection_with_type<T>(&self, collection_name: &str) -> Result<Collection<T>> {
        let namespace = Namespace::new(&self.name, collection_name)?;
        Ok(Collection::new(
            namespace,
            self.codec_registry.clone(),
            self.read_preference,
            self.write_concern.clone(),
            self.read_concern,
            self.collation.clone(),
            self.executor.clone(),
        ))
    }

    /// Runs a command against this database and returns the reply
    /// document.
    ///
    /// The command value is normalized through this handle's codec
    /// registry. When no read preference is given the command runs
    /// against the primary.
    pub async fn run_command<C: Serialize>(
        &self,
        command: C,
        read_preference: impl Into<Option<ReadPreference>>,
    ) -> Result<Document> {
        self.run_command_as(command, read_preference).await
    }

    /// Runs a command against this database and decodes the reply into
    /// the caller's result type.
    pub async fn run_command_as<C, T>(
        &self,
        command: C,
        read_preference: impl Into<Option<ReadPreference>>,
    ) -> Result<T>
    where
        C: Serialize,
        T: DeserializeOwned,
    {
        let command = self.codec_registry.encode(&command)?;
        if command.is_empty() {
            return Err(Error::invalid_argument("command document must not be empty"));
        }
        let read_preference = read_preference.into().unwrap_or_default();

        let request_id = Uuid::new_v4();
        debug!(
            %request_id,
            database = %self.name,
            ?read_preference,
            "running command"
        );
        let operation = CommandReadOperation::new(&self.name, command);
        let reply = self
            .executor
            .execute_read(ReadOperation::Command(operation), read_preference)
            .await?;
        match reply {
            OperationReply::Document(doc) => self.codec_registry.decode(doc),
            OperationReply::Batch(_) => Err(Error::operation_failure(
                "engine answered a command with a result batch",
            )),
        }
    }

    /// Drops this database, acknowledged under this handle's write
    /// concern.
    pub async fn drop(&self) -> Result<()> {
        let request_id = Uuid::new_v4();
        debug!(%request_id, database = %self.name, "dropping database");
        let operation = DropDatabaseOperation::new(&self.name, self.write_concern.clone());
        self.executor
            .execute_write(WriteOperation::DropDatabase(operation))
            .await
    }

    /// Creates a collection in this database.
    ///
    /// Omitted options fall back to their defaults. The creation is
    /// acknowledged under this handle's write concern and inherits this
    /// handle's collation.
    pub async fn create_collection(
        &self,
        collection_name: &str,
        options: impl Into<Option<CreateCollectionOptions>>,
    ) -> Result<()> {
        if collection_name.is_empty() || collection_name.contains('\0') {
            return Err(Error::invalid_argument(
                "collection name must be a non-empty string without null bytes",
            ));
        }
        let options = options.into().unwrap_or_default();
        let operation = build_create_collection_operation(
            &self.name,
            collection_name,
            &options,
            &self.write_concern,
            self.collation.as_ref(),
        );

        let request_id = Uuid::new_v4();
        debug!(
            %request_id,
            database = %self.name,
            collection = collection_name,
            "creating collection"
        );
        self.executor
            .execute_write(WriteOperation::CreateCollection(operation))
            .await
    }

    /// Returns a lazy stream of this database's collection
    /// descriptions, decoded with this handle's codec registry.
    ///
    /// List queries always run against the primary, whatever read
    /// preference this handle is configured with.
    pub fn list_collections(&self) -> ListCollections<Document> {
        self.list_collections_as::<Document>()
    }

    /// Returns a lazy, typed stream of this database's collection
    /// descriptions.
    pub fn list_collections_as<T: DeserializeOwned>(&self) -> ListCollections<T> {
        ListCollections::new(
            self.executor.clone(),
            ListCollectionsOperation::new(&self.name),
            ReadPreference::Primary,
            self.codec_registry.clone(),
        )
    }

    /// Returns a lazy stream of this database's collection names.
    ///
    /// The underlying list query runs against the primary with the
    /// stock codec registry; only the `name` field of each description
    /// is kept.
    pub fn list_collection_names(&self) -> CollectionNames {
        CollectionNames::new(ListCollections::new(
            self.executor.clone(),
            ListCollectionsOperation::new(&self.name),
            ReadPreference::Primary,
            Arc::new(CodecRegistry::default()),
        ))
    }
}

impl fmt::Debug for Database {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Database")
            .field("name", &self.name)
            .field("read_preference", &self.read_preference)
            .field("write_concern", &self.write_concern)
            .field("read_concern", &self.read_concern)
            .field("collation", &self.collation)
            .finish()
    }
}
