use crate::codec::CodecRegistry;
use crate::db::Namespace;
use crate::operation::OperationExecutor;
use crate::settings::{Collation, ReadConcern, ReadPreference, WriteConcern};
use bson::Document;
use std::fmt;
use std::marker::PhantomData;
use std::sync::Arc;

/// A handle to one collection, scoped to the configuration of the
/// database handle it was obtained from.
///
/// Obtaining a collection handle performs no I/O; it only captures the
/// namespace and the settings operations on it will run under. The
/// handle is immutable after construction and cheap to clone -- the
/// registry and the executor are shared, not copied.
pub struct Collection<T = Document> {
    namespace: Namespace,
    codec_registry: Arc<CodecRegistry>,
    read_preference: ReadPreference,
    write_concern: WriteConcern,
    read_concern: ReadConcern,
    collation: Option<Collation>,
    executor: Arc<dyn OperationExecutor>,
    document_type: PhantomData<fn() -> T>,
}

impl<T> Collection<T> {
    #[allow(clippy::too_many_arguments)]
    pub(crate) fn new(
        namespace: Namespace,
        codec_registry: Arc<CodecRegistry>,
        read_preference: ReadPreference,
        write_concern: WriteConcern,
        read_concern: ReadConcern,
        collation: Option<Collation>,
        executor: Arc<dyn OperationExecutor>,
    ) -> Self {
        Collection {
            namespace,
            codec_registry,
            read_preference,
            write_concern,
            read_concern,
            collation,
            executor,
            document_type: PhantomData,
        }
    }

    /// The collection's own name, without the database part.
    pub fn name(&self) -> &str {
        &self.namespace.collection
    }

    /// The full namespace this handle is scoped to.
    pub fn namespace(&self) -> &Namespace {
        &self.namespace
    }

    /// The codec registry inherited from the database handle.
    pub fn codec_registry(&self) -> &Arc<CodecRegistry> {
        &self.codec_registry
    }

    /// The read preference inherited from the database handle.
    pub fn read_preference(&self) -> &ReadPreference {
        &self.read_preference
    }

    /// The write concern inherited from the database handle.
    pub fn write_concern(&self) -> &WriteConcern {
        &self.write_concern
    }

    /// The read concern inherited from the database handle.
    pub fn read_concern(&self) -> &ReadConcern {
        &self.read_concern
    }

    /// The collation inherited from the database handle, if one was set.
    pub fn collation(&self) -> Option<&Collation> {
        self.collation.as_ref()
    }

    pub(crate) fn executor(&self) -> &Arc<dyn OperationExecutor> {
        &self.executor
    }
}

impl<T> Clone for Collection<T> {
    fn clone(&self) -> Self {
        Collection {
            namespace: self.namespace.clone(),
            codec_registry: self.codec_registry.clone(),
            read_preference: self.read_preference,
            write_concern: self.write_concern.clone(),
            read_concern: self.read_concern,
            collation: self.collation.clone(),
            executor: self.executor.clone(),
            document_type: PhantomData,
        }
    }
}

impl<T> fmt::Debug for Collection<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Collection")
            .field("namespace", &self.namespace)
            .field("read_preference", &self.read_preference)
            .field("write_concern", &self.write_concern)
            .field("read_concern", &self.read_concern)
            .field("collation", &self.collation)
            .finish()
    }
}
