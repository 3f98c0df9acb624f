//! Lazy streams over list-collections results.

use crate::codec::CodecRegistry;
use crate::error::{Error, Result};
use crate::operation::{
    ListCollectionsOperation, OperationExecutor, OperationReply, ReadOperation,
};
use crate::settings::ReadPreference;
use bson::Document;
use serde::de::DeserializeOwned;
use std::collections::VecDeque;
use std::marker::PhantomData;
use std::sync::Arc;

enum StreamState {
    /// Nothing has been issued yet.
    Unstarted,

    /// The page was fetched; items drain from the buffer.
    Draining(VecDeque<Document>),

    /// The page is spent (or the query failed); only `None` from here.
    Exhausted,
}

/// A lazy stream of collection descriptions.
///
/// Construction performs no I/O. The underlying query is issued on the
/// first call to [ListCollections::next]; the stream then yields one
/// page of results and terminates. It cannot be restarted -- ask the
/// database handle for a fresh stream instead.
pub struct ListCollections<T = Document> {
    executor: Arc<dyn OperationExecutor>,
    operation: ListCollectionsOperation,
    read_preference: ReadPreference,
    codec_registry: Arc<CodecRegistry>,
    state: StreamState,
    result_type: PhantomData<fn() -> T>,
}

impl<T: DeserializeOwned> ListCollections<T> {
    pub(crate) fn new(
        executor: Arc<dyn OperationExecutor>,
        operation: ListCollectionsOperation,
        read_preference: ReadPreference,
        codec_registry: Arc<CodecRegistry>,
    ) -> Self {
        ListCollections {
            executor,
            operation,
            read_preference,
            codec_registry,
            state: StreamState::Unstarted,
            result_type: PhantomData,
        }
    }

    /// Yields the next collection description, or `None` once the page
    /// is exhausted.
    pub async fn next(&mut self) -> Result<Option<T>> {
        loop {
            match &mut self.state {
                StreamState::Unstarted => {
                    // First poll: issue the query...
                    // TODO - drain follow-up pages once the engine grows a
                    // continuation token for list results.
                    let reply = self
                        .executor
                        .execute_read(
                            ReadOperation::ListCollections(self.operation.clone()),
                            self.read_preference,
                        )
                        .await;
                    match reply {
                        Ok(OperationReply::Batch(docs)) => {
                            self.state = StreamState::Draining(docs.into());
                        }
                        Ok(OperationReply::Document(_)) => {
                            self.state = StreamState::Exhausted;
                            return Err(Error::operation_failure(
                                "engine answered a list query with a single document",
                            ));
                        }
                        Err(err) => {
                            self.state = StreamState::Exhausted;
                            return Err(err);
                        }
                    }
                }
                StreamState::Draining(buffer) => match buffer.pop_front() {
                    Some(doc) => return Ok(Some(self.codec_registry.decode(doc)?)),
                    None => {
                        self.state = StreamState::Exhausted;
                        return Ok(None);
                    }
                },
                StreamState::Exhausted => return Ok(None),
            }
        }
    }

    /// Drains the stream into a vector.
    pub async fn try_collect(mut self) -> Result<Vec<T>> {
        let mut items = vec![];
        while let Some(item) = self.next().await? {
            items.push(item);
        }
        Ok(items)
    }
}

/// A lazy stream of collection names, projected out of a
/// [ListCollections] stream.
pub struct CollectionNames {
    inner: ListCollections<Document>,
}

impl CollectionNames {
    pub(crate) fn new(inner: ListCollections<Document>) -> Self {
        CollectionNames { inner }
    }

    /// Yields the next collection name, or `None` once the page is
    /// exhausted.
    pub async fn next(&mut self) -> Result<Option<String>> {
        match self.inner.next().await? {
            Some(doc) => match doc.get_str("name") {
                Ok(name) => Ok(Some(name.to_string())),
                Err(_) => Err(Error::operation_failure(
                    "collection description is missing a name field",
                )),
            },
            None => Ok(None),
        }
    }

    /// Drains the stream into a vector of names.
    pub async fn try_collect(mut self) -> Result<Vec<String>> {
        let mut names = vec![];
        while let Some(name) = self.next().await? {
            names.push(name);
        }
        Ok(names)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::operation::testing::StubExecutor;
    use anyhow::Result;
    use bson::doc;

    fn stream_over(executor: Arc<StubExecutor>) -> ListCollections<Document> {
        ListCollections::new(
            executor,
            ListCollectionsOperation::new("stockyard"),
            ReadPreference::Primary,
            Arc::new(CodecRegistry::default()),
        )
    }

    #[tokio::test]
    async fn construction_issues_no_query() {
        let executor = Arc::new(StubExecutor::new());
        let _stream = stream_over(executor.clone());
        assert_eq!(
            executor.read_call_count(),
            0,
            "Expected no query before the first poll",
        );
    }

    #[tokio::test]
    async fn one_page_then_terminated() -> Result<()> {
        let executor = Arc::new(StubExecutor::new());
        executor.push_reply(OperationReply::Batch(vec![
            doc! { "name": "cattle" },
            doc! { "name": "hogs" },
        ]));

        let mut stream = stream_over(executor.clone());
        assert_eq!(
            stream.next().await?,
            Some(doc! { "name": "cattle" }),
            "Expected the first description",
        );
        assert_eq!(stream.next().await?, Some(doc! { "name": "hogs" }));
        assert_eq!(stream.next().await?, None, "Expected the page to end");
        assert_eq!(stream.next().await?, None, "Expected the end to be sticky");

        // The single page came from a single query...
        assert_eq!(executor.read_call_count(), 1);
        Ok(())
    }

    #[tokio::test]
    async fn failures_exhaust_the_stream() {
        let executor = Arc::new(StubExecutor::new());
        executor.push_failure("no reachable server");

        let mut stream = stream_over(executor.clone());
        assert!(stream.next().await.is_err(), "Expected the failure through");
        assert_eq!(
            stream.next().await.unwrap(),
            None,
            "Expected no retry after a failure",
        );
        assert_eq!(executor.read_call_count(), 1, "Expected exactly one query");
    }

    #[tokio::test]
    async fn names_project_from_descriptions() -> Result<()> {
        let executor = Arc::new(StubExecutor::new());
        executor.push_reply(OperationReply::Batch(vec![
            doc! { "name": "cattle", "type": "collection" },
            doc! { "name": "hogs", "type": "collection" },
        ]));

        let names = CollectionNames::new(stream_over(executor)).try_collect().await?;
        assert_eq!(names, vec!["cattle".to_string(), "hogs".to_string()]);
        Ok(())
    }

    #[tokio::test]
    async fn nameless_description_is_a_failure() {
        let executor = Arc::new(StubExecutor::new());
        executor.push_reply(OperationReply::Batch(vec![doc! { "type": "view" }]));

        let mut names = CollectionNames::new(stream_over(executor));
        assert!(
            names.next().await.is_err(),
            "Expected a malformed description to surface as a failure",
        );
    }
}
