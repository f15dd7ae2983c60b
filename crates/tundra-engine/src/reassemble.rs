//! Recursive reassembly of pointer trees.
//!
//! A fetched record whose `v` decodes as a pointer envelope is expanded by
//! fetching its children in bounded parallel, resolving each child one
//! level at a time, and concatenating the resolved values in slot order.
//! The record's `original` field keeps the pre-reassembly root `v`.

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use bytes::BytesMut;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use tracing::debug;
use tundra_types::{Address, Envelope, Record};

use crate::error::EngineError;
use crate::store::TundraStore;

impl TundraStore {
    /// Resolve a fetched record into its fully reassembled form.
    ///
    /// Leaves are returned unchanged. The concatenated result is examined
    /// again, so resolution terminates exactly when the value no longer
    /// carries the pointer discriminator. A payload that happens to decode
    /// as a pointer envelope is indistinguishable from real indirection;
    /// the tag is the only signal.
    pub(crate) async fn resolve(&self, record: Record) -> Result<Record, EngineError> {
        self.resolve_at(record, 0).await
    }

    fn resolve_at(
        &self,
        mut record: Record,
        mut depth: usize,
    ) -> Pin<Box<dyn Future<Output = Result<Record, EngineError>> + Send + '_>> {
        Box::pin(async move {
            loop {
                let Some(Envelope::Pointers { p }) = Envelope::decode(&record.v) else {
                    return Ok(record);
                };
                if depth >= self.max_indirections {
                    return Err(EngineError::DepthExceeded {
                        max_indirections: self.max_indirections,
                    });
                }
                depth += 1;
                debug!(children = p.len(), depth, "resolving pointer buffer");

                let children = self.fetch_level(p).await?;
                let mut assembled = BytesMut::new();
                for child in children {
                    let resolved = self.resolve_at(child, depth).await?;
                    assembled.extend_from_slice(&resolved.v);
                }

                record.original = Some(std::mem::replace(&mut record.v, assembled.freeze()));
            }
        })
    }

    /// Fetch one level's children in parallel, bounded by
    /// `concurrent_requests`, preserving slot order.
    ///
    /// A pointer tree must be complete: a missing child would silently
    /// corrupt the reassembled payload, so it is a hard error.
    async fn fetch_level(&self, addresses: Vec<Address>) -> Result<Vec<Record>, EngineError> {
        let count = addresses.len();
        let semaphore = Arc::new(Semaphore::new(self.concurrent_requests));
        let mut tasks = JoinSet::new();

        for (slot, address) in addresses.into_iter().enumerate() {
            let semaphore = Arc::clone(&semaphore);
            let transport = Arc::clone(&self.transport);
            tasks.spawn(async move {
                let _permit = semaphore.acquire_owned().await.expect("semaphore closed");
                (slot, address, transport.get(address).await)
            });
        }

        let mut records: Vec<Option<Record>> = vec![None; count];
        while let Some(joined) = tasks.join_next().await {
            let (slot, address, result) =
                joined.map_err(|e| EngineError::TaskFailed(e.to_string()))?;
            let record = result?.ok_or(EngineError::MissingChunk(address))?;
            records[slot] = Some(record);
        }

        records
            .into_iter()
            .map(|slot| {
                slot.ok_or_else(|| EngineError::TaskFailed("fetch slot never completed".into()))
            })
            .collect()
    }
}
