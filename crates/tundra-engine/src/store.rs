//! [`TundraStore`] — the backend facade orchestrating the write and read
//! pipeline: slicing, pointer-tree construction, and reassembly over a
//! [`Transport`].

use std::sync::Arc;

use bytes::Bytes;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use tracing::{debug, info};
use tundra_crypto::{Keypair, sign_record};
use tundra_transport::{MutableOpts, Transport};
use tundra_types::{ADDRESS_LEN, Address, Envelope, Record};

use crate::config::{GetOptions, PutOptions, StoreConfig};
use crate::error::EngineError;
use crate::fanout::Fanout;
use crate::slicer;

/// Storage facade over a size-bounded transport.
///
/// Payloads that fit in one record are published directly; larger payloads
/// are split into fragments and published as a balanced K-ary tree of
/// pointer buffers, rooted at the single address `put` returns. `get` walks
/// the tree back down and returns the reassembled payload.
pub struct TundraStore {
    pub(crate) transport: Arc<dyn Transport>,
    keys: Option<Arc<Keypair>>,
    fanout: Fanout,
    pub(crate) max_indirections: usize,
    buffer_size_limit: usize,
    pub(crate) concurrent_requests: usize,
}

impl TundraStore {
    /// Create a store over the given transport.
    ///
    /// Fails if the configuration cannot support branching: the buffer size
    /// limit must leave room for at least two addresses per pointer buffer,
    /// and at least one request must be allowed in flight.
    pub fn new(transport: Arc<dyn Transport>, config: StoreConfig) -> Result<Self, EngineError> {
        let fanout = Fanout::new(config.buffer_size_limit, config.address_size);
        if fanout.max_pointers() < 2 {
            return Err(EngineError::Config(format!(
                "buffer size limit {} leaves room for {} pointers per buffer, need at least 2",
                config.buffer_size_limit,
                fanout.max_pointers()
            )));
        }
        if config.concurrent_requests == 0 {
            return Err(EngineError::Config(
                "concurrent_requests must be at least 1".to_string(),
            ));
        }

        Ok(Self {
            transport,
            keys: config.keys.map(Arc::new),
            fanout,
            max_indirections: config.max_indirections,
            buffer_size_limit: config.buffer_size_limit,
            concurrent_requests: config.concurrent_requests,
        })
    }

    /// Return the computed fan-out parameters.
    pub fn fanout(&self) -> &Fanout {
        &self.fanout
    }

    /// Bring the underlying transport up.
    pub async fn start(&self) -> Result<(), EngineError> {
        Ok(self.transport.start().await?)
    }

    /// Tear the underlying transport down.
    pub async fn stop(&self) -> Result<(), EngineError> {
        Ok(self.transport.stop().await?)
    }

    // ------------------------------------------------------------------
    // Write path
    // ------------------------------------------------------------------

    /// Store a payload, returning the address of its root record.
    ///
    /// `opts.seq` selects the mutable (signed, sequenced) write path and
    /// requires keys to be configured. The caller's salt applies to the
    /// root record only; fragments and intermediate pointer buffers are
    /// salted by their own content digest.
    pub async fn put(&self, data: Bytes, opts: &PutOptions) -> Result<Address, EngineError> {
        let mode = self.write_mode(opts)?;
        let fragments = slicer::slice(&data, self.buffer_size_limit);

        if let [fragment] = fragments.as_slice() {
            let salt = opts
                .salt
                .clone()
                .unwrap_or_else(|| salted_content_digest(&data));
            let address = publish(self.transport.as_ref(), fragment.clone(), salt, &mode).await?;
            info!(%address, size = data.len(), "put: stored single-record payload");
            return Ok(address);
        }

        if fragments.len() > self.fanout.max_leaves(self.max_indirections) {
            return Err(EngineError::CapacityExceeded {
                size: data.len(),
                limit: self.fanout.max_payload(self.max_indirections),
                max_indirections: self.max_indirections,
            });
        }

        debug!(
            size = data.len(),
            fragments = fragments.len(),
            "put: building pointer tree"
        );

        // Fragments are stored level by level: each box of K items is
        // stored in bounded parallel and summarized by one pointer buffer,
        // and the buffers become the next level's items. Levels are
        // strictly sequential.
        let mut level = fragments;
        let mut depth = 0usize;
        loop {
            depth += 1;
            if depth > self.max_indirections {
                return Err(EngineError::DepthExceeded {
                    max_indirections: self.max_indirections,
                });
            }

            if level.len() <= self.fanout.max_pointers() {
                let addresses = self.store_level(level, &mode).await?;
                let buffer = encode_pointers(addresses)?;
                let salt = opts.salt.clone().unwrap_or_else(|| content_digest(&buffer));
                let address = publish(self.transport.as_ref(), buffer, salt, &mode).await?;
                info!(%address, size = data.len(), depth, "put: stored pointer tree");
                return Ok(address);
            }

            let max = self.fanout.max_pointers();
            let mut next = Vec::with_capacity(level.len().div_ceil(max));
            for block in level.chunks(max) {
                let addresses = self.store_level(block.to_vec(), &mode).await?;
                next.push(encode_pointers(addresses)?);
            }
            debug!(depth, buffers = next.len(), "put: intermediate level stored");
            level = next;
        }
    }

    /// Store one level's items in parallel, bounded by `concurrent_requests`.
    ///
    /// Addresses are returned in the items' original order regardless of
    /// completion order.
    async fn store_level(
        &self,
        items: Vec<Bytes>,
        mode: &WriteMode,
    ) -> Result<Vec<Address>, EngineError> {
        let count = items.len();
        let semaphore = Arc::new(Semaphore::new(self.concurrent_requests));
        let mut tasks: JoinSet<(usize, Result<Address, EngineError>)> = JoinSet::new();

        for (slot, item) in items.into_iter().enumerate() {
            let semaphore = Arc::clone(&semaphore);
            let transport = Arc::clone(&self.transport);
            let mode = mode.clone();
            tasks.spawn(async move {
                let _permit = semaphore.acquire_owned().await.expect("semaphore closed");
                let salt = content_digest(&item);
                (slot, publish(transport.as_ref(), item, salt, &mode).await)
            });
        }

        let mut addresses: Vec<Option<Address>> = vec![None; count];
        while let Some(joined) = tasks.join_next().await {
            let (slot, result) = joined.map_err(|e| EngineError::TaskFailed(e.to_string()))?;
            addresses[slot] = Some(result?);
        }

        addresses
            .into_iter()
            .map(|slot| {
                slot.ok_or_else(|| EngineError::TaskFailed("storage slot never completed".into()))
            })
            .collect()
    }

    fn write_mode(&self, opts: &PutOptions) -> Result<WriteMode, EngineError> {
        match opts.seq {
            Some(seq) => {
                let keys = self.keys.clone().ok_or(EngineError::NoKeys)?;
                Ok(WriteMode::Mutable { keys, seq })
            }
            None => Ok(WriteMode::Immutable),
        }
    }

    // ------------------------------------------------------------------
    // Read path
    // ------------------------------------------------------------------

    /// Fetch the record at `address`, reassembling pointer trees.
    ///
    /// Returns `None` for an unknown address. With `opts.recursive` the
    /// record is returned exactly as stored, skipping reassembly.
    pub async fn get(
        &self,
        address: Address,
        opts: &GetOptions,
    ) -> Result<Option<Record>, EngineError> {
        let Some(record) = self.transport.get(address).await? else {
            debug!(%address, "get: address unknown");
            return Ok(None);
        };

        if opts.recursive {
            return Ok(Some(record));
        }

        let resolved = self.resolve(record).await?;
        Ok(Some(resolved))
    }
}

/// How each individual record of a write is published.
#[derive(Clone)]
enum WriteMode {
    Immutable,
    Mutable { keys: Arc<Keypair>, seq: u64 },
}

/// Publish one record through the selected write path.
async fn publish(
    transport: &dyn Transport,
    v: Bytes,
    salt: Bytes,
    mode: &WriteMode,
) -> Result<Address, EngineError> {
    match mode {
        WriteMode::Immutable => {
            let record = Record::immutable(v, Some(salt));
            Ok(transport.put_immutable(&record).await?)
        }
        WriteMode::Mutable { keys, seq } => {
            let sig = sign_record(&keys.secret, *seq, Some(salt.as_ref()), v.as_ref())?;
            let record = Record::mutable(
                v,
                *seq,
                salt.clone(),
                keys.public.to_hex(),
                sig.to_hex(),
            );
            let opts = MutableOpts {
                public_key: keys.public.clone(),
                salt,
                seq: *seq,
            };
            Ok(transport.put_mutable(&record, &opts).await?)
        }
    }
}

fn encode_pointers(addresses: Vec<Address>) -> Result<Bytes, EngineError> {
    Envelope::pointers(addresses)
        .encode()
        .map(Bytes::from)
        .map_err(|e| EngineError::Envelope(e.to_string()))
}

/// Content-derived salt: the item's digest, truncated to address width.
fn content_digest(data: &[u8]) -> Bytes {
    Bytes::copy_from_slice(&blake3::hash(data).as_bytes()[..ADDRESS_LEN])
}

/// Salt for a caller-unsalted single-record write: a digest over the
/// content and a random nonce. The nonce keeps unrelated writers from
/// colliding under one key, at the cost of deterministic root addressing;
/// callers wanting content-determined roots supply their own salt.
fn salted_content_digest(data: &[u8]) -> Bytes {
    let nonce: [u8; 8] = rand::random();
    let mut hasher = blake3::Hasher::new();
    hasher.update(data);
    hasher.update(&nonce);
    Bytes::copy_from_slice(&hasher.finalize().as_bytes()[..ADDRESS_LEN])
}
