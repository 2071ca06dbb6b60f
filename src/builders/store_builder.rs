//! Build the queue and dedup set from the configured backend.

use std::sync::Arc;

use tracing::info;

use crate::config::StoreBackendConfig;
use crate::core::{IdSet, StoreError, TakerQueue};
use crate::infra::{FileIdSet, FileQueue, InMemoryIdSet, InMemoryQueue};

const QUEUE_STREAM: &str = "sender_takers_queue";
const SET_NAME: &str = "sender_sent_set";

/// Queue and dedup set handed to the service.
#[derive(Clone)]
pub struct Store {
    /// Takers waiting for a thank-you email.
    pub queue: Arc<dyn TakerQueue>,
    /// Ids that were already queued.
    pub sent: Arc<dyn IdSet>,
}

/// Open the backend selected by `cfg`.
///
/// # Errors
///
/// Fails if the backend cannot be opened or reached, or if Redis was selected
/// in a build without the `redis` feature.
pub async fn build_store(cfg: &StoreBackendConfig) -> Result<Store, StoreError> {
    match cfg {
        StoreBackendConfig::InMemory => {
            info!("using in-memory store");
            Ok(Store {
                queue: Arc::new(InMemoryQueue::new()),
                sent: Arc::new(InMemoryIdSet::new()),
            })
        }
        StoreBackendConfig::File { dir } => {
            info!(dir = %dir.display(), "using file store");
            Ok(Store {
                queue: Arc::new(FileQueue::open(dir, QUEUE_STREAM)?),
                sent: Arc::new(FileIdSet::open(dir, SET_NAME)?),
            })
        }
        StoreBackendConfig::Redis { addr } => build_redis(addr).await,
    }
}

#[cfg(feature = "redis")]
async fn build_redis(addr: &str) -> Result<Store, StoreError> {
    info!(addr, "using redis store");
    let store = Arc::new(crate::infra::RedisStore::connect(addr).await?);
    Ok(Store {
        queue: store.clone(),
        sent: store,
    })
}

#[cfg(not(feature = "redis"))]
#[allow(clippy::unused_async)]
async fn build_redis(_addr: &str) -> Result<Store, StoreError> {
    Err(StoreError::Backend(
        "redis backend not compiled in; rebuild with `--features redis`".into(),
    ))
}
