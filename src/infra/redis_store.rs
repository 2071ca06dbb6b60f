//! Redis-backed queue and id set (enabled with the `redis` feature).
//!
//! The queue is a list of JSON-encoded takers (`RPUSH`/`LPOP`), the id set a
//! plain Redis set (`SADD`/`SISMEMBER`). Both share one multiplexed connection.

use async_trait::async_trait;
use redis::aio::MultiplexedConnection;
use redis::AsyncCommands;
use tracing::debug;

use crate::core::{IdSet, StoreError, Taker, TakerId, TakerQueue};

const SET_KEY: &str = "sender_sent_set";
const QUEUE_KEY: &str = "sender_takers_queue";

/// Queue and id set stored in Redis.
#[derive(Clone)]
pub struct RedisStore {
    conn: MultiplexedConnection,
}

impl RedisStore {
    /// Connect to `addr` (`host:port` or a `redis://` URL) and check it answers `PING`.
    ///
    /// # Errors
    ///
    /// Fails if the address is invalid or the server is unreachable.
    pub async fn connect(addr: &str) -> Result<Self, StoreError> {
        let url = if addr.contains("://") {
            addr.to_string()
        } else {
            format!("redis://{addr}")
        };
        let client = redis::Client::open(url.as_str())?;
        let mut conn = client.get_multiplexed_tokio_connection().await?;
        let _: String = redis::cmd("PING").query_async(&mut conn).await?;
        debug!(addr, "redis store connected");
        Ok(Self { conn })
    }
}

#[async_trait]
impl TakerQueue for RedisStore {
    async fn push(&self, taker: &Taker) -> Result<(), StoreError> {
        let payload = serde_json::to_string(taker)?;
        let mut conn = self.conn.clone();
        conn.rpush::<_, _, ()>(QUEUE_KEY, payload).await?;
        Ok(())
    }

    async fn pop(&self) -> Result<Option<Taker>, StoreError> {
        let mut conn = self.conn.clone();
        let payload: Option<String> = conn.lpop(QUEUE_KEY, None).await?;
        payload
            .map(|p| serde_json::from_str(&p))
            .transpose()
            .map_err(StoreError::from)
    }
}

#[async_trait]
impl IdSet for RedisStore {
    async fn add(&self, id: TakerId) -> Result<(), StoreError> {
        let mut conn = self.conn.clone();
        conn.sadd::<_, _, ()>(SET_KEY, id).await?;
        Ok(())
    }

    async fn contains(&self, id: TakerId) -> Result<bool, StoreError> {
        let mut conn = self.conn.clone();
        Ok(conn.sismember(SET_KEY, id).await?)
    }
}
