/// Redis-backed document collections.
///
/// Each collection is a Redis list; every element is one JSON-encoded record.
/// Unlike a cache, the store is the source of truth, so every operation reports
/// failures to the caller instead of degrading to a no-op. Transport failures
/// surface as `CommonError::Connection`.
use redis::aio::MultiplexedConnection;
use redis::AsyncCommands;
use tracing::{debug, warn};

use crate::error::CommonError;

#[derive(Clone)]
pub struct RedisStore {
    client: redis::Client,
}

impl RedisStore {
    /// Build a client for `url`. No connection is made until the first command.
    pub fn open(url: &str) -> Result<Self, CommonError> {
        let client = redis::Client::open(url)
            .inspect_err(|e| warn!(error = %e, "invalid redis url"))?;
        Ok(Self { client })
    }

    /// Send a PING. Returns `Ok(())` if Redis is reachable.
    pub async fn ping(&self) -> Result<(), CommonError> {
        let mut conn = self.connection().await?;
        let _: String = redis::cmd("PING")
            .query_async(&mut conn)
            .await
            .map_err(CommonError::from_redis)?;
        Ok(())
    }

    /// Every element of the list at `key`, in insertion order.
    /// A missing key reads as an empty list.
    pub async fn list_all(&self, key: &str) -> Result<Vec<String>, CommonError> {
        let mut conn = self.connection().await?;
        let values: Vec<String> = conn
            .lrange(key, 0, -1)
            .await
            .inspect_err(|e| warn!(error = %e, key, "redis LRANGE failed"))
            .map_err(CommonError::from_redis)?;
        debug!(key, count = values.len(), "redis LRANGE");
        Ok(values)
    }

    /// Append all `values` to the list at `key` with a single RPUSH.
    /// Returns the list length after the push.
    pub async fn append_all(&self, key: &str, values: Vec<String>) -> Result<usize, CommonError> {
        if values.is_empty() {
            return Ok(0);
        }
        let mut conn = self.connection().await?;
        let pushed = values.len();
        let len: usize = conn
            .rpush(key, values)
            .await
            .inspect_err(|e| warn!(error = %e, key, "redis RPUSH failed"))
            .map_err(CommonError::from_redis)?;
        debug!(key, pushed, len, "redis RPUSH");
        Ok(len)
    }

    async fn connection(&self) -> Result<MultiplexedConnection, CommonError> {
        self.client
            .get_multiplexed_async_connection()
            .await
            .inspect_err(|e| warn!(error = %e, "redis connection failed"))
            .map_err(|e| CommonError::Connection(e.to_string()))
    }
}
