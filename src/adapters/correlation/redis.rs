//! Redis-backed correlation store for multi-server deployments.
//!
//! Each pending entry is a string key `ecpay:corr:{correlation_key}`
//! holding the issued checksum, written with `SET .. EX`. Settlement runs
//! a compare-and-delete script so concurrent callbacks cannot both win.

use async_trait::async_trait;
use redis::aio::MultiplexedConnection;
use redis::{AsyncCommands, Script};

use crate::domain::checkout::{CheckMacValue, CorrelationKey, CorrelationState};
use crate::domain::foundation::StateMachine;
use crate::ports::{CorrelationStore, StoreError};

/// Namespace for correlation keys.
const KEY_PREFIX: &str = "ecpay:corr:";

/// Deletes KEYS[1] only if it still holds ARGV[1].
const COMPARE_AND_DELETE: &str = r#"
if redis.call('GET', KEYS[1]) == ARGV[1] then
    redis.call('DEL', KEYS[1])
    return 1
end
return 0
"#;

/// Correlation store backed by Redis.
#[derive(Clone)]
pub struct RedisCorrelationStore {
    conn: MultiplexedConnection,
    /// Entry lifetime in seconds; 0 keeps entries until settled.
    ttl_secs: u64,
    settle_script: Script,
}

impl RedisCorrelationStore {
    pub fn new(conn: MultiplexedConnection, ttl_secs: u64) -> Self {
        Self {
            conn,
            ttl_secs,
            settle_script: Script::new(COMPARE_AND_DELETE),
        }
    }

    /// Connect using a `redis://` or `rediss://` URL.
    pub async fn connect(url: &str, ttl_secs: u64) -> Result<Self, StoreError> {
        let client = redis::Client::open(url).map_err(unavailable)?;
        let conn = client
            .get_multiplexed_tokio_connection()
            .await
            .map_err(unavailable)?;
        Ok(Self::new(conn, ttl_secs))
    }
}

fn redis_key(key: &CorrelationKey) -> String {
    format!("{}{}", KEY_PREFIX, key.as_str())
}

fn unavailable(err: redis::RedisError) -> StoreError {
    StoreError::Unavailable(err.to_string())
}

#[async_trait]
impl CorrelationStore for RedisCorrelationStore {
    async fn put(&self, key: &CorrelationKey, expected: &CheckMacValue) -> Result<(), StoreError> {
        let mut conn = self.conn.clone();
        let mut cmd = redis::cmd("SET");
        cmd.arg(redis_key(key)).arg(expected.as_str());
        if self.ttl_secs > 0 {
            cmd.arg("EX").arg(self.ttl_secs);
        }

        cmd.query_async::<_, ()>(&mut conn)
            .await
            .map_err(unavailable)
    }

    async fn get(&self, key: &CorrelationKey) -> Result<Option<CheckMacValue>, StoreError> {
        let mut conn = self.conn.clone();
        let stored: Option<String> = conn.get(redis_key(key)).await.map_err(unavailable)?;
        Ok(stored.map(CheckMacValue::from_received))
    }

    async fn settle(
        &self,
        key: &CorrelationKey,
        expected: &CheckMacValue,
        outcome: CorrelationState,
    ) -> Result<bool, StoreError> {
        if !CorrelationState::Pending.can_transition_to(&outcome) {
            return Ok(false);
        }

        let mut conn = self.conn.clone();
        let deleted: i64 = self
            .settle_script
            .key(redis_key(key))
            .arg(expected.as_str())
            .invoke_async(&mut conn)
            .await
            .map_err(unavailable)?;

        tracing::debug!(correlation_key = %key, ?outcome, settled = deleted == 1, "settled correlation entry");
        Ok(deleted == 1)
    }
}

impl std::fmt::Debug for RedisCorrelationStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RedisCorrelationStore")
            .field("ttl_secs", &self.ttl_secs)
            .finish_non_exhaustive()
    }
}
