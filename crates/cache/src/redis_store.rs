//! Redis-backed [`KvStore`].
//!
//! Every command runs under a short timeout so an unreachable Redis turns
//! into a [`CacheError`] quickly instead of stalling the request.

use std::time::Duration;

use async_trait::async_trait;
use redis::aio::{ConnectionManager, ConnectionManagerConfig};
use redis::{AsyncCommands, Client, Script};

use crate::error::CacheError;
use crate::store::KvStore;

/// Default per-command timeout.
const DEFAULT_OP_TIMEOUT: Duration = Duration::from_millis(250);

const CONNECT_TIMEOUT: Duration = Duration::from_millis(100);

/// `INCR`, plus `PEXPIRE` when the key was just created, as one atomic step.
const INCR_WITH_EXPIRY: &str = r"
local n = redis.call('INCR', KEYS[1])
if n == 1 then
    redis.call('PEXPIRE', KEYS[1], ARGV[1])
end
return n
";

#[derive(Clone)]
pub struct RedisStore {
    conn: ConnectionManager,
    prefix: String,
    op_timeout: Duration,
    incr_script: Script,
}

impl RedisStore {
    /// Connect to `redis_url`; keys are namespaced under `prefix:`.
    pub async fn connect(redis_url: &str, prefix: &str) -> Result<Self, CacheError> {
        let client = Client::open(redis_url)?;
        let conn = client
            .get_connection_manager_with_config(manager_config())
            .await?;
        tracing::info!(prefix, "Connected to Redis");
        Ok(Self {
            conn,
            prefix: prefix.to_string(),
            op_timeout: DEFAULT_OP_TIMEOUT,
            incr_script: Script::new(INCR_WITH_EXPIRY),
        })
    }

    pub fn with_op_timeout(mut self, op_timeout: Duration) -> Self {
        self.op_timeout = op_timeout;
        self
    }

    fn key(&self, key: &str) -> String {
        format!("{}:{key}", self.prefix)
    }

    async fn timed<T>(
        &self,
        fut: impl std::future::Future<Output = redis::RedisResult<T>>,
    ) -> Result<T, CacheError> {
        match tokio::time::timeout(self.op_timeout, fut).await {
            Ok(result) => Ok(result?),
            Err(_) => Err(CacheError::Timeout(self.op_timeout)),
        }
    }
}

#[async_trait]
impl KvStore for RedisStore {
    async fn get(&self, key: &str) -> Result<Option<String>, CacheError> {
        let mut conn = self.conn.clone();
        let key = self.key(key);
        self.timed(async move { conn.get::<_, Option<String>>(key).await })
            .await
    }

    async fn set(&self, key: &str, value: &str, ttl: Option<Duration>) -> Result<(), CacheError> {
        let mut conn = self.conn.clone();
        let key = self.key(key);
        let value = value.to_string();
        self.timed(async move {
            match ttl {
                Some(ttl) => {
                    let result: redis::RedisResult<()> = redis::cmd("SET")
                        .arg(key)
                        .arg(value)
                        .arg("PX")
                        .arg(millis(ttl))
                        .query_async(&mut conn)
                        .await;
                    result
                }
                None => conn.set::<_, _, ()>(key, value).await,
            }
        })
        .await
    }

    async fn incr(&self, key: &str, ttl: Duration) -> Result<i64, CacheError> {
        let mut conn = self.conn.clone();
        let key = self.key(key);
        let ms = millis(ttl);
        let script = self.incr_script.clone();
        self.timed(async move {
            let count: redis::RedisResult<i64> =
                script.key(key).arg(ms).invoke_async(&mut conn).await;
            count
        })
        .await
    }
}

/// One quick retry, then give up so startup fails fast.
fn manager_config() -> ConnectionManagerConfig {
    ConnectionManagerConfig::new()
        .set_number_of_retries(1)
        .set_connection_timeout(CONNECT_TIMEOUT)
}

/// Redis rejects a zero expiry, so clamp to at least one millisecond.
fn millis(ttl: Duration) -> u64 {
    u64::try_from(ttl.as_millis()).unwrap_or(u64::MAX).max(1)
}
