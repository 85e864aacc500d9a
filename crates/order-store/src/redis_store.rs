//! # Redis Backend
//!
//! Durable storage with one Redis hash per day:
//!
//! ```text
//! food_orders:2026-10-16      (hash)
//!   "42"  -> {"display_name":"@alice","order_text":"Pizza","written_at":"2026-10-16T12:03:11"}
//!   "77"  -> {"display_name":"Bob","order_text":"Salad","written_at":"2026-10-16T12:04:52"}
//! ```
//!
//! `HSET` and `HDEL` are atomic per field, so a user's record is always
//! replaced or removed as a whole. Hash iteration order says nothing about
//! write time; `written_at` is stored in each value for that.

use crate::error::StoreError;
use crate::record::{Day, OrderRecord, UserId};
use crate::store::RecordStore;
use async_trait::async_trait;
use chrono::NaiveDateTime;
use redis::aio::ConnectionManager;
use redis::{AsyncCommands, ConnectionAddr, ConnectionInfo, RedisConnectionInfo};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::future::Future;
use std::time::Duration;
use tracing::{debug, info, warn};

/// Prefix of every day-partition key.
pub const ORDER_KEY_PREFIX: &str = "food_orders:";

/// Connection parameters for the Redis backend.
#[derive(Clone)]
pub struct RedisSettings {
    pub host: String,
    pub port: u16,
    pub db: i64,
    pub password: Option<String>,
}

impl Default for RedisSettings {
    fn default() -> Self {
        Self {
            host: "localhost".to_string(),
            port: 6379,
            db: 0,
            password: None,
        }
    }
}

impl std::fmt::Debug for RedisSettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RedisSettings")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("db", &self.db)
            .field("password", &self.password.as_ref().map(|_| "[REDACTED]"))
            .finish()
    }
}

impl RedisSettings {
    fn connection_info(&self) -> ConnectionInfo {
        ConnectionInfo {
            addr: ConnectionAddr::Tcp(self.host.clone(), self.port),
            redis: RedisConnectionInfo {
                db: self.db,
                password: self.password.clone(),
                ..Default::default()
            },
        }
    }
}

/// Redis hash key holding the partition for `day`.
pub fn partition_key(day: &Day) -> String {
    format!("{ORDER_KEY_PREFIX}{day}")
}

/// The JSON value stored under each user field.
#[derive(Debug, Serialize, Deserialize)]
struct StoredOrder {
    display_name: String,
    order_text: String,
    written_at: NaiveDateTime,
}

fn encode_value(record: &OrderRecord) -> Result<String, StoreError> {
    let value = StoredOrder {
        display_name: record.display_name.clone(),
        order_text: record.order_text.clone(),
        written_at: record.written_at,
    };
    serde_json::to_string(&value)
        .map_err(|e| StoreError::unavailable(format!("failed to encode order: {e}")))
}

/// Rebuilds records from a raw `HGETALL` reply, skipping fields that do not decode.
fn decode_partition(day: &Day, raw: HashMap<String, String>) -> Vec<OrderRecord> {
    let mut records = Vec::with_capacity(raw.len());
    for (field, value) in raw {
        let user_id = match field.parse::<UserId>() {
            Ok(id) => id,
            Err(e) => {
                warn!(%day, %field, error = %e, "Skipping field with non-numeric user id");
                continue;
            }
        };
        match serde_json::from_str::<StoredOrder>(&value) {
            Ok(stored) => records.push(OrderRecord {
                day: *day,
                user_id,
                display_name: stored.display_name,
                order_text: stored.order_text,
                written_at: stored.written_at,
            }),
            Err(e) => warn!(%day, %user_id, error = %e, "Skipping undecodable order"),
        }
    }
    records
}

/// [`RecordStore`] backed by Redis hashes.
#[derive(Clone)]
pub struct RedisStore {
    connection: ConnectionManager,
    request_timeout: Duration,
}

impl RedisStore {
    /// Opens a managed connection and checks it with `PING`.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::StorageUnavailable`] when the server cannot be
    /// reached within `request_timeout`.
    pub async fn connect(
        settings: &RedisSettings,
        request_timeout: Duration,
    ) -> Result<Self, StoreError> {
        debug!(?settings, "Connecting to Redis");
        let client = redis::Client::open(settings.connection_info())
            .map_err(|e| StoreError::unavailable(e.to_string()))?;
        let connection = with_timeout(request_timeout, ConnectionManager::new(client)).await?;
        let store = Self {
            connection,
            request_timeout,
        };

        let mut conn = store.connection.clone();
        let pong: String = with_timeout(
            request_timeout,
            redis::cmd("PING").query_async::<_, String>(&mut conn),
        )
        .await?;
        info!(host = %settings.host, port = settings.port, db = settings.db, %pong, "Redis connected");
        Ok(store)
    }
}

async fn with_timeout<T>(
    limit: Duration,
    operation: impl Future<Output = redis::RedisResult<T>>,
) -> Result<T, StoreError> {
    match tokio::time::timeout(limit, operation).await {
        Ok(result) => result.map_err(|e| StoreError::unavailable(e.to_string())),
        Err(_) => Err(StoreError::unavailable(format!(
            "redis did not answer within {}ms",
            limit.as_millis()
        ))),
    }
}

#[async_trait]
impl RecordStore for RedisStore {
    async fn upsert(&self, record: OrderRecord) -> Result<(), StoreError> {
        record.validate()?;
        let key = partition_key(&record.day);
        let value = encode_value(&record)?;
        let mut conn = self.connection.clone();
        with_timeout(
            self.request_timeout,
            conn.hset::<_, _, _, ()>(&key, record.user_id.0, value),
        )
        .await?;
        info!(%key, user_id = %record.user_id, "Upserted");
        Ok(())
    }

    async fn remove(&self, day: &Day, user_id: UserId) -> Result<bool, StoreError> {
        let key = partition_key(day);
        let mut conn = self.connection.clone();
        let deleted: i64 =
            with_timeout(self.request_timeout, conn.hdel(&key, user_id.0)).await?;
        info!(%key, %user_id, removed = deleted > 0, "Removed");
        Ok(deleted > 0)
    }

    async fn list(&self, day: &Day) -> Result<Vec<OrderRecord>, StoreError> {
        let key = partition_key(day);
        let mut conn = self.connection.clone();
        let raw: HashMap<String, String> =
            with_timeout(self.request_timeout, conn.hgetall(&key)).await?;
        let records = decode_partition(day, raw);
        debug!(%key, count = records.len(), "Listed");
        Ok(records)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day() -> Day {
        "2026-10-16".parse().unwrap()
    }

    #[test]
    fn partition_key_uses_prefix_and_iso_day() {
        assert_eq!(partition_key(&day()), "food_orders:2026-10-16");
    }

    #[test]
    fn stored_value_keeps_write_time() {
        let record = OrderRecord {
            day: day(),
            user_id: UserId(42),
            display_name: "@alice".into(),
            order_text: "Pizza Margherita".into(),
            written_at: day().date().and_hms_opt(12, 3, 11).unwrap(),
        };
        let value = encode_value(&record).unwrap();
        let json: serde_json::Value = serde_json::from_str(&value).unwrap();
        assert_eq!(json["display_name"], "@alice");
        assert_eq!(json["order_text"], "Pizza Margherita");
        assert_eq!(json["written_at"], "2026-10-16T12:03:11");

        let raw = HashMap::from([("42".to_string(), value)]);
        assert_eq!(decode_partition(&day(), raw), vec![record]);
    }

    #[test]
    fn undecodable_fields_are_skipped() {
        let good = r#"{"display_name":"Bob","order_text":"Salad","written_at":"2026-10-16T12:04:52"}"#;
        let raw = HashMap::from([
            ("77".to_string(), good.to_string()),
            ("not-a-user".to_string(), good.to_string()),
            ("78".to_string(), "{broken".to_string()),
            ("79".to_string(), r#"{"order_text":"Soup"}"#.to_string()),
        ]);

        let records = decode_partition(&day(), raw);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].user_id, UserId(77));
        assert_eq!(records[0].display_name, "Bob");
    }

    #[tokio::test]
    async fn stalled_command_becomes_storage_unavailable() {
        let result = with_timeout(
            Duration::from_millis(20),
            std::future::pending::<redis::RedisResult<String>>(),
        )
        .await;
        assert_eq!(
            result,
            Err(StoreError::StorageUnavailable(
                "redis did not answer within 20ms".into()
            ))
        );
    }

    #[tokio::test]
    async fn redis_error_becomes_storage_unavailable() {
        let refused = async {
            Err::<String, _>(redis::RedisError::from((
                redis::ErrorKind::IoError,
                "connection refused",
            )))
        };
        match with_timeout(Duration::from_secs(1), refused).await {
            Err(StoreError::StorageUnavailable(reason)) => {
                assert!(reason.contains("connection refused"), "{reason}");
            }
            other => panic!("expected StorageUnavailable, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn answered_command_passes_value_through() {
        let pong = async { Ok::<_, redis::RedisError>("PONG".to_string()) };
        assert_eq!(
            with_timeout(Duration::from_secs(1), pong).await,
            Ok("PONG".to_string())
        );
    }

    #[test]
    fn settings_debug_redacts_password() {
        let settings = RedisSettings {
            password: Some("hunter2".into()),
            ..RedisSettings::default()
        };
        let rendered = format!("{settings:?}");
        assert!(!rendered.contains("hunter2"));
        assert!(rendered.contains("[REDACTED]"));
    }
}
