//! Redis login state store
//!
//! Pending logins are stored as JSON under `<prefix><state>` with `SET EX`
//! and consumed with `GETDEL`, so a state can be redeemed once across all
//! instances sharing the Redis server.

use async_trait::async_trait;
use chrono::Utc;
use redis::{aio::MultiplexedConnection, Client};
use tracing::{debug, error, info};

use idp_core::domain::entities::identity::PendingLogin;
use idp_core::errors::DomainError;
use idp_core::repositories::LoginStateStore;
use idp_shared::config::CacheConfig;

use crate::InfrastructureError;

/// Login state store on a shared Redis server
#[derive(Clone)]
pub struct RedisLoginStateStore {
    connection: MultiplexedConnection,
    key_prefix: String,
}

impl RedisLoginStateStore {
    /// Connect to the Redis server named in `config`
    pub async fn connect(config: &CacheConfig) -> Result<Self, InfrastructureError> {
        let url = config
            .url
            .as_deref()
            .ok_or_else(|| InfrastructureError::Config("REDIS_URL is not set".to_string()))?;

        info!("Connecting login state store to {}", mask_url(url));
        let client = Client::open(url).map_err(|e| {
            error!("Failed to parse Redis URL: {}", e);
            InfrastructureError::Config(format!("Invalid Redis URL: {}", e))
        })?;
        let connection = client.get_multiplexed_async_connection().await?;

        Ok(Self {
            connection,
            key_prefix: config.key_prefix.clone(),
        })
    }

    fn key(&self, state: &str) -> String {
        format!("{}{}", self.key_prefix, state)
    }
}

fn cache_error(operation: &str, e: redis::RedisError) -> DomainError {
    error!(operation, error = %e, "redis operation failed");
    DomainError::persistence(format!("{} failed", operation))
}

/// Seconds until `pending` expires, at least one
pub(crate) fn ttl_seconds(pending: &PendingLogin, now: chrono::DateTime<Utc>) -> u64 {
    (pending.expires_at - now).num_seconds().max(1) as u64
}

/// Hide credentials in a Redis URL for logging
pub(crate) fn mask_url(url: &str) -> String {
    match (url.find("://"), url.rfind('@')) {
        (Some(scheme_end), Some(at)) if at > scheme_end => {
            format!("{}***{}", &url[..scheme_end + 3], &url[at..])
        }
        _ => url.to_string(),
    }
}

#[async_trait]
impl LoginStateStore for RedisLoginStateStore {
    async fn put(&self, state: &str, pending: &PendingLogin) -> Result<(), DomainError> {
        let payload = serde_json::to_string(pending)
            .map_err(|e| DomainError::internal(format!("Failed to encode login state: {}", e)))?;
        let ttl = ttl_seconds(pending, Utc::now());

        let mut conn = self.connection.clone();
        redis::cmd("SET")
            .arg(self.key(state))
            .arg(payload)
            .arg("EX")
            .arg(ttl)
            .query_async::<_, ()>(&mut conn)
            .await
            .map_err(|e| cache_error("store login state", e))?;

        debug!(ttl, "login state stored");
        Ok(())
    }

    async fn take(&self, state: &str) -> Result<Option<PendingLogin>, DomainError> {
        let mut conn = self.connection.clone();
        let payload: Option<String> = redis::cmd("GETDEL")
            .arg(self.key(state))
            .query_async(&mut conn)
            .await
            .map_err(|e| cache_error("consume login state", e))?;

        payload
            .map(|raw| {
                serde_json::from_str(&raw).map_err(|e| {
                    DomainError::internal(format!("Failed to decode login state: {}", e))
                })
            })
            .transpose()
    }
}
