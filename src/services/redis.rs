//! Redis service backing per-session data

use async_trait::async_trait;
use redis::{AsyncCommands, Client};

use crate::error::{AppError, AppResult};

use super::sessions::SessionStore;

#[derive(Clone)]
pub struct RedisService {
    client: Client,
    ttl_seconds: u64,
}

fn session_key(session_id: &str, key: &str) -> String {
    format!("session:{}:{}", session_id, key)
}

impl RedisService {
    /// Create a new Redis service and check the server answers
    pub async fn new(url: &str, ttl_seconds: u64) -> AppResult<Self> {
        let service = Self::lazy(url, ttl_seconds)?;

        let mut conn = service.get_connection().await?;
        redis::cmd("PING")
            .query_async::<_, String>(&mut conn)
            .await
            .map_err(|e| AppError::Session(format!("Redis connection test failed: {}", e)))?;

        Ok(service)
    }

    /// Create the client without connecting; the first command connects
    pub fn lazy(url: &str, ttl_seconds: u64) -> AppResult<Self> {
        let client = Client::open(url)
            .map_err(|e| AppError::Session(format!("Failed to create Redis client: {}", e)))?;
        Ok(Self { client, ttl_seconds })
    }

    pub async fn get_connection(&self) -> AppResult<redis::aio::MultiplexedConnection> {
        self.client
            .get_multiplexed_async_connection()
            .await
            .map_err(|e| AppError::Session(format!("Failed to get Redis connection: {}", e)))
    }
}

#[async_trait]
impl SessionStore for RedisService {
    async fn get_int(&self, session_id: &str, key: &str) -> AppResult<Option<i64>> {
        let mut conn = self.get_connection().await?;
        let value: Option<i64> = conn
            .get(session_key(session_id, key))
            .await
            .map_err(|e| AppError::Session(format!("Failed to read session value: {}", e)))?;
        Ok(value)
    }

    async fn set_int(&self, session_id: &str, key: &str, value: i64) -> AppResult<()> {
        let mut conn = self.get_connection().await?;
        conn.set_ex::<_, _, ()>(session_key(session_id, key), value, self.ttl_seconds)
            .await
            .map_err(|e| AppError::Session(format!("Failed to store session value: {}", e)))?;
        Ok(())
    }
}
