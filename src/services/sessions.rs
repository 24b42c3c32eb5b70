//! Per-session counters

use std::sync::Arc;

use async_trait::async_trait;
use uuid::Uuid;

use crate::error::AppResult;

const NUM_VISITS: &str = "num_visits";

/// Integer values scoped to a browser session
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SessionStore: Send + Sync {
    async fn get_int(&self, session_id: &str, key: &str) -> AppResult<Option<i64>>;
    async fn set_int(&self, session_id: &str, key: &str, value: i64) -> AppResult<()>;
}

#[derive(Clone)]
pub struct SessionsService {
    store: Arc<dyn SessionStore>,
}

impl SessionsService {
    pub fn new(store: Arc<dyn SessionStore>) -> Self {
        Self { store }
    }

    /// Fresh session identifier
    pub fn new_session_id() -> String {
        Uuid::new_v4().to_string()
    }

    /// Only identifiers we could have issued are accepted
    pub fn is_valid_session_id(raw: &str) -> bool {
        Uuid::parse_str(raw).is_ok()
    }

    /// Count a home page visit; returns the number of earlier visits
    pub async fn record_visit(&self, session_id: &str) -> AppResult<i64> {
        let previous = self.store.get_int(session_id, NUM_VISITS).await?.unwrap_or(0);
        self.store.set_int(session_id, NUM_VISITS, previous + 1).await?;
        Ok(previous)
    }
}
