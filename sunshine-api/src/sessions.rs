use std::collections::HashMap;
use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use sunshine_catalog::TicketCatalog;
use sunshine_order::{CheckoutError, CheckoutFlow};
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::error::AppError;

pub const DEFAULT_SESSION_TTL_MINUTES: i64 = 30;

struct Session {
    flow: CheckoutFlow,
    touched_at: DateTime<Utc>,
}

impl Session {
    fn is_expired(&self, now: DateTime<Utc>, ttl: Duration) -> bool {
        now - self.touched_at > ttl
    }
}

/// Checkout flows in progress, keyed by session id. Process-local and never
/// persisted; a restart drops every open checkout.
///
/// A session idle for longer than the TTL counts as abandoned and is dropped
/// together with its order.
#[derive(Clone)]
pub struct CheckoutSessions {
    inner: Arc<RwLock<HashMap<Uuid, Session>>>,
    ttl: Duration,
}

impl Default for CheckoutSessions {
    fn default() -> Self {
        Self::new(Duration::minutes(DEFAULT_SESSION_TTL_MINUTES))
    }
}

impl CheckoutSessions {
    pub fn new(ttl: Duration) -> Self {
        Self { inner: Arc::new(RwLock::new(HashMap::new())), ttl }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    pub async fn open(&self, catalog: Arc<TicketCatalog>, max_per_type: u32) -> (Uuid, CheckoutFlow) {
        let id = Uuid::new_v4();
        let flow = CheckoutFlow::with_limit(catalog, max_per_type);
        let now = Utc::now();

        let mut sessions = self.inner.write().await;
        let ttl = self.ttl;
        sessions.retain(|_, s| !s.is_expired(now, ttl));
        sessions.insert(id, Session { flow: flow.clone(), touched_at: now });

        tracing::debug!(session_id = %id, open_sessions = sessions.len(), "checkout session opened");
        (id, flow)
    }

    /// Run a read-only operation against one session
    pub async fn read<T>(
        &self,
        id: Uuid,
        f: impl FnOnce(&CheckoutFlow) -> Result<T, CheckoutError>,
    ) -> Result<T, AppError> {
        self.update(id, |flow| f(&*flow)).await
    }

    /// Run a mutating operation against one session. A rejected operation
    /// leaves the flow as it was. Any access keeps the session alive.
    pub async fn update<T>(
        &self,
        id: Uuid,
        f: impl FnOnce(&mut CheckoutFlow) -> Result<T, CheckoutError>,
    ) -> Result<T, AppError> {
        let now = Utc::now();
        let mut sessions = self.inner.write().await;

        if sessions.get(&id).is_some_and(|s| s.is_expired(now, self.ttl)) {
            sessions.remove(&id);
            tracing::debug!(session_id = %id, "checkout session expired");
        }

        let session = sessions.get_mut(&id).ok_or_else(|| not_found(id))?;
        session.touched_at = now;
        Ok(f(&mut session.flow)?)
    }

    pub async fn close(&self, id: Uuid) -> bool {
        self.inner.write().await.remove(&id).is_some()
    }

    /// Drop every idle session. Returns how many were removed.
    pub async fn evict_expired(&self) -> usize {
        let now = Utc::now();
        let mut sessions = self.inner.write().await;
        let before = sessions.len();
        let ttl = self.ttl;
        sessions.retain(|_, s| !s.is_expired(now, ttl));
        before - sessions.len()
    }
}

fn not_found(id: Uuid) -> AppError {
    AppError::NotFoundError(format!("Checkout session {} not found", id))
}
