use tokio::time::{interval, Duration};
use tracing::info;

use crate::sessions::CheckoutSessions;

/// Periodically drops checkout sessions nobody has touched within the TTL,
/// so abandoned checkouts do not outlive their guests.
pub async fn start_session_sweeper(sessions: CheckoutSessions, every: Duration) {
    info!("Session sweeper started, ttl {} min", sessions.ttl().num_minutes());

    let mut ticker = interval(every);
    loop {
        ticker.tick().await;
        let removed = sessions.evict_expired().await;
        if removed > 0 {
            info!("Evicted {} idle checkout sessions", removed);
        }
    }
}
