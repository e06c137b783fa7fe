//! Room expiry sweeper.
//!
//! Periodically evicts non-global rooms that have had no live participants
//! for longer than the idle threshold. Eviction is fire-and-forget: former
//! participants are already gone, so nobody is notified.

use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;

use crate::domain::RoomRegistry;

/// Spawn the sweeper task. It runs until the process exits.
pub fn spawn_room_sweeper(
    registry: Arc<dyn RoomRegistry>,
    sweep_interval: Duration,
    idle_threshold: Duration,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(sweep_interval);
        loop {
            ticker.tick().await;

            let evicted = registry
                .evict_idle_rooms(idle_threshold.as_millis() as i64)
                .await;
            if !evicted.is_empty() {
                tracing::info!("Sweeper evicted {} idle room(s)", evicted.len());
            }
        }
    })
}
