//! Simulated participant drivers.
//!
//! Each automated profile gets its own repeating timer task. A tick applies
//! one drift step to the profile's entry in the global room and triggers a
//! room-wide broadcast. If the entry is missing the tick is skipped; both
//! the room and the entries are seeded at startup and never removed.

use std::sync::Arc;

use tokio::task::JoinHandle;

use crate::domain::{BoredomLevel, BotProfile, Participant, RoomCode, RoomRegistry};
use crate::usecase::BroadcastStatsUseCase;

/// Insert the automated participants into the global room.
///
/// Each bot starts at its target value; the drift keeps it wandering around
/// the target from there.
pub async fn seed_bots(registry: Arc<dyn RoomRegistry>, profiles: &[BotProfile]) {
    for profile in profiles {
        let participant = Participant::bot(
            profile.id.clone(),
            profile.display_name.clone(),
            BoredomLevel::new(profile.target),
        );
        if let Err(e) = registry
            .add_participant(&RoomCode::global(), participant)
            .await
        {
            tracing::error!("Failed to seed bot {}: {}", profile.id, e);
        }
    }
    tracing::info!(
        "Seeded {} automated participant(s) into the global room",
        profiles.len()
    );
}

/// Spawn one driver task per profile. The tasks run until the process exits.
pub fn spawn_bot_drivers(
    registry: Arc<dyn RoomRegistry>,
    broadcast: Arc<BroadcastStatsUseCase>,
    profiles: Vec<BotProfile>,
) -> Vec<JoinHandle<()>> {
    profiles
        .into_iter()
        .map(|profile| {
            let registry = registry.clone();
            let broadcast = broadcast.clone();
            tokio::spawn(async move {
                let room = RoomCode::global();
                let mut ticker = tokio::time::interval(profile.tick_interval);
                loop {
                    ticker.tick().await;

                    // 対称な摂動: (uniform(0,1) - 0.5) * volatility
                    let noise = (rand::random::<f64>() - 0.5) * profile.volatility;
                    let applied = registry
                        .apply_bot_drift(&room, &profile.id, profile.target, noise)
                        .await;

                    if applied {
                        broadcast.execute(&room).await;
                    } else {
                        tracing::debug!(
                            "Bot {} has no entry in the global room, skipping tick",
                            profile.id
                        );
                    }
                }
            })
        })
        .collect()
}
