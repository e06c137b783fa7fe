//! Domain layer: entities, value objects, pure aggregation logic, and the
//! interfaces the rest of the application depends on.

pub mod bot;
pub mod entity;
pub mod error;
pub mod factory;
pub mod pusher;
pub mod registry;
pub mod stats;
pub mod value_object;

pub use bot::{BotProfile, DRIFT_RATE, default_profiles, drift_step};
pub use entity::{Participant, Room};
pub use error::{DomainError, PushError, RegistryError};
pub use factory::{ParticipantIdFactory, RoomCodeFactory};
pub use pusher::{PusherChannel, SessionKey, StatsPusher};
pub use registry::{RoomRegistry, RoomSummary};
pub use stats::{IndividualBoredom, NEUTRAL_AVERAGE, RoomStats, compute_stats};
pub use value_object::{BoredomLevel, DisplayName, ParticipantId, RoomCode, RoomName, Timestamp};

#[cfg(test)]
pub use pusher::MockStatsPusher;
