//! UseCase layer: one application operation per module.
//!
//! Each use case depends only on the domain traits so tests can wire
//! isolated registries and pushers.

mod broadcast_stats;
mod create_room;
mod error;
mod get_health;
mod get_room_stats;
mod join_room;
mod leave_room;
mod rename_participant;
mod update_boredom;

pub use broadcast_stats::BroadcastStatsUseCase;
pub use create_room::CreateRoomUseCase;
pub use error::{CreateRoomError, GetRoomStatsError, JoinError};
pub use get_health::{GetHealthUseCase, HealthReport};
pub use get_room_stats::GetRoomStatsUseCase;
pub use join_room::{JoinRoomUseCase, JoinedSession};
pub use leave_room::LeaveRoomUseCase;
pub use rename_participant::RenameParticipantUseCase;
pub use update_boredom::UpdateBoredomUseCase;
