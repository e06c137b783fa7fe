//! Conversion logic between domain types and DTOs.

use crate::domain::{IndividualBoredom, RoomCode, RoomName, RoomStats};

use super::http::RoomStatsDto;
use super::websocket::{IndividualDto, ServerMessageType, StatsMessage};

// ========================================
// Domain → DTO
// ========================================

impl From<IndividualBoredom> for IndividualDto {
    fn from(individual: IndividualBoredom) -> Self {
        Self {
            id: individual.id.into_string(),
            boredom: individual.boredom,
            is_bot: individual.is_bot,
            name: individual.display_name,
        }
    }
}

impl StatsMessage {
    /// Build the broadcast payload for one room-state change
    pub fn from_room_stats(code: &RoomCode, name: &RoomName, stats: RoomStats) -> Self {
        Self {
            r#type: ServerMessageType::Stats,
            room_id: code.as_str().to_string(),
            room_name: name.as_str().to_string(),
            average: stats.average,
            count: stats.count,
            individuals: stats.individuals.into_iter().map(Into::into).collect(),
        }
    }
}

impl RoomStatsDto {
    /// Build the admin lookup response for a room
    pub fn from_room_stats(code: &RoomCode, name: &RoomName, stats: RoomStats) -> Self {
        Self {
            room_id: code.as_str().to_string(),
            room_name: name.as_str().to_string(),
            average: stats.average,
            count: stats.count,
            individuals: stats.individuals.into_iter().map(Into::into).collect(),
        }
    }
}
