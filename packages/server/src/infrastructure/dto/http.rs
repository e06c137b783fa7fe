//! HTTP API request/response DTOs.

use serde::{Deserialize, Serialize};

use super::websocket::IndividualDto;

/// `GET /health` response
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthDto {
    pub status: String,
    pub rooms: usize,
    pub global_users: usize,
}

/// `POST /api/rooms` request body (the body itself is optional)
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct CreateRoomRequest {
    pub name: Option<String>,
}

/// `POST /api/rooms` response
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateRoomResponse {
    pub room_id: String,
    pub room_name: String,
}

/// `GET /api/rooms/{room_id}` response
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoomStatsDto {
    pub room_id: String,
    pub room_name: String,
    pub average: u8,
    pub count: usize,
    pub individuals: Vec<IndividualDto>,
}

/// Error body for 4xx responses
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorDto {
    pub error: String,
}
