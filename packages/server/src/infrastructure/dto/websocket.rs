//! WebSocket message DTOs.
//!
//! Server→client messages carry a `type` discriminant field; client→server
//! messages are a serde-tagged union. Anything that fails to parse as
//! `ClientMessage` is dropped by the handler without a response.

use serde::{Deserialize, Serialize};

/// Discriminant for server→client messages
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ServerMessageType {
    Welcome,
    Stats,
}

/// One participant's entry in a stats breakdown
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IndividualDto {
    pub id: String,
    pub boredom: u8,
    pub is_bot: bool,
    /// `null` when the participant never set a name
    pub name: Option<String>,
}

/// Sent once to a connection immediately after it joins a room
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WelcomeMessage {
    pub r#type: ServerMessageType,
    pub user_id: String,
    pub room_id: String,
    pub room_name: String,
    /// The joining participant's own value
    pub boredom: u8,
    pub average: u8,
    pub count: usize,
    pub individuals: Vec<IndividualDto>,
}

/// Sent to every live connection in a room on each room-state change
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatsMessage {
    pub r#type: ServerMessageType,
    pub room_id: String,
    pub room_name: String,
    pub average: u8,
    pub count: usize,
    pub individuals: Vec<IndividualDto>,
}

/// Client→server messages. Unknown tags and type mismatches fail to parse
/// and are ignored by the handler.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum ClientMessage {
    Update { boredom: f64 },
    SetName { name: String },
}
