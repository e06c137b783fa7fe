//! Pure aggregation logic.
//!
//! `compute_stats` is a pure function over a room's participant table so it
//! can be tested without any infrastructure and invoked concurrently from
//! every broadcast trigger.

use super::entity::Room;
use super::value_object::ParticipantId;

/// Average reported for an empty room; there is no "undefined" state on the
/// wire.
pub const NEUTRAL_AVERAGE: u8 = 50;

/// One participant's contribution as reported to clients
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndividualBoredom {
    pub id: ParticipantId,
    pub boredom: u8,
    pub is_bot: bool,
    pub display_name: Option<String>,
}

/// Aggregate of a room's participant table at a point in time
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoomStats {
    pub average: u8,
    pub count: usize,
    pub individuals: Vec<IndividualBoredom>,
}

/// Compute the rounded mean and per-participant breakdown for a room.
///
/// Iteration order of the table is not significant and is surfaced as-is.
pub fn compute_stats(room: &Room) -> RoomStats {
    let count = room.participants.len();

    let individuals: Vec<IndividualBoredom> = room
        .participants
        .values()
        .map(|p| IndividualBoredom {
            id: p.id.clone(),
            boredom: p.boredom.rounded(),
            is_bot: p.is_bot,
            display_name: p.display_name.as_ref().map(|n| n.as_str().to_string()),
        })
        .collect();

    let average = if count == 0 {
        NEUTRAL_AVERAGE
    } else {
        let sum: f64 = room.participants.values().map(|p| p.boredom.value()).sum();
        (sum / count as f64).round() as u8
    };

    RoomStats {
        average,
        count,
        individuals,
    }
}
