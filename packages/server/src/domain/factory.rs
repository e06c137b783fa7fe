//! Identifier factories backed by OS-level randomness.
//!
//! The factories only guarantee well-formed output; collision handling (to
//! the extent it matters at all for a 16.7M code space) is the registry's
//! concern.

use rand::RngCore;
use rand::rngs::OsRng;

use super::value_object::{ParticipantId, RoomCode};

/// Generates 6-character uppercase hex room codes from 3 bytes of entropy.
pub struct RoomCodeFactory;

impl RoomCodeFactory {
    pub fn generate() -> RoomCode {
        let mut bytes = [0u8; 3];
        OsRng.fill_bytes(&mut bytes);
        RoomCode::new(hex::encode(bytes).to_uppercase())
            .expect("3 hex-encoded bytes always form a valid room code")
    }
}

/// Generates 16-character lowercase hex participant ids from 8 bytes of
/// entropy.
pub struct ParticipantIdFactory;

impl ParticipantIdFactory {
    pub fn generate() -> ParticipantId {
        let mut bytes = [0u8; 8];
        OsRng.fill_bytes(&mut bytes);
        ParticipantId::new(hex::encode(bytes))
            .expect("8 hex-encoded bytes always form a valid participant id")
    }
}
