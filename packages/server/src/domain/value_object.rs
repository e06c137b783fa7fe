//! Value objects for the boredom domain.
//!
//! Each constructor validates its input so the rest of the application can
//! rely on the invariants (code shape, name length, value range) holding.

use std::fmt;

use super::error::DomainError;

/// Room code: exactly 6 ASCII-alphanumeric characters, matched case-sensitively.
///
/// Generated codes are uppercase hex (see `RoomCodeFactory`), but any
/// 6-character alphanumeric identifier is a well-formed code for join
/// resolution purposes.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RoomCode(String);

impl RoomCode {
    /// Length of every room code, in characters
    pub const LENGTH: usize = 6;

    /// Identifier of the permanent global room
    pub const GLOBAL: &str = "GLOBAL";

    pub fn new(raw: impl Into<String>) -> Result<Self, DomainError> {
        let raw = raw.into();
        if raw.len() == Self::LENGTH && raw.chars().all(|c| c.is_ascii_alphanumeric()) {
            Ok(Self(raw))
        } else {
            Err(DomainError::InvalidRoomCode(raw))
        }
    }

    /// The permanent global room's code
    pub fn global() -> Self {
        Self(Self::GLOBAL.to_string())
    }

    pub fn is_global(&self) -> bool {
        self.0 == Self::GLOBAL
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl TryFrom<String> for RoomCode {
    type Error = DomainError;

    fn try_from(raw: String) -> Result<Self, Self::Error> {
        Self::new(raw)
    }
}

impl fmt::Display for RoomCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Room display name. Absent or blank requested names resolve to
/// `"Room <code>"`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoomName(String);

impl RoomName {
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    /// Resolve the display name for a room: the requested name when present
    /// and non-blank, the code-derived default otherwise.
    pub fn resolve(requested: Option<&str>, code: &RoomCode) -> Self {
        match requested {
            Some(name) if !name.trim().is_empty() => Self(name.to_string()),
            _ => Self(format!("Room {}", code.as_str())),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for RoomName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Participant identifier, unique within one room's participant table.
///
/// Generated ids are 16 lowercase hex characters (see `ParticipantIdFactory`);
/// automated-participant profiles use fixed readable ids like `bot-lurker`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ParticipantId(String);

impl ParticipantId {
    /// Upper bound on id length, far above anything generated
    pub const MAX_LENGTH: usize = 64;

    pub fn new(raw: impl Into<String>) -> Result<Self, DomainError> {
        let raw = raw.into();
        let well_formed = !raw.is_empty()
            && raw.len() <= Self::MAX_LENGTH
            && raw
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
        if well_formed {
            Ok(Self(raw))
        } else {
            Err(DomainError::InvalidParticipantId(raw))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for ParticipantId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Participant display name: non-empty, truncated to 20 characters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayName(String);

impl DisplayName {
    /// Maximum stored length, in characters
    pub const MAX_CHARS: usize = 20;

    pub fn new(raw: impl Into<String>) -> Result<Self, DomainError> {
        let raw = raw.into();
        if raw.is_empty() {
            return Err(DomainError::EmptyDisplayName);
        }
        Ok(Self(raw.chars().take(Self::MAX_CHARS).collect()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for DisplayName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Boredom value, clamped to [0, 100].
///
/// Stored as f64 so automated participants can drift in fractional steps;
/// rounding happens only when the value is read for stats output.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoredomLevel(f64);

impl BoredomLevel {
    pub const MIN: f64 = 0.0;
    pub const MAX: f64 = 100.0;

    /// Clamp an arbitrary value into range, keeping fractional precision
    pub fn new(raw: f64) -> Self {
        Self(raw.clamp(Self::MIN, Self::MAX))
    }

    /// Clamp-and-round a client-supplied value to an integer in [0, 100]
    pub fn from_client(raw: f64) -> Self {
        Self(raw.round().clamp(Self::MIN, Self::MAX))
    }

    /// Neutral default for freshly joined participants and empty rooms
    pub fn neutral() -> Self {
        Self(50.0)
    }

    pub fn value(&self) -> f64 {
        self.0
    }

    /// The value as reported in stats output
    pub fn rounded(&self) -> u8 {
        self.0.round() as u8
    }
}

/// Unix timestamp in milliseconds
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Timestamp(i64);

impl Timestamp {
    pub fn new(millis: i64) -> Self {
        Self(millis)
    }

    pub fn value(&self) -> i64 {
        self.0
    }
}
