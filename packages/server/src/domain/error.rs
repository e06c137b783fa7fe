//! ドメイン層のエラー型定義

use thiserror::Error;

/// Value object の構築時に返されるエラー
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DomainError {
    #[error("invalid room code: '{0}'")]
    InvalidRoomCode(String),

    #[error("invalid participant id: '{0}'")]
    InvalidParticipantId(String),

    #[error("display name must not be empty")]
    EmptyDisplayName,
}

/// Room Registry の操作で返されるエラー
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RegistryError {
    #[error("room '{0}' not found")]
    RoomNotFound(String),

    #[error("room code space exhausted after {0} attempts")]
    CodeSpaceExhausted(u32),
}

/// メッセージ送信時のエラー
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PushError {
    #[error("session '{0}' not registered")]
    SessionNotFound(String),

    #[error("failed to push message: {0}")]
    PushFailed(String),
}
