//! UseCase 層のエラー型定義

use thiserror::Error;

/// 参加者接続時のエラー
#[derive(Debug, Error, PartialEq, Eq)]
pub enum JoinError {
    /// 解決したルームが参加完了前に消えた場合（通常は発生しない）
    #[error("room '{0}' disappeared during join")]
    RoomUnavailable(String),
}

/// ルーム作成時のエラー
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CreateRoomError {
    #[error("failed to allocate a room code")]
    CodeAllocationFailed,
}

/// ルーム統計取得時のエラー
#[derive(Debug, Error, PartialEq, Eq)]
pub enum GetRoomStatsError {
    #[error("room not found")]
    RoomNotFound,
}
