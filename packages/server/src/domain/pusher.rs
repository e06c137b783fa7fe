//! StatsPusher trait 定義
//!
//! ドメイン層が必要とするメッセージ配信のインターフェースを定義します。
//! 具体的な実装は Infrastructure 層が提供します（依存性の逆転）。

use std::fmt;

use async_trait::async_trait;
#[cfg(test)]
use mockall::automock;
use tokio::sync::mpsc;

use super::error::PushError;
use super::value_object::{ParticipantId, RoomCode};

/// Channel over which serialized payloads reach one connection's writer task
pub type PusherChannel = mpsc::UnboundedSender<String>;

/// Identifies one live connection: participant ids are only unique within a
/// room, so the room code is part of the key.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SessionKey {
    pub room: RoomCode,
    pub participant: ParticipantId,
}

impl SessionKey {
    pub fn new(room: RoomCode, participant: ParticipantId) -> Self {
        Self { room, participant }
    }
}

impl fmt::Display for SessionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.room, self.participant)
    }
}

/// StatsPusher trait
///
/// 1 回のブロードキャストは 1 度だけシリアライズされたペイロードを全ての
/// 対象セッションに送る。個々のセッションへの送信失敗はブロードキャスト
/// 全体を失敗させない（ログに残してスキップする）。
#[cfg_attr(test, automock)]
#[async_trait]
pub trait StatsPusher: Send + Sync {
    /// セッションの送信チャンネルを登録
    async fn register(&self, key: SessionKey, sender: PusherChannel);

    /// セッションの送信チャンネルを登録解除
    async fn unregister(&self, key: &SessionKey);

    /// 同一ペイロードを全ての対象セッションに送信する。
    /// 個別の送信失敗は握りつぶす。
    async fn broadcast(&self, targets: Vec<SessionKey>, payload: &str) -> Result<(), PushError>;

    /// 全ての登録済みチャンネルを閉じる（シャットダウン用）
    async fn close_all(&self);
}
