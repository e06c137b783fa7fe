//! UseCase: 参加者切断処理
//!
//! 接続クローズ時に参加者エントリをテーブルから削除する。live 参加者の
//! エントリは切断とともに消える（「非アクティブ」としては残らない）。
//! 既に削除済みの場合は何もしない（冪等）。

use std::sync::Arc;

use crate::domain::{RoomRegistry, SessionKey, StatsPusher};

/// 参加者切断のユースケース
pub struct LeaveRoomUseCase {
    /// Registry（ルーム管理の抽象化）
    registry: Arc<dyn RoomRegistry>,
    /// StatsPusher（メッセージ配信の抽象化）
    pusher: Arc<dyn StatsPusher>,
}

impl LeaveRoomUseCase {
    /// 新しい LeaveRoomUseCase を作成
    pub fn new(registry: Arc<dyn RoomRegistry>, pusher: Arc<dyn StatsPusher>) -> Self {
        Self { registry, pusher }
    }

    /// 参加者切断を実行
    ///
    /// # Returns
    ///
    /// 参加者エントリを削除した場合は true、既に存在しなかった場合は false
    pub async fn execute(&self, key: &SessionKey) -> bool {
        // 1. 送信チャンネルを登録解除（接続が開いていれば閉じる）
        self.pusher.unregister(key).await;

        // 2. 参加者エントリを削除
        let removed = self
            .registry
            .remove_participant(&key.room, &key.participant)
            .await;

        if removed {
            tracing::info!(
                "Participant {} left room {} and was removed from the table",
                key.participant,
                key.room
            );
        }

        removed
    }
}
