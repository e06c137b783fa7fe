//! UseCase: 表示名更新処理
//!
//! 空でない名前を 20 文字に切り詰めて参加者エントリに格納する。
//! 空の名前は無視される。

use std::sync::Arc;

use crate::domain::{DisplayName, RoomRegistry, SessionKey};

/// 表示名更新のユースケース
pub struct RenameParticipantUseCase {
    /// Registry（ルーム管理の抽象化）
    registry: Arc<dyn RoomRegistry>,
}

impl RenameParticipantUseCase {
    /// 新しい RenameParticipantUseCase を作成
    pub fn new(registry: Arc<dyn RoomRegistry>) -> Self {
        Self { registry }
    }

    /// 表示名更新を実行
    ///
    /// # Returns
    ///
    /// 名前が有効で、参加者エントリに格納した場合は true
    pub async fn execute(&self, key: &SessionKey, raw_name: &str) -> bool {
        match DisplayName::new(raw_name) {
            Ok(name) => {
                self.registry
                    .set_display_name(&key.room, &key.participant, name)
                    .await
            }
            Err(_) => {
                tracing::debug!(
                    "Dropped empty name update from participant {} in room {}",
                    key.participant,
                    key.room
                );
                false
            }
        }
    }
}
