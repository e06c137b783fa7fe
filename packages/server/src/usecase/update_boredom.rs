//! UseCase: 値更新処理
//!
//! クライアントから届いた数値を整数に丸めて [0, 100] にクランプし、
//! 参加者エントリに格納する。

use std::sync::Arc;

use crate::domain::{BoredomLevel, RoomRegistry, SessionKey};

/// 値更新のユースケース
pub struct UpdateBoredomUseCase {
    /// Registry（ルーム管理の抽象化）
    registry: Arc<dyn RoomRegistry>,
}

impl UpdateBoredomUseCase {
    /// 新しい UpdateBoredomUseCase を作成
    pub fn new(registry: Arc<dyn RoomRegistry>) -> Self {
        Self { registry }
    }

    /// 値更新を実行
    ///
    /// # Returns
    ///
    /// 参加者エントリが存在し、値を格納した場合は true
    pub async fn execute(&self, key: &SessionKey, raw_value: f64) -> bool {
        let level = BoredomLevel::from_client(raw_value);
        let stored = self
            .registry
            .set_boredom(&key.room, &key.participant, level)
            .await;

        if !stored {
            tracing::debug!(
                "Dropped value update for unknown participant {} in room {}",
                key.participant,
                key.room
            );
        }

        stored
    }
}
