//! UseCase: ルーム作成処理（管理 HTTP サーフェス用）

use std::sync::Arc;

use crate::domain::{RoomRegistry, RoomSummary};

use super::error::CreateRoomError;

/// ルーム作成のユースケース
pub struct CreateRoomUseCase {
    /// Registry（ルーム管理の抽象化）
    registry: Arc<dyn RoomRegistry>,
}

impl CreateRoomUseCase {
    /// 新しい CreateRoomUseCase を作成
    pub fn new(registry: Arc<dyn RoomRegistry>) -> Self {
        Self { registry }
    }

    /// ルーム作成を実行
    ///
    /// # Arguments
    ///
    /// * `name` - 任意の表示名。未指定または空白の場合はコード由来の
    ///   デフォルト名が解決される。
    pub async fn execute(&self, name: Option<String>) -> Result<RoomSummary, CreateRoomError> {
        self.registry.create_room(name).await.map_err(|e| {
            tracing::error!("Failed to create room: {}", e);
            CreateRoomError::CodeAllocationFailed
        })
    }
}
