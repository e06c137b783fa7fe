//! UseCase: ルーム統計取得処理（管理 HTTP サーフェス用）
//!
//! 接続時のルーム解決と異なり、管理サーフェスの参照はフォールバック
//! しない。未知または不正な識別子は not-found として呼び出し元に返す。

use std::sync::Arc;

use crate::domain::{RoomCode, RoomRegistry, RoomStats, RoomSummary, compute_stats};

use super::error::GetRoomStatsError;

/// ルーム統計取得のユースケース
pub struct GetRoomStatsUseCase {
    /// Registry（ルーム管理の抽象化）
    registry: Arc<dyn RoomRegistry>,
}

impl GetRoomStatsUseCase {
    /// 新しい GetRoomStatsUseCase を作成
    pub fn new(registry: Arc<dyn RoomRegistry>) -> Self {
        Self { registry }
    }

    /// ルーム統計取得を実行
    pub async fn execute(
        &self,
        room_id: String,
    ) -> Result<(RoomSummary, RoomStats), GetRoomStatsError> {
        let code = RoomCode::new(room_id).map_err(|_| GetRoomStatsError::RoomNotFound)?;
        let room = self
            .registry
            .get_room(&code)
            .await
            .ok_or(GetRoomStatsError::RoomNotFound)?;

        let stats = compute_stats(&room);
        Ok((
            RoomSummary {
                code: room.code,
                name: room.name,
            },
            stats,
        ))
    }
}
