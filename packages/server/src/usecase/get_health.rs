//! UseCase: ヘルスチェック用のプロセス状態取得

use std::sync::Arc;

use crate::domain::{RoomCode, RoomRegistry};

/// プロセスレベルの状態レポート
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HealthReport {
    /// 登録されているルーム数（グローバルルームを含む）
    pub rooms: usize,
    /// グローバルルームの live 参加者数
    pub global_live_users: usize,
}

/// ヘルスチェックのユースケース
pub struct GetHealthUseCase {
    /// Registry（ルーム管理の抽象化）
    registry: Arc<dyn RoomRegistry>,
}

impl GetHealthUseCase {
    /// 新しい GetHealthUseCase を作成
    pub fn new(registry: Arc<dyn RoomRegistry>) -> Self {
        Self { registry }
    }

    /// プロセス状態を取得
    pub async fn execute(&self) -> HealthReport {
        let rooms = self.registry.room_count().await;
        let global_live_users = self
            .registry
            .get_room(&RoomCode::global())
            .await
            .map(|room| room.live_participant_count())
            .unwrap_or(0);

        HealthReport {
            rooms,
            global_live_users,
        }
    }
}
