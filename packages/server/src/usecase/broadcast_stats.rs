//! UseCase: 統計ブロードキャスト処理
//!
//! ルームの現在の統計を 1 度だけシリアライズし、そのルームの全ての live
//! セッションに送信する。接続由来・bot 由来・掃除由来のどのトリガーからも
//! 並行に呼び出される。ルームが既に削除されていた場合は no-op。

use std::sync::Arc;

use crate::domain::{RoomCode, RoomRegistry, SessionKey, StatsPusher, compute_stats};
use crate::infrastructure::dto::websocket::StatsMessage;

/// 統計ブロードキャストのユースケース
pub struct BroadcastStatsUseCase {
    /// Registry（ルーム管理の抽象化）
    registry: Arc<dyn RoomRegistry>,
    /// StatsPusher（メッセージ配信の抽象化）
    pusher: Arc<dyn StatsPusher>,
}

impl BroadcastStatsUseCase {
    /// 新しい BroadcastStatsUseCase を作成
    pub fn new(registry: Arc<dyn RoomRegistry>, pusher: Arc<dyn StatsPusher>) -> Self {
        Self { registry, pusher }
    }

    /// ルームの現在の統計を全 live セッションにブロードキャストする
    ///
    /// ルームが存在しない場合（掃除と競合した場合など）は何もしない。
    /// 個々のセッションへの送信失敗は StatsPusher 側で握りつぶされる。
    pub async fn execute(&self, code: &RoomCode) {
        // 1. スナップショットを取得（ロックは registry 内部で完結する）
        let Some(room) = self.registry.get_room(code).await else {
            tracing::debug!("Room {} absent at broadcast time, skipping", code);
            return;
        };

        // 2. 統計を計算し、ペイロードを 1 度だけシリアライズ
        let stats = compute_stats(&room);
        let message = StatsMessage::from_room_stats(&room.code, &room.name, stats);
        let payload =
            serde_json::to_string(&message).expect("stats message always serializes to JSON");

        // 3. live セッションに配信（bot はスキップ）
        let targets: Vec<SessionKey> = room
            .live_participant_ids()
            .into_iter()
            .map(|id| SessionKey::new(room.code.clone(), id))
            .collect();

        if let Err(e) = self.pusher.broadcast(targets, &payload).await {
            tracing::warn!("Failed to broadcast stats for room {}: {}", code, e);
        }
    }
}
