//! WebSocket を使った StatsPusher 実装
//!
//! ## 責務
//!
//! - 各セッションの `UnboundedSender` を管理
//! - ブロードキャスト対象セッションへのペイロード送信
//!
//! ## 設計ノート
//!
//! WebSocket の生成は UI 層（`src/ui/handler/websocket.rs`）で行われます。
//! この実装は生成された `UnboundedSender` を受け取り、メッセージ送信に
//! 使用します。チャンネルへの送信はノンブロッキングであり、遅い
//! クライアントが他のクライアントへのブロードキャストを遅延させる
//! ことはありません。

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::domain::{PushError, PusherChannel, SessionKey, StatsPusher};

/// WebSocket を使った StatsPusher 実装
///
/// ## フィールド
///
/// - `clients`: 接続中のセッションと対応する sender のマップ
pub struct WebSocketStatsPusher {
    /// Key: SessionKey（ルームコード + participant id）
    /// Value: PusherChannel
    clients: Mutex<HashMap<SessionKey, PusherChannel>>,
}

impl WebSocketStatsPusher {
    /// 新しい WebSocketStatsPusher を作成
    pub fn new() -> Self {
        Self {
            clients: Mutex::new(HashMap::new()),
        }
    }
}

impl Default for WebSocketStatsPusher {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl StatsPusher for WebSocketStatsPusher {
    async fn register(&self, key: SessionKey, sender: PusherChannel) {
        let mut clients = self.clients.lock().await;
        clients.insert(key.clone(), sender);
        tracing::debug!("Session '{}' registered to StatsPusher", key);
    }

    async fn unregister(&self, key: &SessionKey) {
        let mut clients = self.clients.lock().await;
        clients.remove(key);
        tracing::debug!("Session '{}' unregistered from StatsPusher", key);
    }

    async fn broadcast(&self, targets: Vec<SessionKey>, payload: &str) -> Result<(), PushError> {
        let clients = self.clients.lock().await;

        for target in targets {
            if let Some(sender) = clients.get(&target) {
                // ブロードキャストでは一部の送信失敗を許容
                if let Err(e) = sender.send(payload.to_string()) {
                    tracing::warn!("Failed to push stats to session '{}': {}", target, e);
                } else {
                    tracing::debug!("Pushed stats to session '{}'", target);
                }
            } else {
                // 切断直後のセッションはスキップ
                tracing::debug!("Session '{}' not found during broadcast, skipping", target);
            }
        }

        Ok(())
    }

    async fn close_all(&self) {
        let mut clients = self.clients.lock().await;
        let count = clients.len();
        // sender を drop することで各接続の writer ループが終了し、
        // クライアントにクリーンなクローズが届く
        clients.clear();
        tracing::info!("Closed {} live session channel(s)", count);
    }
}
