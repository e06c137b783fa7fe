//! UseCase: 参加者接続処理
//!
//! 接続のアドレッシング情報（ルームコードと任意の表示名）からルームを
//! 解決し、participant id を採番して live 参加者としてテーブルに登録する。
//! ルーム解決は決して失敗しない（不正なコードはグローバルルームに
//! フォールバックする）。

use std::sync::Arc;

use crate::domain::{
    BoredomLevel, DisplayName, Participant, ParticipantId, ParticipantIdFactory, PusherChannel,
    RoomCode, RoomName, RoomRegistry, RoomStats, SessionKey, StatsPusher, compute_stats,
};

use super::error::JoinError;

/// 接続直後のセッション情報。welcome メッセージの材料になる。
#[derive(Debug, Clone, PartialEq)]
pub struct JoinedSession {
    pub participant_id: ParticipantId,
    pub room_code: RoomCode,
    pub room_name: RoomName,
    /// 参加者自身の初期値
    pub boredom: BoredomLevel,
    /// 参加者自身を含む、参加時点のルーム統計
    pub stats: RoomStats,
}

impl JoinedSession {
    pub fn session_key(&self) -> SessionKey {
        SessionKey::new(self.room_code.clone(), self.participant_id.clone())
    }
}

/// 参加者接続のユースケース
pub struct JoinRoomUseCase {
    /// Registry（ルーム管理の抽象化）
    registry: Arc<dyn RoomRegistry>,
    /// StatsPusher（メッセージ配信の抽象化）
    pusher: Arc<dyn StatsPusher>,
}

impl JoinRoomUseCase {
    /// 新しい JoinRoomUseCase を作成
    pub fn new(registry: Arc<dyn RoomRegistry>, pusher: Arc<dyn StatsPusher>) -> Self {
        Self { registry, pusher }
    }

    /// 参加者接続を実行
    ///
    /// # Arguments
    ///
    /// * `requested_room` - 接続パラメータで要求されたルーム識別子
    /// * `requested_name` - 接続パラメータで要求された表示名
    /// * `sender` - この接続へのメッセージ送信用チャンネル
    ///
    /// # Returns
    ///
    /// * `Ok(JoinedSession)` - 接続成功（welcome メッセージの材料）
    /// * `Err(JoinError)` - 解決したルームが参加完了前に消えた場合のみ
    pub async fn execute(
        &self,
        requested_room: Option<&str>,
        requested_name: Option<&str>,
        sender: PusherChannel,
    ) -> Result<JoinedSession, JoinError> {
        // 1. ルーム解決（found / auto-create / global fallback）
        let summary = self.registry.resolve_room_for_join(requested_room).await;

        // 2. participant id を採番
        let participant_id = ParticipantIdFactory::generate();

        // 3. 表示名の解決（空文字は未設定扱い）
        let display_name = requested_name.and_then(|raw| DisplayName::new(raw).ok());

        // 4. live 参加者としてテーブルに登録（初期値は中立値）
        let participant = Participant::live(participant_id.clone(), display_name);
        let boredom = participant.boredom;
        self.registry
            .add_participant(&summary.code, participant)
            .await
            .map_err(|_| JoinError::RoomUnavailable(summary.code.as_str().to_string()))?;

        // 5. StatsPusher に送信チャンネルを登録
        let key = SessionKey::new(summary.code.clone(), participant_id.clone());
        self.pusher.register(key, sender).await;

        // 6. 参加者自身を含む統計のスナップショットを取得
        let room = self
            .registry
            .get_room(&summary.code)
            .await
            .ok_or_else(|| JoinError::RoomUnavailable(summary.code.as_str().to_string()))?;
        let stats = compute_stats(&room);

        tracing::info!(
            "Participant {} joined room {} ('{}')",
            participant_id,
            summary.code,
            summary.name
        );

        Ok(JoinedSession {
            participant_id,
            room_code: summary.code,
            room_name: summary.name,
            boredom,
            stats,
        })
    }
}
