//! Room Registry trait 定義
//!
//! ドメイン層が必要とするルーム管理のインターフェースを定義します。
//! 具体的な実装は Infrastructure 層が提供します（依存性の逆転）。

use async_trait::async_trait;

use super::entity::{Participant, Room};
use super::error::RegistryError;
use super::value_object::{BoredomLevel, DisplayName, ParticipantId, RoomCode, RoomName};

/// A room's identity as returned from creation and join resolution
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoomSummary {
    pub code: RoomCode,
    pub name: RoomName,
}

/// Room Registry trait
///
/// ルームの作成・解決・参加者テーブルの変更はすべてこの trait を通る。
/// 各操作はテーブルに対する 1 回の完結した read-modify-write ステップで
/// あり、実装はそれが他のステップと交錯しないことを保証する。
#[async_trait]
pub trait RoomRegistry: Send + Sync {
    /// 新しいルームを作成し、コードと解決済みの表示名を返す
    async fn create_room(&self, name: Option<String>) -> Result<RoomSummary, RegistryError>;

    /// 接続時のルーム解決。3 分岐の決定関数:
    /// 存在するコード → そのルーム / 整形式だが未登録のコード → その場で作成 /
    /// 不正なコードまたは未指定 → グローバルルームにフォールバック。
    /// この解決は決して失敗しない。
    async fn resolve_room_for_join(&self, requested: Option<&str>) -> RoomSummary;

    /// ルームのスナップショットを取得
    async fn get_room(&self, code: &RoomCode) -> Option<Room>;

    /// 登録されているルーム数を取得
    async fn room_count(&self) -> usize;

    /// 参加者をルームに追加
    async fn add_participant(
        &self,
        code: &RoomCode,
        participant: Participant,
    ) -> Result<(), RegistryError>;

    /// 参加者をルームから削除。既に存在しない場合は false（冪等）
    async fn remove_participant(&self, code: &RoomCode, id: &ParticipantId) -> bool;

    /// 参加者の値を更新
    async fn set_boredom(&self, code: &RoomCode, id: &ParticipantId, boredom: BoredomLevel)
    -> bool;

    /// 参加者の表示名を更新
    async fn set_display_name(&self, code: &RoomCode, id: &ParticipantId, name: DisplayName)
    -> bool;

    /// Bot の 1 tick 分の drift をアトミックに適用する。
    /// ルームまたは参加者が存在しない場合は何もせず false を返す。
    async fn apply_bot_drift(
        &self,
        code: &RoomCode,
        id: &ParticipantId,
        target: f64,
        noise: f64,
    ) -> bool;

    /// live 参加者が 0 人で、作成からの経過時間が閾値を超えた非グローバル
    /// ルームを削除し、削除したコードを返す。グローバルルームは決して
    /// 削除されない。
    async fn evict_idle_rooms(&self, idle_threshold_millis: i64) -> Vec<RoomCode>;
}
