//! InMemory Room Registry 実装
//!
//! ドメイン層が定義する RoomRegistry trait の具体的な実装。
//! HashMap をインメモリ DB として使用します。
//!
//! 全てのルームとその参加者テーブルを単一の Mutex で保護します。
//! ロックは 1 回の read-modify-write ステップの間だけ保持され、
//! ネットワーク送信をまたいで保持されることはありません。

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::domain::{
    BoredomLevel, DisplayName, Participant, ParticipantId, RegistryError, Room, RoomCode,
    RoomCodeFactory, RoomName, RoomRegistry, RoomSummary, Timestamp, drift_step,
};
use taikutsu_shared::time::Clock;

/// Attempts before giving up on allocating an unused room code. With a
/// 16.7M code space this bound is never reached under realistic load.
const CREATE_ATTEMPTS: u32 = 8;

/// インメモリ Room Registry 実装
///
/// 構築時にグローバルルームを登録します。グローバルルームはプロセスの
/// 生存期間中、常に存在します。
pub struct InMemoryRoomRegistry {
    /// 全ルームのテーブル（グローバルルームを含む）
    rooms: Mutex<HashMap<RoomCode, Room>>,
    /// 時刻の抽象化（テストでは FixedClock を注入）
    clock: Arc<dyn Clock>,
}

impl InMemoryRoomRegistry {
    /// 新しい InMemoryRoomRegistry を作成し、グローバルルームを登録する
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        let created_at = Timestamp::new(clock.now_millis());
        let global = Room::global(RoomName::new("Global Room"), created_at);
        let mut rooms = HashMap::new();
        rooms.insert(global.code.clone(), global);
        Self {
            rooms: Mutex::new(rooms),
            clock,
        }
    }

    fn now(&self) -> Timestamp {
        Timestamp::new(self.clock.now_millis())
    }
}

#[async_trait]
impl RoomRegistry for InMemoryRoomRegistry {
    async fn create_room(&self, name: Option<String>) -> Result<RoomSummary, RegistryError> {
        let mut rooms = self.rooms.lock().await;
        for _ in 0..CREATE_ATTEMPTS {
            let code = RoomCodeFactory::generate();
            if rooms.contains_key(&code) {
                continue;
            }
            let resolved = RoomName::resolve(name.as_deref(), &code);
            rooms.insert(
                code.clone(),
                Room::new(code.clone(), resolved.clone(), self.now()),
            );
            tracing::info!("Room {} created ('{}')", code, resolved);
            return Ok(RoomSummary {
                code,
                name: resolved,
            });
        }
        Err(RegistryError::CodeSpaceExhausted(CREATE_ATTEMPTS))
    }

    async fn resolve_room_for_join(&self, requested: Option<&str>) -> RoomSummary {
        let mut rooms = self.rooms.lock().await;
        match requested.and_then(|raw| RoomCode::new(raw).ok()) {
            // 整形式のコード: 既存ならそのルーム、未登録ならその場で作成
            Some(code) => {
                if let Some(room) = rooms.get(&code) {
                    RoomSummary {
                        code: room.code.clone(),
                        name: room.name.clone(),
                    }
                } else {
                    let name = RoomName::resolve(None, &code);
                    rooms.insert(
                        code.clone(),
                        Room::new(code.clone(), name.clone(), self.now()),
                    );
                    tracing::info!("Room {} auto-created on join", code);
                    RoomSummary { code, name }
                }
            }
            // 不正なコードまたは未指定: グローバルルームにフォールバック
            None => {
                let global = rooms
                    .get(&RoomCode::global())
                    .expect("global room is seeded at startup and never evicted");
                RoomSummary {
                    code: global.code.clone(),
                    name: global.name.clone(),
                }
            }
        }
    }

    async fn get_room(&self, code: &RoomCode) -> Option<Room> {
        let rooms = self.rooms.lock().await;
        rooms.get(code).cloned()
    }

    async fn room_count(&self) -> usize {
        let rooms = self.rooms.lock().await;
        rooms.len()
    }

    async fn add_participant(
        &self,
        code: &RoomCode,
        participant: Participant,
    ) -> Result<(), RegistryError> {
        let mut rooms = self.rooms.lock().await;
        let room = rooms
            .get_mut(code)
            .ok_or_else(|| RegistryError::RoomNotFound(code.as_str().to_string()))?;
        room.add_participant(participant);
        Ok(())
    }

    async fn remove_participant(&self, code: &RoomCode, id: &ParticipantId) -> bool {
        let mut rooms = self.rooms.lock().await;
        match rooms.get_mut(code) {
            Some(room) => room.remove_participant(id),
            None => false,
        }
    }

    async fn set_boredom(
        &self,
        code: &RoomCode,
        id: &ParticipantId,
        boredom: BoredomLevel,
    ) -> bool {
        let mut rooms = self.rooms.lock().await;
        match rooms.get_mut(code) {
            Some(room) => room.set_boredom(id, boredom),
            None => false,
        }
    }

    async fn set_display_name(
        &self,
        code: &RoomCode,
        id: &ParticipantId,
        name: DisplayName,
    ) -> bool {
        let mut rooms = self.rooms.lock().await;
        match rooms.get_mut(code) {
            Some(room) => room.set_display_name(id, name),
            None => false,
        }
    }

    async fn apply_bot_drift(
        &self,
        code: &RoomCode,
        id: &ParticipantId,
        target: f64,
        noise: f64,
    ) -> bool {
        let mut rooms = self.rooms.lock().await;
        let Some(room) = rooms.get_mut(code) else {
            return false;
        };
        let Some(participant) = room.participants.get_mut(id) else {
            return false;
        };
        let next = drift_step(participant.boredom.value(), target, noise);
        participant.boredom = BoredomLevel::new(next);
        true
    }

    async fn evict_idle_rooms(&self, idle_threshold_millis: i64) -> Vec<RoomCode> {
        let now = self.now();
        let mut rooms = self.rooms.lock().await;
        let expired: Vec<RoomCode> = rooms
            .values()
            .filter(|room| {
                !room.is_global
                    && !room.has_live_participants()
                    && room.age_millis(now) > idle_threshold_millis
            })
            .map(|room| room.code.clone())
            .collect();
        for code in &expired {
            rooms.remove(code);
            tracing::info!("Room {} evicted after idle period", code);
        }
        expired
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicI64, Ordering};

    use super::*;
    use taikutsu_shared::time::FixedClock;

    /// Test clock whose value can be advanced between operations
    struct SteppingClock {
        now: AtomicI64,
    }

    impl SteppingClock {
        fn new(start: i64) -> Self {
            Self {
                now: AtomicI64::new(start),
            }
        }

        fn advance(&self, millis: i64) {
            self.now.fetch_add(millis, Ordering::SeqCst);
        }
    }

    impl Clock for SteppingClock {
        fn now_millis(&self) -> i64 {
            self.now.load(Ordering::SeqCst)
        }
    }

    fn create_test_registry() -> InMemoryRoomRegistry {
        InMemoryRoomRegistry::new(Arc::new(FixedClock::new(1_000)))
    }

    fn live_participant(id: &str) -> Participant {
        Participant::live(ParticipantId::new(id).unwrap(), None)
    }

    #[tokio::test]
    async fn test_global_room_is_seeded_at_construction() {
        // テスト項目: 構築直後にグローバルルームが登録されている
        // given (前提条件):
        let registry = create_test_registry();

        // when (操作):
        let global = registry.get_room(&RoomCode::global()).await;

        // then (期待する結果):
        assert!(global.is_some());
        let global = global.unwrap();
        assert!(global.is_global);
        assert_eq!(registry.room_count().await, 1);
    }

    #[tokio::test]
    async fn test_create_room_with_name() {
        // テスト項目: 名前付きでルームを作成すると、その名前で解決される
        // given (前提条件):
        let registry = create_test_registry();

        // when (操作):
        let summary = registry
            .create_room(Some("Team Sync".to_string()))
            .await
            .unwrap();

        // then (期待する結果):
        assert_eq!(summary.code.as_str().len(), 6);
        assert_eq!(summary.name.as_str(), "Team Sync");
        assert!(registry.get_room(&summary.code).await.is_some());
        assert_eq!(registry.room_count().await, 2);
    }

    #[tokio::test]
    async fn test_create_room_without_name_uses_default() {
        // テスト項目: 名前なしで作成したルームがコード由来のデフォルト名を持つ
        // given (前提条件):
        let registry = create_test_registry();

        // when (操作):
        let summary = registry.create_room(None).await.unwrap();

        // then (期待する結果):
        assert_eq!(
            summary.name.as_str(),
            format!("Room {}", summary.code.as_str())
        );
    }

    #[tokio::test]
    async fn test_resolve_existing_room() {
        // テスト項目: 既存ルームのコードを指定すると、そのルームに解決される
        // given (前提条件):
        let registry = create_test_registry();
        let created = registry
            .create_room(Some("Team Sync".to_string()))
            .await
            .unwrap();

        // when (操作):
        let resolved = registry
            .resolve_room_for_join(Some(created.code.as_str()))
            .await;

        // then (期待する結果):
        assert_eq!(resolved, created);
        assert_eq!(registry.room_count().await, 2); // no new room
    }

    #[tokio::test]
    async fn test_resolve_well_formed_unknown_code_creates_room() {
        // テスト項目: 整形式だが未登録のコードを指定すると、その場でルームが作成される
        // given (前提条件):
        let registry = create_test_registry();

        // when (操作):
        let resolved = registry.resolve_room_for_join(Some("ZZ9999")).await;

        // then (期待する結果):
        assert_eq!(resolved.code.as_str(), "ZZ9999");
        assert_eq!(resolved.name.as_str(), "Room ZZ9999");
        assert!(registry.get_room(&resolved.code).await.is_some());
    }

    #[tokio::test]
    async fn test_resolve_invalid_code_falls_back_to_global() {
        // テスト項目: 不正なコードまたは未指定がグローバルルームにフォールバックする
        // given (前提条件):
        let registry = create_test_registry();

        // when (操作):
        let malformed = registry.resolve_room_for_join(Some("not-a-code")).await;
        let too_short = registry.resolve_room_for_join(Some("AB1")).await;
        let absent = registry.resolve_room_for_join(None).await;

        // then (期待する結果): 新しいルームは作られない
        assert!(malformed.code.is_global());
        assert!(too_short.code.is_global());
        assert!(absent.code.is_global());
        assert_eq!(registry.room_count().await, 1);
    }

    #[tokio::test]
    async fn test_add_and_remove_participant() {
        // テスト項目: 参加者の追加・削除がルームのテーブルに反映される
        // given (前提条件):
        let registry = create_test_registry();
        let summary = registry.create_room(None).await.unwrap();
        let participant = live_participant("aaaa111122223333");
        let id = participant.id.clone();

        // when (操作):
        registry
            .add_participant(&summary.code, participant)
            .await
            .unwrap();

        // then (期待する結果):
        let room = registry.get_room(&summary.code).await.unwrap();
        assert_eq!(room.participants.len(), 1);

        assert!(registry.remove_participant(&summary.code, &id).await);
        // 2 回目の削除は false（冪等）
        assert!(!registry.remove_participant(&summary.code, &id).await);
    }

    #[tokio::test]
    async fn test_add_participant_to_unknown_room_fails() {
        // テスト項目: 存在しないルームへの参加者追加がエラーになる
        // given (前提条件):
        let registry = create_test_registry();
        let unknown = RoomCode::new("FFFFFF").unwrap();

        // when (操作):
        let result = registry
            .add_participant(&unknown, live_participant("aaaa111122223333"))
            .await;

        // then (期待する結果):
        assert_eq!(
            result,
            Err(RegistryError::RoomNotFound("FFFFFF".to_string()))
        );
    }

    #[tokio::test]
    async fn test_apply_bot_drift_moves_value_toward_target() {
        // テスト項目: bot drift が値を目標方向に動かす
        // given (前提条件):
        let registry = create_test_registry();
        let bot_id = ParticipantId::new("bot-lurker").unwrap();
        registry
            .add_participant(
                &RoomCode::global(),
                Participant::bot(
                    bot_id.clone(),
                    DisplayName::new("Lurker").unwrap(),
                    BoredomLevel::new(50.0),
                ),
            )
            .await
            .unwrap();

        // when (操作):
        let applied = registry
            .apply_bot_drift(&RoomCode::global(), &bot_id, 90.0, 0.0)
            .await;

        // then (期待する結果): 50 + (90 - 50) * 0.1 = 54
        assert!(applied);
        let room = registry.get_room(&RoomCode::global()).await.unwrap();
        let bot = room.participants.get(&bot_id).unwrap();
        assert!((bot.boredom.value() - 54.0).abs() < f64::EPSILON);
    }

    #[tokio::test]
    async fn test_apply_bot_drift_clamps_to_range() {
        // テスト項目: drift 適用後の値が [0, 100] にクランプされる
        // given (前提条件):
        let registry = create_test_registry();
        let bot_id = ParticipantId::new("bot-lurker").unwrap();
        registry
            .add_participant(
                &RoomCode::global(),
                Participant::bot(
                    bot_id.clone(),
                    DisplayName::new("Lurker").unwrap(),
                    BoredomLevel::new(99.0),
                ),
            )
            .await
            .unwrap();

        // when (操作): 大きなノイズで上限を超えようとする
        registry
            .apply_bot_drift(&RoomCode::global(), &bot_id, 100.0, 50.0)
            .await;

        // then (期待する結果):
        let room = registry.get_room(&RoomCode::global()).await.unwrap();
        assert_eq!(room.participants.get(&bot_id).unwrap().boredom.value(), 100.0);
    }

    #[tokio::test]
    async fn test_apply_bot_drift_missing_entry_is_noop() {
        // テスト項目: ルームまたは参加者が存在しない場合、drift が no-op になる
        // given (前提条件):
        let registry = create_test_registry();
        let unknown_room = RoomCode::new("FFFFFF").unwrap();
        let unknown_id = ParticipantId::new("bot-ghost").unwrap();

        // when (操作):
        let missing_room = registry
            .apply_bot_drift(&unknown_room, &unknown_id, 50.0, 0.0)
            .await;
        let missing_participant = registry
            .apply_bot_drift(&RoomCode::global(), &unknown_id, 50.0, 0.0)
            .await;

        // then (期待する結果):
        assert!(!missing_room);
        assert!(!missing_participant);
    }

    #[tokio::test]
    async fn test_evict_idle_rooms_removes_old_empty_rooms() {
        // テスト項目: live 参加者 0 人かつ閾値超過の非グローバルルームが削除される
        // given (前提条件):
        let clock = Arc::new(SteppingClock::new(0));
        let registry = InMemoryRoomRegistry::new(clock.clone());
        let summary = registry.create_room(None).await.unwrap();

        // when (操作): 閾値を超えて時間を進めてから掃除する
        clock.advance(3_600_001);
        let evicted = registry.evict_idle_rooms(3_600_000).await;

        // then (期待する結果):
        assert_eq!(evicted, vec![summary.code.clone()]);
        assert!(registry.get_room(&summary.code).await.is_none());
    }

    #[tokio::test]
    async fn test_evict_spares_young_and_occupied_rooms() {
        // テスト項目: 閾値未満のルームと live 参加者のいるルームは削除されない
        // given (前提条件):
        let clock = Arc::new(SteppingClock::new(0));
        let registry = InMemoryRoomRegistry::new(clock.clone());
        let stale = registry.create_room(None).await.unwrap();
        let occupied = registry.create_room(None).await.unwrap();
        registry
            .add_participant(&occupied.code, live_participant("aaaa111122223333"))
            .await
            .unwrap();

        clock.advance(3_600_001);
        let young = registry.create_room(None).await.unwrap(); // age 0 from here

        // when (操作):
        let evicted = registry.evict_idle_rooms(3_600_000).await;

        // then (期待する結果): stale のみ削除される
        assert_eq!(evicted, vec![stale.code.clone()]);
        assert!(registry.get_room(&occupied.code).await.is_some());
        assert!(registry.get_room(&young.code).await.is_some());
    }

    #[tokio::test]
    async fn test_evict_never_removes_global_room() {
        // テスト項目: グローバルルームは経過時間や参加者数に関係なく削除されない
        // given (前提条件):
        let clock = Arc::new(SteppingClock::new(0));
        let registry = InMemoryRoomRegistry::new(clock.clone());
        clock.advance(1_000_000_000);

        // when (操作):
        let evicted = registry.evict_idle_rooms(0).await;

        // then (期待する結果):
        assert!(evicted.is_empty());
        assert!(registry.get_room(&RoomCode::global()).await.is_some());
    }
}
