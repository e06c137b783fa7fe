//! Domain entities: rooms and their participants.

use std::collections::HashMap;

use super::value_object::{BoredomLevel, DisplayName, ParticipantId, RoomCode, RoomName, Timestamp};

/// One contributor to a room's aggregate: a live (connection-backed)
/// participant or an automated one driven by a timer.
#[derive(Debug, Clone, PartialEq)]
pub struct Participant {
    pub id: ParticipantId,
    pub boredom: BoredomLevel,
    pub display_name: Option<DisplayName>,
    pub is_bot: bool,
}

impl Participant {
    /// A freshly joined live participant, starting at the neutral value
    pub fn live(id: ParticipantId, display_name: Option<DisplayName>) -> Self {
        Self {
            id,
            boredom: BoredomLevel::neutral(),
            display_name,
            is_bot: false,
        }
    }

    /// An automated participant seeded from a profile
    pub fn bot(id: ParticipantId, display_name: DisplayName, boredom: BoredomLevel) -> Self {
        Self {
            id,
            boredom,
            display_name: Some(display_name),
            is_bot: true,
        }
    }
}

/// An isolated namespace of participants whose values are aggregated together.
///
/// The registry exclusively owns all rooms; a room exclusively owns its
/// participant table.
#[derive(Debug, Clone, PartialEq)]
pub struct Room {
    pub code: RoomCode,
    pub name: RoomName,
    pub created_at: Timestamp,
    pub is_global: bool,
    pub participants: HashMap<ParticipantId, Participant>,
}

impl Room {
    pub fn new(code: RoomCode, name: RoomName, created_at: Timestamp) -> Self {
        Self {
            code,
            name,
            created_at,
            is_global: false,
            participants: HashMap::new(),
        }
    }

    /// The permanent global room, exempt from expiry
    pub fn global(name: RoomName, created_at: Timestamp) -> Self {
        Self {
            code: RoomCode::global(),
            name,
            created_at,
            is_global: true,
            participants: HashMap::new(),
        }
    }

    pub fn add_participant(&mut self, participant: Participant) {
        self.participants.insert(participant.id.clone(), participant);
    }

    /// Remove a participant entry. Returns false if it was already absent.
    pub fn remove_participant(&mut self, id: &ParticipantId) -> bool {
        self.participants.remove(id).is_some()
    }

    pub fn set_boredom(&mut self, id: &ParticipantId, boredom: BoredomLevel) -> bool {
        match self.participants.get_mut(id) {
            Some(participant) => {
                participant.boredom = boredom;
                true
            }
            None => false,
        }
    }

    pub fn set_display_name(&mut self, id: &ParticipantId, name: DisplayName) -> bool {
        match self.participants.get_mut(id) {
            Some(participant) => {
                participant.display_name = Some(name);
                true
            }
            None => false,
        }
    }

    /// Identifiers of all connection-backed participants
    pub fn live_participant_ids(&self) -> Vec<ParticipantId> {
        self.participants
            .values()
            .filter(|p| !p.is_bot)
            .map(|p| p.id.clone())
            .collect()
    }

    pub fn live_participant_count(&self) -> usize {
        self.participants.values().filter(|p| !p.is_bot).count()
    }

    pub fn has_live_participants(&self) -> bool {
        self.participants.values().any(|p| !p.is_bot)
    }

    pub fn age_millis(&self, now: Timestamp) -> i64 {
        now.value() - self.created_at.value()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_room() -> Room {
        Room::new(
            RoomCode::new("ABC123").unwrap(),
            RoomName::new("Test Room"),
            Timestamp::new(1_000),
        )
    }

    fn live_participant(id: &str) -> Participant {
        Participant::live(ParticipantId::new(id).unwrap(), None)
    }

    fn bot_participant(id: &str) -> Participant {
        Participant::bot(
            ParticipantId::new(id).unwrap(),
            DisplayName::new("Bot").unwrap(),
            BoredomLevel::new(70.0),
        )
    }

    #[test]
    fn test_live_participant_starts_at_neutral_value() {
        // テスト項目: 接続直後の参加者が中立値 50 で初期化される
        // given (前提条件):

        // when (操作):
        let participant = live_participant("0123456789abcdef");

        // then (期待する結果):
        assert_eq!(participant.boredom.rounded(), 50);
        assert!(!participant.is_bot);
        assert!(participant.display_name.is_none());
    }

    #[test]
    fn test_add_and_remove_participant() {
        // テスト項目: 参加者の追加と削除がテーブルに反映される
        // given (前提条件):
        let mut room = test_room();
        let participant = live_participant("0123456789abcdef");
        let id = participant.id.clone();

        // when (操作):
        room.add_participant(participant);

        // then (期待する結果):
        assert_eq!(room.participants.len(), 1);
        assert!(room.remove_participant(&id));
        assert_eq!(room.participants.len(), 0);
    }

    #[test]
    fn test_remove_absent_participant_returns_false() {
        // テスト項目: 存在しない参加者の削除が false を返す（冪等性）
        // given (前提条件):
        let mut room = test_room();

        // when (操作):
        let removed = room.remove_participant(&ParticipantId::new("nobody").unwrap());

        // then (期待する結果):
        assert!(!removed);
    }

    #[test]
    fn test_live_counts_exclude_bots() {
        // テスト項目: live 参加者のカウントに bot が含まれない
        // given (前提条件):
        let mut room = test_room();
        room.add_participant(live_participant("aaaa111122223333"));
        room.add_participant(bot_participant("bot-one"));
        room.add_participant(bot_participant("bot-two"));

        // when (操作):
        let live_count = room.live_participant_count();
        let live_ids = room.live_participant_ids();

        // then (期待する結果):
        assert_eq!(live_count, 1);
        assert_eq!(live_ids.len(), 1);
        assert_eq!(live_ids[0].as_str(), "aaaa111122223333");
        assert!(room.has_live_participants());
    }

    #[test]
    fn test_bot_only_room_has_no_live_participants() {
        // テスト項目: bot のみのルームは live 参加者を持たない
        // given (前提条件):
        let mut room = test_room();
        room.add_participant(bot_participant("bot-one"));

        // when (操作):

        // then (期待する結果):
        assert!(!room.has_live_participants());
        assert_eq!(room.live_participant_count(), 0);
    }

    #[test]
    fn test_set_boredom_and_display_name() {
        // テスト項目: 値と表示名の更新が参加者エントリに反映される
        // given (前提条件):
        let mut room = test_room();
        let participant = live_participant("0123456789abcdef");
        let id = participant.id.clone();
        room.add_participant(participant);

        // when (操作):
        let value_updated = room.set_boredom(&id, BoredomLevel::from_client(80.0));
        let name_updated = room.set_display_name(&id, DisplayName::new("Alice").unwrap());

        // then (期待する結果):
        assert!(value_updated);
        assert!(name_updated);
        let entry = room.participants.get(&id).unwrap();
        assert_eq!(entry.boredom.rounded(), 80);
        assert_eq!(entry.display_name.as_ref().unwrap().as_str(), "Alice");
    }

    #[test]
    fn test_updates_on_absent_participant_return_false() {
        // テスト項目: 存在しない参加者への更新が false を返す
        // given (前提条件):
        let mut room = test_room();
        let id = ParticipantId::new("nobody").unwrap();

        // when (操作):
        let value_updated = room.set_boredom(&id, BoredomLevel::neutral());
        let name_updated = room.set_display_name(&id, DisplayName::new("x").unwrap());

        // then (期待する結果):
        assert!(!value_updated);
        assert!(!name_updated);
    }

    #[test]
    fn test_room_age() {
        // テスト項目: ルームの経過時間が作成時刻との差で計算される
        // given (前提条件):
        let room = test_room(); // created_at = 1_000

        // when (操作):
        let age = room.age_millis(Timestamp::new(61_000));

        // then (期待する結果):
        assert_eq!(age, 60_000);
    }
}
