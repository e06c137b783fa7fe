//! Per-connection session state machine.
//!
//! A connection moves `Connecting → Joined → Closed`, with `Closed` terminal.
//! Inbound text is only classified into commands while `Joined`, and
//! `close()` yields the session key exactly once, so cleanup cannot run
//! twice and messages arriving around the close are structurally ignored.

use crate::domain::SessionKey;
use crate::infrastructure::dto::websocket::ClientMessage;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionPhase {
    Connecting,
    Joined,
    Closed,
}

/// A recognized, well-formed inbound message
#[derive(Debug, Clone, PartialEq)]
pub enum ClientCommand {
    SetBoredom(f64),
    SetName(String),
}

#[derive(Debug)]
pub struct Session {
    phase: SessionPhase,
    key: Option<SessionKey>,
}

impl Session {
    pub fn new() -> Self {
        Self {
            phase: SessionPhase::Connecting,
            key: None,
        }
    }

    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    pub fn key(&self) -> Option<&SessionKey> {
        self.key.as_ref()
    }

    /// Transition `Connecting → Joined`. Ignored in any other phase.
    pub fn join(&mut self, key: SessionKey) {
        if self.phase == SessionPhase::Connecting {
            self.phase = SessionPhase::Joined;
            self.key = Some(key);
        }
    }

    /// Classify an inbound text frame.
    ///
    /// Returns `None` (drop silently) unless the session is `Joined` and the
    /// payload parses as a recognized message with a usable value.
    pub fn command_for(&self, text: &str) -> Option<ClientCommand> {
        if self.phase != SessionPhase::Joined {
            return None;
        }
        match serde_json::from_str::<ClientMessage>(text) {
            Ok(ClientMessage::Update { boredom }) => Some(ClientCommand::SetBoredom(boredom)),
            Ok(ClientMessage::SetName { name }) if !name.is_empty() => {
                Some(ClientCommand::SetName(name))
            }
            Ok(ClientMessage::SetName { .. }) => None,
            Err(_) => None,
        }
    }

    /// Transition to `Closed`. Yields the session key on the first call from
    /// `Joined` so the caller runs cleanup exactly once.
    pub fn close(&mut self) -> Option<SessionKey> {
        let key = match self.phase {
            SessionPhase::Joined => self.key.take(),
            SessionPhase::Connecting | SessionPhase::Closed => None,
        };
        self.phase = SessionPhase::Closed;
        key
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{ParticipantId, RoomCode};

    fn test_key() -> SessionKey {
        SessionKey::new(
            RoomCode::new("ABC123").unwrap(),
            ParticipantId::new("aaaa111122223333").unwrap(),
        )
    }

    #[test]
    fn test_session_starts_connecting() {
        // テスト項目: 新しいセッションが Connecting 状態で始まる
        // given (前提条件):

        // when (操作):
        let session = Session::new();

        // then (期待する結果):
        assert_eq!(session.phase(), SessionPhase::Connecting);
        assert!(session.key().is_none());
    }

    #[test]
    fn test_join_transitions_to_joined() {
        // テスト項目: join で Joined に遷移し、セッションキーが保持される
        // given (前提条件):
        let mut session = Session::new();

        // when (操作):
        session.join(test_key());

        // then (期待する結果):
        assert_eq!(session.phase(), SessionPhase::Joined);
        assert_eq!(session.key(), Some(&test_key()));
    }

    #[test]
    fn test_commands_are_ignored_before_join() {
        // テスト項目: Joined 以前のメッセージが無視される
        // given (前提条件):
        let session = Session::new();

        // when (操作):
        let command = session.command_for(r#"{"type":"update","boredom":80}"#);

        // then (期待する結果):
        assert_eq!(command, None);
    }

    #[test]
    fn test_update_command_while_joined() {
        // テスト項目: Joined 中の update メッセージがコマンドに分類される
        // given (前提条件):
        let mut session = Session::new();
        session.join(test_key());

        // when (操作):
        let command = session.command_for(r#"{"type":"update","boredom":80}"#);

        // then (期待する結果):
        assert_eq!(command, Some(ClientCommand::SetBoredom(80.0)));
    }

    #[test]
    fn test_set_name_command_while_joined() {
        // テスト項目: Joined 中の setName メッセージがコマンドに分類される
        // given (前提条件):
        let mut session = Session::new();
        session.join(test_key());

        // when (操作):
        let command = session.command_for(r#"{"type":"setName","name":"Alice"}"#);

        // then (期待する結果):
        assert_eq!(command, Some(ClientCommand::SetName("Alice".to_string())));
    }

    #[test]
    fn test_malformed_and_unknown_messages_are_dropped() {
        // テスト項目: 不正な形式・未知のタグ・空の名前が全て無視される
        // given (前提条件):
        let mut session = Session::new();
        session.join(test_key());

        // when (操作):
        let not_json = session.command_for("hello");
        let unknown_tag = session.command_for(r#"{"type":"selfDestruct"}"#);
        let wrong_type = session.command_for(r#"{"type":"update","boredom":"very"}"#);
        let empty_name = session.command_for(r#"{"type":"setName","name":""}"#);

        // then (期待する結果):
        assert_eq!(not_json, None);
        assert_eq!(unknown_tag, None);
        assert_eq!(wrong_type, None);
        assert_eq!(empty_name, None);
    }

    #[test]
    fn test_close_yields_key_exactly_once() {
        // テスト項目: close が最初の 1 回だけセッションキーを返す（冪等性）
        // given (前提条件):
        let mut session = Session::new();
        session.join(test_key());

        // when (操作):
        let first = session.close();
        let second = session.close();

        // then (期待する結果):
        assert_eq!(first, Some(test_key()));
        assert_eq!(second, None);
        assert_eq!(session.phase(), SessionPhase::Closed);
    }

    #[test]
    fn test_close_before_join_yields_nothing() {
        // テスト項目: Joined に達していないセッションの close が何も返さない
        // given (前提条件):
        let mut session = Session::new();

        // when (操作):
        let key = session.close();

        // then (期待する結果):
        assert_eq!(key, None);
        assert_eq!(session.phase(), SessionPhase::Closed);
    }

    #[test]
    fn test_messages_after_close_are_ignored() {
        // テスト項目: Closed 遷移後のメッセージが無視される
        // given (前提条件):
        let mut session = Session::new();
        session.join(test_key());
        session.close();

        // when (操作):
        let command = session.command_for(r#"{"type":"update","boredom":80}"#);

        // then (期待する結果):
        assert_eq!(command, None);
    }

    #[test]
    fn test_join_after_close_is_ignored() {
        // テスト項目: Closed は終端状態であり、join で再開しない
        // given (前提条件):
        let mut session = Session::new();
        session.join(test_key());
        session.close();

        // when (操作):
        session.join(test_key());

        // then (期待する結果):
        assert_eq!(session.phase(), SessionPhase::Closed);
        assert!(session.key().is_none());
    }
}
