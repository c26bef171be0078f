use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub type Err = anyhow::Error;
pub type Res<T> = Result<T, Err>;
pub type Void = Res<()>;

/// The kind of membership change recorded in the event log.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LogEvent {
    UserJoin,
    UserLeave,
}

/// A single membership change, as observed by this process.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogEntry {
    pub event: LogEvent,
    pub user_id: u64,
    pub username: String,
    pub discriminator: u16,
    pub time: DateTime<Utc>,
}

impl LogEntry {
    /// Stamps a membership event with the current UTC time.
    pub fn now(event: LogEvent, member: &MemberEvent) -> Self {
        Self {
            event,
            user_id: member.user_id,
            username: member.username.clone(),
            discriminator: member.discriminator,
            time: Utc::now(),
        }
    }
}

/// A user joining or leaving the guild.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemberEvent {
    pub user_id: u64,
    pub username: String,
    /// Legacy discriminator; `0` for users on the new username scheme.
    pub discriminator: u16,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageKind {
    /// Sent by a user (or bot) account: plain messages, replies, app commands.
    User,
    /// Generated by the platform: joins, pins, boosts, etc.
    System,
}

/// A chat message, stripped down to what the bot acts on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatMessage {
    pub id: u64,
    pub channel_id: u64,
    pub guild_id: Option<u64>,
    pub author_id: u64,
    pub author_name: String,
    pub content: String,
    pub kind: MessageKind,
}

impl ChatMessage {
    /// Returns the byte offset just past `prefix` if the message starts with it.
    pub fn char_prefix(&self, prefix: char) -> Option<usize> {
        self.content.starts_with(prefix).then(|| prefix.len_utf8())
    }
}

/// Everything the gateway publishes to the dispatcher.
#[derive(Debug, Clone)]
pub enum BotEvent {
    Log(String),
    MemberLeft(MemberEvent),
    MemberJoined(MemberEvent),
    MessageReceived(ChatMessage),
}

#[cfg(test)]
mod tests {
    use super::*;

    fn message(content: &str) -> ChatMessage {
        ChatMessage {
            id: 1,
            channel_id: 2,
            guild_id: Some(3),
            author_id: 4,
            author_name: "someone".to_string(),
            content: content.to_string(),
            kind: MessageKind::User,
        }
    }

    #[test]
    fn char_prefix_matches_only_leading_character() {
        assert_eq!(message("-ping").char_prefix('-'), Some(1));
        assert_eq!(message("-").char_prefix('-'), Some(1));
        assert_eq!(message("ping -x").char_prefix('-'), None);
        assert_eq!(message(" -ping").char_prefix('-'), None);
        assert_eq!(message("").char_prefix('-'), None);
    }

    #[test]
    fn char_prefix_offset_is_in_bytes() {
        assert_eq!(message("§help").char_prefix('§'), Some(2));
    }

    #[test]
    fn log_entry_copies_member_fields() {
        let member = MemberEvent { user_id: 42, username: "alice".to_string(), discriminator: 1234 };

        let before = Utc::now();
        let entry = LogEntry::now(LogEvent::UserJoin, &member);

        assert_eq!(entry.event, LogEvent::UserJoin);
        assert_eq!(entry.user_id, 42);
        assert_eq!(entry.username, "alice");
        assert_eq!(entry.discriminator, 1234);
        assert!(entry.time >= before);
    }

    #[test]
    fn log_entry_serializes_event_kind_by_name() {
        let member = MemberEvent { user_id: 7, username: "bob".to_string(), discriminator: 0 };
        let entry = LogEntry::now(LogEvent::UserLeave, &member);

        let value = serde_json::to_value(&entry).unwrap();

        assert_eq!(value["event"], "UserLeave");
        assert_eq!(value["user_id"], 7);
    }
}
