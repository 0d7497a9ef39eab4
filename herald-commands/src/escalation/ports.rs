//! Types and collaborator traits the request flow is written against.
//!
//! The Discord implementations live in [`super::discord`]; tests use
//! in-memory fakes.

use async_trait::async_trait;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UserRef {
    pub id: u64,
    pub display_name: String,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ChatKind {
    /// Generic group without a public handle.
    Group,
    /// Public chat whose messages can be linked to directly.
    Channel,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ChatInfo {
    pub id: u64,
    pub title: String,
    pub handle: Option<String>,
    pub kind: ChatKind,
}

impl ChatInfo {
    /// The public handle, only for channel-style chats.
    pub fn link_handle(&self) -> Option<&str> {
        match self.kind {
            ChatKind::Channel => self.handle.as_deref().filter(|handle| !handle.is_empty()),
            ChatKind::Group => None,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MessageRef {
    pub chat_id: u64,
    pub channel_id: u64,
    pub message_id: u64,
    pub author: UserRef,
    pub content: String,
    pub attachment_urls: Vec<String>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AdminMember {
    pub user_id: u64,
    pub is_bot: bool,
}

/// Result of a single best-effort delivery.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DeliveryOutcome {
    Delivered,
    /// The recipient blocked the bot, closed DMs, or no longer exists.
    Unreachable,
    /// The platform refused the payload (rate limit, malformed, transient error).
    Rejected,
}

impl DeliveryOutcome {
    pub fn is_delivered(self) -> bool {
        matches!(self, Self::Delivered)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TriggerKind {
    /// `!request [reason]`
    Command,
    /// `@admin` / `@admins` anywhere in a message.
    Mention,
}

impl TriggerKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Command => "command",
            Self::Mention => "mention",
        }
    }
}

/// One request, built by the host from the triggering message.
#[derive(Clone, Debug)]
pub struct RequestEvent {
    pub trigger: TriggerKind,
    pub reporter: UserRef,
    pub chat: ChatInfo,
    /// The message that triggered the request.
    pub message: MessageRef,
    /// The message being flagged, when the trigger was a reply.
    pub replied_to: Option<MessageRef>,
    pub bot_user_id: u64,
    /// The trigger carried free text beyond the command or keyword.
    pub has_reason: bool,
}

#[async_trait]
pub trait SettingsStore: Send + Sync {
    async fn chat_flag(&self, chat_id: u64) -> anyhow::Result<bool>;
    async fn set_chat_flag(&self, chat_id: u64, enabled: bool) -> anyhow::Result<()>;
    async fn user_flag(&self, user_id: u64) -> anyhow::Result<bool>;
    async fn set_user_flag(&self, user_id: u64, enabled: bool) -> anyhow::Result<()>;
    async fn migrate_chat_flag(&self, old_chat_id: u64, new_chat_id: u64) -> anyhow::Result<()>;
}

#[async_trait]
pub trait AdminDirectory: Send + Sync {
    async fn list_admins(&self, chat_id: u64) -> anyhow::Result<Vec<AdminMember>>;
}

#[async_trait]
pub trait MessageSender: Send + Sync {
    async fn send_direct(&self, user_id: u64, text: &str, formatted: bool) -> DeliveryOutcome;
    async fn forward_message(&self, message: &MessageRef, to_user_id: u64) -> DeliveryOutcome;
    async fn reply(&self, to: &MessageRef, text: &str) -> DeliveryOutcome;
}
