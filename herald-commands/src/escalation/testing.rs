//! In-memory fakes of the request collaborators.

use std::collections::HashMap;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;

use herald_database::impls::request_settings::DEFAULT_SHOULD_REQUEST;

use super::ports::{
    AdminDirectory, AdminMember, ChatInfo, DeliveryOutcome, MessageRef, MessageSender,
    RequestEvent, SettingsStore, TriggerKind, UserRef,
};

#[derive(Default)]
pub struct MemoryStore {
    chats: Mutex<HashMap<u64, bool>>,
    users: Mutex<HashMap<u64, bool>>,
    fail: bool,
}

impl MemoryStore {
    pub fn failing(mut self) -> Self {
        self.fail = true;
        self
    }

    pub fn stored_chat(&self, chat_id: u64) -> Option<bool> {
        self.chats.lock().unwrap().get(&chat_id).copied()
    }

    fn check(&self) -> anyhow::Result<()> {
        if self.fail {
            anyhow::bail!("settings store unavailable");
        }
        Ok(())
    }
}

#[async_trait]
impl SettingsStore for MemoryStore {
    async fn chat_flag(&self, chat_id: u64) -> anyhow::Result<bool> {
        self.check()?;
        Ok(self.stored_chat(chat_id).unwrap_or(DEFAULT_SHOULD_REQUEST))
    }

    async fn set_chat_flag(&self, chat_id: u64, enabled: bool) -> anyhow::Result<()> {
        self.check()?;
        self.chats.lock().unwrap().insert(chat_id, enabled);
        Ok(())
    }

    async fn user_flag(&self, user_id: u64) -> anyhow::Result<bool> {
        self.check()?;
        Ok(self
            .users
            .lock()
            .unwrap()
            .get(&user_id)
            .copied()
            .unwrap_or(DEFAULT_SHOULD_REQUEST))
    }

    async fn set_user_flag(&self, user_id: u64, enabled: bool) -> anyhow::Result<()> {
        self.check()?;
        self.users.lock().unwrap().insert(user_id, enabled);
        Ok(())
    }

    async fn migrate_chat_flag(&self, old_chat_id: u64, new_chat_id: u64) -> anyhow::Result<()> {
        self.check()?;
        let mut chats = self.chats.lock().unwrap();
        if let Some(value) = chats.remove(&old_chat_id) {
            chats.insert(new_chat_id, value);
        }
        Ok(())
    }
}

pub struct FakeDirectory {
    admins: Vec<AdminMember>,
    lookups: AtomicUsize,
    fail: bool,
}

impl FakeDirectory {
    pub fn new(admins: Vec<AdminMember>) -> Self {
        Self {
            admins,
            lookups: AtomicUsize::new(0),
            fail: false,
        }
    }

    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::new(Vec::new())
        }
    }

    pub fn lookups(&self) -> usize {
        self.lookups.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl AdminDirectory for FakeDirectory {
    async fn list_admins(&self, _chat_id: u64) -> anyhow::Result<Vec<AdminMember>> {
        self.lookups.fetch_add(1, Ordering::SeqCst);
        if self.fail {
            anyhow::bail!("admin list unavailable");
        }
        Ok(self.admins.clone())
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Sent {
    Direct { user_id: u64, text: String },
    Forward { message_id: u64, user_id: u64 },
    Reply(String),
}

#[derive(Default)]
pub struct RecordingSender {
    outcomes: HashMap<u64, DeliveryOutcome>,
    sent: Mutex<Vec<Sent>>,
}

impl RecordingSender {
    /// Direct messages to `user_id` report `outcome` instead of success.
    pub fn with_outcome(mut self, user_id: u64, outcome: DeliveryOutcome) -> Self {
        self.outcomes.insert(user_id, outcome);
        self
    }

    pub fn sent(&self) -> Vec<Sent> {
        self.sent.lock().unwrap().clone()
    }

    pub fn direct_recipients(&self) -> Vec<u64> {
        self.sent()
            .into_iter()
            .filter_map(|sent| match sent {
                Sent::Direct { user_id, .. } => Some(user_id),
                _ => None,
            })
            .collect()
    }

    pub fn direct_count(&self) -> usize {
        self.direct_recipients().len()
    }

    pub fn forwards(&self) -> Vec<(u64, u64)> {
        self.sent()
            .into_iter()
            .filter_map(|sent| match sent {
                Sent::Forward {
                    message_id,
                    user_id,
                } => Some((message_id, user_id)),
                _ => None,
            })
            .collect()
    }

    pub fn forward_count(&self) -> usize {
        self.forwards().len()
    }
}

#[async_trait]
impl MessageSender for RecordingSender {
    async fn send_direct(&self, user_id: u64, text: &str, _formatted: bool) -> DeliveryOutcome {
        self.sent.lock().unwrap().push(Sent::Direct {
            user_id,
            text: text.to_owned(),
        });
        self.outcomes
            .get(&user_id)
            .copied()
            .unwrap_or(DeliveryOutcome::Delivered)
    }

    async fn forward_message(&self, message: &MessageRef, to_user_id: u64) -> DeliveryOutcome {
        self.sent.lock().unwrap().push(Sent::Forward {
            message_id: message.message_id,
            user_id: to_user_id,
        });
        DeliveryOutcome::Delivered
    }

    async fn reply(&self, _to: &MessageRef, text: &str) -> DeliveryOutcome {
        self.sent.lock().unwrap().push(Sent::Reply(text.to_owned()));
        DeliveryOutcome::Delivered
    }
}

pub fn admin(user_id: u64) -> AdminMember {
    AdminMember {
        user_id,
        is_bot: false,
    }
}

pub fn bot_admin(user_id: u64) -> AdminMember {
    AdminMember {
        user_id,
        is_bot: true,
    }
}

fn user(id: u64) -> UserRef {
    UserRef {
        id,
        display_name: format!("user{id}"),
    }
}

/// A `!request` from `reporter_id` replying to message `message_id` written by `target_id`.
pub fn event(
    chat: ChatInfo,
    reporter_id: u64,
    target_id: u64,
    message_id: u64,
    bot_user_id: u64,
) -> RequestEvent {
    let flagged = MessageRef {
        chat_id: chat.id,
        channel_id: 5,
        message_id,
        author: user(target_id),
        content: "flagged content".to_owned(),
        attachment_urls: Vec::new(),
    };
    let trigger = MessageRef {
        chat_id: chat.id,
        channel_id: 5,
        message_id: message_id + 1,
        author: user(reporter_id),
        content: "!request".to_owned(),
        attachment_urls: Vec::new(),
    };

    RequestEvent {
        trigger: TriggerKind::Command,
        reporter: user(reporter_id),
        chat,
        message: trigger,
        replied_to: Some(flagged),
        bot_user_id,
        has_reason: false,
    }
}
