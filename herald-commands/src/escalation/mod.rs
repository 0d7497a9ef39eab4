//! Admin request escalation.
//!
//! A non-admin replies to a message with `!request` or `@admin`; the
//! message is relayed to every admin of the chat who opted in to DMs.

pub mod discord;
pub mod handler;
pub mod notification;
pub mod ports;
pub mod settings;
mod store;

#[cfg(test)]
pub(crate) mod testing;

pub use handler::{FanOutSummary, RequestHandler};
pub use ports::{
    AdminDirectory, AdminMember, ChatInfo, ChatKind, DeliveryOutcome, MessageRef, MessageSender,
    RequestEvent, SettingsStore, TriggerKind, UserRef,
};
pub use settings::{
    SettingScope, apply_request_setting, chat_settings_summary, migrate_chat,
    user_settings_summary,
};
