use tracing::info;

use herald_utils::formatting::format_flag;
use herald_utils::parse::parse_toggle;

use super::ports::SettingsStore;

/// Which flag a `!requests` invocation reads or writes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SettingScope {
    /// Used in DMs: the caller's own preference.
    User(u64),
    /// Used in a chat: whether the chat relays requests at all.
    Chat(u64),
}

/// Apply `!requests [on|yes|off|no]` and return the reply to send, if any.
///
/// Unrecognised arguments are ignored without a reply.
pub async fn apply_request_setting(
    store: &dyn SettingsStore,
    scope: SettingScope,
    argument: Option<&str>,
) -> anyhow::Result<Option<String>> {
    let argument = argument.map(str::trim).filter(|arg| !arg.is_empty());

    let Some(argument) = argument else {
        let reply = match scope {
            SettingScope::User(user_id) => format!(
                "Your current request preference is: {}",
                format_flag(store.user_flag(user_id).await?)
            ),
            SettingScope::Chat(chat_id) => format!(
                "This chat's current setting is: {}",
                format_flag(store.chat_flag(chat_id).await?)
            ),
        };
        return Ok(Some(reply));
    };

    let Some(enabled) = parse_toggle(argument) else {
        return Ok(None);
    };

    let reply = match (scope, enabled) {
        (SettingScope::User(user_id), true) => {
            store.set_user_flag(user_id, true).await?;
            "Turned on requesting! You'll be notified whenever anyone requests something."
        }
        (SettingScope::User(user_id), false) => {
            store.set_user_flag(user_id, false).await?;
            "Turned off requesting! You won't get any requests."
        }
        (SettingScope::Chat(chat_id), true) => {
            store.set_chat_flag(chat_id, true).await?;
            "Turned on requesting! Admins who have turned on requests will be notified when \
             `!request` or `@admin` are called."
        }
        (SettingScope::Chat(chat_id), false) => {
            store.set_chat_flag(chat_id, false).await?;
            "Turned off requesting! No admins will be notified on `!request` or `@admin`."
        }
    };

    Ok(Some(reply.to_owned()))
}

/// Chat line for the settings overview.
pub async fn chat_settings_summary(
    store: &dyn SettingsStore,
    chat_id: u64,
) -> anyhow::Result<String> {
    Ok(format!(
        "This chat is set up to send user requests to admins, via `!request` and `@admin`: {}",
        format_flag(store.chat_flag(chat_id).await?)
    ))
}

/// User line for the settings overview.
pub async fn user_settings_summary(
    store: &dyn SettingsStore,
    user_id: u64,
) -> anyhow::Result<String> {
    Ok(format!(
        "You receive requests from chats you're an admin in: {}.\n\
         Toggle this with `!requests` in DMs.",
        format_flag(store.user_flag(user_id).await?)
    ))
}

/// Carry a chat's request setting over when the platform moves the chat to a new id.
pub async fn migrate_chat(
    store: &dyn SettingsStore,
    old_chat_id: u64,
    new_chat_id: u64,
) -> anyhow::Result<()> {
    store.migrate_chat_flag(old_chat_id, new_chat_id).await?;
    info!(old_chat_id, new_chat_id, "migrated chat request setting");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::{
        SettingScope, apply_request_setting, chat_settings_summary, migrate_chat,
        user_settings_summary,
    };
    use crate::escalation::ports::SettingsStore;
    use crate::escalation::testing::MemoryStore;

    #[tokio::test]
    async fn chat_flag_round_trips() {
        let store = MemoryStore::default();
        for value in [true, false] {
            store.set_chat_flag(3, value).await.unwrap();
            assert_eq!(store.chat_flag(3).await.unwrap(), value);
        }
    }

    #[tokio::test]
    async fn status_renders_literal_booleans() {
        let store = MemoryStore::default();
        store.set_chat_flag(1, false).await.unwrap();

        let chat = apply_request_setting(&store, SettingScope::Chat(1), None)
            .await
            .unwrap();
        let user = apply_request_setting(&store, SettingScope::User(7), Some("  "))
            .await
            .unwrap();

        assert_eq!(chat.as_deref(), Some("This chat's current setting is: `false`"));
        assert_eq!(user.as_deref(), Some("Your current request preference is: `true`"));
    }

    #[tokio::test]
    async fn on_and_off_update_the_scoped_flag() {
        let store = MemoryStore::default();

        let reply = apply_request_setting(&store, SettingScope::User(7), Some("off"))
            .await
            .unwrap();
        assert!(reply.unwrap().starts_with("Turned off requesting!"));
        assert!(!store.user_flag(7).await.unwrap());

        let reply = apply_request_setting(&store, SettingScope::User(7), Some("yes"))
            .await
            .unwrap();
        assert!(reply.unwrap().starts_with("Turned on requesting!"));
        assert!(store.user_flag(7).await.unwrap());

        apply_request_setting(&store, SettingScope::Chat(1), Some("no"))
            .await
            .unwrap();
        assert!(!store.chat_flag(1).await.unwrap());
        assert!(store.user_flag(1).await.unwrap());
    }

    #[tokio::test]
    async fn unknown_argument_is_a_silent_no_op() {
        let store = MemoryStore::default();

        let reply = apply_request_setting(&store, SettingScope::Chat(1), Some("maybe"))
            .await
            .unwrap();

        assert_eq!(reply, None);
        assert_eq!(store.stored_chat(1), None);
    }

    #[tokio::test]
    async fn migration_moves_the_flag() {
        let store = MemoryStore::default();
        for value in [true, false] {
            store.set_chat_flag(10, value).await.unwrap();
            migrate_chat(&store, 10, 20).await.unwrap();

            assert_eq!(store.stored_chat(20), Some(value));
            assert_eq!(store.stored_chat(10), None);
        }
    }

    #[tokio::test]
    async fn migration_without_old_setting_keeps_new_one() {
        let store = MemoryStore::default();
        store.set_chat_flag(20, false).await.unwrap();

        migrate_chat(&store, 10, 20).await.unwrap();

        assert_eq!(store.stored_chat(20), Some(false));
    }

    #[tokio::test]
    async fn summaries_reflect_stored_state() {
        let store = MemoryStore::default();
        store.set_chat_flag(1, false).await.unwrap();

        assert_eq!(
            chat_settings_summary(&store, 1).await.unwrap(),
            "This chat is set up to send user requests to admins, via `!request` and `@admin`: `false`"
        );
        assert!(
            user_settings_summary(&store, 7)
                .await
                .unwrap()
                .starts_with("You receive requests from chats you're an admin in: `true`.")
        );
    }

    #[tokio::test]
    async fn store_errors_are_not_masked() {
        let store = MemoryStore::default().failing();
        assert!(
            apply_request_setting(&store, SettingScope::Chat(1), Some("on"))
                .await
                .is_err()
        );
        assert!(migrate_chat(&store, 1, 2).await.is_err());
    }
}
