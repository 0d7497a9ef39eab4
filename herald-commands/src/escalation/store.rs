use async_trait::async_trait;

use herald_database::Database;
use herald_database::impls::request_settings::{
    get_chat_should_request, get_user_should_request, migrate_chat_request_setting,
    set_chat_should_request, set_user_should_request,
};

use super::ports::SettingsStore;

#[async_trait]
impl SettingsStore for Database {
    async fn chat_flag(&self, chat_id: u64) -> anyhow::Result<bool> {
        get_chat_should_request(self, chat_id).await
    }

    async fn set_chat_flag(&self, chat_id: u64, enabled: bool) -> anyhow::Result<()> {
        set_chat_should_request(self, chat_id, enabled).await
    }

    async fn user_flag(&self, user_id: u64) -> anyhow::Result<bool> {
        get_user_should_request(self, user_id).await
    }

    async fn set_user_flag(&self, user_id: u64, enabled: bool) -> anyhow::Result<()> {
        set_user_should_request(self, user_id, enabled).await
    }

    async fn migrate_chat_flag(&self, old_chat_id: u64, new_chat_id: u64) -> anyhow::Result<()> {
        migrate_chat_request_setting(self, old_chat_id, new_chat_id).await
    }
}
