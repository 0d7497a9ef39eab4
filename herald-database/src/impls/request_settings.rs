use anyhow::Context as _;

use crate::cache::{
    SETTINGS_CACHE_TTL, invalidate_request_chat, invalidate_request_user, request_chat_key,
    request_user_key,
};
use crate::database::Database;
use crate::model::request_settings::ChatRequestSetting;

/// Chats and users that never stored a preference receive requests.
pub const DEFAULT_SHOULD_REQUEST: bool = true;

pub async fn get_chat_should_request(db: &Database, chat_id: u64) -> anyhow::Result<bool> {
    let cache_key = request_chat_key(db.cache(), chat_id);
    db.cache()
        .get_or_load_json(&cache_key, SETTINGS_CACHE_TTL, || async {
            let chat_id_i64 = i64::try_from(chat_id).context("chat_id out of i64 range")?;

            let enabled: Option<bool> = sqlx::query_scalar(
                "SELECT should_request FROM request_chat_settings WHERE chat_id = $1",
            )
            .bind(chat_id_i64)
            .fetch_optional(db.pool())
            .await?;

            Ok(enabled.unwrap_or(DEFAULT_SHOULD_REQUEST))
        })
        .await
}

pub async fn set_chat_should_request(
    db: &Database,
    chat_id: u64,
    enabled: bool,
) -> anyhow::Result<()> {
    let chat_id_i64 = i64::try_from(chat_id).context("chat_id out of i64 range")?;

    sqlx::query(
        "INSERT INTO request_chat_settings (chat_id, should_request)
         VALUES ($1, $2)
         ON CONFLICT (chat_id) DO UPDATE SET should_request = EXCLUDED.should_request",
    )
    .bind(chat_id_i64)
    .bind(enabled)
    .execute(db.pool())
    .await?;

    invalidate_request_chat(db.cache(), chat_id).await?;

    Ok(())
}

pub async fn get_user_should_request(db: &Database, user_id: u64) -> anyhow::Result<bool> {
    let cache_key = request_user_key(db.cache(), user_id);
    db.cache()
        .get_or_load_json(&cache_key, SETTINGS_CACHE_TTL, || async {
            let user_id_i64 = i64::try_from(user_id).context("user_id out of i64 range")?;

            let enabled: Option<bool> = sqlx::query_scalar(
                "SELECT should_request FROM request_user_settings WHERE user_id = $1",
            )
            .bind(user_id_i64)
            .fetch_optional(db.pool())
            .await?;

            Ok(enabled.unwrap_or(DEFAULT_SHOULD_REQUEST))
        })
        .await
}

pub async fn set_user_should_request(
    db: &Database,
    user_id: u64,
    enabled: bool,
) -> anyhow::Result<()> {
    let user_id_i64 = i64::try_from(user_id).context("user_id out of i64 range")?;

    sqlx::query(
        "INSERT INTO request_user_settings (user_id, should_request)
         VALUES ($1, $2)
         ON CONFLICT (user_id) DO UPDATE SET should_request = EXCLUDED.should_request",
    )
    .bind(user_id_i64)
    .bind(enabled)
    .execute(db.pool())
    .await?;

    invalidate_request_user(db.cache(), user_id).await?;

    Ok(())
}

/// Move a chat's request setting to a new chat id.
///
/// The old row is removed and its value overwrites whatever the new id held.
/// Nothing changes when the old id never stored a setting.
pub async fn migrate_chat_request_setting(
    db: &Database,
    old_chat_id: u64,
    new_chat_id: u64,
) -> anyhow::Result<()> {
    let old_chat_id_i64 = i64::try_from(old_chat_id).context("old_chat_id out of i64 range")?;
    let new_chat_id_i64 = i64::try_from(new_chat_id).context("new_chat_id out of i64 range")?;

    let mut tx = db.pool().begin().await?;

    let existing = sqlx::query_as::<_, ChatRequestSetting>(
        "DELETE FROM request_chat_settings WHERE chat_id = $1
         RETURNING chat_id, should_request",
    )
    .bind(old_chat_id_i64)
    .fetch_optional(&mut *tx)
    .await?;

    let Some(existing) = existing else {
        tx.rollback().await?;
        return Ok(());
    };

    sqlx::query(
        "INSERT INTO request_chat_settings (chat_id, should_request)
         VALUES ($1, $2)
         ON CONFLICT (chat_id) DO UPDATE SET should_request = EXCLUDED.should_request",
    )
    .bind(new_chat_id_i64)
    .bind(existing.should_request)
    .execute(&mut *tx)
    .await?;

    tx.commit().await?;

    invalidate_request_chat(db.cache(), old_chat_id).await?;
    invalidate_request_chat(db.cache(), new_chat_id).await?;

    Ok(())
}
