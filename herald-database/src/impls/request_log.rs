use anyhow::Context as _;

use crate::cache::{SETTINGS_CACHE_TTL, invalidate_request_log, request_log_key};
use crate::database::Database;

pub async fn get_request_log_channel_id(
    db: &Database,
    chat_id: u64,
) -> anyhow::Result<Option<u64>> {
    let cache_key = request_log_key(db.cache(), chat_id);
    db.cache()
        .get_or_load_json(&cache_key, SETTINGS_CACHE_TTL, || async {
            let chat_id_i64 = i64::try_from(chat_id).context("chat_id out of i64 range")?;

            let channel_id: Option<i64> = sqlx::query_scalar(
                "SELECT log_channel_id FROM request_log_config WHERE chat_id = $1",
            )
            .bind(chat_id_i64)
            .fetch_optional(db.pool())
            .await?
            .flatten();

            channel_id
                .map(u64::try_from)
                .transpose()
                .context("log_channel_id out of u64 range")
        })
        .await
}

pub async fn set_request_log_channel_id(
    db: &Database,
    chat_id: u64,
    channel_id: u64,
) -> anyhow::Result<()> {
    let chat_id_i64 = i64::try_from(chat_id).context("chat_id out of i64 range")?;
    let channel_id_i64 = i64::try_from(channel_id).context("channel_id out of i64 range")?;

    sqlx::query(
        "INSERT INTO request_log_config (chat_id, log_channel_id)
         VALUES ($1, $2)
         ON CONFLICT (chat_id) DO UPDATE SET log_channel_id = EXCLUDED.log_channel_id",
    )
    .bind(chat_id_i64)
    .bind(channel_id_i64)
    .execute(db.pool())
    .await?;

    invalidate_request_log(db.cache(), chat_id).await?;

    Ok(())
}

pub async fn clear_request_log_channel_id(db: &Database, chat_id: u64) -> anyhow::Result<()> {
    let chat_id_i64 = i64::try_from(chat_id).context("chat_id out of i64 range")?;

    sqlx::query("DELETE FROM request_log_config WHERE chat_id = $1")
        .bind(chat_id_i64)
        .execute(db.pool())
        .await?;

    invalidate_request_log(db.cache(), chat_id).await?;

    Ok(())
}
