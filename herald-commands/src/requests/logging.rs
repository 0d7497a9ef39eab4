use poise::serenity_prelude as serenity;
use tracing::error;

use herald_core::Data;
use herald_database::impls::request_log::get_request_log_channel_id;
use herald_utils::embed::DEFAULT_EMBED_COLOR;

/// Post a relayed request to the chat's configured log channel, if any.
pub async fn publish_request_to_log_channel(
    http: &serenity::Http,
    data: &Data,
    guild_id: serenity::GuildId,
    notification: &str,
) -> Result<(), serenity::Error> {
    let channel_id = match get_request_log_channel_id(&data.db, guild_id.get()).await {
        Ok(channel_id) => channel_id,
        Err(source) => {
            error!(?source, "failed to read request log channel config");
            None
        }
    };

    let Some(channel_id) = channel_id else {
        return Ok(());
    };

    let embed = serenity::CreateEmbed::new()
        .color(DEFAULT_EMBED_COLOR)
        .title("Admin Request")
        .description(notification);

    serenity::ChannelId::new(channel_id)
        .send_message(
            http,
            serenity::CreateMessage::new()
                .embed(embed)
                .allowed_mentions(serenity::CreateAllowedMentions::new()),
        )
        .await?;

    Ok(())
}
