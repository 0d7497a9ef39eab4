use poise::serenity_prelude as serenity;
use tracing::error;

use herald_commands::escalation::TriggerKind;
use herald_commands::requests::escalate_message;
use herald_core::Data;
use herald_utils::parse::has_trailing_text;

/// Escalate guild messages that call for `@admin` / `@admins`.
pub async fn handle_message_admin_mention(
    ctx: &serenity::Context,
    data: &Data,
    message: &serenity::Message,
) {
    if message.guild_id.is_none() || !data.admin_mention.matches(&message.content) {
        return;
    }

    if let Err(source) = escalate_message(
        ctx,
        data,
        message,
        TriggerKind::Mention,
        has_trailing_text(&message.content),
    )
    .await
    {
        error!(?source, message_id = %message.id, "failed to handle admin mention");
    }
}
