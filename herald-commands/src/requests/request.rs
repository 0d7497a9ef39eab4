use poise::serenity_prelude as serenity;
use tracing::{debug, error, info};

use crate::CommandMeta;
use crate::escalation::discord::{
    DiscordAdminDirectory, DiscordMessageSender, request_event_from_message,
};
use crate::escalation::{RequestHandler, TriggerKind};
use crate::requests::logging::publish_request_to_log_channel;
use crate::requests::messages::guild_only_message;
use herald_core::{Context, Data, Error};
use herald_utils::permissions::is_chat_admin;

pub const META: CommandMeta = CommandMeta {
    name: "request",
    desc: "Reply to a message to bring it to the admins' attention.",
    category: "requests",
    usage: "!request [reason]",
};

/// Reply to a message to bring it to the admins' attention.
#[poise::command(prefix_command, category = "Requests")]
pub async fn request(
    ctx: Context<'_>,
    #[description = "Optional reason for the admins"]
    #[rest]
    reason: Option<String>,
) -> Result<(), Error> {
    if ctx.guild_id().is_none() {
        ctx.say(guild_only_message()).await?;
        return Ok(());
    }

    let poise::Context::Prefix(prefix_ctx) = ctx else {
        return Ok(());
    };

    let has_reason = reason.as_deref().is_some_and(|text| !text.trim().is_empty());

    escalate_message(
        ctx.serenity_context(),
        ctx.data(),
        prefix_ctx.msg,
        TriggerKind::Command,
        has_reason,
    )
    .await
}

/// Shared entry point for `!request` and `@admin` mentions.
///
/// Admins, bots and webhooks are ignored without a reply.
pub async fn escalate_message(
    ctx: &serenity::Context,
    data: &Data,
    message: &serenity::Message,
    trigger: TriggerKind,
    has_reason: bool,
) -> Result<(), Error> {
    if message.author.bot || message.webhook_id.is_some() {
        return Ok(());
    }

    let Some(guild_id) = message.guild_id else {
        return Ok(());
    };

    if is_chat_admin(&ctx.http, guild_id, message.author.id).await? {
        debug!(user_id = %message.author.id, "ignoring request from admin");
        return Ok(());
    }

    let Some(event) = request_event_from_message(ctx, message, trigger, has_reason).await? else {
        return Ok(());
    };

    let admins = DiscordAdminDirectory::new(&ctx.http);
    let sender = DiscordMessageSender::new(&ctx.http, &data.policy.link_base);
    let handler = RequestHandler {
        store: &data.db,
        admins: &admins,
        sender: &sender,
        policy: &data.policy,
    };

    let notification = handler.handle(&event).await?;
    if notification.is_empty() {
        return Ok(());
    }

    info!(
        guild_id = %guild_id,
        reporter_id = %message.author.id,
        trigger = trigger.as_str(),
        notification = %notification,
        "admin request"
    );

    if let Err(source) =
        publish_request_to_log_channel(&ctx.http, data, guild_id, &notification).await
    {
        error!(?source, "failed to publish request to log channel");
    }

    Ok(())
}
