use crate::CommandMeta;
use crate::requests::messages::guild_only_message;
use herald_core::{Context, Error};
use herald_database::impls::request_log::{
    clear_request_log_channel_id, get_request_log_channel_id, set_request_log_channel_id,
};
use herald_utils::parse::parse_channel_id;
use herald_utils::permissions::is_chat_admin;

pub const META: CommandMeta = CommandMeta {
    name: "requestlog",
    desc: "Set or view the channel where relayed requests are logged.",
    category: "requests",
    usage: "!requestlog [#channel|channel_id|clear]",
};

#[poise::command(prefix_command, slash_command, category = "Requests")]
pub async fn requestlog(
    ctx: Context<'_>,
    #[description = "Channel mention/id, or 'clear'"]
    #[rest]
    input: Option<String>,
) -> Result<(), Error> {
    let Some(guild_id) = ctx.guild_id() else {
        ctx.say(guild_only_message()).await?;
        return Ok(());
    };

    if !is_chat_admin(ctx.http(), guild_id, ctx.author().id).await? {
        return Ok(());
    }

    if let Some(input) = input
        .as_deref()
        .map(str::trim)
        .filter(|entry| !entry.is_empty())
    {
        if input.eq_ignore_ascii_case("clear") {
            clear_request_log_channel_id(&ctx.data().db, guild_id.get()).await?;
            ctx.say("Request log channel cleared.").await?;
            return Ok(());
        }

        if let Some(channel_id) = parse_channel_id(input) {
            set_request_log_channel_id(&ctx.data().db, guild_id.get(), channel_id).await?;
            ctx.say(format!("Request log channel set to <#{}>.", channel_id))
                .await?;
            return Ok(());
        }

        ctx.say("Provide a valid channel mention/id, or `clear`.")
            .await?;
        return Ok(());
    }

    let current = get_request_log_channel_id(&ctx.data().db, guild_id.get()).await?;
    if let Some(channel_id) = current {
        ctx.say(format!("Current request log channel: <#{}>", channel_id))
            .await?;
    } else {
        ctx.say("No request log channel configured.").await?;
    }

    Ok(())
}
