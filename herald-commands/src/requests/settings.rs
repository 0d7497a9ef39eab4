use crate::CommandMeta;
use crate::escalation::{chat_settings_summary, user_settings_summary};
use herald_core::{Context, Error};
use herald_utils::embed::build_embed;
use herald_utils::permissions::is_chat_admin;

pub const META: CommandMeta = CommandMeta {
    name: "settings",
    desc: "Show the current request settings for this server or for you.",
    category: "requests",
    usage: "!settings",
};

#[poise::command(prefix_command, slash_command, category = "Requests")]
pub async fn settings(ctx: Context<'_>) -> Result<(), Error> {
    let (title, summary) = match ctx.guild_id() {
        Some(guild_id) => {
            if !is_chat_admin(ctx.http(), guild_id, ctx.author().id).await? {
                return Ok(());
            }
            (
                "Server Settings",
                chat_settings_summary(&ctx.data().db, guild_id.get()).await?,
            )
        }
        None => (
            "Your Settings",
            user_settings_summary(&ctx.data().db, ctx.author().id.get()).await?,
        ),
    };

    ctx.send(poise::CreateReply::default().embed(build_embed(title, summary)))
        .await?;

    Ok(())
}
