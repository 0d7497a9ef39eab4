use crate::CommandMeta;
use crate::escalation::{SettingScope, apply_request_setting};
use herald_core::{Context, Error};
use herald_utils::permissions::is_chat_admin;

pub const META: CommandMeta = CommandMeta {
    name: "requests",
    desc: "Toggle or view request notifications (in DMs: yours, in a server: the server's).",
    category: "requests",
    usage: "!requests [on|off]",
};

/// Toggle or view request notifications.
#[poise::command(prefix_command, slash_command, category = "Requests")]
pub async fn requests(
    ctx: Context<'_>,
    #[description = "on, off, yes, or no"] state: Option<String>,
) -> Result<(), Error> {
    let scope = match ctx.guild_id() {
        Some(guild_id) => {
            if !is_chat_admin(ctx.http(), guild_id, ctx.author().id).await? {
                return Ok(());
            }
            SettingScope::Chat(guild_id.get())
        }
        None => SettingScope::User(ctx.author().id.get()),
    };

    if let Some(reply) = apply_request_setting(&ctx.data().db, scope, state.as_deref()).await? {
        ctx.say(reply).await?;
    }

    Ok(())
}
