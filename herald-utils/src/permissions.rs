use poise::serenity_prelude as serenity;

/// Permissions that make a member count as a chat administrator.
pub const ADMIN_PERMISSIONS: serenity::Permissions = serenity::Permissions::MANAGE_GUILD;

/// `ADMINISTRATOR` implies every other permission.
pub fn grants(perms: serenity::Permissions, required: serenity::Permissions) -> bool {
    perms.contains(serenity::Permissions::ADMINISTRATOR) || perms.contains(required)
}

/// Resolve a member's effective guild permissions from the guild owner and role grants.
pub async fn resolve_user_permissions(
    http: &serenity::Http,
    guild_id: serenity::GuildId,
    user_id: serenity::UserId,
) -> anyhow::Result<serenity::Permissions> {
    let guild = guild_id.to_partial_guild(http).await?;
    if guild.owner_id == user_id {
        return Ok(serenity::Permissions::all());
    }

    let member = guild_id.member(http, user_id).await?;
    let roles = guild_id.roles(http).await?;

    let mut resolved = serenity::Permissions::empty();
    let everyone_role_id = serenity::RoleId::new(guild_id.get());

    for role in roles.values() {
        if role.id == everyone_role_id || member.roles.contains(&role.id) {
            resolved |= role.permissions;
        }
    }

    Ok(resolved)
}

pub async fn has_user_permission(
    http: &serenity::Http,
    guild_id: serenity::GuildId,
    user_id: serenity::UserId,
    required: serenity::Permissions,
) -> anyhow::Result<bool> {
    let perms = resolve_user_permissions(http, guild_id, user_id).await?;

    Ok(grants(perms, required))
}

/// Whether the user is an administrator of the guild.
pub async fn is_chat_admin(
    http: &serenity::Http,
    guild_id: serenity::GuildId,
    user_id: serenity::UserId,
) -> anyhow::Result<bool> {
    has_user_permission(http, guild_id, user_id, ADMIN_PERMISSIONS).await
}

#[cfg(test)]
mod tests {
    use poise::serenity_prelude as serenity;

    use super::{ADMIN_PERMISSIONS, grants};

    #[test]
    fn administrator_grants_everything() {
        assert!(grants(serenity::Permissions::ADMINISTRATOR, ADMIN_PERMISSIONS));
    }

    #[test]
    fn manage_guild_counts_as_admin() {
        assert!(grants(serenity::Permissions::MANAGE_GUILD, ADMIN_PERMISSIONS));
        assert!(!grants(
            serenity::Permissions::SEND_MESSAGES | serenity::Permissions::KICK_MEMBERS,
            ADMIN_PERMISSIONS
        ));
    }
}
