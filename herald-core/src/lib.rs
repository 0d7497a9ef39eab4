use std::collections::HashSet;

use herald_database::Database;
use herald_utils::mention::AdminMentionTrigger;

pub type Error = anyhow::Error;

/// Base URL for Discord message jump links.
pub const DISCORD_LINK_BASE: &str = "https://discord.com/channels";

/// Startup-time rules for who can be requested and how links are built.
#[derive(Clone, Debug)]
pub struct RequestPolicy {
    /// Users that can never be the target of a request.
    pub immune_users: HashSet<u64>,
    pub link_base: String,
}

impl RequestPolicy {
    pub fn new(immune_users: impl IntoIterator<Item = u64>) -> Self {
        Self {
            immune_users: immune_users.into_iter().collect(),
            link_base: DISCORD_LINK_BASE.to_owned(),
        }
    }

    pub fn with_link_base(mut self, link_base: impl Into<String>) -> Self {
        self.link_base = link_base.into();
        self
    }

    pub fn is_immune(&self, user_id: u64) -> bool {
        self.immune_users.contains(&user_id)
    }
}

#[derive(Clone, Debug)]
pub struct Data {
    pub db: Database,
    pub policy: RequestPolicy,
    pub admin_mention: AdminMentionTrigger,
}

pub type Context<'a> = poise::Context<'a, Data, Error>;

#[cfg(test)]
mod tests {
    use super::{DISCORD_LINK_BASE, RequestPolicy};

    #[test]
    fn immune_users_are_fixed_at_construction() {
        let policy = RequestPolicy::new([1, 2]);
        assert!(policy.is_immune(1));
        assert!(policy.is_immune(2));
        assert!(!policy.is_immune(3));
        assert_eq!(policy.link_base, DISCORD_LINK_BASE);
    }

    #[test]
    fn link_base_can_be_overridden() {
        let policy = RequestPolicy::new(Vec::new()).with_link_base("https://t.me");
        assert_eq!(policy.link_base, "https://t.me");
    }
}
