/// Generic embed builders shared across commands.
pub mod embed;
/// Shared formatting helpers (markdown escaping, user labels).
pub mod formatting;
/// Keyword matcher for `@admin` style mentions.
pub mod mention;
/// Single source of truth for the message-command prefix.
pub const COMMAND_PREFIX: char = '!';
/// Pure parser helpers.
pub mod parse;
/// Permission helper utilities.
pub mod permissions;
