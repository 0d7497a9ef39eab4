use crate::utility::embeds::{grouped_help_description, unknown_category_message};
use crate::{COMMANDS, CommandMeta};
use herald_core::{Context, Error};
use herald_utils::embed::build_embed;

pub const META: CommandMeta = CommandMeta {
    name: "help",
    desc: "Lists out all available commands.",
    category: "utility",
    usage: "!help [category]",
};

const HELP_FOOTER: &str = "Reply to a message with `!request` or `@admin` to notify the admins. \
     Neither works when used by admins.";

#[poise::command(prefix_command, slash_command, category = "Utility")]
pub async fn help(
    ctx: Context<'_>,
    #[description = "Category"] category: Option<String>,
) -> Result<(), Error> {
    let category = category
        .as_deref()
        .map(str::trim)
        .filter(|raw| !raw.is_empty())
        .map(str::to_ascii_lowercase);

    let mut categories: Vec<&str> = COMMANDS.iter().map(|c| c.category).collect();
    categories.sort_unstable();
    categories.dedup();

    if let Some(wanted_category) = category.as_deref()
        && !categories.contains(&wanted_category)
    {
        ctx.say(unknown_category_message(wanted_category, &categories))
            .await?;
        return Ok(());
    }

    let commands = sorted_commands(category.as_deref());
    let description = format!("{}\n\n{}", grouped_help_description(&commands), HELP_FOOTER);

    ctx.send(poise::CreateReply::default().embed(build_embed("Available Commands", description)))
        .await?;
    Ok(())
}

fn sorted_commands(category: Option<&str>) -> Vec<&'static CommandMeta> {
    let mut filtered: Vec<&'static CommandMeta> = COMMANDS
        .iter()
        .filter(|cmd| match category {
            Some(wanted) => cmd.category == wanted,
            None => true,
        })
        .collect();

    filtered.sort_unstable_by(|left, right| {
        left.category
            .cmp(right.category)
            .then_with(|| left.name.cmp(right.name))
    });

    filtered
}

#[cfg(test)]
mod tests {
    use super::sorted_commands;

    #[test]
    fn commands_are_sorted_by_category_then_name() {
        let names: Vec<&str> = sorted_commands(None).iter().map(|c| c.name).collect();
        assert_eq!(
            names,
            vec!["request", "requestlog", "requests", "settings", "help", "usage"]
        );
    }

    #[test]
    fn category_filter_applies() {
        let names: Vec<&str> = sorted_commands(Some("utility"))
            .iter()
            .map(|c| c.name)
            .collect();
        assert_eq!(names, vec!["help", "usage"]);
    }
}
