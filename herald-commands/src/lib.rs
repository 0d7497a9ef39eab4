pub mod escalation;
pub mod requests;
pub mod utility;

use herald_core::{Data, Error};

pub struct CommandMeta {
    pub name: &'static str,
    pub desc: &'static str,
    pub category: &'static str,
    pub usage: &'static str,
}

pub const COMMANDS: &[CommandMeta] = &[
    utility::help::META,
    utility::usage::META,
    requests::request::META,
    requests::requests::META,
    requests::settings::META,
    requests::requestlog::META,
];

pub fn commands() -> Vec<poise::Command<Data, Error>> {
    vec![
        utility::help::help(),
        utility::usage::usage(),
        requests::request::request(),
        requests::requests::requests(),
        requests::settings::settings(),
        requests::requestlog::requestlog(),
    ]
}
