pub mod logging;
pub mod messages;
pub mod request;
pub mod requestlog;
pub mod requests;
pub mod settings;

pub use request::escalate_message;
