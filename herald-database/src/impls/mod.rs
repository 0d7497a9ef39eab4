pub mod request_log;
pub mod request_settings;
