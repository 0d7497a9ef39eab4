pub mod request_settings;
