pub mod admin_mention;
