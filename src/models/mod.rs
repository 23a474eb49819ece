pub mod error;
pub mod message_record;
pub mod run_options;
pub mod settings;
