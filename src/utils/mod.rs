pub mod logger;
pub mod version;
