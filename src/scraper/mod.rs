pub mod channel;
pub mod orchestrator;
