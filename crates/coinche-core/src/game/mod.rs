pub mod agent;
pub mod config;
pub mod error;
pub mod events;
pub mod orchestrator;
pub mod serialization;
pub mod state;
