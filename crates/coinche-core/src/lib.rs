#![deny(warnings)]
pub mod error;
pub mod game;
pub mod model;
pub mod rules;

pub use error::RuleError;
pub use game::error::GameError;
