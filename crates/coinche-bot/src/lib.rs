pub mod bot;
pub mod policy;

pub use bot::{BidPlanner, BotContext, BotDifficulty, BotParams, PlayPlanner};
pub use policy::{AgentKind, HeuristicAgent, RandomAgent, ScriptedAgent, build_agent};
