mod heuristic;
mod random;
mod scripted;

pub use heuristic::HeuristicAgent;
pub use random::RandomAgent;
pub use scripted::ScriptedAgent;

use crate::bot::BotDifficulty;
use coinche_core::game::agent::Agent;
use std::fmt;
use std::str::FromStr;

/// Agents that can be seated by name, e.g. from a config file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AgentKind {
    Random,
    Easy,
    Normal,
}

impl AgentKind {
    pub const fn as_str(self) -> &'static str {
        match self {
            AgentKind::Random => "random",
            AgentKind::Easy => "easy",
            AgentKind::Normal => "normal",
        }
    }
}

impl fmt::Display for AgentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AgentKind {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "random" => Ok(AgentKind::Random),
            "easy" => Ok(AgentKind::Easy),
            "normal" | "heuristic" => Ok(AgentKind::Normal),
            other => Err(format!("unknown agent '{other}'")),
        }
    }
}

/// Boxed agent of `kind`; `seed` only matters for the random agent.
pub fn build_agent(kind: AgentKind, seed: u64) -> Box<dyn Agent> {
    match kind {
        AgentKind::Random => Box::new(RandomAgent::with_seed(seed)),
        AgentKind::Easy => Box::new(HeuristicAgent::new(BotDifficulty::Easy)),
        AgentKind::Normal => Box::new(HeuristicAgent::new(BotDifficulty::Normal)),
    }
}

#[cfg(test)]
mod tests {
    use super::AgentKind;

    #[test]
    fn kinds_parse_and_display() {
        for kind in [AgentKind::Random, AgentKind::Easy, AgentKind::Normal] {
            assert_eq!(kind.as_str().parse::<AgentKind>(), Ok(kind));
        }
        assert_eq!(" Heuristic".parse::<AgentKind>(), Ok(AgentKind::Normal));
        assert!("oracle".parse::<AgentKind>().is_err());
    }
}
