use std::fs;
use std::io;
use std::path::Path;

/// One agent's result in one game, as seen from its seat.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct SeatTally {
    pub won: bool,
    pub team_score: u32,
    pub opponent_score: u32,
    pub contracts_taken: u32,
    pub contracts_won: u32,
    pub decisions: u32,
    pub total_ms: f64,
}

/// Running totals for one configured agent.
#[derive(Debug, Clone, PartialEq)]
pub struct AgentStats {
    pub name: String,
    pub kind: String,
    pub games: u32,
    pub wins: u32,
    pub points_for: u64,
    pub points_against: u64,
    pub contracts_taken: u32,
    pub contracts_won: u32,
    pub decisions: u32,
    pub total_ms: f64,
}

impl AgentStats {
    fn new(name: String, kind: String) -> Self {
        Self {
            name,
            kind,
            games: 0,
            wins: 0,
            points_for: 0,
            points_against: 0,
            contracts_taken: 0,
            contracts_won: 0,
            decisions: 0,
            total_ms: 0.0,
        }
    }

    fn record(&mut self, tally: &SeatTally) {
        self.games += 1;
        if tally.won {
            self.wins += 1;
        }
        self.points_for += u64::from(tally.team_score);
        self.points_against += u64::from(tally.opponent_score);
        self.contracts_taken += tally.contracts_taken;
        self.contracts_won += tally.contracts_won;
        self.decisions += tally.decisions;
        self.total_ms += tally.total_ms;
    }

    pub fn win_rate(&self) -> f64 {
        ratio(self.wins, self.games)
    }

    pub fn avg_points(&self) -> f64 {
        if self.games == 0 {
            0.0
        } else {
            self.points_for as f64 / f64::from(self.games)
        }
    }

    pub fn avg_margin(&self) -> f64 {
        if self.games == 0 {
            0.0
        } else {
            (self.points_for as f64 - self.points_against as f64) / f64::from(self.games)
        }
    }

    pub fn contract_success(&self) -> f64 {
        ratio(self.contracts_won, self.contracts_taken)
    }

    pub fn avg_ms_per_decision(&self) -> f64 {
        if self.decisions == 0 {
            0.0
        } else {
            self.total_ms / f64::from(self.decisions)
        }
    }
}

fn ratio(part: u32, whole: u32) -> f64 {
    if whole == 0 {
        0.0
    } else {
        f64::from(part) / f64::from(whole)
    }
}

/// Aggregates seat results per agent and renders the markdown table.
pub struct SummaryCollector {
    agents: Vec<AgentStats>,
}

impl SummaryCollector {
    pub fn new<I>(agents: I) -> Self
    where
        I: IntoIterator<Item = (String, String)>,
    {
        Self {
            agents: agents
                .into_iter()
                .map(|(name, kind)| AgentStats::new(name, kind))
                .collect(),
        }
    }

    /// Unknown names are ignored.
    pub fn record(&mut self, name: &str, tally: &SeatTally) {
        if let Some(stats) = self.agents.iter_mut().find(|stats| stats.name == name) {
            stats.record(tally);
        }
    }

    pub fn agents(&self) -> &[AgentStats] {
        &self.agents
    }

    pub fn render_markdown(&self, run_id: &str) -> String {
        let mut rows = String::new();
        rows.push_str("# Tournament Summary\n\n");
        rows.push_str(&format!("Run: `{run_id}`\n\n"));
        rows.push_str("| Agent | Kind | Games | Win % | Avg points | Avg margin | Contracts | Made % | Avg ms/decision |\n");
        rows.push_str("|-------|------|-------|-------|------------|------------|-----------|--------|-----------------|\n");

        for agent in &self.agents {
            rows.push_str(&format!(
                "| {name} | {kind} | {games} | {win:.1}% | {points:.1} | {margin:+.1} | {taken} | {made:.1}% | {latency:.3} |\n",
                name = agent.name,
                kind = agent.kind,
                games = agent.games,
                win = agent.win_rate() * 100.0,
                points = agent.avg_points(),
                margin = agent.avg_margin(),
                taken = agent.contracts_taken,
                made = agent.contract_success() * 100.0,
                latency = agent.avg_ms_per_decision(),
            ));
        }
        rows
    }

    pub fn write_markdown(&self, path: impl AsRef<Path>, run_id: &str) -> io::Result<()> {
        fs::write(path.as_ref(), self.render_markdown(run_id))
    }
}
