mod seating;

pub use seating::{MAX_SEATINGS, SeatingPlan};

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use coinche_bot::{BotDifficulty, HeuristicAgent, RandomAgent};
use coinche_core::game::agent::Agent;
use coinche_core::game::error::GameError;
use coinche_core::game::events::GameEvent;
use coinche_core::game::orchestrator::{GameOutcome, Orchestrator};
use coinche_core::model::bid::{BiddingEntry, BiddingStep};
use coinche_core::model::card::Card;
use coinche_core::model::player::{PlayerPosition, Team};
use rand::{RngCore, SeedableRng, rngs::StdRng};
use serde::Serialize;
use thiserror::Error;
use tracing::{Level, event};

use crate::config::{AgentConfig, AgentKind, BenchmarkConfig, ResolvedOutputs};
use crate::logging::telemetry_path;
use crate::summary::{SeatTally, SummaryCollector};

/// Plays every configured game under every requested seating.
pub struct TournamentRunner {
    config: BenchmarkConfig,
    outputs: ResolvedOutputs,
    agents: Vec<AgentBlueprint>,
    seatings: SeatingPlan,
    logging_enabled: bool,
}

/// Summary details returned after a run.
pub struct RunSummary {
    pub games_played: usize,
    pub seatings: usize,
    pub rows_written: usize,
    pub jsonl_path: PathBuf,
    pub summary_path: PathBuf,
    pub telemetry_path: Option<PathBuf>,
}

impl TournamentRunner {
    /// Build a runner from a validated configuration.
    pub fn new(config: BenchmarkConfig, outputs: ResolvedOutputs) -> Result<Self, RunnerError> {
        let agents = AgentBlueprint::from_configs(&config.agents)?;

        if agents.len() != 4 {
            return Err(RunnerError::SeatCount {
                found: agents.len(),
            });
        }

        if config.games.permutations > MAX_SEATINGS {
            return Err(RunnerError::SeatingLimit {
                requested: config.games.permutations,
                max: MAX_SEATINGS,
            });
        }

        let seatings = SeatingPlan::new(config.games.permutations);

        Ok(Self {
            logging_enabled: config.logging.enable_structured,
            config,
            outputs,
            agents,
            seatings,
        })
    }

    /// Execute the tournament, streaming JSONL rows to disk.
    pub fn run(&self) -> Result<RunSummary, RunnerError> {
        ensure_parent(self.outputs.jsonl.parent())?;
        ensure_parent(self.outputs.summary_md.parent())?;

        let mut writer = BufWriter::new(File::create(&self.outputs.jsonl)?);
        let mut rng = StdRng::seed_from_u64(self.config.games.seed.unwrap_or(0));
        let mut rows_written = 0usize;
        let mut summary = SummaryCollector::new(
            self.agents
                .iter()
                .map(|agent| (agent.name.clone(), agent.label())),
        );

        for game_index in 0..self.config.games.count {
            let game_seed = rng.next_u64();

            for (seating_index, seating) in self.seatings.as_slice().iter().enumerate() {
                let record = self.play_game(game_index, seating_index, game_seed, seating)?;
                for seat in &record.seats {
                    summary.record(&seat.agent_name, &seat.tally());
                }
                rows_written += write_game_rows(
                    &mut writer,
                    &self.config,
                    game_index,
                    seating_index,
                    game_seed,
                    &record,
                )?;
            }
        }

        writer.flush()?;
        summary.write_markdown(&self.outputs.summary_md, &self.config.run_id)?;

        event!(
            target: "coinche_bench::tournament",
            Level::INFO,
            run_id = %self.config.run_id,
            games = self.config.games.count,
            seatings = self.seatings.len(),
            rows_written,
            "tournament complete"
        );

        Ok(RunSummary {
            games_played: self.config.games.count,
            seatings: self.seatings.len(),
            rows_written,
            jsonl_path: self.outputs.jsonl.clone(),
            summary_path: self.outputs.summary_md.clone(),
            telemetry_path: self
                .logging_enabled
                .then(|| telemetry_path(&self.outputs)),
        })
    }

    fn play_game(
        &self,
        game_index: usize,
        seating_index: usize,
        game_seed: u64,
        seating: &[usize; 4],
    ) -> Result<GameRecord, RunnerError> {
        let game_id = format!("G{game_index:05}_P{seating_index:02}");
        let mut seeds = StdRng::seed_from_u64(game_seed);
        let mut orchestrator = Orchestrator::new(self.config.games.table, seeds.next_u64());

        let mut seated = Vec::with_capacity(4);
        for seat in PlayerPosition::LOOP {
            let agent_index = seating[seat.index()];
            let blueprint = self
                .agents
                .get(agent_index)
                .ok_or(RunnerError::InvalidSeating {
                    index: seat.index(),
                    agent_index,
                })?;
            let metrics = Arc::new(Mutex::new(DecisionMetrics::default()));
            let trace = self.logging_enabled.then(|| DecisionTrace {
                run_id: self.config.run_id.clone(),
                game_id: game_id.clone(),
            });
            orchestrator.register(
                seat,
                Box::new(TimedAgent {
                    inner: blueprint.spawn(seeds.next_u64()),
                    metrics: Arc::clone(&metrics),
                    trace,
                }),
            );
            seated.push((seat, blueprint.name.clone(), metrics));
        }

        let outcome = orchestrator
            .run()
            .map_err(|source| RunnerError::Game {
                game_id: game_id.clone(),
                source,
            })?;
        let contracts = ContractTally::from_game(&orchestrator, &outcome);

        let seating_snapshot = seated
            .iter()
            .map(|(seat, name, _)| SeatSnapshot {
                seat: seat_label(*seat).to_string(),
                bot: name.clone(),
            })
            .collect();

        let seats = seated
            .into_iter()
            .map(|(seat, agent_name, metrics)| {
                let team = seat.team();
                let metrics = metrics
                    .lock()
                    .map(|metrics| metrics.summary())
                    .unwrap_or_default();
                SeatResult {
                    agent_name,
                    seat,
                    team_score: outcome.score.team(team),
                    opponent_score: outcome.score.team(team.opponent()),
                    won: outcome.winner == Some(team),
                    contracts_taken: contracts.taken(team),
                    contracts_won: contracts.won(team),
                    metrics,
                }
            })
            .collect();

        event!(
            target: "coinche_bench::tournament",
            Level::DEBUG,
            game_id = %game_id,
            rounds = outcome.rounds,
            void_rounds = outcome.void_rounds,
            score = %outcome.score,
            "game finished"
        );

        Ok(GameRecord {
            seating: seating_snapshot,
            seats,
            rounds: outcome.rounds,
            void_rounds: outcome.void_rounds,
        })
    }
}

fn ensure_parent(path: Option<&Path>) -> Result<(), RunnerError> {
    if let Some(dir) = path.filter(|dir| !dir.as_os_str().is_empty()) {
        fs::create_dir_all(dir)?;
    }
    Ok(())
}

fn write_game_rows(
    writer: &mut BufWriter<File>,
    config: &BenchmarkConfig,
    game_index: usize,
    seating_index: usize,
    game_seed: u64,
    record: &GameRecord,
) -> Result<usize, RunnerError> {
    let game_id = format!("G{game_index:05}_P{seating_index:02}");

    let mut rows_written = 0usize;
    for seat_result in &record.seats {
        let row = GameLogRow {
            run_id: config.run_id.clone(),
            game_id: game_id.clone(),
            game_index,
            seating_index,
            game_seed,
            seat: seat_label(seat_result.seat).to_string(),
            team: team_label(seat_result.seat.team()).to_string(),
            bot: seat_result.agent_name.clone(),
            seating: record.seating.clone(),
            team_score: seat_result.team_score,
            opponent_score: seat_result.opponent_score,
            won: seat_result.won,
            rounds: record.rounds,
            void_rounds: record.void_rounds,
            contracts_taken: seat_result.contracts_taken,
            contracts_won: seat_result.contracts_won,
            speed_ms_decision: seat_result.metrics.avg_ms_per_decision,
            decisions: seat_result.metrics.decisions,
        };

        serde_json::to_writer(&mut *writer, &row)?;
        writer.write_all(b"\n")?;
        rows_written += 1;
    }

    Ok(rows_written)
}

fn seat_label(position: PlayerPosition) -> &'static str {
    match position {
        PlayerPosition::North => "north",
        PlayerPosition::East => "east",
        PlayerPosition::South => "south",
        PlayerPosition::West => "west",
    }
}

fn team_label(team: Team) -> &'static str {
    match team {
        Team::NorthSouth => "north_south",
        Team::EastWest => "east_west",
    }
}

/// Contracts each team held over a game, and how many it came out ahead on.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
struct ContractTally {
    taken: [u32; 2],
    won: [u32; 2],
}

impl ContractTally {
    fn from_game(orchestrator: &Orchestrator, outcome: &GameOutcome) -> Self {
        let mut tally = Self::default();
        let rounds = orchestrator.state().rounds();
        for (round, score) in rounds.iter().zip(&outcome.round_scores) {
            let Some(contract) = round.contract() else {
                continue;
            };
            let team = contract.position.team();
            tally.taken[team_index(team)] += 1;
            if score.team(team) > score.team(team.opponent()) {
                tally.won[team_index(team)] += 1;
            }
        }
        tally
    }

    fn taken(&self, team: Team) -> u32 {
        self.taken[team_index(team)]
    }

    fn won(&self, team: Team) -> u32 {
        self.won[team_index(team)]
    }
}

fn team_index(team: Team) -> usize {
    match team {
        Team::NorthSouth => 0,
        Team::EastWest => 1,
    }
}

struct GameRecord {
    seating: Vec<SeatSnapshot>,
    seats: Vec<SeatResult>,
    rounds: usize,
    void_rounds: usize,
}

#[derive(Clone, Serialize)]
struct SeatSnapshot {
    seat: String,
    bot: String,
}

struct SeatResult {
    agent_name: String,
    seat: PlayerPosition,
    team_score: u32,
    opponent_score: u32,
    won: bool,
    contracts_taken: u32,
    contracts_won: u32,
    metrics: DecisionSummary,
}

impl SeatResult {
    fn tally(&self) -> SeatTally {
        SeatTally {
            won: self.won,
            team_score: self.team_score,
            opponent_score: self.opponent_score,
            contracts_taken: self.contracts_taken,
            contracts_won: self.contracts_won,
            decisions: self.metrics.decisions,
            total_ms: self.metrics.total_ms,
        }
    }
}

#[derive(Default)]
struct DecisionMetrics {
    total: Duration,
    decisions: u32,
}

impl DecisionMetrics {
    fn record(&mut self, duration: Duration) -> f64 {
        self.total += duration;
        self.decisions += 1;
        duration.as_secs_f64() * 1000.0
    }

    fn summary(&self) -> DecisionSummary {
        let avg_ms = if self.decisions == 0 {
            0.0
        } else {
            self.total.as_secs_f64() * 1000.0 / f64::from(self.decisions)
        };

        DecisionSummary {
            decisions: self.decisions,
            avg_ms_per_decision: avg_ms,
            total_ms: self.total.as_secs_f64() * 1000.0,
        }
    }
}

#[derive(Clone, Copy, Default)]
struct DecisionSummary {
    decisions: u32,
    avg_ms_per_decision: f64,
    total_ms: f64,
}

struct DecisionTrace {
    run_id: String,
    game_id: String,
}

/// Times every decision of the wrapped agent and, when structured logging
/// is on, logs it.
struct TimedAgent {
    inner: Box<dyn Agent>,
    metrics: Arc<Mutex<DecisionMetrics>>,
    trace: Option<DecisionTrace>,
}

impl TimedAgent {
    fn record(&self, elapsed: Duration) -> f64 {
        match self.metrics.lock() {
            Ok(mut metrics) => metrics.record(elapsed),
            Err(_) => elapsed.as_secs_f64() * 1000.0,
        }
    }
}

impl Agent for TimedAgent {
    fn propose_bid(&mut self, seat: PlayerPosition, history: &[BiddingEntry]) -> BiddingStep {
        let start = Instant::now();
        let step = self.inner.propose_bid(seat, history);
        let elapsed_ms = self.record(start.elapsed());

        if let Some(trace) = &self.trace
            && tracing::enabled!(Level::INFO)
        {
            event!(
                target: "coinche_bench::bid",
                Level::INFO,
                run_id = %trace.run_id,
                game_id = %trace.game_id,
                seat = seat_label(seat),
                step = %step,
                elapsed_ms
            );
        }
        step
    }

    fn propose_card(&mut self, seat: PlayerPosition, legal: &[Card]) -> Card {
        let start = Instant::now();
        let card = self.inner.propose_card(seat, legal);
        let elapsed_ms = self.record(start.elapsed());

        if let Some(trace) = &self.trace
            && tracing::enabled!(Level::INFO)
        {
            event!(
                target: "coinche_bench::play",
                Level::INFO,
                run_id = %trace.run_id,
                game_id = %trace.game_id,
                seat = seat_label(seat),
                card = %card,
                legal = legal.len(),
                elapsed_ms
            );
        }
        card
    }

    fn on_state_changed(&mut self, event: &GameEvent) {
        self.inner.on_state_changed(event);
    }
}

#[derive(Serialize)]
struct GameLogRow {
    run_id: String,
    game_id: String,
    game_index: usize,
    seating_index: usize,
    game_seed: u64,
    seat: String,
    team: String,
    bot: String,
    seating: Vec<SeatSnapshot>,
    team_score: u32,
    opponent_score: u32,
    won: bool,
    rounds: usize,
    void_rounds: usize,
    contracts_taken: u32,
    contracts_won: u32,
    speed_ms_decision: f64,
    decisions: u32,
}

#[derive(Debug, Error)]
pub enum RunnerError {
    #[error("{0}")]
    Agent(#[from] AgentError),
    #[error("I/O error: {source}")]
    Io {
        #[from]
        source: std::io::Error,
    },
    #[error("failed to serialize log row: {source}")]
    Serialize {
        #[from]
        source: serde_json::Error,
    },
    #[error("game {game_id} failed: {source}")]
    Game {
        game_id: String,
        #[source]
        source: GameError,
    },
    #[error("configuration requires exactly 4 agents but found {found}")]
    SeatCount { found: usize },
    #[error("requested {requested} seatings exceeds maximum of {max}")]
    SeatingLimit { requested: usize, max: usize },
    #[error("seat {index} references invalid agent index {agent_index}")]
    InvalidSeating { index: usize, agent_index: usize },
}

#[derive(Debug, Error)]
pub enum AgentError {
    #[error("invalid heuristic parameter for agent '{name}': {message}")]
    InvalidHeuristicParam { name: String, message: String },
    #[error("invalid random parameter for agent '{name}': {message}")]
    InvalidRandomParam { name: String, message: String },
}

struct AgentBlueprint {
    name: String,
    implementation: AgentImplementation,
}

enum AgentImplementation {
    Heuristic(HeuristicOptions),
    Random(RandomOptions),
}

impl AgentBlueprint {
    fn from_configs(configs: &[AgentConfig]) -> Result<Vec<Self>, AgentError> {
        configs.iter().map(Self::from_config).collect()
    }

    fn from_config(config: &AgentConfig) -> Result<Self, AgentError> {
        let implementation = match config.kind {
            AgentKind::Heuristic => AgentImplementation::Heuristic(HeuristicOptions::from_params(
                &config.name,
                &config.params,
            )?),
            AgentKind::Random => {
                AgentImplementation::Random(RandomOptions::from_params(&config.name, &config.params)?)
            }
        };

        Ok(Self {
            name: config.name.clone(),
            implementation,
        })
    }

    /// `seed` only matters for agents that draw randomly.
    fn spawn(&self, seed: u64) -> Box<dyn Agent> {
        match &self.implementation {
            AgentImplementation::Heuristic(opts) => Box::new(HeuristicAgent::new(opts.difficulty)),
            AgentImplementation::Random(opts) => {
                let agent = RandomAgent::with_seed(seed);
                match opts.open_probability {
                    Some(probability) => Box::new(agent.with_open_probability(probability)),
                    None => Box::new(agent),
                }
            }
        }
    }

    fn label(&self) -> String {
        match &self.implementation {
            AgentImplementation::Heuristic(opts) => match opts.difficulty {
                BotDifficulty::Easy => "heuristic/easy".to_string(),
                BotDifficulty::Normal => "heuristic/normal".to_string(),
            },
            AgentImplementation::Random(_) => "random".to_string(),
        }
    }
}

fn param<'a>(params: &'a serde_yaml::Value, key: &str) -> Option<&'a serde_yaml::Value> {
    params
        .as_mapping()?
        .iter()
        .find_map(|(k, value)| (k.as_str() == Some(key)).then_some(value))
}

struct HeuristicOptions {
    difficulty: BotDifficulty,
}

impl HeuristicOptions {
    fn from_params(name: &str, params: &serde_yaml::Value) -> Result<Self, AgentError> {
        if params.is_null() {
            return Ok(Self {
                difficulty: BotDifficulty::Normal,
            });
        }

        if !params.is_mapping() {
            return Err(AgentError::InvalidHeuristicParam {
                name: name.to_string(),
                message: "expected mapping for heuristic params".to_string(),
            });
        }

        let difficulty = match param(params, "difficulty") {
            None => BotDifficulty::Normal,
            Some(value) => {
                let text = value
                    .as_str()
                    .ok_or_else(|| AgentError::InvalidHeuristicParam {
                        name: name.to_string(),
                        message: "difficulty must be a string".to_string(),
                    })?;
                BotDifficulty::parse(text).ok_or_else(|| AgentError::InvalidHeuristicParam {
                    name: name.to_string(),
                    message: format!("unknown difficulty '{text}'"),
                })?
            }
        };

        Ok(Self { difficulty })
    }
}

struct RandomOptions {
    open_probability: Option<f64>,
}

impl RandomOptions {
    fn from_params(name: &str, params: &serde_yaml::Value) -> Result<Self, AgentError> {
        if params.is_null() {
            return Ok(Self {
                open_probability: None,
            });
        }

        if !params.is_mapping() {
            return Err(AgentError::InvalidRandomParam {
                name: name.to_string(),
                message: "expected mapping for random params".to_string(),
            });
        }

        let open_probability = match param(params, "open_probability") {
            None => None,
            Some(value) => {
                let probability =
                    value
                        .as_f64()
                        .ok_or_else(|| AgentError::InvalidRandomParam {
                            name: name.to_string(),
                            message: "open_probability must be a number".to_string(),
                        })?;
                if !(0.0..=1.0).contains(&probability) {
                    return Err(AgentError::InvalidRandomParam {
                        name: name.to_string(),
                        message: format!("open_probability {probability} is outside [0, 1]"),
                    });
                }
                Some(probability)
            }
        };

        Ok(Self { open_probability })
    }
}
