use coinche_core::game::config::GameConfig;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::Level;

const RUN_ID_PLACEHOLDER: &str = "{run_id}";
const TABLE_SIZE: usize = 4;

/// A benchmark run as described by its YAML file.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct BenchmarkConfig {
    pub run_id: String,
    pub games: GamesConfig,
    pub agents: Vec<AgentConfig>,
    pub outputs: OutputsConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl BenchmarkConfig {
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref().to_path_buf();
        let text = match fs::read_to_string(&path) {
            Ok(text) => text,
            Err(source) => return Err(ConfigError::Read { path, source }),
        };
        let mut config: BenchmarkConfig = match serde_yaml::from_str(&text) {
            Ok(config) => config,
            Err(source) => return Err(ConfigError::Parse { path, source }),
        };
        if let Err(source) = config.validate() {
            return Err(ConfigError::Invalid { path, source });
        }
        Ok(config)
    }

    /// Checks every section and fills defaults left blank in the file.
    /// Run again after command-line overrides.
    pub fn validate(&mut self) -> Result<(), ValidationError> {
        if !is_identifier(&self.run_id) {
            return Err(ValidationError::BadName {
                field: "run_id".to_string(),
                value: self.run_id.clone(),
            });
        }
        self.games.validate()?;
        self.outputs.validate(&self.run_id)?;
        if self.logging.tracing_level.trim().is_empty() {
            self.logging.tracing_level = default_tracing_level();
        }
        validate_table(&mut self.agents)
    }

    pub fn resolved_outputs(&self) -> ResolvedOutputs {
        self.outputs.resolve(&self.run_id)
    }
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct GamesConfig {
    /// Seeds every deal; unset runs play from seed 0.
    pub seed: Option<u64>,
    pub count: usize,
    /// Seatings each dealt game is replayed under.
    #[serde(default = "one")]
    pub permutations: usize,
    #[serde(default)]
    pub table: GameConfig,
}

impl GamesConfig {
    fn validate(&self) -> Result<(), ValidationError> {
        let counts = [
            ("games.count", self.count),
            ("games.permutations", self.permutations),
            ("games.table.winning_score", self.table.winning_score as usize),
        ];
        match counts.into_iter().find(|(_, value)| *value == 0) {
            Some((field, _)) => Err(ValidationError::Zero { field }),
            None => Ok(()),
        }
    }
}

fn one() -> usize {
    1
}

/// One seat at the table: a named agent and its tuning knobs.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct AgentConfig {
    pub name: String,
    pub kind: AgentKind,
    #[serde(default)]
    pub params: serde_yaml::Value,
}

impl AgentConfig {
    /// Settings under which this agent passes every auction.
    fn never_bids(&self) -> bool {
        let param = |key: &str| self.params.get(key);
        match self.kind {
            AgentKind::Heuristic => param("difficulty")
                .and_then(serde_yaml::Value::as_str)
                .is_some_and(|difficulty| difficulty.trim().eq_ignore_ascii_case("easy")),
            AgentKind::Random => param("open_probability")
                .and_then(serde_yaml::Value::as_f64)
                .is_some_and(|probability| probability <= 0.0),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum AgentKind {
    Heuristic,
    Random,
}

/// Output paths; `{run_id}` is substituted when resolved.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct OutputsConfig {
    pub jsonl: String,
    pub summary_md: String,
}

impl OutputsConfig {
    fn validate(&self, run_id: &str) -> Result<(), ValidationError> {
        if self.jsonl.trim().is_empty() {
            return Err(ValidationError::Empty {
                field: "outputs.jsonl",
            });
        }
        if self.summary_md.trim().is_empty() {
            return Err(ValidationError::Empty {
                field: "outputs.summary_md",
            });
        }
        let resolved = self.resolve(run_id);
        if resolved.jsonl == resolved.summary_md {
            return Err(ValidationError::SharedOutput(resolved.jsonl));
        }
        Ok(())
    }

    fn resolve(&self, run_id: &str) -> ResolvedOutputs {
        let expand = |template: &str| PathBuf::from(template.replace(RUN_ID_PLACEHOLDER, run_id));
        ResolvedOutputs {
            jsonl: expand(&self.jsonl),
            summary_md: expand(&self.summary_md),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedOutputs {
    pub jsonl: PathBuf,
    pub summary_md: PathBuf,
}

/// Structured telemetry is off unless asked for.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct LoggingConfig {
    #[serde(default)]
    pub enable_structured: bool,
    #[serde(default = "default_tracing_level")]
    pub tracing_level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            enable_structured: false,
            tracing_level: default_tracing_level(),
        }
    }
}

impl LoggingConfig {
    /// Parsed level, or `None` when the name is not one tracing knows.
    pub fn level(&self) -> Option<Level> {
        self.tracing_level.trim().parse().ok()
    }
}

fn default_tracing_level() -> String {
    Level::INFO.as_str().to_ascii_lowercase()
}

/// Names end up in file paths and table headers.
fn is_identifier(value: &str) -> bool {
    !value.is_empty()
        && value
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-'))
}

fn validate_table(agents: &mut [AgentConfig]) -> Result<(), ValidationError> {
    if agents.len() != TABLE_SIZE {
        return Err(ValidationError::TableSize {
            found: agents.len(),
        });
    }

    let mut names = HashSet::with_capacity(TABLE_SIZE);
    for (seat, agent) in agents.iter_mut().enumerate() {
        if !is_identifier(&agent.name) {
            return Err(ValidationError::BadName {
                field: format!("agents[{seat}].name"),
                value: agent.name.clone(),
            });
        }
        if !names.insert(agent.name.clone()) {
            return Err(ValidationError::DuplicateAgent(agent.name.clone()));
        }
        if agent.params.is_null() {
            agent.params = serde_yaml::Value::Mapping(serde_yaml::Mapping::new());
        }
    }

    // Nobody ever bidding deals void rounds forever.
    if agents.iter().all(AgentConfig::never_bids) {
        return Err(ValidationError::SilentTable);
    }
    Ok(())
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path:?}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config {path:?}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },
    #[error("invalid configuration in {path:?}: {source}")]
    Invalid {
        path: PathBuf,
        #[source]
        source: ValidationError,
    },
}

/// A config that parsed but cannot drive a tournament.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("{field} must be greater than zero")]
    Zero { field: &'static str },
    #[error("{field} must not be empty")]
    Empty { field: &'static str },
    #[error("{field} '{value}' may only use ASCII letters, digits, '.', '_' or '-'")]
    BadName { field: String, value: String },
    #[error("a table seats exactly 4 agents, found {found}")]
    TableSize { found: usize },
    #[error("agent '{0}' is seated more than once")]
    DuplicateAgent(String),
    #[error("at least one agent must be able to bid")]
    SilentTable,
    #[error("jsonl and summary outputs both resolve to {0:?}")]
    SharedOutput(PathBuf),
}
