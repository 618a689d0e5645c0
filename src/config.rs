use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::environment::ClickModel;
use crate::error::{LabError, Result};
use crate::settings::Algorithm;

pub const CONFIG_FILE_NAME: &str = "rank-bandit-lab.toml";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub simulation: SimulationConfig,
    #[serde(default)]
    pub policy: PolicyDefaults,
    #[serde(default)]
    pub environment: EnvironmentConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

impl Config {
    /// Defaults, then config files, then `RBL_*` environment overrides.
    pub fn load(explicit_path: Option<&Path>, project_root: &Path) -> Result<Self> {
        let mut config = Self::default();

        let explicit = explicit_path
            .map(PathBuf::from)
            .or_else(|| std::env::var("RBL_CONFIG").ok().map(PathBuf::from));

        if let Some(path) = explicit {
            let patch = Self::load_patch(&path)?.ok_or_else(|| {
                LabError::Config(format!("config file {} not found", path.display()))
            })?;
            config.merge_patch(patch);
        } else {
            if let Some(global) = Self::load_global()? {
                config.merge_patch(global);
            }
            if let Some(project) = Self::load_patch(&project_root.join(CONFIG_FILE_NAME))? {
                config.merge_patch(project);
            }
        }

        config.apply_env_overrides()?;
        config.validate()?;

        Ok(config)
    }

    /// Parse a TOML document as a patch over the defaults.
    pub fn from_toml_str(raw: &str) -> Result<Self> {
        let patch: ConfigPatch =
            toml::from_str(raw).map_err(|err| LabError::Config(format!("parse config: {err}")))?;
        let mut config = Self::default();
        config.merge_patch(patch);
        config.validate()?;
        Ok(config)
    }

    fn load_global() -> Result<Option<ConfigPatch>> {
        let Some(dir) = dirs::config_dir() else {
            return Ok(None);
        };
        Self::load_patch(&dir.join("rank-bandit-lab/config.toml"))
    }

    fn load_patch(path: &Path) -> Result<Option<ConfigPatch>> {
        if !path.exists() {
            return Ok(None);
        }

        let raw = std::fs::read_to_string(path)
            .map_err(|err| LabError::Config(format!("read config {}: {err}", path.display())))?;
        let patch = toml::from_str(&raw)
            .map_err(|err| LabError::Config(format!("parse config {}: {err}", path.display())))?;
        Ok(Some(patch))
    }

    fn merge_patch(&mut self, patch: ConfigPatch) {
        if let Some(patch) = patch.simulation {
            self.simulation.merge(patch);
        }
        if let Some(patch) = patch.policy {
            self.policy.merge(patch);
        }
        if let Some(patch) = patch.environment {
            self.environment.merge(patch);
        }
        if let Some(patch) = patch.output {
            self.output.merge(patch);
        }
    }

    fn apply_env_overrides(&mut self) -> Result<()> {
        if let Some(value) = env_parse::<usize>("RBL_STEPS")? {
            self.simulation.steps = value;
        }
        if let Some(value) = env_parse::<usize>("RBL_SLATE_SIZE")? {
            self.simulation.slate_size = value;
        }
        if let Some(value) = env_parse::<u64>("RBL_SEED")? {
            self.simulation.seed = value;
        }
        if let Some(value) = env_parse::<ClickModel>("RBL_MODEL")? {
            self.simulation.model = value;
        }
        if let Some(value) = env_parse::<Algorithm>("RBL_ALGO")? {
            self.policy.algo = value;
        }
        if let Some(value) = env_parse::<f64>("RBL_EPSILON")? {
            self.policy.epsilon = value;
        }
        if let Some(value) = env_parse::<f64>("RBL_ALPHA_PRIOR")? {
            self.policy.alpha_prior = value;
        }
        if let Some(value) = env_parse::<f64>("RBL_BETA_PRIOR")? {
            self.policy.beta_prior = value;
        }
        if let Some(value) = env_parse::<f64>("RBL_UCB_CONFIDENCE")? {
            self.policy.ucb_confidence = value;
        }
        if let Some(value) = env_parse::<f64>("RBL_TEMPERATURE")? {
            self.policy.temperature = value;
        }
        if let Some(value) = env_parse::<f64>("RBL_DEFAULT_SATISFACTION")? {
            self.environment.default_satisfaction = value;
        }
        if let Some(value) = env_string("RBL_OUTPUT_FORMAT") {
            self.output.format = value;
        }
        if let Some(value) = env_string("RBL_LOG_DIR") {
            self.output.log_dir = Some(PathBuf::from(value));
        }
        Ok(())
    }

    fn validate(&self) -> Result<()> {
        if self.simulation.steps == 0 {
            return Err(LabError::Config("simulation.steps must be >= 1".to_string()));
        }
        if self.simulation.slate_size == 0 {
            return Err(LabError::Config(
                "simulation.slate_size must be >= 1".to_string(),
            ));
        }
        let format = self.output.format.as_str();
        if !format.eq_ignore_ascii_case("human") && !format.eq_ignore_ascii_case("json") {
            return Err(LabError::Config(format!(
                "invalid output.format {} (expected human|json)",
                self.output.format
            )));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    pub steps: usize,
    pub slate_size: usize,
    pub seed: u64,
    pub model: ClickModel,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            steps: 2_000,
            slate_size: 3,
            seed: 7,
            model: ClickModel::Cascade,
        }
    }
}

impl SimulationConfig {
    fn merge(&mut self, patch: SimulationPatch) {
        if let Some(value) = patch.steps {
            self.steps = value;
        }
        if let Some(value) = patch.slate_size {
            self.slate_size = value;
        }
        if let Some(value) = patch.seed {
            self.seed = value;
        }
        if let Some(value) = patch.model {
            self.model = value;
        }
    }
}

/// Hyperparameters for every algorithm; `algo` picks which ones apply.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PolicyDefaults {
    pub algo: Algorithm,
    pub epsilon: f64,
    pub alpha_prior: f64,
    pub beta_prior: f64,
    pub ucb_confidence: f64,
    pub temperature: f64,
}

impl Default for PolicyDefaults {
    fn default() -> Self {
        Self {
            algo: Algorithm::Epsilon,
            epsilon: 0.1,
            alpha_prior: 1.0,
            beta_prior: 1.0,
            ucb_confidence: 1.0,
            temperature: 0.1,
        }
    }
}

impl PolicyDefaults {
    fn merge(&mut self, patch: PolicyPatch) {
        if let Some(value) = patch.algo {
            self.algo = value;
        }
        if let Some(value) = patch.epsilon {
            self.epsilon = value;
        }
        if let Some(value) = patch.alpha_prior {
            self.alpha_prior = value;
        }
        if let Some(value) = patch.beta_prior {
            self.beta_prior = value;
        }
        if let Some(value) = patch.ucb_confidence {
            self.ucb_confidence = value;
        }
        if let Some(value) = patch.temperature {
            self.temperature = value;
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EnvironmentConfig {
    /// Empty means "all 1.0".
    pub position_bias: Vec<f64>,
    pub default_satisfaction: f64,
}

impl Default for EnvironmentConfig {
    fn default() -> Self {
        Self {
            position_bias: Vec::new(),
            default_satisfaction: crate::environment::DEFAULT_SATISFACTION,
        }
    }
}

impl EnvironmentConfig {
    fn merge(&mut self, patch: EnvironmentPatch) {
        if let Some(value) = patch.position_bias {
            self.position_bias = value;
        }
        if let Some(value) = patch.default_satisfaction {
            self.default_satisfaction = value;
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub format: String,
    pub log_dir: Option<PathBuf>,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: "human".to_string(),
            log_dir: None,
        }
    }
}

impl OutputConfig {
    fn merge(&mut self, patch: OutputPatch) {
        if let Some(value) = patch.format {
            self.format = value;
        }
        if let Some(value) = patch.log_dir {
            self.log_dir = Some(value);
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct ConfigPatch {
    pub simulation: Option<SimulationPatch>,
    pub policy: Option<PolicyPatch>,
    pub environment: Option<EnvironmentPatch>,
    pub output: Option<OutputPatch>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct SimulationPatch {
    pub steps: Option<usize>,
    pub slate_size: Option<usize>,
    pub seed: Option<u64>,
    pub model: Option<ClickModel>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct PolicyPatch {
    pub algo: Option<Algorithm>,
    pub epsilon: Option<f64>,
    pub alpha_prior: Option<f64>,
    pub beta_prior: Option<f64>,
    pub ucb_confidence: Option<f64>,
    pub temperature: Option<f64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct EnvironmentPatch {
    pub position_bias: Option<Vec<f64>>,
    pub default_satisfaction: Option<f64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct OutputPatch {
    pub format: Option<String>,
    pub log_dir: Option<PathBuf>,
}

fn env_string(key: &str) -> Option<String> {
    std::env::var(key).ok()
}

fn env_parse<T>(key: &str) -> Result<Option<T>>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match std::env::var(key) {
        Ok(value) => value
            .trim()
            .parse::<T>()
            .map(Some)
            .map_err(|err| LabError::Config(format!("invalid {key} value {value}: {err}"))),
        Err(_) => Ok(None),
    }
}
