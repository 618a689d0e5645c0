//! CLI command implementations
//!
//! Each subcommand has its own module with:
//! - Args struct for command-line arguments
//! - run() function to execute the command

use std::collections::BTreeMap;

use clap::{Args, Subcommand};

pub mod compare;
pub mod run;
pub mod scenarios;
pub mod sweep;

use crate::app::AppContext;
use crate::core::{Document, validate_probability};
use crate::environment::ClickModel;
use crate::error::{LabError, Result};
use crate::scenario::resolve_scenario;
use crate::settings::{Algorithm, RunSettings, parse_documents};

pub fn run(ctx: &AppContext, command: &Commands) -> Result<()> {
    match command {
        Commands::Run(args) => run::run(ctx, args),
        Commands::Compare(args) => compare::run(ctx, args),
        Commands::Sweep(args) => sweep::run(ctx, args),
        Commands::Scenarios(args) => scenarios::run(ctx, args),
    }
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run one simulation and print its summary
    Run(run::RunArgs),

    /// Compare persisted simulation logs
    Compare(compare::CompareArgs),

    /// Run several labelled configurations and persist each log
    Sweep(sweep::SweepArgs),

    /// List or inspect built-in scenarios
    Scenarios(scenarios::ScenariosArgs),
}

/// Simulation knobs shared by `run` and `sweep`.
///
/// Precedence: config file, then `--scenario`, then explicit flags.
#[derive(Args, Debug, Default, Clone)]
pub struct SimulationArgs {
    /// Policy: epsilon, ucb, thompson or softmax
    #[arg(long)]
    pub algo: Option<Algorithm>,

    /// Click model: cascade, position or dependent
    #[arg(long)]
    pub model: Option<ClickModel>,

    /// Number of interaction rounds
    #[arg(long)]
    pub steps: Option<usize>,

    /// Number of documents shown per round
    #[arg(long)]
    pub slate_size: Option<usize>,

    /// Base random seed (policy uses seed + 1)
    #[arg(long)]
    pub seed: Option<u64>,

    /// Exploration rate for epsilon-greedy
    #[arg(long)]
    pub epsilon: Option<f64>,

    /// Alpha prior for Thompson sampling
    #[arg(long)]
    pub alpha_prior: Option<f64>,

    /// Beta prior for Thompson sampling
    #[arg(long)]
    pub beta_prior: Option<f64>,

    /// Exploration coefficient for UCB1
    #[arg(long)]
    pub ucb_confidence: Option<f64>,

    /// Softmax temperature (lower is greedier)
    #[arg(long)]
    pub temperature: Option<f64>,

    /// Document as id=probability (repeatable)
    #[arg(long = "doc", value_name = "ID=PROB")]
    pub docs: Vec<String>,

    /// Built-in scenario name or path to a scenario JSON file
    #[arg(long)]
    pub scenario: Option<String>,

    /// Position bias values, one per slate position (comma separated)
    #[arg(long, value_delimiter = ',', value_name = "BIAS")]
    pub position_bias: Vec<f64>,

    /// Per-document satisfaction for the dependent-click model (repeatable)
    #[arg(long = "doc-satisfaction", value_name = "ID=PROB")]
    pub doc_satisfaction: Vec<String>,

    /// Satisfaction for documents without an explicit value
    #[arg(long)]
    pub default_satisfaction: Option<f64>,
}

impl SimulationArgs {
    /// Layer config, scenario and flags into settings plus the document set.
    pub fn resolve(&self, ctx: &AppContext) -> Result<(RunSettings, Vec<Document>)> {
        let mut settings = RunSettings::from_config(&ctx.config);
        let mut documents = None;

        if let Some(name) = &self.scenario {
            let scenario = resolve_scenario(name)?;
            scenario.apply_to(&mut settings);
            documents = Some(scenario.documents);
        }
        if !self.docs.is_empty() || documents.is_none() {
            documents = Some(parse_documents(&self.docs)?);
        }

        if let Some(value) = self.algo {
            settings.algo = value;
        }
        if let Some(value) = self.model {
            settings.model = value;
        }
        if let Some(value) = self.steps {
            settings.steps = value;
        }
        if let Some(value) = self.slate_size {
            settings.slate_size = value;
        }
        if let Some(value) = self.seed {
            settings.seed = value;
        }
        if let Some(value) = self.epsilon {
            settings.epsilon = value;
        }
        if let Some(value) = self.alpha_prior {
            settings.alpha_prior = value;
        }
        if let Some(value) = self.beta_prior {
            settings.beta_prior = value;
        }
        if let Some(value) = self.ucb_confidence {
            settings.ucb_confidence = value;
        }
        if let Some(value) = self.temperature {
            settings.temperature = value;
        }
        if !self.position_bias.is_empty() {
            settings.position_bias = Some(self.position_bias.clone());
        }
        if !self.doc_satisfaction.is_empty() {
            settings.satisfaction = parse_satisfaction(&self.doc_satisfaction)?;
        }
        if let Some(value) = self.default_satisfaction {
            settings.default_satisfaction = value;
        }

        Ok((settings, documents.unwrap_or_default()))
    }
}

fn parse_satisfaction(specs: &[String]) -> Result<BTreeMap<String, f64>> {
    let mut satisfaction = BTreeMap::new();
    for spec in specs {
        let Some((doc_id, raw)) = spec.split_once('=') else {
            return Err(LabError::Config(format!(
                "invalid satisfaction spec '{spec}' (expected 'id=prob')"
            )));
        };
        let value = raw.trim().parse::<f64>().map_err(|err| {
            LabError::Config(format!("invalid satisfaction '{raw}' in '{spec}': {err}"))
        })?;
        let doc_id = doc_id.trim();
        let value = validate_probability(&format!("satisfaction of '{doc_id}'"), value)?;
        satisfaction.insert(doc_id.to_string(), value);
    }
    Ok(satisfaction)
}
