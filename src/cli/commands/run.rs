use std::path::PathBuf;

use clap::Args;
use serde::Serialize;

use crate::app::AppContext;
use crate::cli::output::{HumanLayout, emit_human, emit_robot, robot_ok};
use crate::curves::{CurveBundle, write_curves_json};
use crate::error::Result;
use crate::persist::{RunMetadata, write_log};
use crate::settings::RunSettings;
use crate::simulator::{SimulationLog, Summary};

use super::SimulationArgs;

#[derive(Args, Debug, Default)]
pub struct RunArgs {
    #[command(flatten)]
    pub simulation: SimulationArgs,

    /// Label stored in the log metadata
    #[arg(long)]
    pub label: Option<String>,

    /// Write the full simulation log as JSON
    #[arg(long, value_name = "PATH")]
    pub log_json: Option<PathBuf>,

    /// Write learning, regret and exposure series as JSON
    #[arg(long, value_name = "PATH")]
    pub curves_json: Option<PathBuf>,
}

#[derive(Serialize)]
struct RunReport<'a> {
    label: Option<&'a str>,
    settings: &'a RunSettings,
    optimal_slate: &'a [String],
    summary: Summary,
    #[serde(skip_serializing_if = "Option::is_none")]
    log_path: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    curves_path: Option<String>,
}

pub fn run(ctx: &AppContext, args: &RunArgs) -> Result<()> {
    let (settings, documents) = args.simulation.resolve(ctx)?;
    let mut simulator = settings.build_simulator(documents)?;
    let log = simulator.run(settings.steps)?;
    let doc_ids = simulator.environment().doc_ids();

    let log_path = args.log_json.clone().or_else(|| {
        ctx.config.output.log_dir.as_ref().map(|dir| {
            let stem = args.label.clone().unwrap_or_else(|| {
                format!("{}-{}-{}", settings.algo, settings.model, settings.seed)
            });
            dir.join(format!("{stem}.json"))
        })
    });
    if let Some(path) = &log_path {
        let metadata = RunMetadata::for_run(args.label.clone(), &settings, doc_ids.clone());
        write_log(path, &log, &metadata)?;
    }
    if let Some(path) = &args.curves_json {
        let label = args.label.as_deref().unwrap_or(settings.algo.as_str());
        write_curves_json(path, &[CurveBundle::from_log(label, &log, &doc_ids)])?;
    }

    if ctx.robot_mode {
        let report = RunReport {
            label: args.label.as_deref(),
            settings: &settings,
            optimal_slate: log.optimal_slate(),
            summary: log.summary(),
            log_path: log_path.map(|p| p.display().to_string()),
            curves_path: args.curves_json.as_ref().map(|p| p.display().to_string()),
        };
        return emit_robot(&robot_ok(report));
    }

    emit_human(summary_layout(&settings, &log, &doc_ids, log_path.as_deref()));
    Ok(())
}

fn summary_layout(
    settings: &RunSettings,
    log: &SimulationLog,
    doc_ids: &[String],
    log_path: Option<&std::path::Path>,
) -> HumanLayout {
    let summary = log.summary();
    let mut layout = HumanLayout::new();
    layout
        .title("Simulation summary")
        .kv("Policy", &settings.policy_config().to_string())
        .kv("Model", settings.model.as_str())
        .kv("Rounds", &summary.rounds.to_string())
        .kv("Total reward", &summary.total_reward.to_string())
        .kv("CTR", &format!("{:.4}", summary.ctr))
        .kv("Optimal reward", &format!("{:.4}", summary.optimal_reward))
        .kv("Cumulative regret", &format!("{:.2}", summary.cumulative_regret))
        .kv("Optimal slate", &log.optimal_slate().join(", "));
    if let Some(path) = log_path {
        layout.kv("Log", &path.display().to_string());
    }
    layout.blank().section("Documents");
    for doc_id in doc_ids {
        layout.counts(
            doc_id,
            summary.exposure_counts.get(doc_id).copied().unwrap_or(0),
            summary.click_counts.get(doc_id).copied().unwrap_or(0),
        );
    }
    layout
}
