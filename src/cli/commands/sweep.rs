use std::path::PathBuf;

use clap::Args;

use crate::app::AppContext;
use crate::cli::output::{emit_robot, robot_ok};
use crate::compare::{SortKey, sort_rows, summaries_to_table, write_summary_json};
use crate::curves::{CurveBundle, write_curves_json};
use crate::error::Result;
use crate::sweep::{parse_run_spec, run_sweep};

use super::SimulationArgs;

#[derive(Args, Debug)]
pub struct SweepArgs {
    #[command(flatten)]
    pub simulation: SimulationArgs,

    /// Run spec formatted as label:key=value,... (repeatable)
    #[arg(long = "run", value_name = "SPEC", required = true)]
    pub runs: Vec<String>,

    /// Directory for per-run logs (default: output.log_dir or ./sweep_logs)
    #[arg(long)]
    pub output_dir: Option<PathBuf>,

    /// Write the summary rows as JSON
    #[arg(long, value_name = "PATH")]
    pub summary_json: Option<PathBuf>,

    /// Write per-run curve series as JSON
    #[arg(long, value_name = "PATH")]
    pub curves_json: Option<PathBuf>,

    /// Metric used to sort the summary table
    #[arg(long, value_enum, default_value_t = SortKey::Ctr)]
    pub sort_by: SortKey,

    /// Sort in descending order
    #[arg(long)]
    pub descending: bool,
}

pub fn run(ctx: &AppContext, args: &SweepArgs) -> Result<()> {
    let specs = args
        .runs
        .iter()
        .map(|spec| parse_run_spec(spec))
        .collect::<Result<Vec<_>>>()?;
    let (base, documents) = args.simulation.resolve(ctx)?;
    let output_dir = args
        .output_dir
        .clone()
        .or_else(|| ctx.config.output.log_dir.clone())
        .unwrap_or_else(|| PathBuf::from("sweep_logs"));

    let runs = run_sweep(&base, &specs, &documents, &output_dir)?;

    if let Some(path) = &args.curves_json {
        let doc_ids: Vec<String> = documents.iter().map(|d| d.doc_id().to_string()).collect();
        let bundles: Vec<CurveBundle> = runs
            .iter()
            .map(|run| CurveBundle::from_log(run.row.label.clone(), &run.log, &doc_ids))
            .collect();
        write_curves_json(path, &bundles)?;
    }

    let mut rows: Vec<_> = runs.into_iter().map(|run| run.row).collect();
    sort_rows(&mut rows, args.sort_by, args.descending);
    if let Some(path) = &args.summary_json {
        write_summary_json(path, &rows)?;
    }

    if ctx.robot_mode {
        return emit_robot(&robot_ok(&rows));
    }
    println!("{}", summaries_to_table(&rows));
    Ok(())
}
