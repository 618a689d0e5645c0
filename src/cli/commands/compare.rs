use std::path::PathBuf;

use clap::Args;

use crate::app::AppContext;
use crate::cli::output::{emit_robot, robot_ok};
use crate::compare::{SortKey, load_with_summary, sort_rows, summaries_to_table, write_summary_json};
use crate::curves::{CurveBundle, write_curves_json};
use crate::error::Result;

#[derive(Args, Debug)]
pub struct CompareArgs {
    /// Log files written by `run --log-json` or `sweep`
    #[arg(required = true, num_args = 1..)]
    pub logs: Vec<PathBuf>,

    /// Metric to sort by
    #[arg(long, value_enum, default_value_t = SortKey::Ctr)]
    pub sort_by: SortKey,

    /// Sort in descending order (ascending by default)
    #[arg(long)]
    pub descending: bool,

    /// Write the summary rows as JSON
    #[arg(long, value_name = "PATH")]
    pub out_json: Option<PathBuf>,

    /// Write per-log curve series as JSON
    #[arg(long, value_name = "PATH")]
    pub curves_json: Option<PathBuf>,
}

pub fn run(ctx: &AppContext, args: &CompareArgs) -> Result<()> {
    let mut rows = Vec::with_capacity(args.logs.len());
    let mut bundles = Vec::new();
    for path in &args.logs {
        let (row, log) = load_with_summary(path)?;
        if args.curves_json.is_some() {
            let doc_ids: Vec<String> = log.exposure_counts().into_keys().collect();
            bundles.push(CurveBundle::from_log(row.label.clone(), &log, &doc_ids));
        }
        rows.push(row);
    }
    sort_rows(&mut rows, args.sort_by, args.descending);

    if let Some(path) = &args.out_json {
        write_summary_json(path, &rows)?;
    }
    if let Some(path) = &args.curves_json {
        write_curves_json(path, &bundles)?;
    }

    if ctx.robot_mode {
        return emit_robot(&robot_ok(&rows));
    }
    println!("{}", summaries_to_table(&rows));
    Ok(())
}
