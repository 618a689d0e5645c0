use clap::{Args, Subcommand};
use serde::Serialize;

use crate::app::AppContext;
use crate::cli::output::{HumanLayout, emit_human, emit_robot, robot_ok};
use crate::error::Result;
use crate::scenario::{Scenario, list_scenarios, load_scenario};

#[derive(Args, Debug)]
pub struct ScenariosArgs {
    #[command(subcommand)]
    pub command: ScenariosCommand,
}

#[derive(Subcommand, Debug)]
pub enum ScenariosCommand {
    /// List built-in scenarios
    List,

    /// Show one scenario's documents and parameters
    Show(ShowArgs),
}

#[derive(Args, Debug)]
pub struct ShowArgs {
    /// Scenario name
    pub name: String,
}

#[derive(Serialize)]
struct ScenarioEntry {
    name: &'static str,
    description: Option<String>,
    documents: usize,
}

pub fn run(ctx: &AppContext, args: &ScenariosArgs) -> Result<()> {
    match &args.command {
        ScenariosCommand::List => list(ctx),
        ScenariosCommand::Show(args) => show(ctx, args),
    }
}

fn list(ctx: &AppContext) -> Result<()> {
    let entries = list_scenarios()
        .into_iter()
        .map(|name| {
            load_scenario(name).map(|scenario| ScenarioEntry {
                name,
                description: scenario.description,
                documents: scenario.documents.len(),
            })
        })
        .collect::<Result<Vec<_>>>()?;

    if ctx.robot_mode {
        return emit_robot(&robot_ok(&entries));
    }
    let mut layout = HumanLayout::new();
    layout.title("Scenarios");
    for entry in &entries {
        layout.bullet(&format!(
            "{} ({} docs): {}",
            entry.name,
            entry.documents,
            entry.description.as_deref().unwrap_or("")
        ));
    }
    emit_human(layout);
    Ok(())
}

fn show(ctx: &AppContext, args: &ShowArgs) -> Result<()> {
    let scenario = load_scenario(&args.name)?;
    if ctx.robot_mode {
        return emit_robot(&robot_ok(&scenario));
    }
    emit_human(scenario_layout(&args.name, &scenario));
    Ok(())
}

fn scenario_layout(name: &str, scenario: &Scenario) -> HumanLayout {
    let mut layout = HumanLayout::new();
    layout.title(name);
    if let Some(description) = &scenario.description {
        layout.push_line(description.as_str()).blank();
    }
    if let Some(model) = scenario.model {
        layout.kv("Model", model.as_str());
    }
    if let Some(slate_size) = scenario.slate_size {
        layout.kv("Slate size", &slate_size.to_string());
    }
    if let Some(steps) = scenario.steps {
        layout.kv("Steps", &steps.to_string());
    }
    if let Some(bias) = &scenario.position_bias {
        let values: Vec<String> = bias.iter().map(ToString::to_string).collect();
        layout.kv("Position bias", &values.join(", "));
    }
    layout.blank().section("Documents");
    for doc in &scenario.documents {
        let satisfaction = scenario
            .satisfaction
            .get(doc.doc_id())
            .map(|s| format!("  satisfaction {s:.2}"))
            .unwrap_or_default();
        layout.push_line(format!(
            "  {:>20}  attraction {:.2}{satisfaction}",
            doc.doc_id(),
            doc.attraction()
        ));
    }
    layout
}
