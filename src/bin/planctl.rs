//! A small CLI harness for exercising the planning engine from the shell:
//! loads a catalogue file plus start/target JSON files from disk and
//! prints the rendered response. Not the HTTP collaborator itself.

use anyhow::{bail, Context, Result};
use clap::Parser;
use proc_planner::config::EngineConfig;
use proc_planner::errors::PlanOutcome;
use proc_planner::request::{RawObjectLiteral, RawTarget};
use proc_planner::response;
use std::fs;
use std::process::ExitCode;
use std::time::Duration;

#[derive(Parser)]
#[command(name = "planctl")]
#[command(about = "Run a procedure-synthesis plan against a catalogue", version)]
struct Args {
    /// Path to the catalogue document (YAML or JSON).
    catalogue: String,

    /// Path to the start-objects JSON file.
    start: String,

    /// Path to the target-description JSON file.
    target: String,

    /// Abort the search after this many milliseconds.
    #[arg(long)]
    timeout_ms: Option<u64>,

    /// Abort the search after visiting this many candidate nodes.
    #[arg(long)]
    max_visited: Option<usize>,
}

fn main() -> ExitCode {
    env_logger::init();
    let args = Args::parse();

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("planctl: {err:?}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: &Args) -> Result<()> {
    let catalogue_text = fs::read_to_string(&args.catalogue).context("reading catalogue")?;
    let start_text = fs::read_to_string(&args.start).context("reading start")?;
    let target_text = fs::read_to_string(&args.target).context("reading target")?;

    let raw_start: indexmap::IndexMap<String, RawObjectLiteral> =
        serde_json::from_str(&start_text).context("parsing start")?;
    let raw_target: RawTarget = serde_json::from_str(&target_text).context("parsing target")?;

    let mut builder = EngineConfig::builder();
    if let Some(ms) = args.timeout_ms {
        builder = builder.timeout(Duration::from_millis(ms));
    }
    if let Some(cap) = args.max_visited {
        builder = builder.max_visited(cap);
    }
    let config = builder.build();

    let (graph, outcome) =
        proc_planner::plan(&catalogue_text, &raw_start, &raw_target, &config).context("planning")?;

    match outcome {
        PlanOutcome::Solved(procedure) => {
            let response = response::render(&graph, &procedure);
            let json = serde_json::to_string_pretty(&response).context("serializing response")?;
            println!("{json}");
            Ok(())
        }
        PlanOutcome::NoSolution => {
            println!("{{\"objects\":[],\"methods\":[],\"connections\":[],\"nextId\":0}}");
            Ok(())
        }
        PlanOutcome::Cancelled => bail!("search cancelled: deadline exceeded"),
        PlanOutcome::ResourceExhausted => bail!("search cancelled: visited-node cap exceeded"),
    }
}
