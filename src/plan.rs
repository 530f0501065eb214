//! The top-level entry point: load a catalogue, resolve a request against
//! it, run the search, and reconstruct a procedure on success.

use crate::catalogue;
use crate::config::EngineConfig;
use crate::errors::{PlanError, PlanOutcome};
use crate::instance::TypeInstance;
use crate::model::KnowledgeGraph;
use crate::reconstruct;
use crate::request::{self, RawObjectLiteral, RawTarget};
use crate::search::{self, SearchOutcome};
use indexmap::IndexMap;

/// Load `catalogue_text`, resolve `raw_start`/`raw_target` against it, and
/// run the search to completion (or cancellation/exhaustion).
///
/// Returns the loaded graph alongside the outcome so callers (the CLI,
/// `response::render`) can render enum parameter values without reloading
/// the catalogue.
pub fn plan(
    catalogue_text: &str,
    raw_start: &IndexMap<String, RawObjectLiteral>,
    raw_target: &RawTarget,
    config: &EngineConfig,
) -> Result<(KnowledgeGraph, PlanOutcome), PlanError> {
    let graph = catalogue::load_str(catalogue_text)?;
    let outcome = plan_against(&graph, raw_start, raw_target, config)?;
    Ok((graph, outcome))
}

/// As [`plan`], but against an already-loaded [`KnowledgeGraph`] — useful
/// for running several requests against the same catalogue without
/// re-parsing it each time.
pub fn plan_against(
    graph: &KnowledgeGraph,
    raw_start: &IndexMap<String, RawObjectLiteral>,
    raw_target: &RawTarget,
    config: &EngineConfig,
) -> Result<PlanOutcome, PlanError> {
    let start = request::resolve_start(graph, raw_start)?;
    let target = request::resolve_target(graph, raw_target)?;

    let start_types: Vec<TypeInstance> = start.values().cloned().collect();
    log::info!(
        "plan: starting search with {} start object(s), target type '{}'",
        start_types.len(),
        target.type_def.name
    );

    let outcome = match search::search(graph, start_types, &target, config) {
        SearchOutcome::Solved { nodes, goal } => {
            let procedure = reconstruct::reconstruct(&start, &nodes, goal, &target)?;
            PlanOutcome::Solved(procedure)
        }
        SearchOutcome::NoSolution => PlanOutcome::NoSolution,
        SearchOutcome::Cancelled => PlanOutcome::Cancelled,
        SearchOutcome::ResourceExhausted => PlanOutcome::ResourceExhausted,
    };

    Ok(outcome)
}
