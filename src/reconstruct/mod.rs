//! The solution reconstructor: walks the Dijkstra
//! predecessor chain back to the start and replays it forward to build
//! the bipartite procedure graph the engine ultimately returns.

use crate::apply::MethodApplication;
use crate::errors::InternalInvariant;
use crate::instance::TypeInstance;
use crate::model::{Method, MethodInput};
use crate::search::CandidateNode;
use indexmap::IndexMap;
use std::collections::HashMap;
use std::rc::Rc;

/// A node for one available type instance: either a start artifact
/// (`resulting_from == None`) or the output of exactly one method node.
#[derive(Debug, Clone)]
pub struct SolutionProcedureTypeNode {
    pub resulting_from: Option<usize>,
    pub type_instance: TypeInstance,
    pub display_name: String,
    pub is_terminal: bool,
}

/// A node for one method application: its bound inputs and the type
/// nodes it produced, both keyed by port name.
#[derive(Debug, Clone)]
pub struct SolutionProcedureMethodNode {
    pub method: Rc<Method>,
    pub input_type_nodes: IndexMap<String, usize>,
    pub output_type_nodes: IndexMap<String, usize>,
}

/// The bipartite DAG this engine returns: type nodes and method nodes, in
/// the topological (construction) order they were built in.
#[derive(Debug, Clone)]
pub struct SolutionProcedure {
    pub type_nodes: Vec<SolutionProcedureTypeNode>,
    pub method_nodes: Vec<SolutionProcedureMethodNode>,
}

/// Reconstruct a [`SolutionProcedure`] from a completed search.
///
/// `start` preserves the caller's object names so start nodes can be
/// displayed with them; `nodes`/`goal` are the Dijkstra arena and the
/// index of the goal-satisfying node found in it; `target` is used only
/// to mark `is_terminal` on every type node as it is created.
pub fn reconstruct(
    start: &IndexMap<String, TypeInstance>,
    nodes: &[CandidateNode],
    goal: usize,
    target: &MethodInput,
) -> Result<SolutionProcedure, InternalInvariant> {
    let mut applications: Vec<&MethodApplication> = Vec::new();
    let mut cursor = goal;
    while let Some(edge) = &nodes[cursor].resulting_from {
        applications.push(&edge.via_method);
        cursor = edge.from_node;
    }
    applications.reverse();

    let mut type_nodes: Vec<SolutionProcedureTypeNode> = Vec::new();
    let mut method_nodes: Vec<SolutionProcedureMethodNode> = Vec::new();
    let mut registered: HashMap<TypeInstance, usize> = HashMap::new();
    let mut fresh_label = 0usize;

    for (name, instance) in start {
        let idx = type_nodes.len();
        type_nodes.push(SolutionProcedureTypeNode {
            resulting_from: None,
            type_instance: instance.clone(),
            display_name: name.clone(),
            is_terminal: instance.fits_input_description(target),
        });
        registered.insert(instance.clone(), idx);
    }

    for application in applications {
        let mut input_type_nodes = IndexMap::new();
        for (port_name, instance) in &application.inputs {
            let idx = registered
                .get(instance)
                .copied()
                .ok_or_else(|| InternalInvariant::UnregisteredInput {
                    port: port_name.clone(),
                })?;
            input_type_nodes.insert(port_name.clone(), idx);
        }

        let method_node_index = method_nodes.len();
        method_nodes.push(SolutionProcedureMethodNode {
            method: application.method.clone(),
            input_type_nodes,
            output_type_nodes: IndexMap::new(),
        });

        let mut output_type_nodes = IndexMap::new();
        for (output_name, instance) in application.resulting_types() {
            fresh_label += 1;
            let idx = type_nodes.len();
            type_nodes.push(SolutionProcedureTypeNode {
                resulting_from: Some(method_node_index),
                type_instance: instance.clone(),
                display_name: format!("O{fresh_label}"),
                is_terminal: instance.fits_input_description(target),
            });
            // Later producers shadow earlier registrations for the same
            // type instance.
            registered.insert(instance, idx);
            output_type_nodes.insert(output_name, idx);
        }
        method_nodes[method_node_index].output_type_nodes = output_type_nodes;
    }

    Ok(SolutionProcedure {
        type_nodes,
        method_nodes,
    })
}
