//! Renders a [`SolutionProcedure`] into the external JSON response shape:
//! flat `objects`/`methods`/`connections` lists with monotonic ids,
//! decoupled from the internal graph representation.

use crate::model::{KnowledgeGraph, ParameterType, ParameterValue};
use crate::reconstruct::SolutionProcedure;
use indexmap::IndexMap;
use serde::Serialize;
use std::collections::BTreeMap;

#[derive(Debug, Clone, Serialize)]
pub struct ObjectRecord {
    pub id: u64,
    #[serde(rename = "type")]
    pub type_name: String,
    pub name: String,
    pub is_start: bool,
    pub is_end: bool,
    pub distance_to_start: u64,
    pub params: IndexMap<String, String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct PortRecord {
    pub id: u64,
    pub name: String,
    pub constraints: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct MethodRecord {
    pub id: u64,
    pub name: String,
    pub description: Option<String>,
    pub inputs: Vec<PortRecord>,
    /// A single-element outer list: the canonical single-branch form. A
    /// catalogue using the legacy multi-branch shape is already expanded
    /// into one [`crate::model::Method`] per branch at load time, so this
    /// is never more than one list deep here.
    pub outputs: Vec<Vec<PortRecord>>,
}

#[derive(Debug, Clone, Serialize)]
pub struct Connection {
    #[serde(rename = "fromId")]
    pub from_id: u64,
    #[serde(rename = "toId")]
    pub to_id: u64,
}

#[derive(Debug, Clone, Serialize)]
pub struct PlanResponse {
    pub objects: Vec<ObjectRecord>,
    pub methods: Vec<MethodRecord>,
    pub connections: Vec<Connection>,
    #[serde(rename = "nextId")]
    pub next_id: u64,
}

fn render_param_value(graph: &KnowledgeGraph, value: &ParameterValue) -> String {
    match value {
        ParameterValue::EnumLiteral(enum_name, idx) => {
            let value_name = match graph.param_type(enum_name) {
                Some(ParameterType::Enum(enum_type)) => enum_type.values.get(*idx).map(|s| s.as_str()),
                _ => None,
            };
            value.render(value_name)
        }
        other => other.render(None),
    }
}

fn render_object_params(graph: &KnowledgeGraph, values: &BTreeMap<String, ParameterValue>) -> IndexMap<String, String> {
    values.iter().map(|(name, value)| (name.clone(), render_param_value(graph, value))).collect()
}

fn render_constraints(graph: &KnowledgeGraph, constraints: &IndexMap<String, ParameterValue>) -> String {
    constraints
        .iter()
        .map(|(name, value)| format!("{name}={}", render_param_value(graph, value)))
        .collect::<Vec<_>>()
        .join(", ")
}

/// Walk `procedure`'s construction order and assign every id exactly
/// once: objects first, then one id per method and one per port on it.
pub fn render(graph: &KnowledgeGraph, procedure: &SolutionProcedure) -> PlanResponse {
    let mut next_id: u64 = 0;

    let mut object_ids = Vec::with_capacity(procedure.type_nodes.len());
    let mut distances = vec![0u64; procedure.type_nodes.len()];
    let mut objects = Vec::with_capacity(procedure.type_nodes.len());

    for (i, node) in procedure.type_nodes.iter().enumerate() {
        let id = next_id;
        next_id += 1;
        object_ids.push(id);

        let distance = match node.resulting_from {
            None => 0,
            Some(method_idx) => {
                let method_node = &procedure.method_nodes[method_idx];
                let input_max = method_node
                    .input_type_nodes
                    .values()
                    .map(|&idx| distances[idx])
                    .max()
                    .unwrap_or(0);
                input_max + 1 + method_node.method.outputs.len() as u64
            }
        };
        distances[i] = distance;

        objects.push(ObjectRecord {
            id,
            type_name: node.type_instance.type_def.name.clone(),
            name: node.display_name.clone(),
            is_start: node.resulting_from.is_none(),
            is_end: node.is_terminal,
            distance_to_start: distance,
            params: render_object_params(graph, &node.type_instance.param_values),
        });
    }

    let mut methods = Vec::with_capacity(procedure.method_nodes.len());
    let mut connections = Vec::new();

    for method_node in &procedure.method_nodes {
        let method_id = next_id;
        next_id += 1;

        let mut inputs = Vec::with_capacity(method_node.input_type_nodes.len());
        for (port_name, &type_idx) in &method_node.input_type_nodes {
            let port_id = next_id;
            next_id += 1;
            let method_input = method_node
                .method
                .inputs
                .get(port_name)
                .expect("reconstructor only ever names ports declared on the method");
            inputs.push(PortRecord {
                id: port_id,
                name: port_name.clone(),
                constraints: render_constraints(graph, &method_input.param_constraints),
            });
            connections.push(Connection {
                from_id: object_ids[type_idx],
                to_id: port_id,
            });
        }

        let mut outputs = Vec::with_capacity(method_node.output_type_nodes.len());
        for (port_name, &type_idx) in &method_node.output_type_nodes {
            let port_id = next_id;
            next_id += 1;
            let output_port = method_node
                .method
                .outputs
                .get(port_name)
                .expect("reconstructor only ever names ports declared on the method");
            outputs.push(PortRecord {
                id: port_id,
                name: port_name.clone(),
                constraints: render_constraints(graph, &output_port.param_statements),
            });
            connections.push(Connection {
                from_id: port_id,
                to_id: object_ids[type_idx],
            });
        }

        methods.push(MethodRecord {
            id: method_id,
            name: method_node.method.name.clone(),
            description: method_node.method.description.clone(),
            inputs,
            outputs: vec![outputs],
        });
    }

    PlanResponse {
        objects,
        methods,
        connections,
        next_id,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::instance::TypeInstance;
    use crate::model::TypeDefinition;
    use crate::reconstruct::SolutionProcedureTypeNode;
    use std::rc::Rc;

    #[test]
    fn single_start_node_with_no_methods_renders_one_object_and_no_connections() {
        let graph = KnowledgeGraph::new();
        let td = Rc::new(TypeDefinition::new("TypeWithoutParams", IndexMap::new()));
        let instance = TypeInstance::new(td, BTreeMap::new());
        let procedure = SolutionProcedure {
            type_nodes: vec![SolutionProcedureTypeNode {
                resulting_from: None,
                type_instance: instance,
                display_name: "x".to_string(),
                is_terminal: true,
            }],
            method_nodes: vec![],
        };

        let response = render(&graph, &procedure);
        assert_eq!(response.objects.len(), 1);
        assert!(response.objects[0].is_start);
        assert!(response.objects[0].is_end);
        assert_eq!(response.objects[0].distance_to_start, 0);
        assert!(response.methods.is_empty());
        assert!(response.connections.is_empty());
        assert_eq!(response.next_id, 1);
    }
}
