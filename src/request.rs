//! Resolves a planning request's `start`/`target` shape against an
//! already-loaded [`KnowledgeGraph`], turning undeclared names and bad
//! literals into [`BadRequest`] rather than [`crate::errors::LoadError`].

use crate::catalogue::literal;
use crate::errors::BadRequest;
use crate::model::{KnowledgeGraph, MethodInput, ParameterValue};
use crate::instance::TypeInstance;
use indexmap::IndexMap;
use serde::Deserialize;
use serde_yaml::Value;
use std::collections::BTreeMap;

/// One entry of the `start` mapping: an object name to a typed literal.
#[derive(Debug, Deserialize)]
pub struct RawObjectLiteral {
    #[serde(rename = "type")]
    pub type_name: String,
    #[serde(default)]
    pub params: IndexMap<String, Value>,
}

/// The `target` request body: `{ "target": { type, params } }`.
#[derive(Debug, Deserialize)]
pub struct RawTarget {
    pub target: RawObjectLiteral,
}

fn instantiate_object(
    graph: &KnowledgeGraph,
    raw: &RawObjectLiteral,
) -> Result<(std::rc::Rc<crate::model::TypeDefinition>, BTreeMap<String, ParameterValue>), crate::errors::LoadError> {
    let type_def = graph
        .type_def(&raw.type_name)
        .cloned()
        .ok_or_else(|| crate::errors::LoadError::UnknownType(raw.type_name.clone()))?;

    let mut values = BTreeMap::new();
    for (param_name, raw_literal) in &raw.params {
        let param_def = type_def.params.get(param_name).ok_or_else(|| crate::errors::LoadError::UnknownParam {
            type_name: type_def.name.clone(),
            param_name: param_name.clone(),
        })?;
        values.insert(param_name.clone(), literal::instantiate(&param_def.param_type, raw_literal)?);
    }
    Ok((type_def, values))
}

/// Resolve the `start` mapping into named [`TypeInstance`]s, preserving
/// the caller's object names.
pub fn resolve_start(
    graph: &KnowledgeGraph,
    raw_start: &IndexMap<String, RawObjectLiteral>,
) -> Result<IndexMap<String, TypeInstance>, BadRequest> {
    let mut start = IndexMap::new();
    for (name, raw) in raw_start {
        if graph.type_def(&raw.type_name).is_none() {
            return Err(BadRequest::UnknownStartType {
                name: name.clone(),
                type_name: raw.type_name.clone(),
            });
        }
        let (type_def, values) = instantiate_object(graph, raw).map_err(|source| BadRequest::BadStartLiteral {
            name: name.clone(),
            source,
        })?;
        start.insert(name.clone(), TypeInstance::new(type_def, values));
    }
    Ok(start)
}

/// Resolve the `target` description into a [`MethodInput`]-shaped
/// predicate: [`crate::instance::TypeInstance::fits_input_description`]
/// is reused to test a candidate against it (`tune` is meaningless for a
/// target and is always `false`).
pub fn resolve_target(graph: &KnowledgeGraph, raw_target: &RawTarget) -> Result<MethodInput, BadRequest> {
    let raw = &raw_target.target;
    let type_def = graph
        .type_def(&raw.type_name)
        .cloned()
        .ok_or_else(|| BadRequest::UnknownTargetType(raw.type_name.clone()))?;

    let mut param_constraints = IndexMap::new();
    for (param_name, raw_literal) in &raw.params {
        let param_def = type_def
            .params
            .get(param_name)
            .ok_or_else(|| BadRequest::BadTargetLiteral(crate::errors::LoadError::UnknownParam {
                type_name: type_def.name.clone(),
                param_name: param_name.clone(),
            }))?;
        let value =
            literal::instantiate(&param_def.param_type, raw_literal).map_err(BadRequest::BadTargetLiteral)?;
        param_constraints.insert(param_name.clone(), value);
    }

    Ok(MethodInput {
        type_def,
        param_constraints,
        tune: false,
    })
}
