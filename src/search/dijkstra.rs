//! The candidate-graph search: a Dijkstra traversal over
//! [`CandidateNode`]s, with edges enumerated from [`MethodApplication`]s.

use super::candidate::{signature_of, CandidateEdge, CandidateNode};
use crate::apply::MethodApplication;
use crate::config::EngineConfig;
use crate::instance::TypeInstance;
use crate::model::{KnowledgeGraph, MethodInput};
use indexmap::IndexMap;
use std::cmp::Reverse;
use std::collections::{BinaryHeap, HashMap, HashSet};
use std::time::Instant;

/// The result of a completed search.
pub enum SearchOutcome {
    Solved { nodes: Vec<CandidateNode>, goal: usize },
    NoSolution,
    Cancelled,
    ResourceExhausted,
}

/// Run a Dijkstra search over candidate graphs from `start_types` towards
/// `target`, honoring `config`'s deadline and visited-set cap.
pub fn search(
    graph: &KnowledgeGraph,
    start_types: Vec<TypeInstance>,
    target: &MethodInput,
    config: &EngineConfig,
) -> SearchOutcome {
    let start = CandidateNode::start(start_types);
    let mut signature_index: HashMap<u64, Vec<usize>> = HashMap::new();
    signature_index.entry(start.signature()).or_default().push(0);
    let mut nodes: Vec<CandidateNode> = vec![start];

    let mut visited: HashSet<usize> = HashSet::new();
    let mut frontier: BinaryHeap<Reverse<(u64, u64, usize)>> = BinaryHeap::new();
    let mut seq: u64 = 0;
    let mut current = 0usize;

    loop {
        if config.deadline_elapsed() {
            log::warn!("search: cancelled after {} visited nodes", visited.len());
            return SearchOutcome::Cancelled;
        }
        if config.visited_cap_exceeded(nodes.len()) {
            log::warn!("search: resource exhausted after {} nodes", nodes.len());
            return SearchOutcome::ResourceExhausted;
        }

        visited.insert(current);
        log::debug!(
            "search: expanding node {} (cum_dist={}, available={})",
            current,
            nodes[current].cum_dist,
            nodes[current].available_types.len()
        );

        for method in graph.methods_in_order() {
            if config.deadline_elapsed() {
                return SearchOutcome::Cancelled;
            }

            let bindable: Vec<(&String, &MethodInput)> = method.bindable_inputs().collect();
            let options: Vec<(String, Vec<TypeInstance>)> = bindable
                .iter()
                .map(|(name, input)| {
                    let fits: Vec<TypeInstance> = nodes[current]
                        .available_types
                        .iter()
                        .filter(|ti| ti.fits_input_description(input))
                        .cloned()
                        .collect();
                    ((*name).clone(), fits)
                })
                .collect();

            for binding in cartesian_bindings(&options) {
                let application = MethodApplication::new(method.clone(), binding);
                let produced = application.resulting_types();

                let merged = merge_new_types(&nodes[current].available_types, produced);
                let Some(new_available) = merged else {
                    continue;
                };

                let edge_weight = 1 + method.outputs.len() as u64;
                let new_cum_dist = nodes[current].cum_dist + edge_weight;
                let new_signature = signature_of(&new_available);

                let existing = signature_index
                    .get(&new_signature)
                    .into_iter()
                    .flatten()
                    .find(|&&idx| nodes[idx].same_availability(&new_available))
                    .copied();

                let edge = CandidateEdge {
                    from_node: current,
                    via_method: application,
                };

                match existing {
                    Some(idx) => {
                        if new_cum_dist < nodes[idx].cum_dist {
                            nodes[idx].resulting_from = Some(edge);
                            nodes[idx].cum_dist = new_cum_dist;
                            seq += 1;
                            frontier.push(Reverse((new_cum_dist, seq, idx)));
                        }
                    }
                    None => {
                        let idx = nodes.len();
                        nodes.push(CandidateNode {
                            available_types: new_available,
                            resulting_from: Some(edge),
                            cum_dist: new_cum_dist,
                        });
                        signature_index.entry(new_signature).or_default().push(idx);
                        seq += 1;
                        frontier.push(Reverse((new_cum_dist, seq, idx)));
                    }
                }
            }
        }

        if nodes[current]
            .available_types
            .iter()
            .any(|ti| ti.fits_input_description(target))
        {
            log::info!("search: goal satisfied at node {}", current);
            return SearchOutcome::Solved { nodes, goal: current };
        }

        loop {
            match frontier.pop() {
                None => {
                    log::info!("search: frontier exhausted without reaching goal");
                    return SearchOutcome::NoSolution;
                }
                Some(Reverse((dist, _, idx))) => {
                    if visited.contains(&idx) || dist != nodes[idx].cum_dist {
                        continue; // stale entry, Dijkstra lazy deletion
                    }
                    current = idx;
                    break;
                }
            }
        }
    }
}

/// All ways to pick one `TypeInstance` per port, in port-declaration order.
/// Returns no bindings at all if any port has zero candidates.
fn cartesian_bindings(options: &[(String, Vec<TypeInstance>)]) -> Vec<IndexMap<String, TypeInstance>> {
    let mut combinations: Vec<IndexMap<String, TypeInstance>> = vec![IndexMap::new()];

    for (name, candidates) in options {
        if candidates.is_empty() {
            return Vec::new();
        }
        let mut next = Vec::with_capacity(combinations.len() * candidates.len());
        for partial in &combinations {
            for candidate in candidates {
                let mut extended = partial.clone();
                extended.insert(name.clone(), candidate.clone());
                next.push(extended);
            }
        }
        combinations = next;
    }

    combinations
}

/// Fold `produced` into `existing` under the relaxation rule: a new
/// instance is dropped if an existing one already subsumes it, and
/// replaces an existing one it subsumes. Returns `None` if no output made
/// progress — the edge should be pruned since it would produce a node
/// equal to its parent.
fn merge_new_types(
    existing: &[TypeInstance],
    produced: IndexMap<String, TypeInstance>,
) -> Option<Vec<TypeInstance>> {
    let mut next = existing.to_vec();
    let mut progress = false;

    for (_, candidate) in produced {
        let mut redundant = false;
        let mut replace_at = None;

        for (i, old) in next.iter().enumerate() {
            if old.subsumes(&candidate) {
                redundant = true;
                break;
            } else if candidate.subsumes(old) {
                replace_at = Some(i);
                break;
            }
        }

        if redundant {
            continue;
        } else if let Some(i) = replace_at {
            next[i] = candidate;
            progress = true;
        } else {
            next.push(candidate);
            progress = true;
        }
    }

    if progress {
        Some(next)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cartesian_bindings_is_empty_if_any_port_has_no_candidates() {
        let options = vec![("a".to_string(), vec![]), ("b".to_string(), vec![])];
        assert!(cartesian_bindings(&options).is_empty());
    }
}
