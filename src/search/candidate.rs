//! [`CandidateNode`] / [`CandidateEdge`]: the vertices and edges of the
//! candidate graph the Dijkstra search runs over.

use crate::apply::MethodApplication;
use crate::instance::TypeInstance;
use std::collections::hash_map::DefaultHasher;
use std::collections::HashSet;
use std::hash::{Hash, Hasher};

/// A vertex in the candidate graph: a set of available type instances,
/// plus the predecessor edge Dijkstra relaxation has settled on so far.
///
/// `available_types` is conceptually a *set* — equality and hashing never
/// depend on order; it is stored as a `Vec` because callers frequently need
/// to iterate it in a stable order (response rendering, reconstruction),
/// but every comparison and hash computation in this module treats it as
/// unordered.
#[derive(Debug, Clone)]
pub struct CandidateNode {
    pub available_types: Vec<TypeInstance>,
    pub resulting_from: Option<CandidateEdge>,
    pub cum_dist: u64,
}

impl CandidateNode {
    pub fn start(available_types: Vec<TypeInstance>) -> Self {
        Self {
            available_types,
            resulting_from: None,
            cum_dist: 0,
        }
    }

    /// True iff `self` and `other` have the same set of available types,
    /// "Node equality".
    pub fn same_availability(&self, other: &[TypeInstance]) -> bool {
        let a: HashSet<&TypeInstance> = self.available_types.iter().collect();
        let b: HashSet<&TypeInstance> = other.iter().collect();
        a == b
    }

    /// An order-independent digest of `available_types`, used to bucket
    /// candidate nodes before falling back to full set comparison.
    pub fn signature(&self) -> u64 {
        signature_of(&self.available_types)
    }
}

pub fn signature_of(types: &[TypeInstance]) -> u64 {
    types.iter().fold(0u64, |acc, ti| {
        let mut hasher = DefaultHasher::new();
        ti.hash(&mut hasher);
        acc ^ hasher.finish()
    })
}

/// An edge in the candidate graph: applying `via_method` from `from_node`.
///
/// `from_node` is the index of the predecessor in the search's node
/// arena, not an owned `CandidateNode` — keeping the predecessor chain a
/// chain of indices is what makes reconstruction a simple
/// backward walk instead of a borrow-checker fight.
#[derive(Debug, Clone)]
pub struct CandidateEdge {
    pub from_node: usize,
    pub via_method: MethodApplication,
}
