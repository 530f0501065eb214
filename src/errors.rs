//! Error taxonomy for the planning engine.
//!
//! `LoadError`, `BadRequest` and `InternalInvariant` are genuine errors:
//! they are fatal for the request they occur in and are propagated with
//! `?`. `NoSolution`, `Cancelled` and `ResourceExhausted` are *not*
//! errors — they are ordinary negative outcomes of a search and are
//! carried as [`PlanOutcome`] variants returned inside `Ok(..)`.

use thiserror::Error;

/// Failures while resolving a raw catalogue document into a [`crate::model::KnowledgeGraph`].
#[derive(Debug, Clone, Error)]
pub enum LoadError {
    #[error("unknown parameter type '{0}'")]
    UnknownParamType(String),

    #[error("unknown type '{0}'")]
    UnknownType(String),

    #[error("type '{type_name}' has no parameter named '{param_name}'")]
    UnknownParam { type_name: String, param_name: String },

    #[error("'{value}' is not a member of enum '{enum_name}'")]
    BadEnumValue { enum_name: String, value: String },

    #[error("method '{method}' reuses placeholder '{placeholder}' across incompatible parameter types")]
    DuplicatePlaceholder { method: String, placeholder: String },

    #[error("method '{method}' output '{output}' references placeholder '{placeholder}', which does not appear in any input constraint")]
    DanglingPlaceholder {
        method: String,
        output: String,
        placeholder: String,
    },

    #[error("method '{0}' has an 'outputs' section that mixes single-branch and multi-branch port shapes")]
    MalformedOutputs(String),

    #[error("catalogue document could not be parsed: {0}")]
    Parse(String),
}

/// Failures in a planning request itself (as opposed to the catalogue it targets).
#[derive(Debug, Clone, Error)]
pub enum BadRequest {
    #[error("start object '{name}' has undeclared type '{type_name}'")]
    UnknownStartType { name: String, type_name: String },

    #[error("target has undeclared type '{0}'")]
    UnknownTargetType(String),

    #[error("start object '{name}': {source}")]
    BadStartLiteral {
        name: String,
        #[source]
        source: LoadError,
    },

    #[error("target: {0}")]
    BadTargetLiteral(#[source] LoadError),
}

/// A bug in the engine itself.
///
/// These must never occur against a correctly validated catalogue. They are
/// programmer errors, not recoverable conditions, and are not meant to be
/// matched on by callers the way [`LoadError`]/[`BadRequest`] are.
#[derive(Debug, Clone, Error)]
pub enum InternalInvariant {
    #[error("reconstructor: input type instance for port '{port}' was never registered")]
    UnregisteredInput { port: String },

    #[error("goal-satisfying node reached but no type instance in it fits the target")]
    GoalNodeWithoutMatch,
}

/// The outcome of a planning request that completed without error.
///
/// `NoSolution`, `Cancelled` and `ResourceExhausted` are normal negative
/// results and are deliberately not part of the `Err` side of
/// a `Result` — only [`LoadError`], [`BadRequest`] and [`InternalInvariant`]
/// are.
#[derive(Debug)]
pub enum PlanOutcome {
    Solved(crate::reconstruct::SolutionProcedure),
    NoSolution,
    Cancelled,
    ResourceExhausted,
}

/// Top-level error returned by [`crate::plan::plan`].
#[derive(Debug, Error)]
pub enum PlanError {
    #[error(transparent)]
    Load(#[from] LoadError),

    #[error(transparent)]
    BadRequest(#[from] BadRequest),

    #[error("internal invariant violated: {0}")]
    Internal(#[from] InternalInvariant),
}
