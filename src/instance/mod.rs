//! The type-instance model: a fully-qualified artifact plus the
//! match-time predicates the search relies on.

pub mod type_instance;

pub use type_instance::TypeInstance;
