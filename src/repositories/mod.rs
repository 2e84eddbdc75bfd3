//! Data access layer for graph operations.
//!
//! Repositories provide a clean abstraction over graph queries,
//! using the `FromContext` derive macro for dependency injection.

mod node;

pub use node::NodeRepository;
