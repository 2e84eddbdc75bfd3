//! Game catalog - REST API over a Neo4j graph of games, DLCs, companies,
//! genres and categories.

pub mod api;
pub mod cli;
pub mod config;
pub mod context;
pub mod di;
pub mod error;
pub mod graph;
pub mod migrations;
pub mod models;
pub mod repositories;
pub mod services;

// Re-export FromRef at crate root for di-macros generated code
pub use di::FromRef;
