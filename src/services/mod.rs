//! Business logic services.
//!
//! Services sit on top of repositories and are resolved from the
//! application context with the `FromContext` derive.

mod game;
mod model;
pub mod pagination;

pub use game::GameService;
pub use model::ModelService;
pub use pagination::{get_paginated_list, trim_list, Page, MAX_LIMIT};
