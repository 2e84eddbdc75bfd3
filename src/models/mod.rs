//! Domain models for the game catalog graph.

mod content;
mod entity;
mod filter;
mod input;
mod kind;
mod view;

pub use content::{format_release_date, parse_release_date, Content, DATE_FORMAT};
pub use entity::{generate_node_id, Entity};
pub use filter::{Filter, OrderBy, DEFAULT_ORDER_PROPERTY};
pub use input::{ModelInput, NewContent, NewEntity, NewGame};
pub use kind::{CreateStrategy, ModelKind, Relation};
pub use view::{Connections, NodeView};
