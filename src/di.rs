//! Dependency injection infrastructure.
//!
//! Compile-time dependency injection using the `FromRef` trait and the
//! derive macros from `di-macros`.
//!
//! - `FromRef<T>`: Trait for extracting a value from a reference to `T`
//! - `#[derive(Context)]`: Makes each field of a struct extractable via `FromRef`
//! - `#[derive(FromContext)]`: Generates `FromRef` impl by resolving each field
//!
//! # Example
//!
//! ```ignore
//! use crate::di::FromRef;
//!
//! let ctx = Context::new(client, config);
//! let models = ModelService::from_ref(&ctx);
//! let game = models.get_model::<Content>(ModelKind::Game, &Filter::node_id(id)).await?;
//! ```

/// Trait for extracting a value from a reference to another type.
pub trait FromRef<T> {
    fn from_ref(input: &T) -> Self;
}

/// Blanket implementation: any Clone type can be extracted from itself.
impl<T: Clone> FromRef<T> for T {
    fn from_ref(input: &T) -> Self {
        input.clone()
    }
}

pub use di_macros::{Context, FromContext};
