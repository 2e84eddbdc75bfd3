//! Compile-time dependency injection macros for the game catalog.
//!
//! - `#[derive(Context)]` makes a struct's fields extractable
//! - `#[derive(FromContext)]` auto-resolves a struct's fields from a context
//!
//! Generated code references `crate::FromRef`, which the consuming crate
//! defines and re-exports at its root.

use proc_macro::TokenStream;
use syn::{parse_macro_input, DeriveInput};

mod expand;

/// Derive macro for creating a DI context.
///
/// Generates a `FromRef` implementation for each field type so it can be
/// extracted from the context. All fields must implement `Clone`.
///
/// ```ignore
/// #[derive(Context, Clone)]
/// pub struct Context {
///     pub graph: AppGraph,
///     pub config: Arc<Config>,
/// }
///
/// // impl FromRef<Context> for AppGraph { ... }
/// // impl FromRef<Context> for Arc<Config> { ... }
/// ```
#[proc_macro_derive(Context)]
pub fn derive_context(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    expand::context(input)
        .unwrap_or_else(syn::Error::into_compile_error)
        .into()
}

/// Derive macro for types that can be constructed from a context.
///
/// Each field type must implement `FromRef<Context>`. The context type
/// defaults to `Context` and can be overridden with
/// `#[from_context(Context = "MyContext")]`.
///
/// ```ignore
/// #[derive(FromContext, Clone)]
/// pub struct ModelService {
///     nodes: NodeRepository, // resolved via NodeRepository::from_ref(ctx)
/// }
/// ```
#[proc_macro_derive(FromContext, attributes(from_context))]
pub fn derive_from_context(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    expand::from_context(input)
        .unwrap_or_else(syn::Error::into_compile_error)
        .into()
}
