//! Expansion for the `Context` and `FromContext` derives.

use proc_macro2::TokenStream;
use quote::quote;
use syn::punctuated::Punctuated;
use syn::token::Comma;
use syn::{Data, DeriveInput, Field, Fields, Type};

/// Named fields of a struct, or a spanned error naming the derive.
fn named_fields<'a>(
    input: &'a DeriveInput,
    derive: &str,
) -> syn::Result<&'a Punctuated<Field, Comma>> {
    match &input.data {
        Data::Struct(data) => match &data.fields {
            Fields::Named(fields) => Ok(&fields.named),
            _ => Err(syn::Error::new_spanned(
                input,
                format!("{} can only be derived for structs with named fields", derive),
            )),
        },
        _ => Err(syn::Error::new_spanned(
            input,
            format!("{} can only be derived for structs", derive),
        )),
    }
}

/// `#[derive(Context)]`: one `FromRef<Ctx>` impl per field type.
pub fn context(input: DeriveInput) -> syn::Result<TokenStream> {
    let name = &input.ident;
    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();

    let impls = named_fields(&input, "Context")?.iter().map(|field| {
        let field_name = &field.ident;
        let field_type = &field.ty;

        quote! {
            impl #impl_generics crate::FromRef<#name #ty_generics> for #field_type #where_clause {
                fn from_ref(ctx: &#name #ty_generics) -> Self {
                    ctx.#field_name.clone()
                }
            }
        }
    });

    Ok(quote! { #(#impls)* })
}

/// `#[derive(FromContext)]`: builds the struct by resolving each field from
/// the context (`Context` unless overridden with `#[from_context(Context = "...")]`).
pub fn from_context(input: DeriveInput) -> syn::Result<TokenStream> {
    let name = &input.ident;
    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();
    let context_type = context_type(&input)?;

    let field_inits = named_fields(&input, "FromContext")?.iter().map(|field| {
        let field_name = &field.ident;
        let field_type = &field.ty;

        quote! {
            #field_name: <#field_type as crate::FromRef<#context_type>>::from_ref(ctx)
        }
    });

    Ok(quote! {
        impl #impl_generics crate::FromRef<#context_type> for #name #ty_generics #where_clause {
            fn from_ref(ctx: &#context_type) -> Self {
                Self {
                    #(#field_inits),*
                }
            }
        }
    })
}

fn context_type(input: &DeriveInput) -> syn::Result<Type> {
    let mut context_ty = None;

    for attr in input.attrs.iter().filter(|a| a.path().is_ident("from_context")) {
        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("Context") {
                let value: syn::LitStr = meta.value()?.parse()?;
                context_ty = Some(value.parse()?);
                Ok(())
            } else {
                Err(meta.error("expected `Context = \"Type\"`"))
            }
        })?;
    }

    Ok(context_ty.unwrap_or_else(|| syn::parse_quote!(Context)))
}
