//! # Docbase Derive Macros
//!
//! Procedural macros for implementing docbase persistence traits.
//!
//! ## Macros
//!
//! ### `Mappable`
//!
//! Derives entity to document conversion over `ValueCodec` fields. The `id`
//! field is stored under the `_id` document key; every other field keeps its
//! name.
//!
//! ### `Entity`
//!
//! Derives the identity and audit contract. The struct must carry named
//! fields `id: String`, `created_at` and `updated_at` (both
//! `DateTime<Utc>`).
//!
//! - `#[entity(collection = "name")]` sets the backing collection
//!   (default: snake_cased type name)
//! - `#[entity(key = "native" | "string")]` picks the key format
//!   (default: native)
//!
//! # Examples
//!
//! ```rust,ignore
//! use docbase_derive::{Entity, Mappable};
//!
//! #[derive(Clone, Default, Entity, Mappable)]
//! #[entity(collection = "books")]
//! pub struct Book {
//!     pub id: String,
//!     pub created_at: DateTime<Utc>,
//!     pub updated_at: DateTime<Utc>,
//!     pub title: String,
//!     pub year: i64,
//! }
//! ```

extern crate proc_macro;
mod entity;
mod mappable;

use crate::entity::generate_entity_for_struct;
use crate::mappable::generate_mappable_for_struct;
use proc_macro::TokenStream;
use syn::{Data, DeriveInput};

/// Derives the `Mappable` trait for document conversion.
///
/// # Errors
///
/// Returns a compile error if:
/// - The type is an enum or union
/// - The struct has unnamed fields
#[proc_macro_derive(Mappable)]
pub fn derive_mappable(input: TokenStream) -> TokenStream {
    let ast = syn::parse_macro_input!(input as DeriveInput);

    match ast.data {
        Data::Struct(ref data) => match generate_mappable_for_struct(&ast, data) {
            Ok(token_stream) => token_stream,
            Err(e) => {
                let error = syn::Error::new_spanned(
                    &ast,
                    format!(
                        "Failed to derive Mappable for struct '{}': {}.\n\
                         Make sure all fields implement the ValueCodec trait.",
                        ast.ident, e
                    ),
                );
                error.to_compile_error().into()
            }
        },
        Data::Enum(_) => {
            let error = syn::Error::new_spanned(
                &ast,
                "Cannot derive Mappable for enums. Only structs with named fields are supported.",
            );
            error.to_compile_error().into()
        }
        Data::Union(_) => {
            let error = syn::Error::new_spanned(
                &ast,
                "Cannot derive Mappable for unions. Only structs with named fields are supported.",
            );
            error.to_compile_error().into()
        }
    }
}

/// Derives the `Entity` trait for repository persistence.
///
/// Must be used together with `#[derive(Mappable)]` (or a hand-written
/// `Mappable` impl).
///
/// # Attributes
///
/// - `#[entity(collection = "name")]` - Backing collection name
/// - `#[entity(key = "native" | "string")]` - Key format
///
/// # Errors
///
/// Returns a compile error if:
/// - Applied to an enum, union, tuple struct, or unit struct
/// - The struct lacks `id`, `created_at`, or `updated_at` fields
#[proc_macro_derive(Entity, attributes(entity))]
pub fn derive_entity(input: TokenStream) -> TokenStream {
    let ast = syn::parse_macro_input!(input as DeriveInput);

    match ast.data {
        Data::Struct(ref data) => match generate_entity_for_struct(&ast, data) {
            Ok(token_stream) => token_stream,
            Err(e) => {
                let error = syn::Error::new_spanned(
                    &ast,
                    format!(
                        "Failed to derive Entity for struct '{}': {}.\n\
                         The struct needs named fields id: String, created_at and \
                         updated_at: DateTime<Utc>.",
                        ast.ident, e
                    ),
                );
                error.to_compile_error().into()
            }
        },
        Data::Enum(_) => {
            let error = syn::Error::new_spanned(
                &ast,
                "Cannot derive Entity for enums. Only structs are supported.",
            );
            error.to_compile_error().into()
        }
        Data::Union(_) => {
            let error = syn::Error::new_spanned(
                &ast,
                "Cannot derive Entity for unions. Only structs are supported.",
            );
            error.to_compile_error().into()
        }
    }
}
