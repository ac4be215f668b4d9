//! See following macros:
//!
//! - [`Resource`]
//! - [`Meta`]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![allow(clippy::std_instead_of_core, reason = "proc-macro lib")]
#![allow(clippy::std_instead_of_alloc, reason = "proc-macro lib")]

use proc_macro::TokenStream;
use syn::{DeriveInput, parse_macro_input};

static JSONAPI_ATTRIBUTE_NAME: &str = "jsonapi";

// -----------------------------------------------------------------------------
// Modules

mod derive_data;
mod impls;
mod path;

// -----------------------------------------------------------------------------
// Macros

/// Which trait a derive implements.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum DeriveKind {
    Resource,
    Meta,
}

/// # Derive Resource
///
/// Implements `Resource` for a struct with named or tuple fields.
///
/// Every field taking part in the document carries one descriptor:
///
/// ```rust, ignore
/// #[derive(Resource)]
/// struct Person {
///     #[jsonapi("primary,people")]
///     id: u64,
///     #[jsonapi("client-id")]
///     client_id: String,
///     #[jsonapi("attr,name")]
///     name: String,
///     #[jsonapi("attr,nickname,omitempty")]
///     nickname: Option<String>,
///     #[jsonapi("relation,pets,omitempty")]
///     pets: Vec<Animal>,
///     // Not part of the document.
///     cache: Vec<u8>,
/// }
/// ```
///
/// Exactly one field must be `primary`. Fields are reported in declaration
/// order; fields without `#[jsonapi]` are skipped.
///
/// Descriptors are checked when the macro expands, a malformed descriptor is a
/// compile error pointing at the string literal.
///
/// Field types:
///
/// - `primary`: anything `Serialize`; strings and integers are accepted when
///   marshaling, other values fail with `BadPrimaryKeyType`.
/// - `client-id`: anything `AsRef<str>`.
/// - `attr`: anything implementing `Attribute`.
/// - `relation`: anything implementing `Relation` (`Option<T>`, `Vec<T>`).
#[proc_macro_derive(Resource, attributes(jsonapi))]
pub fn derive_resource(input: TokenStream) -> TokenStream {
    let ast = parse_macro_input!(input as DeriveInput);

    impls::match_jsonapi_impls(ast, DeriveKind::Resource)
}

/// # Derive Meta
///
/// Implements `Meta` for a flat struct.
///
/// Descriptors are `<name>[,omitempty]`, every tagged field must implement
/// `Attribute`:
///
/// ```rust, ignore
/// #[derive(Meta)]
/// struct Page {
///     #[jsonapi("total")]
///     total: u64,
///     #[jsonapi("next,omitempty")]
///     next: Option<String>,
/// }
/// ```
#[proc_macro_derive(Meta, attributes(jsonapi))]
pub fn derive_meta(input: TokenStream) -> TokenStream {
    let ast = parse_macro_input!(input as DeriveInput);

    impls::match_jsonapi_impls(ast, DeriveKind::Meta)
}
