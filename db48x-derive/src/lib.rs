//! Derive macro for `db48x_types::canonical::Canonical`.
//!
//! Mirrors the teacher stack's `fuel_derive` canonical-serialization
//! derive: `encoded_size`/`encode` are generated field-by-field with
//! `synstructure` (they only need to destructure `&self`); `decode`
//! reconstructs a value from a byte stream and is generated directly from
//! the parsed `syn::DeriveInput`, since synstructure has nothing to bind
//! when there is no existing value to match against.

#![deny(unused_must_use)]

extern crate proc_macro;

mod canonical;

use proc_macro::TokenStream;

/// Derive `Canonical` for a struct or a fieldless-or-not enum.
///
/// Structs encode their fields in declaration order. Enums are prefixed
/// with a LEB128-encoded variant index (declaration order), followed by
/// that variant's fields in order — the same shape as an object's type tag
/// followed by its payload (spec.md §3.1).
#[proc_macro_derive(Canonical)]
pub fn derive_canonical(input: TokenStream) -> TokenStream {
    let ast = syn::parse_macro_input!(input as syn::DeriveInput);
    canonical::derive(ast).into()
}
