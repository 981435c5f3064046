#![allow(unreachable_pub)]

//! # Macros
//!
//! Procedural macros for the panelkit workspace.
//!
//! Consumers add the crate as a regular dependency and annotate their error enums:
//! ```toml
//! [dependencies]
//! panelkit-derive.workspace = true
//! thiserror.workspace = true
//! ```

mod error;

use proc_macro::TokenStream;
use syn::{DeriveInput, parse_macro_input};

/// Attribute macro for declaring crate-level error enums.
///
/// The annotated enum gets `Debug` and `thiserror::Error` derived (unless already present),
/// plus the wiring every panelkit error shares:
///
/// * a companion `<Name>Ext` trait adding `.context(..)` to `Result<T, Name>` and to
///   `Result<T, Source>` for every variant carrying a `source` field;
/// * `From<Source>` for those same variants, so `?` works on upstream errors;
/// * `From<&'static str>` / `From<String>` when an `Internal { message, context }` variant exists;
/// * a private `format_context` helper used inside `#[error(..)]` strings.
///
/// Every variant must use named fields. Variants with a source must also declare
/// `context: Option<Cow<'static, str>>`.
///
/// # Example
///
/// ```rust,ignore
/// use std::borrow::Cow;
///
/// #[panelkit_derive::panelkit_error]
/// pub enum StoreError {
///     #[error("Store I/O error{}: {source}", format_context(.context))]
///     Io { source: std::io::Error, context: Option<Cow<'static, str>> },
///
///     #[error("Internal store error{}: {message}", format_context(.context))]
///     Internal { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
/// }
///
/// fn read() -> Result<String, StoreError> {
///     std::fs::read_to_string("prefs.toml").context("Reading preferences")
/// }
/// ```
#[proc_macro_attribute]
pub fn panelkit_error(_args: TokenStream, item: TokenStream) -> TokenStream {
    let input = parse_macro_input!(item as DeriveInput);
    error::expand(input).into()
}
