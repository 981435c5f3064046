//! Ready-made panels.

pub mod builtin;
pub mod form;

pub use form::{FormPanel, SAVED_PATH};
