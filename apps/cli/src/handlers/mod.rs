pub mod panel;
pub mod registry;
