//! Trait and helpers for capability introspection.
pub mod erc165;
