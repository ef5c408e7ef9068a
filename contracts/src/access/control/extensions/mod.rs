//! Common extensions to the role registry.
pub mod enumerable;

pub use enumerable::{Error as EnumerableError, IAccessControlEnumerable};
