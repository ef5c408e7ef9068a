//! Role-based access control: role membership, the admin-role hierarchy and
//! the records of their changes.
pub mod bootstrap;
pub mod control;
pub mod log;
pub mod roles;

pub use control::{Error as AccessControlError, IAccessControl, RoleRegistry};
