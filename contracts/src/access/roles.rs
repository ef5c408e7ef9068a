//! Role identifiers.
//!
//! Roles are referred to by their `bytes32` identifier, conventionally the
//! keccak-256 digest of a human readable name:
//!
//! ```
//! use role_registry::role_id;
//!
//! pub const MY_ROLE: alloy_primitives::B256 = role_id("MY_ROLE");
//! ```
use alloy_primitives::B256;

/// Human readable name of [`RoleRegistry::DEFAULT_ADMIN_ROLE`].
///
/// It is not a hash: the default admin role is the zero identifier.
///
/// [`RoleRegistry::DEFAULT_ADMIN_ROLE`]: crate::RoleRegistry::DEFAULT_ADMIN_ROLE
pub const DEFAULT_ADMIN_ROLE_NAME: &str = "DEFAULT_ADMIN_ROLE";

/// Returns the identifier of the role called `name`, i.e.
/// `keccak256(name)`.
///
/// Usable in `const` contexts.
#[must_use]
pub const fn role_id(name: &str) -> B256 {
    B256::new(
        keccak_const::Keccak256::new().update(name.as_bytes()).finalize(),
    )
}
