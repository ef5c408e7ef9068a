//! Initialization phase of a [`RoleRegistry`].
//!
//! [`Bootstrap::setup_role`] grants roles without checking any admin role, so
//! it must never be reachable once the system is running. It only exists on
//! [`Bootstrap`], which is consumed by [`Bootstrap::finish`]: after that, the
//! only way to change membership is through the checks of
//! [`IAccessControl`](crate::IAccessControl).
use alloy_primitives::{Address, B256};

use crate::access::{
    control::{RoleRegistry, Roles},
    log::Log,
};

/// Builder for a [`RoleRegistry`], owned by the bootstrapping identity.
///
/// # Examples
///
/// ```
/// use alloy_primitives::address;
/// use role_registry::{role_id, Bootstrap, IAccessControl, RoleRegistry};
///
/// let deployer = address!("0x00000000000000000000000000000000000000a0");
/// let mut bootstrap = Bootstrap::new(deployer);
/// bootstrap.setup_role(RoleRegistry::DEFAULT_ADMIN_ROLE.into(), deployer);
/// bootstrap.set_role_admin(role_id("MINTER_ROLE"), role_id("MANAGER_ROLE"));
///
/// let registry = bootstrap.finish();
/// assert_eq!(
///     registry.get_role_admin(role_id("MINTER_ROLE")),
///     role_id("MANAGER_ROLE")
/// );
/// ```
#[derive(Debug)]
pub struct Bootstrap {
    identity: Address,
    roles: Roles,
}

impl Bootstrap {
    /// Starts bootstrapping a registry on behalf of `identity`, which is
    /// recorded as the `sender` of every role set up in this phase.
    #[must_use]
    pub fn new(identity: Address) -> Self {
        Self { identity, roles: Roles::default() }
    }

    /// Returns the bootstrapping identity.
    #[must_use]
    pub fn identity(&self) -> Address {
        self.identity
    }

    /// Grants `role` to `account` without any access check.
    ///
    /// Returns a [`RoleGranted`](crate::access::control::RoleGranted) log, or
    /// `None` if `account` already had `role`.
    ///
    /// # Arguments
    ///
    /// * `&mut self` - Write access to the registry being set up.
    /// * `role` - The role identifier.
    /// * `account` - The account which will be granted the role.
    pub fn setup_role(&mut self, role: B256, account: Address) -> Option<Log> {
        self.roles.grant(role, account, self.identity)
    }

    /// Sets `new_admin_role` as `role`'s admin role. See
    /// [`RoleRegistry::set_role_admin`].
    pub fn set_role_admin(&mut self, role: B256, new_admin_role: B256) -> Log {
        self.roles.set_role_admin(role, new_admin_role)
    }

    /// Returns `true` if `account` has been set up with `role` so far.
    #[must_use]
    pub fn has_role(&self, role: B256, account: Address) -> bool {
        self.roles.has_role(role, account)
    }

    /// Ends the bootstrap phase and returns the live registry.
    #[must_use]
    pub fn finish(self) -> RoleRegistry {
        tracing::info!(
            identity = %self.identity,
            roles = self.roles.len(),
            "role registry bootstrapped"
        );
        RoleRegistry::from_roles(self.roles)
    }
}
