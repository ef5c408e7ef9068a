//! Role-based access control.
//!
//! This is a lightweight version that doesn't allow enumerating role members
//! except through the [`Log`]s returned by mutations, or through the
//! [`extensions::enumerable`] queries.
//!
//! Roles are referred to by their `bytes32` identifier. These should be exposed
//! in the external API and be unique. The best way to achieve this is by using
//! `pub const` hash digests:
//!
//! ```
//! pub const MY_ROLE: alloy_primitives::B256 = role_registry::role_id("MY_ROLE");
//! ```
//!
//! Roles can be used to represent a set of permissions. To restrict access to
//! an operation, use [`RoleRegistry::check_role`] with the acting account:
//!
//! ```rust,ignore
//! pub fn foo(&self, caller: Address) -> Result<(), Error> {
//!     self.registry.check_role(MY_ROLE, caller)?;
//!     // ...
//! }
//! ```
//!
//! Roles can be granted and revoked dynamically via the
//! [`IAccessControl::grant_role`] and [`IAccessControl::revoke_role`]
//! functions. Each role has an associated admin role, and only accounts that
//! have a `role`'s `admin_role` can call [`IAccessControl::grant_role`] and
//! [`IAccessControl::revoke_role`].
//!
//! By default, the admin role for all roles is
//! [`RoleRegistry::DEFAULT_ADMIN_ROLE`], which means that only accounts with
//! this role will be able to grant or revoke other roles. More complex role
//! relationships can be created by using [`RoleRegistry::set_role_admin`].
//!
//! WARNING: The [`RoleRegistry::DEFAULT_ADMIN_ROLE`] is also its own admin: it
//! has permission to grant and revoke this role. Extra precautions should be
//! taken to secure accounts that have been granted it.
//!
//! Every operation runs under a single lock, so the admin check of
//! [`IAccessControl::grant_role`] and [`IAccessControl::revoke_role`] and the
//! change it gates can't be interleaved with any other mutation.
use std::{
    collections::{BTreeMap, BTreeSet},
    sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard},
};

use alloy_primitives::{aliases::B32, Address, B256};
use alloy_sol_types::SolError;
use role_registry_proc::interface_id;
pub use sol::*;

use crate::{
    access::log::{Event, Log},
    utils::introspection::erc165::IErc165,
};

pub mod extensions;

#[cfg_attr(coverage_nightly, coverage(off))]
mod sol {
    use alloy_sol_macro::sol;

    sol! {
        /// Emitted when `new_admin_role` is set as `role`'s admin role, replacing
        /// `previous_admin_role`.
        ///
        /// `DEFAULT_ADMIN_ROLE` is the starting admin for all roles, despite
        /// `RoleAdminChanged` not being emitted signaling this.
        #[derive(Debug, PartialEq, Eq)]
        #[allow(missing_docs)]
        event RoleAdminChanged(bytes32 indexed role, bytes32 indexed previous_admin_role, bytes32 indexed new_admin_role);
        /// Emitted when `account` is granted `role`.
        ///
        /// `sender` is the account that performed the grant. It bears the
        /// admin role of `role`, or is the bootstrap identity.
        #[derive(Debug, PartialEq, Eq)]
        #[allow(missing_docs)]
        event RoleGranted(bytes32 indexed role, address indexed account, address indexed sender);
        /// Emitted when `account` is revoked `role`.
        ///
        /// `sender` is the account that performed the revocation:
        ///   - if using `revoke_role`, it is the admin role bearer.
        ///   - if using `renounce_role`, it is the role bearer (i.e. `account`).
        #[derive(Debug, PartialEq, Eq)]
        #[allow(missing_docs)]
        event RoleRevoked(bytes32 indexed role, address indexed account, address indexed sender);
    }

    sol! {
        /// The `account` is missing a role.
        ///
        /// * `account` - Account that was found to not be authorized.
        /// * `needed_role` - The missing role.
        #[derive(Debug, PartialEq, Eq)]
        #[allow(missing_docs)]
        error AccessControlUnauthorizedAccount(address account, bytes32 needed_role);
        /// The `sender` tried to renounce `role` for another account.
        ///
        /// * `role` - The role that was to be renounced.
        /// * `sender` - Account that attempted the renounce.
        /// * `confirmation` - Account the role was to be renounced for.
        ///
        /// NOTE: Don't confuse with [`AccessControlUnauthorizedAccount`].
        #[derive(Debug, PartialEq, Eq)]
        #[allow(missing_docs)]
        error AccessControlBadConfirmation(bytes32 role, address sender, address confirmation);
    }
}

/// An error that occurred in the implementation of a [`RoleRegistry`].
#[derive(thiserror::Error, Debug, PartialEq, Eq)]
pub enum Error {
    /// The caller account is missing a role.
    #[error("account {} is missing role {}", .0.account, .0.needed_role)]
    UnauthorizedAccount(AccessControlUnauthorizedAccount),
    /// The caller of a function is not the expected one.
    #[error(
        "account {} cannot renounce role {} for account {}",
        .0.sender, .0.role, .0.confirmation
    )]
    BadConfirmation(AccessControlBadConfirmation),
}

impl From<Error> for Vec<u8> {
    /// ABI encodes the error, selector included.
    fn from(error: Error) -> Self {
        match error {
            Error::UnauthorizedAccount(e) => e.abi_encode(),
            Error::BadConfirmation(e) => e.abi_encode(),
        }
    }
}

/// State of a single role.
#[derive(Debug, Default)]
pub(crate) struct RoleData {
    /// Accounts that are members of this role.
    pub(crate) members: BTreeSet<Address>,
    /// The admin role for this role.
    pub(crate) admin_role: B256,
}

/// Role identifier -> role information, plus the position of the next
/// [`Log`].
///
/// Entries are created on first mutation. A role without an entry behaves
/// exactly like one with no members and the default admin role.
#[derive(Debug, Default)]
pub(crate) struct Roles {
    roles: BTreeMap<B256, RoleData>,
    next_sequence: u64,
}

impl Roles {
    pub(crate) fn has_role(&self, role: B256, account: Address) -> bool {
        self.roles.get(&role).is_some_and(|data| data.members.contains(&account))
    }

    pub(crate) fn get_role_admin(&self, role: B256) -> B256 {
        self.roles.get(&role).map_or(
            B256::new(RoleRegistry::DEFAULT_ADMIN_ROLE),
            |data| data.admin_role,
        )
    }

    pub(crate) fn members(&self, role: B256) -> Option<&BTreeSet<Address>> {
        self.roles.get(&role).map(|data| &data.members)
    }

    pub(crate) fn len(&self) -> usize {
        self.roles.len()
    }

    pub(crate) fn check_role(
        &self,
        role: B256,
        account: Address,
    ) -> Result<(), Error> {
        if !self.has_role(role, account) {
            tracing::debug!(%role, %account, "role check denied");
            return Err(Error::UnauthorizedAccount(
                AccessControlUnauthorizedAccount { account, needed_role: role },
            ));
        }

        Ok(())
    }

    /// Grants `role` to `account` without access restriction.
    ///
    /// Returns `None` if `account` already had `role`.
    pub(crate) fn grant(
        &mut self,
        role: B256,
        account: Address,
        sender: Address,
    ) -> Option<Log> {
        if self.has_role(role, account) {
            return None;
        }

        self.roles.entry(role).or_default().members.insert(account);
        tracing::debug!(%role, %account, %sender, "role granted");
        Some(self.record(RoleGranted { role, account, sender }))
    }

    /// Revokes `role` from `account` without access restriction.
    ///
    /// Returns `None` if `account` didn't have `role`.
    pub(crate) fn revoke(
        &mut self,
        role: B256,
        account: Address,
        sender: Address,
    ) -> Option<Log> {
        let data = self.roles.get_mut(&role)?;
        if !data.members.remove(&account) {
            return None;
        }

        tracing::debug!(%role, %account, %sender, "role revoked");
        Some(self.record(RoleRevoked { role, account, sender }))
    }

    /// Sets `new_admin_role` as `role`'s admin role. Always recorded, even if
    /// the admin role doesn't change.
    pub(crate) fn set_role_admin(
        &mut self,
        role: B256,
        new_admin_role: B256,
    ) -> Log {
        let previous_admin_role = self.get_role_admin(role);
        self.roles.entry(role).or_default().admin_role = new_admin_role;
        tracing::debug!(
            %role,
            %previous_admin_role,
            %new_admin_role,
            "role admin changed"
        );
        self.record(RoleAdminChanged {
            role,
            previous_admin_role,
            new_admin_role,
        })
    }

    fn record(&mut self, event: impl Into<Event>) -> Log {
        let sequence = self.next_sequence;
        self.next_sequence += 1;
        Log { sequence, event: event.into() }
    }
}

/// State of a [`RoleRegistry`].
///
/// Created by finishing a [`Bootstrap`](crate::Bootstrap), and shared by
/// reference (e.g. behind an `Arc`) between the operations it protects.
#[derive(Debug)]
pub struct RoleRegistry {
    roles: RwLock<Roles>,
}

/// Interface for a [`RoleRegistry`].
///
/// The acting account is passed explicitly to every mutation and marked
/// `#[sender]`, so it doesn't take part in the interface id.
#[interface_id]
pub trait IAccessControl {
    /// The error type associated with this interface implementation.
    type Error: Into<Vec<u8>>;

    /// Returns `true` if `account` has been granted `role`.
    ///
    /// # Arguments
    ///
    /// * `&self` - Read access to the registry's state.
    /// * `role` - The role identifier.
    /// * `account` - The account to check for membership.
    fn has_role(&self, role: B256, account: Address) -> bool;

    /// Returns the admin role that controls `role`. See
    /// [`IAccessControl::grant_role`] and [`IAccessControl::revoke_role`].
    ///
    /// To change a role's admin, use [`RoleRegistry::set_role_admin`].
    ///
    /// # Arguments
    ///
    /// * `&self` - Read access to the registry's state.
    /// * `role` - The role identifier.
    fn get_role_admin(&self, role: B256) -> B256;

    /// Grants `role` to `account`.
    ///
    /// If `account` had not been already granted `role`, returns a
    /// [`RoleGranted`] log.
    ///
    /// # Arguments
    ///
    /// * `&self` - Write access to the registry's state.
    /// * `role` - The role identifier.
    /// * `account` - The account which will be granted the role.
    /// * `sender` - The account performing the grant.
    ///
    /// # Errors
    ///
    /// * [`Error::UnauthorizedAccount`] - If `sender` has not been granted
    ///   `role`'s admin role.
    ///
    /// # Events
    ///
    /// * [`RoleGranted`]
    fn grant_role(
        &self,
        role: B256,
        account: Address,
        #[sender] sender: Address,
    ) -> Result<Option<Log>, Self::Error>;

    /// Revokes `role` from `account`.
    ///
    /// If `account` had been granted `role`, returns a [`RoleRevoked`] log.
    ///
    /// # Arguments
    ///
    /// * `&self` - Write access to the registry's state.
    /// * `role` - The role identifier.
    /// * `account` - The account which will be revoked the role.
    /// * `sender` - The account performing the revocation.
    ///
    /// # Errors
    ///
    /// * [`Error::UnauthorizedAccount`] - If `sender` has not been granted
    ///   `role`'s admin role.
    ///
    /// # Events
    ///
    /// * [`RoleRevoked`].
    fn revoke_role(
        &self,
        role: B256,
        account: Address,
        #[sender] sender: Address,
    ) -> Result<Option<Log>, Self::Error>;

    /// Revokes `role` from the calling account.
    ///
    /// Roles are often managed via [`Self::grant_role`] and
    /// [`Self::revoke_role`]: this function's purpose is to provide a mechanism
    /// for accounts to lose their privileges if they are compromised (such as
    /// when a trusted device is misplaced). No admin role is required.
    ///
    /// # Arguments
    ///
    /// * `&self` - Write access to the registry's state.
    /// * `role` - The role identifier.
    /// * `confirmation` - The account which will be revoked the role.
    /// * `sender` - The account performing the renounce.
    ///
    /// # Errors
    ///
    /// * [`Error::BadConfirmation`] - If `sender` is not the `confirmation`
    ///   address, even when `sender` bears `role`'s admin role.
    ///
    /// # Events
    ///
    /// * [`RoleRevoked`] - If the calling account has its `role` revoked.
    fn renounce_role(
        &self,
        role: B256,
        confirmation: Address,
        #[sender] sender: Address,
    ) -> Result<Option<Log>, Self::Error>;
}

impl IAccessControl for RoleRegistry {
    type Error = Error;

    fn has_role(&self, role: B256, account: Address) -> bool {
        self.read().has_role(role, account)
    }

    fn get_role_admin(&self, role: B256) -> B256 {
        self.read().get_role_admin(role)
    }

    fn grant_role(
        &self,
        role: B256,
        account: Address,
        sender: Address,
    ) -> Result<Option<Log>, Self::Error> {
        let mut roles = self.write();
        let admin_role = roles.get_role_admin(role);
        roles.check_role(admin_role, sender)?;
        Ok(roles.grant(role, account, sender))
    }

    fn revoke_role(
        &self,
        role: B256,
        account: Address,
        sender: Address,
    ) -> Result<Option<Log>, Self::Error> {
        let mut roles = self.write();
        let admin_role = roles.get_role_admin(role);
        roles.check_role(admin_role, sender)?;
        Ok(roles.revoke(role, account, sender))
    }

    fn renounce_role(
        &self,
        role: B256,
        confirmation: Address,
        sender: Address,
    ) -> Result<Option<Log>, Self::Error> {
        if sender != confirmation {
            return Err(Error::BadConfirmation(AccessControlBadConfirmation {
                role,
                sender,
                confirmation,
            }));
        }

        Ok(self.write().revoke(role, confirmation, sender))
    }
}

impl RoleRegistry {
    /// The default admin role. `[0; 32]` by default.
    pub const DEFAULT_ADMIN_ROLE: [u8; 32] = [0; 32];

    pub(crate) fn from_roles(roles: Roles) -> Self {
        Self { roles: RwLock::new(roles) }
    }

    /// Sets `new_admin_role` as `role`'s admin role.
    ///
    /// This function performs no access check: gating it, if needed, is up
    /// to the caller. Unlike grants and revocations it is always recorded,
    /// even when `new_admin_role` is already `role`'s admin role.
    ///
    /// An admin chain may cycle, e.g. a role administering itself. Only
    /// current members of the chain can then grant or revoke the role.
    ///
    /// # Arguments
    ///
    /// * `&self` - Write access to the registry's state.
    /// * `role` - The identifier of the role we are changing the admin to.
    /// * `new_admin_role` - The new admin role.
    ///
    /// # Events
    ///
    /// * [`RoleAdminChanged`].
    pub fn set_role_admin(&self, role: B256, new_admin_role: B256) -> Log {
        self.write().set_role_admin(role, new_admin_role)
    }

    /// Checks if `account` has been granted `role`.
    ///
    /// Evaluated against the current state on every call. Protected
    /// operations call this with the acting account before doing anything.
    ///
    /// # Arguments
    ///
    /// * `&self` - Read access to the registry's state.
    /// * `role` - The role identifier.
    /// * `account` - The account to check for membership.
    ///
    /// # Errors
    ///
    /// * [`Error::UnauthorizedAccount`] - If `account` has not been granted
    ///   `role`.
    pub fn check_role(&self, role: B256, account: Address) -> Result<(), Error> {
        self.read().check_role(role, account)
    }

    /// Runs `f` with a read lock held on the registry's state.
    pub(crate) fn with_roles<T>(&self, f: impl FnOnce(&Roles) -> T) -> T {
        f(&self.read())
    }

    // No operation can panic halfway through a mutation, so a poisoned lock
    // still guards consistent state.
    fn read(&self) -> RwLockReadGuard<'_, Roles> {
        self.roles.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, Roles> {
        self.roles.write().unwrap_or_else(PoisonError::into_inner)
    }
}

impl IErc165 for RoleRegistry {
    fn supports_interface(&self, interface_id: B32) -> bool {
        <Self as IAccessControl>::interface_id() == interface_id
            || <Self as extensions::IAccessControlEnumerable>::interface_id()
                == interface_id
            || <Self as IErc165>::interface_id() == interface_id
    }
}
