//! Extension of [`RoleRegistry`] that allows enumerating the members of each
//! role.
//!
//! Members are listed in ascending address order, so a given index keeps
//! pointing at the same account until membership changes.
use std::collections::BTreeSet;

use alloy_primitives::{Address, B256, U256};
use alloy_sol_types::SolError;
use role_registry_proc::interface_id;
pub use sol::*;

use crate::access::control::RoleRegistry;

#[cfg_attr(coverage_nightly, coverage(off))]
mod sol {
    use alloy_sol_macro::sol;

    sol! {
        /// The caller attempted to query a `role` member at an invalid `index`.
        #[derive(Debug, PartialEq, Eq)]
        #[allow(missing_docs)]
        error AccessControlEnumerableOutOfBounds(bytes32 role, uint256 index);
    }
}

/// An error that occurred in the implementation of an
/// [`IAccessControlEnumerable`] registry.
#[derive(thiserror::Error, Debug, PartialEq, Eq)]
pub enum Error {
    /// The caller attempted to query a `role` member at an invalid `index`.
    #[error("role {} has no member at index {}", .0.role, .0.index)]
    OutOfBounds(AccessControlEnumerableOutOfBounds),
}

impl From<Error> for Vec<u8> {
    fn from(error: Error) -> Self {
        match error {
            Error::OutOfBounds(e) => e.abi_encode(),
        }
    }
}

/// Interface for the [`IAccessControlEnumerable`] extension.
#[interface_id]
pub trait IAccessControlEnumerable {
    /// The error type associated to the trait implementation.
    type Error: Into<Vec<u8>>;

    /// Returns one of the accounts that have `role`.
    ///
    /// # Arguments
    ///
    /// * `&self` - Read access to the registry's state.
    /// * `role` - The role identifier.
    /// * `index` - The index of the account at `role`'s members list.
    ///
    /// # Errors
    ///
    /// * [`Error::OutOfBounds`] - If `index` is out of bounds.
    fn get_role_member(
        &self,
        role: B256,
        index: U256,
    ) -> Result<Address, Self::Error>;

    /// Returns the number of accounts that have role.
    ///
    /// # Arguments
    ///
    /// * `&self` - Read access to the registry's state.
    /// * `role` - The role identifier.
    fn get_role_member_count(&self, role: B256) -> U256;
}

impl IAccessControlEnumerable for RoleRegistry {
    type Error = Error;

    fn get_role_member(
        &self,
        role: B256,
        index: U256,
    ) -> Result<Address, Self::Error> {
        let member = self.with_roles(|roles| {
            let position = usize::try_from(index).ok()?;
            roles.members(role)?.iter().nth(position).copied()
        });

        member.ok_or(Error::OutOfBounds(AccessControlEnumerableOutOfBounds {
            role,
            index,
        }))
    }

    fn get_role_member_count(&self, role: B256) -> U256 {
        let count = self
            .with_roles(|roles| roles.members(role).map_or(0, BTreeSet::len));
        U256::from(count)
    }
}

impl RoleRegistry {
    /// Returns the members of `role`, in ascending address order.
    ///
    /// The list is a snapshot: it is copied while the registry is locked.
    ///
    /// # Arguments
    ///
    /// * `&self` - Read access to the registry's state.
    /// * `role` - The role identifier.
    #[must_use]
    pub fn get_role_members(&self, role: B256) -> Vec<Address> {
        self.with_roles(|roles| {
            roles
                .members(role)
                .map(|members| members.iter().copied().collect())
                .unwrap_or_default()
        })
    }
}

#[cfg(test)]
mod tests {
    use alloy_primitives::{address, aliases::B32, uint, Address, U256};

    use super::*;
    use crate::{
        access::{bootstrap::Bootstrap, control::IAccessControl},
        role_id,
        utils::introspection::erc165::IErc165,
    };

    const ROLE: B256 = role_id("ROLE");

    const ADMIN: Address = address!("0x00000000000000000000000000000000000ad000");
    const ALICE: Address = address!("0x00000000000000000000000000000000000a11ce");
    const BOB: Address = address!("0x0000000000000000000000000000000000000b0b");
    const CHARLIE: Address =
        address!("0x00000000000000000000000000000000000c4a41");

    fn registry() -> RoleRegistry {
        let mut bootstrap = Bootstrap::new(ADMIN);
        bootstrap.setup_role(RoleRegistry::DEFAULT_ADMIN_ROLE.into(), ADMIN);
        bootstrap.finish()
    }

    #[test]
    fn get_role_member_count_returns_zero_by_default() {
        let contract = registry();
        let count = contract.get_role_member_count(ROLE);
        assert_eq!(count, U256::ZERO);

        assert!(contract.get_role_members(ROLE).is_empty());
    }

    #[test]
    fn get_role_member_reverts_when_empty_role() {
        let contract = registry();
        let index = U256::ZERO;

        let err = contract
            .get_role_member(ROLE, index)
            .expect_err("should return `Error::OutOfBounds`");

        assert!(matches!(
            err,
            Error::OutOfBounds(AccessControlEnumerableOutOfBounds { role: r, index: idx })
                if r == ROLE && idx == index
        ));
    }

    #[test]
    fn get_role_member_reverts_on_huge_index() {
        let contract = registry();
        contract.grant_role(ROLE, ALICE, ADMIN).expect("should grant alice");

        let err = contract
            .get_role_member(ROLE, U256::MAX)
            .expect_err("should return `Error::OutOfBounds`");
        assert!(matches!(err, Error::OutOfBounds(_)));
    }

    #[test]
    fn can_enumerate_role_members() {
        let contract = registry();

        contract.grant_role(ROLE, BOB, ADMIN).expect("should grant bob");
        contract.grant_role(ROLE, ALICE, ADMIN).expect("should grant alice");

        assert_eq!(contract.get_role_member_count(ROLE), uint!(2_U256));

        // Ordered by address, not by grant order.
        assert_eq!(
            contract
                .get_role_member(ROLE, U256::ZERO)
                .expect("should return bob"),
            BOB
        );
        assert_eq!(
            contract
                .get_role_member(ROLE, U256::from(1))
                .expect("should return alice"),
            ALICE
        );

        assert_eq!(contract.get_role_members(ROLE), vec![BOB, ALICE]);
    }

    #[test]
    fn revoked_members_are_removed_from_enumeration() {
        let contract = registry();

        contract.grant_role(ROLE, ALICE, ADMIN).expect("should grant alice");
        contract.revoke_role(ROLE, ALICE, ADMIN).expect("should revoke alice");

        assert_eq!(contract.get_role_member_count(ROLE), U256::ZERO);
        assert!(contract.get_role_members(ROLE).is_empty());
    }

    #[test]
    fn granting_role_twice_does_not_duplicate_member() {
        let contract = registry();

        contract.grant_role(ROLE, ALICE, ADMIN).expect("should grant alice");
        contract.grant_role(ROLE, ALICE, ADMIN).expect("should grant alice");

        assert_eq!(contract.get_role_member_count(ROLE), uint!(1_U256));
        assert_eq!(contract.get_role_members(ROLE), vec![ALICE]);
    }

    #[test]
    fn revoking_nonexistent_role_member_has_no_effect() {
        let contract = registry();

        contract.grant_role(ROLE, ALICE, ADMIN).expect("should grant alice");
        contract
            .revoke_role(ROLE, CHARLIE, ADMIN)
            .expect("should not revert");

        assert_eq!(contract.get_role_member_count(ROLE), uint!(1_U256));
        assert_eq!(contract.get_role_members(ROLE), vec![ALICE]);
    }

    #[test]
    fn interface_id() {
        let actual = <RoleRegistry as IAccessControlEnumerable>::interface_id();
        let expected: B32 = 0x5a05_180f_u32.into();
        assert_eq!(actual, expected);
    }

    #[test]
    fn supports_interface_returns_true_for_iaccess_control_enumerable() {
        let contract = registry();
        assert!(contract.supports_interface(
            <RoleRegistry as IAccessControlEnumerable>::interface_id()
        ));
        assert!(contract
            .supports_interface(<RoleRegistry as IAccessControl>::interface_id()));
        assert!(
            contract.supports_interface(<RoleRegistry as IErc165>::interface_id())
        );
    }
}
