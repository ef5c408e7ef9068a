//! Property tests checking the registry against a set-based model.

use std::collections::BTreeSet;

use alloy_primitives::{Address, B256};
use proptest::prelude::*;
use role_registry::{
    access::control::Error, role_id, Bootstrap, Event, IAccessControl,
    RoleRegistry,
};

const ROLES: [&str; 3] = ["ROLE_A", "ROLE_B", "ROLE_C"];

fn admin() -> Address {
    Address::repeat_byte(0xad)
}

fn account(index: u8) -> Address {
    Address::with_last_byte(index + 1)
}

fn role(index: usize) -> B256 {
    role_id(ROLES[index])
}

#[derive(Debug, Clone)]
enum Op {
    Grant { role: usize, account: u8, by_admin: bool },
    Revoke { role: usize, account: u8, by_admin: bool },
    Renounce { role: usize, account: u8, caller: u8 },
}

fn op() -> impl Strategy<Value = Op> {
    let role = 0..ROLES.len();
    let account = 0u8..4;
    prop_oneof![
        (role.clone(), account.clone(), any::<bool>()).prop_map(
            |(role, account, by_admin)| Op::Grant { role, account, by_admin }
        ),
        (role.clone(), account.clone(), any::<bool>()).prop_map(
            |(role, account, by_admin)| Op::Revoke { role, account, by_admin }
        ),
        (role, account.clone(), account).prop_map(|(role, account, caller)| {
            Op::Renounce { role, account, caller }
        }),
    ]
}

fn registry() -> RoleRegistry {
    let mut bootstrap = Bootstrap::new(admin());
    bootstrap.setup_role(RoleRegistry::DEFAULT_ADMIN_ROLE.into(), admin());
    bootstrap.finish()
}

proptest! {
    #[test]
    fn membership_follows_model(ops in prop::collection::vec(op(), 0..64)) {
        let registry = registry();
        let mut model = BTreeSet::new();
        // The bootstrap grant is sequence 0.
        let mut next_sequence = 1;

        for op in ops {
            match op {
                Op::Grant { role: r, account: a, by_admin } => {
                    let sender = if by_admin { admin() } else { account(a) };
                    let result = registry.grant_role(role(r), account(a), sender);
                    if by_admin {
                        let log = result.unwrap();
                        prop_assert_eq!(log.is_some(), model.insert((r, a)));
                        if let Some(log) = log {
                            prop_assert_eq!(log.sequence, next_sequence);
                            prop_assert!(matches!(log.event, Event::RoleGranted(_)));
                            next_sequence += 1;
                        }
                    } else {
                        let is_unauthorized = matches!(result, Err(Error::UnauthorizedAccount(_)));
                        prop_assert!(is_unauthorized);
                    }
                }
                Op::Revoke { role: r, account: a, by_admin } => {
                    let sender = if by_admin { admin() } else { account(a) };
                    let result = registry.revoke_role(role(r), account(a), sender);
                    if by_admin {
                        let log = result.unwrap();
                        prop_assert_eq!(log.is_some(), model.remove(&(r, a)));
                        if let Some(log) = log {
                            prop_assert_eq!(log.sequence, next_sequence);
                            prop_assert!(matches!(log.event, Event::RoleRevoked(_)));
                            next_sequence += 1;
                        }
                    } else {
                        let is_unauthorized = matches!(result, Err(Error::UnauthorizedAccount(_)));
                        prop_assert!(is_unauthorized);
                    }
                }
                Op::Renounce { role: r, account: a, caller } => {
                    let result = registry.renounce_role(role(r), account(a), account(caller));
                    if a == caller {
                        let log = result.unwrap();
                        prop_assert_eq!(log.is_some(), model.remove(&(r, a)));
                        if log.is_some() {
                            next_sequence += 1;
                        }
                    } else {
                        let is_bad_confirmation = matches!(result, Err(Error::BadConfirmation(_)));
                        prop_assert!(is_bad_confirmation);
                    }
                }
            }

            for r in 0..ROLES.len() {
                for a in 0u8..4 {
                    prop_assert_eq!(
                        registry.has_role(role(r), account(a)),
                        model.contains(&(r, a))
                    );
                }
            }
        }
    }

    #[test]
    fn fresh_roles_are_unheld_and_root_administered(name in "[A-Z_]{1,24}", byte in any::<u8>()) {
        let registry = registry();
        let role = role_id(&name);
        let account = Address::repeat_byte(byte);

        prop_assert!(!registry.has_role(role, account));
        prop_assert!(!registry.has_role(role, admin()));
        prop_assert_eq!(registry.get_role_admin(role), B256::ZERO);
    }
}
