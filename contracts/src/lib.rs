/*!
# Role Registry

A role-based access control core. It records which accounts hold which roles,
enforces an admin-role hierarchy over who may change that membership, and
exposes [`RoleRegistry::check_role`] as the single authorization primitive
protected operations wrap themselves with.

## Usage

A registry is created through a [`Bootstrap`] phase, which is the only place
roles can be handed out without an admin check:

```
use alloy_primitives::address;
use role_registry::{role_id, Bootstrap, IAccessControl, RoleRegistry};

const EDITOR_ROLE: alloy_primitives::B256 = role_id("EDITOR_ROLE");

let root = address!("0x00000000000000000000000000000000000000a0");
let alice = address!("0x00000000000000000000000000000000000000a1");

let mut bootstrap = Bootstrap::new(root);
bootstrap.setup_role(RoleRegistry::DEFAULT_ADMIN_ROLE.into(), root);
let registry = bootstrap.finish();

let log = registry.grant_role(EDITOR_ROLE, alice, root)?;
assert!(log.is_some());
assert!(registry.has_role(EDITOR_ROLE, alice));

// A protected operation only runs if the caller currently holds the role.
registry.check_role(EDITOR_ROLE, alice)?;
# Ok::<(), role_registry::access::control::Error>(())
```

Every mutation returns the [`Log`] it produced, if any. Delivering or
persisting those logs is left to the caller.
*/

#![allow(clippy::module_name_repetitions)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod access;
pub mod config;
pub mod utils;

pub use access::{
    bootstrap::Bootstrap,
    control::{IAccessControl, RoleRegistry},
    log::{Event, Log},
    roles::role_id,
};
