//! Loading a registry from a genesis file.

use std::io::Write;

use alloy_primitives::{address, Address};
use role_registry::{
    access::control::RoleGranted,
    config::{ConfigError, GenesisConfig},
    role_id, IAccessControl, RoleRegistry,
};

const ROOT: Address = address!("0x00000000000000000000000000000000000000a0");
const MANAGER: Address = address!("0x00000000000000000000000000000000000000a1");
const EDITOR: Address = address!("0x00000000000000000000000000000000000000a2");

const GENESIS: &str = r#"
bootstrap_identity = "0x00000000000000000000000000000000000000a0"

[[admins]]
role = "EDITOR_ROLE"
admin = "MANAGER_ROLE"

[[grants]]
role = "DEFAULT_ADMIN_ROLE"
accounts = ["0x00000000000000000000000000000000000000a0"]

[[grants]]
role = "MANAGER_ROLE"
accounts = ["0x00000000000000000000000000000000000000a1"]
"#;

#[test]
fn loads_genesis_from_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(GENESIS.as_bytes()).unwrap();

    let config = GenesisConfig::from_path(file.path()).unwrap();
    let (registry, logs) = config.apply().unwrap();

    assert_eq!(logs.len(), 3);
    assert!(logs[2].emits(RoleGranted {
        role: role_id("MANAGER_ROLE"),
        account: MANAGER,
        sender: ROOT,
    }));

    // The manager administers editors, root doesn't.
    registry.grant_role(role_id("EDITOR_ROLE"), EDITOR, MANAGER).unwrap();
    assert!(registry
        .grant_role(role_id("EDITOR_ROLE"), EDITOR, ROOT)
        .is_err());
    assert!(registry.has_role(role_id("EDITOR_ROLE"), EDITOR));
}

#[test]
fn genesis_bootstrap_can_be_extended() {
    let config = GenesisConfig::from_toml_str(GENESIS).unwrap();
    let (mut bootstrap, _) = config.bootstrap().unwrap();
    bootstrap.setup_role(role_id("EDITOR_ROLE"), EDITOR);

    let registry = bootstrap.finish();
    assert!(registry.has_role(role_id("EDITOR_ROLE"), EDITOR));
    assert!(registry.has_role(RoleRegistry::DEFAULT_ADMIN_ROLE.into(), ROOT));
}

#[test]
fn missing_file_is_reported_with_path() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("genesis.toml");

    let err = GenesisConfig::from_path(&path).unwrap_err();
    assert!(matches!(err, ConfigError::Io { path: ref p, .. } if *p == path));
    assert!(err.to_string().contains("genesis.toml"));
}
