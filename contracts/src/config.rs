//! Genesis configuration: declarative bootstrap of a [`RoleRegistry`].
//!
//! A genesis file names the bootstrapping identity, the admin relations
//! between roles, and the accounts that start out holding each role. It is
//! applied through a [`Bootstrap`], so it is the only place roles are handed
//! out without an admin check.
//!
//! Roles are written either as a `0x`-prefixed 32-byte hex identifier or as a
//! role name, which is hashed with [`role_id`]. The name
//! `DEFAULT_ADMIN_ROLE` stands for [`RoleRegistry::DEFAULT_ADMIN_ROLE`].
//!
//! # Example TOML
//!
//! ```toml
//! bootstrap_identity = "0x00000000000000000000000000000000000000a0"
//!
//! [[admins]]
//! role = "EDITOR_ROLE"
//! admin = "MANAGER_ROLE"
//!
//! [[grants]]
//! role = "DEFAULT_ADMIN_ROLE"
//! accounts = ["0x00000000000000000000000000000000000000a0"]
//!
//! [[grants]]
//! role = "MANAGER_ROLE"
//! accounts = ["0x00000000000000000000000000000000000000a1"]
//! ```

use std::path::{Path, PathBuf};

use alloy_primitives::{Address, B256};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{
    access::roles::DEFAULT_ADMIN_ROLE_NAME, role_id, Bootstrap, Log,
    RoleRegistry,
};

/// Errors raised while loading or applying a [`GenesisConfig`].
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The genesis file could not be read.
    #[error("failed to read genesis config `{}`: {source}", .path.display())]
    Io {
        /// Path of the file.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The genesis file is not valid TOML for a [`GenesisConfig`].
    #[error("failed to parse genesis config: {0}")]
    Parse(#[from] toml::de::Error),

    /// A role is neither a 32-byte hex identifier nor a valid role name.
    #[error("invalid role `{0}`: expected a role name or a 0x-prefixed 32-byte identifier")]
    InvalidRole(String),
}

/// Top-level genesis configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct GenesisConfig {
    /// Identity recorded as `sender` of every genesis grant.
    pub bootstrap_identity: Address,

    /// Admin relations, applied before any grant, in file order.
    #[serde(default)]
    pub admins: Vec<AdminDef>,

    /// Initial role members, applied in file order.
    #[serde(default)]
    pub grants: Vec<GrantDef>,
}

/// Sets `admin` as the admin role of `role`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct AdminDef {
    /// The administered role.
    pub role: String,
    /// Its admin role.
    pub admin: String,
}

/// Grants `role` to every account of `accounts`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct GrantDef {
    /// The granted role.
    pub role: String,
    /// Accounts that start out holding the role.
    #[serde(default)]
    pub accounts: Vec<Address>,
}

impl GenesisConfig {
    /// Parses a genesis configuration from TOML.
    ///
    /// # Errors
    ///
    /// * [`ConfigError::Parse`] - If `source` is not a valid configuration.
    pub fn from_toml_str(source: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(source)?)
    }

    /// Reads and parses the genesis configuration at `path`.
    ///
    /// # Errors
    ///
    /// * [`ConfigError::Io`] - If the file can't be read.
    /// * [`ConfigError::Parse`] - If the file is not a valid configuration.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path).map_err(|source| {
            ConfigError::Io { path: path.to_path_buf(), source }
        })?;
        Self::from_toml_str(&source)
    }

    /// Runs the configured admin relations and grants on a new
    /// [`Bootstrap`], which is returned unfinished together with the logs it
    /// produced, so more roles can be set up programmatically.
    ///
    /// Every role is resolved before anything is set up.
    ///
    /// # Errors
    ///
    /// * [`ConfigError::InvalidRole`] - If a role can't be resolved.
    pub fn bootstrap(&self) -> Result<(Bootstrap, Vec<Log>), ConfigError> {
        let admins = self
            .admins
            .iter()
            .map(|def| Ok((parse_role(&def.role)?, parse_role(&def.admin)?)))
            .collect::<Result<Vec<_>, ConfigError>>()?;
        let grants = self
            .grants
            .iter()
            .map(|def| Ok((parse_role(&def.role)?, &def.accounts)))
            .collect::<Result<Vec<_>, ConfigError>>()?;

        let mut bootstrap = Bootstrap::new(self.bootstrap_identity);
        let mut logs = Vec::new();
        for (role, admin) in admins {
            logs.push(bootstrap.set_role_admin(role, admin));
        }
        for (role, accounts) in grants {
            logs.extend(
                accounts
                    .iter()
                    .filter_map(|account| bootstrap.setup_role(role, *account)),
            );
        }

        tracing::debug!(
            admins = self.admins.len(),
            grants = self.grants.len(),
            logs = logs.len(),
            "genesis config applied"
        );
        Ok((bootstrap, logs))
    }

    /// Bootstraps a [`RoleRegistry`] from this configuration.
    ///
    /// # Errors
    ///
    /// * [`ConfigError::InvalidRole`] - If a role can't be resolved.
    pub fn apply(&self) -> Result<(RoleRegistry, Vec<Log>), ConfigError> {
        let (bootstrap, logs) = self.bootstrap()?;
        Ok((bootstrap.finish(), logs))
    }
}

/// Resolves a role as written in a genesis file.
///
/// # Errors
///
/// * [`ConfigError::InvalidRole`] - If `role` is empty, contains whitespace,
///   or starts with `0x` without being a 32-byte hex identifier.
pub fn parse_role(role: &str) -> Result<B256, ConfigError> {
    if role == DEFAULT_ADMIN_ROLE_NAME {
        return Ok(RoleRegistry::DEFAULT_ADMIN_ROLE.into());
    }
    if role.starts_with("0x") {
        return role
            .parse::<B256>()
            .map_err(|_| ConfigError::InvalidRole(role.to_owned()));
    }
    if role.is_empty() || role.chars().any(char::is_whitespace) {
        return Err(ConfigError::InvalidRole(role.to_owned()));
    }

    Ok(role_id(role))
}
