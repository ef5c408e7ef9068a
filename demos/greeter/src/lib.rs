//! A greeting storage whose writes are restricted to `GREETER_ROLE` holders.
//!
//! Shows how a protected operation composes with
//! [`RoleRegistry::check_role`]: the check runs first, against the current
//! state of the registry, and nothing is touched if it fails.
use std::sync::{Arc, PoisonError, RwLock};

use alloy_primitives::{Address, B256};
use role_registry::{
    access::control::Error as AccessControlError, role_id, Bootstrap,
    IAccessControl, Log, RoleRegistry,
};

/// `keccak256("GREETER_ROLE")`
pub const GREETER_ROLE: B256 = role_id("GREETER_ROLE");

/// An error that occurred in a [`Greeter`] operation.
#[derive(thiserror::Error, Debug, PartialEq, Eq)]
pub enum Error {
    /// The caller is not allowed to perform the operation.
    #[error(transparent)]
    AccessControl(#[from] AccessControlError),
    /// The new greeting is empty.
    #[error("greeting cannot be empty")]
    EmptyGreeting,
}

/// Greeting storage.
#[derive(Debug)]
pub struct Greeter {
    registry: Arc<RoleRegistry>,
    greeting: RwLock<String>,
}

impl Greeter {
    /// Creates a greeter whose registry is bootstrapped with `admin` as the
    /// default admin and a greeter.
    #[must_use]
    pub fn new(admin: Address, greeting: impl Into<String>) -> Self {
        let mut bootstrap = Bootstrap::new(admin);
        bootstrap.setup_role(RoleRegistry::DEFAULT_ADMIN_ROLE.into(), admin);
        bootstrap.setup_role(GREETER_ROLE, admin);
        Self::with_registry(Arc::new(bootstrap.finish()), greeting)
    }

    /// Creates a greeter protected by an existing `registry`.
    #[must_use]
    pub fn with_registry(
        registry: Arc<RoleRegistry>,
        greeting: impl Into<String>,
    ) -> Self {
        Self { registry, greeting: RwLock::new(greeting.into()) }
    }

    /// Returns the registry protecting this greeter.
    #[must_use]
    pub fn registry(&self) -> &RoleRegistry {
        &self.registry
    }

    /// Returns the current greeting.
    #[must_use]
    pub fn greet(&self) -> String {
        self.greeting.read().unwrap_or_else(PoisonError::into_inner).clone()
    }

    /// Replaces the greeting.
    ///
    /// # Errors
    ///
    /// * [`Error::AccessControl`] - If `caller` doesn't hold [`GREETER_ROLE`].
    /// * [`Error::EmptyGreeting`] - If `greeting` is empty.
    pub fn set_greeting(
        &self,
        caller: Address,
        greeting: impl Into<String>,
    ) -> Result<(), Error> {
        self.registry.check_role(GREETER_ROLE, caller)?;

        let greeting = greeting.into();
        if greeting.is_empty() {
            return Err(Error::EmptyGreeting);
        }

        tracing::info!(%caller, %greeting, "greeting changed");
        *self.greeting.write().unwrap_or_else(PoisonError::into_inner) =
            greeting;
        Ok(())
    }

    /// Lets `admin` appoint `account` as a greeter.
    ///
    /// # Errors
    ///
    /// * [`Error::AccessControl`] - If `admin` doesn't hold the admin role of
    ///   [`GREETER_ROLE`].
    pub fn add_greeter(
        &self,
        admin: Address,
        account: Address,
    ) -> Result<Option<Log>, Error> {
        Ok(self.registry.grant_role(GREETER_ROLE, account, admin)?)
    }
}
