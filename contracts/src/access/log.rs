//! Change records produced by [`RoleRegistry`] mutations.
//!
//! Mutations never broadcast anything themselves. Each one returns the
//! [`Log`] it produced (zero or one), numbered in the order the mutations
//! completed, so whoever owns the registry decides where logs go.
//!
//! [`RoleRegistry`]: crate::RoleRegistry
use alloy_primitives::LogData;
use alloy_sol_types::SolEvent;

use crate::access::control::{RoleAdminChanged, RoleGranted, RoleRevoked};

/// A role membership or admin hierarchy change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// `account` was granted `role`.
    RoleGranted(RoleGranted),
    /// `account` lost `role`, either revoked or renounced.
    RoleRevoked(RoleRevoked),
    /// `role`'s admin role was replaced.
    RoleAdminChanged(RoleAdminChanged),
}

impl Event {
    /// Encodes the event as an EVM log: the event signature and indexed
    /// arguments as topics, no data.
    #[must_use]
    pub fn encode_log_data(&self) -> LogData {
        match self {
            Event::RoleGranted(event) => event.encode_log_data(),
            Event::RoleRevoked(event) => event.encode_log_data(),
            Event::RoleAdminChanged(event) => event.encode_log_data(),
        }
    }
}

impl From<RoleGranted> for Event {
    fn from(event: RoleGranted) -> Self {
        Event::RoleGranted(event)
    }
}

impl From<RoleRevoked> for Event {
    fn from(event: RoleRevoked) -> Self {
        Event::RoleRevoked(event)
    }
}

impl From<RoleAdminChanged> for Event {
    fn from(event: RoleAdminChanged) -> Self {
        Event::RoleAdminChanged(event)
    }
}

/// An [`Event`] together with its position in the registry's change log.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Log {
    /// Zero-based position of the event. Assigned while the registry is
    /// locked, so it matches completion order across threads.
    pub sequence: u64,
    /// The recorded change.
    pub event: Event,
}

impl Log {
    /// Returns `true` if this log records `expected`, regardless of its
    /// sequence number.
    #[must_use]
    pub fn emits<E>(&self, expected: E) -> bool
    where
        E: Into<Event>,
    {
        self.event == expected.into()
    }
}
