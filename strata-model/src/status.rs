//! Record lifecycle statuses.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Lifecycle status of a persisted record.
///
/// `Deleted` doubles as the soft-delete sentinel: backends configured for
/// soft deletion flip a record's status to `Deleted` instead of removing it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Status {
    Created,
    Pending,
    Active,
    Error,
    Suspended,
    Deletable,
    Deleted,
    Done,
    Maintenance,
    Unknown,
}

impl Status {
    /// All statuses, in declaration order.
    pub const ALL: [Status; 10] = [
        Status::Created,
        Status::Pending,
        Status::Active,
        Status::Error,
        Status::Suspended,
        Status::Deletable,
        Status::Deleted,
        Status::Done,
        Status::Maintenance,
        Status::Unknown,
    ];

    /// The wire representation (snake_case tag).
    pub fn as_str(&self) -> &'static str {
        match self {
            Status::Created => "created",
            Status::Pending => "pending",
            Status::Active => "active",
            Status::Error => "error",
            Status::Suspended => "suspended",
            Status::Deletable => "deletable",
            Status::Deleted => "deleted",
            Status::Done => "done",
            Status::Maintenance => "maintenance",
            Status::Unknown => "unknown",
        }
    }

    /// Allowed values for an enum-typed `status` property.
    pub fn values() -> Vec<String> {
        Status::ALL.iter().map(|s| s.as_str().to_string()).collect()
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
