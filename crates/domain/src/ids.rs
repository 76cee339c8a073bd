use std::fmt;

use serde::{Deserialize, Serialize};

/// Caller-assigned alien identifier.
///
/// Ids are handed out once per spawn request and are never reused, even after
/// the alien dies.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct AlienId(u32);

impl AlienId {
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    pub const fn value(self) -> u32 {
        self.0
    }
}

impl fmt::Display for AlienId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u32> for AlienId {
    fn from(value: u32) -> Self {
        Self(value)
    }
}

impl From<AlienId> for u32 {
    fn from(value: AlienId) -> Self {
        value.0
    }
}
