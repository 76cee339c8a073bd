//! Naming port for alien display names.

use invasion_domain::AlienId;

#[cfg_attr(test, mockall::automock)]
pub trait NamePort: Send + Sync {
    /// Display name for a freshly spawned alien. Called once per id.
    fn name_for(&self, id: AlienId) -> String;
}
