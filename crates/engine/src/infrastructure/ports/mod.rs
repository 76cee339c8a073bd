//! Port traits for infrastructure boundaries.
//!
//! These are the ONLY abstractions in the engine. Everything else is concrete types.
//! Ports exist for:
//! - Randomness (thread RNG, seeded RNG, or scripted rolls in tests)
//! - Alien naming (could swap pet names -> plain ids)

mod naming;
mod testing;

pub use naming::NamePort;
pub use testing::RandomPort;

// =============================================================================
// Test-Only Mocks (only available during test builds)
// =============================================================================
#[cfg(test)]
pub use naming::MockNamePort;

#[cfg(test)]
pub use testing::MockRandomPort;
