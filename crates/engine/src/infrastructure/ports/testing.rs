//! Testability port for injecting randomness.

// =============================================================================
// Testability Ports
// =============================================================================

/// Source of uniform random indices.
///
/// Every random choice in the simulation (spawn city, movement direction,
/// name words) goes through this port, so a seeded adapter makes a whole run
/// reproducible.
#[cfg_attr(test, mockall::automock)]
pub trait RandomPort: Send + Sync {
    /// Uniform index in `0..upper`. Callers never pass `upper == 0`.
    fn gen_index(&self, upper: usize) -> usize;
}
