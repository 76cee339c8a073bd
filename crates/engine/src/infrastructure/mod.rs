//! Infrastructure implementations.
//!
//! Contains port trait implementations for external dependencies.

pub mod logging;
pub mod map_file;
pub mod names;
pub mod ports;
pub mod random;
