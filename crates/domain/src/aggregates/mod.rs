//! Aggregate roots - domain objects that own their related data
//!
//! The world is the only aggregate: it owns every city and every live
//! alien, and all cross-entity mutations go through it.
//!
//! | Concern | Rustic Equivalent |
//! |---------|-------------------|
//! | Object graph with back-pointers | Arena keyed by `CityName` |
//! | Null neighbour | `Option<&CityName>` |
//! | Mutation side effects | Return values (`Placement`, `CityRemoval`) |

pub mod world;

pub use world::{AlienSnapshot, CityRemoval, Placement, World, WorldSnapshot};
