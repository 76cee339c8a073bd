//! Entities of the world graph.

mod alien;
mod city;

pub use alien::Alien;
pub use city::City;
