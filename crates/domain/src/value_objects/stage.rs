use serde::{Deserialize, Serialize};

/// Phase of a simulation run.
///
/// Transitions are linear: `Start -> InitializingWorld -> SpawningAliens ->
/// MovingAliens -> End`. The stage is passed explicitly to
/// [`World::place_alien`](crate::World::place_alien) because a spawning alien
/// has no previous city to vacate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub enum SimulationStage {
    #[default]
    Start,
    InitializingWorld,
    SpawningAliens,
    MovingAliens,
    End,
}

impl SimulationStage {
    /// The stage that follows this one. `End` is terminal.
    pub fn next(self) -> Self {
        match self {
            Self::Start => Self::InitializingWorld,
            Self::InitializingWorld => Self::SpawningAliens,
            Self::SpawningAliens => Self::MovingAliens,
            Self::MovingAliens | Self::End => Self::End,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Start => "start",
            Self::InitializingWorld => "initializing_world",
            Self::SpawningAliens => "spawning_aliens",
            Self::MovingAliens => "moving_aliens",
            Self::End => "end",
        }
    }
}

impl std::fmt::Display for SimulationStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
