use std::env;

use crate::{Score, TournamentId, DEFAULT_TOURNAMENT};

/// Rules every operation is checked against.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TourneyConfig {
    /// a pair may be recorded as meeting at most this many times per tournament
    pub max_rounds: u32,
    /// at this many previous meetings a pair is never paired again
    pub max_meetings: u32,
    /// used whenever the caller doesn't name a tournament
    pub default_tournament: TournamentId,
    pub points_per_win: Score,
    pub points_per_loss: Score,
    pub points_per_draw: Score,
}

impl Default for TourneyConfig {
    fn default() -> Self {
        Self {
            max_rounds: 4,
            max_meetings: 3,
            default_tournament: DEFAULT_TOURNAMENT,
            points_per_win: 3,
            points_per_loss: 0,
            points_per_draw: 1,
        }
    }
}

/// Where the sqlite store lives.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StoreConfig {
    pub database_path: String,
}

impl StoreConfig {
    pub const IN_MEMORY: &'static str = ":memory:";

    /// Reads `TOURNAMENT_DB`, falling back to an in-memory database.
    pub fn from_env() -> Self {
        let database_path = env::var("TOURNAMENT_DB")
            .ok()
            .filter(|p| !p.trim().is_empty())
            .unwrap_or_else(|| Self::IN_MEMORY.to_string());
        Self { database_path }
    }

    pub fn is_in_memory(&self) -> bool {
        self.database_path == Self::IN_MEMORY
    }
}
