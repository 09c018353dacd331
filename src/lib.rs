use std::fmt::{Display, Formatter};

use thiserror::Error;

mod config;
mod console;
mod eligibility;
mod pairing;
mod sqlite;
mod standings;
mod store;
mod tournament;

pub use config::{StoreConfig, TourneyConfig};
pub use console::{Console, ScriptedConsole, StdConsole};
pub use eligibility::{is_pairable, MeetingHistory};
pub use pairing::{pair_round, rounds_sat_out};
pub use sqlite::SqliteStore;
pub use standings::compute_standings;
pub use store::{MemoryStore, NewMatch, TournamentStore};
pub use tournament::Tournament;

pub type PlayerId = i64;
pub type MatchId = i64;
/// tournaments are just a scoping integer; nothing checks that one "exists"
pub type TournamentId = i64;

pub const DEFAULT_TOURNAMENT: TournamentId = 1;

/// whole points only; scale everything up (2/0/1) if you need half points
pub type Score = i32;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Player {
    pub id: PlayerId,
    pub name: String,
}

/// One stored match outcome. For draws `winner`/`loser` just name the two participants.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MatchRecord {
    pub id: MatchId,
    pub winner: PlayerId,
    pub loser: PlayerId,
    pub tournament: TournamentId,
    pub round: u8,
    pub draw: bool,
}

impl MatchRecord {
    pub fn involves(&self, player: PlayerId) -> bool {
        self.winner == player || self.loser == player
    }

    /// true if this record is a game between `a` and `b`, in either seat
    pub fn is_between(&self, a: PlayerId, b: PlayerId) -> bool {
        (self.winner == a && self.loser == b) || (self.winner == b && self.loser == a)
    }

    /// the player who actually won, i.e. `None` for draws
    pub fn decisive_winner(&self) -> Option<PlayerId> {
        if self.draw {
            None
        } else {
            Some(self.winner)
        }
    }
}

/// Derived per-player summary; never persisted.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StandingEntry {
    pub player: PlayerId,
    pub name: String,
    pub wins: u32,
    pub losses: u32,
    pub draws: u32,
    pub matches_played: u32,
    /// informational; ranking is by wins
    pub points: Score,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Pairing {
    pub player_a: PlayerId,
    pub name_a: String,
    pub player_b: PlayerId,
    pub name_b: String,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Bye {
    pub player: PlayerId,
    pub name: String,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RoundPairings {
    pub pairs: Vec<Pairing>,
    /// set only when an odd number of players is registered
    pub bye: Option<Bye>,
}

impl RoundPairings {
    pub fn pair_count(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty() && self.bye.is_none()
    }
}

#[derive(Debug, Error)]
pub enum TournamentError {
    /// The backing store could not be reached or a query failed. Never retried.
    #[error("store unavailable: {0}")]
    StoreUnavailable(#[from] rusqlite::Error),
    #[error("invalid input: {0}")]
    InvalidInput(String),
    /// A pair already met `max_rounds` times in this tournament
    #[error("players {winner} and {loser} cannot meet again (round {attempted} exceeds the cap)")]
    RoundLimitExceeded {
        winner: PlayerId,
        loser: PlayerId,
        attempted: u32,
    },
    #[error("no eligible opponent left for player {player}")]
    PairingExhausted { player: PlayerId },
    #[error("console error: {0}")]
    Console(#[from] std::io::Error),
}

pub type TournamentResult<T> = Result<T, TournamentError>;

impl Display for StandingEntry {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{:>4}  {:<24} {:>3}W {:>3}L {:>3}D {:>4} pts  ({} played)",
            self.player,
            self.name,
            self.wins,
            self.losses,
            self.draws,
            self.points,
            self.matches_played
        )
    }
}

impl Display for Pairing {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} ({}) vs {} ({})",
            self.name_a, self.player_a, self.name_b, self.player_b
        )
    }
}

pub fn format_standings(standings: &[StandingEntry]) -> String {
    if standings.is_empty() {
        return "".to_string();
    }
    standings
        .iter()
        .map(|s| s.to_string())
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn format_pairings(round: &RoundPairings) -> String {
    let mut lines = round.pairs.iter().map(|p| p.to_string()).collect::<Vec<_>>();
    if let Some(bye) = &round.bye {
        lines.push(format!("{} ({}) has a bye", bye.name, bye.player));
    }
    lines.join("\n")
}
