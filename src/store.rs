//! Data access for players and match records.
//!
//! Everything above this layer talks to a [`TournamentStore`], so the standings and pairing
//! code never knows which database (if any) sits underneath.

use crate::{MatchId, MatchRecord, Player, PlayerId, TournamentId, TournamentResult};

/// A match about to be recorded; the store assigns the id.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NewMatch {
    pub winner: PlayerId,
    pub loser: PlayerId,
    pub tournament: TournamentId,
    pub round: u8,
    pub draw: bool,
}

pub trait TournamentStore {
    /// ids are assigned by the store and increase with registration order
    fn insert_player(&mut self, name: &str) -> TournamentResult<PlayerId>;

    fn insert_match(&mut self, new_match: &NewMatch) -> TournamentResult<MatchId>;

    /// returns the number of rows removed
    fn delete_players(&mut self) -> TournamentResult<usize>;

    /// returns the number of rows removed
    fn delete_matches(&mut self) -> TournamentResult<usize>;

    fn count_players(&self) -> TournamentResult<usize>;

    /// all players in registration order
    fn players(&self) -> TournamentResult<Vec<Player>>;

    fn player(&self, id: PlayerId) -> TournamentResult<Option<Player>>;

    /// games between `a` and `b` in either seat, oldest first
    fn matches_between(
        &self,
        a: PlayerId,
        b: PlayerId,
        tournament: TournamentId,
    ) -> TournamentResult<Vec<MatchRecord>>;

    fn matches_for_player(
        &self,
        player: PlayerId,
        tournament: TournamentId,
    ) -> TournamentResult<Vec<MatchRecord>>;

    fn matches_in_tournament(&self, tournament: TournamentId)
        -> TournamentResult<Vec<MatchRecord>>;
}

/// Keeps everything in vectors. Ids are never reused, even after a reset, which is also
/// how an AUTOINCREMENT column behaves.
#[derive(Debug)]
pub struct MemoryStore {
    players: Vec<Player>,
    matches: Vec<MatchRecord>,
    next_player_id: PlayerId,
    next_match_id: MatchId,
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryStore {
    pub fn new() -> Self {
        Self {
            players: vec![],
            matches: vec![],
            next_player_id: 1,
            next_match_id: 1,
        }
    }
}

impl TournamentStore for MemoryStore {
    fn insert_player(&mut self, name: &str) -> TournamentResult<PlayerId> {
        let id = self.next_player_id;
        self.next_player_id += 1;
        self.players.push(Player {
            id,
            name: name.to_string(),
        });
        Ok(id)
    }

    fn insert_match(&mut self, new_match: &NewMatch) -> TournamentResult<MatchId> {
        let id = self.next_match_id;
        self.next_match_id += 1;
        self.matches.push(MatchRecord {
            id,
            winner: new_match.winner,
            loser: new_match.loser,
            tournament: new_match.tournament,
            round: new_match.round,
            draw: new_match.draw,
        });
        Ok(id)
    }

    fn delete_players(&mut self) -> TournamentResult<usize> {
        let n = self.players.len();
        self.players.clear();
        Ok(n)
    }

    fn delete_matches(&mut self) -> TournamentResult<usize> {
        let n = self.matches.len();
        self.matches.clear();
        Ok(n)
    }

    fn count_players(&self) -> TournamentResult<usize> {
        Ok(self.players.len())
    }

    fn players(&self) -> TournamentResult<Vec<Player>> {
        Ok(self.players.clone())
    }

    fn player(&self, id: PlayerId) -> TournamentResult<Option<Player>> {
        Ok(self.players.iter().find(|p| p.id == id).cloned())
    }

    fn matches_between(
        &self,
        a: PlayerId,
        b: PlayerId,
        tournament: TournamentId,
    ) -> TournamentResult<Vec<MatchRecord>> {
        Ok(self
            .matches
            .iter()
            .filter(|m| m.tournament == tournament && m.is_between(a, b))
            .cloned()
            .collect())
    }

    fn matches_for_player(
        &self,
        player: PlayerId,
        tournament: TournamentId,
    ) -> TournamentResult<Vec<MatchRecord>> {
        Ok(self
            .matches
            .iter()
            .filter(|m| m.tournament == tournament && m.involves(player))
            .cloned()
            .collect())
    }

    fn matches_in_tournament(
        &self,
        tournament: TournamentId,
    ) -> TournamentResult<Vec<MatchRecord>> {
        Ok(self
            .matches
            .iter()
            .filter(|m| m.tournament == tournament)
            .cloned()
            .collect())
    }
}
