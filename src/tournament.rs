//! The operations a tournament organiser actually calls.

use log::{info, warn};

use crate::console::Console;
use crate::eligibility;
use crate::pairing::pair_round;
use crate::standings::{compute_standings, tally};
use crate::store::{NewMatch, TournamentStore};
use crate::{
    MatchId, Player, PlayerId, RoundPairings, StandingEntry, TournamentError, TournamentId,
    TournamentResult, TourneyConfig,
};

/// A tournament over an injected store. Owns the store for its whole life; nothing here keeps
/// derived state, so standings are always rebuilt from stored matches.
pub struct Tournament<S: TournamentStore> {
    store: S,
    config: TourneyConfig,
}

impl<S: TournamentStore> Tournament<S> {
    pub fn new(store: S) -> Self {
        Self::with_config(store, TourneyConfig::default())
    }

    pub fn with_config(store: S, config: TourneyConfig) -> Self {
        Self { store, config }
    }

    pub fn config(&self) -> &TourneyConfig {
        &self.config
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn into_store(self) -> S {
        self.store
    }

    /// Registers a player. With no (or a blank) name the console is asked once; a blank answer
    /// there is rejected too.
    pub fn register_player<C: Console + ?Sized>(
        &mut self,
        name: Option<&str>,
        console: &mut C,
    ) -> TournamentResult<PlayerId> {
        let name = match name.map(str::trim).filter(|n| !n.is_empty()) {
            Some(n) => n.to_string(),
            None => {
                console.notify("Please specify a name");
                console.prompt_name()?.trim().to_string()
            }
        };
        if name.is_empty() {
            return Err(TournamentError::InvalidInput(
                "a player needs a name".to_string(),
            ));
        }
        let id = self.store.insert_player(&name)?;
        info!("registered player {} as {}", name, id);
        Ok(id)
    }

    pub fn count_players(&self) -> TournamentResult<usize> {
        self.store.count_players()
    }

    pub fn list_players(&self) -> TournamentResult<Vec<Player>> {
        self.store.players()
    }

    /// Removes every player. Their match records are left alone.
    pub fn delete_players(&mut self) -> TournamentResult<usize> {
        let n = self.store.delete_players()?;
        info!("deleted {} players", n);
        Ok(n)
    }

    pub fn delete_matches(&mut self) -> TournamentResult<usize> {
        let n = self.store.delete_matches()?;
        info!("deleted {} match records", n);
        Ok(n)
    }

    /// Records a decisive result in `tournament` (the default one if `None`).
    pub fn report_match(
        &mut self,
        winner: PlayerId,
        loser: PlayerId,
        tournament: Option<TournamentId>,
    ) -> TournamentResult<MatchId> {
        self.record(winner, loser, tournament, false)
    }

    /// Records a drawn game; seat order doesn't matter.
    pub fn report_draw(
        &mut self,
        a: PlayerId,
        b: PlayerId,
        tournament: Option<TournamentId>,
    ) -> TournamentResult<MatchId> {
        self.record(a, b, tournament, true)
    }

    fn record(
        &mut self,
        winner: PlayerId,
        loser: PlayerId,
        tournament: Option<TournamentId>,
        draw: bool,
    ) -> TournamentResult<MatchId> {
        let tournament = tournament.unwrap_or(self.config.default_tournament);
        if winner == loser {
            return Err(TournamentError::InvalidInput(format!(
                "player {} cannot play themselves",
                winner
            )));
        }
        self.require_player(winner)?;
        self.require_player(loser)?;

        // the round of a new game is how many times this pair has met, plus one
        let previous = self.store.matches_between(winner, loser, tournament)?.len() as u32;
        let round = previous + 1;
        if round > self.config.max_rounds {
            warn!(
                "rejected report {} vs {} in tournament {}: round {} over the cap",
                winner, loser, tournament, round
            );
            return Err(TournamentError::RoundLimitExceeded {
                winner,
                loser,
                attempted: round,
            });
        }
        let round = u8::try_from(round).map_err(|_| TournamentError::RoundLimitExceeded {
            winner,
            loser,
            attempted: round,
        })?;

        let id = self.store.insert_match(&NewMatch {
            winner,
            loser,
            tournament,
            round,
            draw,
        })?;
        info!(
            "match {} reported: {} {} {} (tournament {}, round {})",
            id,
            winner,
            if draw { "drew with" } else { "beat" },
            loser,
            tournament,
            round
        );
        Ok(id)
    }

    fn require_player(&self, id: PlayerId) -> TournamentResult<Player> {
        self.store
            .player(id)?
            .ok_or_else(|| TournamentError::InvalidInput(format!("no player with id {}", id)))
    }

    pub fn is_pairable(
        &self,
        a: PlayerId,
        b: PlayerId,
        tournament: Option<TournamentId>,
    ) -> TournamentResult<bool> {
        let tournament = tournament.unwrap_or(self.config.default_tournament);
        eligibility::is_pairable(&self.store, &self.config, a, b, tournament)
    }

    /// Every registered player, best record first.
    pub fn standings(
        &self,
        tournament: Option<TournamentId>,
    ) -> TournamentResult<Vec<StandingEntry>> {
        let tournament = tournament.unwrap_or(self.config.default_tournament);
        let players = self.store.players()?;
        let records = self.store.matches_in_tournament(tournament)?;
        Ok(compute_standings(&players, &records, &self.config))
    }

    /// A single player's line, without ranking anyone else.
    pub fn player_standing(
        &self,
        player: PlayerId,
        tournament: Option<TournamentId>,
    ) -> TournamentResult<StandingEntry> {
        let tournament = tournament.unwrap_or(self.config.default_tournament);
        let player = self.require_player(player)?;
        let records = self.store.matches_for_player(player.id, tournament)?;
        Ok(tally(&player, &records, &self.config))
    }

    /// Pairings for the next round of `tournament`.
    pub fn swiss_pairings(
        &self,
        tournament: Option<TournamentId>,
    ) -> TournamentResult<RoundPairings> {
        let tournament = tournament.unwrap_or(self.config.default_tournament);
        let players = self.store.players()?;
        let history = self.store.matches_in_tournament(tournament)?;
        let standings = compute_standings(&players, &history, &self.config);
        let round = pair_round(&standings, &history, &self.config)?;
        info!(
            "tournament {}: {} pairs{}",
            tournament,
            round.pairs.len(),
            if round.bye.is_some() { " and a bye" } else { "" }
        );
        Ok(round)
    }
}
