use log::debug;

use crate::store::TournamentStore;
use crate::{MatchRecord, PlayerId, TournamentError, TournamentId, TournamentResult, TourneyConfig};

/// Summary of every game two players have had against each other in one tournament.
///
/// Counts are kept per player rather than per seat, so the summary for `(a, b)` and `(b, a)`
/// describe the same history and always give the same answer.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct MeetingHistory {
    pub meetings: u32,
    pub draws: u32,
    pub a_wins: u32,
    pub b_wins: u32,
}

impl MeetingHistory {
    /// records not between `a` and `b` are ignored, so a full tournament history can be passed
    pub fn from_records<'a, I>(a: PlayerId, b: PlayerId, records: I) -> Self
    where
        I: IntoIterator<Item = &'a MatchRecord>,
    {
        let mut history = MeetingHistory::default();
        for record in records.into_iter().filter(|r| r.is_between(a, b)) {
            history.meetings += 1;
            match record.decisive_winner() {
                None => history.draws += 1,
                Some(w) if w == a => history.a_wins += 1,
                Some(_) => history.b_wins += 1,
            }
        }
        history
    }

    /// Two games only allow a third if they weren't the same decisive result twice
    /// (i.e. there was a draw, or each side won one).
    pub fn is_pairable(&self, config: &TourneyConfig) -> bool {
        if self.meetings >= config.max_meetings {
            return false;
        }
        match self.meetings {
            0 | 1 => true,
            _ => self.draws > 0 || (self.a_wins > 0 && self.b_wins > 0),
        }
    }
}

/// Whether `a` and `b` may meet next round in `tournament`. Both players must be registered.
pub fn is_pairable<S: TournamentStore + ?Sized>(
    store: &S,
    config: &TourneyConfig,
    a: PlayerId,
    b: PlayerId,
    tournament: TournamentId,
) -> TournamentResult<bool> {
    for id in [a, b] {
        if store.player(id)?.is_none() {
            return Err(TournamentError::InvalidInput(format!(
                "no player with id {}",
                id
            )));
        }
    }
    if a == b {
        return Ok(false);
    }
    let records = store.matches_between(a, b, tournament)?;
    let history = MeetingHistory::from_records(a, b, &records);
    let pairable = history.is_pairable(config);
    debug!(
        "players {} and {} in tournament {}: {:?} -> pairable={}",
        a, b, tournament, history, pairable
    );
    Ok(pairable)
}
