use std::cmp::Reverse;

use crate::{MatchRecord, Player, StandingEntry, TourneyConfig};

/// Tallies one player's record from every game they appear in. Records that don't involve
/// `player` are skipped.
pub(crate) fn tally<'a, I>(player: &Player, records: I, config: &TourneyConfig) -> StandingEntry
where
    I: IntoIterator<Item = &'a MatchRecord>,
{
    let mut entry = StandingEntry {
        player: player.id,
        name: player.name.clone(),
        wins: 0,
        losses: 0,
        draws: 0,
        matches_played: 0,
        points: 0,
    };
    for record in records.into_iter().filter(|r| r.involves(player.id)) {
        entry.matches_played += 1;
        match record.decisive_winner() {
            None => {
                entry.draws += 1;
                entry.points += config.points_per_draw;
            }
            Some(w) if w == player.id => {
                entry.wins += 1;
                entry.points += config.points_per_win;
            }
            Some(_) => {
                entry.losses += 1;
                entry.points += config.points_per_loss;
            }
        }
    }
    entry
}

/// `players` must be in registration order; `records` should already be limited to one
/// tournament.
///
/// Every player gets an entry, even with no games. Sorted by wins, most first; equal wins
/// keep registration order. Points are filled in from `config` but don't affect the order.
pub fn compute_standings(
    players: &[Player],
    records: &[MatchRecord],
    config: &TourneyConfig,
) -> Vec<StandingEntry> {
    let mut standings = players
        .iter()
        .map(|p| tally(p, records, config))
        .collect::<Vec<_>>();
    // sort_by_key is stable, which is the whole tie-break
    standings.sort_by_key(|s| Reverse(s.wins));
    standings
}
