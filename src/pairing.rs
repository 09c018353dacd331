use log::{debug, warn};

use crate::{
    Bye, MatchRecord, MeetingHistory, Pairing, RoundPairings, StandingEntry, TournamentError,
    TournamentResult, TourneyConfig,
};

/// Greedy nearest-rank pairing, i.e. 1v2, 3v4, etc unless that pair can't meet again.
///
/// `standings` must already be sorted (see [`crate::compute_standings`]) and `history` holds
/// every game of the tournament. Each player, top down, takes the highest-ranked unpaired
/// player it is still allowed to meet.
///
/// With an odd field someone sits out: the lowest-ranked player among those who have sat out
/// the fewest rounds (see [`rounds_sat_out`]). If that choice leaves somebody without an
/// opponent the next candidate is tried, and only when every candidate fails does the round
/// fail with [`TournamentError::PairingExhausted`].
///
/// No randomness: the same standings and history always give the same round.
pub fn pair_round(
    standings: &[StandingEntry],
    history: &[MatchRecord],
    config: &TourneyConfig,
) -> TournamentResult<RoundPairings> {
    if standings.len() % 2 == 0 {
        let pairs = pair_all(standings.iter().collect(), history, config)?;
        return Ok(RoundPairings { pairs, bye: None });
    }

    let mut first_err = None;
    for idx in bye_candidates(standings) {
        let sitting_out = &standings[idx];
        let rest = standings
            .iter()
            .enumerate()
            .filter(|(i, _)| *i != idx)
            .map(|(_, s)| s)
            .collect::<Vec<_>>();
        match pair_all(rest, history, config) {
            Ok(pairs) => {
                debug!("player {} sits out", sitting_out.player);
                return Ok(RoundPairings {
                    pairs,
                    bye: Some(Bye {
                        player: sitting_out.player,
                        name: sitting_out.name.clone(),
                    }),
                });
            }
            Err(e) => {
                debug!(
                    "bye for {} leaves the rest unpairable, trying the next candidate",
                    sitting_out.player
                );
                if first_err.is_none() {
                    first_err = Some(e);
                }
            }
        }
    }
    match first_err {
        Some(err) => {
            warn!("{}", err);
            Err(err)
        }
        None => Ok(RoundPairings::default()),
    }
}

/// How many rounds each player has sat out, in standings order.
///
/// Nothing records byes; a round somebody sat out is a round they have no game for, so this is
/// the gap between the busiest player's game count and theirs.
pub fn rounds_sat_out(standings: &[StandingEntry]) -> Vec<u32> {
    let most = standings
        .iter()
        .map(|s| s.matches_played)
        .max()
        .unwrap_or(0);
    standings.iter().map(|s| most - s.matches_played).collect()
}

/// standings indices in the order they should be offered the bye
fn bye_candidates(standings: &[StandingEntry]) -> Vec<usize> {
    let sat_out = rounds_sat_out(standings);
    // lowest ranked first, then a stable sort keeps that order within each sat-out count
    let mut order = (0..standings.len()).rev().collect::<Vec<_>>();
    order.sort_by_key(|&i| sat_out[i]);
    order
}

fn pair_all(
    mut unpaired: Vec<&StandingEntry>,
    history: &[MatchRecord],
    config: &TourneyConfig,
) -> TournamentResult<Vec<Pairing>> {
    let mut pairs = Vec::with_capacity(unpaired.len() / 2);
    // top players at the end so we can pop()
    unpaired.reverse();

    while let Some(p1) = unpaired.pop() {
        let opponent = (0..unpaired.len()).rev().find(|&i| {
            MeetingHistory::from_records(p1.player, unpaired[i].player, history)
                .is_pairable(config)
        });
        let Some(i) = opponent else {
            return Err(TournamentError::PairingExhausted { player: p1.player });
        };
        let p2 = unpaired.remove(i);
        debug!("paired {} with {}", p1.player, p2.player);
        pairs.push(Pairing {
            player_a: p1.player,
            name_a: p1.name.clone(),
            player_b: p2.player,
            name_b: p2.name.clone(),
        });
    }

    Ok(pairs)
}
