//! End-to-end runs against both stores.

use std::collections::HashSet;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use swiss_tournament::{
    MemoryStore, RoundPairings, ScriptedConsole, SqliteStore, Tournament, TournamentError,
    TournamentStore,
};

fn with_players<S: TournamentStore>(store: S, names: &[&str]) -> Tournament<S> {
    let mut t = Tournament::new(store);
    let mut console = ScriptedConsole::default();
    for name in names {
        t.register_player(Some(name), &mut console).unwrap();
    }
    t
}

fn memory() -> MemoryStore {
    MemoryStore::new()
}

fn sqlite() -> SqliteStore {
    SqliteStore::open_in_memory().unwrap()
}

/// runs a scenario once per store implementation
macro_rules! on_each_store {
    ($name:ident, $scenario:ident) => {
        #[test]
        fn $name() {
            $scenario(memory);
            $scenario(sqlite);
        }
    };
}

fn summary<S: TournamentStore>(t: &Tournament<S>) -> Vec<(i64, String, u32, u32)> {
    t.standings(None)
        .unwrap()
        .into_iter()
        .map(|s| (s.player, s.name, s.wins, s.matches_played))
        .collect()
}

fn pair_ids(round: &RoundPairings) -> Vec<(i64, i64)> {
    round.pairs.iter().map(|p| (p.player_a, p.player_b)).collect()
}

fn registered_players_start_at_zero<S: TournamentStore>(store: impl Fn() -> S) {
    let t = with_players(store(), &["Alice", "Bob", "Carol", "Dave"]);
    assert_eq!(
        vec![
            (1, "Alice".to_string(), 0, 0),
            (2, "Bob".to_string(), 0, 0),
            (3, "Carol".to_string(), 0, 0),
            (4, "Dave".to_string(), 0, 0),
        ],
        summary(&t)
    );
}
on_each_store!(test_registered_players_start_at_zero, registered_players_start_at_zero);

fn reported_match_shows_in_standings<S: TournamentStore>(store: impl Fn() -> S) {
    let mut t = with_players(store(), &["Alice", "Bob", "Carol", "Dave"]);
    t.report_match(1, 2, None).unwrap();
    let standings = summary(&t);
    assert_eq!((1, "Alice".to_string(), 1, 1), standings[0]);
    let bob = standings.iter().find(|e| e.0 == 2).unwrap();
    assert_eq!((0, 1), (bob.2, bob.3));
}
on_each_store!(test_reported_match_shows_in_standings, reported_match_shows_in_standings);

fn three_meetings_are_never_paired_again<S: TournamentStore>(store: impl Fn() -> S) {
    let mut t = with_players(store(), &["Alice", "Bob", "Carol", "Dave"]);
    for _ in 0..3 {
        t.report_match(1, 2, None).unwrap();
    }
    assert!(!t.is_pairable(1, 2, None).unwrap());
    assert!(!t.is_pairable(2, 1, None).unwrap());
    // Alice leads and Bob is next in rank, but they are done with each other
    let round = t.swiss_pairings(None).unwrap();
    assert_eq!(None, round.bye);
    assert_eq!(vec![(1, 3), (2, 4)], pair_ids(&round));
}
on_each_store!(test_three_meetings_are_never_paired_again, three_meetings_are_never_paired_again);

fn odd_field_gets_one_bye<S: TournamentStore>(store: impl Fn() -> S) {
    let t = with_players(store(), &["Alice", "Bob", "Carol", "Dave", "Eve"]);
    let round = t.swiss_pairings(None).unwrap();
    assert_eq!(2, round.pairs.len());
    let bye = round.bye.as_ref().unwrap().player;
    assert_eq!(5, bye);
    assert!(pair_ids(&round).iter().all(|(a, b)| *a != bye && *b != bye));
}
on_each_store!(test_odd_field_gets_one_bye, odd_field_gets_one_bye);

fn standings_are_idempotent<S: TournamentStore>(store: impl Fn() -> S) {
    let mut t = with_players(store(), &["Alice", "Bob", "Carol", "Dave"]);
    t.report_match(3, 1, None).unwrap();
    t.report_draw(2, 4, None).unwrap();
    assert_eq!(t.standings(None).unwrap(), t.standings(None).unwrap());
}
on_each_store!(test_standings_are_idempotent, standings_are_idempotent);

fn draws_allow_a_third_meeting<S: TournamentStore>(store: impl Fn() -> S) {
    let mut t = with_players(store(), &["Alice", "Bob"]);
    t.report_match(1, 2, None).unwrap();
    t.report_match(1, 2, None).unwrap();
    assert!(!t.is_pairable(1, 2, None).unwrap());
    assert!(matches!(
        t.swiss_pairings(None),
        Err(TournamentError::PairingExhausted { player: 1 })
    ));

    let mut t = with_players(store(), &["Alice", "Bob"]);
    t.report_match(1, 2, None).unwrap();
    t.report_draw(1, 2, None).unwrap();
    assert!(t.is_pairable(2, 1, None).unwrap());
    assert_eq!(1, t.swiss_pairings(None).unwrap().pair_count());
}
on_each_store!(test_draws_allow_a_third_meeting, draws_allow_a_third_meeting);

fn fifth_report_is_rejected<S: TournamentStore>(store: impl Fn() -> S) {
    let mut t = with_players(store(), &["Alice", "Bob"]);
    for _ in 0..4 {
        t.report_draw(1, 2, None).unwrap();
    }
    assert!(matches!(
        t.report_match(1, 2, None),
        Err(TournamentError::RoundLimitExceeded { attempted: 5, .. })
    ));
    assert_eq!(4, t.standings(None).unwrap()[0].matches_played);
}
on_each_store!(test_fifth_report_is_rejected, fifth_report_is_rejected);

fn tournaments_are_scoped<S: TournamentStore>(store: impl Fn() -> S) {
    let mut t = with_players(store(), &["Alice", "Bob"]);
    t.report_match(2, 1, Some(7)).unwrap();
    assert_eq!(0, t.standings(None).unwrap()[0].matches_played);
    let other = t.standings(Some(7)).unwrap();
    assert_eq!(2, other[0].player);
    assert_eq!(1, other[0].wins);
}
on_each_store!(test_tournaments_are_scoped, tournaments_are_scoped);

fn byes_rotate_in_a_three_player_field<S: TournamentStore>(store: impl Fn() -> S) {
    let mut t = with_players(store(), &["Alice", "Bob", "Carol"]);
    let mut byes = Vec::new();
    for _ in 0..3 {
        let round = t.swiss_pairings(None).unwrap();
        byes.push(round.bye.as_ref().unwrap().player);
        for p in &round.pairs {
            t.report_match(p.player_a, p.player_b, None).unwrap();
        }
    }
    assert_eq!(vec![3, 2, 1], byes);
    for s in t.standings(None).unwrap() {
        assert_eq!(2, s.matches_played);
    }
    // everyone has met everyone once, so a fourth round still works
    assert!(t.swiss_pairings(None).is_ok());
}
on_each_store!(test_byes_rotate_in_a_three_player_field, byes_rotate_in_a_three_player_field);

fn draws_earn_points<S: TournamentStore>(store: impl Fn() -> S) {
    let mut t = with_players(store(), &["Alice", "Bob", "Carol"]);
    t.report_draw(2, 1, None).unwrap();
    t.report_draw(2, 3, None).unwrap();
    t.report_draw(2, 1, None).unwrap();
    t.report_match(3, 1, None).unwrap();
    let standings = t.standings(None).unwrap();
    // Carol's one win ranks her first, Bob's three draws still outscore her
    assert_eq!(3, standings[0].player);
    assert_eq!(4, standings[0].points);
    let bob = standings.iter().find(|s| s.player == 2).unwrap();
    assert_eq!((0, 3, 3), (bob.wins, bob.draws, bob.points));
    assert!(swiss_tournament::format_standings(&standings).contains("3 pts"));
}
on_each_store!(test_draws_earn_points, draws_earn_points);

#[test]
fn test_random_histories_keep_invariants() {
    let names = ["A", "B", "C", "D", "E", "F", "G", "H", "I"];
    for seed in 0..20u64 {
        let mut rng = StdRng::seed_from_u64(seed);
        let mut t = with_players(MemoryStore::new(), &names);
        let n = names.len() as i64;
        for _ in 0..rng.gen_range(0..25) {
            let a = rng.gen_range(1..=n);
            let b = rng.gen_range(1..=n);
            if a == b {
                continue;
            }
            // over-cap reports are expected to bounce
            let _ = if rng.gen_bool(0.2) {
                t.report_draw(a, b, None)
            } else {
                t.report_match(a, b, None)
            };
        }

        let standings = t.standings(None).unwrap();
        assert_eq!(t.count_players().unwrap(), standings.len());
        for s in &standings {
            assert_eq!(s.matches_played, s.wins + s.losses + s.draws);
        }
        for w in standings.windows(2) {
            assert!(w[0].wins >= w[1].wins);
        }

        for a in 1..=n {
            for b in 1..=n {
                assert_eq!(
                    t.is_pairable(a, b, None).unwrap(),
                    t.is_pairable(b, a, None).unwrap()
                );
            }
        }

        match t.swiss_pairings(None) {
            Ok(round) => {
                let mut seen = HashSet::new();
                for p in &round.pairs {
                    assert!(seen.insert(p.player_a));
                    assert!(seen.insert(p.player_b));
                    let met = t
                        .store()
                        .matches_between(p.player_a, p.player_b, 1)
                        .unwrap()
                        .len();
                    assert!(met < 3);
                    assert!(t.is_pairable(p.player_a, p.player_b, None).unwrap());
                }
                if standings.len() % 2 == 1 {
                    let bye = round.bye.as_ref().unwrap().player;
                    assert!(!seen.contains(&bye));
                    assert_eq!(standings.len(), seen.len() + 1);
                } else {
                    assert_eq!(None, round.bye);
                }
            }
            Err(TournamentError::PairingExhausted { .. }) => {}
            Err(e) => panic!("unexpected error {e}"),
        }
    }
}

#[test]
fn test_resets_clear_counts() {
    let mut t = with_players(SqliteStore::open_in_memory().unwrap(), &["Alice", "Bob"]);
    t.report_match(1, 2, None).unwrap();
    assert_eq!(1, t.delete_matches().unwrap());
    assert_eq!(2, t.delete_players().unwrap());
    assert_eq!(0, t.count_players().unwrap());
    assert!(t.standings(None).unwrap().is_empty());
    assert!(t.swiss_pairings(None).unwrap().is_empty());
}
