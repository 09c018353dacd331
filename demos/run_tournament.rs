//! Runs a whole tournament against the configured store: registers the players named on the
//! command line (or asks for one if none are given), then plays every round with random
//! results and prints standings and pairings as it goes.
//!
//!     TOURNAMENT_DB=swiss.db SEED=7 cargo run --example run_tournament -- Alice Bob Carol Dave
extern crate swiss_tournament;

use std::env;

use anyhow::{anyhow, Context};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use swiss_tournament::{
    format_pairings, format_standings, SqliteStore, StdConsole, StoreConfig, Tournament,
    TournamentError,
};

fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    let config = StoreConfig::from_env();
    let store = SqliteStore::from_config(&config)
        .with_context(|| format!("opening {}", config.database_path))?;
    let mut tournament = Tournament::new(store);
    let mut console = StdConsole;

    tournament.delete_matches()?;
    tournament.delete_players()?;

    let names = env::args().skip(1).collect::<Vec<_>>();
    if names.is_empty() {
        tournament.register_player(None, &mut console)?;
    }
    for name in &names {
        tournament.register_player(Some(name), &mut console)?;
    }
    if tournament.count_players()? < 2 {
        return Err(anyhow!("need at least two players"));
    }

    let seed = env::var("SEED")
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(0u64);
    let mut rng = StdRng::seed_from_u64(seed);

    for round in 1..=tournament.config().max_rounds {
        let pairings = match tournament.swiss_pairings(None) {
            Ok(p) => p,
            Err(TournamentError::PairingExhausted { player }) => {
                println!("Round {}: nobody left for player {}, stopping", round, player);
                break;
            }
            Err(e) => return Err(e.into()),
        };
        println!("Round {}:\n{}\n", round, format_pairings(&pairings));

        for pair in &pairings.pairs {
            match rng.gen_range(0..5) {
                0 => tournament.report_draw(pair.player_a, pair.player_b, None)?,
                1 | 2 => tournament.report_match(pair.player_a, pair.player_b, None)?,
                _ => tournament.report_match(pair.player_b, pair.player_a, None)?,
            };
        }
        println!("{}\n", format_standings(&tournament.standings(None)?));
    }

    Ok(())
}
