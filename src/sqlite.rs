use log::debug;
use rusqlite::{params, Connection, OptionalExtension, Row};

use crate::config::StoreConfig;
use crate::store::{NewMatch, TournamentStore};
use crate::{MatchId, MatchRecord, Player, PlayerId, TournamentId, TournamentResult};

const MATCH_COLUMNS: &str = "id, winner, loser, tournament_id, round, is_draw";

/// [`TournamentStore`] backed by a single sqlite connection.
pub struct SqliteStore {
    conn: Connection,
}

impl SqliteStore {
    pub fn open(path: &str) -> TournamentResult<Self> {
        let mut store = Self {
            conn: Connection::open(path)?,
        };
        store.create_schema()?;
        Ok(store)
    }

    pub fn open_in_memory() -> TournamentResult<Self> {
        let mut store = Self {
            conn: Connection::open_in_memory()?,
        };
        store.create_schema()?;
        Ok(store)
    }

    pub fn from_config(config: &StoreConfig) -> TournamentResult<Self> {
        if config.is_in_memory() {
            Self::open_in_memory()
        } else {
            Self::open(&config.database_path)
        }
    }

    /// Safe to call on an existing database.
    pub fn create_schema(&mut self) -> TournamentResult<()> {
        let tx = self.conn.transaction()?;

        tx.execute(
            "CREATE TABLE IF NOT EXISTS players (
                id   INTEGER PRIMARY KEY AUTOINCREMENT,
                name TEXT    NOT NULL
            );",
            [],
        )?;

        // no foreign keys: match rows deliberately outlive a player reset
        tx.execute(
            "CREATE TABLE IF NOT EXISTS matches (
                id            INTEGER PRIMARY KEY AUTOINCREMENT,
                winner        INTEGER NOT NULL,
                loser         INTEGER NOT NULL,
                tournament_id INTEGER NOT NULL,
                round         INTEGER NOT NULL,
                is_draw       INTEGER NOT NULL DEFAULT 0
            );",
            [],
        )?;

        tx.execute(
            "CREATE INDEX IF NOT EXISTS matches_by_tournament ON matches (tournament_id);",
            [],
        )?;

        tx.commit()?;
        Ok(())
    }

    fn query_matches<P: rusqlite::Params>(
        &self,
        filter: &str,
        params: P,
    ) -> TournamentResult<Vec<MatchRecord>> {
        let sql = format!("SELECT {MATCH_COLUMNS} FROM matches WHERE {filter} ORDER BY id");
        let mut stmt = self.conn.prepare(&sql)?;
        let rows = stmt.query_map(params, match_from_row)?;
        let records = rows.collect::<Result<Vec<_>, _>>()?;
        Ok(records)
    }
}

fn player_from_row(row: &Row<'_>) -> rusqlite::Result<Player> {
    Ok(Player {
        id: row.get(0)?,
        name: row.get(1)?,
    })
}

fn match_from_row(row: &Row<'_>) -> rusqlite::Result<MatchRecord> {
    Ok(MatchRecord {
        id: row.get(0)?,
        winner: row.get(1)?,
        loser: row.get(2)?,
        tournament: row.get(3)?,
        round: row.get(4)?,
        draw: row.get(5)?,
    })
}

/// COUNT(*) comes back as an i64; anything that doesn't fit a usize is a bad row, not a count
fn row_count(n: i64) -> rusqlite::Result<usize> {
    usize::try_from(n).map_err(|_| rusqlite::Error::IntegralValueOutOfRange(0, n))
}

impl TournamentStore for SqliteStore {
    fn insert_player(&mut self, name: &str) -> TournamentResult<PlayerId> {
        self.conn
            .execute("INSERT INTO players (name) VALUES (?1)", params![name])?;
        Ok(self.conn.last_insert_rowid())
    }

    fn insert_match(&mut self, new_match: &NewMatch) -> TournamentResult<MatchId> {
        self.conn.execute(
            "INSERT INTO matches (winner, loser, tournament_id, round, is_draw)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            params![
                new_match.winner,
                new_match.loser,
                new_match.tournament,
                new_match.round,
                new_match.draw
            ],
        )?;
        let id = self.conn.last_insert_rowid();
        debug!("inserted match row {}", id);
        Ok(id)
    }

    fn delete_players(&mut self) -> TournamentResult<usize> {
        Ok(self.conn.execute("DELETE FROM players", [])?)
    }

    fn delete_matches(&mut self) -> TournamentResult<usize> {
        Ok(self.conn.execute("DELETE FROM matches", [])?)
    }

    fn count_players(&self) -> TournamentResult<usize> {
        let n: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM players", [], |row| row.get(0))?;
        Ok(row_count(n)?)
    }

    fn players(&self) -> TournamentResult<Vec<Player>> {
        let mut stmt = self.conn.prepare("SELECT id, name FROM players ORDER BY id")?;
        let rows = stmt.query_map([], player_from_row)?;
        let players = rows.collect::<Result<Vec<_>, _>>()?;
        Ok(players)
    }

    fn player(&self, id: PlayerId) -> TournamentResult<Option<Player>> {
        let player = self
            .conn
            .query_row(
                "SELECT id, name FROM players WHERE id = ?1",
                params![id],
                player_from_row,
            )
            .optional()?;
        Ok(player)
    }

    fn matches_between(
        &self,
        a: PlayerId,
        b: PlayerId,
        tournament: TournamentId,
    ) -> TournamentResult<Vec<MatchRecord>> {
        self.query_matches(
            "tournament_id = ?3
             AND ((winner = ?1 AND loser = ?2) OR (winner = ?2 AND loser = ?1))",
            params![a, b, tournament],
        )
    }

    fn matches_for_player(
        &self,
        player: PlayerId,
        tournament: TournamentId,
    ) -> TournamentResult<Vec<MatchRecord>> {
        self.query_matches(
            "tournament_id = ?2 AND (winner = ?1 OR loser = ?1)",
            params![player, tournament],
        )
    }

    fn matches_in_tournament(
        &self,
        tournament: TournamentId,
    ) -> TournamentResult<Vec<MatchRecord>> {
        self.query_matches("tournament_id = ?1", params![tournament])
    }
}
