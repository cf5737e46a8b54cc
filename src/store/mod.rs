//! SQLite round store.
//!
//! Durable ledger of teams, players, and one round row per
//! (team, role, week). Round rows are written once by a submission or by
//! the advancement engine; the only in-place change ever made is the
//! explicit `computed` → `decided` transition when a player fills in
//! their decision. Uses WAL mode for concurrent reads during writes.

use std::path::Path;

use rusqlite::{params, Connection, OptionalExtension, Result as SqlResult};

use crate::error::{GameError, Result};
use crate::model::role::Role;
use crate::model::round::{Decision, Round, RoundState};
use crate::model::team::{Player, PlayerId, Team, TeamId};

/// Database handle wrapping a SQLite connection.
pub struct GameStore {
    conn: Connection,
}

impl GameStore {
    /// Open (or create) the database at the given path.
    pub fn open<P: AsRef<Path>>(path: P) -> SqlResult<Self> {
        let conn = Connection::open(path)?;
        let store = Self { conn };
        store.init()?;
        Ok(store)
    }

    /// Open an in-memory database (for testing and demos).
    pub fn open_memory() -> SqlResult<Self> {
        let conn = Connection::open_in_memory()?;
        let store = Self { conn };
        store.init()?;
        Ok(store)
    }

    fn init(&self) -> SqlResult<()> {
        self.conn.execute_batch("PRAGMA journal_mode=WAL;")?;
        self.conn.execute_batch("PRAGMA foreign_keys=ON;")?;
        self.conn.execute_batch(
            "
            CREATE TABLE IF NOT EXISTS teams (
                team_id     INTEGER PRIMARY KEY AUTOINCREMENT,
                team_name   TEXT NOT NULL,
                team_secret TEXT NOT NULL,
                created_at  INTEGER NOT NULL
            );

            CREATE TABLE IF NOT EXISTS players (
                player_id INTEGER PRIMARY KEY AUTOINCREMENT,
                team_id   INTEGER NOT NULL REFERENCES teams(team_id),
                name      TEXT NOT NULL,
                role      TEXT NOT NULL,
                contact   TEXT NOT NULL DEFAULT '',
                UNIQUE(team_id, role)
            );

            CREATE TABLE IF NOT EXISTS rounds (
                round_id          INTEGER PRIMARY KEY AUTOINCREMENT,
                team_id           INTEGER NOT NULL REFERENCES teams(team_id),
                week              INTEGER NOT NULL,
                role              TEXT NOT NULL,
                stock             INTEGER NOT NULL,
                backorder         INTEGER NOT NULL,
                incoming_order    INTEGER NOT NULL,
                incoming_shipment INTEGER NOT NULL,
                placed_order      INTEGER NOT NULL,
                sent_shipment     INTEGER NOT NULL,
                total_cost        REAL NOT NULL DEFAULT 0,
                state             TEXT NOT NULL,
                UNIQUE(team_id, role, week)
            );

            CREATE INDEX IF NOT EXISTS idx_rounds_team_week
                ON rounds(team_id, week);
            ",
        )?;
        Ok(())
    }

    // ── Teams ──────────────────────────────────────────────────────────

    /// Create a team with a join secret. Returns its id.
    pub fn create_team(&self, name: &str, secret: &str) -> Result<TeamId> {
        let now = unix_now();
        self.conn.execute(
            "INSERT INTO teams (team_name, team_secret, created_at) VALUES (?1, ?2, ?3)",
            params![name, secret, now],
        )?;
        Ok(TeamId(self.conn.last_insert_rowid()))
    }

    /// Look up a team by id. The join secret is never returned here.
    pub fn team(&self, team: TeamId) -> Result<Option<Team>> {
        let row = self
            .conn
            .query_row(
                "SELECT team_id, team_name FROM teams WHERE team_id = ?1",
                params![team.0],
                |row| {
                    Ok(Team {
                        id: TeamId(row.get(0)?),
                        name: row.get(1)?,
                    })
                },
            )
            .optional()?;
        Ok(row)
    }

    /// All registered teams, oldest first.
    pub fn list_teams(&self) -> Result<Vec<Team>> {
        let mut stmt = self
            .conn
            .prepare("SELECT team_id, team_name FROM teams ORDER BY team_id")?;
        let rows = stmt.query_map([], |row| {
            Ok(Team {
                id: TeamId(row.get(0)?),
                name: row.get(1)?,
            })
        })?;
        Ok(rows.collect::<SqlResult<Vec<_>>>()?)
    }

    /// Compare a candidate join secret against the stored one.
    pub fn verify_team_secret(&self, team: TeamId, secret: &str) -> Result<bool> {
        let stored: Option<String> = self
            .conn
            .query_row(
                "SELECT team_secret FROM teams WHERE team_id = ?1",
                params![team.0],
                |row| row.get(0),
            )
            .optional()?;
        match stored {
            Some(stored) => Ok(stored == secret),
            None => Err(GameError::NotFound(format!("team {}", team.0))),
        }
    }

    // ── Players ────────────────────────────────────────────────────────

    /// Register a player in a seat. Each (team, role) seat may only be
    /// taken once; a second registration is rejected.
    pub fn register_player(
        &self,
        team: TeamId,
        name: &str,
        role: Role,
        contact: &str,
    ) -> Result<PlayerId> {
        if self.player_for_seat(team, role)?.is_some() {
            return Err(GameError::DuplicateRegistration { role });
        }
        self.conn.execute(
            "INSERT INTO players (team_id, name, role, contact) VALUES (?1, ?2, ?3, ?4)",
            params![team.0, name, role.as_str(), contact],
        )?;
        Ok(PlayerId(self.conn.last_insert_rowid()))
    }

    /// The player occupying (team, role), if any.
    pub fn player_for_seat(&self, team: TeamId, role: Role) -> Result<Option<Player>> {
        let row = self
            .conn
            .query_row(
                "SELECT player_id, team_id, name, role, contact
                 FROM players WHERE team_id = ?1 AND role = ?2",
                params![team.0, role.as_str()],
                map_player_row,
            )
            .optional()?;
        Ok(row)
    }

    /// Count of distinct roles registered for the team.
    pub fn roles_registered(&self, team: TeamId) -> Result<u32> {
        let count: i64 = self.conn.query_row(
            "SELECT COUNT(DISTINCT role) FROM players WHERE team_id = ?1",
            params![team.0],
            |row| row.get(0),
        )?;
        Ok(count as u32)
    }

    // ── Rounds ─────────────────────────────────────────────────────────

    /// The round row at (team, role, week), if any.
    pub fn round(&self, team: TeamId, role: Role, week: u32) -> Result<Option<Round>> {
        let row = self
            .conn
            .query_row(
                "SELECT role, week, stock, backorder, incoming_order, incoming_shipment,
                        placed_order, sent_shipment, state
                 FROM rounds WHERE team_id = ?1 AND role = ?2 AND week = ?3",
                params![team.0, role.as_str(), week],
                map_round_row,
            )
            .optional()?;
        Ok(row)
    }

    /// The most recent round row for (team, role) by week. `None` means
    /// the role has no history yet (its first week).
    pub fn latest_round(&self, team: TeamId, role: Role) -> Result<Option<Round>> {
        let row = self
            .conn
            .query_row(
                "SELECT role, week, stock, backorder, incoming_order, incoming_shipment,
                        placed_order, sent_shipment, state
                 FROM rounds WHERE team_id = ?1 AND role = ?2
                 ORDER BY week DESC LIMIT 1",
                params![team.0, role.as_str()],
                map_round_row,
            )
            .optional()?;
        Ok(row)
    }

    /// The highest week number recorded for the team, or 1 if no rows
    /// exist yet.
    pub fn current_week(&self, team: TeamId) -> Result<u32> {
        let max: Option<i64> = self.conn.query_row(
            "SELECT MAX(week) FROM rounds WHERE team_id = ?1",
            params![team.0],
            |row| row.get(0),
        )?;
        Ok(max.map(|w| w as u32).unwrap_or(1))
    }

    /// Count of distinct roles with a *decided* row at (team, week).
    pub fn submission_count(&self, team: TeamId, week: u32) -> Result<u32> {
        let count: i64 = self.conn.query_row(
            "SELECT COUNT(DISTINCT role) FROM rounds
             WHERE team_id = ?1 AND week = ?2 AND state = 'decided'",
            params![team.0, week],
            |row| row.get(0),
        )?;
        Ok(count as u32)
    }

    /// Record a player's decision for a week.
    ///
    /// Week 1 has no engine-written row yet, so the decision is seeded
    /// from the baseline and inserted directly as `decided`. From week 2
    /// on, the engine's `computed` row is transitioned to `decided` with
    /// the decision filled in. Resubmission of an already decided week is
    /// rejected.
    pub fn record_decision(
        &self,
        team: TeamId,
        role: Role,
        week: u32,
        decision: Decision,
        baseline_stock: u32,
    ) -> Result<Round> {
        match self.round(team, role, week)? {
            Some(existing) if existing.state == RoundState::Decided => {
                Err(GameError::DuplicateSubmission { role, week })
            }
            Some(mut existing) => {
                // Explicit computed → decided transition. The state guard in
                // the WHERE clause keeps a racing resubmission from landing.
                let changed = self.conn.execute(
                    "UPDATE rounds
                     SET placed_order = ?1, sent_shipment = ?2, state = 'decided'
                     WHERE team_id = ?3 AND role = ?4 AND week = ?5 AND state = 'computed'",
                    params![
                        decision.placed_order,
                        decision.sent_shipment,
                        team.0,
                        role.as_str(),
                        week
                    ],
                )?;
                if changed == 0 {
                    return Err(GameError::DuplicateSubmission { role, week });
                }
                existing.placed_order = decision.placed_order;
                existing.sent_shipment = decision.sent_shipment;
                existing.state = RoundState::Decided;
                Ok(existing)
            }
            None if week == 1 => {
                let mut round = Round::baseline(role, baseline_stock);
                round.placed_order = decision.placed_order;
                round.sent_shipment = decision.sent_shipment;
                round.state = RoundState::Decided;
                self.insert_round(team, &round)?;
                Ok(round)
            }
            None => Err(GameError::NotFound(format!(
                "no round for {role} at week {week}"
            ))),
        }
    }

    /// Write the four engine-computed rows for a week in one transaction;
    /// either all four land or none do.
    pub fn insert_computed_week(&mut self, team: TeamId, rounds: &[Round; 4]) -> Result<()> {
        let tx = self.conn.transaction()?;
        for round in rounds {
            insert_round_tx(&tx, team, round)?;
        }
        tx.commit()?;
        Ok(())
    }

    fn insert_round(&self, team: TeamId, round: &Round) -> Result<()> {
        insert_round_tx(&self.conn, team, round)
    }

    /// The decided rows for (team, week), in chain order. Used by the
    /// advancement engine once the gate holds.
    pub fn decided_week(&self, team: TeamId, week: u32) -> Result<Vec<Round>> {
        let mut stmt = self.conn.prepare(
            "SELECT role, week, stock, backorder, incoming_order, incoming_shipment,
                    placed_order, sent_shipment, state
             FROM rounds WHERE team_id = ?1 AND week = ?2 AND state = 'decided'",
        )?;
        let rows = stmt.query_map(params![team.0, week], map_round_row)?;
        let mut rounds = rows.collect::<SqlResult<Vec<_>>>()?;
        rounds.sort_by_key(|r| r.role.index());
        Ok(rounds)
    }

    /// Full round history for a team, ordered by week then chain position.
    /// Read-only; reporting consumers never mutate kernel state.
    pub fn team_history(&self, team: TeamId) -> Result<Vec<Round>> {
        let mut stmt = self.conn.prepare(
            "SELECT role, week, stock, backorder, incoming_order, incoming_shipment,
                    placed_order, sent_shipment, state
             FROM rounds WHERE team_id = ?1 ORDER BY week",
        )?;
        let rows = stmt.query_map(params![team.0], map_round_row)?;
        let mut rounds = rows.collect::<SqlResult<Vec<_>>>()?;
        rounds.sort_by_key(|r| (r.week, r.role.index()));
        Ok(rounds)
    }

    /// One role's history, ordered by week.
    pub fn role_history(&self, team: TeamId, role: Role) -> Result<Vec<Round>> {
        let mut stmt = self.conn.prepare(
            "SELECT role, week, stock, backorder, incoming_order, incoming_shipment,
                    placed_order, sent_shipment, state
             FROM rounds WHERE team_id = ?1 AND role = ?2 ORDER BY week",
        )?;
        let rows = stmt.query_map(params![team.0, role.as_str()], map_round_row)?;
        Ok(rows.collect::<SqlResult<Vec<_>>>()?)
    }

    // ── Resets ─────────────────────────────────────────────────────────

    /// Purge one team's round and player rows. The team row itself stays
    /// so the same roster can re-register and play again.
    pub fn reset_team(&mut self, team: TeamId) -> Result<()> {
        let tx = self.conn.transaction()?;
        tx.execute("DELETE FROM rounds WHERE team_id = ?1", params![team.0])?;
        tx.execute("DELETE FROM players WHERE team_id = ?1", params![team.0])?;
        tx.commit()?;
        Ok(())
    }

    /// Purge round and player rows for every team. Destructive and
    /// irreversible; callers must gate this behind explicit confirmation.
    pub fn reset_all_teams(&mut self) -> Result<()> {
        let tx = self.conn.transaction()?;
        tx.execute("DELETE FROM rounds", [])?;
        tx.execute("DELETE FROM players", [])?;
        tx.commit()?;
        Ok(())
    }
}

fn insert_round_tx(conn: &Connection, team: TeamId, round: &Round) -> Result<()> {
    conn.execute(
        "INSERT INTO rounds (
            team_id, week, role,
            stock, backorder, incoming_order, incoming_shipment,
            placed_order, sent_shipment, total_cost, state
        ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, 0, ?10)",
        params![
            team.0,
            round.week,
            round.role.as_str(),
            round.stock,
            round.backorder,
            round.incoming_order,
            round.incoming_shipment,
            round.placed_order,
            round.sent_shipment,
            round.state.as_str(),
        ],
    )?;
    Ok(())
}

fn map_player_row(row: &rusqlite::Row) -> SqlResult<Player> {
    let role_str: String = row.get(3)?;
    let role = Role::parse(&role_str).ok_or_else(|| invalid_text(3, role_str))?;
    Ok(Player {
        id: PlayerId(row.get(0)?),
        team: TeamId(row.get(1)?),
        name: row.get(2)?,
        role,
        contact: row.get(4)?,
    })
}

fn map_round_row(row: &rusqlite::Row) -> SqlResult<Round> {
    let role_str: String = row.get(0)?;
    let role = Role::parse(&role_str).ok_or_else(|| invalid_text(0, role_str))?;
    let state_str: String = row.get(8)?;
    let state = RoundState::parse(&state_str).ok_or_else(|| invalid_text(8, state_str))?;
    Ok(Round {
        role,
        week: row.get::<_, i64>(1)? as u32,
        stock: row.get::<_, i64>(2)? as u32,
        backorder: row.get::<_, i64>(3)? as u32,
        incoming_order: row.get::<_, i64>(4)? as u32,
        incoming_shipment: row.get::<_, i64>(5)? as u32,
        placed_order: row.get::<_, i64>(6)? as u32,
        sent_shipment: row.get::<_, i64>(7)? as u32,
        state,
    })
}

fn invalid_text(idx: usize, value: String) -> rusqlite::Error {
    rusqlite::Error::FromSqlConversionFailure(
        idx,
        rusqlite::types::Type::Text,
        format!("unrecognized value '{value}'").into(),
    )
}

fn unix_now() -> i64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs() as i64
}
