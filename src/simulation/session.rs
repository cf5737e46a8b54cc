//! Service facade over the store, gate, and engine.
//!
//! This is the narrow interface the registration, gameplay, reporting,
//! and administrative collaborators call into. Every entry point is a
//! bounded synchronous operation; the store mutex is held across
//! "record → check quorum → advance" so a week transition happens
//! exactly once no matter how submissions race.

use std::sync::{Mutex, MutexGuard, PoisonError};

use tracing::{debug, info};

use crate::error::{GameError, Result};
use crate::model::role::Role;
use crate::model::round::{Decision, Round};
use crate::model::team::{PlayerId, Team, TeamId};
use crate::simulation::config::GameConfig;
use crate::simulation::engine::{self, Exogenous};
use crate::simulation::gate;
use crate::store::GameStore;

/// What a submission led to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmissionOutcome {
    /// Recorded; still waiting on other roles this week.
    Waiting { submitted: u32 },
    /// This submission completed the quorum and the engine advanced the
    /// team to `new_week`.
    WeekAdvanced { new_week: u32 },
}

/// A running game deployment: one store, one configuration.
pub struct BeerGame {
    store: Mutex<GameStore>,
    config: GameConfig,
}

impl BeerGame {
    pub fn new(store: GameStore, config: GameConfig) -> Self {
        Self {
            store: Mutex::new(store),
            config,
        }
    }

    /// Open a game backed by an on-disk database.
    pub fn open<P: AsRef<std::path::Path>>(path: P, config: GameConfig) -> Result<Self> {
        Ok(Self::new(GameStore::open(path)?, config))
    }

    /// Open a game backed by an in-memory database.
    pub fn in_memory(config: GameConfig) -> Result<Self> {
        Ok(Self::new(GameStore::open_memory()?, config))
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    fn store(&self) -> MutexGuard<'_, GameStore> {
        self.store.lock().unwrap_or_else(PoisonError::into_inner)
    }

    // ── Registration ───────────────────────────────────────────────────

    pub fn create_team(&self, name: &str, secret: &str) -> Result<TeamId> {
        let team = self.store().create_team(name, secret)?;
        info!(team = team.0, name, "team created");
        Ok(team)
    }

    pub fn list_teams(&self) -> Result<Vec<Team>> {
        self.store().list_teams()
    }

    /// Join a team seat. The caller must present the team's join secret.
    pub fn join_team(
        &self,
        team: TeamId,
        secret: &str,
        name: &str,
        role: Role,
        contact: &str,
    ) -> Result<PlayerId> {
        let store = self.store();
        if !store.verify_team_secret(team, secret)? {
            return Err(GameError::Authorization);
        }
        let player = store.register_player(team, name, role, contact)?;
        info!(team = team.0, %role, name, "player joined");
        Ok(player)
    }

    pub fn is_team_complete(&self, team: TeamId) -> Result<bool> {
        let store = self.store();
        self.require_team(&store, team)?;
        gate::is_team_complete(&store, team)
    }

    // ── Gameplay ───────────────────────────────────────────────────────

    pub fn current_week(&self, team: TeamId) -> Result<u32> {
        let store = self.store();
        self.require_team(&store, team)?;
        store.current_week(team)
    }

    /// The latest recorded round for a role, or `None` on its first week.
    pub fn latest_state(&self, team: TeamId, role: Role) -> Result<Option<Round>> {
        let store = self.store();
        self.require_team(&store, team)?;
        store.latest_round(team, role)
    }

    pub fn is_week_complete(&self, team: TeamId, week: u32) -> Result<bool> {
        let store = self.store();
        self.require_team(&store, team)?;
        gate::is_week_complete(&store, team, week)
    }

    /// Record a role's decision for the team's current week. If this
    /// submission completes the quorum, the engine computes and persists
    /// the next week's rows for all four roles before returning.
    pub fn submit_decision(
        &self,
        team: TeamId,
        role: Role,
        decision: Decision,
    ) -> Result<SubmissionOutcome> {
        let mut store = self.store();
        self.require_team(&store, team)?;

        if store.player_for_seat(team, role)?.is_none() {
            return Err(GameError::NotFound(format!(
                "no player registered as {role} on team {}",
                team.0
            )));
        }
        let registered = store.roles_registered(team)?;
        if registered < Role::CHAIN.len() as u32 {
            return Err(GameError::IncompleteRoster { registered });
        }

        let week = store.current_week(team)?;
        if week > self.config.weeks_total {
            return Err(GameError::GameFinished {
                week,
                horizon: self.config.weeks_total,
            });
        }

        store.record_decision(team, role, week, decision, self.config.initial_stock)?;
        debug!(
            team = team.0,
            %role,
            week,
            order = decision.placed_order,
            shipment = decision.sent_shipment,
            "decision recorded"
        );

        if !gate::is_week_complete(&store, team, week)? {
            let submitted = store.submission_count(team, week)?;
            return Ok(SubmissionOutcome::Waiting { submitted });
        }

        let new_week = self.run_engine(&mut store, team, week)?;
        Ok(SubmissionOutcome::WeekAdvanced { new_week })
    }

    /// Run the engine for a completed week and return the new week
    /// number. The quorum-completing submission normally does this
    /// implicitly; this entry point re-drives an advancement that was
    /// interrupted after the quorum landed. Idempotent: a week that has
    /// already advanced is left alone.
    pub fn advance_week(&self, team: TeamId, week: u32) -> Result<u32> {
        let mut store = self.store();
        self.require_team(&store, team)?;
        if store.current_week(team)? > week {
            return Ok(week + 1);
        }
        if !gate::is_week_complete(&store, team, week)? {
            let submitted = store.submission_count(team, week)?;
            return Err(GameError::IncompleteWeek { week, submitted });
        }
        self.run_engine(&mut store, team, week)
    }

    fn run_engine(&self, store: &mut GameStore, team: TeamId, week: u32) -> Result<u32> {
        let decided: [Round; 4] = store
            .decided_week(team, week)?
            .try_into()
            .map_err(|_| GameError::NotFound(format!("decided rows for week {week}")))?;
        let next = engine::advance_week(
            &decided,
            Exogenous {
                customer_demand: self.config.demand_for_week(week),
                factory_production: self.config.factory_production,
            },
        );
        store.insert_computed_week(team, &next)?;
        info!(team = team.0, week, new_week = week + 1, "week advanced");
        Ok(week + 1)
    }

    // ── Reporting (read-only) ──────────────────────────────────────────

    pub fn team_history(&self, team: TeamId) -> Result<Vec<Round>> {
        let store = self.store();
        self.require_team(&store, team)?;
        store.team_history(team)
    }

    pub fn role_history(&self, team: TeamId, role: Role) -> Result<Vec<Round>> {
        let store = self.store();
        self.require_team(&store, team)?;
        store.role_history(team, role)
    }

    // ── Administration ─────────────────────────────────────────────────

    /// Purge one team's rounds and players. Gated by the deployment's
    /// administrative secret.
    pub fn reset_team(&self, team: TeamId, admin_secret: &str) -> Result<()> {
        if !self.config.admin_authorized(admin_secret) {
            return Err(GameError::Authorization);
        }
        let mut store = self.store();
        self.require_team(&store, team)?;
        store.reset_team(team)?;
        info!(team = team.0, "team reset");
        Ok(())
    }

    /// Purge rounds and players for every team. Requires the
    /// administrative secret and the explicit confirmation flag.
    pub fn reset_all_teams(&self, admin_secret: &str, confirm_all_teams: bool) -> Result<()> {
        if !self.config.admin_authorized(admin_secret) {
            return Err(GameError::Authorization);
        }
        if !confirm_all_teams {
            return Err(GameError::ResetNotConfirmed);
        }
        self.store().reset_all_teams()?;
        info!("all teams reset");
        Ok(())
    }

    fn require_team(&self, store: &GameStore, team: TeamId) -> Result<()> {
        match store.team(team)? {
            Some(_) => Ok(()),
            None => Err(GameError::NotFound(format!("team {}", team.0))),
        }
    }
}
