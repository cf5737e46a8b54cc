use thiserror::Error;

use crate::model::role::Role;

/// Everything that can go wrong in a single request against the kernel.
///
/// All variants abort only the request that raised them; previously
/// persisted weeks are never touched by a failed submission.
#[derive(Debug, Error)]
pub enum GameError {
    /// Wrong team join secret or administrative secret.
    #[error("authorization failed: wrong secret")]
    Authorization,

    #[error("not found: {0}")]
    NotFound(String),

    /// Play attempted before all four seats are registered. A wait state,
    /// not a hard failure.
    #[error("team roster incomplete: {registered} of 4 roles registered")]
    IncompleteRoster { registered: u32 },

    /// Submission past the week horizon.
    #[error("game finished: week {week} is past the {horizon}-week horizon")]
    GameFinished { week: u32, horizon: u32 },

    /// Advancement requested before all four decisions are in.
    #[error("week {week} incomplete: {submitted} of 4 decisions submitted")]
    IncompleteWeek { week: u32, submitted: u32 },

    /// A decision for this (team, role, week) was already recorded.
    #[error("{role} already submitted a decision for week {week}")]
    DuplicateSubmission { role: Role, week: u32 },

    /// The (team, role) seat is already occupied.
    #[error("seat {role} is already taken on this team")]
    DuplicateRegistration { role: Role },

    /// Global reset invoked without the explicit all-teams confirmation.
    #[error("global reset refused: confirmation flag not set")]
    ResetNotConfirmed,

    #[error("store error: {0}")]
    Store(#[from] rusqlite::Error),

    #[error("export error: {0}")]
    Export(#[from] csv::Error),
}

pub type Result<T> = std::result::Result<T, GameError>;
