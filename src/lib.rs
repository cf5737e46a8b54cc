//! Multi-echelon supply-chain game kernel (the "Beer Distribution Game").
//!
//! Four roles per team (Retailer, Distributor, Wholesaler, Factory)
//! each submit a weekly order/shipment decision. Once all four are in,
//! the advancement engine computes next week's inventory and backorder
//! state for the whole chain in one atomic step. Everything is persisted
//! in a SQLite round ledger; [`simulation::session::BeerGame`] is the
//! narrow interface presentation layers talk to.

pub mod error;
pub mod io;
pub mod model;
pub mod simulation;
pub mod store;
pub mod strategy;

pub use error::{GameError, Result};
pub use model::role::Role;
pub use model::round::{Decision, Round, RoundState};
pub use model::team::{PlayerId, TeamId};
pub use simulation::config::GameConfig;
pub use simulation::session::{BeerGame, SubmissionOutcome};
