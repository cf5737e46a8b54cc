use crate::model::role::Role;

/// Lifecycle state of a round row.
///
/// The engine writes `Computed` snapshots (inventory and backorder derived
/// from last week, decisions still zero). A player submission transitions
/// the row to `Decided`, filling in the order and shipment. A row never
/// moves back, which is what makes resubmission detectable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoundState {
    Computed,
    Decided,
}

impl RoundState {
    pub fn as_str(self) -> &'static str {
        match self {
            RoundState::Computed => "computed",
            RoundState::Decided => "decided",
        }
    }

    pub fn parse(s: &str) -> Option<RoundState> {
        match s {
            "computed" => Some(RoundState::Computed),
            "decided" => Some(RoundState::Decided),
            _ => None,
        }
    }
}

/// A player's weekly decision: how much to order upstream and how much to
/// ship downstream.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Decision {
    pub placed_order: u32,
    pub sent_shipment: u32,
}

/// One ledger entry per (team, role, week).
#[derive(Debug, Clone, PartialEq)]
pub struct Round {
    pub role: Role,
    pub week: u32,
    /// On-hand inventory at decision time.
    pub stock: u32,
    /// Cumulative unmet demand carried forward.
    pub backorder: u32,
    /// Units demanded by this role's customer this week.
    pub incoming_order: u32,
    /// Units received from this role's supplier this week.
    pub incoming_shipment: u32,
    /// Units ordered from the supplier (decision).
    pub placed_order: u32,
    /// Units shipped to the customer (decision).
    pub sent_shipment: u32,
    pub state: RoundState,
}

impl Round {
    /// Week-1 baseline: fresh inventory, nothing owed, nothing in motion.
    pub fn baseline(role: Role, initial_stock: u32) -> Round {
        Round {
            role,
            week: 1,
            stock: initial_stock,
            backorder: 0,
            incoming_order: 0,
            incoming_shipment: 0,
            placed_order: 0,
            sent_shipment: 0,
            state: RoundState::Computed,
        }
    }
}
