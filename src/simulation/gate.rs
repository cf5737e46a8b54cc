//! Completion predicates.
//!
//! Both are recomputed from the store on every call; there is no cached
//! quorum state to go stale.

use crate::error::Result;
use crate::model::role::Role;
use crate::model::team::TeamId;
use crate::store::GameStore;

const SEATS: u32 = Role::CHAIN.len() as u32;

/// Whether all four seats have registered players, which gates whether
/// play may begin at all.
pub fn is_team_complete(store: &GameStore, team: TeamId) -> Result<bool> {
    Ok(store.roles_registered(team)? == SEATS)
}

/// Whether all four roles have submitted a decision for the week, which
/// gates whether the advancement engine may run.
pub fn is_week_complete(store: &GameStore, team: TeamId, week: u32) -> Result<bool> {
    Ok(store.submission_count(team, week)? == SEATS)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::round::Decision;

    #[test]
    fn team_complete_needs_all_four_seats() {
        let store = GameStore::open_memory().unwrap();
        let team = store.create_team("Alpha", "hops").unwrap();
        assert!(!is_team_complete(&store, team).unwrap());

        for role in Role::CHAIN {
            store
                .register_player(team, role.as_str(), role, "")
                .unwrap();
        }
        assert!(is_team_complete(&store, team).unwrap());
    }

    #[test]
    fn week_complete_counts_decided_rows_only() {
        let store = GameStore::open_memory().unwrap();
        let team = store.create_team("Alpha", "hops").unwrap();
        let decision = Decision {
            placed_order: 15,
            sent_shipment: 10,
        };

        for role in [Role::Retailer, Role::Distributor, Role::Wholesaler] {
            store.record_decision(team, role, 1, decision, 10).unwrap();
            assert!(!is_week_complete(&store, team, 1).unwrap());
        }
        store
            .record_decision(team, Role::Factory, 1, decision, 10)
            .unwrap();
        assert!(is_week_complete(&store, team, 1).unwrap());
        assert!(!is_week_complete(&store, team, 2).unwrap());
    }
}
