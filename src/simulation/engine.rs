//! Round-advancement arithmetic.
//!
//! Pure computation: given the four decided rows for week *w* and the
//! exogenous boundary flows, produce the four `computed` rows for week
//! *w+1*. Persistence and serialization are the session's problem.

use crate::model::role::Role;
use crate::model::round::{Round, RoundState};

/// Boundary conditions at the two open ends of the chain.
#[derive(Debug, Clone, Copy)]
pub struct Exogenous {
    /// End-customer demand hitting the Retailer this week.
    pub customer_demand: u32,
    /// Production arriving at the Factory this week.
    pub factory_production: u32,
}

/// Compute week *w+1* for all four roles from their decided week-*w* rows.
///
/// `decided` must be in chain order (Retailer first) and all rows must be
/// for the same week. For each role:
/// - incoming shipment is the supplier's sent shipment (or factory
///   production at the upstream end);
/// - incoming order is the customer's placed order (or end-customer
///   demand at the downstream end);
/// - stock and backorder follow the conservation formulas, clamped at 0.
///
/// The new rows carry zero decisions in state `Computed`; players fill
/// them in when they submit for the new week.
pub fn advance_week(decided: &[Round; 4], inputs: Exogenous) -> [Round; 4] {
    let week = decided[0].week;

    Role::CHAIN.map(|role| {
        let i = role.index();
        let prior = &decided[i];

        let incoming_shipment = match role.supplier() {
            Some(supplier) => decided[supplier.index()].sent_shipment,
            None => inputs.factory_production,
        };
        let incoming_order = match role.customer() {
            Some(customer) => decided[customer.index()].placed_order,
            None => inputs.customer_demand,
        };

        // available = what could have been shipped this week. Decision
        // values arrive unbounded from players, so every step saturates
        // rather than wrapping.
        let available = prior.stock.saturating_add(incoming_shipment);
        let stock = available.saturating_sub(prior.sent_shipment);
        let backorder = prior
            .backorder
            .saturating_add(incoming_order)
            .saturating_sub(available);

        Round {
            role,
            week: week + 1,
            stock,
            backorder,
            incoming_order,
            incoming_shipment,
            placed_order: 0,
            sent_shipment: 0,
            state: RoundState::Computed,
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const INPUTS: Exogenous = Exogenous {
        customer_demand: 15,
        factory_production: 20,
    };

    fn decided_week(decisions: [(u32, u32, u32, u32); 4]) -> [Round; 4] {
        // (stock, backorder, placed_order, sent_shipment) per chain position
        Role::CHAIN.map(|role| {
            let (stock, backorder, placed_order, sent_shipment) = decisions[role.index()];
            Round {
                role,
                week: 1,
                stock,
                backorder,
                incoming_order: 0,
                incoming_shipment: 0,
                placed_order,
                sent_shipment,
                state: RoundState::Decided,
            }
        })
    }

    #[test]
    fn uniform_submissions_hold_steady_state() {
        // Everyone starts at (10, 0), orders 15, ships 10. Every role's
        // demand is exactly covered by the shipment it receives.
        let decided = decided_week([(10, 0, 15, 10); 4]);
        let next = advance_week(&decided, INPUTS);

        for round in &next {
            assert_eq!(round.week, 2);
            assert_eq!(round.backorder, 0, "{} backorder", round.role);
            assert_eq!(round.incoming_order, 15);
            assert_eq!(round.placed_order, 0);
            assert_eq!(round.sent_shipment, 0);
            assert_eq!(round.state, RoundState::Computed);
        }
        // Downstream roles receive 10 and ship 10: stock unchanged.
        assert_eq!(next[0].stock, 10);
        assert_eq!(next[1].stock, 10);
        assert_eq!(next[2].stock, 10);
        // The Factory is fed 20 from production while shipping 10.
        assert_eq!(next[3].stock, 20);
        assert_eq!(next[3].incoming_shipment, 20);
    }

    #[test]
    fn boundary_constants_ignore_chain_data() {
        let decided = decided_week([(0, 0, 99, 99), (0, 0, 99, 99), (0, 0, 99, 99), (0, 0, 99, 99)]);
        let next = advance_week(&decided, INPUTS);

        assert_eq!(next[Role::Retailer.index()].incoming_order, 15);
        assert_eq!(next[Role::Factory.index()].incoming_shipment, 20);
    }

    #[test]
    fn flows_follow_topology() {
        let decided = decided_week([(10, 0, 1, 5), (10, 0, 2, 6), (10, 0, 3, 7), (10, 0, 4, 8)]);
        let next = advance_week(&decided, INPUTS);

        // Shipments flow downstream from the supplier.
        assert_eq!(next[Role::Retailer.index()].incoming_shipment, 6);
        assert_eq!(next[Role::Distributor.index()].incoming_shipment, 7);
        assert_eq!(next[Role::Wholesaler.index()].incoming_shipment, 8);
        // Orders flow upstream from the customer.
        assert_eq!(next[Role::Distributor.index()].incoming_order, 1);
        assert_eq!(next[Role::Wholesaler.index()].incoming_order, 2);
        assert_eq!(next[Role::Factory.index()].incoming_order, 3);
    }

    #[test]
    fn stock_never_goes_negative() {
        // Ship more than on hand plus arrivals: stock clamps at 0.
        let mut decided = decided_week([(10, 0, 15, 10); 4]);
        decided[1].sent_shipment = 50;
        let next = advance_week(&decided, INPUTS);
        assert_eq!(next[1].stock, 0);
    }

    #[test]
    fn extreme_decisions_saturate_instead_of_wrapping() {
        // A hoarding player can order or ship any u32; the arithmetic
        // must clamp, never wrap.
        let mut decided = decided_week([(10, 0, 15, 10); 4]);
        decided[1].sent_shipment = u32::MAX;
        decided[0].placed_order = u32::MAX;
        let next = advance_week(&decided, INPUTS);

        // Retailer takes delivery of the absurd shipment: available
        // saturates at u32::MAX, then its own 10-unit shipment goes out.
        assert_eq!(next[0].incoming_shipment, u32::MAX);
        assert_eq!(next[0].stock, u32::MAX - 10);
        assert_eq!(next[0].backorder, 0);
        // Distributor faces the absurd order with 20 units available.
        assert_eq!(next[1].incoming_order, u32::MAX);
        assert_eq!(next[1].stock, 0);
        assert_eq!(next[1].backorder, u32::MAX - 20);
    }

    #[test]
    fn shortage_accumulates_backorder() {
        // Retailer holds 5, receives nothing, faces demand of 15.
        let mut decided = decided_week([(5, 0, 0, 0); 4]);
        decided[1].sent_shipment = 0; // Distributor ships nothing downstream
        let next = advance_week(&decided, INPUTS);
        assert_eq!(next[0].incoming_shipment, 0);
        assert_eq!(next[0].backorder, 10);
    }

    #[test]
    fn backorder_relieved_by_surplus_shipments() {
        // Owing 10 with 0 on hand; 25 arrives against demand of 15:
        // the whole obligation is coverable, backorder clears.
        let mut decided = decided_week([(0, 10, 0, 0); 4]);
        decided[1].sent_shipment = 25;
        let next = advance_week(&decided, INPUTS);
        assert_eq!(next[0].backorder, 0);
    }

    #[test]
    fn conservation_formula_exact() {
        let decided = decided_week([(7, 3, 12, 4), (9, 0, 5, 11), (2, 8, 6, 1), (30, 0, 10, 9)]);
        let next = advance_week(&decided, INPUTS);

        for role in Role::CHAIN {
            let i = role.index();
            let prior = &decided[i];
            let got = &next[i];
            let available = prior.stock + got.incoming_shipment;
            assert_eq!(got.stock, available.saturating_sub(prior.sent_shipment));
            assert_eq!(
                got.backorder,
                (prior.backorder + got.incoming_order).saturating_sub(available)
            );
        }
    }
}
