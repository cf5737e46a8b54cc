use rand::Rng;

use crate::model::round::Decision;
use crate::strategy::traits::{DecisionPolicy, SeatView};

/// Pass-through: order exactly what was demanded, ship whatever is owed
/// and coverable. Ignores inventory position entirely, which is how the
/// bullwhip gets started.
#[derive(Debug, Clone)]
pub struct NaivePolicy;

impl NaivePolicy {
    pub fn new() -> Self {
        Self
    }
}

impl Default for NaivePolicy {
    fn default() -> Self {
        Self::new()
    }
}

impl DecisionPolicy for NaivePolicy {
    fn decide(&mut self, view: &SeatView) -> Decision {
        Decision {
            placed_order: view.incoming_order,
            sent_shipment: view.shippable(),
        }
    }
}

/// Order-up-to policy: tries to keep net inventory (stock minus
/// backorder) at a target level on top of covering current demand.
#[derive(Debug, Clone)]
pub struct BaseStockPolicy {
    target_stock: i64,
}

impl BaseStockPolicy {
    pub fn new(target_stock: u32) -> Self {
        Self {
            target_stock: target_stock as i64,
        }
    }
}

impl DecisionPolicy for BaseStockPolicy {
    fn decide(&mut self, view: &SeatView) -> Decision {
        // Negative intermediate values are expected when overstocked.
        let net_inventory = view.stock as i64 - view.backorder as i64;
        let gap = self.target_stock - net_inventory;
        let raw_order = view.incoming_order as i64 + gap;

        Decision {
            placed_order: raw_order.max(0) as u32,
            sent_shipment: view.shippable(),
        }
    }
}

/// Orders a random amount within a range. A chaotic actor for stress
/// scenarios; still ships honestly.
#[derive(Debug, Clone)]
pub struct RandomPolicy {
    min: u32,
    max: u32,
}

impl RandomPolicy {
    pub fn new(min: u32, max: u32) -> Self {
        Self { min, max }
    }
}

impl DecisionPolicy for RandomPolicy {
    fn decide(&mut self, view: &SeatView) -> Decision {
        let mut rng = rand::thread_rng();
        Decision {
            placed_order: rng.gen_range(self.min..=self.max),
            sent_shipment: view.shippable(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn view(stock: u32, backorder: u32, incoming_order: u32) -> SeatView {
        SeatView {
            week: 2,
            stock,
            backorder,
            incoming_order,
            incoming_shipment: 0,
        }
    }

    #[test]
    fn naive_mirrors_demand() {
        let mut policy = NaivePolicy::new();
        let decision = policy.decide(&view(10, 0, 15));
        assert_eq!(decision.placed_order, 15);
        // Can only cover 10 of the 15 owed.
        assert_eq!(decision.sent_shipment, 10);
    }

    #[test]
    fn base_stock_fills_the_gap() {
        let mut policy = BaseStockPolicy::new(15);
        // Net inventory 10 - 5 = 5, gap 10, demand 8 -> order 18.
        let decision = policy.decide(&view(10, 5, 8));
        assert_eq!(decision.placed_order, 18);
        assert_eq!(decision.sent_shipment, 10);
    }

    #[test]
    fn base_stock_never_orders_negative() {
        let mut policy = BaseStockPolicy::new(5);
        // Overstocked at 40 with no demand: order clamps to zero.
        let decision = policy.decide(&view(40, 0, 0));
        assert_eq!(decision.placed_order, 0);
    }

    #[test]
    fn random_stays_in_range() {
        let mut policy = RandomPolicy::new(3, 7);
        for _ in 0..50 {
            let decision = policy.decide(&view(10, 0, 5));
            assert!((3..=7).contains(&decision.placed_order));
            assert_eq!(decision.sent_shipment, 5);
        }
    }
}
