/// Tunable parameters for one deployment of the game.
#[derive(Debug, Clone)]
pub struct GameConfig {
    /// Fixed horizon; weeks beyond this are not playable.
    pub weeks_total: u32,
    /// On-hand inventory each role starts week 1 with.
    pub initial_stock: u32,
    /// End-customer demand at the Retailer, used for any week the
    /// schedule below does not cover.
    pub customer_demand: u32,
    /// Units the Factory receives from production every week.
    pub factory_production: u32,
    /// Optional per-week end-customer demand, index 0 = week 1. Weeks
    /// past the end of the schedule fall back to `customer_demand`.
    pub demand_schedule: Vec<u32>,
    /// Cost per unit of held stock per week (reporting only).
    pub holding_cost: f64,
    /// Cost per unit of backorder per week (reporting only).
    pub backorder_cost: f64,
    /// Per-deployment administrative secret gating resets. Left empty,
    /// every reset is refused.
    pub admin_secret: String,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            weeks_total: 15,
            initial_stock: 10,
            customer_demand: 15,
            factory_production: 20,
            demand_schedule: Vec::new(),
            holding_cost: 1.0,
            backorder_cost: 2.0,
            admin_secret: String::new(),
        }
    }
}

impl GameConfig {
    /// End-customer demand arriving at the Retailer for a given week.
    pub fn demand_for_week(&self, week: u32) -> u32 {
        self.demand_schedule
            .get(week.saturating_sub(1) as usize)
            .copied()
            .unwrap_or(self.customer_demand)
    }

    /// Whether a candidate secret grants administrative access. An
    /// unset secret grants nothing.
    pub fn admin_authorized(&self, secret: &str) -> bool {
        !self.admin_secret.is_empty() && secret == self.admin_secret
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn schedule_overrides_then_falls_back() {
        let config = GameConfig {
            demand_schedule: vec![4, 4, 8],
            ..GameConfig::default()
        };
        assert_eq!(config.demand_for_week(1), 4);
        assert_eq!(config.demand_for_week(3), 8);
        assert_eq!(config.demand_for_week(4), 15);
        assert_eq!(config.demand_for_week(15), 15);
    }

    #[test]
    fn empty_admin_secret_grants_nothing() {
        let config = GameConfig::default();
        assert!(!config.admin_authorized(""));
        assert!(!config.admin_authorized("anything"));

        let config = GameConfig {
            admin_secret: "chalkboard".into(),
            ..GameConfig::default()
        };
        assert!(config.admin_authorized("chalkboard"));
        assert!(!config.admin_authorized("chalk"));
    }
}
