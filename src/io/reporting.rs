//! Read-only reporting over the round history.
//!
//! CSV export plus per-role KPI summaries. Nothing in here mutates
//! kernel state; consumers feed these numbers to whatever dashboard or
//! spreadsheet they like.

use std::path::Path;

use serde::Serialize;

use crate::error::Result;
use crate::model::role::Role;
use crate::model::round::{Round, RoundState};
use crate::simulation::config::GameConfig;

/// One exported history row.
#[derive(Debug, Clone, Serialize)]
pub struct HistoryRecord {
    pub week: u32,
    pub role: &'static str,
    pub stock: u32,
    pub backorder: u32,
    pub incoming_order: u32,
    pub incoming_shipment: u32,
    pub placed_order: u32,
    pub sent_shipment: u32,
    pub state: &'static str,
    pub cost: f64,
}

impl HistoryRecord {
    fn from_round(round: &Round, config: &GameConfig) -> Self {
        Self {
            week: round.week,
            role: round.role.as_str(),
            stock: round.stock,
            backorder: round.backorder,
            incoming_order: round.incoming_order,
            incoming_shipment: round.incoming_shipment,
            placed_order: round.placed_order,
            sent_shipment: round.sent_shipment,
            state: round.state.as_str(),
            cost: weekly_cost(round, config),
        }
    }
}

/// Holding plus backorder cost for one row.
fn weekly_cost(round: &Round, config: &GameConfig) -> f64 {
    round.stock as f64 * config.holding_cost + round.backorder as f64 * config.backorder_cost
}

/// Write a team's full round history to a CSV file.
pub fn write_history_csv<P: AsRef<Path>>(
    path: P,
    history: &[Round],
    config: &GameConfig,
) -> Result<()> {
    let mut wtr = csv::Writer::from_path(path.as_ref())?;
    for round in history {
        wtr.serialize(HistoryRecord::from_round(round, config))?;
    }
    wtr.flush().map_err(csv::Error::from)?;
    Ok(())
}

/// KPI summary for one role across all its recorded weeks.
#[derive(Debug, Clone, Serialize)]
pub struct RoleKpis {
    pub role: &'static str,
    pub holding_cost: f64,
    pub backorder_cost: f64,
    pub total_cost: f64,
    pub avg_stock: f64,
    pub avg_backorder: f64,
    /// Percentage of demanded units not left on backorder.
    pub service_level_pct: f64,
    /// Sample standard deviation of placed orders over decided weeks:
    /// the bullwhip measure. It grows moving upstream.
    pub order_std_dev: f64,
}

/// Compute KPIs for one role's history (rows must all belong to `role`).
pub fn role_kpis(role: Role, history: &[Round], config: &GameConfig) -> RoleKpis {
    let weeks = history.len() as f64;

    let holding: f64 = history
        .iter()
        .map(|r| r.stock as f64 * config.holding_cost)
        .sum();
    let shortage: f64 = history
        .iter()
        .map(|r| r.backorder as f64 * config.backorder_cost)
        .sum();

    let demanded: u64 = history.iter().map(|r| r.incoming_order as u64).sum();
    let served: u64 = history
        .iter()
        .map(|r| r.incoming_order.saturating_sub(r.backorder) as u64)
        .sum();
    let service_level_pct = if demanded > 0 {
        served as f64 / demanded as f64 * 100.0
    } else {
        100.0
    };

    // Only decided rows carry real orders; engine snapshots hold zeros.
    let orders: Vec<f64> = history
        .iter()
        .filter(|r| r.state == RoundState::Decided)
        .map(|r| r.placed_order as f64)
        .collect();

    RoleKpis {
        role: role.as_str(),
        holding_cost: holding,
        backorder_cost: shortage,
        total_cost: holding + shortage,
        avg_stock: if weeks > 0.0 {
            history.iter().map(|r| r.stock as f64).sum::<f64>() / weeks
        } else {
            0.0
        },
        avg_backorder: if weeks > 0.0 {
            history.iter().map(|r| r.backorder as f64).sum::<f64>() / weeks
        } else {
            0.0
        },
        service_level_pct,
        order_std_dev: sample_std_dev(&orders),
    }
}

/// KPIs for every role in a team's history, in chain order.
pub fn team_kpis(history: &[Round], config: &GameConfig) -> Vec<RoleKpis> {
    Role::CHAIN
        .iter()
        .map(|&role| {
            let rows: Vec<Round> = history.iter().filter(|r| r.role == role).cloned().collect();
            role_kpis(role, &rows, config)
        })
        .collect()
}

fn sample_std_dev(values: &[f64]) -> f64 {
    if values.len() < 2 {
        return 0.0;
    }
    let n = values.len() as f64;
    let mean = values.iter().sum::<f64>() / n;
    let var = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / (n - 1.0);
    var.sqrt()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn decided(week: u32, stock: u32, backorder: u32, incoming_order: u32, placed: u32) -> Round {
        Round {
            role: Role::Retailer,
            week,
            stock,
            backorder,
            incoming_order,
            incoming_shipment: 0,
            placed_order: placed,
            sent_shipment: 0,
            state: RoundState::Decided,
        }
    }

    #[test]
    fn costs_follow_config_rates() {
        let config = GameConfig::default(); // holding 1.0, backorder 2.0
        let history = vec![decided(1, 10, 0, 15, 15), decided(2, 0, 5, 15, 15)];
        let kpis = role_kpis(Role::Retailer, &history, &config);

        assert_eq!(kpis.holding_cost, 10.0);
        assert_eq!(kpis.backorder_cost, 20.0);
        assert_eq!(kpis.total_cost, 30.0);
        assert_eq!(kpis.avg_stock, 5.0);
        assert_eq!(kpis.avg_backorder, 2.5);
    }

    #[test]
    fn full_service_without_backorders() {
        let config = GameConfig::default();
        let history = vec![decided(1, 10, 0, 15, 15), decided(2, 10, 0, 15, 15)];
        let kpis = role_kpis(Role::Retailer, &history, &config);
        assert_eq!(kpis.service_level_pct, 100.0);
    }

    #[test]
    fn backorders_drag_the_service_level() {
        let config = GameConfig::default();
        // 30 demanded, 10 left owing in week 2.
        let history = vec![decided(1, 5, 0, 15, 15), decided(2, 0, 10, 15, 15)];
        let kpis = role_kpis(Role::Retailer, &history, &config);
        assert!((kpis.service_level_pct - (20.0 / 30.0 * 100.0)).abs() < 1e-9);
    }

    #[test]
    fn empty_history_serves_everything() {
        let config = GameConfig::default();
        let kpis = role_kpis(Role::Retailer, &[], &config);
        assert_eq!(kpis.service_level_pct, 100.0);
        assert_eq!(kpis.total_cost, 0.0);
        assert_eq!(kpis.order_std_dev, 0.0);
    }

    #[test]
    fn order_std_dev_ignores_computed_snapshots() {
        let config = GameConfig::default();
        let mut history = vec![decided(1, 10, 0, 15, 10), decided(2, 10, 0, 15, 20)];
        history.push(Round {
            state: RoundState::Computed,
            placed_order: 0,
            ..decided(3, 10, 0, 15, 0)
        });
        let kpis = role_kpis(Role::Retailer, &history, &config);
        // std dev of {10, 20}, sample variance 50.
        assert!((kpis.order_std_dev - 50f64.sqrt()).abs() < 1e-9);
    }

    #[test]
    fn csv_export_writes_one_line_per_round() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("history.csv");
        let config = GameConfig::default();
        let history = vec![decided(1, 10, 0, 15, 15), decided(2, 10, 0, 15, 15)];

        write_history_csv(&path, &history, &config).unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 3); // header + 2 rows
        assert!(lines[0].starts_with("week,role,stock"));
        assert!(lines[1].contains("Retailer"));
    }
}
