use beer_game::io::{demand, reporting};
use beer_game::strategy::implementations::{BaseStockPolicy, NaivePolicy};
use beer_game::strategy::traits::{DecisionPolicy, SeatView};
use beer_game::{BeerGame, GameConfig, GameError, Role};

fn main() -> Result<(), GameError> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "beer_game=info".into()),
        )
        .init();

    println!("=== Beer Distribution Game ===");

    // 1. CONFIGURE THE DEPLOYMENT
    // Demand steps from 10 to 15 at week 5, enough of a jump to set
    // the bullwhip in motion with naive players upstream.
    let config = GameConfig {
        demand_schedule: demand::step(15, 10, 15, 5),
        admin_secret: "chalkboard".into(),
        ..GameConfig::default()
    };
    let horizon = config.weeks_total;
    let initial_stock = config.initial_stock;
    let game = BeerGame::in_memory(config)?;

    // 2. REGISTER A TEAM
    let team = game.create_team("Demo Brewery", "hops")?;
    for role in Role::CHAIN {
        game.join_team(team, "hops", &format!("bot-{role}"), role, "")?;
    }
    assert!(game.is_team_complete(team)?);

    // 3. SEAT THE PLAYERS
    // A rational retailer, everyone else just passes demand through.
    let mut seats: Vec<(Role, Box<dyn DecisionPolicy>)> = vec![
        (Role::Retailer, Box::new(BaseStockPolicy::new(15))),
        (Role::Distributor, Box::new(NaivePolicy::new())),
        (Role::Wholesaler, Box::new(NaivePolicy::new())),
        (Role::Factory, Box::new(NaivePolicy::new())),
    ];

    // 4. PLAY THE FULL HORIZON
    println!("Playing {horizon} weeks...");
    for _ in 1..=horizon {
        let week = game.current_week(team)?;
        for (role, policy) in seats.iter_mut() {
            let view = match game.latest_state(team, *role)? {
                Some(round) => SeatView {
                    week: round.week,
                    stock: round.stock,
                    backorder: round.backorder,
                    incoming_order: round.incoming_order,
                    incoming_shipment: round.incoming_shipment,
                },
                // First week: baseline inventory, no flows yet.
                None => SeatView {
                    week,
                    stock: initial_stock,
                    ..SeatView::default()
                },
            };
            game.submit_decision(team, *role, policy.decide(&view))?;
        }
    }

    // 5. EXPORT THE LEDGER
    let history = game.team_history(team)?;
    let output_file = "game_history.csv";
    match reporting::write_history_csv(output_file, &history, game.config()) {
        Ok(()) => println!("History written to ./{output_file}"),
        Err(e) => eprintln!("Error writing CSV: {e}"),
    }

    // 6. PRINT THE SCOREBOARD
    println!("\n=== KPIs by role ===");
    let mut chain_total = 0.0;
    for kpis in reporting::team_kpis(&history, game.config()) {
        println!(
            "{:<12} cost ${:>8.2}  service {:>6.2}%  order std dev {:>6.2}",
            kpis.role, kpis.total_cost, kpis.service_level_pct, kpis.order_std_dev
        );
        chain_total += kpis.total_cost;
    }
    println!("Total supply chain cost: ${chain_total:.2}");

    Ok(())
}
