use std::time::Duration;
use stepwise_pathfinding::{
    Algorithm, Cell, SearchEvent, SearchSession, SessionConfig, Speed, StepScheduler,
};

// In this example every strategy is stepped through on a 5x7 grid with shape
//  _______
// |S  #   |
// |   #   |
// |   #  E|
// |       |
// |   #   |
//  _______
// where
// - # marks an obstacle
// - S marks the start
// - E marks the end
//
// A scheduler on a virtual clock paces the steps the way a front end would,
// and the cells are printed as they are discovered.

fn main() {
    let config = SessionConfig {
        speed: Speed::Fast,
        ..SessionConfig::new(5, 7).with_seed(3)
    };
    let mut session = SearchSession::new(&config);
    for row in [0, 1, 2, 4] {
        session.toggle_wall(Cell::new(row, 3));
    }
    session.set_start(Cell::new(0, 0));
    session.set_end(Cell::new(2, 6));
    println!("{}", session.grid());

    let mut scheduler = StepScheduler::new(config.speed);
    for algorithm in Algorithm::ALL {
        println!("{}: {}", algorithm, algorithm.description());
        let token = session.start_run(algorithm).unwrap();
        scheduler.schedule(token, Duration::ZERO);
        while let Some(now) = scheduler.next_due() {
            let events = scheduler.tick(&mut session, now);
            let visited: Vec<String> = events
                .iter()
                .filter_map(|e| match e {
                    SearchEvent::Visited { cell, color } => Some(format!("{cell} {color}")),
                    _ => None,
                })
                .collect();
            if !visited.is_empty() {
                println!("  t={:>4}ms {}", now.as_millis(), visited.join(", "));
            }
        }
        let summary = session.last_summary().unwrap();
        match &summary.path {
            Some(path) => {
                let cells: Vec<String> = path.iter().map(|c| c.to_string()).collect();
                println!(
                    "  path of {} moves after {} expansions: {}",
                    path.len() - 1,
                    summary.expanded,
                    cells.join(" -> ")
                );
            }
            None => println!("  no path after {} expansions", summary.expanded),
        }
    }
}
