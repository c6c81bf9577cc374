mod common;

use std::time::{Duration, Instant};

use ultimate_ttt::{
    Algorithm, Engine, GameTree, MonteCarlo, Player, Position, SearchConfig, SearchStatistics,
};

#[test]
fn test_time_limited_search() {
    // Set a short but reasonable time limit
    let time_limit = Duration::from_millis(50);

    let config = SearchConfig::default()
        .with_max_time(time_limit)
        .with_max_iterations(usize::MAX)
        .with_seed(4);

    let mut tree = GameTree::new(Position::new(Player::Me));
    let root = tree.root();
    let mut stats = SearchStatistics::new();

    let start = Instant::now();
    let result = MonteCarlo::new(&config).run(&mut tree, root, None, &mut stats);
    let elapsed = start.elapsed();

    assert!(result.is_ok(), "Search should have completed");
    println!("Time limit: {:?}, Actual time: {:?}", time_limit, elapsed);
    println!("{}", stats.summary());

    assert!(
        stats.stopped_early,
        "Statistics should indicate early stopping due to time limit"
    );
    assert!(stats.total_time >= time_limit);
    assert!(stats.iterations > 0);
    assert_eq!(tree.get(root).visits, stats.iterations as u64);
}

#[test]
fn test_budget_overrides_configured_time() {
    let config = SearchConfig::default()
        .with_algorithm(Algorithm::MonteCarlo)
        .with_max_time(Duration::from_secs(60))
        .with_max_iterations(usize::MAX)
        .with_seed(9);
    let mut engine = Engine::new_game(Player::Me, config).unwrap();

    let start = Instant::now();
    let play = engine
        .choose_move_within(Duration::from_millis(30))
        .unwrap();
    assert!(start.elapsed() < Duration::from_secs(10));
    assert!(engine.get_statistics().stopped_early);
    assert_eq!(engine.position().last_play(), Some(play));
}

#[test]
fn test_negamax_under_deadline() {
    let config = SearchConfig::default()
        .with_depth(10)
        .with_max_time(Duration::from_millis(100));
    let mut engine = Engine::new_game(Player::Me, config).unwrap();

    let play = engine.choose_move().unwrap();
    let stats = engine.get_statistics();
    println!("{}", stats.summary());

    // Ten plies from the empty board cannot finish in time
    assert!(stats.stopped_early);
    assert!(stats.max_depth >= 1 && stats.max_depth < 10);
    assert_eq!(stats.iterations, stats.max_depth);
    assert!(engine.position().last_play() == Some(play));
}

#[test]
fn test_iteration_cap_without_time_limit() {
    let config = SearchConfig::default()
        .with_max_iterations(250)
        .with_seed(12);
    let mut tree = GameTree::new(common::random_position(3, 10));
    let root = tree.root();
    let mut stats = SearchStatistics::new();

    MonteCarlo::new(&config)
        .run(&mut tree, root, None, &mut stats)
        .unwrap();
    assert_eq!(stats.iterations, 250);
    assert!(!stats.stopped_early);
}

#[test]
fn test_explicit_budget_outlasts_iteration_cap() {
    // The configured cap alone would end the search after a few milliseconds
    let config = SearchConfig::default()
        .with_algorithm(Algorithm::MonteCarlo)
        .with_max_iterations(50)
        .with_seed(21);
    let mut engine = Engine::new_game(Player::Me, config).unwrap();
    let budget = Duration::from_secs(2);

    let start = Instant::now();
    engine.choose_move_within(budget).unwrap();
    let elapsed = start.elapsed();

    let stats = engine.get_statistics();
    println!("Budget: {:?}, Actual time: {:?}", budget, elapsed);
    assert!(elapsed >= budget);
    assert!(stats.total_time >= budget);
    assert!(stats.iterations > 50);
    assert!(stats.stopped_early);
}

#[test]
fn test_configured_cap_applies_without_budget() {
    let config = SearchConfig::default()
        .with_algorithm(Algorithm::MonteCarlo)
        .with_max_iterations(50)
        .with_seed(21);
    let mut engine = Engine::new_game(Player::Me, config).unwrap();

    engine.choose_move().unwrap();
    assert_eq!(engine.get_statistics().iterations, 50);
    assert!(!engine.get_statistics().stopped_early);
}
