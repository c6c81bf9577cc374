use ultimate_ttt::{
    policy::{BackpropagationPolicy, StandardPolicy},
    GameTree, MonteCarlo, Node, Player, Position, SearchConfig,
};

#[test]
fn test_standard_policy() {
    let mut tree = GameTree::new(Position::new(Player::Me));
    let root = tree.root();
    let policy = StandardPolicy::new();

    // Initial state
    assert_eq!(tree.get(root).visits, 0);
    assert_eq!(tree.get(root).total_score, 0);

    policy.update_stats(tree.get_mut(root), 1);
    assert_eq!(tree.get(root).visits, 1);
    assert_eq!(tree.get(root).total_score, 1);

    policy.update_stats(tree.get_mut(root), -1);
    policy.update_stats(tree.get_mut(root), -1);
    assert_eq!(tree.get(root).visits, 3);
    assert_eq!(tree.get(root).total_score, -1);
    assert!((tree.get(root).mean_score() + 1.0 / 3.0).abs() < 1e-9);
}

#[test]
fn test_draws_only_count_visits() {
    let mut tree = GameTree::new(Position::new(Player::Opponent));
    let root = tree.root();
    let policy = StandardPolicy::default();
    for _ in 0..5 {
        policy.update_stats(tree.get_mut(root), 0);
    }
    assert_eq!(tree.get(root).visits, 5);
    assert_eq!(tree.get(root).total_score, 0);
    assert_eq!(tree.get(root).mean_score(), 0.0);
}

/// Counts visits but ignores rewards
struct VisitOnlyPolicy;

impl BackpropagationPolicy for VisitOnlyPolicy {
    fn update_stats(&self, node: &mut Node, _reward: i32) {
        node.visits += 1;
    }
}

#[test]
fn test_custom_policy_is_used_by_search() {
    let mut tree = GameTree::new(Position::new(Player::Me));
    let root = tree.root();
    let (children, _) = tree.expand(root);
    let leaf = children.first().unwrap();

    let mcts = MonteCarlo::new(&SearchConfig::default().with_seed(1))
        .with_backpropagation_policy(VisitOnlyPolicy);
    mcts.backpropagate(&mut tree, leaf, root, 1);
    mcts.backpropagate(&mut tree, leaf, root, 1);

    assert_eq!(tree.get(leaf).visits, 2);
    assert_eq!(tree.get(root).visits, 2);
    assert_eq!(tree.get(leaf).total_score, 0);
    assert_eq!(tree.get(root).total_score, 0);
}

#[test]
fn test_backpropagation_policy_boxing() {
    let boxed: Box<dyn BackpropagationPolicy> = Box::new(StandardPolicy::new());
    let mut tree = GameTree::new(Position::new(Player::Me));
    let root = tree.root();
    boxed.update_stats(tree.get_mut(root), 1);
    assert_eq!(tree.get(root).visits, 1);
}
