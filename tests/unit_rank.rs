// tests/unit_rank.rs
use plagcheck_core::ast::{Field, Kind, Node};
use plagcheck_core::compare::{rank, Percentage, Scorer, Strategy};
use std::collections::BTreeMap;

fn block(values: &[&str]) -> Node {
    let statements = values.iter().map(|v| {
        Node::new(Kind::ExpressionStmt)
            .with(Field::Expression, Node::leaf(Kind::IntegerLiteral, *v))
            .unwrap()
    });
    Node::new(Kind::Block)
        .with_all(Field::Statements, statements)
        .unwrap()
}

#[test]
fn test_no_candidates() {
    let scorer = Scorer::<Strategy>::default();
    assert!(rank(&scorer, &block(&["1"]), &BTreeMap::new()).is_none());
}

#[test]
fn test_best_is_highest_percentage() {
    let scorer = Scorer::<Strategy>::default();
    let mut candidates = BTreeMap::new();
    candidates.insert("ann".to_string(), block(&["1", "9"]));
    candidates.insert("bob".to_string(), block(&["1", "2", "3"]));
    candidates.insert("cid".to_string(), block(&["7"]));

    let ranking = rank(&scorer, &block(&["1", "2"]), &candidates).unwrap();
    assert_eq!(ranking.best.owner, "bob");
    assert_eq!(ranking.best.score.percentage, Percentage::FULL);

    let order: Vec<_> = ranking.candidates.iter().map(|c| c.owner.as_str()).collect();
    assert_eq!(order, vec!["bob", "ann", "cid"]);
    assert_eq!(ranking.candidates[1].score.percentage.value(), 50);
    assert_eq!(ranking.candidates[2].score.percentage, Percentage::ZERO);
}

#[test]
fn test_ties_go_to_smallest_owner() {
    let scorer = Scorer::new(Strategy::Bipartite);
    let mut candidates = BTreeMap::new();
    for owner in ["zed", "amy", "max"] {
        candidates.insert(owner.to_string(), block(&["1"]));
    }
    let ranking = rank(&scorer, &block(&["1"]), &candidates).unwrap();
    assert_eq!(ranking.best.owner, "amy");
    let order: Vec<_> = ranking.candidates.iter().map(|c| c.owner.as_str()).collect();
    assert_eq!(order, vec!["amy", "max", "zed"]);
}
