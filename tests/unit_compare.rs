// tests/unit_compare.rs
use plagcheck_core::ast::{Field, Kind, Node};
use plagcheck_core::compare::{self, Comparator, GreedyFirstMatch, Percentage, Scorer, Strategy};

fn ident(name: &str) -> Node {
    Node::leaf(Kind::Identifier, name)
}

fn int(value: &str) -> Node {
    Node::leaf(Kind::IntegerLiteral, value)
}

fn stmt(expr: Node) -> Node {
    Node::new(Kind::ExpressionStmt)
        .with(Field::Expression, expr)
        .unwrap()
}

fn binary(op: &str, left: Node, right: Node) -> Node {
    Node::new(Kind::Binary)
        .with_token(op)
        .with(Field::Left, left)
        .unwrap()
        .with(Field::Right, right)
        .unwrap()
}

fn method(name: &str, statements: Vec<Node>) -> Node {
    let body = Node::new(Kind::Block)
        .with_all(Field::Statements, statements)
        .unwrap();
    Node::new(Kind::MethodDecl)
        .with(Field::Body, body)
        .unwrap()
        .with(Field::Type, Node::new(Kind::VoidType))
        .unwrap()
        .with(Field::Name, ident(name))
        .unwrap()
}

fn class(name: &str, members: Vec<Node>) -> Node {
    Node::new(Kind::ClassDecl)
        .with_token("class")
        .with(Field::Name, ident(name))
        .unwrap()
        .with_all(Field::Members, members)
        .unwrap()
}

fn block(statements: Vec<Node>) -> Node {
    Node::new(Kind::Block)
        .with_all(Field::Statements, statements)
        .unwrap()
}

fn parameter(name: &str) -> Node {
    Node::new(Kind::Parameter)
        .with(Field::Name, ident(name))
        .unwrap()
}

fn unit(decl: Node) -> Node {
    Node::new(Kind::CompilationUnit)
        .with(Field::Declarations, decl)
        .unwrap()
}

fn numbered(values: &[&str]) -> Vec<Node> {
    values.iter().map(|v| stmt(int(v))).collect()
}

#[test]
fn test_self_match_is_full() {
    let tree = class(
        "A",
        vec![
            method("f", numbered(&["1", "2", "3"])),
            method("g", vec![stmt(binary("+", ident("x"), int("1")))]),
        ],
    );
    let score = Scorer::<Strategy>::default().score(&tree, &tree);
    assert!(score.equal);
    assert_eq!(score.percentage, Percentage::FULL);
    assert_eq!(score.considered, score.matched);
    assert_eq!(score.considered, 6);
}

#[test]
fn test_renaming_is_invisible() {
    let left = class("Account", vec![method("deposit", vec![stmt(ident("amount"))])]);
    let right = class("Wallet", vec![method("put", vec![stmt(ident("sum"))])]);
    assert!(compare::equal(&left, &right));
    assert_eq!(compare::score(&left, &right), Percentage::FULL);
}

#[test]
fn test_member_and_statement_order_is_invisible() {
    let left = class(
        "A",
        vec![
            method("f", numbered(&["1", "2"])),
            method("g", numbered(&["3"])),
        ],
    );
    let right = class(
        "A",
        vec![
            method("g", numbered(&["3"])),
            method("f", numbered(&["2", "1"])),
        ],
    );
    assert_eq!(compare::score(&left, &right), Percentage::FULL);
}

#[test]
fn test_commutative_operands() {
    let left = class("A", vec![method("f", vec![stmt(binary("*", ident("a"), int("2")))])]);
    let right = class("A", vec![method("f", vec![stmt(binary("*", int("2"), ident("a")))])]);
    assert_eq!(compare::score(&left, &right), Percentage::FULL);

    let left = class("A", vec![method("f", vec![stmt(binary("-", ident("a"), int("2")))])]);
    let right = class("A", vec![method("f", vec![stmt(binary("-", int("2"), ident("a")))])]);
    assert!(compare::score(&left, &right) < Percentage::FULL);
}

#[test]
fn test_disjoint_declarations_score_zero() {
    let left = unit(class("A", vec![]));
    let right = unit(
        Node::new(Kind::EnumDecl)
            .with(Field::Name, ident("A"))
            .unwrap(),
    );
    let score = Scorer::<Strategy>::default().score(&left, &right);
    assert_eq!(score.considered, 1);
    assert_eq!(score.matched, 0);
    assert_eq!(score.percentage, Percentage::ZERO);
}

#[test]
fn test_no_list_elements_scores_zero() {
    let left = Node::new(Kind::Block);
    let score = Scorer::<Strategy>::default().score(&left, &left);
    assert!(score.equal);
    assert_eq!(score.considered, 0);
    assert_eq!(score.percentage, Percentage::ZERO);
}

#[test]
fn test_score_is_directional() {
    let small = class("A", vec![method("f", numbered(&["1"]))]);
    let large = class(
        "A",
        vec![method("f", numbered(&["1"])), method("g", numbered(&["2"]))],
    );
    assert_eq!(compare::score(&small, &large), Percentage::FULL);
    assert!(compare::score(&large, &small) < Percentage::FULL);
}

/// Four statements against a helper plus a three-statement rewrite.
fn extract_method_pair() -> (Node, Node) {
    let left = class("Tmp1", vec![method("hash", numbered(&["1", "2", "3", "4"]))]);
    let right = class(
        "Tmp2",
        vec![
            method("input", numbered(&["9"])),
            method("hash", numbered(&["1", "5", "4"])),
        ],
    );
    (left, right)
}

#[test]
fn test_extract_method_pairs_by_edit_distance() {
    let (left, right) = extract_method_pair();
    for strategy in [Strategy::Greedy, Strategy::Bipartite] {
        let score = Scorer::new(strategy).score(&left, &right);
        // an approximate twin still counts as paired
        assert!(score.equal);
        // the method and statements 1 and 4 out of the method plus 4 statements
        assert_eq!(score.considered, 5, "{strategy:?}");
        assert_eq!(score.matched, 3, "{strategy:?}");
        assert_eq!(score.percentage.value(), 60, "{strategy:?}");
    }
}

#[test]
fn test_distant_bodies_do_not_pair() {
    let left = class("A", vec![method("f", numbered(&["1", "2", "3", "4"]))]);
    let right = class("B", vec![method("f", numbered(&["1", "6", "7", "8"]))]);
    let score = Scorer::<Strategy>::default().score(&left, &right);
    assert_eq!(score.matched, 1);
    assert_eq!(score.considered, 5);
    assert_eq!(score.percentage.value(), 20);
}

#[test]
fn test_bipartite_does_not_share_twins() {
    let left = class(
        "A",
        vec![method("f", numbered(&["1"])), method("g", numbered(&["1"]))],
    );
    let right = class("B", vec![method("h", numbered(&["1"]))]);

    let greedy = Scorer::new(Strategy::Greedy).score(&left, &right);
    let bipartite = Scorer::new(Strategy::Bipartite).score(&left, &right);
    assert_eq!(greedy.percentage, Percentage::FULL);
    assert!(bipartite.matched < greedy.matched);
}

#[test]
fn test_class_modifiers_compared_after_members() {
    let members = || vec![method("f", numbered(&["1", "2"])), method("g", numbered(&["3"]))];
    let left = unit(
        class("A", members())
            .with(Field::Modifiers, Node::leaf(Kind::Modifier, "public"))
            .unwrap(),
    );
    let right = unit(class("B", members()));
    let score = Scorer::<Strategy>::default().score(&left, &right);
    assert!(!score.equal);
    // class, public, two methods and three statements; all but the first two pair
    assert_eq!(score.considered, 7);
    assert_eq!(score.matched, 5);
    assert_eq!(score.percentage.value(), 71);
}

#[test]
fn test_constructor_body_compared_before_parameters() {
    let ctor = |params: &[&str]| {
        Node::new(Kind::ConstructorDecl)
            .with(Field::Body, block(numbered(&["1", "2", "3"])))
            .unwrap()
            .with_all(Field::Parameters, params.iter().map(|p| parameter(p)).collect::<Vec<_>>())
            .unwrap()
            .with(Field::Name, ident("A"))
            .unwrap()
    };
    let left = class("A", vec![ctor(&["x", "y"])]);
    let right = class("A", vec![ctor(&["x"])]);
    let score = Scorer::<Strategy>::default().score(&left, &right);
    assert_eq!(score.considered, 4);
    assert_eq!(score.matched, 3);
    assert_eq!(score.percentage.value(), 75);
}

#[test]
fn test_bodyless_method_only_pairs_exactly() {
    let signature = Node::new(Kind::MethodDecl)
        .with(Field::Type, Node::new(Kind::VoidType))
        .unwrap()
        .with(Field::Modifiers, Node::leaf(Kind::Modifier, "abstract"))
        .unwrap()
        .with(Field::Name, ident("f"))
        .unwrap();
    let left = class("A", vec![signature.clone()]);
    let right = class("B", vec![method("f", numbered(&[]))]);
    for strategy in [Strategy::Greedy, Strategy::Bipartite] {
        let forward = Scorer::new(strategy).score(&left, &right);
        assert_eq!((forward.considered, forward.matched), (1, 0), "{strategy:?}");
        let backward = Scorer::new(strategy).score(&right, &left);
        assert_eq!((backward.considered, backward.matched), (1, 0), "{strategy:?}");
    }

    let both = class("C", vec![signature]);
    assert_eq!(compare::score(&left, &both), Percentage::FULL);
}

#[test]
fn test_identical_statements_count_once() {
    let left = class("A", vec![method("f", numbered(&["1", "1", "2"]))]);
    let right = class("B", vec![method("f", numbered(&["1"]))]);
    let score = Scorer::<Strategy>::default().score(&left, &right);
    // the method, statement 1 and statement 2
    assert_eq!(score.considered, 3);
    assert_eq!(score.matched, 1);
    assert_eq!(score.percentage.value(), 33);
}

#[test]
fn test_session_only_grows_during_comparison() {
    let left = class(
        "A",
        vec![method("f", numbered(&["1", "2", "3", "4"])), method("g", numbered(&["5"]))],
    );
    let right = class(
        "B",
        vec![method("g", numbered(&["5"])), method("f", numbered(&["1", "9", "4"]))],
    );
    let strategy = GreedyFirstMatch;
    let mut cmp = Comparator::new(&strategy);

    let mut last = (0, 0);
    for member in left.children(Field::Members) {
        for candidate in right.children(Field::Members) {
            cmp.equal(member, candidate);
            let now = (cmp.session().considered(), cmp.session().matched());
            assert!(now.0 >= last.0 && now.1 >= last.1);
            assert!(now.1 <= now.0);
            last = now;
        }
    }
    cmp.equal(&left, &right);
    let session = cmp.session();
    assert!(session.considered() >= last.0 && session.matched() >= last.1);
    for member in left.children(Field::Members) {
        let nodes = std::iter::once(member).chain(member.body_statements().unwrap());
        for node in nodes {
            assert!(!session.is_matched(node) || session.is_considered(node));
        }
    }

    let fresh = Scorer::new(Strategy::Greedy).score(&left, &right);
    assert_eq!(fresh.considered, session.considered());
    assert_eq!(fresh.matched, session.matched());
    assert_eq!((fresh.considered, fresh.matched), (7, 5));
}
