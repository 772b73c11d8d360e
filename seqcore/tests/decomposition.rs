use seqcore::prelude::*;

fn seq(src: &str) -> Sequent {
    parse_sequent(src).expect("valid sequent")
}

fn decomposer(discipline: Discipline) -> Decomposer {
    Decomposer::new(RuleConfig::uniform(discipline))
}

/// Display strings of the premises of every branch.
fn branch_strings(tree: &ProofTree) -> Vec<Vec<String>> {
    tree.branches()
        .iter()
        .map(|b| b.children().iter().map(|c| c.root().to_string()).collect())
        .collect()
}

fn grow_one_step(src: &str, decomposer: &Decomposer, pool: &WitnessPool) -> Vec<Vec<String>> {
    let tree = ProofTree::grown(seq(src), decomposer, pool).unwrap();
    branch_strings(&tree)
}

#[test]
fn atomic_sequent_is_single_axiom() {
    let tree = ProofTree::grown(
        seq("A; B"),
        &decomposer(Discipline::Multiplicative),
        &WitnessPool::empty(),
    )
    .unwrap();
    assert_eq!(tree.branches(), &[Branch::Axiom]);
    assert_eq!(tree.tag(), RuleTag::Axiom);
}

#[test]
fn multiplicative_conjunction_on_antecedent() {
    let config = RuleConfig::uniform(Discipline::Additive)
        .with(Connective::Conjunction, Side::Antecedent, Discipline::Multiplicative)
        .unwrap();
    let branches = grow_one_step("A & B; ", &Decomposer::new(config), &WitnessPool::empty());
    assert_eq!(branches, vec![vec!["A, B; ".to_string()]]);
}

#[test]
fn additive_conjunction_on_antecedent() {
    let config = RuleConfig::uniform(Discipline::Multiplicative)
        .with(Connective::Conjunction, Side::Antecedent, Discipline::Additive)
        .unwrap();
    let branches = grow_one_step("A & B; ", &Decomposer::new(config), &WitnessPool::empty());
    assert_eq!(
        branches,
        vec![vec!["A; ".to_string()], vec!["B; ".to_string()]]
    );
}

#[test]
fn non_invertible_two_premises_place_every_context_member() {
    let root = Sequent::new(
        vec![atom("r")],
        vec![atom("A") & atom("B"), atom("s")],
    );
    let tree = ProofTree::grown(
        root,
        &decomposer(Discipline::Multiplicative),
        &WitnessPool::empty(),
    )
    .unwrap();
    assert_eq!(tree.tag().to_string(), "R&");

    let expected = [
        ["r; s, A", "; B"],
        ["; s, A", "r; B"],
        ["r; A", "; s, B"],
        ["; A", "r; s, B"],
    ];
    assert_eq!(branch_strings(&tree), expected.map(|b| b.map(String::from).to_vec()));
}

#[test]
fn non_invertible_branch_count_is_power_of_two() {
    let d = decomposer(Discipline::Multiplicative);
    for (src, a, c) in [
        ("; A & B", 0, 0),
        ("p; A & B", 1, 0),
        ("p, q; A & B, s, t", 2, 2),
        ("p, A v B, q; s", 2, 1),
        ("A -> B, p; s, t, u", 1, 3),
    ] {
        let decomposition = d.decompose(&seq(src), &WitnessPool::empty()).unwrap();
        assert_eq!(
            decomposition.alternatives().len(),
            1 << (a + c),
            "{src}: expected 2^{a} * 2^{c} branches"
        );
    }
}

#[test]
fn universal_without_names_uses_placeholder() {
    let root = Sequent::new(vec![forall("x", atom_with("P", ["x"]))], vec![]);
    let tree = ProofTree::grown(
        root,
        &decomposer(Discipline::Multiplicative),
        &WitnessPool::empty(),
    )
    .unwrap();
    assert_eq!(branch_strings(&tree), vec![vec!["P<NONE>; ".to_string()]]);
}

#[test]
fn universal_with_names_branches_per_witness() {
    let root = Sequent::new(vec![forall("x", atom_with("P", ["x"]))], vec![]);
    let tree = ProofTree::grown(
        root,
        &decomposer(Discipline::Multiplicative),
        &WitnessPool::new(["alice", "bob"]).unwrap(),
    )
    .unwrap();
    assert_eq!(
        branch_strings(&tree),
        vec![vec!["P<alice>; ".to_string()], vec!["P<bob>; ".to_string()]]
    );
}

#[test]
fn names_in_sequent_are_never_fresh_witnesses() {
    let pool = WitnessPool::new(["alice", "bob", "carol"]).unwrap();
    let d = decomposer(Discipline::Additive);

    let branches = grow_one_step("P<alice>, ∀x Q<x>; R<carol>", &d, &pool);
    assert_eq!(branches, vec![vec!["P<alice>, Q<bob>; R<carol>".to_string()]]);

    // Every name present: only the placeholder is left.
    let branches = grow_one_step("P<alice, bob, carol>; ∃x Q<x>", &d, &pool);
    assert_eq!(branches, vec![vec!["P<alice, bob, carol>; Q<NONE>".to_string()]]);
}

#[test]
fn witnesses_are_not_reused_along_a_path() {
    let tree = ProofTree::grown(
        seq("∀x ∀y R<x, y>; "),
        &decomposer(Discipline::Multiplicative),
        &WitnessPool::new(["a", "b"]).unwrap(),
    )
    .unwrap();

    let leaves: Vec<String> = tree
        .split()
        .iter()
        .map(|t| {
            let mut node = t;
            while let [Branch::Premises(children)] = node.branches() {
                node = &children[0];
            }
            node.root().to_string()
        })
        .collect();
    assert_eq!(leaves, vec!["R<a, b>; ", "R<b, a>; "]);
}

#[test]
fn quantifier_tags_follow_side() {
    let d = decomposer(Discipline::Additive);
    let pool = WitnessPool::empty();
    for (src, tag) in [
        ("∀x P<x>; ", "L∀"),
        ("; ∀x P<x>", "R∀"),
        ("∃x P<x>; ", "L∃"),
        ("; ∃x P<x>", "R∃"),
    ] {
        assert_eq!(d.decompose(&seq(src), &pool).unwrap().tag().to_string(), tag);
    }
}

#[test]
fn witness_equal_to_inner_bound_variable_is_not_captured() {
    let tree = ProofTree::grown(
        seq("∀x ∀y R<x, y>; "),
        &decomposer(Discipline::Multiplicative),
        &WitnessPool::new(["y"]).unwrap(),
    )
    .unwrap();

    let [Branch::Premises(children)] = tree.branches() else {
        panic!("expected a single instantiation, got {:?}", tree.branches());
    };
    let child = &children[0];
    assert_eq!(child.root().to_string(), "∀y_1 R<y, y_1>; ");
    assert_eq!(child.root().to_string().parse::<Sequent>().unwrap(), *child.root());

    // `y` is now free, so the inner quantifier falls back to the placeholder.
    let [Branch::Premises(grandchildren)] = child.branches() else {
        panic!("expected a single instantiation, got {:?}", child.branches());
    };
    assert_eq!(grandchildren[0].root().to_string(), "R<y, NONE>; ");
}

#[test]
fn names_with_same_variable_free_and_bound() {
    let s = seq("P<x>, ∀x Q<x>; ");
    assert_eq!(s.names().into_iter().collect::<Vec<_>>(), vec!["x".to_string()]);

    let branches = grow_one_step(
        "P<x>, ∀x Q<x>; ",
        &decomposer(Discipline::Multiplicative),
        &WitnessPool::new(["x", "a"]).unwrap(),
    );
    assert_eq!(branches, vec![vec!["P<x>, Q<a>; ".to_string()]]);
}

#[test]
fn oversized_context_is_reported() {
    let atoms: Vec<Proposition> = (0..64).map(|i| atom(format!("A{i}"))).collect();
    let root = Sequent::new(atoms, vec![atom("B") & atom("C")]);

    let err = decomposer(Discipline::Multiplicative)
        .decompose(&root, &WitnessPool::empty())
        .unwrap_err();
    assert!(matches!(err, SeqError::ContextTooLarge { size: 64, max: 63 }), "{err}");

    // Additive rules never partition the context.
    assert!(
        decomposer(Discipline::Additive)
            .decompose(&root, &WitnessPool::empty())
            .is_ok()
    );
}

#[test]
fn atoms_have_no_rule() {
    let d = decomposer(Discipline::Multiplicative);
    assert!(matches!(
        d.decompose(&seq("P<a>, Q; R"), &WitnessPool::empty()),
        Ok(Decomposition::Axiom)
    ));

    let err = apply_rule(&atom("R"), Side::Consequent, d.config()).unwrap_err();
    assert!(matches!(err, SeqError::EmptyDecomposition { ref subject } if subject == "R"), "{err}");
}
