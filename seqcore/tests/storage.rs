use std::path::PathBuf;

use seqcore::prelude::*;
use seqcore::storage;

fn scratch_dir(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("seqcore-{}-{}", std::process::id(), name));
    std::fs::create_dir_all(&dir).unwrap();
    dir
}

fn sample_tree() -> ProofTree {
    let decomposer = Decomposer::new(
        RuleConfig::uniform(Discipline::Multiplicative)
            .with(Connective::Conjunction, Side::Antecedent, Discipline::Additive)
            .unwrap(),
    );
    let root = parse_sequent("∀x (P<x> & Q), R v S; ∃y P<y>").unwrap();
    ProofTree::grown(root, &decomposer, &WitnessPool::new(["a"]).unwrap()).unwrap()
}

#[test]
fn text_roundtrip() {
    let tree = sample_tree();
    let text = storage::to_text(&tree).unwrap();
    assert!(text.contains("sequent = "));
    assert_eq!(storage::from_text(&text).unwrap(), tree);
}

#[test]
fn binary_roundtrip() {
    let tree = sample_tree();
    let bytes = storage::encode(&tree).unwrap();
    assert_eq!(storage::decode(&bytes).unwrap(), tree);
}

#[test]
fn text_records_are_readable() {
    let text = r#"
sequent = "A & B; A"

[[branches]]

[[branches.premises]]
sequent = "A, B; A"

[[branches.premises.branches]]
"#;
    let tree = storage::from_text(text).unwrap();
    assert!(tree.is_grown());
    assert_eq!(tree.depth(), 1);
    assert!(tree.is_closed());
    assert_eq!(tree.branches()[0].children()[0].branches(), &[Branch::Axiom]);
}

#[test]
fn malformed_sequent_in_text_is_reported() {
    let err = storage::from_text("sequent = \"A & ; B\"").unwrap_err();
    assert!(matches!(err, SeqError::MalformedInput(_)));

    let err = storage::from_text("sequent = [1, 2]").unwrap_err();
    assert!(matches!(err, SeqError::DecodeError(_)));
}

#[test]
fn garbage_bytes_are_rejected() {
    assert!(matches!(
        storage::decode(b"definitely not cbor"),
        Err(SeqError::DecodeError(_))
    ));
}

#[test]
fn save_and_load_pick_format_from_extension() {
    let dir = scratch_dir("save-load");
    let tree = sample_tree();

    let text_path = dir.join("tree.toml");
    storage::save(&tree, &text_path).unwrap();
    let text = std::fs::read_to_string(&text_path).unwrap();
    assert!(text.starts_with("sequent = "));
    assert_eq!(storage::load(&text_path).unwrap(), tree);

    let bin_path = dir.join("nested").join("tree.bin");
    storage::save(&tree, &bin_path).unwrap();
    assert_eq!(storage::load(&bin_path).unwrap(), tree);

    std::fs::remove_dir_all(&dir).unwrap();
}

#[test]
fn missing_file_is_io_error() {
    let dir = scratch_dir("missing");
    let err = storage::load(&dir.join("absent.toml")).unwrap_err();
    assert!(matches!(err, SeqError::IoError(_)));
    std::fs::remove_dir_all(&dir).unwrap();
}

#[test]
fn impossible_branch_shapes_are_rejected() {
    let three_premises = r#"
sequent = "A & B; A"

[[branches]]
premises = [{ sequent = "A; A" }, { sequent = "B; A" }, { sequent = "A, B; A" }]
"#;
    let err = storage::from_text(three_premises).unwrap_err();
    assert!(matches!(err, SeqError::DecodeError(_)), "{err}");

    let premises_under_atom = r#"
sequent = "A; A"

[[branches]]
premises = [{ sequent = "A; A" }]
"#;
    let err = storage::from_text(premises_under_atom).unwrap_err();
    assert!(matches!(err, SeqError::DecodeError(_)), "{err}");

    let axiom_under_complex = r#"
sequent = "A & B; A"

[[branches]]
"#;
    let err = storage::from_text(axiom_under_complex).unwrap_err();
    assert!(matches!(err, SeqError::DecodeError(_)), "{err}");

    let two_axioms = r#"
sequent = "A; A"

[[branches]]

[[branches]]
"#;
    let err = storage::from_text(two_axioms).unwrap_err();
    assert!(matches!(err, SeqError::DecodeError(_)), "{err}");
}
