use seqformal::parser::{is_term, parse_proposition, parse_sequent};
use seqformal::prelude::*;

fn roundtrip(src: &str) -> String {
    let s = parse_sequent(src).expect("parse should succeed");
    s.pretty_string()
}

#[test]
fn parse_atomic_sequents() {
    assert_eq!(roundtrip("A; B"), "A; B");
    assert_eq!(roundtrip("A, B;"), "A, B; ");
    assert_eq!(roundtrip("; B"), "; B");
    assert_eq!(roundtrip(";"), "; ");
}

#[test]
fn word_and_symbol_connectives_agree() {
    let words = parse_sequent("not A and B; C or D implies E").unwrap();
    let symbols = parse_sequent("~A & B; C v D -> E").unwrap();
    assert_eq!(words, symbols);
    assert_eq!(words.to_string(), "~A & B; (C v D) -> E");
}

#[test]
fn precedence_and_associativity() {
    // & binds tighter than v, v tighter than ->
    assert_eq!(
        parse_proposition("A v B & C").unwrap(),
        atom("A") | (atom("B") & atom("C"))
    );
    assert_eq!(
        parse_proposition("A & B -> C v D").unwrap(),
        implies(atom("A") & atom("B"), atom("C") | atom("D"))
    );

    // -> is right-assoc, & and v are left-assoc
    assert_eq!(
        parse_proposition("A -> B -> C").unwrap(),
        implies(atom("A"), implies(atom("B"), atom("C")))
    );
    assert_eq!(
        parse_proposition("A & B & C").unwrap(),
        (atom("A") & atom("B")) & atom("C")
    );

    // ~ binds tighter than everything
    assert_eq!(
        parse_proposition("~A & B").unwrap(),
        not(atom("A")) & atom("B")
    );
}

#[test]
fn quantifier_spellings() {
    let expected = forall("x", atom_with("P", ["x"]));
    assert_eq!(parse_proposition("∀x P<x>").unwrap(), expected);
    assert_eq!(parse_proposition("forallx P<x>").unwrap(), expected);
    assert_eq!(parse_proposition("forall x P<x>").unwrap(), expected);

    let expected = exists("y", atom_with("R", ["alice", "y"]));
    assert_eq!(parse_proposition("∃y R<alice, y>").unwrap(), expected);
    assert_eq!(parse_proposition("existsy R<alice,y>").unwrap(), expected);

    // Quantifiers bind as tightly as negation
    assert_eq!(
        parse_proposition("∀x P<x> & Q").unwrap(),
        forall("x", atom_with("P", ["x"])) & atom("Q")
    );
    assert_eq!(
        parse_proposition("∀x (P<x> & Q)").unwrap(),
        forall("x", atom_with("P", ["x"]) & atom("Q"))
    );
}

#[test]
fn canonical_display_parses_back() {
    let sources = [
        "(A & (B v C)) -> ~(D & E), ∀x ∃y R<x, y>; ~~A, B -> (C -> D)",
        "∃x (P<x> -> ∀y (Q<y> v ~P<x>)); ",
        "; (A -> B) -> A",
    ];
    for src in sources {
        let s = parse_sequent(src).unwrap();
        let again = parse_sequent(&s.to_string()).unwrap();
        assert_eq!(s, again, "display of `{src}` should parse back");
        assert_eq!(s.to_string(), src);
    }
}

#[test]
fn parse_errors_are_reported() {
    let err = parse_sequent("A & B").expect_err("missing `;` must be rejected");
    assert!(!err.diagnostics.is_empty());
    assert!(err.to_string().starts_with("malformed input"));

    let err = parse_sequent("A &; B").expect_err("dangling connective");
    assert!(err.diagnostics.iter().any(|d| d.message.contains("parse error")));

    let err = parse_sequent("A $ B; C").expect_err("unknown character");
    assert!(err.diagnostics.iter().any(|d| d.message.contains("lexing error")));
    assert_eq!(err.diagnostics[0].span.start, 2);
}

#[test]
fn keywords_are_not_terms() {
    // `P<or>` would otherwise come back as `P<v>`
    for src in ["P<or>", "P<v>", "R<a, and>", "∀not P<x>", "forallv P<v>"] {
        assert!(parse_proposition(src).is_err(), "`{src}` should be rejected");
    }

    // A glued quantifier needs a proper variable after the keyword
    assert_eq!(parse_proposition("forallv").unwrap(), atom("forallv"));
    assert_eq!(parse_proposition("P<vx, orx>").unwrap(), atom_with("P", ["vx", "orx"]));
}

#[test]
fn term_names_survive_display() {
    for name in ["alice", "vx", "y_1", "_tmp", "NONE"] {
        assert!(is_term(name), "{name}");
        let p = atom_with("P", [name]);
        assert_eq!(parse_proposition(&p.to_string()).unwrap(), p);
    }
    for name in ["or", "v", "and", "not", "implies", "forall", "existsz", "a-b", "1x", ""] {
        assert!(!is_term(name), "{name}");
    }
}
