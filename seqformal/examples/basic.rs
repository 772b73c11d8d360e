use seqformal::prelude::*;

fn main() {
    let p = forall(
        "x",
        implies(
            atom_with("P", ["x"]),
            exists("y", atom_with("R", ["x", "y"]) & not(atom("Q"))),
        ),
    );
    p.pretty_print().unwrap();
    println!();

    let s = Sequent::new(vec![p, atom_with("P", ["alice"])], vec![atom("Q")]);
    s.pretty_print().unwrap();
    println!("  [{}]", s.tag());
}
