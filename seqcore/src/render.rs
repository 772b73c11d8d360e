//! Indented text outline of a proof tree.
//!
//! Every node prints its rule tag and canonical sequent, children indented below it.
//! Nodes with several branches label each one `alt i/n`:
//!
//! ```text
//! L&  A & B; B
//!   alt 1/2
//!     Ax  A; B
//!   alt 2/2
//!     Ax  B; B
//! ```
use std::io;

use pretty::RcDoc;
use seqformal::pretty::{PrettyFormal, Style, print_colored};

use crate::tree::{Branch, ProofTree};

const INDENT: isize = 2;

fn children_doc(children: &[ProofTree]) -> RcDoc<'static, Style> {
    RcDoc::concat(
        children
            .iter()
            .map(|child| RcDoc::hardline().append(node_doc(child))),
    )
}

fn node_doc(tree: &ProofTree) -> RcDoc<'static, Style> {
    let head = RcDoc::as_string(tree.tag().to_string())
        .annotate(Style::Operator)
        .append(RcDoc::text("  "))
        .append(tree.root().pretty_doc());

    let body = match tree.branches() {
        [] | [Branch::Axiom] => RcDoc::nil(),
        [single] => children_doc(single.children()),
        branches => {
            let n = branches.len();
            RcDoc::concat(branches.iter().enumerate().map(|(i, branch)| {
                RcDoc::hardline()
                    .append(RcDoc::as_string(format!("alt {}/{}", i + 1, n)).annotate(Style::Punct))
                    .append(children_doc(branch.children()).nest(INDENT))
            }))
        }
    };

    head.append(body.nest(INDENT))
}

impl PrettyFormal for ProofTree {
    fn pretty_doc(&self) -> RcDoc<'static, Style> {
        node_doc(self)
    }
}

/// Plain outline of `tree`, one node per line.
pub fn outline(tree: &ProofTree) -> String {
    tree.pretty_string()
}

/// Print the outline of `tree` to stdout, colored when the terminal supports it.
pub fn print_outline(tree: &ProofTree) -> io::Result<()> {
    print_colored(&node_doc(tree).append(RcDoc::hardline()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decomposer::Decomposer;
    use crate::rules::{Discipline, RuleConfig};
    use crate::witness::WitnessPool;

    #[test]
    fn labels_alternatives() {
        let decomposer = Decomposer::new(RuleConfig::uniform(Discipline::Additive));
        let tree =
            ProofTree::grown("A & B; B".parse().unwrap(), &decomposer, &WitnessPool::empty())
                .unwrap();
        let expected = "L&  A & B; B\n  alt 1/2\n    Ax  A; B\n  alt 2/2\n    Ax  B; B";
        assert_eq!(outline(&tree), expected);
    }

    #[test]
    fn single_branch_is_not_labelled() {
        let decomposer = Decomposer::new(RuleConfig::uniform(Discipline::Multiplicative));
        let tree =
            ProofTree::grown("A & B; B".parse().unwrap(), &decomposer, &WitnessPool::empty())
                .unwrap();
        assert_eq!(outline(&tree), "L&  A & B; B\n  Ax  A, B; B");
    }
}
