//! Witness pool for quantifier instantiation.
//!
//! The pool is threaded top-down through growth: every instantiation hands its children a
//! pool that remembers the chosen witness, so a name is never instantiated twice along one
//! path.
use std::collections::BTreeSet;

use either::Either;
use seqformal::parser::is_term;
use seqformal::sequent::Sequent;

use crate::magic::PLACEHOLDER_WITNESS;
use crate::utils::error::{SeqError, SeqResult};

/// Caller-supplied individual names plus the witnesses already used above a node.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WitnessPool {
    supplied: Vec<String>,
    used: BTreeSet<String>,
}

impl WitnessPool {
    /// Pool over `names`, keeping their first-occurrence order and dropping duplicates.
    ///
    /// Every name must read back as a term (see [`is_term`]); otherwise instantiated
    /// sequents would not survive a display/parse round trip.
    pub fn new<S: Into<String>>(names: impl IntoIterator<Item = S>) -> SeqResult<Self> {
        let mut supplied: Vec<String> = Vec::new();
        for name in names {
            let name = name.into();
            if !is_term(&name) {
                return Err(SeqError::InvalidWitness { name });
            }
            if !supplied.contains(&name) {
                supplied.push(name);
            }
        }
        Ok(Self {
            supplied,
            used: BTreeSet::new(),
        })
    }

    /// Pool without supplied names; every instantiation uses the placeholder witness.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn supplied(&self) -> &[String] {
        &self.supplied
    }

    pub fn used(&self) -> impl Iterator<Item = &str> {
        self.used.iter().map(String::as_str)
    }

    /// Supplied names that are neither used above this node nor present in `sequent`.
    pub fn fresh<'a>(&'a self, sequent: &Sequent) -> impl Iterator<Item = &'a str> + 'a {
        let present = sequent.names();
        self.supplied
            .iter()
            .filter(move |name| !present.contains(*name) && !self.used.contains(*name))
            .map(String::as_str)
    }

    /// Witnesses to instantiate a quantifier of `sequent` with, in supplied order.
    ///
    /// Falls back to the single [`PLACEHOLDER_WITNESS`] when no fresh name is left, so the
    /// result is never empty.
    pub fn candidates<'a>(&'a self, sequent: &Sequent) -> impl Iterator<Item = &'a str> + 'a {
        let fresh: Vec<&str> = self.fresh(sequent).collect();
        if fresh.is_empty() {
            Either::Left(std::iter::once(PLACEHOLDER_WITNESS))
        } else {
            Either::Right(fresh.into_iter())
        }
    }

    /// Pool for the children of a node instantiated with `witness`.
    pub fn descend(&self, witness: &str) -> Self {
        let mut next = self.clone();
        next.used.insert(witness.to_string());
        next
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use seqformal::prop::func::*;

    #[test]
    fn duplicates_are_dropped() {
        let pool = WitnessPool::new(["b", "a", "b"]).unwrap();
        assert_eq!(pool.supplied(), &["b".to_string(), "a".to_string()]);
    }

    #[test]
    fn keywords_and_symbols_are_rejected() {
        for name in ["or", "v", "and", "not", "implies", "forallx", "exists", "a-b", ""] {
            let err = WitnessPool::new(["alice", name]).unwrap_err();
            assert!(
                matches!(&err, SeqError::InvalidWitness { name: n } if n == name),
                "{name}: {err}"
            );
        }
    }

    #[test]
    fn names_in_sequent_are_excluded() {
        let pool = WitnessPool::new(["alice", "bob"]).unwrap();
        let s = Sequent::new(
            vec![forall("x", atom_with("P", ["x"]))],
            vec![atom_with("P", ["alice"])],
        );
        let candidates: Vec<_> = pool.candidates(&s).collect();
        assert_eq!(candidates, vec!["bob"]);
    }

    #[test]
    fn used_witnesses_are_excluded_below() {
        let pool = WitnessPool::new(["alice", "bob"]).unwrap().descend("bob");
        let s = Sequent::new(vec![forall("x", atom_with("P", ["x"]))], vec![]);
        let candidates: Vec<_> = pool.candidates(&s).collect();
        assert_eq!(candidates, vec!["alice"]);
        assert_eq!(pool.used().collect::<Vec<_>>(), vec!["bob"]);
    }

    #[test]
    fn exhausted_pool_uses_placeholder() {
        let s = Sequent::new(vec![forall("x", atom_with("P", ["x"]))], vec![]);
        let empty = WitnessPool::empty();
        let candidates: Vec<_> = empty.candidates(&s).collect();
        assert_eq!(candidates, vec![PLACEHOLDER_WITNESS]);

        let pool = WitnessPool::new(["a"]).unwrap().descend("a");
        let candidates: Vec<_> = pool.candidates(&s).collect();
        assert_eq!(candidates, vec![PLACEHOLDER_WITNESS]);
    }
}
