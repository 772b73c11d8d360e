//! Sequents: ordered pairs of formula sequences.
//!
//! Role
//! - [`Sequent`] holds the antecedent and consequent as ordered sequences; duplicates are kept
//!   (multiset semantics realized by an ordered sequence).
//! - Sequents are immutable values: [`Sequent::remove`], [`Sequent::mix`] and
//!   [`Sequent::partitions`] all build new sequents.
//! - [`Sequent::first_complex`] fixes which formula is decomposed next, which makes proof
//!   trees deterministic and reproducible.
//!
//! Example
//! ```
//! use seqformal::prop::func::*;
//! use seqformal::sequent::{Sequent, Side};
//!
//! let s = Sequent::new(vec![atom("r")], vec![atom("A") & atom("B"), atom("s")]);
//! let (side, index, p) = s.first_complex().unwrap();
//! assert_eq!((side, index), (Side::Consequent, 0));
//! assert_eq!(p.to_string(), "A & B");
//! let context = s.remove(side, index).unwrap();
//! assert_eq!(context.to_string(), "r; s");
//! assert_eq!(context.partitions().map(|p| p.count()), Some(4));
//! ```
use std::collections::BTreeSet;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use strum::{EnumIs, EnumIter};

use crate::prop::{Connective, Proposition};

/// Side of a sequent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, EnumIs, EnumIter)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Side {
    Antecedent,
    Consequent,
}

impl Side {
    /// Short configuration key: `ant` or `con`.
    pub fn key(self) -> &'static str {
        match self {
            Side::Antecedent => "ant",
            Side::Consequent => "con",
        }
    }

    /// Prefix used in rule tags: `L` for the antecedent, `R` for the consequent.
    pub fn prefix(self) -> char {
        match self {
            Side::Antecedent => 'L',
            Side::Consequent => 'R',
        }
    }
}

impl std::fmt::Display for Side {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.key())
    }
}

/// Short label naming the inference step that decomposes a sequent.
///
/// Displayed as `Ax` for axioms and as side prefix plus connective symbol otherwise
/// (`L&`, `R->`, `Rv`, `L~`, `R∀`, `L∃`, ...).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, EnumIs)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum RuleTag {
    Axiom,
    Rule { side: Side, connective: Connective },
}

impl std::fmt::Display for RuleTag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RuleTag::Axiom => f.write_str("Ax"),
            RuleTag::Rule { side, connective } => write!(f, "{}{}", side.prefix(), connective),
        }
    }
}

/// A sequent `antecedent; consequent`.
#[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Sequent {
    pub antecedent: Vec<Proposition>,
    pub consequent: Vec<Proposition>,
}

impl Sequent {
    pub fn new(antecedent: Vec<Proposition>, consequent: Vec<Proposition>) -> Self {
        Self {
            antecedent,
            consequent,
        }
    }

    /// The empty sequent `; `, identity element of [`Sequent::mix`].
    pub fn empty() -> Self {
        Self::default()
    }

    /// Sequent with `props` on `side` and nothing on the other side.
    pub fn on_side(side: Side, props: Vec<Proposition>) -> Self {
        match side {
            Side::Antecedent => Self::new(props, Vec::new()),
            Side::Consequent => Self::new(Vec::new(), props),
        }
    }

    #[inline]
    pub fn side(&self, side: Side) -> &[Proposition] {
        match side {
            Side::Antecedent => &self.antecedent,
            Side::Consequent => &self.consequent,
        }
    }

    /// Number of propositions on both sides.
    #[inline]
    pub fn len(&self) -> usize {
        self.antecedent.len() + self.consequent.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.antecedent.is_empty() && self.consequent.is_empty()
    }

    /// Sum of the complexities of every member.
    pub fn complexity(&self) -> usize {
        self.iter().map(|(_, p)| p.complexity()).sum()
    }

    /// Sum of the connective counts of every member.
    pub fn connectives(&self) -> usize {
        self.iter().map(|(_, p)| p.connectives()).sum()
    }

    /// True when every member is an atom.
    pub fn is_atomic(&self) -> bool {
        self.iter().all(|(_, p)| p.is_atom())
    }

    /// True when some atom occurs on both sides.
    pub fn is_identity(&self) -> bool {
        self.antecedent
            .iter()
            .filter(|p| p.is_atom())
            .any(|p| self.consequent.contains(p))
    }

    /// Every member with its side, antecedent first, left to right.
    pub fn iter(&self) -> impl Iterator<Item = (Side, &Proposition)> {
        self.antecedent
            .iter()
            .map(|p| (Side::Antecedent, p))
            .chain(self.consequent.iter().map(|p| (Side::Consequent, p)))
    }

    /// New sequent without the proposition at `index` on `side`.
    ///
    /// Returns `None` when `index` is out of range.
    pub fn remove(&self, side: Side, index: usize) -> Option<Sequent> {
        if index >= self.side(side).len() {
            return None;
        }

        let mut out = self.clone();
        match side {
            Side::Antecedent => out.antecedent.remove(index),
            Side::Consequent => out.consequent.remove(index),
        };
        Some(out)
    }

    /// Concatenate antecedents and consequents of `sequents`, in operand order.
    pub fn mix<'a>(sequents: impl IntoIterator<Item = &'a Sequent>) -> Sequent {
        let mut out = Sequent::empty();
        for s in sequents {
            out.antecedent.extend(s.antecedent.iter().cloned());
            out.consequent.extend(s.consequent.iter().cloned());
        }
        out
    }

    /// Shorthand for `Sequent::mix([self, other])`.
    #[inline]
    pub fn mix_with(&self, other: &Sequent) -> Sequent {
        Sequent::mix([self, other])
    }

    /// Leftmost complex proposition (antecedent before consequent), with its side and index.
    pub fn first_complex(&self) -> Option<(Side, usize, &Proposition)> {
        for side in [Side::Antecedent, Side::Consequent] {
            if let Some((index, p)) = self
                .side(side)
                .iter()
                .enumerate()
                .find(|(_, p)| p.is_complex())
            {
                return Some((side, index, p));
            }
        }
        None
    }

    /// Label of the rule that decomposes this sequent.
    pub fn tag(&self) -> RuleTag {
        match self.first_complex() {
            None => RuleTag::Axiom,
            Some((side, _, p)) => match p.connective() {
                Some(connective) => RuleTag::Rule { side, connective },
                None => RuleTag::Axiom,
            },
        }
    }

    /// Individual names occurring free anywhere in the sequent.
    pub fn names(&self) -> BTreeSet<String> {
        let mut names = BTreeSet::new();
        let mut bound = Vec::new();
        for (_, p) in self.iter() {
            p.collect_names(&mut bound, &mut names);
        }
        names
    }

    /// Every split of this sequent into two order-preserving parts.
    ///
    /// The antecedent is split into two subsequences and so is the consequent, giving
    /// `2^|ant| * 2^|con|` pairs. Pair `k` sends member `i` (antecedent first) to the right
    /// part when bit `i` of `k` is set, so the first pair keeps everything on the left.
    ///
    /// Returns `None` for a sequent of more than [`Sequent::MAX_PARTITIONED_LEN`] members.
    pub fn partitions(&self) -> Option<Partitions<'_>> {
        if self.len() > Self::MAX_PARTITIONED_LEN {
            return None;
        }
        Some(Partitions {
            sequent: self,
            next: 0,
            end: 1u64 << self.len(),
        })
    }

    /// Largest sequent that [`Sequent::partitions`] can enumerate.
    pub const MAX_PARTITIONED_LEN: usize = 63;
}

/// Iterator returned by [`Sequent::partitions`].
pub struct Partitions<'a> {
    sequent: &'a Sequent,
    next: u64,
    end: u64,
}

impl Iterator for Partitions<'_> {
    type Item = (Sequent, Sequent);

    fn next(&mut self) -> Option<Self::Item> {
        if self.next >= self.end {
            return None;
        }
        let mask = self.next;
        self.next += 1;

        let mut left = Sequent::empty();
        let mut right = Sequent::empty();
        for (bit, (side, p)) in self.sequent.iter().enumerate() {
            let target = if mask & (1u64 << bit) == 0 {
                &mut left
            } else {
                &mut right
            };
            match side {
                Side::Antecedent => target.antecedent.push(p.clone()),
                Side::Consequent => target.consequent.push(p.clone()),
            }
        }
        Some((left, right))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        match usize::try_from(self.end - self.next) {
            Ok(remaining) => (remaining, Some(remaining)),
            Err(_) => (usize::MAX, None),
        }
    }
}

impl ExactSizeIterator for Partitions<'_> {}
