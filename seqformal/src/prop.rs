//! Propositions: immutable formula values with structural equality.
//!
//! Role
//! - [`Proposition`] is a closed algebraic value covering atoms, the four propositional
//!   connectives and the two quantifiers.
//! - Values are compared structurally and totally ordered (variant first, then content),
//!   so they can be sorted and deduplicated for canonical display.
//! - Builders in [`func`] and the `!`, `&`, `|` operators let you create formulas ergonomically.
//!
//! Example
//! ```
//! use seqformal::prop::func::*;
//!
//! let body = atom_with("P", ["x"]) & atom("Q");
//! let p = forall("x", body.clone());
//! assert_eq!(p.complexity(), 2);
//! assert_eq!(p.to_string(), "∀x (P<x> & Q)");
//! assert_eq!(body.subst("x", "alice").to_string(), "P<alice> & Q");
//! ```
use std::collections::BTreeSet;
use std::ops::{BitAnd, BitOr, Not};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use strum::{EnumIs, EnumIter};

/// Atomic formula: a predicate symbol applied to zero or more individual terms.
///
/// A bare `A` is a predicate without terms; `P<a, x>` carries two terms. Terms are either
/// individual names or variables bound by an enclosing quantifier.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Atom {
    pub predicate: String,
    pub terms: Vec<String>,
}

impl Atom {
    /// Atom without terms.
    pub fn new(predicate: impl Into<String>) -> Self {
        Self {
            predicate: predicate.into(),
            terms: Vec::new(),
        }
    }

    /// Atom applied to the given terms.
    pub fn with_terms<S: Into<String>>(
        predicate: impl Into<String>,
        terms: impl IntoIterator<Item = S>,
    ) -> Self {
        Self {
            predicate: predicate.into(),
            terms: terms.into_iter().map(Into::into).collect(),
        }
    }
}

/// Outer constructor of a non-atomic proposition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, EnumIs, EnumIter)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Connective {
    Negation,
    Conjunction,
    Disjunction,
    Conditional,
    Universal,
    Existential,
}

impl Connective {
    /// Canonical symbol, as accepted by the parser.
    pub fn symbol(self) -> &'static str {
        match self {
            Connective::Negation => "~",
            Connective::Conjunction => "&",
            Connective::Disjunction => "v",
            Connective::Conditional => "->",
            Connective::Universal => "∀",
            Connective::Existential => "∃",
        }
    }

    /// Quantifiers bind a variable and are instantiated with witnesses rather than being
    /// decomposed by a propositional rule.
    pub fn is_quantifier(self) -> bool {
        matches!(self, Connective::Universal | Connective::Existential)
    }
}

impl std::fmt::Display for Connective {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.symbol())
    }
}

/// A formula of the propositional-and-quantified language.
///
/// Invariants
/// - `complexity(Atom) = 0`
/// - `complexity(unary) = 1 + complexity(inner)` (negation and both quantifiers)
/// - `complexity(binary) = 1 + max(complexity(left), complexity(right))`
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, EnumIs)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Proposition {
    Atom(Atom),
    Negation(Box<Proposition>),
    Conjunction(Box<Proposition>, Box<Proposition>),
    Disjunction(Box<Proposition>, Box<Proposition>),
    Conditional(Box<Proposition>, Box<Proposition>),
    Universal(String, Box<Proposition>),
    Existential(String, Box<Proposition>),
}

impl Proposition {
    /// Outer connective, `None` for atoms.
    pub fn connective(&self) -> Option<Connective> {
        match self {
            Proposition::Atom(_) => None,
            Proposition::Negation(_) => Some(Connective::Negation),
            Proposition::Conjunction(..) => Some(Connective::Conjunction),
            Proposition::Disjunction(..) => Some(Connective::Disjunction),
            Proposition::Conditional(..) => Some(Connective::Conditional),
            Proposition::Universal(..) => Some(Connective::Universal),
            Proposition::Existential(..) => Some(Connective::Existential),
        }
    }

    /// Nesting depth of connectives.
    pub fn complexity(&self) -> usize {
        match self {
            Proposition::Atom(_) => 0,
            Proposition::Negation(inner)
            | Proposition::Universal(_, inner)
            | Proposition::Existential(_, inner) => 1 + inner.complexity(),
            Proposition::Conjunction(lhs, rhs)
            | Proposition::Disjunction(lhs, rhs)
            | Proposition::Conditional(lhs, rhs) => 1 + lhs.complexity().max(rhs.complexity()),
        }
    }

    /// Total number of connectives. Every decomposition step removes exactly one.
    pub fn connectives(&self) -> usize {
        match self {
            Proposition::Atom(_) => 0,
            Proposition::Negation(inner)
            | Proposition::Universal(_, inner)
            | Proposition::Existential(_, inner) => 1 + inner.connectives(),
            Proposition::Conjunction(lhs, rhs)
            | Proposition::Disjunction(lhs, rhs)
            | Proposition::Conditional(lhs, rhs) => 1 + lhs.connectives() + rhs.connectives(),
        }
    }

    #[inline]
    pub fn is_complex(&self) -> bool {
        !self.is_atom()
    }

    /// Replace every free occurrence of `variable` among atom terms by `witness`.
    ///
    /// Substitution stops below a quantifier that rebinds `variable`. A quantifier binding
    /// `witness` itself is renamed first (`y` becomes `y_1`, `y_2`, ...) when `variable`
    /// occurs free below it, so the witness is never captured.
    pub fn subst(&self, variable: &str, witness: &str) -> Proposition {
        match self {
            Proposition::Universal(bound, inner) | Proposition::Existential(bound, inner)
                if bound != variable && bound == witness && inner.names().contains(variable) =>
            {
                let mut taken = inner.symbols();
                taken.insert(witness.to_string());
                taken.insert(variable.to_string());
                let fresh = (1..)
                    .map(|n| format!("{bound}_{n}"))
                    .find(|candidate| !taken.contains(candidate))
                    .unwrap_or_else(|| format!("{bound}_"));

                let renamed = Box::new(inner.subst(bound, &fresh).subst(variable, witness));
                match self {
                    Proposition::Universal(..) => Proposition::Universal(fresh, renamed),
                    _ => Proposition::Existential(fresh, renamed),
                }
            }
            _ => self.subst_plain(variable, witness),
        }
    }

    fn subst_plain(&self, variable: &str, witness: &str) -> Proposition {
        match self {
            Proposition::Atom(atom) => Proposition::Atom(Atom {
                predicate: atom.predicate.clone(),
                terms: atom
                    .terms
                    .iter()
                    .map(|t| {
                        if t == variable {
                            witness.to_string()
                        } else {
                            t.clone()
                        }
                    })
                    .collect(),
            }),
            Proposition::Negation(inner) => {
                Proposition::Negation(Box::new(inner.subst(variable, witness)))
            }
            Proposition::Conjunction(lhs, rhs) => Proposition::Conjunction(
                Box::new(lhs.subst(variable, witness)),
                Box::new(rhs.subst(variable, witness)),
            ),
            Proposition::Disjunction(lhs, rhs) => Proposition::Disjunction(
                Box::new(lhs.subst(variable, witness)),
                Box::new(rhs.subst(variable, witness)),
            ),
            Proposition::Conditional(lhs, rhs) => Proposition::Conditional(
                Box::new(lhs.subst(variable, witness)),
                Box::new(rhs.subst(variable, witness)),
            ),
            Proposition::Universal(bound, _) | Proposition::Existential(bound, _)
                if bound == variable =>
            {
                self.clone()
            }
            Proposition::Universal(bound, inner) => Proposition::Universal(
                bound.clone(),
                Box::new(inner.subst(variable, witness)),
            ),
            Proposition::Existential(bound, inner) => Proposition::Existential(
                bound.clone(),
                Box::new(inner.subst(variable, witness)),
            ),
        }
    }

    /// Individual names occurring free in this proposition.
    pub fn names(&self) -> BTreeSet<String> {
        let mut names = BTreeSet::new();
        self.collect_names(&mut Vec::new(), &mut names);
        names
    }

    /// Every term and every bound variable, free or not.
    pub fn symbols(&self) -> BTreeSet<String> {
        match self {
            Proposition::Atom(atom) => atom.terms.iter().cloned().collect(),
            Proposition::Negation(inner) => inner.symbols(),
            Proposition::Conjunction(lhs, rhs)
            | Proposition::Disjunction(lhs, rhs)
            | Proposition::Conditional(lhs, rhs) => {
                let mut symbols = lhs.symbols();
                symbols.extend(rhs.symbols());
                symbols
            }
            Proposition::Universal(variable, inner) | Proposition::Existential(variable, inner) => {
                let mut symbols = inner.symbols();
                symbols.insert(variable.clone());
                symbols
            }
        }
    }

    pub(crate) fn collect_names<'a>(
        &'a self,
        bound: &mut Vec<&'a str>,
        names: &mut BTreeSet<String>,
    ) {
        match self {
            Proposition::Atom(atom) => {
                for term in &atom.terms {
                    if !bound.contains(&term.as_str()) {
                        names.insert(term.clone());
                    }
                }
            }
            Proposition::Negation(inner) => inner.collect_names(bound, names),
            Proposition::Conjunction(lhs, rhs)
            | Proposition::Disjunction(lhs, rhs)
            | Proposition::Conditional(lhs, rhs) => {
                lhs.collect_names(bound, names);
                rhs.collect_names(bound, names);
            }
            Proposition::Universal(variable, inner) | Proposition::Existential(variable, inner) => {
                bound.push(variable);
                inner.collect_names(bound, names);
                bound.pop();
            }
        }
    }
}

impl From<Atom> for Proposition {
    fn from(atom: Atom) -> Self {
        Proposition::Atom(atom)
    }
}

impl Not for Proposition {
    type Output = Proposition;

    fn not(self) -> Self::Output {
        Proposition::Negation(Box::new(self))
    }
}

impl BitAnd for Proposition {
    type Output = Proposition;

    fn bitand(self, rhs: Self) -> Self::Output {
        Proposition::Conjunction(Box::new(self), Box::new(rhs))
    }
}

impl BitOr for Proposition {
    type Output = Proposition;

    fn bitor(self, rhs: Self) -> Self::Output {
        Proposition::Disjunction(Box::new(self), Box::new(rhs))
    }
}

pub mod func {
    //! Free-function builders mirroring the parser syntax.
    use super::{Atom, Proposition};

    pub fn atom(predicate: impl Into<String>) -> Proposition {
        Proposition::Atom(Atom::new(predicate))
    }

    pub fn atom_with<S: Into<String>>(
        predicate: impl Into<String>,
        terms: impl IntoIterator<Item = S>,
    ) -> Proposition {
        Proposition::Atom(Atom::with_terms(predicate, terms))
    }

    pub fn not(inner: Proposition) -> Proposition {
        Proposition::Negation(Box::new(inner))
    }

    pub fn and(lhs: Proposition, rhs: Proposition) -> Proposition {
        Proposition::Conjunction(Box::new(lhs), Box::new(rhs))
    }

    pub fn or(lhs: Proposition, rhs: Proposition) -> Proposition {
        Proposition::Disjunction(Box::new(lhs), Box::new(rhs))
    }

    pub fn implies(lhs: Proposition, rhs: Proposition) -> Proposition {
        Proposition::Conditional(Box::new(lhs), Box::new(rhs))
    }

    pub fn forall(variable: impl Into<String>, inner: Proposition) -> Proposition {
        Proposition::Universal(variable.into(), Box::new(inner))
    }

    pub fn exists(variable: impl Into<String>, inner: Proposition) -> Proposition {
        Proposition::Existential(variable.into(), Box::new(inner))
    }
}
