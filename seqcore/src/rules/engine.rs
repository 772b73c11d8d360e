//! Rule engine: maps a complex proposition on one side of a sequent to the premises that
//! replace it.
//!
//! The engine only builds the fresh premises. Mixing them with the untouched context and
//! enumerating context partitions is left to the
//! [`Decomposer`](crate::decomposer::Decomposer).
use seqformal::prop::{Connective, Proposition};
use seqformal::sequent::{Sequent, Side};
use strum::EnumIs;

use super::{Discipline, RuleConfig};
use crate::utils::error::{SeqError, SeqResult};

/// Result of applying one rule to a proposition.
#[derive(Debug, Clone, PartialEq, Eq, EnumIs)]
pub enum RuleOutcome {
    /// One premise, one alternative.
    Invertible1(Sequent),
    /// Two premises that must both be proved, one alternative.
    Invertible2(Sequent, Sequent),
    /// Two alternative premises; proving either one suffices.
    NonInvertible1(Sequent, Sequent),
    /// Two premises that must both be proved, with the context distributed between them in
    /// every possible way.
    NonInvertible2(Sequent, Sequent),
    /// Quantifier: substitute a witness for `variable` in `body` and put it back on `side`.
    Instantiate {
        side: Side,
        variable: String,
        body: Proposition,
    },
}

#[inline]
fn ant(props: Vec<Proposition>) -> Sequent {
    Sequent::on_side(Side::Antecedent, props)
}

#[inline]
fn con(props: Vec<Proposition>) -> Sequent {
    Sequent::on_side(Side::Consequent, props)
}

/// Apply the rule configured for `prop`'s outer connective on `side`.
///
/// Fails with [`SeqError::EmptyDecomposition`] when `prop` is an atom.
pub fn apply_rule(prop: &Proposition, side: Side, config: &RuleConfig) -> SeqResult<RuleOutcome> {
    use Discipline::{Additive, Multiplicative};
    use RuleOutcome::*;
    use Side::{Antecedent, Consequent};

    let discipline = |connective: Connective| config.discipline(connective, side);

    let outcome = match prop {
        Proposition::Atom(_) => {
            return Err(SeqError::EmptyDecomposition {
                subject: prop.to_string(),
            });
        }

        // Negation has a single variant whatever the configured discipline.
        Proposition::Negation(inner) => {
            discipline(Connective::Negation)?;
            let inner = (**inner).clone();
            match side {
                Antecedent => Invertible1(con(vec![inner])),
                Consequent => Invertible1(ant(vec![inner])),
            }
        }

        Proposition::Conjunction(l, r) => {
            let (l, r) = ((**l).clone(), (**r).clone());
            match (side, discipline(Connective::Conjunction)?) {
                (Antecedent, Additive) => NonInvertible1(ant(vec![l]), ant(vec![r])),
                (Antecedent, Multiplicative) => Invertible1(ant(vec![l, r])),
                (Consequent, Additive) => Invertible2(con(vec![l]), con(vec![r])),
                (Consequent, Multiplicative) => NonInvertible2(con(vec![l]), con(vec![r])),
            }
        }

        Proposition::Disjunction(l, r) => {
            let (l, r) = ((**l).clone(), (**r).clone());
            match (side, discipline(Connective::Disjunction)?) {
                (Antecedent, Additive) => Invertible2(ant(vec![l]), ant(vec![r])),
                (Antecedent, Multiplicative) => NonInvertible2(ant(vec![l]), ant(vec![r])),
                (Consequent, Additive) => NonInvertible1(con(vec![l]), con(vec![r])),
                (Consequent, Multiplicative) => Invertible1(con(vec![l, r])),
            }
        }

        Proposition::Conditional(l, r) => {
            let (l, r) = ((**l).clone(), (**r).clone());
            match (side, discipline(Connective::Conditional)?) {
                (Antecedent, Additive) => Invertible2(con(vec![l]), ant(vec![r])),
                (Antecedent, Multiplicative) => NonInvertible2(con(vec![l]), ant(vec![r])),
                (Consequent, Additive) => NonInvertible1(ant(vec![l]), con(vec![r])),
                (Consequent, Multiplicative) => Invertible1(Sequent::new(vec![l], vec![r])),
            }
        }

        Proposition::Universal(variable, body) | Proposition::Existential(variable, body) => {
            Instantiate {
                side,
                variable: variable.clone(),
                body: (**body).clone(),
            }
        }
    };

    Ok(outcome)
}
