//! One decomposition step: from a sequent to the alternatives that derive it.
//!
//! The [`Decomposer`] always works on [`Sequent::first_complex`], removes it to obtain the
//! context, asks the rule engine for the fresh premises and mixes them back with the
//! context. Non-invertible two-premise rules distribute the context over both premises in
//! every order-preserving way; quantifier rules produce one alternative per witness.
use log::{debug, trace};
use seqformal::sequent::{RuleTag, Sequent};
use smallvec::{SmallVec, smallvec};

use crate::rules::RuleConfig;
use crate::rules::engine::{RuleOutcome, apply_rule};
use crate::utils::error::{SeqError, SeqResult};
use crate::witness::WitnessPool;

/// One way of deriving a sequent: premises that must all be proved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alternative {
    pub premises: SmallVec<Sequent, 2>,
    /// Witness chosen by a quantifier rule, if any.
    pub witness: Option<String>,
}

impl Alternative {
    fn of(premises: SmallVec<Sequent, 2>) -> Self {
        Self {
            premises,
            witness: None,
        }
    }
}

/// Outcome of [`Decomposer::decompose`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decomposition {
    /// Atomic sequent; nothing left to decompose.
    Axiom,
    /// Rule `tag` applies; proving any one alternative proves the sequent.
    Step {
        tag: RuleTag,
        alternatives: Vec<Alternative>,
    },
}

impl Decomposition {
    pub fn tag(&self) -> RuleTag {
        match self {
            Decomposition::Axiom => RuleTag::Axiom,
            Decomposition::Step { tag, .. } => *tag,
        }
    }

    pub fn alternatives(&self) -> &[Alternative] {
        match self {
            Decomposition::Axiom => &[],
            Decomposition::Step { alternatives, .. } => alternatives,
        }
    }
}

/// Decomposes sequents under a fixed rule configuration.
#[derive(Debug, Clone)]
pub struct Decomposer {
    config: RuleConfig,
}

impl Decomposer {
    pub fn new(config: RuleConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &RuleConfig {
        &self.config
    }

    /// Decompose the leftmost complex proposition of `sequent`.
    ///
    /// `pool` supplies witnesses to quantifier rules; the pool each child must be grown
    /// with is `pool.descend(witness)` for alternatives that carry a witness and `pool`
    /// itself otherwise.
    pub fn decompose(&self, sequent: &Sequent, pool: &WitnessPool) -> SeqResult<Decomposition> {
        let Some((side, index, prop)) = sequent.first_complex() else {
            trace!("`{}` is atomic", sequent);
            return Ok(Decomposition::Axiom);
        };

        let tag = sequent.tag();
        let context = sequent
            .remove(side, index)
            .ok_or_else(|| SeqError::EmptyDecomposition {
                subject: sequent.to_string(),
            })?;

        let alternatives = match apply_rule(prop, side, &self.config)? {
            RuleOutcome::Invertible1(premise) => {
                vec![Alternative::of(smallvec![context.mix_with(&premise)])]
            }
            RuleOutcome::Invertible2(left, right) => vec![Alternative::of(smallvec![
                context.mix_with(&left),
                context.mix_with(&right)
            ])],
            RuleOutcome::NonInvertible1(left, right) => vec![
                Alternative::of(smallvec![context.mix_with(&left)]),
                Alternative::of(smallvec![context.mix_with(&right)]),
            ],
            RuleOutcome::NonInvertible2(left, right) => context
                .partitions()
                .ok_or_else(|| SeqError::ContextTooLarge {
                    size: context.len(),
                    max: Sequent::MAX_PARTITIONED_LEN,
                })?
                .map(|(lhs, rhs)| {
                    Alternative::of(smallvec![lhs.mix_with(&left), rhs.mix_with(&right)])
                })
                .collect(),
            RuleOutcome::Instantiate {
                side,
                variable,
                body,
            } => pool
                .candidates(sequent)
                .map(|witness| Alternative {
                    premises: smallvec![context.mix_with(&Sequent::on_side(
                        side,
                        vec![body.subst(&variable, witness)]
                    ))],
                    witness: Some(witness.to_string()),
                })
                .collect(),
        };

        debug!(
            "{} on `{}` gives {} alternative(s)",
            tag,
            sequent,
            alternatives.len()
        );
        Ok(Decomposition::Step { tag, alternatives })
    }
}
