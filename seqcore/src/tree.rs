//! Proof trees with OR-alternatives.
//!
//! Role
//! - [`ProofTree`] owns its root sequent and its [`Branch`]es outright; there are no
//!   back-references, the witness pool is threaded top-down during growth instead.
//! - Several branches on one node are alternatives (OR); the children of one branch must
//!   all be proved (AND).
//! - [`ProofTree::split`] flattens alternatives into AND-only trees for rendering.
//!
//! Invariants
//! - A tree is grown at most once; see [`SeqError::AlreadyGrown`].
//! - Every rule application removes exactly one connective, so the depth of a grown tree
//!   never exceeds the connective count of its root.
use log::{debug, trace};
use seqformal::sequent::{RuleTag, Sequent};
use serde::{Deserialize, Serialize};
use strum::EnumIs;

use crate::decomposer::{Decomposer, Decomposition};
use crate::utils::error::{SeqError, SeqResult};
use crate::witness::WitnessPool;

/// One way of deriving the root of a [`ProofTree`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, EnumIs)]
pub enum Branch {
    /// Terminal marker of an atomic sequent.
    Axiom,
    /// One or two child trees that must all be proved.
    Premises(Vec<ProofTree>),
}

impl Branch {
    pub fn children(&self) -> &[ProofTree] {
        match self {
            Branch::Axiom => &[],
            Branch::Premises(children) => children,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ProofTree {
    root: Sequent,
    branches: Vec<Branch>,
    grown: bool,
}

impl ProofTree {
    /// Ungrown tree rooted at `root`.
    pub fn new(root: Sequent) -> Self {
        Self {
            root,
            branches: Vec::new(),
            grown: false,
        }
    }

    /// Shorthand for [`ProofTree::new`] followed by [`ProofTree::grow`].
    pub fn grown(root: Sequent, decomposer: &Decomposer, pool: &WitnessPool) -> SeqResult<Self> {
        let mut tree = Self::new(root);
        tree.grow(decomposer, pool)?;
        Ok(tree)
    }

    /// Assemble a grown tree from already grown parts.
    pub(crate) fn from_branches(root: Sequent, branches: Vec<Branch>) -> Self {
        let grown = !branches.is_empty();
        Self {
            root,
            branches,
            grown,
        }
    }

    #[inline]
    pub fn root(&self) -> &Sequent {
        &self.root
    }

    #[inline]
    pub fn branches(&self) -> &[Branch] {
        &self.branches
    }

    #[inline]
    pub fn is_grown(&self) -> bool {
        self.grown
    }

    /// Rule label of the root sequent.
    #[inline]
    pub fn tag(&self) -> RuleTag {
        self.root.tag()
    }

    /// Decompose the root and every descendant until each leaf carries [`Branch::Axiom`].
    pub fn grow(&mut self, decomposer: &Decomposer, pool: &WitnessPool) -> SeqResult<()> {
        if self.grown {
            return Err(SeqError::AlreadyGrown {
                sequent: self.root.to_string(),
            });
        }

        debug!("Growing proof tree for `{}`", self.root);
        self.grow_from(decomposer, pool)?;
        debug!(
            "Grown `{}`: depth {}, {} leaves, {} alternative derivation(s)",
            self.root,
            self.depth(),
            self.leaf_count(),
            self.alternatives()
        );
        Ok(())
    }

    fn grow_from(&mut self, decomposer: &Decomposer, pool: &WitnessPool) -> SeqResult<()> {
        self.branches = match decomposer.decompose(&self.root, pool)? {
            Decomposition::Axiom => vec![Branch::Axiom],
            Decomposition::Step { alternatives, .. } => {
                let mut branches = Vec::with_capacity(alternatives.len());
                for alternative in alternatives {
                    let child_pool = match &alternative.witness {
                        Some(witness) => pool.descend(witness),
                        None => pool.clone(),
                    };

                    let mut children = Vec::with_capacity(alternative.premises.len());
                    for premise in alternative.premises {
                        let mut child = ProofTree::new(premise);
                        child.grow_from(decomposer, &child_pool)?;
                        children.push(child);
                    }
                    branches.push(Branch::Premises(children));
                }
                branches
            }
        };
        self.grown = true;
        Ok(())
    }

    /// Every AND-only tree obtained by picking one branch at every node.
    ///
    /// The order follows the branches: alternatives of the root vary slowest. An ungrown
    /// tree splits into itself.
    pub fn split(&self) -> Vec<ProofTree> {
        if !self.grown {
            return vec![self.clone()];
        }

        let mut out = Vec::new();
        for branch in &self.branches {
            match branch {
                Branch::Axiom => {
                    out.push(Self::from_branches(self.root.clone(), vec![Branch::Axiom]));
                }
                Branch::Premises(children) => {
                    // Cartesian product of the children's splits.
                    let mut combos: Vec<Vec<ProofTree>> = vec![Vec::new()];
                    for child in children {
                        let choices = child.split();
                        combos = combos
                            .into_iter()
                            .flat_map(|prefix| {
                                choices.iter().map(move |choice| {
                                    let mut next = prefix.clone();
                                    next.push(choice.clone());
                                    next
                                })
                            })
                            .collect();
                    }
                    out.extend(combos.into_iter().map(|combo| {
                        Self::from_branches(self.root.clone(), vec![Branch::Premises(combo)])
                    }));
                }
            }
        }
        trace!("Split `{}` into {} tree(s)", self.root, out.len());
        out
    }

    /// Number of trees [`ProofTree::split`] returns, without building them.
    ///
    /// Saturates at `usize::MAX`.
    pub fn alternatives(&self) -> usize {
        if !self.grown {
            return 1;
        }
        self.branches
            .iter()
            .map(|branch| match branch {
                Branch::Axiom => 1,
                Branch::Premises(children) => children
                    .iter()
                    .fold(1usize, |acc, c| acc.saturating_mul(c.alternatives())),
            })
            .fold(0usize, usize::saturating_add)
    }

    /// Number of rule applications on the longest path to a leaf.
    pub fn depth(&self) -> usize {
        self.branches
            .iter()
            .flat_map(Branch::children)
            .map(|child| 1 + child.depth())
            .max()
            .unwrap_or(0)
    }

    /// Number of leaves over every alternative. An ungrown tree is a single leaf.
    pub fn leaf_count(&self) -> usize {
        let inner: usize = self
            .branches
            .iter()
            .flat_map(Branch::children)
            .map(ProofTree::leaf_count)
            .sum();
        inner.max(1)
    }

    /// True when every node has at most one branch.
    pub fn is_and_only(&self) -> bool {
        self.branches.len() <= 1
            && self
                .branches
                .iter()
                .flat_map(Branch::children)
                .all(ProofTree::is_and_only)
    }

    /// True when some choice of alternatives ends every leaf on an identity sequent.
    pub fn is_closed(&self) -> bool {
        self.branches.iter().any(|branch| match branch {
            Branch::Axiom => self.root.is_identity(),
            Branch::Premises(children) => children.iter().all(ProofTree::is_closed),
        })
    }
}
