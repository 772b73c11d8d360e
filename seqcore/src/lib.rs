//! Proof tree construction for a configurable sequent calculus.
//!
//! Given a [`RuleConfig`](rules::RuleConfig) choosing the additive or multiplicative
//! variant of every connective rule, a [`Decomposer`](decomposer::Decomposer) repeatedly
//! breaks down the leftmost complex proposition of a sequent, and a
//! [`ProofTree`](tree::ProofTree) records every alternative derivation until only atomic
//! sequents remain. Trees can be split into AND-only derivations, rendered as outlines and
//! stored as TOML or CBOR.
//!
//! ```
//! use seqcore::prelude::*;
//!
//! let decomposer = Decomposer::new(RuleConfig::uniform(Discipline::Multiplicative));
//! let root = parse_sequent("A & B; B").unwrap();
//! let tree = ProofTree::grown(root, &decomposer, &WitnessPool::empty()).unwrap();
//! assert_eq!(tree.depth(), 1);
//! assert!(tree.is_closed());
//! ```

pub mod batch;
pub mod decomposer;
pub mod magic;
pub mod render;
pub mod rules;
pub mod storage;
pub mod tree;
pub mod utils;
pub mod witness;

pub extern crate seqformal;

pub mod prelude {
    //! Convenient re-exports for end users.
    pub use crate::decomposer::{Alternative, Decomposer, Decomposition};
    pub use crate::rules::engine::{RuleOutcome, apply_rule};
    pub use crate::rules::{Discipline, RuleConfig};
    pub use crate::tree::{Branch, ProofTree};
    pub use crate::utils::error::{SeqError, SeqResult};
    pub use crate::witness::WitnessPool;
    pub use seqformal::prelude::*;
}
