//! Seqformal: propositions, sequents and their textual syntax.
//!
//! This crate provides the value types the seqtree proof engine works on:
//! - propositions (via [`prop`]): atoms, `~`, `&`, `v`, `->` and the `∀`/`∃` quantifiers;
//! - sequents (via [`sequent`]): ordered antecedent/consequent pairs with the removal,
//!   merge ("mix") and context-splitting operations proof search needs;
//! - a chumsky-based parser (via [`parser`]) and a pretty-printer (via [`pretty`]) whose
//!   canonical output parses back to the same value.
//!
//! All values are immutable and compared structurally; every operation returns a new value.
//!
//! Example
//! ```
//! use seqformal::prelude::*;
//!
//! let s = parse_sequent("A & B; forallx P<x>").unwrap();
//! assert_eq!(s.complexity(), 2);
//! assert!(!s.is_atomic());
//! assert_eq!(s.tag().to_string(), "L&");
//! assert_eq!(s.to_string(), "A & B; ∀x P<x>");
//! ```

/// Parser for sequents and propositions.
pub mod parser;
/// Pretty-printing and canonical display.
pub mod pretty;
/// Propositions: atoms, connectives and quantifiers.
pub mod prop;
/// Sequents and sides.
pub mod sequent;

pub mod prelude {
    //! Convenient re-exports for end users.
    pub use crate::parser::{ParseError, parse_proposition, parse_sequent};
    pub use crate::pretty::PrettyFormal;
    pub use crate::prop::{Atom, Connective, Proposition, func::*};
    pub use crate::sequent::{RuleTag, Sequent, Side};
}
