//! Parser for sequents and propositions using chumsky.
//!
//! Role
//! - Turn human-readable text into [`Sequent`] / [`Proposition`] values.
//! - Accepts everything the canonical display (see [`crate::pretty`]) produces.
//!
//! Two stages:
//! 1) Tokenisation from input string to a `Token` stream.
//! 2) Parsing the token slice with chumsky combinators.
//!
//! Accepted syntax:
//! - Sequent: `antecedent-list; consequent-list`, comma-separated, either list may be empty.
//! - Atoms: an identifier, optionally applied to terms: `A`, `P<x>`, `R<alice, y>`.
//! - Negation: `~P` or `not P` (also `¬`).
//! - Conjunction: `P & Q` or `P and Q` (also `∧`), left-associative.
//! - Disjunction: `P v Q` or `P or Q` (also `∨`), left-associative, looser than `&`.
//! - Conditional: `P -> Q` or `P implies Q` (also `→`), right-associative, loosest.
//! - Quantifiers: `∀x P`, `forallx P`, `forall x P` and dually `∃x`, `existsx`, `exists x`.
//!   Quantifiers are prefix operators binding as tightly as negation.
//! - Parentheses can wrap any proposition.
//! - Terms and quantified variables are identifiers other than the keywords above.
use std::ops::Range;

use chumsky::{input::ValueInput, prelude::*};
use thiserror::Error;

use crate::prop::{Atom, Proposition};
use crate::sequent::Sequent;

pub type Spanned<T> = (T, SimpleSpan);
type Span = SimpleSpan;

/// One problem found while parsing, located by a byte range of the source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub message: String,
    pub span: Range<usize>,
}

impl std::fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} at {}..{}", self.message, self.span.start, self.span.end)
    }
}

fn join_diagnostics(diagnostics: &[Diagnostic]) -> String {
    diagnostics
        .iter()
        .map(Diagnostic::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

/// The input cannot be segmented into antecedent, consequent and connectives.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("malformed input `{input}`: {}", join_diagnostics(.diagnostics))]
pub struct ParseError {
    pub input: String,
    pub diagnostics: Vec<Diagnostic>,
}

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Token {
    // Delimiters & punctuation
    LParen,
    RParen,
    LAngle,
    RAngle,
    Comma,
    Semicolon,

    // Operators
    Not,
    And,
    Or,
    Implies,

    // Quantifiers, either glued to their variable (`forallx`) or standalone (`∀`, `forall`)
    ForAll(String),
    Exists(String),
    ForAllKw,
    ExistsKw,

    Ident(String),
}

impl std::fmt::Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Token::LParen => write!(f, "("),
            Token::RParen => write!(f, ")"),
            Token::LAngle => write!(f, "<"),
            Token::RAngle => write!(f, ">"),
            Token::Comma => write!(f, ","),
            Token::Semicolon => write!(f, ";"),
            Token::Not => write!(f, "~"),
            Token::And => write!(f, "&"),
            Token::Or => write!(f, "v"),
            Token::Implies => write!(f, "->"),
            Token::ForAll(v) => write!(f, "∀{v}"),
            Token::Exists(v) => write!(f, "∃{v}"),
            Token::ForAllKw => write!(f, "∀"),
            Token::ExistsKw => write!(f, "∃"),
            Token::Ident(s) => write!(f, "{s}"),
        }
    }
}

// ---------------- Lexer ----------------

fn is_identifier(s: &str) -> bool {
    let mut chars = s.chars();
    matches!(chars.next(), Some(c) if c.is_ascii_alphabetic() || c == '_')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

/// Whether `s` reads back as a single term: an identifier that is not a keyword
/// (`and`, `or`, `v`, `implies`, `not`, `forall`, `exists`) nor a glued quantifier
/// such as `forallx`.
///
/// ```
/// use seqformal::parser::is_term;
///
/// assert!(is_term("alice"));
/// assert!(is_term("y_1"));
/// assert!(!is_term("or"));
/// assert!(!is_term("existsz"));
/// assert!(!is_term("a-b"));
/// ```
pub fn is_term(s: &str) -> bool {
    is_identifier(s) && matches!(classify_word(s), Token::Ident(_))
}

fn classify_word(s: &str) -> Token {
    match s {
        "and" => Token::And,
        "or" | "v" => Token::Or,
        "implies" => Token::Implies,
        "not" => Token::Not,
        "forall" => Token::ForAllKw,
        "exists" => Token::ExistsKw,
        _ => {
            if let Some(variable) = s.strip_prefix("forall").filter(|v| is_term(v)) {
                Token::ForAll(variable.to_string())
            } else if let Some(variable) = s.strip_prefix("exists").filter(|v| is_term(v)) {
                Token::Exists(variable.to_string())
            } else {
                Token::Ident(s.to_string())
            }
        }
    }
}

fn lexer<'a>() -> impl Parser<'a, &'a str, Vec<Spanned<Token>>, extra::Err<Rich<'a, char>>> {
    let implies = choice((just("->"), just("→"))).to(Token::Implies);

    let word = any()
        .filter(|c: &char| c.is_ascii_alphabetic() || *c == '_')
        .then(
            any()
                .filter(|c: &char| c.is_ascii_alphanumeric() || *c == '_')
                .repeated(),
        )
        .to_slice()
        .map(classify_word);

    let punct = choice((
        just('(').to(Token::LParen),
        just(')').to(Token::RParen),
        just('<').to(Token::LAngle),
        just('>').to(Token::RAngle),
        just(',').to(Token::Comma),
        just(';').to(Token::Semicolon),
        just('~').to(Token::Not),
        just('¬').to(Token::Not),
        just('&').to(Token::And),
        just('∧').to(Token::And),
        just('∨').to(Token::Or),
        just('∀').to(Token::ForAllKw),
        just('∃').to(Token::ExistsKw),
    ));

    // Operators (longest first)
    let token = choice((implies, word, punct));

    token
        .map_with(|tok, e| (tok, e.span()))
        .padded()
        .repeated()
        .collect()
        .padded()
        .then_ignore(end())
}

// ---------------- chumsky parser over tokens ----------------

fn proposition_parser<'tokens, I>()
-> impl Parser<'tokens, I, Proposition, extra::Err<Rich<'tokens, Token, Span>>> + Clone
where
    I: ValueInput<'tokens, Token = Token, Span = Span>,
{
    recursive(|prop| {
        let ident = select! { Token::Ident(s) => s }.labelled("identifier");

        // Keywords such as `v` or `and` are never terms
        let term = select! { Token::Ident(s) => s }.labelled("term");

        let terms = term
            .separated_by(just(Token::Comma))
            .at_least(1)
            .collect::<Vec<_>>()
            .delimited_by(just(Token::LAngle), just(Token::RAngle))
            .labelled("term list");

        let atom = ident
            .clone()
            .then(terms.or_not())
            .map(|(predicate, terms)| {
                Proposition::Atom(Atom {
                    predicate,
                    terms: terms.unwrap_or_default(),
                })
            })
            .labelled("atom");

        let paren_prop = prop
            .delimited_by(just(Token::LParen), just(Token::RParen))
            .labelled("parentheses");

        let primary = atom.or(paren_prop);

        #[derive(Clone)]
        enum Prefix {
            Not,
            ForAll(String),
            Exists(String),
        }
        let prefix = choice((
            just(Token::Not).to(Prefix::Not),
            select! {
                Token::ForAll(v) => Prefix::ForAll(v),
                Token::Exists(v) => Prefix::Exists(v),
            },
            just(Token::ForAllKw)
                .ignore_then(ident.clone())
                .map(Prefix::ForAll),
            just(Token::ExistsKw)
                .ignore_then(ident)
                .map(Prefix::Exists),
        ))
        .labelled("prefix operator");

        let unary = prefix
            .repeated()
            .foldr(primary, |prefix, inner| match prefix {
                Prefix::Not => Proposition::Negation(Box::new(inner)),
                Prefix::ForAll(v) => Proposition::Universal(v, Box::new(inner)),
                Prefix::Exists(v) => Proposition::Existential(v, Box::new(inner)),
            });

        let conjunction = unary
            .clone()
            .foldl(just(Token::And).ignore_then(unary).repeated(), |a, b| {
                Proposition::Conjunction(Box::new(a), Box::new(b))
            })
            .labelled("conjunction");

        let disjunction = conjunction
            .clone()
            .foldl(just(Token::Or).ignore_then(conjunction).repeated(), |a, b| {
                Proposition::Disjunction(Box::new(a), Box::new(b))
            })
            .labelled("disjunction");

        // Conditional is right-assoc
        recursive(|cond| {
            disjunction
                .clone()
                .then(just(Token::Implies).ignore_then(cond).or_not())
                .map(|(a, b)| match b {
                    Some(b) => Proposition::Conditional(Box::new(a), Box::new(b)),
                    None => a,
                })
                .labelled("conditional")
        })
    })
}

fn sequent_parser<'tokens, I>()
-> impl Parser<'tokens, I, Sequent, extra::Err<Rich<'tokens, Token, Span>>> + Clone
where
    I: ValueInput<'tokens, Token = Token, Span = Span>,
{
    let list = proposition_parser()
        .separated_by(just(Token::Comma))
        .collect::<Vec<_>>();

    list.clone()
        .then_ignore(just(Token::Semicolon).labelled("`;` between antecedent and consequent"))
        .then(list)
        .map(|(antecedent, consequent)| Sequent::new(antecedent, consequent))
}

// ---------------- Public API ----------------

fn lex(src: &str) -> Result<Vec<Spanned<Token>>, ParseError> {
    let (tokens, lex_errs) = lexer().parse(src).into_output_errors();
    let diagnostics: Vec<Diagnostic> = lex_errs
        .into_iter()
        .map(|e| Diagnostic {
            message: format!("lexing error: {e}"),
            span: e.span().start..e.span().end,
        })
        .collect();

    match tokens {
        Some(tokens) if diagnostics.is_empty() => Ok(tokens),
        _ => Err(ParseError {
            input: src.to_string(),
            diagnostics,
        }),
    }
}

/// Map a span over the token slice back to a byte range of the source.
fn token_span_to_source(src: &str, tokens: &[Spanned<Token>], span: Range<usize>) -> Range<usize> {
    let start = tokens
        .get(span.start)
        .map(|(_, s)| s.start)
        .unwrap_or(src.len());
    let end = span
        .end
        .checked_sub(1)
        .and_then(|last| tokens.get(last))
        .map(|(_, s)| s.end)
        .unwrap_or(src.len())
        .max(start);
    start..end
}

fn finish<T>(
    src: &str,
    tokens: &[Spanned<Token>],
    output: Option<T>,
    errors: Vec<Rich<'_, Token, Span>>,
) -> Result<T, ParseError> {
    let diagnostics: Vec<Diagnostic> = errors
        .into_iter()
        .map(|e| Diagnostic {
            message: format!("parse error: {e}"),
            span: token_span_to_source(src, tokens, e.span().start..e.span().end),
        })
        .collect();

    match output {
        Some(out) if diagnostics.is_empty() => Ok(out),
        _ => Err(ParseError {
            input: src.to_string(),
            diagnostics,
        }),
    }
}

/// Parse a sequent written as `antecedent-list; consequent-list`.
///
/// Returns a [`ParseError`] with human-readable diagnostics when the input cannot be
/// segmented.
///
/// Example
/// ```
/// use seqformal::parser::parse_sequent;
/// let s = parse_sequent("A & B, forallx P<x>; C -> D").unwrap();
/// assert_eq!(s.to_string(), "A & B, ∀x P<x>; C -> D");
/// assert!(parse_sequent("A & ; B").is_err());
/// ```
pub fn parse_sequent(src: &str) -> Result<Sequent, ParseError> {
    let tokens = lex(src)?;
    let plain: Vec<Token> = tokens.iter().map(|(t, _s)| t.clone()).collect();
    let (output, errors) = sequent_parser()
        .then_ignore(end())
        .parse(plain.as_slice())
        .into_output_errors();
    finish(src, &tokens, output, errors)
}

/// Parse a single proposition.
///
/// Example
/// ```
/// use seqformal::parser::parse_proposition;
/// let p = parse_proposition("not A or B implies C").unwrap();
/// assert_eq!(p.to_string(), "(~A v B) -> C");
/// ```
pub fn parse_proposition(src: &str) -> Result<Proposition, ParseError> {
    let tokens = lex(src)?;
    let plain: Vec<Token> = tokens.iter().map(|(t, _s)| t.clone()).collect();
    let (output, errors) = proposition_parser()
        .then_ignore(end())
        .parse(plain.as_slice())
        .into_output_errors();
    finish(src, &tokens, output, errors)
}

impl std::str::FromStr for Sequent {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_sequent(s)
    }
}

impl std::str::FromStr for Proposition {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_proposition(s)
    }
}
