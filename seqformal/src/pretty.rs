//! RcDoc-based pretty-printer with termcolor annotations for propositions and sequents.
//!
//! Role
//! - Convert a [`Proposition`] or [`Sequent`] into an annotated document.
//! - Provide colored output for terminals (TTY-aware) and plain strings for logs/tests.
//! - Back the [`Display`](std::fmt::Display) impls, which produce the canonical display string.
//!
//! The canonical form re-parses with [`crate::parser`]: binary sub-formulas are always
//! parenthesized, the top-level formula never is, and the documents contain no breakable
//! lines so the output does not depend on the rendering width.

use std::io::{self, Write};

use pretty::{FmtWrite, RcDoc, RenderAnnotated};
use termcolor::{Color, ColorChoice, ColorSpec, StandardStream, WriteColor};

use crate::prop::{Atom, Proposition};
use crate::sequent::Sequent;

/// Styles used to annotate parts of the pretty-printed document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Style {
    Punct, // commas, semicolon, angle brackets
    /// Parentheses are colored by nesting depth so matching pairs share a color.
    Paren(u8),
    Quantifier, // ∀x, ∃x
    Operator,   // ~, &, v, ->
    Predicate,  // P, Q, A
    Term,       // individual names and variables
}

impl Style {
    fn to_color_spec(self) -> ColorSpec {
        let mut s = ColorSpec::new();
        match self {
            Style::Punct => {
                s.set_dimmed(true);
            }
            Style::Paren(depth) => {
                let fg = match depth % 6 {
                    0 => Color::Blue,
                    1 => Color::Green,
                    2 => Color::White,
                    3 => Color::Yellow,
                    4 => Color::Red,
                    5 => Color::Magenta,
                    _ => unreachable!(),
                };
                s.set_fg(Some(fg)).set_dimmed(true);
            }
            Style::Quantifier => {
                s.set_fg(Some(Color::Cyan)).set_bold(true);
            }
            Style::Operator => {
                s.set_fg(Some(Color::Yellow)).set_bold(true);
            }
            Style::Predicate => {
                s.set_fg(Some(Color::Green)).set_bold(true);
            }
            Style::Term => {
                s.set_fg(Some(Color::Magenta));
            }
        }
        s
    }
}

fn punct(s: &'static str) -> RcDoc<'static, Style> {
    RcDoc::as_string(s).annotate(Style::Punct)
}

fn op(s: &'static str) -> RcDoc<'static, Style> {
    RcDoc::as_string(s).annotate(Style::Operator)
}

#[inline]
fn lparen(depth: u8) -> RcDoc<'static, Style> {
    RcDoc::as_string("(").annotate(Style::Paren(depth))
}

#[inline]
fn rparen(depth: u8) -> RcDoc<'static, Style> {
    RcDoc::as_string(")").annotate(Style::Paren(depth))
}

fn atom_doc(atom: &Atom) -> RcDoc<'static, Style> {
    let head = RcDoc::as_string(atom.predicate.clone()).annotate(Style::Predicate);
    if atom.terms.is_empty() {
        return head;
    }

    let terms = RcDoc::intersperse(
        atom.terms
            .iter()
            .map(|t| RcDoc::as_string(t.clone()).annotate(Style::Term)),
        punct(", "),
    );
    head.append(punct("<")).append(terms).append(punct(">"))
}

#[inline]
fn is_binary(p: &Proposition) -> bool {
    matches!(
        p,
        Proposition::Conjunction(..) | Proposition::Disjunction(..) | Proposition::Conditional(..)
    )
}

/// Sub-formula of a connective: binary children are wrapped in parentheses.
fn child_doc(p: &Proposition, depth: u8) -> RcDoc<'static, Style> {
    if is_binary(p) {
        lparen(depth)
            .append(to_doc_with_depth(p, depth.wrapping_add(1)))
            .append(rparen(depth))
    } else {
        to_doc_with_depth(p, depth)
    }
}

fn binary_doc(
    lhs: &Proposition,
    symbol: &'static str,
    rhs: &Proposition,
    depth: u8,
) -> RcDoc<'static, Style> {
    child_doc(lhs, depth)
        .append(RcDoc::space())
        .append(op(symbol))
        .append(RcDoc::space())
        .append(child_doc(rhs, depth))
}

fn quantifier_doc(
    symbol: &'static str,
    variable: &str,
    inner: &Proposition,
    depth: u8,
) -> RcDoc<'static, Style> {
    RcDoc::as_string(format!("{symbol}{variable}"))
        .annotate(Style::Quantifier)
        .append(RcDoc::space())
        .append(child_doc(inner, depth))
}

/// Depth-aware variant that colors parentheses by nesting level.
fn to_doc_with_depth(p: &Proposition, depth: u8) -> RcDoc<'static, Style> {
    match p {
        Proposition::Atom(atom) => atom_doc(atom),
        Proposition::Negation(inner) => op("~").append(child_doc(inner, depth)),
        Proposition::Conjunction(lhs, rhs) => binary_doc(lhs, "&", rhs, depth),
        Proposition::Disjunction(lhs, rhs) => binary_doc(lhs, "v", rhs, depth),
        Proposition::Conditional(lhs, rhs) => binary_doc(lhs, "->", rhs, depth),
        Proposition::Universal(variable, inner) => quantifier_doc("∀", variable, inner, depth),
        Proposition::Existential(variable, inner) => quantifier_doc("∃", variable, inner, depth),
    }
}

fn side_doc(props: &[Proposition]) -> RcDoc<'static, Style> {
    RcDoc::intersperse(props.iter().map(|p| to_doc_with_depth(p, 0)), punct(", "))
}

fn sequent_doc(s: &Sequent) -> RcDoc<'static, Style> {
    side_doc(&s.antecedent)
        .append(punct(";"))
        .append(RcDoc::space())
        .append(side_doc(&s.consequent))
}

// A writer that maps Style annotations to termcolor ColorSpec on a WriteColor sink.
struct ColorWriter<'w, W: WriteColor + Write> {
    out: &'w mut W,
}

impl<'a, 'w, W: WriteColor + Write> RenderAnnotated<'a, Style> for ColorWriter<'w, W> {
    fn push_annotation(&mut self, ann: &'a Style) -> io::Result<()> {
        self.out.set_color(&ann.to_color_spec())
    }
    fn pop_annotation(&mut self) -> io::Result<()> {
        self.out.reset()
    }
}

impl<'w, W: WriteColor + Write> pretty::Render for ColorWriter<'w, W> {
    type Error = io::Error;
    fn write_str(&mut self, s: &str) -> io::Result<usize> {
        self.out.write_all(s.as_bytes())?;
        Ok(s.len())
    }
    fn write_str_all(&mut self, s: &str) -> io::Result<()> {
        self.out.write_all(s.as_bytes())
    }
    fn fail_doc(&self) -> Self::Error {
        io::Error::other("render failed")
    }
}

/// Render a document to a `termcolor::WriteColor` with width-aware layout.
pub fn render_to<W: WriteColor + Write>(
    doc: &RcDoc<'_, Style>,
    width: usize,
    out: &mut W,
) -> io::Result<()> {
    let mut cw = ColorWriter { out };
    doc.render_raw(width, &mut cw)
}

/// Print a document to stdout with colors if supported.
pub fn print_colored(doc: &RcDoc<'_, Style>) -> io::Result<()> {
    let stdout = StandardStream::stdout(ColorChoice::Auto);
    let mut stdout = stdout.lock();
    render_to(doc, terminal_width(), &mut stdout)
}

/// Retrieve the width of the terminal, or 80 if it cannot be determined.
pub fn terminal_width() -> usize {
    term_size::dimensions().map(|(w, _)| w).unwrap_or(80)
}

/// Pretty-printing conveniences for propositions and sequents.
pub trait PrettyFormal {
    /// Build an RcDoc representation with style annotations.
    fn pretty_doc(&self) -> RcDoc<'static, Style>;

    /// Render with colors to any termcolor writer at the given width.
    fn pretty_render_to<W: WriteColor + Write>(&self, width: usize, out: &mut W) -> io::Result<()> {
        render_to(&self.pretty_doc(), width, out)
    }

    /// Print to stdout with colors (TTY-aware).
    fn pretty_print(&self) -> io::Result<()> {
        print_colored(&self.pretty_doc())
    }

    /// Format into a plain string (no colors).
    fn pretty_string(&self) -> String {
        let mut buf = String::new();
        let _ = self.pretty_doc().render_fmt(80, &mut buf);
        buf
    }
}

impl PrettyFormal for Proposition {
    #[inline]
    fn pretty_doc(&self) -> RcDoc<'static, Style> {
        to_doc_with_depth(self, 0)
    }
}

impl PrettyFormal for Sequent {
    #[inline]
    fn pretty_doc(&self) -> RcDoc<'static, Style> {
        sequent_doc(self)
    }
}

impl std::fmt::Display for Proposition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut w = FmtWrite::new(f);
        self.pretty_doc().render_raw(80, &mut w)
    }
}

impl std::fmt::Display for Sequent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut w = FmtWrite::new(f);
        self.pretty_doc().render_raw(80, &mut w)
    }
}

impl std::fmt::Display for Atom {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut w = FmtWrite::new(f);
        atom_doc(self).render_raw(80, &mut w)
    }
}
