//! pddl-core: PDDL 3.1 parser, validator, and canonical renderer.
//!
//! Turns planning-domain text into a semantically-checked, strongly-typed
//! in-memory model and back into canonical text. Parsing is a pure
//! transformation: text in, validated entity or typed failure out, with
//! no I/O and no shared state between calls.
//!
//! # Public API
//!
//! Key types and entry points are re-exported at the crate root:
//!
//! - [`parse_domain()`] / [`parse_problem()`] -- text to validated entity
//! - [`render_domain()`] / [`render_problem()`] -- entity to canonical text
//! - [`Domain`] / [`Problem`] -- the immutable aggregates
//! - [`Formula`] -- the logical formula AST
//! - [`PddlError`] -- the library error type
//!
//! The aggregate smart constructors ([`Domain::try_new`],
//! [`Problem::try_new`]) run the same validation pipeline as the parser,
//! so programmatically built entities obey the same invariants.

/// PDDL language version this crate targets.
pub const PDDL_VERSION: &str = "3.1";

pub mod ast;
pub mod error;
pub mod formula;
pub mod lexer;
pub mod parser;
pub mod render;
pub mod requirements;
pub mod term;
pub mod types;
pub mod validate;

// ── Convenience re-exports: key types ────────────────────────────────

pub use ast::{Action, DerivedPredicate, Domain, Predicate, Problem};
pub use error::{PddlError, SyntaxError, ValidationError};
pub use formula::{Formula, Operands};
pub use requirements::Requirement;
pub use term::{constants, variables, Constant, Term, Variable};
pub use types::{TypeHierarchy, OBJECT_TYPE};

// ── Convenience re-exports: entry points ─────────────────────────────

pub use parser::{parse_domain, parse_domain_named, parse_problem, parse_problem_named};
pub use render::{render_domain, render_problem};
