//! Requirement flags: the closed set of PDDL 3.1 capability switches.

use std::fmt;

use serde::{Deserialize, Serialize};

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub enum Requirement {
    Strips,
    Typing,
    NegativePreconditions,
    DisjunctivePreconditions,
    Equality,
    ExistentialPreconditions,
    UniversalPreconditions,
    QuantifiedPreconditions,
    ConditionalEffects,
    Adl,
    DerivedPredicates,
    NonDeterministic,
}

impl Requirement {
    /// All flags, in declaration order.
    pub const ALL: [Requirement; 12] = [
        Requirement::Strips,
        Requirement::Typing,
        Requirement::NegativePreconditions,
        Requirement::DisjunctivePreconditions,
        Requirement::Equality,
        Requirement::ExistentialPreconditions,
        Requirement::UniversalPreconditions,
        Requirement::QuantifiedPreconditions,
        Requirement::ConditionalEffects,
        Requirement::Adl,
        Requirement::DerivedPredicates,
        Requirement::NonDeterministic,
    ];

    /// The surface form, including the leading colon.
    pub fn as_str(&self) -> &'static str {
        match self {
            Requirement::Strips => ":strips",
            Requirement::Typing => ":typing",
            Requirement::NegativePreconditions => ":negative-preconditions",
            Requirement::DisjunctivePreconditions => ":disjunctive-preconditions",
            Requirement::Equality => ":equality",
            Requirement::ExistentialPreconditions => ":existential-preconditions",
            Requirement::UniversalPreconditions => ":universal-preconditions",
            Requirement::QuantifiedPreconditions => ":quantified-preconditions",
            Requirement::ConditionalEffects => ":conditional-effects",
            Requirement::Adl => ":adl",
            Requirement::DerivedPredicates => ":derived-predicates",
            Requirement::NonDeterministic => ":non-deterministic",
        }
    }

    /// Parse a flag name, with or without the leading colon,
    /// case-insensitively. Returns `None` for unknown flags.
    pub fn from_flag(flag: &str) -> Option<Requirement> {
        let lower = flag.to_lowercase();
        let bare = lower.strip_prefix(':').unwrap_or(&lower);
        Requirement::ALL
            .into_iter()
            .find(|r| &r.as_str()[1..] == bare)
    }
}

impl fmt::Display for Requirement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Requirement {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Requirement::from_flag(s).ok_or_else(|| format!("unknown requirement flag '{}'", s))
    }
}
