//! Problem document parsing:
//! `(define (problem n) (:domain n) <section>*)`.

use super::Parser;
use crate::ast::{Predicate, Problem};
use crate::error::{PddlError, SyntaxError};
use crate::formula::Formula;
use crate::lexer::Token;
use crate::requirements::Requirement;
use crate::term::{Constant, Term};

const OPERATOR_WORDS: [&str; 7] = ["and", "or", "not", "imply", "forall", "exists", "="];

impl<'a> Parser<'a> {
    pub(super) fn parse_problem_document(&mut self) -> Result<Problem, PddlError> {
        let name = self.parse_define_header("problem")?;

        let mut domain_name: Option<String> = None;
        let mut requirements: Vec<Requirement> = Vec::new();
        let mut objects: Vec<Constant> = Vec::new();
        let mut init: Vec<Formula> = Vec::new();
        let mut goal: Option<Formula> = None;

        while self.peek() != &Token::RParen {
            self.expect_lparen()?;
            match self.peek().clone() {
                Token::Keyword(k) => match k.as_str() {
                    "domain" => {
                        self.advance();
                        domain_name = Some(self.take_name()?);
                        self.expect_rparen()?;
                    }
                    "requirements" => {
                        self.advance();
                        requirements.extend(self.parse_requirement_flags()?);
                    }
                    "objects" => {
                        self.advance();
                        objects.extend(self.parse_typed_constants()?);
                        self.expect_rparen()?;
                    }
                    "init" => {
                        self.advance();
                        while self.peek() == &Token::LParen {
                            init.push(self.parse_init_literal()?);
                        }
                        self.expect_rparen()?;
                    }
                    "goal" => {
                        self.advance();
                        goal = Some(self.parse_formula()?);
                        self.expect_rparen()?;
                    }
                    other => {
                        return Err(self
                            .err(format!("unknown problem section ':{}'", other))
                            .into())
                    }
                },
                other => {
                    return Err(self
                        .err(format!("expected section keyword, got {:?}", other))
                        .into())
                }
            }
        }
        let domain_name = domain_name
            .ok_or_else(|| self.err("missing ':domain' declaration in problem"))?;
        self.expect_rparen()?;
        self.expect_eof()?;

        Problem::try_new(
            name,
            domain_name,
            requirements,
            objects,
            init,
            goal.unwrap_or(Formula::True),
        )
    }

    /// One `:init` entry: a ground atom `(p a b)` or its negation
    /// `(not (p a b))`. Connectives, quantifiers, and variables are
    /// rejected here, unlike in goal formulas.
    fn parse_init_literal(&mut self) -> Result<Formula, SyntaxError> {
        self.expect_lparen()?;
        match self.peek().clone() {
            Token::Word(w) if w.eq_ignore_ascii_case("not") => {
                self.advance();
                self.expect_lparen()?;
                let atom = self.parse_ground_atom_body()?;
                self.expect_rparen()?;
                Ok(Formula::not(atom))
            }
            _ => self.parse_ground_atom_body(),
        }
    }

    /// An atom body after the opening paren: predicate name plus constant
    /// arguments, through the closing paren.
    fn parse_ground_atom_body(&mut self) -> Result<Formula, SyntaxError> {
        if let Token::Word(w) = self.peek() {
            let lower = w.to_lowercase();
            if OPERATOR_WORDS.contains(&lower.as_str()) {
                return Err(self.err(format!(
                    "':init' entries must be ground literals, got '{}'",
                    lower
                )));
            }
        }
        let name = self.take_name()?;
        let mut terms: Vec<Term> = Vec::new();
        while self.peek() != &Token::RParen {
            match self.peek().clone() {
                Token::Word(w) if w != "-" && w != "=" => {
                    self.advance();
                    terms.push(Term::Constant(Constant::new(w)));
                }
                Token::Variable(_) => {
                    return Err(self.err("':init' entries must be ground, got a variable"));
                }
                other => {
                    return Err(
                        self.err(format!("expected constant in ':init' literal, got {:?}", other))
                    )
                }
            }
        }
        self.expect_rparen()?;
        Ok(Formula::Atomic(Predicate::new(name, terms)))
    }
}

#[cfg(test)]
mod tests {
    use crate::error::PddlError;
    use crate::formula::Formula;
    use crate::parser::parse_problem;
    use crate::term::Constant;

    const BLOCKS_P1: &str = "
(define (problem blocks_p1)
    (:domain blocksworld)
    (:requirements :strips :typing)
    (:objects a b c - block)
    (:init (clear a) (on a b) (not (handempty)))
    (:goal (and (on b a)))
)";

    #[test]
    fn parses_a_full_problem() {
        let p = parse_problem(BLOCKS_P1).unwrap();
        assert_eq!(p.name(), "blocks_p1");
        assert_eq!(p.domain_name(), "blocksworld");
        assert_eq!(p.objects().len(), 3);
        assert!(p.objects().contains(&Constant::with_tag("c", "block")));
        assert_eq!(p.init().len(), 3);
        assert_ne!(p.goal(), &Formula::True);
    }

    #[test]
    fn missing_domain_declaration_is_rejected() {
        let err = parse_problem("(define (problem p) (:objects a))").unwrap_err();
        assert!(err.to_string().contains("missing ':domain'"));
    }

    #[test]
    fn goal_defaults_to_true() {
        let p = parse_problem("(define (problem p) (:domain d))").unwrap();
        assert_eq!(p.goal(), &Formula::True);
    }

    #[test]
    fn negated_init_literals_parse() {
        let p = parse_problem(
            "(define (problem p) (:domain d) (:init (not (wet floor))))",
        )
        .unwrap();
        let lit = p.init().iter().next().unwrap();
        assert_eq!(lit.to_string(), "(not (wet floor))");
    }

    #[test]
    fn init_rejects_connectives() {
        let err = parse_problem(
            "(define (problem p) (:domain d) (:init (and (a) (b))))",
        )
        .unwrap_err();
        assert!(err
            .to_string()
            .contains("':init' entries must be ground literals, got 'and'"));
    }

    #[test]
    fn init_rejects_variables() {
        let err = parse_problem(
            "(define (problem p) (:domain d) (:init (at ?v home)))",
        )
        .unwrap_err();
        assert!(err.to_string().contains("must be ground, got a variable"));
    }

    #[test]
    fn init_rejects_nested_negation() {
        let err = parse_problem(
            "(define (problem p) (:domain d) (:init (not (not (a)))))",
        )
        .unwrap_err();
        assert!(err.to_string().contains("ground literals"));
    }

    #[test]
    fn unknown_problem_section_is_rejected() {
        let err = parse_problem("(define (problem p) (:domain d) (:metric m))").unwrap_err();
        let PddlError::Syntax(e) = err else {
            panic!("expected syntax error");
        };
        assert!(e.message.contains("unknown problem section ':metric'"));
    }
}
