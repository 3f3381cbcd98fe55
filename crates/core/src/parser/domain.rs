//! Domain document parsing: `(define (domain n) <section>*)` with
//! keyword-dispatched sections.

use super::Parser;
use crate::ast::{Action, DerivedPredicate, Domain, Predicate};
use crate::error::{PddlError, SyntaxError};
use crate::formula::Formula;
use crate::lexer::Token;
use crate::requirements::Requirement;
use crate::term::{Constant, Term, Variable};
use crate::types::TypeHierarchy;

impl<'a> Parser<'a> {
    pub(super) fn parse_domain_document(&mut self) -> Result<Domain, PddlError> {
        let name = self.parse_define_header("domain")?;

        let mut requirements: Vec<Requirement> = Vec::new();
        let mut types = TypeHierarchy::default();
        let mut constants: Vec<Constant> = Vec::new();
        let mut predicates: Vec<Predicate> = Vec::new();
        let mut derived: Vec<DerivedPredicate> = Vec::new();
        let mut actions: Vec<Action> = Vec::new();

        while self.peek() != &Token::RParen {
            self.expect_lparen()?;
            match self.peek().clone() {
                Token::Keyword(k) => match k.as_str() {
                    "requirements" => {
                        self.advance();
                        requirements.extend(self.parse_requirement_flags()?);
                    }
                    "types" => {
                        self.advance();
                        types = self.parse_type_declarations()?;
                        self.expect_rparen()?;
                    }
                    "constants" => {
                        self.advance();
                        constants.extend(self.parse_typed_constants()?);
                        self.expect_rparen()?;
                    }
                    "predicates" => {
                        self.advance();
                        while self.peek() == &Token::LParen {
                            predicates.push(self.parse_predicate_signature()?);
                        }
                        self.expect_rparen()?;
                    }
                    "derived" => {
                        self.advance();
                        derived.push(self.parse_derived_predicate()?);
                    }
                    "action" => {
                        self.advance();
                        actions.push(self.parse_action()?);
                    }
                    other => {
                        return Err(self
                            .err(format!("unknown domain section ':{}'", other))
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
        self.expect_rparen()?;
        self.expect_eof()?;

        Domain::try_new(
            name,
            requirements,
            types,
            constants,
            predicates,
            derived,
            actions,
        )
    }

    /// `:requirements` body: keyword flags through the closing `)`.
    pub(super) fn parse_requirement_flags(&mut self) -> Result<Vec<Requirement>, SyntaxError> {
        let mut flags = Vec::new();
        loop {
            match self.peek().clone() {
                Token::Keyword(k) => {
                    let flag = Requirement::from_flag(&k)
                        .ok_or_else(|| self.err(format!("unknown requirement ':{}'", k)))?;
                    self.advance();
                    flags.push(flag);
                }
                Token::RParen => {
                    self.advance();
                    return Ok(flags);
                }
                other => {
                    return Err(self.err(format!("expected requirement flag, got {:?}", other)))
                }
            }
        }
    }

    /// One `(name ?x - t ...)` declaration inside `:predicates`, or the
    /// head of a `:derived` form.
    fn parse_predicate_signature(&mut self) -> Result<Predicate, SyntaxError> {
        self.expect_lparen()?;
        let name = self.take_name()?;
        let variables: Vec<Variable> = self.parse_typed_variables()?;
        self.expect_rparen()?;
        Ok(Predicate::new(name, variables.into_iter().map(Term::Variable)))
    }

    /// `(:derived (p ?x - t) <formula>)`, keyword already consumed.
    fn parse_derived_predicate(&mut self) -> Result<DerivedPredicate, SyntaxError> {
        let predicate = self.parse_predicate_signature()?;
        let condition = self.parse_formula()?;
        self.expect_rparen()?;
        Ok(DerivedPredicate::new(predicate, condition))
    }

    /// `(:action n :parameters (...) [:precondition f] [:effect f])`,
    /// keyword already consumed.
    fn parse_action(&mut self) -> Result<Action, SyntaxError> {
        let name = self.take_name()?;
        let mut parameters: Vec<Variable> = Vec::new();
        let mut precondition: Option<Formula> = None;
        let mut effect: Option<Formula> = None;

        while self.peek() != &Token::RParen {
            match self.peek().clone() {
                Token::Keyword(k) => match k.as_str() {
                    "parameters" => {
                        self.advance();
                        self.expect_lparen()?;
                        parameters = self.parse_typed_variables()?;
                        self.expect_rparen()?;
                    }
                    "precondition" => {
                        self.advance();
                        precondition = Some(self.parse_formula()?);
                    }
                    "effect" => {
                        self.advance();
                        effect = Some(self.parse_formula()?);
                    }
                    other => return Err(self.err(format!("unknown action field ':{}'", other))),
                },
                other => {
                    return Err(self.err(format!("expected action field keyword, got {:?}", other)))
                }
            }
        }
        self.expect_rparen()?;

        let mut action = Action::new(name, parameters);
        if let Some(f) = precondition {
            action = action.with_precondition(f);
        }
        if let Some(f) = effect {
            action = action.with_effect(f);
        }
        Ok(action)
    }
}
