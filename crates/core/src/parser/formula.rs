//! Recursive-descent formula parsing: connectives, quantifiers, equality,
//! and atomic applications. Operator words match case-insensitively.

use super::Parser;
use crate::ast::Predicate;
use crate::error::SyntaxError;
use crate::formula::Formula;
use crate::lexer::Token;
use crate::term::{Constant, Term, Variable};

impl<'a> Parser<'a> {
    pub(super) fn parse_formula(&mut self) -> Result<Formula, SyntaxError> {
        self.expect_lparen()?;
        match self.peek().clone() {
            Token::Word(w) => match w.to_lowercase().as_str() {
                "and" => {
                    self.advance();
                    let ops = self.parse_operands()?;
                    Ok(Formula::and(ops))
                }
                "or" => {
                    self.advance();
                    let ops = self.parse_operands()?;
                    Ok(Formula::or(ops))
                }
                "not" => {
                    self.advance();
                    let inner = self.parse_formula()?;
                    self.expect_rparen()?;
                    Ok(Formula::not(inner))
                }
                "imply" => {
                    self.advance();
                    let antecedent = self.parse_formula()?;
                    let consequent = self.parse_formula()?;
                    self.expect_rparen()?;
                    Ok(Formula::imply(antecedent, consequent))
                }
                "forall" | "exists" => {
                    let exists = w.eq_ignore_ascii_case("exists");
                    self.advance();
                    self.expect_lparen()?;
                    let variables = self.parse_typed_variables()?;
                    self.expect_rparen()?;
                    let body = self.parse_formula()?;
                    self.expect_rparen()?;
                    Ok(if exists {
                        Formula::exists(variables, body)
                    } else {
                        Formula::forall(variables, body)
                    })
                }
                "=" => {
                    self.advance();
                    let left = self.parse_term()?;
                    let right = self.parse_term()?;
                    self.expect_rparen()?;
                    Ok(Formula::EqualTo(left, right))
                }
                _ => {
                    self.advance();
                    let mut terms = Vec::new();
                    while self.peek() != &Token::RParen {
                        terms.push(self.parse_term()?);
                    }
                    self.expect_rparen()?;
                    Ok(Formula::Atomic(Predicate::new(w, terms)))
                }
            },
            other => Err(self.err(format!("expected formula, got {:?}", other))),
        }
    }

    fn parse_operands(&mut self) -> Result<Vec<Formula>, SyntaxError> {
        let mut ops = Vec::new();
        while self.peek() != &Token::RParen {
            ops.push(self.parse_formula()?);
        }
        self.expect_rparen()?;
        Ok(ops)
    }

    /// A term in an application position: `?x` or a bare constant name.
    fn parse_term(&mut self) -> Result<Term, SyntaxError> {
        match self.peek().clone() {
            Token::Variable(n) => {
                self.advance();
                Ok(Term::Variable(Variable::new(n)))
            }
            Token::Word(w) if w != "-" && w != "=" => {
                self.advance();
                Ok(Term::Constant(Constant::new(w)))
            }
            other => Err(self.err(format!("expected term, got {:?}", other))),
        }
    }
}
