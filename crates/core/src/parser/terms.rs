//! Typed-list parsing, shared by `:types`, `:constants`, `:objects`,
//! predicate signatures, and parameter/quantifier bindings.
//!
//! A typed list is a run of items optionally followed by `- <type>`, where
//! `<type>` is a single name or `(either t1 t2)`. Items after the last
//! dash are untyped.

use std::collections::BTreeSet;

use super::Parser;
use crate::error::SyntaxError;
use crate::lexer::Token;
use crate::term::{Constant, Variable};
use crate::types::TypeHierarchy;

impl<'a> Parser<'a> {
    /// `- t` or `- (either t1 t2)`, the dash already consumed.
    fn parse_type_spec(&mut self) -> Result<BTreeSet<String>, SyntaxError> {
        if self.peek() == &Token::LParen {
            self.advance();
            self.expect_word("either")?;
            let mut tags = BTreeSet::new();
            while self.peek() != &Token::RParen {
                tags.insert(self.take_name()?);
            }
            self.expect_rparen()?;
            if tags.is_empty() {
                return Err(self.err("expected at least one type in 'either'"));
            }
            Ok(tags)
        } else {
            Ok([self.take_name()?].into())
        }
    }

    /// Constant list, stopping at (not consuming) the closing `)`.
    /// Declaration order is preserved for duplicate detection.
    pub(super) fn parse_typed_constants(&mut self) -> Result<Vec<Constant>, SyntaxError> {
        let mut out = Vec::new();
        let mut pending: Vec<String> = Vec::new();
        loop {
            match self.peek().clone() {
                Token::Word(w) if w == "-" => {
                    self.advance();
                    if pending.is_empty() {
                        return Err(self.err("type given without any names before '-'"));
                    }
                    let tags = self.parse_type_spec()?;
                    out.extend(
                        pending
                            .drain(..)
                            .map(|n| Constant::with_tags(n, tags.iter().cloned())),
                    );
                }
                Token::Word(_) => {
                    pending.push(self.take_name()?);
                }
                Token::RParen => {
                    out.extend(pending.drain(..).map(Constant::new));
                    return Ok(out);
                }
                other => {
                    return Err(self.err(format!("expected name in typed list, got {:?}", other)))
                }
            }
        }
    }

    /// Variable list, stopping at (not consuming) the closing `)`.
    pub(super) fn parse_typed_variables(&mut self) -> Result<Vec<Variable>, SyntaxError> {
        let mut out = Vec::new();
        let mut pending: Vec<String> = Vec::new();
        loop {
            match self.peek().clone() {
                Token::Word(w) if w == "-" => {
                    self.advance();
                    if pending.is_empty() {
                        return Err(self.err("type given without any variables before '-'"));
                    }
                    let tags = self.parse_type_spec()?;
                    out.extend(
                        pending
                            .drain(..)
                            .map(|n| Variable::with_tags(n, tags.iter().cloned())),
                    );
                }
                Token::Variable(_) => {
                    if let Token::Variable(n) = self.advance().token.clone() {
                        pending.push(n);
                    }
                }
                Token::RParen => {
                    out.extend(pending.drain(..).map(Variable::new));
                    return Ok(out);
                }
                other => {
                    return Err(
                        self.err(format!("expected variable in typed list, got {:?}", other))
                    )
                }
            }
        }
    }

    /// The `:types` section body: names with single-name parents only,
    /// stopping at (not consuming) the closing `)`.
    pub(super) fn parse_type_declarations(&mut self) -> Result<TypeHierarchy, SyntaxError> {
        let mut entries: Vec<(String, Option<String>)> = Vec::new();
        let mut pending: Vec<String> = Vec::new();
        loop {
            match self.peek().clone() {
                Token::Word(w) if w == "-" => {
                    self.advance();
                    if pending.is_empty() {
                        return Err(self.err("parent type given without any types before '-'"));
                    }
                    if self.peek() == &Token::LParen {
                        return Err(self.err("a type may have only a single parent"));
                    }
                    let parent = self.take_name()?;
                    entries.extend(pending.drain(..).map(|n| (n, Some(parent.clone()))));
                }
                Token::Word(_) => {
                    pending.push(self.take_name()?);
                }
                Token::RParen => {
                    entries.extend(pending.drain(..).map(|n| (n, None)));
                    return Ok(entries.into_iter().collect());
                }
                other => {
                    return Err(
                        self.err(format!("expected type name in ':types', got {:?}", other))
                    )
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::parser::parse_domain;
    use crate::term::Constant;

    #[test]
    fn constants_take_the_type_of_the_following_dash() {
        let d = parse_domain(
            "(define (domain d)
               (:requirements :typing)
               (:types block table)
               (:constants a b - block t - table u))",
        )
        .unwrap();
        let cs = d.constants();
        assert!(cs.contains(&Constant::with_tag("a", "block")));
        assert!(cs.contains(&Constant::with_tag("b", "block")));
        assert!(cs.contains(&Constant::with_tag("t", "table")));
        assert!(cs.contains(&Constant::new("u")));
    }

    #[test]
    fn either_gives_multiple_tags() {
        let d = parse_domain(
            "(define (domain d)
               (:requirements :typing)
               (:types t1 t2)
               (:constants a - (either t1 t2)))",
        )
        .unwrap();
        assert!(d
            .constants()
            .contains(&Constant::with_tags("a", ["t1", "t2"])));
    }

    #[test]
    fn empty_either_is_rejected() {
        let err = parse_domain(
            "(define (domain d)
               (:requirements :typing)
               (:constants a - (either)))",
        )
        .unwrap_err();
        assert!(err.to_string().contains("either"));
    }

    #[test]
    fn dangling_dash_is_rejected() {
        let err = parse_domain("(define (domain d) (:constants - t))").unwrap_err();
        assert!(err.to_string().contains("without any names"));
    }
}
