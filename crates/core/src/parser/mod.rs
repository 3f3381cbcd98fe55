//! Grammar parser: a single top-down pass over the token stream.
//!
//! The grammar is keyword-prefixed at every section boundary, so no
//! backtracking is needed. Each entry point parses exactly one top-level
//! document and rejects trailing content, then hands the assembled parts
//! to the aggregate smart constructors so validation runs exactly as in
//! the programmatic path.

use crate::ast::{Domain, Problem};
use crate::error::{PddlError, SyntaxError};
use crate::lexer::{self, Spanned, Token};

mod domain;
mod formula;
mod problem;
mod terms;

/// Parse one domain document. Errors carry positions against the
/// placeholder filename `<input>`; use [`parse_domain_named`] to report
/// against a real path.
pub fn parse_domain(text: &str) -> Result<Domain, PddlError> {
    parse_domain_named(text, "<input>")
}

pub fn parse_domain_named(text: &str, filename: &str) -> Result<Domain, PddlError> {
    let tokens = lexer::lex(text, filename)?;
    Parser::new(&tokens, filename).parse_domain_document()
}

/// Parse one problem document.
pub fn parse_problem(text: &str) -> Result<Problem, PddlError> {
    parse_problem_named(text, "<input>")
}

pub fn parse_problem_named(text: &str, filename: &str) -> Result<Problem, PddlError> {
    let tokens = lexer::lex(text, filename)?;
    Parser::new(&tokens, filename).parse_problem_document()
}

// ──────────────────────────────────────────────
// Parser
// ──────────────────────────────────────────────

pub(super) struct Parser<'a> {
    tokens: &'a [Spanned],
    pos: usize,
    filename: String,
}

impl<'a> Parser<'a> {
    fn new(tokens: &'a [Spanned], filename: &str) -> Self {
        Parser {
            tokens,
            pos: 0,
            filename: filename.to_owned(),
        }
    }

    fn cur(&self) -> &Spanned {
        &self.tokens[self.pos.min(self.tokens.len() - 1)]
    }

    pub(super) fn peek(&self) -> &Token {
        &self.cur().token
    }

    pub(super) fn advance(&mut self) -> &Spanned {
        let t = &self.tokens[self.pos.min(self.tokens.len() - 1)];
        if self.pos < self.tokens.len() - 1 {
            self.pos += 1;
        }
        t
    }

    pub(super) fn err(&self, msg: impl Into<String>) -> SyntaxError {
        let s = self.cur();
        SyntaxError::new(&self.filename, s.line, s.column, msg)
    }

    pub(super) fn expect_lparen(&mut self) -> Result<(), SyntaxError> {
        if self.peek() == &Token::LParen {
            self.advance();
            Ok(())
        } else {
            Err(self.err(format!("expected '(', got {:?}", self.peek())))
        }
    }

    pub(super) fn expect_rparen(&mut self) -> Result<(), SyntaxError> {
        if self.peek() == &Token::RParen {
            self.advance();
            Ok(())
        } else {
            Err(self.err(format!("expected ')', got {:?}", self.peek())))
        }
    }

    /// Expect a bare word, compared case-insensitively.
    pub(super) fn expect_word(&mut self, expected: &str) -> Result<(), SyntaxError> {
        if let Token::Word(w) = self.peek() {
            if w.eq_ignore_ascii_case(expected) {
                self.advance();
                return Ok(());
            }
        }
        Err(self.err(format!("expected '{}', got {:?}", expected, self.peek())))
    }

    /// Take a bare name. `-` and `=` lex as words but are never names.
    pub(super) fn take_name(&mut self) -> Result<String, SyntaxError> {
        if let Token::Word(w) = self.peek().clone() {
            if w != "-" && w != "=" {
                self.advance();
                return Ok(w);
            }
        }
        Err(self.err(format!("expected name, got {:?}", self.peek())))
    }

    pub(super) fn expect_eof(&mut self) -> Result<(), SyntaxError> {
        if self.peek() == &Token::Eof {
            Ok(())
        } else {
            Err(self.err(format!(
                "trailing content after document: {:?}",
                self.peek()
            )))
        }
    }

    /// Shared prefix of both document kinds:
    /// `( define ( <kind> NAME )` -- returns NAME.
    pub(super) fn parse_define_header(&mut self, kind: &str) -> Result<String, SyntaxError> {
        self.expect_lparen()?;
        self.expect_word("define")?;
        self.expect_lparen()?;
        self.expect_word(kind)?;
        let name = self.take_name()?;
        self.expect_rparen()?;
        Ok(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trailing_content_is_rejected() {
        let err = parse_domain("(define (domain d)) extra").unwrap_err();
        let PddlError::Syntax(e) = err else {
            panic!("expected syntax error");
        };
        assert!(e.message.contains("trailing content"), "{}", e.message);
    }

    #[test]
    fn syntax_errors_carry_named_file_and_position() {
        let err = parse_domain_named("(define (domain d) ]", "dom.pddl").unwrap_err();
        let PddlError::Syntax(e) = err else {
            panic!("expected syntax error");
        };
        assert_eq!(e.file, "dom.pddl");
        assert_eq!((e.line, e.column), (1, 20));
    }

    #[test]
    fn define_keyword_is_case_insensitive() {
        assert!(parse_domain("(DEFINE (Domain d))").is_ok());
    }

    #[test]
    fn missing_define_is_a_positioned_error() {
        let err = parse_domain("(domian (domain d))").unwrap_err();
        let PddlError::Syntax(e) = err else {
            panic!("expected syntax error");
        };
        assert!(e.message.contains("expected 'define'"));
    }
}
