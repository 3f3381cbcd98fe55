use crate::error::SyntaxError;

#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    LParen,
    RParen,
    /// `:`-prefixed section/requirement keyword, stored lowercased
    /// (keywords are case-insensitive)
    Keyword(String),
    /// `?`-prefixed variable name (without the sigil)
    Variable(String),
    /// Bare name, operator word, `-`, or `=`
    Word(String),
    /// End of input
    Eof,
}

#[derive(Debug, Clone)]
pub struct Spanned {
    pub token: Token,
    pub line: u32,
    pub column: u32,
}

fn is_name_start(c: char) -> bool {
    c.is_alphabetic() || c == '_'
}

fn is_name_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_' || c == '-'
}

pub fn lex(src: &str, filename: &str) -> Result<Vec<Spanned>, SyntaxError> {
    let mut tokens = Vec::new();
    let chars: Vec<char> = src.chars().collect();
    let mut pos = 0usize;
    let mut line: u32 = 1;
    let mut column: u32 = 1;

    while pos < chars.len() {
        let c = chars[pos];

        // Line comment
        if c == ';' {
            while pos < chars.len() && chars[pos] != '\n' {
                pos += 1;
            }
            continue;
        }

        // Whitespace
        if c.is_whitespace() {
            if c == '\n' {
                line += 1;
                column = 1;
            } else {
                column += 1;
            }
            pos += 1;
            continue;
        }

        let tok_line = line;
        let tok_col = column;

        match c {
            '(' => {
                tokens.push(Spanned {
                    token: Token::LParen,
                    line: tok_line,
                    column: tok_col,
                });
                pos += 1;
                column += 1;
                continue;
            }
            ')' => {
                tokens.push(Spanned {
                    token: Token::RParen,
                    line: tok_line,
                    column: tok_col,
                });
                pos += 1;
                column += 1;
                continue;
            }
            '-' | '=' => {
                tokens.push(Spanned {
                    token: Token::Word(c.to_string()),
                    line: tok_line,
                    column: tok_col,
                });
                pos += 1;
                column += 1;
                continue;
            }
            ':' => {
                pos += 1;
                column += 1;
                let start = pos;
                while pos < chars.len() && is_name_char(chars[pos]) {
                    pos += 1;
                    column += 1;
                }
                if start == pos {
                    return Err(SyntaxError::new(
                        filename,
                        tok_line,
                        tok_col,
                        "expected keyword name after ':'",
                    ));
                }
                let word: String = chars[start..pos].iter().collect();
                tokens.push(Spanned {
                    token: Token::Keyword(word.to_lowercase()),
                    line: tok_line,
                    column: tok_col,
                });
                continue;
            }
            '?' => {
                pos += 1;
                column += 1;
                let start = pos;
                while pos < chars.len() && is_name_char(chars[pos]) {
                    pos += 1;
                    column += 1;
                }
                if start == pos {
                    return Err(SyntaxError::new(
                        filename,
                        tok_line,
                        tok_col,
                        "expected variable name after '?'",
                    ));
                }
                let word: String = chars[start..pos].iter().collect();
                tokens.push(Spanned {
                    token: Token::Variable(word),
                    line: tok_line,
                    column: tok_col,
                });
                continue;
            }
            _ => {}
        }

        // Bare name
        if is_name_start(c) {
            let start = pos;
            while pos < chars.len() && is_name_char(chars[pos]) {
                pos += 1;
                column += 1;
            }
            let word: String = chars[start..pos].iter().collect();
            tokens.push(Spanned {
                token: Token::Word(word),
                line: tok_line,
                column: tok_col,
            });
            continue;
        }

        return Err(SyntaxError::new(
            filename,
            tok_line,
            tok_col,
            format!("unexpected character '{}'", c),
        ));
    }

    tokens.push(Spanned {
        token: Token::Eof,
        line,
        column,
    });
    Ok(tokens)
}
