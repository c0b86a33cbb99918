use std::fmt;

use crate::frontend::command::errors::CommandError;

/// 1-based column in the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Position {
    pub column: usize,
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "column {}", self.column)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    // identifiers & keywords
    Ident(String),

    // literals
    Int(i64),
    Float(f64),
    String(String),

    // punctuation
    Comma,
    Eq,

    EOF,
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::Ident(s) => write!(f, "'{s}'"),
            Token::Int(v) => write!(f, "{v}"),
            Token::Float(v) => write!(f, "{v}"),
            Token::String(s) => write!(f, "\"{s}\""),
            Token::Comma => write!(f, "','"),
            Token::Eq => write!(f, "'='"),
            Token::EOF => write!(f, "end of input"),
        }
    }
}

pub struct Tokenizer<'a> {
    chars: std::iter::Peekable<std::str::Chars<'a>>,
    column: usize,
}

impl<'a> Tokenizer<'a> {
    pub fn new(input: &'a str) -> Self {
        Self {
            chars: input.chars().peekable(),
            column: 1,
        }
    }

    /// Next token and the column it starts at.
    pub fn next_token(&mut self) -> Result<(Token, Position), CommandError> {
        self.skip_whitespace();
        let position = Position {
            column: self.column,
        };

        let c = match self.bump() {
            Some(c) => c,
            None => return Ok((Token::EOF, position)),
        };

        let token = match c {
            // ---------- punctuation ----------
            ',' => Token::Comma,
            '=' => Token::Eq,

            // ---------- string literal ----------
            '\'' | '"' => {
                let mut s = String::new();
                loop {
                    match self.bump() {
                        Some(ch) if ch == c => break,
                        Some(ch) => s.push(ch),
                        None => return Err(CommandError::UnterminatedString { position }),
                    }
                }
                Token::String(s)
            }

            // ---------- number ----------
            c if c.is_ascii_digit() || (c == '-' && self.peek_is(|ch| ch.is_ascii_digit())) => {
                let mut num = c.to_string();
                while let Some(&ch) = self.chars.peek() {
                    if ch.is_ascii_digit() || ch == '.' {
                        num.push(ch);
                        self.bump();
                    } else {
                        break;
                    }
                }
                number(&num, position)?
            }

            // ---------- identifier ----------
            c if is_ident_start(c) => {
                let mut ident = c.to_string();
                while let Some(&ch) = self.chars.peek() {
                    if is_ident_continue(ch) {
                        ident.push(ch);
                        self.bump();
                    } else {
                        break;
                    }
                }
                Token::Ident(ident)
            }

            ch => return Err(CommandError::UnexpectedChar { ch, position }),
        };

        Ok((token, position))
    }

    /// All tokens up to and including `EOF`.
    pub fn tokenize(mut self) -> Result<Vec<(Token, Position)>, CommandError> {
        let mut tokens = Vec::new();
        loop {
            let (token, position) = self.next_token()?;
            let done = token == Token::EOF;
            tokens.push((token, position));
            if done {
                return Ok(tokens);
            }
        }
    }

    fn bump(&mut self) -> Option<char> {
        let c = self.chars.next()?;
        self.column += 1;
        Some(c)
    }

    fn peek_is(&mut self, pred: impl Fn(char) -> bool) -> bool {
        matches!(self.chars.peek(), Some(&c) if pred(c))
    }

    fn skip_whitespace(&mut self) {
        while self.peek_is(char::is_whitespace) {
            self.bump();
        }
    }
}

fn number(literal: &str, position: Position) -> Result<Token, CommandError> {
    let invalid = || CommandError::InvalidLiteral {
        literal: literal.to_string(),
        position,
    };

    if literal.contains('.') {
        literal.parse().map(Token::Float).map_err(|_| invalid())
    } else {
        literal.parse().map(Token::Int).map_err(|_| invalid())
    }
}

fn is_ident_start(c: char) -> bool {
    c.is_alphabetic() || c == '_'
}

// Dataset names such as `pages-title` lex as one identifier.
fn is_ident_continue(c: char) -> bool {
    c.is_alphanumeric() || c == '_' || c == '-'
}
