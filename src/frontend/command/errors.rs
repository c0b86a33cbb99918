use std::fmt;

use crate::frontend::command::lexer::{Position, Token};

#[derive(Debug, Clone, PartialEq)]
pub enum CommandError {
    EmptyInput,

    UnknownCommand {
        name: String,
        position: Position,
    },

    Expected {
        expected: String,
        found: Option<Token>,
        position: Position,
    },

    UnexpectedChar {
        ch: char,
        position: Position,
    },

    UnterminatedString {
        position: Position,
    },

    InvalidLiteral {
        literal: String,
        position: Position,
    },
}

impl fmt::Display for CommandError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CommandError::EmptyInput => write!(f, "empty command"),

            CommandError::UnknownCommand { name, position } => {
                write!(f, "unknown command '{}' at {} (try 'help')", name, position)
            }

            CommandError::Expected {
                expected,
                found,
                position,
            } => match found {
                Some(token) => write!(
                    f,
                    "parse error at {}: expected {}, found {}",
                    position, expected, token
                ),
                None => write!(
                    f,
                    "parse error at {}: expected {}, found end of input",
                    position, expected
                ),
            },

            CommandError::UnexpectedChar { ch, position } => {
                write!(f, "parse error at {}: unexpected character '{}'", position, ch)
            }

            CommandError::UnterminatedString { position } => {
                write!(f, "parse error at {}: unterminated string", position)
            }

            CommandError::InvalidLiteral { literal, position } => {
                write!(f, "parse error at {}: invalid literal '{}'", position, literal)
            }
        }
    }
}

impl std::error::Error for CommandError {}
