use crate::{
    common::value::Value,
    debugger::DebugLevel,
    frontend::command::{
        ast::{Command, HeapAction},
        errors::CommandError,
        lexer::{Position, Token, Tokenizer},
    },
};

pub fn parse(input: &str) -> Result<Command, CommandError> {
    let tokens = Tokenizer::new(input.trim()).tokenize()?;
    let mut parser = Parser { tokens, pos: 0 };

    let command = parser.command()?;
    parser.expect_end()?;
    Ok(command)
}

struct Parser {
    tokens: Vec<(Token, Position)>,
    pos: usize,
}

impl Parser {
    fn command(&mut self) -> Result<Command, CommandError> {
        let (name, position) = match self.next() {
            (Token::EOF, _) => return Err(CommandError::EmptyInput),
            (Token::Ident(name), position) => (name.to_lowercase(), position),
            (token, position) => {
                return Err(CommandError::Expected {
                    expected: "command name".into(),
                    found: Some(token),
                    position,
                });
            }
        };

        let command = match name.as_str() {
            "help" => Command::Help,
            "datasets" => Command::Datasets,
            "use" => Command::Use(self.ident("dataset name")?),
            "keys" => Command::Keys(self.ident_list("key column")?),
            "include" => {
                if self.peek_keyword("none") {
                    self.next();
                    Command::Include(Vec::new())
                } else {
                    Command::Include(self.ident_list("column name")?)
                }
            }
            "set" => {
                let target = self.ident("'leaf' or 'internal'")?;
                let n = self.count()?;
                match target.to_lowercase().as_str() {
                    "leaf" => Command::SetLeaf(n),
                    "internal" => Command::SetInternal(n),
                    _ => {
                        return Err(CommandError::Expected {
                            expected: "'leaf' or 'internal'".into(),
                            found: Some(Token::Ident(target)),
                            position,
                        });
                    }
                }
            }
            "show" => Command::Show,
            "chain" => Command::Chain,
            "records" => Command::Records,
            "stats" => Command::Stats,
            "check" => Command::Check,
            "find" => Command::Find(self.value_list()?),
            "clear" => Command::Clear,
            "insert" => Command::Insert(self.assignments()?),
            "heap" => {
                let (token, position) = self.next();
                let action = match &token {
                    Token::Ident(a) => match a.to_lowercase().as_str() {
                        "on" => Some(HeapAction::Show),
                        "off" => Some(HeapAction::Hide),
                        "shuffle" => Some(HeapAction::Shuffle),
                        "ordered" => Some(HeapAction::Ordered),
                        _ => None,
                    },
                    _ => None,
                };
                match action {
                    Some(action) => Command::Heap(action),
                    None => return Err(expected("on, off, shuffle or ordered", token, position)),
                }
            }
            "timeline" => Command::Timeline,
            "debug" => Command::Debug(self.debug_level()?),
            "quit" | "exit" => Command::Quit,
            _ => return Err(CommandError::UnknownCommand { name, position }),
        };

        Ok(command)
    }

    fn next(&mut self) -> (Token, Position) {
        let (token, position) = self.tokens[self.pos.min(self.tokens.len() - 1)].clone();
        if self.pos < self.tokens.len() {
            self.pos += 1;
        }
        (token, position)
    }

    fn peek(&self) -> &Token {
        self.tokens
            .get(self.pos)
            .map(|(t, _)| t)
            .unwrap_or(&Token::EOF)
    }

    fn peek_keyword(&self, keyword: &str) -> bool {
        matches!(self.peek(), Token::Ident(s) if s.eq_ignore_ascii_case(keyword))
    }

    fn eat_comma(&mut self) -> bool {
        if *self.peek() == Token::Comma {
            self.next();
            true
        } else {
            false
        }
    }

    fn expect_end(&mut self) -> Result<(), CommandError> {
        match self.next() {
            (Token::EOF, _) => Ok(()),
            (token, position) => Err(expected("end of command", token, position)),
        }
    }

    fn ident(&mut self, what: &str) -> Result<String, CommandError> {
        match self.next() {
            (Token::Ident(s), _) | (Token::String(s), _) => Ok(s),
            (token, position) => Err(expected(what, token, position)),
        }
    }

    fn ident_list(&mut self, what: &str) -> Result<Vec<String>, CommandError> {
        let mut items = vec![self.ident(what)?];
        while self.eat_comma() {
            items.push(self.ident(what)?);
        }
        Ok(items)
    }

    fn count(&mut self) -> Result<usize, CommandError> {
        match self.next() {
            (Token::Int(n), position) => {
                usize::try_from(n).map_err(|_| CommandError::InvalidLiteral {
                    literal: n.to_string(),
                    position,
                })
            }
            (token, position) => Err(expected("a whole number", token, position)),
        }
    }

    /// Bare words are read as strings.
    fn value(&mut self) -> Result<Value, CommandError> {
        match self.next() {
            (Token::Int(v), _) => Ok(Value::Int64(v)),
            (Token::Float(v), _) => Ok(Value::Float64(v)),
            (Token::String(s), _) | (Token::Ident(s), _) => Ok(Value::String(s)),
            (token, position) => Err(expected("a value", token, position)),
        }
    }

    fn value_list(&mut self) -> Result<Vec<Value>, CommandError> {
        let mut values = vec![self.value()?];
        while self.eat_comma() {
            values.push(self.value()?);
        }
        Ok(values)
    }

    fn assignments(&mut self) -> Result<Vec<(String, Value)>, CommandError> {
        let mut pairs = Vec::new();
        loop {
            let column = self.ident("column name")?;
            match self.next() {
                (Token::Eq, _) => {}
                (token, position) => return Err(expected("'='", token, position)),
            }
            pairs.push((column, self.value()?));

            if !self.eat_comma() {
                return Ok(pairs);
            }
        }
    }

    fn debug_level(&mut self) -> Result<DebugLevel, CommandError> {
        let (token, position) = self.next();
        let text = match &token {
            Token::Ident(s) => s.clone(),
            Token::Int(n) => n.to_string(),
            _ => return Err(expected("a debug level", token, position)),
        };

        text.parse().map_err(|_| CommandError::InvalidLiteral {
            literal: text,
            position,
        })
    }
}

fn expected(what: &str, token: Token, position: Position) -> CommandError {
    CommandError::Expected {
        expected: what.to_string(),
        found: (token != Token::EOF).then_some(token),
        position,
    }
}
