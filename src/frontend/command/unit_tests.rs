mod tests {
    use crate::{
        common::value::Value,
        debugger::DebugLevel,
        frontend::command::{
            ast::{Command, HeapAction},
            errors::CommandError,
            lexer::{Position, Token, Tokenizer},
            parser::parse,
        },
    };

    #[test]
    fn tokenizes_literals_and_punctuation() {
        let tokens: Vec<Token> = Tokenizer::new("insert id=-4, score=2.5, title='Emma'")
            .tokenize()
            .unwrap()
            .into_iter()
            .map(|(t, _)| t)
            .collect();

        assert_eq!(
            tokens,
            vec![
                Token::Ident("insert".into()),
                Token::Ident("id".into()),
                Token::Eq,
                Token::Int(-4),
                Token::Comma,
                Token::Ident("score".into()),
                Token::Eq,
                Token::Float(2.5),
                Token::Comma,
                Token::Ident("title".into()),
                Token::Eq,
                Token::String("Emma".into()),
                Token::EOF,
            ]
        );
    }

    #[test]
    fn tracks_columns() {
        let tokens = Tokenizer::new("use  pages").tokenize().unwrap();
        assert_eq!(tokens[1].1, Position { column: 6 });
    }

    #[test]
    fn parses_every_command() {
        let cases = vec![
            ("help", Command::Help),
            ("datasets", Command::Datasets),
            ("use pages-title", Command::Use("pages-title".into())),
            ("keys pages, title", Command::Keys(vec!["pages".into(), "title".into()])),
            ("include title", Command::Include(vec!["title".into()])),
            ("include none", Command::Include(Vec::new())),
            ("set leaf 4", Command::SetLeaf(4)),
            ("set internal 3", Command::SetInternal(3)),
            ("show", Command::Show),
            ("chain", Command::Chain),
            ("records", Command::Records),
            ("stats", Command::Stats),
            ("check", Command::Check),
            (
                "find 620, \"The Pearl\"",
                Command::Find(vec![Value::Int64(620), Value::from("The Pearl")]),
            ),
            ("clear", Command::Clear),
            (
                "insert id=22, title=\"Dune\"",
                Command::Insert(vec![
                    ("id".into(), Value::Int64(22)),
                    ("title".into(), Value::from("Dune")),
                ]),
            ),
            ("heap on", Command::Heap(HeapAction::Show)),
            ("heap off", Command::Heap(HeapAction::Hide)),
            ("heap shuffle", Command::Heap(HeapAction::Shuffle)),
            ("heap ordered", Command::Heap(HeapAction::Ordered)),
            ("timeline", Command::Timeline),
            ("debug trace", Command::Debug(DebugLevel::Trace)),
            ("debug 3", Command::Debug(DebugLevel::Info)),
            ("quit", Command::Quit),
            ("exit", Command::Quit),
        ];

        for (input, expected) in cases {
            assert_eq!(parse(input), Ok(expected), "input: {input}");
        }
    }

    #[test]
    fn display_parses_back() {
        let commands = vec![
            Command::Keys(vec!["publisher".into(), "title".into()]),
            Command::Include(Vec::new()),
            Command::Find(vec![Value::Int64(21), Value::from("Lord of the Flies")]),
            Command::Insert(vec![("pages".into(), Value::Float64(12.5))]),
            Command::Heap(HeapAction::Shuffle),
            Command::Debug(DebugLevel::Warn),
            Command::SetInternal(5),
        ];

        for command in commands {
            assert_eq!(parse(&command.to_string()), Ok(command));
        }
    }

    #[test]
    fn keywords_ignore_case() {
        assert_eq!(parse("SHOW"), Ok(Command::Show));
        assert_eq!(parse("Heap ON"), Ok(Command::Heap(HeapAction::Show)));
    }

    #[test]
    fn reports_unknown_command() {
        assert_eq!(
            parse("  drop all"),
            Err(CommandError::UnknownCommand {
                name: "drop".into(),
                position: Position { column: 1 }
            })
        );
        assert_eq!(parse("   "), Err(CommandError::EmptyInput));
    }

    #[test]
    fn reports_missing_arguments() {
        assert!(matches!(
            parse("set leaf"),
            Err(CommandError::Expected { found: None, .. })
        ));
        assert!(matches!(
            parse("set leaf -1"),
            Err(CommandError::InvalidLiteral { .. })
        ));
        assert!(matches!(
            parse("heap sideways"),
            Err(CommandError::Expected { .. })
        ));
        assert!(matches!(
            parse("insert id 4"),
            Err(CommandError::Expected { .. })
        ));
        assert!(matches!(
            parse("show extra"),
            Err(CommandError::Expected { .. })
        ));
    }

    #[test]
    fn reports_lexical_errors() {
        assert_eq!(
            parse("find 'open"),
            Err(CommandError::UnterminatedString {
                position: Position { column: 6 }
            })
        );
        assert!(matches!(
            parse("find 1.2.3"),
            Err(CommandError::InvalidLiteral { .. })
        ));
        assert!(matches!(
            parse("find #"),
            Err(CommandError::UnexpectedChar { ch: '#', .. })
        ));
    }
}
