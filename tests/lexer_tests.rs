// tests/lexer_tests.rs

use sorrel::ast::Token;
use sorrel::lexer::{LexError, Lexer};

fn tokens(input: &str) -> Vec<Token> {
    let mut lexer = Lexer::new(input);
    let mut out = Vec::new();
    loop {
        let token = lexer.next_token().unwrap();
        if token == Token::Eof {
            return out;
        }
        out.push(token);
    }
}

// ============================================================================
// Single Character Tokens
// ============================================================================

#[test]
fn test_single_char_tokens() {
    let test_cases = vec![
        ("$", Token::Dollar),
        ("@", Token::At),
        ("*", Token::Star),
        (".", Token::Dot),
        (",", Token::Comma),
        (":", Token::Colon),
        ("?", Token::Question),
        ("&", Token::Amp),
        ("/", Token::Slash),
        ("\\", Token::Backslash),
        ("(", Token::LParen),
        (")", Token::RParen),
        ("[", Token::LBracket),
        ("]", Token::RBracket),
        ("<", Token::Lt),
        (">", Token::Gt),
        ("=", Token::Eq),
    ];

    for (input, expected) in test_cases {
        let mut lexer = Lexer::new(input);
        let token = lexer.next_token().unwrap();
        assert_eq!(token, expected, "Failed for input: {}", input);
        assert_eq!(lexer.next_token().unwrap(), Token::Eof);
    }
}

// ============================================================================
// Two Character Tokens
// ============================================================================

#[test]
fn test_two_char_tokens() {
    let test_cases = vec![
        ("==", Token::Eq),
        ("!=", Token::NotEq),
        ("<=", Token::LtEq),
        (">=", Token::GtEq),
        ("..", Token::DotDot),
    ];

    for (input, expected) in test_cases {
        let mut lexer = Lexer::new(input);
        let token = lexer.next_token().unwrap();
        assert_eq!(token, expected, "Failed for input: {}", input);
        assert_eq!(lexer.next_token().unwrap(), Token::Eof);
    }
}

#[test]
fn test_equality_spellings_are_one_token() {
    // = and == both mean equality
    assert_eq!(tokens("a = b"), tokens("a == b"));
}

#[test]
fn test_dots_vs_double_dots() {
    assert_eq!(tokens(". ."), vec![Token::Dot, Token::Dot]);
    assert_eq!(tokens("..."), vec![Token::DotDot, Token::Dot]);
    assert_eq!(
        tokens("a..b"),
        vec![
            Token::Identifier("a".to_string()),
            Token::DotDot,
            Token::Identifier("b".to_string()),
        ]
    );
}

#[test]
fn test_bare_exclamation_is_invalid() {
    let mut lexer = Lexer::new("!");
    let result = lexer.next_token();
    assert!(matches!(
        result,
        Err(LexError::UnexpectedChar { ch: '!', .. })
    ));
}

// ============================================================================
// Identifiers
// ============================================================================

#[test]
fn test_identifiers() {
    let test_cases = vec![
        ("foo", "foo"),
        ("foo_bar", "foo_bar"),
        ("_leading", "_leading"),
        ("name2", "name2"),
        ("@foo", "@foo"),
        ("with@sign", "with@sign"),
    ];

    for (input, expected) in test_cases {
        let mut lexer = Lexer::new(input);
        assert_eq!(
            lexer.next_token().unwrap(),
            Token::Identifier(expected.to_string()),
            "Failed for input: {}",
            input
        );
        assert_eq!(lexer.next_token().unwrap(), Token::Eof);
    }
}

#[test]
fn test_hyphen_inside_identifier() {
    assert_eq!(
        tokens("bar-baz"),
        vec![Token::Identifier("bar-baz".to_string())]
    );
    assert_eq!(
        tokens("a-b-c"),
        vec![Token::Identifier("a-b-c".to_string())]
    );
}

#[test]
fn test_leading_hyphen_is_invalid() {
    let mut lexer = Lexer::new("-baz");
    assert!(matches!(
        lexer.next_token(),
        Err(LexError::BadIdentifier { position: 0 })
    ));
}

#[test]
fn test_trailing_hyphen_stops_identifier() {
    // The hyphen is not followed by a name character, so it is not
    // part of the identifier and cannot stand alone either.
    let mut lexer = Lexer::new("foo-");
    assert_eq!(
        lexer.next_token().unwrap(),
        Token::Identifier("foo".to_string())
    );
    assert!(matches!(
        lexer.next_token(),
        Err(LexError::UnexpectedChar { ch: '-', .. })
    ));
}

#[test]
fn test_bare_at_vs_at_field() {
    // @ followed by a name character is a field name
    assert_eq!(tokens("@cow"), vec![Token::Identifier("@cow".to_string())]);
    // @ followed by punctuation is the current value
    assert_eq!(
        tokens("@.cow"),
        vec![
            Token::At,
            Token::Dot,
            Token::Identifier("cow".to_string()),
        ]
    );
}

// ============================================================================
// Numbers
// ============================================================================

#[test]
fn test_integers() {
    let test_cases = vec![
        ("0", 0),
        ("42", 42),
        ("-17", -17),
        ("1600", 1600),
    ];

    for (input, expected) in test_cases {
        let mut lexer = Lexer::new(input);
        assert_eq!(
            lexer.next_token().unwrap(),
            Token::Integer(expected),
            "Failed for input: {}",
            input
        );
        assert_eq!(lexer.next_token().unwrap(), Token::Eof);
    }
}

#[test]
fn test_floats() {
    let test_cases = vec![
        ("3.14", 3.14),
        ("-2.5", -2.5),
        ("0.0", 0.0),
    ];

    for (input, expected) in test_cases {
        let mut lexer = Lexer::new(input);
        assert_eq!(
            lexer.next_token().unwrap(),
            Token::Float(expected),
            "Failed for input: {}",
            input
        );
        assert_eq!(lexer.next_token().unwrap(), Token::Eof);
    }
}

#[test]
fn test_number_then_dot_is_not_a_float() {
    // A dot with no digit after it belongs to the path, not the number.
    assert_eq!(
        tokens("1.foo"),
        vec![
            Token::Integer(1),
            Token::Dot,
            Token::Identifier("foo".to_string()),
        ]
    );
}

// ============================================================================
// Strings
// ============================================================================

#[test]
fn test_quoted_strings() {
    let test_cases = vec![
        (r#""hello""#, "hello"),
        ("'hello'", "hello"),
        (r#""with space""#, "with space"),
        (r#""cpu.frequency""#, "cpu.frequency"),
        (r#""esc\nape""#, "esc\nape"),
        (r#""back\\slash""#, "back\\slash"),
        (r#"'it\'s'"#, "it's"),
    ];

    for (input, expected) in test_cases {
        let mut lexer = Lexer::new(input);
        assert_eq!(
            lexer.next_token().unwrap(),
            Token::String(expected.to_string()),
            "Failed for input: {}",
            input
        );
        assert_eq!(lexer.next_token().unwrap(), Token::Eof);
    }
}

#[test]
fn test_unterminated_string() {
    let mut lexer = Lexer::new(r#""no end"#);
    assert!(matches!(
        lexer.next_token(),
        Err(LexError::UnterminatedString { position: 0 })
    ));
}

#[test]
fn test_invalid_escape() {
    let mut lexer = Lexer::new(r#""bad\q""#);
    assert!(matches!(
        lexer.next_token(),
        Err(LexError::InvalidEscape { ch: 'q', .. })
    ));
}

// ============================================================================
// Backtick Names
// ============================================================================

#[test]
fn test_named_tokens() {
    let test_cases = vec![
        ("`this`", "this"),
        ("`parent`", "parent"),
        ("`len`", "len"),
        ("`sorted`", "sorted"),
        ("`str()`", "str()"),
        // interior stays raw, arguments and all
        ("`split(+, 2, -1)`", "split(+, 2, -1)"),
        ("`sub(/foo/, bar)`", "sub(/foo/, bar)"),
    ];

    for (input, expected) in test_cases {
        let mut lexer = Lexer::new(input);
        assert_eq!(
            lexer.next_token().unwrap(),
            Token::Named(expected.to_string()),
            "Failed for input: {}",
            input
        );
        assert_eq!(lexer.next_token().unwrap(), Token::Eof);
    }
}

#[test]
fn test_unterminated_name() {
    let mut lexer = Lexer::new("`this");
    assert!(matches!(
        lexer.next_token(),
        Err(LexError::UnterminatedName { position: 0 })
    ));
}

// ============================================================================
// Errors and Positions
// ============================================================================

#[test]
fn test_unexpected_character() {
    let mut lexer = Lexer::new("foo #");
    lexer.next_token().unwrap();
    let err = lexer.next_token().unwrap_err();
    assert!(matches!(err, LexError::UnexpectedChar { ch: '#', position: 4 }));
    assert_eq!(err.to_string(), "Unexpected character '#' at position 4");
}

#[test]
fn test_bad_identifier_message() {
    let mut lexer = Lexer::new("foo.-baz");
    lexer.next_token().unwrap(); // foo
    lexer.next_token().unwrap(); // .
    let err = lexer.next_token().unwrap_err();
    assert_eq!(
        err.to_string(),
        "Identifier cannot begin with '-' at position 4"
    );
}

#[test]
fn test_token_start_positions() {
    let mut lexer = Lexer::new("foo . baz");
    lexer.next_token().unwrap();
    assert_eq!(lexer.token_start(), 0);
    lexer.next_token().unwrap();
    assert_eq!(lexer.token_start(), 4);
    lexer.next_token().unwrap();
    assert_eq!(lexer.token_start(), 6);
}

// ============================================================================
// Full Expressions
// ============================================================================

#[test]
fn test_root_path_expression() {
    assert_eq!(
        tokens("$.store..book[0]"),
        vec![
            Token::Dollar,
            Token::Dot,
            Token::Identifier("store".to_string()),
            Token::DotDot,
            Token::Identifier("book".to_string()),
            Token::LBracket,
            Token::Integer(0),
            Token::RBracket,
        ]
    );
}

#[test]
fn test_filter_expression() {
    assert_eq!(
        tokens("metrics[?(@.name = 'cpu.frequency')]"),
        vec![
            Token::Identifier("metrics".to_string()),
            Token::LBracket,
            Token::Question,
            Token::LParen,
            Token::At,
            Token::Dot,
            Token::Identifier("name".to_string()),
            Token::Eq,
            Token::String("cpu.frequency".to_string()),
            Token::RParen,
            Token::RBracket,
        ]
    );
}

#[test]
fn test_sort_expression() {
    assert_eq!(
        tokens(r"[/cow,\cat.(a,b)]"),
        vec![
            Token::LBracket,
            Token::Slash,
            Token::Identifier("cow".to_string()),
            Token::Comma,
            Token::Backslash,
            Token::Identifier("cat".to_string()),
            Token::Dot,
            Token::LParen,
            Token::Identifier("a".to_string()),
            Token::Comma,
            Token::Identifier("b".to_string()),
            Token::RParen,
            Token::RBracket,
        ]
    );
}

#[test]
fn test_slice_expression() {
    assert_eq!(
        tokens("[1:5:2]"),
        vec![
            Token::LBracket,
            Token::Integer(1),
            Token::Colon,
            Token::Integer(5),
            Token::Colon,
            Token::Integer(2),
            Token::RBracket,
        ]
    );
}

#[test]
fn test_whitespace_is_ignored() {
    assert_eq!(tokens("foo .  baz"), tokens("foo.baz"));
}
