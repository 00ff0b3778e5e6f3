// tests/lexer_tests.rs

use staffql::ast::Token;
use staffql::lexer::{LexError, Lexer, Position};

fn tokens(input: &str) -> Vec<Token> {
    Lexer::new(input)
        .map(|lexeme| lexeme.unwrap().token)
        .collect()
}

// ============================================================================
// Keywords
// ============================================================================

#[test]
fn test_keywords() {
    let test_cases = vec![
        ("load", Token::Load),
        ("filter", Token::Filter),
        ("column", Token::Column),
        ("aggregate", Token::Aggregate),
        ("print", Token::Print),
        ("sort", Token::Sort),
        ("asc", Token::Asc),
        ("desc", Token::Desc),
        ("count", Token::Count),
        ("sum", Token::Sum),
        ("average", Token::Average),
        ("and", Token::And),
        ("or", Token::Or),
        ("between", Token::Between),
    ];

    for (input, expected) in test_cases {
        let mut lexer = Lexer::new(input);
        assert_eq!(lexer.next_token().unwrap(), expected, "Failed for input: {}", input);
        assert_eq!(lexer.next_token().unwrap(), Token::Eof);
    }
}

#[test]
fn test_keywords_are_case_sensitive() {
    let mut lexer = Lexer::new("LOAD");
    match lexer.next_token() {
        Err(LexError::UnknownWord { word, position }) => {
            assert_eq!(word, "LOAD");
            assert_eq!(position, Position { line: 1, column: 1 });
        }
        other => panic!("Expected UnknownWord, got {:?}", other),
    }
}

// ============================================================================
// Operators
// ============================================================================

#[test]
fn test_comparison_operators() {
    let test_cases = vec![
        (">", Token::Gt),
        ("<", Token::Lt),
        (">=", Token::GtEq),
        ("<=", Token::LtEq),
        ("==", Token::EqEq),
        ("!=", Token::NotEq),
        (";", Token::Semicolon),
    ];

    for (input, expected) in test_cases {
        let mut lexer = Lexer::new(input);
        assert_eq!(lexer.next_token().unwrap(), expected, "Failed for input: {}", input);
        assert_eq!(lexer.next_token().unwrap(), Token::Eof);
    }
}

#[test]
fn test_two_char_vs_single_char() {
    assert_eq!(
        tokens("> >= < <="),
        vec![Token::Gt, Token::GtEq, Token::Lt, Token::LtEq, Token::Eof]
    );
    assert_eq!(tokens(">=>"), vec![Token::GtEq, Token::Gt, Token::Eof]);
}

#[test]
fn test_lone_equals_is_an_error() {
    let mut lexer = Lexer::new("  =");
    assert_eq!(
        lexer.next_token(),
        Err(LexError::UnexpectedChar {
            ch: '=',
            position: Position { line: 1, column: 3 },
        })
    );
}

// ============================================================================
// Literals
// ============================================================================

#[test]
fn test_numbers() {
    assert_eq!(tokens("42"), vec![Token::Number(42.0), Token::Eof]);
    assert_eq!(tokens("2500.75"), vec![Token::Number(2500.75), Token::Eof]);
}

#[test]
fn test_trailing_dot_is_not_part_of_number() {
    let mut lexer = Lexer::new("3.");
    assert_eq!(lexer.next_token().unwrap(), Token::Number(3.0));
    assert!(matches!(
        lexer.next_token(),
        Err(LexError::UnexpectedChar { ch: '.', .. })
    ));
}

#[test]
fn test_strings_keep_content_verbatim() {
    assert_eq!(
        tokens(r#""Recursos Humanos""#),
        vec![Token::String("Recursos Humanos".into()), Token::Eof]
    );
    // No escape processing: the backslash stays
    assert_eq!(
        tokens(r#""a\b""#),
        vec![Token::String("a\\b".into()), Token::Eof]
    );
}

#[test]
fn test_string_lexeme_includes_quotes() {
    let lexeme = Lexer::new(r#""empleados.csv""#).next_lexeme().unwrap();
    assert_eq!(lexeme.token, Token::String("empleados.csv".into()));
    assert_eq!(lexeme.text, r#""empleados.csv""#);
}

#[test]
fn test_unterminated_string() {
    let mut lexer = Lexer::new("load \"data.csv;");
    assert_eq!(lexer.next_token().unwrap(), Token::Load);
    assert_eq!(
        lexer.next_token(),
        Err(LexError::UnterminatedString {
            position: Position { line: 1, column: 6 },
        })
    );
}

// ============================================================================
// Whitespace and comments
// ============================================================================

#[test]
fn test_comments_are_skipped() {
    let input = "// header comment\nprint; // trailing\n// last line";
    assert_eq!(tokens(input), vec![Token::Print, Token::Semicolon, Token::Eof]);
}

#[test]
fn test_single_slash_is_an_error() {
    assert!(matches!(
        Lexer::new("/ print").next_token(),
        Err(LexError::UnexpectedChar { ch: '/', .. })
    ));
}

#[test]
fn test_error_position_on_later_line() {
    let mut lexer = Lexer::new("print;\n\n   @");
    lexer.next_token().unwrap();
    lexer.next_token().unwrap();
    assert_eq!(
        lexer.next_token(),
        Err(LexError::UnexpectedChar {
            ch: '@',
            position: Position { line: 3, column: 4 },
        })
    );
}

// ============================================================================
// Full statements
// ============================================================================

#[test]
fn test_filter_statement() {
    assert_eq!(
        tokens(r#"filter column "edad" between 25 and 40;"#),
        vec![
            Token::Filter,
            Token::Column,
            Token::String("edad".into()),
            Token::Between,
            Token::Number(25.0),
            Token::And,
            Token::Number(40.0),
            Token::Semicolon,
            Token::Eof,
        ]
    );
}

#[test]
fn test_tokenize_stops_at_first_error() {
    let result = Lexer::new("print; # nope").tokenize();
    assert!(matches!(result, Err(LexError::UnexpectedChar { ch: '#', .. })));
}

#[test]
fn test_tokenize_ends_with_eof() {
    let lexemes = Lexer::new("sort column \"x\" asc;").tokenize().unwrap();
    assert_eq!(lexemes.len(), 6);
    assert_eq!(lexemes.last().unwrap().token, Token::Eof);
}
