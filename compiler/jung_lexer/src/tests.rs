//! Tests for the lexer.

use super::*;
use pretty_assertions::assert_eq;

fn kinds(source: &str) -> Vec<TokenKind> {
    match lex(source) {
        Ok(tokens) => tokens.kinds().cloned().collect(),
        Err(e) => panic!("lex failed: {e}"),
    }
}

#[test]
fn test_lex_let_statement() {
    assert_eq!(
        kinds("let x = 42"),
        vec![
            TokenKind::Let,
            TokenKind::Ident("x".to_string()),
            TokenKind::Eq,
            TokenKind::Number(42.0),
            TokenKind::Eof,
        ]
    );
}

#[test]
fn test_lex_fractional_number_and_dot_access() {
    assert_eq!(
        kinds("3.25 a.length"),
        vec![
            TokenKind::Float(3.25),
            TokenKind::Ident("a".to_string()),
            TokenKind::Dot,
            TokenKind::Ident("length".to_string()),
            TokenKind::Eof,
        ]
    );
}

#[test]
fn test_lex_float_literal_keeps_its_spelling() {
    assert_eq!(
        kinds("4 4.0"),
        vec![TokenKind::Number(4.0), TokenKind::Float(4.0), TokenKind::Eof]
    );
}

#[test]
fn test_lex_compound_operators() {
    assert_eq!(
        kinds("+= -= *= /= == != >= <= > <"),
        vec![
            TokenKind::PlusEq,
            TokenKind::MinusEq,
            TokenKind::StarEq,
            TokenKind::SlashEq,
            TokenKind::EqEq,
            TokenKind::NotEq,
            TokenKind::GtEq,
            TokenKind::LtEq,
            TokenKind::Gt,
            TokenKind::Lt,
            TokenKind::Eof,
        ]
    );
}

#[test]
fn test_lex_comments_are_skipped() {
    assert_eq!(
        kinds("# hash comment\nprint 1 // slash comment\n"),
        vec![TokenKind::Print, TokenKind::Number(1.0), TokenKind::Eof]
    );
}

#[test]
fn test_lex_keyword_aliases() {
    assert_eq!(
        kinds("dream individuation archetype project integrate manifest"),
        vec![
            TokenKind::Fn,
            TokenKind::Fn,
            TokenKind::Class,
            TokenKind::Print,
            TokenKind::Import,
            TokenKind::Return,
            TokenKind::Eof,
        ]
    );
    assert_eq!(
        kinds("unconscious Self emerge perceive confront embrace reject"),
        vec![
            TokenKind::Null,
            TokenKind::This,
            TokenKind::New,
            TokenKind::Let,
            TokenKind::Try,
            TokenKind::Catch,
            TokenKind::Throw,
            TokenKind::Eof,
        ]
    );
}

#[test]
fn test_lex_keyword_prefix_is_identifier() {
    assert_eq!(
        kinds("letter iffy"),
        vec![
            TokenKind::Ident("letter".to_string()),
            TokenKind::Ident("iffy".to_string()),
            TokenKind::Eof,
        ]
    );
}

#[test]
fn test_lex_plain_string() {
    assert_eq!(
        kinds(r#""hello\nworld""#),
        vec![TokenKind::Str("hello\nworld".to_string()), TokenKind::Eof]
    );
}

#[test]
fn test_lex_interpolated_string_with_nested_quotes() {
    assert_eq!(
        kinds(r#""n=${len("abc")}""#),
        vec![
            TokenKind::Interpolated(vec![
                StrPart::Text("n=".to_string()),
                StrPart::Code {
                    source: r#"len("abc")"#.to_string(),
                    line: 1,
                },
            ]),
            TokenKind::Eof,
        ]
    );
}

#[test]
fn test_lex_closing_brace_in_quoted_code() {
    assert_eq!(
        kinds(r#""${ "}" }" 1"#),
        vec![
            TokenKind::Interpolated(vec![StrPart::Code {
                source: r#" "}" "#.to_string(),
                line: 1,
            }]),
            TokenKind::Number(1.0),
            TokenKind::Eof,
        ]
    );
}

#[test]
fn test_lex_tracks_lines_and_columns() {
    let tokens = match lex("let a = 1\n  print a") {
        Ok(tokens) => tokens,
        Err(e) => panic!("lex failed: {e}"),
    };
    let print = tokens.get(4).map(|t| (t.kind.clone(), t.line, t.column));
    assert_eq!(print, Some((TokenKind::Print, 2, 3)));
}

#[test]
fn test_lex_fragment_line_offset() {
    let tokens = match lex_from_line("x", 7) {
        Ok(tokens) => tokens,
        Err(e) => panic!("lex failed: {e}"),
    };
    assert_eq!(tokens.get(0).map(|t| t.line), Some(7));
}

#[test]
fn test_lex_unexpected_character() {
    assert_eq!(
        lex("let x = @"),
        Err(LexError::UnexpectedChar {
            ch: '@',
            line: 1,
            column: 9
        })
    );
}

#[test]
fn test_lex_lone_bang_is_error() {
    assert!(matches!(
        lex("!x"),
        Err(LexError::UnexpectedChar { ch: '!', .. })
    ));
}

#[test]
fn test_lex_unterminated_string() {
    assert!(matches!(
        lex("print \"oops"),
        Err(LexError::UnterminatedString { line: 1, .. })
    ));
}
