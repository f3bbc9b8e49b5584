//! Raw token enum driven by logos.
//!
//! Keyword aliases share a variant with the keyword they stand for, so the
//! parser never sees the alias spelling.

use logos::Logos;

#[derive(Logos, Debug, Clone, PartialEq)]
#[logos(skip r"[ \t\r\n\f]+|#[^\n]*|//[^\n]*")]
pub(crate) enum RawToken {
    // === Keywords (and their aliases) ===
    #[token("let")]
    #[token("perceive")]
    Let,
    #[token("if")]
    If,
    #[token("else")]
    Else,
    #[token("while")]
    While,
    #[token("for")]
    For,
    #[token("in")]
    In,
    #[token("print")]
    #[token("project")]
    Print,
    #[token("fn")]
    #[token("dream")]
    #[token("individuation")]
    Fn,
    #[token("return")]
    #[token("manifest")]
    Return,
    #[token("break")]
    Break,
    #[token("continue")]
    Continue,
    #[token("import")]
    #[token("integrate")]
    Import,
    #[token("try")]
    #[token("confront")]
    Try,
    #[token("catch")]
    #[token("embrace")]
    Catch,
    #[token("throw")]
    #[token("reject")]
    Throw,
    #[token("class")]
    #[token("archetype")]
    Class,
    #[token("new")]
    #[token("emerge")]
    New,
    #[token("this")]
    #[token("Self")]
    This,
    #[token("true")]
    True,
    #[token("false")]
    False,
    #[token("null")]
    #[token("unconscious")]
    Null,
    #[token("and")]
    And,
    #[token("or")]
    Or,
    #[token("not")]
    Not,

    // === Operators ===
    #[token("+=")]
    PlusEq,
    #[token("-=")]
    MinusEq,
    #[token("*=")]
    StarEq,
    #[token("/=")]
    SlashEq,
    #[token("==")]
    EqEq,
    #[token("!=")]
    NotEq,
    #[token(">=")]
    GtEq,
    #[token("<=")]
    LtEq,
    #[token(">")]
    Gt,
    #[token("<")]
    Lt,
    #[token("=")]
    Eq,
    #[token("+")]
    Plus,
    #[token("-")]
    Minus,
    #[token("*")]
    Star,
    #[token("/")]
    Slash,
    #[token("%")]
    Percent,

    // === Delimiters ===
    #[token("(")]
    LParen,
    #[token(")")]
    RParen,
    #[token("{")]
    LBrace,
    #[token("}")]
    RBrace,
    #[token("[")]
    LBracket,
    #[token("]")]
    RBracket,
    #[token(";")]
    Semicolon,
    #[token(",")]
    Comma,
    #[token(":")]
    Colon,
    #[token(".")]
    Dot,
    #[token("?")]
    Question,

    // === Literals ===
    #[regex(r"[0-9]+", |lex| lex.slice().parse::<f64>().ok())]
    Number(f64),
    /// A literal written with a fractional part, such as `4.0`.
    #[regex(r"[0-9]+\.[0-9]+", |lex| lex.slice().parse::<f64>().ok())]
    Float(f64),

    /// Raw string body between the quotes, escapes and `${}` untouched.
    #[token("\"", scan_string_body)]
    Str(String),

    #[regex(r"[A-Za-z_][A-Za-z0-9_]*")]
    Ident,
}

/// Consume a string body up to its closing quote.
///
/// Inside `${ ... }` braces are counted and quoted text is skipped whole, so
/// `"${f("x")}"` and `"${ "}" }"` are each one token. Returns `None` when the
/// input ends first.
fn scan_string_body(lex: &mut logos::Lexer<RawToken>) -> Option<String> {
    let rest = lex.remainder();
    let bytes = rest.as_bytes();
    let mut depth = 0usize;
    let mut i = 0;
    while i < bytes.len() {
        match bytes[i] {
            b'\\' if depth == 0 => i += 2,
            b'"' if depth == 0 => {
                let body = rest[..i].to_string();
                lex.bump(i + 1);
                return Some(body);
            }
            b'$' if depth == 0 && bytes.get(i + 1) == Some(&b'{') => {
                depth = 1;
                i += 2;
            }
            b'"' => i = skip_quoted(bytes, i + 1),
            b'{' if depth > 0 => {
                depth += 1;
                i += 1;
            }
            b'}' if depth > 0 => {
                depth -= 1;
                i += 1;
            }
            _ => i += 1,
        }
    }
    lex.bump(rest.len());
    None
}

/// Index just past the quote closing a string whose body starts at `i`.
pub(crate) fn skip_quoted(bytes: &[u8], mut i: usize) -> usize {
    while i < bytes.len() {
        match bytes[i] {
            b'\\' => i += 2,
            b'"' => return i + 1,
            _ => i += 1,
        }
    }
    bytes.len()
}
