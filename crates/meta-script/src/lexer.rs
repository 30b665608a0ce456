use logos::Logos;

use crate::error::ScriptError;

/// Lexical elements of an expression.
#[derive(Debug, Logos, PartialEq, Clone)]
#[logos(skip r"[ \t\r\n\f]+")]
pub enum Token {
    #[token("true")]
    True,

    #[token("false")]
    False,

    #[token("null")]
    Null,

    #[token("&&")]
    #[token("and")]
    And,

    #[token("||")]
    #[token("or")]
    Or,

    #[token("!")]
    #[token("not")]
    Not,

    #[token("in")]
    In,

    #[token("==")]
    Eq,

    #[token("!=")]
    Ne,

    #[token("<=")]
    Le,

    #[token(">=")]
    Ge,

    #[token("<")]
    Lt,

    #[token(">")]
    Gt,

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

    #[token("(")]
    LParen,

    #[token(")")]
    RParen,

    #[token("[")]
    LBracket,

    #[token("]")]
    RBracket,

    #[token(",")]
    Comma,

    #[token(".")]
    Dot,

    #[regex("[A-Za-z_][A-Za-z0-9_]*", |lex| lex.slice().to_owned())]
    Ident(String),

    #[regex(r"[0-9]+\.[0-9]+", |lex| lex.slice().parse::<f64>().ok())]
    Float(f64),

    #[regex(r"[0-9]+", |lex| lex.slice().parse::<i64>().ok())]
    Int(i64),

    #[regex(r#""([^"\\]|\\.)*""#, lex_to_str_lit)]
    #[regex(r#"'([^'\\]|\\.)*'"#, lex_to_str_lit)]
    Str(String),
}

impl Token {
    /// Source-like rendering used in error messages.
    pub fn describe(&self) -> String {
        match self {
            Token::Ident(name) => name.clone(),
            Token::Float(v) => v.to_string(),
            Token::Int(v) => v.to_string(),
            Token::Str(s) => format!("{:?}", s),
            other => format!("{:?}", other),
        }
    }
}

/// Strip quotes and resolve escape sequences.
fn lex_to_str_lit(lex: &mut logos::Lexer<Token>) -> String {
    let slice = lex.slice();
    let inner = &slice[1..slice.len() - 1];

    let mut out = String::with_capacity(inner.len());
    let mut chars = inner.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('n') => out.push('\n'),
            Some('t') => out.push('\t'),
            Some('r') => out.push('\r'),
            Some(other) => out.push(other),
            None => {}
        }
    }
    out
}

/// Split an expression into tokens paired with their byte offset.
pub fn tokenize(src: &str) -> Result<Vec<(Token, usize)>, ScriptError> {
    let mut tokens = Vec::new();
    for (token, span) in Token::lexer(src).spanned() {
        match token {
            Ok(token) => tokens.push((token, span.start)),
            Err(_) => return Err(ScriptError::UnexpectedCharacter(span.start)),
        }
    }
    Ok(tokens)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(src: &str) -> Vec<Token> {
        tokenize(src).unwrap().into_iter().map(|(t, _)| t).collect()
    }

    #[test]
    fn test_keywords_and_symbols() {
        assert_eq!(
            kinds("a && not b or c"),
            vec![
                Token::Ident("a".into()),
                Token::And,
                Token::Not,
                Token::Ident("b".into()),
                Token::Or,
                Token::Ident("c".into()),
            ]
        );
    }

    #[test]
    fn test_keyword_prefix_is_identifier() {
        assert_eq!(kinds("trueish"), vec![Token::Ident("trueish".into())]);
        assert_eq!(kinds("index"), vec![Token::Ident("index".into())]);
    }

    #[test]
    fn test_numbers() {
        assert_eq!(kinds("12 3.5"), vec![Token::Int(12), Token::Float(3.5)]);
    }

    #[test]
    fn test_string_escapes() {
        assert_eq!(kinds(r#""a\"b""#), vec![Token::Str("a\"b".into())]);
        assert_eq!(kinds(r"'it\'s'"), vec![Token::Str("it's".into())]);
    }

    #[test]
    fn test_offsets() {
        let tokens = tokenize("x  == 1").unwrap();
        assert_eq!(tokens[1], (Token::Eq, 3));
    }

    #[test]
    fn test_unexpected_character() {
        assert_eq!(tokenize("a # b"), Err(ScriptError::UnexpectedCharacter(2)));
    }
}
