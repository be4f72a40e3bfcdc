use super::token::*;
use super::*;

mod lex_test;

fn lex_str(s: &str) -> Vec<Token> {
    let mut tokens = lex(s);
    assert_eq!(tokens.pop(), Some(Token::Eof));
    tokens
}

fn number(s: &str) -> Token {
    Token::Literal(Literal::Number(s.to_string()))
}

fn string(s: &str) -> Token {
    Token::Literal(Literal::String(s.to_string()))
}
