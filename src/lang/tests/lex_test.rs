use super::*;

#[test]
fn test_numbers() {
    assert_eq!(lex_str("-1"), [number("-1")]);
    assert_eq!(lex_str("-1.0"), [number("-1.0")]);
    assert_eq!(lex_str("2.34e+4"), [number("2.34E+4")]);
    assert_eq!(lex_str(".5"), [number(".5")]);
}

#[test]
fn test_trailing_fractional_exponent_kept_verbatim() {
    assert_eq!(lex_str("1.344E-4.32"), [number("1.344E-4.32")]);
}

#[test]
fn test_minus_after_operand_is_an_operator() {
    assert_eq!(
        lex_str("x-1"),
        [
            Token::Ident(Ident::new("x")),
            Token::Operator(Operator::Minus),
            number("1")
        ]
    );
    assert_eq!(
        lex_str("2*-1"),
        [number("2"), Token::Operator(Operator::Multiply), number("-1")]
    );
    assert_eq!(
        lex_str("(-3)"),
        [Token::LParen, number("-3"), Token::RParen]
    );
}

#[test]
fn test_hex() {
    assert_eq!(lex_str("&5d"), [Token::Literal(Literal::Hex("&5D".to_string()))]);
    assert_eq!(lex_str("&"), [Token::Illegal("&".to_string())]);
}

#[test]
fn test_strings() {
    assert_eq!(
        lex_str(r#""So-called ""test"" this is""#),
        [string(r#"So-called ""test"" this is"#)]
    );
    assert_eq!(lex_str(r#""open ended"#), [string("open ended")]);
}

#[test]
fn test_rem() {
    assert_eq!(
        lex_str("REM   This is a comment  "),
        [
            Token::Word(Word::Rem),
            Token::Comment("This is a comment".to_string())
        ]
    );
    assert_eq!(lex_str("rem"), [Token::Word(Word::Rem)]);
}

#[test]
fn test_two_char_operators() {
    use Operator::*;
    let ops: Vec<Token> = lex_str("<= =< >= => <> >< == = < >");
    assert_eq!(
        ops,
        [
            LessEqual,
            EqualLess,
            GreaterEqual,
            EqualGreater,
            NotEqual,
            GreaterLess,
            InterestinglyEqual,
            Equal,
            Less,
            Greater
        ]
        .iter()
        .map(|o| Token::Operator(*o))
        .collect::<Vec<Token>>()
    );
}

#[test]
fn test_assign_and_colon() {
    assert_eq!(
        lex_str("a:=1:b"),
        [
            Token::Ident(Ident::new("a")),
            Token::Assign,
            number("1"),
            Token::Colon,
            Token::Ident(Ident::new("b")),
        ]
    );
}

#[test]
fn test_keywords_and_functions() {
    assert_eq!(
        lex_str("print len(a$) mod 2"),
        [
            Token::Word(Word::Print),
            Token::Ident(Ident::new("len")),
            Token::LParen,
            Token::Ident(Ident::new("A$")),
            Token::RParen,
            Token::Operator(Operator::Modulus),
            number("2"),
        ]
    );
}

#[test]
fn test_punctuation() {
    assert_eq!(
        lex_str("~#!;\n@"),
        [
            Token::Tilde,
            Token::Hash,
            Token::Exclamation,
            Token::Semicolon,
            Token::NewLine,
            Token::Illegal("@".to_string()),
        ]
    );
}

#[test]
fn test_relex_of_formatted_line() {
    let line = Line::new("10 x:=2*-1+len(\"a\"\"b\"):print x;a(1,2)").unwrap();
    let again = Line::new(&line.to_string()).unwrap();
    assert_eq!(line, again);
}
