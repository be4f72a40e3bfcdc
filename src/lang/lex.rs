use super::token::*;

/// Scan source text into tokens. The result always ends with `Token::Eof`.
pub fn lex(s: &str) -> Vec<Token> {
    let mut tokens: Vec<Token> = BasicLexer {
        chars: s.chars().peekable(),
        signed: true,
        remark: false,
    }
    .collect();
    tokens.push(Token::Eof);
    tokens
}

fn is_basic_whitespace(c: char) -> bool {
    c == ' ' || c == '\t' || c == '\r'
}

fn is_basic_digit(c: char) -> bool {
    c.is_ascii_digit()
}

fn is_basic_alphabetic(c: char) -> bool {
    c.is_ascii_alphabetic()
}

trait Tokenizers<'a> {
    fn chars(&mut self) -> &mut std::iter::Peekable<std::str::Chars<'a>>;

    /// Peek one past the next character.
    fn peek_next(&mut self) -> Option<char> {
        let mut ahead = self.chars().clone();
        ahead.next();
        ahead.next()
    }

    fn whitespace(&mut self) {
        while let Some(pk) = self.chars().peek() {
            if !is_basic_whitespace(*pk) {
                break;
            }
            self.chars().next();
        }
    }

    fn number(&mut self) -> Option<Token> {
        let mut s = String::new();
        if let Some(ch) = self.chars().next() {
            s.push(ch);
        }
        let mut exp = false;
        let mut exp_sign = false;
        loop {
            let pk = match self.chars().peek() {
                Some(pk) => *pk,
                None => break,
            };
            if !exp && (pk == 'e' || pk == 'E') {
                exp = true;
                self.chars().next();
                s.push('E');
                continue;
            }
            if exp && !exp_sign && s.ends_with('E') && (pk == '+' || pk == '-') {
                exp_sign = true;
                self.chars().next();
                s.push(pk);
                continue;
            }
            if is_basic_digit(pk) {
                self.chars().next();
                s.push(pk);
                continue;
            }
            if pk == '.' && self.peek_next().map_or(false, is_basic_digit) {
                self.chars().next();
                s.push(pk);
                continue;
            }
            break;
        }
        Some(Token::Literal(Literal::Number(s)))
    }

    fn hex(&mut self) -> Option<Token> {
        self.chars().next();
        let mut s = String::from("&");
        while let Some(pk) = self.chars().peek() {
            if !pk.is_ascii_hexdigit() {
                break;
            }
            s.push(pk.to_ascii_uppercase());
            self.chars().next();
        }
        Some(Token::Literal(Literal::Hex(s)))
    }

    fn string(&mut self) -> Option<Token> {
        let mut s = String::new();
        self.chars().next();
        loop {
            match self.chars().peek() {
                None | Some('\n') => break,
                Some('"') => {
                    self.chars().next();
                    if let Some('"') = self.chars().peek() {
                        self.chars().next();
                        s.push_str("\"\"");
                        continue;
                    }
                    break;
                }
                Some(_) => {
                    if let Some(ch) = self.chars().next() {
                        s.push(ch);
                    }
                }
            }
        }
        Some(Token::Literal(Literal::String(s)))
    }

    fn alphabetic(&mut self) -> Option<Token> {
        let mut s = String::new();
        while let Some(pk) = self.chars().peek() {
            if is_basic_alphabetic(*pk) || is_basic_digit(*pk) || *pk == '_' {
                s.push(*pk);
                self.chars().next();
                continue;
            }
            if *pk == '$' || *pk == '%' {
                s.push(*pk);
                self.chars().next();
            }
            break;
        }
        if let Some(token) = Token::from_string(&s.to_ascii_uppercase()) {
            return Some(token);
        }
        Some(Token::Ident(Ident::new(&s)))
    }

    fn comment(&mut self) -> Option<Token> {
        let mut s = String::new();
        while let Some(pk) = self.chars().peek() {
            if *pk == '\n' {
                break;
            }
            s.push(*pk);
            self.chars().next();
        }
        Some(Token::Comment(s.trim().to_string()))
    }

    fn minutia(&mut self) -> Option<Token> {
        use Operator::*;
        let ch = self.chars().next()?;
        let pk = self.chars().peek().cloned();
        let pair = match (ch, pk) {
            (':', Some('=')) => Some(Token::Assign),
            ('<', Some('=')) => Some(Token::Operator(LessEqual)),
            ('<', Some('>')) => Some(Token::Operator(NotEqual)),
            ('>', Some('=')) => Some(Token::Operator(GreaterEqual)),
            ('>', Some('<')) => Some(Token::Operator(GreaterLess)),
            ('=', Some('=')) => Some(Token::Operator(InterestinglyEqual)),
            ('=', Some('<')) => Some(Token::Operator(EqualLess)),
            ('=', Some('>')) => Some(Token::Operator(EqualGreater)),
            _ => None,
        };
        if pair.is_some() {
            self.chars().next();
            return pair;
        }
        let t = match ch {
            ':' => Token::Colon,
            '<' => Token::Operator(Less),
            '>' => Token::Operator(Greater),
            '=' => Token::Operator(Equal),
            '^' => Token::Operator(Caret),
            '*' => Token::Operator(Multiply),
            '/' => Token::Operator(Divide),
            '\\' => Token::Operator(DivideInt),
            '+' => Token::Operator(Plus),
            '-' => Token::Operator(Minus),
            '(' => Token::LParen,
            ')' => Token::RParen,
            ',' => Token::Comma,
            ';' => Token::Semicolon,
            '#' => Token::Hash,
            '~' => Token::Tilde,
            '!' => Token::Exclamation,
            '?' => Token::Word(Word::Print),
            '\n' => Token::NewLine,
            _ => Token::Illegal(ch.to_string()),
        };
        Some(t)
    }
}

struct BasicLexer<'a> {
    chars: std::iter::Peekable<std::str::Chars<'a>>,
    // A `-` here would start a negative number.
    signed: bool,
    remark: bool,
}

impl<'a> Tokenizers<'a> for BasicLexer<'a> {
    fn chars(&mut self) -> &mut std::iter::Peekable<std::str::Chars<'a>> {
        &mut self.chars
    }
}

impl<'a> BasicLexer<'a> {
    fn scan(&mut self) -> Option<Token> {
        self.whitespace();
        let pk = *self.chars.peek()?;
        if self.remark {
            self.remark = false;
            if pk != '\n' {
                return self.comment();
            }
        }
        if is_basic_digit(pk) || (pk == '.' && self.peek_next().map_or(false, is_basic_digit)) {
            return self.number();
        }
        if pk == '-' && self.signed && self.peek_next().map_or(false, is_basic_digit) {
            return self.number();
        }
        if is_basic_alphabetic(pk) {
            let t = self.alphabetic();
            if let Some(Token::Word(Word::Rem)) = t {
                self.remark = true;
            }
            return t;
        }
        if pk == '"' {
            return self.string();
        }
        if pk == '&' && self.peek_next().map_or(false, |c| c.is_ascii_hexdigit()) {
            return self.hex();
        }
        self.minutia()
    }
}

impl<'a> Iterator for BasicLexer<'a> {
    type Item = Token;

    fn next(&mut self) -> Option<Self::Item> {
        let t = self.scan()?;
        self.signed = matches!(t, Token::Operator(_) | Token::LParen);
        Some(t)
    }
}
