use super::token::{self, Literal, Token, Word};
use super::{lex, Error, LineNumber};
use std::collections::HashMap;
use std::ops::Range;

/// A lexed source line. The token list always ends with
/// `Token::EndOfLine`; `segments` index the statements between colons.
#[derive(Debug, PartialEq, Clone)]
pub struct Line {
    number: LineNumber,
    tokens: Vec<Token>,
    segments: Vec<Range<usize>>,
}

impl Line {
    pub fn new(s: &str) -> Result<Line, Error> {
        let mut tokens = lex(s.trim_end());
        let mut number = None;
        if let Some(Token::Literal(Literal::Number(n))) = tokens.first() {
            if n.chars().all(|c| c.is_ascii_digit()) {
                number = token::line_number(&tokens[0]).map_err(|e| e.at_token(0))?;
                tokens.remove(0);
            }
        }
        Ok(Line::from_tokens(number, tokens))
    }

    /// Lex without reading a line number, for echoing rejected input.
    pub fn new_unchecked(s: &str) -> Line {
        Line::from_tokens(None, lex(s.trim_end()))
    }

    fn from_tokens(number: LineNumber, mut tokens: Vec<Token>) -> Line {
        while let Some(Token::Eof) | Some(Token::EndOfLine) = tokens.last() {
            tokens.pop();
        }
        tokens.push(Token::EndOfLine);
        let mut segments = vec![];
        let mut start = 0;
        for (index, t) in tokens.iter().enumerate() {
            if let Token::Colon | Token::EndOfLine = t {
                segments.push(start..index);
                start = index + 1;
            }
        }
        Line {
            number,
            tokens,
            segments,
        }
    }

    pub fn number(&self) -> LineNumber {
        self.number
    }

    pub fn is_direct(&self) -> bool {
        self.number.is_none()
    }

    /// No statements at all; a numbered empty line deletes that line.
    pub fn is_empty(&self) -> bool {
        self.tokens.len() == 1
    }

    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    pub fn segments(&self) -> &[Range<usize>] {
        &self.segments
    }

    /// First token of the statement holding token `index`. A colon
    /// belongs to the statement it ends.
    pub fn segment_start(&self, index: usize) -> usize {
        self.segments
            .iter()
            .rev()
            .find(|segment| segment.start <= index)
            .map_or(0, |segment| segment.start)
    }

    /// The same statements under a different line number.
    pub fn with_number(&self, number: LineNumber) -> Line {
        Line {
            number,
            tokens: self.tokens.clone(),
            segments: self.segments.clone(),
        }
    }

    /// Rewrite line references after GOTO, GOSUB, THEN, ELSE, RESTORE and RUN.
    pub fn renum(&self, number: u32, changes: &HashMap<u32, u32>) -> Line {
        let mut tokens = self.tokens.clone();
        for index in 1..tokens.len() {
            let refers = matches!(
                tokens[index - 1],
                Token::Word(Word::Goto)
                    | Token::Word(Word::Gosub)
                    | Token::Word(Word::Then)
                    | Token::Word(Word::Else)
                    | Token::Word(Word::Restore)
                    | Token::Word(Word::Run)
            );
            if !refers {
                continue;
            }
            if let Ok(Some(old)) = token::line_number(&tokens[index]) {
                if let Some(new) = changes.get(&old) {
                    tokens[index] = Token::Literal(Literal::Number(new.to_string()));
                }
            }
        }
        Line::from_tokens(Some(number), tokens)
    }

    /// The statements without the line number.
    pub fn text(&self) -> String {
        let mut s = String::new();
        let mut prev: Option<&Token> = None;
        for t in self.tokens.iter() {
            if let Token::EndOfLine = t {
                break;
            }
            if let Some(p) = prev {
                if spaced(p, t) {
                    s.push(' ');
                }
            }
            s.push_str(&t.to_string());
            prev = Some(t);
        }
        s
    }

    /// Tokens joined by single spaces with `--> ` placed before the
    /// offending token. A marker on a colon moves to the next token.
    pub fn format_highlight(&self, index: Option<usize>) -> String {
        let mut marker = index;
        if let Some(i) = marker {
            if let Some(Token::Colon) = self.tokens.get(i) {
                marker = Some(i + 1);
            }
        }
        let mut words: Vec<String> = vec![];
        for (i, t) in self.tokens.iter().enumerate() {
            if Some(i) == marker {
                words.push("-->".to_string());
            }
            if let Token::EndOfLine = t {
                break;
            }
            words.push(t.to_string());
        }
        words.join(" ")
    }
}

fn spaced(prev: &Token, next: &Token) -> bool {
    match (prev, next) {
        (_, Token::RParen) | (_, Token::Comma) | (_, Token::Semicolon) => false,
        (Token::LParen, _) => false,
        (Token::Ident(_), Token::LParen) => false,
        _ => true,
    }
}

impl Default for Line {
    fn default() -> Line {
        Line::from_tokens(None, vec![])
    }
}

impl std::fmt::Display for Line {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self.number {
            Some(number) => write!(f, "{} {}", number, self.text()),
            None => write!(f, "{}", self.text()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_number() {
        let line = Line::new("100 print x").unwrap();
        assert_eq!(line.number(), Some(100));
        assert_eq!(line.to_string(), "100 PRINT X");
        assert!(Line::new("print x").unwrap().is_direct());
        assert!(Line::new("70000 print").is_err());
    }

    #[test]
    fn test_segments() {
        let line = Line::new("a := 1 : : print a").unwrap();
        assert_eq!(line.segments(), &[0..3, 4..4, 5..7]);
        assert_eq!(line.segment_start(2), 0);
        assert_eq!(line.segment_start(3), 0);
        assert_eq!(line.segment_start(6), 5);
        assert!(Line::new("10").unwrap().is_empty());
    }

    #[test]
    fn test_highlight() {
        let line = Line::new("Xpos% := 542 + 3223 + Hello$").unwrap();
        assert_eq!(
            line.format_highlight(Some(2)),
            "Xpos% := --> 542 + 3223 + Hello$"
        );
        let line = Line::new("x := 5 : print x").unwrap();
        assert_eq!(line.format_highlight(Some(3)), "X := 5 : --> PRINT X");
    }
}
