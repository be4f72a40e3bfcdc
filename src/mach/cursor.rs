use crate::error;
use crate::lang::token::{Token, Word};
use crate::lang::{Error, Line};
use std::rc::Rc;

type Result<T> = std::result::Result<T, Error>;

/// Token pointer into one line. Reading past the last token keeps
/// yielding `Token::EndOfLine`.
#[derive(Debug, Clone)]
pub struct Cursor {
    line: Rc<Line>,
    index: usize,
}

static END: Token = Token::EndOfLine;

impl Cursor {
    pub fn new(line: Rc<Line>, index: usize) -> Cursor {
        Cursor { line, index }
    }

    pub fn line(&self) -> &Rc<Line> {
        &self.line
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn peek(&self) -> &Token {
        self.line.tokens().get(self.index).unwrap_or(&END)
    }

    pub fn peek_ahead(&self, n: usize) -> &Token {
        self.line.tokens().get(self.index + n).unwrap_or(&END)
    }

    pub fn advance(&mut self) {
        if self.index + 1 < self.line.tokens().len() {
            self.index += 1;
        }
    }

    pub fn next(&mut self) -> Token {
        let t = self.peek().clone();
        self.advance();
        t
    }

    /// Consume `token` if it is next.
    pub fn accept(&mut self, token: &Token) -> bool {
        if self.peek() == token {
            self.advance();
            true
        } else {
            false
        }
    }

    pub fn accept_word(&mut self, word: Word) -> bool {
        self.accept(&Token::Word(word))
    }

    /// A statement ends at a colon, the end of the line or an ELSE.
    pub fn is_end(&self) -> bool {
        matches!(
            self.peek(),
            Token::Colon | Token::EndOfLine | Token::Eof | Token::Word(Word::Else)
        )
    }

    pub fn expect_end(&self) -> Result<()> {
        if self.is_end() {
            Ok(())
        } else {
            Err(error!(EndOfInstructionExpected, ..self.index))
        }
    }

    pub fn expect_comma(&mut self) -> Result<()> {
        if self.accept(&Token::Comma) {
            Ok(())
        } else {
            Err(error!(CommaSeparatorIsNeeded, ..self.index))
        }
    }

    /// Skip to the end of the current statement.
    pub fn skip_statement(&mut self) {
        while !self.is_end() {
            self.advance();
        }
    }
}
