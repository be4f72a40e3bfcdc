pub use super::ident::Ident;
use super::{Error, LineNumber, MAX_LINE_NUMBER};
use std::convert::TryFrom;

#[derive(Debug, PartialEq, Clone)]
pub enum Token {
    Illegal(String),
    Literal(Literal),
    Word(Word),
    Operator(Operator),
    Ident(Ident),
    Comment(String),
    LParen,
    RParen,
    Comma,
    Colon,
    Semicolon,
    Assign,
    Hash,
    Tilde,
    Exclamation,
    NewLine,
    EndOfLine,
    Eof,
}

impl Token {
    /// Keyword table lookup. `s` must already be upper case.
    pub fn from_string(s: &str) -> Option<Token> {
        if let Some(op) = Operator::from_word(s) {
            return Some(Token::Operator(op));
        }
        Word::from_string(s).map(Token::Word)
    }

    pub fn is_word(&self) -> bool {
        matches!(self, Token::Word(_))
    }

    pub fn is_operand(&self) -> bool {
        matches!(self, Token::Literal(_) | Token::Ident(_))
    }

    /// True for keywords, keyword operators and built-in function names;
    /// none of these may be assigned to.
    pub fn is_reserved_word(&self) -> bool {
        match self {
            Token::Word(_) => true,
            Token::Operator(op) => op.is_reserved_word(),
            Token::Ident(ident) => is_function_name(&ident.upper()),
            _ => false,
        }
    }

    /// The token closes a statement segment.
    pub fn is_end(&self) -> bool {
        matches!(self, Token::EndOfLine | Token::Eof | Token::NewLine)
    }
}

impl std::fmt::Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        use Token::*;
        match self {
            Illegal(s) => write!(f, "{}", s),
            Literal(s) => write!(f, "{}", s),
            Word(s) => write!(f, "{}", s),
            Operator(s) => write!(f, "{}", s),
            Ident(s) => write!(f, "{}", s),
            Comment(s) => write!(f, "{}", s),
            LParen => write!(f, "("),
            RParen => write!(f, ")"),
            Comma => write!(f, ","),
            Colon => write!(f, ":"),
            Semicolon => write!(f, ";"),
            Assign => write!(f, ":="),
            Hash => write!(f, "#"),
            Tilde => write!(f, "~"),
            Exclamation => write!(f, "!"),
            NewLine => writeln!(f),
            EndOfLine | Eof => Ok(()),
        }
    }
}

impl TryFrom<&Token> for u32 {
    type Error = Error;
    fn try_from(token: &Token) -> Result<Self, Self::Error> {
        if let Token::Literal(Literal::Number(s)) = token {
            if s.chars().all(|c| c.is_ascii_digit()) {
                if let Ok(line) = s.parse::<u32>() {
                    if line >= 1 && line <= MAX_LINE_NUMBER {
                        return Ok(line);
                    }
                }
                return Err(error!(LineNumberOutOfRange));
            }
        }
        Err(error!(LineNumberExpected))
    }
}

/// A token that starts a source line with a line number.
pub fn line_number(token: &Token) -> Result<LineNumber, Error> {
    Ok(Some(u32::try_from(token)?))
}

#[derive(Debug, PartialEq, Clone)]
pub enum Literal {
    Number(String),
    Hex(String),
    String(String),
}

impl std::fmt::Display for Literal {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        use Literal::*;
        match self {
            Number(s) => write!(f, "{}", s),
            Hex(s) => write!(f, "{}", s),
            String(s) => write!(f, "\"{}\"", s),
        }
    }
}

const FUNCTIONS: &[&str] = &[
    "ABS", "ASC", "ATN", "CHR$", "COS", "DATE$", "EXP", "FALSE", "GET$", "HEX$", "INSTR", "INT",
    "LEFT$", "LEN", "LN", "LOG", "MID$", "PI", "RIGHT$", "RND", "SGN", "SIN", "SQR", "STR$",
    "STRING$", "TAN", "TIME", "TIME$", "TRUE", "VAL",
];

/// Built-in function names lex as identifiers and are routed as calls.
pub fn is_function_name(upper: &str) -> bool {
    FUNCTIONS.contains(&upper)
}

macro_rules! words {
    ($($word:ident => $text:expr,)*) => {
        #[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
        pub enum Word {
            $($word,)*
        }

        impl Word {
            pub fn from_string(s: &str) -> Option<Word> {
                match s {
                    $($text => Some(Word::$word),)*
                    _ => None,
                }
            }
        }

        impl std::fmt::Display for Word {
            fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
                match self {
                    $(Word::$word => write!(f, $text),)*
                }
            }
        }
    };
}

words! {
    Area => "AREA",
    Ask => "ASK",
    Auto => "AUTO",
    Border => "BORDER",
    Brush => "BRUSH",
    Bye => "BYE",
    Chdir => "CHDIR",
    Circle => "CIRCLE",
    Clear => "CLEAR",
    Close => "CLOSE",
    Cls => "CLS",
    Colour => "COLOUR",
    Create => "CREATE",
    Curpos => "CURPOS",
    Cursor => "CURSOR",
    Data => "DATA",
    Deg => "DEG",
    Delete => "DELETE",
    Dim => "DIM",
    Dir => "DIR",
    Edit => "EDIT",
    Else => "ELSE",
    End => "END",
    Endfun => "ENDFUN",
    Endproc => "ENDPROC",
    Envelope => "ENVELOPE",
    Erase => "ERASE",
    Flood => "FLOOD",
    For => "FOR",
    Function => "FUNCTION",
    Get => "GET",
    Global => "GLOBAL",
    Gosub => "GOSUB",
    Goto => "GOTO",
    Home => "HOME",
    If => "IF",
    Ink => "INK",
    Input => "INPUT",
    Leave => "LEAVE",
    Let => "LET",
    Line => "LINE",
    List => "LIST",
    Load => "LOAD",
    Merge => "MERGE",
    Mkdir => "MKDIR",
    Mode => "MODE",
    Mouse => "MOUSE",
    Move => "MOVE",
    New => "NEW",
    Next => "NEXT",
    Noise => "NOISE",
    On => "ON",
    Open => "OPEN",
    Paper => "PAPER",
    Pen => "PEN",
    Plot => "PLOT",
    Points => "POINTS",
    Print => "PRINT",
    Procedure => "PROCEDURE",
    Put => "PUT",
    Rad => "RAD",
    Read => "READ",
    Receive => "RECEIVE",
    Rem => "REM",
    Rename => "RENAME",
    Renumber => "RENUMBER",
    Repeat => "REPEAT",
    Restore => "RESTORE",
    Result => "RESULT",
    Return => "RETURN",
    Rmdir => "RMDIR",
    Run => "RUN",
    Save => "SAVE",
    Set => "SET",
    Sound => "SOUND",
    Step => "STEP",
    Stop => "STOP",
    Then => "THEN",
    To => "TO",
    Trace => "TRACE",
    Until => "UNTIL",
    Voice => "VOICE",
    Width => "WIDTH",
    Writing => "WRITING",
}

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum Operator {
    Caret,
    Multiply,
    Divide,
    DivideInt,
    Modulus,
    Plus,
    Minus,
    Equal,
    InterestinglyEqual,
    NotEqual,
    GreaterLess,
    Less,
    LessEqual,
    EqualLess,
    Greater,
    GreaterEqual,
    EqualGreater,
    Not,
    And,
    Or,
    Xor,
}

impl Operator {
    fn from_word(s: &str) -> Option<Operator> {
        use Operator::*;
        match s {
            "MOD" => Some(Modulus),
            "NOT" => Some(Not),
            "AND" => Some(And),
            "OR" => Some(Or),
            "XOR" => Some(Xor),
            _ => None,
        }
    }

    pub fn is_reserved_word(&self) -> bool {
        use Operator::*;
        matches!(self, Modulus | Not | And | Or | Xor)
    }

    pub fn is_comparison(&self) -> bool {
        use Operator::*;
        matches!(
            self,
            Equal
                | InterestinglyEqual
                | NotEqual
                | GreaterLess
                | Less
                | LessEqual
                | EqualLess
                | Greater
                | GreaterEqual
                | EqualGreater
        )
    }

    /// Binding strength, higher binds tighter. All operators are
    /// left associative, `^` included.
    pub fn precedence(&self) -> u8 {
        use Operator::*;
        match self {
            Caret => 7,
            Multiply | Divide | DivideInt | Modulus => 6,
            Plus | Minus => 5,
            Equal | InterestinglyEqual | NotEqual | GreaterLess | Less | LessEqual | EqualLess
            | Greater | GreaterEqual | EqualGreater => 4,
            Not => 3,
            And => 2,
            Or => 1,
            Xor => 0,
        }
    }
}

impl std::fmt::Display for Operator {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        use Operator::*;
        match self {
            Caret => write!(f, "^"),
            Multiply => write!(f, "*"),
            Divide => write!(f, "/"),
            DivideInt => write!(f, "\\"),
            Modulus => write!(f, "MOD"),
            Plus => write!(f, "+"),
            Minus => write!(f, "-"),
            Equal => write!(f, "="),
            InterestinglyEqual => write!(f, "=="),
            NotEqual => write!(f, "<>"),
            GreaterLess => write!(f, "><"),
            Less => write!(f, "<"),
            LessEqual => write!(f, "<="),
            EqualLess => write!(f, "=<"),
            Greater => write!(f, ">"),
            GreaterEqual => write!(f, ">="),
            EqualGreater => write!(f, "=>"),
            Not => write!(f, "NOT"),
            And => write!(f, "AND"),
            Or => write!(f, "OR"),
            Xor => write!(f, "XOR"),
        }
    }
}
