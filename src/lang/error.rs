use super::LineNumber;

#[derive(PartialEq, Clone)]
pub struct Error {
    code: ErrorCode,
    line_number: LineNumber,
    index: Option<usize>,
    segment: usize,
    literal: Option<String>,
}

#[doc(hidden)]
#[macro_export]
macro_rules! error {
    ($err:ident) => {
        $crate::lang::Error::new($crate::lang::ErrorCode::$err)
    };
    ($err:ident, ..$idx:expr) => {
        $crate::lang::Error::new($crate::lang::ErrorCode::$err).at_token($idx)
    };
    ($err:ident; $lit:expr) => {
        $crate::lang::Error::new($crate::lang::ErrorCode::$err).with_literal($lit)
    };
    ($err:ident, ..$idx:expr; $lit:expr) => {
        $crate::lang::Error::new($crate::lang::ErrorCode::$err)
            .at_token($idx)
            .with_literal($lit)
    };
}

impl Error {
    pub fn new(code: ErrorCode) -> Error {
        Error {
            code,
            line_number: None,
            index: None,
            segment: 0,
            literal: None,
        }
    }

    pub fn code(&self) -> ErrorCode {
        self.code
    }

    pub fn line_number(&self) -> LineNumber {
        self.line_number
    }

    /// Position of the offending token within its statement.
    pub fn index(&self) -> Option<usize> {
        self.index.map(|index| index.saturating_sub(self.segment))
    }

    /// Position of the offending token within the whole line.
    pub fn line_index(&self) -> Option<usize> {
        self.index
    }

    pub fn is_direct(&self) -> bool {
        self.line_number.is_none()
    }

    pub fn in_line_number(self, line: LineNumber) -> Error {
        Error {
            line_number: line,
            ..self
        }
    }

    /// Sets the token index unless one is already known.
    pub fn at_token(self, index: usize) -> Error {
        Error {
            index: self.index.or(Some(index)),
            ..self
        }
    }

    /// Marks where the failing statement starts in its line.
    pub fn in_segment(self, start: usize) -> Error {
        Error {
            segment: start,
            ..self
        }
    }

    pub fn with_literal<S: ToString>(self, literal: S) -> Error {
        Error {
            literal: Some(literal.to_string()),
            ..self
        }
    }

    /// The canonical message, prefixed by the literal where the
    /// message reads as a continuation.
    pub fn message(&self) -> String {
        let msg = self.code.message();
        match &self.literal {
            Some(lit) if msg.starts_with(' ') => format!("{}{}", lit, msg),
            _ => msg.to_string(),
        }
    }
}

impl std::fmt::Debug for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Error {{ {:?} {} }}", self.code, self.to_string())
    }
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self.line_number {
            Some(line) => write!(f, "{} in line {}", self.message(), line),
            None => write!(f, "{}", self.message()),
        }
    }
}

impl std::error::Error for Error {}

macro_rules! error_codes {
    ($($code:ident = $num:expr => $msg:expr,)*) => {
        #[derive(Debug, PartialEq, Eq, Clone, Copy)]
        pub enum ErrorCode {
            $($code = $num,)*
        }

        impl ErrorCode {
            pub fn message(&self) -> &'static str {
                match self {
                    $(ErrorCode::$code => $msg,)*
                }
            }
        }
    };
}

error_codes! {
    ExpectedAKeyword = 1002 => "Expected a keyword, line number, expression, variable assignment or procedure call",
    CouldNotInterpretAsANumber = 1003 => " could not be interpreted as a number",
    HasNotBeenDefined = 1005 => " has not been defined",
    IsAKeywordAndCannotBeUsedAsAVariableName = 1006 => " is a keyword and cannot be used as a variable name",
    NotImplemented = 1010 => " is not implemented",
    ThenExpected = 1011 => "THEN is needed",
    CommaSeparatorIsNeeded = 2000 => "Comma separator is needed",
    OpeningBracketIsNeeded = 2001 => "Opening bracket is needed",
    ClosingBracketIsNeeded = 2002 => "Closing bracket is needed",
    SemicolonSeparatorNeeded = 2003 => "Semicolon separator needed",
    VariableNameIsNeeded = 2005 => "Variable name is needed",
    ArrayVariableIsWrong = 2006 => "Array variable is wrong",
    NumericVariableNeeded = 2007 => "Numeric variable needed",
    TrueFalseValueNeeded = 2008 => "TRUE/FALSE value needed",
    NumberOrStringNeeded = 2009 => "Number or string needed",
    InvalidExpressionFound = 2010 => "Invalid expression found",
    NumericExpressionNeeded = 2011 => "Numeric expression needed",
    StringExpressionNeeded = 2012 => "String expression needed",
    ExpressionTooComplicated = 2013 => "Expression too complicated",
    WrongNumberOfSubscripts = 2014 => "Wrong number of subscripts",
    ArrayAlreadyDimensioned = 2015 => "Array already dimensioned",
    SpecifiedLineNotFound = 2017 => "Specified line not found",
    LineNumberExpected = 2018 => "Line number/label needed",
    UnknownCommandProcedure = 2019 => "Unknown command/procedure",
    FunctionArrayNotFound = 2020 => "Function/array not found",
    BadArgumentForFunction = 2021 => "Bad argument for function",
    ToIsNeededBeforeValue = 2025 => "TO is needed before value",
    ThenWithNoMatchingIf = 2026 => "THEN with no matching IF",
    ReturnWithoutAnyGosub = 2027 => "RETURN without any GOSUB",
    UntilWithoutAnyRepeat = 2029 => "UNTIL without any REPEAT",
    NextWithoutMatchingFor = 2030 => "NEXT without matching FOR",
    TooManyForRepeatGosub = 2031 => "Too many FOR/REPEAT/GOSUB",
    UnknownSetAskAttribute = 2033 => "Unknown SET/ASK attribute",
    ExactFilenameIsNeeded = 2037 => "Exact filename is needed",
    UnableToOpenNamedFile = 2041 => "Unable to open named file",
    WrongChannelNumberUsed = 2044 => "Wrong channel number used",
    NoMoreDataToBeRead = 2049 => "No more DATA to be read",
    WritingAreaInappropriate = 2050 => "Writing area inappropriate",
    ACoordinatePairNeeded = 2053 => "A coordinate pair needed",
    NumberNotInAllowedRange = 2063 => "Number not in allowed range",
    LineNumberOutOfRange = 2064 => "Line number out of range",
    LengthOfStringTooGreat = 2065 => "Length of string too great",
    StringOffsetOutOfRange = 2066 => "String offset out of range",
    StepValueNotLargeEnough = 2067 => "Step value not large enough",
    PositiveValueRequired = 2068 => "Positive value required",
    TryingToDivideByZero = 2069 => "Trying to divide by zero",
    ProcedureExitWithoutCall = 2071 => "Procedure exit without call",
    ArraySubscriptIsWrong = 2072 => "Array subscript is wrong",
    InterruptedByBreakKey = 2075 => "Interrupted by BREAK key",
    EndOfInstructionExpected = 2076 => "End of instruction expected",
    ReceiveVariablesNeeded = 2078 => "Receive variables needed",
    NotEnoughParameters = 2079 => "Not enough parameters",
    FunctionExitWithoutCall = 2080 => "Function exit without call",
    NeedResultToExitFunction = 2081 => "Need RESULT to exit function",
    CannotExecuteDefinition = 2082 => "Cannot execute definition",
    NameOfDefinitionRequired = 2085 => "Name of definition required",
    FunctionNestingTooDeep = 2087 => "Function nesting too deep",
    FileOperationFailure = 2092 => "File operation failure",
    FilenameIsADirectory = 2099 => "Filename is a directory",
}
