use super::console::{Console, CR};
use super::function::Angle;
use super::procedure::{Call, Definitions};
use super::{Cursor, Listing, Stack, Val, Var};
use crate::error;
use crate::lang::token::{Token, Word};
use crate::lang::{Error, ErrorCode, Ident, Line, LineNumber};
use std::collections::VecDeque;
use std::rc::Rc;

pub(super) type Result<T> = std::result::Result<T, Error>;

/// ## Interpreter state
///
/// One value owns the program, the variables, the control stacks
/// and the console. Lines are entered one at a time with `enter`.

pub struct Runtime<C: Console> {
    pub(super) console: C,
    pub(super) listing: Listing,
    pub(super) order: Vec<u32>,
    pub(super) direct: Rc<Line>,
    pub(super) vars: Var,
    pub(super) for_stack: Stack<ForFrame>,
    pub(super) repeat_stack: Stack<Position>,
    pub(super) gosub_stack: Stack<Position>,
    pub(super) data: VecDeque<Val>,
    pub(super) line_number: LineNumber,
    pub(super) column: usize,
    pub(super) warning_mode: bool,
    pub(super) auto: Option<(u32, u32)>,
    pub(super) angle: Angle,
    pub(super) definitions: Definitions,
    pub(super) calls: Vec<Call>,
    last_error: Option<Error>,
}

/// Where execution resumes. `pointer` indexes the line order and is
/// `None` for the direct line; `index` is a token index.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Position {
    pub pointer: Option<usize>,
    pub index: usize,
}

#[derive(Debug)]
pub struct ForFrame {
    pub resume: Position,
    pub ident: Ident,
    pub target: f64,
    pub step: f64,
}

/// What a statement asks the driver to do next.
#[derive(Debug, PartialEq)]
pub enum Flow {
    Next,
    SkipLine,
    Jump(Position),
    End,
    Bye,
    Leave,
    Result(Val),
}

#[derive(Debug, PartialEq)]
pub enum Event {
    Ready,
    Bye,
}

impl<C: Console + Default> Default for Runtime<C> {
    fn default() -> Self {
        Runtime::new(C::default())
    }
}

impl<C: Console> Runtime<C> {
    pub fn new(console: C) -> Runtime<C> {
        Runtime {
            console,
            listing: Listing::default(),
            order: vec![],
            direct: Rc::new(Line::default()),
            vars: Var::new(),
            for_stack: Stack::new(ErrorCode::NextWithoutMatchingFor),
            repeat_stack: Stack::new(ErrorCode::UntilWithoutAnyRepeat),
            gosub_stack: Stack::new(ErrorCode::ReturnWithoutAnyGosub),
            data: VecDeque::new(),
            line_number: None,
            column: 0,
            warning_mode: false,
            auto: None,
            angle: Angle::default(),
            definitions: Definitions::default(),
            calls: vec![],
            last_error: None,
        }
    }

    pub fn console(&self) -> &C {
        &self.console
    }

    pub fn console_mut(&mut self) -> &mut C {
        &mut self.console
    }

    pub fn listing(&self) -> &Listing {
        &self.listing
    }

    /// Undefined variables read as zero or empty with a warning
    /// instead of failing.
    pub fn set_warning_mode(&mut self, warn: bool) {
        self.warning_mode = warn;
    }

    /// The most recent error reported, if any.
    pub fn last_error(&self) -> Option<&Error> {
        self.last_error.as_ref()
    }

    /// Read a scalar variable by its source name.
    pub fn var(&self, name: &str) -> Option<Val> {
        self.vars.fetch(&Ident::new(name))
    }

    /// Number the next AUTO line will get.
    pub fn auto_line(&self) -> Option<u32> {
        self.auto.map(|(line, _)| line)
    }

    /// Numbered input goes to the program; anything else runs now.
    pub fn enter(&mut self, s: &str) -> Event {
        self.last_error = None;
        let line = match Line::new(s) {
            Ok(line) => line,
            Err(error) => {
                let line = Line::new_unchecked(s);
                self.report(error, &line);
                return Event::Ready;
            }
        };
        if !line.is_direct() {
            self.listing.insert(line);
            return Event::Ready;
        }
        if line.is_empty() {
            return Event::Ready;
        }
        self.drop_direct_frames();
        self.direct = Rc::new(line);
        self.order = self.listing.line_order();
        if let Ok(definitions) = self.scan_definitions() {
            self.definitions = definitions;
        }
        self.execute(Position {
            pointer: None,
            index: 0,
        })
    }

    /// Run the stored program as if `RUN` had been entered.
    pub fn run(&mut self) -> Event {
        self.enter("RUN")
    }

    /// Load a program file, replacing the current program.
    pub fn load(&mut self, filename: &str) -> std::result::Result<(), Error> {
        let listing = Listing::load(filename)?;
        self.listing = listing;
        self.clear_stacks();
        Ok(())
    }

    pub(super) fn execute(&mut self, start: Position) -> Event {
        let event = match self.run_from(start) {
            Ok(Flow::Bye) => Event::Bye,
            Ok(_) => Event::Ready,
            Err(error) => {
                let shown = match error.line_number() {
                    Some(n) => self.listing.get(n),
                    None => None,
                };
                let shown = shown.unwrap_or_else(|| self.direct.clone());
                self.report(error, &shown);
                self.clear_stacks();
                Event::Ready
            }
        };
        self.line_number = None;
        event
    }

    /// Run statements from `start` until the program stops or a
    /// procedure or function body returns. Errors leave here with
    /// their line number and token index filled in.
    pub(super) fn run_from(&mut self, start: Position) -> Result<Flow> {
        let mut pos = start;
        loop {
            let line = match self.line_at(pos.pointer) {
                Some(line) => line,
                None => return Ok(Flow::End),
            };
            self.line_number = line.number();
            let mut cursor = Cursor::new(line.clone(), pos.index);
            let flow = match self.step(&mut cursor, pos) {
                Ok(flow) => flow,
                Err(error) => {
                    let error = error.at_token(cursor.index());
                    return Err(match error.line_number() {
                        Some(_) => error,
                        None => error.in_line_number(line.number()),
                    });
                }
            };
            match flow {
                Flow::Next => {
                    if let Token::Colon = cursor.peek() {
                        pos.index = cursor.index() + 1;
                    } else {
                        match self.next_line(pos.pointer) {
                            Some(next) => pos = next,
                            None => return Ok(Flow::End),
                        }
                    }
                }
                Flow::SkipLine => match self.next_line(pos.pointer) {
                    Some(next) => pos = next,
                    None => return Ok(Flow::End),
                },
                Flow::Jump(to) => pos = to,
                flow => return Ok(flow),
            }
        }
    }

    fn step(&mut self, cursor: &mut Cursor, pos: Position) -> Result<Flow> {
        if self.console.break_raised() {
            self.console.reset_break();
            return Err(error!(InterruptedByBreakKey));
        }
        if pos.index == 0 {
            for (index, token) in cursor.line().tokens().iter().enumerate() {
                if let Token::Illegal(_) = token {
                    return Err(error!(EndOfInstructionExpected, ..index));
                }
            }
        }
        let flow = self.statement(cursor, pos)?;
        if flow == Flow::Next {
            cursor.expect_end()?;
        }
        Ok(flow)
    }

    pub(super) fn line_at(&self, pointer: Option<usize>) -> Option<Rc<Line>> {
        match pointer {
            None => Some(self.direct.clone()),
            Some(p) => self.order.get(p).and_then(|n| self.listing.get(*n)),
        }
    }

    /// Start of the line after `pointer`. The direct line has none.
    fn next_line(&self, pointer: Option<usize>) -> Option<Position> {
        pointer.map(|p| Position {
            pointer: Some(p + 1),
            index: 0,
        })
    }

    /// Where execution continues once the statement ending at
    /// `cursor` has finished.
    pub(super) fn after_statement(&self, pointer: Option<usize>, cursor: &Cursor) -> Position {
        if let Token::Colon = cursor.peek() {
            return Position {
                pointer,
                index: cursor.index() + 1,
            };
        }
        match self.next_line(pointer) {
            Some(next) => next,
            None => Position {
                pointer,
                index: cursor.line().tokens().len() - 1,
            },
        }
    }

    /// The start of stored line `number`.
    pub(super) fn goto_line(&mut self, number: u32) -> Result<Position> {
        self.order = self.listing.line_order();
        match self.order.binary_search(&number) {
            Ok(p) => Ok(Position {
                pointer: Some(p),
                index: 0,
            }),
            Err(_) => Err(error!(SpecifiedLineNotFound)),
        }
    }

    /// Frames opened by the previous direct line point into text that
    /// is about to be replaced.
    fn drop_direct_frames(&mut self) {
        self.for_stack.retain(|f| f.resume.pointer.is_some());
        self.repeat_stack.retain(|p| p.pointer.is_some());
        self.gosub_stack.retain(|p| p.pointer.is_some());
    }

    pub(super) fn clear_stacks(&mut self) {
        self.for_stack.clear();
        self.repeat_stack.clear();
        self.gosub_stack.clear();
    }

    /// Fill the DATA queue from every DATA statement at or after `from`.
    pub(super) fn restore_data(&mut self, from: u32) -> Result<()> {
        self.data.clear();
        let lines: Vec<Rc<Line>> = self.listing.range(from..=u32::max_value()).cloned().collect();
        for line in lines {
            for segment in line.segments().to_vec() {
                let mut cursor = Cursor::new(line.clone(), segment.start);
                if !cursor.accept_word(Word::Data) {
                    continue;
                }
                self.line_number = line.number();
                let result = self.data_items(&mut cursor);
                if let Err(error) = result {
                    let error = error.at_token(cursor.index()).in_line_number(line.number());
                    return Err(error);
                }
            }
        }
        Ok(())
    }

    fn data_items(&mut self, cursor: &mut Cursor) -> Result<()> {
        loop {
            if cursor.is_end() {
                return Ok(());
            }
            let val = self.expr(cursor)?;
            self.data.push_back(val);
            if cursor.is_end() {
                return Ok(());
            }
            cursor.expect_comma()?;
        }
    }

    /// Print text, turning newlines into carriage returns.
    pub(super) fn print_text(&mut self, s: &str) {
        let mut parts = s.split('\n');
        if let Some(first) = parts.next() {
            self.print_part(first);
        }
        for part in parts {
            self.newline();
            self.print_part(part);
        }
    }

    fn print_part(&mut self, s: &str) {
        if !s.is_empty() {
            self.console.print(s);
            self.column += s.chars().count();
        }
    }

    pub(super) fn newline(&mut self) {
        self.console.put(CR);
        self.column = 0;
    }

    pub(super) fn println(&mut self, s: &str) {
        self.print_text(s);
        self.newline();
    }

    pub(super) fn warn(&mut self, message: &str) {
        let text = match self.line_number {
            Some(n) => format!("Warning : {} in line {}", message, n),
            None => format!("Warning : {}", message),
        };
        self.diagnostic(&text);
    }

    fn diagnostic(&mut self, s: &str) {
        if self.column > 0 {
            self.newline();
        }
        self.console.diagnostic(s);
        self.column = 0;
    }

    /// Show an error with the offending line and remember it.
    pub(super) fn report(&mut self, error: Error, line: &Line) {
        let error = match error.line_index() {
            Some(index) => error.in_segment(line.segment_start(index)),
            None => error,
        };
        let (heading, echo) = match error.line_number() {
            Some(n) => (
                format!("Syntax error in line {}: {}", n, error.message()),
                format!("  {} {}", n, line.format_highlight(error.line_index())),
            ),
            None => (
                format!("Syntax error: {}", error.message()),
                format!("  {}", line.format_highlight(error.line_index())),
            ),
        };
        self.diagnostic(&heading);
        self.diagnostic(&echo);
        self.last_error = Some(error);
    }

    /// Read and enter lines until BYE or the end of input.
    /// Returns the process exit code.
    pub fn repl(&mut self) -> i32 {
        loop {
            let prepopulated = match self.auto {
                Some((line, _)) => format!("{} ", line),
                None => String::new(),
            };
            self.print_text(":");
            let input = self.console.input(&prepopulated);
            self.column = 0;
            let input = match input {
                Some(input) => input,
                None => {
                    if self.auto.take().is_some() || self.console.break_raised() {
                        self.console.reset_break();
                        continue;
                    }
                    return 0;
                }
            };
            if let Some((line, step)) = self.auto {
                if input.trim().is_empty() || input.trim() == line.to_string() {
                    self.auto = None;
                    continue;
                }
                self.auto = line.checked_add(step).map(|next| (next, step));
            }
            if let Event::Bye = self.enter(&input) {
                return 0;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::term::BufferConsole;

    #[test]
    fn test_after_statement_in_direct_line() {
        let mut r: Runtime<BufferConsole> = Runtime::default();
        r.direct = Rc::new(Line::new("print 1: print 2").unwrap());
        let mut cursor = Cursor::new(r.direct.clone(), 2);
        assert_eq!(
            r.after_statement(None, &cursor),
            Position {
                pointer: None,
                index: 3
            }
        );
        cursor.skip_statement();
        cursor.advance();
        cursor.skip_statement();
        assert_eq!(
            r.after_statement(None, &cursor),
            Position {
                pointer: None,
                index: 5
            }
        );
    }

    #[test]
    fn test_warning_text() {
        let mut r: Runtime<BufferConsole> = Runtime::default();
        r.line_number = Some(30);
        r.warn("Foo has not been defined");
        assert_eq!(
            r.console().output(),
            "Warning : Foo has not been defined in line 30\n"
        );
    }
}
