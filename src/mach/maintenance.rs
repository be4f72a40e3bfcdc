use super::procedure::Definitions;
use super::runtime::{Flow, Position, Result};
use super::{Console, Cursor, Listing, Runtime};
use crate::error;
use crate::lang::token::{Token, Word};
use crate::lang::{Line, MAX_LINE_NUMBER};
use std::convert::TryFrom;
use std::rc::Rc;

/// ## Program maintenance
///
/// Commands that change the listing end a running program.

impl<C: Console> Runtime<C> {
    fn optional_line(&mut self, cursor: &mut Cursor) -> Result<Option<u32>> {
        match cursor.peek() {
            Token::Literal(_) => {
                let index = cursor.index();
                let token = cursor.next();
                let n = u32::try_from(&token).map_err(|e| e.at_token(index))?;
                Ok(Some(n))
            }
            _ => Ok(None),
        }
    }

    pub(super) fn r#list(&mut self, cursor: &mut Cursor) -> Result<Flow> {
        let mut from = 1;
        let mut to = MAX_LINE_NUMBER;
        if cursor.accept_word(Word::To) {
            if let Some(n) = self.optional_line(cursor)? {
                to = n;
            }
        } else if let Some(n) = self.optional_line(cursor)? {
            from = n;
            to = n;
            if cursor.accept_word(Word::To) {
                to = self.optional_line(cursor)?.unwrap_or(MAX_LINE_NUMBER);
            }
        }
        cursor.expect_end()?;
        if from > to {
            return Ok(Flow::Next);
        }
        let lines: Vec<Rc<Line>> = self.listing.range(from..=to).cloned().collect();
        for line in lines {
            if self.console.break_raised() {
                self.console.reset_break();
                return Err(error!(InterruptedByBreakKey));
            }
            self.println(&line.to_string());
        }
        Ok(Flow::Next)
    }

    pub(super) fn run_program(&mut self, cursor: &mut Cursor) -> Result<Flow> {
        let index = cursor.index();
        let from = self.optional_line(cursor)?;
        cursor.expect_end()?;
        self.vars.clear();
        self.clear_stacks();
        self.order = self.listing.line_order();
        self.restore_data(0)?;
        self.definitions = self.scan_definitions()?;
        match from {
            Some(n) => {
                let to = self.goto_line(n).map_err(|e| e.at_token(index))?;
                Ok(Flow::Jump(to))
            }
            None if self.order.is_empty() => Ok(Flow::End),
            None => Ok(Flow::Jump(Position {
                pointer: Some(0),
                index: 0,
            })),
        }
    }

    pub(super) fn new_program(&mut self, cursor: &mut Cursor) -> Result<Flow> {
        cursor.expect_end()?;
        self.listing.clear();
        self.order.clear();
        self.vars.clear();
        self.data.clear();
        self.definitions = Definitions::default();
        self.clear_stacks();
        Ok(Flow::End)
    }

    pub(super) fn r#edit(&mut self, cursor: &mut Cursor) -> Result<Flow> {
        let index = cursor.index();
        let number = match self.optional_line(cursor)? {
            Some(n) => n,
            None => return Err(error!(LineNumberExpected, ..index)),
        };
        cursor.expect_end()?;
        let line = match self.listing.get(number) {
            Some(line) => line,
            None => return Err(error!(SpecifiedLineNotFound, ..index)),
        };
        if let Some(text) = self.console.input(&line.to_string()) {
            self.column = 0;
            let edited = Line::new(&text)?;
            if !edited.is_direct() {
                self.listing.insert(edited);
            }
        }
        Ok(Flow::End)
    }

    pub(super) fn r#auto(&mut self, cursor: &mut Cursor) -> Result<Flow> {
        let start = self.optional_line(cursor)?.unwrap_or(10);
        let mut step = 10;
        if cursor.accept(&Token::Comma) {
            step = self.step_value(cursor)?;
        }
        cursor.expect_end()?;
        self.auto = Some((start, step));
        Ok(Flow::End)
    }

    pub(super) fn r#renumber(&mut self, cursor: &mut Cursor) -> Result<Flow> {
        let index = cursor.index();
        let start = self.optional_line(cursor)?.unwrap_or(10);
        let mut step = 10;
        if cursor.accept(&Token::Comma) {
            step = self.step_value(cursor)?;
        }
        cursor.expect_end()?;
        self.listing
            .renum(start, step)
            .map_err(|e| e.at_token(index))?;
        Ok(Flow::End)
    }

    fn step_value(&mut self, cursor: &mut Cursor) -> Result<u32> {
        let index = cursor.index();
        let n = self.number(cursor)?.round();
        if n < 1.0 || n > MAX_LINE_NUMBER as f64 {
            return Err(error!(NumberNotInAllowedRange, ..index));
        }
        Ok(n as u32)
    }

    pub(super) fn r#save(&mut self, cursor: &mut Cursor) -> Result<Flow> {
        let index = cursor.index();
        let filename = self.string(cursor)?;
        cursor.expect_end()?;
        self.listing
            .save(&filename)
            .map_err(|e| e.at_token(index))?;
        Ok(Flow::Next)
    }

    pub(super) fn load_program(&mut self, cursor: &mut Cursor) -> Result<Flow> {
        let index = cursor.index();
        let filename = self.string(cursor)?;
        cursor.expect_end()?;
        let listing = Listing::load(&filename).map_err(|e| e.at_token(index))?;
        self.listing = listing;
        self.order = self.listing.line_order();
        self.clear_stacks();
        Ok(Flow::End)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::term::BufferConsole;

    #[test]
    fn test_list_range() {
        let mut r: Runtime<BufferConsole> = Runtime::default();
        r.enter("10 print 1");
        r.enter("20 print 2");
        r.enter("30 print 3");
        r.enter("list 20 to");
        assert_eq!(r.console().output(), "20 PRINT 2\n30 PRINT 3\n");
        r.console_mut().clear_output();
        r.enter("list to 10");
        assert_eq!(r.console().output(), "10 PRINT 1\n");
        r.console_mut().clear_output();
        r.enter("list 20");
        assert_eq!(r.console().output(), "20 PRINT 2\n");
    }

    #[test]
    fn test_auto_defaults() {
        let mut r: Runtime<BufferConsole> = Runtime::default();
        r.enter("auto");
        assert_eq!(r.auto_line(), Some(10));
        r.enter("auto 100, 5");
        assert_eq!(r.auto, Some((100, 5)));
    }
}
