use super::runtime::{Flow, Result};
use super::{Angle, Console, Cursor, Runtime, Val, CR};
use crate::error;
use crate::lang::token::{Token, Word};

/// ## Screen and graphics commands
///
/// Arguments are evaluated here; drawing is left to the console.

impl<C: Console> Runtime<C> {
    fn colour(&mut self, cursor: &mut Cursor) -> Result<i32> {
        let index = cursor.index();
        let n = self.integer(cursor)?;
        if !(0..=15).contains(&n) {
            return Err(error!(NumberNotInAllowedRange, ..index));
        }
        Ok(n)
    }

    fn pair(&mut self, cursor: &mut Cursor) -> Result<(f64, f64)> {
        let x = self.number(cursor)?;
        if !cursor.accept(&Token::Comma) {
            return Err(error!(ACoordinatePairNeeded, ..cursor.index()));
        }
        let y = self.number(cursor)?;
        Ok((x, y))
    }

    /// `x, y; x, y; ...`
    fn coordinates(&mut self, cursor: &mut Cursor, least: usize) -> Result<Vec<(f64, f64)>> {
        let mut points = vec![self.pair(cursor)?];
        while cursor.accept(&Token::Semicolon) {
            points.push(self.pair(cursor)?);
        }
        if points.len() < least {
            return Err(error!(ACoordinatePairNeeded, ..cursor.index()));
        }
        cursor.expect_end()?;
        Ok(points)
    }

    pub(super) fn r#cls(&mut self, cursor: &mut Cursor) -> Result<Flow> {
        cursor.expect_end()?;
        self.console.cls();
        self.column = 0;
        Ok(Flow::Next)
    }

    pub(super) fn r#home(&mut self, cursor: &mut Cursor) -> Result<Flow> {
        cursor.expect_end()?;
        self.console.home();
        self.column = 0;
        Ok(Flow::Next)
    }

    pub(super) fn r#set(&mut self, cursor: &mut Cursor) -> Result<Flow> {
        let index = cursor.index();
        let attribute = match cursor.next() {
            Token::Word(word) => word,
            _ => return Err(error!(UnknownSetAskAttribute, ..index)),
        };
        match attribute {
            Word::Mode => {
                let at = cursor.index();
                match self.integer(cursor)? {
                    n @ 40 | n @ 80 => self.console.set_mode(n as u32),
                    _ => return Err(error!(NumberNotInAllowedRange, ..at)),
                }
                self.column = 0;
            }
            Word::Border => {
                let n = self.colour(cursor)?;
                self.console.set_border(n);
            }
            Word::Paper => {
                let n = self.colour(cursor)?;
                self.console.set_paper(n);
            }
            Word::Pen => {
                let n = self.colour(cursor)?;
                self.console.set_pen(n);
            }
            Word::Curpos => {
                let column = self.integer(cursor)?;
                cursor.expect_comma()?;
                let row = self.integer(cursor)?;
                self.console.set_curpos(column, row);
                self.column = column.max(1) as usize - 1;
            }
            Word::Cursor => {
                let mode = self.integer(cursor)?;
                let mut ch = None;
                let mut set = None;
                if cursor.accept(&Token::Comma) {
                    ch = Some(self.integer(cursor)?);
                    if cursor.accept(&Token::Comma) {
                        set = Some(self.integer(cursor)?);
                    }
                }
                self.console.set_cursor(mode, ch, set);
            }
            Word::Colour => {
                let slot = self.colour(cursor)?;
                if !cursor.accept_word(Word::To) {
                    cursor.expect_comma()?;
                }
                let colour = self.colour(cursor)?;
                self.console.set_colour(slot, colour);
            }
            Word::Deg | Word::Rad => {
                let at = cursor.index();
                let on = self.expr(cursor)?.truth().map_err(|e| e.at_token(at))?;
                self.angle = if on == (attribute == Word::Deg) {
                    Angle::Degrees
                } else {
                    Angle::Radians
                };
            }
            _ => return Err(error!(UnknownSetAskAttribute, ..index)),
        }
        cursor.expect_end()?;
        Ok(Flow::Next)
    }

    pub(super) fn r#plot(&mut self, cursor: &mut Cursor) -> Result<Flow> {
        let text = self.expr(cursor)?.into_string();
        cursor.expect_comma()?;
        let (x, y) = self.pair(cursor)?;
        cursor.expect_end()?;
        self.console.plot(&text, x, y);
        Ok(Flow::Next)
    }

    pub(super) fn r#line(&mut self, cursor: &mut Cursor) -> Result<Flow> {
        let points = self.coordinates(cursor, 2)?;
        self.console.line(&points);
        Ok(Flow::Next)
    }

    pub(super) fn r#area(&mut self, cursor: &mut Cursor) -> Result<Flow> {
        let points = self.coordinates(cursor, 3)?;
        self.console.area(&points);
        Ok(Flow::Next)
    }

    pub(super) fn r#points(&mut self, cursor: &mut Cursor) -> Result<Flow> {
        let points = self.coordinates(cursor, 1)?;
        self.console.points(&points);
        Ok(Flow::Next)
    }

    pub(super) fn r#circle(&mut self, cursor: &mut Cursor) -> Result<Flow> {
        let index = cursor.index();
        let radius = self.number(cursor)?;
        if radius < 0.0 {
            return Err(error!(PositiveValueRequired, ..index));
        }
        cursor.expect_comma()?;
        let (x, y) = self.pair(cursor)?;
        cursor.expect_end()?;
        self.console.circle(radius, x, y);
        Ok(Flow::Next)
    }

    pub(super) fn r#flood(&mut self, cursor: &mut Cursor) -> Result<Flow> {
        let (x, y) = self.pair(cursor)?;
        cursor.expect_end()?;
        self.console.flood(x, y);
        Ok(Flow::Next)
    }

    pub(super) fn r#move(&mut self, cursor: &mut Cursor) -> Result<Flow> {
        let (x, y) = self.pair(cursor)?;
        cursor.expect_end()?;
        self.console.move_to(x, y);
        Ok(Flow::Next)
    }

    pub(super) fn r#ink(&mut self, cursor: &mut Cursor) -> Result<Flow> {
        let n = self.colour(cursor)?;
        cursor.expect_end()?;
        self.console.ink(n);
        Ok(Flow::Next)
    }

    pub(super) fn r#get(&mut self, cursor: &mut Cursor) -> Result<Flow> {
        let index = cursor.index();
        let target = self.target(cursor)?;
        cursor.expect_end()?;
        let ch = match self.console.get() {
            Some(ch) => ch,
            None => {
                self.console.reset_break();
                return Err(error!(InterruptedByBreakKey, ..index));
            }
        };
        let val = if target.ident().is_string() {
            Val::String(ch.to_string())
        } else {
            Val::Number(ch as u32 as f64)
        };
        self.assign(&target, val).map_err(|e| e.at_token(index))?;
        Ok(Flow::Next)
    }

    pub(super) fn r#put(&mut self, cursor: &mut Cursor) -> Result<Flow> {
        loop {
            let index = cursor.index();
            let code = self.integer(cursor)?;
            if code < 0 {
                return Err(error!(NumberNotInAllowedRange, ..index));
            }
            if code as u32 == CR {
                self.newline();
            } else {
                self.console.put(code as u32);
                self.column += 1;
            }
            if !cursor.accept(&Token::Comma) {
                break;
            }
        }
        cursor.expect_end()?;
        Ok(Flow::Next)
    }

    pub(super) fn r#ask(&mut self, cursor: &mut Cursor) -> Result<Flow> {
        let index = cursor.index();
        if !cursor.accept_word(Word::Mouse) {
            return Err(error!(UnknownSetAskAttribute, ..index));
        }
        let x = self.target(cursor)?;
        cursor.expect_comma()?;
        let y = self.target(cursor)?;
        let mut button = None;
        if cursor.accept(&Token::Comma) {
            button = Some(self.target(cursor)?);
        }
        cursor.expect_end()?;
        let (mx, my, mb) = self.console.ask_mouse();
        self.assign(&x, Val::Number(mx))?;
        self.assign(&y, Val::Number(my))?;
        if let Some(button) = button {
            self.assign(&button, Val::Number(mb))?;
        }
        Ok(Flow::Next)
    }
}
