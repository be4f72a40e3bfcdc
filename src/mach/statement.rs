use super::eval::Target;
use super::runtime::{Flow, ForFrame, Position, Result};
use super::val::parse_number;
use super::{Console, Cursor, Runtime, Val};
use crate::error;
use crate::lang::token::{Literal, Operator, Token, Word};
use crate::lang::Ident;
use std::collections::VecDeque;
use std::convert::TryFrom;

const PRINT_ZONE: usize = 15;

impl<C: Console> Runtime<C> {
    /// Run the statement under the cursor.
    pub(super) fn statement(&mut self, cursor: &mut Cursor, pos: Position) -> Result<Flow> {
        let index = cursor.index();
        match cursor.peek().clone() {
            Token::Colon | Token::EndOfLine | Token::Eof => Ok(Flow::Next),
            Token::Ident(_) => match cursor.peek_ahead(1) {
                Token::Assign | Token::Operator(Operator::Equal) | Token::LParen => {
                    self.r#let(cursor)
                }
                _ => self.call_procedure(cursor),
            },
            Token::Word(word) => {
                if let Token::Assign | Token::Operator(Operator::Equal) = cursor.peek_ahead(1) {
                    return Err(error!(IsAKeywordAndCannotBeUsedAsAVariableName, ..index; word));
                }
                cursor.advance();
                self.word(word, cursor, pos)
            }
            _ => Err(error!(UnknownCommandProcedure, ..index)),
        }
    }

    fn word(&mut self, word: Word, cursor: &mut Cursor, pos: Position) -> Result<Flow> {
        let index = cursor.index() - 1;
        match word {
            Word::Let => self.r#let(cursor),
            Word::Print => self.r#print(cursor),
            Word::Input => self.r#input(cursor),
            Word::Goto => self.r#goto(cursor),
            Word::Gosub => self.r#gosub(cursor, pos),
            Word::Return => self.r#return(cursor),
            Word::For => self.r#for(cursor, pos),
            Word::Next => self.r#next(cursor),
            Word::Repeat => self.r#repeat(cursor, pos),
            Word::Until => self.r#until(cursor),
            Word::If => self.r#if(cursor, pos),
            Word::Then => Err(error!(ThenWithNoMatchingIf, ..index)),
            Word::Else => Ok(Flow::SkipLine),
            Word::Dim => self.r#dim(cursor),
            Word::Read => self.r#read(cursor),
            Word::Data => {
                cursor.skip_statement();
                Ok(Flow::Next)
            }
            Word::Restore => self.r#restore(cursor),
            Word::Rem => Ok(Flow::SkipLine),
            Word::End => Ok(Flow::End),
            Word::Stop => self.r#stop(cursor),
            Word::Clear => {
                self.vars.clear();
                Ok(Flow::Next)
            }
            Word::Bye => Ok(Flow::Bye),
            Word::List => self.r#list(cursor),
            Word::Run => self.run_program(cursor),
            Word::New => self.new_program(cursor),
            Word::Edit => self.r#edit(cursor),
            Word::Auto => self.r#auto(cursor),
            Word::Renumber => self.r#renumber(cursor),
            Word::Save => self.r#save(cursor),
            Word::Load => self.load_program(cursor),
            Word::Cls => self.r#cls(cursor),
            Word::Set => self.r#set(cursor),
            Word::Plot => self.r#plot(cursor),
            Word::Line => self.r#line(cursor),
            Word::Area => self.r#area(cursor),
            Word::Points => self.r#points(cursor),
            Word::Circle => self.r#circle(cursor),
            Word::Flood => self.r#flood(cursor),
            Word::Move => self.r#move(cursor),
            Word::Home => self.r#home(cursor),
            Word::Ink => self.r#ink(cursor),
            Word::Get => self.r#get(cursor),
            Word::Put => self.r#put(cursor),
            Word::Ask => self.r#ask(cursor),
            Word::Procedure | Word::Function => Err(error!(CannotExecuteDefinition, ..index)),
            Word::Endproc | Word::Leave => self.leave(cursor),
            Word::Result => self.r#result(cursor),
            Word::Endfun => self.endfun(cursor),
            Word::To
            | Word::Step
            | Word::Mode
            | Word::Border
            | Word::Paper
            | Word::Pen
            | Word::Curpos
            | Word::Cursor
            | Word::Colour
            | Word::Mouse
            | Word::Deg
            | Word::Rad
            | Word::Receive
            | Word::Writing => Err(error!(UnknownCommandProcedure, ..index)),
            _ => Err(error!(NotImplemented, ..index; word)),
        }
    }

    fn r#let(&mut self, cursor: &mut Cursor) -> Result<Flow> {
        let index = cursor.index();
        let target = self.target(cursor)?;
        match cursor.peek() {
            Token::Assign | Token::Operator(Operator::Equal) => cursor.advance(),
            _ => return Err(error!(UnknownCommandProcedure, ..index)),
        }
        let expr_index = cursor.index();
        let val = self.expr(cursor)?;
        self.assign(&target, val)
            .map_err(|e| e.at_token(expr_index))?;
        Ok(Flow::Next)
    }

    /// Optional `~n` or `#n` ahead of PRINT and INPUT lists.
    fn output_selector(&mut self, cursor: &mut Cursor) -> Result<(Option<i32>, Option<i32>)> {
        let index = cursor.index();
        let mut area = None;
        let mut channel = None;
        if cursor.accept(&Token::Tilde) {
            let n = self.integer(cursor)?;
            if !(0..=9).contains(&n) {
                return Err(error!(WritingAreaInappropriate, ..index + 1));
            }
            area = Some(n);
        } else if cursor.accept(&Token::Hash) {
            let n = self.integer(cursor)?;
            if !(n == 0 || n == 2 || (11..=127).contains(&n)) {
                return Err(error!(WrongChannelNumberUsed, ..index + 1));
            }
            channel = Some(n);
        }
        if (area.is_some() || channel.is_some()) && !cursor.is_end() {
            cursor.expect_comma()?;
        }
        Ok((area, channel))
    }

    fn r#print(&mut self, cursor: &mut Cursor) -> Result<Flow> {
        let (area, channel) = self.output_selector(cursor)?;
        if area.is_none() && channel.is_none() {
            return self.print_items(cursor);
        }
        self.console.select_output(area, channel);
        let result = self.print_items(cursor);
        self.console.select_output(None, None);
        result
    }

    fn print_items(&mut self, cursor: &mut Cursor) -> Result<Flow> {
        let mut newline = true;
        while !cursor.is_end() {
            match cursor.peek() {
                Token::Semicolon => {
                    cursor.advance();
                    newline = false;
                }
                Token::Comma => {
                    cursor.advance();
                    let pad = PRINT_ZONE - self.column % PRINT_ZONE;
                    self.print_text(&" ".repeat(pad));
                    newline = false;
                }
                Token::Exclamation => {
                    cursor.advance();
                    self.newline();
                    newline = true;
                }
                _ => {
                    let val = self.expr(cursor)?;
                    self.print_text(&val.into_string());
                    newline = true;
                }
            }
        }
        if newline {
            self.newline();
        }
        Ok(Flow::Next)
    }

    fn r#input(&mut self, cursor: &mut Cursor) -> Result<Flow> {
        let whole_line = cursor.accept_word(Word::Line);
        let (area, channel) = self.output_selector(cursor)?;
        let mut prompt = String::from("?");
        if let Token::Literal(Literal::String(_)) = cursor.peek() {
            prompt = self.string(cursor)?;
            match cursor.peek() {
                Token::Semicolon => prompt.push('?'),
                Token::Comma => {}
                _ => return Err(error!(SemicolonSeparatorNeeded, ..cursor.index())),
            }
            cursor.advance();
        }
        let mut targets: Vec<(Target, usize)> = vec![];
        loop {
            let index = cursor.index();
            targets.push((self.target(cursor)?, index));
            if !cursor.accept(&Token::Comma) {
                break;
            }
        }
        cursor.expect_end()?;
        if whole_line {
            let (target, index) = &targets[0];
            if targets.len() > 1 {
                return Err(error!(EndOfInstructionExpected, ..targets[1].1 - 1));
            }
            if !target.ident().is_string() {
                return Err(error!(StringExpressionNeeded, ..*index));
            }
        }
        if area.is_some() || channel.is_some() {
            self.console.select_output(area, channel);
            self.print_text(&prompt);
            self.console.select_output(None, None);
        } else {
            self.print_text(&prompt);
        }
        let mut items: VecDeque<String> = VecDeque::new();
        let mut first = true;
        for (target, index) in targets.iter() {
            while items.is_empty() {
                if !first {
                    self.print_text("??");
                }
                first = false;
                let line = match self.console.input("") {
                    Some(line) => line,
                    None => {
                        self.console.reset_break();
                        return Err(error!(InterruptedByBreakKey));
                    }
                };
                self.column = 0;
                if whole_line {
                    items.push_back(line);
                } else {
                    items = split_input(&line, targets.len() == 1);
                }
            }
            let item = items.pop_front().unwrap_or_default();
            let val = if target.ident().is_string() {
                Val::String(item)
            } else {
                let n = parse_number(item.trim()).map_err(|e| e.at_token(*index))?;
                Val::Number(n)
            };
            self.assign(target, val).map_err(|e| e.at_token(*index))?;
        }
        Ok(Flow::Next)
    }

    fn line_ref(&mut self, cursor: &mut Cursor) -> Result<u32> {
        let index = cursor.index();
        let token = cursor.next();
        u32::try_from(&token).map_err(|e| e.at_token(index))
    }

    fn r#goto(&mut self, cursor: &mut Cursor) -> Result<Flow> {
        let index = cursor.index();
        let number = self.line_ref(cursor)?;
        cursor.expect_end()?;
        let to = self.goto_line(number).map_err(|e| e.at_token(index))?;
        Ok(Flow::Jump(to))
    }

    fn r#gosub(&mut self, cursor: &mut Cursor, pos: Position) -> Result<Flow> {
        let index = cursor.index();
        let number = self.line_ref(cursor)?;
        cursor.expect_end()?;
        let to = self.goto_line(number).map_err(|e| e.at_token(index))?;
        let back = self.after_statement(pos.pointer, cursor);
        self.gosub_stack.push(back)?;
        Ok(Flow::Jump(to))
    }

    fn r#return(&mut self, cursor: &mut Cursor) -> Result<Flow> {
        cursor.expect_end()?;
        let back = self.gosub_stack.pop()?;
        Ok(Flow::Jump(back))
    }

    fn loop_var(&mut self, cursor: &mut Cursor) -> Result<Ident> {
        let index = cursor.index();
        match self.target(cursor)? {
            Target::Scalar(ident) if !ident.is_string() => Ok(ident),
            _ => Err(error!(NumericVariableNeeded, ..index)),
        }
    }

    fn r#for(&mut self, cursor: &mut Cursor, pos: Position) -> Result<Flow> {
        let index = cursor.index();
        let ident = self.loop_var(cursor)?;
        match cursor.peek() {
            Token::Assign | Token::Operator(Operator::Equal) => cursor.advance(),
            _ => return Err(error!(InvalidExpressionFound, ..cursor.index())),
        }
        let start = self.number(cursor)?;
        if !cursor.accept_word(Word::To) {
            return Err(error!(ToIsNeededBeforeValue, ..cursor.index()));
        }
        let target = self.number(cursor)?;
        let mut step = 1.0;
        if cursor.accept_word(Word::Step) {
            let step_index = cursor.index();
            step = self.number(cursor)?;
            if step == 0.0 {
                return Err(error!(StepValueNotLargeEnough, ..step_index));
            }
        }
        cursor.expect_end()?;
        self.vars
            .store(&ident, Val::Number(start))
            .map_err(|e| e.at_token(index))?;
        if let Some(p) = self.for_stack.iter().position(|f| f.ident == ident) {
            self.for_stack.truncate(p);
        }
        let value = self.loop_value(&ident);
        if !in_bounds(value, target) {
            return Ok(match self.find_next(pos.pointer, cursor.index()) {
                Some(after) => Flow::Jump(after),
                None => Flow::End,
            });
        }
        let resume = self.after_statement(pos.pointer, cursor);
        self.for_stack.push(ForFrame {
            resume,
            ident,
            target,
            step,
        })?;
        Ok(Flow::Next)
    }

    fn loop_value(&self, ident: &Ident) -> f64 {
        match self.vars.fetch(ident) {
            Some(Val::Number(n)) => n,
            _ => 0.0,
        }
    }

    /// The statement after the NEXT that closes a loop opened just
    /// before `index`.
    fn find_next(&self, pointer: Option<usize>, index: usize) -> Option<Position> {
        let mut depth = 0;
        let mut pointer = pointer;
        let mut index = index;
        loop {
            let line = self.line_at(pointer)?;
            let tokens = line.tokens();
            for i in index..tokens.len() {
                match &tokens[i] {
                    Token::Word(Word::For) => depth += 1,
                    Token::Word(Word::Next) => {
                        let mut cursor = Cursor::new(line.clone(), i + 1);
                        let mut closes = 1;
                        while !cursor.is_end() {
                            if let Token::Comma = cursor.peek() {
                                closes += 1;
                            }
                            cursor.advance();
                        }
                        if depth < closes {
                            return Some(self.after_statement(pointer, &cursor));
                        }
                        depth -= closes;
                    }
                    _ => {}
                }
            }
            pointer = Some(pointer? + 1);
            index = 0;
        }
    }

    fn r#next(&mut self, cursor: &mut Cursor) -> Result<Flow> {
        loop {
            let index = cursor.index();
            let frame = if cursor.is_end() {
                if self.for_stack.is_empty() {
                    return Err(error!(NextWithoutMatchingFor, ..index));
                }
                self.for_stack.len() - 1
            } else {
                let ident = self.loop_var(cursor)?;
                match self.for_stack.iter().rposition(|f| f.ident == ident) {
                    Some(frame) => frame,
                    None => return Err(error!(NextWithoutMatchingFor, ..index)),
                }
            };
            self.for_stack.truncate(frame + 1);
            let (ident, target, step, resume) = {
                let f = self.for_stack.last()?;
                (f.ident.clone(), f.target, f.step, f.resume)
            };
            let value = self.loop_value(&ident) + step;
            self.vars
                .store(&ident, Val::Number(value))
                .map_err(|e| e.at_token(index))?;
            if in_bounds(self.loop_value(&ident), target) {
                return Ok(Flow::Jump(resume));
            }
            self.for_stack.pop()?;
            if !cursor.accept(&Token::Comma) {
                cursor.expect_end()?;
                return Ok(Flow::Next);
            }
        }
    }

    fn r#repeat(&mut self, cursor: &mut Cursor, pos: Position) -> Result<Flow> {
        cursor.expect_end()?;
        let resume = self.after_statement(pos.pointer, cursor);
        self.repeat_stack.push(resume)?;
        Ok(Flow::Next)
    }

    fn r#until(&mut self, cursor: &mut Cursor) -> Result<Flow> {
        let index = cursor.index();
        let resume = *self.repeat_stack.last().map_err(|e| e.at_token(index - 1))?;
        let done = self.expr(cursor)?.truth().map_err(|e| e.at_token(index))?;
        cursor.expect_end()?;
        if done {
            self.repeat_stack.pop()?;
            Ok(Flow::Next)
        } else {
            Ok(Flow::Jump(resume))
        }
    }

    fn r#if(&mut self, cursor: &mut Cursor, pos: Position) -> Result<Flow> {
        let index = cursor.index();
        let condition = self.expr(cursor)?.truth().map_err(|e| e.at_token(index))?;
        if !cursor.accept_word(Word::Then) {
            return Err(error!(ThenExpected, ..cursor.index()));
        }
        if condition {
            return self.clause(cursor, pos);
        }
        let tokens = cursor.line().tokens();
        let mut depth = 0;
        let mut found = None;
        for (i, token) in tokens.iter().enumerate().skip(cursor.index()) {
            match token {
                Token::Word(Word::If) => depth += 1,
                Token::Word(Word::Else) if depth == 0 => {
                    found = Some(i);
                    break;
                }
                Token::Word(Word::Else) => depth -= 1,
                _ => {}
            }
        }
        match found {
            Some(i) => {
                let mut clause = Cursor::new(cursor.line().clone(), i + 1);
                self.clause(&mut clause, pos)
            }
            None => Ok(Flow::SkipLine),
        }
    }

    /// Continue after THEN or ELSE; a bare line number is a GOTO.
    fn clause(&mut self, cursor: &mut Cursor, pos: Position) -> Result<Flow> {
        if let Token::Literal(Literal::Number(_)) = cursor.peek() {
            return self.r#goto(cursor);
        }
        Ok(Flow::Jump(Position {
            pointer: pos.pointer,
            index: cursor.index(),
        }))
    }

    fn r#dim(&mut self, cursor: &mut Cursor) -> Result<Flow> {
        loop {
            let index = cursor.index();
            let ident = match cursor.next() {
                Token::Ident(ident) => ident,
                _ => return Err(error!(VariableNameIsNeeded, ..index)),
            };
            let bounds = self.subscripts(cursor)?;
            self.vars
                .dimension_array(&ident, bounds)
                .map_err(|e| e.at_token(index))?;
            if !cursor.accept(&Token::Comma) {
                return Ok(Flow::Next);
            }
        }
    }

    fn r#read(&mut self, cursor: &mut Cursor) -> Result<Flow> {
        loop {
            let index = cursor.index();
            let target = self.target(cursor)?;
            let val = match self.data.pop_front() {
                Some(val) => val,
                None => return Err(error!(NoMoreDataToBeRead, ..index)),
            };
            self.assign(&target, val).map_err(|e| e.at_token(index))?;
            if !cursor.accept(&Token::Comma) {
                return Ok(Flow::Next);
            }
        }
    }

    fn r#restore(&mut self, cursor: &mut Cursor) -> Result<Flow> {
        let from = if cursor.is_end() {
            0
        } else {
            self.line_ref(cursor)?
        };
        cursor.expect_end()?;
        let line_number = self.line_number;
        let result = self.restore_data(from);
        self.line_number = line_number;
        result?;
        Ok(Flow::Next)
    }

    fn r#stop(&mut self, cursor: &mut Cursor) -> Result<Flow> {
        cursor.expect_end()?;
        match self.line_number {
            Some(n) => self.println(&format!("Stopped in line {}", n)),
            None => self.println("Stopped"),
        }
        Ok(Flow::End)
    }
}

/// A loop runs while the control variable's magnitude has not passed
/// the target's.
fn in_bounds(value: f64, target: f64) -> bool {
    value.abs() <= target.abs()
}

/// Split an INPUT reply. Commas always separate; a reply for several
/// items may also be separated by spaces.
fn split_input(line: &str, single: bool) -> VecDeque<String> {
    if line.contains(',') {
        line.split(',').map(|s| s.trim().to_string()).collect()
    } else if single {
        let mut items = VecDeque::new();
        items.push_back(line.trim().to_string());
        items
    } else {
        line.split_whitespace().map(|s| s.to_string()).collect()
    }
}
