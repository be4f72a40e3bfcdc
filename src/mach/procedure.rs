use super::runtime::{Flow, Position, Result};
use super::{Console, Cursor, Runtime, Val, Var};
use crate::error;
use crate::lang::token::{Token, Word};
use crate::lang::Ident;
use std::collections::HashMap;
use std::rc::Rc;

/// ## Procedures and functions
///
/// Headings are collected when a program starts. A call runs its body
/// in a nested loop over a copy of the variables; only the RETURN
/// parameters of a procedure make it back to the caller.

const MAX_CALL_DEPTH: usize = 128;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Call {
    Procedure,
    Function,
}

#[derive(Debug)]
pub struct Definition {
    params: Vec<Ident>,
    returns: Vec<Ident>,
    body: Position,
}

#[derive(Debug, Default)]
pub struct Definitions {
    procedures: HashMap<String, Rc<Definition>>,
    functions: HashMap<String, Rc<Definition>>,
}

impl Definitions {
    pub fn is_function(&self, ident: &Ident) -> bool {
        self.functions.contains_key(ident.name())
    }
}

impl<C: Console> Runtime<C> {
    /// Every PROCEDURE and FUNCTION heading in the program.
    pub(super) fn scan_definitions(&self) -> Result<Definitions> {
        let mut definitions = Definitions::default();
        for pointer in 0..self.order.len() {
            let line = match self.line_at(Some(pointer)) {
                Some(line) => line,
                None => continue,
            };
            for segment in line.segments() {
                let mut cursor = Cursor::new(line.clone(), segment.start);
                let call = if cursor.accept_word(Word::Procedure) {
                    Call::Procedure
                } else if cursor.accept_word(Word::Function) {
                    Call::Function
                } else {
                    continue;
                };
                let heading = self.heading(&mut cursor, call, pointer);
                let (ident, definition) = match heading {
                    Ok(heading) => heading,
                    Err(error) => {
                        let error = error.at_token(cursor.index()).in_line_number(line.number());
                        return Err(error);
                    }
                };
                let table = match call {
                    Call::Procedure => &mut definitions.procedures,
                    Call::Function => &mut definitions.functions,
                };
                table.insert(ident.name().to_string(), Rc::new(definition));
            }
        }
        Ok(definitions)
    }

    /// `PROCEDURE Name [p, ...] [RETURN r, ...]` or `FUNCTION Name([p, ...])`
    fn heading(&self, cursor: &mut Cursor, call: Call, pointer: usize) -> Result<(Ident, Definition)> {
        let index = cursor.index();
        let ident = match cursor.next() {
            Token::Ident(ident) => ident,
            _ => return Err(error!(NameOfDefinitionRequired, ..index)),
        };
        let mut params = vec![];
        let mut returns = vec![];
        match call {
            Call::Function => {
                if !cursor.accept(&Token::LParen) {
                    return Err(error!(OpeningBracketIsNeeded, ..cursor.index()));
                }
                if !cursor.accept(&Token::RParen) {
                    loop {
                        params.push(parameter(cursor)?);
                        if cursor.accept(&Token::RParen) {
                            break;
                        }
                        if !cursor.accept(&Token::Comma) {
                            return Err(error!(ClosingBracketIsNeeded, ..cursor.index()));
                        }
                    }
                }
            }
            Call::Procedure => {
                if !cursor.is_end() && cursor.peek() != &Token::Word(Word::Return) {
                    params = parameters(cursor)?;
                }
                if cursor.accept_word(Word::Return) {
                    returns = parameters(cursor)?;
                }
            }
        }
        cursor.expect_end()?;
        let body = self.after_statement(Some(pointer), cursor);
        Ok((
            ident,
            Definition {
                params,
                returns,
                body,
            },
        ))
    }

    /// `Name [arg, ...] [RECEIVE var, ...]`
    pub(super) fn call_procedure(&mut self, cursor: &mut Cursor) -> Result<Flow> {
        let index = cursor.index();
        let definition = match cursor.next() {
            Token::Ident(ident) => self.definitions.procedures.get(ident.name()).cloned(),
            _ => None,
        };
        let definition = match definition {
            Some(definition) => definition,
            None => return Err(error!(UnknownCommandProcedure, ..index)),
        };
        let mut args = vec![];
        if !cursor.is_end() && cursor.peek() != &Token::Word(Word::Receive) {
            loop {
                if args.len() == definition.params.len() {
                    return Err(error!(EndOfInstructionExpected, ..cursor.index()));
                }
                args.push(self.expr(cursor)?);
                if !cursor.accept(&Token::Comma) {
                    break;
                }
            }
        }
        if args.len() < definition.params.len() {
            return Err(error!(NotEnoughParameters, ..cursor.index()));
        }
        let mut receivers = vec![];
        if cursor.accept_word(Word::Receive) {
            if cursor.is_end() {
                return Err(error!(ReceiveVariablesNeeded, ..cursor.index()));
            }
            loop {
                let at = cursor.index();
                if receivers.len() == definition.returns.len() {
                    return Err(error!(EndOfInstructionExpected, ..at));
                }
                receivers.push((self.target(cursor)?, at));
                if !cursor.accept(&Token::Comma) {
                    break;
                }
            }
        }
        cursor.expect_end()?;
        let (flow, returned) = self.invoke(&definition, args, Call::Procedure)?;
        for ((target, at), val) in receivers.iter().zip(returned) {
            self.assign(target, val).map_err(|e| e.at_token(*at))?;
        }
        match flow {
            Flow::End | Flow::Bye => Ok(flow),
            _ => Ok(Flow::Next),
        }
    }

    /// A user function in an expression. The cursor is on the `(`.
    pub(super) fn call_function(&mut self, cursor: &mut Cursor, ident: &Ident, index: usize) -> Result<Val> {
        let definition = match self.definitions.functions.get(ident.name()) {
            Some(definition) => definition.clone(),
            None => return Err(error!(FunctionArrayNotFound, ..index; ident)),
        };
        let args = self.arguments(cursor)?;
        if args.len() < definition.params.len() {
            return Err(error!(NotEnoughParameters, ..index));
        }
        if args.len() > definition.params.len() {
            return Err(error!(EndOfInstructionExpected, ..index));
        }
        match self.invoke(&definition, args, Call::Function)? {
            (Flow::Result(val), _) => Var::coerce(ident, val).map_err(|e| e.at_token(index)),
            _ => Err(error!(NeedResultToExitFunction, ..index)),
        }
    }

    fn arguments(&mut self, cursor: &mut Cursor) -> Result<Vec<Val>> {
        let mut args = vec![];
        if !cursor.accept(&Token::LParen) {
            return Err(error!(OpeningBracketIsNeeded, ..cursor.index()));
        }
        if cursor.accept(&Token::RParen) {
            return Ok(args);
        }
        loop {
            args.push(self.expr(cursor)?);
            if cursor.accept(&Token::RParen) {
                return Ok(args);
            }
            if !cursor.accept(&Token::Comma) {
                return Err(error!(ClosingBracketIsNeeded, ..cursor.index()));
            }
        }
    }

    /// Run a body with its parameters bound, then put the caller's
    /// variables back. Returns how the body finished and the values of
    /// its RETURN parameters.
    fn invoke(&mut self, definition: &Definition, args: Vec<Val>, call: Call) -> Result<(Flow, Vec<Val>)> {
        if self.calls.len() >= MAX_CALL_DEPTH {
            return Err(error!(FunctionNestingTooDeep));
        }
        let mut scope = self.vars.clone();
        for (param, val) in definition.params.iter().zip(args) {
            scope.store(param, val)?;
        }
        let saved = std::mem::replace(&mut self.vars, scope);
        let depths = (
            self.for_stack.len(),
            self.repeat_stack.len(),
            self.gosub_stack.len(),
        );
        let line_number = self.line_number;
        self.calls.push(call);
        let flow = self.run_from(definition.body);
        self.calls.pop();
        self.line_number = line_number;
        self.for_stack.truncate(depths.0);
        self.repeat_stack.truncate(depths.1);
        self.gosub_stack.truncate(depths.2);
        let returned = definition
            .returns
            .iter()
            .map(|ident| self.vars.fetch(ident).unwrap_or_else(|| Var::default_for(ident)))
            .collect();
        self.vars = saved;
        Ok((flow?, returned))
    }

    /// ENDPROC and LEAVE.
    pub(super) fn leave(&mut self, cursor: &mut Cursor) -> Result<Flow> {
        let index = cursor.index() - 1;
        cursor.expect_end()?;
        match self.calls.last() {
            Some(Call::Procedure) => Ok(Flow::Leave),
            _ => Err(error!(ProcedureExitWithoutCall, ..index)),
        }
    }

    pub(super) fn r#result(&mut self, cursor: &mut Cursor) -> Result<Flow> {
        let index = cursor.index() - 1;
        if self.calls.last() != Some(&Call::Function) {
            return Err(error!(FunctionExitWithoutCall, ..index));
        }
        let val = self.expr(cursor)?;
        cursor.expect_end()?;
        Ok(Flow::Result(val))
    }

    pub(super) fn endfun(&mut self, cursor: &mut Cursor) -> Result<Flow> {
        let index = cursor.index() - 1;
        match self.calls.last() {
            Some(Call::Function) => Err(error!(NeedResultToExitFunction, ..index)),
            _ => Err(error!(FunctionExitWithoutCall, ..index)),
        }
    }
}

fn parameter(cursor: &mut Cursor) -> Result<Ident> {
    let index = cursor.index();
    match cursor.next() {
        Token::Ident(ident) => Ok(ident),
        _ => Err(error!(VariableNameIsNeeded, ..index)),
    }
}

fn parameters(cursor: &mut Cursor) -> Result<Vec<Ident>> {
    let mut list = vec![parameter(cursor)?];
    while cursor.accept(&Token::Comma) {
        list.push(parameter(cursor)?);
    }
    Ok(list)
}
