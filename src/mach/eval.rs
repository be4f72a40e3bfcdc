use super::runtime::Result;
use super::{Console, Cursor, Function, Operation, Runtime, Val};
use crate::error;
use crate::lang::token::{self, Literal, Operator, Token};
use crate::lang::Ident;
use std::convert::TryFrom;

/// ## Expression evaluator
///
/// Shunting-yard over the tokens under a cursor. Operands are resolved
/// as soon as they are read; operators wait on a stack until something
/// binding no tighter arrives. Precedences are doubled so the unary
/// operators can sit between the binary levels.

const NEGATE: u8 = 13;
const NOT: u8 = 6;
const MAX_PENDING: usize = 128;

#[derive(Debug)]
enum Pending {
    Binary(Operator, usize),
    Negate(usize),
    Not(usize),
    Paren(usize),
}

impl Pending {
    fn precedence(&self) -> Option<u8> {
        match self {
            Pending::Binary(op, _) => Some(op.precedence() * 2),
            Pending::Negate(_) => Some(NEGATE),
            Pending::Not(_) => Some(NOT),
            Pending::Paren(_) => None,
        }
    }
}

/// Something a value can be stored into.
#[derive(Debug, Clone, PartialEq)]
pub enum Target {
    Scalar(Ident),
    Element(Ident, Vec<f64>),
}

impl<C: Console> Runtime<C> {
    /// Evaluate one expression, leaving the cursor on the first token
    /// that is not part of it.
    pub(super) fn expr(&mut self, cursor: &mut Cursor) -> Result<Val> {
        let mut vals: Vec<Val> = vec![];
        let mut pending: Vec<Pending> = vec![];
        let mut depth = 0;
        let mut want_operand = true;
        loop {
            let index = cursor.index();
            if pending.len() > MAX_PENDING {
                return Err(error!(ExpressionTooComplicated, ..index));
            }
            if want_operand {
                match cursor.peek() {
                    Token::Literal(_) | Token::Ident(_) => {
                        let val = self.operand(cursor)?;
                        vals.push(val);
                        want_operand = false;
                    }
                    Token::LParen => {
                        pending.push(Pending::Paren(index));
                        depth += 1;
                        cursor.advance();
                    }
                    Token::Operator(Operator::Minus) => {
                        pending.push(Pending::Negate(index));
                        cursor.advance();
                    }
                    Token::Operator(Operator::Plus) => cursor.advance(),
                    Token::Operator(Operator::Not) => {
                        pending.push(Pending::Not(index));
                        cursor.advance();
                    }
                    _ => return Err(error!(InvalidExpressionFound, ..index)),
                }
                continue;
            }
            match cursor.peek() {
                Token::Operator(op) if *op != Operator::Not => {
                    let op = *op;
                    let precedence = op.precedence() * 2;
                    Runtime::<C>::reduce(&mut vals, &mut pending, precedence)?;
                    pending.push(Pending::Binary(op, index));
                    want_operand = true;
                    cursor.advance();
                }
                Token::RParen if depth > 0 => {
                    Runtime::<C>::reduce(&mut vals, &mut pending, 0)?;
                    pending.pop();
                    depth -= 1;
                    cursor.advance();
                }
                _ => break,
            }
        }
        Runtime::<C>::reduce(&mut vals, &mut pending, 0)?;
        if let Some(Pending::Paren(_)) = pending.last() {
            return Err(error!(ClosingBracketIsNeeded, ..cursor.index()));
        }
        match vals.pop() {
            Some(val) if vals.is_empty() => Ok(val),
            _ => Err(error!(InvalidExpressionFound, ..cursor.index())),
        }
    }

    /// Apply pending operators binding at least as tight as `precedence`.
    fn reduce(vals: &mut Vec<Val>, pending: &mut Vec<Pending>, precedence: u8) -> Result<()> {
        while let Some(top) = pending.last() {
            match top.precedence() {
                Some(p) if p >= precedence => {}
                _ => break,
            }
            let (result, index) = match pending.pop() {
                Some(Pending::Binary(op, index)) => {
                    let rhs = vals.pop();
                    let lhs = vals.pop();
                    match (lhs, rhs) {
                        (Some(lhs), Some(rhs)) => (Operation::binary(op, lhs, rhs), index),
                        _ => return Err(error!(InvalidExpressionFound, ..index)),
                    }
                }
                Some(Pending::Negate(index)) => match vals.pop() {
                    Some(val) => (Operation::negate(val), index),
                    None => return Err(error!(InvalidExpressionFound, ..index)),
                },
                Some(Pending::Not(index)) => match vals.pop() {
                    Some(val) => (Operation::not(val), index),
                    None => return Err(error!(InvalidExpressionFound, ..index)),
                },
                Some(Pending::Paren(index)) => {
                    return Err(error!(ClosingBracketIsNeeded, ..index));
                }
                None => break,
            };
            vals.push(result.map_err(|e| e.at_token(index))?);
        }
        Ok(())
    }

    fn operand(&mut self, cursor: &mut Cursor) -> Result<Val> {
        let index = cursor.index();
        match cursor.next() {
            Token::Literal(Literal::Number(s)) | Token::Literal(Literal::Hex(s)) => {
                let n = super::val::parse_number(&s).map_err(|e| e.at_token(index))?;
                Ok(Val::Number(n))
            }
            Token::Literal(Literal::String(s)) => Ok(Val::String(s.replace("\"\"", "\""))),
            Token::Ident(ident) => {
                let upper = ident.upper();
                if token::is_function_name(&upper) {
                    self.call(cursor, &upper, index)
                } else if let Token::LParen = cursor.peek() {
                    if self.definitions.is_function(&ident) {
                        return self.call_function(cursor, &ident, index);
                    }
                    let subs = self.subscripts(cursor)?;
                    self.vars
                        .fetch_array(&ident, subs)
                        .map_err(|e| e.at_token(index))
                } else {
                    self.fetch_var(&ident, index)
                }
            }
            _ => Err(error!(InvalidExpressionFound, ..index)),
        }
    }

    fn fetch_var(&mut self, ident: &Ident, index: usize) -> Result<Val> {
        if let Some(val) = self.vars.fetch(ident) {
            return Ok(val);
        }
        if !self.warning_mode {
            return Err(error!(HasNotBeenDefined, ..index; ident));
        }
        self.warn(&format!("{} has not been defined", ident));
        let val = super::Var::default_for(ident);
        self.vars.store(ident, val.clone())?;
        Ok(val)
    }

    fn call(&mut self, cursor: &mut Cursor, name: &str, index: usize) -> Result<Val> {
        let arity = match Function::arity(name) {
            Some(arity) => arity,
            None => return Err(error!(FunctionArrayNotFound, ..index; name)),
        };
        let mut args = vec![];
        if cursor.accept(&Token::LParen) {
            if !cursor.accept(&Token::RParen) {
                loop {
                    if args.len() == *arity.end() {
                        return Err(error!(EndOfInstructionExpected, ..cursor.index()));
                    }
                    args.push(self.expr(cursor)?);
                    if cursor.accept(&Token::RParen) {
                        break;
                    }
                    if !cursor.accept(&Token::Comma) {
                        return Err(error!(ClosingBracketIsNeeded, ..cursor.index()));
                    }
                }
            }
        }
        if args.len() < *arity.start() {
            return Err(error!(NotEnoughParameters, ..index));
        }
        if name == "GET$" {
            return match self.console.get() {
                Some(ch) => Ok(Val::String(ch.to_string())),
                None => {
                    self.console.reset_break();
                    Err(error!(InterruptedByBreakKey, ..index))
                }
            };
        }
        Function::call(name, args, self.angle).map_err(|e| e.at_token(index))
    }

    /// `(n[, n...])` as numbers.
    pub(super) fn subscripts(&mut self, cursor: &mut Cursor) -> Result<Vec<f64>> {
        if !cursor.accept(&Token::LParen) {
            return Err(error!(OpeningBracketIsNeeded, ..cursor.index()));
        }
        let mut subs = vec![];
        loop {
            subs.push(self.number(cursor)?);
            if cursor.accept(&Token::RParen) {
                return Ok(subs);
            }
            if !cursor.accept(&Token::Comma) {
                return Err(error!(ClosingBracketIsNeeded, ..cursor.index()));
            }
        }
    }

    /// A numeric expression; strings fail at the expression's start.
    pub(super) fn number(&mut self, cursor: &mut Cursor) -> Result<f64> {
        let index = cursor.index();
        let val = self.expr(cursor)?;
        f64::try_from(val).map_err(|e| e.at_token(index))
    }

    /// A numeric expression rounded to an integer.
    pub(super) fn integer(&mut self, cursor: &mut Cursor) -> Result<i32> {
        let index = cursor.index();
        let n = self.number(cursor)?.round();
        if n < i32::min_value() as f64 || n > i32::max_value() as f64 {
            return Err(error!(NumberNotInAllowedRange, ..index));
        }
        Ok(n as i32)
    }

    pub(super) fn string(&mut self, cursor: &mut Cursor) -> Result<String> {
        let index = cursor.index();
        let val = self.expr(cursor)?;
        String::try_from(val).map_err(|e| e.at_token(index))
    }

    /// A variable or array element to assign to.
    pub(super) fn target(&mut self, cursor: &mut Cursor) -> Result<Target> {
        let index = cursor.index();
        let token = cursor.peek().clone();
        let ident = match token {
            Token::Ident(ident) => ident,
            t if t.is_reserved_word() => {
                return Err(error!(IsAKeywordAndCannotBeUsedAsAVariableName, ..index; t))
            }
            _ => return Err(error!(VariableNameIsNeeded, ..index)),
        };
        if token::is_function_name(&ident.upper()) {
            return Err(error!(IsAKeywordAndCannotBeUsedAsAVariableName, ..index; ident));
        }
        cursor.advance();
        if let Token::LParen = cursor.peek() {
            let subs = self.subscripts(cursor)?;
            return Ok(Target::Element(ident, subs));
        }
        Ok(Target::Scalar(ident))
    }

    pub(super) fn assign(&mut self, target: &Target, val: Val) -> Result<()> {
        match target {
            Target::Scalar(ident) => self.vars.store(ident, val),
            Target::Element(ident, subs) => self.vars.store_array(ident, subs.clone(), val),
        }
    }
}

impl Target {
    pub fn ident(&self) -> &Ident {
        match self {
            Target::Scalar(ident) | Target::Element(ident, _) => ident,
        }
    }
}
