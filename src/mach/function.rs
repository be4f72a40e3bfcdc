use super::val::{parse_number, render_number};
use super::Val;
use crate::error;
use crate::lang::Error;
use chrono::{Local, Timelike};
use rand::Rng;
use std::convert::TryFrom;
use std::ops::RangeInclusive;

type Result<T> = std::result::Result<T, Error>;

/// ## Built-in functions

pub struct Function {}

/// Unit of the angles taken by SIN, COS and TAN and given by ATN.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Angle {
    Radians,
    Degrees,
}

impl Default for Angle {
    fn default() -> Self {
        Angle::Radians
    }
}

impl Angle {
    fn to_radians(self, n: f64) -> f64 {
        match self {
            Angle::Radians => n,
            Angle::Degrees => n.to_radians(),
        }
    }

    fn from_radians(self, n: f64) -> f64 {
        match self {
            Angle::Radians => n,
            Angle::Degrees => n.to_degrees(),
        }
    }
}

impl Function {
    /// Accepted argument counts. `name` is upper case.
    pub fn arity(name: &str) -> Option<RangeInclusive<usize>> {
        match name {
            "PI" | "TRUE" | "FALSE" | "TIME" | "TIME$" | "DATE$" | "GET$" => Some(0..=0),
            "RND" => Some(0..=1),
            "ABS" | "ATN" | "COS" | "SIN" | "TAN" | "EXP" | "INT" | "LN" | "LOG" | "SQR"
            | "SGN" | "LEN" | "ASC" | "CHR$" | "STR$" | "VAL" | "HEX$" => Some(1..=1),
            "LEFT$" | "RIGHT$" | "STRING$" => Some(2..=2),
            "MID$" | "INSTR" => Some(2..=3),
            _ => None,
        }
    }

    /// Call a function other than `GET$`, which needs the console.
    pub fn call(name: &str, args: Vec<Val>, angle: Angle) -> Result<Val> {
        let mut args = args.into_iter();
        let mut next = || args.next().ok_or_else(|| error!(NotEnoughParameters));
        match name {
            "PI" => Ok(Val::Number(std::f64::consts::PI)),
            "TRUE" => Ok(Val::from_bool(true)),
            "FALSE" => Ok(Val::from_bool(false)),
            "TIME" => Ok(Function::time()),
            "TIME$" => Ok(Val::String(Local::now().format("%H:%M:%S").to_string())),
            "DATE$" => Ok(Val::String(Local::now().format("%d/%m/%Y").to_string())),
            "RND" => match next() {
                Ok(val) => Function::rnd(Some(f64::try_from(val)?)),
                Err(_) => Function::rnd(None),
            },
            "ABS" => Ok(Val::Number(f64::try_from(next()?)?.abs())),
            "ATN" => Ok(Val::Number(angle.from_radians(f64::try_from(next()?)?.atan()))),
            "COS" => Ok(Val::Number(angle.to_radians(f64::try_from(next()?)?).cos())),
            "SIN" => Ok(Val::Number(angle.to_radians(f64::try_from(next()?)?).sin())),
            "TAN" => Ok(Val::Number(angle.to_radians(f64::try_from(next()?)?).tan())),
            "EXP" => Ok(Val::Number(f64::try_from(next()?)?.exp())),
            "INT" => Ok(Val::Number(f64::try_from(next()?)?.floor())),
            "LN" => Function::positive(f64::try_from(next()?)?).map(|n| Val::Number(n.ln())),
            "LOG" => Function::positive(f64::try_from(next()?)?).map(|n| Val::Number(n.log10())),
            "SQR" => {
                let n = f64::try_from(next()?)?;
                if n < 0.0 {
                    return Err(error!(BadArgumentForFunction));
                }
                Ok(Val::Number(n.sqrt()))
            }
            "SGN" => {
                let n = f64::try_from(next()?)?;
                let sign = if n > 0.0 {
                    1.0
                } else if n < 0.0 {
                    -1.0
                } else {
                    0.0
                };
                Ok(Val::Number(sign))
            }
            "LEN" => Ok(Val::Number(String::try_from(next()?)?.chars().count() as f64)),
            "ASC" => match String::try_from(next()?)?.chars().next() {
                Some(ch) => Ok(Val::Number(ch as u32 as f64)),
                None => Err(error!(BadArgumentForFunction)),
            },
            "CHR$" => {
                let n = f64::try_from(next()?)?.round();
                if n < 0.0 || n > std::char::MAX as u32 as f64 {
                    return Err(error!(BadArgumentForFunction));
                }
                match std::char::from_u32(n as u32) {
                    Some(ch) => Ok(Val::String(ch.to_string())),
                    None => Err(error!(BadArgumentForFunction)),
                }
            }
            "STR$" => Ok(Val::String(render_number(f64::try_from(next()?)?))),
            "VAL" => Ok(Val::Number(Function::val(&String::try_from(next()?)?))),
            "HEX$" => {
                let n = f64::try_from(next()?)?.round() as i64;
                Ok(Val::String(format!("{:X}", n)))
            }
            "LEFT$" => {
                let s = String::try_from(next()?)?;
                let n = Function::count(next()?)?;
                Ok(Val::String(s.chars().take(n).collect()))
            }
            "RIGHT$" => {
                let s = String::try_from(next()?)?;
                let n = Function::count(next()?)?;
                let len = s.chars().count();
                Ok(Val::String(s.chars().skip(len.saturating_sub(n)).collect()))
            }
            "MID$" => {
                let s = String::try_from(next()?)?;
                let start = Function::count(next()?)?;
                if start < 1 {
                    return Err(error!(StringOffsetOutOfRange));
                }
                let len = match next() {
                    Ok(val) => Function::count(val)?,
                    Err(_) => usize::max_value(),
                };
                Ok(Val::String(s.chars().skip(start - 1).take(len).collect()))
            }
            "INSTR" => {
                let first = next()?;
                let (start, haystack) = match first {
                    Val::Number(n) => (Function::count(Val::Number(n))?, String::try_from(next()?)?),
                    Val::String(s) => (1, s),
                };
                let needle = String::try_from(next()?)?;
                Ok(Val::Number(Function::instr(start, &haystack, &needle)? as f64))
            }
            "STRING$" => {
                let n = Function::count(next()?)?;
                let s = String::try_from(next()?)?;
                if n.saturating_mul(s.len()) > u16::max_value() as usize {
                    return Err(error!(LengthOfStringTooGreat));
                }
                Ok(Val::String(s.repeat(n)))
            }
            _ => Err(error!(FunctionArrayNotFound; name)),
        }
    }

    fn positive(n: f64) -> Result<f64> {
        if n <= 0.0 {
            Err(error!(BadArgumentForFunction))
        } else {
            Ok(n)
        }
    }

    fn count(val: Val) -> Result<usize> {
        let n = f64::try_from(val)?.round();
        if n < 0.0 {
            return Err(error!(PositiveValueRequired));
        }
        Ok(n as usize)
    }

    fn rnd(arg: Option<f64>) -> Result<Val> {
        let mut rng = rand::thread_rng();
        match arg.map(f64::round) {
            None => Ok(Val::Number(rng.gen::<f64>())),
            Some(n) if n < 0.0 || !n.is_finite() => Err(error!(BadArgumentForFunction)),
            Some(n) if n <= 1.0 => Ok(Val::Number(rng.gen::<f64>())),
            Some(n) => Ok(Val::Number(rng.gen_range(1..=n as u64) as f64)),
        }
    }

    /// Hundredths of a second since midnight.
    fn time() -> Val {
        let now = Local::now();
        let centis = now.num_seconds_from_midnight() as u64 * 100
            + (now.nanosecond() % 1_000_000_000) as u64 / 10_000_000;
        Val::Number(centis as f64)
    }

    /// The leading number in `s`, or zero.
    fn val(s: &str) -> f64 {
        let s = s.trim();
        if s.starts_with(|c: char| c.is_ascii_alphabetic()) {
            return 0.0;
        }
        let mut end = 0;
        for (i, _) in s.char_indices().skip(1) {
            if parse_number(&s[..i]).is_ok() {
                end = i;
            }
        }
        if parse_number(s).is_ok() {
            end = s.len();
        }
        parse_number(&s[..end]).unwrap_or(0.0)
    }

    /// 1-based position of `needle` at or after `start`, 0 when absent.
    fn instr(start: usize, haystack: &str, needle: &str) -> Result<usize> {
        if start < 1 {
            return Err(error!(StringOffsetOutOfRange));
        }
        let chars: Vec<char> = haystack.chars().collect();
        let needle: Vec<char> = needle.chars().collect();
        if start > chars.len() + 1 {
            return Ok(0);
        }
        if needle.is_empty() {
            return Ok(start);
        }
        for i in (start - 1)..chars.len() {
            if chars[i..].starts_with(&needle) {
                return Ok(i + 1);
            }
        }
        Ok(0)
    }
}
