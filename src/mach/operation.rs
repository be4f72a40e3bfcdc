use super::Val;
use crate::error;
use crate::lang::token::Operator;
use crate::lang::Error;
use std::cmp::Ordering;

type Result<T> = std::result::Result<T, Error>;

pub struct Operation {}

impl Operation {
    pub fn binary(op: Operator, lhs: Val, rhs: Val) -> Result<Val> {
        use Operator::*;
        match op {
            Caret => Operation::power(lhs, rhs),
            Multiply => Operation::multiply(lhs, rhs),
            Divide => Operation::divide(lhs, rhs),
            DivideInt => Operation::divide_int(lhs, rhs),
            Modulus => Operation::modulus(lhs, rhs),
            Plus => Operation::sum(lhs, rhs),
            Minus => Operation::subtract(lhs, rhs),
            Equal => Operation::equal(lhs, rhs),
            InterestinglyEqual => Operation::interestingly_equal(lhs, rhs),
            NotEqual | GreaterLess => Operation::not_equal(lhs, rhs),
            Less => Operation::compare(lhs, rhs, |o| o == Ordering::Less),
            LessEqual | EqualLess => Operation::compare(lhs, rhs, |o| o != Ordering::Greater),
            Greater => Operation::compare(lhs, rhs, |o| o == Ordering::Greater),
            GreaterEqual | EqualGreater => Operation::compare(lhs, rhs, |o| o != Ordering::Less),
            And => Operation::bitwise(lhs, rhs, |l, r| l & r),
            Or => Operation::bitwise(lhs, rhs, |l, r| l | r),
            Xor => Operation::bitwise(lhs, rhs, |l, r| l ^ r),
            Not => Err(error!(InvalidExpressionFound)),
        }
    }

    fn numbers(lhs: Val, rhs: Val) -> Result<(f64, f64)> {
        match (lhs, rhs) {
            (Val::Number(l), Val::Number(r)) => Ok((l, r)),
            _ => Err(error!(InvalidExpressionFound)),
        }
    }

    pub fn negate(val: Val) -> Result<Val> {
        match val {
            Val::Number(n) => Ok(Val::Number(-n)),
            Val::String(_) => Err(error!(NumericExpressionNeeded)),
        }
    }

    pub fn not(val: Val) -> Result<Val> {
        match val {
            Val::Number(n) => Ok(Val::Number(!(n.round() as i64) as f64)),
            Val::String(_) => Err(error!(NumericExpressionNeeded)),
        }
    }

    pub fn power(lhs: Val, rhs: Val) -> Result<Val> {
        let (l, r) = Operation::numbers(lhs, rhs)?;
        Ok(Val::Number(l.powf(r)))
    }

    pub fn multiply(lhs: Val, rhs: Val) -> Result<Val> {
        let (l, r) = Operation::numbers(lhs, rhs)?;
        Ok(Val::Number(l * r))
    }

    pub fn divide(lhs: Val, rhs: Val) -> Result<Val> {
        let (l, r) = Operation::numbers(lhs, rhs)?;
        if r == 0.0 {
            return Err(error!(TryingToDivideByZero));
        }
        Ok(Val::Number(l / r))
    }

    /// Both operands truncate toward zero first.
    pub fn divide_int(lhs: Val, rhs: Val) -> Result<Val> {
        let (l, r) = Operation::numbers(lhs, rhs)?;
        let (l, r) = (l.trunc() as i64, r.trunc() as i64);
        match l.checked_div(r) {
            Some(n) => Ok(Val::Number(n as f64)),
            None => Err(error!(TryingToDivideByZero)),
        }
    }

    pub fn modulus(lhs: Val, rhs: Val) -> Result<Val> {
        let (l, r) = Operation::numbers(lhs, rhs)?;
        let (l, r) = (l.trunc() as i64, r.trunc() as i64);
        match l.checked_rem(r) {
            Some(n) => Ok(Val::Number(n as f64)),
            None => Err(error!(TryingToDivideByZero)),
        }
    }

    /// Concatenates when either side is a string.
    pub fn sum(lhs: Val, rhs: Val) -> Result<Val> {
        match (lhs, rhs) {
            (Val::Number(l), Val::Number(r)) => Ok(Val::Number(l + r)),
            (lhs, rhs) => Ok(Val::String(lhs.into_string() + &rhs.into_string())),
        }
    }

    pub fn subtract(lhs: Val, rhs: Val) -> Result<Val> {
        let (l, r) = Operation::numbers(lhs, rhs)?;
        Ok(Val::Number(l - r))
    }

    pub fn equal(lhs: Val, rhs: Val) -> Result<Val> {
        Ok(Val::from_bool(Operation::equal_bool(lhs, rhs)))
    }

    pub fn not_equal(lhs: Val, rhs: Val) -> Result<Val> {
        Ok(Val::from_bool(!Operation::equal_bool(lhs, rhs)))
    }

    fn equal_bool(lhs: Val, rhs: Val) -> bool {
        match (lhs, rhs) {
            (Val::Number(l), Val::Number(r)) => l == r,
            (lhs, rhs) => lhs.into_string() == rhs.into_string(),
        }
    }

    /// Case-insensitive for strings, plain equality for numbers.
    pub fn interestingly_equal(lhs: Val, rhs: Val) -> Result<Val> {
        let b = match (lhs, rhs) {
            (Val::Number(l), Val::Number(r)) => l == r,
            (lhs, rhs) => lhs.into_string().to_lowercase() == rhs.into_string().to_lowercase(),
        };
        Ok(Val::from_bool(b))
    }

    /// Ordering comparisons; strings compare by weight.
    fn compare(lhs: Val, rhs: Val, test: fn(Ordering) -> bool) -> Result<Val> {
        let ordering = match (lhs, rhs) {
            (Val::Number(l), Val::Number(r)) => match l.partial_cmp(&r) {
                Some(o) => o,
                None => return Ok(Val::from_bool(false)),
            },
            (lhs, rhs) => weigh(&lhs.into_string()).cmp(&weigh(&rhs.into_string())),
        };
        Ok(Val::from_bool(test(ordering)))
    }

    fn bitwise(lhs: Val, rhs: Val, op: fn(i64, i64) -> i64) -> Result<Val> {
        let (l, r) = Operation::numbers(lhs, rhs)?;
        Ok(Val::Number(op(l.round() as i64, r.round() as i64) as f64))
    }
}

/// The sum of a string's code points.
pub fn weigh(s: &str) -> u64 {
    s.chars().map(|c| c as u64).sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn s(s: &str) -> Val {
        Val::String(s.to_string())
    }

    fn n(n: f64) -> Val {
        Val::Number(n)
    }

    #[test]
    fn test_string_weight_ordering() {
        assert_eq!(Operation::binary(Operator::Greater, s("Freda"), s("Fred")).unwrap(), n(-1.0));
        assert_eq!(Operation::binary(Operator::Greater, s("banana"), s("BANANA")).unwrap(), n(-1.0));
        assert_eq!(Operation::binary(Operator::Greater, s("Class A"), s("Class 1")).unwrap(), n(-1.0));
    }

    #[test]
    fn test_string_equality() {
        assert_eq!(Operation::binary(Operator::Equal, s("banana"), s("BANANA")).unwrap(), n(0.0));
        assert_eq!(
            Operation::binary(Operator::InterestinglyEqual, s("banana"), s("BANANA")).unwrap(),
            n(-1.0)
        );
        assert_eq!(Operation::binary(Operator::GreaterLess, s("a"), s("b")).unwrap(), n(-1.0));
    }

    #[test]
    fn test_mixed_sum() {
        assert_eq!(Operation::sum(s("Front"), n(242.0)).unwrap(), s("Front242"));
        assert_eq!(Operation::sum(n(1.5), s("x")).unwrap(), s("1.5x"));
        assert!(Operation::subtract(s("Front"), n(242.0)).is_err());
    }

    #[test]
    fn test_integer_division() {
        assert_eq!(Operation::divide_int(n(6.3), n(2.2)).unwrap(), n(3.0));
        assert_eq!(Operation::divide_int(n(-7.0), n(2.0)).unwrap(), n(-3.0));
        assert_eq!(Operation::modulus(n(-7.0), n(2.0)).unwrap(), n(-1.0));
        assert!(Operation::divide_int(n(1.0), n(0.5)).is_err());
        assert!(Operation::divide(n(1.0), n(0.0)).is_err());
    }

    #[test]
    fn test_logic() {
        assert_eq!(Operation::binary(Operator::And, n(4.0), n(2.0)).unwrap(), n(0.0));
        assert_eq!(Operation::binary(Operator::Or, n(-1.0), n(0.0)).unwrap(), n(-1.0));
        assert_eq!(Operation::binary(Operator::Xor, n(-1.0), n(-1.0)).unwrap(), n(0.0));
        assert_eq!(Operation::not(n(-1.0)).unwrap(), n(0.0));
        assert_eq!(Operation::not(n(0.0)).unwrap(), n(-1.0));
    }
}
