use crate::error;
use crate::lang::Error;
use std::convert::TryFrom;

type Result<T> = std::result::Result<T, Error>;

/// ## Runtime values
///
/// Truth is `Number(-1.0)`, falsehood `Number(0.0)`.

#[derive(Debug, PartialEq, Clone)]
pub enum Val {
    Number(f64),
    String(String),
}

impl Val {
    pub fn from_bool(b: bool) -> Val {
        if b {
            Val::Number(-1.0)
        } else {
            Val::Number(0.0)
        }
    }

    pub fn is_string(&self) -> bool {
        matches!(self, Val::String(_))
    }

    /// Number for a condition: -1 is true and 0 is false after rounding.
    pub fn truth(&self) -> Result<bool> {
        match self {
            Val::Number(n) => {
                let r = n.round();
                if r == -1.0 {
                    Ok(true)
                } else if r == 0.0 {
                    Ok(false)
                } else {
                    Err(error!(TrueFalseValueNeeded))
                }
            }
            Val::String(_) => Err(error!(TrueFalseValueNeeded)),
        }
    }

    /// A string operand, numbers rendered the way PRINT shows them.
    pub fn into_string(self) -> String {
        match self {
            Val::Number(n) => render_number(n),
            Val::String(s) => s,
        }
    }
}

impl TryFrom<Val> for f64 {
    type Error = Error;
    fn try_from(val: Val) -> Result<f64> {
        match val {
            Val::Number(n) => Ok(n),
            Val::String(_) => Err(error!(NumericExpressionNeeded)),
        }
    }
}

impl TryFrom<Val> for String {
    type Error = Error;
    fn try_from(val: Val) -> Result<String> {
        match val {
            Val::String(s) => Ok(s),
            Val::Number(_) => Err(error!(StringExpressionNeeded)),
        }
    }
}

impl std::fmt::Display for Val {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Val::Number(n) => write!(f, "{}", render_number(*n)),
            Val::String(s) => write!(f, "{}", s),
        }
    }
}

/// Canonical number text. Large and tiny magnitudes use
/// scientific notation with at most five fractional digits.
pub fn render_number(value: f64) -> String {
    if value == 0.0 {
        return "0".to_string();
    }
    if value.is_nan() {
        return "NaN".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "Inf" } else { "-Inf" }.to_string();
    }
    let abs = value.abs();
    if abs > 9_999_999.0 || abs < 0.001 {
        let s = format!("{:.5e}", value);
        let (mantissa, exponent) = match s.find('e') {
            Some(pos) => (&s[..pos], &s[pos + 1..]),
            None => (s.as_str(), "0"),
        };
        let mantissa = trim_fraction(mantissa);
        let (sign, digits) = match exponent.strip_prefix('-') {
            Some(digits) => ('-', digits),
            None => ('+', exponent),
        };
        format!("{}e{}{:0>2}", mantissa, sign, digits)
    } else {
        trim_fraction(&format!("{:.6}", value)).to_string()
    }
}

fn trim_fraction(s: &str) -> &str {
    if s.contains('.') {
        s.trim_end_matches('0').trim_end_matches('.')
    } else {
        s
    }
}

/// Parse numeric literal text. Hex literals start with `&`.
pub fn parse_number(s: &str) -> Result<f64> {
    if let Some(hex) = s.strip_prefix('&') {
        return match i64::from_str_radix(hex, 16) {
            Ok(n) => Ok(n as f64),
            Err(_) => Err(error!(CouldNotInterpretAsANumber; s)),
        };
    }
    match s.parse::<f64>() {
        Ok(n) => Ok(n),
        Err(_) => Err(error!(CouldNotInterpretAsANumber; s)),
    }
}

/// Round half to even, the rule for `%` variables.
pub fn round_even(n: f64) -> f64 {
    let r = n.round();
    if (n - n.trunc()).abs() == 0.5 && r % 2.0 != 0.0 {
        r - n.signum()
    } else {
        r
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_fixed() {
        assert_eq!(render_number(14.0), "14");
        assert_eq!(render_number(-2.5), "-2.5");
        assert_eq!(render_number(0.125), "0.125");
        assert_eq!(render_number(9_999_999.0), "9999999");
        assert_eq!(render_number(0.0), "0");
    }

    #[test]
    fn test_render_scientific() {
        assert_eq!(render_number(2_200_000_0.0), "2.2e+07");
        assert_eq!(render_number(0.0001344), "1.344e-04");
        assert_eq!(render_number(-12_345_678.0), "-1.23457e+07");
    }

    #[test]
    fn test_parse_number() {
        assert_eq!(parse_number("2.34E+4").unwrap(), 23400.0);
        assert_eq!(parse_number("&5D").unwrap(), 93.0);
        assert_eq!(parse_number("-1.0").unwrap(), -1.0);
        assert_eq!(
            parse_number("1.344E-4.32").unwrap_err().message(),
            "1.344E-4.32 could not be interpreted as a number"
        );
    }

    #[test]
    fn test_round_even() {
        assert_eq!(round_even(1.6), 2.0);
        assert_eq!(round_even(2.5), 2.0);
        assert_eq!(round_even(3.5), 4.0);
        assert_eq!(round_even(-2.5), -2.0);
        assert_eq!(round_even(-1.4), -1.0);
    }

    #[test]
    fn test_truth() {
        assert_eq!(Val::Number(-1.0).truth().unwrap(), true);
        assert_eq!(Val::Number(-0.6).truth().unwrap(), true);
        assert_eq!(Val::Number(0.2).truth().unwrap(), false);
        assert!(Val::Number(5.0).truth().is_err());
    }
}
