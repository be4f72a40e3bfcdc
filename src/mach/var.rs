use super::val::round_even;
use super::Val;
use crate::error;
use crate::lang::{Error, Ident};
use std::collections::HashMap;

type Result<T> = std::result::Result<T, Error>;

/// ## Variable memory
///
/// Scalars and arrays live in separate namespaces, so `A` and `A(3)`
/// can coexist.

#[derive(Debug, Default, Clone)]
pub struct Var {
    vars: HashMap<String, Val>,
    dims: HashMap<String, Array>,
}

#[derive(Debug, Clone)]
struct Array {
    bounds: Vec<usize>,
    vals: Vec<Val>,
}

impl Var {
    pub fn new() -> Var {
        Var::default()
    }

    pub fn clear(&mut self) {
        self.vars.clear();
        self.dims.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.vars.is_empty() && self.dims.is_empty()
    }

    pub fn fetch(&self, ident: &Ident) -> Option<Val> {
        self.vars.get(ident.name()).cloned()
    }

    /// The value a fresh variable of this type starts with.
    pub fn default_for(ident: &Ident) -> Val {
        if ident.is_string() {
            Val::String(String::new())
        } else {
            Val::Number(0.0)
        }
    }

    pub fn store(&mut self, ident: &Ident, value: Val) -> Result<()> {
        let value = Var::coerce(ident, value)?;
        match self.vars.get_mut(ident.name()) {
            Some(var) => *var = value,
            None => {
                self.vars.insert(ident.name().to_string(), value);
            }
        }
        Ok(())
    }

    /// `value` converted for storage in `ident`.
    pub fn coerce(ident: &Ident, value: Val) -> Result<Val> {
        match (ident, value) {
            (Ident::String(_), Val::String(s)) => Ok(Val::String(s)),
            (Ident::String(_), Val::Number(_)) => Err(error!(StringExpressionNeeded)),
            (_, Val::String(_)) => Err(error!(NumericExpressionNeeded)),
            (Ident::Integer(_), Val::Number(n)) => Ok(Val::Number(round_even(n))),
            (Ident::Float(_), Val::Number(n)) => Ok(Val::Number(n)),
        }
    }

    pub fn is_array(&self, ident: &Ident) -> bool {
        self.dims.contains_key(ident.name())
    }

    /// Declare an array; each bound is the highest usable subscript.
    pub fn dimension_array(&mut self, ident: &Ident, bounds: Vec<f64>) -> Result<()> {
        if self.dims.contains_key(ident.name()) {
            return Err(error!(ArrayAlreadyDimensioned; ident));
        }
        let mut size: usize = 1;
        let mut ubounds = vec![];
        for b in bounds {
            let b = b.round();
            if b < 0.0 || b > u16::max_value() as f64 {
                return Err(error!(ArraySubscriptIsWrong));
            }
            let b = b as usize;
            size = match size.checked_mul(b + 1) {
                Some(n) if n <= 1 << 20 => n,
                _ => return Err(error!(ArraySubscriptIsWrong)),
            };
            ubounds.push(b);
        }
        let array = Array {
            bounds: ubounds,
            vals: vec![Var::default_for(ident); size],
        };
        self.dims.insert(ident.name().to_string(), array);
        Ok(())
    }

    pub fn fetch_array(&self, ident: &Ident, subs: Vec<f64>) -> Result<Val> {
        let array = match self.dims.get(ident.name()) {
            Some(array) => array,
            None => return Err(error!(FunctionArrayNotFound; ident)),
        };
        let offset = array.offset(&subs)?;
        Ok(array.vals[offset].clone())
    }

    pub fn store_array(&mut self, ident: &Ident, subs: Vec<f64>, value: Val) -> Result<()> {
        let value = Var::coerce(ident, value)?;
        let array = match self.dims.get_mut(ident.name()) {
            Some(array) => array,
            None => return Err(error!(FunctionArrayNotFound; ident)),
        };
        let offset = array.offset(&subs)?;
        array.vals[offset] = value;
        Ok(())
    }
}

impl Array {
    fn offset(&self, subs: &[f64]) -> Result<usize> {
        if subs.len() != self.bounds.len() {
            return Err(error!(WrongNumberOfSubscripts));
        }
        let mut offset = 0;
        for (sub, bound) in subs.iter().zip(&self.bounds) {
            let sub = sub.round();
            if sub < 0.0 || sub > *bound as f64 {
                return Err(error!(ArraySubscriptIsWrong));
            }
            offset = offset * (bound + 1) + sub as usize;
        }
        Ok(offset)
    }
}
