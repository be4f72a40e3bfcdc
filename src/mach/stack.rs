use crate::error;
use crate::lang::{Error, ErrorCode};

type Result<T> = std::result::Result<T, Error>;

/// ## Stack enforced and size limited vector
///
/// Underflow reports the error the owning statement would raise,
/// e.g. `RETURN without any GOSUB`.

pub struct Stack<T> {
    underflow: ErrorCode,
    vec: Vec<T>,
}

impl<T: std::fmt::Debug> std::fmt::Debug for Stack<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self.vec)
    }
}

impl<T> Stack<T> {
    pub fn new(underflow: ErrorCode) -> Stack<T> {
        Stack {
            underflow,
            vec: vec![],
        }
    }
    fn max_len(&self) -> usize {
        u16::max_value() as usize
    }
    fn overflow_check(&self) -> Result<()> {
        if self.vec.len() > self.max_len() {
            Err(error!(TooManyForRepeatGosub))
        } else {
            Ok(())
        }
    }
    fn underflow_error(&self) -> Error {
        Error::new(self.underflow)
    }
    pub fn clear(&mut self) {
        self.vec.clear()
    }
    pub fn truncate(&mut self, len: usize) {
        self.vec.truncate(len)
    }
    pub fn retain<F: FnMut(&T) -> bool>(&mut self, f: F) {
        self.vec.retain(f)
    }
    pub fn len(&self) -> usize {
        self.vec.len()
    }
    pub fn is_empty(&self) -> bool {
        self.vec.is_empty()
    }
    pub fn last(&self) -> Result<&T> {
        match self.vec.last() {
            Some(v) => Ok(v),
            None => Err(self.underflow_error()),
        }
    }
    pub fn last_mut(&mut self) -> Result<&mut T> {
        if self.vec.is_empty() {
            return Err(self.underflow_error());
        }
        let last = self.vec.len() - 1;
        Ok(&mut self.vec[last])
    }
    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.vec.iter()
    }
    pub fn push(&mut self, val: T) -> Result<()> {
        self.vec.push(val);
        if let Err(e) = self.overflow_check() {
            self.vec.pop();
            return Err(e);
        }
        Ok(())
    }
    pub fn pop(&mut self) -> Result<T> {
        match self.vec.pop() {
            Some(v) => Ok(v),
            None => Err(self.underflow_error()),
        }
    }
}
