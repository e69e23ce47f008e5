use core::fmt;

#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum OpError {
    #[error("Missing operand(s).")]
    MissingOperands,
    #[error("Not enough elements to rotate stack.")]
    CannotRotate,
    #[error("Cannot swap items without 2 items to swap.")]
    CannotSwap,
    #[error("Cannot duplicate items from an empty stack.")]
    CannotDuplicate,
    #[error("Cannot pop from an empty stack.")]
    CannotPop,
    #[error("{0} is not supported here")]
    Unsupported(&'static str),
}

pub type OpResult<T = ()> = Result<T, OpError>;

/// The calculator's value stack. The last element is the top.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Stack {
    values: Vec<f64>,
}

impl Stack {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, val: f64) {
        calc_trace!("push {}", val);
        self.values.push(val);
    }

    pub fn pop(&mut self) -> Option<f64> {
        self.values.pop()
    }

    pub fn top(&self) -> Option<f64> {
        self.values.last().copied()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn clear(&mut self) {
        self.values.clear();
    }

    /// Removes the top `N` values and returns them in the order they were
    /// pushed, so index 0 is the deepest of the extracted values.
    ///
    /// Nothing is removed when fewer than `N` values are present.
    pub fn operands<const N: usize>(&mut self) -> OpResult<[f64; N]> {
        let len = self.values.len();
        if len < N {
            return Err(OpError::MissingOperands);
        }

        let mut out = [0.0; N];
        out.copy_from_slice(&self.values[len - N..]);
        self.values.truncate(len - N);
        Ok(out)
    }

    /// Moves the top element beneath all the others.
    pub fn rotate(&mut self) -> OpResult {
        if self.values.len() < 2 {
            return Err(OpError::CannotRotate);
        }
        self.values.rotate_right(1);
        Ok(())
    }

    pub fn swap(&mut self) -> OpResult {
        let [a, b] = self.operands().map_err(|_| OpError::CannotSwap)?;
        self.push(b);
        self.push(a);
        Ok(())
    }

    pub fn dup(&mut self) -> OpResult {
        let top = self.top().ok_or(OpError::CannotDuplicate)?;
        self.push(top);
        Ok(())
    }

    pub fn drop_top(&mut self) -> OpResult {
        self.pop().map(|_| ()).ok_or(OpError::CannotPop)
    }

    /// Values from bottom to top.
    pub fn as_slice(&self) -> &[f64] {
        &self.values
    }
}

impl From<Vec<f64>> for Stack {
    fn from(values: Vec<f64>) -> Self {
        Self { values }
    }
}

/// Formats a stack value with at most ten fractional digits, dropping
/// trailing zeros.
pub struct Formatted(pub f64);

impl fmt::Display for Formatted {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let val = self.0;
        if !val.is_finite() {
            return write!(f, "{val}");
        }

        let fixed = format!("{val:.10}");
        let trimmed = fixed.trim_end_matches('0').trim_end_matches('.');
        match trimmed {
            // rounding tiny negatives yields "-0.0000000000"
            "-0" => f.write_str("0"),
            s => f.write_str(s),
        }
    }
}
