use std::io;

use super::{
    runtime::Console,
    stack::{OpError, OpResult},
};

pub fn assert_similar(expected: f64, actual: Option<f64>, decimals: u8) {
    let fac = 10f64.powi(decimals as _);
    let actual = actual.map(|val| (val * fac).round());
    let expected = (expected * fac).round();
    assert_eq!(actual, Some(expected));
}

/// Console that records everything written to it.
#[derive(Debug)]
pub struct MockConsole {
    pub lines: Vec<String>,
    pub errors: Vec<String>,
    pub prompts: usize,
    pub clears: usize,
    can_clear: bool,
}

impl Default for MockConsole {
    fn default() -> Self {
        Self {
            lines: vec![],
            errors: vec![],
            prompts: 0,
            clears: 0,
            can_clear: true,
        }
    }
}

impl MockConsole {
    pub fn without_clear() -> Self {
        Self {
            can_clear: false,
            ..Default::default()
        }
    }

    pub fn is_silent(&self) -> bool {
        self.lines.is_empty() && self.errors.is_empty()
    }
}

impl Console for MockConsole {
    fn out(&mut self, line: &str) {
        self.lines.push(line.to_string());
    }

    fn err(&mut self, line: &str) {
        self.errors.push(line.to_string());
    }

    fn prompt(&mut self, _: &str) -> io::Result<()> {
        self.prompts += 1;
        Ok(())
    }

    fn clear_screen(&mut self) -> OpResult {
        if !self.can_clear {
            return Err(OpError::Unsupported("cls"));
        }
        self.clears += 1;
        Ok(())
    }
}
