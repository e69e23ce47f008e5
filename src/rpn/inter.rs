use std::io::{self, BufRead};

use super::{
    registry::{CommandRegistry, RegistryError, Step},
    runtime::Console,
    stack::Stack,
};

#[derive(thiserror::Error, Debug)]
pub enum CalcError {
    #[error(transparent)]
    Registry(#[from] RegistryError),
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum State {
    Running,
    Halted,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReplOptions {
    pub prompt: String,
    /// Print the banner and usage hints before the first prompt.
    pub banner: bool,
}

impl Default for ReplOptions {
    fn default() -> Self {
        Self {
            prompt: "> ".to_string(),
            banner: true,
        }
    }
}

pub fn banner() -> String {
    format!(
        "{} {}, by {}",
        env!("CARGO_PKG_NAME"),
        env!("CARGO_PKG_VERSION"),
        env!("CARGO_PKG_AUTHORS")
    )
}

#[derive(Debug, PartialEq)]
enum Token<'a> {
    Blank,
    Number(f64),
    InvalidNumber,
    Word(&'a str),
}

fn classify(line: &str) -> Token<'_> {
    let line = line.trim();
    if line.is_empty() {
        return Token::Blank;
    }
    match line.parse::<f64>() {
        // rejects "nan", "inf" and literals that overflow to infinity
        Ok(num) if !num.is_finite() => Token::InvalidNumber,
        Ok(num) => Token::Number(num),
        Err(_) => Token::Word(line),
    }
}

/// The read-evaluate-print loop over a single stack.
pub struct Calculator<'a> {
    registry: &'a CommandRegistry,
    stack: Stack,
}

impl<'a> Calculator<'a> {
    pub fn new(registry: &'a CommandRegistry) -> Self {
        Self {
            registry,
            stack: Stack::new(),
        }
    }

    pub fn stack(&self) -> &Stack {
        &self.stack
    }

    /// Evaluates one input line.
    pub fn eval(&mut self, line: &str, console: &mut dyn Console) -> State {
        match classify(line) {
            Token::Blank => {}
            Token::Number(num) => self.stack.push(num),
            Token::InvalidNumber => console.err("Invalid number."),
            Token::Word(word) => match self.registry.resolve(word) {
                None => console.err(&format!(
                    "{word} is not a command, constant, or valid number."
                )),
                Some(op) => {
                    calc_trace!("apply {}", word);
                    let stack = core::mem::take(&mut self.stack);
                    match op.apply(stack, console) {
                        Step::Continue(stack) => self.stack = stack,
                        Step::Halt => {
                            calc_info!("halted by {}", word);
                            return State::Halted;
                        }
                    }
                }
            },
        }
        State::Running
    }

    /// Prompts for and evaluates lines until a command halts or `input`
    /// runs dry.
    pub fn run<R: BufRead>(
        &mut self,
        mut input: R,
        console: &mut dyn Console,
        options: &ReplOptions,
    ) -> Result<(), CalcError> {
        if options.banner {
            console.out(&banner());
            console.out("");
            console.out("h/help for help");
            console.out("exit to exit");
            console.out("");
        }

        let mut line = String::new();
        loop {
            console.prompt(&options.prompt)?;
            line.clear();
            if input.read_line(&mut line)? == 0 {
                calc_info!("end of input");
                return Ok(());
            }
            if self.eval(&line, console) == State::Halted {
                return Ok(());
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rpn::util::MockConsole;

    fn eval_all(calc: &mut Calculator, console: &mut MockConsole, lines: &[&str]) -> State {
        for line in lines {
            if calc.eval(line, console) == State::Halted {
                return State::Halted;
            }
        }
        State::Running
    }

    #[test]
    fn test_classify() {
        assert_eq!(classify("  3.5 \n"), Token::Number(3.5));
        assert_eq!(classify("-2"), Token::Number(-2.0));
        assert_eq!(classify("1e3"), Token::Number(1000.0));
        assert_eq!(classify(""), Token::Blank);
        assert_eq!(classify("   "), Token::Blank);
        assert_eq!(classify("inf"), Token::InvalidNumber);
        assert_eq!(classify("-Infinity"), Token::InvalidNumber);
        assert_eq!(classify("NaN"), Token::InvalidNumber);
        assert_eq!(classify("1e999"), Token::InvalidNumber);
        assert_eq!(classify("-"), Token::Word("-"));
        assert_eq!(classify(" e "), Token::Word("e"));
    }

    #[test]
    fn test_push_and_print() -> anyhow::Result<()> {
        let registry = CommandRegistry::with_builtins()?;
        let mut calc = Calculator::new(&registry);
        let mut console = MockConsole::default();

        eval_all(&mut calc, &mut console, &["3.5", "p"]);
        assert_eq!(console.lines, vec!["0 : 3.5"]);
        assert!(console.errors.is_empty());
        Ok(())
    }

    #[test]
    fn test_arithmetic_session() -> anyhow::Result<()> {
        let registry = CommandRegistry::with_builtins()?;
        let mut calc = Calculator::new(&registry);
        let mut console = MockConsole::default();

        eval_all(&mut calc, &mut console, &["5", "2", "sub", "4", "*"]);
        assert_eq!(calc.stack().as_slice(), &[12.0]);

        eval_all(&mut calc, &mut console, &["c", "2", "8", "lb"]);
        assert_eq!(calc.stack().len(), 1);
        crate::rpn::util::assert_similar(3.0, calc.stack().top(), 10);

        eval_all(&mut calc, &mut console, &["c", "1", "0", "/"]);
        assert_eq!(calc.stack().as_slice(), &[f64::INFINITY]);
        assert!(console.errors.is_empty());
        Ok(())
    }

    #[test]
    fn test_constants() -> anyhow::Result<()> {
        let registry = CommandRegistry::with_builtins()?;
        let mut calc = Calculator::new(&registry);
        let mut console = MockConsole::default();

        eval_all(&mut calc, &mut console, &["pi", "e"]);
        assert_eq!(
            calc.stack().as_slice(),
            &[core::f64::consts::PI, core::f64::consts::E]
        );
        Ok(())
    }

    #[test]
    fn test_unknown_token() -> anyhow::Result<()> {
        let registry = CommandRegistry::with_builtins()?;
        let mut calc = Calculator::new(&registry);
        let mut console = MockConsole::default();

        calc.eval("1", &mut console);
        assert_eq!(calc.eval("foo", &mut console), State::Running);
        assert_eq!(
            console.errors,
            vec!["foo is not a command, constant, or valid number."]
        );
        assert_eq!(calc.stack().as_slice(), &[1.0]);

        // lookups are case sensitive
        calc.eval("ADD", &mut console);
        assert_eq!(console.errors.len(), 2);

        calc.eval("2", &mut console);
        calc.eval("+", &mut console);
        assert_eq!(calc.stack().as_slice(), &[3.0]);
        Ok(())
    }

    #[test]
    fn test_invalid_numbers_and_blank_lines() -> anyhow::Result<()> {
        let registry = CommandRegistry::with_builtins()?;
        let mut calc = Calculator::new(&registry);
        let mut console = MockConsole::default();

        let state = eval_all(&mut calc, &mut console, &["inf", "nan", "1e999", "", "  "]);
        assert_eq!(state, State::Running);
        assert!(calc.stack().is_empty());
        assert_eq!(console.errors, vec!["Invalid number."; 3]);
        Ok(())
    }

    #[test]
    fn test_shortfall_is_bit_exact() -> anyhow::Result<()> {
        let registry = CommandRegistry::with_builtins()?;
        let mut calc = Calculator::new(&registry);
        let mut console = MockConsole::default();

        calc.eval("-0", &mut console);
        let before: Vec<u64> = calc.stack().as_slice().iter().map(|v| v.to_bits()).collect();
        for cmd in ["add", "-", "pow", "lb", "swp", "rot"] {
            calc.eval(cmd, &mut console);
        }
        let after: Vec<u64> = calc.stack().as_slice().iter().map(|v| v.to_bits()).collect();
        assert_eq!(before, after);
        assert_eq!(console.errors.len(), 6);
        Ok(())
    }

    #[test]
    fn test_exit_halts_with_values() -> anyhow::Result<()> {
        let registry = CommandRegistry::with_builtins()?;
        let mut calc = Calculator::new(&registry);
        let mut console = MockConsole::default();

        let state = eval_all(&mut calc, &mut console, &["1", "2", "exit", "3"]);
        assert_eq!(state, State::Halted);
        Ok(())
    }

    #[test]
    fn test_run_stops_at_exit() -> anyhow::Result<()> {
        let registry = CommandRegistry::with_builtins()?;
        let mut calc = Calculator::new(&registry);
        let mut console = MockConsole::default();

        let input: &[u8] = b"2\n3\n+\np\nexit\n4\np\n";
        calc.run(input, &mut console, &ReplOptions::default())?;

        assert_eq!(console.lines[0], banner());
        assert_eq!(console.lines.last().map(String::as_str), Some("0 : 5"));
        assert_eq!(console.prompts, 5);
        assert_eq!(calc.stack().as_slice(), &[] as &[f64]);
        Ok(())
    }

    #[test]
    fn test_run_stops_at_end_of_input() -> anyhow::Result<()> {
        let registry = CommandRegistry::with_builtins()?;
        let mut calc = Calculator::new(&registry);
        let mut console = MockConsole::default();
        let options = ReplOptions {
            banner: false,
            ..Default::default()
        };

        let input: &[u8] = b"  7  \n\nd\n*";
        calc.run(input, &mut console, &options)?;

        assert!(console.is_silent());
        assert_eq!(calc.stack().as_slice(), &[49.0]);
        assert_eq!(console.prompts, 5);
        Ok(())
    }
}
