use core::f64::consts;

use super::{
    registry::{CommandRegistry, Operation, RegistryError, Step},
    runtime::Console,
    stack::{Formatted, OpError, OpResult, Stack},
};

const HELP: &str = "\
STACK OPERATIONS
[number] - push a number onto the stack
rot, r - rotate the stack (pop top off, move to bottom)
swp, s - swap the top two elements on the stack
dup, d - duplicate the top number on the stack
print, p - show the current stack contents
pop, x - pop the last element off the stack
clear, c - clear the stack

ARITHMETIC AND FUNCTIONS
mul, * - multiply the top two numbers on the stack; push result
add, + - add the top two numbers on the stack
div, / - divide the top two numbers (1 / 0)
sub, - - subtract the top two numbers (1 - 0)
pow, ^ - raise the second top number to the top number (1 ^ 0)
sin, cos, tan - trig functions
log10, log - take the log base 10 of the top number
loge, ln - take the natural log of the top number
logbase, lb - take the log base (1) of (0)

CALCULATOR COMMANDS
cls, z - clear the screen
help, h - show this help
exit - exit the calculator

CONSTANTS
pi, e";

type BuiltinFn = fn(&mut Stack, &mut dyn Console) -> OpResult;

/// A command that edits the stack in place and never halts. Failures are
/// reported on the console and leave the stack as it was.
#[derive(Clone, Copy)]
struct Builtin(BuiltinFn);

impl Operation for Builtin {
    fn apply(&self, mut stack: Stack, console: &mut dyn Console) -> Step {
        match (self.0)(&mut stack, console) {
            Ok(()) => {}
            // a missing terminal feature is a notice, not a diagnostic
            Err(e @ OpError::Unsupported(_)) => console.out(&e.to_string()),
            Err(e) => {
                calc_debug!("operation failed: {:?}", e);
                console.err(&e.to_string());
            }
        }
        Step::Continue(stack)
    }
}

struct Exit;

impl Operation for Exit {
    fn apply(&self, _: Stack, _: &mut dyn Console) -> Step {
        Step::Halt
    }
}

// Arithmetic and functions
type UnOp = fn(f64) -> f64;
type BinOp = fn(f64, f64) -> f64;

fn unary_op(stack: &mut Stack, op: UnOp) -> OpResult {
    let [x] = stack.operands()?;
    stack.push(op(x));
    Ok(())
}

fn binary_op(stack: &mut Stack, op: BinOp) -> OpResult {
    let [x, y] = stack.operands()?;
    stack.push(op(x, y));
    Ok(())
}

pub fn add(stack: &mut Stack, _: &mut dyn Console) -> OpResult {
    binary_op(stack, |x, y| x + y)
}

pub fn sub(stack: &mut Stack, _: &mut dyn Console) -> OpResult {
    binary_op(stack, |x, y| x - y)
}

pub fn mul(stack: &mut Stack, _: &mut dyn Console) -> OpResult {
    binary_op(stack, |x, y| x * y)
}

pub fn div(stack: &mut Stack, _: &mut dyn Console) -> OpResult {
    binary_op(stack, |x, y| x / y)
}

pub fn pow(stack: &mut Stack, _: &mut dyn Console) -> OpResult {
    binary_op(stack, f64::powf)
}

pub fn sin(stack: &mut Stack, _: &mut dyn Console) -> OpResult {
    unary_op(stack, f64::sin)
}

pub fn cos(stack: &mut Stack, _: &mut dyn Console) -> OpResult {
    unary_op(stack, f64::cos)
}

pub fn tan(stack: &mut Stack, _: &mut dyn Console) -> OpResult {
    unary_op(stack, f64::tan)
}

pub fn log10(stack: &mut Stack, _: &mut dyn Console) -> OpResult {
    unary_op(stack, f64::log10)
}

pub fn ln(stack: &mut Stack, _: &mut dyn Console) -> OpResult {
    unary_op(stack, f64::ln)
}

/// `base value lb` pushes log of `value` in `base`.
pub fn log_base(stack: &mut Stack, _: &mut dyn Console) -> OpResult {
    binary_op(stack, |base, val| val.log(base))
}

// Stack operations
pub fn rot(stack: &mut Stack, _: &mut dyn Console) -> OpResult {
    stack.rotate()
}

pub fn swap(stack: &mut Stack, _: &mut dyn Console) -> OpResult {
    stack.swap()
}

pub fn dup(stack: &mut Stack, _: &mut dyn Console) -> OpResult {
    stack.dup()
}

pub fn pop(stack: &mut Stack, _: &mut dyn Console) -> OpResult {
    stack.drop_top()
}

pub fn clear(stack: &mut Stack, _: &mut dyn Console) -> OpResult {
    stack.clear();
    Ok(())
}

/// Lists the stack from the bottom up; the top is index 0.
pub fn print(stack: &mut Stack, console: &mut dyn Console) -> OpResult {
    if stack.is_empty() {
        console.out("Empty stack.");
        return Ok(());
    }

    let depth = stack.len();
    for (i, val) in stack.as_slice().iter().enumerate() {
        console.out(&format!("{} : {}", depth - 1 - i, Formatted(*val)));
    }
    Ok(())
}

// Calculator commands
pub fn cls(_: &mut Stack, console: &mut dyn Console) -> OpResult {
    console.clear_screen()
}

pub fn help(_: &mut Stack, console: &mut dyn Console) -> OpResult {
    for line in HELP.lines() {
        console.out(line);
    }
    Ok(())
}

pub(crate) fn register_builtins(registry: &mut CommandRegistry) -> Result<(), RegistryError> {
    let builtins: [(&str, Option<&str>, BuiltinFn); 19] = [
        ("rot", Some("r"), rot),
        ("swp", Some("s"), swap),
        ("dup", Some("d"), dup),
        ("print", Some("p"), print),
        ("pop", Some("x"), pop),
        ("clear", Some("c"), clear),
        ("add", Some("+"), add),
        ("mul", Some("*"), mul),
        ("sub", Some("-"), sub),
        ("div", Some("/"), div),
        ("pow", Some("^"), pow),
        ("sin", None, sin),
        ("cos", None, cos),
        ("tan", None, tan),
        ("cls", Some("z"), cls),
        ("log10", Some("log"), log10),
        ("loge", Some("ln"), ln),
        ("logbase", Some("lb"), log_base),
        ("help", Some("h"), help),
    ];

    for (name, alias, op) in builtins {
        registry.register(name, alias, Builtin(op))?;
    }
    registry.register("exit", None, Exit)
}

pub(crate) fn register_constants(registry: &mut CommandRegistry) -> Result<(), RegistryError> {
    registry.register_constant("pi", consts::PI)?;
    registry.register_constant("e", consts::E)
}
