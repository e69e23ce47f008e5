#[macro_use]
mod macros;

pub mod rpn;

pub mod prelude {
    pub use crate::rpn::{
        inter::{Calculator, CalcError, ReplOptions, State},
        registry::{CommandRegistry, Operation, RegistryError, Step},
        runtime::{Console, StdConsole},
        stack::{OpError, Stack},
    };
}
