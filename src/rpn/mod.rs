pub mod inter;
mod ops;
pub mod registry;
pub mod runtime;
pub mod stack;

#[cfg(test)]
pub mod util;
