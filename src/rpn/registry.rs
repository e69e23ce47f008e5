use std::{collections::HashMap, rc::Rc};

use super::{runtime::Console, stack::Stack};

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum RegistryError {
    #[error("A command is already registered with the key {0}.")]
    DuplicateKey(String),
}

/// Result of applying an operation: keep going with a stack, or stop.
#[derive(Debug, PartialEq)]
pub enum Step {
    Continue(Stack),
    Halt,
}

pub trait Operation {
    fn apply(&self, stack: Stack, console: &mut dyn Console) -> Step;
}

impl<F> Operation for F
where
    F: Fn(Stack, &mut dyn Console) -> Step,
{
    fn apply(&self, stack: Stack, console: &mut dyn Console) -> Step {
        self(stack, console)
    }
}

/// Pushes a fixed value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Constant(pub f64);

impl Operation for Constant {
    fn apply(&self, mut stack: Stack, _: &mut dyn Console) -> Step {
        stack.push(self.0);
        Step::Continue(stack)
    }
}

/// Append-only table from command names and aliases to operations.
#[derive(Default)]
pub struct CommandRegistry {
    commands: HashMap<String, Rc<dyn Operation>>,
}

impl CommandRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Binds `name`, and `alias` if given, to `op`.
    ///
    /// Fails without touching the table if either token is taken.
    pub fn register(
        &mut self,
        name: &str,
        alias: Option<&str>,
        op: impl Operation + 'static,
    ) -> Result<(), RegistryError> {
        if self.commands.contains_key(name) {
            return Err(RegistryError::DuplicateKey(name.to_string()));
        }
        if let Some(alias) = alias {
            if alias == name || self.commands.contains_key(alias) {
                return Err(RegistryError::DuplicateKey(alias.to_string()));
            }
        }

        let op: Rc<dyn Operation> = Rc::new(op);
        if let Some(alias) = alias {
            self.commands.insert(alias.to_string(), Rc::clone(&op));
        }
        self.commands.insert(name.to_string(), op);
        Ok(())
    }

    pub fn register_constant(&mut self, name: &str, value: f64) -> Result<(), RegistryError> {
        self.register(name, None, Constant(value))
    }

    pub fn resolve(&self, token: &str) -> Option<&dyn Operation> {
        self.commands.get(token).map(|op| op.as_ref())
    }

    pub fn contains(&self, token: &str) -> bool {
        self.commands.contains_key(token)
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// All registered names and aliases, sorted.
    pub fn tokens(&self) -> Vec<&str> {
        let mut tokens: Vec<_> = self.commands.keys().map(String::as_str).collect();
        tokens.sort_unstable();
        tokens
    }

    /// The registry with every built-in command and constant.
    pub fn with_builtins() -> Result<Self, RegistryError> {
        let mut registry = Self::new();
        super::ops::register_builtins(&mut registry)?;
        super::ops::register_constants(&mut registry)?;
        calc_debug!("registered {} tokens", registry.len());
        calc_trace!("tokens: {:?}", registry.tokens());
        Ok(registry)
    }
}
