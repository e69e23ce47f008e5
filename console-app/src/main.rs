use std::io::{self, BufRead};

use anyhow::Context;
use clap::Parser;
use rpncalc::prelude::*;

/// Interactive reverse polish notation calculator
#[derive(clap::Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Don't print the banner and usage hints
    #[arg(short, long)]
    quiet: bool,

    /// Prompt shown before each line of input
    #[arg(short, long, default_value = "> ")]
    prompt: String,
}

impl From<Args> for ReplOptions {
    fn from(args: Args) -> Self {
        Self {
            prompt: args.prompt,
            banner: !args.quiet,
        }
    }
}

fn main() -> anyhow::Result<()> {
    pretty_env_logger::init();
    let args = Args::parse();
    log::debug!("{args:?}");

    start(
        CommandRegistry::with_builtins(),
        io::stdin().lock(),
        &mut StdConsole,
        &args.into(),
    )
}

/// Runs a session, refusing to read any input if the command table is broken.
fn start<R: BufRead>(
    registry: Result<CommandRegistry, RegistryError>,
    input: R,
    console: &mut dyn Console,
    options: &ReplOptions,
) -> anyhow::Result<()> {
    let registry = registry.context("Failed to register calculator commands")?;
    let mut calc = Calculator::new(&registry);

    calc.run(input, console, options)?;
    Ok(())
}
