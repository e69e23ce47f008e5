use std::io::{self, Write};

use super::stack::{OpError, OpResult};

/// Text sinks the calculator talks to.
pub trait Console {
    /// Writes one line of regular output.
    fn out(&mut self, line: &str);

    /// Writes one diagnostic line.
    fn err(&mut self, line: &str);

    /// Writes the prompt without a line break.
    fn prompt(&mut self, prompt: &str) -> io::Result<()>;

    fn clear_screen(&mut self) -> OpResult;
}

/// Console backed by the process' stdout and stderr.
#[derive(Debug, Default, Clone, Copy)]
pub struct StdConsole;

impl Console for StdConsole {
    fn out(&mut self, line: &str) {
        println!("{line}");
    }

    fn err(&mut self, line: &str) {
        eprintln!("{line}");
    }

    fn prompt(&mut self, prompt: &str) -> io::Result<()> {
        let mut stdout = io::stdout().lock();
        stdout.write_all(prompt.as_bytes())?;
        stdout.flush()
    }

    #[cfg(feature = "tty")]
    fn clear_screen(&mut self) -> OpResult {
        use crossterm::{
            cursor::MoveTo,
            execute,
            terminal::{Clear, ClearType},
            tty::IsTty,
        };

        let mut stdout = io::stdout();
        if !stdout.is_tty() {
            return Err(OpError::Unsupported("cls"));
        }
        execute!(stdout, Clear(ClearType::All), MoveTo(0, 0)).map_err(|e| {
            calc_debug!("clearing the screen failed: {}", e);
            OpError::Unsupported("cls")
        })
    }

    #[cfg(not(feature = "tty"))]
    fn clear_screen(&mut self) -> OpResult {
        Err(OpError::Unsupported("cls"))
    }
}
