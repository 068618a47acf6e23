use std::io::{self, BufRead, StdinLock, Stdout, Write};

use colored::*;
use tracing::warn;

use crate::defaults::SavedDefaults;
use crate::error::{Error, Result};
use crate::session::{validate_label, Field, Labels};

/// Supplies the labels for a detected volume.
pub trait LabelSource {
    fn labels(&mut self, defaults: &SavedDefaults) -> Result<Labels>;
}

/// Asks the operator for each field on a line-oriented console, offering the
/// saved default in brackets.
pub struct ConsolePrompt<R, W> {
    input: R,
    output: W,
}

impl ConsolePrompt<StdinLock<'static>, Stdout> {
    pub fn stdio() -> Self {
        Self::new(io::stdin().lock(), io::stdout())
    }
}

impl<R: BufRead, W: Write> ConsolePrompt<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    pub fn into_inner(self) -> (R, W) {
        (self.input, self.output)
    }

    /// Reads one field. Empty input takes the default; invalid values are
    /// reported and asked again.
    pub fn ask(&mut self, field: Field, default: Option<&str>) -> Result<String> {
        let mut line = String::new();

        loop {
            line.clear();

            write!(
                self.output,
                "{} [{}]: ",
                field.prompt_text(),
                default.unwrap_or("").yellow()
            )?;
            self.output.flush()?;

            if self.input.read_line(&mut line)? == 0 {
                return Err(Error::InputClosed);
            }

            let entered = line.trim();
            let value = if entered.is_empty() {
                default.unwrap_or("")
            } else {
                entered
            };

            match validate_label(field, value) {
                Ok(()) => return Ok(value.to_string()),
                Err(err) => {
                    warn!("Rejected {} label {:?}", field, value);
                    writeln!(self.output, "{}", err.to_string().red())?;
                }
            }
        }
    }
}

impl<R: BufRead, W: Write> LabelSource for ConsolePrompt<R, W> {
    fn labels(&mut self, defaults: &SavedDefaults) -> Result<Labels> {
        let mut labels = Labels::default();
        for field in Field::ALL {
            let value = self.ask(field, defaults.label(field))?;
            labels.set(field, value);
        }
        Ok(labels)
    }
}
