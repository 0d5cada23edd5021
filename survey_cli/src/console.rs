//! Line-oriented prompts.
//!
//! Every field prompt shows the current value in brackets. Pressing Enter
//! keeps it; `-` clears an optional value. End of input behaves like Enter
//! and raises [`Console::at_eof`] so the session loop can stop.

use std::fmt::Display;
use std::io::{self, BufRead, Write};

use survey_core::errors::SurveyResult;

pub struct Console<R, W> {
    input: R,
    output: W,
    eof: bool,
}

impl<R: BufRead, W: Write> Console<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Console {
            input,
            output,
            eof: false,
        }
    }

    pub fn at_eof(&self) -> bool {
        self.eof
    }

    pub fn say(&mut self, text: impl Display) -> io::Result<()> {
        writeln!(self.output, "{text}")
    }

    pub fn blank(&mut self) -> io::Result<()> {
        writeln!(self.output)
    }

    /// Read one trimmed line. Empty at end of input.
    pub fn ask(&mut self, prompt: &str) -> io::Result<String> {
        if self.eof {
            return Ok(String::new());
        }
        write!(self.output, "{prompt}")?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            self.eof = true;
            writeln!(self.output)?;
        }
        Ok(line.trim().to_string())
    }

    /// Free text. `None` keeps the current value.
    pub fn edit_text(&mut self, label: &str, current: &str) -> io::Result<Option<String>> {
        let answer = self.ask(&format!("{label} [{current}]: "))?;
        Ok(match answer.as_str() {
            "" => None,
            "-" => Some(String::new()),
            _ => Some(answer),
        })
    }

    /// A number, re-asked until it parses. `None` keeps the current value.
    pub fn edit_number<T>(&mut self, label: &str, current: T) -> io::Result<Option<T>>
    where
        T: Display + std::str::FromStr,
    {
        loop {
            let answer = self.ask(&format!("{label} [{current}]: "))?;
            if answer.is_empty() {
                return Ok(None);
            }
            match answer.parse() {
                Ok(value) => return Ok(Some(value)),
                Err(_) => self.say(format!("  '{answer}' is not a number"))?,
            }
        }
    }

    /// Yes/no. `None` keeps the current value.
    pub fn edit_flag(&mut self, label: &str, current: bool) -> io::Result<Option<bool>> {
        let shown = if current { "y" } else { "n" };
        loop {
            let answer = self.ask(&format!("{label} (y/n) [{shown}]: "))?;
            match answer.to_lowercase().as_str() {
                "" => return Ok(None),
                "y" | "yes" => return Ok(Some(true)),
                "n" | "no" => return Ok(Some(false)),
                _ => self.say("  Please answer y or n")?,
            }
        }
    }

    /// Pick one of `options` by number or by name.
    ///
    /// `Some(None)` clears the selection, `None` keeps it.
    pub fn edit_choice<T, F>(
        &mut self,
        label: &str,
        options: &[T],
        current: Option<T>,
        describe: impl Fn(&T) -> String,
        parse: F,
    ) -> io::Result<Option<Option<T>>>
    where
        T: Copy,
        F: Fn(&str) -> SurveyResult<T>,
    {
        for (i, option) in options.iter().enumerate() {
            self.say(format!("  {}) {}", i + 1, describe(option)))?;
        }
        let shown = current.as_ref().map(&describe).unwrap_or_else(|| "none".to_string());

        loop {
            let answer = self.ask(&format!("{label} [{shown}]: "))?;
            if answer.is_empty() {
                return Ok(None);
            }
            if answer == "-" {
                return Ok(Some(None));
            }
            if let Some(option) = answer
                .parse::<usize>()
                .ok()
                .and_then(|n| n.checked_sub(1))
                .and_then(|i| options.get(i))
            {
                return Ok(Some(Some(*option)));
            }
            match parse(&answer) {
                Ok(option) => return Ok(Some(Some(option))),
                Err(e) => self.say(format!("  {e}"))?,
            }
        }
    }
}
