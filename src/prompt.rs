use std::io::{BufRead, Write};

use log::debug;

use crate::error::PromptError;

/// Supplies field values for the write path.
pub trait FieldPrompter {
    /// A non-empty string.
    fn text(&mut self, prompt: &str) -> Result<String, PromptError>;

    fn integer(&mut self, prompt: &str) -> Result<i32, PromptError>;

    /// A finite, non-negative decimal.
    fn decimal(&mut self, prompt: &str) -> Result<f64, PromptError>;

    /// `true` for yes.
    fn confirm(&mut self, prompt: &str) -> Result<bool, PromptError>;
}

/// Line-oriented console prompter that keeps asking until the answer is usable.
pub struct ConsolePrompter<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> ConsolePrompter<R, W> {
    pub fn new(input: R, output: W) -> Self {
        ConsolePrompter { input, output }
    }

    fn ask(&mut self, prompt: &str) -> Result<String, PromptError> {
        write!(self.output, "{}: ", prompt)?;
        self.output.flush()?;

        let mut answer = String::new();
        if self.input.read_line(&mut answer)? == 0 {
            return Err(PromptError::Closed);
        }

        Ok(answer.trim().to_owned())
    }

    fn retry(&mut self, answer: &str, hint: &str) -> Result<(), PromptError> {
        debug!("rejected console answer {:?}", answer);
        writeln!(self.output, "You said {:?}. {}", answer, hint)?;
        Ok(())
    }
}

impl<R: BufRead, W: Write> FieldPrompter for ConsolePrompter<R, W> {
    fn text(&mut self, prompt: &str) -> Result<String, PromptError> {
        loop {
            let answer = self.ask(prompt)?;
            if !answer.is_empty() {
                return Ok(answer);
            }
            self.retry(&answer, "You must enter at least one character.")?;
        }
    }

    fn integer(&mut self, prompt: &str) -> Result<i32, PromptError> {
        loop {
            let answer = self.ask(prompt)?;
            match answer.parse::<i32>() {
                Ok(value) => return Ok(value),
                Err(_) => self.retry(&answer, "You must enter a valid whole number.")?,
            }
        }
    }

    fn decimal(&mut self, prompt: &str) -> Result<f64, PromptError> {
        loop {
            let answer = self.ask(prompt)?;
            match answer.parse::<f64>() {
                Ok(value) if value.is_finite() && value >= 0.0 => return Ok(value),
                _ => self.retry(&answer, "You must enter a number that is zero or more.")?,
            }
        }
    }

    fn confirm(&mut self, prompt: &str) -> Result<bool, PromptError> {
        let prompt = format!("{} [Y/N]", prompt);
        loop {
            let answer = self.ask(&prompt)?;
            match answer.to_lowercase().as_str() {
                "y" | "yes" => return Ok(true),
                "n" | "no" => return Ok(false),
                _ => self.retry(&answer, "Please answer Y or N.")?,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn prompter(input: &str) -> ConsolePrompter<Cursor<Vec<u8>>, Vec<u8>> {
        ConsolePrompter::new(Cursor::new(input.as_bytes().to_vec()), Vec::new())
    }

    #[test]
    fn text_skips_empty_answers() {
        let mut p = prompter("\n   \n  Widget \n");

        assert_eq!(p.text("Enter the product name").unwrap(), "Widget");

        let shown = String::from_utf8(p.output).unwrap();
        assert_eq!(shown.matches("Enter the product name: ").count(), 3);
    }

    #[test]
    fn integer_retries_until_valid() {
        let mut p = prompter("nineteen\n19.5\n1980\n");
        assert_eq!(p.integer("Enter the year of birth").unwrap(), 1980);
    }

    #[test]
    fn decimal_rejects_negative_and_garbage() {
        let mut p = prompter("-1\nabc\ninf\n19.99\n");
        assert_eq!(p.decimal("Enter the product cost").unwrap(), 19.99);
    }

    #[test]
    fn confirm_accepts_either_case() {
        let mut p = prompter("maybe\nY\nn\n");
        assert!(p.confirm("Are you done").unwrap());
        assert!(!p.confirm("Are you done").unwrap());
    }

    #[test]
    fn closed_input_is_an_error() {
        let mut p = prompter("");
        assert!(matches!(p.text("Enter the product ID"), Err(PromptError::Closed)));
    }
}
