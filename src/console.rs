//! Line-oriented terminal input and output.
//!
//! `Console` wraps any `BufRead`/`Write` pair so sessions can be driven from
//! stdin/stdout or from in-memory buffers in tests.

use std::io::{BufRead, Write};

use rand::Rng;

use crate::error::{Result, UlutoError};
use crate::fields::{Color, ColorAnswer, PALETTE};
use crate::render::paint;

pub struct Console<R, W> {
    input: R,
    output: W,
    pub color: bool,
}

impl<R: BufRead, W: Write> Console<R, W> {
    pub fn new(input: R, output: W, color: bool) -> Self {
        Self { input, output, color }
    }

    pub fn output(&mut self) -> &mut W {
        &mut self.output
    }

    /// Give back the output sink.
    pub fn into_output(self) -> W {
        self.output
    }

    /// Write `text` followed by a newline.
    pub fn say(&mut self, text: &str) -> Result<()> {
        writeln!(self.output, "{text}")?;
        Ok(())
    }

    /// Write `text` as-is.
    pub fn print(&mut self, text: &str) -> Result<()> {
        write!(self.output, "{text}")?;
        Ok(())
    }

    /// Show `prompt` and read one line without its line ending.
    /// Returns `None` at end of input.
    pub fn read_line(&mut self, prompt: &str) -> Result<Option<String>> {
        write!(self.output, "{prompt}")?;
        self.output.flush()?;

        let mut buf = Vec::new();
        if self.input.read_until(b'\n', &mut buf)? == 0 {
            return Ok(None);
        }
        // Bytes that are not UTF-8 become U+FFFD instead of failing the read.
        let line = String::from_utf8_lossy(&buf);
        Ok(Some(line.trim_end_matches(['\n', '\r']).to_string()))
    }

    /// Like `read_line`, but end of input is an error.
    pub fn ask(&mut self, prompt: &str) -> Result<String> {
        self.read_line(prompt)?.ok_or(UlutoError::InputClosed)
    }

    /// Ask `question (y/n)` until a non-blank answer comes back. Only `y` means yes.
    pub fn yes_no(&mut self, question: &str) -> Result<bool> {
        loop {
            let answer = self.ask(&format!("{question} (y/n) "))?.to_lowercase();
            if answer.is_empty() {
                self.say("Please choose yes (y) or no (n)")?;
            } else {
                return Ok(answer == "y");
            }
        }
    }

    /// Prompt for a palette color until a valid one is given.
    ///
    /// `?` lists the palette without counting as a failure; `random` picks a
    /// palette member with `rng`.
    pub fn ask_color<G: Rng + ?Sized>(&mut self, label: &str, rng: &mut G) -> Result<Color> {
        loop {
            let answer = self.ask(&format!("{label} (? for more information): "))?;
            match answer.parse::<ColorAnswer>() {
                Ok(ColorAnswer::Color(c)) => return Ok(c),
                Ok(ColorAnswer::Random) => return Ok(Color::random(rng)),
                Ok(ColorAnswer::Help) => self.list_colors()?,
                Err(e) => self.say(&e.to_string())?,
            }
        }
    }

    fn list_colors(&mut self) -> Result<()> {
        self.say("Available colors: ")?;
        for c in PALETTE {
            let line = paint(c.name(), c.terminal(), self.color);
            self.say(&line)?;
        }
        self.say("random")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::io::Cursor;

    fn console(input: &str) -> Console<Cursor<Vec<u8>>, Vec<u8>> {
        Console::new(Cursor::new(input.as_bytes().to_vec()), Vec::new(), false)
    }

    fn written(c: Console<Cursor<Vec<u8>>, Vec<u8>>) -> String {
        String::from_utf8(c.into_output()).unwrap()
    }

    #[test]
    fn test_read_line_strips_line_endings() {
        let mut c = console("hello\r\nworld");
        assert_eq!(c.read_line("> ").unwrap().as_deref(), Some("hello"));
        assert_eq!(c.read_line("> ").unwrap().as_deref(), Some("world"));
        assert_eq!(c.read_line("> ").unwrap(), None);
        assert!(matches!(c.ask("> "), Err(UlutoError::InputClosed)));
    }

    #[test]
    fn test_read_line_replaces_invalid_utf8() {
        let mut c = Console::new(Cursor::new(b"ad\xffd\nnext\n".to_vec()), Vec::new(), false);
        assert_eq!(c.read_line("> ").unwrap().as_deref(), Some("ad\u{fffd}d"));
        assert_eq!(c.read_line("> ").unwrap().as_deref(), Some("next"));
    }

    #[test]
    fn test_yes_no_reprompts_on_blank() {
        let mut c = console("\nY\n");
        assert!(c.yes_no("Save?").unwrap());
        let out = written(c);
        assert_eq!(out.matches("Save? (y/n) ").count(), 2);
        assert!(out.contains("Please choose yes (y) or no (n)"));
    }

    #[test]
    fn test_yes_no_anything_else_is_no() {
        let mut c = console("yes\n");
        assert!(!c.yes_no("Save?").unwrap());
    }

    #[test]
    fn test_ask_color_help_then_invalid_then_valid() {
        let mut c = console("?\npurple\ncyan\n");
        let mut rng = StdRng::seed_from_u64(1);
        assert_eq!(c.ask_color("Color", &mut rng).unwrap(), Color::Cyan);

        let out = written(c);
        assert!(out.contains("Available colors: \nred\ngreen\nyellow\nblue\nmagenta\ncyan\nrandom\n"));
        assert!(out.contains("purple is not a valid color."));
        assert_eq!(out.matches("Color (? for more information): ").count(), 3);
    }

    #[test]
    fn test_ask_color_random_resolves_to_palette() {
        let mut c = console("random\n");
        let mut rng = StdRng::seed_from_u64(42);
        let picked = c.ask_color("Tag color", &mut rng).unwrap();
        assert!(PALETTE.contains(&picked));
    }
}
