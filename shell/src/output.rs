//! Output sinks for rendered help and error text.
//!
//! The descriptor writes through the [`Output`] trait with a [`Style`] per
//! fragment. [`TerminalOutput`] colors fragments with `crossterm`;
//! [`BufferOutput`] keeps plain text in memory.

use std::cell::RefCell;
use std::io::{Stdout, Write};
use std::rc::Rc;

use crossterm::style::Stylize;
use tracing::warn;

/// Foreground colors used by the descriptor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Color {
    Yellow,
    Red,
}

impl From<Color> for crossterm::style::Color {
    fn from(color: Color) -> Self {
        match color {
            Color::Yellow => Self::Yellow,
            Color::Red => Self::Red,
        }
    }
}

/// Presentation of one text fragment.
///
/// Indentation is written before the text; a fixed width pads the text (not
/// the indentation) with trailing spaces. Text longer than the width is
/// written in full.
///
/// # Examples
///
/// ```
/// use shellkit::Style;
///
/// let style = Style::new().indent(2).fixed_width(8);
/// assert_eq!(style.layout("build"), "  build   ");
/// assert_eq!(style.layout("very-long-name"), "  very-long-name");
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Style {
    foreground: Option<Color>,
    fixed_width: Option<usize>,
    indent: usize,
}

impl Style {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn foreground(mut self, color: Color) -> Self {
        self.foreground = Some(color);
        self
    }

    pub fn fixed_width(mut self, width: usize) -> Self {
        self.fixed_width = Some(width);
        self
    }

    pub fn indent(mut self, indent: usize) -> Self {
        self.indent = indent;
        self
    }

    pub fn color(&self) -> Option<Color> {
        self.foreground
    }

    /// Applies indentation and padding, ignoring color.
    pub fn layout(&self, text: &str) -> String {
        let mut out = " ".repeat(self.indent);
        out.push_str(text);
        if let Some(width) = self.fixed_width {
            let len = text.chars().count();
            if len < width {
                out.push_str(&" ".repeat(width - len));
            }
        }
        out
    }
}

/// Sink for descriptor output.
pub trait Output {
    /// Writes a fragment without a line break.
    fn text(&mut self, text: &str, style: Style);

    /// Writes a line break.
    fn new_line(&mut self);

    /// Writes a fragment followed by a line break.
    fn line(&mut self, text: &str, style: Style) {
        self.text(text, style);
        self.new_line();
    }

    fn set_verbosity(&mut self, verbosity: u32);

    fn verbosity(&self) -> u32;
}

/// Writes styled text to any [`Write`] implementation.
///
/// Write failures are logged and otherwise ignored; help output is best
/// effort.
#[derive(Debug)]
pub struct TerminalOutput<W: Write> {
    writer: W,
    colored: bool,
    verbosity: u32,
}

impl TerminalOutput<Stdout> {
    /// Colored output on stdout.
    pub fn stdout() -> Self {
        Self::new(std::io::stdout())
    }
}

impl<W: Write> TerminalOutput<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            colored: true,
            verbosity: 1,
        }
    }

    /// Enables or disables ANSI colors.
    pub fn colored(mut self, colored: bool) -> Self {
        self.colored = colored;
        self
    }

    pub fn into_inner(self) -> W {
        self.writer
    }

    fn report(result: std::io::Result<()>) {
        if let Err(err) = result {
            warn!(error = %err, "Failed to write output");
        }
    }
}

impl<W: Write> Output for TerminalOutput<W> {
    fn text(&mut self, text: &str, style: Style) {
        let laid_out = style.layout(text);
        let result = match style.color() {
            Some(color) if self.colored => {
                write!(self.writer, "{}", laid_out.as_str().with(color.into()))
            }
            _ => self.writer.write_all(laid_out.as_bytes()),
        };
        Self::report(result);
    }

    fn new_line(&mut self) {
        let result = self
            .writer
            .write_all(b"\n")
            .and_then(|()| self.writer.flush());
        Self::report(result);
    }

    fn set_verbosity(&mut self, verbosity: u32) {
        self.verbosity = verbosity;
    }

    fn verbosity(&self) -> u32 {
        self.verbosity
    }
}

/// In-memory plain text output.
///
/// Clones share the same buffer, so a caller can keep one handle while the
/// shell owns another.
///
/// # Examples
///
/// ```
/// use shellkit::{BufferOutput, Output, Style};
///
/// let handle = BufferOutput::new();
/// let mut output = handle.clone();
/// output.line("hello", Style::new().indent(2));
/// assert_eq!(handle.contents(), "  hello\n");
/// ```
#[derive(Debug, Clone)]
pub struct BufferOutput {
    buffer: Rc<RefCell<String>>,
    verbosity: u32,
}

impl Default for BufferOutput {
    fn default() -> Self {
        Self::new()
    }
}

impl BufferOutput {
    pub fn new() -> Self {
        Self {
            buffer: Rc::default(),
            verbosity: 1,
        }
    }

    /// Everything written so far.
    pub fn contents(&self) -> String {
        self.buffer.borrow().clone()
    }

    /// Returns and clears the buffer.
    pub fn take(&self) -> String {
        std::mem::take(&mut *self.buffer.borrow_mut())
    }
}

impl Output for BufferOutput {
    fn text(&mut self, text: &str, style: Style) {
        self.buffer.borrow_mut().push_str(&style.layout(text));
    }

    fn new_line(&mut self) {
        self.buffer.borrow_mut().push('\n');
    }

    fn set_verbosity(&mut self, verbosity: u32) {
        self.verbosity = verbosity;
    }

    fn verbosity(&self) -> u32 {
        self.verbosity
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layout_without_width() {
        assert_eq!(Style::new().layout("plain"), "plain");
        assert_eq!(Style::new().indent(3).layout("x"), "   x");
    }

    #[test]
    fn test_terminal_output_plain_when_uncolored() {
        let mut output = TerminalOutput::new(Vec::new()).colored(false);
        output.text("deploy", Style::new().foreground(Color::Yellow).indent(2));
        output.line("Deploy it.", Style::new());

        let written = String::from_utf8(output.into_inner()).unwrap();
        assert_eq!(written, "  deployDeploy it.\n");
    }

    #[test]
    fn test_terminal_output_keeps_text_when_colored() {
        // crossterm drops the escape codes when NO_COLOR is set, so only the
        // text itself is checked.
        let mut output = TerminalOutput::new(Vec::new());
        output.text("oops", Style::new().foreground(Color::Red).fixed_width(6));

        let written = String::from_utf8(output.into_inner()).unwrap();
        assert!(written.contains("oops  "));
    }

    #[test]
    fn test_buffer_take_clears() {
        let handle = BufferOutput::new();
        let mut output = handle.clone();
        output.line("one", Style::new());

        assert_eq!(handle.take(), "one\n");
        assert_eq!(handle.contents(), "");
    }

    #[test]
    fn test_verbosity_defaults_to_one() {
        let mut output = BufferOutput::new();
        assert_eq!(output.verbosity(), 1);
        output.set_verbosity(3);
        assert_eq!(output.verbosity(), 3);
    }
}
