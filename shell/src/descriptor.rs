//! Help and error rendering.
//!
//! A [`Descriptor`] turns shell data into user-facing text. It has no parsing
//! logic; the shell calls it after deciding what to show.

use std::error::Error;

use shellkit_core::Definition;

use crate::command::{About, Command};
use crate::output::{Color, Output, Style};

/// Width of the name column in command and option listings.
const COLUMN_WIDTH: usize = 22;
/// Indentation of listing rows and the usage line.
const INDENT: usize = 2;

/// Renders shell and command descriptions.
pub trait Descriptor {
    /// Describes the whole shell: usage, commands and global options.
    ///
    /// With `short` set only a hint pointing at `--help` is written.
    fn shell(&mut self, about: &About, definition: &Definition, commands: &[Command], short: bool);

    /// Describes one command: usage, operands and options.
    ///
    /// With `short` set only a hint pointing at `<command> --help` is
    /// written.
    fn command(&mut self, about: &About, command: &Command, short: bool);

    /// Writes a "did you mean" line when a suggestion exists.
    fn suggest(&mut self, command: Option<&Command>);

    /// Writes an error message.
    fn exception(&mut self, error: &dyn Error);

    fn set_verbosity(&mut self, verbosity: u32);
}

/// [`Descriptor`] writing to an [`Output`].
///
/// # Examples
///
/// ```
/// use shellkit::{About, BufferOutput, ConsoleDescriptor, Descriptor};
///
/// let output = BufferOutput::new();
/// let mut descriptor = ConsoleDescriptor::new(output.clone());
/// descriptor.shell(&About::new("Tool", "tool", "1.0"), &Default::default(), &[], true);
///
/// assert_eq!(
///     output.contents(),
///     "\nSee 'tool --help' for more information about available commands and options.\n"
/// );
/// ```
#[derive(Debug)]
pub struct ConsoleDescriptor<O: Output> {
    output: O,
}

impl<O: Output> ConsoleDescriptor<O> {
    pub fn new(output: O) -> Self {
        Self { output }
    }

    pub fn output(&self) -> &O {
        &self.output
    }

    pub fn into_output(self) -> O {
        self.output
    }

    fn banner(&mut self, about: &About) {
        self.output.line(
            &format!("{} (version {})", about.name(), about.version()),
            Style::new(),
        );
        self.output.new_line();
        self.output.line("Usage:", Style::new());
        self.output.new_line();
        self.output.text(
            about.program(),
            Style::new()
                .foreground(Color::Yellow)
                .fixed_width(about.program().chars().count() + 1)
                .indent(INDENT),
        );
    }

    fn row(&mut self, name: &str, description: &str) {
        self.output.text(
            name,
            Style::new()
                .foreground(Color::Yellow)
                .fixed_width(COLUMN_WIDTH)
                .indent(INDENT),
        );
        self.output.line(description, Style::new());
    }

    fn options(&mut self, definition: &Definition) {
        for option in definition.options() {
            self.row(&option.notation(), option.description());
        }
    }
}

impl<O: Output> Descriptor for ConsoleDescriptor<O> {
    fn shell(&mut self, about: &About, definition: &Definition, commands: &[Command], short: bool) {
        if short {
            self.output.new_line();
            self.output.line(
                &format!(
                    "See '{} --help' for more information about available commands and options.",
                    about.program()
                ),
                Style::new(),
            );
            return;
        }

        self.banner(about);
        self.output
            .line("<command> [<arguments>] [<options>]", Style::new());
        self.output.new_line();
        self.output.line("Commands:", Style::new());
        self.output.new_line();

        if commands.is_empty() {
            self.output.line(
                "No commands defined.",
                Style::new().foreground(Color::Yellow).indent(INDENT),
            );
        } else {
            for command in commands {
                self.row(command.name(), command.description());
            }
        }

        self.output.new_line();
        self.output.line("Options:", Style::new());
        self.output.new_line();
        self.options(definition);

        self.output.new_line();
        self.output.line(
            &format!(
                "See '{} <command> --help' for more information about a command.",
                about.program()
            ),
            Style::new(),
        );
    }

    fn command(&mut self, about: &About, command: &Command, short: bool) {
        if short {
            self.output.new_line();
            self.output.line(
                &format!(
                    "See '{} {} --help' for more information about the command.",
                    about.program(),
                    command.name()
                ),
                Style::new(),
            );
            return;
        }

        let definition = command.definition();

        self.banner(about);
        self.output
            .text(&format!("{} ", command.name()), Style::new());
        for operand in definition.operands() {
            self.output
                .text(&format!("<{}> ", operand.name()), Style::new());
        }

        if definition.options().is_empty() {
            self.output.new_line();
        } else {
            self.output.line("[<options>] ", Style::new());
            self.output.new_line();
            self.output.line("Options:", Style::new());
            self.output.new_line();
            self.options(definition);
        }

        self.output.new_line();
        self.output.line(
            &format!(
                "See '{} --help' for more information about this shell and default options.",
                about.program()
            ),
            Style::new(),
        );
    }

    fn suggest(&mut self, command: Option<&Command>) {
        let Some(command) = command else {
            return;
        };

        self.output.new_line();
        self.output.text("Did you mean \"", Style::new());
        self.output
            .text(command.name(), Style::new().foreground(Color::Yellow));
        self.output.line("\"?", Style::new());
    }

    fn exception(&mut self, error: &dyn Error) {
        let red = Style::new().foreground(Color::Red);
        self.output.line(&error.to_string(), red);

        if self.output.verbosity() > 1 {
            let mut source = error.source();
            while let Some(cause) = source {
                self.output
                    .line(&format!("caused by: {cause}"), red.indent(INDENT));
                source = cause.source();
            }
        }
    }

    fn set_verbosity(&mut self, verbosity: u32) {
        self.output.set_verbosity(verbosity);
    }
}
