//! Fluent construction of a [`Shell`].

use serde_json::{Map, Value};
use shellkit_core::{Definition, Operand, OptionError, Parser, PosixParser};
use tracing::debug;

use crate::command::{About, Command, DEFAULT_NAME, DEFAULT_PROGRAM, DEFAULT_VERSION};
use crate::config::OptionConfig;
use crate::descriptor::{ConsoleDescriptor, Descriptor};
use crate::output::TerminalOutput;
use crate::shell::Shell;
use crate::suggester::{SimilarTextSuggester, Suggester};

/// Collects shell settings and commands, then builds a [`Shell`].
///
/// Unset parts fall back to defaults: a [`ConsoleDescriptor`] on stdout, a
/// [`SimilarTextSuggester`], the [`PosixParser`] and the default [`About`]
/// values.
///
/// # Examples
///
/// ```
/// use shellkit::{OptionConfig, ShellBuilder};
///
/// let shell = ShellBuilder::new()
///     .name("Deploy Tool")
///     .program("deploy")
///     .version("2.0")
///     .add_command(
///         "build",
///         "Build a target.",
///         &["target"],
///         &[OptionConfig::new("force", "Force a rebuild.").short('f').long("force")],
///         Default::default(),
///     )
///     .unwrap()
///     .build();
///
/// assert_eq!(shell.about().program(), "deploy");
/// assert_eq!(shell.commands().len(), 1);
/// ```
#[derive(Default)]
pub struct ShellBuilder {
    name: Option<String>,
    program: Option<String>,
    version: Option<String>,
    descriptor: Option<Box<dyn Descriptor>>,
    suggester: Option<Box<dyn Suggester>>,
    parser: Option<Box<dyn Parser>>,
    commands: Vec<Command>,
}

impl ShellBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Shell name shown in help banners.
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Program name used in usage lines.
    pub fn program(mut self, program: impl Into<String>) -> Self {
        self.program = Some(program.into());
        self
    }

    pub fn version(mut self, version: impl Into<String>) -> Self {
        self.version = Some(version.into());
        self
    }

    pub fn descriptor(mut self, descriptor: impl Descriptor + 'static) -> Self {
        self.descriptor = Some(Box::new(descriptor));
        self
    }

    pub fn suggester(mut self, suggester: impl Suggester + 'static) -> Self {
        self.suggester = Some(Box::new(suggester));
        self
    }

    pub fn parser(mut self, parser: impl Parser + 'static) -> Self {
        self.parser = Some(Box::new(parser));
        self
    }

    /// Adds an already built command.
    pub fn command(mut self, command: Command) -> Self {
        self.commands.push(command);
        self
    }

    /// Declares a command from its parts.
    ///
    /// `operands` are operand names in position order.
    ///
    /// # Errors
    ///
    /// Returns [`OptionError::NoShortAndLongName`] when an option has neither
    /// a short nor a long name.
    pub fn add_command(
        mut self,
        name: &str,
        description: &str,
        operands: &[&str],
        options: &[OptionConfig],
        parameters: Map<String, Value>,
    ) -> Result<Self, OptionError> {
        let mut definition = Definition::new();
        for operand in operands {
            definition.push_operand(Operand::new(*operand));
        }
        for option in options {
            definition.push_option(option.to_option()?);
        }

        self.commands
            .push(Command::new(name, description, definition).with_parameters(parameters));
        Ok(self)
    }

    /// Builds the shell, filling unset parts with defaults.
    pub fn build(self) -> Shell {
        let about = About::new(
            self.name.unwrap_or_else(|| DEFAULT_NAME.to_string()),
            self.program.unwrap_or_else(|| DEFAULT_PROGRAM.to_string()),
            self.version.unwrap_or_else(|| DEFAULT_VERSION.to_string()),
        );
        debug!(
            program = %about.program(),
            commands = self.commands.len(),
            "Building shell"
        );

        let mut shell = Shell::new(
            self.descriptor
                .unwrap_or_else(|| Box::new(ConsoleDescriptor::new(TerminalOutput::stdout()))),
            self.suggester
                .unwrap_or_else(|| Box::new(SimilarTextSuggester::default())),
            self.parser.unwrap_or_else(|| Box::new(PosixParser)),
            about,
        );
        for command in self.commands {
            shell.add_command(command);
        }
        shell
    }
}
