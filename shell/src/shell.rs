//! Command dispatch.
//!
//! [`Shell::process`] peels global options off an argument list, picks the
//! command named by the first leftover token and parses the rest against
//! that command's grammar. Anything that is not a successful match is
//! reported through the [`Descriptor`] and yields `None`.

use indexmap::IndexMap;
use serde::Serialize;
use shellkit_core::{Definition, OptionDef, ParsedValue, Parser};
use tracing::debug;

use crate::command::{About, Command};
use crate::descriptor::Descriptor;
use crate::error::ShellError;
use crate::suggester::Suggester;

/// Outcome of a successful dispatch: the matched command and its parsed
/// arguments.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ShellResult {
    command: Command,
    data: IndexMap<String, ParsedValue>,
}

impl ShellResult {
    pub fn new(command: Command, data: IndexMap<String, ParsedValue>) -> Self {
        Self { command, data }
    }

    pub fn command(&self) -> &Command {
        &self.command
    }

    /// Options and operands matched for the command, in match order.
    pub fn data(&self) -> &IndexMap<String, ParsedValue> {
        &self.data
    }

    pub fn into_parts(self) -> (Command, IndexMap<String, ParsedValue>) {
        (self.command, self.data)
    }
}

/// Dispatches argument lists to registered commands.
///
/// Every shell understands two global options: `-v|--verbose` (repeatable,
/// raises the descriptor verbosity) and `-h|--help`.
///
/// # Examples
///
/// ```
/// use shellkit::{BufferOutput, ConsoleDescriptor, ShellBuilder};
///
/// let output = BufferOutput::new();
/// let mut shell = ShellBuilder::new()
///     .program("deploy")
///     .descriptor(ConsoleDescriptor::new(output.clone()))
///     .add_command("build", "Build a target.", &["target"], &[], Default::default())
///     .unwrap()
///     .build();
///
/// let args = vec!["build".to_string(), "web".to_string()];
/// let result = shell.process(&args).unwrap();
/// assert_eq!(result.command().name(), "build");
/// assert_eq!(result.data()["target"].as_str(), Some("web"));
///
/// let args = vec!["biuld".to_string()];
/// assert!(shell.process(&args).is_none());
/// assert!(output.contents().contains("Did you mean \"build\"?"));
/// ```
pub struct Shell {
    descriptor: Box<dyn Descriptor>,
    suggester: Box<dyn Suggester>,
    parser: Box<dyn Parser>,
    about: About,
    definition: Definition,
    commands: Vec<Command>,
}

impl Shell {
    pub fn new(
        descriptor: Box<dyn Descriptor>,
        suggester: Box<dyn Suggester>,
        parser: Box<dyn Parser>,
        about: About,
    ) -> Self {
        Self {
            descriptor,
            suggester,
            parser,
            about,
            definition: global_definition(),
            commands: Vec::new(),
        }
    }

    /// Registers a command. Commands are matched in registration order.
    pub fn add_command(&mut self, command: Command) -> &mut Self {
        self.commands.push(command);
        self
    }

    pub fn about(&self) -> &About {
        &self.about
    }

    /// The global options every shell accepts.
    pub fn definition(&self) -> &Definition {
        &self.definition
    }

    pub fn commands(&self) -> &[Command] {
        &self.commands
    }

    /// Looks up a registered command by exact name.
    pub fn command(&self, name: &str) -> Option<&Command> {
        self.commands.iter().find(|command| command.name() == name)
    }

    /// Processes an argument list (program name excluded).
    ///
    /// Returns `None` after writing help or an error through the descriptor:
    /// when no command is named, when the command is unknown, when `--help`
    /// is given, or when the arguments do not fit the command.
    pub fn process(&mut self, arguments: &[String]) -> Option<ShellResult> {
        let globals = match self.parser.parse_lenient(&self.definition, arguments) {
            Ok(globals) => globals,
            Err(err) => {
                debug!(error = %err, "Global options rejected");
                self.descriptor.exception(&err);
                self.descriptor
                    .shell(&self.about, &self.definition, &self.commands, true);
                return None;
            }
        };

        let verbosity = globals
            .get("verbose")
            .and_then(ParsedValue::count)
            .unwrap_or(1);
        self.descriptor.set_verbosity(verbosity);

        let help = globals.get("help").is_some_and(ParsedValue::is_set);
        let (_, remaining) = globals.into_parts();
        let remaining = restore_terminator(arguments, remaining);

        let Some((name, rest)) = remaining.split_first() else {
            self.descriptor
                .shell(&self.about, &self.definition, &self.commands, false);
            return None;
        };

        let found = self
            .commands
            .iter()
            .find(|command| command.name() == name.as_str());
        let Some(command) = found else {
            debug!(command = %name, "Command not found");
            self.descriptor
                .exception(&ShellError::CommandNotFound(name.clone()));
            self.descriptor
                .suggest(self.suggester.suggest(name, &self.commands));
            self.descriptor
                .shell(&self.about, &self.definition, &self.commands, true);
            return None;
        };

        if help {
            self.descriptor.command(&self.about, command, false);
            return None;
        }

        match self.parser.parse_strict(command.definition(), rest) {
            Ok(result) => {
                debug!(command = %name, verbosity, "Dispatched command");
                let (data, _) = result.into_parts();
                Some(ShellResult::new(command.clone(), data))
            }
            Err(err) => {
                debug!(command = %name, error = %err, "Command arguments rejected");
                self.descriptor.exception(&err);
                self.descriptor.command(&self.about, command, true);
                None
            }
        }
    }
}

/// Puts `--` back into the tokens left by the global pass.
///
/// The global pass consumes the terminator and leaves every token after it
/// at the end of `remaining`. The command parse needs it again so those
/// tokens stay operands. When the command name itself follows the
/// terminator, `--` goes right after the name.
fn restore_terminator(arguments: &[String], mut remaining: Vec<String>) -> Vec<String> {
    let Some(position) = arguments.iter().position(|token| token.trim() == "--") else {
        return remaining;
    };
    if remaining.is_empty() {
        return remaining;
    }

    let tail = arguments.len() - position - 1;
    let at = remaining.len().saturating_sub(tail).max(1);
    remaining.insert(at, "--".to_string());
    remaining
}

fn global_definition() -> Definition {
    Definition::new()
        .add_option(
            OptionDef::new("verbose", "Be more verbose.", Some('v'), Some("verbose"))
                .expect("static option must have a name")
                .allow_multiple(),
        )
        .add_option(
            OptionDef::new("help", "Show help about shell or command.", Some('h'), Some("help"))
                .expect("static option must have a name"),
        )
}

#[cfg(test)]
mod tests {
    use shellkit_core::{Operand, PosixParser};

    use super::*;
    use crate::descriptor::ConsoleDescriptor;
    use crate::output::BufferOutput;
    use crate::suggester::SimilarTextSuggester;

    fn args(items: &[&str]) -> Vec<String> {
        items.iter().map(|item| item.to_string()).collect()
    }

    fn shell(output: &BufferOutput) -> Shell {
        let mut shell = Shell::new(
            Box::new(ConsoleDescriptor::new(output.clone())),
            Box::new(SimilarTextSuggester::default()),
            Box::new(PosixParser),
            About::new("Deploy Tool", "deploy", "1.2"),
        );
        shell.add_command(Command::new(
            "build",
            "Build a target.",
            Definition::new()
                .add_operand(Operand::new("target"))
                .add_option(
                    OptionDef::new("force", "Force a rebuild.", Some('f'), Some("force")).unwrap(),
                ),
        ));
        shell
    }

    #[test]
    fn test_terminator_reaches_command() {
        let output = BufferOutput::new();
        let mut shell = shell(&output);

        let result = shell.process(&args(&["build", "--", "-f"])).unwrap();
        assert_eq!(result.data()["target"].as_str(), Some("-f"));
        assert!(!result.data().contains_key("force"));

        let result = shell.process(&args(&["-v", "--", "build", "--force"])).unwrap();
        assert_eq!(result.data()["target"].as_str(), Some("--force"));

        let result = shell.process(&args(&["build", "-f", "--", "-v"])).unwrap();
        assert_eq!(result.data().get("force"), Some(&ParsedValue::Flag));
        assert_eq!(result.data()["target"].as_str(), Some("-v"));
        assert_eq!(output.contents(), "");
    }

    #[test]
    fn test_restore_terminator_positions() {
        assert_eq!(
            restore_terminator(&args(&["a", "-v", "b"]), args(&["a", "b"])),
            args(&["a", "b"])
        );
        assert_eq!(
            restore_terminator(&args(&["a", "--", "b", "c"]), args(&["a", "b", "c"])),
            args(&["a", "--", "b", "c"])
        );
        assert_eq!(
            restore_terminator(&args(&["--", "a", "b"]), args(&["a", "b"])),
            args(&["a", "--", "b"])
        );
        assert_eq!(restore_terminator(&args(&["--"]), Vec::new()), Vec::<String>::new());
    }

    #[test]
    fn test_global_definition() {
        let definition = global_definition();
        let verbose = definition.option("v", false).unwrap();
        assert!(verbose.is_flag());
        assert!(verbose.is_multiple());
        assert!(!definition.option("help", true).unwrap().is_multiple());
    }

    #[test]
    fn test_success_returns_data() {
        let output = BufferOutput::new();
        let mut shell = shell(&output);

        let result = shell.process(&args(&["build", "-f", "web"])).unwrap();

        assert_eq!(result.command().name(), "build");
        assert_eq!(result.data().get("force"), Some(&ParsedValue::Flag));
        assert_eq!(result.data()["target"].as_str(), Some("web"));
        assert_eq!(output.contents(), "");
    }

    #[test]
    fn test_global_options_anywhere() {
        let output = BufferOutput::new();
        let mut shell = shell(&output);

        let result = shell.process(&args(&["build", "-vv", "web"])).unwrap();
        assert!(!result.data().contains_key("verbose"));
        assert_eq!(result.data()["target"].as_str(), Some("web"));
    }

    #[test]
    fn test_no_arguments_describes_shell() {
        let output = BufferOutput::new();
        let mut shell = shell(&output);

        assert!(shell.process(&[]).is_none());
        assert!(output.contents().starts_with("Deploy Tool (version 1.2)\n"));
        assert!(output.contents().contains("  build                 Build a target.\n"));
    }

    #[test]
    fn test_unknown_command() {
        let output = BufferOutput::new();
        let mut shell = shell(&output);

        assert!(shell.process(&args(&["biuld"])).is_none());
        assert_eq!(
            output.contents(),
            "command \"biuld\" not found\n\
             \n\
             Did you mean \"build\"?\n\
             \n\
             See 'deploy --help' for more information about available commands and options.\n"
        );
    }

    #[test]
    fn test_help_describes_command() {
        let output = BufferOutput::new();
        let mut shell = shell(&output);

        assert!(shell.process(&args(&["build", "--help"])).is_none());
        assert!(output.contents().contains("  deploy build <target> [<options>] \n"));
    }

    #[test]
    fn test_command_error_prints_hint() {
        let output = BufferOutput::new();
        let mut shell = shell(&output);

        assert!(shell.process(&args(&["build"])).is_none());
        assert_eq!(
            output.contents(),
            "operand \"target\" is required\n\
             \n\
             See 'deploy build --help' for more information about the command.\n"
        );
    }

    #[test]
    fn test_global_error_prints_shell_hint() {
        let output = BufferOutput::new();
        let mut shell = shell(&output);

        assert!(shell.process(&args(&["--verbose=2", "build"])).is_none());
        assert!(output.contents().starts_with("long option argument is not allowed for flag"));
        assert!(output.contents().ends_with(
            "See 'deploy --help' for more information about available commands and options.\n"
        ));
    }
}
