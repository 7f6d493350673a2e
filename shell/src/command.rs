//! Shell metadata and registered commands.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use shellkit_core::Definition;

/// Default shell name shown in help banners.
pub const DEFAULT_NAME: &str = "Shellkit Console";
/// Default program name used in usage lines.
pub const DEFAULT_PROGRAM: &str = "shellkit";
/// Default version shown in help banners.
pub const DEFAULT_VERSION: &str = "0.1";

/// Name, program and version of a shell, as printed in help banners.
///
/// # Examples
///
/// ```
/// use shellkit::About;
///
/// let about = About::new("Deploy Tool", "deploy", "2.1.0");
/// assert_eq!(about.program(), "deploy");
///
/// let default = About::default();
/// assert_eq!(default.program(), "shellkit");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct About {
    name: String,
    program: String,
    version: String,
}

impl About {
    pub fn new(
        name: impl Into<String>,
        program: impl Into<String>,
        version: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            program: program.into(),
            version: version.into(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Executable name used in usage lines.
    pub fn program(&self) -> &str {
        &self.program
    }

    pub fn version(&self) -> &str {
        &self.version
    }
}

impl Default for About {
    fn default() -> Self {
        Self::new(DEFAULT_NAME, DEFAULT_PROGRAM, DEFAULT_VERSION)
    }
}

/// A named command with its grammar.
///
/// `parameters` is free-form data carried alongside the command (for example
/// the task a dispatcher should run); the shell never interprets it.
///
/// # Examples
///
/// ```
/// use shellkit::Command;
/// use shellkit_core::{Definition, Operand};
///
/// let command = Command::new(
///     "deploy",
///     "Deploy a build.",
///     Definition::new().add_operand(Operand::new("target")),
/// );
/// assert_eq!(command.name(), "deploy");
/// assert!(command.parameters().is_empty());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Command {
    name: String,
    description: String,
    definition: Definition,
    parameters: Map<String, Value>,
}

impl Command {
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        definition: Definition,
    ) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            definition,
            parameters: Map::new(),
        }
    }

    /// Attaches extra parameters.
    pub fn with_parameters(mut self, parameters: Map<String, Value>) -> Self {
        self.parameters = parameters;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn definition(&self) -> &Definition {
        &self.definition
    }

    pub fn parameters(&self) -> &Map<String, Value> {
        &self.parameters
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_about_defaults() {
        let about = About::default();
        assert_eq!(about.name(), DEFAULT_NAME);
        assert_eq!(about.program(), DEFAULT_PROGRAM);
        assert_eq!(about.version(), DEFAULT_VERSION);
    }

    #[test]
    fn test_command_parameters() {
        let mut parameters = Map::new();
        parameters.insert("task".to_string(), Value::from("deploy::run"));

        let command =
            Command::new("deploy", "Deploy a build.", Definition::new()).with_parameters(parameters);

        assert_eq!(command.description(), "Deploy a build.");
        assert_eq!(
            command.parameters().get("task"),
            Some(&Value::from("deploy::run"))
        );
        assert!(command.definition().options().is_empty());
    }
}
