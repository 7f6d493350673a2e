//! Shell configuration validation.
//!
//! Reports problems a [`ShellConfig`] would carry into the built shell:
//! unreachable or duplicate commands, options without a name, and the
//! definition issues found by [`validate_definition`].

use std::collections::HashSet;

use shellkit_core::{Definition, Operand, OptionError, ValidationError, validate_definition};
use thiserror::Error;

use crate::config::ShellConfig;

/// A problem found in a shell configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigIssue {
    /// Command with an empty or whitespace-only name.
    #[error("command at index {0} has an empty name")]
    EmptyCommandName(usize),
    /// Two commands share a name; only the first is reachable.
    #[error("duplicate command: {0}")]
    DuplicateCommand(String),
    /// An option cannot be constructed.
    #[error("command \"{command}\": {source}")]
    Option {
        command: String,
        source: OptionError,
    },
    /// A command definition has a grammar issue.
    #[error("command \"{command}\": {source}")]
    Definition {
        command: String,
        source: ValidationError,
    },
}

/// Validates a shell configuration.
///
/// Returns every issue found, in declaration order.
///
/// # Examples
///
/// ```
/// use shellkit::{ConfigIssue, ShellConfig, validate_config};
///
/// let config = ShellConfig::from_yaml_str(
///     "commands:\n  - name: build\n  - name: build\n",
/// )
/// .unwrap();
///
/// assert_eq!(
///     validate_config(&config),
///     vec![ConfigIssue::DuplicateCommand("build".to_string())]
/// );
/// ```
pub fn validate_config(config: &ShellConfig) -> Vec<ConfigIssue> {
    let mut issues = Vec::new();
    let mut names = HashSet::new();

    for (index, command) in config.commands.iter().enumerate() {
        if command.name.trim().is_empty() {
            issues.push(ConfigIssue::EmptyCommandName(index));
        } else if !names.insert(command.name.as_str()) {
            issues.push(ConfigIssue::DuplicateCommand(command.name.clone()));
        }

        let mut definition = Definition::new();
        for operand in &command.operands {
            definition.push_operand(Operand::new(operand.name.as_str()));
        }
        for option in &command.options {
            match option.to_option() {
                Ok(option) => {
                    definition.push_option(option);
                }
                Err(source) => issues.push(ConfigIssue::Option {
                    command: command.name.clone(),
                    source,
                }),
            }
        }

        issues.extend(
            validate_definition(&definition)
                .into_iter()
                .map(|source| ConfigIssue::Definition {
                    command: command.name.clone(),
                    source,
                }),
        );
    }

    issues
}
