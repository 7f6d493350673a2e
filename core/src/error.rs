//! Error types for definitions and parsing.
//!
//! Errors are split the same way the grammar is: a [`DefinitionError`] means a
//! requested name or position does not exist in a [`Definition`](crate::Definition),
//! a [`ParserError`] means the supplied tokens violate the grammar, and an
//! [`OptionError`] means an option was declared wrongly before any parsing
//! happened.

use thiserror::Error;

fn kind(long: &bool) -> &'static str {
    if *long { "long" } else { "short" }
}

fn dashes(long: &bool) -> &'static str {
    if *long { "--" } else { "-" }
}

/// Lookup failures against a [`Definition`](crate::Definition).
///
/// In strict mode these are fatal to the current parse. In lenient mode the
/// parser never produces them; unmatched tokens are collected instead.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DefinitionError {
    /// No option with the given short or long name.
    #[error("no {} option found for name \"{}{name}\"", kind(.long), dashes(.long))]
    OptionNotFound { name: String, long: bool },
    /// No operand declared at the given position.
    #[error("no operand found for position \"{0}\"")]
    OperandNotFound(usize),
}

impl DefinitionError {
    pub(crate) fn option_not_found(name: impl Into<String>, long: bool) -> Self {
        Self::OptionNotFound {
            name: name.into(),
            long,
        }
    }
}

/// Grammar violations found while scanning tokens.
///
/// `ArgumentNotAllowed`, `MissingArgument` and `MissingOperand` are fatal in
/// both modes. `Definition` wraps a lookup failure that surfaced in strict
/// mode.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParserError {
    /// A value was attached to a flag (`--verbose=1`).
    #[error("{} option argument is not allowed for flag \"{notation}\"", kind(.long))]
    ArgumentNotAllowed { notation: String, long: bool },
    /// A value-taking option was the last token.
    #[error("{} option \"{notation}\" requires an argument, none given", kind(.long))]
    MissingArgument { notation: String, long: bool },
    /// A declared operand received no value in strict mode.
    #[error("operand \"{0}\" is required")]
    MissingOperand(String),
    /// Strict-mode lookup failure.
    #[error(transparent)]
    Definition(#[from] DefinitionError),
}

impl ParserError {
    /// Returns `true` when this error is a lookup failure rather than a
    /// token-level grammar violation.
    pub fn is_definition_error(&self) -> bool {
        matches!(self, Self::Definition(_))
    }
}

/// Errors raised while declaring options.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum OptionError {
    /// Neither a short nor a long name was given.
    #[error("option \"{0}\" requires a short or long name")]
    NoShortAndLongName(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_option_not_found_message() {
        let long = DefinitionError::option_not_found("force", true);
        assert_eq!(long.to_string(), "no long option found for name \"--force\"");

        let short = DefinitionError::option_not_found("f", false);
        assert_eq!(short.to_string(), "no short option found for name \"-f\"");
    }

    #[test]
    fn test_parser_error_messages() {
        let err = ParserError::ArgumentNotAllowed {
            notation: "--verbose".into(),
            long: true,
        };
        assert_eq!(
            err.to_string(),
            "long option argument is not allowed for flag \"--verbose\""
        );

        let err = ParserError::MissingArgument {
            notation: "-o".into(),
            long: false,
        };
        assert_eq!(
            err.to_string(),
            "short option \"-o\" requires an argument, none given"
        );

        assert_eq!(
            ParserError::MissingOperand("file".into()).to_string(),
            "operand \"file\" is required"
        );
    }

    #[test]
    fn test_definition_error_is_transparent() {
        let err: ParserError = DefinitionError::OperandNotFound(2).into();
        assert!(err.is_definition_error());
        assert_eq!(err.to_string(), "no operand found for position \"2\"");
    }
}
