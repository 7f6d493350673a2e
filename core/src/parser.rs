//! POSIX argument parsing.
//!
//! [`PosixParser`] walks a pre-tokenized argument list against a
//! [`Definition`] following the POSIX utility conventions
//! (<https://pubs.opengroup.org/onlinepubs/9699919799/basedefs/V1_chap12.html>):
//!
//! - `-abc` bundles short flags; a value-taking letter takes the rest of the
//!   bundle (`-ofile`, `-o=file`) or the next token (`-o file`).
//! - `--name=value` and `--name value` set long options.
//! - `--` terminates option parsing; everything after it is an operand.
//! - Bare tokens fill the declared operands in order.
//!
//! In [`ParseMode::Lenient`] unknown options and surplus operands are
//! collected into [`ParseResult::remaining`]; in [`ParseMode::Strict`] they
//! fail the parse, and every declared operand must receive a value.

use indexmap::IndexMap;
use tracing::{debug, trace};

use crate::definition::{Definition, OptionDef};
use crate::error::{DefinitionError, ParserError};
use crate::result::{ParseMode, ParseResult, ParsedValue};

/// Turns an argument list into a [`ParseResult`].
pub trait Parser {
    /// Parses `arguments` against `definition` in the given `mode`.
    ///
    /// # Errors
    ///
    /// Returns a [`ParserError`] when the tokens violate the grammar, or when
    /// a strict parse meets an unknown option, a surplus operand or a missing
    /// operand.
    fn parse(
        &self,
        definition: &Definition,
        arguments: &[String],
        mode: ParseMode,
    ) -> Result<ParseResult, ParserError>;

    /// Shorthand for [`ParseMode::Strict`].
    fn parse_strict(
        &self,
        definition: &Definition,
        arguments: &[String],
    ) -> Result<ParseResult, ParserError> {
        self.parse(definition, arguments, ParseMode::Strict)
    }

    /// Shorthand for [`ParseMode::Lenient`].
    fn parse_lenient(
        &self,
        definition: &Definition,
        arguments: &[String],
    ) -> Result<ParseResult, ParserError> {
        self.parse(definition, arguments, ParseMode::Lenient)
    }
}

/// Stateless POSIX-style parser.
///
/// All working state lives in a single `parse` call, so one instance can be
/// shared freely.
///
/// # Examples
///
/// ```
/// use shellkit_core::{Definition, OptionDef, ParsedValue, Parser, PosixParser};
///
/// let definition = Definition::new()
///     .add_option(OptionDef::new("extract", "", Some('x'), None).unwrap())
///     .add_option(OptionDef::new("verbose", "", Some('v'), None).unwrap())
///     .add_option(OptionDef::new("file", "", Some('f'), None).unwrap().with_value());
///
/// let args: Vec<String> = vec!["-xvf".into(), "archive.tar".into()];
/// let result = PosixParser.parse_strict(&definition, &args).unwrap();
///
/// assert_eq!(result.get("extract"), Some(&ParsedValue::Flag));
/// assert_eq!(result.get("verbose"), Some(&ParsedValue::Flag));
/// assert_eq!(result.value("file"), Some("archive.tar"));
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct PosixParser;

impl Parser for PosixParser {
    fn parse(
        &self,
        definition: &Definition,
        arguments: &[String],
        mode: ParseMode,
    ) -> Result<ParseResult, ParserError> {
        let result = Scan::new(definition, arguments, mode).run()?;

        if mode.is_strict() {
            if let Some(missing) = definition
                .operands()
                .iter()
                .find(|operand| !result.parsed().contains_key(operand.name()))
            {
                return Err(ParserError::MissingOperand(missing.name().to_string()));
            }
        }

        debug!(
            mode = ?mode,
            parsed = result.parsed().len(),
            remaining = result.remaining().len(),
            "Parsed arguments"
        );
        Ok(result)
    }
}

/// Working state of one left-to-right pass.
///
/// `cursor` indexes `arguments` and is advanced early when an option consumes
/// the following token as its value.
struct Scan<'d, 'a> {
    definition: &'d Definition,
    arguments: &'a [String],
    mode: ParseMode,
    cursor: usize,
    operand_position: usize,
    terminated: bool,
    parsed: IndexMap<String, ParsedValue>,
    remaining: Vec<String>,
}

impl<'d, 'a> Scan<'d, 'a> {
    fn new(definition: &'d Definition, arguments: &'a [String], mode: ParseMode) -> Self {
        Self {
            definition,
            arguments,
            mode,
            cursor: 0,
            operand_position: 0,
            terminated: false,
            parsed: IndexMap::new(),
            remaining: Vec::new(),
        }
    }

    fn run(mut self) -> Result<ParseResult, ParserError> {
        let arguments = self.arguments;

        while self.cursor < arguments.len() {
            let token = arguments[self.cursor].trim();

            if self.terminated {
                self.operand(token)?;
            } else if token == "--" {
                trace!("Option terminator");
                self.terminated = true;
            } else if let Some(body) = token.strip_prefix("--") {
                self.long_option(token, body)?;
            } else if let Some(bundle) = token.strip_prefix('-') {
                self.short_bundle(bundle)?;
            } else {
                self.operand(token)?;
            }

            self.cursor += 1;
        }

        Ok(ParseResult::new(self.parsed, self.remaining, self.mode))
    }

    /// Advances the cursor and returns the raw following token.
    fn next_value(&mut self) -> Option<&'a str> {
        self.cursor += 1;
        self.arguments.get(self.cursor).map(String::as_str)
    }

    fn operand(&mut self, token: &str) -> Result<(), ParserError> {
        let position = self.operand_position;
        self.operand_position += 1;

        match self.definition.operands().get(position) {
            Some(operand) => {
                trace!(operand = operand.name(), position, "Matched operand");
                self.parsed.insert(
                    operand.name().to_string(),
                    ParsedValue::Value(token.to_string()),
                );
            }
            None if self.mode.is_strict() => {
                return Err(DefinitionError::OperandNotFound(position).into());
            }
            None => {
                trace!(token, position, "No operand slot, keeping token");
                self.remaining.push(token.to_string());
            }
        }
        Ok(())
    }

    fn long_option(&mut self, token: &str, body: &str) -> Result<(), ParserError> {
        let (name, inline) = match body.split_once('=') {
            Some((name, value)) => (name, Some(value)),
            None => (body, None),
        };

        let definition = self.definition;
        let Some(option) = definition.find_long(name) else {
            if self.mode.is_strict() {
                return Err(DefinitionError::option_not_found(name, true).into());
            }
            trace!(token, "Unknown long option, keeping token");
            self.remaining.push(token.to_string());
            return Ok(());
        };

        if option.is_flag() {
            if inline.is_some() {
                return Err(ParserError::ArgumentNotAllowed {
                    notation: option.spelled(true),
                    long: true,
                });
            }
            self.record_flag(option);
            return Ok(());
        }

        let value = match inline {
            Some(value) => value,
            None => self
                .next_value()
                .ok_or_else(|| ParserError::MissingArgument {
                    notation: option.spelled(true),
                    long: true,
                })?,
        };
        self.record_value(option, value);
        Ok(())
    }

    fn short_bundle(&mut self, bundle: &str) -> Result<(), ParserError> {
        let definition = self.definition;

        for (offset, letter) in bundle.char_indices() {
            let Some(option) = definition.find_short(letter) else {
                if self.mode.is_strict() {
                    return Err(DefinitionError::option_not_found(letter.to_string(), false).into());
                }
                let rest = format!("-{}", &bundle[offset..]);
                trace!(token = %rest, "Unknown short option, keeping rest of bundle");
                self.remaining.push(rest);
                return Ok(());
            };

            if option.is_flag() {
                self.record_flag(option);
                continue;
            }

            let rest = &bundle[offset + letter.len_utf8()..];
            let value = if rest.is_empty() {
                self.next_value()
                    .ok_or_else(|| ParserError::MissingArgument {
                        notation: option.spelled(false),
                        long: false,
                    })?
            } else {
                rest.strip_prefix('=').unwrap_or(rest)
            };
            self.record_value(option, value);
            return Ok(());
        }

        Ok(())
    }

    fn record_flag(&mut self, option: &OptionDef) {
        let value = if option.is_multiple() {
            let count = match self.parsed.get(option.name()) {
                Some(ParsedValue::Count(count)) => count.saturating_add(1),
                Some(ParsedValue::Flag) => 2,
                _ => 1,
            };
            ParsedValue::Count(count)
        } else {
            ParsedValue::Flag
        };

        trace!(option = option.name(), value = ?value, "Matched flag");
        self.parsed.insert(option.name().to_string(), value);
    }

    /// Valued options are last-write-wins, repeatable or not.
    fn record_value(&mut self, option: &OptionDef, value: &str) {
        trace!(option = option.name(), value, "Matched option value");
        self.parsed.insert(
            option.name().to_string(),
            ParsedValue::Value(value.to_string()),
        );
    }
}
