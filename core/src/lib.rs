//! Argument grammar engine for POSIX-style command lines.
//!
//! This crate defines the grammar model and the parser:
//!
//! - [`OptionDef`]: a switch with a short (`-v`) and/or long (`--verbose`)
//!   spelling, either a flag or value-taking, single or repeatable.
//! - [`Operand`]: a required positional argument.
//! - [`Definition`]: the ordered options and operands one command accepts.
//! - [`PosixParser`]: consumes an argument list against a [`Definition`] and
//!   produces a [`ParseResult`] of [`ParsedValue`]s.
//!
//! Parsing runs in [`ParseMode::Strict`] (unknown tokens and missing operands
//! are errors) or [`ParseMode::Lenient`] (unknown tokens are collected as
//! remaining). Lenient mode lets a caller skim global options off the front
//! of an argument list before it knows which command the rest belongs to.
//!
//! [`validate_definition`] reports duplicate or unmatchable names.
//!
//! # Example
//!
//! ```
//! use shellkit_core::*;
//!
//! let definition = Definition::new()
//!     .add_option(
//!         OptionDef::new("verbose", "Be more verbose.", Some('v'), Some("verbose"))
//!             .unwrap()
//!             .allow_multiple(),
//!     )
//!     .add_option(
//!         OptionDef::new("output", "Output file.", Some('o'), Some("output"))
//!             .unwrap()
//!             .with_value(),
//!     )
//!     .add_operand(Operand::new("source"));
//!
//! let args: Vec<String> = ["-vv", "--output=out.txt", "in.txt"]
//!     .iter()
//!     .map(|s| s.to_string())
//!     .collect();
//! let result = PosixParser.parse_strict(&definition, &args).unwrap();
//!
//! assert_eq!(result.count("verbose"), 2);
//! assert_eq!(result.value("output"), Some("out.txt"));
//! assert_eq!(result.value("source"), Some("in.txt"));
//! ```

mod definition;
mod error;
mod parser;
mod result;
mod validate;

pub use definition::{Definition, Operand, OptionDef};
pub use error::{DefinitionError, OptionError, ParserError};
pub use parser::{Parser, PosixParser};
pub use result::{ParseMode, ParseResult, ParsedValue};
pub use validate::{ValidationError, validate_definition};
