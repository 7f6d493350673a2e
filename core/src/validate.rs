//! Definition validation.
//!
//! [`Definition`] accepts anything and resolves duplicate spellings by taking
//! the last added option. This module reports those duplicates, together with
//! names the parser can never match, without changing lookup behavior.
//!
//! # Examples
//!
//! ```
//! use shellkit_core::*;
//!
//! let definition = Definition::new()
//!     .add_option(OptionDef::new("verbose", "", Some('v'), Some("verbose")).unwrap())
//!     .add_operand(Operand::new("file"));
//! assert!(validate_definition(&definition).is_empty());
//!
//! // Two options answer to `-v`.
//! let definition = definition
//!     .add_option(OptionDef::new("version", "", Some('v'), None).unwrap());
//! assert_eq!(
//!     validate_definition(&definition),
//!     vec![ValidationError::DuplicateShort('v')]
//! );
//! ```

use std::collections::HashSet;

use thiserror::Error;

use crate::Definition;

/// Definition validation errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// Two options share a short name; the last added one shadows the rest.
    #[error("duplicate short option: -{0}")]
    DuplicateShort(char),
    /// Two options share a long name; the last added one shadows the rest.
    #[error("duplicate long option: --{0}")]
    DuplicateLong(String),
    /// Short name that cannot be spelled in a bundle.
    #[error("invalid short option name: {0:?}")]
    InvalidShort(char),
    /// Long name that cannot be matched (empty, dash-prefixed, `=` or
    /// whitespace).
    #[error("invalid long option name: {0:?}")]
    InvalidLong(String),
    /// Operand with an empty or whitespace-only name.
    #[error("operand at position {0} has an empty name")]
    EmptyOperandName(usize),
    /// Two operands share a name; the later value overwrites the earlier.
    #[error("duplicate operand: {0}")]
    DuplicateOperand(String),
}

/// Validates one definition.
///
/// Returns every problem found, in declaration order.
pub fn validate_definition(definition: &Definition) -> Vec<ValidationError> {
    let mut errors = Vec::new();
    let mut shorts = HashSet::new();
    let mut longs = HashSet::new();

    for option in definition.options() {
        if let Some(short) = option.short() {
            if short == '-' || short == '=' || short.is_whitespace() {
                errors.push(ValidationError::InvalidShort(short));
            } else if !shorts.insert(short) {
                errors.push(ValidationError::DuplicateShort(short));
            }
        }

        if let Some(long) = option.long() {
            if long.is_empty()
                || long.starts_with('-')
                || long.contains('=')
                || long.chars().any(char::is_whitespace)
            {
                errors.push(ValidationError::InvalidLong(long.to_string()));
            } else if !longs.insert(long) {
                errors.push(ValidationError::DuplicateLong(long.to_string()));
            }
        }
    }

    let mut operands = HashSet::new();
    for (position, operand) in definition.operands().iter().enumerate() {
        let name = operand.name().trim();
        if name.is_empty() {
            errors.push(ValidationError::EmptyOperandName(position));
        } else if !operands.insert(name) {
            errors.push(ValidationError::DuplicateOperand(name.to_string()));
        }
    }

    errors
}
