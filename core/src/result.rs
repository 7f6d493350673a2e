//! Parse output types.

use indexmap::IndexMap;
use serde::{Serialize, Serializer};

/// Value recorded for a matched option or operand.
///
/// Serializes as a JSON `true`, a number or a string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParsedValue {
    /// A single-occurrence flag was present.
    Flag,
    /// Number of occurrences of a repeatable flag.
    Count(u32),
    /// Value of a value-taking option or an operand.
    Value(String),
}

impl ParsedValue {
    /// Returns the string value, if any.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Value(value) => Some(value),
            _ => None,
        }
    }

    /// Occurrence count: `1` for a plain flag, the count for a repeatable
    /// flag, `None` for values.
    pub fn count(&self) -> Option<u32> {
        match self {
            Self::Flag => Some(1),
            Self::Count(count) => Some(*count),
            Self::Value(_) => None,
        }
    }

    /// Whether this value marks a present flag.
    pub fn is_set(&self) -> bool {
        matches!(self, Self::Flag | Self::Count(_))
    }
}

impl Serialize for ParsedValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Flag => serializer.serialize_bool(true),
            Self::Count(count) => serializer.serialize_u32(*count),
            Self::Value(value) => serializer.serialize_str(value),
        }
    }
}

/// Whether unmatched tokens fail the parse or are collected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ParseMode {
    /// Any unknown token or missing operand is an error (the default).
    #[default]
    Strict,
    /// Unknown tokens go to [`ParseResult::remaining`].
    Lenient,
}

impl ParseMode {
    pub fn is_strict(self) -> bool {
        self == Self::Strict
    }
}

/// Snapshot produced by one parse call.
///
/// # Examples
///
/// ```
/// use shellkit_core::{Definition, Operand, OptionDef, ParsedValue, Parser, PosixParser};
///
/// let definition = Definition::new()
///     .add_option(OptionDef::new("force", "", Some('f'), Some("force")).unwrap())
///     .add_operand(Operand::new("target"));
///
/// let args = vec!["-f".to_string(), "build".to_string()];
/// let result = PosixParser.parse_strict(&definition, &args).unwrap();
///
/// assert_eq!(result.get("force"), Some(&ParsedValue::Flag));
/// assert_eq!(result.value("target"), Some("build"));
/// assert!(result.remaining().is_empty());
/// assert!(result.is_strict());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ParseResult {
    parsed: IndexMap<String, ParsedValue>,
    remaining: Vec<String>,
    mode: ParseMode,
}

impl ParseResult {
    pub fn new(
        parsed: IndexMap<String, ParsedValue>,
        remaining: Vec<String>,
        mode: ParseMode,
    ) -> Self {
        Self {
            parsed,
            remaining,
            mode,
        }
    }

    /// Matched names and their values, in the order first matched.
    pub fn parsed(&self) -> &IndexMap<String, ParsedValue> {
        &self.parsed
    }

    /// Tokens left unmatched. Always empty for strict parses.
    pub fn remaining(&self) -> &[String] {
        &self.remaining
    }

    pub fn mode(&self) -> ParseMode {
        self.mode
    }

    pub fn is_strict(&self) -> bool {
        self.mode.is_strict()
    }

    pub fn get(&self, name: &str) -> Option<&ParsedValue> {
        self.parsed.get(name)
    }

    /// String value recorded for `name`.
    pub fn value(&self, name: &str) -> Option<&str> {
        self.get(name).and_then(ParsedValue::as_str)
    }

    /// Occurrence count recorded for the flag `name`, `0` when absent.
    pub fn count(&self, name: &str) -> u32 {
        self.get(name).and_then(ParsedValue::count).unwrap_or(0)
    }

    /// Splits the result into its parsed map and remaining tokens.
    pub fn into_parts(self) -> (IndexMap<String, ParsedValue>, Vec<String>) {
        (self.parsed, self.remaining)
    }
}
