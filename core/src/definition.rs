//! Grammar model: options, operands and the definitions that group them.
//!
//! A [`Definition`] describes everything one command (or the shell's global
//! option set) accepts. It is built once, then only read by the parser and by
//! help rendering.

use serde::{Deserialize, Serialize};

use crate::error::{DefinitionError, OptionError};

/// A named switch, spelled `-<short>` and/or `--<long>`.
///
/// Options default to flags (no value) that may appear once. Use
/// [`with_value`](OptionDef::with_value) for value-taking options and
/// [`allow_multiple`](OptionDef::allow_multiple) for repeatable ones.
///
/// # Examples
///
/// ```
/// use shellkit_core::OptionDef;
///
/// let verbose = OptionDef::new("verbose", "Be more verbose.", Some('v'), Some("verbose"))
///     .unwrap()
///     .allow_multiple();
/// assert!(verbose.is_flag());
/// assert!(verbose.is_multiple());
/// assert_eq!(verbose.notation(), "-v+|--verbose+");
///
/// let output = OptionDef::new("output", "Output file.", Some('o'), None)
///     .unwrap()
///     .with_value();
/// assert_eq!(output.notation(), "-o=");
///
/// assert!(OptionDef::new("nameless", "", None, None).is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OptionDef {
    name: String,
    description: String,
    short: Option<char>,
    long: Option<String>,
    flag: bool,
    multiple: bool,
}

impl OptionDef {
    /// Creates a single-occurrence flag.
    ///
    /// # Errors
    ///
    /// Returns [`OptionError::NoShortAndLongName`] when both `short` and
    /// `long` are `None`.
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        short: Option<char>,
        long: Option<&str>,
    ) -> Result<Self, OptionError> {
        let name = name.into();
        if short.is_none() && long.is_none() {
            return Err(OptionError::NoShortAndLongName(name));
        }

        Ok(Self {
            name,
            description: description.into(),
            short,
            long: long.map(String::from),
            flag: true,
            multiple: false,
        })
    }

    /// Marks the option as taking a value.
    pub fn with_value(mut self) -> Self {
        self.flag = false;
        self
    }

    /// Marks the option as repeatable.
    pub fn allow_multiple(mut self) -> Self {
        self.multiple = true;
        self
    }

    /// Sets flag and multiplicity in one call, as config files declare them.
    pub fn with_kind(mut self, flag: bool, multiple: bool) -> Self {
        self.flag = flag;
        self.multiple = multiple;
        self
    }

    /// Key used for this option in parse results.
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn short(&self) -> Option<char> {
        self.short
    }

    pub fn long(&self) -> Option<&str> {
        self.long.as_deref()
    }

    /// Whether the option takes no value.
    pub fn is_flag(&self) -> bool {
        self.flag
    }

    /// Whether the option may repeat.
    pub fn is_multiple(&self) -> bool {
        self.multiple
    }

    /// Help notation: `-<short>[=|+]` and/or `--<long>[=|+]` joined by `|`.
    ///
    /// `=` marks a value-taking option, `+` a repeatable flag.
    pub fn notation(&self) -> String {
        let suffix = if !self.flag {
            "="
        } else if self.multiple {
            "+"
        } else {
            ""
        };

        let mut parts = Vec::with_capacity(2);
        if let Some(short) = self.short {
            parts.push(format!("-{short}{suffix}"));
        }
        if let Some(long) = &self.long {
            parts.push(format!("--{long}{suffix}"));
        }
        parts.join("|")
    }

    /// The spelling used in error messages: `--long` when `long` is set,
    /// otherwise `-s`.
    pub(crate) fn spelled(&self, long: bool) -> String {
        match (long, &self.long, self.short) {
            (true, Some(name), _) => format!("--{name}"),
            (_, _, Some(short)) => format!("-{short}"),
            (_, Some(name), None) => format!("--{name}"),
            (_, None, None) => String::new(),
        }
    }
}

/// A required positional argument.
///
/// The position is defined by the order operands are added to a
/// [`Definition`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Operand {
    name: String,
}

impl Operand {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    /// Key used for this operand in parse results.
    pub fn name(&self) -> &str {
        &self.name
    }
}

/// Ordered options and operands accepted by one command.
///
/// Lookups are linear scans. When two options share a spelling the one added
/// last wins; nothing is deduplicated (see
/// [`validate_definition`](crate::validate_definition) for a lint pass).
///
/// # Examples
///
/// ```
/// use shellkit_core::{Definition, Operand, OptionDef};
///
/// let definition = Definition::new()
///     .add_option(OptionDef::new("force", "Force it.", Some('f'), Some("force")).unwrap())
///     .add_operand(Operand::new("target"));
///
/// assert_eq!(definition.option("force", true).unwrap().name(), "force");
/// assert_eq!(definition.option("f", false).unwrap().name(), "force");
/// assert_eq!(definition.operand(0).unwrap().name(), "target");
/// assert!(definition.operand(1).is_err());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Definition {
    options: Vec<OptionDef>,
    operands: Vec<Operand>,
}

impl Definition {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends an option.
    pub fn add_option(mut self, option: OptionDef) -> Self {
        self.options.push(option);
        self
    }

    /// Appends an operand at the next position.
    pub fn add_operand(mut self, operand: Operand) -> Self {
        self.operands.push(operand);
        self
    }

    /// In-place variant of [`add_option`](Definition::add_option).
    pub fn push_option(&mut self, option: OptionDef) -> &mut Self {
        self.options.push(option);
        self
    }

    /// In-place variant of [`add_operand`](Definition::add_operand).
    pub fn push_operand(&mut self, operand: Operand) -> &mut Self {
        self.operands.push(operand);
        self
    }

    pub fn options(&self) -> &[OptionDef] {
        &self.options
    }

    pub fn operands(&self) -> &[Operand] {
        &self.operands
    }

    /// Looks up an option by long name when `long` is true, otherwise by
    /// short name.
    ///
    /// A short `name` must be exactly one character.
    ///
    /// # Errors
    ///
    /// Returns [`DefinitionError::OptionNotFound`] when nothing matches.
    pub fn option(&self, name: &str, long: bool) -> Result<&OptionDef, DefinitionError> {
        let found = if long {
            self.find_long(name)
        } else {
            let mut chars = name.chars();
            match (chars.next(), chars.next()) {
                (Some(short), None) => self.find_short(short),
                _ => None,
            }
        };

        found.ok_or_else(|| DefinitionError::option_not_found(name, long))
    }

    /// Finds the last added option with this short name.
    pub fn find_short(&self, short: char) -> Option<&OptionDef> {
        self.options
            .iter()
            .rev()
            .find(|option| option.short == Some(short))
    }

    /// Finds the last added option with this long name.
    pub fn find_long(&self, long: &str) -> Option<&OptionDef> {
        self.options
            .iter()
            .rev()
            .find(|option| option.long.as_deref() == Some(long))
    }

    /// Returns the operand at `position`.
    ///
    /// # Errors
    ///
    /// Returns [`DefinitionError::OperandNotFound`] when `position` is out of
    /// range.
    pub fn operand(&self, position: usize) -> Result<&Operand, DefinitionError> {
        self.operands
            .get(position)
            .ok_or(DefinitionError::OperandNotFound(position))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn flag(name: &str, short: Option<char>, long: Option<&str>) -> OptionDef {
        OptionDef::new(name, "", short, long).unwrap()
    }

    #[test]
    fn test_option_requires_a_name() {
        let err = OptionDef::new("quiet", "Be quiet.", None, None).unwrap_err();
        assert_eq!(err, OptionError::NoShortAndLongName("quiet".to_string()));
    }

    #[test]
    fn test_option_defaults() {
        let option = flag("help", Some('h'), Some("help"));
        assert!(option.is_flag());
        assert!(!option.is_multiple());
        assert_eq!(option.short(), Some('h'));
        assert_eq!(option.long(), Some("help"));
    }

    #[test]
    fn test_notation() {
        assert_eq!(flag("help", Some('h'), Some("help")).notation(), "-h|--help");
        assert_eq!(
            flag("verbose", Some('v'), Some("verbose"))
                .allow_multiple()
                .notation(),
            "-v+|--verbose+"
        );
        assert_eq!(
            flag("name", None, Some("name")).with_value().notation(),
            "--name="
        );
        // Valued wins over repeatable.
        assert_eq!(
            flag("tag", Some('t'), None)
                .with_value()
                .allow_multiple()
                .notation(),
            "-t="
        );
    }

    #[test]
    fn test_long_lookup_ignores_short() {
        let definition = Definition::new()
            .add_option(flag("all", Some('a'), None))
            .add_option(flag("force", Some('f'), Some("force")));

        assert_eq!(definition.option("force", true).unwrap().name(), "force");
        assert!(definition.option("a", true).is_err());
        assert!(definition.option("force", false).is_err());
    }

    #[test]
    fn test_short_lookup_requires_single_char() {
        let definition = Definition::new().add_option(flag("all", Some('a'), Some("all")));

        assert!(definition.option("a", false).is_ok());
        assert_eq!(
            definition.option("all", false).unwrap_err(),
            DefinitionError::OptionNotFound {
                name: "all".to_string(),
                long: false
            }
        );
    }

    #[test]
    fn test_last_added_wins() {
        let definition = Definition::new()
            .add_option(flag("first", Some('x'), Some("same")))
            .add_option(flag("second", Some('x'), Some("same")));

        assert_eq!(definition.find_short('x').unwrap().name(), "second");
        assert_eq!(definition.find_long("same").unwrap().name(), "second");
        assert_eq!(definition.options().len(), 2);
    }

    #[test]
    fn test_operand_lookup_is_bounds_checked() {
        let mut definition = Definition::new();
        definition
            .push_operand(Operand::new("source"))
            .push_operand(Operand::new("dest"));

        assert_eq!(definition.operand(1).unwrap().name(), "dest");
        assert_eq!(
            definition.operand(2).unwrap_err(),
            DefinitionError::OperandNotFound(2)
        );
    }
}
