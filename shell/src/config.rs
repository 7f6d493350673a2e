//! Shell configuration files.
//!
//! A [`ShellConfig`] declares the shell metadata and its commands in YAML or
//! JSON and turns into a [`ShellBuilder`].
//!
//! # Example YAML
//!
//! ```yaml
//! name: Deploy Tool
//! program: deploy
//! version: "2.0"
//! commands:
//!   - name: build
//!     description: Build a target.
//!     operands:
//!       - name: target
//!     options:
//!       - name: force
//!         description: Force a rebuild.
//!         short: f
//!         long: force
//!       - name: jobs
//!         description: Parallel jobs.
//!         short: j
//!         flag: false
//!     parameters:
//!       task: build::run
//! ```

use std::io::{BufReader, BufWriter};
use std::path::Path;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use shellkit_core::{OptionDef, OptionError};
use tracing::{debug, warn};

use crate::builder::ShellBuilder;
use crate::error::Result;
use crate::shell::Shell;
use crate::validate::validate_config;

/// One option of a command.
///
/// `flag` defaults to `true` and `multiple` to `false`.
///
/// # Examples
///
/// ```
/// # use shellkit::OptionConfig;
/// let option = OptionConfig::new("jobs", "Parallel jobs.").short('j').with_value();
/// let def = option.to_option().unwrap();
/// assert_eq!(def.notation(), "-j=");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OptionConfig {
    /// Key used in parse results.
    pub name: String,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub short: Option<char>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub long: Option<String>,
    /// Whether the option takes no value.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub flag: Option<bool>,
    /// Whether the option may repeat.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub multiple: Option<bool>,
}

impl OptionConfig {
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            ..Self::default()
        }
    }

    pub fn short(mut self, short: char) -> Self {
        self.short = Some(short);
        self
    }

    pub fn long(mut self, long: impl Into<String>) -> Self {
        self.long = Some(long.into());
        self
    }

    pub fn with_value(mut self) -> Self {
        self.flag = Some(false);
        self
    }

    pub fn allow_multiple(mut self) -> Self {
        self.multiple = Some(true);
        self
    }

    /// Converts to an [`OptionDef`].
    ///
    /// # Errors
    ///
    /// Returns [`OptionError::NoShortAndLongName`] when neither `short` nor
    /// `long` is set.
    pub fn to_option(&self) -> std::result::Result<OptionDef, OptionError> {
        Ok(OptionDef::new(
            self.name.as_str(),
            self.description.as_str(),
            self.short,
            self.long.as_deref(),
        )?
        .with_kind(self.flag.unwrap_or(true), self.multiple.unwrap_or(false)))
    }
}

/// One operand of a command.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OperandConfig {
    pub name: String,
}

/// One command of a shell.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CommandConfig {
    pub name: String,
    pub description: String,
    /// Operands in position order.
    pub operands: Vec<OperandConfig>,
    pub options: Vec<OptionConfig>,
    /// Free-form data carried on the command.
    pub parameters: Map<String, Value>,
}

/// Top-level shell configuration.
///
/// # Examples
///
/// ```
/// use shellkit::ShellConfig;
///
/// let config = ShellConfig::from_yaml_str(
///     "program: deploy\ncommands:\n  - name: build\n    description: Build.\n",
/// )
/// .unwrap();
///
/// let shell = config.build().unwrap();
/// assert_eq!(shell.about().program(), "deploy");
/// assert_eq!(shell.about().name(), "Shellkit Console");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShellConfig {
    /// Shell name shown in help banners.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Program name used in usage lines.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub program: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    pub commands: Vec<CommandConfig>,
}

impl ShellConfig {
    /// Loads configuration from a file.
    ///
    /// Files ending in `.json` are read as JSON, anything else as YAML.
    ///
    /// # Errors
    ///
    /// Returns [`IoError`](crate::ShellError::IoError) if the file cannot be
    /// read, or [`JsonError`](crate::ShellError::JsonError) /
    /// [`YamlError`](crate::ShellError::YamlError) if parsing fails.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let reader = BufReader::new(std::fs::File::open(path)?);
        let config: Self = if is_json(path) {
            serde_json::from_reader(reader)?
        } else {
            serde_yaml::from_reader(reader)?
        };
        debug!(
            path = %path.display(),
            commands = config.commands.len(),
            "Loaded shell config"
        );
        Ok(config)
    }

    /// Saves the configuration, choosing the format like [`ShellConfig::load`].
    ///
    /// # Errors
    ///
    /// Returns [`IoError`](crate::ShellError::IoError) if the file cannot be
    /// written, or a serialization error.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let writer = BufWriter::new(std::fs::File::create(path)?);
        if is_json(path) {
            serde_json::to_writer_pretty(writer, self)?;
        } else {
            serde_yaml::to_writer(writer, self)?;
        }
        Ok(())
    }

    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Creates a builder holding the metadata and commands.
    ///
    /// # Errors
    ///
    /// Returns [`Option`](crate::ShellError::Option) when an option has
    /// neither a short nor a long name.
    pub fn into_builder(self) -> Result<ShellBuilder> {
        let mut builder = ShellBuilder::new();
        if let Some(name) = self.name {
            builder = builder.name(name);
        }
        if let Some(program) = self.program {
            builder = builder.program(program);
        }
        if let Some(version) = self.version {
            builder = builder.version(version);
        }

        for command in self.commands {
            let operands: Vec<&str> = command
                .operands
                .iter()
                .map(|operand| operand.name.as_str())
                .collect();
            builder = builder.add_command(
                &command.name,
                &command.description,
                &operands,
                &command.options,
                command.parameters,
            )?;
        }
        Ok(builder)
    }

    /// Builds a shell with the default descriptor, suggester and parser.
    ///
    /// Validation issues are logged as warnings; they do not stop the build.
    ///
    /// # Errors
    ///
    /// See [`ShellConfig::into_builder`].
    pub fn build(self) -> Result<Shell> {
        for issue in validate_config(&self) {
            warn!(issue = %issue, "Shell config issue");
        }
        Ok(self.into_builder()?.build())
    }
}

fn is_json(path: &Path) -> bool {
    path.extension()
        .is_some_and(|extension| extension.eq_ignore_ascii_case("json"))
}
