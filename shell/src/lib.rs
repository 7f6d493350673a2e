//! Command dispatch and help rendering on top of [`shellkit_core`].
//!
//! A [`Shell`] owns a list of [`Command`]s, each with its own
//! [`Definition`](shellkit_core::Definition). [`Shell::process`] takes an
//! argument list, strips the global `--verbose`/`--help` options, finds the
//! command and parses its arguments. Everything the user should see (help,
//! errors, "did you mean" hints) goes through a [`Descriptor`] to an
//! [`Output`].
//!
//! Shells are put together with [`ShellBuilder`] or loaded from a YAML/JSON
//! [`ShellConfig`]. A [`TaskRunner`] runs the [`Task`] a dispatched command
//! names in its `task` parameter.
//!
//! # Example
//!
//! ```
//! use shellkit::{BufferOutput, ConsoleDescriptor, OptionConfig, ShellBuilder};
//! use shellkit_core::ParsedValue;
//!
//! let output = BufferOutput::new();
//! let mut shell = ShellBuilder::new()
//!     .program("deploy")
//!     .descriptor(ConsoleDescriptor::new(output.clone()))
//!     .add_command(
//!         "build",
//!         "Build a target.",
//!         &["target"],
//!         &[OptionConfig::new("force", "Force a rebuild.").short('f').long("force")],
//!         Default::default(),
//!     )
//!     .unwrap()
//!     .build();
//!
//! let args: Vec<String> = ["build", "--force", "web"].iter().map(|s| s.to_string()).collect();
//! let result = shell.process(&args).unwrap();
//! assert_eq!(result.data()["force"], ParsedValue::Flag);
//!
//! let args = vec!["build".to_string(), "--help".to_string()];
//! assert!(shell.process(&args).is_none());
//! assert!(output.contents().contains("-f|--force"));
//! ```

mod builder;
mod command;
mod config;
mod descriptor;
mod error;
mod output;
mod shell;
mod suggester;
mod task;
mod validate;

pub use builder::ShellBuilder;
pub use command::{About, Command, DEFAULT_NAME, DEFAULT_PROGRAM, DEFAULT_VERSION};
pub use config::{CommandConfig, OperandConfig, OptionConfig, ShellConfig};
pub use descriptor::{ConsoleDescriptor, Descriptor};
pub use error::{Result, ShellError};
pub use output::{BufferOutput, Color, Output, Style, TerminalOutput};
pub use shell::{Shell, ShellResult};
pub use suggester::{
    DEFAULT_PERCENTAGE, FuzzySuggester, SimilarTextSuggester, Suggester, similarity,
};
pub use task::{TASK_PARAMETER, Task, TaskError, TaskRunner};
pub use validate::{ConfigIssue, validate_config};
