//! Work bound to commands.
//!
//! A command names its task through the `task` key of its parameters. A
//! [`TaskRunner`] maps those names to [`Task`] implementations and runs the
//! one a [`ShellResult`] points at.

use indexmap::IndexMap;
use serde_json::Value;
use tracing::debug;

use crate::error::{Result, ShellError};
use crate::shell::ShellResult;

/// Parameter key holding the task name of a command.
pub const TASK_PARAMETER: &str = "task";

/// Error returned by a failing [`Task`].
pub type TaskError = Box<dyn std::error::Error + Send + Sync>;

/// Something to do once a command has been dispatched.
pub trait Task {
    fn execute(&self, result: &ShellResult) -> std::result::Result<(), TaskError>;
}

impl<F> Task for F
where
    F: Fn(&ShellResult) -> std::result::Result<(), TaskError>,
{
    fn execute(&self, result: &ShellResult) -> std::result::Result<(), TaskError> {
        self(result)
    }
}

/// Registry of named tasks.
///
/// # Examples
///
/// ```
/// use serde_json::json;
/// use shellkit::{Command, ShellResult, TaskError, TaskRunner};
/// use shellkit_core::Definition;
///
/// let mut runner = TaskRunner::new();
/// runner.register("build::run", |result: &ShellResult| -> Result<(), TaskError> {
///     assert_eq!(result.command().name(), "build");
///     Ok(())
/// });
///
/// let mut parameters = serde_json::Map::new();
/// parameters.insert("task".to_string(), json!("build::run"));
/// let command = Command::new("build", "", Definition::new()).with_parameters(parameters);
///
/// runner.run(&ShellResult::new(command, Default::default())).unwrap();
/// ```
#[derive(Default)]
pub struct TaskRunner {
    tasks: IndexMap<String, Box<dyn Task>>,
}

impl TaskRunner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `task` under `name`, replacing any earlier task of that name.
    pub fn register(&mut self, name: impl Into<String>, task: impl Task + 'static) -> &mut Self {
        self.tasks.insert(name.into(), Box::new(task));
        self
    }

    pub fn contains(&self, name: &str) -> bool {
        self.tasks.contains_key(name)
    }

    /// Runs the task named by the dispatched command's `task` parameter.
    pub fn run(&self, result: &ShellResult) -> Result<()> {
        let command = result.command().name();
        let Some(name) = result
            .command()
            .parameters()
            .get(TASK_PARAMETER)
            .and_then(Value::as_str)
        else {
            return Err(ShellError::TaskMissing(command.to_string()));
        };

        let task = self
            .tasks
            .get(name)
            .ok_or_else(|| ShellError::TaskNotFound(name.to_string()))?;

        debug!(command, task = name, "Running task");
        task.execute(result).map_err(|source| ShellError::TaskFailed {
            task: name.to_string(),
            source,
        })
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;
    use std::rc::Rc;

    use serde_json::{Map, json};
    use shellkit_core::{Definition, ParsedValue};

    use super::*;
    use crate::command::Command;

    fn result(task: Option<Value>) -> ShellResult {
        let mut parameters = Map::new();
        if let Some(task) = task {
            parameters.insert(TASK_PARAMETER.to_string(), task);
        }
        let command = Command::new("build", "Build a target.", Definition::new())
            .with_parameters(parameters);
        let mut data = IndexMap::new();
        data.insert("target".to_string(), ParsedValue::Value("web".to_string()));
        ShellResult::new(command, data)
    }

    struct Recorder(Rc<Cell<u32>>);

    impl Task for Recorder {
        fn execute(&self, result: &ShellResult) -> std::result::Result<(), TaskError> {
            assert_eq!(result.data()["target"].as_str(), Some("web"));
            self.0.set(self.0.get() + 1);
            Ok(())
        }
    }

    #[test]
    fn test_runs_named_task() {
        let calls = Rc::new(Cell::new(0));
        let mut runner = TaskRunner::new();
        runner.register("build::run", Recorder(calls.clone()));

        assert!(runner.contains("build::run"));
        runner.run(&result(Some(json!("build::run")))).unwrap();
        assert_eq!(calls.get(), 1);
    }

    #[test]
    fn test_later_registration_replaces() {
        let calls = Rc::new(Cell::new(0));
        let mut runner = TaskRunner::new();
        runner
            .register("build::run", |_: &ShellResult| -> std::result::Result<(), TaskError> {
                Err("stale".into())
            })
            .register("build::run", Recorder(calls.clone()));

        runner.run(&result(Some(json!("build::run")))).unwrap();
        assert_eq!(calls.get(), 1);
    }

    #[test]
    fn test_missing_task_parameter() {
        let runner = TaskRunner::new();

        let err = runner.run(&result(None)).unwrap_err();
        assert!(matches!(err, ShellError::TaskMissing(ref name) if name == "build"));

        let err = runner.run(&result(Some(json!(42)))).unwrap_err();
        assert_eq!(err.to_string(), "command \"build\" has no task");
    }

    #[test]
    fn test_unknown_task() {
        let runner = TaskRunner::new();
        let err = runner.run(&result(Some(json!("build::run")))).unwrap_err();
        assert_eq!(err.to_string(), "task \"build::run\" not registered");
    }

    #[test]
    fn test_task_failure_keeps_source() {
        let mut runner = TaskRunner::new();
        runner.register("build::run", |_: &ShellResult| -> std::result::Result<(), TaskError> {
            Err(std::io::Error::other("disk full").into())
        });

        let err = runner.run(&result(Some(json!("build::run")))).unwrap_err();
        assert_eq!(err.to_string(), "task \"build::run\" failed");
        let source = std::error::Error::source(&err).unwrap();
        assert_eq!(source.to_string(), "disk full");
    }
}
