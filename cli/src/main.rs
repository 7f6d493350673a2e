use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand};
use indexmap::IndexMap;
use serde::Serialize;
use serde_json::{Map, Value};
use shellkit::{
    ConsoleDescriptor, Shell, ShellConfig, ShellResult, TerminalOutput, validate_config,
};
use shellkit_core::ParsedValue;
use tracing::{debug, warn};
use tracing_subscriber::{EnvFilter, fmt};

/// Output format for dispatch results.
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
enum CliOutputFormat {
    Json,
    Yaml,
}

#[derive(Debug, Parser)]
#[command(name = "shellkit")]
#[command(about = "Run POSIX command grammars declared in YAML or JSON")]
struct Cli {
    /// Disable colored help output.
    #[arg(long, global = true)]
    no_color: bool,
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Dispatch an argument list against a shell config and print the result.
    Run(RunArgs),
    /// Print help for the shell or one of its commands.
    Describe(DescribeArgs),
    /// Check a shell config for duplicate or unmatchable names.
    Validate(ValidateArgs),
}

#[derive(Debug, Args)]
struct RunArgs {
    /// Shell config file (`.json` for JSON, YAML otherwise).
    #[arg(long)]
    config: PathBuf,
    /// Output format for the result.
    #[arg(long, default_value = "json")]
    format: CliOutputFormat,
    /// Arguments passed to the shell (program name excluded).
    #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
    args: Vec<String>,
}

#[derive(Debug, Args)]
struct DescribeArgs {
    /// Shell config file (`.json` for JSON, YAML otherwise).
    #[arg(long)]
    config: PathBuf,
    /// Command to describe; the whole shell when omitted.
    command: Option<String>,
}

#[derive(Debug, Args)]
struct ValidateArgs {
    /// Shell config file (`.json` for JSON, YAML otherwise).
    #[arg(long)]
    config: PathBuf,
}

/// Printed form of a successful dispatch.
#[derive(Debug, Serialize)]
struct RunOutput<'a> {
    command: &'a str,
    parameters: &'a Map<String, Value>,
    data: &'a IndexMap<String, ParsedValue>,
}

impl<'a> From<&'a ShellResult> for RunOutput<'a> {
    fn from(result: &'a ShellResult) -> Self {
        Self {
            command: result.command().name(),
            parameters: result.command().parameters(),
            data: result.data(),
        }
    }
}

fn main() {
    init_tracing();
    let cli = Cli::parse();

    let result = match cli.command {
        Command::Run(args) => run_run(args, cli.no_color),
        Command::Describe(args) => run_describe(args, cli.no_color),
        Command::Validate(args) => run_validate(args),
    };

    if let Err(err) = result {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .init();
}

fn load_shell(path: &Path, no_color: bool) -> Result<Shell, String> {
    let config = ShellConfig::load(path)
        .map_err(|err| format!("Failed to load '{}': {err}", path.display()))?;
    for issue in validate_config(&config) {
        warn!(issue = %issue, "Shell config issue");
    }

    let builder = config.into_builder().map_err(|err| err.to_string())?;
    Ok(builder
        .descriptor(ConsoleDescriptor::new(
            TerminalOutput::stdout().colored(!no_color),
        ))
        .build())
}

fn run_run(args: RunArgs, no_color: bool) -> Result<(), String> {
    let mut shell = load_shell(&args.config, no_color)?;
    debug!(arguments = ?args.args, "Running shell");

    let Some(result) = shell.process(&args.args) else {
        std::process::exit(1);
    };

    let output = RunOutput::from(&result);
    let rendered = match args.format {
        CliOutputFormat::Json => serde_json::to_string_pretty(&output)
            .map_err(|err| format!("Failed to serialize result: {err}"))?,
        CliOutputFormat::Yaml => serde_yaml::to_string(&output)
            .map_err(|err| format!("Failed to serialize result: {err}"))?,
    };
    println!("{}", rendered.trim_end());
    Ok(())
}

fn run_describe(args: DescribeArgs, no_color: bool) -> Result<(), String> {
    let mut shell = load_shell(&args.config, no_color)?;

    let mut arguments = Vec::with_capacity(2);
    if let Some(command) = &args.command {
        arguments.push(command.clone());
    }
    arguments.push("--help".to_string());

    let known = args
        .command
        .as_deref()
        .is_none_or(|name| shell.command(name).is_some());
    shell.process(&arguments);

    if !known {
        std::process::exit(1);
    }
    Ok(())
}

fn run_validate(args: ValidateArgs) -> Result<(), String> {
    let config = ShellConfig::load(&args.config)
        .map_err(|err| format!("Failed to load '{}': {err}", args.config.display()))?;

    let issues = validate_config(&config);
    if issues.is_empty() {
        println!(
            "Validated {} command(s) in '{}'.",
            config.commands.len(),
            args.config.display()
        );
        return Ok(());
    }

    for issue in &issues {
        println!("  {issue}");
    }
    Err(format!("{} issue(s) found", issues.len()))
}
