//! CLI definition and dispatch.

use clap::{Parser, Subcommand};
use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;

use crate::adapters::csv_fixing_adapter::CsvFixingAdapter;
use crate::adapters::file_config_adapter::FileConfigAdapter;
use crate::adapters::instrument_factory::InstrumentFactory;
use crate::domain::config_validation::validate_session_config;
use crate::domain::error::ObjregError;
use crate::domain::registry::Registry;
use crate::domain::script_parser;
use crate::domain::session::{run_session, SessionConfig};
use crate::ports::config_port::ConfigPort;
use crate::ports::factory_port::ObjectFactory;

#[derive(Parser, Debug)]
#[command(name = "objreg", about = "Named object registry with a script front end")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Execute a command script against a fresh registry
    Exec {
        #[arg(short, long)]
        script: PathBuf,
        #[arg(short, long)]
        config: Option<PathBuf>,
        #[arg(short, long)]
        output: Option<PathBuf>,
        #[arg(long)]
        dry_run: bool,
    },
    /// Parse a script and report errors without executing it
    Check {
        #[arg(short, long)]
        script: PathBuf,
    },
    /// List the object types the built-in factory can create
    Types,
}

pub fn run(cli: Cli) -> ExitCode {
    match cli.command {
        Command::Exec {
            script,
            config,
            output,
            dry_run,
        } => {
            if dry_run {
                run_dry_run(&script, config.as_ref())
            } else {
                run_exec(&script, config.as_ref(), output.as_ref())
            }
        }
        Command::Check { script } => run_check(&script),
        Command::Types => run_types(),
    }
}

pub fn load_config(path: &PathBuf) -> Result<FileConfigAdapter, ExitCode> {
    FileConfigAdapter::from_file(path).map_err(|e| {
        let err = ObjregError::ConfigParse {
            file: path.display().to_string(),
            reason: e.to_string(),
        };
        eprintln!("error: {err}");
        ExitCode::from(&err)
    })
}

/// Read session settings out of a validated config, falling back to the
/// defaults for any key the file leaves out.
pub fn build_session_config(adapter: &dyn ConfigPort) -> SessionConfig {
    let defaults = SessionConfig::default();
    SessionConfig {
        stop_on_error: adapter.get_bool("session", "stop_on_error", defaults.stop_on_error),
        echo: adapter.get_bool("session", "echo", defaults.echo),
        fixing_base_path: adapter.get_string("fixings", "base_path").map(PathBuf::from),
        force_overwrite: adapter.get_bool("fixings", "force_overwrite", defaults.force_overwrite),
    }
}

fn resolve_session_config(config_path: Option<&PathBuf>) -> Result<SessionConfig, ExitCode> {
    let path = match config_path {
        Some(p) => p,
        None => return Ok(SessionConfig::default()),
    };

    eprintln!("Loading config from {}", path.display());
    let adapter = load_config(path)?;

    if let Err(e) = validate_session_config(&adapter) {
        eprintln!("error: {e}");
        return Err((&e).into());
    }

    Ok(build_session_config(&adapter))
}

fn run_exec(
    script_path: &PathBuf,
    config_path: Option<&PathBuf>,
    output_path: Option<&PathBuf>,
) -> ExitCode {
    // Stage 1: Resolve session configuration
    let session_config = match resolve_session_config(config_path) {
        Ok(c) => c,
        Err(code) => return code,
    };

    // Stage 2: Read the script
    eprintln!("Loading script from {}", script_path.display());
    let source = match fs::read_to_string(script_path) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("error: failed to read {}: {e}", script_path.display());
            return (&ObjregError::Io(e)).into();
        }
    };

    // Stage 3: Parse
    let commands = match script_parser::parse_script(&source) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("error: {}", e.display_with_context());
            return (&ObjregError::from(e)).into();
        }
    };
    eprintln!("Parsed {} commands", commands.len());

    // Stage 4: Wire the session and run it
    let factory = InstrumentFactory::new();
    let fixings = CsvFixingAdapter::new();
    let mut registry = Registry::new();

    let result = match output_path {
        Some(path) => {
            let mut file = match fs::File::create(path) {
                Ok(f) => f,
                Err(e) => {
                    eprintln!("error: failed to create {}: {e}", path.display());
                    return (&ObjregError::Io(e)).into();
                }
            };
            run_session(
                &mut registry,
                &factory,
                &fixings,
                &session_config,
                &commands,
                &mut file,
            )
        }
        None => {
            let mut stdout = std::io::stdout();
            run_session(
                &mut registry,
                &factory,
                &fixings,
                &session_config,
                &commands,
                &mut stdout,
            )
        }
    };

    // Stage 5: Report the outcome
    match result {
        Ok(summary) => {
            if summary.failed > 0 {
                eprintln!(
                    "Session finished: {} commands executed, {} failed, {} objects in the registry",
                    summary.executed,
                    summary.failed,
                    registry.object_count()
                );
            } else {
                eprintln!(
                    "Session finished: {} commands executed, {} objects in the registry",
                    summary.executed,
                    registry.object_count()
                );
            }
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("error: {e}");
            (&e).into()
        }
    }
}

pub fn run_dry_run(script_path: &PathBuf, config_path: Option<&PathBuf>) -> ExitCode {
    let session_config = match resolve_session_config(config_path) {
        Ok(c) => c,
        Err(code) => return code,
    };
    if config_path.is_some() {
        eprintln!("Config validated successfully");
    }

    eprintln!("Loading script from {}", script_path.display());
    let source = match fs::read_to_string(script_path) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("error: failed to read {}: {e}", script_path.display());
            return (&ObjregError::Io(e)).into();
        }
    };

    let commands = match script_parser::parse_script(&source) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("error: {}", e.display_with_context());
            return (&ObjregError::from(e)).into();
        }
    };

    eprintln!("\nSession settings:");
    eprintln!("  stop_on_error: {}", session_config.stop_on_error);
    eprintln!("  echo: {}", session_config.echo);
    match &session_config.fixing_base_path {
        Some(p) => eprintln!("  fixing base path: {}", p.display()),
        None => eprintln!("  fixing base path: (current directory)"),
    }
    eprintln!("  force_overwrite: {}", session_config.force_overwrite);

    eprintln!("\nParsed commands:");
    for (line_number, command) in &commands {
        eprintln!("  {line_number}: {command}");
    }

    eprintln!("\nDry run complete: script is valid");
    ExitCode::SUCCESS
}

fn run_check(script_path: &PathBuf) -> ExitCode {
    eprintln!("Checking script: {}", script_path.display());
    let source = match fs::read_to_string(script_path) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("error: failed to read {}: {e}", script_path.display());
            return (&ObjregError::Io(e)).into();
        }
    };

    let commands = match script_parser::parse_script(&source) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("error: {}", e.display_with_context());
            return (&ObjregError::from(e)).into();
        }
    };

    for (line_number, command) in &commands {
        eprintln!("  {line_number}: {command}");
    }
    eprintln!("\nScript is valid: {} commands", commands.len());
    ExitCode::SUCCESS
}

fn run_types() -> ExitCode {
    let factory = InstrumentFactory::new();
    let types = factory.type_names();
    for name in &types {
        println!("{name}");
    }
    eprintln!("{} object types available", types.len());
    ExitCode::SUCCESS
}
