//! Session executor: applies parsed script commands to a registry.
//!
//! Query commands write their results to the supplied sink; mutating
//! commands are silent. Progress, echo, and warnings go to stderr.

use std::io::Write;
use std::path::{Path, PathBuf};

use crate::domain::error::ObjregError;
use crate::domain::index::RateIndex;
use crate::domain::registry::Registry;
use crate::domain::script::Command;
use crate::ports::factory_port::ObjectFactory;
use crate::ports::fixing_port::FixingSource;

#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// Abort on the first failing command instead of logging and moving on.
    pub stop_on_error: bool,
    /// Echo each command to stderr before executing it.
    pub echo: bool,
    /// Directory against which relative fixing paths resolve.
    pub fixing_base_path: Option<PathBuf>,
    /// Let new fixing values replace conflicting recorded ones.
    pub force_overwrite: bool,
}

impl Default for SessionConfig {
    fn default() -> Self {
        SessionConfig {
            stop_on_error: true,
            echo: false,
            fixing_base_path: None,
            force_overwrite: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionSummary {
    pub executed: usize,
    pub failed: usize,
}

/// Run `commands` against `registry`, writing query output to `out`.
///
/// With `stop_on_error` the first failure aborts the run and comes back as
/// the error; otherwise failures are logged to stderr and counted in the
/// summary.
pub fn run_session(
    registry: &mut Registry,
    factory: &dyn ObjectFactory,
    fixings: &dyn FixingSource,
    config: &SessionConfig,
    commands: &[(usize, Command)],
    out: &mut dyn Write,
) -> Result<SessionSummary, ObjregError> {
    let mut summary = SessionSummary {
        executed: 0,
        failed: 0,
    };
    for (line_number, command) in commands {
        if config.echo {
            eprintln!("{line_number}: {command}");
        }
        match execute(registry, factory, fixings, config, command, out) {
            Ok(()) => summary.executed += 1,
            Err(err) => {
                if config.stop_on_error {
                    eprintln!("error: line {line_number}: {command} failed");
                    return Err(err);
                }
                eprintln!("warning: skipping line {line_number} ({err})");
                summary.failed += 1;
            }
        }
    }
    Ok(summary)
}

fn execute(
    registry: &mut Registry,
    factory: &dyn ObjectFactory,
    fixings: &dyn FixingSource,
    config: &SessionConfig,
    command: &Command,
    out: &mut dyn Write,
) -> Result<(), ObjregError> {
    match command {
        Command::Store { name, spec } => {
            let object = factory.make(registry, spec)?;
            registry.store_boxed(name, object);
        }
        Command::Fixings { name, path } => {
            let index = registry.retrieve_as::<RateIndex>(name)?;
            let full_path = resolve_fixing_path(config.fixing_base_path.as_deref(), path);
            let series = fixings.load(&full_path)?;
            let (dates, values): (Vec<_>, Vec<_>) = series.into_iter().unzip();
            index.add_fixings(&dates, &values, config.force_overwrite)?;
        }
        Command::Retrieve { name } => {
            let object = registry.retrieve(name)?;
            writeln!(out, "{name} = {object}")?;
        }
        Command::Delete { name } => {
            registry.delete(name);
        }
        Command::DeleteAll => {
            registry.delete_all();
        }
        Command::Count => {
            writeln!(out, "{}", registry.object_count())?;
        }
        Command::List { pattern } => {
            for name in registry.list_names(pattern)? {
                writeln!(out, "{name}")?;
            }
        }
        Command::Dump => {
            registry.dump(out)?;
        }
    }
    Ok(())
}

fn resolve_fixing_path(base: Option<&Path>, path: &str) -> PathBuf {
    let path = PathBuf::from(path);
    match base {
        Some(base) if path.is_relative() => base.join(path),
        _ => path,
    }
}
