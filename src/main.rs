use clap::Parser;
use objreg::cli::{run, Cli};

fn main() -> std::process::ExitCode {
    run(Cli::parse())
}
