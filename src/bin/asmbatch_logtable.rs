use std::process::ExitCode;

use asmbatch::command;
use clap::Parser;

/// Collect the component tables of every assembler log into two summary tables
#[derive(Parser)]
#[command(version, about)]
struct Cli {
    #[command(flatten)]
    cmd: command::LogTableCMD,
}

fn main() -> ExitCode {
    let mut cli = Cli::parse();

    if let Err(e) = cli.cmd.try_execute() {
        eprintln!("Error: {:#}", e);
        return ExitCode::FAILURE;
    }
    ExitCode::SUCCESS
}
