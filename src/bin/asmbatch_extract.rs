use std::process::ExitCode;

use asmbatch::command;
use clap::Parser;

/// Write each sequence of an assembly to its own FASTA file, named by length and topology
#[derive(Parser)]
#[command(version, about)]
struct Cli {
    #[command(flatten)]
    cmd: command::ExtractCMD,
}

fn main() -> ExitCode {
    let mut cli = Cli::parse();

    if let Err(e) = cli.cmd.try_execute() {
        eprintln!("Error: {:#}", e);
        return ExitCode::FAILURE;
    }
    ExitCode::SUCCESS
}
