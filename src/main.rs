use std::process::ExitCode;

use asmbatch::command;
use clap::{ArgAction, CommandFactory, Parser};

/// Assemble every sample folder with Unicycler, then tabulate the logs and split the assemblies
#[derive(Parser)]
#[command(version, about, disable_help_flag = true)]
struct Cli {
    #[command(flatten)]
    pipeline: command::PipelineCMD,

    #[arg(short = 'h', long = "help", action = ArgAction::SetTrue)]
    /// Print usage and exit
    help: bool,
}

fn main() -> ExitCode {
    let mut cli = Cli::parse();

    //Asking for help is not a successful run
    if cli.help {
        if let Err(e) = Cli::command().print_help() {
            eprintln!("Error: failed to print help: {}", e);
        }
        return ExitCode::FAILURE;
    }

    match cli.pipeline.try_execute() {
        Ok(report) if !report.has_failures() => ExitCode::SUCCESS,
        Ok(report) => {
            eprintln!("Error: {}", report);
            ExitCode::FAILURE
        }
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}
