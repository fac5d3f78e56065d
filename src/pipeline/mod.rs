mod report;

pub use report::*;

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::assemble::assemble_sample;
use crate::command::constants::{ASSEMBLY_FILE_NAME, SHARED_SEQUENCES_DIR_NAME, SUMMARY_DIR_NAME};
use crate::process::{ToolCommand, ToolRunner};
use crate::runtime::{Config, Error, ErrorMode};
use crate::sample::{classify_folder, list_sample_folders, SampleFolder};
use crate::utils::{check_program, require_directory};

pub fn summary_dir(config: &Config) -> PathBuf {
    config.path_out.join(SUMMARY_DIR_NAME)
}

pub fn shared_sequences_dir(config: &Config) -> PathBuf {
    summary_dir(config).join(SHARED_SEQUENCES_DIR_NAME)
}

/// Everything that must hold before the first sample is touched
fn preflight(config: &Config) -> anyhow::Result<()> {
    require_directory(&config.path_in)?;
    require_directory(&config.path_out)?;

    //Outputs inside the input tree would be picked up as samples
    let input = fs::canonicalize(&config.path_in)?;
    let output = fs::canonicalize(&config.path_out)?;
    if output.starts_with(&input) {
        return Err(Error::output_inside_input(&config.path_in, &config.path_out).into());
    }

    check_program(&config.assembly.program)?;
    check_program(&config.program_logtable)?;
    check_program(&config.program_extract)?;
    Ok(())
}

/// Make the summary folders. Done once the samples are listed so a failed start leaves no output
fn create_summary_dirs(config: &Config) -> anyhow::Result<()> {
    let summary = summary_dir(config);
    match fs::create_dir(&summary) {
        Ok(()) => {}
        Err(e) if e.kind() == ErrorKind::AlreadyExists => return Err(Error::output_exists(&summary).into()),
        Err(e) => return Err(Error::file_not_valid(&summary, Some(e.to_string())).into()),
    }
    if config.shared_copy {
        fs::create_dir(shared_sequences_dir(config))?;
    }
    Ok(())
}

fn assemble_one(runner: &dyn ToolRunner, config: &Config, sample: &SampleFolder) -> SampleStatus {
    let reads = match classify_folder(&sample.path, config.policy) {
        Ok(reads) => reads,
        Err(e) => return SampleStatus::Failed(e.to_string()),
    };
    match assemble_sample(runner, &config.assembly, sample, &reads, &config.path_out) {
        Ok(out) => SampleStatus::Assembled(out),
        Err(e) => SampleStatus::Failed(e.to_string()),
    }
}

pub fn logtable_command(config: &Config) -> ToolCommand {
    ToolCommand::new(&config.program_logtable)
        .arg("-i")
        .arg(&config.path_out)
        .arg("-o")
        .arg(summary_dir(config))
}

pub fn extract_command(config: &Config, sample_out: &Path) -> ToolCommand {
    let cmd = ToolCommand::new(&config.program_extract)
        .arg("-i")
        .arg(sample_out)
        .arg("-f")
        .arg(ASSEMBLY_FILE_NAME);
    if config.shared_copy {
        cmd.arg("-o").arg(shared_sequences_dir(config))
    } else {
        cmd
    }
}

fn run_step(runner: &dyn ToolRunner, step: String, cmd: &ToolCommand) -> StepOutcome {
    log::info!("Running {}", step);
    let result = runner.run(cmd).and_then(|out| out.check(cmd));
    StepOutcome {
        step,
        error: result.err().map(|e| e.to_string()),
    }
}

/// Assemble every sample folder in turn, then build the summary tables and split the assemblies.
///
/// Per-sample and postprocessing failures are collected in the report; only precondition
/// failures are returned as errors.
pub fn run_pipeline(config: &Config, runner: &dyn ToolRunner) -> anyhow::Result<BatchReport> {
    preflight(config)?;

    let samples = list_sample_folders(&config.path_in)?;
    log::info!("Found {} sample folders in {:?}", samples.len(), config.path_in);
    create_summary_dirs(config)?;

    let mut report = BatchReport::default();
    let mut halted = false;
    for sample in samples {
        if halted {
            report.samples.push(SampleOutcome {
                name: sample.name,
                status: SampleStatus::Skipped,
            });
            continue;
        }

        let status = assemble_one(runner, config, &sample);
        if let SampleStatus::Failed(msg) = &status {
            log::error!("Sample {} failed: {}", sample.name, msg);
            if config.error_mode == ErrorMode::Halt {
                log::warn!("Halting after first failed sample");
                halted = true;
            }
        } else {
            log::info!("Sample {} assembled", sample.name);
        }
        report.samples.push(SampleOutcome {
            name: sample.name,
            status,
        });
    }

    let step = run_step(runner, "log table".to_string(), &logtable_command(config));
    report.postprocess.push(step);

    let extract_steps: Vec<(String, ToolCommand)> = report
        .assembled()
        .map(|(name, out)| (format!("extract {}", name), extract_command(config, &out.dir)))
        .collect();
    for (step, cmd) in extract_steps {
        let outcome = run_step(runner, step, &cmd);
        report.postprocess.push(outcome);
    }

    Ok(report)
}
