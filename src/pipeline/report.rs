use std::fmt;

use crate::assemble::AssemblyOutput;

#[derive(Debug)]
pub enum SampleStatus {
    Assembled(AssemblyOutput),
    Failed(String),
    /// Not attempted because an earlier sample failed in halt mode
    Skipped,
}

#[derive(Debug)]
pub struct SampleOutcome {
    pub name: String,
    pub status: SampleStatus,
}

/// Result of one postprocessing call
#[derive(Debug)]
pub struct StepOutcome {
    pub step: String,
    pub error: Option<String>,
}

/// Everything that happened in one batch run
#[derive(Debug, Default)]
pub struct BatchReport {
    pub samples: Vec<SampleOutcome>,
    pub postprocess: Vec<StepOutcome>,
}

impl BatchReport {
    pub fn assembled(&self) -> impl Iterator<Item = (&str, &AssemblyOutput)> {
        self.samples.iter().filter_map(|s| match &s.status {
            SampleStatus::Assembled(out) => Some((s.name.as_str(), out)),
            _ => None,
        })
    }

    pub fn failed_samples(&self) -> Vec<&SampleOutcome> {
        self.samples
            .iter()
            .filter(|s| !matches!(s.status, SampleStatus::Assembled(_)))
            .collect()
    }

    pub fn failed_steps(&self) -> Vec<&StepOutcome> {
        self.postprocess.iter().filter(|s| s.error.is_some()).collect()
    }

    pub fn has_failures(&self) -> bool {
        !self.failed_samples().is_empty() || !self.failed_steps().is_empty()
    }

    pub fn log_summary(&self) {
        log::info!("{}", self);
        for s in self.failed_samples() {
            match &s.status {
                SampleStatus::Failed(msg) => log::error!("Sample {} failed: {}", s.name, msg),
                SampleStatus::Skipped => log::warn!("Sample {} was skipped", s.name),
                SampleStatus::Assembled(_) => {}
            }
        }
        for s in self.failed_steps() {
            log::error!("{} failed: {}", s.step, s.error.as_deref().unwrap_or_default());
        }
    }
}

impl fmt::Display for BatchReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let assembled = self.assembled().count();
        let skipped = self
            .samples
            .iter()
            .filter(|s| matches!(s.status, SampleStatus::Skipped))
            .count();
        write!(
            f,
            "{} samples: {} assembled, {} failed, {} skipped; {} of {} postprocessing steps failed",
            self.samples.len(),
            assembled,
            self.samples.len() - assembled - skipped,
            skipped,
            self.failed_steps().len(),
            self.postprocess.len()
        )
    }
}
