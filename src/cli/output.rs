//! Output formatting for CLI commands.
//!
//! Results go to stdout, logs go to stderr, so JSON output can be piped
//! straight into another process.

use std::io::Write;

use serde::Serialize;

use crate::chat::{ChatResponse, ErrorPayload};
use crate::cli::args::{OutputFormat, ParleyArgs};
use crate::error::{ParleyError, Result};
use crate::ml::intent_classifier::TrainingReport;

/// Result structure for a training run.
#[derive(Debug, Serialize)]
pub struct TrainingResult {
    pub model_path: String,
    #[serde(flatten)]
    pub report: TrainingReport,
}

/// Error object for commands that have no response of their own.
#[derive(Debug, Serialize)]
pub struct CommandFailure {
    pub error: ErrorPayload,
}

impl From<&ParleyError> for CommandFailure {
    fn from(err: &ParleyError) -> Self {
        CommandFailure { error: err.into() }
    }
}

/// Results that know how to print themselves for humans.
pub trait HumanOutput {
    fn write_human(&self, out: &mut dyn Write) -> std::io::Result<()>;
}

impl HumanOutput for ChatResponse {
    fn write_human(&self, out: &mut dyn Write) -> std::io::Result<()> {
        writeln!(out, "{}", self.response)?;
        writeln!(out, "  intent: {}", self.intent)?;
        if let Some(predictions) = &self.predictions {
            for candidate in predictions {
                writeln!(out, "  {:>6.3}  {}", candidate.probability, candidate.tag)?;
            }
        }
        if let Some(error) = &self.error {
            writeln!(out, "  error: {} ({})", error.message, error.code)?;
        }
        Ok(())
    }
}

impl HumanOutput for TrainingResult {
    fn write_human(&self, out: &mut dyn Write) -> std::io::Result<()> {
        let report = &self.report;
        writeln!(out, "Training Summary:")?;
        writeln!(out, "═════════════════")?;
        writeln!(out, "Documents: {}", report.documents)?;
        writeln!(out, "Classes: {}", report.classes)?;
        writeln!(out, "Unique words: {}", report.unique_words)?;
        writeln!(out, "Iterations: {}", report.stats.iterations)?;
        writeln!(out, "Final loss: {:.6}", report.stats.final_training_loss)?;
        writeln!(out, "Converged: {}", report.stats.converged)?;
        writeln!(out, "Training time: {}ms", report.stats.training_time_ms)?;
        writeln!(out, "Model saved to: {}", self.model_path)?;
        Ok(())
    }
}

impl HumanOutput for CommandFailure {
    fn write_human(&self, out: &mut dyn Write) -> std::io::Result<()> {
        writeln!(out, "Error: {} ({})", self.error.message, self.error.code)
    }
}

/// Write one result to `out` in the selected format.
pub fn write_result<T, W>(out: &mut W, result: &T, args: &ParleyArgs) -> Result<()>
where
    T: Serialize + HumanOutput,
    W: Write,
{
    match args.output_format {
        OutputFormat::Json => {
            if args.pretty {
                serde_json::to_writer_pretty(&mut *out, result)?;
            } else {
                serde_json::to_writer(&mut *out, result)?;
            }
            writeln!(out)?;
        }
        OutputFormat::Human => result.write_human(out)?,
    }
    out.flush()?;
    Ok(())
}

/// Write one result to stdout.
pub fn output_result<T: Serialize + HumanOutput>(result: &T, args: &ParleyArgs) -> Result<()> {
    let stdout = std::io::stdout();
    let mut lock = stdout.lock();
    write_result(&mut lock, result, args)
}
