//! The report generator: two batches of independent artifacts.
//!
//! The scalability batch runs only when a dataset is given and loads; any of
//! its failures are reported and ignored. The sample batch always runs; any of
//! its failures make the whole run unsuccessful. Every artifact is attempted
//! regardless of what happened to the previous one.

use chart::Charts;
use detection::DetectionCounts;
use errors::*;
use output::{Artifact, OutputDir, SAMPLE_ARTIFACTS};
use scalability::Scalability;
use setting::Setting;
use std::fs;
use std::io::Write;
use std::panic::{self, AssertUnwindSafe};
use std::path::{Path, PathBuf};
use table;

const BANNER: &str = "============================================================";

/// What a run produced.
#[derive(Debug, Default, Clone)]
pub struct RunSummary {
    /// Files written, in generation order.
    pub saved: Vec<PathBuf>,

    /// Artifacts that could not be produced, with the reason.
    pub failed: Vec<(Artifact, String)>,

    /// True when no scalability artifact was attempted (no input, missing
    /// input, or a dataset that did not load).
    pub scalability_skipped: bool,
}

impl RunSummary {
    /// A run fails only when a sample artifact fails.
    pub fn success(&self) -> bool {
        !self.failed
            .iter()
            .any(|&(artifact, _)| SAMPLE_ARTIFACTS.contains(&artifact))
    }
}

/// Flattens an error chain into one line.
fn describe(err: &Error) -> String {
    err.iter()
        .map(|e| e.to_string())
        .collect::<Vec<String>>()
        .join(": ")
}

struct Generator<'a, W: Write + 'a> {
    out: OutputDir,
    charts: Charts,
    console: &'a mut W,
    summary: RunSummary,
}

impl<'a, W: Write> Generator<'a, W> {
    /// Produces one artifact. Errors and panics are reported, recorded and
    /// swallowed.
    fn attempt<F>(&mut self, artifact: Artifact, make: F) -> Result<()>
    where
        F: FnOnce(&Charts, &Path) -> Result<()>,
    {
        let path = self.out.path(artifact);
        let charts = &self.charts;
        let outcome = panic::catch_unwind(AssertUnwindSafe(|| make(charts, &path)));
        let reason = match outcome {
            Ok(Ok(())) => {
                writeln!(self.console, "[SAVED] {}", path.display())?;
                info!("saved {:?}", path);
                self.summary.saved.push(path);
                return Ok(());
            }
            Ok(Err(e)) => describe(&e),
            Err(_) => "panicked while drawing".to_string(),
        };
        writeln!(
            self.console,
            "[ERROR] Failed to generate {}: {}",
            artifact.file_name(),
            reason
        )?;
        warn!("{:?} failed: {}", artifact, reason);
        self.summary.failed.push((artifact, reason));
        Ok(())
    }

    fn scalability_batch(&mut self, data: &Scalability) -> Result<()> {
        self.attempt(Artifact::Throughput, |c, p| c.throughput(data, p))?;
        self.attempt(Artifact::SpeedupEfficiency, |c, p| c.speedup_efficiency(data, p))?;
        self.attempt(Artifact::Latency, |c, p| c.latency(data, p))?;
        self.attempt(Artifact::MpiOverhead, |c, p| c.mpi_overhead(data, p))?;

        let columns = data.columns();
        self.attempt(Artifact::LatexTable, |_, p| {
            fs::write(p, table::to_latex(&columns))?;
            Ok(())
        })?;
        self.attempt(Artifact::MarkdownTable, |_, p| {
            fs::write(p, table::to_markdown(&columns))?;
            Ok(())
        })
    }

    fn sample_batch(&mut self, counts: &DetectionCounts) -> Result<()> {
        self.attempt(Artifact::ConfusionMatrix, |c, p| c.confusion_matrix(counts, p))?;
        self.attempt(Artifact::DetectionMetrics, |c, p| c.detection_metrics(p))?;
        self.attempt(Artifact::LatencyDistribution, |c, p| c.latency_distribution(p))?;
        self.attempt(Artifact::ResourceUtilization, |c, p| c.resource_utilization(p))
    }
}

/// Runs the whole report. `input` is the optional scalability CSV; progress
/// goes to `console`.
///
/// Returns an error only when the output directory cannot be prepared or the
/// console cannot be written; per-artifact failures are in the summary.
pub fn run<W: Write>(input: Option<&Path>, setting: &Setting, console: &mut W) -> Result<RunSummary> {
    writeln!(console, "{}", BANNER)?;
    writeln!(console, "  Scalability Report - Graph Generation")?;
    writeln!(console, "{}", BANNER)?;

    let input = match input {
        None => {
            writeln!(console, "Usage: scalereport <scalability_summary.csv>")?;
            writeln!(console, "\nGenerating graphs with default/sample data...")?;
            None
        }
        Some(path) if !path.exists() => {
            writeln!(console, "[ERROR] File not found: {}", path.display())?;
            writeln!(console, "\nGenerating graphs with default/sample data...")?;
            None
        }
        Some(path) => Some(path),
    };

    let out = OutputDir::prepare(&setting.output_dir)?;
    writeln!(console, "\n[INFO] Output directory: {}/", out.root().display())?;
    writeln!(console)?;

    let mut gen = Generator {
        out: out,
        charts: Charts::new(setting),
        console: console,
        summary: RunSummary::default(),
    };

    match input {
        Some(path) => {
            writeln!(gen.console, "[INFO] Generating scalability analysis graphs...")?;
            match Scalability::from_path(path) {
                Ok(data) => gen.scalability_batch(&data)?,
                Err(e) => {
                    writeln!(
                        gen.console,
                        "[ERROR] Failed to process scalability data: {}",
                        describe(&e)
                    )?;
                    gen.summary.scalability_skipped = true;
                }
            }
        }
        None => gen.summary.scalability_skipped = true,
    }

    writeln!(gen.console, "\n[INFO] Generating detection analysis graphs...")?;
    let counts = DetectionCounts::load(&setting.metrics_path);
    gen.sample_batch(&counts)?;

    let summary = gen.summary;
    let console = gen.console;
    if !summary.success() {
        writeln!(console, "[ERROR] Failed to generate graphs")?;
        return Ok(summary);
    }

    writeln!(console, "\n{}", BANNER)?;
    writeln!(console, "  Graph Generation Complete!")?;
    writeln!(console, "{}", BANNER)?;
    writeln!(console, "\nAll graphs saved to: {}/", gen.out.root().display())?;
    writeln!(console, "\nGenerated files:")?;
    for path in &summary.saved {
        let name = path.file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        match Artifact::from_file_name(&name).and_then(|a| a.description()) {
            Some(desc) => writeln!(console, "  - {} ({})", name, desc)?,
            None => writeln!(console, "  - {}", name)?,
        }
    }
    if !summary.failed.is_empty() {
        writeln!(console, "\nSkipped after errors:")?;
        for &(artifact, _) in &summary.failed {
            writeln!(console, "  - {}", artifact.file_name())?;
        }
    }
    writeln!(console, "{}", BANNER)?;
    Ok(summary)
}
