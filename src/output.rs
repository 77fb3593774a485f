//! The output directory and the fixed names of everything written into it.

use errors::*;
use std::fs;
use std::path::{Path, PathBuf};

/// Every artifact the report can produce. Names never change between runs.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum Artifact {
    /// Throughput vs workers.
    Throughput,
    /// Speedup and efficiency side by side.
    SpeedupEfficiency,
    /// Latency vs workers.
    Latency,
    /// MPI overhead vs workers.
    MpiOverhead,
    /// LaTeX summary table.
    LatexTable,
    /// Markdown summary table.
    MarkdownTable,
    /// Confusion matrix heat map.
    ConfusionMatrix,
    /// Detection score bars.
    DetectionMetrics,
    /// Latency percentile bars.
    LatencyDistribution,
    /// Resource panels.
    ResourceUtilization,
}

/// Artifacts derived from the scalability dataset, in generation order.
pub const SCALABILITY_ARTIFACTS: [Artifact; 6] = [
    Artifact::Throughput,
    Artifact::SpeedupEfficiency,
    Artifact::Latency,
    Artifact::MpiOverhead,
    Artifact::LatexTable,
    Artifact::MarkdownTable,
];

/// Artifacts drawn from the detection counts and sample figures.
pub const SAMPLE_ARTIFACTS: [Artifact; 4] = [
    Artifact::ConfusionMatrix,
    Artifact::DetectionMetrics,
    Artifact::LatencyDistribution,
    Artifact::ResourceUtilization,
];

impl Artifact {
    /// File name inside the output directory.
    pub fn file_name(&self) -> &'static str {
        match *self {
            Artifact::Throughput => "scalability_throughput.png",
            Artifact::SpeedupEfficiency => "scalability_speedup_efficiency.png",
            Artifact::Latency => "scalability_latency.png",
            Artifact::MpiOverhead => "scalability_mpi_overhead.png",
            Artifact::LatexTable => "scalability_table.tex",
            Artifact::MarkdownTable => "scalability_table.md",
            Artifact::ConfusionMatrix => "confusion_matrix.png",
            Artifact::DetectionMetrics => "detection_metrics.png",
            Artifact::LatencyDistribution => "latency_distribution.png",
            Artifact::ResourceUtilization => "resource_utilization.png",
        }
    }

    /// The artifact written under `name`, if any.
    pub fn from_file_name(name: &str) -> Option<Artifact> {
        SCALABILITY_ARTIFACTS
            .iter()
            .chain(SAMPLE_ARTIFACTS.iter())
            .find(|a| a.file_name() == name)
            .cloned()
    }

    /// Short description used in the closing listing.
    pub fn description(&self) -> Option<&'static str> {
        match *self {
            Artifact::LatexTable => Some("LaTeX"),
            Artifact::MarkdownTable => Some("Markdown"),
            _ => None,
        }
    }
}

/// The output directory of one run.
#[derive(Debug, Clone)]
pub struct OutputDir {
    root: PathBuf,
}

impl OutputDir {
    /// Creates the directory (and parents) and removes every `*.png` directly
    /// inside it. Other files are kept. A file that cannot be removed is
    /// logged and skipped.
    pub fn prepare<P: AsRef<Path>>(root: P) -> Result<OutputDir> {
        let root = root.as_ref().to_path_buf();
        fs::create_dir_all(&root)
            .chain_err(|| format!("failed to create output directory {:?}", root))?;

        for entry in fs::read_dir(&root)? {
            let path = entry?.path();
            if !path.is_file() || path.extension().and_then(|e| e.to_str()) != Some("png") {
                continue;
            }
            match fs::remove_file(&path) {
                Ok(()) => trace!("removed stale {:?}", path),
                Err(e) => warn!("failed to remove stale {:?}: {}", path, e),
            }
        }

        Ok(OutputDir { root: root })
    }

    /// The directory itself.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Where `artifact` is written.
    pub fn path(&self, artifact: Artifact) -> PathBuf {
        self.root.join(artifact.file_name())
    }
}

#[cfg(test)]
mod tests {
    extern crate tempfile;

    use super::*;
    use std::fs::File;

    #[test]
    fn creates_nested_directory() {
        let tmp = tempfile::tempdir().unwrap();
        let dir = tmp.path().join("a").join("graphs");
        let out = OutputDir::prepare(&dir).unwrap();
        assert!(dir.is_dir());
        assert_eq!(
            out.path(Artifact::ConfusionMatrix),
            dir.join("confusion_matrix.png")
        );
    }

    #[test]
    fn clears_only_png_files() {
        let tmp = tempfile::tempdir().unwrap();
        File::create(tmp.path().join("old.png")).unwrap();
        File::create(tmp.path().join("scalability_throughput.png")).unwrap();
        File::create(tmp.path().join("scalability_table.md")).unwrap();
        File::create(tmp.path().join("notes.txt")).unwrap();
        fs::create_dir(tmp.path().join("keep.png")).unwrap();

        OutputDir::prepare(tmp.path()).unwrap();

        assert!(!tmp.path().join("old.png").exists());
        assert!(!tmp.path().join("scalability_throughput.png").exists());
        assert!(tmp.path().join("scalability_table.md").exists());
        assert!(tmp.path().join("notes.txt").exists());
        assert!(tmp.path().join("keep.png").is_dir());
    }

    #[test]
    fn file_names_are_unique() {
        let mut names = SCALABILITY_ARTIFACTS
            .iter()
            .chain(SAMPLE_ARTIFACTS.iter())
            .map(|a| a.file_name())
            .collect::<Vec<_>>();
        assert_eq!(names.len(), 10);
        names.sort();
        names.dedup();
        assert_eq!(names.len(), 10);
    }

    #[test]
    fn tables_are_described() {
        let md = Artifact::from_file_name("scalability_table.md");
        assert_eq!(md, Some(Artifact::MarkdownTable));
        assert_eq!(md.and_then(|a| a.description()), Some("Markdown"));
        assert_eq!(Artifact::LatexTable.description(), Some("LaTeX"));
        assert_eq!(Artifact::ConfusionMatrix.description(), None);
        assert_eq!(Artifact::from_file_name("notes.txt"), None);
    }
}
