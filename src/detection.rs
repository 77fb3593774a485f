//! Detection counts (the confusion matrix snapshot) written by the detector
//! next to its text log.
//!
//! ```ignore
//! True Positives,False Positives,True Negatives,False Negatives,...
//! 48298,1377,325,0,...
//! ```
//!
//! Loading never fails: anything missing or unreadable falls back to the
//! counts of the last reference run.

use csv;
use std::path::Path;

const TRUE_POSITIVES: &str = "True Positives";
const FALSE_POSITIVES: &str = "False Positives";
const TRUE_NEGATIVES: &str = "True Negatives";
const FALSE_NEGATIVES: &str = "False Negatives";

/// Confusion counts of a binary (benign / attack) classifier.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub struct DetectionCounts {
    /// Attacks flagged as attacks.
    pub true_positives: u64,
    /// Benign flows flagged as attacks.
    pub false_positives: u64,
    /// Benign flows passed as benign.
    pub true_negatives: u64,
    /// Attacks passed as benign.
    pub false_negatives: u64,
}

impl Default for DetectionCounts {
    fn default() -> Self {
        DetectionCounts {
            true_positives: 48298,
            false_positives: 1377,
            true_negatives: 325,
            false_negatives: 0,
        }
    }
}

#[inline]
fn ratio(num: u64, den: u64) -> f64 {
    if den == 0 {
        0.0
    } else {
        num as f64 / den as f64
    }
}

impl DetectionCounts {
    /// Reads the first data row of `path`. Columns that are absent or do not
    /// parse keep their default; a missing or unreadable file yields the
    /// defaults entirely.
    pub fn load<P: AsRef<Path>>(path: P) -> DetectionCounts {
        let path = path.as_ref();
        if !path.is_file() {
            debug!("no detection metrics at {:?}, using defaults", path);
            return DetectionCounts::default();
        }
        match csv::ReaderBuilder::new().trim(csv::Trim::All).from_path(path) {
            Ok(rdr) => DetectionCounts::from_csv(rdr),
            Err(e) => {
                debug!("unreadable detection metrics {:?} ({}), using defaults", path, e);
                DetectionCounts::default()
            }
        }
    }

    /// Same as `load`, from any reader.
    pub fn from_reader<R: ::std::io::Read>(rdr: R) -> DetectionCounts {
        let rdr = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(rdr);
        DetectionCounts::from_csv(rdr)
    }

    fn from_csv<R: ::std::io::Read>(mut rdr: csv::Reader<R>) -> DetectionCounts {
        let mut counts = DetectionCounts::default();
        let headers = match rdr.headers() {
            Ok(h) => h.clone(),
            Err(e) => {
                debug!("detection metrics without header ({}), using defaults", e);
                return counts;
            }
        };
        let row = match rdr.records().next() {
            Some(Ok(row)) => row,
            _ => {
                debug!("detection metrics without data row, using defaults");
                return counts;
            }
        };

        let field = |name: &str| -> Option<u64> {
            let idx = headers.iter().position(|h| h == name)?;
            row.get(idx).and_then(|v| v.parse::<u64>().ok())
        };

        let defaults = counts;
        counts.true_positives = field(TRUE_POSITIVES).unwrap_or(defaults.true_positives);
        counts.false_positives = field(FALSE_POSITIVES).unwrap_or(defaults.false_positives);
        counts.true_negatives = field(TRUE_NEGATIVES).unwrap_or(defaults.true_negatives);
        counts.false_negatives = field(FALSE_NEGATIVES).unwrap_or(defaults.false_negatives);
        if counts != defaults {
            debug!("loaded detection counts {:?}", counts);
        }
        counts
    }

    /// The 2x2 grid `[[tn, fp], [fn, tp]]`: rows are actual benign/attack,
    /// columns are predicted benign/attack.
    pub fn matrix(&self) -> [[u64; 2]; 2] {
        [
            [self.true_negatives, self.false_positives],
            [self.false_negatives, self.true_positives],
        ]
    }

    /// TP / (TP + FP)
    pub fn precision(&self) -> f64 {
        ratio(self.true_positives, self.true_positives + self.false_positives)
    }

    /// TP / (TP + FN)
    pub fn recall(&self) -> f64 {
        ratio(self.true_positives, self.true_positives + self.false_negatives)
    }

    /// Harmonic mean of precision and recall.
    pub fn f1(&self) -> f64 {
        let (p, r) = (self.precision(), self.recall());
        if p + r == 0.0 {
            0.0
        } else {
            2.0 * p * r / (p + r)
        }
    }

    /// FP / (FP + TN)
    pub fn false_positive_rate(&self) -> f64 {
        ratio(self.false_positives, self.false_positives + self.true_negatives)
    }

    /// (TP + TN) / total
    pub fn accuracy(&self) -> f64 {
        ratio(
            self.true_positives + self.true_negatives,
            self.true_positives + self.true_negatives + self.false_positives +
                self.false_negatives,
        )
    }
}

#[cfg(test)]
mod tests {
    extern crate tempfile;

    use super::*;
    use std::fs;

    #[test]
    fn defaults_match_reference_run() {
        let counts = DetectionCounts::default();
        assert_eq!(counts.matrix(), [[325, 1377], [0, 48298]]);
    }

    #[test]
    fn missing_file_uses_defaults() {
        let counts = DetectionCounts::load("/no/such/performance_metrics.csv");
        assert_eq!(counts, DetectionCounts::default());
    }

    #[test]
    fn reads_metrics_file() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("performance_metrics.csv");
        fs::write(
            &path,
            "True Positives, False Positives, True Negatives, False Negatives\n 120, 5, 40, 2\n",
        ).unwrap();
        let counts = DetectionCounts::load(&path);
        assert_eq!(counts.true_positives, 120);
        assert_eq!(counts.false_positives, 5);
        assert_eq!(counts.true_negatives, 40);
        assert_eq!(counts.false_negatives, 2);
    }

    #[test]
    fn full_row_is_used() {
        let csv = "True Positives,False Positives,True Negatives,False Negatives\n10,2,30,4\n";
        let counts = DetectionCounts::from_reader(csv.as_bytes());
        assert_eq!(counts.matrix(), [[30, 2], [4, 10]]);
    }

    #[test]
    fn missing_columns_fall_back_individually() {
        let csv = "Run,True Positives,False Negatives\nA,7,1\n";
        let counts = DetectionCounts::from_reader(csv.as_bytes());
        assert_eq!(counts.true_positives, 7);
        assert_eq!(counts.false_negatives, 1);
        assert_eq!(counts.false_positives, 1377);
        assert_eq!(counts.true_negatives, 325);
    }

    #[test]
    fn garbage_falls_back() {
        let csv = "True Positives,False Positives\nmany,-3\n";
        assert_eq!(DetectionCounts::from_reader(csv.as_bytes()), DetectionCounts::default());

        let header_only = "True Positives,False Positives\n";
        assert_eq!(
            DetectionCounts::from_reader(header_only.as_bytes()),
            DetectionCounts::default()
        );

        assert_eq!(DetectionCounts::from_reader(&b""[..]), DetectionCounts::default());
    }

    #[test]
    fn scores_from_counts() {
        let counts = DetectionCounts {
            true_positives: 8,
            false_positives: 2,
            true_negatives: 6,
            false_negatives: 4,
        };
        assert!((counts.precision() - 0.8).abs() < 1e-12);
        assert!((counts.recall() - 8.0 / 12.0).abs() < 1e-12);
        assert!((counts.false_positive_rate() - 0.25).abs() < 1e-12);
        assert!((counts.accuracy() - 0.7).abs() < 1e-12);
        let f1 = 2.0 * 0.8 * (8.0 / 12.0) / (0.8 + 8.0 / 12.0);
        assert!((counts.f1() - f1).abs() < 1e-12);
    }

    #[test]
    fn zero_counts_do_not_divide_by_zero() {
        let counts = DetectionCounts {
            true_positives: 0,
            false_positives: 0,
            true_negatives: 0,
            false_negatives: 0,
        };
        assert_eq!(counts.precision(), 0.0);
        assert_eq!(counts.f1(), 0.0);
        assert_eq!(counts.accuracy(), 0.0);
    }
}
