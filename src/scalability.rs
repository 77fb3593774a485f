//! Scalability measurements: one row per worker count, plus the two derived
//! columns (speedup and parallel efficiency).
//!
//! The file is produced by the detector's master rank after each run:
//!
//! ```ignore
//! Workers,Processes,Throughput_pps,Latency_ms,MPI_Overhead_ms,Wall_Time_sec
//! 1,2,48123.55,0.0243,1.20,10.41
//! 2,3,91002.13,0.0251,2.48,5.50
//! ```

use csv;
use errors::*;
use std::io::Read;
use std::path::Path;
use table::{Cell, Column};

/// One measured worker count. Only the first four columns are required.
#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct ScalabilityRecord {
    /// Number of worker ranks.
    #[serde(rename = "Workers")]
    pub workers: usize,

    /// Total MPI processes (workers plus master), when recorded.
    #[serde(rename = "Processes", default)]
    pub processes: Option<usize>,

    /// Packets per second across all workers.
    #[serde(rename = "Throughput_pps")]
    pub throughput_pps: f64,

    /// Average per-flow latency.
    #[serde(rename = "Latency_ms")]
    pub latency_ms: f64,

    /// Time spent in MPI communication.
    #[serde(rename = "MPI_Overhead_ms")]
    pub mpi_overhead_ms: f64,

    /// Wall-clock duration of the run, when recorded.
    #[serde(rename = "Wall_Time_sec", default)]
    pub wall_time_sec: Option<f64>,
}

/// A loaded dataset. Rows keep file order; derived columns are aligned with
/// the rows.
#[derive(Debug, Clone)]
pub struct Scalability {
    records: Vec<ScalabilityRecord>,
    speedup: Vec<f64>,
    efficiency: Vec<f64>,
}

impl Scalability {
    /// Loads a dataset from a headered CSV file.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Scalability> {
        let path = path.as_ref();
        if !path.exists() {
            bail!(ErrorKind::MissingInput(path.display().to_string()));
        }
        let rdr = csv::ReaderBuilder::new()
            .has_headers(true)
            .trim(csv::Trim::All)
            .from_path(path)?;
        Scalability::from_csv(rdr)
    }

    /// Loads a dataset from any reader (file, string, etc.).
    pub fn from_reader<R: Read>(rdr: R) -> Result<Scalability> {
        let rdr = csv::ReaderBuilder::new()
            .has_headers(true)
            .trim(csv::Trim::All)
            .from_reader(rdr);
        Scalability::from_csv(rdr)
    }

    fn from_csv<R: Read>(mut rdr: csv::Reader<R>) -> Result<Scalability> {
        let mut records = Vec::new();
        for (i, record) in rdr.deserialize().enumerate() {
            let record: ScalabilityRecord =
                record.chain_err(|| format!("malformed scalability row {}", i + 1))?;
            records.push(record);
        }
        Scalability::from_records(records)
    }

    /// Builds the dataset and computes speedup against the first row.
    pub fn from_records(records: Vec<ScalabilityRecord>) -> Result<Scalability> {
        let baseline = match records.first() {
            Some(r) => r.throughput_pps,
            None => bail!(ErrorKind::EmptyDataset),
        };
        if baseline == 0.0 {
            bail!(ErrorKind::ZeroBaseline);
        }
        if let Some(row) = records.iter().position(|r| r.workers == 0) {
            bail!(ErrorKind::InvalidWorkers(row + 1));
        }
        for (i, r) in records.iter().enumerate() {
            let measured = [
                ("Throughput_pps", r.throughput_pps),
                ("Latency_ms", r.latency_ms),
                ("MPI_Overhead_ms", r.mpi_overhead_ms),
                ("Wall_Time_sec", r.wall_time_sec.unwrap_or(0.0)),
            ];
            if let Some(&(column, _)) = measured.iter().find(|&&(_, v)| !v.is_finite()) {
                bail!(ErrorKind::NonFinite(i + 1, column));
            }
        }

        let speedup = records
            .iter()
            .map(|r| r.throughput_pps / baseline)
            .collect::<Vec<f64>>();
        let efficiency = speedup
            .iter()
            .zip(records.iter())
            .map(|(s, r)| s / r.workers as f64)
            .collect::<Vec<f64>>();
        debug!(
            "loaded {} scalability rows, baseline {} pps",
            records.len(),
            baseline
        );

        Ok(Scalability {
            records: records,
            speedup: speedup,
            efficiency: efficiency,
        })
    }

    /// The measured rows.
    pub fn records(&self) -> &[ScalabilityRecord] {
        &self.records
    }

    /// Throughput relative to the first row.
    pub fn speedup(&self) -> &[f64] {
        &self.speedup
    }

    /// Speedup divided by worker count.
    pub fn efficiency(&self) -> &[f64] {
        &self.efficiency
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// True when there are no rows.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Worker counts as plotting coordinates.
    pub fn workers(&self) -> Vec<f64> {
        self.records.iter().map(|r| r.workers as f64).collect()
    }

    /// Pairs every worker count with a value taken from its row.
    pub fn series<F: Fn(&ScalabilityRecord) -> f64>(&self, f: F) -> Vec<(f64, f64)> {
        self.records
            .iter()
            .map(|r| (r.workers as f64, f(r)))
            .collect()
    }

    /// Table view in producer column order. Optional columns appear only when
    /// every row has them.
    pub fn columns(&self) -> Vec<Column> {
        let mut columns = Vec::new();
        columns.push(Column::new("Workers", self.int_cells(|r| r.workers)));
        if self.records.iter().all(|r| r.processes.is_some()) {
            columns.push(Column::new(
                "Processes",
                self.int_cells(|r| r.processes.unwrap_or(0)),
            ));
        }
        columns.push(Column::new("Throughput_pps", self.real_cells(|r| r.throughput_pps)));
        columns.push(Column::new("Latency_ms", self.real_cells(|r| r.latency_ms)));
        columns.push(Column::new("MPI_Overhead_ms", self.real_cells(|r| r.mpi_overhead_ms)));
        if self.records.iter().all(|r| r.wall_time_sec.is_some()) {
            columns.push(Column::new(
                "Wall_Time_sec",
                self.real_cells(|r| r.wall_time_sec.unwrap_or(0.0)),
            ));
        }
        columns.push(Column::new(
            "Speedup",
            self.speedup.iter().map(|&v| Cell::Real(v)).collect(),
        ));
        columns.push(Column::new(
            "Efficiency",
            self.efficiency.iter().map(|&v| Cell::Real(v)).collect(),
        ));
        columns
    }

    fn int_cells(&self, f: fn(&ScalabilityRecord) -> usize) -> Vec<Cell> {
        self.records.iter().map(|r| Cell::Int(f(r) as u64)).collect()
    }

    fn real_cells(&self, f: fn(&ScalabilityRecord) -> f64) -> Vec<Cell> {
        self.records.iter().map(|r| Cell::Real(f(r))).collect()
    }
}
