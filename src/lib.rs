//! Scalereport: charts and tables for the scalability evaluation of the MPI
//! DDoS detector.
//!
//! The detector's master rank leaves two CSV files behind: a scalability
//! summary (one row per worker count) and a snapshot of detection counts. This
//! crate turns them, together with a handful of reference figures, into the
//! PNG charts and LaTeX/Markdown tables used in the report.
#![recursion_limit = "1024"]
#![deny(missing_docs)]

extern crate csv;
#[macro_use]
extern crate error_chain;
#[macro_use]
extern crate log;
extern crate plotters;
extern crate serde;
#[macro_use]
extern crate serde_derive;
extern crate toml;

pub mod errors;
mod setting;
pub use setting::Setting;

pub mod chart;
pub mod detection;
pub mod output;
pub mod report;
pub mod samples;
pub mod scalability;
pub mod table;

pub use detection::DetectionCounts;
pub use output::{Artifact, OutputDir};
pub use report::{run, RunSummary};
pub use scalability::{Scalability, ScalabilityRecord};
