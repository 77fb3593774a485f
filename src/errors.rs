//! Error types for report generation.
#![allow(missing_docs)]

/// Creates the Error, ErrorKind, ResultExt, and Result types
error_chain!{
    errors {
        EmptyDataset {
            description("scalability dataset has no rows")
        }
        ZeroBaseline {
            description("baseline throughput is zero, speedup is undefined")
        }
        InvalidWorkers(row: usize) {
            description("worker count must be positive")
            display("worker count must be positive (row {})", row)
        }
        NonFinite(row: usize, column: &'static str) {
            description("measurement is not a finite number")
            display("{} is not a finite number (row {})", column, row)
        }
        MissingFont {
            description("no usable font for chart text")
        }
        MissingInput(path: String) {
            description("input file not found")
            display("File not found: {}", path)
        }
        Render(msg: String) {
            description("error in rendering a chart")
            display("failed to render chart: {}", msg)
        }
    }

    foreign_links {
        Io(::std::io::Error);
        Csv(::csv::Error);
        Toml(::toml::de::Error);
    }
}

/// Converts a `plotters` drawing error into our error type. The drawing error
/// is generic over the backend, so we keep only its message.
pub fn render_err<E: ::std::fmt::Display>(err: E) -> Error {
    Error::from_kind(ErrorKind::Render(err.to_string()))
}
