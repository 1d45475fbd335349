//! bench-compare - Best-of-N comparison for cargo bench output
//!
//! Reads the output of several `cargo bench` runs, keeps the fastest time
//! seen for each benchmark and reports how fixed pairs of benchmarks
//! compare against each other.
//!
//! # Example
//!
//! ```no_run
//! use bench_compare::{parser, report};
//!
//! let output = std::fs::read_to_string("bench_output.txt").unwrap();
//! let registry = parser::parse_from_string(&output).unwrap();
//!
//! let mut stdout = std::io::stdout();
//! report::write_text(registry, &mut stdout).unwrap();
//! ```

pub mod compare;
pub mod data;
pub mod error;
pub mod parser;
pub mod report;

pub use compare::{Comparison, Delta};
pub use data::{BestTime, Measurement, Registry};
pub use error::{Error, Result};
pub use parser::{parse_from_files, parse_from_stdin, parse_from_string, TimeUnit};
pub use report::Report;
