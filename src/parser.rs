//! Parser for Criterion `cargo bench` output
//!
//! Only lines containing `time:` are measurements:
//! ```text
//! manual                  time:   [1.2345 µs 1.2456 µs 1.2567 µs]
//! ```
//!
//! Tokens are whitespace separated; the name is token 0 and the middle
//! estimate (token 4) with its unit (token 5) is taken as the time.

use crate::data::{Measurement, Registry};
use crate::error::{Error, Result};
use std::io::BufRead;
use std::path::Path;
use std::str::FromStr;
use tracing::{debug, info};

/// Marker that identifies a measurement line
const TIME_MARKER: &str = "time:";

/// Time units accepted in measurement lines
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeUnit {
    Nanoseconds,
    Microseconds,
    Milliseconds,
}

impl TimeUnit {
    /// Nanoseconds in one of this unit
    pub fn multiplier(self) -> f64 {
        match self {
            TimeUnit::Nanoseconds => 1.0,
            TimeUnit::Microseconds => 1_000.0,
            TimeUnit::Milliseconds => 1_000_000.0,
        }
    }

    /// Convert a magnitude in this unit to whole nanoseconds, truncating toward zero
    pub fn to_nanos(self, value: f64) -> i64 {
        (value * self.multiplier()) as i64
    }
}

impl FromStr for TimeUnit {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "ns" => Ok(TimeUnit::Nanoseconds),
            "µs" | "us" => Ok(TimeUnit::Microseconds),
            "ms" => Ok(TimeUnit::Milliseconds),
            _ => Err(Error::UnsupportedUnit {
                unit: s.to_string(),
            }),
        }
    }
}

/// Parse one line of output.
///
/// Returns `Ok(None)` for lines that are not measurements. `line_no` is
/// only used for error reporting.
pub fn parse_line(line: &str, line_no: usize) -> Result<Option<Measurement>> {
    if !line.contains(TIME_MARKER) {
        return Ok(None);
    }

    let parts: Vec<&str> = line.split_whitespace().collect();
    if parts.len() < 6 {
        return Err(Error::MalformedLine {
            line: line_no,
            reason: format!("expected at least 6 fields, found {}", parts.len()),
        });
    }

    let value: f64 = parts[4].parse().map_err(|_| Error::MalformedLine {
        line: line_no,
        reason: format!("invalid time value: {}", parts[4]),
    })?;
    if !value.is_finite() {
        return Err(Error::MalformedLine {
            line: line_no,
            reason: format!("time value is not finite: {}", parts[4]),
        });
    }
    let unit: TimeUnit = parts[5].parse()?;

    Ok(Some(Measurement {
        name: parts[0].to_string(),
        nanos: unit.to_nanos(value),
        line: line.trim().to_string(),
    }))
}

/// Read every line from `reader` into `registry`.
///
/// `line_offset` is the number of lines already consumed from earlier
/// sources, so errors point at the position in the concatenated stream.
/// Returns the number of lines read.
pub fn parse_reader<R: BufRead>(
    reader: R,
    registry: &mut Registry,
    line_offset: usize,
) -> Result<usize> {
    let mut count = 0;

    for (idx, line) in reader.lines().enumerate() {
        let line = line?;
        count += 1;

        if let Some(measurement) = parse_line(&line, line_offset + idx + 1)? {
            let name = measurement.name.clone();
            let nanos = measurement.nanos;
            if registry.record(measurement) {
                debug!("New best for {}: {}ns", name, nanos);
            }
        }
    }

    Ok(count)
}

/// Parse benchmark output from a string
pub fn parse_from_string(output: &str) -> Result<Registry> {
    let mut registry = Registry::new();
    parse_reader(output.as_bytes(), &mut registry, 0)?;
    Ok(registry)
}

/// Parse benchmark output from files, treated as one concatenated stream
pub fn parse_from_files<P: AsRef<Path>>(paths: &[P]) -> Result<Registry> {
    let mut registry = Registry::new();
    let mut offset = 0;

    for path in paths {
        let path = path.as_ref();
        let file = std::fs::File::open(path).map_err(|e| Error::FileReadError {
            path: path.display().to_string(),
            source: e,
        })?;

        offset += parse_reader(std::io::BufReader::new(file), &mut registry, offset)?;
        info!("Read {} ({} lines so far)", path.display(), offset);
    }

    info!("Found {} benchmarks", registry.len());
    Ok(registry)
}

/// Parse benchmark output from standard input
pub fn parse_from_stdin() -> Result<Registry> {
    let mut registry = Registry::new();
    let lines = parse_reader(std::io::stdin().lock(), &mut registry, 0)?;

    info!("Read {} lines, found {} benchmarks", lines, registry.len());
    Ok(registry)
}
