//! Benchmark comparison logic

use crate::data::{BestTime, Registry};
use crate::error::{Error, Result};
use serde::Serialize;
use tracing::debug;

/// Fixed cost added to the syscall benchmarks to model per-iteration work
pub const WORK_NANOS: i64 = 2_560_000;

/// Synthetic benchmarks, each derived from a measured base
pub const SYNTHETIC: [(&str, &str); 2] = [
    ("manual+work", "manual+syscalls"),
    ("nonbox+work", "nonbox+syscalls"),
];

/// Pairs compared in the report, as `(numerator, denominator)`
pub const COMPARISONS: [(&str, &str); 6] = [
    ("manual", "nonbox"),
    ("manual+syscalls", "nonbox+syscalls"),
    ("nonbox+syscalls", "manual+syscalls"),
    ("nonbox+syscalls", "box+syscalls"),
    ("box+rc+syscalls", "box+arc+syscalls"),
    ("manual+work", "nonbox+work"),
];

/// Divisor applied to the `nonbox - manual` difference
pub const DELTA_DIVISOR: i64 = 256;

/// Result of comparing two benchmarks
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Comparison {
    /// Numerator benchmark
    pub a: String,
    /// Denominator benchmark
    pub b: String,
    /// `a / b`
    pub ratio: f64,
    /// Percentage change of `a` relative to `b` (negative = faster)
    pub percent: f64,
}

/// Difference between the `nonbox` and `manual` best times
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub struct Delta {
    /// `nonbox - manual` in nanoseconds
    pub nanos: i64,
    /// `nanos / 256`, truncated toward zero
    pub per_256: i64,
}

/// Insert the `+work` entries derived from their `+syscalls` bases.
///
/// The derived entries keep the base entry's source line.
pub fn inject_synthetic(registry: &mut Registry) -> Result<()> {
    for (name, base) in SYNTHETIC {
        let best = registry.require(base)?;
        let derived = BestTime {
            nanos: best.nanos + WORK_NANOS,
            line: best.line.clone(),
        };

        debug!("Derived {} = {}ns from {}", name, derived.nanos, base);
        registry.insert_synthetic(name, derived);
    }

    Ok(())
}

/// Compare two benchmarks by name
pub fn compare_pair(registry: &Registry, a: &str, b: &str) -> Result<Comparison> {
    let ta = registry.require(a)?.nanos;
    let tb = registry.require(b)?.nanos;

    if tb == 0 {
        return Err(Error::ZeroBaseline {
            name: b.to_string(),
        });
    }

    let ratio = ratio(ta, tb);
    Ok(Comparison {
        a: a.to_string(),
        b: b.to_string(),
        ratio,
        percent: percent_change(ratio),
    })
}

/// Run every comparison in [`COMPARISONS`], injecting synthetic entries first
pub fn compare_all(registry: &mut Registry) -> Result<Vec<Comparison>> {
    inject_synthetic(registry)?;

    COMPARISONS
        .iter()
        .map(|(a, b)| compare_pair(registry, a, b))
        .collect()
}

/// Compute the `nonbox - manual` difference
pub fn delta(registry: &Registry) -> Result<Delta> {
    let nanos = registry.require("nonbox")?.nanos - registry.require("manual")?.nanos;

    Ok(Delta {
        nanos,
        per_256: nanos / DELTA_DIVISOR,
    })
}

/// Ratio `ta / tb`, scaled to microseconds when both are at least 1µs
fn ratio(ta: i64, tb: i64) -> f64 {
    let (mut ta, mut tb) = (ta as f64, tb as f64);

    if ta >= 1000.0 && tb >= 1000.0 {
        ta /= 1000.0;
        tb /= 1000.0;
    }

    ta / tb
}

/// Express a ratio as a signed percentage change
fn percent_change(ratio: f64) -> f64 {
    if ratio < 1.0 {
        -((1.0 - ratio) * 100.0)
    } else {
        (ratio - 1.0) * 100.0
    }
}
