//! Report rendering
//!
//! The text report has three sections separated by blank lines:
//! ```text
//! manual                  time:   [1.0000 µs 1.1000 µs 1.2000 µs]
//! nonbox                  time:   [1.2000 µs 1.2500 µs 1.3000 µs]
//! ...
//!
//! manual / nonbox = 0.88 (-12.0%)
//! ...
//!
//! nonbox - manual = 150ns, /256 = 0ns
//! ```

use crate::compare::{self, Comparison, Delta};
use crate::data::Registry;
use crate::error::Result;
use serde::Serialize;
use std::io::Write;

/// Significant digits shown for ratios and percentages
const SIGNIFICANT_DIGITS: usize = 4;

/// Best time of one benchmark, as listed in the report
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct BestEntry {
    /// Name of the benchmark
    pub name: String,
    /// Best time in nanoseconds
    pub nanos: i64,
    /// The source line the best time came from
    pub line: String,
}

/// Fully computed report
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Report {
    /// Best time per benchmark, in first-seen order
    pub best: Vec<BestEntry>,
    /// Fixed pair comparisons
    pub comparisons: Vec<Comparison>,
    /// `nonbox - manual` difference
    pub delta: Delta,
}

impl Report {
    /// Compute every section of the report
    pub fn build(mut registry: Registry) -> Result<Self> {
        let best = best_entries(&registry);
        let comparisons = compare::compare_all(&mut registry)?;
        let delta = compare::delta(&registry)?;

        Ok(Self {
            best,
            comparisons,
            delta,
        })
    }

    /// Write the report as pretty-printed JSON
    pub fn write_json<W: Write>(&self, out: &mut W) -> Result<()> {
        serde_json::to_writer_pretty(&mut *out, self)?;
        writeln!(out)?;
        Ok(())
    }
}

fn best_entries(registry: &Registry) -> Vec<BestEntry> {
    registry
        .iter()
        .map(|(name, best)| BestEntry {
            name: name.to_string(),
            nanos: best.nanos,
            line: best.line.clone(),
        })
        .collect()
}

/// Write the text report section by section.
///
/// The best-line section is flushed before the comparisons run, so it is
/// still visible when a required benchmark turns out to be missing.
pub fn write_text<W: Write>(mut registry: Registry, out: &mut W) -> Result<()> {
    for (_, best) in registry.iter() {
        writeln!(out, "{}", best.line)?;
    }
    writeln!(out)?;
    out.flush()?;

    for comparison in compare::compare_all(&mut registry)? {
        writeln!(out, "{}", format_comparison(&comparison))?;
    }
    writeln!(out)?;

    let delta = compare::delta(&registry)?;
    writeln!(out, "{}", format_delta(&delta))?;
    out.flush()?;

    Ok(())
}

/// Format a comparison line: `a / b = ratio (percent%)`
pub fn format_comparison(comparison: &Comparison) -> String {
    format!(
        "{} / {} = {} ({}%)",
        comparison.a,
        comparison.b,
        format_significant(comparison.ratio, SIGNIFICANT_DIGITS),
        format_significant(comparison.percent, SIGNIFICANT_DIGITS)
    )
}

/// Format the delta line
pub fn format_delta(delta: &Delta) -> String {
    format!(
        "nonbox - manual = {}ns, /{} = {}ns",
        delta.nanos,
        compare::DELTA_DIVISOR,
        delta.per_256
    )
}

/// Format `value` with `digits` significant digits.
///
/// Fixed notation is used when the decimal exponent is in `-4..digits - 1`,
/// keeping at least one fractional digit (`2.0`, `-20.0`). Otherwise the
/// value is written in scientific notation (`1.1e+03`). Trailing zeros
/// are dropped in both forms.
pub fn format_significant(value: f64, digits: usize) -> String {
    if !value.is_finite() {
        return if value.is_nan() {
            "nan".to_string()
        } else if value > 0.0 {
            "inf".to_string()
        } else {
            "-inf".to_string()
        };
    }

    let digits = digits.max(1);
    if value == 0.0 {
        return if value.is_sign_negative() { "-0.0" } else { "0.0" }.to_string();
    }

    // Round once in scientific form so the exponent reflects carries (9.9996 -> 1.000e1)
    let scientific = format!("{:.*e}", digits - 1, value);
    let (mantissa, exponent) = scientific.split_once('e').unwrap_or((scientific.as_str(), "0"));
    let exponent: i32 = exponent.parse().unwrap_or(0);

    if exponent < -4 || exponent >= digits as i32 - 1 {
        let mantissa = trim_fraction(mantissa);
        let sign = if exponent < 0 { '-' } else { '+' };
        return format!("{}e{}{:02}", mantissa, sign, exponent.unsigned_abs());
    }

    let decimals = (digits as i32 - 1 - exponent) as usize;
    let fixed = format!("{:.*}", decimals, value);
    let fixed = trim_fraction(&fixed);
    if fixed.contains('.') {
        fixed.to_string()
    } else {
        format!("{}.0", fixed)
    }
}

/// Drop trailing fractional zeros and a dangling decimal point
fn trim_fraction(s: &str) -> &str {
    if s.contains('.') {
        s.trim_end_matches('0').trim_end_matches('.')
    } else {
        s
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse_from_string;
    use pretty_assertions::assert_eq;

    const RUN: &str = r#"
Benchmarking manual: Warming up for 3.0000 s
manual                  time:   [1.0000 µs 1.1000 µs 1.2000 µs]
nonbox                  time:   [1.2000 µs 1.2500 µs 1.3000 µs]
box+syscalls            time:   [1.4000 ms 1.5000 ms 1.6000 ms]
box+rc+syscalls         time:   [1.5000 ms 1.6000 ms 1.7000 ms]
box+arc+syscalls        time:   [1.6000 ms 1.7000 ms 1.8000 ms]
manual+syscalls         time:   [900.00 µs 1.0000 ms 1.1000 ms]
nonbox+syscalls         time:   [1.1000 ms 1.2000 ms 1.3000 ms]
Found 4 outliers among 100 measurements (4.00%)
"#;

    fn render(input: &str) -> (Result<()>, String) {
        let registry = parse_from_string(input).unwrap();
        let mut out = Vec::new();
        let result = write_text(registry, &mut out);
        (result, String::from_utf8(out).unwrap())
    }

    #[test]
    fn test_format_significant_fixed() {
        assert_eq!(format_significant(2.0, 4), "2.0");
        assert_eq!(format_significant(100.0, 4), "100.0");
        assert_eq!(format_significant(-20.0, 4), "-20.0");
        assert_eq!(format_significant(0.8, 4), "0.8");
        assert_eq!(format_significant(1.23456, 4), "1.235");
        assert_eq!(format_significant(1.0 / 3.0, 4), "0.3333");
        assert_eq!(format_significant(0.00012345, 4), "0.0001234");
        assert_eq!(format_significant(9.9996, 4), "10.0");
        assert_eq!(format_significant(0.0, 4), "0.0");
    }

    #[test]
    fn test_format_significant_scientific() {
        assert_eq!(format_significant(999.9, 4), "999.9");
        assert_eq!(format_significant(999.95, 4), "1e+03");
        assert_eq!(format_significant(1000.0, 4), "1e+03");
        assert_eq!(format_significant(1100.0, 4), "1.1e+03");
        assert_eq!(format_significant(1234.5, 4), "1.234e+03");
        assert_eq!(format_significant(-5000.0, 4), "-5e+03");
        assert_eq!(format_significant(12345.6, 4), "1.235e+04");
        assert_eq!(format_significant(1e-16, 4), "1e-16");
        assert_eq!(format_significant(f64::INFINITY, 4), "inf");
    }

    #[test]
    fn test_format_comparison() {
        let comparison = Comparison {
            a: "manual".to_string(),
            b: "nonbox".to_string(),
            ratio: 0.8,
            percent: -((1.0 - 0.8) * 100.0),
        };
        assert_eq!(format_comparison(&comparison), "manual / nonbox = 0.8 (-20.0%)");
    }

    #[test]
    fn test_format_delta() {
        let delta = Delta {
            nanos: -1_000,
            per_256: -3,
        };
        assert_eq!(format_delta(&delta), "nonbox - manual = -1000ns, /256 = -3ns");
    }

    #[test]
    fn test_write_text() {
        let (result, output) = render(RUN);
        result.unwrap();

        let expected = "\
manual                  time:   [1.0000 µs 1.1000 µs 1.2000 µs]
nonbox                  time:   [1.2000 µs 1.2500 µs 1.3000 µs]
box+syscalls            time:   [1.4000 ms 1.5000 ms 1.6000 ms]
box+rc+syscalls         time:   [1.5000 ms 1.6000 ms 1.7000 ms]
box+arc+syscalls        time:   [1.6000 ms 1.7000 ms 1.8000 ms]
manual+syscalls         time:   [900.00 µs 1.0000 ms 1.1000 ms]
nonbox+syscalls         time:   [1.1000 ms 1.2000 ms 1.3000 ms]

manual / nonbox = 0.88 (-12.0%)
manual+syscalls / nonbox+syscalls = 0.8333 (-16.67%)
nonbox+syscalls / manual+syscalls = 1.2 (20.0%)
nonbox+syscalls / box+syscalls = 0.8 (-20.0%)
box+rc+syscalls / box+arc+syscalls = 0.9412 (-5.882%)
manual+work / nonbox+work = 0.9468 (-5.319%)

nonbox - manual = 150ns, /256 = 0ns
";
        assert_eq!(output, expected);
    }

    #[test]
    fn test_write_text_large_percent_uses_scientific() {
        let input = "\
manual                  time:   [11.000 µs 12.000 µs 13.000 µs]
nonbox                  time:   [900.00 ns 1.0000 µs 1.1000 µs]
box+syscalls            time:   [1.4000 ms 1.5000 ms 1.6000 ms]
box+rc+syscalls         time:   [1.5000 ms 1.6000 ms 1.7000 ms]
box+arc+syscalls        time:   [1.6000 ms 1.7000 ms 1.8000 ms]
manual+syscalls         time:   [900.00 µs 1.0000 ms 1.1000 ms]
nonbox+syscalls         time:   [1.1000 ms 1.2000 ms 1.3000 ms]
";
        let (result, output) = render(input);
        result.unwrap();

        let lines: Vec<_> = output.lines().collect();
        assert_eq!(lines[8], "manual / nonbox = 12.0 (1.1e+03%)");
        assert_eq!(lines[15], "nonbox - manual = -11000ns, /256 = -42ns");
    }

    #[test]
    fn test_write_text_is_idempotent_over_repeated_input() {
        let (_, once) = render(RUN);
        let (_, twice) = render(&format!("{RUN}{RUN}"));
        assert_eq!(once, twice);
    }

    #[test]
    fn test_write_text_missing_benchmark_keeps_best_lines() {
        let input = "manual  time:   [1 ns 500 ns 3 ns]\n";
        let (result, output) = render(input);

        assert!(matches!(
            result,
            Err(crate::Error::MissingBenchmark { .. })
        ));
        assert_eq!(output, "manual  time:   [1 ns 500 ns 3 ns]\n\n");
        assert!(!output.contains("nonbox - manual"));
    }

    #[test]
    fn test_build_report() {
        let registry = parse_from_string(RUN).unwrap();
        let report = Report::build(registry).unwrap();

        assert_eq!(report.best.len(), 7);
        assert_eq!(report.best[0].name, "manual");
        assert_eq!(report.best[0].nanos, 1_100);
        assert_eq!(report.comparisons.len(), 6);
        assert_eq!(
            report.delta,
            Delta {
                nanos: 150,
                per_256: 0
            }
        );
    }

    #[test]
    fn test_write_json() {
        let registry = parse_from_string(RUN).unwrap();
        let report = Report::build(registry).unwrap();

        let mut out = Vec::new();
        report.write_json(&mut out).unwrap();
        let value: serde_json::Value = serde_json::from_slice(&out).unwrap();

        assert_eq!(value["best"][1]["name"], "nonbox");
        assert_eq!(value["best"][1]["nanos"], 1_250);
        assert_eq!(value["comparisons"][2]["a"], "nonbox+syscalls");
        assert_eq!(value["comparisons"][2]["ratio"], 1.2);
        assert_eq!(value["delta"]["nanos"], 150);
        assert_eq!(value["delta"]["per_256"], 0);
    }
}
