//! Best-time registry

use crate::error::{Error, Result};
use serde::Serialize;
use std::collections::HashMap;

/// A single parsed timing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Measurement {
    /// Name of the benchmark (first token of the line)
    pub name: String,
    /// Time in nanoseconds, truncated toward zero
    pub nanos: i64,
    /// The source line, trimmed
    pub line: String,
}

/// Best known time for a benchmark
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct BestTime {
    /// Time in nanoseconds
    pub nanos: i64,
    /// The line the time was parsed from
    pub line: String,
}

/// Benchmark names in first-seen order, each mapped to its best time.
///
/// Entries recorded from input appear in both the order list and the map.
/// Entries added with [`Registry::insert_synthetic`] only land in the map.
#[derive(Debug, Clone, Default)]
pub struct Registry {
    names: Vec<String>,
    entries: HashMap<String, BestTime>,
}

impl Registry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a measurement, keeping it only if it beats the stored time.
    ///
    /// Returns `true` when the stored best time changed.
    pub fn record(&mut self, measurement: Measurement) -> bool {
        let Measurement { name, nanos, line } = measurement;

        match self.entries.get_mut(&name) {
            Some(best) if nanos < best.nanos => {
                *best = BestTime { nanos, line };
                true
            }
            Some(_) => false,
            None => {
                self.names.push(name.clone());
                self.entries.insert(name, BestTime { nanos, line });
                true
            }
        }
    }

    /// Insert an entry that was derived rather than parsed
    pub fn insert_synthetic(&mut self, name: &str, best: BestTime) {
        self.entries.insert(name.to_string(), best);
    }

    /// Look up a benchmark that the report requires
    pub fn require(&self, name: &str) -> Result<&BestTime> {
        self.entries.get(name).ok_or_else(|| Error::MissingBenchmark {
            name: name.to_string(),
        })
    }

    /// Look up a benchmark
    pub fn get(&self, name: &str) -> Option<&BestTime> {
        self.entries.get(name)
    }

    /// Recorded entries in first-seen order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &BestTime)> + '_ {
        self.names
            .iter()
            .filter_map(|name| self.entries.get(name).map(|best| (name.as_str(), best)))
    }

    /// Number of names recorded from input
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// Check if nothing has been recorded
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}
