//! Accumulators threaded through the flowchart pass. Merging two of them gives
//! the same result in either order.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use serde::Serialize;
use valence_protocol::{NodeId, SenseLabel};

/// Deterministic repairs of an inconsistent principal object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Repair {
    /// A principal object next to a plain direct object: the latter becomes an NP object.
    PdosWithDos,
    /// A principal object without any second object: it becomes a plain direct object.
    LonelyPdos,
}

impl Repair {
    pub fn as_str(self) -> &'static str {
        match self {
            Repair::PdosWithDos => "pdos with dos",
            Repair::LonelyPdos => "lonely pdos",
        }
    }
}

impl fmt::Display for Repair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub struct RepairEntry {
    pub verb: NodeId,
    /// `Book chapter:verse`.
    pub location: String,
    pub explanation: String,
}

/// Repairs per lexeme and per repair kind.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Diagnostics {
    repairs: BTreeMap<String, BTreeMap<Repair, BTreeSet<RepairEntry>>>,
}

impl Diagnostics {
    pub const SHOW_LIMIT: usize = 20;

    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, lexeme: &str, repair: Repair, verb: NodeId, location: String, explanation: String) {
        self.repairs
            .entry(lexeme.to_string())
            .or_default()
            .entry(repair)
            .or_default()
            .insert(RepairEntry {
                verb,
                location,
                explanation,
            });
    }

    pub fn merge(&mut self, other: Diagnostics) {
        for (lexeme, kinds) in other.repairs {
            let mine = self.repairs.entry(lexeme).or_default();
            for (repair, entries) in kinds {
                mine.entry(repair).or_default().extend(entries);
            }
        }
    }

    pub fn is_empty(&self) -> bool {
        self.repairs.is_empty()
    }

    pub fn count(&self, repair: Repair) -> usize {
        self.repairs
            .values()
            .filter_map(|kinds| kinds.get(&repair))
            .map(BTreeSet::len)
            .sum()
    }

    pub fn entries(&self, lexeme: &str, repair: Repair) -> impl Iterator<Item = &RepairEntry> {
        self.repairs
            .get(lexeme)
            .and_then(|kinds| kinds.get(&repair))
            .into_iter()
            .flatten()
    }

    /// Per lexeme and repair kind at most `limit` entries.
    pub fn render(&self, limit: usize) -> Vec<String> {
        let mut lines = Vec::new();
        for (lexeme, kinds) in &self.repairs {
            lines.push(format!("ERROR: {lexeme}"));
            for (repair, entries) in kinds {
                lines.push(format!("\tERROR: {repair}"));
                for entry in entries.iter().take(limit) {
                    lines.push(format!("\t\t{}: {}", entry.location, entry.explanation));
                }
                if entries.len() > limit {
                    lines.push(format!("\t\tAND {} more", entries.len() - limit));
                }
            }
        }
        lines
    }
}

/// How often each sense label came out, overall and per lexeme.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct OutcomeStats {
    overall: BTreeMap<SenseLabel, usize>,
    per_lexeme: BTreeMap<String, BTreeMap<SenseLabel, usize>>,
}

impl OutcomeStats {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, lexeme: &str, label: SenseLabel) {
        *self.overall.entry(label).or_default() += 1;
        *self
            .per_lexeme
            .entry(lexeme.to_string())
            .or_default()
            .entry(label)
            .or_default() += 1;
    }

    pub fn merge(&mut self, other: OutcomeStats) {
        for (label, n) in other.overall {
            *self.overall.entry(label).or_default() += n;
        }
        for (lexeme, labels) in other.per_lexeme {
            let mine = self.per_lexeme.entry(lexeme).or_default();
            for (label, n) in labels {
                *mine.entry(label).or_default() += n;
            }
        }
    }

    pub fn total(&self) -> usize {
        self.overall.values().sum()
    }

    pub fn count(&self, label: SenseLabel) -> usize {
        self.overall.get(&label).copied().unwrap_or(0)
    }

    pub fn count_for(&self, lexeme: &str, label: SenseLabel) -> usize {
        self.per_lexeme
            .get(lexeme)
            .and_then(|labels| labels.get(&label))
            .copied()
            .unwrap_or(0)
    }

    /// Counts for every label that occurs anywhere, first for all lexemes, then
    /// for each of `lexemes`.
    pub fn render(&self, lexemes: &[String]) -> Vec<String> {
        let labels: BTreeSet<SenseLabel> = self.overall.keys().copied().collect();
        let mut lines = Vec::new();
        let empty = BTreeMap::new();

        let blocks = std::iter::once(("All lexemes", &self.overall)).chain(
            lexemes
                .iter()
                .map(|l| (l.as_str(), self.per_lexeme.get(l).unwrap_or(&empty))),
        );
        for (title, counts) in blocks {
            lines.push(title.to_string());
            let mut total = 0;
            for label in &labels {
                let n = counts.get(label).copied().unwrap_or(0);
                total += n;
                lines.push(format!("     Sense    {:<7}: {:>5} clauses", label.code(), n));
            }
            lines.push(format!("     All senses      : {:>5} clauses", total));
        }
        lines
    }
}
