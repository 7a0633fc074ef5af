use std::collections::HashMap;

use tracing::info;
use valence_corpus::CorpusView;
use valence_parser::CorrectionRow;
use valence_protocol::{NodeId, NodeKind, PhraseFunction};

use crate::report::{InputReport, IssueKind};

/// Manually corrected phrase functions, layered over the corpus.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Corrections {
    functions: HashMap<NodeId, PhraseFunction>,
}

impl Corrections {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, phrase: NodeId, function: PhraseFunction) -> Option<PhraseFunction> {
        self.functions.insert(phrase, function)
    }

    pub fn get(&self, phrase: NodeId) -> Option<PhraseFunction> {
        self.functions.get(&phrase).copied()
    }

    pub fn is_corrected(&self, phrase: NodeId) -> bool {
        self.functions.contains_key(&phrase)
    }

    /// The corrected function if there is one, else the corpus value.
    pub fn effective<V: CorpusView + ?Sized>(&self, view: &V, phrase: NodeId) -> Option<PhraseFunction> {
        self.get(phrase).or_else(|| view.function(phrase))
    }

    pub fn len(&self) -> usize {
        self.functions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.functions.is_empty()
    }

    /// Reads filled correction sheets, one per verb. Sheets are taken in verb
    /// order; of several corrections for one phrase the first is kept.
    pub fn from_sheets<V: CorpusView + ?Sized>(
        view: &V,
        sheets: &[(String, Vec<CorrectionRow>)],
        report: &mut InputReport,
    ) -> Self {
        let mut corrections = Self::new();
        let mut ordered: Vec<&(String, Vec<CorrectionRow>)> = sheets.iter().collect();
        ordered.sort_by(|a, b| a.0.cmp(&b.0));

        for (verb, rows) in ordered {
            let before = corrections.len();
            for row in rows {
                corrections.read_row(view, verb, row, report);
            }
            info!(verb = %verb, corrections = corrections.len() - before, "read correction sheet");
        }
        corrections
    }

    fn read_row<V: CorpusView + ?Sized>(&mut self, view: &V, verb: &str, row: &CorrectionRow, report: &mut InputReport) {
        let line = row.line;
        let node_error = |report: &mut InputReport, node: NodeId, message: String| {
            report.push(IssueKind::NodeNumber, verb, Some(node), format!("line {line}: {message}"));
        };

        if view.kind(row.clause) != Some(NodeKind::Clause) {
            node_error(report, row.clause, format!("{} is not a clause node", row.clause));
        }
        if view.kind(row.word) != Some(NodeKind::Word) {
            node_error(report, row.word, format!("{} is not a word node", row.word));
        }
        if view.container(row.word, NodeKind::Clause) != Some(row.clause) {
            node_error(report, row.word, format!("{} is not a word of clause {}", row.word, row.clause));
        }

        for entry in &row.phrases {
            let phrase = entry.phrase;
            if view.kind(phrase) != Some(NodeKind::Phrase) {
                node_error(report, phrase, format!("{phrase} is not a phrase node"));
            }
            if view.container(phrase, NodeKind::Clause) != Some(row.clause) {
                node_error(report, phrase, format!("{phrase} is not a phrase of clause {}", row.clause));
            }
            if entry.correction.is_empty() {
                continue;
            }
            if self.is_corrected(phrase) {
                report.push(
                    IssueKind::RepeatedCorrection,
                    verb,
                    Some(phrase),
                    format!("line {line}: again corrected to {}", entry.correction),
                );
                continue;
            }
            match entry.correction.parse::<PhraseFunction>() {
                Ok(function) => {
                    self.insert(phrase, function);
                }
                Err(e) => report.push(IssueKind::IllegalFunction, verb, Some(phrase), format!("line {line}: {e}")),
            }
        }
    }
}
