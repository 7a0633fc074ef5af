use std::collections::{BTreeMap, BTreeSet};

use serde::Serialize;
use tracing::{debug, info};
use valence_corpus::CorpusView;
use valence_parser::EnrichmentRow;
use valence_protocol::{Field, LabelRecord, NodeId, NodeKind, PhraseFunction, BLANK_TOKEN};

use crate::corrections::Corrections;
use crate::report::{InputReport, IssueKind};
use crate::vocabulary::Vocabulary;

/// The enrichment sheets of one verb. Either may be missing.
#[derive(Debug, Clone, Default)]
pub struct VerbSheets {
    pub verb: String,
    pub blank: Option<Vec<EnrichmentRow>>,
    pub filled: Option<Vec<EnrichmentRow>>,
}

/// The label record that goes downstream, with its provenance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MergedRecord {
    pub node: NodeId,
    pub record: LabelRecord,
    /// Effective phrase function; `None` for clauses.
    pub function: Option<PhraseFunction>,
    /// A filled sheet really changed the record.
    pub manual: bool,
    /// The phrase function was corrected.
    pub corrected: bool,
    /// The verb whose sheet supplied the record, if any.
    pub sheet: Option<String>,
}

/// Merges one constituent's records. The base is the blank sheet record, else the
/// generated one. If the filled record differs from the base, each non-empty
/// filled value wins and the blanking token empties the field.
///
/// Returns the merged record and whether the filled sheet changed anything.
pub fn merge_record(
    generated: &LabelRecord,
    blank: Option<&[String; 6]>,
    filled: Option<&[String; 6]>,
) -> (LabelRecord, bool) {
    let base = match blank {
        Some(values) => LabelRecord::from_values(values),
        None => generated.clone(),
    };
    let Some(filled) = filled else {
        return (base, false);
    };
    if LabelRecord::from_values(filled) == base {
        return (base, false);
    }

    let merged = Field::ALL
        .into_iter()
        .zip(filled.iter())
        .fold(base, |record, (field, value)| match value.as_str() {
            "" => record,
            BLANK_TOKEN => record.with(field, ""),
            value => record.with(field, value),
        });
    (merged, true)
}

/// Layers blank and filled enrichment sheets over the generated records.
pub struct ManualOverrideMerger<'a, V: CorpusView + ?Sized> {
    view: &'a V,
    corrections: &'a Corrections,
    vocabulary: &'a Vocabulary,
}

#[derive(Default)]
struct SeenValues {
    first: BTreeMap<NodeId, (String, [String; 6])>,
    conflicted: BTreeSet<NodeId>,
}

impl<'a, V: CorpusView + ?Sized> ManualOverrideMerger<'a, V> {
    pub fn new(view: &'a V, corrections: &'a Corrections, vocabulary: &'a Vocabulary) -> Self {
        Self {
            view,
            corrections,
            vocabulary,
        }
    }

    /// Verbs are processed in name order, so of several sheets claiming a
    /// constituent the last verb wins; the disagreement is reported.
    pub fn merge(
        &self,
        generated: &BTreeMap<NodeId, LabelRecord>,
        sheets: &[VerbSheets],
        report: &mut InputReport,
    ) -> BTreeMap<NodeId, MergedRecord> {
        let mut ordered: Vec<&VerbSheets> = sheets.iter().collect();
        ordered.sort_by(|a, b| a.verb.cmp(&b.verb));

        let mut seen_blank = SeenValues::default();
        let mut seen_filled = SeenValues::default();
        let mut merged = BTreeMap::new();

        for sheet in ordered {
            let verb = sheet.verb.as_str();
            let blank = self.read_rows(verb, "blank", sheet.blank.as_deref(), &mut seen_blank, report);
            let filled = self.read_rows(verb, "filled", sheet.filled.as_deref(), &mut seen_filled, report);

            for node in filled.keys().filter(|n| !blank.contains_key(n)) {
                report.push(
                    IssueKind::MissingFromBlank,
                    verb,
                    Some(*node),
                    format!("{} in the filled sheet does not occur in the blank sheet", self.describe(*node)),
                );
            }

            let mut manual = 0;
            for (node, values) in &blank {
                let fallback = generated.get(node).cloned().unwrap_or_default();
                let (record, changed) = merge_record(&fallback, Some(values), filled.get(node));
                manual += usize::from(changed);
                merged.insert(*node, self.provenance(*node, record, changed, Some(verb)));
            }
            debug!(verb, rows = blank.len(), manual, "merged enrichment sheets");
        }

        let from_sheets = merged.len();
        for (node, record) in generated {
            merged
                .entry(*node)
                .or_insert_with(|| self.provenance(*node, record.clone(), false, None));
        }
        info!(
            records = merged.len(),
            from_sheets,
            manual = merged.values().filter(|m| m.manual).count(),
            "merged label records"
        );
        merged
    }

    fn read_rows(
        &self,
        verb: &str,
        sheet: &str,
        rows: Option<&[EnrichmentRow]>,
        seen: &mut SeenValues,
        report: &mut InputReport,
    ) -> BTreeMap<NodeId, [String; 6]> {
        let mut values = BTreeMap::new();
        for row in rows.unwrap_or_default() {
            let node = row.constituent;
            let Some(kind) = self.view.kind(node) else {
                report.push(
                    IssueKind::NodeNumber,
                    verb,
                    Some(node),
                    format!("{sheet} sheet line {}: {node} is not in the corpus", row.line),
                );
                continue;
            };
            if kind.as_str() != row.kind {
                report.push(
                    IssueKind::KindMismatch,
                    verb,
                    Some(node),
                    format!("{}: node {node} is not a {} but a {}", self.section(node), row.kind, kind),
                );
            }
            for (field, value) in Field::ALL.into_iter().zip(row.values.iter()) {
                if !self.vocabulary.allows_in_sheet(field, value) {
                    report.push(
                        IssueKind::IllegalValue,
                        verb,
                        Some(node),
                        format!("{sheet}: \"{value}\" is an illegal value for \"{}\" in {}", field, self.describe(node)),
                    );
                }
            }

            match seen.first.get(&node) {
                Some((first_verb, first)) if *first != row.values && !seen.conflicted.contains(&node) => {
                    seen.conflicted.insert(node);
                    report.push(
                        IssueKind::Conflict,
                        verb,
                        Some(node),
                        format!(
                            "{sheet}: {} has {} in verb {first_verb} but {} in verb {verb}",
                            self.describe(node),
                            first.join(","),
                            row.values.join(","),
                        ),
                    );
                }
                Some(_) => {}
                None => {
                    seen.first.insert(node, (verb.to_string(), row.values.clone()));
                }
            }
            values.insert(node, row.values.clone());
        }
        values
    }

    fn provenance(&self, node: NodeId, record: LabelRecord, manual: bool, sheet: Option<&str>) -> MergedRecord {
        let function = match self.view.kind(node) {
            Some(NodeKind::Phrase) => self.corrections.effective(self.view, node),
            _ => None,
        };
        MergedRecord {
            node,
            record,
            function,
            manual,
            corrected: self.corrections.is_corrected(node),
            sheet: sheet.map(str::to_string),
        }
    }

    fn section(&self, node: NodeId) -> String {
        self.view.section(node).map(|s| s.to_string()).unwrap_or_default()
    }

    fn describe(&self, node: NodeId) -> String {
        format!("{} {node} = {}", self.section(node), self.view.text(node))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::*;
    use valence_corpus::Corpus;

    fn values(v: [&str; 6]) -> [String; 6] {
        v.map(str::to_string)
    }

    fn row(constituent: NodeId, kind: &str, v: [&str; 6]) -> EnrichmentRow {
        EnrichmentRow {
            line: 2,
            clause: NodeId(1),
            verb: NodeId(2),
            constituent,
            kind: kind.to_string(),
            values: values(v),
        }
    }

    const GENERATED: [&str; 6] = ["complement", "NA", "direct_object", "", "", ""];

    #[test]
    fn test_merge_precedence() {
        let generated = LabelRecord::from_values(&GENERATED);
        let blank = values(["complement", "NA", "principal_direct_object", "", "", "location"]);

        // no sheets
        assert_eq!(merge_record(&generated, None, None), (generated.clone(), false));

        // blank sheet only
        let (record, manual) = merge_record(&generated, Some(&blank), None);
        assert_eq!(record, LabelRecord::from_values(&blank));
        assert!(!manual);

        // empty filled cells keep the blank value, X blanks it
        let filled = values(["", "", "NP_direct_object", "", "", "X"]);
        let (record, manual) = merge_record(&generated, Some(&blank), Some(&filled));
        assert!(manual);
        assert_eq!(record.grammatical, "NP_direct_object");
        assert_eq!(record.valence, "complement");
        assert_eq!(record.semantic, "");

        // an unchanged copy of the blank sheet is not a manual change
        assert_eq!(merge_record(&generated, Some(&blank), Some(&blank)).1, false);
    }

    fn corpus() -> (Corpus, NodeId, NodeId, NodeId) {
        let mut b = builder();
        let clause = b.clause("WayX", "NA");
        let v = b.verb("NTN[", "qal");
        let pred = b.phrase(PhraseFunction::Pred, vec![v]);
        let w = noun(&mut b, "SPR/");
        let obj = b.phrase(PhraseFunction::Objc, vec![w]);
        (load(b), clause, pred, obj)
    }

    #[test]
    fn test_sheet_validation() {
        let (corpus, clause, pred, obj) = corpus();
        let corrections = Corrections::new();
        let vocabulary = Vocabulary::standard().unwrap();
        let merger = ManualOverrideMerger::new(&corpus, &corrections, &vocabulary);

        let mut generated = BTreeMap::new();
        generated.insert(obj, LabelRecord::from_values(&GENERATED));
        generated.insert(pred, LabelRecord::from_values(&["core", "regular", "NA", "", "", ""]));

        let sheets = vec![
            VerbSheets {
                verb: "NTN".to_string(),
                blank: Some(vec![row(obj, "phrase", GENERATED)]),
                filled: Some(vec![
                    row(obj, "phrase", ["", "", "", "", "", "benefactive"]),
                    row(clause, "phrase", ["", "", "", "", "", ""]),
                    row(NodeId(999), "phrase", ["", "", "", "", "", ""]),
                ]),
            },
            VerbSheets {
                verb: "CJT".to_string(),
                blank: Some(vec![row(obj, "phrase", ["adjunct", "NA", "*", "", "", ""])]),
                filled: None,
            },
        ];

        let mut report = InputReport::new();
        let merged = merger.merge(&generated, &sheets, &mut report);

        assert_eq!(report.count(IssueKind::KindMismatch), 1);
        assert_eq!(report.count(IssueKind::NodeNumber), 1);
        assert_eq!(report.count(IssueKind::MissingFromBlank), 1);
        assert_eq!(report.count(IssueKind::Conflict), 1);
        assert_eq!(report.count(IssueKind::IllegalValue), 0);

        // NTN sorts after CJT and wins
        let object = &merged[&obj];
        assert_eq!(object.sheet.as_deref(), Some("NTN"));
        assert_eq!(object.record.semantic, "benefactive");
        assert!(object.manual);
        assert_eq!(object.function, Some(PhraseFunction::Objc));

        let verb = &merged[&pred];
        assert_eq!(verb.sheet, None);
        assert_eq!(verb.record.predication, "regular");
        assert!(!verb.manual && !verb.corrected);
    }

    #[test]
    fn test_illegal_values_are_kept() {
        let (corpus, _, _, obj) = corpus();
        let mut corrections = Corrections::new();
        corrections.insert(obj, PhraseFunction::Cmpl);
        let vocabulary = Vocabulary::standard().unwrap();
        let merger = ManualOverrideMerger::new(&corpus, &corrections, &vocabulary);

        let sheets = vec![VerbSheets {
            verb: "NTN".to_string(),
            blank: Some(vec![row(obj, "phrase", ["complement", "NA", "*", "", "", "recipient"])]),
            filled: None,
        }];
        let mut report = InputReport::new();
        let merged = merger.merge(&BTreeMap::new(), &sheets, &mut report);

        assert_eq!(report.count(IssueKind::IllegalValue), 1);
        assert_eq!(merged[&obj].record.semantic, "recipient");
        assert!(merged[&obj].corrected);
        assert_eq!(merged[&obj].function, Some(PhraseFunction::Cmpl));
    }
}
