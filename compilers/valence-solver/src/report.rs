use std::collections::BTreeMap;

use serde::Serialize;
use tracing::warn;
use valence_protocol::NodeId;

/// Categories of input-consistency problems found in correction and enrichment sheets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum IssueKind {
    /// A node number of the wrong kind, or not inside the row's clause.
    NodeNumber,
    /// A phrase corrected more than once; the first correction is kept.
    RepeatedCorrection,
    /// A correction to a value that is not a phrase function.
    IllegalFunction,
    /// An enrichment value outside the field vocabulary.
    IllegalValue,
    /// The same constituent with different values, in one sheet kind or across verbs.
    Conflict,
    /// The `constituent` column disagrees with the corpus.
    KindMismatch,
    /// A filled-sheet constituent that the blank sheet of the same verb lacks.
    MissingFromBlank,
}

impl IssueKind {
    pub fn title(self) -> &'static str {
        match self {
            IssueKind::NodeNumber => "Inconsistent node numbers",
            IssueKind::RepeatedCorrection => "Phrases corrected multiple times",
            IssueKind::IllegalFunction => "Illegal values for phrase function",
            IssueKind::IllegalValue => "Illegal enrichment values",
            IssueKind::Conflict => "Conflicting enrichments",
            IssueKind::KindMismatch => "Enrichments on nodes of another kind",
            IssueKind::MissingFromBlank => "Nodes in filled sheets that are not in the blank sheet",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub struct InputIssue {
    pub kind: IssueKind,
    pub node: Option<NodeId>,
    pub verb: String,
    pub message: String,
}

/// Input-consistency problems, collected rather than raised. Processing goes
/// on with the best available value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct InputReport {
    issues: Vec<InputIssue>,
}

impl InputReport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, kind: IssueKind, verb: &str, node: Option<NodeId>, message: impl Into<String>) {
        self.issues.push(InputIssue {
            kind,
            node,
            verb: verb.to_string(),
            message: message.into(),
        });
    }

    pub fn merge(&mut self, other: InputReport) {
        self.issues.extend(other.issues);
    }

    pub fn is_empty(&self) -> bool {
        self.issues.is_empty()
    }

    pub fn len(&self) -> usize {
        self.issues.len()
    }

    pub fn count(&self, kind: IssueKind) -> usize {
        self.issues.iter().filter(|i| i.kind == kind).count()
    }

    pub fn issues(&self) -> &[InputIssue] {
        &self.issues
    }

    /// Per kind a title, at most `limit` sorted cases and a line counting the rest.
    pub fn render(&self, limit: usize) -> Vec<String> {
        let mut grouped: BTreeMap<IssueKind, Vec<&InputIssue>> = BTreeMap::new();
        for issue in &self.issues {
            grouped.entry(issue.kind).or_default().push(issue);
        }

        let mut lines = Vec::new();
        for (kind, mut issues) in grouped {
            issues.sort();
            lines.push(format!("ERROR: {} ({})", kind.title(), issues.len()));
            for issue in issues.iter().take(limit) {
                let node = issue.node.map(|n| format!(" {n}")).unwrap_or_default();
                lines.push(format!("\t{}{}: {}", issue.verb, node, issue.message));
            }
            if issues.len() > limit {
                lines.push(format!(" ... AND {} CASES MORE", issues.len() - limit));
            }
        }
        lines
    }

    pub fn log(&self, limit: usize) {
        for line in self.render(limit) {
            warn!("{line}");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_capped_listing() {
        let mut report = InputReport::new();
        for n in (0..13).rev() {
            report.push(IssueKind::IllegalValue, "NTN", Some(NodeId(n)), "bad");
        }
        report.push(IssueKind::Conflict, "CJT", None, "two values");

        let lines = report.render(10);
        assert_eq!(lines[0], "ERROR: Illegal enrichment values (13)");
        assert_eq!(lines[1], "\tNTN 0: bad");
        assert_eq!(lines[11], " ... AND 3 CASES MORE");
        assert_eq!(lines[12], "ERROR: Conflicting enrichments (1)");
        assert_eq!(lines.len(), 14);
        assert_eq!(report.count(IssueKind::IllegalValue), 13);
    }

    #[test]
    fn test_merge_keeps_everything() {
        let mut a = InputReport::new();
        a.push(IssueKind::NodeNumber, "HLK", Some(NodeId(1)), "x");
        let mut b = InputReport::new();
        b.push(IssueKind::NodeNumber, "HLK", Some(NodeId(2)), "y");
        a.merge(b);
        assert_eq!(a.len(), 2);
        assert!(InputReport::new().render(10).is_empty());
    }
}
