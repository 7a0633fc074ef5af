use valence_protocol::{Field, LabelRecord, NodeId, NodeKind, Section};

use crate::cells::{body_lines, node_id, signed_id, split_cells};
use crate::error::ParseError;

/// Columns shared by every row of an enrichment sheet.
pub const COMMON_COLUMNS: [&str; 11] = [
    "cnode#",
    "vnode#",
    "onode#",
    "book",
    "chapter",
    "verse",
    "verb_lexeme",
    "verb_stem",
    "verb_occurrence",
    "text",
    "constituent",
];

/// Clause columns (`type`, `rela`) then phrase columns (`type`, `function`).
pub const ROLE_COLUMNS: [&str; 4] = ["type", "rela", "type", "function"];

const CONSTITUENT_COLUMN: usize = 10;

/// A constituent row read back from an enrichment sheet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnrichmentRow {
    pub line: usize,
    pub clause: NodeId,
    pub verb: NodeId,
    pub constituent: NodeId,
    /// The `constituent` column as written (`phrase` or `clause`).
    pub kind: String,
    /// The trailing enrichment cells, untrimmed values as entered.
    pub values: [String; 6],
}

/// Parses an enrichment sheet. Clause heading rows (negative constituent id)
/// are skipped; the enrichment values are the last six cells of a row.
pub fn parse_enrichment_sheet(text: &str) -> Result<Vec<EnrichmentRow>, ParseError> {
    let n_fields = Field::ALL.len();
    let mut rows = Vec::new();

    for (line, raw) in body_lines(text)? {
        let cells = split_cells(raw, ';');
        let onode = cells
            .get(2)
            .ok_or_else(|| ParseError::at(line, "expected a constituent number"))?;
        let onode = signed_id(onode, line, "onode#")?;
        if onode < 0 {
            continue;
        }
        if cells.len() < CONSTITUENT_COLUMN + 1 + n_fields {
            return Err(ParseError::at(
                line,
                format!("{} cells, need at least {}", cells.len(), CONSTITUENT_COLUMN + 1 + n_fields),
            ));
        }
        let constituent = u32::try_from(onode)
            .map(NodeId)
            .map_err(|_| ParseError::at(line, format!("onode#: {onode} is out of range")))?;

        let tail = &cells[cells.len() - n_fields..];
        let values: [String; 6] = core::array::from_fn(|i| tail[i].trim().to_string());

        rows.push(EnrichmentRow {
            line,
            clause: node_id(cells[0], line, "cnode#")?,
            verb: node_id(cells[1], line, "vnode#")?,
            constituent,
            kind: cells[CONSTITUENT_COLUMN].trim().to_string(),
            values,
        });
    }

    Ok(rows)
}

/// Common cells of all rows that belong to one clause of one verb occurrence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SheetClause {
    pub clause: NodeId,
    pub verb: NodeId,
    pub section: Section,
    pub verb_lexeme: String,
    pub verb_stem: String,
    pub verb_text: String,
    pub clause_text: String,
}

/// A constituent line below a clause heading.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SheetEntry {
    pub node: NodeId,
    pub kind: NodeKind,
    pub text: String,
    /// `type` of the constituent
    pub typ: String,
    /// `function` for phrases, `rela` for clauses
    pub role: String,
    pub record: LabelRecord,
}

/// Writes a blank enrichment sheet: per clause one heading row (constituent `-1`)
/// followed by its constituent rows.
pub fn write_enrichment_sheet(clauses: &[(SheetClause, Vec<SheetEntry>)]) -> String {
    let header: Vec<&str> = COMMON_COLUMNS
        .iter()
        .chain(ROLE_COLUMNS.iter())
        .copied()
        .chain(Field::ALL.iter().map(|f| f.as_str()))
        .collect();
    let fill = ROLE_COLUMNS.len() + Field::ALL.len();

    let mut out = header.join(";");
    out.push('\n');

    for (clause, entries) in clauses {
        let common = |node: String, verb_text: &str, text: &str, kind: &str| -> Vec<String> {
            vec![
                clause.clause.to_string(),
                clause.verb.to_string(),
                node,
                clause.section.book.clone(),
                clause.section.chapter.to_string(),
                clause.section.verse.to_string(),
                clause.verb_lexeme.clone(),
                clause.verb_stem.clone(),
                verb_text.to_string(),
                text.to_string(),
                kind.to_string(),
            ]
        };

        let mut heading = common("-1".to_string(), &clause.verb_text, &clause.clause_text, "");
        heading.extend(std::iter::repeat(String::new()).take(fill));
        out.push_str(&heading.join(";"));
        out.push('\n');

        for entry in entries {
            let mut row = common(entry.node.to_string(), "", &entry.text, entry.kind.as_str());
            match entry.kind {
                NodeKind::Clause => row.extend([entry.typ.clone(), entry.role.clone(), String::new(), String::new()]),
                _ => row.extend([String::new(), String::new(), entry.typ.clone(), entry.role.clone()]),
            }
            row.extend(entry.record.values().iter().map(|v| v.to_string()));
            out.push_str(&row.join(";"));
            out.push('\n');
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn clause() -> SheetClause {
        SheetClause {
            clause: NodeId(427553),
            verb: NodeId(1001),
            section: Section {
                book: "Genesis".to_string(),
                chapter: 1,
                verse: 29,
            },
            verb_lexeme: "NTN".to_string(),
            verb_stem: "qal".to_string(),
            verb_text: "NTTJ".to_string(),
            clause_text: "W NTTJ LKM".to_string(),
        }
    }

    #[test]
    fn test_blank_sheet_layout() {
        let entries = vec![
            SheetEntry {
                node: NodeId(651003),
                kind: NodeKind::Phrase,
                text: "LKM".to_string(),
                typ: "PP".to_string(),
                role: "Cmpl".to_string(),
                record: LabelRecord::from_values(&["complement", "NA", "indirect_object", "*", "", ""]),
            },
            SheetEntry {
                node: NodeId(427554),
                kind: NodeKind::Clause,
                text: "L >KLH".to_string(),
                typ: "InfC".to_string(),
                role: "Adju".to_string(),
                record: LabelRecord::empty(),
            },
        ];
        let text = write_enrichment_sheet(&[(clause(), entries)]);
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines.len(), 4);
        assert_eq!(lines[0].split(';').count(), 21);
        assert!(lines[0].ends_with("function;valence;predication;grammatical;original;lexical;semantic"));
        assert_eq!(lines[1], "427553;1001;-1;Genesis;1;29;NTN;qal;NTTJ;W NTTJ LKM;;;;;;;;;;;");
        assert_eq!(
            lines[2],
            "427553;1001;651003;Genesis;1;29;NTN;qal;;LKM;phrase;;;PP;Cmpl;complement;NA;indirect_object;*;;"
        );
        assert!(lines[3].contains(";clause;InfC;Adju;;;"));
    }

    #[test]
    fn test_read_skips_headings_and_takes_last_six() {
        let text = write_enrichment_sheet(&[(
            clause(),
            vec![SheetEntry {
                node: NodeId(651003),
                kind: NodeKind::Phrase,
                text: "LKM".to_string(),
                typ: "PP".to_string(),
                role: "Cmpl".to_string(),
                record: LabelRecord::from_values(&["complement", "NA", "X", "", "location", ""]),
            }],
        )]);
        let rows = parse_enrichment_sheet(&text).unwrap();

        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].line, 3);
        assert_eq!(rows[0].constituent, NodeId(651003));
        assert_eq!(rows[0].kind, "phrase");
        assert_eq!(rows[0].values[2], "X");
        assert_eq!(rows[0].values[4], "location");
    }

    #[test]
    fn test_short_rows_rejected() {
        let text = "header\n1;2;3;Genesis\n";
        assert!(matches!(
            parse_enrichment_sheet(text),
            Err(ParseError::Line { line: 2, .. })
        ));
    }
}
