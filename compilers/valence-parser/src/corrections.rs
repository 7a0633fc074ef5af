use valence_protocol::NodeId;

use crate::cells::{body_lines, node_id, split_cells};
use crate::error::ParseError;

/// Columns before the first phrase group.
pub const CORRECTION_COLUMNS: [&str; 6] = ["clause#", "word#", "passage", "link", "verb", "stem"];

/// One phrase group of a correction row. `correction` is empty when the
/// corrector left the phrase alone.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhraseCorrection {
    pub phrase: NodeId,
    pub text: String,
    pub function: String,
    pub correction: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CorrectionRow {
    pub line: usize,
    pub clause: NodeId,
    pub word: NodeId,
    pub phrases: Vec<PhraseCorrection>,
}

/// Parses a `;` separated correction sheet. The header is skipped; groups of
/// four cells (`phr#`, text, function, correction) follow the fixed columns.
/// Groups with an empty phrase number are padding and ignored.
pub fn parse_correction_sheet(text: &str) -> Result<Vec<CorrectionRow>, ParseError> {
    let mut rows = Vec::new();

    for (line, raw) in body_lines(text)? {
        let cells = split_cells(raw, ';');
        if cells.len() < 2 {
            return Err(ParseError::at(line, "expected clause and word numbers"));
        }
        let clause = node_id(cells[0], line, "clause#")?;
        let word = node_id(cells[1], line, "word#")?;

        let mut phrases = Vec::new();
        for group in cells.get(CORRECTION_COLUMNS.len()..).unwrap_or_default().chunks(4) {
            let phrase = group[0].trim();
            if phrase.is_empty() {
                continue;
            }
            let cell = |i: usize| group.get(i).map(|c| c.trim().to_string()).unwrap_or_default();
            phrases.push(PhraseCorrection {
                phrase: node_id(phrase, line, "phr#")?,
                text: cell(1),
                function: cell(2),
                correction: cell(3),
            });
        }

        rows.push(CorrectionRow {
            line,
            clause,
            word,
            phrases,
        });
    }

    Ok(rows)
}

/// A clause of a blank correction sheet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CorrectionTemplate {
    pub clause: NodeId,
    pub word: NodeId,
    pub passage: String,
    pub link: String,
    pub verb: String,
    pub stem: String,
    /// (phrase, text, function) per phrase of the clause.
    pub phrases: Vec<(NodeId, String, String)>,
}

/// Writes a blank correction sheet; the correction cells are left empty.
pub fn write_correction_sheet(rows: &[CorrectionTemplate]) -> String {
    let max_phrases = rows.iter().map(|r| r.phrases.len()).max().unwrap_or(0);

    let mut header: Vec<String> = CORRECTION_COLUMNS.iter().map(|c| c.to_string()).collect();
    for i in 1..=max_phrases {
        header.push(format!("phr{i}#"));
        header.push(format!("phr{i}_txt"));
        header.push(format!("phr{i}_function"));
        header.push(format!("phr{i}_corr"));
    }

    let mut out = header.join(";");
    out.push('\n');
    for row in rows {
        let mut cells = vec![
            row.clause.to_string(),
            row.word.to_string(),
            row.passage.clone(),
            row.link.clone(),
            row.verb.clone(),
            row.stem.clone(),
        ];
        for (phrase, text, function) in &row.phrases {
            cells.push(phrase.to_string());
            cells.push(text.clone());
            cells.push(function.clone());
            cells.push(String::new());
        }
        out.push_str(&cells.join(";"));
        out.push('\n');
    }
    out
}
