use crate::cells::split_cells;
use crate::error::ParseError;

/// One line of a tab separated baseline table: role, description, then one
/// cell per enrichment field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableRow {
    pub line: usize,
    pub role: String,
    pub description: String,
    pub values: Vec<String>,
}

/// Parses a baseline table. Empty cells are significant; only blank lines are skipped.
/// The number of value cells is not checked here, it depends on the field specification.
pub fn parse_table(text: &str) -> Result<Vec<TableRow>, ParseError> {
    let mut rows = Vec::new();

    for (i, raw) in text.lines().enumerate() {
        let line = i + 1;
        let raw = raw.trim_end_matches('\r');
        if raw.trim().is_empty() {
            continue;
        }
        let cells = split_cells(raw, '\t');
        if cells.len() < 2 {
            return Err(ParseError::at(line, "expected a role and a description"));
        }
        let role = cells[0].trim();
        if role.is_empty() {
            return Err(ParseError::at(line, "empty role"));
        }

        rows.push(TableRow {
            line,
            role: role.to_string(),
            description: cells[1].trim().to_string(),
            values: cells[2..].iter().map(|c| c.trim().to_string()).collect(),
        });
    }

    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trailing_empty_cells_count() {
        let rows = parse_table("Adju\tAdjunct\tadjunct\tNA\tNA\t\t\t\nLoca\tLocative\tadjunct\tNA\tNA\t\tlocation\tlocation").unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].values, vec!["adjunct", "NA", "NA", "", "", ""]);
        assert_eq!(rows[1].role, "Loca");
        assert_eq!(rows[1].values[5], "location");
        assert_eq!(rows[1].line, 2);
    }

    #[test]
    fn test_rejects_role_only() {
        assert_eq!(
            parse_table("Adju"),
            Err(ParseError::at(1, "expected a role and a description"))
        );
    }
}
