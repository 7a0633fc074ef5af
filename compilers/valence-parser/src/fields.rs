use nom::{
    bytes::complete::take_while1,
    character::complete::{space0, space1},
    combinator::{all_consuming, map},
    sequence::{delimited, preceded},
    branch::alt,
    IResult,
};
use valence_protocol::Field;

use crate::error::ParseError;

/// The allowed values of one enrichment field, in specification order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldValues {
    pub field: Field,
    pub values: Vec<String>,
}

#[derive(Debug, PartialEq)]
enum SpecLine<'a> {
    Field(&'a str),
    Value(&'a str),
}

fn token(input: &str) -> IResult<&str, &str> {
    take_while1(|c: char| !c.is_whitespace())(input)
}

fn spec_line(input: &str) -> IResult<&str, SpecLine<'_>> {
    all_consuming(alt((
        map(delimited(space1, token, space0), SpecLine::Value),
        map(preceded(space0, token), SpecLine::Field),
    )))(input)
}

/// Parses an indented field specification:
///
/// ```text
/// valence
///     adjunct
///     complement
/// ```
///
/// A field name starts in column one; its values are indented below it.
pub fn parse_field_spec(text: &str) -> Result<Vec<FieldValues>, ParseError> {
    let mut fields: Vec<FieldValues> = Vec::new();

    for (i, raw) in text.lines().enumerate() {
        let line = i + 1;
        if raw.trim().is_empty() {
            continue;
        }
        let (_, parsed) = spec_line(raw.trim_end())
            .map_err(|_| ParseError::at(line, format!("cannot read `{}`", raw.trim())))?;

        match parsed {
            SpecLine::Field(name) => {
                let field = Field::from_name(name)
                    .ok_or_else(|| ParseError::at(line, format!("unknown field `{name}`")))?;
                if fields.iter().any(|f| f.field == field) {
                    return Err(ParseError::at(line, format!("field `{name}` specified twice")));
                }
                fields.push(FieldValues {
                    field,
                    values: Vec::new(),
                });
            }
            SpecLine::Value(value) => {
                let current = fields
                    .last_mut()
                    .ok_or_else(|| ParseError::at(line, format!("value `{value}` before any field")))?;
                if !current.values.iter().any(|v| v == value) {
                    current.values.push(value.to_string());
                }
            }
        }
    }

    Ok(fields)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_spec() {
        let spec = "\nvalence\n    adjunct\n    core\n\nlexical\n    location\n    time\n";
        let fields = parse_field_spec(spec).unwrap();
        assert_eq!(fields.len(), 2);
        assert_eq!(fields[0].field, Field::Valence);
        assert_eq!(fields[0].values, vec!["adjunct", "core"]);
        assert_eq!(fields[1].values, vec!["location", "time"]);
    }

    #[test]
    fn test_field_spec_errors() {
        assert_eq!(
            parse_field_spec("    adjunct\n"),
            Err(ParseError::at(1, "value `adjunct` before any field"))
        );
        assert!(matches!(
            parse_field_spec("valency\n    core\n"),
            Err(ParseError::Line { line: 1, .. })
        ));
        assert!(parse_field_spec("valence\n    two words\n").is_err());
    }
}
