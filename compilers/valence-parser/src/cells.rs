use nom::{
    bytes::complete::take_till,
    character::complete::{char, i64 as signed, u32 as unsigned},
    combinator::all_consuming,
    multi::separated_list0,
    IResult,
};
use valence_protocol::NodeId;

use crate::error::ParseError;

/// Splits a line on `sep`. Empty cells are kept, so `a;;b;` has four cells.
pub fn split_cells(line: &str, sep: char) -> Vec<&str> {
    let parsed: IResult<&str, Vec<&str>> =
        all_consuming(separated_list0(char(sep), take_till(|c| c == sep)))(line);
    match parsed {
        Ok((_, cells)) => cells,
        // unreachable for take_till, kept total
        Err(_) => vec![line],
    }
}

pub fn node_id(cell: &str, line: usize, column: &str) -> Result<NodeId, ParseError> {
    let parsed: IResult<&str, u32> = all_consuming(unsigned)(cell.trim());
    parsed
        .map(|(_, n)| NodeId(n))
        .map_err(|_| ParseError::at(line, format!("{column}: `{cell}` is not a node number")))
}

pub fn signed_id(cell: &str, line: usize, column: &str) -> Result<i64, ParseError> {
    let parsed: IResult<&str, i64> = all_consuming(signed)(cell.trim());
    parsed
        .map(|(_, n)| n)
        .map_err(|_| ParseError::at(line, format!("{column}: `{cell}` is not a number")))
}

/// Lines after the header, numbered from 2, without their line terminator.
pub fn body_lines(text: &str) -> Result<impl Iterator<Item = (usize, &str)> + '_, ParseError> {
    let mut lines = text.lines();
    lines.next().ok_or(ParseError::MissingHeader)?;
    Ok(lines
        .enumerate()
        .map(|(i, line)| (i + 2, line.trim_end_matches(|c: char| c == '\r' || c == ' ' || c == '\t')))
        .filter(|(_, line)| !line.is_empty()))
}
