//! Readers and writers for the textual tables and sheets around the valence
//! pipeline: field specifications, baseline tables, correction sheets and
//! enrichment sheets.

pub mod cells;
pub mod corrections;
pub mod enrichment;
pub mod error;
pub mod fields;
pub mod table;

pub use corrections::{parse_correction_sheet, write_correction_sheet, CorrectionRow, CorrectionTemplate, PhraseCorrection};
pub use enrichment::{parse_enrichment_sheet, write_enrichment_sheet, EnrichmentRow, SheetClause, SheetEntry};
pub use error::ParseError;
pub use fields::{parse_field_spec, FieldValues};
pub use table::{parse_table, TableRow};
