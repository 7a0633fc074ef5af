use std::collections::BTreeSet;

use valence_parser::{parse_field_spec, FieldValues};
use valence_protocol::{Field, BLANK_TOKEN, NA};

use crate::error::ConfigError;
use crate::tables::FIELD_SPEC;

/// The closed value set of every enrichment field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Vocabulary {
    values: [BTreeSet<String>; 6],
}

impl Vocabulary {
    pub fn standard() -> Result<Self, ConfigError> {
        let spec = parse_field_spec(FIELD_SPEC).map_err(ConfigError::FieldSpec)?;
        Self::from_spec(&spec)
    }

    /// Every field must be specified; extra values per field are fine.
    pub fn from_spec(spec: &[FieldValues]) -> Result<Self, ConfigError> {
        let mut values: [BTreeSet<String>; 6] = Default::default();
        for field in Field::ALL {
            let entry = spec
                .iter()
                .find(|f| f.field == field)
                .ok_or(ConfigError::MissingField(field))?;
            values[field.index()] = entry.values.iter().cloned().collect();
        }
        Ok(Self { values })
    }

    pub fn values(&self, field: Field) -> impl Iterator<Item = &str> {
        self.values[field.index()].iter().map(String::as_str)
    }

    /// Values a generated record may carry: the field's own values, `NA` and empty.
    pub fn allows(&self, field: Field, value: &str) -> bool {
        value.is_empty() || value == NA || self.values[field.index()].contains(value)
    }

    /// Values a sheet may carry: additionally the blanking token.
    pub fn allows_in_sheet(&self, field: Field, value: &str) -> bool {
        value == BLANK_TOKEN || self.allows(field, value)
    }
}
