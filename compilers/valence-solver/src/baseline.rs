use std::collections::HashMap;

use valence_parser::{parse_table, TableRow};
use valence_protocol::{Field, LabelRecord, PhraseFunction};

use crate::error::ConfigError;
use crate::tables::{CLAUSE_BASELINE, PHRASE_BASELINE};
use crate::vocabulary::Vocabulary;

/// Default label records per syntactic role.
#[derive(Debug, Clone)]
pub struct Baseline {
    phrase: HashMap<PhraseFunction, LabelRecord>,
    clause: HashMap<String, LabelRecord>,
    descriptions: HashMap<String, String>,
}

impl Baseline {
    pub fn standard(vocabulary: &Vocabulary) -> Result<Self, ConfigError> {
        Self::from_tables(PHRASE_BASELINE, CLAUSE_BASELINE, vocabulary)
    }

    /// Every phrase function must have a row; error functions get an all-empty record.
    pub fn from_tables(phrase: &str, clause: &str, vocabulary: &Vocabulary) -> Result<Self, ConfigError> {
        let mut descriptions = HashMap::new();

        let phrase_rows = read_rows("phrase", phrase, vocabulary, &mut descriptions)?;
        let mut phrase_records = HashMap::new();
        for (role, record) in phrase_rows {
            let function: PhraseFunction = role
                .parse()
                .map_err(|_| ConfigError::UnknownFunction(role.clone()))?;
            phrase_records.insert(function, record);
        }
        for function in PhraseFunction::ALL.iter().copied() {
            if function.is_error() {
                phrase_records.insert(function, LabelRecord::empty());
            } else if !phrase_records.contains_key(&function) {
                return Err(ConfigError::MissingRole {
                    kind: "phrase",
                    role: function.as_str().to_string(),
                });
            }
        }

        let clause_records = read_rows("clause", clause, vocabulary, &mut descriptions)?
            .into_iter()
            .collect();

        Ok(Self {
            phrase: phrase_records,
            clause: clause_records,
            descriptions,
        })
    }

    pub fn phrase(&self, function: PhraseFunction) -> LabelRecord {
        self.phrase.get(&function).cloned().unwrap_or_default()
    }

    /// Object clauses are keyed by `rela`, other clauses by `typ`. Unknown keys
    /// give an all-empty record.
    pub fn clause(&self, typ: &str, rela: &str) -> LabelRecord {
        let key = if rela == "Objc" { rela } else { typ };
        self.clause.get(key).cloned().unwrap_or_default()
    }

    pub fn description(&self, role: &str) -> Option<&str> {
        self.descriptions.get(role).map(String::as_str)
    }
}

fn read_rows(
    kind: &'static str,
    text: &str,
    vocabulary: &Vocabulary,
    descriptions: &mut HashMap<String, String>,
) -> Result<Vec<(String, LabelRecord)>, ConfigError> {
    let rows = parse_table(text).map_err(|source| ConfigError::Table { kind, source })?;
    let mut seen = Vec::with_capacity(rows.len());
    let mut records = Vec::with_capacity(rows.len());

    for TableRow {
        role,
        description,
        values,
        ..
    } in rows
    {
        if values.len() != Field::ALL.len() {
            return Err(ConfigError::FieldCount {
                kind,
                role,
                found: values.len(),
                expected: Field::ALL.len(),
            });
        }
        if seen.contains(&role) {
            return Err(ConfigError::DuplicateRole { kind, role });
        }
        for field in Field::ALL {
            let value = &values[field.index()];
            if !vocabulary.allows(field, value) {
                return Err(ConfigError::BaselineValue {
                    kind,
                    role,
                    field,
                    value: value.clone(),
                });
            }
        }

        let record = LabelRecord::from_values(&[
            &values[0], &values[1], &values[2], &values[3], &values[4], &values[5],
        ]);
        descriptions.entry(role.clone()).or_insert(description);
        seen.push(role.clone());
        records.push((role, record));
    }
    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn standard() -> Baseline {
        Baseline::standard(&Vocabulary::standard().unwrap()).unwrap()
    }

    #[test]
    fn test_standard_phrase_rows() {
        let baseline = standard();
        assert_eq!(
            baseline.phrase(PhraseFunction::Objc).to_string(),
            "complement;NA;direct_object;;;"
        );
        assert_eq!(baseline.phrase(PhraseFunction::Cmpl).grammatical, "*");
        assert_eq!(baseline.phrase(PhraseFunction::Time).to_string(), "adjunct;NA;NA;;time;time");
        assert_eq!(baseline.phrase(PhraseFunction::Supp).semantic, "benefactive");
        assert_eq!(baseline.phrase(PhraseFunction::Pred).predication, "regular");
        assert_eq!(baseline.phrase(PhraseFunction::BoundErr), LabelRecord::empty());
        assert_eq!(baseline.description("PtcO"), Some("Participle with object suffix"));
    }

    #[test]
    fn test_clause_keys() {
        let baseline = standard();
        assert_eq!(baseline.clause("xYqX", "Objc").grammatical, "direct_object");
        assert_eq!(baseline.clause("InfC", "Adju").to_string(), "NA;NA;;;;");
        assert_eq!(baseline.clause("WayX", "NA"), LabelRecord::empty());
    }

    #[test]
    fn test_invalid_tables_are_fatal() {
        let vocabulary = Vocabulary::standard().unwrap();

        let short = "Adju\tAdjunct\tadjunct\tNA";
        assert!(matches!(
            Baseline::from_tables(short, CLAUSE_BASELINE, &vocabulary),
            Err(ConfigError::FieldCount { found: 2, .. })
        ));

        let bad_value = PHRASE_BASELINE.replacen("adjunct\tNA\tNA", "adjunct\tNA\tobject", 1);
        assert!(matches!(
            Baseline::from_tables(&bad_value, CLAUSE_BASELINE, &vocabulary),
            Err(ConfigError::BaselineValue { field: Field::Grammatical, .. })
        ));

        let unknown = format!("{PHRASE_BASELINE}\nObj\tObject\tcomplement\tNA\tNA\t\t\t");
        assert_eq!(
            Baseline::from_tables(&unknown, CLAUSE_BASELINE, &vocabulary).err(),
            Some(ConfigError::UnknownFunction("Obj".to_string()))
        );

        let missing: String = PHRASE_BASELINE
            .lines()
            .filter(|l| !l.starts_with("Voct"))
            .collect::<Vec<_>>()
            .join("\n");
        assert!(matches!(
            Baseline::from_tables(&missing, CLAUSE_BASELINE, &vocabulary),
            Err(ConfigError::MissingRole { kind: "phrase", .. })
        ));
    }
}
