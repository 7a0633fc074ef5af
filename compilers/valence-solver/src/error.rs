use thiserror::Error;
use valence_parser::ParseError;
use valence_protocol::Field;

/// Problems in the compiled-in tables or the verb rules. Raised by
/// [`Valence::new`](crate::Valence::new) before anything is processed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("invalid field specification: {0}")]
    FieldSpec(#[source] ParseError),

    #[error("field specification lacks `{0}`")]
    MissingField(Field),

    #[error("invalid {kind} baseline table: {source}")]
    Table {
        kind: &'static str,
        #[source]
        source: ParseError,
    },

    #[error("{kind} baseline `{role}`: wrong number of fields ({found} must be {expected})")]
    FieldCount {
        kind: &'static str,
        role: String,
        found: usize,
        expected: usize,
    },

    #[error("{kind} baseline `{role}`: wrong `{field}` value \"{value}\"")]
    BaselineValue {
        kind: &'static str,
        role: String,
        field: Field,
        value: String,
    },

    #[error("phrase baseline: `{0}` is not a phrase function")]
    UnknownFunction(String),

    #[error("{kind} baseline: `{role}` listed twice")]
    DuplicateRole { kind: &'static str, role: String },

    #[error("{kind} baseline: no entry for `{role}`")]
    MissingRole { kind: &'static str, role: String },

    #[error("rule {rule}: \"{value}\" is not a valid `{field}` value")]
    RuleValue {
        rule: String,
        field: Field,
        value: String,
    },

    #[error("rule {rule}: feature `{feature}` not in use")]
    RuleFeature { rule: String, feature: String },

    #[error("rule {rule}: feature `{feature}`: not a valid value \"{value}\"")]
    RuleFeatureValue {
        rule: String,
        feature: String,
        value: String,
    },

    #[error("rule {0} has no conditions")]
    EmptyRule(String),
}
