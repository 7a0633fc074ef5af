//! Verb valence: object and complement detection, label enrichment, manual
//! overrides and the sense flowchart, over a [`valence_corpus::CorpusView`].

pub mod baseline;
pub mod complements;
pub mod config;
pub mod corrections;
pub mod diagnostics;
pub mod enrich;
pub mod error;
pub mod flowchart;
pub mod index;
pub mod merge;
pub mod notes;
pub mod objects;
pub mod pipeline;
pub mod report;
pub mod rules;
pub mod scanner;
pub mod tables;
pub mod vocabulary;

#[cfg(test)]
mod testing;

pub use baseline::Baseline;
pub use complements::{ComplementClassifier, ComplementKind, ComplementVerdict};
pub use config::ValenceConfig;
pub use corrections::Corrections;
pub use diagnostics::{Diagnostics, OutcomeStats, Repair};
pub use enrich::{Enrichment, EnrichmentRuleEngine, GenericRule, RuleTally};
pub use error::ConfigError;
pub use flowchart::{ConstituentSets, FlowchartEngine, Outcome, SenseDecision};
pub use index::{ClauseVerbIndex, VerbOccurrence};
pub use merge::{ManualOverrideMerger, MergedRecord, VerbSheets};
pub use objects::{ObjectKindSet, ObjectResolver};
pub use pipeline::{ClauseAnalysis, Enriched, SheetInputs, Valence, ValenceRun};
pub use report::{InputReport, IssueKind};
pub use rules::{RuleBook, RuleId};
pub use scanner::{ClauseScan, ConstituentScanner};
pub use vocabulary::Vocabulary;
