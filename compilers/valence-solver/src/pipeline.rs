use std::collections::{BTreeMap, BTreeSet};

use serde::Serialize;
use tracing::{debug, info};
use valence_corpus::CorpusView;
use valence_lexicon::Lexicon;
use valence_parser::{
    write_correction_sheet, write_enrichment_sheet, CorrectionRow, CorrectionTemplate, SheetClause, SheetEntry,
};
use valence_protocol::{LabelRecord, NodeId, NodeKind, ObjectKind};

use crate::baseline::Baseline;
use crate::complements::{self, ComplementClassifier, ComplementVerdict};
use crate::config::ValenceConfig;
use crate::corrections::Corrections;
use crate::diagnostics::{Diagnostics, OutcomeStats};
use crate::enrich::{Enrichment, EnrichmentRuleEngine, RuleTally};
use crate::error::ConfigError;
use crate::flowchart::{FlowchartEngine, SenseDecision};
use crate::index::ClauseVerbIndex;
use crate::merge::{ManualOverrideMerger, MergedRecord, VerbSheets};
use crate::notes;
use crate::objects::{ObjectKindSet, ObjectResolver};
use crate::report::InputReport;
use crate::rules::RuleBook;
use crate::scanner::{ClauseScan, Constituent, ConstituentScanner};
use crate::vocabulary::Vocabulary;

/// Everything the pipeline found out about one clause.
#[derive(Debug, Clone, Serialize)]
pub struct ClauseAnalysis {
    pub clause: NodeId,
    /// Lexeme of the clause's first predicate verb; its rules label the clause.
    pub lexeme: String,
    #[serde(skip)]
    pub scan: ClauseScan,
    pub objects: ObjectKindSet,
    pub complements: BTreeMap<NodeId, ComplementVerdict>,
    pub enrichments: Vec<Enrichment>,
}

/// Output of the enrichment pass.
#[derive(Debug, Clone)]
pub struct Enriched {
    pub index: ClauseVerbIndex,
    pub clauses: Vec<ClauseAnalysis>,
    pub tally: RuleTally,
}

impl Enriched {
    /// Generated record per constituent.
    pub fn records(&self) -> BTreeMap<NodeId, LabelRecord> {
        self.clauses
            .iter()
            .flat_map(|c| c.enrichments.iter())
            .map(|e| (e.node, e.record.clone()))
            .collect()
    }

    pub fn analysis(&self, clause: NodeId) -> Option<&ClauseAnalysis> {
        self.clauses.iter().find(|c| c.clause == clause)
    }
}

/// Sheets supplied from outside, already parsed.
#[derive(Debug, Clone, Default)]
pub struct SheetInputs {
    /// Filled correction sheets per verb.
    pub corrections: Vec<(String, Vec<CorrectionRow>)>,
    pub enrichments: Vec<VerbSheets>,
}

/// Output of a full run.
#[derive(Debug, Clone, Serialize)]
pub struct ValenceRun {
    pub records: BTreeMap<NodeId, MergedRecord>,
    pub decisions: Vec<SenseDecision>,
    pub diagnostics: Diagnostics,
    pub stats: OutcomeStats,
    pub report: InputReport,
    #[serde(skip)]
    pub tally: RuleTally,
}

/// The valence pipeline: tables validated once, then any number of runs.
#[derive(Debug, Clone)]
pub struct Valence {
    config: ValenceConfig,
    vocabulary: Vocabulary,
    baseline: Baseline,
    rules: RuleBook,
    lexicon: Lexicon,
}

impl Valence {
    /// Parses and validates the compiled-in tables. A [`ConfigError`] means
    /// nothing may be processed.
    pub fn new(config: ValenceConfig) -> Result<Self, ConfigError> {
        let vocabulary = Vocabulary::standard()?;
        let baseline = Baseline::standard(&vocabulary)?;
        Self::with_tables(config, vocabulary, baseline, RuleBook::standard(), Lexicon::standard())
    }

    pub fn with_tables(
        config: ValenceConfig,
        vocabulary: Vocabulary,
        baseline: Baseline,
        rules: RuleBook,
        lexicon: Lexicon,
    ) -> Result<Self, ConfigError> {
        rules.validate(&vocabulary)?;
        info!(rules = rules.len(), flowcharts = config.flowcharts.len(), "valence tables ready");
        Ok(Self {
            config,
            vocabulary,
            baseline,
            rules,
            lexicon,
        })
    }

    pub fn config(&self) -> &ValenceConfig {
        &self.config
    }

    pub fn vocabulary(&self) -> &Vocabulary {
        &self.vocabulary
    }

    pub fn rules(&self) -> &RuleBook {
        &self.rules
    }

    pub fn corrections<V: CorpusView + ?Sized>(
        &self,
        view: &V,
        sheets: &[(String, Vec<CorrectionRow>)],
        report: &mut InputReport,
    ) -> Corrections {
        Corrections::from_sheets(view, sheets, report)
    }

    /// Scans, resolves, classifies and labels every clause with a predicate verb.
    pub fn enrich<V: CorpusView + ?Sized>(&self, view: &V, corrections: &Corrections) -> Enriched {
        let index = ClauseVerbIndex::build(view, corrections);
        let scanner = ConstituentScanner::new(view, corrections);
        let resolver = ObjectResolver::new(&self.lexicon);
        let classifier = ComplementClassifier::new(&self.lexicon);
        let engine = EnrichmentRuleEngine::new(&self.baseline, &self.rules, &self.lexicon);

        let mut tally = RuleTally::new();
        let mut clauses = Vec::with_capacity(index.clauses().len());
        for &clause in index.clauses() {
            let Some(verb) = index.main_verb(clause) else { continue };
            let scan = scanner.scan(clause);
            let objects = resolver.resolve(&scan);
            let complements = classifier.classify_clause(&scan, &objects);
            let enrichments = engine.enrich_clause(&scan, &objects, &complements, &verb.lexeme, &mut tally);
            clauses.push(ClauseAnalysis {
                clause,
                lexeme: verb.lexeme.clone(),
                scan,
                objects,
                complements,
                enrichments,
            });
        }

        let mut objects: BTreeMap<&str, usize> = BTreeMap::new();
        for analysis in &clauses {
            for kind in ObjectKind::ALL {
                *objects.entry(kind.as_str()).or_default() += analysis.objects.count(kind);
            }
        }
        let verdicts = complements::tally(clauses.iter().flat_map(|c| c.complements.values()));
        info!(clauses = clauses.len(), ?objects, "resolved objects");
        info!(?verdicts, "classified complements");
        info!(applications = tally.total(), "applied enrichment rules");

        Enriched { index, clauses, tally }
    }

    pub fn merge<V: CorpusView + ?Sized>(
        &self,
        view: &V,
        corrections: &Corrections,
        enriched: &Enriched,
        sheets: &[VerbSheets],
        report: &mut InputReport,
    ) -> BTreeMap<NodeId, MergedRecord> {
        ManualOverrideMerger::new(view, corrections, &self.vocabulary).merge(&enriched.records(), sheets, report)
    }

    /// Runs the flowchart over every applicable verb occurrence, in corpus order.
    pub fn decide<V: CorpusView + ?Sized>(
        &self,
        view: &V,
        index: &ClauseVerbIndex,
        records: &BTreeMap<NodeId, MergedRecord>,
    ) -> (Vec<SenseDecision>, Diagnostics, OutcomeStats) {
        let flowchart = FlowchartEngine::new(&self.config);
        let mut diagnostics = Diagnostics::new();
        let mut stats = OutcomeStats::new();
        let mut decisions = Vec::new();

        for &clause in index.clauses() {
            for occurrence in index.verbs(clause) {
                if !flowchart.applies(occurrence, records) {
                    continue;
                }
                decisions.push(flowchart.run(view, occurrence, records, &mut diagnostics, &mut stats));
            }
        }

        let mut labels: BTreeMap<String, usize> = BTreeMap::new();
        for decision in &decisions {
            *labels.entry(decision.label.code()).or_default() += 1;
        }
        info!(decisions = decisions.len(), ?labels, "applied flowcharts");
        (decisions, diagnostics, stats)
    }

    /// Corrections, enrichment, merge and flowchart in one pass.
    pub fn run<V: CorpusView + ?Sized>(&self, view: &V, inputs: &SheetInputs) -> ValenceRun {
        let mut report = InputReport::new();
        let corrections = self.corrections(view, &inputs.corrections, &mut report);
        let enriched = self.enrich(view, &corrections);
        let records = self.merge(view, &corrections, &enriched, &inputs.enrichments, &mut report);
        let (decisions, diagnostics, stats) = self.decide(view, &enriched.index, &records);

        if !report.is_empty() {
            report.log(self.config.error_limit);
        }
        ValenceRun {
            records,
            decisions,
            diagnostics,
            stats,
            report,
            tally: enriched.tally,
        }
    }

    pub fn notes<V: CorpusView + ?Sized>(&self, view: &V, decisions: &[SenseDecision]) -> String {
        notes::write_notes(view, decisions, &self.config.note_version, &self.config.flowchart_base)
    }

    /// Blank enrichment sheet of a verb: every clause where it is a predicate,
    /// with the generated records.
    pub fn enrichment_sheet<V: CorpusView + ?Sized>(&self, view: &V, enriched: &Enriched, lexeme: &str) -> String {
        let mut seen = BTreeSet::new();
        let mut clauses = Vec::new();

        for &(clause, word) in enriched.index.clauses_of(lexeme) {
            if !seen.insert(clause) {
                continue;
            }
            let (Some(analysis), Some(occurrence), Some(section)) = (
                enriched.analysis(clause),
                enriched.index.occurrence(clause, word),
                view.section(clause),
            ) else {
                continue;
            };
            let heading = SheetClause {
                clause,
                verb: word,
                section,
                verb_lexeme: lexeme.to_string(),
                verb_stem: occurrence.stem.clone().unwrap_or_default(),
                verb_text: occurrence.text.clone(),
                clause_text: view.text(clause),
            };
            let entries = analysis
                .scan
                .constituents()
                .zip(&analysis.enrichments)
                .map(|(constituent, enrichment)| sheet_entry(view, &constituent, &enrichment.record))
                .collect();
            clauses.push((heading, entries));
        }
        debug!(lexeme, clauses = clauses.len(), "wrote enrichment sheet");
        write_enrichment_sheet(&clauses)
    }

    /// Blank correction sheet of a verb: every clause with an occurrence, also
    /// outside predicate phrases. Such occurrences are starred.
    pub fn correction_sheet<V: CorpusView + ?Sized>(
        &self,
        view: &V,
        index: &ClauseVerbIndex,
        lexeme: &str,
    ) -> String {
        let mut seen = BTreeSet::new();
        let mut rows = Vec::new();

        for occurrence in index.occurrences(lexeme) {
            if !seen.insert(occurrence.clause) {
                continue;
            }
            let Some(section) = view.section(occurrence.word) else { continue };
            let star = if occurrence.in_predicate { "" } else { "* " };
            let phrases = view
                .contained(occurrence.clause, NodeKind::Phrase)
                .into_iter()
                .map(|phrase| {
                    let function = view.function(phrase);
                    let marker = if function.is_some_and(|f| f.is_predicate()) { star } else { "" };
                    (
                        phrase,
                        format!("{marker}{}", view.text(phrase)),
                        function.map(|f| f.as_str().to_string()).unwrap_or_default(),
                    )
                })
                .collect();
            rows.push(CorrectionTemplate {
                clause: occurrence.clause,
                word: occurrence.word,
                passage: section.to_string(),
                link: self.config.passage_link(&section.book, section.chapter, section.verse),
                verb: format!("{star}{}", occurrence.text),
                stem: occurrence.stem.clone().unwrap_or_default(),
                phrases,
            });
        }
        write_correction_sheet(&rows)
    }
}

fn sheet_entry<V: CorpusView + ?Sized>(view: &V, constituent: &Constituent<'_>, record: &LabelRecord) -> SheetEntry {
    let (typ, role) = match constituent {
        Constituent::Phrase(p) => (p.typ.clone(), p.function.as_str().to_string()),
        Constituent::Clause(c) => (c.typ.clone(), c.rela.clone()),
    };
    SheetEntry {
        node: constituent.id(),
        kind: constituent.kind(),
        text: view.text(constituent.id()),
        typ,
        role,
        record: record.clone(),
    }
}
