use anyhow::{bail, Context};
use clap::{Parser, Subcommand};
use rkyv::ser::{serializers::AllocSerializer, Serializer};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;
use valence_corpus::Corpus;
use valence_parser::{parse_correction_sheet, parse_enrichment_sheet};
use valence_protocol::CorpusSnapshot;
use valence_solver::{Corrections, SheetInputs, Valence, ValenceConfig, VerbSheets};

#[derive(Parser)]
#[command(author, version, about = "Verb valence: enrichment sheets, flowchart senses and notes")]
struct Cli {
    /// JSON file overriding the default settings
    #[arg(short, long, value_name = "FILE", global = true)]
    config: Option<PathBuf>,

    /// Log debug output (RUST_LOG takes precedence)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Compile a JSON corpus snapshot to the rkyv binary format
    Compile {
        #[arg(short, long, value_name = "FILE")]
        input: PathBuf,

        #[arg(short, long, value_name = "FILE")]
        output: PathBuf,
    },
    /// Write blank correction and enrichment sheets for the selected verbs
    Sheets {
        #[arg(long, value_name = "FILE")]
        corpus: PathBuf,

        /// Correction sheets (`<verb>_blank.csv`)
        #[arg(long, value_name = "DIR")]
        corrections: PathBuf,

        /// Enrichment sheets (`<verb>_blank.csv`)
        #[arg(long, value_name = "DIR")]
        enrichments: PathBuf,
    },
    /// Apply corrections, enrichment and the flowchart, and write the notes
    Run {
        #[arg(long, value_name = "FILE")]
        corpus: PathBuf,

        /// Filled correction sheets (`<verb>.csv`)
        #[arg(long, value_name = "DIR")]
        corrections: Option<PathBuf>,

        /// Blank and filled enrichment sheets (`<verb>_blank.csv`, `<verb>.csv`)
        #[arg(long, value_name = "DIR")]
        enrichments: Option<PathBuf>,

        #[arg(short, long, value_name = "FILE")]
        notes: PathBuf,

        /// JSON dump of the merged records and decisions
        #[arg(long, value_name = "FILE")]
        report: Option<PathBuf>,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(if cli.verbose { "debug" } else { "info" }));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let config = match &cli.config {
        Some(path) => {
            let text = fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
            serde_json::from_str(&text).with_context(|| format!("parsing {}", path.display()))?
        }
        None => ValenceConfig::default(),
    };

    match cli.command {
        Command::Compile { input, output } => compile(&input, &output),
        Command::Sheets {
            corpus,
            corrections,
            enrichments,
        } => sheets(Valence::new(config)?, &load_corpus(&corpus)?, &corrections, &enrichments),
        Command::Run {
            corpus,
            corrections,
            enrichments,
            notes,
            report,
        } => run(
            Valence::new(config)?,
            &load_corpus(&corpus)?,
            corrections.as_deref(),
            enrichments.as_deref(),
            &notes,
            report.as_deref(),
        ),
    }
}

fn compile(input: &Path, output: &Path) -> anyhow::Result<()> {
    info!(input = %input.display(), "reading snapshot");
    let snapshot: CorpusSnapshot = serde_json::from_str(&fs::read_to_string(input)?)?;

    // refuse to compile what would not load
    let corpus = Corpus::from_snapshot(&snapshot)?;
    let issues = corpus.validate();
    if !issues.is_empty() {
        for issue in &issues {
            warn!("{issue:?}");
        }
        bail!("{} integrity issues in {}", issues.len(), input.display());
    }

    let mut serializer = AllocSerializer::<256>::default();
    serializer
        .serialize_value(&snapshot)
        .map_err(|e| anyhow::anyhow!("rkyv serialization failed: {e:?}"))?;
    let bytes = serializer.into_serializer().into_inner();
    fs::write(output, &bytes)?;

    info!(output = %output.display(), bytes = bytes.len(), version = %snapshot.version, "compiled corpus");
    Ok(())
}

/// JSON snapshots are loaded as is, anything else as a compiled archive.
fn load_corpus(path: &Path) -> anyhow::Result<Corpus> {
    let corpus = if path.extension().is_some_and(|e| e == "json") {
        let snapshot: CorpusSnapshot = serde_json::from_str(&fs::read_to_string(path)?)?;
        Corpus::from_snapshot(&snapshot)?
    } else {
        Corpus::from_archive(&fs::read(path)?)?
    };
    info!(path = %path.display(), version = corpus.version(), "loaded corpus");
    Ok(corpus)
}

/// Lexemes carry `>` and `<`, which do not belong in file names.
fn sheet_path(dir: &Path, verb: &str, suffix: &str) -> PathBuf {
    let stem = verb.replace('>', "A").replace('<', "O");
    dir.join(format!("{stem}{suffix}.csv"))
}

fn read_optional(path: &Path) -> anyhow::Result<Option<String>> {
    if path.exists() {
        Ok(Some(fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?))
    } else {
        Ok(None)
    }
}

fn sheets(valence: Valence, corpus: &Corpus, corrections: &Path, enrichments: &Path) -> anyhow::Result<()> {
    fs::create_dir_all(corrections)?;
    fs::create_dir_all(enrichments)?;

    let enriched = valence.enrich(corpus, &Corrections::new());
    for verb in &valence.config().selected_verbs {
        let path = sheet_path(corrections, verb, "_blank");
        fs::write(&path, valence.correction_sheet(corpus, &enriched.index, verb))?;

        let path = sheet_path(enrichments, verb, "_blank");
        fs::write(&path, valence.enrichment_sheet(corpus, &enriched, verb))?;
        info!(verb = %verb, "wrote sheets");
    }
    Ok(())
}

fn read_inputs(valence: &Valence, corrections: Option<&Path>, enrichments: Option<&Path>) -> anyhow::Result<SheetInputs> {
    let mut inputs = SheetInputs::default();
    for verb in &valence.config().selected_verbs {
        if let Some(dir) = corrections {
            let path = sheet_path(dir, verb, "");
            if let Some(text) = read_optional(&path)? {
                let rows = parse_correction_sheet(&text).with_context(|| format!("in {}", path.display()))?;
                inputs.corrections.push((verb.clone(), rows));
            }
        }
        if let Some(dir) = enrichments {
            let read = |suffix: &str| -> anyhow::Result<_> {
                let path = sheet_path(dir, verb, suffix);
                read_optional(&path)?
                    .map(|text| parse_enrichment_sheet(&text).with_context(|| format!("in {}", path.display())))
                    .transpose()
            };
            let sheets = VerbSheets {
                verb: verb.clone(),
                blank: read("_blank")?,
                filled: read("")?,
            };
            if sheets.blank.is_some() || sheets.filled.is_some() {
                inputs.enrichments.push(sheets);
            }
        }
    }
    Ok(inputs)
}

fn run(
    valence: Valence,
    corpus: &Corpus,
    corrections: Option<&Path>,
    enrichments: Option<&Path>,
    notes: &Path,
    report: Option<&Path>,
) -> anyhow::Result<()> {
    let inputs = read_inputs(&valence, corrections, enrichments)?;
    let run = valence.run(corpus, &inputs);

    for line in run.tally.render() {
        info!("{line}");
    }
    for line in run.diagnostics.render(valence.config().error_limit) {
        warn!("{line}");
    }
    for line in run.stats.render(&valence.config().flowcharts) {
        info!("{line}");
    }

    fs::write(notes, valence.notes(corpus, &run.decisions))?;
    info!(path = %notes.display(), notes = run.decisions.len(), "wrote notes");

    if let Some(path) = report {
        fs::write(path, serde_json::to_string_pretty(&run)?)?;
    }
    if !run.report.is_empty() {
        warn!(problems = run.report.len(), "input sheets had problems; best available values were used");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_shape() {
        Cli::command().debug_assert();
        let cli = Cli::try_parse_from(["valence", "-v", "run", "--corpus", "c.bin", "--notes", "n.tsv"]).unwrap();
        assert!(cli.verbose);
        assert!(matches!(cli.command, Command::Run { corrections: None, .. }));
    }

    #[test]
    fn test_sheet_path() {
        assert_eq!(sheet_path(Path::new("s"), "BR>", "_blank"), Path::new("s/BRA_blank.csv"));
        assert_eq!(sheet_path(Path::new("s"), "<FH", ""), Path::new("s/OFH.csv"));
    }
}
