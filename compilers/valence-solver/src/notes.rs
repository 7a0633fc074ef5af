use valence_corpus::CorpusView;
use valence_protocol::{ConstituentKind, NodeId, Word, WordFlags};

use crate::flowchart::SenseDecision;

/// Columns of the notes file.
pub const NOTE_FIELDS: [&str; 10] = [
    "version",
    "book",
    "chapter",
    "verse",
    "clause",
    "is_shared",
    "is_published",
    "status",
    "keywords",
    "ntext",
];

pub const NOTE_KEYWORD: &str = "valence";

/// Kinds in the order they are listed in a note.
const NOTE_ORDER: [ConstituentKind; 11] = [
    ConstituentKind::Dos,
    ConstituentKind::Pdos,
    ConstituentKind::Kdos,
    ConstituentKind::Ldos,
    ConstituentKind::Ndos,
    ConstituentKind::Idos,
    ConstituentKind::Cdos,
    ConstituentKind::Inds,
    ConstituentKind::Bens,
    ConstituentKind::Locs,
    ConstituentKind::Cpls,
];

/// Link to the documentation of a flowchart, or to the legend.
pub fn sense_link(base: &str, sense: Option<&str>) -> String {
    match sense {
        Some(lexeme) => format!("{}/FC_{}", base, lexeme.replace('>', "A").replace('<', "O")),
        None => format!("{base}/Legend"),
    }
}

/// `[id|gloss gloss]` for one constituent. The verb itself is left out, and
/// so is the `L` of an L-object.
fn constituent_text<V: CorpusView + ?Sized>(view: &V, node: NodeId, kind: ConstituentKind, verb: NodeId) -> String {
    let words = view.words(node);
    let words: &[Word] = match words.split_first() {
        Some((first, rest)) if kind == ConstituentKind::Ldos && first.lex == "L" => rest,
        _ => &words,
    };
    let glosses: Vec<String> = words
        .iter()
        .filter(|w| w.id != verb)
        .map(|w| {
            let gloss = w.gloss.as_deref().unwrap_or(&w.lex).replace("<object marker>", "&");
            if w.flags().contains(WordFlags::DIRECTIONAL) {
                format!("toward {gloss}")
            } else {
                gloss
            }
        })
        .collect();
    format!("[{}|{}]", node, glosses.join(" "))
}

/// The note text: verb, sense with link, and the constituents per kind.
pub fn note_text<V: CorpusView + ?Sized>(view: &V, decision: &SenseDecision, base: &str) -> String {
    let sense = decision.sense.as_deref().unwrap_or("legend");
    let link = sense_link(base, decision.sense.as_deref());

    let elements: Vec<String> = NOTE_ORDER
        .into_iter()
        .filter(|kind| decision.constituents.count(*kind) > 0)
        .map(|kind| {
            let material: Vec<String> = decision
                .constituents
                .members(kind)
                .map(|node| constituent_text(view, node, kind, decision.verb))
                .collect();
            format!("*{}*={}", kind.description(), material.join(" "))
        })
        .collect();

    format!(
        "verb [{}|{}] has sense `{}` [{}]({}) {}",
        decision.phrase,
        decision.text,
        decision.label,
        sense,
        link,
        elements.join("; ")
    )
}

/// One tab separated note row.
pub fn note_row<V: CorpusView + ?Sized>(view: &V, decision: &SenseDecision, version: &str, base: &str) -> String {
    let (book, chapter, verse) = match &decision.section {
        Some(s) => (s.book.clone(), s.chapter.to_string(), s.verse.to_string()),
        None => Default::default(),
    };
    [
        version.to_string(),
        book,
        chapter,
        verse,
        decision.clause.to_string(),
        "T".to_string(),
        String::new(),
        decision.status.symbol().to_string(),
        NOTE_KEYWORD.to_string(),
        note_text(view, decision, base),
    ]
    .join("\t")
}

/// Header plus one row per decision.
pub fn write_notes<V: CorpusView + ?Sized>(
    view: &V,
    decisions: &[SenseDecision],
    version: &str,
    base: &str,
) -> String {
    let mut out = NOTE_FIELDS.join("\t");
    out.push('\n');
    for decision in decisions {
        out.push_str(&note_row(view, decision, version, base));
        out.push('\n');
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::flowchart::ConstituentSets;
    use crate::testing::*;
    use valence_protocol::{PhraseFunction, Section, SenseLabel, Status};

    #[test]
    fn test_sense_links() {
        let base = "https://example.org/wiki";
        assert_eq!(sense_link(base, Some("BR>")), "https://example.org/wiki/FC_BRA");
        assert_eq!(sense_link(base, Some("<FH")), "https://example.org/wiki/FC_OFH");
        assert_eq!(sense_link(base, None), "https://example.org/wiki/Legend");
    }

    #[test]
    fn test_note_row() {
        let mut b = builder();
        let clause = b.clause("WayX", "NA");
        let v = b.verb("NTN[", "qal");
        let verb = v.id;
        let pred = b.phrase(PhraseFunction::Pred, vec![v]);
        let mut book = noun(&mut b, "SPR/");
        book.gloss = Some("book".to_string());
        let obj = b.phrase(PhraseFunction::Objc, vec![book]);
        let mut l = prep(&mut b, "L");
        l.gloss = Some("to".to_string());
        let mut man = noun(&mut b, ">JC/");
        man.gloss = Some("man".to_string());
        let to = b.phrase(PhraseFunction::Cmpl, vec![l, man]);
        let corpus = load(b);

        let mut constituents = ConstituentSets::new();
        constituents.insert(ConstituentKind::Dos, obj);
        constituents.insert(ConstituentKind::Inds, to);
        let decision = SenseDecision {
            verb,
            phrase: pred,
            clause,
            lexeme: "NTN".to_string(),
            text: "NTN".to_string(),
            section: Some(Section {
                book: "Genesis".to_string(),
                chapter: 1,
                verse: 1,
            }),
            label: "di".parse::<SenseLabel>().unwrap(),
            sense: Some("NTN".to_string()),
            status: Status::Confident,
            constituents,
            repair: None,
        };

        let row = note_row(&corpus, &decision, "c", "base");
        let cells: Vec<&str> = row.split('\t').collect();
        assert_eq!(cells.len(), NOTE_FIELDS.len());
        assert_eq!(&cells[..4], &["c", "Genesis", "1", "1"]);
        assert_eq!(cells[7], "!");
        assert_eq!(
            cells[9],
            format!(
                "verb [{pred}|NTN] has sense `di` [NTN](base/FC_NTN) *direct object*=[{obj}|book]; *indirect object*=[{to}|to man]"
            )
        );

        let notes = write_notes(&corpus, &[decision], "c", "base");
        assert!(notes.starts_with("version\tbook\tchapter\tverse\tclause\t"));
        assert_eq!(notes.lines().count(), 2);
    }
}
