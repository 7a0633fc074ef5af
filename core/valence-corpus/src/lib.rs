pub mod builder;
pub mod components;
pub mod error;
pub mod graph;
pub mod systems;
pub mod view;

use std::collections::HashMap;

use hecs::{Entity, World};
use rkyv::{AlignedVec, Deserialize};
use tracing::{debug, info};
use valence_protocol::{
    Book, Clause, CorpusSnapshot, NodeId, NodeKind, PhraseFunction, Section, Word, WordFlags,
};

pub use builder::CorpusBuilder;
use components::{Children, ClauseData, Heading, Label, NodeMeta, Parent, PhraseData, WordData};
pub use error::CorpusError;
pub use graph::MotherGraph;
use systems::integrity::{check_integrity, IntegrityIssue};
pub use view::CorpusView;

/// An in-memory corpus: one entity per node, containment as `Parent`/`Children`
/// components, clause dependencies in a separate graph.
pub struct Corpus {
    world: World,
    index: HashMap<NodeId, Entity>,
    by_kind: HashMap<NodeKind, Vec<NodeId>>,
    mothers: MotherGraph,
    version: String,
}

impl Corpus {
    pub fn from_snapshot(snapshot: &CorpusSnapshot) -> Result<Self, CorpusError> {
        let mut loader = Loader::default();
        for book in &snapshot.books {
            loader.book(book)?;
        }
        loader.finish(snapshot.version.clone())
    }

    /// Loads a compiled (rkyv) snapshot, validating the archive first.
    pub fn from_archive(bytes: &[u8]) -> Result<Self, CorpusError> {
        // rkyv needs an aligned buffer
        let mut aligned = AlignedVec::with_capacity(bytes.len());
        aligned.extend_from_slice(bytes);

        let archived = rkyv::check_archived_root::<CorpusSnapshot>(&aligned)
            .map_err(|e| CorpusError::Archive(e.to_string()))?;
        let snapshot: CorpusSnapshot = archived
            .deserialize(&mut rkyv::Infallible)
            .map_err(|_| CorpusError::Archive("deserialization failed".to_string()))?;
        Self::from_snapshot(&snapshot)
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    /// Expose the inner hecs World for integrity systems
    pub fn inner(&self) -> &World {
        &self.world
    }

    pub fn mothers(&self) -> &MotherGraph {
        &self.mothers
    }

    /// Run all integrity systems. Issues are informational; loading already
    /// rejected what would make the corpus unusable.
    pub fn validate(&self) -> Vec<IntegrityIssue> {
        check_integrity(self)
    }

    fn entity(&self, node: NodeId) -> Option<Entity> {
        self.index.get(&node).copied()
    }

    fn meta(&self, entity: Entity) -> Option<NodeMeta> {
        self.world.get::<&NodeMeta>(entity).ok().map(|m| *m)
    }

    fn children(&self, entity: Entity) -> Vec<Entity> {
        self.world
            .get::<&Children>(entity)
            .map(|c| c.0.clone())
            .unwrap_or_default()
    }

    fn descend(&self, entity: Entity, kind: NodeKind, out: &mut Vec<NodeId>) {
        for child in self.children(entity) {
            let Some(meta) = self.meta(child) else { continue };
            if meta.kind == kind {
                out.push(meta.id);
            } else if meta.kind < kind {
                self.descend(child, kind, out);
            }
        }
    }
}

impl CorpusView for Corpus {
    fn nodes(&self, kind: NodeKind) -> Vec<NodeId> {
        self.by_kind.get(&kind).cloned().unwrap_or_default()
    }

    fn kind(&self, node: NodeId) -> Option<NodeKind> {
        self.entity(node).and_then(|e| self.meta(e)).map(|m| m.kind)
    }

    fn position(&self, node: NodeId) -> Option<u32> {
        self.entity(node).and_then(|e| self.meta(e)).map(|m| m.position)
    }

    fn contained(&self, node: NodeId, kind: NodeKind) -> Vec<NodeId> {
        let mut out = Vec::new();
        if let Some(entity) = self.entity(node) {
            self.descend(entity, kind, &mut out);
        }
        out
    }

    fn container(&self, node: NodeId, kind: NodeKind) -> Option<NodeId> {
        let mut current = self.entity(node)?;
        loop {
            let parent = self.world.get::<&Parent>(current).ok()?.0;
            let meta = self.meta(parent)?;
            if meta.kind == kind {
                return Some(meta.id);
            }
            current = parent;
        }
    }

    fn feature(&self, node: NodeId, name: &str) -> Option<String> {
        let entity = self.entity(node)?;
        let meta = self.meta(entity)?;
        if name == "otype" {
            return Some(meta.kind.as_str().to_string());
        }

        match meta.kind {
            NodeKind::Word => {
                let data = self.world.get::<&WordData>(entity).ok()?;
                let w = &data.word;
                match name {
                    "text" => Some(w.text.clone()),
                    "lex" => Some(w.lex.clone()),
                    "sp" => Some(w.sp.as_str().to_string()),
                    "vs" => w.vs.clone(),
                    "prs" => w.prs.clone(),
                    "uvf" => w.uvf.clone(),
                    "nametype" => w.nametype.clone(),
                    "ls" => w.ls.clone(),
                    "gloss" => w.gloss.clone(),
                    _ => None,
                }
            }
            NodeKind::Phrase => {
                let data = self.world.get::<&PhraseData>(entity).ok()?;
                match name {
                    "function" => Some(data.function.as_str().to_string()),
                    "typ" => Some(data.typ.clone()),
                    _ => None,
                }
            }
            NodeKind::Clause => {
                let data = self.world.get::<&ClauseData>(entity).ok()?;
                match name {
                    "typ" => Some(data.typ.clone()),
                    "rela" => Some(data.rela.clone()),
                    _ => None,
                }
            }
            NodeKind::Book | NodeKind::Chapter | NodeKind::Verse => {
                let label = self.world.get::<&Label>(entity).ok()?;
                match (&*label, name, meta.kind) {
                    (Label::Book(book), "book", NodeKind::Book) => Some(book.clone()),
                    (Label::Number(n), "chapter", NodeKind::Chapter) => Some(n.to_string()),
                    (Label::Number(n), "verse", NodeKind::Verse) => Some(n.to_string()),
                    _ => None,
                }
            }
            NodeKind::Sentence => None,
        }
    }

    fn mother(&self, clause: NodeId) -> Option<NodeId> {
        self.mothers.mother(clause)
    }

    fn daughters(&self, clause: NodeId) -> Vec<NodeId> {
        self.mothers.daughters(clause)
    }

    fn word(&self, node: NodeId) -> Option<Word> {
        let entity = self.entity(node)?;
        self.world
            .get::<&WordData>(entity)
            .ok()
            .map(|data| data.word.clone())
    }

    fn word_flags(&self, node: NodeId) -> WordFlags {
        self.entity(node)
            .and_then(|e| self.world.get::<&WordData>(e).ok().map(|data| data.flags))
            .unwrap_or_else(WordFlags::empty)
    }

    fn function(&self, phrase: NodeId) -> Option<PhraseFunction> {
        let entity = self.entity(phrase)?;
        self.world
            .get::<&PhraseData>(entity)
            .ok()
            .map(|data| data.function)
    }

    fn section(&self, node: NodeId) -> Option<Section> {
        let verse = match self.kind(node)? {
            NodeKind::Verse => node,
            NodeKind::Book | NodeKind::Chapter => return None,
            _ => self.container(node, NodeKind::Verse)?,
        };
        let entity = self.entity(verse)?;
        self.world
            .get::<&Heading>(entity)
            .ok()
            .map(|heading| heading.0.clone())
    }
}

#[derive(Default)]
struct Loader {
    world: World,
    index: HashMap<NodeId, Entity>,
    by_kind: HashMap<NodeKind, Vec<NodeId>>,
    mothers: Vec<(NodeId, NodeId)>,
    position: u32,
}

impl Loader {
    fn spawn(&mut self, id: NodeId, kind: NodeKind, parent: Option<Entity>) -> Result<Entity, CorpusError> {
        if self.index.contains_key(&id) {
            return Err(CorpusError::DuplicateNode(id));
        }
        let meta = NodeMeta {
            id,
            kind,
            position: self.position,
        };
        self.position += 1;

        let entity = self.world.spawn((meta, Children::default()));
        if let Some(parent) = parent {
            let _ = self.world.insert_one(entity, Parent(parent));
            if let Ok(mut children) = self.world.get::<&mut Children>(parent) {
                children.0.push(entity);
            }
        }
        self.index.insert(id, entity);
        self.by_kind.entry(kind).or_default().push(id);
        Ok(entity)
    }

    fn book(&mut self, book: &Book) -> Result<(), CorpusError> {
        let b = self.spawn(book.id, NodeKind::Book, None)?;
        let _ = self.world.insert_one(b, Label::Book(book.name.clone()));

        for chapter in &book.chapters {
            let c = self.spawn(chapter.id, NodeKind::Chapter, Some(b))?;
            let _ = self.world.insert_one(c, Label::Number(chapter.number));

            for verse in &chapter.verses {
                let v = self.spawn(verse.id, NodeKind::Verse, Some(c))?;
                let heading = Heading(Section {
                    book: book.name.clone(),
                    chapter: chapter.number,
                    verse: verse.number,
                });
                let _ = self.world.insert(v, (Label::Number(verse.number), heading));

                for sentence in &verse.sentences {
                    let s = self.spawn(sentence.id, NodeKind::Sentence, Some(v))?;
                    for clause in &sentence.clauses {
                        self.clause(clause, s)?;
                    }
                }
            }
        }
        Ok(())
    }

    fn clause(&mut self, clause: &Clause, sentence: Entity) -> Result<(), CorpusError> {
        let c = self.spawn(clause.id, NodeKind::Clause, Some(sentence))?;
        let _ = self.world.insert_one(
            c,
            ClauseData {
                typ: clause.typ.clone(),
                rela: clause.rela.clone(),
            },
        );
        if let Some(mother) = clause.mother {
            self.mothers.push((clause.id, mother));
        }

        for phrase in &clause.phrases {
            let p = self.spawn(phrase.id, NodeKind::Phrase, Some(c))?;
            let _ = self.world.insert_one(
                p,
                PhraseData {
                    function: phrase.function,
                    typ: phrase.typ.clone(),
                },
            );
            for word in &phrase.words {
                let w = self.spawn(word.id, NodeKind::Word, Some(p))?;
                let _ = self.world.insert_one(
                    w,
                    WordData {
                        flags: word.flags(),
                        word: word.clone(),
                    },
                );
            }
        }
        Ok(())
    }

    fn finish(self, version: String) -> Result<Corpus, CorpusError> {
        let mut mothers = MotherGraph::new();
        for clause in self.by_kind.get(&NodeKind::Clause).into_iter().flatten() {
            mothers.add_clause(*clause);
        }

        for &(clause, mother) in &self.mothers {
            let entity = self
                .index
                .get(&mother)
                .ok_or(CorpusError::DanglingMother { clause, mother })?;
            let kind = self
                .world
                .get::<&NodeMeta>(*entity)
                .map(|m| m.kind)
                .map_err(|_| CorpusError::DanglingMother { clause, mother })?;
            if kind != NodeKind::Clause {
                return Err(CorpusError::MotherNotClause {
                    clause,
                    mother,
                    kind: kind.as_str().to_string(),
                });
            }
            mothers.add_mother(clause, mother);
        }

        for kind in NodeKind::ALL {
            debug!(
                kind = kind.as_str(),
                count = self.by_kind.get(kind).map_or(0, Vec::len),
                "loaded nodes"
            );
        }
        info!(
            version = %version,
            nodes = self.index.len(),
            mother_edges = mothers.edge_count(),
            "corpus loaded"
        );

        Ok(Corpus {
            world: self.world,
            index: self.index,
            by_kind: self.by_kind,
            mothers,
            version,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use valence_protocol::PartOfSpeech;

    fn sample() -> (Corpus, NodeId, NodeId, NodeId, NodeId) {
        let mut b = CorpusBuilder::new("test");
        b.book("Genesis");
        b.chapter(2);
        b.verse(15);
        b.sentence();
        let main = b.clause("WayX", "NA");
        let verb = b.verb("LQX[", "qal");
        let pred = b.phrase(PhraseFunction::Pred, vec![verb.clone()]);
        let obj = b.clause("InfC", "Adju");
        b.mother(obj, main);
        let corpus = Corpus::from_snapshot(&b.build()).expect("valid snapshot");
        (corpus, main, pred, verb.id, obj)
    }

    #[test]
    fn test_containment_and_order() {
        let (corpus, main, pred, verb, obj) = sample();

        assert_eq!(corpus.kind(main), Some(NodeKind::Clause));
        assert_eq!(corpus.contained(main, NodeKind::Phrase), vec![pred]);
        assert_eq!(corpus.contained(main, NodeKind::Word), vec![verb]);
        assert_eq!(corpus.container(verb, NodeKind::Clause), Some(main));
        assert_eq!(corpus.container(verb, NodeKind::Book), corpus.nodes(NodeKind::Book).first().copied());
        assert!(corpus.position(main) < corpus.position(pred));
        assert!(corpus.position(pred) < corpus.position(obj));
    }

    #[test]
    fn test_features_and_sections() {
        let (corpus, main, pred, verb, obj) = sample();

        assert_eq!(corpus.feature(verb, "lex").as_deref(), Some("LQX["));
        assert_eq!(corpus.feature(verb, "vs").as_deref(), Some("qal"));
        assert_eq!(corpus.feature(pred, "function").as_deref(), Some("Pred"));
        assert_eq!(corpus.feature(obj, "typ").as_deref(), Some("InfC"));
        assert_eq!(corpus.feature(main, "otype").as_deref(), Some("clause"));
        assert_eq!(corpus.feature(main, "function"), None);

        let section = corpus.section(verb).expect("word inside a verse");
        assert_eq!(section.to_string(), "Genesis 2:15");
    }

    #[test]
    fn test_mother_edges() {
        let (corpus, main, _, _, obj) = sample();
        assert_eq!(corpus.mother(obj), Some(main));
        assert_eq!(corpus.daughters(main), vec![obj]);
        assert!(corpus.daughters(obj).is_empty());
    }

    #[test]
    fn test_rejects_bad_snapshots() {
        let mut b = CorpusBuilder::new("test");
        b.sentence();
        let c = b.clause("xQtX", "NA");
        b.mother(c, NodeId(9999));
        assert!(matches!(
            Corpus::from_snapshot(&b.build()),
            Err(CorpusError::DanglingMother { .. })
        ));

        let mut b = CorpusBuilder::new("test");
        b.sentence();
        let c = b.clause("xQtX", "NA");
        let w = b.word("DBR/", PartOfSpeech::Subs);
        let p = b.phrase(PhraseFunction::Subj, vec![w]);
        b.mother(c, p);
        assert!(matches!(
            Corpus::from_snapshot(&b.build()),
            Err(CorpusError::MotherNotClause { .. })
        ));

        let mut b = CorpusBuilder::new("test");
        b.sentence();
        b.clause("xQtX", "NA");
        let w = b.word("DBR/", PartOfSpeech::Subs);
        b.phrase(PhraseFunction::Subj, vec![w.clone()]);
        b.phrase(PhraseFunction::Objc, vec![w]);
        assert!(matches!(
            Corpus::from_snapshot(&b.build()),
            Err(CorpusError::DuplicateNode(_))
        ));
    }

    #[test]
    fn test_archive_round_trip() {
        let mut b = CorpusBuilder::new("c");
        b.sentence();
        b.clause("WayX", "NA");
        let verb = b.verb("NTN[", "qal");
        b.phrase(PhraseFunction::Pred, vec![verb]);
        let bytes = rkyv::to_bytes::<_, 1024>(&b.build()).expect("archive");

        let corpus = Corpus::from_archive(&bytes).expect("valid archive");
        assert_eq!(corpus.version(), "c");
        assert_eq!(corpus.nodes(NodeKind::Word).len(), 1);

        assert!(matches!(
            Corpus::from_archive(&[1, 2, 3]),
            Err(CorpusError::Archive(_))
        ));
    }
}
