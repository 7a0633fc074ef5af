use hecs::Entity;
use valence_protocol::{NodeId, NodeKind, PhraseFunction, Section, Word, WordFlags};

/// Identity and corpus order of a node. Every entity has one.
#[derive(Debug, Clone, Copy)]
pub struct NodeMeta {
    pub id: NodeId,
    pub kind: NodeKind,
    /// Pre-order position in the corpus; parents come before their children.
    pub position: u32,
}

/// The containing node, one level up.
#[derive(Debug, Clone, Copy)]
pub struct Parent(pub Entity);

/// Contained nodes, one level down, in corpus order.
#[derive(Debug, Clone, Default)]
pub struct Children(pub Vec<Entity>);

/// A word and its derived markers.
#[derive(Debug, Clone)]
pub struct WordData {
    pub word: Word,
    pub flags: WordFlags,
}

#[derive(Debug, Clone)]
pub struct PhraseData {
    pub function: PhraseFunction,
    pub typ: String,
}

#[derive(Debug, Clone)]
pub struct ClauseData {
    pub typ: String,
    pub rela: String,
}

/// Attached to verses; book, chapter and verse of everything below.
#[derive(Debug, Clone)]
pub struct Heading(pub Section);

/// Book name or chapter number, for the `book` / `chapter` features.
#[derive(Debug, Clone)]
pub enum Label {
    Book(String),
    Number(u32),
}
