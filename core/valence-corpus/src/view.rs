use valence_protocol::{NodeId, NodeKind, PhraseFunction, Section, Word, WordFlags};

/// Read-only access to an annotated corpus.
///
/// Answers must be stable for the lifetime of the view: the pipeline queries the
/// same nodes many times and relies on identical answers.
pub trait CorpusView {
    /// All nodes of a kind, in corpus order.
    fn nodes(&self, kind: NodeKind) -> Vec<NodeId>;

    fn kind(&self, node: NodeId) -> Option<NodeKind>;

    /// Position in corpus order; total over all nodes.
    fn position(&self, node: NodeId) -> Option<u32>;

    /// Nodes of `kind` inside `node`, in corpus order.
    fn contained(&self, node: NodeId, kind: NodeKind) -> Vec<NodeId>;

    /// The unique node of `kind` containing `node`.
    fn container(&self, node: NodeId, kind: NodeKind) -> Option<NodeId>;

    /// Feature value by name (`lex`, `function`, `rela`, ...).
    fn feature(&self, node: NodeId, name: &str) -> Option<String>;

    /// The direct mother of a clause.
    fn mother(&self, clause: NodeId) -> Option<NodeId>;

    /// Clauses whose direct mother is `clause`.
    fn daughters(&self, clause: NodeId) -> Vec<NodeId>;

    fn word(&self, node: NodeId) -> Option<Word>;

    fn word_flags(&self, node: NodeId) -> WordFlags;

    fn function(&self, phrase: NodeId) -> Option<PhraseFunction>;

    fn section(&self, node: NodeId) -> Option<Section>;

    /// Words of a span, in order.
    fn words(&self, node: NodeId) -> Vec<Word> {
        self.contained(node, NodeKind::Word)
            .into_iter()
            .filter_map(|w| self.word(w))
            .collect()
    }

    /// Plain text of a span, words separated by spaces.
    fn text(&self, node: NodeId) -> String {
        self.words(node)
            .iter()
            .map(|w| w.text.as_str())
            .collect::<Vec<_>>()
            .join(" ")
    }
}
