use thiserror::Error;
use valence_protocol::NodeId;

#[derive(Debug, Error)]
pub enum CorpusError {
    #[error("node {0} occurs more than once in the snapshot")]
    DuplicateNode(NodeId),

    #[error("clause {clause} has mother {mother}, which is not in the corpus")]
    DanglingMother { clause: NodeId, mother: NodeId },

    #[error("clause {clause} has mother {mother}, which is a {kind}, not a clause")]
    MotherNotClause {
        clause: NodeId,
        mother: NodeId,
        kind: String,
    },

    #[error("corpus archive is invalid: {0}")]
    Archive(String),
}
