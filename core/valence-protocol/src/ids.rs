use core::fmt;

use rkyv::{Archive, Deserialize, Serialize};

#[cfg(feature = "serde")]
use serde::{Deserialize as SerdeDeserialize, Serialize as SerdeSerialize};

/// Stable identifier of a corpus node (word, phrase, clause, sentence, verse, chapter, book).
///
/// Ids are assigned by the corpus producer and are stable within one corpus version.
/// Sheets and emitted features refer to nodes by this number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Archive, Serialize, Deserialize)]
#[cfg_attr(feature = "serde", derive(SerdeDeserialize, SerdeSerialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
#[archive(check_bytes)]
#[repr(transparent)] // Same layout as u32
pub struct NodeId(pub u32);

impl NodeId {
    pub const fn new(id: u32) -> Self {
        Self(id)
    }
}

impl From<u32> for NodeId {
    fn from(id: u32) -> Self {
        Self(id)
    }
}

impl From<NodeId> for u32 {
    fn from(id: NodeId) -> u32 {
        id.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
