use crate::state::NodeId;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("invalid mindmap source: {0}")]
    InvalidSource(#[from] serde_json::Error),

    #[error("unknown node id: {id}")]
    UnknownNode { id: NodeId },
}
