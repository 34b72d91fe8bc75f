use graphj_model::NotATree;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("graph not supported by this layout: {reason}")]
    GraphShape { reason: String },
    #[error("graph is not a spanning tree: {0}")]
    NotATree(#[from] NotATree),
    #[error("no visibility graph vertex at ({x}, {y})")]
    Routing { x: f64, y: f64 },
    #[error("no obstacle-free route between edge endpoints")]
    Unreachable,
}

impl Error {
    pub(crate) fn graph_shape(reason: impl Into<String>) -> Self {
        Self::GraphShape {
            reason: reason.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
