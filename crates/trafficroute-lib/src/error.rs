use thiserror::Error;

/// Convenient result alias for the routing library.
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level library error type.
///
/// An unreachable destination is not an error: route queries report it as
/// `Ok(None)`.
#[derive(Debug, Error)]
pub enum Error {
    /// Raised when a negative or non-finite weight is offered to the graph.
    #[error("invalid edge weight {weight}: weights must be finite and non-negative")]
    InvalidWeight { weight: f64 },

    /// Raised when a lookup references a node that was never registered.
    #[error("unknown node: {node}")]
    NodeNotFound { node: String },

    /// Raised when a weight update targets an edge that does not exist.
    #[error("no edge from {from} to {to}")]
    EdgeNotFound { from: String, to: String },

    /// Raised when a route query starts from an unregistered node.
    #[error("unknown source node: {node}")]
    SourceNotFound { node: String },

    /// Raised when a route query targets an unregistered node.
    #[error("unknown target node: {node}")]
    TargetNotFound { node: String },

    /// Raised when a road network registers the same directed segment twice.
    #[error("duplicate segment from {from} to {to}")]
    DuplicateSegment { from: String, to: String },

    /// Raised when a length or speed measurement cannot produce a travel time.
    #[error("invalid {quantity} {value}")]
    InvalidMeasurement { quantity: &'static str, value: f64 },

    /// Raised when a bounding box is not `minLon,minLat,maxLon,maxLat` with
    /// finite, ordered corners.
    #[error("invalid bounding box {input:?}: expected minLon,minLat,maxLon,maxLat")]
    InvalidBoundingBox { input: String },

    /// Raised when a network or observation file contains an unusable row.
    #[error("invalid network data on line {line}: {message}")]
    NetworkData { line: u64, message: String },

    /// Wrapper for IO errors.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Wrapper for CSV parsing errors.
    #[error(transparent)]
    Csv(#[from] csv::Error),
}

impl Error {
    /// Whether the error means a place name could not be resolved, as opposed
    /// to a malformed input.
    pub fn is_unknown_place(&self) -> bool {
        matches!(
            self,
            Error::NodeNotFound { .. } | Error::SourceNotFound { .. } | Error::TargetNotFound { .. }
        )
    }
}
