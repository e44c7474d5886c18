//! Defines the error type shared by the whole crate.
use std::io;


/// Result type used throughout `divclust`.
pub type Result<T> = std::result::Result<T, ClusteringError>;


/// Errors that can occur while configuring, building,
/// querying, or reconstructing a clustering tree.
#[derive(Debug, thiserror::Error)]
pub enum ClusteringError {
    // Configuration -----------------------------------------------------
    /// The given name does not denote a distance method.
    #[error("unknown distance method `{0}`")]
    UnknownDistanceMethod(String),

    /// The given name does not denote a distance metric.
    #[error("unknown distance metric `{0}`")]
    UnknownMetric(String),

    /// No feature was given as a division rule.
    #[error("at least one division rule is required")]
    NoDivisionRules,

    /// No column was given to the homogeneity measure.
    #[error("at least one motivation column is required")]
    NoMotivationColumns,

    /// A referenced column does not exist in the sample.
    #[error("column `{0}` does not exist in the sample")]
    MissingColumn(String),

    /// A tree cannot be built on a sample without rows.
    #[error("the sample has no rows")]
    EmptySample,


    // Reconstruction ----------------------------------------------------
    /// The rows re-derived for a node differ from the encoded count.
    #[error(
        "reconstruction mismatch at node {id:?}: \
         expected {expected} objects, got {actual}"
    )]
    ReconstructionMismatch {
        /// Encoded id of the node, `None` if the node was not numbered.
        id: Option<usize>,
        /// Row count stored in the encoding.
        expected: usize,
        /// Row count derived from the sample.
        actual: usize,
    },

    /// Walking the path of a node id ended at a node with another id.
    #[error("node id mismatch: expected {expected}, reached {actual:?}")]
    NodeIdMismatch {
        /// Requested id.
        expected: usize,
        /// Id of the node actually reached.
        actual: Option<usize>,
    },

    /// The structural encoding is not well-formed.
    #[error("malformed structural encoding: {0}")]
    MalformedEncoding(String),


    // Numbering ---------------------------------------------------------
    /// The tree is too deep: the children of a node
    /// cannot be numbered within `usize`. of a node cannot be numbered within `usize`.
    #[error("the ids of the children of node {0} exceed usize::MAX")]
    NodeIdOverflow(usize),


    // Query -------------------------------------------------------------
    /// The requested id does not belong to any node of the tree.
    #[error("node {0} does not exist in the tree")]
    InvalidNodeId(usize),


    // Boundary ----------------------------------------------------------
    /// I/O failure while reading or writing a file.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// JSON (de)serialization failure.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Failure inside `polars`.
    #[error("polars error: {0}")]
    Polars(#[from] polars::prelude::PolarsError),

    /// A cell of a tabular file is not a number.
    #[error("non-numerical value `{value}` at line {line}")]
    ParseFloat {
        /// Line number (0-indexed, header excluded).
        line: usize,
        /// The offending cell.
        value: String,
    },

    /// A column contains a missing value.
    #[error("column `{0}` contains a null value")]
    NullValue(String),

    /// Columns of a sample do not have the same length.
    #[error("column `{name}` has {got} rows, expected {expected}")]
    ColumnLength {
        /// Column name.
        name: String,
        /// Number of rows of the first column.
        expected: usize,
        /// Number of rows of this column.
        got: usize,
    },
}
