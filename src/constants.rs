//! Default parameters shared by the crate.
use crate::homogeneity::{DistanceMethod, Metric};

/// Initial capacity of a feature read from a file.
pub const BUFFER_SIZE: usize = 256;

/// Distance method used when none is specified.
pub const DEFAULT_DISTANCE_METHOD: DistanceMethod = DistanceMethod::MeanGroup;
/// Distance metric used when none is specified.
pub const DEFAULT_METRIC:          Metric         = Metric::Euclidean;

/// Column widths used by the tree summary table.
pub const PRINT_WIDTH:      usize =  8;
/// Precision of floating values in the tree summary table.
pub const PRINT_PREC_WIDTH: usize =  5;
/// Width of the tree summary table.
pub const FULL_WIDTH:       usize = 72;
