//! This file defines division rules for clustering tree.
use serde::{Serialize, Deserialize};

use std::fmt;
use std::str::FromStr;

use crate::Sample;
use crate::error::ClusteringError;


/// Separator between the feature name and the threshold in a rule label.
const RULE_SEPARATOR: &str = " >";


/// The side of a [`DivisionRule`] a row falls on,
/// also a step on the path from the root to a node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LeftRight {
    /// The row satisfies `value <= threshold`.
    Left,
    /// The row satisfies `value > threshold`.
    Right,
}


/// A feature name and an integer threshold.
/// Rows with `feature > threshold` go to the right child,
/// the others go to the left child.
///
/// The label of a rule is `"<feature> ><threshold>"`, e.g. `"age >30"`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DivisionRule {
    pub(crate) feature: String,
    pub(crate) threshold: i64,
}


impl DivisionRule {
    /// Construct a new rule.
    #[inline]
    pub fn new<S: ToString>(feature: S, threshold: i64) -> Self {
        let feature = feature.to_string();
        Self { feature, threshold, }
    }


    /// Returns the feature name.
    pub fn feature(&self) -> &str {
        &self.feature
    }


    /// Returns the threshold.
    pub fn threshold(&self) -> i64 {
        self.threshold
    }


    /// Decides on which side a value falls.
    #[inline]
    pub fn side(&self, value: f64) -> LeftRight {
        if value > self.threshold as f64 {
            LeftRight::Right
        } else {
            LeftRight::Left
        }
    }


    /// Partitions `rows` into `(left, right)`,
    /// keeping the order of `rows` in both parts.
    pub fn partition(&self, sample: &Sample, rows: &[usize])
        -> Result<(Vec<usize>, Vec<usize>), ClusteringError>
    {
        let feature = sample.try_feature(&self.feature)?;
        let (left, right) = rows.iter()
            .copied()
            .partition(|&i| self.side(feature[i]) == LeftRight::Left);
        Ok((left, right))
    }
}


impl fmt::Display for DivisionRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{RULE_SEPARATOR}{}", self.feature, self.threshold)
    }
}


impl FromStr for DivisionRule {
    type Err = ClusteringError;
    fn from_str(label: &str) -> Result<Self, Self::Err> {
        let malformed = || {
            let msg = format!("`{label}` is not a division rule");
            ClusteringError::MalformedEncoding(msg)
        };

        let (feature, threshold) = label.rsplit_once(RULE_SEPARATOR)
            .ok_or_else(malformed)?;
        let threshold = threshold.trim()
            .parse::<i64>()
            .map_err(|_| malformed())?;

        Ok(Self::new(feature, threshold))
    }
}
