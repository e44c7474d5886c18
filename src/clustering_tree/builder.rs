use crate::{
    DistanceMethod,
    Metric,
    Homogeneity,
    HomogeneityMeasure,
};
use crate::constants::{DEFAULT_DISTANCE_METHOD, DEFAULT_METRIC};
use crate::error::{ClusteringError, Result};
use super::{
    depth::Depth,
    dctree::DivisionClusteringTree,
};


/// A struct that builds [`DivisionClusteringTree`].
/// `DivisionClusteringTreeBuilder` keeps parameters
/// for constructing [`DivisionClusteringTree`].
///
/// # Example
///
/// ```
/// use divclust::prelude::*;
///
/// let tree = DivisionClusteringTreeBuilder::new()
///     .division_rules(&["f"])
///     .motivation_columns(&["f"])
///     .min_size(1)
///     .distance_method_name("wards_distance").unwrap()
///     .build()
///     .unwrap();
/// ```
#[derive(Debug, Clone)]
pub struct DivisionClusteringTreeBuilder {
    division_rules:     Vec<String>,
    motivation_columns: Vec<String>,
    max_depth:          Option<Depth>,
    min_size:           Option<usize>,
    distance_method:    DistanceMethod,
    metric:             Metric,
}


impl Default for DivisionClusteringTreeBuilder {
    fn default() -> Self {
        Self::new()
    }
}


impl DivisionClusteringTreeBuilder {
    /// Construct a new instance of [`DivisionClusteringTreeBuilder`].
    /// By default, [`DivisionClusteringTreeBuilder`] sets
    /// the parameters as follows;
    /// ```text
    /// max_depth: unlimited,
    /// min_size: none,
    /// distance_method: DistanceMethod::MeanGroup,
    /// metric: Metric::Euclidean,
    /// ```
    /// The division rules and the motivation columns
    /// have no default and must be set.
    pub fn new() -> Self {
        Self {
            division_rules:     Vec::new(),
            motivation_columns: Vec::new(),
            max_depth:          None,
            min_size:           None,
            distance_method:    DEFAULT_DISTANCE_METHOD,
            metric:             DEFAULT_METRIC,
        }
    }


    /// Set the candidate features.
    /// The features are tried in the given order and
    /// the first one wins ties.
    pub fn division_rules<S: ToString>(mut self, rules: &[S]) -> Self {
        self.division_rules = rules.iter()
            .map(|rule| rule.to_string())
            .collect();
        self
    }


    /// Set the columns used by the homogeneity measure.
    pub fn motivation_columns<S: ToString>(mut self, columns: &[S]) -> Self {
        self.motivation_columns = columns.iter()
            .map(|col| col.to_string())
            .collect();
        self
    }


    /// Specify the maximal depth of the tree.
    /// Nodes at this depth are leaves; `0` yields a single leaf.
    /// By default the depth is unlimited.
    pub fn max_depth(mut self, depth: usize) -> Self {
        self.max_depth = Some(Depth::from(depth));
        self
    }


    /// Remove the depth limit.
    pub fn unlimited_depth(mut self) -> Self {
        self.max_depth = None;
        self
    }


    /// Nodes with at most `size` rows are leaves.
    pub fn min_size(mut self, size: usize) -> Self {
        self.min_size = Some(size);
        self
    }


    /// Set the distance method.
    /// Default value is `DistanceMethod::MeanGroup`.
    pub fn distance_method(mut self, method: DistanceMethod) -> Self {
        self.distance_method = method;
        self
    }


    /// Set the distance method by its name,
    /// e.g. `"nearest_neighbor_distance"`.
    /// Returns `Err` for an unknown name.
    pub fn distance_method_name(self, name: &str) -> Result<Self> {
        let method = name.parse::<DistanceMethod>()?;
        Ok(self.distance_method(method))
    }


    /// Set the distance metric.
    /// Default value is `Metric::Euclidean`.
    pub fn metric(mut self, metric: Metric) -> Self {
        self.metric = metric;
        self
    }


    /// Set the distance metric by its name, e.g. `"cityblock"`.
    /// Returns `Err` for an unknown name.
    pub fn metric_name(self, name: &str) -> Result<Self> {
        let metric = name.parse::<Metric>()?;
        Ok(self.metric(metric))
    }


    /// Build a [`DivisionClusteringTree`] with the standard measure
    /// [`Homogeneity`].
    /// This method consumes `self`.
    pub fn build(self) -> Result<DivisionClusteringTree<Homogeneity>> {
        if self.motivation_columns.is_empty() {
            return Err(ClusteringError::NoMotivationColumns);
        }
        let measure = Homogeneity::new(
            self.distance_method,
            self.metric,
            &self.motivation_columns[..],
        );
        self.build_with(measure)
    }


    /// Build a [`DivisionClusteringTree`] with the given measure.
    /// The distance method, the metric, and the motivation columns
    /// are ignored.
    pub fn build_with<H>(self, measure: H)
        -> Result<DivisionClusteringTree<H>>
        where H: HomogeneityMeasure,
    {
        if self.division_rules.is_empty() {
            return Err(ClusteringError::NoDivisionRules);
        }

        let tree = DivisionClusteringTree::new(
            self.division_rules,
            measure,
            self.max_depth,
            self.min_size,
        );
        Ok(tree)
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let builder = DivisionClusteringTreeBuilder::new();
        assert_eq!(None, builder.max_depth);
        assert_eq!(None, builder.min_size);
        assert_eq!(DistanceMethod::MeanGroup, builder.distance_method);
        assert_eq!(Metric::Euclidean, builder.metric);
    }

    #[test]
    fn test_unknown_method_fails_fast() {
        let res = DivisionClusteringTreeBuilder::new()
            .distance_method_name("median_distance");
        assert!(matches!(res, Err(ClusteringError::UnknownDistanceMethod(_))));
    }

    #[test]
    fn test_unknown_metric_fails_fast() {
        let res = DivisionClusteringTreeBuilder::new()
            .metric_name("mahalanobis");
        assert!(matches!(res, Err(ClusteringError::UnknownMetric(_))));
    }

    #[test]
    fn test_missing_rules() {
        let res = DivisionClusteringTreeBuilder::new()
            .motivation_columns(&["m"])
            .build();
        assert!(matches!(res, Err(ClusteringError::NoDivisionRules)));
    }

    #[test]
    fn test_missing_motivations() {
        let res = DivisionClusteringTreeBuilder::new()
            .division_rules(&["f"])
            .build();
        assert!(matches!(res, Err(ClusteringError::NoMotivationColumns)));
    }

    #[test]
    fn test_build() {
        let tree = DivisionClusteringTreeBuilder::new()
            .division_rules(&["f", "g"])
            .motivation_columns(&["m"])
            .metric(Metric::Cityblock)
            .distance_method(DistanceMethod::Centroid)
            .build()
            .unwrap();
        assert_eq!(&["f".to_string(), "g".to_string()], tree.division_rules());
        assert_eq!(Metric::Cityblock, tree.measure().metric());
        assert_eq!(DistanceMethod::Centroid, tree.measure().method());
        assert_eq!(&["m".to_string()], tree.measure().columns());
    }

    #[test]
    fn test_unlimited_depth_resets() {
        let builder = DivisionClusteringTreeBuilder::new()
            .max_depth(3)
            .unlimited_depth();
        assert_eq!(None, builder.max_depth);
    }
}
