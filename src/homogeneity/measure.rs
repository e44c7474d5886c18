//! The homogeneity measure used to score candidate clusters.
use serde::{Serialize, Deserialize};

use super::{DistanceMethod, Metric};
use crate::Sample;
use crate::error::Result;


/// A homogeneity (cohesion) measure over a subset of rows.
/// Lower values mean more homogeneous subsets.
///
/// Any closure `Fn(&Sample, &[usize]) -> f64 + Sync` is a measure,
/// so that a custom score can be injected into the tree:
/// ```
/// use divclust::{HomogeneityMeasure, Sample};
///
/// let spread = |sample: &Sample, rows: &[usize]| {
///     let x = &sample["x"];
///     let max = rows.iter().map(|&i| x[i]).fold(f64::MIN, f64::max);
///     let min = rows.iter().map(|&i| x[i]).fold(f64::MAX, f64::min);
///     max - min
/// };
/// let sample = Sample::from_columns([("x", vec![1.0, 4.0])]).unwrap();
/// assert_eq!(3.0, spread.homogeneity(&sample, &[0, 1]));
/// ```
pub trait HomogeneityMeasure: Sync {
    /// Returns the score of the rows `rows` of `sample`.
    /// This method is never called with an empty set of rows.
    fn homogeneity(&self, sample: &Sample, rows: &[usize]) -> f64;


    /// Checks that `sample` can be evaluated by this measure.
    /// Called once before a tree is built.
    fn validate(&self, _sample: &Sample) -> Result<()> {
        Ok(())
    }
}


impl<F> HomogeneityMeasure for F
    where F: Fn(&Sample, &[usize]) -> f64 + Sync,
{
    fn homogeneity(&self, sample: &Sample, rows: &[usize]) -> f64 {
        self(sample, rows)
    }
}


/// The standard homogeneity measure:
/// a [`DistanceMethod`] under a [`Metric`],
/// evaluated on the motivation columns.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Homogeneity {
    method: DistanceMethod,
    metric: Metric,
    columns: Vec<String>,
}


impl Homogeneity {
    /// Construct a new instance of [`Homogeneity`].
    pub fn new<S: ToString>(
        method: DistanceMethod,
        metric: Metric,
        columns: &[S],
    ) -> Self
    {
        let columns = columns.iter()
            .map(|col| col.to_string())
            .collect();
        Self { method, metric, columns, }
    }


    /// Returns the distance method.
    pub fn method(&self) -> DistanceMethod {
        self.method
    }


    /// Returns the distance metric.
    pub fn metric(&self) -> Metric {
        self.metric
    }


    /// Returns the motivation columns.
    pub fn columns(&self) -> &[String] {
        &self.columns[..]
    }


    /// Collects the motivation values of `rows`.
    fn points(&self, sample: &Sample, rows: &[usize]) -> Vec<Vec<f64>> {
        let features = self.columns.iter()
            .map(|col| &sample[col])
            .collect::<Vec<_>>();

        rows.iter()
            .map(|&i| {
                features.iter()
                    .map(|feat| feat[i])
                    .collect::<Vec<_>>()
            })
            .collect()
    }
}


impl HomogeneityMeasure for Homogeneity {
    fn homogeneity(&self, sample: &Sample, rows: &[usize]) -> f64 {
        let points = self.points(sample, rows);
        self.method.evaluate(&points, self.metric)
    }


    fn validate(&self, sample: &Sample) -> Result<()> {
        self.columns.iter()
            .try_for_each(|col| sample.try_feature(col).map(|_| ()))
    }
}
