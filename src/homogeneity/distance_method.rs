//! Cluster-level distance methods.
//! Each method maps a set of points to a non-negative cohesion score;
//! the lower the score, the more homogeneous the cluster.
use serde::{Serialize, Deserialize};

use std::fmt;
use std::str::FromStr;

use super::metric::Metric;
use crate::error::ClusteringError;


/// Distance methods that evaluate the homogeneity of a cluster.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DistanceMethod {
    /// The smallest positive pairwise distance.
    /// The score is `0` if two points coincide
    /// or if all points coincide.
    NearestNeighbor,
    /// The largest pairwise distance.
    FarthestNeighbor,
    /// The mean over all pairwise distances, self-pairs included.
    MeanGroup,
    /// `n / 2` times the centroid distance.
    Wards,
    /// The sum of the distances from each point to the centroid.
    Centroid,
}


impl DistanceMethod {
    /// Returns the name accepted by `DistanceMethod::from_str`.
    pub fn name(&self) -> &'static str {
        match self {
            Self::NearestNeighbor  => "nearest_neighbor_distance",
            Self::FarthestNeighbor => "most_distance_neighbor_distance",
            Self::MeanGroup        => "mean_group_distance",
            Self::Wards            => "wards_distance",
            Self::Centroid         => "distance_centroid",
        }
    }


    /// Computes the score of the cluster `points` under `metric`.
    /// `points` must not be empty.
    pub fn evaluate(&self, points: &[Vec<f64>], metric: Metric) -> f64 {
        assert!(!points.is_empty(), "tried to evaluate an empty cluster");
        match self {
            Self::NearestNeighbor  => nearest_neighbor(points, metric),
            Self::FarthestNeighbor => farthest_neighbor(points, metric),
            Self::MeanGroup        => mean_group(points, metric),
            Self::Wards => {
                let coef = points.len() as f64 / 2f64;
                coef * centroid_distance(points, metric)
            },
            Self::Centroid => centroid_distance(points, metric),
        }
    }
}


/// Returns the pairwise distance matrix of `points`, row by row.
/// Runs on the calling thread.
fn pairwise(points: &[Vec<f64>], metric: Metric) -> Vec<Vec<f64>> {
    points.iter()
        .map(|x| {
            points.iter()
                .map(|y| metric.distance(x, y))
                .collect::<Vec<_>>()
        })
        .collect()
}


fn nearest_neighbor(points: &[Vec<f64>], metric: Metric) -> f64 {
    let n_points = points.len();
    let dists = pairwise(points, metric);

    let mut n_zeros = 0_usize;
    let mut min_positive = f64::INFINITY;
    for d in dists.into_iter().flatten() {
        if d == 0f64 {
            n_zeros += 1;
        } else if d > 0f64 && d < min_positive {
            min_positive = d;
        }
    }

    // All points coincide.
    if min_positive.is_infinite() { return 0f64; }

    // The diagonal contributes `n_points` zeros;
    // more zeros mean that two distinct rows coincide.
    if n_zeros <= n_points { min_positive } else { 0f64 }
}


fn farthest_neighbor(points: &[Vec<f64>], metric: Metric) -> f64 {
    pairwise(points, metric)
        .into_iter()
        .flatten()
        .fold(0f64, f64::max)
}


fn mean_group(points: &[Vec<f64>], metric: Metric) -> f64 {
    let n_points = points.len() as f64;
    // Row means first, then their mean.
    let row_means = pairwise(points, metric)
        .into_iter()
        .map(|row| row.into_iter().sum::<f64>() / n_points)
        .collect::<Vec<_>>();
    row_means.into_iter().sum::<f64>() / n_points
}


fn centroid_distance(points: &[Vec<f64>], metric: Metric) -> f64 {
    let center = centroid(points);
    points.iter()
        .map(|x| metric.distance(x, &center))
        .sum::<f64>()
}


/// Returns the coordinate-wise mean of `points`.
pub(crate) fn centroid(points: &[Vec<f64>]) -> Vec<f64> {
    let n_points = points.len() as f64;
    let dim = points[0].len();

    let mut center = vec![0f64; dim];
    for x in points {
        center.iter_mut()
            .zip(x)
            .for_each(|(c, xi)| { *c += xi; });
    }
    center.iter_mut().for_each(|c| { *c /= n_points; });
    center
}


impl FromStr for DistanceMethod {
    type Err = ClusteringError;
    fn from_str(name: &str) -> Result<Self, Self::Err> {
        let method = match name {
            "nearest_neighbor_distance"       => Self::NearestNeighbor,
            "most_distance_neighbor_distance" => Self::FarthestNeighbor,
            "mean_group_distance"             => Self::MeanGroup,
            "wards_distance"                  => Self::Wards,
            "distance_centroid"               => Self::Centroid,
            _ => {
                let name = name.to_string();
                return Err(ClusteringError::UnknownDistanceMethod(name));
            },
        };
        Ok(method)
    }
}


impl fmt::Display for DistanceMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}
