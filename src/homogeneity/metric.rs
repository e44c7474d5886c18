//! Distance metrics between two rows.
use serde::{Serialize, Deserialize};

use std::fmt;
use std::str::FromStr;

use crate::error::ClusteringError;


/// Distance metric between two points.
/// The names accepted by [`FromStr`] are
/// `euclidean`, `sqeuclidean`, `cityblock`, `chebyshev`, and `cosine`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Metric {
    /// `sqrt(sum (x - y)^2)`
    Euclidean,
    /// `sum (x - y)^2`
    SquaredEuclidean,
    /// `sum |x - y|`
    Cityblock,
    /// `max |x - y|`
    Chebyshev,
    /// `1 - <x, y> / (|x| |y|)`.
    /// Two points with a zero norm are at distance `0` if they are
    /// equal and `1` otherwise.
    Cosine,
}


impl Metric {
    /// Returns the name accepted by `Metric::from_str`.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Euclidean        => "euclidean",
            Self::SquaredEuclidean => "sqeuclidean",
            Self::Cityblock        => "cityblock",
            Self::Chebyshev        => "chebyshev",
            Self::Cosine           => "cosine",
        }
    }


    /// Computes the distance between `x` and `y`.
    #[inline]
    pub fn distance(&self, x: &[f64], y: &[f64]) -> f64 {
        debug_assert_eq!(x.len(), y.len());
        let diffs = x.iter().zip(y).map(|(a, b)| a - b);
        match self {
            Self::Euclidean => {
                diffs.map(|d| d * d).sum::<f64>().sqrt()
            },
            Self::SquaredEuclidean => {
                diffs.map(|d| d * d).sum::<f64>()
            },
            Self::Cityblock => {
                diffs.map(f64::abs).sum::<f64>()
            },
            Self::Chebyshev => {
                diffs.map(f64::abs).fold(0f64, f64::max)
            },
            Self::Cosine => cosine_distance(x, y),
        }
    }
}


fn cosine_distance(x: &[f64], y: &[f64]) -> f64 {
    let dot = x.iter().zip(y).map(|(a, b)| a * b).sum::<f64>();
    let nx = x.iter().map(|a| a * a).sum::<f64>().sqrt();
    let ny = y.iter().map(|b| b * b).sum::<f64>().sqrt();

    if nx == 0f64 || ny == 0f64 {
        return if x == y { 0f64 } else { 1f64 };
    }
    (1f64 - dot / (nx * ny)).max(0f64)
}


impl FromStr for Metric {
    type Err = ClusteringError;
    fn from_str(name: &str) -> Result<Self, Self::Err> {
        let metric = match name {
            "euclidean"   => Self::Euclidean,
            "sqeuclidean" => Self::SquaredEuclidean,
            "cityblock"   => Self::Cityblock,
            "chebyshev"   => Self::Chebyshev,
            "cosine"      => Self::Cosine,
            _ => {
                return Err(ClusteringError::UnknownMetric(name.to_string()));
            },
        };
        Ok(metric)
    }
}


impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}
