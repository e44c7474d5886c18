use polars::prelude::*;
use std::ops::Index;
use std::slice::Iter;

use crate::constants::BUFFER_SIZE;
use crate::error::{ClusteringError, Result};


/// A named numerical column of a [`Sample`](crate::Sample).
#[derive(Debug, Clone, PartialEq)]
pub struct Feature {
    /// Feature name
    pub name: String,
    /// Feature values, one per row.
    pub sample: Vec<f64>,
}


impl Feature {
    /// Construct an empty feature with `name`.
    pub fn new<T: ToString>(name: T) -> Self {
        Self {
            name: name.to_string(),
            sample: Vec::with_capacity(BUFFER_SIZE),
        }
    }


    /// Construct a feature from its name and values.
    pub fn from_values<T: ToString>(name: T, sample: Vec<f64>) -> Self {
        Self { name: name.to_string(), sample, }
    }


    /// Get the feature name.
    pub fn name(&self) -> &str {
        &self.name
    }


    /// Returns an iterator over feature values.
    pub fn iter(&self) -> Iter<'_, f64> {
        self.sample.iter()
    }


    /// Convert `polars::Series` into [`Feature`].
    /// Integer columns are cast to `f64`.
    /// Returns `Err` if the series contains a null value.
    pub fn from_series(series: &Series) -> Result<Self> {
        let name = series.name().to_string();

        let casted = series.cast(&DataType::Float64)?;
        let sample = casted.f64()?
            .into_iter()
            .collect::<Option<Vec<_>>>()
            .ok_or_else(|| ClusteringError::NullValue(name.clone()))?;

        Ok(Self { name, sample, })
    }


    /// Convert `self` into `polars::Series`.
    pub fn to_series(&self) -> Series {
        Series::new(&self.name, &self.sample[..])
    }


    /// Append an example to this feature.
    pub fn append(&mut self, x: f64) {
        self.sample.push(x);
    }


    /// Returns the number of items in `self.sample`.
    pub fn len(&self) -> usize {
        self.sample.len()
    }


    /// Returns `true` if `self.len()` is equals to `0`.
    pub fn is_empty(&self) -> bool {
        self.sample.is_empty()
    }


    /// Returns the maximal value over the given rows.
    /// Returns `f64::NEG_INFINITY` for an empty set of rows.
    pub fn max_over(&self, rows: &[usize]) -> f64 {
        rows.iter()
            .map(|&i| self.sample[i])
            .fold(f64::NEG_INFINITY, f64::max)
    }


    /// Returns a new feature that keeps the given rows in the given order.
    pub(crate) fn take(&self, rows: &[usize]) -> Self {
        let sample = rows.iter()
            .map(|&i| self.sample[i])
            .collect();
        Self { name: self.name.clone(), sample, }
    }
}


impl Index<usize> for Feature {
    type Output = f64;
    fn index(&self, idx: usize) -> &Self::Output {
        &self.sample[idx]
    }
}
