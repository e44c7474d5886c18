use std::path::Path;
use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Read, Write};
use std::collections::HashMap;
use std::ops::Index;

use polars::prelude::*;
use rayon::prelude::*;

use super::feature_struct::*;
use crate::error::{ClusteringError, Result};


/// Struct `Sample` holds a tabular dataset.
/// Each column is a named numerical [`Feature`] and
/// all columns share the same number of rows.
///
/// Subsets of a sample are represented by
/// the ordered list of their row indices;
/// a `Sample` itself is never modified while a tree is built.
#[derive(Debug, Clone, PartialEq)]
pub struct Sample {
    pub(super) name_to_index: HashMap<String, usize>,
    pub(super) features: Vec<Feature>,
    pub(super) n_sample: usize,
    pub(super) n_feature: usize,
}


impl Sample {
    /// Construct a sample from features.
    /// Returns `Err` if the features do not have the same length.
    pub fn from_features(features: Vec<Feature>) -> Result<Self> {
        let n_sample = features.first()
            .map(|feat| feat.len())
            .unwrap_or(0);

        if let Some(feat) = features.iter().find(|f| f.len() != n_sample) {
            return Err(ClusteringError::ColumnLength {
                name: feat.name().to_string(),
                expected: n_sample,
                got: feat.len(),
            });
        }

        let n_feature = features.len();
        let name_to_index = index_names(&features);

        Ok(Self { name_to_index, features, n_sample, n_feature, })
    }


    /// Construct a sample from pairs of column name and values.
    pub fn from_columns<S, I>(columns: I) -> Result<Self>
        where S: ToString,
              I: IntoIterator<Item = (S, Vec<f64>)>,
    {
        let features = columns.into_iter()
            .map(|(name, values)| Feature::from_values(name, values))
            .collect::<Vec<_>>();
        Self::from_features(features)
    }


    /// Convert `polars::DataFrame` into `Sample`.
    /// Every column is cast to `f64`.
    pub fn from_dataframe(data: &DataFrame) -> Result<Self> {
        let features = data.get_columns()
            .par_iter()
            .map(Feature::from_series)
            .collect::<Result<Vec<_>>>()?;

        Self::from_features(features)
    }


    /// Convert `self` into `polars::DataFrame`.
    pub fn to_dataframe(&self) -> Result<DataFrame> {
        let columns = self.features.iter()
            .map(|feat| feat.to_series())
            .collect::<Vec<_>>();
        let df = DataFrame::new(columns)?;
        Ok(df)
    }


    /// Read a CSV format file to [`Sample`] type.
    /// This method returns `Err` if the file does not exist.
    ///
    /// If the CSV file does not have the header row,
    /// this method assigns a default name for each column:
    /// `Feat. [1]`, `Feat. [2]`, ..., `Feat. [n]`.
    pub(crate) fn from_csv<P>(file: P, has_header: bool) -> Result<Self>
        where P: AsRef<Path>,
    {
        let file = File::open(file)?;
        let reader = BufReader::new(file);
        Self::from_reader(reader, has_header)
    }


    /// Read a CSV from [`BufReader`].
    pub fn from_reader<R>(reader: BufReader<R>, has_header: bool)
        -> Result<Self>
        where R: Read,
    {
        let mut lines = reader.lines();

        let mut features = Vec::new();
        if has_header {
            if let Some(line) = lines.next() {
                features = line?.split(',')
                    .map(|name| Feature::new(name.trim()))
                    .collect::<Vec<_>>();
            }
        }

        for (i, line) in lines.enumerate() {
            let line = line?;
            if line.trim().is_empty() { continue; }

            let xs = line.split(',')
                .map(|x| {
                    x.trim().parse::<f64>()
                        .map_err(|_| ClusteringError::ParseFloat {
                            line: i,
                            value: x.to_string(),
                        })
                })
                .collect::<Result<Vec<_>>>()?;

            // If the header does not exist,
            // construct a dummy header.
            if features.is_empty() {
                features = (1..=xs.len())
                    .map(|k| Feature::new(format!("Feat. [{k}]")))
                    .collect::<Vec<_>>();
            }

            if xs.len() != features.len() {
                return Err(ClusteringError::ColumnLength {
                    name: format!("line {i}"),
                    expected: features.len(),
                    got: xs.len(),
                });
            }

            features.iter_mut()
                .zip(xs)
                .for_each(|(feat, x)| { feat.append(x); });
        }

        Self::from_features(features)
    }


    /// Write `self` as CSV to `writer`.
    /// The header row is included,
    /// columns keep their order, and no row index is written.
    pub fn to_csv_writer<W: Write>(&self, writer: W) -> Result<()> {
        let mut writer = BufWriter::new(writer);

        let header = self.features.iter()
            .map(|feat| feat.name())
            .collect::<Vec<_>>()
            .join(",");
        writeln!(writer, "{header}")?;

        for row in 0..self.n_sample {
            let line = self.features.iter()
                .map(|feat| feat[row].to_string())
                .collect::<Vec<_>>()
                .join(",");
            writeln!(writer, "{line}")?;
        }
        writer.flush()?;
        Ok(())
    }


    /// Write `self` to the CSV file `path`.
    pub fn to_csv<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let file = File::create(path)?;
        self.to_csv_writer(file)
    }


    /// Returns a slice of type `Feature`.
    pub fn features(&self) -> &[Feature] {
        &self.features[..]
    }


    /// Returns the pair of the number of examples and
    /// the number of features
    pub fn shape(&self) -> (usize, usize) {
        (self.n_sample, self.n_feature)
    }


    /// Returns the feature named `name`, if any.
    pub fn feature<S: AsRef<str>>(&self, name: S) -> Option<&Feature> {
        self.name_to_index.get(name.as_ref())
            .map(|&k| &self.features[k])
    }


    /// Returns the feature named `name` or
    /// [`ClusteringError::MissingColumn`].
    pub fn try_feature<S: AsRef<str>>(&self, name: S) -> Result<&Feature> {
        let name = name.as_ref();
        self.feature(name)
            .ok_or_else(|| ClusteringError::MissingColumn(name.to_string()))
    }


    /// Returns the `idx`-th row.
    pub fn at(&self, idx: usize) -> Vec<f64> {
        self.features.iter()
            .map(|feat| feat[idx])
            .collect::<Vec<f64>>()
    }


    /// Returns the rows at `rows` as a new `Sample`.
    /// The rows keep the given order and
    /// the columns keep the order of `self`.
    pub fn subset(&self, rows: &[usize]) -> Self {
        let features = self.features.iter()
            .map(|feat| feat.take(rows))
            .collect::<Vec<_>>();

        Self {
            name_to_index: self.name_to_index.clone(),
            features,
            n_sample: rows.len(),
            n_feature: self.n_feature,
        }
    }
}


fn index_names(features: &[Feature]) -> HashMap<String, usize> {
    features.iter()
        .enumerate()
        .map(|(i, f)| (f.name().to_string(), i))
        .collect::<HashMap<_, _>>()
}


impl<S> Index<S> for Sample
    where S: AsRef<str>
{
    type Output = Feature;


    fn index(&self, name: S) -> &Self::Output {
        let name: &str = name.as_ref();
        let k = *self.name_to_index.get(name)
            .unwrap_or_else(|| panic!("The feature `{name}` does not exist"));
        &self.features[k]
    }
}
