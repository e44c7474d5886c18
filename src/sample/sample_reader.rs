use std::path::Path;

use super::sample_struct::Sample;
use crate::error::{ClusteringError, Result};


/// A struct that returns [`Sample`].
/// Using this struct, one can read a CSV file to [`Sample`].
/// # Example
/// ```no_run
/// use divclust::SampleReader;
/// let filename = "/path/to/csv/file.csv";
/// let sample = SampleReader::default()
///     .file(filename)
///     .has_header(true)
///     .read()
///     .unwrap();
/// ```
pub struct SampleReader<P> {
    file: Option<P>,
    has_header: bool,
}


impl<P> Default for SampleReader<P> {
    fn default() -> Self {
        Self { file: None, has_header: false, }
    }
}


impl<P> SampleReader<P> {
    /// Set the flag whether the file has the header row or not.
    /// Default is `false.`
    pub fn has_header(mut self, flag: bool) -> Self {
        self.has_header = flag;
        self
    }
}


impl<P> SampleReader<P>
    where P: AsRef<Path>
{
    /// Set the file name.
    pub fn file(mut self, file: P) -> Self {
        self.file = Some(file);
        self
    }


    /// Reads the file based on the arguments,
    /// and returns [`Sample`].
    /// This method consumes `self.`
    pub fn read(self) -> Result<Sample> {
        let file = self.file
            .ok_or_else(|| {
                let msg = "the file name for csv is not set";
                ClusteringError::Io(
                    std::io::Error::new(std::io::ErrorKind::InvalidInput, msg)
                )
            })?;
        Sample::from_csv(file, self.has_header)
    }
}
