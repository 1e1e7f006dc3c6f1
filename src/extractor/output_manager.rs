use crate::config::OutputConfig;
use crate::error::{Result, SlideSplitError};
use std::fs;
use std::path::{Path, PathBuf};

/// Narrowest zero-padding ever used for unit numbers.
pub const MIN_INDEX_WIDTH: usize = 2;

/// File naming scheme: `{prefix}{index}{extension}`.
///
/// Indices are zero-padded to two digits, widened to the digit count of the
/// total once there are 100 or more units so names still sort in order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnitNaming {
    prefix: String,
    extension: String,
    width: usize,
}

impl UnitNaming {
    pub fn new<P: Into<String>, E: Into<String>>(prefix: P, extension: E, total: usize) -> Self {
        Self {
            prefix: prefix.into(),
            extension: extension.into(),
            width: index_width(total),
        }
    }

    pub fn file_name(&self, index: usize) -> String {
        format!(
            "{}{:0width$}{}",
            self.prefix,
            index,
            self.extension,
            width = self.width
        )
    }
}

pub fn index_width(total: usize) -> usize {
    let digits = total.checked_ilog10().map_or(1, |d| d as usize + 1);
    digits.max(MIN_INDEX_WIDTH)
}

/// Owns the output directory and the names of files placed in it.
pub struct OutputManager {
    output_directory: PathBuf,
    prefix: String,
    extension: String,
}

impl OutputManager {
    pub fn new<P: Into<PathBuf>>(output_directory: P) -> Self {
        let defaults = OutputConfig::default();
        Self {
            output_directory: output_directory.into(),
            prefix: defaults.prefix,
            extension: defaults.extension,
        }
    }

    pub fn from_config(config: &OutputConfig) -> Self {
        Self {
            output_directory: config.directory.clone(),
            prefix: config.prefix.clone(),
            extension: config.extension.clone(),
        }
    }

    pub fn with_prefix<S: Into<String>>(mut self, prefix: S) -> Self {
        self.prefix = prefix.into();
        self
    }

    /// Creates the directory and any missing parents.
    ///
    /// Existing directories, including non-empty ones, are left as they are.
    pub fn initialize(&self) -> Result<()> {
        if self.output_directory.exists() && !self.output_directory.is_dir() {
            return Err(SlideSplitError::Io(std::io::Error::new(
                std::io::ErrorKind::AlreadyExists,
                format!(
                    "Output path exists and is not a directory: {}",
                    self.output_directory.display()
                ),
            )));
        }

        fs::create_dir_all(&self.output_directory).map_err(SlideSplitError::Io)?;
        tracing::debug!(path = %self.output_directory.display(), "output directory ready");

        Ok(())
    }

    pub fn get_output_directory(&self) -> &Path {
        &self.output_directory
    }

    pub fn naming(&self, total: usize) -> UnitNaming {
        UnitNaming::new(self.prefix.clone(), self.extension.clone(), total)
    }

    pub fn unit_path(&self, naming: &UnitNaming, index: usize) -> PathBuf {
        self.output_directory.join(naming.file_name(index))
    }
}
