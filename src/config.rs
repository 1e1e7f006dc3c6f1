use crate::error::{Result, SlideSplitError};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const DEFAULT_CONFIG_FILE: &str = "slidesplit.toml";

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub source: SourceConfig,
    #[serde(default)]
    pub markers: MarkerConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct SourceConfig {
    pub input: PathBuf,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct MarkerConfig {
    pub begin: String,
    pub end: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct OutputConfig {
    pub directory: PathBuf,
    pub prefix: String,
    pub extension: String,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            input: PathBuf::from("tikz-pgfplots.tex"),
        }
    }
}

impl Default for MarkerConfig {
    fn default() -> Self {
        Self {
            begin: r"\begin{frame}".to_string(),
            end: r"\end{frame}".to_string(),
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            directory: PathBuf::from("slides"),
            prefix: "slide".to_string(),
            extension: ".tex".to_string(),
        }
    }
}

impl Config {
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        if !path.exists() {
            return Err(SlideSplitError::Config {
                message: format!("Configuration file not found: {}", path.display()),
            });
        }

        let content = std::fs::read_to_string(path).map_err(|e| SlideSplitError::Config {
            message: format!("Failed to read config file {}: {}", path.display(), e),
        })?;

        let config: Config = toml::from_str(&content).map_err(|e| SlideSplitError::Config {
            message: format!("Failed to parse config file {}: {}", path.display(), e),
        })?;

        Ok(config)
    }

    pub fn load_with_defaults<P: AsRef<Path>>(config_path: Option<P>) -> Result<Self> {
        match config_path {
            Some(path) => Self::load_from_file(path),
            None => {
                let default_paths = [DEFAULT_CONFIG_FILE, ".slidesplit.toml"];

                for default_path in &default_paths {
                    if Path::new(default_path).exists() {
                        tracing::debug!(path = default_path, "using config file");
                        return Self::load_from_file(default_path);
                    }
                }

                Ok(Self::default())
            }
        }
    }

    pub fn merge_with_cli_args(&mut self, cli_args: &CliOverrides) {
        if let Some(ref input) = cli_args.input {
            self.source.input = input.clone();
        }

        if let Some(ref directory) = cli_args.output_dir {
            self.output.directory = directory.clone();
        }

        if let Some(ref prefix) = cli_args.prefix {
            self.output.prefix = prefix.clone();
        }

        if let Some(ref extension) = cli_args.extension {
            self.output.extension = extension.clone();
        }

        if let Some(ref begin) = cli_args.begin_marker {
            self.markers.begin = begin.clone();
        }

        if let Some(ref end) = cli_args.end_marker {
            self.markers.end = end.clone();
        }
    }

    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let content = toml::to_string_pretty(self).map_err(|e| SlideSplitError::Config {
            message: format!("Failed to serialize config: {}", e),
        })?;

        std::fs::write(path, content).map_err(|e| SlideSplitError::Config {
            message: format!("Failed to write config file {}: {}", path.display(), e),
        })?;

        Ok(())
    }

    pub fn validate(&self) -> Result<()> {
        if self.source.input.as_os_str().is_empty() {
            return Err(SlideSplitError::Config {
                message: "Source document path must not be empty".to_string(),
            });
        }

        if self.markers.begin.is_empty() || self.markers.end.is_empty() {
            return Err(SlideSplitError::Config {
                message: "Begin and end markers must both be non-empty".to_string(),
            });
        }

        if self.output.directory.as_os_str().is_empty() {
            return Err(SlideSplitError::Config {
                message: "Output directory must not be empty".to_string(),
            });
        }

        // Prefix and extension are spliced into a bare file name.
        if self.output.prefix.contains(['/', '\\']) {
            return Err(SlideSplitError::Config {
                message: format!(
                    "File prefix must not contain path separators: {}",
                    self.output.prefix
                ),
            });
        }

        if !self.output.extension.is_empty() {
            if !self.output.extension.starts_with('.') {
                return Err(SlideSplitError::Config {
                    message: format!(
                        "File extension must start with a dot: {}",
                        self.output.extension
                    ),
                });
            }
            if self.output.extension.contains(['/', '\\']) {
                return Err(SlideSplitError::Config {
                    message: format!(
                        "File extension must not contain path separators: {}",
                        self.output.extension
                    ),
                });
            }
        }

        Ok(())
    }

    pub fn create_sample_config() -> String {
        let sample_config = Self::default();
        toml::to_string_pretty(&sample_config).unwrap_or_else(|_| String::new())
    }
}

#[derive(Debug, Default)]
pub struct CliOverrides {
    pub input: Option<PathBuf>,
    pub output_dir: Option<PathBuf>,
    pub prefix: Option<String>,
    pub extension: Option<String>,
    pub begin_marker: Option<String>,
    pub end_marker: Option<String>,
}

impl CliOverrides {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_input(mut self, input: Option<PathBuf>) -> Self {
        self.input = input;
        self
    }

    pub fn with_output_dir(mut self, output_dir: Option<PathBuf>) -> Self {
        self.output_dir = output_dir;
        self
    }

    pub fn with_prefix(mut self, prefix: Option<String>) -> Self {
        self.prefix = prefix;
        self
    }

    pub fn with_extension(mut self, extension: Option<String>) -> Self {
        self.extension = extension;
        self
    }

    pub fn with_begin_marker(mut self, begin: Option<String>) -> Self {
        self.begin_marker = begin;
        self
    }

    pub fn with_end_marker(mut self, end: Option<String>) -> Self {
        self.end_marker = end;
        self
    }
}
