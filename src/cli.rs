use crate::config::{CliOverrides, Config};
use crate::error::Result;
use clap::{Parser, ValueEnum};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "slidesplit")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Split a presentation source into one numbered file per slide")]
#[command(
    long_about = "SlideSplit reads a single presentation source, finds every block between a \
                  begin marker and the next end marker, and writes each block to its own \
                  numbered file. With no arguments it reads tikz-pgfplots.tex and writes \
                  slides/slide01.tex, slides/slide02.tex, ..."
)]
#[command(after_help = "EXAMPLES:\n  \
    slidesplit\n  \
    slidesplit talk.tex --output talk-slides\n  \
    slidesplit notes.md --begin '<!-- slide -->' --end '<!-- /slide -->' --extension .md\n  \
    slidesplit --config deck.toml --dry-run")]
pub struct Cli {
    /// Source document (defaults to tikz-pgfplots.tex)
    pub input: Option<PathBuf>,

    /// Output directory (defaults to slides)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// File name prefix for each slide
    #[arg(long)]
    pub prefix: Option<String>,

    /// File extension for each slide, including the dot
    #[arg(long, allow_hyphen_values = true)]
    pub extension: Option<String>,

    /// Literal text that opens a slide
    #[arg(long, allow_hyphen_values = true)]
    pub begin: Option<String>,

    /// Literal text that closes a slide
    #[arg(long, allow_hyphen_values = true)]
    pub end: Option<String>,

    /// Configuration file path
    #[arg(short, long, help = "Path to TOML configuration file")]
    pub config: Option<PathBuf>,

    /// Output format for results
    #[arg(long, value_enum, default_value_t = OutputFormat::Human)]
    pub output_format: OutputFormat,

    /// Verbose output level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Quiet mode (suppress non-essential output)
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Dry run (show what would be done without executing)
    #[arg(long, help = "List the files that would be written without writing them")]
    pub dry_run: bool,

    /// Generate sample configuration file
    #[arg(long, help = "Generate a sample configuration file")]
    pub generate_config: bool,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable colored output
    Human,
    /// JSON formatted output
    Json,
    /// Plain text output
    Plain,
}

impl Cli {
    pub fn load_config(&self) -> Result<Config> {
        let mut config = Config::load_with_defaults(self.config.as_ref())?;

        let overrides = self.create_cli_overrides();
        config.merge_with_cli_args(&overrides);
        config.validate()?;

        Ok(config)
    }

    pub fn create_cli_overrides(&self) -> CliOverrides {
        CliOverrides::new()
            .with_input(self.input.clone())
            .with_output_dir(self.output.clone())
            .with_prefix(self.prefix.clone())
            .with_extension(self.extension.clone())
            .with_begin_marker(self.begin.clone())
            .with_end_marker(self.end.clone())
    }

    pub fn verbosity_level(&self) -> u8 {
        if self.quiet {
            0
        } else {
            self.verbose
        }
    }
}
