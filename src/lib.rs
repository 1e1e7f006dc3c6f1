pub mod cli;
pub mod config;
pub mod error;
pub mod extractor;
pub mod logging;
pub mod scanner;
pub mod ui;

// Public API re-exports
pub use cli::{Cli, OutputFormat};
pub use config::{CliOverrides, Config, MarkerConfig, OutputConfig, SourceConfig};
pub use error::{Result, SlideSplitError, UserFriendlyError};

// Core functionality re-exports
pub use extractor::{ExtractionProgress, OutputManager, UnitNaming, UnitWriter};
pub use scanner::{DelimiterPattern, ExtractedUnit, SlideScanner, SourceDocument};
pub use ui::{OutputFormatter, OutputMode, ProgressManager};

use console::Term;
use std::path::{Path, PathBuf};

/// Main library interface for SlideSplit functionality
pub struct SlideSplit {
    config: Config,
    output_formatter: OutputFormatter,
    progress_manager: ProgressManager,
}

/// A file the extraction would write, as reported by a dry run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlannedUnit {
    pub index: usize,
    pub path: PathBuf,
    pub bytes: usize,
    pub start_line: usize,
}

impl SlideSplit {
    pub fn new(config: Config, output_mode: OutputMode, verbose: u8, quiet: bool) -> Self {
        let output_formatter = OutputFormatter::new(output_mode, verbose, quiet);
        let show_progress =
            output_mode == OutputMode::Human && !quiet && Term::stdout().is_term();
        let progress_manager = ProgressManager::new(show_progress);

        Self {
            config,
            output_formatter,
            progress_manager,
        }
    }

    /// Create SlideSplit instance from CLI arguments
    pub fn from_cli(cli_args: &Cli) -> Result<Self> {
        let config = cli_args.load_config()?;
        let output_mode = match cli_args.output_format {
            OutputFormat::Human => OutputMode::Human,
            OutputFormat::Json => OutputMode::Json,
            OutputFormat::Plain => OutputMode::Plain,
        };

        Ok(Self::new(
            config,
            output_mode,
            cli_args.verbose,
            cli_args.quiet,
        ))
    }

    /// Read the source, scan it and write one file per matched slide.
    ///
    /// The source is read before the output directory is touched, so a
    /// missing input leaves the filesystem unchanged.
    pub fn extract_slides(&self) -> Result<ExtractionProgress> {
        let document = self.load_document()?;
        let scanner = SlideScanner::new(DelimiterPattern::from_config(&self.config.markers)?);
        self.output_formatter.debug(&format!(
            "Delimiters: {} ... {}",
            scanner.pattern().begin(),
            scanner.pattern().end()
        ));
        let units = scanner.scan(&document);

        self.output_formatter
            .info(&format!("Found {} slides", units.len()));
        for unit in &units {
            tracing::debug!(
                index = unit.index,
                line = unit.start_line(&document),
                bytes = unit.len(),
                "matched slide"
            );
        }

        let output = OutputManager::from_config(&self.config.output);
        output.initialize()?;

        let progress = self.write_units(&units, &output)?;
        self.output_formatter.print_extraction_summary(&progress);

        tracing::info!(
            input = %self.config.source.input.display(),
            output = %output.get_output_directory().display(),
            units = progress.units_written,
            "extraction finished"
        );

        Ok(progress)
    }

    /// Scan without writing anything and report the files that would be created.
    pub fn plan_extraction(&self) -> Result<Vec<PlannedUnit>> {
        let document = self.load_document()?;
        let scanner = SlideScanner::new(DelimiterPattern::from_config(&self.config.markers)?);
        let units = scanner.scan(&document);

        let output = OutputManager::from_config(&self.config.output);
        let naming = output.naming(units.len());

        Ok(units
            .iter()
            .map(|unit| PlannedUnit {
                index: unit.index,
                path: output.unit_path(&naming, unit.index),
                bytes: unit.len(),
                start_line: unit.start_line(&document),
            })
            .collect())
    }

    fn load_document(&self) -> Result<SourceDocument> {
        self.output_formatter.start_operation(&format!(
            "Reading {}",
            self.config.source.input.display()
        ));
        SourceDocument::load(&self.config.source.input)
    }

    fn write_units(
        &self,
        units: &[ExtractedUnit<'_>],
        output: &OutputManager,
    ) -> Result<ExtractionProgress> {
        let unit_progress = self.progress_manager.create_unit_progress(units.len() as u64);
        let on_written = {
            let pb = unit_progress.clone();
            let formatter = &self.output_formatter;
            move |progress: &ExtractionProgress| {
                if let Some(ref path) = progress.current_file {
                    let bytes = units
                        .get(progress.units_written - 1)
                        .map_or(0, |u| u.len() as u64);
                    pb.suspend(|| formatter.unit_created(progress.units_written, path, bytes));
                }
                ui::progress::update_unit_progress(&pb, progress);
            }
        };

        let result = UnitWriter::new().write_units(units, output, Some(&on_written));

        match result {
            Ok(progress) => {
                ui::progress::finish_unit_progress(&unit_progress);
                Ok(progress)
            }
            Err(e) => {
                unit_progress.abandon();
                Err(e)
            }
        }
    }

    /// Generate sample configuration file
    pub fn generate_sample_config<P: AsRef<Path>>(output_path: P) -> Result<()> {
        let sample_config = Config::create_sample_config();
        std::fs::write(output_path.as_ref(), sample_config).map_err(SlideSplitError::Io)?;
        Ok(())
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn output_formatter(&self) -> &OutputFormatter {
        &self.output_formatter
    }

    /// Handle error with user-friendly output
    pub fn handle_error(&self, error: &SlideSplitError) {
        self.output_formatter.print_user_friendly_error(error);
    }
}

/// Extract every `begin_marker ... end_marker` span of `input_path` into
/// `output_dir`, using the default `slide` prefix and `.tex` extension.
///
/// Returns the number of files written.
pub fn extract<P, Q>(
    input_path: P,
    output_dir: Q,
    begin_marker: &str,
    end_marker: &str,
) -> Result<usize>
where
    P: AsRef<Path>,
    Q: AsRef<Path>,
{
    let mut config = Config::default();
    config.source.input = input_path.as_ref().to_path_buf();
    config.output.directory = output_dir.as_ref().to_path_buf();
    config.markers.begin = begin_marker.to_string();
    config.markers.end = end_marker.to_string();
    config.validate()?;

    let slidesplit = SlideSplit::new(config, OutputMode::Plain, 0, false);
    let progress = slidesplit.extract_slides()?;
    Ok(progress.units_written)
}

/// Get version information
pub fn version_info() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    const DECK: &str = "\\documentclass{beamer}\n\
\\begin{document}\n\
\\begin{frame}\\frametitle{Intro}\nHello\n\\end{frame}\n\
%% \\begin{frame} in a comment without its end\n\
\\begin{frame}\\frametitle{Plots}\n\\begin{tikzpicture}\\end{tikzpicture}\n\\end{frame}\n\
\\begin{frame}Bye\\end{frame}\n\
\\end{document}\n";

    fn quiet_instance(input: &Path, output: &Path) -> SlideSplit {
        let mut config = Config::default();
        config.source.input = input.to_path_buf();
        config.output.directory = output.to_path_buf();
        SlideSplit::new(config, OutputMode::Plain, 0, true)
    }

    fn sorted_names(dir: &Path) -> Vec<String> {
        let mut names: Vec<String> = fs::read_dir(dir)
            .unwrap()
            .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        names.sort();
        names
    }

    #[test]
    fn test_extract_contract() {
        let temp_dir = TempDir::new().unwrap();
        let input = temp_dir.path().join("deck.tex");
        let output = temp_dir.path().join("slides");
        fs::write(&input, "begin A end B begin C end").unwrap();

        let count = extract(&input, &output, "begin", "end").unwrap();

        assert_eq!(count, 2);
        assert_eq!(sorted_names(&output), vec!["slide01.tex", "slide02.tex"]);
        assert_eq!(fs::read_to_string(output.join("slide01.tex")).unwrap(), "begin A end");
        assert_eq!(fs::read_to_string(output.join("slide02.tex")).unwrap(), "begin C end");
    }

    #[test]
    fn test_round_trip_containment() {
        let temp_dir = TempDir::new().unwrap();
        let input = temp_dir.path().join("deck.tex");
        let output = temp_dir.path().join("slides");
        fs::write(&input, DECK).unwrap();

        let progress = quiet_instance(&input, &output).extract_slides().unwrap();
        assert_eq!(progress.units_written, 3);

        let names = sorted_names(&output);
        assert_eq!(names, vec!["slide01.tex", "slide02.tex", "slide03.tex"]);

        let joined: String = names
            .iter()
            .map(|n| fs::read_to_string(output.join(n)).unwrap())
            .collect();

        let document = SourceDocument::from_text("deck.tex", DECK);
        let pattern = DelimiterPattern::new(r"\begin{frame}", r"\end{frame}").unwrap();
        let expected: String = SlideScanner::new(pattern)
            .scan(&document)
            .iter()
            .map(|u| u.text)
            .collect();

        assert_eq!(joined, expected);
        assert!(fs::read_to_string(output.join("slide01.tex"))
            .unwrap()
            .contains("Intro"));
        // The stray commented begin marker pairs with the next end marker.
        assert!(fs::read_to_string(output.join("slide02.tex"))
            .unwrap()
            .starts_with("\\begin{frame} in a comment"));
    }

    #[test]
    fn test_zero_matches_still_creates_directory() {
        let temp_dir = TempDir::new().unwrap();
        let input = temp_dir.path().join("deck.tex");
        let output = temp_dir.path().join("a").join("b");
        fs::write(&input, "no frames here").unwrap();

        let count = extract(&input, &output, "begin", "end").unwrap();

        assert_eq!(count, 0);
        assert!(output.is_dir());
        assert!(sorted_names(&output).is_empty());
    }

    #[test]
    fn test_missing_input_creates_nothing() {
        let temp_dir = TempDir::new().unwrap();
        let output = temp_dir.path().join("slides");

        let result = extract(temp_dir.path().join("missing.tex"), &output, "begin", "end");

        assert!(matches!(result, Err(SlideSplitError::InputNotFound { .. })));
        assert!(!output.exists());
    }

    #[test]
    fn test_rerun_overwrites() {
        let temp_dir = TempDir::new().unwrap();
        let input = temp_dir.path().join("deck.tex");
        let output = temp_dir.path().join("slides");

        fs::write(&input, "<s>first</s><s>second</s>").unwrap();
        assert_eq!(extract(&input, &output, "<s>", "</s>").unwrap(), 2);

        fs::write(&input, "<s>replaced</s>").unwrap();
        assert_eq!(extract(&input, &output, "<s>", "</s>").unwrap(), 1);

        assert_eq!(
            fs::read_to_string(output.join("slide01.tex")).unwrap(),
            "<s>replaced</s>"
        );
        // No cleanup of higher indices from the earlier run.
        assert_eq!(
            fs::read_to_string(output.join("slide02.tex")).unwrap(),
            "<s>second</s>"
        );
    }

    #[test]
    fn test_empty_marker_rejected() {
        let temp_dir = TempDir::new().unwrap();
        let input = temp_dir.path().join("deck.tex");
        fs::write(&input, "x").unwrap();

        let result = extract(&input, temp_dir.path().join("out"), "", "end");
        assert!(matches!(result, Err(SlideSplitError::Config { .. })));
    }

    #[test]
    fn test_plan_extraction_writes_nothing() {
        let temp_dir = TempDir::new().unwrap();
        let input = temp_dir.path().join("deck.tex");
        let output = temp_dir.path().join("slides");
        fs::write(&input, DECK).unwrap();

        let plan = quiet_instance(&input, &output).plan_extraction().unwrap();

        assert_eq!(plan.len(), 3);
        assert_eq!(plan[0].index, 1);
        assert_eq!(plan[0].path, output.join("slide01.tex"));
        assert_eq!(plan[0].start_line, 3);
        assert_eq!(plan[2].path, output.join("slide03.tex"));
        assert!(!output.exists());
    }

    #[test]
    fn test_sample_config_generation() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("sample.toml");

        SlideSplit::generate_sample_config(&config_path).unwrap();

        let content = fs::read_to_string(&config_path).unwrap();
        assert!(content.contains("[markers]"));
        assert!(content.contains("[output]"));
    }

    #[test]
    fn test_version_info() {
        assert!(!version_info().is_empty());
    }
}
