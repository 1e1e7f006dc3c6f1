use crate::error::{Result, SlideSplitError};
use crate::extractor::{OutputManager, UnitNaming};
use crate::scanner::ExtractedUnit;
use std::fs;
use std::io::{BufWriter, Write};
use std::path::PathBuf;
use std::time::{Duration, Instant};

#[derive(Debug, Clone)]
pub struct ExtractionProgress {
    pub units_written: usize,
    pub total_units: usize,
    pub bytes_written: u64,
    pub current_file: Option<PathBuf>,
    pub start_time: Instant,
}

impl ExtractionProgress {
    pub fn new(total_units: usize) -> Self {
        Self {
            units_written: 0,
            total_units,
            bytes_written: 0,
            current_file: None,
            start_time: Instant::now(),
        }
    }

    pub fn update_file(&mut self, path: PathBuf, bytes: u64) {
        self.units_written += 1;
        self.bytes_written += bytes;
        self.current_file = Some(path);
    }

    pub fn is_complete(&self) -> bool {
        self.units_written == self.total_units
    }

    pub fn elapsed(&self) -> Duration {
        self.start_time.elapsed()
    }
}

pub struct UnitWriter {
    buffer_size: usize,
}

impl UnitWriter {
    pub fn new() -> Self {
        Self {
            buffer_size: 64 * 1024,
        }
    }

    /// Writes every unit in index order, calling `on_written` after each file.
    ///
    /// The first failure stops the run; files written before it stay on disk.
    pub fn write_units(
        &self,
        units: &[ExtractedUnit<'_>],
        output: &OutputManager,
        on_written: Option<&dyn Fn(&ExtractionProgress)>,
    ) -> Result<ExtractionProgress> {
        let naming = output.naming(units.len());
        let mut progress = ExtractionProgress::new(units.len());

        for unit in units {
            let path = self.write_unit(unit, output, &naming)?;
            progress.update_file(path, unit.len() as u64);

            if let Some(callback) = on_written {
                callback(&progress);
            }
        }

        Ok(progress)
    }

    fn write_unit(
        &self,
        unit: &ExtractedUnit<'_>,
        output: &OutputManager,
        naming: &UnitNaming,
    ) -> Result<PathBuf> {
        let path = output.unit_path(naming, unit.index);

        // Truncates any file left by an earlier run.
        let file = fs::File::create(&path).map_err(SlideSplitError::Io)?;
        let mut writer = BufWriter::with_capacity(self.buffer_size, file);
        writer
            .write_all(unit.text.as_bytes())
            .map_err(SlideSplitError::Io)?;
        writer.flush().map_err(SlideSplitError::Io)?;

        tracing::trace!(index = unit.index, path = %path.display(), bytes = unit.len(), "wrote unit");

        Ok(path)
    }
}

impl Default for UnitWriter {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scanner::{DelimiterPattern, SlideScanner, SourceDocument};
    use std::cell::RefCell;
    use tempfile::TempDir;

    fn document(text: &str) -> SourceDocument {
        SourceDocument::from_text("deck.tex", text)
    }

    fn scanner() -> SlideScanner {
        SlideScanner::new(DelimiterPattern::new("<s>", "</s>").unwrap())
    }

    #[test]
    fn test_units_written_verbatim() {
        let temp_dir = TempDir::new().unwrap();
        let output = OutputManager::new(temp_dir.path());
        let doc = document("<s>one</s>\n<s>two\n</s>");
        let units = scanner().scan(&doc);

        let progress = UnitWriter::new().write_units(&units, &output, None).unwrap();

        assert_eq!(progress.units_written, 2);
        assert!(progress.is_complete());
        assert_eq!(progress.bytes_written, (10 + 11) as u64);
        assert_eq!(
            fs::read_to_string(temp_dir.path().join("slide01.tex")).unwrap(),
            "<s>one</s>"
        );
        assert_eq!(
            fs::read_to_string(temp_dir.path().join("slide02.tex")).unwrap(),
            "<s>two\n</s>"
        );
    }

    #[test]
    fn test_existing_files_overwritten() {
        let temp_dir = TempDir::new().unwrap();
        let output = OutputManager::new(temp_dir.path());
        fs::write(
            temp_dir.path().join("slide01.tex"),
            "a much longer stale body",
        )
        .unwrap();

        let doc = document("<s>new</s>");
        let units = scanner().scan(&doc);
        UnitWriter::new().write_units(&units, &output, None).unwrap();

        assert_eq!(
            fs::read_to_string(temp_dir.path().join("slide01.tex")).unwrap(),
            "<s>new</s>"
        );
    }

    #[test]
    fn test_callback_sees_each_write() {
        let temp_dir = TempDir::new().unwrap();
        let output = OutputManager::new(temp_dir.path()).with_prefix("p");
        let doc = document("<s>1</s><s>2</s><s>3</s>");
        let units = scanner().scan(&doc);

        let seen = RefCell::new(Vec::new());
        let callback = |p: &ExtractionProgress| {
            seen.borrow_mut().push(p.units_written);
        };
        UnitWriter::new()
            .write_units(&units, &output, Some(&callback))
            .unwrap();

        assert_eq!(*seen.borrow(), vec![1, 2, 3]);
    }

    #[test]
    fn test_stops_at_first_failure() {
        let temp_dir = TempDir::new().unwrap();
        let output = OutputManager::new(temp_dir.path());
        // A directory where the second file should go makes that write fail.
        fs::create_dir(temp_dir.path().join("slide02.tex")).unwrap();

        let doc = document("<s>1</s><s>2</s><s>3</s>");
        let units = scanner().scan(&doc);
        let result = UnitWriter::new().write_units(&units, &output, None);

        assert!(matches!(result, Err(SlideSplitError::Io(_))));
        assert!(temp_dir.path().join("slide01.tex").is_file());
        assert!(!temp_dir.path().join("slide03.tex").exists());
    }

    #[test]
    fn test_three_digit_names_past_ninety_nine() {
        let temp_dir = TempDir::new().unwrap();
        let output = OutputManager::new(temp_dir.path());
        let text: String = (0..120).map(|i| format!("<s>{}</s>", i)).collect();
        let doc = document(&text);
        let units = scanner().scan(&doc);

        let progress = UnitWriter::new().write_units(&units, &output, None).unwrap();

        assert_eq!(progress.units_written, 120);
        assert!(temp_dir.path().join("slide001.tex").is_file());
        assert!(temp_dir.path().join("slide120.tex").is_file());
        assert_eq!(
            fs::read_to_string(temp_dir.path().join("slide100.tex")).unwrap(),
            "<s>99</s>"
        );
        assert!(!temp_dir.path().join("slide01.tex").exists());
        assert_eq!(fs::read_dir(temp_dir.path()).unwrap().count(), 120);
    }

    #[test]
    fn test_progress_tracking() {
        let mut progress = ExtractionProgress::new(4);
        assert!(progress.current_file.is_none());

        progress.update_file(PathBuf::from("slide01.tex"), 100);
        assert_eq!(progress.units_written, 1);
        assert_eq!(progress.bytes_written, 100);
        assert_eq!(progress.current_file, Some(PathBuf::from("slide01.tex")));
        assert!(!progress.is_complete());

        assert!(ExtractionProgress::new(0).is_complete());
    }
}
