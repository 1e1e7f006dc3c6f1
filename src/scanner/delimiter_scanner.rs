use crate::config::MarkerConfig;
use crate::error::{Result, SlideSplitError};
use regex::Regex;
use std::fs;
use std::ops::Range;
use std::path::{Path, PathBuf};

/// The whole source document, read once and never modified.
#[derive(Debug, Clone)]
pub struct SourceDocument {
    path: PathBuf,
    content: String,
}

impl SourceDocument {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .map_err(|e| SlideSplitError::from_input_error(path, e))?;

        tracing::debug!(path = %path.display(), bytes = content.len(), "loaded source document");

        Ok(Self {
            path: path.to_path_buf(),
            content,
        })
    }

    pub fn from_text<P: Into<PathBuf>, S: Into<String>>(path: P, content: S) -> Self {
        Self {
            path: path.into(),
            content: content.into(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn len(&self) -> usize {
        self.content.len()
    }

    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }
}

/// A literal begin/end marker pair.
///
/// Markers are escaped before compilation, so `\begin{frame}` matches the
/// text `\begin{frame}` and never acts as a regex.
#[derive(Debug, Clone)]
pub struct DelimiterPattern {
    begin: String,
    end: String,
    regex: Regex,
}

impl DelimiterPattern {
    pub fn new<B: Into<String>, E: Into<String>>(begin: B, end: E) -> Result<Self> {
        let begin = begin.into();
        let end = end.into();

        if begin.is_empty() || end.is_empty() {
            return Err(SlideSplitError::Config {
                message: "Begin and end markers must both be non-empty".to_string(),
            });
        }

        // (?s) lets `.` cross line breaks; `*?` stops at the first end marker.
        let source = format!("(?s){}.*?{}", regex::escape(&begin), regex::escape(&end));
        let regex = Regex::new(&source)?;

        Ok(Self { begin, end, regex })
    }

    pub fn from_config(config: &MarkerConfig) -> Result<Self> {
        Self::new(config.begin.clone(), config.end.clone())
    }

    pub fn begin(&self) -> &str {
        &self.begin
    }

    pub fn end(&self) -> &str {
        &self.end
    }
}

/// One matched span and its 1-based position among all matches.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractedUnit<'a> {
    pub index: usize,
    pub text: &'a str,
    pub span: Range<usize>,
}

impl ExtractedUnit<'_> {
    pub fn len(&self) -> usize {
        self.text.len()
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// 1-based line number of the first character, for diagnostics.
    pub fn start_line(&self, document: &SourceDocument) -> usize {
        document.content()[..self.span.start].matches('\n').count() + 1
    }
}

pub struct SlideScanner {
    pattern: DelimiterPattern,
}

impl SlideScanner {
    pub fn new(pattern: DelimiterPattern) -> Self {
        Self { pattern }
    }

    pub fn pattern(&self) -> &DelimiterPattern {
        &self.pattern
    }

    /// Returns every non-overlapping match, leftmost first.
    ///
    /// Text outside a complete begin/end pair is skipped; a begin marker with
    /// no later end marker yields nothing.
    pub fn scan<'a>(&self, document: &'a SourceDocument) -> Vec<ExtractedUnit<'a>> {
        let units: Vec<ExtractedUnit<'a>> = self
            .pattern
            .regex
            .find_iter(document.content())
            .enumerate()
            .map(|(i, m)| ExtractedUnit {
                index: i + 1,
                text: m.as_str(),
                span: m.range(),
            })
            .collect();

        tracing::debug!(
            path = %document.path().display(),
            begin = self.pattern.begin(),
            end = self.pattern.end(),
            matches = units.len(),
            "scanned source document"
        );

        units
    }
}
