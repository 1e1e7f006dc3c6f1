pub mod delimiter_scanner;

pub use delimiter_scanner::{DelimiterPattern, ExtractedUnit, SlideScanner, SourceDocument};
