pub mod output_manager;
pub mod unit_writer;

pub use output_manager::{OutputManager, UnitNaming};
pub use unit_writer::{ExtractionProgress, UnitWriter};
