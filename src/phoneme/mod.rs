//! Phoneme sequences and grapheme-to-phoneme extraction.

mod extractor;
mod types;

pub use extractor::{JPreprocessExtractor, PhonemeExtractor};
pub use types::Phoneme;
