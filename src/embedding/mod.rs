//! Speaker embeddings: extraction and the binary wire format.

mod extractor;
mod types;

pub use extractor::{CamPlusPlusEmbedder, SpeakerEmbedderModel};
pub use types::Embedding;
