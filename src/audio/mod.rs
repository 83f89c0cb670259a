//! Audio decoding, the canonical PCM representation, and duration validation.

mod loader;
mod pcm;
mod validator;

pub use loader::{AudioDecoder, AudioInput, SymphoniaDecoder};
pub use pcm::PcmAudio;
pub use validator::{validate_audio, validate_extension, SUPPORTED_EXTENSIONS};
