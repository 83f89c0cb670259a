//! Voice activity detection over decoded PCM audio.

mod silero;
mod types;

pub use silero::{SileroVad, VoiceActivityDetector};
pub use types::{SpeechSegment, SpeechSegments, VadConfig};
